use std::{
    path::{Path, PathBuf},
    sync::{
        mpsc::{self, channel},
        Arc,
    },
    time::Duration,
};

use anyhow::Context;
use id_arena::{Arena, Id};
use notify_debouncer_mini::{
    new_debouncer_opt,
    notify::{RecommendedWatcher, RecursiveMode},
    DebounceEventResult, DebouncedEventKind, Debouncer,
};
use pollster::block_on;
use wgpu::{PollType, RenderPipeline};

type PipelineFactory = Box<
    dyn Sync
        + Send
        + Fn(&wgpu::Device, &ShaderDefinition, &ShaderSources) -> anyhow::Result<wgpu::RenderPipeline>,
>;

/// A vertex/fragment source pair linked into one pipeline.
#[derive(Debug, Clone)]
pub struct ShaderDefinition {
    pub name: &'static str,
    pub vertex_path: &'static str,
    pub fragment_path: &'static str,
}

impl ShaderDefinition {
    fn uses_file(&self, path: &Path) -> bool {
        path.ends_with(self.vertex_path) || path.ends_with(self.fragment_path)
    }
}

pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

pub struct ShaderEntry {
    pipeline_id: PipelineId,
    def: ShaderDefinition,
    factory: PipelineFactory,
}

pub type PipelineId = Id<PipelineCacheEntry>;

#[derive(Default)]
pub struct PipelineCacheEntry(Option<wgpu::RenderPipeline>);

impl PipelineCacheEntry {
    pub fn set_pipeline(&mut self, pipeline: wgpu::RenderPipeline) {
        self.0 = Some(pipeline);
    }
}

pub struct PipelineCacheBuilder {
    shaders: Arena<ShaderEntry>,
    pipelines: Arena<PipelineCacheEntry>,
}

impl PipelineCacheBuilder {
    pub fn new() -> Self {
        Self {
            shaders: Arena::new(),
            pipelines: Arena::new(),
        }
    }

    pub fn add_shader(
        &mut self,
        shader_def: ShaderDefinition,
        factory: PipelineFactory,
    ) -> PipelineId {
        let pipeline_id = self.pipelines.alloc(PipelineCacheEntry::default());
        self.shaders.alloc(ShaderEntry {
            pipeline_id,
            def: shader_def,
            factory,
        });
        pipeline_id
    }

    pub fn build(self) -> PipelineCache {
        PipelineCache {
            shaders: Arc::new(self.shaders),
            pipelines: self.pipelines,
        }
    }
}

pub struct PipelineCache {
    shaders: Arc<Arena<ShaderEntry>>,
    pipelines: Arena<PipelineCacheEntry>,
}

impl PipelineCache {
    pub fn get(&self, id: PipelineId) -> Option<&RenderPipeline> {
        self.pipelines.get(id).and_then(|entry| entry.0.as_ref())
    }

    fn get_entry_mut(&mut self, id: PipelineId) -> Option<&mut PipelineCacheEntry> {
        self.pipelines.get_mut(id)
    }
}

type ReloadedPipeline = (&'static str, PipelineId, wgpu::RenderPipeline);

/// Compiles every registered shader up front, then recompiles them in the
/// watcher thread whenever one of their source files changes.
pub struct ShaderLoader {
    pub cache: PipelineCache,
    receiver: mpsc::Receiver<ReloadedPipeline>,
    _debouncer: Option<Debouncer<RecommendedWatcher>>,
}

impl ShaderLoader {
    pub fn new(
        device: &wgpu::Device,
        shader_folder: impl Into<PathBuf>,
        cache_builder: PipelineCacheBuilder,
    ) -> anyhow::Result<Self> {
        let shader_folder = shader_folder.into();
        let mut cache = cache_builder.build();

        let shaders = cache.shaders.clone();
        for (_, shader) in shaders.iter() {
            let pipeline = compile_files(device, &shader_folder, &shader.def, &shader.factory)
                .with_context(|| format!("Failed to compile shader: {}", shader.def.name))?;

            cache
                .get_entry_mut(shader.pipeline_id)
                .context("Shader registered without a pipeline slot")?
                .set_pipeline(pipeline);
        }

        let (send_new_pipelines, recv_new_pipelines) = channel();

        let debouncer = match watch_shader_folder(
            device.clone(),
            &shader_folder,
            shaders,
            send_new_pipelines,
        ) {
            Ok(debouncer) => Some(debouncer),
            Err(e) => {
                log::warn!("Shader hot reload disabled: {:#}", e);
                None
            }
        };

        Ok(Self {
            cache,
            receiver: recv_new_pipelines,
            _debouncer: debouncer,
        })
    }

    pub fn load_pending_shaders(&mut self) {
        while let Ok((name, pipeline_id, pipeline)) = self.receiver.try_recv() {
            if let Some(entry) = self.cache.get_entry_mut(pipeline_id) {
                log::info!("Shader reloaded: {}", name);
                entry.set_pipeline(pipeline);
            }
        }
    }
}

fn watch_shader_folder(
    device: wgpu::Device,
    shader_folder: &Path,
    shaders: Arc<Arena<ShaderEntry>>,
    sender: mpsc::Sender<ReloadedPipeline>,
) -> anyhow::Result<Debouncer<RecommendedWatcher>> {
    let absolute_shader_folder = shader_folder
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", shader_folder.display()))?;
    let watched_folder = absolute_shader_folder.clone();

    let mut debouncer: Debouncer<RecommendedWatcher> = new_debouncer_opt(
        notify_debouncer_mini::Config::default().with_timeout(Duration::from_millis(100)),
        move |res: DebounceEventResult| match res {
            Ok(events) => {
                for event in events {
                    if event.kind != DebouncedEventKind::Any {
                        continue;
                    }

                    let Some((_, entry)) = shaders
                        .iter()
                        .find(|(_, entry)| entry.def.uses_file(&event.path))
                    else {
                        continue;
                    };

                    match compile_files(&device, &watched_folder, &entry.def, &entry.factory) {
                        Ok(pipeline) => {
                            if sender
                                .send((entry.def.name, entry.pipeline_id, pipeline))
                                .is_err()
                            {
                                log::debug!("Renderer gone, dropping reloaded shader");
                            }
                        }
                        // Keep the previous pipeline; the next save gets another try.
                        Err(e) => log::error!("Failed to reload shader: {:#}", e),
                    }
                }
            }
            Err(e) => log::error!("Error debouncing shader changes: {}", e),
        },
    )
    .context("Failed to create shader file watcher")?;

    debouncer
        .watcher()
        .watch(&absolute_shader_folder, RecursiveMode::Recursive)
        .context("Failed to watch shader folder")?;

    Ok(debouncer)
}

fn compile_files(
    device: &wgpu::Device,
    shader_folder: &Path,
    shader_def: &ShaderDefinition,
    factory: &PipelineFactory,
) -> anyhow::Result<wgpu::RenderPipeline> {
    let read = |file: &str| {
        let path = shader_folder.join(file);
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read shader file {}", path.display()))
    };

    let sources = ShaderSources {
        vertex: read(shader_def.vertex_path)?,
        fragment: read(shader_def.fragment_path)?,
    };

    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let pipeline = factory(device, shader_def, &sources);

    let polled = device.poll(PollType::Wait);
    let error = block_on(device.pop_error_scope());
    polled.context("Failed to poll device after shader compilation.")?;

    if let Some(error) = error {
        return Err(anyhow::anyhow!(
            "Shader compilation failed for {}: {}",
            shader_def.name,
            error
        ));
    };

    pipeline
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_definition_matches_both_stage_files() {
        let def = ShaderDefinition {
            name: "Scene",
            vertex_path: "vertex.wgsl",
            fragment_path: "fragment.wgsl",
        };

        assert!(def.uses_file(Path::new("/work/assets/shaders/vertex.wgsl")));
        assert!(def.uses_file(Path::new("/work/assets/shaders/fragment.wgsl")));
        assert!(!def.uses_file(Path::new("/work/assets/shaders/other.wgsl")));
        assert!(!def.uses_file(Path::new("/work/assets/shaders/my_vertex.wgsl")));
    }
}
