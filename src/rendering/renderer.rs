use std::{collections::HashMap, sync::Arc};

use anyhow::Context;
use wgpu::CommandEncoderDescriptor;
use winit::{dpi::PhysicalSize, window::Window};

use crate::{
    camera::CameraUniform,
    config::{GraphicsConfig, ShaderConfig},
    rendering::{
        render_mesh::{Instance, InstanceBuffer, RenderMesh},
        scene_pass::{ScenePass, SceneTextureViews},
        shader_loader::{PipelineCacheBuilder, ShaderLoader},
        texture::DepthTexture,
    },
    scene::MeshId,
    viewer::ViewerState,
};

pub struct Renderer {
    // Fields drop in declaration order: the reverse of acquisition in `new`.
    shader_loader: ShaderLoader,
    scene_pass: ScenePass,
    instances: Vec<Instance>,
    instance_buffer: InstanceBuffer,
    render_meshes: HashMap<MeshId, RenderMesh>,
    depth_texture: DepthTexture,
    camera_uniform: CameraUniform,
    camera_uniform_buffer: wgpu::Buffer,
    surface_config: wgpu::SurfaceConfiguration,
    queue: wgpu::Queue,
    device: wgpu::Device,
    surface: wgpu::Surface<'static>,

    pub size: PhysicalSize<u32>,
    pub window: Arc<Window>,
}

impl Renderer {
    pub async fn new(
        window: Arc<Window>,
        viewer: &ViewerState,
        shader_config: &ShaderConfig,
    ) -> anyhow::Result<Renderer> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: GraphicsConfig::backends(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow::anyhow!("No suitable graphics adapter: {:?}", e))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                label: None,
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to create graphics device")?;

        let info = adapter.get_info();
        println!("INFO: Graphics successfully initialized");
        println!(
            "INFO: {} ({:?}, {} {})\n",
            info.name, info.backend, info.driver, info.driver_info
        );

        let surface_config = configure_surface(&device, &adapter, &surface, size)?;

        let mut camera_uniform = CameraUniform::default();
        camera_uniform.update(size, &viewer.camera);
        let camera_uniform_buffer = camera_uniform.create_buffer(&device);

        let depth_texture = DepthTexture::new(&device, size, "Depth Texture");

        let render_meshes = viewer
            .scene
            .meshes
            .iter()
            .map(|(id, mesh)| {
                println!(
                    "Loaded mesh {} with {} triangles",
                    mesh.name,
                    mesh.indices.len() / 3
                );
                (id, RenderMesh::from_mesh(&device, mesh))
            })
            .collect();

        let instance_buffer = InstanceBuffer::new(&device, viewer.scene.objects.len());

        let mut cache_builder = PipelineCacheBuilder::new();
        let scene_pass = ScenePass::create(
            &device,
            &camera_uniform_buffer,
            surface_config.format,
            shader_config,
            &mut cache_builder,
        )?;
        let shader_loader = ShaderLoader::new(&device, shader_config.folder, cache_builder)?;

        Ok(Self {
            shader_loader,
            scene_pass,
            instances: Vec::new(),
            instance_buffer,
            render_meshes,
            depth_texture,
            camera_uniform,
            camera_uniform_buffer,
            surface_config,
            queue,
            device,
            surface,
            size,
            window,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            log::debug!("Resizing surface to {}x{}", new_size.width, new_size.height);
            self.size = new_size;
            self.surface_config.width = new_size.width;
            self.surface_config.height = new_size.height;
            self.surface.configure(&self.device, &self.surface_config);
            self.depth_texture.resize(&self.device, new_size);
        }
    }

    /// Records and submits one frame: matrices, per-object instances, one draw
    /// per scene object, present.
    pub fn render(&mut self, viewer: &ViewerState) -> Result<(), wgpu::SurfaceError> {
        self.shader_loader.load_pending_shaders();

        self.camera_uniform.update(self.size, &viewer.camera);
        self.camera_uniform
            .update_buffer(&self.queue, &self.camera_uniform_buffer);

        self.instances.clear();
        self.instances.extend(
            viewer
                .scene
                .objects
                .iter()
                .take(self.instance_buffer.capacity())
                .map(|(_, object)| Instance::from_object(object)),
        );
        self.instance_buffer.write(&self.queue, &self.instances);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.scene_pass.render(
            &SceneTextureViews {
                color: view.clone(),
                depth: self.depth_texture.view().clone(),
            },
            &mut encoder,
            &self.shader_loader.cache,
            |render_pass| {
                self.instance_buffer.bind(render_pass);

                for (index, (_, object)) in viewer
                    .scene
                    .objects
                    .iter()
                    .take(self.instance_buffer.capacity())
                    .enumerate()
                {
                    let Some(mesh) = self.render_meshes.get(&object.mesh_id) else {
                        continue;
                    };

                    let instance = index as u32;
                    render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    render_pass
                        .set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..mesh.num_indices, 0, instance..instance + 1);
                }
            },
        );

        self.queue.submit([encoder.finish()]);
        output.present();

        Ok(())
    }
}

fn configure_surface(
    device: &wgpu::Device,
    adapter: &wgpu::Adapter,
    surface: &wgpu::Surface,
    size: PhysicalSize<u32>,
) -> anyhow::Result<wgpu::SurfaceConfiguration> {
    let surface_caps = surface.get_capabilities(adapter);
    let surface_format = surface_caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| surface_caps.formats.first())
        .copied()
        .context("Surface reports no supported formats")?;

    let config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: surface_format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode: surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto),
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };

    surface.configure(device, &config);

    Ok(config)
}
