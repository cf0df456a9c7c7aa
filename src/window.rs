use std::sync::Arc;

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    config::ViewerConfig, input::HeldKeys, rendering::renderer::Renderer, viewer::ViewerState,
};

struct App {
    config: ViewerConfig,
    renderer: Option<Renderer>,
    viewer: ViewerState,
    held_keys: HeldKeys,
    init_error: Option<anyhow::Error>,
}

impl App {
    fn new(config: ViewerConfig, viewer: ViewerState) -> Self {
        Self {
            config,
            renderer: None,
            viewer,
            held_keys: HeldKeys::new(),
            init_error: None,
        }
    }

    fn init_renderer(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Renderer> {
        let window_config = &self.config.window;
        let window_attributes = Window::default_attributes()
            .with_title(window_config.title)
            .with_inner_size(LogicalSize::new(window_config.width, window_config.height));

        let window = event_loop
            .create_window(window_attributes)
            .context("Failed to create window")?;

        pollster::block_on(Renderer::new(
            Arc::new(window),
            &self.viewer,
            &self.config.shaders,
        ))
        .context("Failed to initialize renderer")
    }

    /// One iteration of the render loop: input, state update, draw, present, quit check.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        self.viewer.process_input(&self.held_keys);
        self.viewer.update();

        match renderer.render(&self.viewer) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.resize(renderer.size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory");
                event_loop.exit();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timeout");
            }
            Err(other) => {
                log::error!("Unexpected error: {:?}", other);
            }
        }

        if self.viewer.quit_requested() {
            event_loop.exit();
        } else {
            renderer.window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }

        match self.init_renderer(event_loop) {
            Ok(renderer) => {
                renderer.window.request_redraw();
                self.renderer = Some(renderer);
            }
            Err(e) => {
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.held_keys.handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => (),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.renderer.take().is_some() {
            log::info!("Renderer released");
        }
    }
}

pub fn run(config: ViewerConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let viewer = ViewerState::new(&config);

    println!("{}", viewer.bindings.banner());

    let mut app = App::new(config, viewer);
    event_loop.run_app(&mut app)?;

    match app.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
