//! Windowed driver: winit event loop, GPU presentation and input forwarding.

use std::sync::Arc;

use folio_config::Config;
use folio_render::{RenderContext, SceneRenderer, SurfaceError, init_render_context_blocking};
use tracing::{error, info, instrument};
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::reload::ConfigWatch;
use crate::scheduler::{FrameScheduler, FrameTick};

/// Window attributes for the configured size and title.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Ticks the scheduler on every redraw and asks for the next one afterwards.
///
/// `config.ron` is re-read whenever the window regains focus.
pub struct WindowDriver {
    config: Config,
    watch: ConfigWatch,
    scheduler: FrameScheduler,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    renderer: SceneRenderer,
}

impl WindowDriver {
    pub fn new(config: Config, watch: ConfigWatch, scheduler: FrameScheduler) -> Self {
        let renderer = SceneRenderer::new(scheduler.clear_color());
        Self {
            config,
            watch,
            scheduler,
            window: None,
            gpu: None,
            renderer,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(width, height);
        }
        self.scheduler.resize(width, height);
        info!("Window resized to {width}x{height}");
    }

    fn reload_config(&mut self) {
        if let Some(config) = self.watch.poll() {
            self.scheduler.apply_config(&config);
            self.config = config;
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let report = self.scheduler.tick();
        if !report.redraw_requested {
            return;
        }

        if let Some(gpu) = &self.gpu {
            match self.renderer.render(gpu) {
                Ok(_) => {}
                Err(SurfaceError::OutOfMemory) => {
                    error!("GPU out of memory, shutting down");
                    event_loop.exit();
                    return;
                }
                Err(e) => error!("Frame dropped: {e}"),
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for WindowDriver {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(window_attributes_from_config(&self.config)) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match init_render_context_blocking(window.clone(), self.config.window.vsync) {
            Ok(ctx) => self.gpu = Some(ctx),
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        }

        let size = window.inner_size();
        self.scheduler.resize(size.width.max(1), size.height.max(1));
        self.scheduler.start();
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::Focused(true) => self.reload_config(),
            WindowEvent::KeyboardInput { event, .. } => {
                self.scheduler.input_mut().keyboard.process_event(&event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.scheduler
                    .input_mut()
                    .pointer
                    .on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.scheduler.input_mut().pointer.on_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scheduler.input_mut().pointer.on_scroll(delta);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Runs the windowed app until the window closes.
#[instrument(skip_all)]
pub fn run_windowed(
    config: Config,
    watch: ConfigWatch,
    scheduler: FrameScheduler,
) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::new()?;
    let mut driver = WindowDriver::new(config, watch, scheduler);
    event_loop.run_app(&mut driver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_attributes_from_config() {
        let mut config = Config::default();
        config.window.title = "Portfolio".to_string();
        config.window.width = 800;
        config.window.height = 600;
        let attrs = window_attributes_from_config(&config);
        assert_eq!(attrs.title, "Portfolio");
        assert_eq!(
            attrs.inner_size,
            Some(winit::dpi::Size::Logical(winit::dpi::LogicalSize::new(800.0, 600.0)))
        );
    }
}
