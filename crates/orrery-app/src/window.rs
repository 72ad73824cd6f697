//! Window creation and the winit event loop.
//!
//! [`App`] implements [`ApplicationHandler`]: it brings up the GPU on resume,
//! routes input into the pointer/camera state, and drives one composed frame
//! per `RedrawRequested`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use orrery_config::Config;
use orrery_input::{KeyCommand, PointerState, command_for_key};
use orrery_render::{RenderContext, SurfaceError, init_render_context_blocking};
use orrery_scene::{OrbitCamera, Scene};

use crate::frame::FrameClock;
use crate::renderer::FrameRenderer;

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Application state driving the window, GPU, and scene.
pub struct App {
    config: Config,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    renderer: Option<FrameRenderer>,
    scene: Scene,
    camera: OrbitCamera,
    pointer: PointerState,
    clock: FrameClock,
    frames_since_log: u32,
    last_timing_log: Instant,
}

impl App {
    pub fn new(config: Config) -> Self {
        let camera = OrbitCamera {
            radius: config.camera.initial_radius,
            ..OrbitCamera::default()
        };
        Self {
            config,
            window: None,
            gpu: None,
            renderer: None,
            scene: Scene::new(),
            camera,
            pointer: PointerState::new(),
            clock: FrameClock::new(),
            frames_since_log: 0,
            last_timing_log: Instant::now(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let tick = self.clock.tick();

        // Fold the frame's accumulated pointer input into the orbit camera.
        let drag = self.pointer.drag_delta();
        if drag != glam::Vec2::ZERO {
            let s = self.config.camera.orbit_sensitivity;
            self.camera.apply_drag(drag.x * s, drag.y * s);
        }
        let scroll = self.pointer.scroll();
        if scroll != 0.0 {
            // Wheel up moves the camera inward.
            self.camera
                .apply_zoom(-scroll * self.config.camera.zoom_sensitivity);
        }
        self.pointer.clear_transients();

        let (Some(gpu), Some(renderer)) = (&self.gpu, &mut self.renderer) else {
            return;
        };

        renderer.poll_textures(gpu, &mut self.scene);
        let frame = self.scene.compose(tick.elapsed, &self.camera);

        match renderer.render(gpu, &frame) {
            Ok(()) => {}
            Err(SurfaceError::OutOfMemory) => {
                error!("GPU out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(SurfaceError::Lost) | Err(SurfaceError::Timeout) => {
                // Skip this frame; acquisition will be retried on the next.
            }
        }

        if self.config.debug.log_frame_timing {
            self.frames_since_log += 1;
            let since = self.last_timing_log.elapsed();
            if since >= Duration::from_secs(1) {
                info!(
                    "Frame timing: {:.1} fps over {:.2}s",
                    self.frames_since_log as f64 / since.as_secs_f64(),
                    since.as_secs_f64()
                );
                self.frames_since_log = 0;
                self.last_timing_log = Instant::now();
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = window_attributes_from_config(&self.config);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match init_render_context_blocking(window.clone(), self.config.window.vsync) {
            Ok(gpu) => {
                match FrameRenderer::new(&gpu, &self.config) {
                    Ok(renderer) => self.renderer = Some(renderer),
                    Err(e) => {
                        error!("Failed to build renderer: {e}");
                        event_loop.exit();
                        return;
                    }
                }
                self.gpu = Some(gpu);
            }
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        }

        info!(
            "Window created: {}x{}",
            self.config.window.width, self.config.window.height
        );
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
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
                if let (Some(gpu), Some(renderer)) = (&self.gpu, &mut self.renderer) {
                    renderer.resize(gpu, new_size.width, new_size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    match command_for_key(event.physical_key) {
                        Some(KeyCommand::Focus(body)) => {
                            info!("Focus changed to {body:?}");
                            self.camera.set_focus(body);
                        }
                        Some(KeyCommand::Quit) => {
                            info!("Quit requested");
                            event_loop.exit();
                        }
                        None => {}
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.pointer.on_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.pointer.on_scroll(delta);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}

/// Build the event loop and run the application to completion.
pub fn run(config: Config) -> Result<(), winit::error::EventLoopError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)
}
