//! A [`RenderSurface`] backed by a winit window and the wgpu wireframe renderer

use crate::camera::{Camera, InputState};
use crate::surface::RenderSurface;
use instant::Instant;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};
use wireview_core::{Color, Error, Point3f, Result};
use wireview_gpu::{FrameGeometry, RenderConfig, SphereMesh, WireframeRenderer};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowBuilder},
};

/// An on-screen window polled once per frame
///
/// Draw calls are batched into a [`FrameGeometry`] and submitted to the GPU in
/// [`end_frame`](RenderSurface::end_frame).
pub struct WindowSurface {
    // Dropped before the window it presents to
    renderer: WireframeRenderer<'static>,
    window: Arc<Window>,
    event_loop: EventLoop<()>,
    geometry: FrameGeometry,
    sphere: SphereMesh,
    input: InputState,
    close_requested: bool,
    background: Color,
    frame_duration: Option<Duration>,
    last_frame: Instant,
}

impl WindowSurface {
    /// Open a `width` x `height` window titled `title`
    pub fn open(title: &str, width: u32, height: u32) -> Result<Self> {
        let event_loop = EventLoop::new()
            .map_err(|e| Error::Visualization(format!("Failed to create event loop: {}", e)))?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(title)
                .with_inner_size(PhysicalSize::new(width, height))
                .build(&event_loop)
                .map_err(|e| Error::Visualization(format!("Failed to create window: {}", e)))?,
        );

        let size = window.inner_size();
        let renderer = pollster::block_on(WireframeRenderer::new(
            window.clone(),
            size.width.max(1),
            size.height.max(1),
            RenderConfig::default(),
        ))?;
        info!("Opened {}x{} window '{}'", size.width, size.height, title);

        Ok(Self {
            renderer,
            window,
            event_loop,
            geometry: FrameGeometry::new(),
            sphere: SphereMesh::default(),
            input: InputState::default(),
            close_requested: false,
            background: Color::WHITE,
            frame_duration: None,
            last_frame: Instant::now(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn pump(&mut self) {
        let Self {
            event_loop,
            renderer,
            input,
            close_requested,
            ..
        } = self;

        let status = event_loop.pump_events(Some(Duration::ZERO), |event, _target| {
            if let Event::WindowEvent { event, .. } = event {
                match event {
                    WindowEvent::CloseRequested => *close_requested = true,
                    WindowEvent::Resized(size) => renderer.resize(size.width, size.height),
                    WindowEvent::Focused(false) => *input = InputState::default(),
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(code),
                                state,
                                ..
                            },
                        ..
                    } => {
                        let pressed = state == ElementState::Pressed;
                        match code {
                            KeyCode::ArrowRight => input.increase = pressed,
                            KeyCode::ArrowLeft => input.decrease = pressed,
                            KeyCode::Escape if pressed => *close_requested = true,
                            _ => {}
                        }
                    }
                    _ => {}
                }
            }
        });

        if let PumpStatus::Exit(code) = status {
            debug!("Event loop exited with code {}", code);
            self.close_requested = true;
        }
    }
}

impl RenderSurface for WindowSurface {
    fn set_target_fps(&mut self, fps: u32) {
        self.frame_duration = (fps > 0).then(|| Duration::from_secs_f64(1.0 / fps as f64));
    }

    fn should_close(&mut self) -> bool {
        self.pump();
        self.close_requested
    }

    fn input(&self) -> InputState {
        self.input
    }

    fn begin_frame(&mut self) {
        self.geometry.clear();
    }

    fn clear(&mut self, color: Color) {
        self.background = color;
    }

    fn begin_mode_3d(&mut self, camera: &Camera) {
        let aspect_ratio = self.renderer.aspect_ratio();
        self.renderer
            .update_camera(camera.view_matrix(), camera.projection_matrix(aspect_ratio));
    }

    fn draw_line_3d(&mut self, start: Point3f, end: Point3f, color: Color) {
        self.geometry.push_line(&start, &end, color);
    }

    fn draw_sphere(&mut self, center: Point3f, radius: f32, color: Color) {
        self.geometry.push_sphere(&center, radius, color, &self.sphere);
    }

    fn end_mode_3d(&mut self) {}

    fn end_frame(&mut self) {
        if let Err(e) = self.renderer.render(&self.geometry, self.background) {
            error!("Render failed, closing window: {}", e);
            self.close_requested = true;
        }

        if let Some(budget) = self.frame_duration {
            let elapsed = self.last_frame.elapsed();
            if elapsed < budget {
                std::thread::sleep(budget - elapsed);
            }
        }
        self.last_frame = Instant::now();
    }

    fn close(&mut self) {
        self.window.set_visible(false);
        self.geometry.clear();
        debug!("Window closed");
    }
}
