//! Poll, update, draw: the per-frame driver

use crate::camera::CameraController;
use crate::config::ViewerConfig;
use crate::scene::{SceneRenderer, SceneStyle};
use crate::surface::RenderSurface;
use tracing::{debug, info};
use wireview_core::{Color, Error, Model, Result};

/// Lifecycle of a [`FrameLoop`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No surface attached yet
    Uninitialized,
    /// Rendering one frame per [`FrameLoop::step`]
    Running,
    /// The surface asked to close; nothing more will be drawn
    Terminating,
    /// The surface has been released
    Closed,
}

/// Renders a model every frame and orbits the camera from keyboard input
pub struct FrameLoop<'m, S: RenderSurface> {
    model: &'m Model,
    camera: CameraController,
    scene: SceneRenderer,
    background: Color,
    surface: Option<S>,
    state: LoopState,
    frames: u64,
}

impl<'m, S: RenderSurface> FrameLoop<'m, S> {
    pub fn new(model: &'m Model, camera: CameraController, scene: SceneRenderer) -> Self {
        Self {
            model,
            camera,
            scene,
            background: Color::WHITE,
            surface: None,
            state: LoopState::Uninitialized,
            frames: 0,
        }
    }

    pub fn from_config(model: &'m Model, config: &ViewerConfig) -> Self {
        Self::new(
            model,
            CameraController::from_config(config),
            SceneRenderer::new(SceneStyle::from_config(config)),
        )
        .with_background(config.background)
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn model(&self) -> &Model {
        self.model
    }

    /// The attached surface, until the loop is closed
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Attach `surface` and start rendering at up to `target_fps`
    pub fn start(&mut self, mut surface: S, target_fps: u32) -> Result<()> {
        self.expect_state(LoopState::Uninitialized, "start")?;
        surface.set_target_fps(target_fps);
        self.surface = Some(surface);
        self.state = LoopState::Running;
        info!(
            "Viewing model '{}' ({} draw calls per frame, {} fps cap)",
            self.model.name(),
            SceneRenderer::draw_call_count(self.model),
            target_fps
        );
        Ok(())
    }

    /// Run one iteration; returns the state afterwards
    pub fn step(&mut self) -> Result<LoopState> {
        self.expect_state(LoopState::Running, "step")?;
        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| Error::InvalidState("Frame loop is running without a surface".to_string()))?;

        if surface.should_close() {
            debug!("Close requested after {} frames", self.frames);
            self.state = LoopState::Terminating;
            return Ok(self.state);
        }

        self.camera.update(&surface.input());

        surface.begin_frame();
        surface.clear(self.background);
        surface.begin_mode_3d(self.camera.camera());
        self.scene.render(self.model, surface);
        surface.end_mode_3d();
        surface.end_frame();

        self.frames += 1;
        Ok(self.state)
    }

    /// Release the surface
    pub fn close(&mut self) -> Result<()> {
        match self.state {
            LoopState::Running | LoopState::Terminating => {
                if let Some(mut surface) = self.surface.take() {
                    surface.close();
                }
                self.state = LoopState::Closed;
                info!("Viewer closed after {} frames", self.frames);
                Ok(())
            }
            state => Err(Error::InvalidState(format!("Cannot close a frame loop in state {:?}", state))),
        }
    }

    /// Step until the surface asks to close, then close; returns frames rendered
    pub fn run(&mut self) -> Result<u64> {
        while self.step()? == LoopState::Running {}
        self.close()?;
        Ok(self.frames)
    }

    fn expect_state(&self, expected: LoopState, operation: &str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::InvalidState(format!(
                "Cannot {} a frame loop in state {:?}, expected {:?}",
                operation, self.state, expected
            )))
        }
    }
}
