//! Interactive wireframe viewer
//!
//! Draws a reconstructed [`Model`] every frame: reference axes, the vertices
//! observed in each source view, the reconstructed vertices and the edges
//! between them. The camera orbits the vertical axis under the left and right
//! arrow keys.
//!
//! - [`SceneRenderer`] composes the draw calls for a model
//! - [`CameraController`] turns key state into camera rotation
//! - [`FrameLoop`] drives poll, update and draw against a [`RenderSurface`]
//! - [`WindowSurface`] is the winit/wgpu surface used by [`show_model`]

pub mod camera;
pub mod config;
pub mod frame_loop;
pub mod scene;
pub mod surface;
pub mod window;

pub use camera::*;
pub use config::*;
pub use frame_loop::*;
pub use scene::*;
pub use surface::*;
pub use window::*;

use wireview_core::{Model, Result};

/// Show `model` in a window until the user closes it; returns frames rendered
pub fn show_model(model: &Model, config: &ViewerConfig) -> Result<u64> {
    let surface = WindowSurface::open(model.name(), config.window_width, config.window_height)?;
    let mut frame_loop = FrameLoop::from_config(model, config);
    frame_loop.start(surface, config.target_fps)?;
    frame_loop.run()
}
