//! Viewer configuration

use wireview_core::{Color, Point3f};

/// Fraction of the base rotation step applied while the increase key is held
///
/// The decrease key rotates by the full step, so the two directions turn at
/// a 1:5 ratio.
pub const INCREASE_STEP_RATIO: f32 = 0.2;

/// Settings for the interactive viewer
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub window_width: u32,
    pub window_height: u32,
    /// Upper bound on frames per second
    pub target_fps: u32,
    pub background: Color,
    /// Length of each reference axis
    pub axes_length: f32,
    /// Radius of the spheres drawn for vertices
    pub point_radius: f32,
    /// Base camera rotation step in radians
    pub rotation_step: f32,
    pub camera_position: Point3f,
    /// Height of the orthographic view volume in world units
    pub fovy: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: 1000,
            window_height: 1000,
            target_fps: 60,
            background: Color::WHITE,
            axes_length: 100.0,
            point_radius: 0.5,
            rotation_step: 0.05,
            camera_position: Point3f::new(400.0, 400.0, 400.0),
            fovy: 90.0,
        }
    }
}
