//! Orbit camera driven by two keys

use crate::config::{ViewerConfig, INCREASE_STEP_RATIO};
use nalgebra::{Matrix4, Orthographic3, Rotation3, Vector3};
use wireview_core::{Point3f, Vector3f};

const NEAR_PLANE: f32 = 0.01;
const FAR_PLANE: f32 = 1000.0;

/// Camera projection modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Orthographic,
}

/// A 3D camera looking at the origin
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3f,
    pub target: Point3f,
    pub up: Vector3f,
    pub projection: Projection,
    /// Height of the view volume in world units
    pub fovy: f32,
}

impl Camera {
    /// Create an orthographic camera at `position` looking at the origin, `y` up
    pub fn orthographic(position: Point3f, fovy: f32) -> Self {
        Self {
            position,
            target: Point3f::origin(),
            up: Vector3f::y(),
            projection: Projection::Orthographic,
            fovy,
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix for a viewport of the given aspect ratio
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Matrix4<f32> {
        match self.projection {
            Projection::Orthographic => {
                let top = self.fovy / 2.0;
                let right = top * aspect_ratio;
                Orthographic3::new(-right, right, -top, top, NEAR_PLANE, FAR_PLANE).to_homogeneous()
            }
        }
    }

    /// Distance from the camera to the origin
    pub fn distance_from_origin(&self) -> f32 {
        self.position.coords.norm()
    }
}

impl Default for Camera {
    fn default() -> Self {
        let config = ViewerConfig::default();
        Self::orthographic(config.camera_position, config.fovy)
    }
}

/// Direction of an orbit step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    /// Counter-clockwise seen from above
    Increase,
    /// Clockwise seen from above
    Decrease,
}

impl RotationDirection {
    pub fn sign(self) -> f32 {
        match self {
            RotationDirection::Increase => 1.0,
            RotationDirection::Decrease => -1.0,
        }
    }
}

/// State of the two orbit keys for the current frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// Right arrow held
    pub increase: bool,
    /// Left arrow held
    pub decrease: bool,
}

impl InputState {
    pub fn new(increase: bool, decrease: bool) -> Self {
        Self { increase, decrease }
    }

    /// The requested direction, or `None` when neither or both keys are held
    pub fn direction(&self) -> Option<RotationDirection> {
        match (self.increase, self.decrease) {
            (true, false) => Some(RotationDirection::Increase),
            (false, true) => Some(RotationDirection::Decrease),
            _ => None,
        }
    }
}

/// Orbits a camera about the vertical axis through the origin
#[derive(Debug, Clone)]
pub struct CameraController {
    camera: Camera,
    rotation_step: f32,
}

impl CameraController {
    pub fn new(camera: Camera, rotation_step: f32) -> Self {
        Self {
            camera,
            rotation_step,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(
            Camera::orthographic(config.camera_position, config.fovy),
            config.rotation_step,
        )
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn position(&self) -> Point3f {
        self.camera.position
    }

    pub fn rotation_step(&self) -> f32 {
        self.rotation_step
    }

    /// Rotate by `magnitude` radians in `direction` about the vertical axis
    pub fn rotate(&mut self, direction: RotationDirection, magnitude: f32) {
        self.rotate_by(direction.sign() * magnitude);
    }

    /// Rotate by a signed angle in radians about the vertical axis
    pub fn rotate_by(&mut self, angle: f32) {
        let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), angle);
        self.camera.position = rotation * self.camera.position;
    }

    /// Apply this frame's input; returns the signed angle rotated, if any
    ///
    /// Increase turns by a fifth of the base step, decrease by the full step.
    pub fn update(&mut self, input: &InputState) -> Option<f32> {
        let (direction, magnitude) = match input.direction()? {
            RotationDirection::Increase => {
                (RotationDirection::Increase, self.rotation_step * INCREASE_STEP_RATIO)
            }
            RotationDirection::Decrease => (RotationDirection::Decrease, self.rotation_step),
        };
        self.rotate(direction, magnitude);
        Some(direction.sign() * magnitude)
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::Rng;

    /// Signed angle of the camera position around the vertical axis
    fn azimuth(p: &Point3f) -> f32 {
        p.z.atan2(p.x)
    }

    fn controller() -> CameraController {
        CameraController::new(Camera::orthographic(Point3f::new(400.0, 400.0, 400.0), 90.0), 0.05)
    }

    #[test]
    fn test_rotation_preserves_distance() {
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let start = Point3f::new(
                rng.gen_range(-500.0..500.0),
                rng.gen_range(-500.0..500.0),
                rng.gen_range(-500.0..500.0),
            );
            let mut c = CameraController::new(Camera::orthographic(start, 90.0), 0.05);
            let before = c.camera().distance_from_origin();
            c.rotate_by(rng.gen_range(-10.0..10.0));
            assert_relative_eq!(c.camera().distance_from_origin(), before, max_relative = 1e-5);
            // Height above the ground plane never changes
            assert_relative_eq!(c.position().y, start.y, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_opposite_rotations_cancel() {
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let mut c = controller();
            let start = c.position();
            let m: f32 = rng.gen_range(-3.0..3.0);
            c.rotate_by(m);
            c.rotate_by(-m);
            assert_relative_eq!(c.position(), start, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_rotate_direction_sign() {
        let mut a = controller();
        let mut b = controller();
        a.rotate(RotationDirection::Decrease, 0.3);
        b.rotate_by(-0.3);
        assert_relative_eq!(a.position(), b.position(), epsilon = 1e-4);
    }

    #[test]
    fn test_increase_turns_a_fifth_of_the_step() {
        let mut c = controller();
        let before = c.position();
        let angle = c.update(&InputState::new(true, false));
        assert_eq!(angle, Some(0.05 * 0.2));

        let mut expected = controller();
        expected.rotate_by(0.01);
        assert_relative_eq!(c.position(), expected.position(), epsilon = 1e-4);
        assert!(c.position() != before);
    }

    #[test]
    fn test_decrease_turns_the_full_step() {
        let mut c = controller();
        assert_eq!(c.update(&InputState::new(false, true)), Some(-0.05));

        let mut expected = controller();
        expected.rotate_by(-0.05);
        assert_relative_eq!(c.position(), expected.position(), epsilon = 1e-4);
    }

    #[test]
    fn test_both_or_neither_key_leaves_camera_alone() {
        let mut c = controller();
        let before = c.position();
        assert_eq!(c.update(&InputState::new(true, true)), None);
        assert_eq!(c.update(&InputState::default()), None);
        assert_eq!(c.position(), before);
    }

    #[test]
    fn test_positive_angle_is_counter_clockwise_from_above() {
        // Looking down -y, a positive turn about +y moves +x towards -z
        let mut c = CameraController::new(Camera::orthographic(Point3f::new(1.0, 0.0, 0.0), 90.0), 0.05);
        c.rotate_by(std::f32::consts::FRAC_PI_2);
        assert_relative_eq!(c.position(), Point3f::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(azimuth(&c.position()), -std::f32::consts::FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn test_orthographic_projection_volume() {
        let camera = Camera::default();
        let proj = camera.projection_matrix(1.0);
        // A point 45 units up at the view center lands on the top clip edge
        let clip = proj.transform_point(&Point3f::new(0.0, 45.0, -10.0));
        assert_relative_eq!(clip.y, 1.0, epsilon = 1e-6);
        assert_eq!(camera.target, Point3f::origin());
        assert_eq!(camera.projection, Projection::Orthographic);
    }

    #[test]
    fn test_view_matrix_centers_origin() {
        let camera = Camera::default();
        let eye = camera.view_matrix().transform_point(&Point3f::origin());
        assert_relative_eq!(eye.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(eye.y, 0.0, epsilon = 1e-3);
        assert_relative_eq!(-eye.z, camera.distance_from_origin(), epsilon = 1e-2);
    }
}
