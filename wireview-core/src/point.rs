//! Point types and related functionality

use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point in the renderer frame
pub type Point3f = Point3<f32>;

/// A 3D point in the reconstruction frame
pub type Point3d = Point3<f64>;

/// A point inside the drawing plane of a single view
pub type Point2d = Point2<f64>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// An RGBA color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GRAY: Color = Color::rgb(130, 130, 130);
    pub const BLUE: Color = Color::rgb(0, 121, 241);

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Normalized `[r, g, b]` components for shaders
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Normalized `[r, g, b, a]` components for clear colors
    pub fn to_f64_rgba(self) -> [f64; 4] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
            self.a as f64 / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_color_normalization() {
        assert_eq!(Color::WHITE.to_f32(), [1.0, 1.0, 1.0]);
        assert_eq!(Color::BLACK.to_f64_rgba(), [0.0, 0.0, 0.0, 1.0]);

        let [r, g, b] = Color::BLUE.to_f32();
        assert_relative_eq!(r, 0.0);
        assert_relative_eq!(g, 121.0 / 255.0, epsilon = 1e-6);
        assert_relative_eq!(b, 241.0 / 255.0, epsilon = 1e-6);
        assert_relative_eq!(Color::GRAY.to_f64_rgba()[0], 130.0 / 255.0, epsilon = 1e-12);
    }
}
