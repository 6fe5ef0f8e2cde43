//! Conversion between the reconstruction frame and the renderer frame
//!
//! The reconstruction frame treats `z` as up; the renderer treats `y` as up.
//! Every point handed to a drawing primitive goes through
//! [`CoordinateMapper::to_render`] exactly once.

use crate::point::*;

/// Maps points between the reconstruction frame and the renderer frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinateMapper;

impl CoordinateMapper {
    /// Swap the second and third components at full precision
    ///
    /// Its own inverse for every input.
    #[inline]
    pub fn swap(point: &Point3d) -> Point3d {
        Point3d::new(point.x, point.z, point.y)
    }

    /// Map `(x, y, z)` in the reconstruction frame to `(x, z, y)` in the renderer frame
    ///
    /// The swap is done in `f64` and the result narrowed to the renderer's `f32`.
    #[inline]
    pub fn to_render(point: &Point3d) -> Point3f {
        Self::swap(point).cast::<f32>()
    }

    /// Map a renderer-frame point back into the reconstruction frame
    ///
    /// Recovers the original point exactly only when its components are
    /// representable as `f32`; otherwise the result is the `f32` rounding.
    #[inline]
    pub fn to_reconstruction(point: &Point3f) -> Point3d {
        Point3d::new(point.x as f64, point.z as f64, point.y as f64)
    }

    /// Map both endpoints of a segment
    #[inline]
    pub fn segment_to_render(a: &Point3d, b: &Point3d) -> (Point3f, Point3f) {
        (Self::to_render(a), Self::to_render(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_swaps_second_and_third_components() {
        let mapped = CoordinateMapper::to_render(&Point3d::new(1.0, 2.0, 3.0));
        assert_eq!(mapped, Point3f::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn test_swap_is_an_exact_involution() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let p = Point3d::new(
                rng.gen_range(-1.0e6..1.0e6),
                rng.gen_range(-1.0e6..1.0e6),
                rng.gen_range(-1.0e6..1.0e6),
            );
            assert_eq!(CoordinateMapper::swap(&CoordinateMapper::swap(&p)), p);
        }
        let p = Point3d::new(0.1, 0.2, 0.3);
        assert_eq!(CoordinateMapper::swap(&CoordinateMapper::swap(&p)), p);
        assert_eq!(CoordinateMapper::swap(&p), Point3d::new(0.1, 0.3, 0.2));
    }

    #[test]
    fn test_render_round_trip_for_f32_values() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            // Narrowing to the renderer frame is lossless for these
            let p = Point3d::new(
                rng.gen_range(-1.0e4f32..1.0e4) as f64,
                rng.gen_range(-1.0e4f32..1.0e4) as f64,
                rng.gen_range(-1.0e4f32..1.0e4) as f64,
            );
            let back = CoordinateMapper::to_reconstruction(&CoordinateMapper::to_render(&p));
            assert_eq!(back, p);
        }
    }

    #[test]
    fn test_render_round_trip_rounds_to_f32() {
        let p = Point3d::new(0.1, 0.2, 0.3);
        let back = CoordinateMapper::to_reconstruction(&CoordinateMapper::to_render(&p));
        assert_eq!(back, Point3d::new(0.1f32 as f64, 0.2f32 as f64, 0.3f32 as f64));
        assert_eq!(CoordinateMapper::to_render(&p), Point3f::new(0.1, 0.3, 0.2));
    }

    #[test]
    fn test_origin_maps_to_origin() {
        assert_eq!(
            CoordinateMapper::to_render(&Point3d::origin()),
            Point3f::origin()
        );
    }

    #[test]
    fn test_segment_mapping() {
        let (a, b) = CoordinateMapper::segment_to_render(
            &Point3d::new(0.0, 10.0, 0.0),
            &Point3d::new(0.0, 0.0, 10.0),
        );
        assert_eq!(a, Point3f::new(0.0, 0.0, 10.0));
        assert_eq!(b, Point3f::new(0.0, 10.0, 0.0));
    }
}
