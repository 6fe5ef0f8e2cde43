//! Tolerance-aware geometric predicates used by the reconstruction

use wireview_core::{Point2d, Point3d};

/// Whether two view-plane points coincide within `tolerance`
pub fn coincide_2d(p: &Point2d, q: &Point2d, tolerance: f64) -> bool {
    (p - q).norm() <= tolerance
}

/// Whether two reconstruction-frame points coincide within `tolerance`
pub fn coincide_3d(p: &Point3d, q: &Point3d, tolerance: f64) -> bool {
    (p - q).norm() <= tolerance
}

/// Whether `p` lies on the closed segment `a..b` within `tolerance`
pub fn on_segment_2d(p: &Point2d, a: &Point2d, b: &Point2d, tolerance: f64) -> bool {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq <= tolerance * tolerance {
        return coincide_2d(p, a, tolerance);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    (p - closest).norm() <= tolerance
}

/// Whether `p` lies on segment `a..b` without coinciding with either endpoint
pub fn strictly_inside_3d(p: &Point3d, a: &Point3d, b: &Point3d, tolerance: f64) -> bool {
    if coincide_3d(p, a, tolerance) || coincide_3d(p, b, tolerance) {
        return false;
    }
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq <= tolerance * tolerance {
        return false;
    }
    let t = (p - a).dot(&ab) / len_sq;
    if !(0.0..=1.0).contains(&t) {
        return false;
    }
    let closest = a + ab * t;
    (p - closest).norm() <= tolerance
}

/// Remove points that coincide with an earlier point, keeping first occurrences in order
pub fn dedup_points(points: Vec<Point3d>, tolerance: f64) -> Vec<Point3d> {
    let mut unique: Vec<Point3d> = Vec::with_capacity(points.len());
    for p in points {
        if !unique.iter().any(|q| coincide_3d(&p, q, tolerance)) {
            unique.push(p);
        }
    }
    unique
}
