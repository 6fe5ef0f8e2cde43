//! Views, edges and the reconstructed wireframe model

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The orthographic direction a view was drawn from
///
/// The reconstruction frame has `z` up. Each kind fixes which two
/// reconstruction axes its drawing plane spans:
/// - `Front`: `(x, z)`
/// - `Top`: `(x, y)`
/// - `Side`: `(y, z)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViewKind {
    Front,
    Top,
    Side,
}

impl ViewKind {
    /// All kinds in canonical order
    pub const ALL: [ViewKind; 3] = [ViewKind::Front, ViewKind::Top, ViewKind::Side];

    /// Lowercase name, also used as the view file stem
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Front => "front",
            ViewKind::Top => "top",
            ViewKind::Side => "side",
        }
    }

    /// Parse a kind from its lowercase name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "front" => Some(ViewKind::Front),
            "top" => Some(ViewKind::Top),
            "side" => Some(ViewKind::Side),
            _ => None,
        }
    }

    /// Lift a point of this view's plane into the reconstruction frame
    pub fn lift(&self, p: &Point2d) -> Point3d {
        match self {
            ViewKind::Front => Point3d::new(p.x, 0.0, p.y),
            ViewKind::Top => Point3d::new(p.x, p.y, 0.0),
            ViewKind::Side => Point3d::new(0.0, p.x, p.y),
        }
    }

    /// Project a reconstruction-frame point onto this view's plane
    pub fn project(&self, p: &Point3d) -> Point2d {
        match self {
            ViewKind::Front => Point2d::new(p.x, p.z),
            ViewKind::Top => Point2d::new(p.x, p.y),
            ViewKind::Side => Point2d::new(p.y, p.z),
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single orthographic view: detected vertices and the segments joining them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub name: String,
    pub kind: ViewKind,
    points: Vec<Point2d>,
    segments: Vec<[usize; 2]>,
    #[serde(skip)]
    vertices: Vec<Point3d>,
}

impl View {
    /// Create a view; the lifted vertices are computed once here
    ///
    /// Every segment must join two distinct, existing points.
    pub fn new(
        name: impl Into<String>,
        kind: ViewKind,
        points: Vec<Point2d>,
        segments: Vec<[usize; 2]>,
    ) -> Result<Self> {
        let name = name.into();
        for &[i, j] in &segments {
            if let Some(index) = [i, j].into_iter().find(|&index| index >= points.len()) {
                return Err(Error::InvalidData(format!(
                    "view '{}': segment [{}, {}] references vertex {} but only {} declared",
                    name,
                    i,
                    j,
                    index,
                    points.len()
                )));
            }
            if i == j {
                return Err(Error::InvalidData(format!(
                    "view '{}': segment joins vertex {} to itself",
                    name, i
                )));
            }
        }

        let vertices = points.iter().map(|p| kind.lift(p)).collect();
        Ok(Self {
            name,
            kind,
            points,
            segments,
            vertices,
        })
    }

    /// Create a view from vertices already placed in the reconstruction frame
    ///
    /// `points()` then holds their projections onto the view plane.
    pub fn with_vertices(name: impl Into<String>, kind: ViewKind, vertices: Vec<Point3d>) -> Self {
        let points = vertices.iter().map(|p| kind.project(p)).collect();
        Self {
            name: name.into(),
            kind,
            points,
            segments: Vec::new(),
            vertices,
        }
    }

    /// Vertices in view-plane coordinates
    pub fn points(&self) -> &[Point2d] {
        &self.points
    }

    /// Index pairs into `points()`
    pub fn segments(&self) -> &[[usize; 2]] {
        &self.segments
    }

    /// Ordered view vertices, lifted into the reconstruction frame
    pub fn vertices(&self) -> &[Point3d] {
        &self.vertices
    }

    /// Project a reconstruction-frame point onto this view's plane
    pub fn project(&self, p: &Point3d) -> Point2d {
        self.kind.project(p)
    }

    /// Segment endpoints in view-plane coordinates
    pub fn segment_points(&self) -> impl Iterator<Item = (Point2d, Point2d)> + '_ {
        self.segments
            .iter()
            .map(move |[i, j]| (self.points[*i], self.points[*j]))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// An unordered pair of reconstructed vertices
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Edge {
    pub a: Point3d,
    pub b: Point3d,
}

impl Edge {
    pub fn new(a: Point3d, b: Point3d) -> Self {
        Self { a, b }
    }

    /// Euclidean length of the segment
    pub fn length(&self) -> f64 {
        (self.b - self.a).norm()
    }

    /// Whether `p` is one of the endpoints
    pub fn has_endpoint(&self, p: &Point3d) -> bool {
        self.a == *p || self.b == *p
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

/// A reconstructed wireframe together with the views it was built from
#[derive(Debug, Clone, Default, Serialize)]
pub struct Model {
    pub name: String,
    pub views: Vec<View>,
    pub vertices: Vec<Point3d>,
    pub edges: Vec<Edge>,
}

impl Model {
    /// A model with no views, vertices or edges
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn vertices(&self) -> &[Point3d] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Total number of view vertices across all views
    pub fn view_vertex_count(&self) -> usize {
        self.views.iter().map(|v| v.vertices().len()).sum()
    }

    /// True when there is nothing to draw besides the axes
    pub fn is_empty(&self) -> bool {
        self.view_vertex_count() == 0 && self.vertices.is_empty() && self.edges.is_empty()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Model '{}': {} views ({} view vertices), {} vertices, {} edges",
            self.name,
            self.views.len(),
            self.view_vertex_count(),
            self.vertices.len(),
            self.edges.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lift_and_project_are_consistent() {
        let p = Point2d::new(3.0, 7.0);
        for kind in ViewKind::ALL {
            assert_eq!(kind.project(&kind.lift(&p)), p);
        }
    }

    #[test]
    fn test_view_vertices_are_lifted() {
        let view = View::new(
            "front",
            ViewKind::Front,
            vec![Point2d::new(1.0, 2.0)],
            vec![],
        )
        .unwrap();
        assert_eq!(view.vertices(), &[Point3d::new(1.0, 0.0, 2.0)]);
    }

    #[test]
    fn test_view_rejects_dangling_segment() {
        let points = vec![Point2d::new(0.0, 0.0), Point2d::new(10.0, 0.0)];
        let err = View::new("front", ViewKind::Front, points, vec![[0, 5]]).unwrap_err();
        assert!(matches!(err, Error::InvalidData(msg) if msg.contains("vertex 5 but only 2")));
    }

    #[test]
    fn test_view_rejects_self_loop() {
        let points = vec![Point2d::new(0.0, 0.0), Point2d::new(10.0, 0.0)];
        let err = View::new("top", ViewKind::Top, points, vec![[0, 1], [1, 1]]).unwrap_err();
        assert!(matches!(err, Error::InvalidData(msg) if msg.contains("to itself")));
    }

    #[test]
    fn test_segment_points() {
        let points = vec![Point2d::new(0.0, 0.0), Point2d::new(10.0, 0.0), Point2d::new(10.0, 5.0)];
        let view = View::new("side", ViewKind::Side, points, vec![[0, 1], [2, 1]]).unwrap();
        let pairs: Vec<_> = view.segment_points().collect();
        assert_eq!(
            pairs,
            vec![
                (Point2d::new(0.0, 0.0), Point2d::new(10.0, 0.0)),
                (Point2d::new(10.0, 5.0), Point2d::new(10.0, 0.0)),
            ]
        );
    }

    #[test]
    fn test_view_with_placed_vertices() {
        let view = View::with_vertices("single", ViewKind::Top, vec![Point3d::new(1.0, 2.0, 3.0)]);
        assert_eq!(view.vertices(), &[Point3d::new(1.0, 2.0, 3.0)]);
        assert_eq!(view.points(), &[Point2d::new(1.0, 2.0)]);
        assert!(view.segments().is_empty());
    }

    #[test]
    fn test_edge_is_unordered() {
        let a = Point3d::new(0.0, 0.0, 0.0);
        let b = Point3d::new(1.0, 2.0, 3.0);
        assert_eq!(Edge::new(a, b), Edge::new(b, a));
        assert!(Edge::new(a, b).has_endpoint(&b));
    }

    #[test]
    fn test_empty_model() {
        let model = Model::empty("nothing");
        assert!(model.is_empty());
        assert_eq!(
            model.to_string(),
            "Model 'nothing': 0 views (0 view vertices), 0 vertices, 0 edges"
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ViewKind::from_name("Top"), Some(ViewKind::Top));
        assert_eq!(ViewKind::from_name("iso"), None);
        assert_eq!(ViewKind::Side.to_string(), "side");
    }
}
