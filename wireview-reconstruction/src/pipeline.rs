//! Three-view wireframe reconstruction pipeline
//!
//! A model is drawn in three orthographic views (front, top, side). The
//! pipeline recovers its 3D wireframe in three steps that must run in order:
//!
//! 1. [`Reconstructor::initial_reconstruction`] matches view vertices across
//!    the views into candidate 3D vertices.
//! 2. [`Reconstructor::refine_model`] discards candidates that cannot be the
//!    corner of a wireframe, i.e. that are supported by too few edges.
//! 3. [`Reconstructor::generate_edges`] connects the surviving vertices with
//!    the edges every view agrees on.

use crate::geometry::{coincide_2d, dedup_points, on_segment_2d, strictly_inside_3d};
use itertools::Itertools;
use std::path::Path;
use tracing::{debug, info};
use wireview_core::{Edge, Error, Model, Point3d, Result, View, ViewKind};
use wireview_io::ModelRegistry;

/// Configuration for the reconstruction pipeline
#[derive(Debug, Clone)]
pub struct ReconstructionConfig {
    /// Distance under which two coordinates are considered equal
    pub tolerance: f64,
    /// Vertices supported by fewer candidate edges than this are discarded during refinement
    pub min_vertex_degree: usize,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            min_vertex_degree: 2,
        }
    }
}

/// Progress of a [`Reconstructor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loaded,
    Initial,
    Refined,
    Complete,
}

/// Runs the reconstruction of a single named model
#[derive(Debug, Clone)]
pub struct Reconstructor {
    config: ReconstructionConfig,
    model: Model,
    stage: Stage,
}

impl Reconstructor {
    /// Load the views of model `name` from the model directory `root`
    pub fn load<P: AsRef<Path>>(name: &str, root: P, config: ReconstructionConfig) -> Result<Self> {
        let views = ModelRegistry::new(root).read_views(name)?;
        info!("Loaded model '{}' with {} views", name, views.len());
        Ok(Self::from_views(name, views, config))
    }

    /// Start a reconstruction from views already in memory
    pub fn from_views(name: &str, views: Vec<View>, config: ReconstructionConfig) -> Self {
        let model = Model {
            name: name.to_string(),
            views,
            vertices: Vec::new(),
            edges: Vec::new(),
        };
        Self {
            config,
            model,
            stage: Stage::Loaded,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn into_model(self) -> Model {
        self.model
    }

    /// Match view vertices across the front, top and side views into candidate vertices
    ///
    /// A candidate `(x, y, z)` is produced wherever `(x, z)` is a front vertex,
    /// `(x, y)` a top vertex and `(y, z)` a side vertex.
    pub fn initial_reconstruction(&mut self) -> Result<()> {
        self.expect_stage(Stage::Loaded, "initial reconstruction")?;

        let tol = self.config.tolerance;
        let front = self.view_of_kind(ViewKind::Front)?;
        let top = self.view_of_kind(ViewKind::Top)?;
        let side = self.view_of_kind(ViewKind::Side)?;

        let mut candidates = Vec::new();
        for f in front.points() {
            let (x, z) = (f.x, f.y);
            for t in top.points().iter().filter(|t| (t.x - x).abs() <= tol) {
                let y = t.y;
                let matches_side = side
                    .points()
                    .iter()
                    .any(|s| (s.x - y).abs() <= tol && (s.y - z).abs() <= tol);
                if matches_side {
                    candidates.push(Point3d::new(x, y, z));
                }
            }
        }

        let vertices = dedup_points(candidates, tol);
        if vertices.is_empty() {
            return Err(Error::Reconstruction(format!(
                "no vertex of model '{}' is consistent across its views",
                self.model.name
            )));
        }

        debug!("Initial reconstruction: {} candidate vertices", vertices.len());
        self.model.vertices = vertices;
        self.stage = Stage::Initial;
        Ok(())
    }

    /// Discard candidate vertices supported by fewer than `min_vertex_degree` edges
    ///
    /// Removing a vertex can lower the support of its neighbours, so pruning
    /// repeats until nothing changes.
    pub fn refine_model(&mut self) -> Result<()> {
        self.expect_stage(Stage::Initial, "model refinement")?;

        let mut vertices = std::mem::take(&mut self.model.vertices);
        let before = vertices.len();
        loop {
            let edges = self.candidate_edges(&vertices);
            let kept: Vec<Point3d> = vertices
                .iter()
                .filter(|v| {
                    edges.iter().filter(|e| e.has_endpoint(v)).count() >= self.config.min_vertex_degree
                })
                .copied()
                .collect();
            if kept.len() == vertices.len() {
                break;
            }
            vertices = kept;
        }

        if vertices.is_empty() {
            return Err(Error::Reconstruction(format!(
                "refinement removed every vertex of model '{}'",
                self.model.name
            )));
        }

        debug!(
            "Refinement kept {} of {} candidate vertices",
            vertices.len(),
            before
        );
        self.model.vertices = vertices;
        self.stage = Stage::Refined;
        Ok(())
    }

    /// Connect the refined vertices with the edges all views agree on
    ///
    /// An edge that passes through another vertex is dropped in favour of
    /// the shorter edges on either side of it.
    pub fn generate_edges(&mut self) -> Result<()> {
        self.expect_stage(Stage::Refined, "edge generation")?;

        let tol = self.config.tolerance;
        let vertices = &self.model.vertices;
        let edges: Vec<Edge> = self
            .candidate_edges(vertices)
            .into_iter()
            .filter(|e| {
                !vertices
                    .iter()
                    .any(|v| strictly_inside_3d(v, &e.a, &e.b, tol))
            })
            .collect();

        info!(
            "Reconstructed '{}': {} vertices, {} edges",
            self.model.name,
            vertices.len(),
            edges.len()
        );
        self.model.edges = edges;
        self.stage = Stage::Complete;
        Ok(())
    }

    /// Pairs of vertices whose projection is accounted for in every view
    fn candidate_edges(&self, vertices: &[Point3d]) -> Vec<Edge> {
        vertices
            .iter()
            .tuple_combinations()
            .filter(|(a, b)| {
                self.model
                    .views
                    .iter()
                    .all(|view| self.view_supports(view, a, b))
            })
            .map(|(a, b)| Edge::new(*a, *b))
            .collect()
    }

    /// Whether the projection of segment `a..b` appears in `view`
    ///
    /// A segment seen end-on projects to a point, which must be a view
    /// vertex. Otherwise both projected endpoints must lie on one view segment.
    fn view_supports(&self, view: &View, a: &Point3d, b: &Point3d) -> bool {
        let tol = self.config.tolerance;
        let pa = view.project(a);
        let pb = view.project(b);

        if coincide_2d(&pa, &pb, tol) {
            return view.points().iter().any(|p| coincide_2d(p, &pa, tol));
        }
        view.segment_points()
            .any(|(u, w)| on_segment_2d(&pa, &u, &w, tol) && on_segment_2d(&pb, &u, &w, tol))
    }

    fn view_of_kind(&self, kind: ViewKind) -> Result<&View> {
        let mut matching = self.model.views.iter().filter(|v| v.kind == kind);
        let view = matching.next().ok_or_else(|| {
            Error::Reconstruction(format!(
                "model '{}' has no {} view",
                self.model.name, kind
            ))
        })?;
        if matching.next().is_some() {
            return Err(Error::Reconstruction(format!(
                "model '{}' has more than one {} view",
                self.model.name, kind
            )));
        }
        Ok(view)
    }

    fn expect_stage(&self, expected: Stage, step: &str) -> Result<()> {
        if self.stage != expected {
            return Err(Error::InvalidState(format!(
                "{} requires stage {:?}, reconstruction is at {:?}",
                step, expected, self.stage
            )));
        }
        Ok(())
    }
}

/// Load model `name` from `root` and run every reconstruction step once, in order
pub fn reconstruct<P: AsRef<Path>>(name: &str, root: P, config: ReconstructionConfig) -> Result<Model> {
    let mut reconstructor = Reconstructor::load(name, root, config)?;
    reconstructor.initial_reconstruction()?;
    reconstructor.refine_model()?;
    reconstructor.generate_edges()?;
    Ok(reconstructor.into_model())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wireview_core::Point2d;

    fn view(kind: ViewKind, points: &[(f64, f64)], segments: &[[usize; 2]]) -> View {
        View::new(
            kind.as_str(),
            kind,
            points.iter().map(|&(a, b)| Point2d::new(a, b)).collect(),
            segments.to_vec(),
        )
        .unwrap()
    }

    /// Every view of a 10x10x10 cube is the same square
    fn square(kind: ViewKind) -> View {
        view(
            kind,
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
            &[[0, 1], [1, 2], [2, 3], [3, 0]],
        )
    }

    fn cube() -> Reconstructor {
        Reconstructor::from_views(
            "cube",
            ViewKind::ALL.iter().map(|&k| square(k)).collect(),
            ReconstructionConfig::default(),
        )
    }

    #[test]
    fn test_cube_reconstruction() {
        let mut r = cube();
        r.initial_reconstruction().unwrap();
        assert_eq!(r.model().vertices().len(), 8);
        r.refine_model().unwrap();
        assert_eq!(r.model().vertices().len(), 8);
        r.generate_edges().unwrap();
        assert_eq!(r.model().edges().len(), 12);
        assert_eq!(r.stage(), Stage::Complete);

        for edge in r.model().edges() {
            assert!((edge.length() - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_steps_must_run_in_order() {
        let mut r = cube();
        assert!(matches!(r.refine_model(), Err(Error::InvalidState(_))));
        assert!(matches!(r.generate_edges(), Err(Error::InvalidState(_))));
        r.initial_reconstruction().unwrap();
        assert!(matches!(r.initial_reconstruction(), Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_missing_view_is_an_error() {
        let mut r = Reconstructor::from_views(
            "flat",
            vec![square(ViewKind::Front), square(ViewKind::Top)],
            ReconstructionConfig::default(),
        );
        let err = r.initial_reconstruction().unwrap_err();
        assert!(err.to_string().contains("no side view"));
    }

    #[test]
    fn test_duplicate_view_is_an_error() {
        let mut r = Reconstructor::from_views(
            "twice",
            vec![
                square(ViewKind::Front),
                square(ViewKind::Front),
                square(ViewKind::Top),
                square(ViewKind::Side),
            ],
            ReconstructionConfig::default(),
        );
        assert!(matches!(r.initial_reconstruction(), Err(Error::Reconstruction(_))));
    }

    #[test]
    fn test_inconsistent_views_are_an_error() {
        let mut r = Reconstructor::from_views(
            "mismatch",
            vec![
                square(ViewKind::Front),
                view(ViewKind::Top, &[(50.0, 50.0)], &[]),
                square(ViewKind::Side),
            ],
            ReconstructionConfig::default(),
        );
        assert!(matches!(r.initial_reconstruction(), Err(Error::Reconstruction(_))));
    }

    #[test]
    fn test_refinement_drops_unsupported_vertices() {
        // Extra isolated dot in every view yields a candidate with no edges
        let with_dot = |kind| {
            view(
                kind,
                &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (5.0, 5.0)],
                &[[0, 1], [1, 2], [2, 3], [3, 0]],
            )
        };
        let mut r = Reconstructor::from_views(
            "dotted",
            ViewKind::ALL.iter().map(|&k| with_dot(k)).collect(),
            ReconstructionConfig::default(),
        );
        r.initial_reconstruction().unwrap();
        assert!(r.model().vertices().contains(&Point3d::new(5.0, 5.0, 5.0)));
        r.refine_model().unwrap();
        assert_eq!(r.model().vertices().len(), 8);
        assert!(!r.model().vertices().contains(&Point3d::new(5.0, 5.0, 5.0)));
    }

    #[test]
    fn test_edges_through_vertices_are_split() {
        // A 20x10x10 box whose long edges carry a midpoint vertex at x = 10
        let front = view(
            ViewKind::Front,
            &[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (20.0, 10.0), (10.0, 10.0), (0.0, 10.0)],
            &[[0, 2], [2, 3], [3, 5], [5, 0], [1, 4]],
        );
        let top = view(
            ViewKind::Top,
            &[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (20.0, 10.0), (10.0, 10.0), (0.0, 10.0)],
            &[[0, 2], [2, 3], [3, 5], [5, 0], [1, 4]],
        );
        let side = square(ViewKind::Side);

        let mut r = Reconstructor::from_views("split", vec![front, top, side], ReconstructionConfig::default());
        r.initial_reconstruction().unwrap();
        r.refine_model().unwrap();
        r.generate_edges().unwrap();

        let model = r.model();
        assert_eq!(model.vertices().len(), 12);
        let long = Edge::new(Point3d::new(0.0, 0.0, 0.0), Point3d::new(20.0, 0.0, 0.0));
        assert!(!model.edges().contains(&long));
        let half = Edge::new(Point3d::new(0.0, 0.0, 0.0), Point3d::new(10.0, 0.0, 0.0));
        assert!(model.edges().contains(&half));
        // 8 halves of the long edges, 6 edges along y, 6 along z
        assert_eq!(model.edges().len(), 20);
    }
}
