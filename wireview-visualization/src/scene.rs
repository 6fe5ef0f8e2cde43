//! Scene composition: what gets drawn each frame, and in which order
//!
//! A frame is composed into an ordered list of [`DrawCommand`]s before any of
//! it reaches a surface. All positions in a command are already in the
//! renderer frame.

use crate::config::ViewerConfig;
use crate::surface::RenderSurface;
use wireview_core::{Color, CoordinateMapper, Model, Point3f};

/// A single primitive draw call in renderer-frame coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Line {
        start: Point3f,
        end: Point3f,
        color: Color,
    },
    Sphere {
        center: Point3f,
        radius: f32,
        color: Color,
    },
}

impl DrawCommand {
    /// Issue this command against a surface
    pub fn submit<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        match *self {
            DrawCommand::Line { start, end, color } => surface.draw_line_3d(start, end, color),
            DrawCommand::Sphere { center, radius, color } => surface.draw_sphere(center, radius, color),
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, DrawCommand::Line { .. })
    }
}

/// Sizes and colors used when composing a scene
#[derive(Debug, Clone)]
pub struct SceneStyle {
    pub axes_length: f32,
    pub point_radius: f32,
    pub axis_color: Color,
    /// Vertices observed in the source views
    pub view_vertex_color: Color,
    /// Reconstructed vertices
    pub vertex_color: Color,
    pub edge_color: Color,
}

impl SceneStyle {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            axes_length: config.axes_length,
            point_radius: config.point_radius,
            ..Self::default()
        }
    }
}

impl Default for SceneStyle {
    fn default() -> Self {
        let config = ViewerConfig::default();
        Self {
            axes_length: config.axes_length,
            point_radius: config.point_radius,
            axis_color: Color::GRAY,
            view_vertex_color: Color::BLUE,
            vertex_color: Color::BLACK,
            edge_color: Color::BLACK,
        }
    }
}

/// Composes the draw calls for a model; holds no per-frame state
#[derive(Debug, Clone, Default)]
pub struct SceneRenderer {
    style: SceneStyle,
}

impl SceneRenderer {
    pub fn new(style: SceneStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &SceneStyle {
        &self.style
    }

    /// Number of draw calls [`compose`](Self::compose) produces for `model`
    pub fn draw_call_count(model: &Model) -> usize {
        3 + model.view_vertex_count() + model.vertices().len() + model.edges().len()
    }

    /// Axes, then view vertices, then reconstructed vertices, then edges
    pub fn compose(&self, model: &Model) -> Vec<DrawCommand> {
        let style = &self.style;
        let mut commands = Vec::with_capacity(Self::draw_call_count(model));

        let origin = Point3f::origin();
        let l = style.axes_length;
        for end in [
            Point3f::new(l, 0.0, 0.0),
            Point3f::new(0.0, l, 0.0),
            Point3f::new(0.0, 0.0, l),
        ] {
            commands.push(DrawCommand::Line {
                start: origin,
                end,
                color: style.axis_color,
            });
        }

        for view in model.views() {
            commands.extend(view.vertices().iter().map(|p| DrawCommand::Sphere {
                center: CoordinateMapper::to_render(p),
                radius: style.point_radius,
                color: style.view_vertex_color,
            }));
        }

        commands.extend(model.vertices().iter().map(|p| DrawCommand::Sphere {
            center: CoordinateMapper::to_render(p),
            radius: style.point_radius,
            color: style.vertex_color,
        }));

        commands.extend(model.edges().iter().map(|edge| {
            let (start, end) = CoordinateMapper::segment_to_render(&edge.a, &edge.b);
            DrawCommand::Line {
                start,
                end,
                color: style.edge_color,
            }
        }));

        commands
    }

    /// Compose the scene and submit it to `surface` in order
    pub fn render<S: RenderSurface + ?Sized>(&self, model: &Model, surface: &mut S) {
        for command in self.compose(model) {
            command.submit(surface);
        }
    }
}
