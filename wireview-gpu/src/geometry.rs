//! CPU-side geometry buffers built up during a frame

use bytemuck::{Pod, Zeroable};
use wireview_core::{Color, Point3f, Vector3f};

/// Vertex data shared by the line and sphere pipelines
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl ColorVertex {
    pub fn new(position: &Point3f, color: Color) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            color: color.to_f32(),
        }
    }

    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Color
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Unit sphere tessellated as a triangle list
#[derive(Debug, Clone)]
pub struct SphereMesh {
    triangles: Vec<Vector3f>,
}

impl SphereMesh {
    /// UV sphere with `rings` latitude bands and `segments` longitude slices
    pub fn new(rings: u32, segments: u32) -> Self {
        let rings = rings.max(2);
        let segments = segments.max(3);
        let point = |ring: u32, segment: u32| {
            let theta = std::f32::consts::PI * ring as f32 / rings as f32;
            let phi = std::f32::consts::TAU * segment as f32 / segments as f32;
            Vector3f::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin())
        };

        let mut triangles = Vec::with_capacity((rings * segments * 6) as usize);
        for ring in 0..rings {
            for segment in 0..segments {
                let a = point(ring, segment);
                let b = point(ring + 1, segment);
                let c = point(ring + 1, segment + 1);
                let d = point(ring, segment + 1);
                if ring != 0 {
                    triangles.extend_from_slice(&[a, b, d]);
                }
                if ring != rings - 1 {
                    triangles.extend_from_slice(&[d, b, c]);
                }
            }
        }
        Self { triangles }
    }

    /// Triangle list vertices on the unit sphere
    pub fn triangles(&self) -> &[Vector3f] {
        &self.triangles
    }
}

impl Default for SphereMesh {
    fn default() -> Self {
        Self::new(8, 12)
    }
}

/// Everything to be drawn in one frame
#[derive(Debug, Clone, Default)]
pub struct FrameGeometry {
    /// Line list: consecutive vertex pairs
    pub lines: Vec<ColorVertex>,
    /// Triangle list for spheres
    pub triangles: Vec<ColorVertex>,
}

impl FrameGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, start: &Point3f, end: &Point3f, color: Color) {
        self.lines.push(ColorVertex::new(start, color));
        self.lines.push(ColorVertex::new(end, color));
    }

    pub fn push_sphere(&mut self, center: &Point3f, radius: f32, color: Color, mesh: &SphereMesh) {
        self.triangles.extend(
            mesh.triangles()
                .iter()
                .map(|offset| ColorVertex::new(&(center + offset * radius), color)),
        );
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.triangles.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.triangles.clear();
    }
}
