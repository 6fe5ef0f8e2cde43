//! # Wireview GPU
//!
//! wgpu rendering backend for the wireview viewer.
//!
//! The renderer draws two kinds of primitive, line segments and small
//! spheres, under a single camera transform. Geometry is collected on the
//! CPU in a [`FrameGeometry`] during a frame and uploaded when the frame is
//! presented.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use wireview_gpu::{FrameGeometry, SphereMesh};
//! use wireview_core::{Color, Point3f};
//!
//! let sphere = SphereMesh::default();
//! let mut geometry = FrameGeometry::new();
//! geometry.push_line(&Point3f::origin(), &Point3f::new(100.0, 0.0, 0.0), Color::GRAY);
//! geometry.push_sphere(&Point3f::new(1.0, 3.0, 2.0), 0.5, Color::BLUE, &sphere);
//! ```

pub mod device;
pub mod geometry;
pub mod renderer;

// Re-export commonly used items
pub use device::GpuContext;
pub use geometry::{ColorVertex, FrameGeometry, SphereMesh};
pub use renderer::{WireframeRenderer, RenderConfig, CameraUniform, opengl_to_wgpu_matrix};
