//! Core data structures for wireview
//!
//! This crate provides the fundamental types shared by the reconstruction
//! pipeline and the viewer: points, colors, views, edges, the reconstructed
//! model and the mapping from the reconstruction frame to the renderer frame.

pub mod point;
pub mod model;
pub mod frame;
pub mod error;

pub use point::*;
pub use model::*;
pub use frame::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point2, Point3, Vector3, Matrix4, Rotation3, Unit};
