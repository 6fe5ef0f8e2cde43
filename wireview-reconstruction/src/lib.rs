//! # Wireview Reconstruction
//!
//! Wireframe reconstruction from orthographic views.
//!
//! This crate turns the front, top and side drawings of a model into a 3D
//! wireframe: a set of vertices and the edges joining them.

pub mod geometry;
pub mod pipeline;

// Re-export commonly used items
pub use pipeline::*;
