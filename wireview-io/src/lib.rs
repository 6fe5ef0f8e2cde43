//! I/O operations for wireview
//!
//! This crate reads and writes view files and resolves a model name to the
//! set of views it was drawn in.

pub mod view_file;
pub mod registry;

pub use view_file::{read_view, parse_view, write_view, VIEW_EXTENSION};
pub use registry::{ModelRegistry, model_dir, read_model_views};
