//! Model registry: resolving a model name to its view files
//!
//! Models live in a directory tree keyed by name:
//!
//! ```text
//! <root>/<name>/front.view
//! <root>/<name>/top.view
//! <root>/<name>/side.view
//! ```
//!
//! Any subset of the three files may be present; the reconstruction decides
//! which views it requires.

use crate::view_file::{read_view, VIEW_EXTENSION};
use wireview_core::{Error, Result, View, ViewKind};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lookup of models by name under a root directory
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    root: PathBuf,
}

impl ModelRegistry {
    /// Create a registry rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the view files of `name`
    pub fn model_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Path of the view file for `kind` within model `name`
    pub fn view_path(&self, name: &str, kind: ViewKind) -> PathBuf {
        self.model_dir(name)
            .join(kind.as_str())
            .with_extension(VIEW_EXTENSION)
    }

    /// Whether a directory exists for `name`
    pub fn contains(&self, name: &str) -> bool {
        self.model_dir(name).is_dir()
    }

    /// Names of all model directories under the root, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Read every view file present for `name`, in front/top/side order
    pub fn read_views(&self, name: &str) -> Result<Vec<View>> {
        let dir = self.model_dir(name);
        if !dir.is_dir() {
            return Err(Error::ModelNotFound {
                name: name.to_string(),
                path: self.root.display().to_string(),
            });
        }

        let mut views = Vec::new();
        for kind in ViewKind::ALL {
            let path = self.view_path(name, kind);
            if path.is_file() {
                let view = read_view(&path, kind)?;
                debug!(
                    "Read {} view of '{}': {} vertices, {} segments",
                    kind,
                    name,
                    view.len(),
                    view.segments().len()
                );
                views.push(view);
            }
        }

        if views.is_empty() {
            return Err(Error::InvalidData(format!(
                "model '{}' has no view files in {}",
                name,
                dir.display()
            )));
        }
        Ok(views)
    }
}

/// Directory holding the view files of model `name` under `root`
pub fn model_dir<P: AsRef<Path>>(root: P, name: &str) -> PathBuf {
    ModelRegistry::new(root).model_dir(name)
}

/// Read all view files of model `name` under `root`
pub fn read_model_views<P: AsRef<Path>>(root: P, name: &str) -> Result<Vec<View>> {
    ModelRegistry::new(root).read_views(name)
}
