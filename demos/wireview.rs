//! Reconstruct a wireframe from its three orthographic views and display it
//!
//! ```text
//! wireview --model cross --models-dir models
//! ```
//!
//! Left and right arrow keys orbit the camera; Escape or closing the window
//! exits.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use wireview_reconstruction::{reconstruct, ReconstructionConfig};
use wireview_visualization::{show_model, ViewerConfig};

/// Model shown when none is named on the command line
const MODEL_NAME: &str = "cross";

#[derive(Parser)]
#[command(name = "wireview")]
#[command(about = "Reconstruct a wireframe model from three orthographic views and view it in 3D")]
struct Args {
    /// Directory holding one sub-directory of view files per model
    #[arg(long, default_value = "models")]
    models_dir: PathBuf,

    /// Name of the model to load
    #[arg(long, default_value = MODEL_NAME)]
    model: String,

    /// Distance under which two coordinates are treated as equal
    #[arg(long)]
    tolerance: Option<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wireview=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = ReconstructionConfig::default();
    if let Some(tolerance) = args.tolerance {
        config.tolerance = tolerance;
    }

    let model = reconstruct(&args.model, &args.models_dir, config)
        .with_context(|| format!("Failed to reconstruct model '{}' from {}", args.model, args.models_dir.display()))?;
    info!("{}", model);

    let frames = show_model(&model, &ViewerConfig::default()).context("Viewer failed")?;
    info!("Rendered {} frames", frames);

    Ok(())
}
