//! CLI logic for the Trellis diagram tool.
//!
//! This module contains the core CLI logic: resolving which catalog diagrams
//! to render, where to write them, and with which configuration.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::path::{Path, PathBuf};

use log::info;

use trellis::{DiagramRenderer, TrellisError, catalog::DiagramKind};

/// Run the Trellis CLI application
///
/// Renders the requested catalog diagrams (all of them when none are named)
/// under the output root and returns the written paths. With `--list`, prints
/// the catalog names instead and renders nothing.
///
/// The output root is `--output` when given, otherwise the configured
/// `[output] directory`.
///
/// # Errors
///
/// Returns `TrellisError` for:
/// - Unknown diagram names
/// - Configuration loading errors
/// - Rendering and file I/O errors
pub fn run(args: &Args) -> Result<Vec<PathBuf>, TrellisError> {
    if args.list {
        for kind in DiagramKind::ALL {
            println!("{:<16}{}", kind.name(), kind.title());
        }
        return Ok(Vec::new());
    }

    let kinds = if args.diagrams.is_empty() {
        DiagramKind::ALL.to_vec()
    } else {
        args.diagrams
            .iter()
            .map(|name| name.parse::<DiagramKind>())
            .collect::<Result<Vec<_>, _>>()?
    };

    let app_config = config::load_config(args.config.as_ref())?;
    let output_root = match &args.output {
        Some(dir) => PathBuf::from(dir),
        None => app_config.output().directory().to_path_buf(),
    };

    info!(
        diagrams = kinds.len(),
        output_root = output_root.display().to_string();
        "Rendering diagrams"
    );

    let renderer = DiagramRenderer::new(app_config);
    let paths = renderer.render_kinds(&kinds, Path::new(&output_root))?;

    info!(count = paths.len(); "Diagrams exported successfully");

    Ok(paths)
}
