//! Trellis - declarative box-and-arrow diagrams rendered to raster images.
//!
//! A [`Diagram`] is a data table of nodes, decorations and edges. The
//! [`DiagramRenderer`] draws it onto a canvas and saves it as a PNG, JPEG or
//! BMP file. The [`catalog`] module holds the built-in diagrams.

pub mod catalog;
pub mod config;

mod diagram;
mod error;
mod render;

pub use trellis_core::{color, draw, geometry};

pub use diagram::{Decoration, Diagram, DiagramBuilder};
pub use error::TrellisError;

use std::path::{Path, PathBuf};

use log::info;

use catalog::DiagramKind;
use config::AppConfig;
use render::Composer;

/// Renders diagrams to image files.
///
/// A renderer holds the application configuration; each call to
/// [`DiagramRenderer::render`] draws on its own canvas, so one renderer can
/// be used for any number of diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use trellis::{DiagramRenderer, catalog::DiagramKind, config::AppConfig};
///
/// let renderer = DiagramRenderer::new(AppConfig::default());
///
/// // Render a single diagram
/// let diagram = DiagramKind::FlowChart.build().expect("Failed to build");
/// let path = renderer
///     .render(&diagram, "out/auth_flow.png")
///     .expect("Failed to render");
///
/// // Or the whole catalog under an output root
/// let paths = renderer.render_catalog("report").expect("Failed to render catalog");
/// assert_eq!(paths.len(), 5);
/// ```
#[derive(Debug, Default)]
pub struct DiagramRenderer {
    config: AppConfig,
}

impl DiagramRenderer {
    /// Create a new renderer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the renderer configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Render `diagram` and save it to `path`.
    ///
    /// The image format follows the extension of `path`. Missing parent
    /// directories are created.
    ///
    /// # Errors
    ///
    /// Returns `TrellisError` for invalid style configuration, drawing
    /// failures, or when the image cannot be encoded or written. No file is
    /// written on error.
    pub fn render(
        &self,
        diagram: &Diagram,
        path: impl AsRef<Path>,
    ) -> Result<PathBuf, TrellisError> {
        let path = path.as_ref();
        info!(
            title = diagram.title(),
            width = diagram.width(),
            height = diagram.height();
            "Rendering diagram"
        );

        let composer = Composer::from_style(self.config.style())?;
        let canvas = composer.compose(diagram)?;
        canvas.save(path)?;

        info!(path = path.display().to_string(); "Diagram rendered");
        Ok(path.to_path_buf())
    }

    /// Path a catalog entry is written to under `output_root`.
    pub fn catalog_path(&self, kind: DiagramKind, output_root: impl AsRef<Path>) -> PathBuf {
        let format = self.config.output().format();
        output_root
            .as_ref()
            .join("diagrams")
            .join(format!("{}.{}", kind.file_stem(), format.extension()))
    }

    /// Render the given catalog entries under `output_root`.
    ///
    /// Returns the written paths in the order of `kinds`. Stops at the first
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns the first `TrellisError` raised by any diagram.
    pub fn render_kinds(
        &self,
        kinds: &[DiagramKind],
        output_root: impl AsRef<Path>,
    ) -> Result<Vec<PathBuf>, TrellisError> {
        let output_root = output_root.as_ref();
        kinds
            .iter()
            .map(|&kind| {
                let diagram = kind.build()?;
                self.render(&diagram, self.catalog_path(kind, output_root))
            })
            .collect()
    }

    /// Render every catalog diagram under `output_root`, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns the first `TrellisError` raised by any diagram.
    pub fn render_catalog(
        &self,
        output_root: impl AsRef<Path>,
    ) -> Result<Vec<PathBuf>, TrellisError> {
        self.render_kinds(&DiagramKind::ALL, output_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputConfig, OutputFormat, StyleConfig};

    #[test]
    fn test_catalog_path_uses_configured_format() {
        let renderer = DiagramRenderer::default();
        assert_eq!(
            renderer.catalog_path(DiagramKind::UseCase, "out"),
            Path::new("out").join("diagrams").join("use_case.png")
        );

        let config = AppConfig::new(
            OutputConfig::new("ignored", OutputFormat::Bmp),
            StyleConfig::default(),
        );
        let renderer = DiagramRenderer::new(config);
        assert_eq!(
            renderer.catalog_path(DiagramKind::ComponentTree, "root"),
            Path::new("root")
                .join("diagrams")
                .join("component_architecture.bmp")
        );
    }
}
