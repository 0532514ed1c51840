//! Configuration types for Trellis diagram rendering.
//!
//! This module provides configuration structures that control where diagrams
//! are written and how they are styled. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining output and style settings.
//! - [`OutputConfig`] - Controls the output root directory and image format.
//! - [`StyleConfig`] - Controls visual styling options such as background color.
//!
//! # Example
//!
//! ```
//! # use trellis::config::{AppConfig, OutputFormat};
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.output().format(), OutputFormat::Png);
//! assert!(config.style().background_color().is_ok());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use trellis_core::{color::Color, draw::TextDefinition};

use crate::TrellisError;

/// Top-level application configuration combining output and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified output and style configurations.
    pub fn new(output: OutputConfig, style: StyleConfig) -> Self {
        Self { output, style }
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Raster format written for catalog diagrams.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
    Bmp,
}

impl OutputFormat {
    /// File extension for this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Bmp => "bmp",
        }
    }
}

/// Where and in which format catalog diagrams are written.
///
/// Diagrams land in `<directory>/diagrams/<file>.<extension>`.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Output root directory.
    #[serde(default = "OutputConfig::default_directory")]
    directory: PathBuf,

    /// Image format of rendered diagrams.
    #[serde(default)]
    format: OutputFormat,
}

impl OutputConfig {
    /// Creates a new [`OutputConfig`].
    pub fn new(directory: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            directory: directory.into(),
            format,
        }
    }

    fn default_directory() -> PathBuf {
        PathBuf::from("report")
    }

    /// Returns the output root directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the image format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(Self::default_directory(), OutputFormat::default())
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Fields that are not set fall back to renderer defaults: a white
/// background, a black title and the system sans-serif font.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for diagrams, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Title [`Color`], as a color string.
    #[serde(default)]
    title_color: Option<String>,

    /// Font family used for all diagram text.
    #[serde(default)]
    font_family: Option<String>,
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`]; `None` keeps the renderer default.
    pub fn new(
        background_color: Option<String>,
        title_color: Option<String>,
        font_family: Option<String>,
    ) -> Self {
        Self {
            background_color,
            title_color,
            font_family,
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Config`] if the configured color string cannot
    /// be parsed into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, TrellisError> {
        parse_color("background", self.background_color.as_deref())
    }

    /// Returns the parsed title [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Config`] if the configured color string is invalid.
    pub fn title_color(&self) -> Result<Option<Color>, TrellisError> {
        parse_color("title", self.title_color.as_deref())
    }

    /// Returns the text definition for diagram text.
    pub fn text_definition(&self) -> TextDefinition {
        let mut text = TextDefinition::new();
        if let Some(family) = self.font_family.as_deref().filter(|f| !f.trim().is_empty()) {
            text.set_font_family(family);
        }
        text
    }
}

fn parse_color(field: &str, value: Option<&str>) -> Result<Option<Color>, TrellisError> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| TrellisError::Config(format!("Invalid {field} color in config: {err}")))
}
