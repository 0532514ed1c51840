//! Drawing primitives and renderers for diagram elements.
//!
//! The module is organised leaves first:
//!
//! - [`Canvas`] owns the raster surface and the primitive operations
//!   (line, polygon, rectangle, ellipse, centered text) plus encoding.
//! - [`layout_label`] splits multi-line labels and computes their vertical
//!   placement inside a box.
//! - [`render_node`] draws a [`Node`] (rectangle, oval or diamond) with its label.
//! - [`render_edge`] draws an [`Edge`] with a direction-aware arrowhead and an
//!   optional midpoint label.

use std::io;

use thiserror::Error;

mod canvas;
mod connector;
mod label;
mod shape;
mod stroke;
mod text;

pub use canvas::Canvas;
pub use connector::{Arrowhead, ConnectorStyle, Direction, Edge, render_edge};
pub use label::{LabelLine, layout_label};
pub use shape::{Anchor, Node, ShapeKind, render_node};
pub use stroke::StrokeDefinition;
pub use text::TextDefinition;

/// Errors raised while building or drawing diagram elements.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("invalid dimensions {width}x{height}: both must be strictly positive")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("unsupported shape `{0}`, valid values: rect, oval, diamond")]
    UnsupportedShape(String),

    #[error("unknown palette color `{0}`")]
    UnknownColor(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("image encoding failed: {0}")]
    Encode(String),
}
