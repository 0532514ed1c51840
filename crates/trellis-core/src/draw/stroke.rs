//! Stroke definitions for borders and connector lines.

use crate::color::Color;

/// A stroke definition for rendering lines and borders.
///
/// # Examples
///
/// ```
/// use trellis_core::draw::StrokeDefinition;
/// use trellis_core::color::Color;
///
/// // Default stroke (black, 1px)
/// let stroke = StrokeDefinition::default();
/// assert_eq!(stroke.width(), 1.0);
///
/// let stroke = StrokeDefinition::solid(Color::new("gray").unwrap(), 3.0);
/// assert_eq!(stroke.width(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
}

impl StrokeDefinition {
    /// Creates a solid stroke with the given color and width in pixels.
    ///
    /// Negative widths are clamped to zero; a zero-width stroke draws nothing.
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width: width.max(0.0),
        }
    }

    /// Returns the stroke color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width in pixels
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Sets the stroke color
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Sets the stroke width, clamped to zero
    pub fn set_width(&mut self, width: f32) {
        self.width = width.max(0.0);
    }

    /// Returns true if this stroke paints anything
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.color.alpha() > 0.0
    }

    pub(crate) fn to_raster(&self) -> tiny_skia::Stroke {
        tiny_skia::Stroke {
            width: self.width,
            ..tiny_skia::Stroke::default()
        }
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}
