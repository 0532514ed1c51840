//! Color handling for Trellis diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, and the [`Palette`] of named colors the built-in
//! diagrams draw with.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
    sync::OnceLock,
};

use color::{DynamicColor, Srgb};

use crate::draw::DrawError;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// let semi_transparent_red = red.with_alpha(0.5);
    /// assert_eq!(semi_transparent_red.alpha(), 0.5);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component of this color, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the color as 8-bit sRGB channels `[r, g, b, a]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_core::color::Color;
    ///
    /// let steel = Color::new("steelblue").unwrap();
    /// assert_eq!(steel.to_rgba8(), [70, 130, 180, 255]);
    /// ```
    pub fn to_rgba8(self) -> [u8; 4] {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        [rgba.r, rgba.g, rgba.b, rgba.a]
    }

    /// Converts this color into a paint color for the raster surface.
    pub(crate) fn to_raster(self) -> tiny_skia::Color {
        let [r, g, b, a] = self.to_rgba8();
        tiny_skia::Color::from_rgba8(r, g, b, a)
    }

    /// Converts this color into a glyph color for text rasterization.
    pub(crate) fn to_glyph(self) -> cosmic_text::Color {
        let [r, g, b, a] = self.to_rgba8();
        cosmic_text::Color::rgba(r, g, b, a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

static STANDARD_PALETTE: OnceLock<Palette> = OnceLock::new();

/// An immutable table of named colors.
///
/// The standard palette holds the colors used by the built-in diagrams so
/// diagram tables can refer to colors by role instead of repeating CSS values.
///
/// # Examples
///
/// ```
/// use trellis_core::color::Palette;
///
/// let palette = Palette::standard();
/// let process = palette.color("process").unwrap();
/// assert_eq!(process.to_rgba8(), [135, 206, 250, 255]);
/// assert!(palette.color("no-such-role").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<(&'static str, Color)>,
}

impl Palette {
    const STANDARD: [(&'static str, &'static str); 15] = [
        ("background", "white"),
        ("ink", "black"),
        ("arrow", "rgb(100, 100, 100)"),
        ("box", "steelblue"),
        ("box-text", "white"),
        ("actor", "cornflowerblue"),
        ("use-case", "peachpuff"),
        ("process", "lightskyblue"),
        ("storage", "lightgreen"),
        ("start", "lightgreen"),
        ("decision", "rgb(255, 255, 153)"),
        ("root", "lightpink"),
        ("child", "lightblue"),
        ("leaf", "moccasin"),
        ("boundary", "black"),
    ];

    /// Returns the shared standard palette.
    pub fn standard() -> &'static Palette {
        STANDARD_PALETTE.get_or_init(|| Palette {
            entries: Self::STANDARD
                .iter()
                .map(|(name, css)| {
                    let color = Color::new(css).expect("standard palette colors are valid CSS");
                    (*name, color)
                })
                .collect(),
        })
    }

    /// Looks up a color by name.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::UnknownColor`] if the palette has no such entry.
    pub fn color(&self, name: &str) -> Result<Color, DrawError> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, color)| *color)
            .ok_or_else(|| DrawError::UnknownColor(name.to_string()))
    }

    /// Returns the palette entry names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}
