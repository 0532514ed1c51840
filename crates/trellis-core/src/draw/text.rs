//! Text styling, measurement and glyph rasterization.
//!
//! Text is shaped and rasterized with `cosmic-text` against the system font
//! database. The font database is expensive to build, so a single
//! [`TextManager`] is created lazily and shared by every canvas in the
//! process. When no usable font is installed, text measures as empty and no
//! glyphs are drawn; shapes and connectors are unaffected.

use std::sync::{Mutex, OnceLock, PoisonError};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};
use log::info;

use crate::{color::Color, geometry::Size};

/// Defines the font used for labels and titles drawn on a canvas.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `14` px |
///
/// # Examples
///
/// ```
/// # use trellis_core::draw::TextDefinition;
/// let mut style = TextDefinition::new();
/// style.set_font_family("DejaVu Sans");
/// style.set_font_size(16.0);
/// assert_eq!(style.font_size(), 16.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in pixels. Non-positive sizes are ignored.
    pub fn set_font_size(&mut self, size: f32) {
        if size > 0.0 {
            self.font_size = size;
        }
    }

    /// Sets the font family for the text.
    ///
    /// Generic names (`sans-serif`, `serif`, `monospace`) select the system's
    /// default face of that kind.
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Returns the font size in pixels
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the font family name
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Height of one rendered line of text
    fn line_height(&self) -> f32 {
        self.font_size * 1.2
    }

    fn family(&self) -> Family<'_> {
        match self.font_family.as_str() {
            "sans-serif" => Family::SansSerif,
            "serif" => Family::Serif,
            "monospace" => Family::Monospace,
            name => Family::Name(name),
        }
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: String::from("sans-serif"),
            font_size: 14.0,
        }
    }
}

/// A run of coverage produced by the glyph rasterizer.
///
/// Coordinates are relative to the top-left corner of the text block.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GlyphSpan {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub rgba: [u8; 4],
}

/// TextManager handles text measurement and glyph rasterization.
/// It keeps one FontSystem and glyph cache for the whole process.
pub(crate) struct TextManager {
    state: Mutex<TextState>,
}

struct TextState {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

impl TextManager {
    /// Returns the process-wide text manager, creating it on first use.
    pub(crate) fn global() -> &'static TextManager {
        TEXT_MANAGER.get_or_init(TextManager::new)
    }

    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            state: Mutex::new(TextState {
                font_system: FontSystem::new(),
                swash_cache: SwashCache::new(),
            }),
        }
    }

    /// Shapes a single line of text and returns the buffer ready for drawing.
    fn shape(font_system: &mut FontSystem, text: &str, text_def: &TextDefinition) -> Buffer {
        let metrics = Metrics::new(text_def.font_size(), text_def.line_height());
        let mut buffer = Buffer::new(font_system, metrics);
        {
            let mut buffer = buffer.borrow_with(font_system);
            buffer.set_size(None, None);
            let attrs = Attrs::new().family(text_def.family());
            buffer.set_text(text, &attrs, Shaping::Advanced, None);
            buffer.shape_until_scroll(true);
        }
        buffer
    }

    fn block_size(buffer: &Buffer, text_def: &TextDefinition) -> Size {
        let mut width: f32 = 0.0;
        let mut lines = 0;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
            lines += 1;
        }
        if lines == 0 {
            return Size::default();
        }
        Size::new(width, lines as f32 * text_def.line_height())
    }

    /// Measures the rendered size of `text`.
    pub(crate) fn measure(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let buffer = Self::shape(&mut state.font_system, text, text_def);
        Self::block_size(&buffer, text_def)
    }

    /// Rasterizes `text` and hands every covered span to `sink`.
    ///
    /// Returns the size of the text block the spans are relative to.
    pub(crate) fn rasterize<F>(
        &self,
        text: &str,
        text_def: &TextDefinition,
        color: Color,
        mut sink: F,
    ) -> Size
    where
        F: FnMut(GlyphSpan),
    {
        if text.is_empty() {
            return Size::default();
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let TextState {
            font_system,
            swash_cache,
        } = &mut *state;

        let buffer = Self::shape(font_system, text, text_def);
        buffer.draw(
            font_system,
            swash_cache,
            color.to_glyph(),
            |x, y, width, height, glyph_color| {
                if glyph_color.a() == 0 {
                    return;
                }
                sink(GlyphSpan {
                    x,
                    y,
                    width,
                    height,
                    rgba: [
                        glyph_color.r(),
                        glyph_color.g(),
                        glyph_color.b(),
                        glyph_color.a(),
                    ],
                });
            },
        );
        Self::block_size(&buffer, text_def)
    }
}
