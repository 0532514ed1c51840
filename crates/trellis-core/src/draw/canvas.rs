//! Raster drawing surface.
//!
//! [`Canvas`] wraps a `tiny-skia` pixmap and exposes the handful of
//! primitives the shape and connector renderers are built from. Axis-aligned
//! rectangles are filled without anti-aliasing so that integer coordinates
//! map exactly onto pixel boundaries; everything else is anti-aliased.

use std::{
    fs,
    io::{Cursor, Write},
    path::Path,
};

use image::{ImageFormat, RgbImage};
use log::{debug, info};
use tempfile::NamedTempFile;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

use crate::{
    color::Color,
    draw::{
        DrawError, StrokeDefinition, TextDefinition,
        text::{GlyphSpan, TextManager},
    },
    geometry::{Bounds, Point},
};

/// A fixed-size raster surface.
///
/// A canvas is created with a background color, mutated by draw calls, and
/// encoded to a file with [`Canvas::save`]. It is not meant to be shared
/// between threads while drawing; render independent diagrams on
/// independent canvases instead.
///
/// # Examples
///
/// ```
/// # use trellis_core::draw::{Canvas, StrokeDefinition};
/// # use trellis_core::color::Color;
/// # use trellis_core::geometry::Point;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut canvas = Canvas::new(200, 100, Color::new("white")?)?;
/// let stroke = StrokeDefinition::solid(Color::new("black")?, 2.0);
/// canvas.draw_line(Point::new(10.0, 50.0), Point::new(190.0, 50.0), &stroke);
/// assert_eq!(canvas.pixel(100, 50), Some([0, 0, 0]));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Canvas {
    pixmap: Pixmap,
    text: TextDefinition,
}

impl Canvas {
    /// Allocates a canvas of `width` x `height` pixels filled with `background`.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::InvalidDimensions`] if either dimension is zero or
    /// the surface cannot be allocated at that size.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, DrawError> {
        let invalid = || DrawError::InvalidDimensions {
            width: width as f32,
            height: height as f32,
        };
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        let mut pixmap = Pixmap::new(width, height).ok_or_else(invalid)?;
        pixmap.fill(background.to_raster());
        debug!(width, height, background = background.to_string(); "Canvas created");

        Ok(Self {
            pixmap,
            text: TextDefinition::default(),
        })
    }

    /// Sets the font used by [`Canvas::draw_text_centered`] (builder style).
    pub fn with_text_definition(mut self, text: TextDefinition) -> Self {
        self.text = text;
        self
    }

    /// Returns the font used for text drawn on this canvas
    pub fn text_definition(&self) -> &TextDefinition {
        &self.text
    }

    /// Returns the canvas width in pixels
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Returns the canvas height in pixels
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Returns the RGB value of the pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some([pixel.red(), pixel.green(), pixel.blue()])
    }

    /// Draws a straight segment from `from` to `to`.
    ///
    /// A zero-length segment or an invisible stroke draws nothing.
    pub fn draw_line(&mut self, from: Point, to: Point, stroke: &StrokeDefinition) {
        if !stroke.is_visible() {
            return;
        }
        let mut builder = PathBuilder::new();
        builder.move_to(from.x(), from.y());
        builder.line_to(to.x(), to.y());
        let Some(path) = builder.finish() else {
            return;
        };
        let paint = solid_paint(stroke.color(), true);
        self.pixmap.stroke_path(
            &path,
            &paint,
            &stroke.to_raster(),
            Transform::identity(),
            None,
        );
    }

    /// Fills and outlines a closed polygon.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::InvalidGeometry`] if fewer than three points are
    /// given or the points do not form a drawable path.
    pub fn draw_polygon(
        &mut self,
        points: &[Point],
        fill: Option<Color>,
        border: Option<&StrokeDefinition>,
    ) -> Result<(), DrawError> {
        if points.len() < 3 {
            return Err(DrawError::InvalidGeometry(format!(
                "a polygon needs at least 3 points, got {}",
                points.len()
            )));
        }
        if points.iter().any(|p| !p.x().is_finite() || !p.y().is_finite()) {
            return Err(DrawError::InvalidGeometry(
                "polygon points must be finite".to_string(),
            ));
        }

        let mut builder = PathBuilder::new();
        builder.move_to(points[0].x(), points[0].y());
        for point in &points[1..] {
            builder.line_to(point.x(), point.y());
        }
        builder.close();
        let path = builder.finish().ok_or_else(|| {
            DrawError::InvalidGeometry("polygon has no drawable area".to_string())
        })?;

        if let Some(fill) = fill {
            let paint = solid_paint(fill, true);
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
        if let Some(border) = border.filter(|border| border.is_visible()) {
            let paint = solid_paint(border.color(), true);
            self.pixmap.stroke_path(
                &path,
                &paint,
                &border.to_raster(),
                Transform::identity(),
                None,
            );
        }
        Ok(())
    }

    /// Draws an axis-aligned rectangle spanning `top_left` to `bottom_right`.
    ///
    /// The border is painted inside the rectangle, so for integer
    /// coordinates the painted pixels are exactly `[left, right) x [top, bottom)`.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::InvalidGeometry`] if the rectangle has no area.
    pub fn draw_rect(
        &mut self,
        top_left: Point,
        bottom_right: Point,
        fill: Option<Color>,
        border: Option<&StrokeDefinition>,
    ) -> Result<(), DrawError> {
        let bounds = Bounds::new_from_corners(top_left, bottom_right);
        let outer = to_rect(bounds).ok_or_else(|| {
            DrawError::InvalidGeometry(format!(
                "rectangle {top_left:?} -> {bottom_right:?} has no area"
            ))
        })?;

        if let Some(fill) = fill {
            self.pixmap
                .fill_rect(outer, &solid_paint(fill, false), Transform::identity(), None);
        }

        let Some(border) = border.filter(|border| border.is_visible()) else {
            return Ok(());
        };
        let paint = solid_paint(border.color(), false);
        let Some(inner) = bounds.inset(border.width()) else {
            // Border is thicker than half the box: it covers everything.
            self.pixmap
                .fill_rect(outer, &paint, Transform::identity(), None);
            return Ok(());
        };

        let strips = [
            // top, bottom, left, right
            (bounds.min_x(), bounds.min_y(), bounds.max_x(), inner.min_y()),
            (bounds.min_x(), inner.max_y(), bounds.max_x(), bounds.max_y()),
            (bounds.min_x(), inner.min_y(), inner.min_x(), inner.max_y()),
            (inner.max_x(), inner.min_y(), bounds.max_x(), inner.max_y()),
        ];
        for (left, top, right, bottom) in strips {
            if let Some(strip) = Rect::from_ltrb(left, top, right, bottom) {
                self.pixmap
                    .fill_rect(strip, &paint, Transform::identity(), None);
            }
        }
        Ok(())
    }

    /// Draws the ellipse inscribed in `bounds`.
    ///
    /// As with rectangles, the border is painted inside the bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::InvalidGeometry`] if the bounding box has no area.
    pub fn draw_ellipse(
        &mut self,
        bounds: Bounds,
        fill: Option<Color>,
        border: Option<&StrokeDefinition>,
    ) -> Result<(), DrawError> {
        let no_area =
            || DrawError::InvalidGeometry(format!("ellipse bounds {bounds:?} have no area"));
        let outer = to_rect(bounds).ok_or_else(no_area)?;

        if let Some(fill) = fill {
            let path = PathBuilder::from_oval(outer).ok_or_else(no_area)?;
            self.pixmap.fill_path(
                &path,
                &solid_paint(fill, true),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }

        if let Some(border) = border.filter(|border| border.is_visible()) {
            let paint = solid_paint(border.color(), true);
            match bounds.inset(border.width() / 2.0).and_then(to_rect) {
                Some(centerline) => {
                    let path = PathBuilder::from_oval(centerline).ok_or_else(no_area)?;
                    self.pixmap.stroke_path(
                        &path,
                        &paint,
                        &border.to_raster(),
                        Transform::identity(),
                        None,
                    );
                }
                None => {
                    let path = PathBuilder::from_oval(outer).ok_or_else(no_area)?;
                    self.pixmap.fill_path(
                        &path,
                        &paint,
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
            }
        }
        Ok(())
    }

    /// Draws a single line of text centered (horizontally and vertically) on `center`.
    ///
    /// Uses the canvas' [`TextDefinition`]. Text that cannot be shaped
    /// (for example when no font is installed) draws nothing.
    pub fn draw_text_centered(&mut self, center: Point, text: &str, color: Color) {
        if text.trim().is_empty() {
            return;
        }
        let manager = TextManager::global();
        let size = manager.measure(text, &self.text);
        let origin_x = (center.x() - size.width() / 2.0).round() as i32;
        let origin_y = (center.y() - size.height() / 2.0).round() as i32;

        let pixmap = &mut self.pixmap;
        manager.rasterize(text, &self.text, color, |span: GlyphSpan| {
            let [r, g, b, a] = span.rgba;
            let Some(rect) = Rect::from_xywh(
                (origin_x + span.x) as f32,
                (origin_y + span.y) as f32,
                span.width as f32,
                span.height as f32,
            ) else {
                return;
            };
            let mut paint = Paint::default();
            paint.set_color_rgba8(r, g, b, a);
            paint.anti_alias = false;
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        });
    }

    /// Encodes the canvas as 24-bit RGB and writes it to `path`.
    ///
    /// The image format follows the file extension (`png`, `jpg`/`jpeg`,
    /// `bmp`). Missing parent directories are created. The image is written
    /// to a temporary file next to `path` and renamed into place, so a failed
    /// save never leaves a truncated file behind.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::Encode`] for an unsupported extension or encoder
    /// failure, and [`DrawError::Io`] if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DrawError> {
        let path = path.as_ref();
        let format =
            ImageFormat::from_path(path).map_err(|err| DrawError::Encode(err.to_string()))?;
        let bytes = self.encode(format)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut temp_file = NamedTempFile::new_in(dir)?;
        temp_file.write_all(&bytes)?;
        temp_file.flush()?;
        temp_file.persist(path).map_err(|err| DrawError::Io(err.error))?;

        info!(path = path.display().to_string(), bytes = bytes.len(); "Canvas saved");
        Ok(())
    }

    /// Encodes the canvas as 24-bit RGB in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::Encode`] if the format has no encoder available.
    pub fn encode(&self, format: ImageFormat) -> Result<Vec<u8>, DrawError> {
        let mut bytes = Cursor::new(Vec::new());
        self.to_rgb_image()?
            .write_to(&mut bytes, format)
            .map_err(|err| DrawError::Encode(err.to_string()))?;
        Ok(bytes.into_inner())
    }

    fn to_rgb_image(&self) -> Result<RgbImage, DrawError> {
        let data = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let pixel = pixel.demultiply();
                [pixel.red(), pixel.green(), pixel.blue()]
            })
            .collect();
        RgbImage::from_raw(self.width(), self.height(), data)
            .ok_or_else(|| DrawError::Encode("pixel buffer does not match canvas size".to_string()))
    }
}

fn solid_paint(color: Color, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_raster());
    paint.anti_alias = anti_alias;
    paint
}

/// Returns `None` unless `bounds` has a positive width and height.
fn to_rect(bounds: Bounds) -> Option<Rect> {
    if !(bounds.width() > 0.0 && bounds.height() > 0.0) {
        return None;
    }
    Rect::from_ltrb(
        bounds.min_x(),
        bounds.min_y(),
        bounds.max_x(),
        bounds.max_y(),
    )
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    const WHITE: [u8; 3] = [255, 255, 255];

    fn white() -> Color {
        Color::new("white").unwrap()
    }

    fn blank(width: u32, height: u32) -> Canvas {
        Canvas::new(width, height, white()).unwrap()
    }

    #[test]
    fn test_new_fills_background() {
        let canvas = Canvas::new(20, 10, Color::new("steelblue").unwrap()).unwrap();
        assert_eq!(canvas.width(), 20);
        assert_eq!(canvas.height(), 10);
        assert_eq!(canvas.pixel(0, 0), Some([70, 130, 180]));
        assert_eq!(canvas.pixel(19, 9), Some([70, 130, 180]));
        assert_eq!(canvas.pixel(20, 0), None);
        assert_eq!(canvas.pixel(0, 10), None);
    }

    #[test]
    fn test_pixel_past_right_edge_does_not_wrap() {
        let mut canvas = blank(20, 10);
        canvas
            .draw_rect(
                Point::new(0.0, 1.0),
                Point::new(1.0, 2.0),
                Some(Color::new("red").unwrap()),
                None,
            )
            .unwrap();
        assert_eq!(canvas.pixel(0, 1), Some([255, 0, 0]));
        assert_eq!(canvas.pixel(20, 0), None);
        assert_eq!(canvas.pixel(u32::MAX, 0), None);
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(matches!(
            Canvas::new(0, 10, white()),
            Err(DrawError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Canvas::new(10, 0, white()),
            Err(DrawError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_draw_rect_is_pixel_exact() {
        let mut canvas = blank(60, 60);
        let border = StrokeDefinition::solid(Color::default(), 3.0);
        canvas
            .draw_rect(
                Point::new(10.0, 20.0),
                Point::new(40.0, 50.0),
                Some(Color::new("steelblue").unwrap()),
                Some(&border),
            )
            .unwrap();

        // Border corners and fill
        assert_eq!(canvas.pixel(10, 20), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(39, 49), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(12, 22), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(13, 23), Some([70, 130, 180]));
        assert_eq!(canvas.pixel(25, 35), Some([70, 130, 180]));

        // Just outside every edge
        assert_eq!(canvas.pixel(9, 30), Some(WHITE));
        assert_eq!(canvas.pixel(40, 30), Some(WHITE));
        assert_eq!(canvas.pixel(25, 19), Some(WHITE));
        assert_eq!(canvas.pixel(25, 50), Some(WHITE));
    }

    #[test]
    fn test_draw_rect_without_fill_keeps_interior() {
        let mut canvas = blank(60, 60);
        let border = StrokeDefinition::solid(Color::default(), 2.0);
        canvas
            .draw_rect(Point::new(10.0, 10.0), Point::new(50.0, 50.0), None, Some(&border))
            .unwrap();
        assert_eq!(canvas.pixel(10, 30), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(11, 30), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(12, 30), Some(WHITE));
        assert_eq!(canvas.pixel(30, 30), Some(WHITE));
    }

    #[test]
    fn test_draw_rect_rejects_empty_area() {
        let mut canvas = blank(20, 20);
        let result = canvas.draw_rect(Point::new(5.0, 5.0), Point::new(5.0, 15.0), None, None);
        assert!(matches!(result, Err(DrawError::InvalidGeometry(_))));

        let result = canvas.draw_rect(
            Point::new(5.0, 5.0),
            Point::new(15.0, 5.0),
            Some(Color::default()),
            Some(&StrokeDefinition::default()),
        );
        assert!(matches!(result, Err(DrawError::InvalidGeometry(_))));
    }

    #[test]
    fn test_draw_ellipse_rejects_empty_area() {
        let mut canvas = blank(20, 20);
        let flat = Bounds::new_from_corners(Point::new(5.0, 5.0), Point::new(5.0, 15.0));
        assert!(matches!(
            canvas.draw_ellipse(flat, None, None),
            Err(DrawError::InvalidGeometry(_))
        ));
        assert!(matches!(
            canvas.draw_ellipse(flat, Some(Color::default()), None),
            Err(DrawError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_draw_polygon_requires_three_points() {
        let mut canvas = blank(20, 20);
        let result = canvas.draw_polygon(
            &[Point::new(1.0, 1.0), Point::new(10.0, 10.0)],
            Some(Color::default()),
            None,
        );
        assert!(matches!(result, Err(DrawError::InvalidGeometry(_))));
    }

    #[test]
    fn test_draw_polygon_fills_interior() {
        let mut canvas = blank(40, 40);
        canvas
            .draw_polygon(
                &[
                    Point::new(20.0, 0.0),
                    Point::new(40.0, 20.0),
                    Point::new(20.0, 40.0),
                    Point::new(0.0, 20.0),
                ],
                Some(Color::new("red").unwrap()),
                None,
            )
            .unwrap();
        assert_eq!(canvas.pixel(20, 20), Some([255, 0, 0]));
        assert_eq!(canvas.pixel(1, 1), Some(WHITE));
        assert_eq!(canvas.pixel(38, 38), Some(WHITE));
    }

    #[test]
    fn test_draw_ellipse_stays_in_bounds() {
        let mut canvas = blank(100, 60);
        let bounds = Point::new(50.0, 30.0).to_bounds(crate::geometry::Size::new(80.0, 40.0));
        let border = StrokeDefinition::solid(Color::default(), 2.0);
        canvas
            .draw_ellipse(bounds, Some(Color::new("peachpuff").unwrap()), Some(&border))
            .unwrap();

        assert_eq!(canvas.pixel(50, 30), Some([255, 218, 185]));
        // Bounding box corners lie outside the ellipse
        assert_eq!(canvas.pixel(11, 11), Some(WHITE));
        assert_eq!(canvas.pixel(88, 48), Some(WHITE));
        // Outside the bounding box entirely
        assert_eq!(canvas.pixel(5, 30), Some(WHITE));
    }

    #[test]
    fn test_draw_line_zero_length_is_noop() {
        let mut canvas = blank(20, 20);
        let before = canvas.encode(ImageFormat::Png).unwrap();
        canvas.draw_line(
            Point::new(5.0, 5.0),
            Point::new(5.0, 5.0),
            &StrokeDefinition::default(),
        );
        assert_eq!(canvas.encode(ImageFormat::Png).unwrap(), before);
    }

    #[test]
    fn test_draw_text_blank_is_noop() {
        let mut canvas = blank(20, 20);
        let before = canvas.encode(ImageFormat::Png).unwrap();
        canvas.draw_text_centered(Point::new(10.0, 10.0), "   ", Color::default());
        assert_eq!(canvas.encode(ImageFormat::Png).unwrap(), before);
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.png");
        blank(30, 20).save(&path).unwrap();

        let saved = image::open(&path).unwrap();
        assert_eq!(saved.width(), 30);
        assert_eq!(saved.height(), 20);
        assert_eq!(saved.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn test_save_other_formats() {
        let dir = tempdir().unwrap();
        for name in ["out.bmp", "out.jpg"] {
            let path = dir.path().join(name);
            blank(16, 8).save(&path).unwrap();
            assert_eq!(image::image_dimensions(&path).unwrap(), (16, 8));
        }
    }

    #[test]
    fn test_save_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("diagram.unknownformat");
        let result = blank(10, 10).save(&path);
        assert!(matches!(result, Err(DrawError::Encode(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_into_file_parent_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let result = blank(10, 10).save(blocker.join("out.png"));
        assert!(matches!(result, Err(DrawError::Io(_))));
    }
}
