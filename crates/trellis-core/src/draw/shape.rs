//! Node shapes and the shape renderer.
//!
//! A [`Node`] is a labeled rectangle, oval or diamond. The shape kind is a
//! closed set dispatched once in [`render_node`]; how a node's position is
//! interpreted (top-left corner or center) is explicit [`Anchor`] metadata.

use std::{fmt, str::FromStr};

use crate::{
    color::Color,
    draw::{Canvas, DrawError, StrokeDefinition, layout_label},
    geometry::{Bounds, Point, Size},
};

/// The geometric kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Axis-aligned rectangle
    Rectangle,
    /// Ellipse inscribed in the node box
    Oval,
    /// Four-point polygon touching the midpoints of the node box
    Diamond,
}

impl FromStr for ShapeKind {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rect" | "rectangle" => Ok(Self::Rectangle),
            "oval" | "ellipse" => Ok(Self::Oval),
            "diamond" => Ok(Self::Diamond),
            _ => Err(DrawError::UnsupportedShape(s.to_string())),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rectangle => "rect",
            Self::Oval => "oval",
            Self::Diamond => "diamond",
        })
    }
}

/// Which point of the node box its position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Position is the top-left corner of the box
    TopLeft,
    /// Position is the center of the box
    Center,
}

/// A labeled shape to draw.
///
/// Width and height are validated on construction and a node is never
/// mutated by rendering.
///
/// # Examples
///
/// ```
/// # use trellis_core::draw::{Anchor, Node, ShapeKind};
/// # use trellis_core::geometry::{Point, Size};
/// # fn main() -> Result<(), trellis_core::draw::DrawError> {
/// let node = Node::new(
///     ShapeKind::Rectangle,
///     Anchor::TopLeft,
///     Point::new(100.0, 150.0),
///     Size::new(300.0, 100.0),
/// )?
/// .with_label("Frontend\nLayer");
///
/// assert_eq!(node.bounds().center(), Point::new(250.0, 200.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: ShapeKind,
    anchor: Anchor,
    position: Point,
    size: Size,
    label: String,
    fill: Option<Color>,
    border: StrokeDefinition,
    label_color: Color,
    line_height: f32,
}

impl Node {
    /// Default distance between label lines
    pub const DEFAULT_LINE_HEIGHT: f32 = 20.0;

    /// Creates a node with no label, no fill and a 2px black border.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::InvalidDimensions`] unless both dimensions are
    /// strictly positive.
    pub fn new(
        kind: ShapeKind,
        anchor: Anchor,
        position: Point,
        size: Size,
    ) -> Result<Self, DrawError> {
        if !size.is_positive() {
            return Err(DrawError::InvalidDimensions {
                width: size.width(),
                height: size.height(),
            });
        }
        Ok(Self {
            kind,
            anchor,
            position,
            size,
            label: String::new(),
            fill: None,
            border: StrokeDefinition::solid(Color::default(), 2.0),
            label_color: Color::default(),
            line_height: Self::DEFAULT_LINE_HEIGHT,
        })
    }

    /// Sets the label; `\n` separates lines (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the fill color (builder style).
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Sets the border stroke (builder style).
    pub fn with_border(mut self, border: StrokeDefinition) -> Self {
        self.border = border;
        self
    }

    /// Sets the label text color (builder style).
    pub fn with_label_color(mut self, color: Color) -> Self {
        self.label_color = color;
        self
    }

    /// Sets the distance between label lines (builder style).
    ///
    /// Non-positive values are ignored.
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        if line_height > 0.0 {
            self.line_height = line_height;
        }
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn border(&self) -> &StrokeDefinition {
        &self.border
    }

    pub fn label_color(&self) -> Color {
        self.label_color
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Returns the node box in canvas coordinates, resolving the anchor.
    pub fn bounds(&self) -> Bounds {
        match self.anchor {
            Anchor::TopLeft => Bounds::new_from_top_left(self.position, self.size),
            Anchor::Center => Bounds::new_from_center(self.position, self.size),
        }
    }

    /// Returns the diamond vertices for this node's box: top, right, bottom, left.
    pub fn diamond_vertices(&self) -> [Point; 4] {
        let bounds = self.bounds();
        let center = bounds.center();
        [
            center.with_y(bounds.min_y()),
            center.with_x(bounds.max_x()),
            center.with_y(bounds.max_y()),
            center.with_x(bounds.min_x()),
        ]
    }

    /// Returns the diamond shrunk so a stroke of `width` centered on it
    /// stays inside the node box, or `None` when the stroke would cover
    /// the whole diamond.
    fn diamond_border_vertices(&self, width: f32) -> Option<[Point; 4]> {
        let half = self.size.half();
        let (a, b) = (half.width(), half.height());
        // Distance from the center to each edge is ab / hypot(a, b).
        let factor = 1.0 - (width / 2.0) * a.hypot(b) / (a * b);
        if factor <= 0.0 {
            return None;
        }
        let center = self.bounds().center();
        Some(
            self.diamond_vertices()
                .map(|vertex| center.add_point(vertex.sub_point(center).scale(factor))),
        )
    }
}

/// Draws `node` onto `canvas`: the shape first, then its centered label lines.
///
/// Borders of every kind are painted inside the node box.
///
/// # Errors
///
/// Propagates [`DrawError::InvalidGeometry`] from the canvas primitives.
pub fn render_node(canvas: &mut Canvas, node: &Node) -> Result<(), DrawError> {
    let bounds = node.bounds();
    let border = Some(node.border());

    match node.kind {
        ShapeKind::Rectangle => {
            canvas.draw_rect(bounds.min_point(), bounds.max_point(), node.fill, border)?
        }
        ShapeKind::Oval => canvas.draw_ellipse(bounds, node.fill, border)?,
        ShapeKind::Diamond => render_diamond(canvas, node)?,
    }

    for line in layout_label(
        bounds.center(),
        bounds.height(),
        &node.label,
        node.line_height,
    ) {
        canvas.draw_text_centered(line.position(), line.text(), node.label_color);
    }
    Ok(())
}

fn render_diamond(canvas: &mut Canvas, node: &Node) -> Result<(), DrawError> {
    let outline = node.diamond_vertices();
    if node.fill.is_some() {
        canvas.draw_polygon(&outline, node.fill, None)?;
    }

    let border = node.border();
    if !border.is_visible() {
        return Ok(());
    }
    match node.diamond_border_vertices(border.width()) {
        Some(inset) => canvas.draw_polygon(&inset, None, Some(border)),
        None => canvas.draw_polygon(&outline, Some(border.color()), None),
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    const WHITE: [u8; 3] = [255, 255, 255];

    fn blank(width: u32, height: u32) -> Canvas {
        Canvas::new(width, height, Color::new("white").unwrap()).unwrap()
    }

    #[test]
    fn test_shape_kind_from_str() {
        assert_eq!("rect".parse::<ShapeKind>().unwrap(), ShapeKind::Rectangle);
        assert_eq!("rectangle".parse::<ShapeKind>().unwrap(), ShapeKind::Rectangle);
        assert_eq!("oval".parse::<ShapeKind>().unwrap(), ShapeKind::Oval);
        assert_eq!("ellipse".parse::<ShapeKind>().unwrap(), ShapeKind::Oval);
        assert_eq!("diamond".parse::<ShapeKind>().unwrap(), ShapeKind::Diamond);
    }

    #[test]
    fn test_shape_kind_unsupported() {
        let err = "hexagon".parse::<ShapeKind>().unwrap_err();
        assert!(matches!(err, DrawError::UnsupportedShape(name) if name == "hexagon"));
    }

    #[test]
    fn test_shape_kind_display_round_trips() {
        for kind in [ShapeKind::Rectangle, ShapeKind::Oval, ShapeKind::Diamond] {
            assert_eq!(kind.to_string().parse::<ShapeKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_node_rejects_non_positive_size() {
        for size in [Size::new(0.0, 10.0), Size::new(10.0, -5.0)] {
            let result = Node::new(ShapeKind::Rectangle, Anchor::TopLeft, Point::default(), size);
            assert!(matches!(result, Err(DrawError::InvalidDimensions { .. })));
        }
    }

    #[test]
    fn test_node_bounds_respect_anchor() {
        let top_left = Node::new(
            ShapeKind::Rectangle,
            Anchor::TopLeft,
            Point::new(100.0, 150.0),
            Size::new(300.0, 100.0),
        )
        .unwrap();
        assert_eq!(top_left.bounds().min_point(), Point::new(100.0, 150.0));
        assert_eq!(top_left.bounds().max_point(), Point::new(400.0, 250.0));

        let centered = Node::new(
            ShapeKind::Rectangle,
            Anchor::Center,
            Point::new(600.0, 100.0),
            Size::new(200.0, 60.0),
        )
        .unwrap();
        assert_eq!(centered.bounds().min_point(), Point::new(500.0, 70.0));
        assert_eq!(centered.bounds().max_point(), Point::new(700.0, 130.0));
    }

    #[test]
    fn test_diamond_vertices() {
        let node = Node::new(
            ShapeKind::Diamond,
            Anchor::Center,
            Point::new(400.0, 320.0),
            Size::new(120.0, 80.0),
        )
        .unwrap();
        let [top, right, bottom, left] = node.diamond_vertices();
        assert_eq!(top, Point::new(400.0, 280.0));
        assert_eq!(right, Point::new(460.0, 320.0));
        assert_eq!(bottom, Point::new(400.0, 360.0));
        assert_eq!(left, Point::new(340.0, 320.0));
    }

    #[test]
    fn test_line_height_ignores_non_positive() {
        let node = Node::new(
            ShapeKind::Oval,
            Anchor::Center,
            Point::default(),
            Size::new(10.0, 10.0),
        )
        .unwrap()
        .with_line_height(-1.0);
        assert_approx_eq!(f32, node.line_height(), Node::DEFAULT_LINE_HEIGHT);
    }

    #[test]
    fn test_render_rect_fills_exact_box() {
        let mut canvas = blank(120, 100);
        let node = Node::new(
            ShapeKind::Rectangle,
            Anchor::TopLeft,
            Point::new(20.0, 30.0),
            Size::new(60.0, 40.0),
        )
        .unwrap()
        .with_fill(Color::new("lightskyblue").unwrap());
        render_node(&mut canvas, &node).unwrap();

        assert_eq!(canvas.pixel(20, 30), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(79, 69), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(30, 35), Some([135, 206, 250]));
        assert_eq!(canvas.pixel(19, 50), Some(WHITE));
        assert_eq!(canvas.pixel(80, 50), Some(WHITE));
        assert_eq!(canvas.pixel(50, 29), Some(WHITE));
        assert_eq!(canvas.pixel(50, 70), Some(WHITE));
    }

    #[test]
    fn test_render_oval_and_diamond_fill_center() {
        let mut canvas = blank(200, 100);
        let oval = Node::new(
            ShapeKind::Oval,
            Anchor::Center,
            Point::new(50.0, 50.0),
            Size::new(80.0, 40.0),
        )
        .unwrap()
        .with_fill(Color::new("lightgreen").unwrap());
        let diamond = Node::new(
            ShapeKind::Diamond,
            Anchor::Center,
            Point::new(150.0, 50.0),
            Size::new(80.0, 80.0),
        )
        .unwrap()
        .with_fill(Color::new("rgb(255, 255, 153)").unwrap());

        render_node(&mut canvas, &oval).unwrap();
        render_node(&mut canvas, &diamond).unwrap();

        assert_eq!(canvas.pixel(30, 50), Some([144, 238, 144]));
        assert_eq!(canvas.pixel(12, 32), Some(WHITE));
        assert_eq!(canvas.pixel(130, 50), Some([255, 255, 153]));
        assert_eq!(canvas.pixel(115, 15), Some(WHITE));
    }

    #[test]
    fn test_diamond_border_stays_inside_box() {
        let mut canvas = blank(200, 100);
        let diamond = Node::new(
            ShapeKind::Diamond,
            Anchor::Center,
            Point::new(100.0, 50.0),
            Size::new(80.0, 80.0),
        )
        .unwrap()
        .with_fill(Color::new("rgb(255, 255, 153)").unwrap())
        .with_border(StrokeDefinition::solid(Color::new("red").unwrap(), 10.0));

        render_node(&mut canvas, &diamond).unwrap();

        // Left and top vertices sit on the box edge; nothing spills past it
        assert_eq!(canvas.pixel(57, 50), Some(WHITE));
        assert_eq!(canvas.pixel(100, 7), Some(WHITE));
        assert_eq!(canvas.pixel(64, 50), Some([255, 0, 0]));
        assert_eq!(canvas.pixel(100, 50), Some([255, 255, 153]));
    }

    #[test]
    fn test_diamond_border_inset_keeps_edge_distance() {
        let node = Node::new(
            ShapeKind::Diamond,
            Anchor::Center,
            Point::new(0.0, 0.0),
            Size::new(120.0, 80.0),
        )
        .unwrap();
        let [top, right, _, _] = node.diamond_border_vertices(4.0).unwrap();
        // Edge distance from the center shrinks by exactly half the width
        let edge_distance = |a: f32, b: f32| a * b / a.hypot(b);
        let outer = edge_distance(60.0, 40.0);
        let inner = edge_distance(right.x(), -top.y());
        assert_approx_eq!(f32, outer - inner, 2.0, epsilon = 1e-3);

        assert!(node.diamond_border_vertices(200.0).is_none());
    }
}
