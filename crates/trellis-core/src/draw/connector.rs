//! Connectors between diagram elements.
//!
//! An [`Edge`] is a straight segment with an optional arrowhead at its end
//! and an optional label near its midpoint. Arrowheads are axis-aligned: the
//! travel [`Direction`] is classified from the segment and selects one of
//! four head orientations.

use crate::{
    color::Color,
    draw::{Canvas, DrawError, StrokeDefinition},
    geometry::Point,
};

/// Distance between a connector label and its segment.
const LABEL_OFFSET: f32 = 15.0;

/// Travel direction of a connector, derived from its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
    /// Start and end coincide
    None,
}

impl Direction {
    /// Classifies the segment `start -> end`.
    ///
    /// The checks run in priority order right, down, left, up, so a diagonal
    /// segment takes the first direction that matches.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::draw::Direction;
    /// # use trellis_core::geometry::Point;
    /// let right = Direction::classify(Point::new(100.0, 100.0), Point::new(300.0, 100.0));
    /// assert_eq!(right, Direction::Right);
    ///
    /// let left = Direction::classify(Point::new(300.0, 100.0), Point::new(100.0, 100.0));
    /// assert_eq!(left, Direction::Left);
    ///
    /// // Down-left diagonal: down wins over left
    /// let diagonal = Direction::classify(Point::new(340.0, 340.0), Point::new(250.0, 450.0));
    /// assert_eq!(diagonal, Direction::Down);
    /// ```
    pub fn classify(start: Point, end: Point) -> Self {
        if end.x() > start.x() {
            Self::Right
        } else if end.y() > start.y() {
            Self::Down
        } else if end.x() < start.x() {
            Self::Left
        } else if end.y() < start.y() {
            Self::Up
        } else {
            Self::None
        }
    }
}

/// Whether a connector ends in an arrowhead.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorStyle {
    /// Segment with an arrowhead at the end
    #[default]
    Arrow,
    /// Bare segment
    Plain,
}

/// Arrowhead proportions.
///
/// The tip sits on the connector end; the two trailing vertices are `length`
/// back along the travel axis and `half_width` to either side of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    length: f32,
    half_width: f32,
}

impl Arrowhead {
    pub fn new(length: f32, half_width: f32) -> Self {
        Self { length, half_width }
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    /// Returns the triangle `[tip, trailing, trailing]` for a head at `tip`
    /// travelling in `direction`, or `None` for [`Direction::None`].
    pub fn vertices(&self, tip: Point, direction: Direction) -> Option<[Point; 3]> {
        let (back, side) = match direction {
            Direction::Right => (Point::new(-self.length, 0.0), Point::new(0.0, self.half_width)),
            Direction::Left => (Point::new(self.length, 0.0), Point::new(0.0, self.half_width)),
            Direction::Down => (Point::new(0.0, -self.length), Point::new(self.half_width, 0.0)),
            Direction::Up => (Point::new(0.0, self.length), Point::new(self.half_width, 0.0)),
            Direction::None => return None,
        };
        let base = tip.add_point(back);
        Some([tip, base.sub_point(side), base.add_point(side)])
    }
}

impl Default for Arrowhead {
    fn default() -> Self {
        Self::new(10.0, 5.0)
    }
}

/// A straight connector between two points.
///
/// # Examples
///
/// ```
/// # use trellis_core::draw::{ConnectorStyle, Edge};
/// # use trellis_core::geometry::Point;
/// let edge = Edge::new(Point::new(250.0, 240.0), Point::new(350.0, 240.0))
///     .with_label("Message");
/// assert_eq!(edge.style(), ConnectorStyle::Arrow);
/// assert_eq!(edge.label(), Some("Message"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    start: Point,
    end: Point,
    label: Option<String>,
    stroke: StrokeDefinition,
    style: ConnectorStyle,
    arrowhead: Arrowhead,
    label_color: Color,
}

impl Edge {
    /// Creates a black 3px arrow from `start` to `end`.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            label: None,
            stroke: StrokeDefinition::solid(Color::default(), 3.0),
            style: ConnectorStyle::Arrow,
            arrowhead: Arrowhead::default(),
            label_color: Color::default(),
        }
    }

    /// Sets the label drawn near the midpoint (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the line stroke; the arrowhead uses the same color (builder style).
    pub fn with_stroke(mut self, stroke: StrokeDefinition) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets whether an arrowhead is drawn (builder style).
    pub fn with_style(mut self, style: ConnectorStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the arrowhead proportions (builder style).
    pub fn with_arrowhead(mut self, arrowhead: Arrowhead) -> Self {
        self.arrowhead = arrowhead;
        self
    }

    /// Sets the label color (builder style).
    pub fn with_label_color(mut self, color: Color) -> Self {
        self.label_color = color;
        self
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Returns the label, treating an empty label as none.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| !label.is_empty())
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn style(&self) -> ConnectorStyle {
        self.style
    }

    pub fn arrowhead(&self) -> Arrowhead {
        self.arrowhead
    }

    /// Returns the travel direction of this edge.
    pub fn direction(&self) -> Direction {
        Direction::classify(self.start, self.end)
    }

    /// Returns the arrowhead triangle, or `None` for plain or degenerate edges.
    pub fn arrowhead_vertices(&self) -> Option<[Point; 3]> {
        match self.style {
            ConnectorStyle::Arrow => self.arrowhead.vertices(self.end, self.direction()),
            ConnectorStyle::Plain => None,
        }
    }

    /// Returns where the label is centered.
    ///
    /// The midpoint of the segment, moved [`LABEL_OFFSET`] pixels along the
    /// segment normal that points up (or right, for vertical segments).
    pub fn label_position(&self) -> Point {
        let midpoint = self.start.midpoint(self.end);
        let delta = self.end.sub_point(self.start);
        let length = delta.hypot();
        if length < 0.001 {
            return midpoint.with_y(midpoint.y() - LABEL_OFFSET);
        }

        let mut normal = Point::new(delta.y() / length, -delta.x() / length);
        if normal.y() > 0.0 || (normal.y() == 0.0 && normal.x() < 0.0) {
            normal = normal.scale(-1.0);
        }
        midpoint.add_point(normal.scale(LABEL_OFFSET))
    }
}

/// Draws `edge` onto `canvas`: the segment, its arrowhead, then its label.
///
/// # Errors
///
/// Propagates [`DrawError::InvalidGeometry`] if the arrowhead cannot be drawn.
pub fn render_edge(canvas: &mut Canvas, edge: &Edge) -> Result<(), DrawError> {
    canvas.draw_line(edge.start, edge.end, &edge.stroke);

    if let Some(head) = edge.arrowhead_vertices() {
        canvas.draw_polygon(&head, Some(edge.stroke.color()), None)?;
    }

    if let Some(label) = edge.label() {
        canvas.draw_text_centered(edge.label_position(), label, edge.label_color);
    }
    Ok(())
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// Tip sits on the end point and the trailing vertices mirror each other
    /// across the travel axis.
    fn check_arrowhead_tip_and_symmetry(start: Point, end: Point) -> Result<(), TestCaseError> {
        let edge = Edge::new(start, end);
        let Some([tip, a, b]) = edge.arrowhead_vertices() else {
            prop_assert_eq!(edge.direction(), Direction::None);
            return Ok(());
        };

        prop_assert_eq!(tip, end);
        match edge.direction() {
            Direction::Right | Direction::Left => {
                prop_assert!(approx_eq!(f32, a.x(), b.x()));
                prop_assert!(approx_eq!(f32, tip.y() - a.y(), b.y() - tip.y(), epsilon = 0.01));
            }
            Direction::Down | Direction::Up => {
                prop_assert!(approx_eq!(f32, a.y(), b.y()));
                prop_assert!(approx_eq!(f32, tip.x() - a.x(), b.x() - tip.x(), epsilon = 0.01));
            }
            Direction::None => prop_assert!(false, "degenerate edges have no head"),
        }
        Ok(())
    }

    fn check_label_offset_distance(start: Point, end: Point) -> Result<(), TestCaseError> {
        prop_assume!(start.sub_point(end).hypot() > 1.0);
        let edge = Edge::new(start, end);
        let offset = edge.label_position().sub_point(start.midpoint(end)).hypot();
        prop_assert!(approx_eq!(f32, offset, LABEL_OFFSET, epsilon = 0.01));
        Ok(())
    }

    proptest! {
        #[test]
        fn arrowhead_tip_and_symmetry(start in point_strategy(), end in point_strategy()) {
            check_arrowhead_tip_and_symmetry(start, end)?;
        }

        #[test]
        fn label_offset_distance(start in point_strategy(), end in point_strategy()) {
            check_label_offset_distance(start, end)?;
        }
    }
}
