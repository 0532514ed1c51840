//! Declarative diagram description.
//!
//! A [`Diagram`] is plain data: a title, output dimensions and three ordered
//! lists (nodes, decorations, edges). It is assembled with a
//! [`DiagramBuilder`], which validates everything up front so that rendering
//! never discovers a malformed element halfway through.

use log::warn;

use trellis_core::{
    color::Color,
    draw::{Canvas, Edge, Node, StrokeDefinition},
    geometry::Point,
};

use crate::TrellisError;

/// A free-standing mark that is neither a node nor a connector.
///
/// Used for things like an actor's stick figure or a caption above a
/// system boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoration {
    /// Straight segment without arrowhead
    Line {
        from: Point,
        to: Point,
        stroke: StrokeDefinition,
    },
    /// One line of text centered on a point
    Text {
        position: Point,
        text: String,
        color: Color,
    },
}

impl Decoration {
    /// Creates a line decoration.
    pub fn line(from: Point, to: Point, stroke: StrokeDefinition) -> Self {
        Self::Line { from, to, stroke }
    }

    /// Creates a text decoration centered on `position`.
    pub fn text(position: Point, text: impl Into<String>, color: Color) -> Self {
        Self::Text {
            position,
            text: text.into(),
            color,
        }
    }

    pub(crate) fn render(&self, canvas: &mut Canvas) {
        match self {
            Self::Line { from, to, stroke } => canvas.draw_line(*from, *to, stroke),
            Self::Text {
                position,
                text,
                color,
            } => canvas.draw_text_centered(*position, text, *color),
        }
    }

    fn points(&self) -> Vec<Point> {
        match self {
            Self::Line { from, to, .. } => vec![*from, *to],
            Self::Text { position, .. } => vec![*position],
        }
    }
}

/// A complete, validated diagram description.
///
/// # Examples
///
/// ```
/// # use trellis::Diagram;
/// # use trellis::draw::{Anchor, Edge, Node, ShapeKind};
/// # use trellis::geometry::{Point, Size};
/// # fn main() -> Result<(), trellis::TrellisError> {
/// let diagram = Diagram::builder("Pipeline", 400, 200)
///     .with_node(Node::new(
///         ShapeKind::Rectangle,
///         Anchor::TopLeft,
///         Point::new(20.0, 80.0),
///         Size::new(100.0, 60.0),
///     )?)
///     .with_edge(Edge::new(Point::new(120.0, 110.0), Point::new(200.0, 110.0)))
///     .build()?;
///
/// assert_eq!(diagram.width(), 400);
/// assert_eq!(diagram.nodes().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    title: String,
    width: u32,
    height: u32,
    nodes: Vec<Node>,
    decorations: Vec<Decoration>,
    edges: Vec<Edge>,
}

impl Diagram {
    /// Starts building a diagram of `width` x `height` pixels.
    pub fn builder(title: impl Into<String>, width: u32, height: u32) -> DiagramBuilder {
        DiagramBuilder::new(title, width, height)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nodes in drawing order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Decorations in drawing order.
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// Edges in drawing order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Builder for [`Diagram`].
#[derive(Debug, Clone)]
pub struct DiagramBuilder {
    title: String,
    width: u32,
    height: u32,
    nodes: Vec<Node>,
    decorations: Vec<Decoration>,
    edges: Vec<Edge>,
}

impl DiagramBuilder {
    fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            nodes: Vec::new(),
            decorations: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Appends a node.
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Appends several nodes, keeping their order.
    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Appends a decoration.
    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decorations.push(decoration);
        self
    }

    /// Appends several decorations, keeping their order.
    pub fn with_decorations(mut self, decorations: impl IntoIterator<Item = Decoration>) -> Self {
        self.decorations.extend(decorations);
        self
    }

    /// Appends an edge.
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Appends several edges, keeping their order.
    pub fn with_edges(mut self, edges: impl IntoIterator<Item = Edge>) -> Self {
        self.edges.extend(edges);
        self
    }

    /// Validates and finishes the diagram.
    ///
    /// Elements that fall partly outside the canvas are accepted (they are
    /// clipped when drawn) and reported with a warning.
    ///
    /// # Errors
    ///
    /// - [`TrellisError::InvalidDimensions`] if width or height is zero.
    /// - [`TrellisError::InvalidGeometry`] if any coordinate is not finite.
    pub fn build(self) -> Result<Diagram, TrellisError> {
        if self.width == 0 || self.height == 0 {
            return Err(TrellisError::InvalidDimensions {
                width: self.width as f32,
                height: self.height as f32,
            });
        }

        let (width, height) = (self.width as f32, self.height as f32);
        let on_canvas =
            |p: Point| p.x() >= 0.0 && p.y() >= 0.0 && p.x() <= width && p.y() <= height;

        for (index, node) in self.nodes.iter().enumerate() {
            let bounds = node.bounds();
            let corners = [bounds.min_point(), bounds.max_point()];
            check_finite(&corners, || format!("node {index} has a non-finite position"))?;
            if !corners.into_iter().all(on_canvas) {
                warn!(
                    title = self.title,
                    index,
                    label = node.label();
                    "Node extends past the canvas"
                );
            }
        }

        for (index, decoration) in self.decorations.iter().enumerate() {
            check_finite(&decoration.points(), || {
                format!("decoration {index} has a non-finite position")
            })?;
        }

        for (index, edge) in self.edges.iter().enumerate() {
            let ends = [edge.start(), edge.end()];
            check_finite(&ends, || format!("edge {index} has a non-finite endpoint"))?;
            if edge.start() == edge.end() {
                warn!(title = self.title, index; "Edge has coincident endpoints");
            }
            if !ends.into_iter().all(on_canvas) {
                warn!(title = self.title, index; "Edge extends past the canvas");
            }
        }

        Ok(Diagram {
            title: self.title,
            width: self.width,
            height: self.height,
            nodes: self.nodes,
            decorations: self.decorations,
            edges: self.edges,
        })
    }
}

fn check_finite(points: &[Point], describe: impl FnOnce() -> String) -> Result<(), TrellisError> {
    if points.iter().all(|p| p.x().is_finite() && p.y().is_finite()) {
        Ok(())
    } else {
        Err(TrellisError::InvalidGeometry(describe()))
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::{
        draw::{Anchor, ShapeKind},
        geometry::Size,
    };

    use super::*;

    fn node(label: &str, x: f32) -> Node {
        Node::new(
            ShapeKind::Rectangle,
            Anchor::TopLeft,
            Point::new(x, 10.0),
            Size::new(50.0, 30.0),
        )
        .unwrap()
        .with_label(label)
    }

    #[test]
    fn test_build_keeps_order() {
        let diagram = Diagram::builder("Order", 300, 100)
            .with_nodes([node("a", 10.0), node("b", 70.0)])
            .with_node(node("c", 130.0))
            .with_edges([
                Edge::new(Point::new(60.0, 25.0), Point::new(70.0, 25.0)),
                Edge::new(Point::new(120.0, 25.0), Point::new(130.0, 25.0)),
            ])
            .with_decoration(Decoration::text(
                Point::new(150.0, 80.0),
                "caption",
                Color::default(),
            ))
            .build()
            .unwrap();

        let labels: Vec<&str> = diagram.nodes().iter().map(Node::label).collect();
        assert_eq!(labels, ["a", "b", "c"]);
        assert_eq!(diagram.edges()[1].start(), Point::new(120.0, 25.0));
        assert_eq!(diagram.decorations().len(), 1);
        assert_eq!(diagram.title(), "Order");
    }

    #[test]
    fn test_build_rejects_zero_dimensions() {
        for (width, height) in [(0, 100), (100, 0)] {
            let result = Diagram::builder("Empty", width, height).build();
            assert!(matches!(result, Err(TrellisError::InvalidDimensions { .. })));
        }
    }

    #[test]
    fn test_build_rejects_non_finite_edge() {
        let result = Diagram::builder("Broken", 100, 100)
            .with_edge(Edge::new(Point::new(0.0, 0.0), Point::new(f32::NAN, 10.0)))
            .build();
        assert!(matches!(
            result,
            Err(TrellisError::InvalidGeometry(msg)) if msg.contains("edge 0")
        ));
    }

    #[test]
    fn test_build_rejects_non_finite_decoration() {
        let result = Diagram::builder("Broken", 100, 100)
            .with_decoration(Decoration::line(
                Point::new(f32::INFINITY, 0.0),
                Point::new(10.0, 10.0),
                StrokeDefinition::default(),
            ))
            .build();
        assert!(matches!(result, Err(TrellisError::InvalidGeometry(_))));
    }

    #[test]
    fn test_build_accepts_elements_past_canvas() {
        let diagram = Diagram::builder("Clipped", 100, 50)
            .with_node(node("wide", 80.0))
            .build()
            .unwrap();
        assert_eq!(diagram.nodes().len(), 1);
    }
}
