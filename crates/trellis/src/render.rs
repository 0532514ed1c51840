//! The diagram composer.
//!
//! Turns a [`Diagram`] into a finished [`Canvas`]. The composer knows nothing
//! about individual diagram kinds: every diagram goes through the same
//! sequence of title, nodes, decorations and edges.

use log::{debug, trace};

use trellis_core::{
    color::{Color, Palette},
    draw::{Canvas, TextDefinition, render_edge, render_node},
    geometry::Point,
};

use crate::{Diagram, TrellisError, config::StyleConfig};

/// Distance from the top of the canvas to the title's center line.
const TITLE_OFFSET: f32 = 40.0;

/// Resolved styling shared by every diagram a renderer draws.
#[derive(Debug, Clone)]
pub(crate) struct Composer {
    background: Color,
    title_color: Color,
    text: TextDefinition,
}

impl Composer {
    /// Resolves configured style values, falling back to the standard palette.
    pub(crate) fn from_style(style: &StyleConfig) -> Result<Self, TrellisError> {
        let palette = Palette::standard();
        let background = match style.background_color()? {
            Some(color) => color,
            None => palette.color("background")?,
        };
        let title_color = match style.title_color()? {
            Some(color) => color,
            None => palette.color("ink")?,
        };

        Ok(Self {
            background,
            title_color,
            text: style.text_definition(),
        })
    }

    /// Draws `diagram` onto a fresh canvas.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while allocating the canvas or drawing
    /// an element; nothing after the failing element is drawn.
    pub(crate) fn compose(&self, diagram: &Diagram) -> Result<Canvas, TrellisError> {
        let mut canvas = Canvas::new(diagram.width(), diagram.height(), self.background)?
            .with_text_definition(self.text.clone());

        let title_center = Point::new(diagram.width() as f32 / 2.0, TITLE_OFFSET);
        canvas.draw_text_centered(title_center, diagram.title(), self.title_color);

        for node in diagram.nodes() {
            trace!(kind:% = node.kind(), label = node.label(); "Rendering node");
            render_node(&mut canvas, node)?;
        }

        for decoration in diagram.decorations() {
            decoration.render(&mut canvas);
        }

        for edge in diagram.edges() {
            trace!(direction:? = edge.direction(); "Rendering edge");
            render_edge(&mut canvas, edge)?;
        }

        debug!(
            title = diagram.title(),
            nodes = diagram.nodes().len(),
            decorations = diagram.decorations().len(),
            edges = diagram.edges().len();
            "Diagram composed"
        );
        Ok(canvas)
    }
}
