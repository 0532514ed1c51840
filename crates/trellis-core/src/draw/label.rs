//! Multi-line label layout.
//!
//! Labels are pre-wrapped by the diagram author with explicit `\n` breaks;
//! no width-based wrapping happens here.

use log::debug;

use crate::geometry::Point;

/// One line of a laid-out label and the point its text is centered on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLine<'a> {
    position: Point,
    text: &'a str,
}

impl<'a> LabelLine<'a> {
    /// Returns the point the line is centered on
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the line's text
    pub fn text(&self) -> &'a str {
        self.text
    }
}

/// Splits `text` on `\n` and places each line for centered drawing.
///
/// The block starts at `center.y - lines * line_height / 2` and each
/// following line sits `line_height` lower. Every line shares `center.x`.
/// Empty segments count as lines, so the result always has one entry per
/// newline-delimited segment, in input order.
///
/// `box_height` is only used to report labels that overflow their box.
///
/// # Examples
///
/// ```
/// # use trellis_core::draw::layout_label;
/// # use trellis_core::geometry::Point;
/// let lines = layout_label(Point::new(250.0, 200.0), 100.0, "Frontend\nLayer", 20.0);
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].text(), "Frontend");
/// assert_eq!(lines[0].position(), Point::new(250.0, 180.0));
/// assert_eq!(lines[1].position(), Point::new(250.0, 200.0));
/// ```
pub fn layout_label(
    center: Point,
    box_height: f32,
    text: &str,
    line_height: f32,
) -> Vec<LabelLine<'_>> {
    let segments: Vec<&str> = text.split('\n').collect();
    let block_height = segments.len() as f32 * line_height;
    if block_height > box_height {
        debug!(
            label = text,
            block_height,
            box_height;
            "Label block is taller than its box"
        );
    }

    let start_y = center.y() - block_height / 2.0;
    segments
        .into_iter()
        .enumerate()
        .map(|(index, segment)| LabelLine {
            position: center.with_y(start_y + index as f32 * line_height),
            text: segment,
        })
        .collect()
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn label_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-zA-Z ()-]{0,12}", 1..8).prop_map(|lines| lines.join("\n"))
    }

    fn check_layout_preserves_lines(
        center: Point,
        text: &str,
        line_height: f32,
    ) -> Result<(), TestCaseError> {
        let lines = layout_label(center, 100.0, text, line_height);
        let segments: Vec<&str> = text.split('\n').collect();

        prop_assert_eq!(lines.len(), segments.len());
        for (line, segment) in lines.iter().zip(&segments) {
            prop_assert_eq!(line.text(), *segment);
            prop_assert!(approx_eq!(f32, line.position().x(), center.x()));
        }
        for pair in lines.windows(2) {
            let step = pair[1].position().y() - pair[0].position().y();
            prop_assert!(
                approx_eq!(f32, step, line_height, epsilon = 0.01),
                "lines should be spaced by {line_height}, got {step}"
            );
        }
        Ok(())
    }

    fn check_block_is_centered(
        center: Point,
        text: &str,
        line_height: f32,
    ) -> Result<(), TestCaseError> {
        let lines = layout_label(center, 100.0, text, line_height);
        let block_height = lines.len() as f32 * line_height;
        let first_y = lines[0].position().y();
        prop_assert!(approx_eq!(
            f32,
            first_y,
            center.y() - block_height / 2.0,
            epsilon = 0.01
        ));
        Ok(())
    }

    proptest! {
        #[test]
        fn layout_preserves_lines(
            x in -500.0f32..1500.0,
            y in -500.0f32..1500.0,
            text in label_strategy(),
            line_height in 1.0f32..40.0,
        ) {
            check_layout_preserves_lines(Point::new(x, y), &text, line_height)?;
        }

        #[test]
        fn block_is_centered(
            x in 0.0f32..1500.0,
            y in 0.0f32..1500.0,
            text in label_strategy(),
            line_height in 1.0f32..40.0,
        ) {
            check_block_is_centered(Point::new(x, y), &text, line_height)?;
        }
    }
}
