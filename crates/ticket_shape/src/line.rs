//! Divider line
//!
//! A single horizontal segment across the middle of its rect, stroked with
//! a dash pattern to draw the ticket's tear line.

use ticket_core::{Path, Rect};

use crate::shape::Shape;

/// Horizontal line through the vertical mid-point of a rect
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Divider;

impl Shape for Divider {
    fn path(&self, rect: Rect) -> Path {
        Path::new()
            .move_to(rect.min_x(), rect.mid_y())
            .line_to(rect.max_x(), rect.mid_y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticket_core::{PathCommand, Point};

    #[test]
    fn test_single_segment_at_mid_height() {
        for width in [0.0, 1.0, 255.0, 10_000.0] {
            let rect = Rect::new(16.0, 40.0, width, 10.0);
            let path = Divider.path(rect);
            assert_eq!(
                path.commands(),
                &[
                    PathCommand::MoveTo(Point::new(16.0, 45.0)),
                    PathCommand::LineTo(Point::new(16.0 + width, 45.0)),
                ]
            );
        }
    }

    #[test]
    fn test_zero_height_rect() {
        let path = Divider.path(Rect::new(0.0, 7.0, 100.0, 0.0));
        assert_eq!(path.bounds(), Rect::new(0.0, 7.0, 100.0, 0.0));
    }
}
