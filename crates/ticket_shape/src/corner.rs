//! Corner styles
//!
//! A corner style draws one corner of the ticket inside a small square cell.
//! Styles are always drawn for the top-right corner of the card: the cell's
//! top edge lies on the card's top edge and its right edge on the card's
//! right edge. The outline generator rotates the result into the other three
//! corners.

use std::fmt;
use std::str::FromStr;

use ticket_core::{Angle, Path, Point, Rect};

use crate::error::ShapeError;

/// Strategy for drawing the corners of a ticket
pub trait CornerStyle {
    /// Fragment drawn for the top-right corner cell `rect`
    fn render_corner(&self, rect: Rect) -> Path;

    /// Boundary of the corner as part of a closed contour
    ///
    /// Starts at the cell's top-left point (on the card's top edge) and ends
    /// at its bottom-right point (on the card's right edge).
    fn trace_corner(&self, rect: Rect) -> Path;
}

impl<C: CornerStyle + ?Sized> CornerStyle for &C {
    fn render_corner(&self, rect: Rect) -> Path {
        (**self).render_corner(rect)
    }

    fn trace_corner(&self, rect: Rect) -> Path {
        (**self).trace_corner(rect)
    }
}

/// Hard right-angle notch, pulled inward by `inset`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RightAngleCorner {
    pub inset: f32,
}

impl RightAngleCorner {
    pub fn new(inset: f32) -> Self {
        Self { inset }
    }
}

impl CornerStyle for RightAngleCorner {
    fn render_corner(&self, rect: Rect) -> Path {
        let inset = self.inset;
        Path::new()
            .move_to(rect.max_x() - inset, rect.max_y())
            .line_to(rect.max_x() - inset, rect.min_y() + inset)
            .line_to(rect.min_x(), rect.min_y() + inset)
            .line_to(rect.min_x(), rect.max_y())
    }

    /// Without an inset the notch is the whole cell. With one, the fragment's
    /// box is cut out as a hole, reached from the top edge by a zero-width
    /// bridge down the cell's left side, and the strips along the card edges
    /// stay filled.
    fn trace_corner(&self, rect: Rect) -> Path {
        let notch = Path::new()
            .move_to(rect.min_x(), rect.min_y())
            .line_to(rect.min_x(), rect.max_y());
        if self.inset <= 0.0 {
            return notch.line_to(rect.max_x(), rect.max_y());
        }

        let inset = self.inset;
        notch
            .line_to(rect.max_x() - inset, rect.max_y())
            .line_to(rect.max_x() - inset, rect.min_y() + inset)
            .line_to(rect.min_x(), rect.min_y() + inset)
            .line_to(rect.min_x(), rect.min_y())
            .line_to(rect.max_x(), rect.min_y())
            .line_to(rect.max_x(), rect.max_y())
    }
}

/// Concave quarter-circle fillet centred on the card's corner
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InvertedRoundedCorner;

impl InvertedRoundedCorner {
    fn arc(path: Path, rect: Rect) -> Path {
        path.add_arc(
            Point::new(rect.max_x(), rect.min_y()),
            rect.height(),
            Angle::degrees(180.0),
            Angle::degrees(90.0),
            true,
        )
    }
}

impl CornerStyle for InvertedRoundedCorner {
    fn render_corner(&self, rect: Rect) -> Path {
        // Starts at the card corner, so the fragment carries the radial line
        // out to the arc.
        Self::arc(Path::new().move_to(rect.max_x(), rect.min_y()), rect)
    }

    fn trace_corner(&self, rect: Rect) -> Path {
        Self::arc(Path::new(), rect)
    }
}

/// Named corner styles, for configuration
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CornerKind {
    /// [`InvertedRoundedCorner`]
    #[default]
    Rounded,
    /// [`RightAngleCorner`] with the given inset
    RightAngle { inset: f32 },
}

impl CornerKind {
    pub fn right_angle() -> Self {
        CornerKind::RightAngle { inset: 0.0 }
    }

    /// Apply the metrics' corner inset to styles that use one
    pub fn with_inset(self, inset: f32) -> Self {
        match self {
            CornerKind::Rounded => CornerKind::Rounded,
            CornerKind::RightAngle { .. } => CornerKind::RightAngle { inset },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CornerKind::Rounded => "rounded",
            CornerKind::RightAngle { .. } => "right-angle",
        }
    }
}

impl CornerStyle for CornerKind {
    fn render_corner(&self, rect: Rect) -> Path {
        match *self {
            CornerKind::Rounded => InvertedRoundedCorner.render_corner(rect),
            CornerKind::RightAngle { inset } => RightAngleCorner::new(inset).render_corner(rect),
        }
    }

    fn trace_corner(&self, rect: Rect) -> Path {
        match *self {
            CornerKind::Rounded => InvertedRoundedCorner.trace_corner(rect),
            CornerKind::RightAngle { inset } => RightAngleCorner::new(inset).trace_corner(rect),
        }
    }
}

impl fmt::Display for CornerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CornerKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rounded" | "inverted-rounded" => Ok(CornerKind::Rounded),
            "right-angle" | "right_angle" | "notch" => Ok(CornerKind::right_angle()),
            other => Err(ShapeError::UnknownCorner(other.to_string())),
        }
    }
}
