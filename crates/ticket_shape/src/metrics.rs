//! Ticket proportions shared by the outline and the layout

use ticket_core::Rect;

/// Dimensions that shape a ticket
///
/// The outline generator and the card layout both read `stub_height`, so
/// the stub notches always line up with the space the layout reserves for
/// the tear line.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TicketMetrics {
    /// Distance corner geometry is pulled inward from the card edge
    pub corner_inset: f32,
    /// Side length of a corner cut-out, before the inset
    pub corner_radius: f32,
    /// Position of the stub line, as a fraction of the height from the top
    pub stub_height: f32,
    /// Radius of the semicircular stub notches
    pub stub_radius: f32,
    /// Height of the image block above the stub line
    pub image_height: f32,
    /// Card `width / height`
    pub aspect_ratio: f32,
}

impl Default for TicketMetrics {
    fn default() -> Self {
        Self {
            corner_inset: 0.0,
            corner_radius: 20.0,
            stub_height: 0.75,
            stub_radius: 20.0,
            image_height: 200.0,
            aspect_ratio: 17.0 / 40.0,
        }
    }
}

impl TicketMetrics {
    /// Side of the square cell a corner style draws into
    pub fn corner_extent(&self) -> f32 {
        self.corner_radius + self.corner_inset
    }

    /// Vertical position of the stub notch centres within `rect`
    pub fn stub_y(&self, rect: Rect) -> f32 {
        rect.min_y() + rect.height() * self.stub_height
    }

    /// Smallest width and height for which the corner cells do not overlap
    pub fn minimum_extent(&self) -> f32 {
        2.0 * self.corner_extent()
    }
}
