//! Ticket Layout
//!
//! Composes a [`TicketRecord`] onto a ticket-shaped card. Block positions are
//! computed with Taffy flexbox layout; the result is painted through the
//! [`ticket_core::DrawContext`] trait so any backend can draw it.
//!
//! # Example
//!
//! ```rust
//! use ticket_core::{RecordingContext, Size};
//! use ticket_layout::{TicketRecord, TicketView};
//!
//! let view = TicketView::new(TicketRecord::sample());
//! let size = Size::new(372.0, 832.0);
//!
//! let mut ctx = RecordingContext::new(size);
//! let layout = view.paint(&mut ctx, size).unwrap();
//! assert!(layout.cut_line.height() > 0.0);
//! ```

pub mod error;
pub mod record;
pub mod text_measure;
pub mod theme;
pub mod tree;
pub mod view;

pub use error::LayoutError;
pub use record::{TicketRecord, DEFAULT_IMAGE};
pub use text_measure::{EstimatedTextMeasurer, TextLayoutOptions, TextMeasurer, TextMetrics};
pub use theme::{TicketTheme, TicketTypography};
pub use tree::{LayoutNodeId, LayoutTree, TextMeasureContext};
pub use view::{ContactLayout, ContentLayout, TicketLayout, TicketPart, TicketView};
