//! Ticket Shapes
//!
//! Geometry for a ticket-style card: four decorative corners drawn by a
//! pluggable [`CornerStyle`], the card body, and two semicircular stub
//! notches marking where the stub tears off. A [`Divider`] draws the tear
//! line across the card.
//!
//! All shapes are pure functions of a bounding rect. Hosts that lay the card
//! out repeatedly keep a [`ShapeCache`] and feed it the new rect on every
//! size change.
//!
//! # Example
//!
//! ```rust
//! use ticket_core::Rect;
//! use ticket_shape::{CornerKind, TicketShape};
//!
//! let shape = TicketShape::new(CornerKind::Rounded);
//! let rect = Rect::new(0.0, 0.0, 300.0, 600.0);
//!
//! let outline = shape.outline(rect);
//! assert_eq!(outline.corners.len(), 4);
//!
//! let clip = shape.silhouette(rect);
//! assert!(clip.is_closed());
//! ```

pub mod corner;
pub mod error;
pub mod line;
pub mod metrics;
pub mod shape;
pub mod ticket;

pub use corner::{CornerKind, CornerStyle, InvertedRoundedCorner, RightAngleCorner};
pub use error::ShapeError;
pub use line::Divider;
pub use metrics::TicketMetrics;
pub use shape::{ResizeCallback, Shape, ShapeCache};
pub use ticket::{CornerPlacement, TicketOutline, TicketShape};
