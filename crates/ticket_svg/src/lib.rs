//! SVG output for tickets
//!
//! This crate turns recorded [`ticket_core::DrawCommand`]s into SVG documents
//! and rasterizes them with `resvg`.
//!
//! # Example
//!
//! ```rust
//! use ticket_core::{Color, DrawContextExt, RecordingContext, Size};
//! use ticket_shape::TicketShape;
//! use ticket_svg::SvgDocument;
//!
//! let size = Size::new(300.0, 600.0);
//! let mut ctx = RecordingContext::new(size);
//! ctx.fill(&TicketShape::default().silhouette(size.to_rect()), Color::BLACK);
//!
//! let svg = SvgDocument::from_commands(size, ctx.commands()).unwrap();
//! assert!(svg.as_str().starts_with("<svg"));
//! ```

mod document;
mod error;
mod path;
mod rasterize;
mod style;

pub use document::SvgDocument;
pub use error::SvgError;
pub use path::{from_usvg, path_data};
pub use rasterize::RasterizedSvg;
