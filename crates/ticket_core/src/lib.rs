//! Ticket Core
//!
//! This crate provides the drawing primitives the ticket crates are built on:
//!
//! - **Geometry**: points, sizes, rects, angles and affine transforms
//! - **Paths**: vector paths with lines, curves and circular arcs
//! - **Draw Context**: the painting interface and a recording implementation
//!
//! # Example
//!
//! ```rust
//! use ticket_core::{Angle, Path, Point, Rect};
//!
//! let notch = Path::new().add_arc(
//!     Point::new(300.0, 450.0),
//!     20.0,
//!     Angle::degrees(-90.0),
//!     Angle::degrees(90.0),
//!     true,
//! );
//!
//! assert_eq!(notch.bounds().min_x(), 280.0);
//! assert!(Rect::new(0.0, 0.0, 300.0, 600.0).contains(notch.start_point().unwrap()));
//! ```

pub mod draw;
pub mod layer;

pub use draw::{
    arc_sweep, point_on_circle, DrawCommand, DrawContext, DrawContextExt, FontWeight,
    ImageOptions, LineCap, LineJoin, Path, PathCommand, RecordingContext, Stroke, TextAlign,
    TextBaseline, TextStyle, POINT_EPSILON,
};
pub use layer::{
    Affine2D, Angle, Brush, ClipShape, Color, ImageBrush, ImageFit, Point, Rect, Shadow, Size,
    Vec2,
};
