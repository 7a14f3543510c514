//! Shape error types

use thiserror::Error;

/// Errors raised while configuring ticket shapes
///
/// Geometry itself never fails; degenerate rects produce degenerate paths.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// A corner style name that matches no known style
    #[error("unknown corner style '{0}' (expected 'rounded' or 'right-angle')")]
    UnknownCorner(String),
}
