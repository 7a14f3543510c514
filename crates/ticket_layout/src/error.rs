//! Layout error types

use thiserror::Error;

/// Errors raised while building or computing a ticket layout
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The flexbox engine rejected an operation
    #[error("layout engine error: {0}")]
    Taffy(#[from] taffy::TaffyError),

    /// A node id that does not belong to this tree
    #[error("unknown layout node")]
    UnknownNode,
}
