//! SVG error types

use std::io;
use thiserror::Error;

/// Errors that can occur when writing, parsing or rasterising SVG
#[derive(Error, Debug)]
pub enum SvgError {
    /// IO error when reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// SVG parsing error
    #[error("SVG parsing error: {0}")]
    Parse(String),

    /// Draw command or paint with no SVG rendition
    #[error("Unsupported SVG feature: {0}")]
    Unsupported(String),

    /// Image encoding error
    #[error("PNG encoding error: {0}")]
    Encode(String),
}
