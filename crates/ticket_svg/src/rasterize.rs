//! SVG rasterization using resvg
//!
//! Renders documents into tiny-skia pixmaps and encodes them as PNG.

use std::path::Path as FilePath;

use tiny_skia::{Pixmap, Transform};
use usvg::{Options, Tree};

use crate::document::SvgDocument;
use crate::error::SvgError;

/// usvg options with system fonts loaded
///
/// Relative image references resolve against `resources_dir`.
pub(crate) fn parse_options(resources_dir: Option<&FilePath>) -> Options<'static> {
    let mut options = Options {
        resources_dir: resources_dir.map(FilePath::to_path_buf),
        ..Options::default()
    };
    options.fontdb_mut().load_system_fonts();
    options
}

/// Rasterized SVG image
pub struct RasterizedSvg {
    pixmap: Pixmap,
}

impl RasterizedSvg {
    /// Rasterize an SVG string to the specified size
    ///
    /// The SVG will be scaled to fit within the given dimensions while
    /// maintaining aspect ratio, centered within the bounds.
    pub fn from_str(svg_str: &str, width: u32, height: u32) -> Result<Self, SvgError> {
        Self::from_data(svg_str.as_bytes(), width, height)
    }

    /// Rasterize SVG data to the specified size
    pub fn from_data(data: &[u8], width: u32, height: u32) -> Result<Self, SvgError> {
        check_dimensions(width, height)?;
        let tree = Tree::from_data(data, &parse_options(None))
            .map_err(|e| SvgError::Parse(e.to_string()))?;
        Self::from_tree(&tree, width, height)
    }

    /// Rasterize a parsed usvg Tree to the specified size
    pub fn from_tree(tree: &Tree, width: u32, height: u32) -> Result<Self, SvgError> {
        check_dimensions(width, height)?;

        let svg_size = tree.size();
        let scale = (width as f32 / svg_size.width()).min(height as f32 / svg_size.height());
        let offset_x = (width as f32 - svg_size.width() * scale) / 2.0;
        let offset_y = (height as f32 - svg_size.height() * scale) / 2.0;
        let transform = Transform::from_scale(scale, scale).post_translate(offset_x, offset_y);

        Self::draw(tree, width, height, transform)
    }

    /// Render a document at `scale` device pixels per unit
    pub fn render(
        document: &SvgDocument,
        scale: f32,
        resources_dir: Option<&FilePath>,
    ) -> Result<Self, SvgError> {
        if !(scale > 0.0) {
            return Err(SvgError::Parse(format!("invalid scale {scale}")));
        }
        let size = document.size();
        let width = (size.width * scale).ceil() as u32;
        let height = (size.height * scale).ceil() as u32;
        check_dimensions(width, height)?;

        let tree = document.parse(resources_dir)?;
        let rasterized = Self::draw(&tree, width, height, Transform::from_scale(scale, scale))?;
        tracing::debug!(width, height, scale, "rasterized document");
        Ok(rasterized)
    }

    fn draw(tree: &Tree, width: u32, height: u32, transform: Transform) -> Result<Self, SvgError> {
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| SvgError::Parse("Failed to create pixmap".into()))?;
        resvg::render(tree, transform, &mut pixmap.as_mut());
        Ok(Self { pixmap })
    }

    /// PNG encoding of the image
    pub fn to_png(&self) -> Result<Vec<u8>, SvgError> {
        self.pixmap
            .encode_png()
            .map_err(|e| SvgError::Encode(e.to_string()))
    }

    /// Write the image to a PNG file
    pub fn save_png(&self, path: impl AsRef<FilePath>) -> Result<(), SvgError> {
        std::fs::write(path, self.to_png()?)?;
        Ok(())
    }

    /// RGBA pixels with straight alpha
    pub fn pixels(&self) -> Vec<u8> {
        unpremultiply_alpha(self.pixmap.data())
    }

    /// Get the dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), SvgError> {
    if width == 0 || height == 0 {
        return Err(SvgError::Parse(
            "Invalid dimensions: width and height must be > 0".into(),
        ));
    }
    Ok(())
}

/// Convert premultiplied alpha to straight alpha
fn unpremultiply_alpha(data: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len());

    for chunk in data.chunks_exact(4) {
        let a = chunk[3] as f32 / 255.0;
        if a > 0.0 {
            let r = (chunk[0] as f32 / a).min(255.0) as u8;
            let g = (chunk[1] as f32 / a).min(255.0) as u8;
            let b = (chunk[2] as f32 / a).min(255.0) as u8;
            result.extend_from_slice(&[r, g, b, chunk[3]]);
        } else {
            result.extend_from_slice(&[0, 0, 0, 0]);
        }
    }

    result
}
