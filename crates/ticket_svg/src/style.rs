//! Paint attributes for SVG elements

use ticket_core::{Brush, Color, LineCap, LineJoin, Stroke};

use crate::error::SvgError;
use crate::path::num;

/// `rgb(...)` color string, alpha dropped
pub(crate) fn color(color: Color) -> String {
    let [r, g, b] = color.to_rgb8();
    format!("rgb({r},{g},{b})")
}

fn solid(brush: &Brush) -> Result<Color, SvgError> {
    match brush {
        Brush::Solid(color) => Ok(*color),
        Brush::Image(image) => Err(SvgError::Unsupported(format!(
            "image brush '{}' as a path paint",
            image.source
        ))),
    }
}

/// Attributes filling an element with `brush`
pub(crate) fn fill_attrs(brush: &Brush) -> Result<String, SvgError> {
    let c = solid(brush)?;
    let mut attrs = format!(r#"fill="{}""#, color(c));
    if c.a < 1.0 {
        attrs.push_str(&format!(r#" fill-opacity="{}""#, num(c.a)));
    }
    Ok(attrs)
}

/// Attributes stroking an element with `stroke` and `brush`
pub(crate) fn stroke_attrs(stroke: &Stroke, brush: &Brush) -> Result<String, SvgError> {
    let c = solid(brush)?;
    let mut attrs = format!(
        r#"fill="none" stroke="{}" stroke-width="{}""#,
        color(c),
        num(stroke.width)
    );
    if c.a < 1.0 {
        attrs.push_str(&format!(r#" stroke-opacity="{}""#, num(c.a)));
    }

    match stroke.cap {
        LineCap::Butt => {}
        LineCap::Round => attrs.push_str(r#" stroke-linecap="round""#),
        LineCap::Square => attrs.push_str(r#" stroke-linecap="square""#),
    }
    match stroke.join {
        LineJoin::Miter => {
            if stroke.miter_limit != 4.0 {
                attrs.push_str(&format!(r#" stroke-miterlimit="{}""#, num(stroke.miter_limit)));
            }
        }
        LineJoin::Round => attrs.push_str(r#" stroke-linejoin="round""#),
        LineJoin::Bevel => attrs.push_str(r#" stroke-linejoin="bevel""#),
    }

    if !stroke.dash.is_empty() {
        let dashes: Vec<String> = stroke.dash.iter().map(|d| num(*d)).collect();
        attrs.push_str(&format!(r#" stroke-dasharray="{}""#, dashes.join(" ")));
        if stroke.dash_offset != 0.0 {
            attrs.push_str(&format!(r#" stroke-dashoffset="{}""#, num(stroke.dash_offset)));
        }
    }

    Ok(attrs)
}

/// Escape text content and attribute values
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
