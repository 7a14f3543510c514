//! SVG documents written from recorded draw commands

use std::fmt;
use std::fs;
use std::path::Path as FilePath;

use ticket_core::{
    Brush, ClipShape, Color, DrawCommand, ImageFit, ImageOptions, Path, Point, Rect, Shadow, Size,
    Stroke, TextAlign, TextBaseline, TextStyle,
};

use crate::error::SvgError;
use crate::path::{from_usvg, num, path_data};
use crate::rasterize::parse_options;
use crate::style::{color, escape, fill_attrs, stroke_attrs};

/// Ascent of a line as a fraction of the font size
const ASCENT: f32 = 0.8;

/// Kind of `<g>` element opened by a push command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Group {
    Transform,
    Clip,
    Opacity,
}

/// Accumulates SVG elements while replaying draw commands
#[derive(Default)]
struct Writer {
    defs: Vec<String>,
    body: Vec<String>,
    open: Vec<Group>,
    next_id: usize,
}

impl Writer {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }

    fn indent(&self) -> String {
        "  ".repeat(self.open.len() + 1)
    }

    fn element(&mut self, element: String) {
        let line = format!("{}{element}", self.indent());
        self.body.push(line);
    }

    fn push_group(&mut self, kind: Group, attrs: String) {
        self.element(format!("<g {attrs}>"));
        self.open.push(kind);
    }

    fn pop_group(&mut self, kind: Group) -> Result<(), SvgError> {
        match self.open.pop() {
            Some(open) if open == kind => {
                self.element("</g>".to_string());
                Ok(())
            }
            Some(open) => Err(SvgError::Unsupported(format!(
                "{kind:?} popped while a {open:?} group is open"
            ))),
            None => Err(SvgError::Unsupported(format!(
                "{kind:?} popped with nothing pushed"
            ))),
        }
    }

    fn clip(&mut self, shape: &ClipShape) {
        let id = self.id("clip");
        let inner = match shape {
            ClipShape::Rect(rect) => rect_element(*rect),
            ClipShape::Path(path) => format!(r#"<path d="{}"/>"#, path_data(path)),
        };
        self.defs
            .push(format!(r#"<clipPath id="{id}">{inner}</clipPath>"#));
        self.push_group(Group::Clip, format!(r#"clip-path="url(#{id})""#));
    }

    fn shadow(&mut self, path: &Path, shadow: &Shadow) {
        let id = self.id("shadow");
        self.defs.push(format!(
            concat!(
                r#"<filter id="{id}" x="-50%" y="-50%" width="200%" height="200%">"#,
                r#"<feGaussianBlur in="SourceAlpha" stdDeviation="{blur}"/>"#,
                r#"<feOffset dx="{dx}" dy="{dy}" result="offset"/>"#,
                r#"<feFlood flood-color="{color}" flood-opacity="{alpha}"/>"#,
                r#"<feComposite in2="offset" operator="in"/>"#,
                r#"</filter>"#
            ),
            id = id,
            blur = num(shadow.blur / 2.0),
            dx = num(shadow.offset_x),
            dy = num(shadow.offset_y),
            color = color(shadow.color),
            alpha = num(shadow.color.a),
        ));
        self.element(format!(
            r#"<path d="{}" fill="rgb(0,0,0)" filter="url(#{id})"/>"#,
            path_data(path)
        ));
    }

    fn text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        let anchor = match style.align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };
        let line = style.size * style.line_height;
        let baseline = match style.baseline {
            TextBaseline::Top => origin.y + (line - style.size) / 2.0 + style.size * ASCENT,
            TextBaseline::Middle => origin.y + style.size * (ASCENT - 0.5),
            TextBaseline::Alphabetic => origin.y,
        };

        let mut element = format!(
            r#"<text font-family="{}" font-size="{}" font-weight="{}" {} text-anchor="{anchor}">"#,
            escape(&style.family),
            num(style.size),
            style.weight.to_numeric(),
            fill_attrs(&Brush::Solid(style.color)).unwrap_or_default(),
        );
        for (i, content) in text.lines().enumerate() {
            element.push_str(&format!(
                r#"<tspan x="{}" y="{}">{}</tspan>"#,
                num(origin.x),
                num(baseline + line * i as f32),
                escape(content)
            ));
        }
        element.push_str("</text>");
        self.element(element);
    }

    fn image(&mut self, source: &str, rect: Rect, options: &ImageOptions) {
        let aspect = match options.fit {
            ImageFit::Cover => "xMidYMid slice",
            ImageFit::Contain => "xMidYMid meet",
            ImageFit::Fill => "none",
        };
        let mut element = format!(
            r#"<image href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="{aspect}""#,
            escape(source),
            num(rect.x()),
            num(rect.y()),
            num(rect.width()),
            num(rect.height()),
        );
        if options.opacity < 1.0 {
            element.push_str(&format!(r#" opacity="{}""#, num(options.opacity)));
        }
        if options.blur > 0.0 {
            let id = self.id("blur");
            self.defs.push(format!(
                r#"<filter id="{id}" x="-50%" y="-50%" width="200%" height="200%"><feGaussianBlur stdDeviation="{}"/></filter>"#,
                num(options.blur / 2.0)
            ));
            element.push_str(&format!(r#" filter="url(#{id})""#));
        }
        element.push_str("/>");
        self.element(element);
    }

    fn command(&mut self, command: &DrawCommand) -> Result<(), SvgError> {
        match command {
            DrawCommand::PushTransform(t) => {
                let [a, b, c, d, e, f] = t.elements;
                self.push_group(
                    Group::Transform,
                    format!(
                        r#"transform="matrix({} {} {} {} {} {})""#,
                        num(a),
                        num(b),
                        num(c),
                        num(d),
                        num(e),
                        num(f)
                    ),
                );
            }
            DrawCommand::PopTransform => self.pop_group(Group::Transform)?,
            DrawCommand::PushClip(shape) => self.clip(shape),
            DrawCommand::PopClip => self.pop_group(Group::Clip)?,
            DrawCommand::PushOpacity(opacity) => {
                self.push_group(Group::Opacity, format!(r#"opacity="{}""#, num(*opacity)));
            }
            DrawCommand::PopOpacity => self.pop_group(Group::Opacity)?,
            DrawCommand::FillPath { path, brush } => {
                let attrs = fill_attrs(brush)?;
                self.element(format!(r#"<path d="{}" {attrs}/>"#, path_data(path)));
            }
            DrawCommand::StrokePath {
                path,
                stroke,
                brush,
            } => {
                let attrs = stroke_attrs(stroke, brush)?;
                self.element(format!(r#"<path d="{}" {attrs}/>"#, path_data(path)));
            }
            DrawCommand::DrawText {
                text,
                origin,
                style,
            } => self.text(text, *origin, style),
            DrawCommand::DrawImage {
                source,
                rect,
                options,
            } => self.image(source, *rect, options),
            DrawCommand::DrawShadow { path, shadow } => self.shadow(path, shadow),
        }
        Ok(())
    }

    fn finish(mut self, size: Size) -> String {
        if !self.open.is_empty() {
            tracing::warn!(open = self.open.len(), "closing groups left open");
            while self.open.pop().is_some() {
                self.element("</g>".to_string());
            }
        }

        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = num(size.width),
            h = num(size.height)
        );
        out.push('\n');
        if !self.defs.is_empty() {
            out.push_str("  <defs>\n");
            for def in &self.defs {
                out.push_str(&format!("    {def}\n"));
            }
            out.push_str("  </defs>\n");
        }
        for line in &self.body {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

fn rect_element(rect: Rect) -> String {
    format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}"/>"#,
        num(rect.x()),
        num(rect.y()),
        num(rect.width()),
        num(rect.height())
    )
}

/// A serialised SVG document
#[derive(Clone, Debug, PartialEq)]
pub struct SvgDocument {
    size: Size,
    source: String,
}

impl SvgDocument {
    /// Replay recorded draw commands into an SVG of the given size
    ///
    /// Transforms, clips and opacities become nested groups; pops must match
    /// the most recent push of the same kind.
    pub fn from_commands(size: Size, commands: &[DrawCommand]) -> Result<Self, SvgError> {
        let mut writer = Writer::default();
        for command in commands {
            writer.command(command)?;
        }
        let source = writer.finish(size);
        tracing::debug!(
            commands = commands.len(),
            bytes = source.len(),
            "wrote svg document"
        );
        Ok(Self { size, source })
    }

    /// A single stroked path on a transparent background
    pub fn from_path(size: Size, path: &Path, stroke: &Stroke, color: Color) -> Result<Self, SvgError> {
        Self::from_commands(
            size,
            &[DrawCommand::StrokePath {
                path: path.clone(),
                stroke: stroke.clone(),
                brush: Brush::Solid(color),
            }],
        )
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn into_string(self) -> String {
        self.source
    }

    /// Write the document to a file
    pub fn save(&self, path: impl AsRef<FilePath>) -> Result<(), SvgError> {
        fs::write(path, &self.source)?;
        Ok(())
    }

    /// Parse the document with usvg
    ///
    /// Image references are resolved against `resources_dir`.
    pub fn parse(&self, resources_dir: Option<&FilePath>) -> Result<usvg::Tree, SvgError> {
        let options = parse_options(resources_dir);
        usvg::Tree::from_str(&self.source, &options).map_err(|e| SvgError::Parse(e.to_string()))
    }

    /// Every rendered path of the parsed document, in document coordinates
    pub fn paths(&self) -> Result<Vec<Path>, SvgError> {
        let tree = self.parse(None)?;
        let mut paths = Vec::new();
        collect_paths(tree.root(), &mut paths);
        Ok(paths)
    }
}

fn collect_paths(group: &usvg::Group, paths: &mut Vec<Path>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(g) => collect_paths(g, paths),
            usvg::Node::Path(p) => {
                if let Some(data) = p.data().clone().transform(p.abs_transform()) {
                    paths.push(from_usvg(&data));
                }
            }
            usvg::Node::Image(_) | usvg::Node::Text(_) => {}
        }
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticket_core::{Affine2D, DrawContext, DrawContextExt, LineCap, RecordingContext};
    use ticket_shape::TicketShape;

    fn card() -> Rect {
        Rect::new(0.0, 0.0, 300.0, 600.0)
    }

    #[test]
    fn test_ticket_silhouette_survives_parsing() {
        let silhouette = TicketShape::default().silhouette(card());
        let doc = SvgDocument::from_commands(
            Size::new(300.0, 600.0),
            &[DrawCommand::FillPath {
                path: silhouette,
                brush: Brush::Solid(Color::BLACK),
            }],
        )
        .unwrap();

        let paths = doc.paths().unwrap();
        assert_eq!(paths.len(), 1);
        let bounds = paths[0].bounds();
        assert!(bounds.min_x().abs() < 0.5, "{bounds:?}");
        assert!((bounds.max_x() - 300.0).abs() < 0.5, "{bounds:?}");
        assert!((bounds.max_y() - 600.0).abs() < 0.5, "{bounds:?}");
    }

    #[test]
    fn test_groups_nest() {
        let mut ctx = RecordingContext::new(Size::new(100.0, 100.0));
        ctx.push_transform(Affine2D::translation(10.0, 0.0));
        ctx.with_clip(ClipShape::rect(Rect::new(0.0, 0.0, 50.0, 50.0)), |ctx| {
            ctx.with_opacity(0.5, |ctx| {
                ctx.fill(&Path::rect(Rect::new(0.0, 0.0, 20.0, 20.0)), Color::BLACK);
            });
        });
        ctx.pop_transform();

        let doc = SvgDocument::from_commands(Size::new(100.0, 100.0), ctx.commands()).unwrap();
        let svg = doc.as_str();
        assert!(svg.contains(r#"transform="matrix(1 0 0 1 10 0)""#), "{svg}");
        assert!(svg.contains(r#"<clipPath id="clip1"><rect x="0" y="0" width="50" height="50"/></clipPath>"#));
        assert!(svg.contains(r#"<g opacity="0.5">"#));
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
        doc.parse(None).unwrap();
    }

    #[test]
    fn test_mismatched_pop_is_rejected() {
        let commands = [
            DrawCommand::PushOpacity(0.5),
            DrawCommand::PopClip,
        ];
        assert!(matches!(
            SvgDocument::from_commands(Size::new(10.0, 10.0), &commands),
            Err(SvgError::Unsupported(_))
        ));
    }

    #[test]
    fn test_unclosed_groups_are_closed() {
        let doc = SvgDocument::from_commands(
            Size::new(10.0, 10.0),
            &[DrawCommand::PushOpacity(0.5)],
        )
        .unwrap();
        assert!(doc.as_str().contains("</g>"));
    }

    #[test]
    fn test_multiline_text() {
        let mut ctx = RecordingContext::new(Size::new(200.0, 100.0));
        ctx.draw_text("Jun 17, 2024\n 3:45 PM", Point::new(10.0, 20.0), &TextStyle::new(10.0));
        let doc = SvgDocument::from_commands(Size::new(200.0, 100.0), ctx.commands()).unwrap();
        let svg = doc.as_str();
        // line height 12, baseline 1 + 8 below the top
        assert!(svg.contains(r#"<tspan x="10" y="29">Jun 17, 2024</tspan>"#), "{svg}");
        assert!(svg.contains(r#"<tspan x="10" y="41"> 3:45 PM</tspan>"#), "{svg}");
    }

    #[test]
    fn test_images_and_shadows() {
        let mut ctx = RecordingContext::new(Size::new(100.0, 100.0));
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        ctx.draw_shadow(
            &Path::rect(rect),
            Shadow::new(0.0, 10.0, 15.0, Color::BLACK.with_alpha(0.2)),
        );
        ctx.draw_image(
            "painting",
            rect,
            &ImageOptions::new().with_opacity(0.2).with_blur(60.0),
        );
        let doc = SvgDocument::from_commands(Size::new(100.0, 100.0), ctx.commands()).unwrap();
        let svg = doc.as_str();
        assert!(svg.contains(r#"<feOffset dx="0" dy="10" result="offset"/>"#));
        assert!(svg.contains(r#"flood-opacity="0.2""#));
        assert!(svg.contains(r#"<feGaussianBlur stdDeviation="30"/>"#));
        assert!(svg.contains(r#"href="painting""#));
        assert!(svg.contains(r#"preserveAspectRatio="xMidYMid slice" opacity="0.2""#));
        doc.parse(None).unwrap();
    }

    #[test]
    fn test_outline_preview() {
        let outline = TicketShape::default().outline(card()).to_path();
        let stroke = Stroke::new(1.0).with_cap(LineCap::Round);
        let doc = SvgDocument::from_path(Size::new(300.0, 600.0), &outline, &stroke, Color::BLACK)
            .unwrap();
        assert!(doc.to_string().contains(r#"stroke-linecap="round""#));
        // four fillets, two notches split into quarters
        let arcs = doc.as_str().matches('A').count();
        assert_eq!(arcs, 4 + 2 * 2);
    }
}
