//! Ticket card view
//!
//! [`TicketView`] lays a [`TicketRecord`] out on a ticket-shaped card and
//! paints it through any [`DrawContext`]. The card is split vertically:
//!
//! ```text
//! ┌──────────────┐
//! │ header       │  stub_height * H - image_height - corner_radius
//! ├──────────────┤
//! │ image        │  image_height
//! ├ ─ ─ ─ ─ ─ ─ ─┤  cut line, 2 * corner_radius, centred on the stub notches
//! │ footer       │  the rest
//! └──────────────┘
//! ```
//!
//! The header and footer show the same content; only the header carries
//! the contact row and price.

use std::sync::Arc;

use taffy::{
    AlignItems, Dimension, FlexDirection, JustifyContent, LengthPercentage, LengthPercentageAuto,
    Style,
};
use ticket_core::{
    Affine2D, Angle, ClipShape, DrawContext, DrawContextExt, ImageFit, ImageOptions, LineCap,
    Path, Point, Rect, Size, Stroke, TextAlign, TextStyle,
};
use ticket_shape::{CornerKind, CornerStyle, Divider, Shape, TicketShape};

use crate::error::LayoutError;
use crate::record::TicketRecord;
use crate::text_measure::{EstimatedTextMeasurer, TextLayoutOptions, TextMeasurer};
use crate::theme::TicketTheme;
use crate::tree::{LayoutNodeId, LayoutTree, TextMeasureContext};

/// Default spacing between blocks and around the tear line
const STANDARD_PADDING: f32 = 16.0;
/// Space kept under the identifier column
const ID_COLUMN_BOTTOM: f32 = 30.0;
const ID_BAR_WIDTH: f32 = 3.0;
const DESCRIPTION_BOTTOM: f32 = 15.0;
/// Vertical gap between the two dashed lines
const CUT_LINE_SPACING: f32 = 5.0;

/// Blocks of the card that can be looked up in a [`TicketLayout`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TicketPart {
    Card,
    Header,
    Image,
    CutLine,
    /// Thin dashed rectangle of the cut line
    Perforation,
    /// Thick dashed line of the cut line
    Divider,
    Footer,
}

/// Contact row of a header block
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactLayout {
    pub name: Rect,
    pub phone_number: Rect,
    pub price: Rect,
}

/// Text and decoration rects inside a header or footer block
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentLayout {
    pub id_label: Rect,
    pub id_bar: Rect,
    pub title: Rect,
    pub description: Rect,
    pub date: Rect,
    pub contact: Option<ContactLayout>,
}

/// Computed rects of every block, in the coordinates of the available area
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TicketLayout {
    pub card: Rect,
    pub header: Rect,
    pub image: Rect,
    pub cut_line: Rect,
    pub perforation: Rect,
    pub divider: Rect,
    pub footer: Rect,
    pub header_content: ContentLayout,
    pub footer_content: ContentLayout,
}

impl TicketLayout {
    pub fn rect(&self, part: TicketPart) -> Rect {
        match part {
            TicketPart::Card => self.card,
            TicketPart::Header => self.header,
            TicketPart::Image => self.image,
            TicketPart::CutLine => self.cut_line,
            TicketPart::Perforation => self.perforation,
            TicketPart::Divider => self.divider,
            TicketPart::Footer => self.footer,
        }
    }
}

struct ContactNodes {
    name: LayoutNodeId,
    phone_number: LayoutNodeId,
    price: LayoutNodeId,
}

struct ContentNodes {
    block: LayoutNodeId,
    id_label: LayoutNodeId,
    id_bar: LayoutNodeId,
    title: LayoutNodeId,
    description: LayoutNodeId,
    date: LayoutNodeId,
    contact: Option<ContactNodes>,
}

fn padding(top: f32, horizontal: f32, bottom: f32) -> taffy::Rect<LengthPercentage> {
    taffy::Rect {
        left: LengthPercentage::Length(horizontal),
        right: LengthPercentage::Length(horizontal),
        top: LengthPercentage::Length(top),
        bottom: LengthPercentage::Length(bottom),
    }
}

fn margin_bottom(bottom: f32) -> taffy::Rect<LengthPercentageAuto> {
    taffy::Rect {
        left: LengthPercentageAuto::Length(0.0),
        right: LengthPercentageAuto::Length(0.0),
        top: LengthPercentageAuto::Length(0.0),
        bottom: LengthPercentageAuto::Length(bottom),
    }
}

fn fixed_height(height: f32) -> Style {
    Style {
        size: taffy::Size {
            width: Dimension::Auto,
            height: Dimension::Length(height),
        },
        flex_shrink: 0.0,
        ..Default::default()
    }
}

fn gap(width: f32, height: f32) -> taffy::Size<LengthPercentage> {
    taffy::Size {
        width: LengthPercentage::Length(width),
        height: LengthPercentage::Length(height),
    }
}

/// A ticket record drawn on a ticket-shaped card
pub struct TicketView<C: CornerStyle = CornerKind> {
    record: TicketRecord,
    shape: TicketShape<C>,
    theme: TicketTheme,
    measurer: Arc<dyn TextMeasurer>,
}

impl TicketView<CornerKind> {
    pub fn new(record: TicketRecord) -> Self {
        Self::with_shape(record, TicketShape::default())
    }
}

impl<C: CornerStyle> TicketView<C> {
    pub fn with_shape(record: TicketRecord, shape: TicketShape<C>) -> Self {
        Self {
            record,
            shape,
            theme: TicketTheme::default(),
            measurer: Arc::new(EstimatedTextMeasurer),
        }
    }

    pub fn theme(mut self, theme: TicketTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Measure text with real font metrics instead of estimates
    pub fn measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn record(&self) -> &TicketRecord {
        &self.record
    }

    pub fn shape(&self) -> &TicketShape<C> {
        &self.shape
    }

    pub fn ticket_theme(&self) -> &TicketTheme {
        &self.theme
    }

    /// The card: the largest rect with the ticket's aspect ratio that fits
    /// `available` less the outer padding, centred
    pub fn card_rect(&self, available: Size) -> Rect {
        let padding = self.theme.outer_padding;
        let inner = Size::new(
            (available.width - 2.0 * padding).max(0.0),
            (available.height - 2.0 * padding).max(0.0),
        );
        let fitted = inner.fit_aspect(self.shape.metrics().aspect_ratio);
        Rect::from_center(
            Point::new(available.width / 2.0, available.height / 2.0),
            fitted,
        )
    }

    /// Height of the header block for a card of height `card_height`
    ///
    /// Chosen so the cut line below the image is centred on the stub
    /// notches.
    pub fn header_height(&self, card_height: f32) -> f32 {
        let metrics = self.shape.metrics();
        (card_height * metrics.stub_height - metrics.image_height - metrics.corner_radius).max(0.0)
    }

    fn text_node(
        &self,
        tree: &mut LayoutTree,
        content: impl Into<String>,
        style: &TextStyle,
        wrap: bool,
        node_style: Style,
    ) -> Result<LayoutNodeId, LayoutError> {
        let mut context = TextMeasureContext::new(content, style.size);
        context.line_height = style.line_height;
        context.wrap = wrap;
        tree.create_text_node(node_style, context)
    }

    fn build_content(
        &self,
        tree: &mut LayoutTree,
        block_style: Style,
        bottom_padding: f32,
        full_content: bool,
    ) -> Result<ContentNodes, LayoutError> {
        let theme = &self.theme;
        let radius = self.shape.metrics().corner_radius;
        let footnote = theme.footnote_style();

        let id_label = tree.create_node(Style {
            size: taffy::Size {
                width: Dimension::Length(footnote.size * footnote.line_height),
                height: Dimension::Auto,
            },
            flex_shrink: 0.0,
            margin: margin_bottom(ID_COLUMN_BOTTOM),
            ..Default::default()
        })?;
        let id_bar = tree.create_node(Style {
            size: taffy::Size {
                width: Dimension::Length(ID_BAR_WIDTH),
                height: Dimension::Auto,
            },
            flex_shrink: 0.0,
            margin: margin_bottom(ID_COLUMN_BOTTOM),
            ..Default::default()
        })?;

        let title = self.text_node(
            tree,
            self.record.title().to_uppercase(),
            &theme.title_style(),
            true,
            Style::default(),
        )?;
        let description = self.text_node(
            tree,
            self.record.description(),
            &theme.body_style(),
            true,
            Style {
                margin: margin_bottom(DESCRIPTION_BOTTOM),
                ..Default::default()
            },
        )?;
        let date = self.text_node(
            tree,
            self.record.formatted_date(),
            &theme.caption_style(),
            false,
            Style::default(),
        )?;
        let text_column = tree.create_container(
            Style {
                flex_direction: FlexDirection::Column,
                flex_grow: 1.0,
                flex_basis: Dimension::Length(0.0),
                min_size: taffy::Size {
                    width: Dimension::Length(0.0),
                    height: Dimension::Auto,
                },
                ..Default::default()
            },
            &[title, description, date],
        )?;

        let main_row = tree.create_container(
            Style {
                flex_direction: FlexDirection::Row,
                flex_grow: 1.0,
                gap: gap(theme.column_spacing, 0.0),
                ..Default::default()
            },
            &[id_label, id_bar, text_column],
        )?;

        let mut children = vec![main_row];
        let contact = if full_content {
            let name = self.text_node(
                tree,
                self.record.name(),
                &theme.body_style(),
                false,
                Style::default(),
            )?;
            let phone_number = self.text_node(
                tree,
                self.record.phone_number(),
                &theme.body_style(),
                false,
                Style::default(),
            )?;
            let price = self.text_node(
                tree,
                self.record.formatted_price(),
                &theme.headline_style(),
                false,
                Style {
                    flex_shrink: 0.0,
                    ..Default::default()
                },
            )?;
            let person = tree.create_container(
                Style {
                    flex_direction: FlexDirection::Column,
                    ..Default::default()
                },
                &[name, phone_number],
            )?;
            let row = tree.create_container(
                Style {
                    flex_direction: FlexDirection::Row,
                    justify_content: Some(JustifyContent::SpaceBetween),
                    align_items: Some(AlignItems::Center),
                    flex_shrink: 0.0,
                    ..Default::default()
                },
                &[person, price],
            )?;
            children.push(row);
            Some(ContactNodes {
                name,
                phone_number,
                price,
            })
        } else {
            None
        };

        let block = tree.create_container(
            Style {
                flex_direction: FlexDirection::Column,
                padding: padding(radius + 10.0, radius, bottom_padding),
                ..block_style
            },
            &children,
        )?;

        Ok(ContentNodes {
            block,
            id_label,
            id_bar,
            title,
            description,
            date,
            contact,
        })
    }

    /// Compute the rect of every block for a card fitted into `available`
    pub fn layout(&self, available: Size) -> Result<TicketLayout, LayoutError> {
        let card = self.card_rect(available);
        let metrics = self.shape.metrics();
        let mut tree = LayoutTree::new(Arc::clone(&self.measurer));

        let header = self.build_content(
            &mut tree,
            fixed_height(self.header_height(card.height())),
            STANDARD_PADDING,
            true,
        )?;

        let image = tree.create_node(fixed_height(metrics.image_height))?;

        let perforation = tree.create_node(fixed_height(1.0))?;
        let divider = tree.create_node(fixed_height(1.0))?;
        let cut_line = tree.create_container(
            Style {
                flex_direction: FlexDirection::Column,
                justify_content: Some(JustifyContent::Center),
                gap: gap(0.0, CUT_LINE_SPACING),
                padding: padding(0.0, STANDARD_PADDING, 0.0),
                ..fixed_height(2.0 * metrics.corner_radius)
            },
            &[perforation, divider],
        )?;

        let footer = self.build_content(
            &mut tree,
            Style {
                flex_grow: 1.0,
                flex_basis: Dimension::Length(0.0),
                min_size: taffy::Size {
                    width: Dimension::Auto,
                    height: Dimension::Length(0.0),
                },
                ..Default::default()
            },
            0.0,
            false,
        )?;

        let root = tree.create_container(
            Style {
                flex_direction: FlexDirection::Column,
                size: taffy::Size {
                    width: Dimension::Length(card.width()),
                    height: Dimension::Length(card.height()),
                },
                ..Default::default()
            },
            &[header.block, image, cut_line, footer.block],
        )?;

        tree.compute_layout(root, card.size())?;

        let rect = |id: LayoutNodeId| -> Result<Rect, LayoutError> {
            tree.bounds(id)
                .map(|r| r.offset(card.x(), card.y()))
                .ok_or(LayoutError::UnknownNode)
        };
        let content = |nodes: &ContentNodes| -> Result<ContentLayout, LayoutError> {
            let contact = match &nodes.contact {
                Some(c) => Some(ContactLayout {
                    name: rect(c.name)?,
                    phone_number: rect(c.phone_number)?,
                    price: rect(c.price)?,
                }),
                None => None,
            };
            Ok(ContentLayout {
                id_label: rect(nodes.id_label)?,
                id_bar: rect(nodes.id_bar)?,
                title: rect(nodes.title)?,
                description: rect(nodes.description)?,
                date: rect(nodes.date)?,
                contact,
            })
        };

        let layout = TicketLayout {
            card,
            header: rect(header.block)?,
            image: rect(image)?,
            cut_line: rect(cut_line)?,
            perforation: rect(perforation)?,
            divider: rect(divider)?,
            footer: rect(footer.block)?,
            header_content: content(&header)?,
            footer_content: content(&footer)?,
        };
        tracing::debug!(
            width = card.width(),
            height = card.height(),
            nodes = tree.len(),
            "laid out ticket"
        );
        Ok(layout)
    }

    fn wrapped(&self, text: &str, style: &TextStyle, width: f32) -> String {
        // Slack for rounding between measurement and the final rect
        let options = TextLayoutOptions::new()
            .with_line_height(style.line_height)
            .with_max_width(width + 0.5);
        self.measurer
            .wrap_lines(text, style.size, &options)
            .join("\n")
    }

    fn paint_content(&self, ctx: &mut dyn DrawContext, content: &ContentLayout) {
        let theme = &self.theme;

        // Identifier reads bottom to top along the left edge
        let label = content.id_label;
        let footnote = theme.footnote_style().with_align(TextAlign::Center);
        let line = footnote.size * footnote.line_height;
        ctx.push_transform(Affine2D::rotation_about(
            Angle::degrees(-90.0),
            label.center(),
        ));
        ctx.draw_text(
            &self.record.short_id(),
            Point::new(label.mid_x(), label.mid_y() - line / 2.0),
            &footnote,
        );
        ctx.pop_transform();
        ctx.fill_rect(content.id_bar, theme.foreground.into());

        let title = theme.title_style();
        let title_text = self.wrapped(&self.record.title().to_uppercase(), &title, content.title.width());
        ctx.draw_text(&title_text, content.title.origin, &title);

        let body = theme.body_style();
        let description = self.wrapped(self.record.description(), &body, content.description.width());
        ctx.draw_text(&description, content.description.origin, &body);

        ctx.draw_text(
            &self.record.formatted_date(),
            content.date.origin,
            &theme.caption_style(),
        );

        if let Some(contact) = &content.contact {
            ctx.draw_text(self.record.name(), contact.name.origin, &body);
            ctx.draw_text(
                self.record.phone_number(),
                contact.phone_number.origin,
                &body,
            );
            ctx.draw_text(
                &self.record.formatted_price(),
                contact.price.origin,
                &theme.headline_style(),
            );
        }
    }

    /// Lay the ticket out in `available` and paint it
    ///
    /// Everything but the drop shadow is clipped to the card silhouette.
    pub fn paint(
        &self,
        ctx: &mut dyn DrawContext,
        available: Size,
    ) -> Result<TicketLayout, LayoutError> {
        let layout = self.layout(available)?;
        let theme = &self.theme;
        let card = layout.card;
        let silhouette = self.shape.silhouette(card);

        ctx.draw_shadow(&silhouette, theme.shadow);
        ctx.push_clip(ClipShape::path(silhouette));

        ctx.fill_rect(card, theme.background.into());
        let backdrop = ImageOptions {
            fit: ImageFit::Fill,
            ..ImageOptions::new()
                .with_opacity(theme.backdrop_opacity)
                .with_blur(theme.backdrop_blur)
        };
        ctx.draw_image(self.record.image(), card, &backdrop);

        self.paint_content(ctx, &layout.header_content);
        ctx.draw_image(self.record.image(), layout.image, &ImageOptions::new());

        let perforation = Stroke::new(1.0)
            .with_cap(LineCap::Round)
            .with_dash(vec![3.0, 5.0], 0.0);
        ctx.stroke(&Path::rect(layout.perforation), &perforation, theme.foreground);
        let tear = Stroke::new(3.0)
            .with_cap(LineCap::Round)
            .with_dash(vec![10.0, 10.0], 0.0);
        ctx.with_opacity(theme.divider_opacity, |ctx| {
            ctx.stroke(&Divider.path(layout.divider), &tear, theme.foreground);
        });

        self.paint_content(ctx, &layout.footer_content);

        let outline = self.shape.path(card);
        ctx.with_opacity(theme.outline_opacity, |ctx| {
            ctx.stroke(&outline, &Stroke::new(theme.outline_width), theme.foreground);
        });

        ctx.pop_clip();
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ticket_core::{Brush, Color, DrawCommand, RecordingContext};

    const EPS: f32 = 1e-3;

    fn record() -> TicketRecord {
        TicketRecord::new(
            "Full Museum Access",
            "Explore all the exhibitions as long as you want",
            "Alex Morgan",
            "(555) 010 4477",
            Utc.with_ymd_and_hms(2024, 6, 17, 15, 45, 0).unwrap(),
            "9.99",
        )
    }

    /// 340 x 800 card at (16, 16)
    fn available() -> Size {
        Size::new(372.0, 832.0)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_card_fits_aspect_ratio() {
        let view = TicketView::new(record());
        let card = view.card_rect(available());
        assert!(close(card.width(), 340.0), "{card:?}");
        assert!(close(card.height(), 800.0), "{card:?}");
        assert!(close(card.x(), 16.0) && close(card.y(), 16.0));

        // Wide areas are limited by height and centred horizontally
        let card = view.card_rect(Size::new(1000.0, 432.0));
        assert!(close(card.height(), 400.0));
        assert!(close(card.width(), 170.0));
        assert!(close(card.mid_x(), 500.0));
    }

    #[test]
    fn test_block_heights() {
        let layout = TicketView::new(record()).layout(available()).unwrap();
        assert!(close(layout.header.height(), 380.0), "{:?}", layout.header);
        assert!(close(layout.image.height(), 200.0));
        assert!(close(layout.cut_line.height(), 40.0));
        assert!(close(layout.footer.height(), 180.0), "{:?}", layout.footer);

        assert!(close(layout.header.y(), 16.0));
        assert!(close(layout.image.y(), layout.header.max_y()));
        assert!(close(layout.cut_line.y(), layout.image.max_y()));
        assert!(close(layout.footer.max_y(), layout.card.max_y()));
        assert_eq!(layout.rect(TicketPart::Card), layout.card);
    }

    #[test]
    fn test_cut_line_centred_on_stub_notches() {
        for height in [700.0, 832.0, 1200.0] {
            let view = TicketView::new(record());
            let layout = view.layout(Size::new(1000.0, height)).unwrap();
            let stub_y = view.shape().metrics().stub_y(layout.card);
            assert!(
                (layout.cut_line.mid_y() - stub_y).abs() < 0.01,
                "cut line {} vs stub {}",
                layout.cut_line.mid_y(),
                stub_y
            );
        }
    }

    #[test]
    fn test_dashed_lines_inside_cut_line() {
        let layout = TicketView::new(record()).layout(available()).unwrap();
        let cut = layout.cut_line;
        assert!(close(layout.perforation.height(), 1.0));
        assert!(close(layout.divider.y() - layout.perforation.max_y(), CUT_LINE_SPACING));
        assert!(close(layout.perforation.x(), cut.x() + STANDARD_PADDING));
        assert!(close(layout.divider.max_x(), cut.max_x() - STANDARD_PADDING));
        // the pair is centred in the block
        let top_gap = layout.perforation.y() - cut.y();
        let bottom_gap = cut.max_y() - layout.divider.max_y();
        assert!(close(top_gap, bottom_gap));
    }

    #[test]
    fn test_only_header_has_contact_row() {
        let layout = TicketView::new(record()).layout(available()).unwrap();
        let contact = layout.header_content.contact.expect("header contact row");
        assert!(layout.footer_content.contact.is_none());

        // price on the right, inside the content padding
        assert!(close(contact.price.max_x(), layout.card.max_x() - 20.0));
        assert!(contact.name.x() < contact.price.x());
        assert!(contact.phone_number.y() > contact.name.y());
        assert!(contact.price.max_y() <= layout.header.max_y() - STANDARD_PADDING + EPS);
    }

    #[test]
    fn test_content_padding() {
        let layout = TicketView::new(record()).layout(available()).unwrap();
        for (block, content) in [
            (layout.header, layout.header_content),
            (layout.footer, layout.footer_content),
        ] {
            assert!(close(content.id_label.x(), block.x() + 20.0));
            assert!(close(content.id_label.y(), block.y() + 30.0));
            assert!(close(content.id_bar.width(), ID_BAR_WIDTH));
            assert!(close(content.title.y(), block.y() + 30.0));
            assert!(content.title.x() > content.id_bar.max_x());
            assert!(content.description.y() >= content.title.max_y() - EPS);
            assert!(content.date.y() >= content.description.max_y() + DESCRIPTION_BOTTOM - EPS);
        }
    }

    #[test]
    fn test_short_card_header_collapses() {
        let view = TicketView::new(record());
        // stub_height * H < image_height + corner_radius
        assert_eq!(view.header_height(200.0), 0.0);
        assert!(close(view.header_height(800.0), 380.0));
    }

    #[test]
    fn test_paint_sequence() {
        let view = TicketView::new(record());
        let mut ctx = RecordingContext::new(available());
        let layout = view.paint(&mut ctx, available()).unwrap();
        let commands = ctx.commands();

        // Shadow first, then everything clipped to the silhouette
        match &commands[0] {
            DrawCommand::DrawShadow { path, shadow } => {
                assert_eq!(*path, view.shape().silhouette(layout.card));
                assert_eq!(shadow.offset_y, 10.0);
            }
            other => panic!("expected shadow, got {other:?}"),
        }
        assert_eq!(
            commands[1],
            DrawCommand::PushClip(ClipShape::Path(view.shape().silhouette(layout.card)))
        );
        assert_eq!(commands.last(), Some(&DrawCommand::PopClip));

        match &commands[2] {
            DrawCommand::FillPath { brush, .. } => {
                assert_eq!(*brush, Brush::Solid(Color::from_rgb8(252, 251, 245)))
            }
            other => panic!("expected background fill, got {other:?}"),
        }

        let images: Vec<&ImageOptions> = commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::DrawImage { source, options, .. } if source == "painting" => {
                    Some(options)
                }
                _ => None,
            })
            .collect();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].blur, 60.0);
        assert_eq!(images[0].opacity, 0.2);
        assert_eq!(images[1].opacity, 1.0);

        let texts: Vec<&str> = commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts.iter().filter(|t| **t == "$9.99").count(), 1);
        assert_eq!(texts.iter().filter(|t| **t == "Alex Morgan").count(), 1);
        assert_eq!(
            texts
                .iter()
                .filter(|t| **t == view.record().short_id())
                .count(),
            2
        );
        assert!(texts.iter().any(|t| t.starts_with("FULL MUSEUM")));

        let dashes: Vec<&Stroke> = commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::StrokePath { stroke, .. } if !stroke.dash.is_empty() => Some(stroke),
                _ => None,
            })
            .collect();
        assert_eq!(dashes.len(), 2);
        assert_eq!(dashes[0].dash, vec![3.0, 5.0]);
        assert_eq!(dashes[1].dash, vec![10.0, 10.0]);
        assert_eq!(dashes[1].width, 3.0);

        // Outline stroked at half opacity just before the clip is popped
        let n = commands.len();
        assert_eq!(commands[n - 4], DrawCommand::PushOpacity(0.5));
        match &commands[n - 3] {
            DrawCommand::StrokePath { path, stroke, .. } => {
                assert_eq!(*path, view.shape().path(layout.card));
                assert_eq!(stroke.width, 1.0);
            }
            other => panic!("expected outline stroke, got {other:?}"),
        }
    }

    #[test]
    fn test_transforms_are_balanced() {
        let view = TicketView::new(record());
        let mut ctx = RecordingContext::new(available());
        view.paint(&mut ctx, available()).unwrap();
        let depth = ctx.commands().iter().fold(0i32, |depth, cmd| match cmd {
            DrawCommand::PushTransform(_) | DrawCommand::PushClip(_) | DrawCommand::PushOpacity(_) => {
                depth + 1
            }
            DrawCommand::PopTransform | DrawCommand::PopClip | DrawCommand::PopOpacity => depth - 1,
            _ => depth,
        });
        assert_eq!(depth, 0);
        assert!(ctx.current_transform().is_identity());
    }

    #[test]
    fn test_right_angle_view() {
        let shape = TicketShape::new(CornerKind::right_angle());
        let view = TicketView::with_shape(record(), shape);
        let mut ctx = RecordingContext::new(available());
        let layout = view.paint(&mut ctx, available()).unwrap();
        assert!(view.shape().silhouette(layout.card).is_closed());
    }
}
