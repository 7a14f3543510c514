//! Colors, type sizes and effects used to paint a ticket

use ticket_core::{Color, FontWeight, Shadow, TextStyle};

/// Font sizes for each text role on the card
#[derive(Clone, Debug, PartialEq)]
pub struct TicketTypography {
    pub family: String,
    pub title: f32,
    pub body: f32,
    pub caption: f32,
    pub footnote: f32,
    pub headline: f32,
}

impl Default for TicketTypography {
    fn default() -> Self {
        Self {
            family: "system-ui".to_string(),
            title: 28.0,
            body: 17.0,
            caption: 12.0,
            footnote: 13.0,
            headline: 17.0,
        }
    }
}

/// Visual settings for a ticket
#[derive(Clone, Debug, PartialEq)]
pub struct TicketTheme {
    /// Card fill behind everything else
    pub background: Color,
    /// Text, bars and strokes
    pub foreground: Color,
    /// Opacity of the blurred full-card copy of the ticket image
    pub backdrop_opacity: f32,
    pub backdrop_blur: f32,
    pub outline_width: f32,
    pub outline_opacity: f32,
    /// Opacity of the thick dashed tear line
    pub divider_opacity: f32,
    pub shadow: Shadow,
    /// Space kept free around the card
    pub outer_padding: f32,
    /// Gap between the identifier column and the text column
    pub column_spacing: f32,
    pub typography: TicketTypography,
}

impl TicketTheme {
    /// Warm off-white card with black ink
    pub fn light() -> Self {
        Self {
            background: Color::from_rgb8(252, 251, 245),
            foreground: Color::BLACK,
            backdrop_opacity: 0.2,
            backdrop_blur: 60.0,
            outline_width: 1.0,
            outline_opacity: 0.5,
            divider_opacity: 0.3,
            shadow: Shadow::new(0.0, 10.0, 15.0, Color::BLACK.with_alpha(0.2)),
            outer_padding: 16.0,
            column_spacing: 10.0,
            typography: TicketTypography::default(),
        }
    }

    fn text(&self, size: f32) -> TextStyle {
        TextStyle::new(size)
            .with_family(self.typography.family.clone())
            .with_color(self.foreground)
    }

    pub fn title_style(&self) -> TextStyle {
        self.text(self.typography.title)
    }

    pub fn body_style(&self) -> TextStyle {
        self.text(self.typography.body)
    }

    pub fn caption_style(&self) -> TextStyle {
        self.text(self.typography.caption)
    }

    pub fn footnote_style(&self) -> TextStyle {
        self.text(self.typography.footnote)
    }

    pub fn headline_style(&self) -> TextStyle {
        self.text(self.typography.headline)
            .with_weight(FontWeight::Medium)
    }
}

impl Default for TicketTheme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_theme() {
        let theme = TicketTheme::default();
        assert_eq!(theme.background.to_rgb8(), [252, 251, 245]);
        assert_eq!(theme.shadow.color.a, 0.2);
        assert_eq!(theme.title_style().size, 28.0);
        assert_eq!(theme.headline_style().weight, FontWeight::Medium);
        assert_eq!(theme.caption_style().color, Color::BLACK);
    }
}
