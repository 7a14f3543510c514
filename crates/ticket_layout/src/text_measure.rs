//! Text measurement for layout
//!
//! Layout needs text sizes before anything is drawn. Measurement goes through
//! the [`TextMeasurer`] trait so a host with real font metrics can plug them
//! in; [`EstimatedTextMeasurer`] works from character counts alone.

/// Text layout options that affect measurement
#[derive(Debug, Clone)]
pub struct TextLayoutOptions {
    /// Line height multiplier (1.0 = default, 1.5 = 150%)
    pub line_height: f32,
    /// Extra spacing between letters in pixels
    pub letter_spacing: f32,
    /// Maximum width for wrapping (None = no wrapping)
    pub max_width: Option<f32>,
}

impl Default for TextLayoutOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutOptions {
    pub fn new() -> Self {
        Self {
            line_height: 1.2,
            letter_spacing: 0.0,
            max_width: None,
        }
    }

    pub fn with_line_height(mut self, height: f32) -> Self {
        self.line_height = height;
        self
    }

    pub fn with_letter_spacing(mut self, spacing: f32) -> Self {
        self.letter_spacing = spacing;
        self
    }

    /// Set max width for wrapping
    pub fn with_max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Text measurement result
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels (accounts for line height and number of lines)
    pub height: f32,
    /// Number of lines (1 for single-line text)
    pub line_count: u32,
}

/// Trait for measuring text dimensions
pub trait TextMeasurer: Send + Sync {
    /// Measure the dimensions of a text string with full layout options
    fn measure_with_options(
        &self,
        text: &str,
        font_size: f32,
        options: &TextLayoutOptions,
    ) -> TextMetrics;

    /// Measure text with default options
    fn measure(&self, text: &str, font_size: f32) -> TextMetrics {
        self.measure_with_options(text, font_size, &TextLayoutOptions::new())
    }

    /// Break `text` into lines that fit `options.max_width`
    ///
    /// Explicit newlines are kept. Words wider than the limit get a line of
    /// their own rather than being split.
    fn wrap_lines(&self, text: &str, font_size: f32, options: &TextLayoutOptions) -> Vec<String> {
        let Some(max_width) = options.max_width else {
            return text.lines().map(str::to_string).collect();
        };
        let single_line = TextLayoutOptions {
            max_width: None,
            ..options.clone()
        };

        let mut lines = Vec::new();
        for paragraph in text.lines() {
            let mut line = String::new();
            for word in paragraph.split_whitespace() {
                let candidate = if line.is_empty() {
                    word.to_string()
                } else {
                    format!("{line} {word}")
                };
                let width = self
                    .measure_with_options(&candidate, font_size, &single_line)
                    .width;
                if width > max_width && !line.is_empty() {
                    lines.push(std::mem::replace(&mut line, word.to_string()));
                } else {
                    line = candidate;
                }
            }
            lines.push(line);
        }
        lines
    }
}

/// Measures text from character counts
///
/// Each character is taken as `0.55 * font_size` wide, which is
/// conservative for proportional fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl EstimatedTextMeasurer {
    fn line_width(text: &str, font_size: f32, letter_spacing: f32) -> f32 {
        let chars = text.chars().count() as f32;
        let spacing = if chars > 1.0 {
            (chars - 1.0) * letter_spacing
        } else {
            0.0
        };
        chars * font_size * 0.55 + spacing
    }
}

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure_with_options(
        &self,
        text: &str,
        font_size: f32,
        options: &TextLayoutOptions,
    ) -> TextMetrics {
        let lines = match options.max_width {
            Some(_) => self.wrap_lines(text, font_size, options),
            None => text.lines().map(str::to_string).collect(),
        };

        let width = lines
            .iter()
            .map(|line| Self::line_width(line, font_size, options.letter_spacing))
            .fold(0.0, f32::max);
        let line_count = lines.len().max(1) as u32;

        TextMetrics {
            width,
            height: font_size * options.line_height * line_count as f32,
            line_count,
        }
    }
}
