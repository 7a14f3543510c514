//! Ticket configuration file handling
//!
//! `ticket.toml` holds four optional tables:
//! - `[metrics]` - outline proportions
//! - `[ticket]` - the record printed on the card
//! - `[theme]` - colours and opacities
//! - `[output]` - canvas size, corner style and file format

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use ticket_core::Color;
use ticket_layout::{TicketRecord, TicketTheme};
use ticket_shape::{CornerKind, TicketMetrics};

/// Default configuration file name
pub const CONFIG_FILE: &str = "ticket.toml";

/// Contents of `ticket.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TicketConfig {
    pub metrics: TicketMetrics,
    /// Printed record; the sample ticket when absent
    pub ticket: Option<TicketRecord>,
    pub theme: ThemeConfig,
    pub output: OutputConfig,
}

/// Overrides applied on top of [`TicketTheme::light`]
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Card colour as `#rrggbb`
    pub background: Option<String>,
    /// Text and line colour as `#rrggbb`
    pub foreground: Option<String>,
    pub backdrop_opacity: Option<f32>,
    pub backdrop_blur: Option<f32>,
    pub outline_opacity: Option<f32>,
    pub divider_opacity: Option<f32>,
    pub font_family: Option<String>,
}

/// Output file format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }

    /// Format matching a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Some(OutputFormat::Svg),
            "png" => Some(OutputFormat::Png),
            _ => None,
        }
    }
}

/// Rendering settings
#[derive(Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Canvas width the card is fitted into
    pub width: f32,
    /// Canvas height the card is fitted into
    pub height: f32,
    /// Corner style name (`rounded` or `right-angle`)
    pub corner: String,
    pub format: OutputFormat,
    /// Device pixels per unit for PNG output
    pub scale: f32,
    /// Output file; `ticket.<format>` when absent
    pub path: Option<PathBuf>,
    /// Directory image references are resolved against
    pub resources: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: 372.0,
            height: 832.0,
            corner: CornerKind::default().name().to_string(),
            format: OutputFormat::default(),
            scale: 2.0,
            path: None,
            resources: None,
        }
    }
}

/// Parse `#rrggbb` or `rrggbb`
pub fn parse_hex_color(value: &str) -> Result<Color> {
    let digits = value.trim().trim_start_matches('#');
    if digits.len() != 6 {
        anyhow::bail!("Invalid colour '{}': expected #rrggbb", value);
    }
    let hex = u32::from_str_radix(digits, 16)
        .with_context(|| format!("Invalid colour '{}'", value))?;
    Ok(Color::from_hex(hex))
}

impl ThemeConfig {
    /// The light theme with these overrides applied
    pub fn to_theme(&self) -> Result<TicketTheme> {
        let mut theme = TicketTheme::light();
        if let Some(background) = &self.background {
            theme.background = parse_hex_color(background).context("theme.background")?;
        }
        if let Some(foreground) = &self.foreground {
            theme.foreground = parse_hex_color(foreground).context("theme.foreground")?;
        }
        if let Some(opacity) = self.backdrop_opacity {
            theme.backdrop_opacity = opacity;
        }
        if let Some(blur) = self.backdrop_blur {
            theme.backdrop_blur = blur;
        }
        if let Some(opacity) = self.outline_opacity {
            theme.outline_opacity = opacity;
        }
        if let Some(opacity) = self.divider_opacity {
            theme.divider_opacity = opacity;
        }
        if let Some(family) = &self.font_family {
            theme.typography.family = family.clone();
        }
        Ok(theme)
    }
}

impl TicketConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `path` when given, else `ticket.toml` in `dir` if present,
    /// else the defaults
    pub fn resolve(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let default_path = dir.join(CONFIG_FILE);
        if default_path.exists() {
            return Self::load(&default_path);
        }
        Ok(Self::default())
    }

    /// Corner style named by `[output] corner`, inset from `[metrics]`
    pub fn corner(&self) -> Result<CornerKind> {
        let corner: CornerKind = self
            .output
            .corner
            .parse()
            .context("output.corner")?;
        Ok(corner.with_inset(self.metrics.corner_inset))
    }

    /// Record to print
    pub fn record(&self) -> TicketRecord {
        self.ticket.clone().unwrap_or_else(TicketRecord::sample)
    }
}

/// Starter `ticket.toml` written by `ticket init`
pub const TEMPLATE: &str = r##"# Ticket preview configuration

[metrics]
corner_inset = 0.0
corner_radius = 20.0
stub_height = 0.75
stub_radius = 20.0
image_height = 200.0
aspect_ratio = 0.425

[ticket]
title = "Full Museum Access"
description = "Explore all the exhibitions of the museum as long as you want"
name = "Alex Morgan"
phone_number = "(555) 010 4477"
price = "9.99"
# image = "painting"
# date = "2024-06-17T15:45:00Z"

[theme]
background = "#fcfbf5"
foreground = "#000000"

[output]
width = 372.0
height = 832.0
corner = "rounded"
format = "svg"
scale = 2.0
"##;
