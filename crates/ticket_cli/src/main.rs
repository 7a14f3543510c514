//! Ticket CLI
//!
//! Render ticket cards to SVG or PNG and print their outlines.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ticket_core::{Color, RecordingContext, Rect, Size, Stroke};
use ticket_layout::{TicketPart, TicketView};
use ticket_shape::{CornerKind, TicketShape};
use ticket_svg::{path_data, RasterizedSvg, SvgDocument};

mod config;

use config::{OutputFormat, TicketConfig, CONFIG_FILE, TEMPLATE};

#[derive(Parser)]
#[command(name = "ticket")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ticket card renderer", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that builds a ticket
#[derive(Args)]
struct ShapeArgs {
    /// Configuration file (defaults to ./ticket.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Canvas width
    #[arg(long)]
    width: Option<f32>,

    /// Canvas height
    #[arg(long)]
    height: Option<f32>,

    /// Corner style (rounded, right-angle)
    #[arg(long)]
    corner: Option<CornerKind>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out and paint a ticket card
    Render {
        #[command(flatten)]
        shape: ShapeArgs,

        /// Output format (inferred from the output extension when omitted)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Output path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Device pixels per unit for PNG output
        #[arg(long)]
        scale: Option<f32>,
    },

    /// Print the outline path data of a ticket rect
    Outline {
        #[command(flatten)]
        shape: ShapeArgs,

        /// Print the single closed contour instead of the outline parts
        #[arg(long)]
        silhouette: bool,

        /// Wrap the path in a standalone SVG document
        #[arg(long)]
        svg: bool,
    },

    /// Write a starter ticket.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show metrics and computed layout
    Info {
        #[command(flatten)]
        shape: ShapeArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Render {
            shape,
            format,
            output,
            scale,
        } => cmd_render(&shape, format, output, scale),

        Commands::Outline {
            shape,
            silhouette,
            svg,
        } => cmd_outline(&shape, silhouette, svg),

        Commands::Init { force } => cmd_init(force),

        Commands::Info { shape } => cmd_info(&shape),
    }
}

/// Configuration with command-line overrides applied
struct Settings {
    config: TicketConfig,
    size: Size,
    shape: TicketShape,
}

impl Settings {
    fn load(args: &ShapeArgs) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let config = TicketConfig::resolve(args.config.as_deref(), &cwd)?;

        let size = Size::new(
            args.width.unwrap_or(config.output.width),
            args.height.unwrap_or(config.output.height),
        );
        if !(size.width > 0.0 && size.height > 0.0) {
            anyhow::bail!("Invalid canvas size {}x{}", size.width, size.height);
        }

        let corner = match args.corner {
            Some(corner) => corner.with_inset(config.metrics.corner_inset),
            None => config.corner()?,
        };
        let shape = TicketShape::new(corner).with_metrics(config.metrics);

        Ok(Self {
            config,
            size,
            shape,
        })
    }

    fn view(&self) -> Result<TicketView> {
        let theme = self.config.theme.to_theme()?;
        Ok(TicketView::with_shape(self.config.record(), self.shape.clone()).theme(theme))
    }
}

fn cmd_render(
    args: &ShapeArgs,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
    scale: Option<f32>,
) -> Result<()> {
    let settings = Settings::load(args)?;
    let output_config = &settings.config.output;

    let output = output.or_else(|| output_config.path.clone());
    let format = format
        .or_else(|| output.as_deref().and_then(OutputFormat::from_path))
        .unwrap_or(output_config.format);
    let output =
        output.unwrap_or_else(|| PathBuf::from(format!("ticket.{}", format.extension())));

    let view = settings.view()?;
    let size = settings.size;
    let mut ctx = RecordingContext::new(size);
    let layout = view
        .paint(&mut ctx, size)
        .context("Failed to lay out ticket")?;
    let document = SvgDocument::from_commands(size, ctx.commands())
        .context("Failed to write SVG")?;

    match format {
        OutputFormat::Svg => document
            .save(&output)
            .with_context(|| format!("Failed to write {}", output.display()))?,
        OutputFormat::Png => {
            let scale = scale.unwrap_or(output_config.scale);
            let raster = RasterizedSvg::render(&document, scale, output_config.resources.as_deref())
                .context("Failed to rasterize ticket")?;
            raster
                .save_png(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }
    }

    info!(
        "Rendered {} ticket {} ({}x{} card) to {}",
        settings.shape.corner(),
        view.record().short_id(),
        layout.card.width(),
        layout.card.height(),
        output.display()
    );
    Ok(())
}

fn cmd_outline(args: &ShapeArgs, silhouette: bool, svg: bool) -> Result<()> {
    let settings = Settings::load(args)?;
    let rect = settings.size.to_rect();
    let path = if silhouette {
        settings.shape.silhouette(rect)
    } else {
        settings.shape.outline(rect).to_path()
    };

    if svg {
        let document = SvgDocument::from_path(settings.size, &path, &Stroke::new(1.0), Color::BLACK)?;
        print!("{document}");
    } else {
        println!("{}", path_data(&path));
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", CONFIG_FILE);
    }
    fs::write(path, TEMPLATE).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;
    info!("Wrote {}", CONFIG_FILE);
    Ok(())
}

fn print_rect(label: &str, rect: Rect) {
    println!(
        "  {:<12} x {:>7.1}  y {:>7.1}  w {:>7.1}  h {:>7.1}",
        label,
        rect.x(),
        rect.y(),
        rect.width(),
        rect.height()
    );
}

fn cmd_info(args: &ShapeArgs) -> Result<()> {
    let settings = Settings::load(args)?;
    let metrics = settings.shape.metrics();
    let view = settings.view()?;
    let layout = view
        .layout(settings.size)
        .context("Failed to lay out ticket")?;

    println!("Ticket renderer {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Shape:");
    println!("  corner        {}", settings.shape.corner());
    println!("  corner inset  {}", metrics.corner_inset);
    println!("  corner radius {}", metrics.corner_radius);
    println!("  stub height   {}", metrics.stub_height);
    println!("  stub radius   {}", metrics.stub_radius);
    println!("  min extent    {}", metrics.minimum_extent());
    println!();
    println!(
        "Layout in {}x{} (stub line at y {:.1}):",
        settings.size.width,
        settings.size.height,
        metrics.stub_y(layout.card)
    );
    for (label, part) in [
        ("card", TicketPart::Card),
        ("header", TicketPart::Header),
        ("image", TicketPart::Image),
        ("cut line", TicketPart::CutLine),
        ("footer", TicketPart::Footer),
    ] {
        print_rect(label, layout.rect(part));
    }
    Ok(())
}
