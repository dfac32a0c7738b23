//! `zaplink` command line tool.
//!
//! Renders styled QR codes to PNG and mints short keys without running the
//! surrounding platform services.
//!
//! # Usage
//!
//! ```bash
//! # Render a QR code
//! zaplink render --data "https://zaplink.io" --size 512 --body-shape liquid -o qr.png
//!
//! # Start from a JSON style and override a field
//! zaplink render --config style.json --eye-shape leaf -o qr.png
//!
//! # Mint short keys
//! zaplink key --count 5 --machine-id 3
//!
//! # Dynamic QR pointing at a fresh redirect key
//! zaplink dynamic -o dynamic.png
//! ```
//!
//! # Environment Variables
//!
//! See [`zaplink_core::config`]. A `.env` file in the working directory is
//! loaded first.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use image::ImageFormat;
use tracing_subscriber::EnvFilter;

use zaplink_core::application::services::{QrService, QrServiceSettings};
use zaplink_core::config::{self, Config};
use zaplink_core::domain::entities::{BodyShape, EyeShape, LogoConfig, QrConfig};
use zaplink_core::engine::RenderedImage;
use zaplink_core::infrastructure::{DefaultLogoSource, QrcodeMatrixProvider};
use zaplink_core::keygen::SnowflakeGenerator;

/// Styled QR codes and short keys for Zaplink.
#[derive(Parser)]
#[command(name = "zaplink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a QR code to a PNG file
    Render {
        /// Payload to encode (overrides `data` from --config)
        #[arg(short, long)]
        data: Option<String>,

        #[command(flatten)]
        style: StyleArgs,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print freshly minted short keys
    Key {
        /// Number of keys to print
        #[arg(short, long, default_value_t = 1)]
        count: u32,

        /// Machine id (overrides MACHINE_ID)
        #[arg(short, long)]
        machine_id: Option<u16>,
    },

    /// Mint a key and render a QR code for its redirect URL
    Dynamic {
        #[command(flatten)]
        style: StyleArgs,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Style options shared by the rendering commands.
#[derive(Args)]
struct StyleArgs {
    /// JSON file with a full QR configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image size in pixels
    #[arg(short, long)]
    size: Option<u32>,

    /// Quiet zone in modules
    #[arg(short, long)]
    margin: Option<u32>,

    /// SQUARE, ROUNDED, CIRCLE, DOT or LIQUID
    #[arg(long)]
    body_shape: Option<BodyShape>,

    /// SQUARE, ROUNDED, CIRCLE or LEAF
    #[arg(long)]
    eye_shape: Option<EyeShape>,

    /// Module color, e.g. #1F2937
    #[arg(long)]
    color: Option<String>,

    /// Gradient end color
    #[arg(long)]
    color_dark: Option<String>,

    /// Use a radial instead of a linear gradient
    #[arg(long)]
    radial: bool,

    /// Outer eye color
    #[arg(long)]
    eye_outer: Option<String>,

    /// Inner eye color
    #[arg(long)]
    eye_inner: Option<String>,

    /// Background color
    #[arg(long)]
    background: Option<String>,

    /// Leave the background transparent
    #[arg(long)]
    transparent: bool,

    /// Logo URL or path under LOGO_RESOURCE_DIR
    #[arg(long)]
    logo: Option<String>,

    /// Logo side relative to the image
    #[arg(long)]
    logo_ratio: Option<f64>,
}

impl StyleArgs {
    /// Loads `--config` (or defaults) and applies the explicit overrides.
    fn build(&self) -> Result<QrConfig> {
        let mut qr = match &self.config {
            Some(path) => read_config(path)?,
            None => QrConfig::default(),
        };

        if let Some(size) = self.size {
            qr.size = size;
        }
        if let Some(margin) = self.margin {
            qr.margin = margin;
        }
        if let Some(shape) = self.body_shape {
            qr.body.shape = shape;
        }
        if let Some(shape) = self.eye_shape {
            qr.eye.shape = shape;
        }
        if let Some(color) = &self.color {
            qr.body.color = color.clone();
        }
        if let Some(color) = &self.color_dark {
            qr.body.color_dark = Some(color.clone());
        }
        if self.radial {
            qr.body.gradient_linear = false;
        }
        if let Some(color) = &self.eye_outer {
            qr.eye.color_outer = color.clone();
        }
        if let Some(color) = &self.eye_inner {
            qr.eye.color_inner = color.clone();
        }
        if let Some(color) = &self.background {
            qr.background_color = color.clone();
        }
        if self.transparent {
            qr.transparent_background = true;
        }
        if let Some(path) = &self.logo {
            qr.logo.get_or_insert_with(LogoConfig::default).logo_path = Some(path.clone());
        }
        if let Some(ratio) = self.logo_ratio {
            qr.logo.get_or_insert_with(LogoConfig::default).size_ratio = ratio;
        }

        Ok(qr)
    }
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env().context("Invalid configuration")?;
    init_tracing(&config);
    config.print_summary();

    match cli.command {
        Commands::Render {
            data,
            style,
            output,
        } => handle_render(&config, data, &style, &output)?,
        Commands::Key { count, machine_id } => handle_key(&config, count, machine_id)?,
        Commands::Dynamic { style, output } => handle_dynamic(&config, &style, &output)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for keys and URLs.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_service(
    config: &Config,
) -> Result<QrService<QrcodeMatrixProvider, DefaultLogoSource>> {
    let logo_source =
        DefaultLogoSource::from_config(config).context("Failed to set up logo loading")?;
    let generator = SnowflakeGenerator::new(config.machine_id)?
        .with_fold_modulus(config.key_fold_modulus)?;

    Ok(QrService::new(
        Arc::new(QrcodeMatrixProvider::new()),
        Arc::new(logo_source),
        Arc::new(generator),
        QrServiceSettings::from_config(config),
    ))
}

fn handle_render(
    config: &Config,
    data: Option<String>,
    style: &StyleArgs,
    output: &Path,
) -> Result<()> {
    let mut qr = style.build()?;
    if let Some(data) = data {
        qr.data = data;
    }

    let service = build_service(config)?;
    let image = service.generate(&qr)?;
    save_png(&image, output)?;

    println!(
        "{} {} ({}px, {}/{})",
        "✓ Wrote".green().bold(),
        output.display().to_string().cyan(),
        image.size(),
        qr.body.shape,
        qr.eye.shape
    );

    Ok(())
}

fn handle_key(config: &Config, count: u32, machine_id: Option<u16>) -> Result<()> {
    let generator = SnowflakeGenerator::new(machine_id.unwrap_or(config.machine_id))?
        .with_fold_modulus(config.key_fold_modulus)?;

    for _ in 0..count {
        println!("{}", generator.generate_short_key()?.bright_yellow());
    }

    Ok(())
}

fn handle_dynamic(config: &Config, style: &StyleArgs, output: &Path) -> Result<()> {
    let qr = style.build()?;
    let service = build_service(config)?;
    let dynamic = service.generate_dynamic(&qr)?;
    save_png(&dynamic.image, output)?;

    println!("{}", "✓ Dynamic QR created".green().bold());
    println!("  Key:   {}", dynamic.key.bright_yellow().bold());
    println!("  URL:   {}", dynamic.redirect_url.cyan());
    println!("  Image: {}", output.display());

    Ok(())
}

fn read_config(path: &Path) -> Result<QrConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid QR configuration in {}", path.display()))
}

fn save_png(image: &RenderedImage, output: &Path) -> Result<()> {
    image
        .as_image()
        .save_with_format(output, ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", output.display()))
}
