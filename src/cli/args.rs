//! CLI argument parsing with clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use super::enums::Layer;

/// Build packed ink/knockout mask textures from two-layer SVG glyph sources
#[derive(Parser, Debug)]
#[command(name = "glyph-mask")]
#[command(version, about = "Two-channel mask textures from layered SVG glyphs", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the packed RGBA mask texture
    Build(BuildArgs),
    /// Rasterize a single layer to a grayscale PNG
    Rasterize(RasterizeArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options shared by every command that rasterizes a source.
#[derive(ClapArgs, Debug, Default, Clone, PartialEq)]
pub struct SourceArgs {
    /// Source SVG file
    pub svg: PathBuf,

    /// Texture width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Texture height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Inset on each side as a fraction of the size (0 to <0.5)
    #[arg(long, value_parser = parse_margin)]
    pub margin: Option<f32>,

    /// Red channel foreground threshold (0-255)
    #[arg(long)]
    pub threshold: Option<u8>,

    /// CSS class of the primary (ink) layer
    #[arg(long)]
    pub primary_class: Option<String>,

    /// CSS class of the secondary (knockout) layer
    #[arg(long)]
    pub secondary_class: Option<String>,
}

#[derive(ClapArgs, Debug, Clone, PartialEq)]
pub struct BuildArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Secondary layer thickness (0 to 1.2, larger values clamp)
    #[arg(long, short)]
    pub thickness: Option<f32>,

    /// ASCII grid cell size in pixels
    #[arg(long, value_parser = parse_cell_size)]
    pub cell_size: Option<f32>,

    /// Raw RGBA output path (default: <svg stem>.rgba)
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Also write a top-down PNG preview
    #[arg(long)]
    pub png: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone, PartialEq)]
pub struct RasterizeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Layer to rasterize
    #[arg(long, short, default_value = "primary")]
    pub layer: Layer,

    /// Output PNG path
    #[arg(long)]
    pub png: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

/// Parse and validate margin (0.0 to <0.5)
fn parse_margin(s: &str) -> Result<f32, String> {
    let margin: f32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(0.0..0.5).contains(&margin) {
        return Err(format!("Margin must be at least 0.0 and below 0.5, got {}", margin));
    }
    Ok(margin)
}

/// Parse and validate cell size (> 0)
fn parse_cell_size(s: &str) -> Result<f32, String> {
    let size: f32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(size.is_finite() && size > 0.0) {
        return Err(format!("Cell size must be greater than 0, got {}", size));
    }
    Ok(size)
}
