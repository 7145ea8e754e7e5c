//! Subcommand handlers for build, rasterize and config actions.

use std::path::{Path, PathBuf};

use super::args::{BuildArgs, ConfigAction, RasterizeArgs, SourceArgs};
use crate::config::{default_path, Config, DEFAULT_CONFIG_TOML};
use crate::pipeline::{MaskError, MaskOptions, MaskPipeline};
use crate::raster::{LayerClasses, Rasterizer, VectorSource};
use crate::texture::sidecar_path;

/// Build the packed mask texture and write it to disk.
///
/// Returns the path of the raw RGBA file.
pub async fn run_build(args: &BuildArgs, config: &Config) -> Result<PathBuf, MaskError> {
    let pipeline = pipeline_for(&args.source, config);
    let options = MaskOptions {
        secondary_thickness: args.thickness.unwrap_or(config.mask.thickness),
        cell_size: args.cell_size.unwrap_or(config.mask.cell_size),
        ..options_for(&args.source, config)?
    };

    let texture = pipeline.build(&options).await?;

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| args.source.svg.with_extension("rgba"));
    texture.write_raw(&out)?;
    println!(
        "Wrote {}x{} mask texture to {} (metadata: {})",
        texture.width,
        texture.height,
        out.display(),
        sidecar_path(&out).display()
    );

    if let Some(png) = &args.png {
        texture.write_png_preview(png)?;
        println!("Wrote preview to {}", png.display());
    }

    Ok(out)
}

/// Rasterize one layer and write it as a grayscale PNG.
pub async fn run_rasterize(args: &RasterizeArgs, config: &Config) -> Result<(), MaskError> {
    let pipeline = pipeline_for(&args.source, config);
    let options = options_for(&args.source, config)?;

    let mask = pipeline.rasterize_layer(&options, args.layer.into()).await?;
    image::save_buffer(
        &args.png,
        &mask.data,
        mask.width,
        mask.height,
        image::ExtendedColorType::L8,
    )?;
    println!(
        "Wrote {} layer ({} px on) to {}",
        crate::raster::LayerSelector::from(args.layer),
        mask.coverage(),
        args.png.display()
    );
    Ok(())
}

fn pipeline_for(source: &SourceArgs, config: &Config) -> MaskPipeline {
    let mut settings = config.raster.settings();
    if let Some(threshold) = source.threshold {
        settings.threshold = threshold;
    }
    MaskPipeline::new(Rasterizer::new(&settings))
}

/// Merge CLI overrides over config values. Thickness and cell size come
/// from the config; `run_build` overrides them.
fn options_for(source: &SourceArgs, config: &Config) -> Result<MaskOptions, MaskError> {
    let classes = LayerClasses::new(
        source
            .primary_class
            .clone()
            .unwrap_or_else(|| config.raster.primary_class.clone()),
        source
            .secondary_class
            .clone()
            .unwrap_or_else(|| config.raster.secondary_class.clone()),
    );
    let vector = load_source(&source.svg, classes)?;

    Ok(MaskOptions::new(vector, config.mask.thickness, config.mask.cell_size)
        .with_size(
            source.width.unwrap_or(config.texture.width),
            source.height.unwrap_or(config.texture.height),
        )
        .with_margin(source.margin.unwrap_or(config.texture.margin)))
}

fn load_source(path: &Path, classes: LayerClasses) -> Result<VectorSource, MaskError> {
    let markup = std::fs::read_to_string(path)?;
    log::debug!("Read {} bytes of markup from {}", markup.len(), path.display());
    Ok(VectorSource::with_classes(markup, classes))
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, config_path: Option<&Path>) {
    let config_path = config_path.map(PathBuf::from).unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let config = match Config::load(Some(&config_path)) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            println!("Current configuration:");
            println!("  Texture: {}x{}", config.texture.width, config.texture.height);
            println!("  Margin: {}", config.texture.margin);
            println!("  Threshold: {}", config.raster.threshold);
            println!(
                "  Layer classes: {} (primary), {} (secondary)",
                config.raster.primary_class, config.raster.secondary_class
            );
            println!(
                "  System fonts: {}",
                if config.raster.load_system_fonts { "yes" } else { "no" }
            );
            for dir in &config.raster.font_dirs {
                println!("  Font dir: {}", dir.display());
            }
            println!("  Thickness: {}", config.mask.thickness);
            println!("  Cell size: {}", config.mask.cell_size);
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            if config_path.exists() {
                eprintln!("Config file already exists: {}", config_path.display());
                eprintln!("Use 'glyph-mask config show' to view current settings.");
                std::process::exit(1);
            }

            if let Some(parent) = config_path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    eprintln!("Error creating config directory: {}", e);
                    std::process::exit(1);
                }
            }

            match std::fs::write(&config_path, DEFAULT_CONFIG_TOML) {
                Ok(()) => println!("Created config file: {}", config_path.display()),
                Err(e) => {
                    eprintln!("Error writing config file: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
