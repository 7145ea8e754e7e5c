use clap::Parser;

use glyph_mask::cli::{handle_config_action, run_build, run_rasterize, Args, Command};
use glyph_mask::config::Config;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Command::Config { action } = &args.command {
        handle_config_action(action.clone(), args.config.as_deref());
        return;
    }

    // If --config is specified, require the file to exist
    if let Some(path) = &args.config {
        if !path.exists() {
            eprintln!("Error: Config file not found: {}", path.display());
            std::process::exit(1);
        }
    }
    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: Failed to create async runtime: {}", e);
            std::process::exit(1);
        }
    };

    let result = rt.block_on(async {
        match &args.command {
            Command::Build(build) => run_build(build, &config).await.map(|_| ()),
            Command::Rasterize(raster) => run_rasterize(raster, &config).await,
            Command::Config { .. } => Ok(()),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
