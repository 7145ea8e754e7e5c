//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, BuildArgs, Command, ConfigAction, RasterizeArgs, SourceArgs};
pub use commands::{handle_config_action, run_build, run_rasterize};
pub use enums::Layer;
