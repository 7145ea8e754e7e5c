//! Configuration file handling for glyph-mask.
//!
//! Loads configuration from `~/.config/glyph-mask/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::pipeline::{DEFAULT_HEIGHT, DEFAULT_MARGIN, DEFAULT_WIDTH};
use crate::raster::{
    LayerClasses, RasterSettings, DEFAULT_PRIMARY_CLASS, DEFAULT_SECONDARY_CLASS,
    DEFAULT_THRESHOLD,
};

/// Configuration file structure for glyph-mask.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub texture: TextureConfig,
    #[serde(default)]
    pub raster: RasterConfig,
    #[serde(default)]
    pub mask: MaskConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct TextureConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_margin")]
    pub margin: f32,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            margin: DEFAULT_MARGIN,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct RasterConfig {
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    #[serde(default = "default_primary_class")]
    pub primary_class: String,
    #[serde(default = "default_secondary_class")]
    pub secondary_class: String,
    #[serde(default = "default_true")]
    pub load_system_fonts: bool,
    #[serde(default)]
    pub font_dirs: Vec<PathBuf>,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            primary_class: default_primary_class(),
            secondary_class: default_secondary_class(),
            load_system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

impl RasterConfig {
    pub fn settings(&self) -> RasterSettings {
        RasterSettings {
            threshold: self.threshold,
            load_system_fonts: self.load_system_fonts,
            font_dirs: self.font_dirs.clone(),
        }
    }

    pub fn classes(&self) -> LayerClasses {
        LayerClasses::new(&self.primary_class, &self.secondary_class)
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct MaskConfig {
    #[serde(default)]
    pub thickness: f32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            thickness: 0.0,
            cell_size: default_cell_size(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_margin() -> f32 {
    DEFAULT_MARGIN
}

fn default_threshold() -> u8 {
    DEFAULT_THRESHOLD
}

fn default_primary_class() -> String {
    DEFAULT_PRIMARY_CLASS.to_string()
}

fn default_secondary_class() -> String {
    DEFAULT_SECONDARY_CLASS.to_string()
}

fn default_cell_size() -> f32 {
    8.0
}

/// Default config file contents written by `glyph-mask config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# glyph-mask configuration

[texture]
# Output texture size in pixels
width = 1024
height = 512
# Inset on each side as a fraction of the texture size (0 to <0.5)
margin = 0.06

[raster]
# Red channel values above this count as foreground (0-255)
threshold = 10
# CSS classes of the two layers in the source SVG
primary_class = "cls-1"
secondary_class = "cls-2"
# Load installed fonts for <text> content
load_system_fonts = true
# Extra font directories
# font_dirs = ["/usr/share/fonts/custom"]

[mask]
# Secondary layer thickness (0 to 1.2)
thickness = 0.0
# ASCII grid cell size in pixels
cell_size = 8.0
"#;

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("glyph-mask").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/glyph-mask/config.toml")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.texture.width, 1024);
        assert_eq!(config.raster.threshold, 10);
        assert_eq!(config.raster.primary_class, "cls-1");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[raster]\nthreshold = 40\n\n[mask]\nthickness = 0.8").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.raster.threshold, 40);
        assert_eq!(config.raster.secondary_class, "cls-2");
        assert!(config.raster.load_system_fonts);
        assert_eq!(config.mask.thickness, 0.8);
        assert_eq!(config.mask.cell_size, 8.0);
        assert_eq!(config.texture.height, 512);
    }

    #[test]
    fn test_default_config_toml_matches_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[texture\nwidth = ").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(format!("{}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn test_raster_config_conversions() {
        let raster = RasterConfig {
            threshold: 3,
            primary_class: "ink".to_string(),
            secondary_class: "knockout".to_string(),
            load_system_fonts: false,
            font_dirs: vec![PathBuf::from("/fonts")],
        };
        let settings = raster.settings();
        assert_eq!(settings.threshold, 3);
        assert!(!settings.load_system_fonts);
        assert_eq!(settings.font_dirs, vec![PathBuf::from("/fonts")]);
        assert_eq!(raster.classes(), LayerClasses::new("ink", "knockout"));
    }

    #[test]
    fn test_default_path_ends_with_config_toml() {
        let path = default_path();
        assert!(path.ends_with("glyph-mask/config.toml"));
    }
}
