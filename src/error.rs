//! Error types. Gameplay itself never fails; only start-up can.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("pattern {name} ({pattern_width}x{pattern_height}) does not fit a {grid_width}x{grid_height} grid")]
    PatternTooLarge {
        name: &'static str,
        pattern_width: usize,
        pattern_height: usize,
        grid_width: usize,
        grid_height: usize,
    },
    #[error("invalid life rules: survive {min}..={max}, born {born}")]
    InvalidRules { min: u8, max: u8, born: u8 },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
