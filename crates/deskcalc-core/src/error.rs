//! Error types for Deskcalc core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, validating or saving settings
#[derive(Error, Debug)]
pub enum DeskcalcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Refusing to read {}: file too large ({size} bytes, max {max})", .path.display())]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Invalid setting `{name}`: {message}")]
    InvalidSetting { name: &'static str, message: String },

    #[error("Failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, DeskcalcError>;
