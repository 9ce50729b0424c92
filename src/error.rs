//! Error types for the deskcalc command line

use thiserror::Error;

/// Problems with the command line itself
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CliError {
    #[error("{flag} requires a value")]
    MissingValue { flag: String },

    #[error("Invalid value for {flag}: {value}")]
    InvalidValue { flag: String, value: String },

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("--no-config cannot be combined with --config")]
    ConflictingConfig,
}

pub type Result<T> = std::result::Result<T, CliError>;
