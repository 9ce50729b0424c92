//! Error types for the calculator engine.

use thiserror::Error;

/// Arithmetic failures that put the calculator into its error state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result out of range")]
    Overflow,
}

/// Errors produced while reading key tokens from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Unexpected input `{text}` at offset {offset}")]
    Unexpected { offset: usize, text: String },
}
