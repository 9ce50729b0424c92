//! Calculator engine API.
//!
//! - [`Calculator`], [`Snapshot`], [`CalcConfig`] - the key-press state machine
//! - [`Key`], [`Operator`], [`parse_key_sequence`] - press types and their text form
//! - [`format`], [`format_text`], [`layout_cells`] - display formatting
//! - [`render`], [`segments_for`], [`GLYPHS`] - seven-segment glyphs

mod calculator;
mod error;
mod format;
mod key;
mod number;
mod segments;

pub use calculator::{
    CalcConfig, Calculator, DEFAULT_MAX_DIGITS, DEFAULT_TAX_RATE, MAX_SUPPORTED_DIGITS, Snapshot,
};
pub use error::{CalcError, KeyParseError};
pub use format::{
    DisplayCell, DisplayStyle, EXPONENT_PRECISION, FormattedOutput, error_cells, format,
    format_text, layout_cells,
};
pub use key::{Key, Operator, parse_key_sequence};
pub use number::{ERROR_TEXT, digit_count, parse_entry};
pub use segments::{GLYPHS, Segment, SegmentSet, ascii_rows, render, render_cell, segments_for};
