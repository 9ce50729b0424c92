//! Display formatting.
//!
//! Turns an entry string into what the display shows: thousands grouping,
//! the decimal point, and exponential fallback once the entry has more
//! digits than the display. The seven-segment variant lays the text onto a
//! fixed bank of cells where `.` and `,` ride on the preceding digit's cell.

use serde::{Deserialize, Serialize};

use super::number::{ERROR_TEXT, digit_count, parse_entry};

/// Fractional mantissa digits in exponential text.
pub const EXPONENT_PRECISION: usize = 8;

/// How the display renders an entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    /// Fixed bank of seven-segment cells.
    #[default]
    Segments,
    /// Plain text line.
    Text,
}

impl DisplayStyle {
    pub fn toggled(self) -> Self {
        match self {
            DisplayStyle::Segments => DisplayStyle::Text,
            DisplayStyle::Text => DisplayStyle::Segments,
        }
    }
}

/// One seven-segment display position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayCell {
    pub glyph: char,
    /// Decimal point lit after the glyph
    pub decimal: bool,
    /// Grouping comma lit after the glyph
    pub comma: bool,
}

impl DisplayCell {
    pub const BLANK: DisplayCell = DisplayCell::new(' ');

    pub const fn new(glyph: char) -> Self {
        DisplayCell {
            glyph,
            decimal: false,
            comma: false,
        }
    }

    /// The value string a glyph component is set to, e.g. `"8."` or `"1,"`.
    pub fn value(&self) -> String {
        let mut value = String::with_capacity(3);
        value.push(self.glyph);
        if self.decimal {
            value.push('.');
        }
        if self.comma {
            value.push(',');
        }
        value
    }

    /// Inverse of [`DisplayCell::value`]. An empty value is a blank cell.
    pub fn from_value(value: &str) -> Self {
        let mut cell = DisplayCell::BLANK;
        let mut chars = value.chars();
        if let Some(glyph) = chars.next() {
            cell.glyph = glyph;
        }
        for marker in chars {
            match marker {
                '.' => cell.decimal = true,
                ',' => cell.comma = true,
                _ => {}
            }
        }
        cell
    }
}

/// Result of formatting an entry for one display style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormattedOutput {
    Text(String),
    Cells(Vec<DisplayCell>),
}

/// Format `entry` for the given display style.
pub fn format(entry: &str, max_digits: usize, style: DisplayStyle) -> FormattedOutput {
    match style {
        DisplayStyle::Text => FormattedOutput::Text(format_text(entry, max_digits)),
        DisplayStyle::Segments => FormattedOutput::Cells(layout_cells(entry, max_digits)),
    }
}

/// Format an entry as display text.
///
/// Entries with more than `max_digits` digits switch to exponential form
/// (`1.23456789e+14`); everything else is grouped in threes. Text that is
/// not a numeral, such as the error text, is returned unchanged.
pub fn format_text(entry: &str, max_digits: usize) -> String {
    if entry == ERROR_TEXT {
        return ERROR_TEXT.to_string();
    }
    let Some(value) = parse_entry(entry) else {
        return entry.to_string();
    };
    if digit_count(entry) > max_digits {
        return exponential(value, EXPONENT_PRECISION);
    }

    let (negative, body) = match entry.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, entry),
    };
    let (integer, fraction) = match body.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (body, None),
    };

    let mut out = String::with_capacity(entry.len() + entry.len() / 3);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Lay an entry onto exactly `max_digits` cells, right-aligned.
///
/// When the grouped text needs more glyph cells than the display has (a
/// minus sign takes a cell), the entry is shown in exponential form with as
/// much mantissa precision as fits. If nothing fits the error pattern is
/// shown instead; digits are never silently cut off.
pub fn layout_cells(entry: &str, max_digits: usize) -> Vec<DisplayCell> {
    let width = max_digits.max(1);

    if let Some(cells) = fit_cells(&format_text(entry, width), width) {
        return pad_cells(cells, width);
    }
    if let Some(value) = parse_entry(entry) {
        for precision in (0..=EXPONENT_PRECISION).rev() {
            if let Some(cells) = fit_cells(&exponential(value, precision), width) {
                return pad_cells(cells, width);
            }
        }
    }
    error_cells(width)
}

/// The error pattern on `width` cells.
pub fn error_cells(width: usize) -> Vec<DisplayCell> {
    let text = if width >= ERROR_TEXT.len() {
        ERROR_TEXT
    } else {
        "E"
    };
    let cells = text.chars().map(DisplayCell::new).collect();
    pad_cells(cells, width.max(1))
}

/// Insert `,` between groups of three digits, counting from the right.
/// Leading zeros are dropped, keeping a single `0`.
fn group_thousands(integer: &str) -> String {
    let trimmed = integer.trim_start_matches('0');
    let digits = if trimmed.is_empty() && !integer.is_empty() {
        "0"
    } else {
        trimmed
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Exponential text with an explicit exponent sign: `-1.5e+3`, `2.0e-7`.
fn exponential(value: f64, precision: usize) -> String {
    let raw = format!("{:.*e}", precision, value);
    match raw.split_once('e') {
        Some((mantissa, exp)) if exp.starts_with('-') => format!("{mantissa}e{exp}"),
        Some((mantissa, exp)) => format!("{mantissa}e+{exp}"),
        None => raw,
    }
}

/// Map text onto cells, or `None` if it needs more than `width` cells.
fn fit_cells(text: &str, width: usize) -> Option<Vec<DisplayCell>> {
    let mut cells: Vec<DisplayCell> = Vec::with_capacity(width);
    for ch in text.chars() {
        match ch {
            // A marker with no cell to its left is dropped.
            '.' => {
                if let Some(last) = cells.last_mut() {
                    last.decimal = true;
                }
            }
            ',' => {
                if let Some(last) = cells.last_mut() {
                    last.comma = true;
                }
            }
            '+' => {}
            'e' => cells.push(DisplayCell::new('E')),
            _ => cells.push(DisplayCell::new(ch)),
        }
    }
    (cells.len() <= width).then_some(cells)
}

fn pad_cells(cells: Vec<DisplayCell>, width: usize) -> Vec<DisplayCell> {
    let mut out = vec![DisplayCell::BLANK; width.saturating_sub(cells.len())];
    out.extend(cells);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(cells: &[DisplayCell]) -> String {
        cells.iter().map(DisplayCell::value).collect()
    }

    #[test]
    fn test_format_text_groups_thousands() {
        assert_eq!(format_text("1234567", 14), "1,234,567");
        assert_eq!(format_text("123", 14), "123");
        assert_eq!(format_text("1000", 14), "1,000");
        assert_eq!(format_text("-1234.5", 14), "-1,234.5");
        assert_eq!(format_text("0", 14), "0");
    }

    #[test]
    fn test_format_text_keeps_partial_fraction() {
        assert_eq!(format_text("12.", 14), "12.");
        assert_eq!(format_text("0.000", 14), "0.000");
        assert_eq!(format_text("-0.5", 14), "-0.5");
    }

    #[test]
    fn test_format_text_switches_to_exponential() {
        assert_eq!(format_text("123456789012345", 14), "1.23456789e+14");
        assert_eq!(format_text("0.0000000000001234", 14), "1.23400000e-13");
        // Fourteen digits still fit.
        assert_eq!(format_text("12345678901234", 14), "12,345,678,901,234");
    }

    #[test]
    fn test_format_text_passes_through_non_numerals() {
        assert_eq!(format_text(ERROR_TEXT, 14), "Error");
        assert_eq!(format_text("abc", 14), "abc");
    }

    #[test]
    fn test_format_is_pure() {
        let a = format("9876543.21", 14, DisplayStyle::Segments);
        let b = format("9876543.21", 14, DisplayStyle::Segments);
        assert_eq!(a, b);
        assert_eq!(
            format("9876543.21", 14, DisplayStyle::Text),
            FormattedOutput::Text("9,876,543.21".to_string())
        );
    }

    #[test]
    fn test_layout_cells_attaches_markers_to_previous_digit() {
        let cells = layout_cells("1234.5", 8);
        assert_eq!(cells.len(), 8);
        assert_eq!(glyphs(&cells), "   1,234.5");
        assert_eq!(cells[3], DisplayCell { glyph: '1', decimal: false, comma: true });
        assert_eq!(cells[6], DisplayCell { glyph: '4', decimal: true, comma: false });
    }

    #[test]
    fn test_layout_cells_drops_leading_decimal() {
        let cells = layout_cells(".5", 4);
        assert_eq!(glyphs(&cells), "   5");
    }

    #[test]
    fn test_layout_cells_fills_exactly_max_digits() {
        let cells = layout_cells("0", 14);
        assert_eq!(cells.len(), 14);
        assert!(cells[..13].iter().all(|c| *c == DisplayCell::BLANK));
        assert_eq!(cells[13].glyph, '0');
    }

    #[test]
    fn test_layout_cells_negative_full_width_uses_exponent() {
        let cells = layout_cells("-12345678901234", 14);
        assert_eq!(cells.len(), 14);
        assert_eq!(glyphs(&cells), " -1.23456789E13");
    }

    #[test]
    fn test_layout_cells_shrinks_mantissa_to_fit() {
        let cells = layout_cells("-0.00000000000000012345", 8);
        assert_eq!(cells.len(), 8);
        assert_eq!(glyphs(&cells), "-1.23E-16");
    }

    #[test]
    fn test_layout_cells_error_pattern() {
        assert_eq!(glyphs(&layout_cells(ERROR_TEXT, 14)), format!("{}Error", " ".repeat(9)));
        assert_eq!(glyphs(&error_cells(3)), "  E");
    }

    #[test]
    fn test_display_cell_value_round_trip() {
        let cell = DisplayCell { glyph: '8', decimal: true, comma: false };
        assert_eq!(cell.value(), "8.");
        assert_eq!(DisplayCell::from_value("8."), cell);
        assert_eq!(DisplayCell::from_value(""), DisplayCell::BLANK);
    }
}
