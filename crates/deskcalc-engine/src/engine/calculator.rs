//! Calculator state machine.
//!
//! [`Calculator`] models a two-operand desk calculator: one entry being
//! typed, at most one pending `operand operator` pair, a memory register and
//! a grand total. Each press runs to completion and returns a [`Snapshot`].
//! Chained operators evaluate left to right with no precedence.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::error::CalcError;
use super::key::{Key, Operator};
use super::number::{ERROR_TEXT, digit_count, normalize, parse_entry, value_to_entry};

/// Digit positions on a standard desk calculator.
pub const DEFAULT_MAX_DIGITS: usize = 14;
/// Upper bound accepted for [`CalcConfig::max_digits`].
pub const MAX_SUPPORTED_DIGITS: usize = 20;
/// Tax rate in percent used by the tax keys unless configured otherwise.
pub const DEFAULT_TAX_RATE: f64 = 10.0;

/// Engine configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalcConfig {
    /// Maximum number of digits in a typed entry.
    pub max_digits: usize,
    /// Tax rate in percent for `TAX+` and `TAX-`.
    pub tax_rate: f64,
}

impl CalcConfig {
    /// Build a config, clamping `max_digits` into `1..=MAX_SUPPORTED_DIGITS`.
    /// Negative or non-finite tax rates fall back to zero.
    pub fn new(max_digits: usize, tax_rate: f64) -> Self {
        CalcConfig {
            max_digits: max_digits.clamp(1, MAX_SUPPORTED_DIGITS),
            tax_rate: if tax_rate.is_finite() && tax_rate >= 0.0 {
                tax_rate
            } else {
                0.0
            },
        }
    }
}

impl Default for CalcConfig {
    fn default() -> Self {
        CalcConfig::new(DEFAULT_MAX_DIGITS, DEFAULT_TAX_RATE)
    }
}

/// The calculator state visible to a display after each press.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub entry: String,
    pub memory: f64,
    pub grand_total: f64,
    pub is_error: bool,
    pub pending_operator: Option<Operator>,
}

/// Left-hand value and operator waiting for a second operand.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Pending {
    operand: f64,
    operator: Operator,
}

/// Desk calculator state.
#[derive(Clone, Debug)]
pub struct Calculator {
    /// Numeral being typed or the last computed result
    entry: String,
    /// Pending binary operation, if any
    pending: Option<Pending>,
    memory: f64,
    /// Sum of results produced by `=`
    grand_total: f64,
    /// Next digit starts a new number instead of extending the entry
    awaiting_fresh_entry: bool,
    /// Set while the display shows the error text
    error: Option<CalcError>,
    config: CalcConfig,
}

impl Calculator {
    pub fn new() -> Self {
        Self::with_config(CalcConfig::default())
    }

    pub fn with_config(config: CalcConfig) -> Self {
        Calculator {
            entry: "0".to_string(),
            pending: None,
            memory: 0.0,
            grand_total: 0.0,
            awaiting_fresh_entry: false,
            error: None,
            config: CalcConfig::new(config.max_digits, config.tax_rate),
        }
    }

    pub fn config(&self) -> CalcConfig {
        self.config
    }

    pub fn set_tax_rate(&mut self, tax_rate: f64) {
        self.config = CalcConfig::new(self.config.max_digits, tax_rate);
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    pub fn grand_total(&self) -> f64 {
        self.grand_total
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending.map(|p| p.operator)
    }

    pub fn pending_operand(&self) -> Option<f64> {
        self.pending.map(|p| p.operand)
    }

    pub fn is_awaiting_fresh_entry(&self) -> bool {
        self.awaiting_fresh_entry
    }

    pub fn error(&self) -> Option<CalcError> {
        self.error
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entry: self.entry.clone(),
            memory: self.memory,
            grand_total: self.grand_total,
            is_error: self.is_error(),
            pending_operator: self.pending_operator(),
        }
    }

    /// Apply a single key press.
    pub fn press(&mut self, key: Key) -> Snapshot {
        trace!(%key, entry = %self.entry, "key press");
        match key {
            Key::Digit(d) => self.press_digit(d),
            Key::Decimal => self.press_decimal(),
            Key::Operator(op) => self.press_operator(op),
            Key::Equals => self.press_equals(),
            Key::Clear => self.press_clear(),
            Key::AllClear => self.press_all_clear(),
            Key::Backspace => self.press_backspace(),
            Key::SignToggle => self.press_sign_toggle(),
            Key::Percent => self.press_percent(),
            Key::SquareRoot => self.press_square_root(),
            Key::MemoryClear => self.press_memory_clear(),
            Key::MemoryRecall => self.press_memory_recall(),
            Key::MemoryAdd => self.press_memory_add(),
            Key::MemorySubtract => self.press_memory_subtract(),
            Key::GrandTotalRecall => self.press_grand_total_recall(),
            Key::TaxAdd => self.press_tax_add(),
            Key::TaxSubtract => self.press_tax_subtract(),
        }
    }

    pub fn press_digit(&mut self, digit: u8) -> Snapshot {
        if self.is_error() || digit > 9 {
            return self.snapshot();
        }
        self.begin_entry();

        let ch = char::from(b'0' + digit);
        if self.entry == "0" {
            self.entry.clear();
            self.entry.push(ch);
        } else if digit_count(&self.entry) >= self.config.max_digits {
            trace!(entry = %self.entry, "digit limit reached");
        } else {
            self.entry.push(ch);
        }
        self.snapshot()
    }

    pub fn press_decimal(&mut self) -> Snapshot {
        if self.is_error() {
            return self.snapshot();
        }
        self.begin_entry();
        if !self.entry.contains('.') {
            self.entry.push('.');
        }
        self.snapshot()
    }

    /// Store the entry as the left operand of `operator`. If an operand was
    /// typed since the last operator, the pending operation resolves first.
    pub fn press_operator(&mut self, operator: Operator) -> Snapshot {
        let Some(value) = self.live_value() else {
            return self.snapshot();
        };

        let mut operand = value;
        if !self.awaiting_fresh_entry {
            if let Some(pending) = self.pending {
                match self.resolve(pending, value) {
                    Ok(result) => operand = result,
                    Err(err) => return self.settle(Err::<(), _>(err)),
                }
            }
        }

        self.pending = Some(Pending { operand, operator });
        self.awaiting_fresh_entry = true;
        self.snapshot()
    }

    /// Resolve the pending operation and add its result to the grand total.
    pub fn press_equals(&mut self) -> Snapshot {
        let (Some(pending), Some(rhs)) = (self.pending, self.live_value()) else {
            return self.snapshot();
        };
        let outcome = self
            .resolve(pending, rhs)
            .and_then(|result| normalize(self.grand_total + result))
            .map(|total| self.grand_total = total);
        self.settle(outcome)
    }

    /// Reset the entry only. A pending operation survives; in the error
    /// state this also leaves the error.
    pub fn press_clear(&mut self) -> Snapshot {
        if self.error.take().is_some() {
            debug!("error cleared by clear key");
            self.awaiting_fresh_entry = false;
        }
        self.entry = "0".to_string();
        self.snapshot()
    }

    /// Reset everything except memory.
    pub fn press_all_clear(&mut self) -> Snapshot {
        self.entry = "0".to_string();
        self.pending = None;
        self.awaiting_fresh_entry = false;
        self.grand_total = 0.0;
        self.error = None;
        self.snapshot()
    }

    /// Timer hook: leave the error state by performing an all-clear.
    /// Does nothing if the calculator already recovered.
    pub fn reset_after_error(&mut self) -> Snapshot {
        if self.is_error() {
            debug!("auto reset after error");
            return self.press_all_clear();
        }
        self.snapshot()
    }

    pub fn press_backspace(&mut self) -> Snapshot {
        if self.is_error() || self.awaiting_fresh_entry {
            return self.snapshot();
        }
        self.entry.pop();
        if matches!(self.entry.as_str(), "" | "-" | "-0") {
            self.entry = "0".to_string();
        }
        self.snapshot()
    }

    /// Negate the entry in place, keeping any trailing decimal point.
    pub fn press_sign_toggle(&mut self) -> Snapshot {
        let Some(value) = self.live_value() else {
            return self.snapshot();
        };
        if value != 0.0 {
            match self.entry.strip_prefix('-') {
                Some(rest) => self.entry = rest.to_string(),
                None => self.entry.insert(0, '-'),
            }
        }
        self.snapshot()
    }

    /// With a pending operation the entry becomes that percentage of the
    /// pending operand and a fresh entry is awaited; otherwise the entry is
    /// divided by 100 and stays editable.
    pub fn press_percent(&mut self) -> Snapshot {
        let Some(value) = self.live_value() else {
            return self.snapshot();
        };
        let outcome = match self.pending {
            Some(pending) => self.show_value(pending.operand * (value / 100.0)).map(|_| {
                self.awaiting_fresh_entry = true;
            }),
            None => self.show_value(value / 100.0).map(|_| ()),
        };
        self.settle(outcome)
    }

    /// Square root of the entry. Negative entries are ignored.
    pub fn press_square_root(&mut self) -> Snapshot {
        let Some(value) = self.live_value() else {
            return self.snapshot();
        };
        if value < 0.0 {
            trace!(value, "square root of negative ignored");
            return self.snapshot();
        }
        let outcome = self.show_fresh(value.sqrt());
        self.settle(outcome)
    }

    pub fn press_memory_clear(&mut self) -> Snapshot {
        if !self.is_error() {
            self.memory = 0.0;
        }
        self.snapshot()
    }

    pub fn press_memory_recall(&mut self) -> Snapshot {
        if self.is_error() {
            return self.snapshot();
        }
        let outcome = self.show_fresh(self.memory);
        self.settle(outcome)
    }

    pub fn press_memory_add(&mut self) -> Snapshot {
        self.accumulate_memory(1.0)
    }

    pub fn press_memory_subtract(&mut self) -> Snapshot {
        self.accumulate_memory(-1.0)
    }

    pub fn press_grand_total_recall(&mut self) -> Snapshot {
        if self.is_error() {
            return self.snapshot();
        }
        let outcome = self.show_fresh(self.grand_total);
        self.settle(outcome)
    }

    /// Replace the entry with the entry plus tax.
    pub fn press_tax_add(&mut self) -> Snapshot {
        let Some(value) = self.live_value() else {
            return self.snapshot();
        };
        let outcome = self.show_fresh(value * self.tax_factor());
        self.settle(outcome)
    }

    /// Replace the entry with the entry net of tax.
    pub fn press_tax_subtract(&mut self) -> Snapshot {
        let Some(value) = self.live_value() else {
            return self.snapshot();
        };
        let outcome = self.show_fresh(value / self.tax_factor());
        self.settle(outcome)
    }

    fn tax_factor(&self) -> f64 {
        1.0 + self.config.tax_rate / 100.0
    }

    fn accumulate_memory(&mut self, sign: f64) -> Snapshot {
        let Some(value) = self.live_value() else {
            return self.snapshot();
        };
        let outcome = normalize(self.memory + sign * value).map(|memory| {
            self.memory = memory;
            self.awaiting_fresh_entry = true;
        });
        self.settle(outcome)
    }

    /// Value of the entry, or `None` in the error state or if the entry
    /// does not parse.
    fn live_value(&self) -> Option<f64> {
        if self.is_error() {
            return None;
        }
        parse_entry(&self.entry)
    }

    fn begin_entry(&mut self) {
        if self.awaiting_fresh_entry {
            self.entry = "0".to_string();
            self.awaiting_fresh_entry = false;
        }
    }

    fn resolve(&mut self, pending: Pending, rhs: f64) -> Result<f64, CalcError> {
        self.pending = None;
        let result = pending.operator.apply(pending.operand, rhs)?;
        let shown = self.show_fresh(result)?;
        debug!(
            lhs = pending.operand,
            op = %pending.operator,
            rhs,
            result = shown,
            "resolved"
        );
        Ok(shown)
    }

    /// Normalize `value` and make it the entry. Returns the normalized value.
    fn show_value(&mut self, value: f64) -> Result<f64, CalcError> {
        let value = normalize(value)?;
        self.entry = value_to_entry(value);
        Ok(value)
    }

    fn show_fresh(&mut self, value: f64) -> Result<f64, CalcError> {
        let value = self.show_value(value)?;
        self.awaiting_fresh_entry = true;
        Ok(value)
    }

    fn settle<T>(&mut self, outcome: Result<T, CalcError>) -> Snapshot {
        if let Err(err) = outcome {
            debug!(error = %err, "entering error state");
            self.entry = ERROR_TEXT.to_string();
            self.pending = None;
            self.awaiting_fresh_entry = false;
            self.error = Some(err);
        }
        self.snapshot()
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
