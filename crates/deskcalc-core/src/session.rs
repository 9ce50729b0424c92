//! A running calculator: engine state, settings, and the error timer.
//!
//! The engine only knows that it is in the error state. The session records
//! when that happened and, once the configured delay has passed, `tick`
//! performs the automatic reset.

use std::time::Instant;

use tracing::debug;

use deskcalc_engine::engine::{
    Calculator, DisplayStyle, FormattedOutput, Key, Snapshot, format, format_text,
};

use crate::error::Result;
use crate::settings::{Settings, Theme, validate_tax_rate};

pub struct Session {
    calculator: Calculator,
    settings: Settings,
    /// When the error display resets itself
    error_deadline: Option<Instant>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Session {
            calculator: Calculator::with_config(settings.calc_config()),
            settings,
            error_deadline: None,
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn snapshot(&self) -> Snapshot {
        self.calculator.snapshot()
    }

    pub fn error_deadline(&self) -> Option<Instant> {
        self.error_deadline
    }

    pub fn press(&mut self, key: Key) -> Snapshot {
        self.press_at(key, Instant::now())
    }

    /// Apply a key pressed at `now`. Entering the error state arms the
    /// reset timer; leaving it disarms the timer.
    pub fn press_at(&mut self, key: Key, now: Instant) -> Snapshot {
        let snapshot = self.calculator.press(key);
        if snapshot.is_error {
            if self.error_deadline.is_none() {
                let deadline = now + self.settings.error_reset_delay();
                debug!(?key, "error timer armed");
                self.error_deadline = Some(deadline);
            }
        } else {
            self.error_deadline = None;
        }
        snapshot
    }

    /// Apply keys in order and return the final snapshot.
    pub fn press_all(&mut self, keys: &[Key]) -> Snapshot {
        let mut snapshot = self.snapshot();
        for &key in keys {
            snapshot = self.press(key);
        }
        snapshot
    }

    /// Fire the error reset if its deadline has passed. Returns the new
    /// snapshot when a reset happened.
    pub fn tick(&mut self, now: Instant) -> Option<Snapshot> {
        let deadline = self.error_deadline?;
        if now < deadline {
            return None;
        }
        self.error_deadline = None;
        Some(self.calculator.reset_after_error())
    }

    /// The display contents for the configured style.
    pub fn display(&self) -> FormattedOutput {
        format(
            self.calculator.entry(),
            self.settings.max_digits,
            self.settings.display,
        )
    }

    /// The display contents as plain text, whatever the configured style.
    pub fn display_text(&self) -> String {
        format_text(self.calculator.entry(), self.settings.max_digits)
    }

    pub fn set_tax_rate(&mut self, rate: f64) -> Result<()> {
        validate_tax_rate(rate)?;
        self.settings.tax_rate = rate;
        self.calculator.set_tax_rate(rate);
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.settings.theme = self.settings.theme.toggled();
        self.settings.theme
    }

    pub fn toggle_display(&mut self) -> DisplayStyle {
        self.settings.display = self.settings.display.toggled();
        self.settings.display
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskcalc_engine::engine::{DisplayCell, Operator, parse_key_sequence};
    use std::time::Duration;

    fn keys(script: &str) -> Vec<Key> {
        parse_key_sequence(script).unwrap()
    }

    #[test]
    fn test_error_resets_after_delay() {
        let mut session = Session::default();
        let start = Instant::now();
        for key in keys("1+2= 5/0") {
            session.press_at(key, start);
        }
        let snapshot = session.press_at(Key::Equals, start);
        assert!(snapshot.is_error);
        assert_eq!(session.error_deadline(), Some(start + Duration::from_millis(1500)));

        // Input is ignored and does not re-arm the timer.
        session.press_at(Key::Digit(4), start + Duration::from_millis(100));
        assert_eq!(session.error_deadline(), Some(start + Duration::from_millis(1500)));

        assert!(session.tick(start + Duration::from_millis(1499)).is_none());
        let snapshot = session.tick(start + Duration::from_millis(1500)).unwrap();
        assert!(!snapshot.is_error);
        assert_eq!(snapshot.entry, "0");
        assert_eq!(snapshot.grand_total, 0.0);
        assert!(session.error_deadline().is_none());
    }

    #[test]
    fn test_manual_clear_disarms_timer() {
        let mut session = Session::default();
        session.press_all(&keys("5/0="));
        assert!(session.error_deadline().is_some());

        session.press(Key::Clear);
        assert!(session.error_deadline().is_none());
        assert!(session.tick(Instant::now() + Duration::from_secs(10)).is_none());
    }

    #[test]
    fn test_display_follows_settings() {
        let mut session = Session::default();
        session.press_all(&keys("1234567"));

        match session.display() {
            FormattedOutput::Cells(cells) => {
                assert_eq!(cells.len(), 14);
                assert_eq!(cells[7], DisplayCell::from_value("1,"));
            }
            other => panic!("expected cells, got {other:?}"),
        }

        assert_eq!(session.toggle_display(), DisplayStyle::Text);
        assert_eq!(
            session.display(),
            FormattedOutput::Text("1,234,567".to_string())
        );
        assert_eq!(session.display_text(), "1,234,567");
    }

    #[test]
    fn test_settings_shape_the_engine() {
        let settings = Settings {
            max_digits: 4,
            tax_rate: 5.0,
            ..Settings::default()
        };
        let mut session = Session::new(settings);
        session.press_all(&keys("123456"));
        assert_eq!(session.snapshot().entry, "1234");

        session.press_all(&keys("AC 200 TAX+"));
        assert_eq!(session.snapshot().entry, "210");
    }

    #[test]
    fn test_set_tax_rate() {
        let mut session = Session::default();
        assert!(session.set_tax_rate(-1.0).is_err());
        assert_eq!(session.settings().tax_rate, 10.0);

        session.set_tax_rate(20.0).unwrap();
        session.press_all(&keys("50 TAX+"));
        assert_eq!(session.snapshot().entry, "60");
    }

    #[test]
    fn test_toggle_theme() {
        let mut session = Session::default();
        assert_eq!(session.toggle_theme(), Theme::Dark);
        assert_eq!(session.toggle_theme(), Theme::Light);
    }

    #[test]
    fn test_pending_operator_in_snapshot() {
        let mut session = Session::default();
        let snapshot = session.press_all(&keys("8 x"));
        assert_eq!(snapshot.pending_operator, Some(Operator::Mul));
    }
}
