//! deskcalc_engine - Desk calculator state machine and display formatting.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;

    fn press_all(calc: &mut Calculator, script: &str) -> Snapshot {
        let mut snapshot = calc.snapshot();
        for key in parse_key_sequence(script).unwrap() {
            snapshot = calc.press(key);
        }
        snapshot
    }

    fn run(script: &str) -> Calculator {
        let mut calc = Calculator::new();
        press_all(&mut calc, script);
        calc
    }

    #[test]
    fn test_initial_state() {
        let calc = Calculator::new();
        let snapshot = calc.snapshot();
        assert_eq!(snapshot.entry, "0");
        assert_eq!(snapshot.memory, 0.0);
        assert_eq!(snapshot.grand_total, 0.0);
        assert!(!snapshot.is_error);
        assert_eq!(snapshot.pending_operator, None);
        assert!(!calc.is_awaiting_fresh_entry());
    }

    #[test]
    fn test_leading_point_counts_implied_zero() {
        // ".0000..." shows as "0.000..." and the shown zero uses a digit slot.
        assert_eq!(run(".00000000000000").entry(), "0.0000000000000");
        assert_eq!(run(".0000000000000").entry(), "0.0000000000000");
    }

    #[test]
    fn test_typing_collapses_leading_zero() {
        assert_eq!(run("123").entry(), "123");
        assert_eq!(run("007").entry(), "7");
        assert_eq!(run("0").entry(), "0");
        assert_eq!(run(".5").entry(), "0.5");
        assert_eq!(run("1.2.3").entry(), "1.23");
    }

    #[test]
    fn test_digit_limit_excludes_sign_and_point() {
        let calc = run("12345678901234567");
        assert_eq!(calc.entry(), "12345678901234");

        let calc = run("1234567890123.456");
        assert_eq!(calc.entry(), "1234567890123.4");

        let mut calc = run("1234567890123 +/-");
        press_all(&mut calc, "4 5");
        assert_eq!(calc.entry(), "-12345678901234");
    }

    #[test]
    fn test_simple_addition_feeds_grand_total() {
        let snapshot = run("1+2=").snapshot();
        assert_eq!(snapshot.entry, "3");
        assert_eq!(snapshot.grand_total, 3.0);
    }

    #[test]
    fn test_chaining_is_left_to_right() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "2+3+");
        assert_eq!(calc.entry(), "5");
        assert_eq!(calc.grand_total(), 0.0);

        press_all(&mut calc, "4=");
        assert_eq!(calc.entry(), "9");
        assert_eq!(calc.grand_total(), 9.0);

        assert_eq!(run("2+3*4=").entry(), "20");
    }

    #[test]
    fn test_repeated_operator_replaces_pending() {
        let calc = run("2+*3=");
        assert_eq!(calc.entry(), "6");
    }

    #[test]
    fn test_pending_operator_and_operand_travel_together() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "5+");
        assert_eq!(calc.pending_operator(), Some(Operator::Add));
        assert_eq!(calc.pending_operand(), Some(5.0));
        assert!(calc.is_awaiting_fresh_entry());

        press_all(&mut calc, "1=");
        assert_eq!(calc.pending_operator(), None);
        assert_eq!(calc.pending_operand(), None);
    }

    #[test]
    fn test_equals_without_pending_is_noop() {
        let calc = run("42=");
        assert_eq!(calc.entry(), "42");
        assert_eq!(calc.grand_total(), 0.0);
    }

    #[test]
    fn test_division_by_zero_enters_error_state() {
        let mut calc = Calculator::new();
        let snapshot = press_all(&mut calc, "5/0=");
        assert!(snapshot.is_error);
        assert_eq!(snapshot.entry, ERROR_TEXT);
        assert_eq!(calc.error(), Some(CalcError::DivisionByZero));
        assert_eq!(snapshot.pending_operator, None);

        let snapshot = press_all(&mut calc, "7+.=");
        assert!(snapshot.is_error);
        assert_eq!(snapshot.entry, ERROR_TEXT);

        let snapshot = calc.reset_after_error();
        assert!(!snapshot.is_error);
        assert_eq!(snapshot.entry, "0");
    }

    #[test]
    fn test_division_by_zero_while_chaining() {
        let calc = run("8/0+");
        assert!(calc.is_error());
    }

    #[test]
    fn test_reset_after_error_ignored_when_not_in_error() {
        let mut calc = run("1+2=");
        let snapshot = calc.reset_after_error();
        assert_eq!(snapshot.entry, "3");
        assert_eq!(snapshot.grand_total, 3.0);
    }

    #[test]
    fn test_overflow_enters_error_state() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "99999999999999");
        for _ in 0..30 {
            press_all(&mut calc, "* 99999999999999");
        }
        press_all(&mut calc, "=");
        assert!(calc.is_error());
        assert_eq!(calc.error(), Some(CalcError::Overflow));
    }

    #[test]
    fn test_all_clear_keeps_memory() {
        let mut calc = run("7M+ 1+2=");
        assert_eq!(calc.grand_total(), 3.0);

        let snapshot = calc.press_all_clear();
        assert_eq!(snapshot.entry, "0");
        assert_eq!(snapshot.grand_total, 0.0);
        assert_eq!(snapshot.memory, 7.0);
        assert_eq!(snapshot.pending_operator, None);
    }

    #[test]
    fn test_clear_keeps_pending_and_memory() {
        let mut calc = run("9M+ 5+3");
        let snapshot = calc.press_clear();
        assert_eq!(snapshot.entry, "0");
        assert_eq!(snapshot.pending_operator, Some(Operator::Add));
        assert_eq!(snapshot.memory, 9.0);

        press_all(&mut calc, "4=");
        assert_eq!(calc.entry(), "9");
    }

    #[test]
    fn test_clear_leaves_error_state() {
        let mut calc = run("1+2= 5/0=");
        let snapshot = calc.press_clear();
        assert!(!snapshot.is_error);
        assert_eq!(snapshot.entry, "0");
        assert_eq!(snapshot.grand_total, 3.0);
    }

    #[test]
    fn test_backspace() {
        assert_eq!(run("123 BS").entry(), "12");
        assert_eq!(run("12 BS BS BS").entry(), "0");
        assert_eq!(run("1.5 BS").entry(), "1.");
        assert_eq!(run("5 +/- BS").entry(), "0");
        assert_eq!(run("0.5 +/- BS BS").entry(), "0");
        // Results are not editable.
        assert_eq!(run("12+3= BS").entry(), "15");
    }

    #[test]
    fn test_sign_toggle() {
        assert_eq!(run("5 +/-").entry(), "-5");
        assert_eq!(run("5 +/- +/-").entry(), "5");
        assert_eq!(run("+/-").entry(), "0");
        assert_eq!(run("12. +/-").entry(), "-12.");
        assert_eq!(run("3-5=").entry(), "-2");
        assert_eq!(run("3-5= +/-").entry(), "2");
    }

    #[test]
    fn test_percent_of_pending_operand() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "200+10%");
        assert_eq!(calc.entry(), "20");
        assert!(calc.is_awaiting_fresh_entry());

        press_all(&mut calc, "=");
        assert_eq!(calc.entry(), "220");
        assert_eq!(calc.grand_total(), 220.0);
    }

    #[test]
    fn test_bare_percent_stays_editable() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "50%");
        assert_eq!(calc.entry(), "0.5");
        assert!(!calc.is_awaiting_fresh_entry());
    }

    #[test]
    fn test_square_root() {
        let mut calc = run("9 sqrt");
        assert_eq!(calc.entry(), "3");
        assert!(calc.is_awaiting_fresh_entry());
        press_all(&mut calc, "4");
        assert_eq!(calc.entry(), "4");

        let calc = run("9 +/- sqrt");
        assert_eq!(calc.entry(), "-9");
        assert!(!calc.is_error());

        assert_eq!(run("2 sqrt").entry(), "1.4142135623731");
    }

    #[test]
    fn test_memory_registers() {
        let mut calc = run("5 M+ 3 M+");
        assert_eq!(calc.memory(), 8.0);

        press_all(&mut calc, "2 M- MR");
        assert_eq!(calc.entry(), "6");
        assert!(calc.is_awaiting_fresh_entry());

        press_all(&mut calc, "MC");
        assert_eq!(calc.memory(), 0.0);
        assert_eq!(calc.entry(), "6");
    }

    #[test]
    fn test_memory_add_starts_fresh_entry() {
        let calc = run("5 M+ 7");
        assert_eq!(calc.entry(), "7");
    }

    #[test]
    fn test_grand_total_counts_only_equals() {
        let mut calc = run("1+2= 3+4=");
        assert_eq!(calc.grand_total(), 10.0);

        press_all(&mut calc, "GT");
        assert_eq!(calc.entry(), "10");
        assert!(calc.is_awaiting_fresh_entry());

        let calc = run("1+2+3+");
        assert_eq!(calc.grand_total(), 0.0);
    }

    #[test]
    fn test_results_are_normalized() {
        assert_eq!(run(".1+.2=").entry(), "0.3");
        assert_eq!(run("1/3=").entry(), "0.333333333333333");
        assert_eq!(run("5-5=").entry(), "0");
    }

    #[test]
    fn test_tax_keys() {
        let mut calc = Calculator::with_config(CalcConfig::new(14, 10.0));
        press_all(&mut calc, "100 TAX+");
        assert_eq!(calc.entry(), "110");
        press_all(&mut calc, "TAX-");
        assert_eq!(calc.entry(), "100");

        calc.set_tax_rate(-3.0);
        assert_eq!(calc.config().tax_rate, 0.0);
    }

    #[test]
    fn test_config_clamps_digits() {
        assert_eq!(CalcConfig::new(0, 5.0).max_digits, 1);
        assert_eq!(CalcConfig::new(99, 5.0).max_digits, MAX_SUPPORTED_DIGITS);

        let mut calc = Calculator::with_config(CalcConfig::new(3, 0.0));
        press_all(&mut calc, "12345");
        assert_eq!(calc.entry(), "123");
    }

    #[test]
    fn test_snapshot_feeds_formatter() {
        let snapshot = run("1234567").snapshot();
        assert_eq!(format_text(&snapshot.entry, DEFAULT_MAX_DIGITS), "1,234,567");

        let snapshot = run("5/0=").snapshot();
        let cells = layout_cells(&snapshot.entry, DEFAULT_MAX_DIGITS);
        let text: String = cells.iter().map(|c| c.glyph).collect();
        assert_eq!(text.trim_start(), "Error");
    }
}
