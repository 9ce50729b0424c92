//! Key and operator types, and parsing of key sequences from text.
//!
//! A key sequence is the textual form of a run of button presses, e.g.
//! `"12+3=M+GT"`. Tokens may be separated by whitespace. Recognized tokens:
//!
//! | Token | Key |
//! |---|---|
//! | `0`-`9` | digit |
//! | `.` | decimal point |
//! | `+` `-` `*` `x` `×` `/` `÷` | operators |
//! | `=` | equals |
//! | `C`, `AC` | clear entry, all clear |
//! | `BS`, `⌫` | backspace |
//! | `+/-` | sign toggle |
//! | `%`, `SQRT`, `√` | percent, square root |
//! | `MC`, `MR`, `M+`, `M-` | memory keys |
//! | `GT` | grand-total recall |
//! | `TAX+`, `TAX-` | add or remove tax |

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use super::error::{CalcError, KeyParseError};

/// A binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Apply the operator. Division by exactly zero is the only failure;
    /// a non-finite result is reported as overflow.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        let value = match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
            Operator::Div => {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                lhs / rhs
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::Overflow)
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "×",
            Operator::Div => "÷",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    Clear,
    AllClear,
    Backspace,
    SignToggle,
    Percent,
    SquareRoot,
    MemoryClear,
    MemoryRecall,
    MemoryAdd,
    MemorySubtract,
    GrandTotalRecall,
    TaxAdd,
    TaxSubtract,
}

impl Key {
    /// Short label as printed on the button.
    pub fn label(&self) -> String {
        match self {
            Key::Digit(d) => d.to_string(),
            Key::Decimal => ".".to_string(),
            Key::Operator(op) => op.symbol().to_string(),
            Key::Equals => "=".to_string(),
            Key::Clear => "C".to_string(),
            Key::AllClear => "AC".to_string(),
            Key::Backspace => "⌫".to_string(),
            Key::SignToggle => "+/-".to_string(),
            Key::Percent => "%".to_string(),
            Key::SquareRoot => "√".to_string(),
            Key::MemoryClear => "MC".to_string(),
            Key::MemoryRecall => "MR".to_string(),
            Key::MemoryAdd => "M+".to_string(),
            Key::MemorySubtract => "M-".to_string(),
            Key::GrandTotalRecall => "GT".to_string(),
            Key::TaxAdd => "TAX+".to_string(),
            Key::TaxSubtract => "TAX-".to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let upper = token.trim().to_ascii_uppercase();
        let key = match upper.as_str() {
            "." => Key::Decimal,
            "+" => Key::Operator(Operator::Add),
            "-" => Key::Operator(Operator::Sub),
            "*" | "X" | "×" => Key::Operator(Operator::Mul),
            "/" | "÷" => Key::Operator(Operator::Div),
            "=" => Key::Equals,
            "C" => Key::Clear,
            "AC" => Key::AllClear,
            "BS" | "⌫" => Key::Backspace,
            "+/-" => Key::SignToggle,
            "%" => Key::Percent,
            "SQRT" | "√" => Key::SquareRoot,
            "MC" => Key::MemoryClear,
            "MR" => Key::MemoryRecall,
            "M+" => Key::MemoryAdd,
            "M-" => Key::MemorySubtract,
            "GT" => Key::GrandTotalRecall,
            "TAX+" => Key::TaxAdd,
            "TAX-" => Key::TaxSubtract,
            s if s.len() == 1 && s.as_bytes()[0].is_ascii_digit() => {
                Key::Digit(s.as_bytes()[0] - b'0')
            }
            _ => return Err(KeyParseError::UnknownKey(token.to_string())),
        };
        Ok(key)
    }
}

fn key_token_re() -> &'static Regex {
    static KEY_RE: OnceLock<Regex> = OnceLock::new();
    KEY_RE.get_or_init(|| {
        // Longer tokens first: alternation is leftmost-first.
        Regex::new(r"(?i)TAX\+|TAX-|AC|MC|MR|M\+|M-|GT|\+/-|SQRT|BS|[√⌫×÷]|[0-9]|[.+\-*x/=%C]")
            .expect("key token regex must compile")
    })
}

/// Split a key script such as `"12+3=M+GT"` into keys.
pub fn parse_key_sequence(input: &str) -> Result<Vec<Key>, KeyParseError> {
    let mut keys = Vec::new();
    let mut cursor = 0;

    for m in key_token_re().find_iter(input) {
        check_gap(input, cursor, m.start())?;
        keys.push(m.as_str().parse()?);
        cursor = m.end();
    }
    check_gap(input, cursor, input.len())?;

    Ok(keys)
}

fn check_gap(input: &str, start: usize, end: usize) -> Result<(), KeyParseError> {
    let gap = &input[start..end];
    match gap.find(|c: char| !c.is_whitespace()) {
        None => Ok(()),
        Some(pos) => Err(KeyParseError::Unexpected {
            offset: start + pos,
            text: gap.trim().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_apply() {
        assert_eq!(Operator::Add.apply(2.0, 3.0), Ok(5.0));
        assert_eq!(Operator::Sub.apply(2.0, 3.0), Ok(-1.0));
        assert_eq!(Operator::Mul.apply(2.0, 3.0), Ok(6.0));
        assert_eq!(Operator::Div.apply(3.0, 2.0), Ok(1.5));
        assert_eq!(Operator::Div.apply(3.0, 0.0), Err(CalcError::DivisionByZero));
        assert_eq!(Operator::Mul.apply(1e308, 10.0), Err(CalcError::Overflow));
    }

    #[test]
    fn test_key_from_str() {
        assert_eq!("7".parse::<Key>(), Ok(Key::Digit(7)));
        assert_eq!("x".parse::<Key>(), Ok(Key::Operator(Operator::Mul)));
        assert_eq!("÷".parse::<Key>(), Ok(Key::Operator(Operator::Div)));
        assert_eq!("ac".parse::<Key>(), Ok(Key::AllClear));
        assert_eq!("sqrt".parse::<Key>(), Ok(Key::SquareRoot));
        assert_eq!(
            "12".parse::<Key>(),
            Err(KeyParseError::UnknownKey("12".to_string()))
        );
    }

    #[test]
    fn test_label_round_trips_through_from_str() {
        let keys = [
            Key::Digit(0),
            Key::Decimal,
            Key::Operator(Operator::Sub),
            Key::Operator(Operator::Mul),
            Key::Backspace,
            Key::SignToggle,
            Key::SquareRoot,
            Key::MemorySubtract,
            Key::TaxAdd,
        ];
        for key in keys {
            assert_eq!(key.label().parse::<Key>(), Ok(key));
        }
    }

    #[test]
    fn test_parse_key_sequence_prefers_longest_tokens() {
        let keys = parse_key_sequence("12+3=M+GT").unwrap();
        assert_eq!(
            keys,
            vec![
                Key::Digit(1),
                Key::Digit(2),
                Key::Operator(Operator::Add),
                Key::Digit(3),
                Key::Equals,
                Key::MemoryAdd,
                Key::GrandTotalRecall,
            ]
        );

        let keys = parse_key_sequence("5 +/- AC C").unwrap();
        assert_eq!(
            keys,
            vec![Key::Digit(5), Key::SignToggle, Key::AllClear, Key::Clear]
        );
    }

    #[test]
    fn test_parse_key_sequence_rejects_garbage() {
        let err = parse_key_sequence("1 + foo").unwrap_err();
        assert_eq!(
            err,
            KeyParseError::Unexpected {
                offset: 4,
                text: "foo".to_string(),
            }
        );
        assert!(parse_key_sequence("").unwrap().is_empty());
    }
}
