//! Key translation for the calculator face.
//!
//! Key events become [`Action`]s here so the app never matches on raw keys.
//! Digits and operators type as written; memory keys sit on Ctrl so the
//! letters stay free for the calculator's other buttons.

use crate::tui::app::Mode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use deskcalc_engine::engine::{Key, Operator};

/// Status line text shown while no message is pending.
pub const STATUS_HINT: &str =
    "0-9 . + - * /  Enter:=  Esc:AC  t:tax rate  d:display  l:theme  y:copy  ?:help  q:quit";

/// Actions that can be triggered by key presses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Press a calculator button.
    Press(Key),
    /// Switch between the light and dark face.
    ToggleTheme,
    /// Switch between seven-segment and text display.
    ToggleDisplay,
    /// Open the tax-rate prompt.
    OpenTaxPrompt,
    /// Accept the tax-rate prompt.
    SubmitPrompt,
    /// Close the prompt without changing anything.
    Cancel,
    /// Copy the displayed value to the clipboard.
    Copy,
    /// Show the help overlay.
    Help,
    Quit,
}

/// Translate a key event for the current mode.
///
/// Returns `None` if the key has no binding in that mode.
pub fn translate(mode: Mode, key: KeyEvent) -> Option<Action> {
    match mode {
        Mode::Normal => translate_normal(key),
        Mode::TaxPrompt => translate_prompt(key),
    }
}

fn translate_normal(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('l') => Some(Action::Press(Key::MemoryClear)),
            KeyCode::Char('r') => Some(Action::Press(Key::MemoryRecall)),
            KeyCode::Char('p') => Some(Action::Press(Key::MemoryAdd)),
            KeyCode::Char('q') => Some(Action::Press(Key::MemorySubtract)),
            _ => None,
        };
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    let key = match key.code {
        KeyCode::Char(c @ '0'..='9') => Key::Digit(c as u8 - b'0'),
        KeyCode::Char('.' | ',') => Key::Decimal,
        KeyCode::Char('+') => Key::Operator(Operator::Add),
        KeyCode::Char('-') => Key::Operator(Operator::Sub),
        KeyCode::Char('*' | 'x') => Key::Operator(Operator::Mul),
        KeyCode::Char('/') => Key::Operator(Operator::Div),
        KeyCode::Char('=') | KeyCode::Enter => Key::Equals,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete | KeyCode::Char('c') => Key::Clear,
        KeyCode::Esc => Key::AllClear,
        KeyCode::Char('n') | KeyCode::F(9) => Key::SignToggle,
        KeyCode::Char('%') => Key::Percent,
        KeyCode::Char('r') => Key::SquareRoot,
        KeyCode::Char('g') => Key::GrandTotalRecall,
        KeyCode::Char(']') => Key::TaxAdd,
        KeyCode::Char('[') => Key::TaxSubtract,

        KeyCode::Char('t') => return Some(Action::OpenTaxPrompt),
        KeyCode::Char('d') => return Some(Action::ToggleDisplay),
        KeyCode::Char('l') => return Some(Action::ToggleTheme),
        KeyCode::Char('y') => return Some(Action::Copy),
        KeyCode::Char('?') | KeyCode::F(1) => return Some(Action::Help),
        KeyCode::Char('q') => return Some(Action::Quit),
        _ => return None,
    };
    Some(Action::Press(key))
}

fn translate_prompt(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('g' | 'c') if ctrl => Some(Action::Cancel),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Enter => Some(Action::SubmitPrompt),
        _ => None,
    }
}

/// Key label shown next to a button in the key legend.
///
/// Buttons whose key is their own label (digits, operators) get no hint.
pub fn hint_for(key: Key) -> Option<&'static str> {
    let hint = match key {
        Key::Digit(_) | Key::Decimal | Key::Operator(_) | Key::Percent => return None,
        Key::Equals => "Enter",
        Key::Clear => "c",
        Key::AllClear => "Esc",
        Key::Backspace => "Bksp",
        Key::SignToggle => "n",
        Key::SquareRoot => "r",
        Key::MemoryClear => "C-l",
        Key::MemoryRecall => "C-r",
        Key::MemoryAdd => "C-p",
        Key::MemorySubtract => "C-q",
        Key::GrandTotalRecall => "g",
        Key::TaxAdd => "]",
        Key::TaxSubtract => "[",
    };
    Some(hint)
}
