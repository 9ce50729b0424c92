use crossterm::event::{self, KeyCode, KeyModifiers};

use super::app::{App, Mode};
use super::keymap::Action;

/// Handle text editing operations on a buffer with UTF-8 aware cursor movement.
fn handle_text_input(buffer: &mut String, cursor: &mut usize, key: event::KeyEvent) {
    match key.code {
        KeyCode::Left => {
            if *cursor > 0 {
                let mut new_pos = *cursor - 1;
                while new_pos > 0 && !buffer.is_char_boundary(new_pos) {
                    new_pos -= 1;
                }
                *cursor = new_pos;
            }
        }
        KeyCode::Right => {
            if *cursor < buffer.len() {
                let mut new_pos = *cursor + 1;
                while new_pos < buffer.len() && !buffer.is_char_boundary(new_pos) {
                    new_pos += 1;
                }
                *cursor = new_pos;
            }
        }
        KeyCode::Home => {
            *cursor = 0;
        }
        KeyCode::End => {
            *cursor = buffer.len();
        }
        KeyCode::Backspace | KeyCode::Char('h')
            if key.code == KeyCode::Backspace || key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            if *cursor > 0 {
                let mut del_start = *cursor - 1;
                while del_start > 0 && !buffer.is_char_boundary(del_start) {
                    del_start -= 1;
                }
                buffer.drain(del_start..*cursor);
                *cursor = del_start;
            }
        }
        KeyCode::Delete => {
            if *cursor < buffer.len() {
                let mut del_end = *cursor + 1;
                while del_end < buffer.len() && !buffer.is_char_boundary(del_end) {
                    del_end += 1;
                }
                buffer.drain(*cursor..del_end);
            }
        }
        KeyCode::Char(c) => {
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                buffer.insert(*cursor, c);
                *cursor += c.len_utf8();
            }
        }
        _ => {}
    }
}

/// Result of applying an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyResult {
    Continue,
    Quit,
}

/// Apply an action to the application state.
///
/// Returns `ApplyResult::Quit` if the application should exit.
pub fn apply_action(app: &mut App, action: Action) -> ApplyResult {
    match action {
        Action::Press(key) => app.press(key),
        Action::ToggleTheme => app.toggle_theme(),
        Action::ToggleDisplay => app.toggle_display(),
        Action::OpenTaxPrompt => app.open_tax_prompt(),
        Action::SubmitPrompt => {
            if app.mode == Mode::TaxPrompt {
                app.submit_tax_prompt();
            }
        }
        Action::Cancel => {
            if app.mode == Mode::TaxPrompt {
                app.close_prompt();
                app.status_message.clear();
            }
        }
        Action::Copy => app.copy_entry(),
        Action::Help => app.open_help_modal(),
        Action::Quit => return ApplyResult::Quit,
    }
    ApplyResult::Continue
}

pub fn handle_prompt_text(app: &mut App, key: event::KeyEvent) {
    handle_text_input(&mut app.prompt_buffer, &mut app.prompt_cursor, key);
}
