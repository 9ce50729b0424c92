use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::io;
use std::time::{Duration, Instant};
use tracing::trace;

use super::actions::{ApplyResult, apply_action, handle_prompt_text};
use super::app::{App, Mode};
use super::keymap::translate;
use super::ui;

/// How often timers run while no input arrives.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            let frame = terminal.draw(|f| ui::draw(f, app))?;
            app.set_help_viewport(ui::help_viewport_height(frame.area));
            dirty = false;
        }

        if event::poll(TICK_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only process key press events (Windows reports Press + Release)
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    dirty = true;
                    if handle_key(app, key) == ApplyResult::Quit {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }

        if app.tick(Instant::now()) {
            dirty = true;
        }
    }
}

/// Route one key press through the help overlay, the keymap, and the prompt.
pub(crate) fn handle_key(app: &mut App, key: KeyEvent) -> ApplyResult {
    // Help modal takes over input
    if app.help_modal {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::F(1) => {
                app.close_help_modal();
            }
            KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.close_help_modal();
            }
            KeyCode::Down | KeyCode::Char('j') => app.scroll_help_by(1),
            KeyCode::Up | KeyCode::Char('k') => app.scroll_help_by(-1),
            KeyCode::PageDown => app.scroll_help_by(10),
            KeyCode::PageUp => app.scroll_help_by(-10),
            _ => {}
        }
        return ApplyResult::Continue;
    }

    trace!(?key, mode = ?app.mode, "key");
    match translate(app.mode, key) {
        Some(action) => apply_action(app, action),
        None => {
            if app.mode == Mode::TaxPrompt {
                handle_prompt_text(app, key);
            }
            ApplyResult::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskcalc_core::Session;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, text: &str) -> ApplyResult {
        let mut result = ApplyResult::Continue;
        for c in text.chars() {
            result = handle_key(app, key(KeyCode::Char(c)));
        }
        result
    }

    fn app() -> App {
        App::new(Session::default(), None)
    }

    #[test]
    fn typing_a_calculation() {
        let mut app = app();
        type_str(&mut app, "12+30");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.session.snapshot().entry, "42");
        assert_eq!(app.session.snapshot().grand_total, 42.0);
    }

    #[test]
    fn help_modal_swallows_keys() {
        let mut app = app();
        type_str(&mut app, "5?");
        assert!(app.help_modal);

        type_str(&mut app, "9");
        assert_eq!(app.session.snapshot().entry, "5");

        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.help_modal);
        // Esc closed the overlay; it did not reach the calculator.
        assert_eq!(app.session.snapshot().entry, "5");
    }

    #[test]
    fn tax_prompt_takes_text() {
        let mut app = app();
        type_str(&mut app, "t");
        assert_eq!(app.mode, Mode::TaxPrompt);

        handle_key(&mut app, key(KeyCode::Backspace));
        handle_key(&mut app, key(KeyCode::Backspace));
        // Digits edit the prompt instead of the entry.
        type_str(&mut app, "25");
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.session.settings().tax_rate, 25.0);
        assert_eq!(app.session.snapshot().entry, "0");
    }

    #[test]
    fn quit_key() {
        let mut app = app();
        assert_eq!(type_str(&mut app, "q"), ApplyResult::Quit);
    }
}
