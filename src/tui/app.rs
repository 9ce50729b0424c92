//! Application state and logic.
//!
//! [`App`] wraps a [`Session`] with the UI state around it: the current
//! [`Mode`], the tax-rate prompt buffer, the status line and the help
//! overlay. Settings changed from the UI are written back to the settings
//! file straight away.

use std::path::PathBuf;
use std::time::Instant;

use deskcalc_core::Session;
use deskcalc_engine::engine::{DisplayStyle, Key};
use tracing::{debug, warn};

use super::clipboard::{ClipboardProvider, SystemClipboard};
use super::help::help_line_count;

/// Input mode of the terminal UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Keys press calculator buttons.
    Normal,
    /// Keys edit the tax-rate prompt.
    TaxPrompt,
}

pub struct App {
    pub session: Session,
    pub mode: Mode,
    /// Text of the tax-rate prompt
    pub prompt_buffer: String,
    /// Cursor position within the prompt (byte offset)
    pub prompt_cursor: usize,
    /// Status message to display
    pub status_message: String,
    pub help_modal: bool,
    pub help_scroll: usize,
    /// Help rows visible at the last draw
    help_viewport: usize,
    /// Where settings are saved; `None` disables saving
    settings_path: Option<PathBuf>,
    clipboard: Box<dyn ClipboardProvider>,
}

impl App {
    pub fn new(session: Session, settings_path: Option<PathBuf>) -> Self {
        App {
            session,
            mode: Mode::Normal,
            prompt_buffer: String::new(),
            prompt_cursor: 0,
            status_message: String::new(),
            help_modal: false,
            help_scroll: 0,
            help_viewport: 0,
            settings_path,
            clipboard: Box::new(SystemClipboard),
        }
    }

    #[cfg(test)]
    pub(crate) fn set_clipboard(&mut self, clipboard: Box<dyn ClipboardProvider>) {
        self.clipboard = clipboard;
    }

    pub fn press(&mut self, key: Key) {
        let was_error = self.session.calculator().is_error();
        let snapshot = self.session.press(key);
        if snapshot.is_error {
            if !was_error {
                if let Some(err) = self.session.calculator().error() {
                    self.status_message = format!("Error: {}", err);
                }
            }
        } else if was_error {
            self.status_message.clear();
        }
    }

    /// Run timers. Returns true when the display changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.session.tick(now).is_some() {
            debug!("error display reset");
            self.status_message.clear();
            true
        } else {
            false
        }
    }

    pub fn toggle_theme(&mut self) {
        let theme = self.session.toggle_theme();
        self.status_message = format!("Theme: {}", theme.name());
        self.persist_settings();
    }

    pub fn toggle_display(&mut self) {
        let style = match self.session.toggle_display() {
            DisplayStyle::Segments => "segments",
            DisplayStyle::Text => "text",
        };
        self.status_message = format!("Display: {}", style);
        self.persist_settings();
    }

    pub fn open_tax_prompt(&mut self) {
        self.mode = Mode::TaxPrompt;
        self.prompt_buffer = self.session.settings().tax_rate.to_string();
        self.prompt_cursor = self.prompt_buffer.len();
        self.status_message.clear();
    }

    /// Apply the prompt. An invalid rate keeps the prompt open.
    pub fn submit_tax_prompt(&mut self) {
        let text = self.prompt_buffer.trim().trim_end_matches('%').trim();
        let rate = match text.parse::<f64>() {
            Ok(rate) => rate,
            Err(_) => {
                self.status_message = format!("Error: not a number: {}", self.prompt_buffer);
                return;
            }
        };
        if let Err(err) = self.session.set_tax_rate(rate) {
            self.status_message = format!("Error: {}", err);
            return;
        }
        self.close_prompt();
        self.status_message = format!("Tax rate set to {}%", rate);
        self.persist_settings();
    }

    pub fn close_prompt(&mut self) {
        self.mode = Mode::Normal;
        self.prompt_buffer.clear();
        self.prompt_cursor = 0;
    }

    /// Put the current entry on the clipboard, without grouping.
    pub fn copy_entry(&mut self) {
        if self.session.calculator().is_error() {
            self.status_message = "Error: nothing to copy".to_string();
            return;
        }
        let entry = self.session.calculator().entry();
        let text = entry.strip_suffix('.').unwrap_or(entry).to_string();
        if self.clipboard.set_text(text.clone()) {
            self.status_message = format!("Copied {}", text);
        } else {
            self.status_message = "Error: clipboard unavailable".to_string();
        }
    }

    pub fn open_help_modal(&mut self) {
        self.help_modal = true;
        self.help_scroll = 0;
    }

    pub fn close_help_modal(&mut self) {
        self.help_modal = false;
    }

    pub fn scroll_help_by(&mut self, delta: isize) {
        self.help_scroll = self
            .help_scroll
            .saturating_add_signed(delta)
            .min(self.max_help_scroll());
    }

    /// Record how many help rows fit on screen, keeping the scroll in range.
    pub fn set_help_viewport(&mut self, rows: usize) {
        self.help_viewport = rows;
        self.help_scroll = self.help_scroll.min(self.max_help_scroll());
    }

    fn max_help_scroll(&self) -> usize {
        help_line_count().saturating_sub(self.help_viewport)
    }

    fn persist_settings(&mut self) {
        let Some(path) = self.settings_path.as_ref() else {
            return;
        };
        if let Err(err) = self.session.settings().save(path) {
            warn!(path = %path.display(), %err, "failed to save settings");
            self.status_message = format!("Error: failed to save settings: {}", err);
        }
    }
}
