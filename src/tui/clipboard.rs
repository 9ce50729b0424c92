//! Clipboard abstraction

/// Where copied values go.
pub trait ClipboardProvider {
    /// Returns false when the text could not be placed on the clipboard.
    fn set_text(&mut self, text: String) -> bool;
}

/// System clipboard implementation using arboard.
pub struct SystemClipboard;

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: String) -> bool {
        let mut cb = match arboard::Clipboard::new() {
            Ok(cb) => cb,
            Err(_) => return false,
        };
        cb.set_text(text).is_ok()
    }
}

/// Clipboard that records copied text, shared with the test that made it.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct RecordingClipboard {
    pub copied: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
}

#[cfg(test)]
impl ClipboardProvider for RecordingClipboard {
    fn set_text(&mut self, text: String) -> bool {
        self.copied.borrow_mut().push(text);
        true
    }
}
