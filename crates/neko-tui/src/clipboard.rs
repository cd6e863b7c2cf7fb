//! Clipboard access for copying messages and links.

use std::fmt;

/// Errors that can occur when copying to the clipboard.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// No clipboard could be opened (e.g. no display server).
    #[error("clipboard unavailable: {0}")]
    Unavailable(#[source] arboard::Error),

    /// The clipboard refused the text.
    #[error("could not set clipboard text: {0}")]
    Write(#[source] arboard::Error),
}

/// Somewhere copied text can go.
pub trait ClipboardSink: fmt::Debug {
    /// Place `text` on the clipboard.
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard via arboard.
///
/// The connection is opened lazily so headless environments only fail when
/// something is actually copied.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("connected", &self.inner.is_some())
            .finish()
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(ClipboardError::Unavailable)?,
        };
        let result = clipboard.set_text(text).map_err(ClipboardError::Write);
        self.inner = Some(clipboard);
        result
    }
}

/// In-memory clipboard for tests.
///
/// Clones share the same contents, so a test can keep one handle while the
/// app owns another.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
    fail: bool,
}

#[cfg(test)]
impl MemoryClipboard {
    /// A clipboard whose every copy fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Everything copied so far, oldest first.
    pub fn contents(&self) -> Vec<String> {
        self.contents.borrow().clone()
    }
}

#[cfg(test)]
impl ClipboardSink for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Unavailable(
                arboard::Error::ClipboardNotSupported,
            ));
        }
        self.contents.borrow_mut().push(text.to_string());
        Ok(())
    }
}
