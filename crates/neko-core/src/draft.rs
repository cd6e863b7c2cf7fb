//! Editable input buffer with cursor and submit history.

/// The uncommitted text in the input box.
///
/// The cursor is a character index, so multi-byte input is safe to edit.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    content: String,
    cursor: usize,
    history: Vec<String>,
    /// Position while browsing history (`None` = editing the live draft).
    history_index: Option<usize>,
    /// Live draft stashed while browsing history.
    saved_input: String,
}

impl Draft {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the draft holds no text at all.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether the draft has at least one non-whitespace character.
    pub fn has_text(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Whether the content is a recalled history entry.
    pub fn browsing_history(&self) -> bool {
        self.history_index.is_some()
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_idx)
            .map_or(self.content.len(), |(i, _)| i)
    }

    /// Replace the content, placing the cursor at the end.
    pub fn set(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.cursor = self.char_len();
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Take the content, leaving the draft empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor.
    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_offset(self.cursor);
        self.content.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Insert a line break at the cursor.
    pub fn newline(&mut self) {
        self.insert('\n');
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    /// Move the cursor one character left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one character right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Move the cursor to the start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor past the last character.
    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Take the content and remember it in history if it has text.
    pub fn submit(&mut self) -> String {
        let content = self.take();
        self.remember(content.clone());
        content
    }

    /// Record a sent text in history and stop browsing.
    ///
    /// Blank text is not recorded.
    pub fn remember(&mut self, text: String) {
        if !text.trim().is_empty() {
            self.history.push(text);
        }
        self.history_index = None;
        self.saved_input.clear();
    }

    /// Step back to an older submission.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next = match self.history_index {
            None => {
                self.saved_input = self.content.clone();
                0
            }
            Some(i) if i + 1 < self.history.len() => i + 1,
            Some(_) => return,
        };
        self.history_index = Some(next);
        let entry = self.history[self.history.len() - 1 - next].clone();
        self.set(entry);
    }

    /// Step forward towards the live draft.
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(0) => {
                self.history_index = None;
                let saved = std::mem::take(&mut self.saved_input);
                self.set(saved);
            }
            Some(i) => {
                self.history_index = Some(i - 1);
                let entry = self.history[self.history.len() - i].clone();
                self.set(entry);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_basic() {
        let mut draft = Draft::new();
        assert!(draft.is_empty());

        draft.insert('H');
        draft.insert('i');
        assert_eq!(draft.content(), "Hi");
        assert_eq!(draft.cursor(), 2);

        draft.backspace();
        assert_eq!(draft.content(), "H");

        draft.clear();
        assert!(draft.is_empty());
    }

    #[test]
    fn test_cursor_movement() {
        let mut draft = Draft::new();
        draft.insert_str("Hello");

        draft.move_left();
        draft.move_left();
        assert_eq!(draft.cursor(), 3);

        draft.insert('X');
        assert_eq!(draft.content(), "HelXlo");

        draft.move_home();
        assert_eq!(draft.cursor(), 0);
        draft.move_left();
        assert_eq!(draft.cursor(), 0);

        draft.move_end();
        assert_eq!(draft.cursor(), 6);
        draft.move_right();
        assert_eq!(draft.cursor(), 6);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut draft = Draft::new();
        draft.insert_str("ñyá");
        assert_eq!(draft.cursor(), 3);

        draft.move_left();
        draft.backspace();
        assert_eq!(draft.content(), "ñá");

        draft.move_home();
        draft.delete();
        assert_eq!(draft.content(), "á");
    }

    #[test]
    fn test_newline() {
        let mut draft = Draft::new();
        draft.insert_str("line one");
        draft.newline();
        draft.insert_str("two");
        assert_eq!(draft.content(), "line one\ntwo");
    }

    #[test]
    fn test_has_text() {
        let mut draft = Draft::new();
        assert!(!draft.has_text());
        draft.set("   \n ");
        assert!(!draft.has_text());
        draft.set(" a ");
        assert!(draft.has_text());
    }

    #[test]
    fn test_history() {
        let mut draft = Draft::new();

        draft.insert_str("first");
        draft.submit();
        assert!(draft.is_empty());

        draft.insert_str("second");
        draft.submit();

        draft.insert_str("live");
        draft.history_prev();
        assert_eq!(draft.content(), "second");

        draft.history_prev();
        assert_eq!(draft.content(), "first");

        draft.history_prev();
        assert_eq!(draft.content(), "first");

        draft.history_next();
        assert_eq!(draft.content(), "second");

        draft.history_next();
        assert_eq!(draft.content(), "live");
    }

    #[test]
    fn test_whitespace_not_recorded_in_history() {
        let mut draft = Draft::new();
        draft.insert_str("   ");
        draft.submit();
        draft.history_prev();
        assert!(draft.is_empty());
    }
}
