//! Event handling for the chat TUI.

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::app::{Destination, Focus};

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// A tick event for UI updates.
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Event handler that runs in a background thread.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // crossterm polling is blocking, keep it off the runtime
        std::thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                if let Ok(evt) = event::read() {
                    let event = match evt {
                        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                            Some(Event::Key(key))
                        }
                        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                        _ => None,
                    };
                    if let Some(e) = event {
                        if tx_clone.send(e).is_err() {
                            break;
                        }
                    }
                }
            } else if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event, waiting until one is available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Something the user asked the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the app.
    Quit,
    /// Open the key binding overlay.
    Help,
    /// Show or hide the session sidebar.
    ToggleSidebar,
    /// Flip between All and Favorites.
    SwitchTab,
    /// Move focus between input and transcript.
    ToggleFocus,
    /// Return from the transcript to the input.
    Back,
    /// Send the draft.
    Submit,
    /// Line break in the draft.
    Newline,
    /// Type a character.
    Insert(char),
    Backspace,
    Delete,
    /// Cursor left.
    Left,
    /// Cursor right.
    Right,
    /// Start of draft, or first reply in the transcript.
    Home,
    /// End of draft, or last reply in the transcript.
    End,
    /// History back, or previous reply.
    Up,
    /// History forward, or next reply.
    Down,
    PageUp,
    PageDown,
    /// Thumbs up on the selected reply.
    RateUp,
    /// Thumbs down on the selected reply.
    RateDown,
    /// Copy the selected reply.
    Copy,
    /// Press a navigation button.
    Open(Destination),
    /// Key has no binding.
    None,
}

/// Convert a key event to an action for the focused area.
pub fn key_to_action(key: KeyEvent, focus: Focus) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('b') => Action::ToggleSidebar,
            KeyCode::Char('t') => Action::SwitchTab,
            KeyCode::Char('h') => Action::Help,
            // Many terminals send Ctrl+Enter as Ctrl+J
            KeyCode::Char('j') | KeyCode::Enter => Action::Newline,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::F(1) => return Action::Help,
        KeyCode::F(5) => return Action::Open(Destination::Games),
        KeyCode::F(6) => return Action::Open(Destination::Shorts),
        KeyCode::Tab | KeyCode::BackTab => return Action::ToggleFocus,
        KeyCode::PageUp => return Action::PageUp,
        KeyCode::PageDown => return Action::PageDown,
        _ => {}
    }

    match focus {
        Focus::Input => input_action(key),
        Focus::Transcript => transcript_action(key),
    }
}

fn input_action(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter
            if key
                .modifiers
                .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
        {
            Action::Newline
        }
        KeyCode::Enter => Action::Submit,
        KeyCode::Esc => Action::Quit,
        KeyCode::Char(c) => Action::Insert(c),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Left => Action::Left,
        KeyCode::Right => Action::Right,
        KeyCode::Home => Action::Home,
        KeyCode::End => Action::End,
        KeyCode::Up => Action::Up,
        KeyCode::Down => Action::Down,
        _ => Action::None,
    }
}

fn transcript_action(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::Help,
        KeyCode::Esc => Action::Back,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::Char('+') => Action::RateUp,
        KeyCode::Char('-') => Action::RateDown,
        KeyCode::Char('y') => Action::Copy,
        KeyCode::Home | KeyCode::Char('g') => Action::Home,
        KeyCode::End | KeyCode::Char('G') => Action::End,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_enter_submits_and_shift_enter_breaks_line() {
        assert_eq!(key_to_action(key(KeyCode::Enter), Focus::Input), Action::Submit);
        assert_eq!(
            key_to_action(key_with(KeyCode::Enter, KeyModifiers::SHIFT), Focus::Input),
            Action::Newline
        );
        assert_eq!(
            key_to_action(key_with(KeyCode::Enter, KeyModifiers::ALT), Focus::Input),
            Action::Newline
        );
        assert_eq!(
            key_to_action(key_with(KeyCode::Char('j'), KeyModifiers::CONTROL), Focus::Input),
            Action::Newline
        );
    }

    #[test]
    fn test_typing_goes_to_input() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('q')), Focus::Input),
            Action::Insert('q')
        );
        assert_eq!(
            key_to_action(key_with(KeyCode::Char('Q'), KeyModifiers::SHIFT), Focus::Input),
            Action::Insert('Q')
        );
    }

    #[test]
    fn test_transcript_keys() {
        assert_eq!(key_to_action(key(KeyCode::Char('q')), Focus::Transcript), Action::Quit);
        assert_eq!(key_to_action(key(KeyCode::Char('k')), Focus::Transcript), Action::Up);
        assert_eq!(key_to_action(key(KeyCode::Char('y')), Focus::Transcript), Action::Copy);
        assert_eq!(key_to_action(key(KeyCode::Char('+')), Focus::Transcript), Action::RateUp);
        assert_eq!(key_to_action(key(KeyCode::Esc), Focus::Transcript), Action::Back);
    }

    #[test]
    fn test_global_keys() {
        for focus in [Focus::Input, Focus::Transcript] {
            assert_eq!(
                key_to_action(key_with(KeyCode::Char('c'), KeyModifiers::CONTROL), focus),
                Action::Quit
            );
            assert_eq!(
                key_to_action(key_with(KeyCode::Char('b'), KeyModifiers::CONTROL), focus),
                Action::ToggleSidebar
            );
            assert_eq!(key_to_action(key(KeyCode::F(1)), focus), Action::Help);
            assert_eq!(
                key_to_action(key(KeyCode::F(6)), focus),
                Action::Open(Destination::Shorts)
            );
            assert_eq!(key_to_action(key(KeyCode::Tab), focus), Action::ToggleFocus);
        }
    }

    #[test]
    fn test_unknown_ctrl_chord_is_ignored() {
        assert_eq!(
            key_to_action(key_with(KeyCode::Char('z'), KeyModifiers::CONTROL), Focus::Input),
            Action::None
        );
    }
}
