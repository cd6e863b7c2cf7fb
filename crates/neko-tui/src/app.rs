//! Application state and update logic for the chat TUI.

use std::cell::Cell;
use std::collections::HashMap;

use neko_core::{seed, ChatConfig, ChatSession, ConversationStore, ReplyTicket};
use tracing::{debug, info};

use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::event::Action;
use crate::theme::Theme;

/// Lines scrolled per PageUp/PageDown.
const PAGE_LINES: u16 = 10;

/// Lines scrolled per mouse wheel step.
pub const WHEEL_LINES: u16 = 3;

/// Which part of the screen receives typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Transcript,
}

/// Sidebar session filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarTab {
    #[default]
    All,
    Favorites,
}

impl SidebarTab {
    fn toggle(self) -> Self {
        match self {
            Self::All => Self::Favorites,
            Self::Favorites => Self::All,
        }
    }
}

/// Thumbs up / thumbs down on an assistant message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Up,
    Down,
}

/// Navigation buttons under the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Games,
    Shorts,
}

impl Destination {
    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Games => "Play Games",
            Self::Shorts => "Watch Shorts",
        }
    }

    /// Key that activates the button.
    pub fn key(self) -> &'static str {
        match self {
            Self::Games => "F5",
            Self::Shorts => "F6",
        }
    }
}

/// Size of the transcript as last drawn, used to bound scrolling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranscriptMetrics {
    pub total_lines: usize,
    pub viewport: u16,
}

impl TranscriptMetrics {
    /// Furthest the view can be scrolled back from the bottom.
    pub fn max_scroll_back(self) -> u16 {
        let hidden = self.total_lines.saturating_sub(usize::from(self.viewport));
        u16::try_from(hidden).unwrap_or(u16::MAX)
    }
}

/// The whole UI state.
#[derive(Debug)]
pub struct App {
    /// Messages and the input draft.
    pub store: ConversationStore,
    /// Sidebar entries.
    pub sessions: Vec<ChatSession>,
    /// Loaded configuration.
    pub config: ChatConfig,
    /// Active palette.
    pub theme: Theme,
    /// Keyboard focus.
    pub focus: Focus,
    /// Whether the sidebar is shown.
    pub sidebar_open: bool,
    /// Sidebar filter tab.
    pub sidebar_tab: SidebarTab,
    /// Lines scrolled up from the newest message (0 = pinned to bottom).
    pub scroll_back: u16,
    /// Selected message index (transcript focus only).
    pub selected: Option<usize>,
    /// Ratings keyed by message id.
    pub feedback: HashMap<String, Feedback>,
    /// One-line status message.
    pub notice: Option<String>,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Should the app quit?
    pub should_quit: bool,
    /// Transcript size from the last render.
    pub transcript_metrics: Cell<TranscriptMetrics>,
    clipboard: Box<dyn ClipboardSink>,
}

impl App {
    /// Create the app with the seeded conversation.
    pub fn new(config: ChatConfig) -> Self {
        let store = ConversationStore::seeded().with_canned_reply(config.canned_reply.clone());
        Self::with_store(config, store)
    }

    /// Create the app around an existing store.
    pub fn with_store(config: ChatConfig, store: ConversationStore) -> Self {
        Self {
            store,
            sessions: seed::sessions(),
            theme: Theme::from_choice(config.theme),
            config,
            focus: Focus::Input,
            sidebar_open: false,
            sidebar_tab: SidebarTab::All,
            scroll_back: 0,
            selected: None,
            feedback: HashMap::new(),
            notice: None,
            show_help: false,
            should_quit: false,
            transcript_metrics: Cell::new(TranscriptMetrics::default()),
            clipboard: Box::new(SystemClipboard::default()),
        }
    }

    /// Swap the clipboard backend.
    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardSink>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Sessions visible under the current sidebar tab.
    pub fn visible_sessions(&self) -> Vec<&ChatSession> {
        self.sessions
            .iter()
            .filter(|s| self.sidebar_tab == SidebarTab::All || s.favorite)
            .collect()
    }

    /// Handle an action. Returns a ticket when a message was submitted.
    pub fn handle_action(&mut self, action: Action) -> Option<ReplyTicket> {
        if self.show_help {
            // Any key closes help; quitting still works.
            self.show_help = false;
            if action == Action::Quit {
                self.should_quit = true;
            }
            return None;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::Help => self.show_help = true,
            Action::ToggleSidebar => self.sidebar_open = !self.sidebar_open,
            Action::SwitchTab => {
                if self.sidebar_open {
                    self.sidebar_tab = self.sidebar_tab.toggle();
                }
            }
            Action::ToggleFocus => self.toggle_focus(),
            Action::Back => {
                self.focus = Focus::Input;
                self.selected = None;
            }
            Action::Submit => return self.submit(),
            Action::Newline => self.store.draft_mut().newline(),
            Action::Insert(c) => self.store.draft_mut().insert(c),
            Action::Backspace => self.store.draft_mut().backspace(),
            Action::Delete => self.store.draft_mut().delete(),
            Action::Left => self.store.draft_mut().move_left(),
            Action::Right => self.store.draft_mut().move_right(),
            Action::Home => match self.focus {
                Focus::Input => self.store.draft_mut().move_home(),
                Focus::Transcript => self.select_first(),
            },
            Action::End => match self.focus {
                Focus::Input => self.store.draft_mut().move_end(),
                Focus::Transcript => self.select_last(),
            },
            Action::Up => self.up(),
            Action::Down => self.down(),
            Action::PageUp => self.scroll_up(PAGE_LINES),
            Action::PageDown => self.scroll_down(PAGE_LINES),
            Action::RateUp => self.rate(Feedback::Up),
            Action::RateDown => self.rate(Feedback::Down),
            Action::Copy => self.copy_selected(),
            Action::Open(destination) => self.open(destination),
            Action::None => {}
        }
        None
    }

    /// Submit the draft if it has text.
    pub fn submit(&mut self) -> Option<ReplyTicket> {
        let ticket = self.store.submit()?;
        self.scroll_back = 0;
        self.notice = None;
        Some(ticket)
    }

    /// Append the simulated reply for a fired timer.
    pub fn deliver_reply(&mut self, ticket: &ReplyTicket) {
        if self.store.deliver_reply(ticket).is_some() {
            self.scroll_back = 0;
        }
    }

    /// Scroll towards older messages.
    pub fn scroll_up(&mut self, lines: u16) {
        let max = self.transcript_metrics.get().max_scroll_back();
        self.scroll_back = self.scroll_back.saturating_add(lines).min(max);
    }

    /// Scroll towards newer messages.
    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    fn toggle_focus(&mut self) {
        match self.focus {
            Focus::Input => {
                self.focus = Focus::Transcript;
                self.select_last();
            }
            Focus::Transcript => {
                self.focus = Focus::Input;
                self.selected = None;
            }
        }
    }

    fn up(&mut self) {
        match self.focus {
            Focus::Input => {
                if self.store.draft().is_empty() || self.in_history() {
                    self.store.draft_mut().history_prev();
                } else {
                    self.scroll_up(1);
                }
            }
            Focus::Transcript => self.select_step(-1),
        }
    }

    fn down(&mut self) {
        match self.focus {
            Focus::Input => {
                if self.in_history() {
                    self.store.draft_mut().history_next();
                } else {
                    self.scroll_down(1);
                }
            }
            Focus::Transcript => self.select_step(1),
        }
    }

    /// Whether the draft currently shows a recalled history entry.
    fn in_history(&self) -> bool {
        self.store.draft().browsing_history()
    }

    fn assistant_indices(&self) -> Vec<usize> {
        self.store
            .messages()
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_assistant())
            .map(|(i, _)| i)
            .collect()
    }

    fn select_first(&mut self) {
        self.selected = self.assistant_indices().first().copied();
    }

    fn select_last(&mut self) {
        self.selected = self.assistant_indices().last().copied();
    }

    fn select_step(&mut self, step: isize) {
        let indices = self.assistant_indices();
        if indices.is_empty() {
            self.selected = None;
            return;
        }
        let pos = self
            .selected
            .and_then(|s| indices.iter().position(|&i| i == s))
            .unwrap_or(indices.len() - 1);
        let next = pos
            .checked_add_signed(step)
            .unwrap_or(0)
            .min(indices.len() - 1);
        self.selected = Some(indices[next]);
    }

    fn selected_message_id(&self) -> Option<String> {
        let index = self.selected?;
        self.store.messages().get(index).map(|m| m.id.clone())
    }

    /// Set or clear a rating on the selected message.
    fn rate(&mut self, feedback: Feedback) {
        let Some(id) = self.selected_message_id() else {
            return;
        };
        if self.feedback.get(&id) == Some(&feedback) {
            self.feedback.remove(&id);
            debug!(id = %id, "feedback cleared");
        } else {
            self.feedback.insert(id.clone(), feedback);
            debug!(id = %id, ?feedback, "feedback recorded");
        }
    }

    fn copy_selected(&mut self) {
        let Some(text) = self
            .selected
            .and_then(|i| self.store.messages().get(i))
            .map(|m| m.segments().join("\n\n"))
        else {
            return;
        };
        self.notice = Some(match self.clipboard.copy(&text) {
            Ok(()) => "Copied message to clipboard".to_string(),
            Err(e) => format!("Copy failed: {e}"),
        });
    }

    fn open(&mut self, destination: Destination) {
        info!(?destination, "navigation button pressed");
        self.notice = Some(match destination {
            Destination::Games => "Games are not available here".to_string(),
            Destination::Shorts => {
                let url = self.config.shorts_url.clone();
                match self.clipboard.copy(&url) {
                    Ok(()) => format!("Link copied: {url}"),
                    Err(_) => format!("Open in a browser: {url}"),
                }
            }
        });
    }
}
