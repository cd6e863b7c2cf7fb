//! neko-tui: terminal chat surface for the neko mockup.
//!
//! This crate draws the conversation with ratatui and drives it from
//! crossterm input:
//! - Sidebar, header, message list, and input area widgets
//! - Key bindings mapped to [`Action`]s
//! - Simulated replies scheduled through [`neko_core::ReplyScheduler`]

mod app;
mod clipboard;
mod event;
mod layout;
#[cfg(test)]
pub mod test_utils;
mod text;
mod theme;
pub mod widgets;

pub use app::{App, Destination, Feedback, Focus, SidebarTab, TranscriptMetrics};
pub use clipboard::{ClipboardError, ClipboardSink, SystemClipboard};
pub use event::{key_to_action, Action, Event, EventHandler};
pub use layout::{render, render_app, MIN_HEIGHT, MIN_WIDTH};
pub use neko_core;
pub use theme::Theme;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use neko_core::{ChatConfig, ReplyScheduler, ReplyTicket};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// RAII guard for terminal state restoration.
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the chat TUI until the user quits.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit. Replies still in flight when the user quits are dropped.
pub async fn run_tui(config: ChatConfig) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut guard = TerminalGuard {
        keyboard_enhanced: false,
    };

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Lets Shift+Enter arrive as its own key on terminals that support it.
    if supports_keyboard_enhancement().unwrap_or(false) {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        guard.keyboard_enhanced = true;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (mut scheduler, mut replies) = ReplyScheduler::channel(config.reply_delay());
    let mut events = EventHandler::new(config.tick_rate());
    let mut app = App::new(config);
    info!(
        delay_ms = scheduler.delay().as_millis(),
        "chat session started"
    );

    let result = run_loop(
        &mut terminal,
        &mut app,
        &mut events,
        &mut scheduler,
        &mut replies,
    )
    .await;

    let dropped = scheduler.cancel_all();
    app.store.abandon_pending();
    info!(
        messages = app.store.len(),
        dropped_replies = dropped,
        "chat session ended"
    );

    terminal.show_cursor()?;
    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    scheduler: &mut ReplyScheduler,
    replies: &mut mpsc::UnboundedReceiver<ReplyTicket>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render(app, frame))?;

        tokio::select! {
            event = events.next() => match event {
                Some(event) => handle_event(app, scheduler, event),
                None => break,
            },
            Some(ticket) = replies.recv() => app.deliver_reply(&ticket),
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Apply one terminal event, scheduling a reply if a message was sent.
fn handle_event(app: &mut App, scheduler: &mut ReplyScheduler, event: Event) {
    match event {
        Event::Key(key) => {
            let action = key_to_action(key, app.focus);
            if let Some(ticket) = app.handle_action(action) {
                scheduler.schedule(ticket);
            }
        }
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => app.scroll_up(app::WHEEL_LINES),
            MouseEventKind::ScrollDown => app.scroll_down(app::WHEEL_LINES),
            _ => {}
        },
        Event::Resize(width, height) => debug!(width, height, "terminal resized"),
        Event::Tick => {}
    }
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_app;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
    use neko_core::{ConversationPhase, Role};
    use std::time::Duration;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_keys(app: &mut App, scheduler: &mut ReplyScheduler, text: &str) {
        for c in text.chars() {
            handle_event(app, scheduler, key(KeyCode::Char(c)));
        }
    }

    fn wheel(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_tui_version() {
        assert!(!tui_version().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_delay() {
        let mut app = create_test_app();
        let (mut scheduler, mut replies) = ReplyScheduler::channel(Duration::from_millis(1000));

        type_keys(&mut app, &mut scheduler, "hi there");
        handle_event(&mut app, &mut scheduler, key(KeyCode::Enter));
        assert_eq!(app.store.len(), 6);
        assert_eq!(app.store.input(), "");
        assert_eq!(scheduler.in_flight(), 1);

        tokio::time::advance(Duration::from_millis(999)).await;
        assert!(replies.try_recv().is_err());

        tokio::time::advance(Duration::from_millis(1)).await;
        let ticket = replies.recv().await.unwrap();
        app.deliver_reply(&ticket);

        let last = app.store.last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, app.config.canned_reply);
        assert_eq!(app.store.phase(), ConversationPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_on_empty_input_schedules_nothing() {
        let mut app = create_test_app();
        let (mut scheduler, _replies) = ReplyScheduler::channel(Duration::from_millis(1000));

        handle_event(&mut app, &mut scheduler, key(KeyCode::Enter));
        type_keys(&mut app, &mut scheduler, "  ");
        handle_event(&mut app, &mut scheduler, key(KeyCode::Enter));

        assert_eq!(app.store.len(), 5);
        assert_eq!(scheduler.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shift_enter_inserts_newline() {
        let mut app = create_test_app();
        let (mut scheduler, _replies) = ReplyScheduler::channel(Duration::from_millis(1000));

        type_keys(&mut app, &mut scheduler, "a");
        handle_event(
            &mut app,
            &mut scheduler,
            Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT)),
        );
        type_keys(&mut app, &mut scheduler, "b");

        assert_eq!(app.store.input(), "a\nb");
        assert_eq!(scheduler.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_double_submit_gets_two_replies() {
        let mut app = create_test_app();
        let (mut scheduler, mut replies) = ReplyScheduler::channel(Duration::from_millis(1000));

        type_keys(&mut app, &mut scheduler, "one");
        handle_event(&mut app, &mut scheduler, key(KeyCode::Enter));
        tokio::time::advance(Duration::from_millis(200)).await;
        type_keys(&mut app, &mut scheduler, "two");
        handle_event(&mut app, &mut scheduler, key(KeyCode::Enter));
        assert_eq!(
            app.store.phase(),
            ConversationPhase::AwaitingReply { pending: 2 }
        );

        tokio::time::advance(Duration::from_millis(1000)).await;
        for _ in 0..2 {
            let ticket = replies.recv().await.unwrap();
            app.deliver_reply(&ticket);
        }

        let roles: Vec<Role> = app.store.messages()[5..].iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::User, Role::Assistant, Role::Assistant]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_after_teardown_is_dropped() {
        let mut app = create_test_app();
        let (mut scheduler, mut replies) = ReplyScheduler::channel(Duration::from_millis(1000));

        type_keys(&mut app, &mut scheduler, "bye");
        handle_event(&mut app, &mut scheduler, key(KeyCode::Enter));
        tokio::time::advance(Duration::from_millis(1000)).await;
        let ticket = replies.recv().await.unwrap();

        app.store.abandon_pending();
        app.deliver_reply(&ticket);
        assert_eq!(app.store.len(), 6);
        assert_eq!(app.store.last().unwrap().role, Role::User);
    }

    #[test]
    fn test_mouse_wheel_scrolls() {
        let mut app = create_test_app();
        let (mut scheduler, _replies) = ReplyScheduler::channel(Duration::from_millis(1000));
        app.transcript_metrics.set(TranscriptMetrics {
            total_lines: 40,
            viewport: 10,
        });

        handle_event(&mut app, &mut scheduler, wheel(MouseEventKind::ScrollUp));
        assert_eq!(app.scroll_back, app::WHEEL_LINES);
        handle_event(&mut app, &mut scheduler, wheel(MouseEventKind::ScrollDown));
        assert_eq!(app.scroll_back, 0);
    }

    #[test]
    fn test_tab_moves_focus_to_transcript() {
        let mut app = create_test_app();
        let (mut scheduler, _replies) = ReplyScheduler::channel(Duration::from_millis(1000));

        handle_event(&mut app, &mut scheduler, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Transcript);

        // Typing keys are bindings here, not text.
        handle_event(&mut app, &mut scheduler, key(KeyCode::Char('+')));
        assert_eq!(app.feedback.get("5"), Some(&Feedback::Up));
        assert_eq!(app.store.input(), "");

        handle_event(&mut app, &mut scheduler, key(KeyCode::Esc));
        assert_eq!(app.focus, Focus::Input);
        assert!(!app.should_quit);

        handle_event(&mut app, &mut scheduler, key(KeyCode::Esc));
        assert!(app.should_quit);
    }
}
