//! Helpers for rendering the TUI in tests.

use std::sync::Arc;

use neko_core::{ChatConfig, ConversationStore, FixedClock};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};

use crate::app::App;
use crate::clipboard::MemoryClipboard;
use crate::layout::render_app;

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Seeded app with a frozen clock and an in-memory clipboard.
pub fn create_test_app() -> App {
    let store = ConversationStore::seeded().with_clock(Arc::new(FixedClock::at(12, 0)));
    App::with_store(ChatConfig::default(), store)
        .with_clipboard(Box::new(MemoryClipboard::default()))
}

/// Seeded test app plus a handle on what it copies.
pub fn create_test_app_with_clipboard() -> (App, MemoryClipboard) {
    let clipboard = MemoryClipboard::default();
    let app = create_test_app().with_clipboard(Box::new(clipboard.clone()));
    (app, clipboard)
}

/// Convert a buffer to a string, one line per row, trailing spaces trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut rows = Vec::with_capacity(usize::from(area.height));
    for y in area.top()..area.bottom() {
        let mut row = String::new();
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                row.push_str(cell.symbol());
            }
        }
        rows.push(row.trim_end().to_string());
    }
    rows.join("\n")
}

/// Render the whole app at the given size.
pub fn render_app_to_string(app: &App, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    render_app(app, area, &mut buffer);
    buffer_to_string(&buffer)
}
