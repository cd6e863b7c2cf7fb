//! Screen layout.
//!
//! ```text
//! ┌ sidebar ┐┌ header ──────────────────────┐
//! │         ││ messages                      │
//! │         ││                               │
//! │         │├ input area ───────────────────┤
//! └─────────┘└───────────────────────────────┘
//! ```

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    text::Line,
    widgets::{Paragraph, Widget},
    Frame,
};

use crate::app::{App, Focus};
use crate::widgets::{
    Header, HelpOverlay, InputArea, MessageList, Sidebar, HEADER_HEIGHT, SIDEBAR_WIDTH,
};

/// Minimum terminal width.
pub const MIN_WIDTH: u16 = 40;
/// Minimum terminal height.
pub const MIN_HEIGHT: u16 = 12;

/// Sidebar is dropped below this width even when open.
const SIDEBAR_MIN_TOTAL: u16 = SIDEBAR_WIDTH + MIN_WIDTH;

/// Center a fixed-size rectangle within `area`.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Draw the whole app into a frame.
pub fn render(app: &App, frame: &mut Frame<'_>) {
    let area = frame.area();
    render_app(app, area, frame.buffer_mut());
}

/// Draw the whole app into a buffer.
pub fn render_app(app: &App, area: Rect, buf: &mut Buffer) {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(app, area, buf);
        return;
    }
    buf.set_style(area, app.theme.body());

    let show_sidebar = app.sidebar_open && area.width >= SIDEBAR_MIN_TOTAL;
    let main = if show_sidebar {
        let [side, main] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(MIN_WIDTH)])
                .areas(area);
        let sessions = app.visible_sessions();
        Sidebar::new(&sessions, app.sidebar_tab, &app.theme).render(side, buf);
        main
    } else {
        area
    };

    let draft = app.store.draft();
    let input_height = InputArea::height_for(draft, main.width.saturating_sub(2));
    let [header, messages, input] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(input_height),
    ])
    .areas(main);

    Header::new(&app.config.persona, &app.theme)
        .show_menu(!show_sidebar)
        .render(header, buf);

    MessageList::new(app.store.messages(), &app.theme)
        .assistant_name(&app.config.assistant_name)
        .selected(app.selected)
        .feedback(&app.feedback)
        .scroll_back(app.scroll_back)
        .pending(app.store.pending_replies())
        .metrics(&app.transcript_metrics)
        .render(messages.inner(Margin::new(1, 0)), buf);

    InputArea::new(draft, &app.theme)
        .focused(app.focus == Focus::Input)
        .can_submit(app.store.can_submit())
        .notice(app.notice.as_deref())
        .render(input.inner(Margin::new(1, 0)), buf);

    if app.show_help {
        HelpOverlay::new(&app.theme).render(area, buf);
    }
}

fn render_too_small(app: &App, area: Rect, buf: &mut Buffer) {
    buf.set_style(area, app.theme.body());
    let lines = vec![
        Line::from("Terminal too small"),
        Line::from(format!("Need {MIN_WIDTH}x{MIN_HEIGHT}")),
    ];
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let target = centered_fixed(area.width, height, area);
    Paragraph::new(lines)
        .style(app.theme.dim())
        .alignment(Alignment::Center)
        .render(target, buf);
}
