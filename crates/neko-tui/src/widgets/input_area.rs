//! Input area: navigation buttons, text box, and key hint.
//!
//! ```text
//!   [F5] Play Games          [F6] Watch Shorts
//! ┌──────────────────────────────────────────┐
//! │ Type your thoughts out here            ➤ │
//! └──────────────────────────────────────────┘
//!  PRESS ENTER TO SEND, SHIFT + ENTER FOR NEW LINE
//! ```

use neko_core::Draft;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::app::Destination;
use crate::text::wrap_text;
use crate::theme::Theme;

/// Placeholder shown in an empty box.
pub const PLACEHOLDER: &str = "Type your thoughts out here";

/// Hint shown under the box.
pub const KEY_HINT: &str = "PRESS ENTER TO SEND, SHIFT + ENTER FOR NEW LINE";

/// Most text lines the box grows to.
const MAX_TEXT_LINES: u16 = 4;

/// Cells taken by the box borders and the send glyph.
const BOX_CHROME: u16 = 4;

/// Stand-in for the cursor while wrapping; swapped for a glyph afterwards.
const CURSOR_MARK: char = '\u{E000}';

/// Input area widget.
pub struct InputArea<'a> {
    draft: &'a Draft,
    theme: &'a Theme,
    focused: bool,
    can_submit: bool,
    notice: Option<&'a str>,
}

impl<'a> InputArea<'a> {
    /// Focused input area for `draft` with the send glyph dimmed.
    pub fn new(draft: &'a Draft, theme: &'a Theme) -> Self {
        Self {
            draft,
            theme,
            focused: true,
            can_submit: false,
            notice: None,
        }
    }

    /// Whether the box has keyboard focus (draws the cursor).
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Whether the send indicator is lit.
    #[must_use]
    pub fn can_submit(mut self, can_submit: bool) -> Self {
        self.can_submit = can_submit;
        self
    }

    /// Replace the key hint with a status notice.
    #[must_use]
    pub fn notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }

    /// Rows needed to show `draft` in an area `width` cells wide.
    pub fn height_for(draft: &Draft, width: u16) -> u16 {
        let rows = wrap_draft(draft, true, text_width(width)).len();
        let rows = u16::try_from(rows).unwrap_or(u16::MAX);
        // buttons + top border + text + bottom border + hint
        1 + 1 + rows.clamp(1, MAX_TEXT_LINES) + 1 + 1
    }

    fn button_row(&self, area: Rect, buf: &mut Buffer) {
        let halves = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        for (destination, half) in [Destination::Games, Destination::Shorts]
            .into_iter()
            .zip(halves.iter())
        {
            let line = Line::from(vec![
                Span::styled(
                    format!("[{}] ", destination.key()),
                    Style::default().fg(self.theme.subtext),
                ),
                Span::styled(
                    destination.label(),
                    Style::default()
                        .fg(self.theme.text)
                        .add_modifier(Modifier::BOLD),
                ),
            ]);
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .render(*half, buf);
        }
    }

    /// Wrapped draft lines with a drawn cursor, plus the line the cursor is on.
    fn text_lines(&self, width: usize) -> (Vec<Line<'static>>, usize) {
        let text_style = Style::default().fg(self.theme.text);
        let cursor_style = Style::default().fg(self.theme.accent);

        if self.draft.is_empty() {
            let mut spans = Vec::new();
            if self.focused {
                spans.push(Span::styled("_", cursor_style));
            }
            spans.push(Span::styled(PLACEHOLDER, self.theme.dim()));
            return (vec![Line::from(spans)], 0);
        }

        // Mid-text the cursor is a bar before the character, at the end an underscore.
        let at_end = self.draft.cursor() >= self.draft.content().chars().count();
        let glyph = if at_end { "_" } else { "|" };

        let mut cursor_line = 0;
        let lines = wrap_draft(self.draft, self.focused, width)
            .into_iter()
            .enumerate()
            .map(|(row, text)| match text.split_once(CURSOR_MARK) {
                Some((before, after)) => {
                    cursor_line = row;
                    Line::from(vec![
                        Span::styled(before.to_string(), text_style),
                        Span::styled(glyph, cursor_style),
                        Span::styled(after.to_string(), text_style),
                    ])
                }
                None => Line::from(Span::styled(text, text_style)),
            })
            .collect();
        (lines, cursor_line)
    }

    fn text_box(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_style(self.focused))
            .style(self.theme.body());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 3 || inner.height == 0 {
            return;
        }

        let [text_area, send_area] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(2)]).areas(inner);

        let (lines, cursor_line) = self.text_lines(usize::from(text_area.width));
        let visible = usize::from(text_area.height);
        let offset = (cursor_line + 1).saturating_sub(visible);
        Paragraph::new(lines)
            .scroll((u16::try_from(offset).unwrap_or(0), 0))
            .render(text_area, buf);

        let send_style = if self.can_submit {
            Style::default()
                .fg(self.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.muted)
        };
        Paragraph::new(Line::from(Span::styled(" ➤", send_style))).render(send_area, buf);
    }
}

/// Width left for text inside an input area `width` cells wide.
fn text_width(width: u16) -> usize {
    usize::from(width.saturating_sub(BOX_CHROME).max(1))
}

/// Draft text wrapped to `width`, with the cursor mark in place when `focused`.
fn wrap_draft(draft: &Draft, focused: bool, width: usize) -> Vec<String> {
    let mut text = draft.content().to_string();
    if focused {
        let at = text
            .char_indices()
            .nth(draft.cursor())
            .map_or(text.len(), |(i, _)| i);
        text.insert(at, CURSOR_MARK);
    }
    wrap_text(&text, width)
}

impl Widget for InputArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, self.theme.body());

        if area.height < 4 {
            // Only room for the box itself
            self.text_box(area, buf);
            return;
        }

        let [buttons, text_box, hint] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        self.button_row(buttons, buf);
        self.text_box(text_box, buf);

        let hint_line = match self.notice {
            Some(notice) => Line::from(Span::styled(
                notice.to_string(),
                Style::default().fg(self.theme.accent),
            )),
            None => Line::from(Span::styled(
                KEY_HINT,
                self.theme.faint().add_modifier(Modifier::BOLD),
            )),
        };
        Paragraph::new(hint_line)
            .alignment(Alignment::Center)
            .render(hint, buf);
    }
}
