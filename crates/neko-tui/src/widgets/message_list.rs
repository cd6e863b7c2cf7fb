//! Scrollable message list.
//!
//! Assistant turns sit on the left under the assistant's name, each block in
//! its own bubble, followed by an action row. User turns are right-aligned.
//! The view stays pinned to the newest message unless scrolled back.
//!
//! ```text
//! AnuNeko · 10:45 AM
//! │ Hello! How's your day been?
//!
//! │ Mine's been alright, I guess...
//!   ▲  ▼  copy  share  ⋯
//!
//!                                   10:46 AM
//!                 Good. What is your purpose?
//! ```

use std::cell::Cell;
use std::collections::HashMap;
use std::ops::Range;

use neko_core::{Message, Role};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::{Feedback, TranscriptMetrics};
use crate::text::{display_width, wrap_text};
use crate::theme::Theme;

/// Share of the width a bubble may use, in percent.
const BUBBLE_PERCENT: usize = 85;

/// Cells taken by the bubble bar and padding.
const BUBBLE_CHROME: usize = 3;

/// Pre-wrapped transcript lines plus where each message landed.
#[derive(Debug, Default)]
pub struct TranscriptLayout {
    pub lines: Vec<Line<'static>>,
    /// Line range of every message, indexed like the message slice.
    pub ranges: Vec<Range<usize>>,
}

/// Message list widget.
pub struct MessageList<'a> {
    messages: &'a [Message],
    theme: &'a Theme,
    assistant_name: &'a str,
    selected: Option<usize>,
    feedback: Option<&'a HashMap<String, Feedback>>,
    scroll_back: u16,
    pending: usize,
    metrics: Option<&'a Cell<TranscriptMetrics>>,
}

impl<'a> MessageList<'a> {
    /// List over `messages`, pinned to the newest one.
    pub fn new(messages: &'a [Message], theme: &'a Theme) -> Self {
        Self {
            messages,
            theme,
            assistant_name: neko_core::seed::ASSISTANT_NAME,
            selected: None,
            feedback: None,
            scroll_back: 0,
            pending: 0,
            metrics: None,
        }
    }

    /// Name shown above assistant turns.
    #[must_use]
    pub fn assistant_name(mut self, name: &'a str) -> Self {
        self.assistant_name = name;
        self
    }

    /// Highlight the message at this index and keep it on screen.
    #[must_use]
    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    /// Ratings to show in the action rows, keyed by message id.
    #[must_use]
    pub fn feedback(mut self, feedback: &'a HashMap<String, Feedback>) -> Self {
        self.feedback = Some(feedback);
        self
    }

    /// Lines scrolled back from the bottom.
    #[must_use]
    pub fn scroll_back(mut self, lines: u16) -> Self {
        self.scroll_back = lines;
        self
    }

    /// Number of replies still on their way.
    #[must_use]
    pub fn pending(mut self, pending: usize) -> Self {
        self.pending = pending;
        self
    }

    /// Record the drawn size here after rendering.
    #[must_use]
    pub fn metrics(mut self, metrics: &'a Cell<TranscriptMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Wrap every message for the given width.
    pub fn layout(&self, width: u16) -> TranscriptLayout {
        let bubble = (usize::from(width) * BUBBLE_PERCENT / 100).max(BUBBLE_CHROME + 1);
        let text_width = bubble.saturating_sub(BUBBLE_CHROME).max(1);

        let mut out = TranscriptLayout::default();
        for (index, message) in self.messages.iter().enumerate() {
            let start = out.lines.len();
            match message.role {
                Role::Assistant => self.assistant_lines(index, message, text_width, &mut out.lines),
                Role::User => self.user_lines(message, text_width, &mut out.lines),
            }
            out.ranges.push(start..out.lines.len());
            out.lines.push(Line::default());
        }

        if self.pending > 0 {
            out.lines.push(Line::from(Span::styled(
                format!("{} is thinking…", self.assistant_name),
                self.theme.dim().add_modifier(Modifier::ITALIC),
            )));
        }
        out
    }

    fn assistant_lines(
        &self,
        index: usize,
        message: &Message,
        text_width: usize,
        lines: &mut Vec<Line<'static>>,
    ) {
        let selected = self.selected == Some(index);
        let mut header = Vec::new();
        if selected {
            header.push(Span::styled("▶ ", Style::default().fg(self.theme.accent)));
        }
        header.push(Span::styled(
            self.assistant_name.to_string(),
            Style::default()
                .fg(self.theme.text)
                .add_modifier(Modifier::BOLD),
        ));
        header.push(Span::styled(format!(" · {}", message.timestamp), self.theme.faint()));
        lines.push(Line::from(header));

        let bar = if selected {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(self.theme.bubble_border)
        };

        for (i, segment) in message.segments().into_iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            let wrapped = wrap_text(segment, text_width);
            let inner = wrapped.iter().map(|l| display_width(l)).max().unwrap_or(0);
            for text in wrapped {
                let pad = inner.saturating_sub(display_width(&text));
                lines.push(Line::from(vec![
                    Span::styled("│", bar),
                    Span::styled(
                        format!(" {text}{} ", " ".repeat(pad)),
                        self.theme.assistant_bubble(),
                    ),
                ]));
            }
        }

        lines.push(self.action_row(&message.id));
    }

    fn action_row(&self, id: &str) -> Line<'static> {
        let rating = self.feedback.and_then(|f| f.get(id)).copied();
        let idle = self.theme.faint();
        let up = if rating == Some(Feedback::Up) {
            Style::default()
                .fg(self.theme.success)
                .add_modifier(Modifier::BOLD)
        } else {
            idle
        };
        let down = if rating == Some(Feedback::Down) {
            Style::default()
                .fg(self.theme.error)
                .add_modifier(Modifier::BOLD)
        } else {
            idle
        };
        Line::from(vec![
            Span::styled("  ▲", up),
            Span::styled("  ▼", down),
            Span::styled("  copy  share  ⋯", idle),
        ])
    }

    fn user_lines(&self, message: &Message, text_width: usize, lines: &mut Vec<Line<'static>>) {
        lines.push(
            Line::from(Span::styled(message.timestamp.clone(), self.theme.faint()))
                .alignment(Alignment::Right),
        );

        for (i, segment) in message.segments().into_iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            let wrapped = wrap_text(segment, text_width);
            let inner = wrapped.iter().map(|l| display_width(l)).max().unwrap_or(0);
            for text in wrapped {
                let pad = inner.saturating_sub(display_width(&text));
                lines.push(
                    Line::from(Span::styled(
                        format!(" {text}{} ", " ".repeat(pad)),
                        self.theme.user_bubble(),
                    ))
                    .alignment(Alignment::Right),
                );
            }
        }
    }
}

/// First visible line for a transcript of `total` lines in `height` rows.
fn visible_offset(
    total: usize,
    height: usize,
    scroll_back: u16,
    focus: Option<&Range<usize>>,
) -> usize {
    let max_offset = total.saturating_sub(height);
    let mut offset = max_offset.saturating_sub(usize::from(scroll_back));

    // Keep the selected message on screen.
    if let Some(range) = focus {
        if range.end > offset + height {
            offset = range.end.saturating_sub(height);
        }
        if range.start < offset {
            offset = range.start;
        }
    }
    offset.min(max_offset)
}

impl Widget for MessageList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, self.theme.body());

        if self.messages.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                format!("Say hi to {}", self.assistant_name),
                self.theme.dim(),
            )))
            .alignment(Alignment::Center)
            .render(area, buf);
            return;
        }

        let layout = self.layout(area.width);
        let total = layout.lines.len();
        let height = usize::from(area.height);
        if let Some(metrics) = self.metrics {
            metrics.set(TranscriptMetrics {
                total_lines: total,
                viewport: area.height,
            });
        }

        let focus = self.selected.and_then(|i| layout.ranges.get(i));
        let offset = visible_offset(total, height, self.scroll_back, focus);
        let offset = u16::try_from(offset).unwrap_or(u16::MAX);

        Paragraph::new(layout.lines)
            .style(self.theme.body())
            .scroll((offset, 0))
            .render(area, buf);
    }
}
