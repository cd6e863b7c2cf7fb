//! Key binding overlay.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::layout::centered_fixed;
use crate::theme::Theme;

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Compose",
        &[
            ("Enter", "Send message"),
            ("Shift+Enter", "New line"),
            ("Up / Down", "Recall earlier input"),
            ("PgUp / PgDn", "Scroll conversation"),
        ],
    ),
    (
        "Conversation",
        &[
            ("Tab", "Select replies"),
            ("Up / Down", "Move selection"),
            ("+ / -", "Rate reply"),
            ("y", "Copy reply"),
            ("Esc", "Back to input"),
        ],
    ),
    (
        "Anywhere",
        &[
            ("Ctrl+B", "Toggle sidebar"),
            ("Ctrl+T", "Switch sidebar tab"),
            ("F5 / F6", "Games / Shorts"),
            ("F1", "Toggle this help"),
            ("Ctrl+C", "Quit"),
        ],
    ),
];

/// Help overlay, drawn centered over `area`.
pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (section, keys) in BINDINGS {
            lines.push(Line::from(Span::styled(
                format!(" {section}"),
                self.theme.title(),
            )));
            for (key, what) in *keys {
                lines.push(Line::from(vec![
                    Span::styled(format!("   {key:<14}"), Style::default().fg(self.theme.accent)),
                    Span::styled(*what, Style::default().fg(self.theme.text)),
                ]));
            }
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            " [Press any key to close]",
            self.theme.dim().add_modifier(Modifier::ITALIC),
        )));
        lines
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();
        let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
        let width = 44.min(area.width.saturating_sub(4));
        let overlay = centered_fixed(width, height.min(area.height.saturating_sub(2)), area);
        if overlay.width == 0 || overlay.height == 0 {
            return;
        }

        Clear.render(overlay, buf);
        let block = Block::default()
            .title(" Help ")
            .title_style(self.theme.title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_style(true))
            .style(self.theme.body());

        Paragraph::new(lines).block(block).render(overlay, buf);
    }
}
