//! Session sidebar.
//!
//! ```text
//! AnuNeko [BETA]
//!
//!  + New chat
//!
//!  All │ Favorites
//! ─────────────────
//! ● Introducing AnuN…
//!
//! ─────────────────
//! ◉ l****@simula.ad
//! ```

use neko_core::seed::{ACCOUNT_LABEL, ASSISTANT_NAME};
use neko_core::ChatSession;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::line,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::SidebarTab;
use crate::text::truncate;
use crate::theme::Theme;

/// Width of the sidebar when open.
pub const SIDEBAR_WIDTH: u16 = 30;

/// Sidebar widget.
pub struct Sidebar<'a> {
    sessions: &'a [&'a ChatSession],
    tab: SidebarTab,
    theme: &'a Theme,
}

impl<'a> Sidebar<'a> {
    pub fn new(sessions: &'a [&'a ChatSession], tab: SidebarTab, theme: &'a Theme) -> Self {
        Self {
            sessions,
            tab,
            theme,
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.theme.sidebar_text).bg(self.theme.sidebar)
    }

    fn faded(&self) -> Style {
        self.base().fg(self.theme.muted)
    }

    fn tab_line(&self) -> Line<'static> {
        let (all, fav) = match self.tab {
            SidebarTab::All => (
                self.base().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                self.faded(),
            ),
            SidebarTab::Favorites => (
                self.faded(),
                self.base().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ),
        };
        Line::from(vec![
            Span::styled(" All", all),
            Span::styled(" │ ", self.faded()),
            Span::styled("Favorites", fav),
        ])
    }

    fn session_lines(&self, width: usize) -> Vec<Line<'static>> {
        if self.sessions.is_empty() {
            let empty = match self.tab {
                SidebarTab::All => " No chats yet",
                SidebarTab::Favorites => " No favorites yet",
            };
            return vec![Line::from(Span::styled(empty, self.faded()))];
        }

        self.sessions
            .iter()
            .map(|session| {
                let title = truncate(&session.title, width.saturating_sub(3));
                if session.active {
                    Line::from(vec![
                        Span::styled("▌", self.base().fg(self.theme.accent)),
                        Span::styled("● ", self.base().fg(self.theme.accent)),
                        Span::styled(title, self.base().add_modifier(Modifier::ITALIC)),
                    ])
                } else {
                    Line::from(vec![
                        Span::styled("   ", self.base()),
                        Span::styled(title, self.faded()),
                    ])
                }
            })
            .collect()
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, self.base());

        let width = usize::from(area.width);
        let rule = Span::styled(line::HORIZONTAL.repeat(width), self.faded());

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!(" {ASSISTANT_NAME} "),
                    self.base().add_modifier(Modifier::BOLD | Modifier::ITALIC),
                ),
                Span::styled("[BETA]", self.faded()),
            ]),
            Line::default(),
            Line::from(Span::styled(" + New chat", self.base().add_modifier(Modifier::BOLD))),
            Line::default(),
            self.tab_line(),
            Line::from(rule.clone()),
        ];
        lines.extend(self.session_lines(width));

        let body_height = area.height.saturating_sub(2);
        Paragraph::new(lines).render(Rect::new(area.x, area.y, area.width, body_height), buf);

        // Account footer pinned to the bottom
        if area.height >= 2 {
            let footer = Rect::new(area.x, area.y + area.height - 2, area.width, 2);
            Paragraph::new(vec![
                Line::from(rule),
                Line::from(vec![
                    Span::styled(" ◉ ", self.faded()),
                    Span::styled(
                        truncate(ACCOUNT_LABEL, width.saturating_sub(3)),
                        self.base().add_modifier(Modifier::ITALIC),
                    ),
                ]),
            ])
            .render(footer, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use neko_core::seed;

    fn render(sessions: &[&ChatSession], tab: SidebarTab) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, SIDEBAR_WIDTH, 16);
        let mut buf = Buffer::empty(area);
        Sidebar::new(sessions, tab, &theme).render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_sidebar_lists_sessions() {
        let sessions = seed::sessions();
        let refs: Vec<&ChatSession> = sessions.iter().collect();
        let out = render(&refs, SidebarTab::All);

        assert!(out.contains("AnuNeko"));
        assert!(out.contains("New chat"));
        assert!(out.contains("Favorites"));
        assert!(out.contains("Introducing"));
        assert!(out.contains('…'));
        assert!(out.contains(ACCOUNT_LABEL));
    }

    #[test]
    fn test_empty_favorites() {
        let out = render(&[], SidebarTab::Favorites);
        assert!(out.contains("No favorites yet"));
    }

    #[test]
    fn test_sidebar_tiny_area() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        Sidebar::new(&[], SidebarTab::All, &theme).render(area, &mut buf);
    }
}
