//! Header bar with persona name and disclaimer banner.
//!
//! ```text
//! ≡ ✦ Exotic Shorthair ▾                                 ↗ Share
//! THIS IS AN A.I., AND EVERYTHING IT SAYS IS A HALLUCINATION.
//! ────────────────────────────────────────────────────────────────
//! ```

use neko_core::seed::DISCLAIMER;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::line,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::Theme;

/// Rows taken by the header.
pub const HEADER_HEIGHT: u16 = 3;

/// Header bar widget.
pub struct Header<'a> {
    persona: &'a str,
    theme: &'a Theme,
    show_menu: bool,
}

impl<'a> Header<'a> {
    pub fn new(persona: &'a str, theme: &'a Theme) -> Self {
        Self {
            persona,
            theme,
            show_menu: true,
        }
    }

    /// Show the menu glyph (hidden while the sidebar is open).
    #[must_use]
    pub fn show_menu(mut self, show: bool) -> Self {
        self.show_menu = show;
        self
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        buf.set_style(area, self.theme.body());

        let mut left = Vec::new();
        if self.show_menu {
            left.push(Span::styled("≡ ", Style::default().fg(self.theme.text)));
        }
        left.push(Span::styled("✦ ", Style::default().fg(self.theme.accent)));
        left.push(Span::styled(
            self.persona.to_string(),
            Style::default()
                .fg(self.theme.text)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ));
        left.push(Span::styled(" ▾", Style::default().fg(self.theme.subtext)));

        let row = Rect::new(area.x, area.y, area.width, 1);
        Paragraph::new(Line::from(left)).render(row, buf);
        Paragraph::new(Line::from(Span::styled("↗ Share ", self.theme.dim())))
            .alignment(Alignment::Right)
            .render(row, buf);

        if area.height > 1 {
            let banner = Rect::new(area.x, area.y + 1, area.width, 1);
            Paragraph::new(Line::from(Span::styled(
                DISCLAIMER,
                self.theme.faint().add_modifier(Modifier::BOLD),
            )))
            .render(banner, buf);
        }

        if area.height > 2 {
            let rule = Rect::new(area.x, area.y + 2, area.width, 1);
            Paragraph::new(Line::from(Span::styled(
                line::HORIZONTAL.repeat(usize::from(area.width)),
                Style::default().fg(self.theme.border),
            )))
            .render(rule, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn render(header: Header<'_>, width: u16) -> String {
        let area = Rect::new(0, 0, width, HEADER_HEIGHT);
        let mut buf = Buffer::empty(area);
        header.render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_header_contents() {
        let theme = Theme::default();
        let out = render(Header::new("Exotic Shorthair", &theme), 80);
        assert!(out.contains("Exotic Shorthair"));
        assert!(out.contains("Share"));
        assert!(out.contains(DISCLAIMER));
    }

    #[test]
    fn test_menu_glyph_toggles() {
        let theme = Theme::default();
        let with_menu = render(Header::new("P", &theme), 40);
        let without = render(Header::new("P", &theme).show_menu(false), 40);
        assert!(with_menu.starts_with("≡ ✦ P"));
        assert!(without.starts_with("✦ P"));
    }

    #[test]
    fn test_header_tiny_area() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);
        Header::new("Exotic Shorthair", &theme).render(area, &mut buf);
    }
}
