//! Color palettes for the chat surface.

use neko_core::ThemeChoice;
use ratatui::style::{Color, Modifier, Style};

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,
    pub sidebar: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,
    pub sidebar_text: Color,

    // Accents
    pub primary: Color,
    pub accent: Color,

    // Bubbles
    pub user_bubble: Color,
    pub user_text: Color,
    pub bubble_border: Color,

    // Semantic
    pub success: Color,
    pub error: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    /// Palette for a configured theme choice.
    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Light => Self::light(),
            ThemeChoice::Dark => Self::dark(),
        }
    }

    /// White chat area, near-black sidebar.
    pub fn light() -> Self {
        Self {
            base: Color::Rgb(255, 255, 255),
            surface: Color::Rgb(249, 250, 251),    // #f9fafb
            sidebar: Color::Rgb(26, 26, 26),       // #1a1a1a

            text: Color::Rgb(45, 45, 45),          // #2d2d2d
            subtext: Color::Rgb(107, 114, 128),    // #6b7280
            muted: Color::Rgb(209, 213, 219),      // #d1d5db
            sidebar_text: Color::Rgb(255, 255, 255),

            primary: Color::Rgb(0, 0, 0),
            accent: Color::Rgb(84, 160, 255),      // #54a0ff

            user_bubble: Color::Rgb(61, 61, 61),   // #3d3d3d
            user_text: Color::Rgb(255, 255, 255),
            bubble_border: Color::Rgb(0, 0, 0),

            success: Color::Rgb(64, 160, 43),
            error: Color::Rgb(210, 15, 57),

            border: Color::Rgb(229, 231, 235),     // #e5e7eb
            border_focused: Color::Rgb(0, 0, 0),
        }
    }

    /// Catppuccin Mocha based dark palette.
    pub fn dark() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),          // #1e1e2e
            surface: Color::Rgb(49, 50, 68),       // #313244
            sidebar: Color::Rgb(17, 17, 27),       // #11111b

            text: Color::Rgb(205, 214, 244),       // #cdd6f4
            subtext: Color::Rgb(166, 173, 200),    // #a6adc8
            muted: Color::Rgb(108, 112, 134),      // #6c7086
            sidebar_text: Color::Rgb(205, 214, 244),

            primary: Color::Rgb(180, 190, 254),    // #b4befe (lavender)
            accent: Color::Rgb(137, 180, 250),     // #89b4fa (blue)

            user_bubble: Color::Rgb(69, 71, 90),   // #45475a
            user_text: Color::Rgb(205, 214, 244),
            bubble_border: Color::Rgb(108, 112, 134),

            success: Color::Rgb(166, 227, 161),    // #a6e3a1
            error: Color::Rgb(243, 139, 168),      // #f38ba8

            border: Color::Rgb(69, 71, 90),
            border_focused: Color::Rgb(180, 190, 254),
        }
    }

    /// Default text on the chat background.
    pub fn body(&self) -> Style {
        Style::default().fg(self.text).bg(self.base)
    }

    /// Secondary text.
    pub fn dim(&self) -> Style {
        Style::default().fg(self.subtext).bg(self.base)
    }

    /// Barely visible text (banner, hints).
    pub fn faint(&self) -> Style {
        Style::default().fg(self.muted).bg(self.base)
    }

    /// Bold emphasized text.
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Assistant bubble body.
    pub fn assistant_bubble(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    /// User bubble body.
    pub fn user_bubble(&self) -> Style {
        Style::default().fg(self.user_text).bg(self.user_bubble)
    }

    /// Border for a pane, depending on focus.
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_light() {
        let theme = Theme::default();
        assert_eq!(theme.base, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_from_choice() {
        assert_eq!(Theme::from_choice(ThemeChoice::Dark).base, Theme::dark().base);
        assert_eq!(Theme::from_choice(ThemeChoice::Light).base, Theme::light().base);
    }

    #[test]
    fn test_user_bubble_contrasts() {
        for theme in [Theme::light(), Theme::dark()] {
            assert_ne!(theme.user_bubble, theme.user_text);
            assert_ne!(theme.surface, theme.text);
        }
    }
}
