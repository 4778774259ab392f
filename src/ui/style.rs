//! Colors for the light and dark surface themes.

use ratatui::style::{Color, Modifier, Style};

use crate::theme::EditorTheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub toolbar_bg: Color,
    pub toolbar_fg: Color,
    pub muted: Color,
    pub gutter: Color,
    pub saved: Color,
    pub accent: Color,
}

impl Palette {
    pub const fn for_theme(theme: EditorTheme) -> Self {
        match theme {
            EditorTheme::Dark => Self {
                background: Color::Rgb(30, 30, 30),
                foreground: Color::Rgb(212, 212, 212),
                toolbar_bg: Color::Rgb(37, 37, 38),
                toolbar_fg: Color::Rgb(209, 213, 219),
                muted: Color::Rgb(156, 163, 175),
                gutter: Color::Rgb(133, 133, 133),
                saved: Color::Rgb(74, 222, 128),
                accent: Color::Rgb(59, 130, 246),
            },
            EditorTheme::Light => Self {
                background: Color::Rgb(255, 255, 255),
                foreground: Color::Rgb(0, 0, 0),
                toolbar_bg: Color::Rgb(249, 250, 251),
                toolbar_fg: Color::Rgb(55, 65, 81),
                muted: Color::Rgb(107, 114, 128),
                gutter: Color::Rgb(35, 120, 147),
                saved: Color::Rgb(22, 163, 74),
                accent: Color::Rgb(59, 130, 246),
            },
        }
    }

    /// Base style of the editing area.
    pub fn surface(self) -> Style {
        Style::default().bg(self.background).fg(self.foreground)
    }

    pub fn toolbar(self) -> Style {
        Style::default().bg(self.toolbar_bg).fg(self.toolbar_fg)
    }

    /// Style of the cell under the cursor.
    pub fn cursor(self) -> Style {
        Style::default()
            .bg(self.foreground)
            .fg(self.background)
            .add_modifier(Modifier::BOLD)
    }
}
