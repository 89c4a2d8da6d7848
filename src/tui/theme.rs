//! Color palettes for the light and dark themes

use ratatui::style::Color;

use crate::config::Theme;

/// Colors used across every view and dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub cursor_fg: Color,
    pub cursor_bg: Color,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            background: Color::White,
            text: Color::Black,
            muted: Color::DarkGray,
            accent: Color::Blue,
            border: Color::Gray,
            positive: Color::Green,
            negative: Color::Red,
            warning: Color::Magenta,
            highlight_fg: Color::White,
            highlight_bg: Color::Blue,
            cursor_fg: Color::White,
            cursor_bg: Color::Blue,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Black,
            text: Color::White,
            muted: Color::Gray,
            accent: Color::Cyan,
            border: Color::DarkGray,
            positive: Color::LightGreen,
            negative: Color::LightRed,
            warning: Color::Yellow,
            highlight_fg: Color::Black,
            highlight_bg: Color::Cyan,
            cursor_fg: Color::Black,
            cursor_bg: Color::Cyan,
        }
    }
}

impl From<Theme> for Palette {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_follows_theme() {
        assert_eq!(Palette::from(Theme::Dark), Palette::dark());
        assert_eq!(Palette::from(Theme::Light), Palette::light());
        assert_ne!(Palette::light().background, Palette::dark().background);
    }
}
