//! Showcase palette and style helpers.
//!
//! The dark palette follows the site the components were designed for:
//! purple accents, teal highlights and a near-black surface.

use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

/// Selection indicator for lists
pub const LIST_HIGHLIGHT_SYMBOL: &str = "» ";

static THEME: RwLock<Theme> = RwLock::new(Theme::dark());

/// Replace the global theme
pub fn init_theme(theme_type: ThemeType) {
    let mut theme = THEME.write().unwrap_or_else(PoisonError::into_inner);
    *theme = Theme::new(theme_type);
}

/// Current theme
pub fn theme() -> Theme {
    THEME
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeType {
    #[default]
    Dark,
    Light,
    /// Modifiers only, no colors (`NO_COLOR=1`)
    NoColor,
}

impl ThemeType {
    pub fn name(&self) -> &'static str {
        match self {
            ThemeType::Dark => "dark",
            ThemeType::Light => "light",
            ThemeType::NoColor => "nocolor",
        }
    }
}

impl FromStr for ThemeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "light" => ThemeType::Light,
            "nocolor" | "no-color" | "no_color" => ThemeType::NoColor,
            _ => ThemeType::Dark,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub theme_type: ThemeType,

    /// Accent for titles, focused borders and primary buttons
    pub primary: Color,
    /// Secondary accent for active tabs and links
    pub secondary: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub text: Color,
    pub text_muted: Color,
    /// Code and other emphasized text
    pub text_emphasis: Color,

    pub border: Color,
    pub border_focused: Color,
    pub highlight_bg: Color,
    /// Surface color; blob outlines are blended over it
    pub background: (u8, u8, u8),
}

impl Theme {
    pub fn new(theme_type: ThemeType) -> Self {
        match theme_type {
            ThemeType::Dark => Self::dark(),
            ThemeType::Light => Self::light(),
            ThemeType::NoColor => Self::no_color(),
        }
    }

    pub const fn dark() -> Self {
        Self {
            theme_type: ThemeType::Dark,
            primary: Color::Rgb(187, 134, 252),
            secondary: Color::Rgb(3, 218, 198),
            success: Color::Rgb(76, 175, 80),
            warning: Color::Rgb(255, 183, 77),
            error: Color::Rgb(207, 102, 121),
            text: Color::Rgb(225, 225, 225),
            text_muted: Color::Rgb(138, 138, 138),
            text_emphasis: Color::Rgb(3, 218, 198),
            border: Color::Rgb(51, 51, 51),
            border_focused: Color::Rgb(187, 134, 252),
            highlight_bg: Color::Rgb(44, 44, 44),
            background: (18, 18, 18),
        }
    }

    pub const fn light() -> Self {
        Self {
            theme_type: ThemeType::Light,
            primary: Color::Rgb(98, 0, 238),
            secondary: Color::Rgb(1, 135, 134),
            success: Color::Green,
            warning: Color::Rgb(180, 120, 0),
            error: Color::Rgb(176, 0, 32),
            text: Color::Black,
            text_muted: Color::DarkGray,
            text_emphasis: Color::Rgb(98, 0, 238),
            border: Color::Gray,
            border_focused: Color::Rgb(98, 0, 238),
            highlight_bg: Color::Rgb(230, 224, 240),
            background: (250, 250, 250),
        }
    }

    /// Palette values are ignored by the style helpers in this mode
    pub const fn no_color() -> Self {
        Self {
            theme_type: ThemeType::NoColor,
            primary: Color::Reset,
            secondary: Color::Reset,
            success: Color::Reset,
            warning: Color::Reset,
            error: Color::Reset,
            text: Color::Reset,
            text_muted: Color::Reset,
            text_emphasis: Color::Reset,
            border: Color::Reset,
            border_focused: Color::Reset,
            highlight_bg: Color::Reset,
            background: (0, 0, 0),
        }
    }

    fn colored(&self, style: Style, fallback: Style) -> Style {
        if self.theme_type == ThemeType::NoColor {
            fallback
        } else {
            style
        }
    }

    pub fn title_style(&self) -> Style {
        self.colored(
            Style::default().fg(self.primary).add_modifier(Modifier::BOLD),
            Style::default().add_modifier(Modifier::BOLD),
        )
    }

    pub fn text_style(&self) -> Style {
        self.colored(Style::default().fg(self.text), Style::default())
    }

    pub fn muted_style(&self) -> Style {
        self.colored(
            Style::default().fg(self.text_muted),
            Style::default().add_modifier(Modifier::DIM),
        )
    }

    pub fn emphasis_style(&self) -> Style {
        self.colored(
            Style::default().fg(self.text_emphasis),
            Style::default().add_modifier(Modifier::BOLD),
        )
    }

    pub fn error_style(&self) -> Style {
        self.colored(
            Style::default().fg(self.error),
            Style::default().add_modifier(Modifier::UNDERLINED),
        )
    }

    pub fn border_style(&self) -> Style {
        self.colored(Style::default().fg(self.border), Style::default())
    }

    pub fn border_focused_style(&self) -> Style {
        self.colored(
            Style::default().fg(self.border_focused),
            Style::default().add_modifier(Modifier::BOLD),
        )
    }

    /// Selected list row
    pub fn highlight_style(&self) -> Style {
        self.colored(
            Style::default()
                .fg(self.secondary)
                .bg(self.highlight_bg)
                .add_modifier(Modifier::BOLD),
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
    }

    /// Active tab, active page, open accordion header
    pub fn active_style(&self) -> Style {
        self.colored(
            Style::default()
                .fg(self.secondary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            Style::default().add_modifier(Modifier::UNDERLINED),
        )
    }

    pub fn disabled_style(&self) -> Style {
        self.colored(
            Style::default().fg(self.text_muted),
            Style::default().add_modifier(Modifier::DIM),
        )
    }

    pub fn background_color(&self) -> Color {
        let (r, g, b) = self.background;
        Color::Rgb(r, g, b)
    }

    /// Surface behind overlays and notices
    pub fn background_style(&self) -> Style {
        self.colored(Style::default().bg(self.background_color()), Style::default())
    }

    /// Page content behind an open modal
    pub fn dim_style(&self) -> Style {
        self.colored(
            Style::default().fg(self.text_muted).add_modifier(Modifier::DIM),
            Style::default().add_modifier(Modifier::DIM),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_type_from_str() {
        assert_eq!("dark".parse::<ThemeType>(), Ok(ThemeType::Dark));
        assert_eq!("LIGHT".parse::<ThemeType>(), Ok(ThemeType::Light));
        assert_eq!("no-color".parse::<ThemeType>(), Ok(ThemeType::NoColor));
        assert_eq!("sepia".parse::<ThemeType>(), Ok(ThemeType::Dark));
    }

    #[test]
    fn test_no_color_styles_do_not_set_colors() {
        let t = Theme::new(ThemeType::NoColor);
        for style in [t.highlight_style(), t.title_style(), t.active_style()] {
            assert!(style.fg.is_none());
            assert!(style.bg.is_none());
        }
    }

    #[test]
    fn test_names_round_trip() {
        for theme_type in [ThemeType::Dark, ThemeType::Light, ThemeType::NoColor] {
            assert_eq!(theme_type.name().parse::<ThemeType>(), Ok(theme_type));
        }
    }
}
