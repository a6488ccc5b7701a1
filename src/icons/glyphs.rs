//! Glyph providers for the icon gallery.
//!
//! A [`GlyphSet`] supplies the SVG outline copied for an icon and the
//! terminal symbol shown for its category. The terminal symbols come in three
//! sets: NerdFonts, Unicode and an ASCII fallback. The set is auto-detected
//! from the terminal and can be overridden through an environment variable.

use super::catalog::{IconCategory, IconEntry};
use std::env;

/// Environment variable that overrides icon-set detection
pub const ICONS_ENV: &str = "COMPONENTRY_ICONS";

/// Source of icon artwork
pub trait GlyphSet {
    /// SVG body of the icon, without the surrounding `<svg>` element
    fn outline(&self, icon: &IconEntry) -> String;

    /// Short symbol for list views
    fn symbol(&self, category: IconCategory) -> &'static str;
}

/// Available terminal symbol sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSet {
    /// NerdFonts icons (requires NerdFont-patched font)
    NerdFonts,
    /// Unicode symbols (works in most modern terminals)
    Unicode,
    /// ASCII-only fallback (maximum compatibility)
    Ascii,
}

impl IconSet {
    /// Detect the best icon set for the current terminal
    pub fn detect() -> Self {
        if let Ok(icons) = env::var(ICONS_ENV) {
            return Self::parse(&icons).unwrap_or(IconSet::Unicode);
        }
        if Self::likely_supports_nerd_fonts() {
            IconSet::NerdFonts
        } else {
            IconSet::Unicode
        }
    }

    /// Parse a user-facing set name; `None` for unknown names and `auto`
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "nerd" | "nerdfont" | "nerdfonts" => Some(IconSet::NerdFonts),
            "unicode" | "emoji" => Some(IconSet::Unicode),
            "ascii" | "plain" => Some(IconSet::Ascii),
            _ => None,
        }
    }

    fn likely_supports_nerd_fonts() -> bool {
        if let Ok(term_program) = env::var("TERM_PROGRAM") {
            matches!(
                term_program.as_str(),
                "iTerm.app" | "WezTerm" | "Alacritty" | "kitty" | "Ghostty"
            )
        } else {
            false
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IconSet::NerdFonts => "NerdFonts",
            IconSet::Unicode => "Unicode",
            IconSet::Ascii => "ASCII",
        }
    }
}

/// Placeholder artwork: one outline per category
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    icon_set: IconSet,
}

impl Glyphs {
    /// Glyphs with an auto-detected symbol set
    pub fn new() -> Self {
        Self {
            icon_set: IconSet::detect(),
        }
    }

    pub fn with_icon_set(icon_set: IconSet) -> Self {
        Self { icon_set }
    }

    /// Priority: environment variable > config value > auto-detect
    pub fn from_config(config: &crate::config::Config) -> Self {
        if env::var(ICONS_ENV).is_ok() {
            return Self::new();
        }
        match config.get_icon_set() {
            Some(icon_set) => Self::with_icon_set(icon_set),
            None => Self::new(),
        }
    }

    pub fn icon_set(&self) -> IconSet {
        self.icon_set
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphSet for Glyphs {
    fn outline(&self, icon: &IconEntry) -> String {
        let shape = match icon.category {
            IconCategory::Development => r#"<rect x="4" y="4" width="16" height="16" rx="2"/>"#,
            IconCategory::Ui => r#"<circle cx="12" cy="12" r="8"/>"#,
            IconCategory::Business => r#"<path d="M6 20L18 20M6 16L18 16M8 12L16 12"/>"#,
            IconCategory::Social => r#"<circle cx="12" cy="8" r="5"/><path d="M6 20C6 15.58 8.69 12 12 12C15.31 12 18 15.58 18 20"/>"#,
            IconCategory::Files => r#"<path d="M14 2H6V22H20V8L14 2Z"/><path d="M14 2V8H20"/>"#,
            IconCategory::Devices => r#"<rect x="4" y="2" width="16" height="20" rx="2"/>"#,
            IconCategory::Media => r#"<polygon points="10,8 16,12 10,16"/>"#,
        };
        shape.to_string()
    }

    fn symbol(&self, category: IconCategory) -> &'static str {
        match (self.icon_set, category) {
            (IconSet::NerdFonts, IconCategory::Development) => "\u{f121}",
            (IconSet::NerdFonts, IconCategory::Ui) => "\u{f009}",
            (IconSet::NerdFonts, IconCategory::Business) => "\u{f080}",
            (IconSet::NerdFonts, IconCategory::Social) => "\u{f004}",
            (IconSet::NerdFonts, IconCategory::Files) => "\u{f15b}",
            (IconSet::NerdFonts, IconCategory::Devices) => "\u{f108}",
            (IconSet::NerdFonts, IconCategory::Media) => "\u{f04b}",
            (IconSet::Unicode, IconCategory::Development) => "\u{2328}",
            (IconSet::Unicode, IconCategory::Ui) => "\u{25A3}",
            (IconSet::Unicode, IconCategory::Business) => "\u{25A4}",
            (IconSet::Unicode, IconCategory::Social) => "\u{2665}",
            (IconSet::Unicode, IconCategory::Files) => "\u{25A1}",
            (IconSet::Unicode, IconCategory::Devices) => "\u{25AD}",
            (IconSet::Unicode, IconCategory::Media) => "\u{25B6}",
            (IconSet::Ascii, IconCategory::Development) => "[DEV]",
            (IconSet::Ascii, IconCategory::Ui) => "[UI]",
            (IconSet::Ascii, IconCategory::Business) => "[BIZ]",
            (IconSet::Ascii, IconCategory::Social) => "[SOC]",
            (IconSet::Ascii, IconCategory::Files) => "[FILE]",
            (IconSet::Ascii, IconCategory::Devices) => "[DEV]",
            (IconSet::Ascii, IconCategory::Media) => "[MED]",
        }
    }
}

/// Full SVG snippet placed on the clipboard for `icon`
pub fn svg_snippet(icon: &IconEntry, glyphs: &dyn GlyphSet) -> String {
    format!(
        "<svg width=\"24\" height=\"24\" viewBox=\"0 0 24 24\" fill=\"none\" xmlns=\"http://www.w3.org/2000/svg\">\n    <!-- {} icon -->\n    {}\n</svg>",
        icon.display_name(),
        glyphs.outline(icon)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_set_parse() {
        assert_eq!(IconSet::parse("NerdFonts"), Some(IconSet::NerdFonts));
        assert_eq!(IconSet::parse("plain"), Some(IconSet::Ascii));
        assert_eq!(IconSet::parse("auto"), None);
    }

    #[test]
    fn test_all_icon_sets_have_symbols() {
        for icon_set in [IconSet::NerdFonts, IconSet::Unicode, IconSet::Ascii] {
            let glyphs = Glyphs::with_icon_set(icon_set);
            for category in IconCategory::ALL {
                assert!(!glyphs.symbol(category).is_empty());
            }
        }
    }

    #[test]
    fn test_svg_snippet() {
        let glyphs = Glyphs::with_icon_set(IconSet::Ascii);
        let icon = IconEntry::new("zoom-in", IconCategory::Ui);
        let svg = svg_snippet(&icon, &glyphs);
        assert!(svg.starts_with("<svg width=\"24\" height=\"24\""));
        assert!(svg.contains("<!-- Zoom In icon -->"));
        assert!(svg.contains("<circle"));
        assert!(svg.ends_with("</svg>"));
    }
}
