//! Code highlighting for the showcase's code samples.

use crate::styles::ThemeType;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use tracing::debug;

/// Turns source text into styled lines
pub trait Highlighter {
    /// Highlight `code` written in `language` (a file extension or syntax
    /// token such as `js` or `html`)
    fn highlight(&mut self, code: &str, language: &str) -> Vec<Line<'static>>;
}

/// Lines without styling
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&mut self, code: &str, _language: &str) -> Vec<Line<'static>> {
        code.lines().map(|l| Line::from(l.to_string())).collect()
    }
}

/// Preferred syntax theme for a UI theme type, falling back to any loaded theme
pub fn syntax_theme(theme_set: &ThemeSet, theme_type: ThemeType) -> Option<&Theme> {
    let preferred: &[&str] = match theme_type {
        ThemeType::Light => &["base16-ocean.light", "InspiredGitHub", "Solarized (light)"],
        ThemeType::Dark | ThemeType::NoColor => &[
            "base16-ocean.dark",
            "base16-eighties.dark",
            "base16-mocha.dark",
        ],
    };
    preferred
        .iter()
        .find_map(|name| theme_set.themes.get(*name))
        .or_else(|| theme_set.themes.values().next())
}

/// Highlighter backed by syntect's bundled syntaxes and themes
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_type: ThemeType,
}

impl SyntectHighlighter {
    pub fn new(theme_type: ThemeType) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_type,
        }
    }

    pub fn set_theme_type(&mut self, theme_type: ThemeType) {
        self.theme_type = theme_type;
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&mut self, code: &str, language: &str) -> Vec<Line<'static>> {
        let theme = match syntax_theme(&self.theme_set, self.theme_type) {
            Some(theme) if self.theme_type != ThemeType::NoColor => theme,
            _ => return PlainHighlighter.highlight(code, language),
        };
        let syntax = self
            .syntax_set
            .find_syntax_by_token(language)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut lines = Vec::new();
        for line in code.lines() {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => {
                    let spans: Vec<Span<'static>> = ranges
                        .into_iter()
                        .map(|(style, text)| {
                            let fg = Color::Rgb(
                                style.foreground.r,
                                style.foreground.g,
                                style.foreground.b,
                            );
                            Span::styled(text.to_string(), Style::default().fg(fg))
                        })
                        .collect();
                    lines.push(Line::from(spans));
                }
                Err(e) => {
                    debug!("Highlighting failed for {} sample: {}", language, e);
                    lines.push(Line::from(line.to_string()));
                }
            }
        }
        lines
    }
}
