//! Centered dialog used to draw an open modal.
//!
//! Title, body and an optional footer are stacked with collapsed borders.
//! The page behind the dialog can be dimmed.

use crate::styles::theme;
use ratatui::layout::Spacing;
use ratatui::prelude::*;
use ratatui::symbols::merge::MergeStrategy;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Widget, Wrap};

/// Width class of a dialog, from the modal's `size` option
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl DialogSize {
    pub fn parse(size: &str) -> Self {
        match size {
            "sm" => DialogSize::Small,
            "lg" | "xl" => DialogSize::Large,
            _ => DialogSize::Medium,
        }
    }

    fn width_percent(&self) -> u16 {
        match self {
            DialogSize::Small => 40,
            DialogSize::Medium => 60,
            DialogSize::Large => 80,
        }
    }
}

pub struct Dialog<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub size: DialogSize,
    pub min_width: u16,
    /// Fraction of the area height, in percent
    pub height_percent: u16,
    /// Highlights the border while the enter animation runs
    pub active: bool,
    pub dim_background: bool,
    pub footer: Option<&'a str>,
}

impl<'a> Dialog<'a> {
    pub fn new(title: &'a str, content: &'a str) -> Self {
        Self {
            title,
            content,
            size: DialogSize::Medium,
            min_width: 40,
            height_percent: 40,
            active: true,
            dim_background: true,
            footer: None,
        }
    }

    pub fn size(mut self, size: DialogSize) -> Self {
        self.size = size;
        self
    }

    pub fn height(mut self, percent: u16) -> Self {
        self.height_percent = percent;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn dim_background(mut self, dim: bool) -> Self {
        self.dim_background = dim;
        self
    }

    pub fn footer(mut self, footer: &'a str) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Area the dialog occupies inside `area`
    pub fn popup_area(&self, area: Rect) -> Rect {
        let has_footer = self.footer.is_some();
        // title and footer are 3 rows each; collapsed borders save a row per seam
        let min_height = if has_footer { 3 + 5 + 3 - 2 } else { 3 + 5 - 1 };

        let width = (area.width as u32 * self.size.width_percent() as u32 / 100) as u16;
        let width = width
            .max(self.min_width)
            .min(area.width.saturating_sub(4));
        let height = (area.height as u32 * self.height_percent as u32 / 100) as u16;
        let height = height.max(min_height).min(area.height.saturating_sub(2));

        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        Rect::new(x, y, width, height)
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let popup = self.popup_area(area);

        if self.dim_background {
            Block::default().style(t.dim_style()).render(area, buf);
        }
        Widget::render(Clear, popup, buf);

        let border_style = if self.active {
            t.border_focused_style()
        } else {
            t.border_style()
        };

        let mut constraints = vec![Constraint::Length(3), Constraint::Min(5)];
        if self.footer.is_some() {
            constraints.push(Constraint::Length(3));
        }
        let layout = Layout::vertical(constraints)
            .spacing(Spacing::Overlap(1))
            .split(popup);

        let block = || {
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .padding(Padding::horizontal(2))
                .merge_borders(MergeStrategy::Exact)
                .style(t.background_style())
        };

        let title_block = block();
        let title_inner = title_block.inner(layout[0]);
        title_block.render(layout[0], buf);
        Paragraph::new(self.title)
            .alignment(Alignment::Center)
            .style(t.title_style())
            .render(title_inner, buf);

        let content_block = block();
        let content_inner = content_block.inner(layout[1]);
        content_block.render(layout[1], buf);
        Paragraph::new(self.content)
            .wrap(Wrap { trim: true })
            .style(t.text_style())
            .render(content_inner, buf);

        if let Some(footer) = self.footer {
            let footer_block = block();
            let footer_inner = footer_block.inner(layout[2]);
            footer_block.render(layout[2], buf);
            Paragraph::new(footer)
                .alignment(Alignment::Center)
                .style(t.muted_style())
                .render(footer_inner, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_parse() {
        assert_eq!(DialogSize::parse("sm"), DialogSize::Small);
        assert_eq!(DialogSize::parse("lg"), DialogSize::Large);
        assert_eq!(DialogSize::parse("md"), DialogSize::Medium);
        assert_eq!(DialogSize::parse("huge"), DialogSize::Medium);
    }

    #[test]
    fn test_popup_is_centered_and_bounded() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = Dialog::new("Title", "Body").popup_area(area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 16);
        assert_eq!((popup.x, popup.y), (20, 12));

        let tiny = Rect::new(0, 0, 30, 6);
        let popup = Dialog::new("Title", "Body").footer("Esc").popup_area(tiny);
        assert!(popup.width <= 26);
        assert!(popup.height <= 4);
    }
}
