//! Terminal rendering of the host's notification stacks.
//!
//! Each stack position maps to a screen corner. Notices are drawn in
//! arrival order, newest nearest the corner's edge, and never shift the
//! rest of the UI.

use crate::host::{Notice, StackPosition};
use crate::styles::theme;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

const NOTICE_WIDTH: u16 = 44;
const NOTICE_HEIGHT: u16 = 3;

/// Draws every active notice in its corner of the area
pub struct NoticeStackWidget<'a> {
    notices: &'a [Notice],
}

impl<'a> NoticeStackWidget<'a> {
    pub fn new(notices: &'a [Notice]) -> Self {
        Self { notices }
    }
}

/// Area of the `index`-th notice stacked in `position`
pub fn notice_area(area: Rect, position: StackPosition, index: u16) -> Option<Rect> {
    let width = NOTICE_WIDTH.min(area.width.saturating_sub(4));
    let offset = index * NOTICE_HEIGHT;
    if width == 0 || offset + NOTICE_HEIGHT + 2 > area.height {
        return None;
    }
    let left = area.x + 2;
    let right = area.x + area.width.saturating_sub(width + 2);
    let top = area.y + 1 + offset;
    let bottom = (area.y + area.height).saturating_sub(NOTICE_HEIGHT + 1 + offset);
    let (x, y) = match position {
        StackPosition::TopRight => (right, top),
        StackPosition::TopLeft => (left, top),
        StackPosition::BottomRight => (right, bottom),
        StackPosition::BottomLeft => (left, bottom),
    };
    Some(Rect::new(x, y, width, NOTICE_HEIGHT))
}

impl Widget for NoticeStackWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let mut counts: Vec<(StackPosition, u16)> = Vec::new();
        for notice in self.notices {
            let index = match counts.iter_mut().find(|(p, _)| *p == notice.position) {
                Some((_, n)) => {
                    *n += 1;
                    *n - 1
                }
                None => {
                    counts.push((notice.position, 1));
                    0
                }
            };
            let Some(rect) = notice_area(area, notice.position, index) else {
                continue;
            };

            Widget::render(Clear, rect, buf);
            let text_style = if notice.is_leaving() {
                t.muted_style()
            } else {
                t.text_style().add_modifier(Modifier::BOLD)
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(t.border_style().fg(notice.variant.color()))
                .style(t.background_style());
            let message = format!(" {} {} ", notice.variant.icon(), notice.message);
            Paragraph::new(message)
                .block(block)
                .style(text_style)
                .alignment(Alignment::Left)
                .wrap(Wrap { trim: true })
                .render(rect, buf);
        }
    }
}
