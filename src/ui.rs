//! Drawing the showcase into a terminal frame.
//!
//! Widget demos are shown as their live UI tree: one row per displayed
//! node, indented by depth, with the focused node highlighted. Code
//! samples, the blob field and overlays get dedicated renderings.

use crate::components::Component;
use crate::dom::{Document, NodeId};
use crate::focus::{control_kind, ControlKind};
use crate::samples::Framework;
use crate::showcase::{Section, Showcase};
use crate::styles::{theme, Theme, LIST_HIGHLIGHT_SYMBOL};
use crate::utils::TextInput;
use crate::widgets::{Dialog, DialogSize, NoticeStackWidget};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::Canvas;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

/// Presentation state owned by the app
#[derive(Debug, Default)]
pub struct ViewState {
    pub sections: ListState,
    pub focused: Option<NodeId>,
    /// Buffer of the text control being edited, if any
    pub editing: Option<TextInput>,
}

impl ViewState {
    pub fn section(&self) -> Section {
        self.sections
            .selected()
            .and_then(|i| Section::ALL.get(i).copied())
            .unwrap_or(Section::Components)
    }
}

const KEY_HINTS: &str =
    "q quit  \u{2191}\u{2193} section  Tab focus  Enter activate  \u{2190}\u{2192} adjust  Esc close  m modal  c copy  1-3 framework  t toast";

pub fn draw(frame: &mut Frame, showcase: &Showcase, view: &mut ViewState) {
    let t = theme();
    let area = frame.area();
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" componentry ", t.title_style()),
            Span::styled(
                format!("{} components", showcase.registry().len()),
                t.muted_style(),
            ),
        ])),
        header,
    );
    frame.render_widget(Paragraph::new(KEY_HINTS).style(t.muted_style()), footer);

    let [nav, content] =
        Layout::horizontal([Constraint::Length(22), Constraint::Min(20)]).areas(body);
    draw_sections(frame, nav, view, &t);

    let section = view.section();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.border_focused_style())
        .title(Span::styled(format!(" {} ", section.title()), t.title_style()));
    let inner = block.inner(content);
    frame.render_widget(block, content);

    match section {
        Section::Code => draw_code(frame, inner, showcase, view, &t),
        Section::Blobs => draw_blobs(frame, inner, showcase, &t),
        Section::Icons => {
            let [label, tree] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(inner);
            frame.render_widget(
                Paragraph::new(showcase.gallery().results_label()).style(t.emphasis_style()),
                label,
            );
            draw_tree(frame, tree, showcase, showcase.gallery().handle(), view, &t);
        }
        Section::Components | Section::Contact => {
            draw_tree(frame, inner, showcase, showcase.section_node(section), view, &t);
        }
    }

    let modal = showcase.modal();
    if modal.is_open() {
        let options = modal.options();
        let dialog = Dialog::new(&options.title, &options.content)
            .size(DialogSize::parse(&options.size))
            .active(modal.state() == crate::components::OverlayState::Open)
            .footer("Esc or Enter on \u{00d7} to close");
        frame.render_widget(dialog, area);
    }

    frame.render_widget(NoticeStackWidget::new(showcase.host().notices.active()), area);
}

fn draw_sections(frame: &mut Frame, area: Rect, view: &mut ViewState, t: &Theme) {
    let items: Vec<ListItem> = Section::ALL
        .iter()
        .map(|s| ListItem::new(s.title()).style(t.text_style()))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(t.border_style())
                .title(" Sections "),
        )
        .highlight_style(t.highlight_style())
        .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
    frame.render_stateful_widget(list, area, &mut view.sections);
}

/// Rows of the displayed part of a subtree, with the row of `focused`
pub fn tree_lines(
    doc: &Document,
    node: NodeId,
    focused: Option<NodeId>,
    editing: Option<&TextInput>,
    t: &Theme,
) -> (Vec<Line<'static>>, Option<usize>) {
    let mut lines = Vec::new();
    let mut focus_row = None;
    push_tree(doc, node, 0, focused, editing, t, &mut lines, &mut focus_row);
    (lines, focus_row)
}

#[allow(clippy::too_many_arguments)]
fn push_tree(
    doc: &Document,
    node: NodeId,
    depth: usize,
    focused: Option<NodeId>,
    editing: Option<&TextInput>,
    t: &Theme,
    lines: &mut Vec<Line<'static>>,
    focus_row: &mut Option<usize>,
) {
    if !doc.contains(node) || doc.style(node, "display") == Some("none") {
        return;
    }
    let is_focused = focused == Some(node);
    let mut text = doc.describe(node);
    if is_focused {
        if let Some(input) = editing {
            text = format!("{}  \u{270e} {}\u{2502}", text, input.text());
        }
        *focus_row = Some(lines.len());
    }
    let style = if is_focused {
        t.highlight_style()
    } else if doc.has_attr(node, "disabled") {
        t.disabled_style()
    } else if doc.has_class(node, "active") || doc.has_class(node, "open") {
        t.active_style()
    } else if doc.has_class(node, "error") || doc.has_class(node, "form-error") {
        t.error_style()
    } else {
        t.text_style()
    };
    let marker = if is_focused { "\u{25b6} " } else { "  " };
    lines.push(Line::from(vec![
        Span::raw("  ".repeat(depth)),
        Span::styled(format!("{}{}", marker, text), style),
    ]));
    for child in doc.children(node) {
        push_tree(doc, *child, depth + 1, focused, editing, t, lines, focus_row);
    }
}

fn draw_tree(
    frame: &mut Frame,
    area: Rect,
    showcase: &Showcase,
    node: Option<NodeId>,
    view: &ViewState,
    t: &Theme,
) {
    let Some(node) = node else {
        return;
    };
    let doc = &showcase.host().document;
    let editing = view
        .focused
        .filter(|f| control_kind(doc, *f) == ControlKind::Text)
        .and(view.editing.as_ref());
    let (lines, focus_row) = tree_lines(doc, node, view.focused, editing, t);
    let scroll = scroll_for(focus_row, area.height);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}

/// Vertical scroll that keeps `row` in the middle third of the view
pub fn scroll_for(row: Option<usize>, height: u16) -> u16 {
    let Some(row) = row else {
        return 0;
    };
    let row = row as u16;
    row.saturating_sub(height / 3)
}

fn draw_code(frame: &mut Frame, area: Rect, showcase: &Showcase, view: &ViewState, t: &Theme) {
    let [tabs, code, rest] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Percentage(55),
        Constraint::Min(3),
    ])
    .areas(area);

    let mut spans = Vec::new();
    for (i, framework) in Framework::ALL.iter().enumerate() {
        let style = if *framework == showcase.framework() {
            t.active_style()
        } else {
            t.muted_style()
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, framework.label()), style));
    }
    let copy = showcase.copy_button();
    let copy_label = copy
        .handle()
        .map(|n| showcase.host().document.text(n).to_string())
        .unwrap_or_else(|| copy.options().text.clone());
    spans.push(Span::styled(format!("  [c] {}", copy_label), t.emphasis_style()));
    frame.render_widget(Paragraph::new(Line::from(spans)), tabs);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.border_style())
        .title(format!(" {} ", showcase.framework().language()));
    frame.render_widget(
        Paragraph::new(showcase.highlighted().to_vec())
            .block(block)
            .wrap(Wrap { trim: false }),
        code,
    );

    draw_tree(frame, rest, showcase, showcase.faq().handle(), view, t);
}

fn draw_blobs(frame: &mut Frame, area: Rect, showcase: &Showcase, t: &Theme) {
    let field = showcase.blobs();
    let (width, height) = field.size();
    let background = t.background;
    let canvas = Canvas::default()
        .background_color(t.background_color())
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| ctx.draw(&field.shape(background)));
    frame.render_widget(canvas, area);
    let caption = format!(" t = {:.2} ", field.time());
    let caption_area = Rect::new(area.x, area.y, area.width.min(caption.len() as u16), 1);
    frame.render_widget(
        Paragraph::new(caption).style(Style::default().patch(t.muted_style())),
        caption_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::{Theme, ThemeType};

    #[test]
    fn test_hidden_subtrees_are_not_listed() {
        let mut doc = Document::new();
        let list = doc.element("ul", "menu", "");
        let shown = doc.element("li", "item", "Shown");
        let hidden = doc.element("li", "item", "Hidden");
        let inner = doc.element("span", "", "inner");
        doc.append_child(list, shown);
        doc.append_child(list, hidden);
        doc.append_child(hidden, inner);
        doc.set_style(hidden, "display", "none");

        let t = Theme::new(ThemeType::NoColor);
        let (lines, focus) = tree_lines(&doc, list, Some(shown), None, &t);
        assert_eq!(lines.len(), 2);
        assert_eq!(focus, Some(1));
        let text: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("Shown"));
    }

    #[test]
    fn test_editing_buffer_is_shown_on_focused_row() {
        let mut doc = Document::new();
        let input = doc.element("input", "form-input", "");
        let t = Theme::new(ThemeType::NoColor);
        let buffer = TextInput::with_text("hello");
        let (lines, _) = tree_lines(&doc, input, Some(input), Some(&buffer), &t);
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("hello"));
    }

    #[test]
    fn test_scroll_keeps_focus_visible() {
        assert_eq!(scroll_for(None, 30), 0);
        assert_eq!(scroll_for(Some(5), 30), 0);
        assert_eq!(scroll_for(Some(40), 30), 30);
    }
}
