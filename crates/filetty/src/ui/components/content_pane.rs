use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::app::SelectionController;
use crate::domain::node::FileNode;
use crate::ui::Component;
use crate::ui::util::{format_size, truncate_with_ellipsis};

const EMPTY_STATE_MESSAGE: &str =
    "Select a folder or file to view contents or enter a search term...";

/// Content pane rendering the breadcrumb and the filtered, sorted listing
/// of the current folder.
pub struct ContentPane<'a> {
    breadcrumb: &'a [FileNode],
    cursor: usize,
    focused: bool,
    items: &'a [FileNode],
    selection: &'a SelectionController,
}

impl<'a> ContentPane<'a> {
    /// Creates a content pane for the current navigation state.
    pub fn new(
        breadcrumb: &'a [FileNode],
        items: &'a [FileNode],
        selection: &'a SelectionController,
        cursor: usize,
        focused: bool,
    ) -> Self {
        Self {
            breadcrumb,
            cursor,
            focused,
            items,
            selection,
        }
    }

    fn breadcrumb_line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            " / ",
            Style::default().fg(Color::DarkGray),
        )];

        for (index, node) in self.breadcrumb.iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(" / ", Style::default().fg(Color::DarkGray)));
            }

            spans.push(Span::styled(
                node.name.clone(),
                Style::default().fg(Color::Gray),
            ));
        }

        if !self.breadcrumb.is_empty() {
            spans.push(Span::styled(
                "  [backspace: back]",
                Style::default().fg(Color::DarkGray),
            ));
        }

        Line::from(spans)
    }

    fn row_line(&self, node: &FileNode, max_width: usize) -> Line<'static> {
        let marker = if node.is_folder() { "▸ " } else { "  " };
        let name_style = if self.selection.is_selected(node) {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if node.is_folder() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };

        let mut details = Vec::new();
        if let Some(last_modified) = &node.last_modified {
            details.push(format!("Last Modified: {last_modified}"));
        }
        if let Some(size) = node.size {
            details.push(format!("Size: {}", format_size(size)));
        }
        let details = details.join(" | ");

        let name_budget = max_width.saturating_sub(details.len() + 4);
        let mut spans = vec![
            Span::styled(marker, Style::default().fg(Color::DarkGray)),
            Span::styled(truncate_with_ellipsis(&node.name, name_budget), name_style),
        ];
        if !details.is_empty() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(details, Style::default().fg(Color::DarkGray)));
        }

        Line::from(spans)
    }
}

impl Component for ContentPane<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Content ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        f.render_widget(Paragraph::new(self.breadcrumb_line()), chunks[0]);

        if self.items.is_empty() {
            let empty_state = Paragraph::new(Span::styled(
                EMPTY_STATE_MESSAGE,
                Style::default().fg(Color::DarkGray),
            ));
            f.render_widget(empty_state, chunks[1]);

            return;
        }

        let max_width = chunks[1].width as usize;
        let items: Vec<ListItem<'_>> = self
            .items
            .iter()
            .map(|node| ListItem::new(self.row_line(node, max_width)))
            .collect();

        let mut list_state = ListState::default();
        list_state.select(Some(self.cursor.min(self.items.len() - 1)));

        let list = List::new(items).highlight_style(Style::default().bg(Color::DarkGray));

        f.render_stateful_widget(list, chunks[1], &mut list_state);
    }
}
