use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::app::{SelectionController, TreeRow};
use crate::ui::Component;
use crate::ui::util::truncate_with_ellipsis;

const CLOSED_DISCLOSURE: &str = "▸ ";
const OPEN_DISCLOSURE: &str = "▾ ";
const LEAF_GUTTER: &str = "  ";
const INDENT_PER_LEVEL: usize = 2;

/// Navigation pane rendering the disclosure tree over the whole forest.
pub struct TreePane<'a> {
    cursor: usize,
    focused: bool,
    rows: &'a [TreeRow],
    selection: &'a SelectionController,
}

impl<'a> TreePane<'a> {
    /// Creates a tree pane over the flattened rows.
    pub fn new(
        rows: &'a [TreeRow],
        selection: &'a SelectionController,
        cursor: usize,
        focused: bool,
    ) -> Self {
        Self {
            cursor,
            focused,
            rows,
            selection,
        }
    }

    fn row_line(&self, row: &TreeRow, max_width: usize) -> Line<'static> {
        let indent = " ".repeat(row.depth * INDENT_PER_LEVEL);
        let disclosure = if row.node.is_folder() {
            if row.open {
                OPEN_DISCLOSURE
            } else {
                CLOSED_DISCLOSURE
            }
        } else {
            LEAF_GUTTER
        };
        let name_style = if self.selection.is_selected(&row.node) {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if row.node.is_folder() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        let name_budget = max_width.saturating_sub(indent.len() + 2);

        Line::from(vec![
            Span::raw(indent),
            Span::styled(disclosure, Style::default().fg(Color::DarkGray)),
            Span::styled(
                truncate_with_ellipsis(&row.node.name, name_budget),
                name_style,
            ),
        ])
    }
}

impl Component for TreePane<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Navigation ");
        let inner_width = block.inner(area).width as usize;

        let items: Vec<ListItem<'_>> = self
            .rows
            .iter()
            .map(|row| ListItem::new(self.row_line(row, inner_width)))
            .collect();

        let mut list_state = ListState::default();
        if !self.rows.is_empty() {
            list_state.select(Some(self.cursor.min(self.rows.len() - 1)));
        }

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray));

        f.render_stateful_widget(list, area, &mut list_state);
    }
}
