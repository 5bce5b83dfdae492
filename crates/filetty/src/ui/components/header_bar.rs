use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::domain::listing::SortKey;
use crate::ui::Component;

/// Toolbar row with the download hint, sort key, and search field.
pub struct HeaderBar<'a> {
    editing_search: bool,
    search_value: &'a str,
    sort_key: SortKey,
}

impl<'a> HeaderBar<'a> {
    /// Creates a header bar for the current toolbar state.
    pub fn new(sort_key: SortKey, search_value: &'a str, editing_search: bool) -> Self {
        Self {
            editing_search,
            search_value,
            sort_key,
        }
    }
}

impl Component for HeaderBar<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let label_style = Style::default().fg(Color::Gray);
        let value_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let search_style = if self.editing_search {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            value_style
        };
        let search_text = if self.editing_search {
            format!("{}▏", self.search_value)
        } else if self.search_value.is_empty() {
            "Search files".to_string()
        } else {
            self.search_value.to_string()
        };

        let toolbar = Line::from(vec![
            Span::styled(" Download [d] ", label_style),
            Span::styled("│ Sort By: ", label_style),
            Span::styled(self.sort_key.display_label(), value_style),
            Span::styled(" [s] ", label_style),
            Span::styled("│ Search [/]: ", label_style),
            Span::styled(search_text, search_style),
        ]);

        let header = Paragraph::new(toolbar).block(Block::default().borders(Borders::BOTTOM));
        f.render_widget(header, area);
    }
}
