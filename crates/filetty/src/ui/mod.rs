pub mod components;
pub mod util;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::{Pane, SelectionController, TreeRow};
use crate::domain::listing::SortKey;
use crate::domain::node::FileNode;

/// A trait for UI components that enforces a standard rendering interface.
pub trait Component {
    fn render(&self, f: &mut Frame, area: Rect);
}

/// Per-frame snapshot of everything the UI reads.
pub struct RenderContext<'a> {
    pub breadcrumb: &'a [FileNode],
    pub content_cursor: usize,
    pub editing_search: bool,
    pub focus: Pane,
    pub nav_cursor: usize,
    pub nav_rows: &'a [TreeRow],
    pub search_value: &'a str,
    pub selection: &'a SelectionController,
    pub sort_key: SortKey,
    pub visible: &'a [FileNode],
}

/// Renders one frame: header, navigation pane, content pane, footer.
pub fn render(f: &mut Frame, context: RenderContext<'_>) {
    let RenderContext {
        breadcrumb,
        content_cursor,
        editing_search,
        focus,
        nav_cursor,
        nav_rows,
        search_value,
        selection,
        sort_key,
        visible,
    } = context;

    let area = f.area();

    let outer_chunks = Layout::default()
        .constraints([
            Constraint::Length(2), // Toolbar
            Constraint::Min(0),    // Panes
            Constraint::Length(1), // Footer bar
        ])
        .split(area);

    components::header_bar::HeaderBar::new(sort_key, search_value, editing_search)
        .render(f, outer_chunks[0]);

    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(outer_chunks[1]);

    components::tree_pane::TreePane::new(
        nav_rows,
        selection,
        nav_cursor,
        focus == Pane::Navigation,
    )
    .render(f, pane_chunks[0]);

    components::content_pane::ContentPane::new(
        breadcrumb,
        visible,
        selection,
        content_cursor,
        focus == Pane::Content,
    )
    .render(f, pane_chunks[1]);

    components::footer_bar::FooterBar.render(f, outer_chunks[2]);
}
