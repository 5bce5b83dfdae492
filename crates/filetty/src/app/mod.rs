//! App-layer composition root and shared state container.
//!
//! This module wires the store and controllers and exposes [`App`], the
//! single state container the runtime mutates through typed [`NodeEvent`]s.
//! Rows never carry handler closures down the tree; they emit events upward
//! through one dispatcher, [`App::apply_event`].

use tokio::sync::mpsc;

use crate::domain::listing::{SortKey, filter_items, sort_items};
use crate::domain::node::FileNode;

mod disclosure;
mod download;
mod navigation;
mod selection;
mod store;

pub use disclosure::DisclosureState;
pub use download::{DownloadManager, DownloadOutcome};
pub use navigation::NavigationController;
pub use selection::SelectionController;
pub use store::{FetchToken, TreeStore};

/// Typed event emitted by a rendered row or a toolbar control.
#[derive(Clone, Debug)]
pub enum NodeEvent {
    /// The breadcrumb back control was activated.
    BackRequested,
    /// A row's disclosure control was toggled. Toggling never navigates or
    /// selects.
    DisclosureToggled { row_id: String },
    /// The download control was activated for the current selection.
    DownloadRequested,
    /// A file row was clicked.
    FileClicked(FileNode),
    /// A folder row was clicked.
    FolderClicked(FileNode),
    /// A content-pane row received the context-menu gesture.
    FolderContextMenu,
}

/// Payload-free notification consumed by the hosting environment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Notification {
    FileClick,
    FolderClick,
}

/// Which pane owns the keyboard cursor.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Pane {
    #[default]
    Navigation,
    Content,
}

/// One flattened navigation-pane row.
#[derive(Clone, Debug)]
pub struct TreeRow {
    /// Nesting depth, zero for forest roots.
    pub depth: usize,
    /// Source node for this row.
    pub node: FileNode,
    /// Whether this row's disclosure is open.
    pub open: bool,
    /// Stable identity used for disclosure and selection bookkeeping.
    pub row_id: String,
}

/// Holds all in-memory state for one widget session.
pub struct App {
    /// Cursor position in the content pane listing.
    pub content_cursor: usize,
    pub disclosure: DisclosureState,
    pub download: DownloadManager,
    /// Whether the search field is capturing keystrokes.
    pub editing_search: bool,
    pub focus: Pane,
    /// Cursor position in the navigation pane rows.
    pub nav_cursor: usize,
    pub navigation: NavigationController,
    pub search_value: String,
    pub selection: SelectionController,
    pub sort_key: SortKey,
    pub store: TreeStore,
    notifications: mpsc::UnboundedSender<Notification>,
}

impl App {
    /// Creates an app with an empty forest and initial session state.
    pub fn new(
        download: DownloadManager,
        notifications: mpsc::UnboundedSender<Notification>,
    ) -> Self {
        Self {
            content_cursor: 0,
            disclosure: DisclosureState::new(),
            download,
            editing_search: false,
            focus: Pane::default(),
            nav_cursor: 0,
            navigation: NavigationController::new(),
            notifications,
            search_value: String::new(),
            selection: SelectionController::new(),
            sort_key: SortKey::default(),
            store: TreeStore::new(),
        }
    }

    /// Applies one row/control event to the state machine.
    pub fn apply_event(&mut self, event: NodeEvent) {
        match event {
            NodeEvent::FolderClicked(node) => {
                if self.navigation.enter_folder(&node) {
                    // Folder navigation supersedes a prior file selection.
                    self.selection.clear();
                    self.content_cursor = 0;
                    self.notify(Notification::FolderClick);
                }
            }
            NodeEvent::FileClicked(node) => {
                self.selection.select(&node);
                self.notify(Notification::FileClick);
            }
            NodeEvent::FolderContextMenu => {
                self.notify(Notification::FolderClick);
            }
            NodeEvent::BackRequested => {
                self.navigation.go_back();
                self.content_cursor = 0;
            }
            NodeEvent::DisclosureToggled { row_id } => {
                self.disclosure.toggle(&row_id);
            }
            NodeEvent::DownloadRequested => {
                let Some(selected) = self.selection.selected().cloned() else {
                    return;
                };
                let download = self.download.clone();

                // The transfer settles on its own task; failures are
                // diagnostic-log only.
                tokio::spawn(async move {
                    download.run(Some(&selected)).await;
                });
            }
        }
    }

    /// Returns the content-pane listing for the current folder: children
    /// filtered by the search value, then ordered by the sort key.
    ///
    /// Recomputed from current inputs on every call; no caching.
    pub fn visible_items(&self) -> Vec<FileNode> {
        let Some(current) = self.navigation.current().filter(|node| node.is_folder()) else {
            return Vec::new();
        };

        sort_items(
            &filter_items(current.navigable_children(), &self.search_value),
            self.sort_key,
        )
    }

    /// Returns the navigation-pane rows: the forest flattened one level per
    /// open disclosure flag.
    pub fn navigation_rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        flatten_rows(self.store.items(), &self.disclosure, None, 0, &mut rows);

        rows
    }

    fn notify(&self, notification: Notification) {
        // A closed receiver only means no host is listening.
        let _ = self.notifications.send(notification);
    }
}

/// Appends `nodes` to `rows`, descending one level into each open folder.
fn flatten_rows(
    nodes: &[FileNode],
    disclosure: &DisclosureState,
    parent_identity: Option<&str>,
    depth: usize,
    rows: &mut Vec<TreeRow>,
) {
    for node in nodes {
        let row_id = node.row_identity(parent_identity);
        let open = disclosure.is_open(&row_id);

        rows.push(TreeRow {
            depth,
            node: node.clone(),
            open,
            row_id: row_id.clone(),
        });

        if open {
            flatten_rows(
                node.navigable_children(),
                disclosure,
                Some(&row_id),
                depth + 1,
                rows,
            );
        }
    }
}
