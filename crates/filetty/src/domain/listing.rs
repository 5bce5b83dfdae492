//! Pure filter and sort functions feeding the content pane.
//!
//! Both functions return new sequences and never mutate their input, so the
//! forest and any previously computed views are never aliased by a sort.

use crate::domain::node::FileNode;

/// Sort key for the content pane listing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortKey {
    #[default]
    Name,
    Size,
}

impl SortKey {
    /// Returns the other sort key, used by the header toggle.
    pub fn toggled(self) -> Self {
        match self {
            Self::Name => Self::Size,
            Self::Size => Self::Name,
        }
    }

    /// Returns the header label for this sort key.
    pub fn display_label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Size => "size",
        }
    }
}

/// Returns the nodes whose name contains `query` case-insensitively, with
/// each retained node's children filtered the same way.
///
/// The match test at every level is the node's own name, not subtree
/// membership: a folder that does not match is dropped even when deeper
/// descendants would have matched. The empty query retains everything.
pub fn filter_items(nodes: &[FileNode], query: &str) -> Vec<FileNode> {
    let needle = query.to_lowercase();

    nodes
        .iter()
        .filter(|node| node.name.to_lowercase().contains(&needle))
        .map(|node| {
            let mut retained = node.clone();
            retained.children = filter_items(&node.children, query);

            retained
        })
        .collect()
}

/// Returns `nodes` ordered by `key` as a new sequence.
///
/// Name sorts ascending and case-insensitively, with the raw name breaking
/// ties so ordering stays deterministic. Size sorts descending, treating a
/// missing size as zero.
pub fn sort_items(nodes: &[FileNode], key: SortKey) -> Vec<FileNode> {
    let mut sorted = nodes.to_vec();

    match key {
        SortKey::Name => {
            sorted.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.name.cmp(&b.name))
            });
        }
        SortKey::Size => {
            sorted.sort_by(|a, b| b.size.unwrap_or(0).cmp(&a.size.unwrap_or(0)));
        }
    }

    sorted
}
