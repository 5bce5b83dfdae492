//! External data source protocol and the filesystem implementation.
//!
//! A [`DataSource`] hands out candidate forest payloads and announces
//! changes through a broadcast channel. Subscriptions are scope-bound:
//! dropping the receiver is the unsubscription, so no callback can outlive
//! its consumer.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use ignore::WalkBuilder;
use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::broadcast;

use crate::domain::node::{FileNode, NodeKind};

const CHANGE_CHANNEL_CAPACITY: usize = 16;
const MAX_DEPTH: usize = 10;
const MAX_ENTRIES: usize = 5_000;

/// Boxed async result used by [`DataSource`] trait methods.
pub type SourceFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Payload-free change notification.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SourceChange;

/// Failure raised while producing a forest payload.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading the underlying tree failed.
    #[error("failed to read source tree: {0}")]
    Io(#[from] io::Error),
}

/// Asynchronously updated provider of forest payloads.
///
/// `get_value` pulls the full candidate payload; `subscribe` delivers change
/// events that tell the consumer a fresh pull is worthwhile. The trait is
/// object-safe so the runtime can hold it as `Arc<dyn DataSource>`.
#[cfg_attr(test, mockall::automock)]
pub trait DataSource: Send + Sync {
    /// Pulls the current candidate forest payload.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the payload cannot be produced.
    fn get_value(&self) -> SourceFuture<Result<Value, SourceError>>;

    /// Subscribes to change notifications.
    fn subscribe(&self) -> broadcast::Receiver<SourceChange>;
}

/// Data source scanning a root directory on every pull.
///
/// The scan is gitignore-aware and bounded in depth and entry count so a
/// pathological tree cannot stall the app. Change events are fired by the
/// host (the refresh key in the binary) through [`FsDataSource::notify_changed`].
pub struct FsDataSource {
    changes: broadcast::Sender<SourceChange>,
    root: PathBuf,
}

impl FsDataSource {
    /// Creates a source rooted at `root`.
    pub fn new(root: PathBuf) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);

        Self { changes, root }
    }

    /// Fires one change event to all current subscribers.
    pub fn notify_changed(&self) {
        // A send error only means nobody is subscribed right now.
        let _ = self.changes.send(SourceChange);
    }
}

impl DataSource for FsDataSource {
    fn get_value(&self) -> SourceFuture<Result<Value, SourceError>> {
        let root = self.root.clone();

        Box::pin(async move {
            let forest = tokio::task::spawn_blocking(move || scan_forest(&root))
                .await
                .map_err(io::Error::other)?;

            serde_json::to_value(forest).map_err(|error| SourceError::Io(io::Error::other(error)))
        })
    }

    fn subscribe(&self) -> broadcast::Receiver<SourceChange> {
        self.changes.subscribe()
    }
}

/// Walks `root` and assembles the nested forest.
///
/// The walker yields parents before children, so each entry can be attached
/// by descending the already-built levels along its relative path. Entries
/// past the depth or count bound are dropped.
fn scan_forest(root: &Path) -> Vec<FileNode> {
    let walker = WalkBuilder::new(root)
        .max_depth(Some(MAX_DEPTH))
        .hidden(false)
        .build();

    let mut forest = Vec::new();
    let mut entry_count = 0;

    // The first entry is the root itself.
    for entry in walker.filter_map(Result::ok).skip(1) {
        if entry_count >= MAX_ENTRIES {
            break;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        if insert_node(&mut forest, relative, build_node(&entry)) {
            entry_count += 1;
        }
    }

    sort_levels(&mut forest);

    forest
}

/// Builds one forest node from a walked directory entry.
fn build_node(entry: &ignore::DirEntry) -> FileNode {
    let name = entry.file_name().to_string_lossy().to_string();
    let is_dir = entry.file_type().is_some_and(|file_type| file_type.is_dir());
    let path = entry.path().to_string_lossy().to_string();

    let mut node = FileNode {
        name,
        kind: if is_dir { NodeKind::Folder } else { NodeKind::File },
        path: Some(path),
        ..FileNode::default()
    };

    if !is_dir && let Ok(metadata) = entry.metadata() {
        node.size = Some(metadata.len());
        node.last_modified = metadata
            .modified()
            .ok()
            .map(|modified| format_modified(modified.into()));
    }

    node
}

/// Attaches `node` at the level addressed by `relative`, returning whether
/// it was placed.
///
/// Ancestor folders are located by name; an entry whose ancestor was dropped
/// (capped or unreadable) is skipped.
fn insert_node(forest: &mut Vec<FileNode>, relative: &Path, node: FileNode) -> bool {
    let components: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().to_string())
        .collect();
    let Some((_, ancestors)) = components.split_last() else {
        return false;
    };

    let mut level = forest;
    for ancestor in ancestors {
        let Some(position) = level
            .iter()
            .position(|candidate| candidate.is_folder() && candidate.name == *ancestor)
        else {
            return false;
        };

        level = &mut level[position].children;
    }

    level.push(node);

    true
}

/// Orders every level folders-first, then by name, for a stable initial
/// listing.
fn sort_levels(nodes: &mut [FileNode]) {
    nodes.sort_by(|a, b| {
        b.is_folder()
            .cmp(&a.is_folder())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    for node in nodes {
        sort_levels(&mut node.children);
    }
}

/// Formats a modification timestamp for display.
fn format_modified(modified: OffsetDateTime) -> String {
    let year = modified.year();
    let month = u8::from(modified.month());
    let day = modified.day();
    let hour = modified.hour();
    let minute = modified.minute();

    format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_get_value_builds_nested_forest() {
        // Arrange
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        fs::create_dir(temp_dir.path().join("docs")).expect("failed to create dir");
        fs::write(temp_dir.path().join("docs/guide.md"), "hello").expect("failed to write file");
        fs::write(temp_dir.path().join("readme.md"), "hi").expect("failed to write file");
        let source = FsDataSource::new(temp_dir.path().to_path_buf());

        // Act
        let payload = source.get_value().await.expect("scan should succeed");

        // Assert
        let forest: Vec<FileNode> =
            serde_json::from_value(payload).expect("payload should deserialize");
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].name, "docs");
        assert!(forest[0].is_folder());
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].name, "guide.md");
        assert_eq!(forest[1].name, "readme.md");
    }

    #[tokio::test]
    async fn test_get_value_attaches_file_metadata() {
        // Arrange
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        fs::write(temp_dir.path().join("data.bin"), b"12345").expect("failed to write file");
        let source = FsDataSource::new(temp_dir.path().to_path_buf());

        // Act
        let payload = source.get_value().await.expect("scan should succeed");

        // Assert
        let forest: Vec<FileNode> =
            serde_json::from_value(payload).expect("payload should deserialize");
        assert_eq!(forest[0].size, Some(5));
        assert!(forest[0].last_modified.is_some());
        assert!(
            forest[0]
                .path
                .as_deref()
                .is_some_and(|path| path.ends_with("data.bin"))
        );
    }

    #[tokio::test]
    async fn test_get_value_orders_folders_before_files() {
        // Arrange
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        fs::write(temp_dir.path().join("aaa.txt"), "").expect("failed to write file");
        fs::create_dir(temp_dir.path().join("zzz")).expect("failed to create dir");
        let source = FsDataSource::new(temp_dir.path().to_path_buf());

        // Act
        let payload = source.get_value().await.expect("scan should succeed");

        // Assert
        let forest: Vec<FileNode> =
            serde_json::from_value(payload).expect("payload should deserialize");
        assert_eq!(forest[0].name, "zzz");
        assert_eq!(forest[1].name, "aaa.txt");
    }

    #[tokio::test]
    async fn test_notify_changed_reaches_subscribers() {
        // Arrange
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let source = FsDataSource::new(temp_dir.path().to_path_buf());
        let mut changes = source.subscribe();

        // Act
        source.notify_changed();

        // Assert
        assert_eq!(
            changes.recv().await.expect("change should arrive"),
            SourceChange
        );
    }

    #[test]
    fn test_notify_changed_without_subscribers_is_harmless() {
        // Arrange
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let source = FsDataSource::new(temp_dir.path().to_path_buf());

        // Act & Assert: no panic.
        source.notify_changed();
    }

    #[test]
    fn test_format_modified_uses_sortable_layout() {
        // Arrange
        let modified =
            OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("timestamp should convert");

        // Act
        let formatted = format_modified(modified);

        // Assert
        assert_eq!(formatted, "2023-11-14 22:13");
    }
}
