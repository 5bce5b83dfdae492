//! Single-item selection targeted by actions such as download.

use crate::domain::node::FileNode;

/// Tracks the item most recently clicked for action purposes.
///
/// Selection is independent of navigation: selecting a file never moves the
/// navigation cursor, and entering a folder clears the selection (folder
/// navigation supersedes a prior file selection).
#[derive(Default)]
pub struct SelectionController {
    selected: Option<FileNode>,
}

impl SelectionController {
    /// Creates a controller with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `node` as the action target.
    pub fn select(&mut self, node: &FileNode) {
        self.selected = Some(node.clone());
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Returns the selected item, when any.
    pub fn selected(&self) -> Option<&FileNode> {
        self.selected.as_ref()
    }

    /// Returns whether `node` is the selected item.
    ///
    /// Rows compare by `path` string, not node identity, so two distinct
    /// instances carrying the same path are the same selection target. A
    /// node without a path is never reported selected.
    pub fn is_selected(&self, node: &FileNode) -> bool {
        let Some(selected_path) = self
            .selected
            .as_ref()
            .and_then(|selected| selected.path.as_deref())
        else {
            return false;
        };
        let Some(node_path) = node.path.as_deref() else {
            return false;
        };

        !node_path.is_empty() && selected_path == node_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_at(name: &str, path: &str) -> FileNode {
        FileNode {
            name: name.to_string(),
            path: Some(path.to_string()),
            ..FileNode::default()
        }
    }

    #[test]
    fn test_select_sets_the_action_target() {
        // Arrange
        let mut selection = SelectionController::new();
        let node = file_at("File1.txt", "/srv/File1.txt");

        // Act
        selection.select(&node);

        // Assert
        assert_eq!(
            selection.selected().map(|selected| selected.name.as_str()),
            Some("File1.txt")
        );
    }

    #[test]
    fn test_clear_resets_the_selection() {
        // Arrange
        let mut selection = SelectionController::new();
        selection.select(&file_at("File1.txt", "/srv/File1.txt"));

        // Act
        selection.clear();

        // Assert
        assert!(selection.selected().is_none());
    }

    #[test]
    fn test_is_selected_compares_by_path_not_identity() {
        // Arrange
        let mut selection = SelectionController::new();
        selection.select(&file_at("File1.txt", "/srv/File1.txt"));
        let other_instance = file_at("renamed.txt", "/srv/File1.txt");

        // Act
        let matches = selection.is_selected(&other_instance);

        // Assert
        assert!(matches);
    }

    #[test]
    fn test_is_selected_rejects_different_path() {
        // Arrange
        let mut selection = SelectionController::new();
        selection.select(&file_at("File1.txt", "/srv/File1.txt"));

        // Act
        let matches = selection.is_selected(&file_at("File2.txt", "/srv/File2.txt"));

        // Assert
        assert!(!matches);
    }

    #[test]
    fn test_node_without_path_is_never_selected() {
        // Arrange
        let mut selection = SelectionController::new();
        let pathless = FileNode {
            name: "loose.txt".to_string(),
            ..FileNode::default()
        };
        selection.select(&pathless);

        // Act
        let matches = selection.is_selected(&pathless);

        // Assert
        assert!(!matches);
    }
}
