//! Breadcrumb path and navigation cursor.

use crate::domain::node::FileNode;

/// Tracks the breadcrumb from root to the currently open folder.
///
/// The path holds owned clones of the nodes that were navigated into, so the
/// cursor keeps pointing at the tree it walked even after the forest is
/// replaced by a reload. An empty path means the cursor is at root with no
/// current item.
#[derive(Default)]
pub struct NavigationController {
    current: Option<FileNode>,
    path: Vec<FileNode>,
}

impl NavigationController {
    /// Creates a controller at root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the folder or file most recently navigated into.
    pub fn current(&self) -> Option<&FileNode> {
        self.current.as_ref()
    }

    /// Returns the breadcrumb from root to the current folder.
    pub fn path(&self) -> &[FileNode] {
        &self.path
    }

    /// Enters `node` when it is a folder, extending the breadcrumb.
    ///
    /// Returns whether navigation happened; file nodes are rejected without
    /// changing any state.
    pub fn enter_folder(&mut self, node: &FileNode) -> bool {
        if !node.is_folder() {
            return false;
        }

        self.current = Some(node.clone());
        self.path.push(node.clone());

        true
    }

    /// Steps back one breadcrumb level.
    ///
    /// At root this is a no-op: the path stays empty and the cursor unset.
    pub fn go_back(&mut self) {
        self.path.pop();
        self.current = self.path.last().cloned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::NodeKind;

    fn folder(name: &str) -> FileNode {
        FileNode {
            name: name.to_string(),
            kind: NodeKind::Folder,
            ..FileNode::default()
        }
    }

    #[test]
    fn test_enter_folder_sets_cursor_and_path() {
        // Arrange
        let mut navigation = NavigationController::new();

        // Act
        let entered = navigation.enter_folder(&folder("Documents"));

        // Assert
        assert!(entered);
        assert_eq!(navigation.current().map(|node| node.name.as_str()), Some("Documents"));
        assert_eq!(navigation.path().len(), 1);
    }

    #[test]
    fn test_enter_folder_rejects_file_nodes() {
        // Arrange
        let mut navigation = NavigationController::new();
        let file = FileNode {
            name: "notes.txt".to_string(),
            ..FileNode::default()
        };

        // Act
        let entered = navigation.enter_folder(&file);

        // Assert
        assert!(!entered);
        assert!(navigation.current().is_none());
        assert!(navigation.path().is_empty());
    }

    #[test]
    fn test_go_back_returns_to_previous_folder() {
        // Arrange
        let mut navigation = NavigationController::new();
        navigation.enter_folder(&folder("A"));
        navigation.enter_folder(&folder("B"));

        // Act
        navigation.go_back();

        // Assert
        assert_eq!(navigation.current().map(|node| node.name.as_str()), Some("A"));
        assert_eq!(navigation.path().len(), 1);
        assert_eq!(navigation.path()[0].name, "A");
    }

    #[test]
    fn test_go_back_at_root_is_a_no_op() {
        // Arrange
        let mut navigation = NavigationController::new();

        // Act
        navigation.go_back();

        // Assert
        assert!(navigation.current().is_none());
        assert!(navigation.path().is_empty());
    }

    #[test]
    fn test_go_back_to_root_clears_cursor() {
        // Arrange
        let mut navigation = NavigationController::new();
        navigation.enter_folder(&folder("A"));

        // Act
        navigation.go_back();

        // Assert
        assert!(navigation.current().is_none());
        assert!(navigation.path().is_empty());
    }
}
