use serde::{Deserialize, Serialize};

/// Kind tag distinguishing files from folders in the forest.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    File,
    Folder,
}

/// One file or folder record in the forest.
///
/// Nodes arrive from the data source in the widget wire format (`type`,
/// `lastModified`) and deserialize leniently: every field has a default so a
/// sparse payload still produces a usable node. Children are exclusively
/// owned by their parent, which makes the forest a strict tree by
/// construction.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct FileNode {
    /// Display and sort key. Non-empty for well-formed nodes.
    pub name: String,
    /// File or folder tag.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// File size in bytes. Meaningless for folders but not forbidden.
    pub size: Option<u64>,
    /// Display-only timestamp string.
    #[serde(rename = "lastModified")]
    pub last_modified: Option<String>,
    /// Source path used for downloads and stable row identity.
    pub path: Option<String>,
    /// Child nodes. Only meaningful when `kind` is [`NodeKind::Folder`].
    pub children: Vec<FileNode>,
}

impl FileNode {
    /// Returns true when this node is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// Returns the children reachable by navigation.
    ///
    /// A file never exposes navigable children, even when the payload
    /// attached a `children` value to it.
    pub fn navigable_children(&self) -> &[FileNode] {
        if self.is_folder() {
            return &self.children;
        }

        &[]
    }

    /// Returns the stable row identity used for disclosure and selection
    /// bookkeeping.
    ///
    /// The node's `path` wins when present; nodes without one get an
    /// identity synthesized from the ancestor name trail so the identity
    /// survives forest reloads.
    pub fn row_identity(&self, parent_identity: Option<&str>) -> String {
        if let Some(path) = self.path.as_deref()
            && !path.is_empty()
        {
            return path.to_string();
        }

        match parent_identity {
            Some(parent) => format!("{parent}/{}", self.name),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> FileNode {
        FileNode {
            name: name.to_string(),
            ..FileNode::default()
        }
    }

    #[test]
    fn test_sparse_payload_deserializes_with_defaults() {
        // Arrange
        let payload = serde_json::json!({ "name": "File1.txt" });

        // Act
        let node: FileNode =
            serde_json::from_value(payload).expect("sparse node should deserialize");

        // Assert
        assert_eq!(node.name, "File1.txt");
        assert_eq!(node.kind, NodeKind::File);
        assert!(node.children.is_empty());
        assert!(node.size.is_none());
    }

    #[test]
    fn test_wire_field_names_map_to_node_fields() {
        // Arrange
        let payload = serde_json::json!({
            "name": "Documents",
            "type": "folder",
            "lastModified": "2024-03-01 09:15",
            "children": [{ "name": "File1.txt", "type": "file", "size": 12 }],
        });

        // Act
        let node: FileNode = serde_json::from_value(payload).expect("node should deserialize");

        // Assert
        assert_eq!(node.kind, NodeKind::Folder);
        assert_eq!(node.last_modified.as_deref(), Some("2024-03-01 09:15"));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].size, Some(12));
    }

    #[test]
    fn test_file_node_never_exposes_navigable_children() {
        // Arrange
        let mut node = file("weird.txt");
        node.children = vec![file("nested.txt")];

        // Act
        let children = node.navigable_children();

        // Assert
        assert!(children.is_empty());
    }

    #[test]
    fn test_empty_folder_exposes_empty_children() {
        // Arrange
        let node = FileNode {
            name: "Empty".to_string(),
            kind: NodeKind::Folder,
            ..FileNode::default()
        };

        // Act
        let children = node.navigable_children();

        // Assert
        assert!(children.is_empty());
    }

    #[test]
    fn test_row_identity_prefers_path() {
        // Arrange
        let mut node = file("report.pdf");
        node.path = Some("/srv/files/report.pdf".to_string());

        // Act
        let identity = node.row_identity(Some("Documents"));

        // Assert
        assert_eq!(identity, "/srv/files/report.pdf");
    }

    #[test]
    fn test_row_identity_synthesized_from_name_trail() {
        // Arrange
        let node = file("report.pdf");

        // Act
        let root_identity = node.row_identity(None);
        let nested_identity = node.row_identity(Some("Documents/2024"));

        // Assert
        assert_eq!(root_identity, "report.pdf");
        assert_eq!(nested_identity, "Documents/2024/report.pdf");
    }
}
