//! Expand/collapse presentation state for tree rows.

use std::collections::HashMap;

/// Open/closed flags for navigation-pane rows, keyed by stable row
/// identity.
///
/// This is pure presentation state held in one place instead of scattered
/// across recursive row instances; it is not part of the forest or the
/// navigation model and is never persisted. Every row starts closed.
#[derive(Default)]
pub struct DisclosureState {
    open_rows: HashMap<String, bool>,
}

impl DisclosureState {
    /// Creates a state with every row closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inverts the open flag for exactly one row.
    pub fn toggle(&mut self, row_id: &str) {
        let open = self.open_rows.entry(row_id.to_string()).or_insert(false);
        *open = !*open;
    }

    /// Returns whether the row is expanded.
    pub fn is_open(&self, row_id: &str) -> bool {
        self.open_rows.get(row_id).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_default_to_closed() {
        // Arrange
        let disclosure = DisclosureState::new();

        // Act
        let open = disclosure.is_open("Documents");

        // Assert
        assert!(!open);
    }

    #[test]
    fn test_toggle_opens_and_closes_one_row() {
        // Arrange
        let mut disclosure = DisclosureState::new();

        // Act
        disclosure.toggle("Documents");

        // Assert
        assert!(disclosure.is_open("Documents"));

        // Act
        disclosure.toggle("Documents");

        // Assert
        assert!(!disclosure.is_open("Documents"));
    }

    #[test]
    fn test_toggle_leaves_other_rows_untouched() {
        // Arrange
        let mut disclosure = DisclosureState::new();
        disclosure.toggle("Documents");

        // Act
        disclosure.toggle("Images");

        // Assert
        assert!(disclosure.is_open("Documents"));
        assert!(disclosure.is_open("Images"));
        assert!(!disclosure.is_open("Videos"));
    }
}
