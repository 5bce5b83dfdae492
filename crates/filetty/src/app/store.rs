//! Forest ownership and reload bookkeeping.

use serde_json::Value;
use tracing::debug;

use crate::domain::node::FileNode;

/// Token stamped onto one data-source pull.
///
/// Tokens are issued monotonically; only the pull carrying the latest token
/// may replace the forest, so a slow pull finishing after a newer one cannot
/// overwrite fresh data with stale data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FetchToken(u64);

/// Owns the root forest and replaces it wholesale on accepted updates.
#[derive(Default)]
pub struct TreeStore {
    items: Vec<FileNode>,
    latest_token: u64,
    revision: u64,
}

impl TreeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current forest.
    pub fn items(&self) -> &[FileNode] {
        &self.items
    }

    /// Returns the reload counter, bumped on every accepted replacement.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the forest with `payload` when it is a well-formed node
    /// sequence.
    ///
    /// Anything else (an object, `null`, a string, or an array whose
    /// elements do not deserialize as nodes) is silently ignored and the
    /// prior forest is retained. Returns whether the forest was replaced.
    pub fn load_items(&mut self, payload: Value) -> bool {
        if !payload.is_array() {
            debug!("ignoring non-sequence forest payload");

            return false;
        }

        match serde_json::from_value::<Vec<FileNode>>(payload) {
            Ok(items) => {
                self.items = items;
                self.revision += 1;

                true
            }
            Err(error) => {
                debug!(%error, "ignoring malformed forest payload");

                false
            }
        }
    }

    /// Issues the token for a new data-source pull, superseding all earlier
    /// tokens.
    pub fn begin_fetch(&mut self) -> FetchToken {
        self.latest_token += 1;

        FetchToken(self.latest_token)
    }

    /// Applies a completed pull, unless a newer pull was issued meanwhile.
    ///
    /// Returns whether the forest was replaced.
    pub fn apply_fetch(&mut self, token: FetchToken, payload: Value) -> bool {
        if token.0 != self.latest_token {
            debug!(
                stale = token.0,
                latest = self.latest_token,
                "discarding stale forest pull"
            );

            return false;
        }

        self.load_items(payload)
    }
}
