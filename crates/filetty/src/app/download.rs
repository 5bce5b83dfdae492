//! Download action for the selected item.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::domain::node::FileNode;
use crate::infra::transport::{DownloadTransport, SaveTarget, TransportError};

/// How one download attempt settled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DownloadOutcome {
    /// The bytes were fetched and handed to the save target.
    Completed,
    /// The fetch or save failed; logged, nothing else changed.
    Failed,
    /// Another download is still in flight; this attempt was rejected.
    InFlight,
    /// Nothing selected, or the selection has no usable path or name.
    InvalidSelection,
}

/// Fetches the selected item's bytes and hands them to the save target.
///
/// At most one transfer runs at a time: rapid repeated triggers are
/// rejected until the current attempt settles. Failures are caught at this
/// boundary and surface only in the diagnostic log.
#[derive(Clone)]
pub struct DownloadManager {
    in_flight: Arc<AtomicBool>,
    target: Arc<dyn SaveTarget>,
    transport: Arc<dyn DownloadTransport>,
}

impl DownloadManager {
    /// Creates a manager around a transport and a save target.
    pub fn new(transport: Arc<dyn DownloadTransport>, target: Arc<dyn SaveTarget>) -> Self {
        Self {
            in_flight: Arc::new(AtomicBool::new(false)),
            target,
            transport,
        }
    }

    /// Runs one download for `selected`.
    ///
    /// A missing selection, an empty path, or an empty name is a silent
    /// no-op. The transport is never invoked while a prior transfer is
    /// still in flight.
    pub async fn run(&self, selected: Option<&FileNode>) -> DownloadOutcome {
        let Some(node) = selected else {
            return DownloadOutcome::InvalidSelection;
        };
        let Some(path) = node.path.as_deref().filter(|path| !path.is_empty()) else {
            return DownloadOutcome::InvalidSelection;
        };
        if node.name.is_empty() {
            return DownloadOutcome::InvalidSelection;
        }

        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!(name = %node.name, "download already in flight, ignoring");

            return DownloadOutcome::InFlight;
        }

        let outcome = match self.transfer(path, &node.name).await {
            Ok(()) => DownloadOutcome::Completed,
            Err(error) => {
                warn!(%error, name = %node.name, "download failed");

                DownloadOutcome::Failed
            }
        };

        self.in_flight.store(false, Ordering::SeqCst);

        outcome
    }

    async fn transfer(&self, path: &str, name: &str) -> Result<(), TransportError> {
        let bytes = self.transport.fetch(path.to_string()).await?;
        self.target.save(name.to_string(), bytes).await?;

        Ok(())
    }
}
