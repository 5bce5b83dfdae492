//! Download transport and save-sink abstractions.
//!
//! Defines the [`DownloadTransport`] and [`SaveTarget`] traits used by the
//! download action without coupling it to a specific byte source or save
//! mechanism, plus the filesystem implementations the binary wires in.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use thiserror::Error;

/// Boxed async result used by transport trait methods.
pub type TransportFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Failure raised by a byte fetch or a save.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The byte fetch against the node path failed.
    #[error("failed to fetch `{path}`: {source}")]
    Fetch {
        path: String,
        #[source]
        source: io::Error,
    },
    /// Writing the fetched bytes to the save target failed.
    #[error("failed to save `{name}`: {source}")]
    Save {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// Opaque GET-style byte fetch against a node's path.
///
/// The trait is object-safe so the download action can hold it as
/// `Arc<dyn DownloadTransport>`.
#[cfg_attr(test, mockall::automock)]
pub trait DownloadTransport: Send + Sync {
    /// Fetches the full byte body addressed by `path`.
    ///
    /// # Errors
    /// Returns [`TransportError::Fetch`] when the body cannot be retrieved.
    fn fetch(&self, path: String) -> TransportFuture<Result<Vec<u8>, TransportError>>;
}

/// Save mechanism receiving fetched bytes under a suggested filename.
#[cfg_attr(test, mockall::automock)]
pub trait SaveTarget: Send + Sync {
    /// Persists `bytes` under `name`, returning where they landed.
    ///
    /// # Errors
    /// Returns [`TransportError::Save`] when the bytes cannot be persisted.
    fn save(&self, name: String, bytes: Vec<u8>) -> TransportFuture<Result<PathBuf, TransportError>>;
}

/// Transport reading bytes straight from the local filesystem.
pub struct FsTransport;

impl DownloadTransport for FsTransport {
    fn fetch(&self, path: String) -> TransportFuture<Result<Vec<u8>, TransportError>> {
        Box::pin(async move {
            tokio::fs::read(&path)
                .await
                .map_err(|source| TransportError::Fetch { path, source })
        })
    }
}

/// Save target writing into a downloads directory with collision-safe
/// names.
pub struct DownloadsDirTarget {
    directory: PathBuf,
}

impl DownloadsDirTarget {
    /// Creates a target writing into `directory`.
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }

    /// Creates a target for the user downloads directory, falling back to
    /// the temp directory when the platform reports none.
    pub fn for_user() -> Self {
        Self::new(dirs::download_dir().unwrap_or_else(std::env::temp_dir))
    }

    /// Returns a destination under the target directory that does not
    /// collide with an existing file, numbering duplicates before the
    /// extension (`report.pdf`, `report (1).pdf`, ...).
    fn destination(&self, name: &str) -> PathBuf {
        let first_choice = self.directory.join(name);
        if !first_choice.exists() {
            return first_choice;
        }

        let (stem, extension) = split_name(name);
        for attempt in 1.. {
            let candidate = self.directory.join(match extension {
                Some(extension) => format!("{stem} ({attempt}).{extension}"),
                None => format!("{stem} ({attempt})"),
            });
            if !candidate.exists() {
                return candidate;
            }
        }

        first_choice
    }
}

impl SaveTarget for DownloadsDirTarget {
    fn save(&self, name: String, bytes: Vec<u8>) -> TransportFuture<Result<PathBuf, TransportError>> {
        let directory = self.directory.clone();
        let destination = self.destination(&name);

        Box::pin(async move {
            let save_error = |source| TransportError::Save {
                name: name.clone(),
                source,
            };

            tokio::fs::create_dir_all(&directory)
                .await
                .map_err(save_error)?;
            tokio::fs::write(&destination, bytes)
                .await
                .map_err(save_error)?;

            Ok(destination)
        })
    }
}

/// Splits a filename into stem and extension for duplicate numbering.
fn split_name(name: &str) -> (&str, Option<&str>) {
    match Path::new(name).extension().and_then(|ext| ext.to_str()) {
        Some(extension) if !extension.is_empty() => {
            let stem_len = name.len() - extension.len() - 1;

            (&name[..stem_len], Some(extension))
        }
        _ => (name, None),
    }
}
