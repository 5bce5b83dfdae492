//! Data-source synchronization: change events in, token-stamped pulls out.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::warn;

use crate::app::{App, FetchToken};
use crate::infra::source::{DataSource, SourceError};

/// Completion of one token-stamped data-source pull.
pub(crate) struct FetchCompletion {
    pub(crate) payload: Result<Value, SourceError>,
    pub(crate) token: FetchToken,
}

/// Starts one pull against `source`, delivering the completion to the event
/// loop.
///
/// The token was issued by the store before the pull began; completions are
/// applied through [`crate::app::TreeStore::apply_fetch`], which discards
/// any pull that is no longer the latest. That keeps a slow, older pull
/// from overwriting the forest after a newer one already landed.
pub(crate) fn spawn_fetch(
    source: &Arc<dyn DataSource>,
    token: FetchToken,
    completions: mpsc::UnboundedSender<FetchCompletion>,
) {
    let pull = source.get_value();

    tokio::spawn(async move {
        let payload = pull.await;
        // A closed channel means the runtime already shut down.
        let _ = completions.send(FetchCompletion { payload, token });
    });
}

/// Applies one completed pull to the app state.
pub(crate) fn apply_completion(app: &mut App, completion: FetchCompletion) {
    match completion.payload {
        Ok(payload) => {
            app.store.apply_fetch(completion.token, payload);
        }
        Err(error) => {
            warn!(%error, "data source pull failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use serde_json::json;
    use tokio::sync::{broadcast, mpsc};

    use super::*;
    use crate::app::{DownloadManager, TreeStore};
    use crate::infra::source::{MockDataSource, SourceChange};
    use crate::infra::transport::{MockDownloadTransport, MockSaveTarget};

    fn new_test_app() -> App {
        let download = DownloadManager::new(
            std::sync::Arc::new(MockDownloadTransport::new()),
            std::sync::Arc::new(MockSaveTarget::new()),
        );
        let (notifications_tx, _notifications_rx) = mpsc::unbounded_channel();

        App::new(download, notifications_tx)
    }

    #[tokio::test]
    async fn test_spawn_fetch_delivers_payload_with_token() {
        // Arrange
        let mut source = MockDataSource::new();
        source
            .expect_get_value()
            .times(1)
            .returning(|| Box::pin(async { Ok(json!([{ "name": "a.txt" }])) }));
        let source: Arc<dyn DataSource> = Arc::new(source);
        let mut store = TreeStore::new();
        let token = store.begin_fetch();
        let (completions_tx, mut completions_rx) = mpsc::unbounded_channel();

        // Act
        spawn_fetch(&source, token, completions_tx);
        let completion = completions_rx
            .recv()
            .await
            .expect("completion should arrive");

        // Assert
        assert_eq!(completion.token, token);
        assert!(store.apply_fetch(completion.token, completion.payload.expect("payload")));
        assert_eq!(store.items()[0].name, "a.txt");
    }

    #[tokio::test]
    async fn test_apply_completion_replaces_forest() {
        // Arrange
        let mut app = new_test_app();
        let token = app.store.begin_fetch();

        // Act
        apply_completion(
            &mut app,
            FetchCompletion {
                payload: Ok(json!([{ "name": "fresh.txt" }])),
                token,
            },
        );

        // Assert
        assert_eq!(app.store.items()[0].name, "fresh.txt");
    }

    #[tokio::test]
    async fn test_apply_completion_keeps_forest_on_pull_failure() {
        // Arrange
        let mut app = new_test_app();
        let first_token = app.store.begin_fetch();
        app.store
            .apply_fetch(first_token, json!([{ "name": "kept.txt" }]));
        let token = app.store.begin_fetch();

        // Act
        apply_completion(
            &mut app,
            FetchCompletion {
                payload: Err(SourceError::Io(io::Error::other("source went away"))),
                token,
            },
        );

        // Assert
        assert_eq!(app.store.items()[0].name, "kept.txt");
    }

    #[tokio::test]
    async fn test_stale_completion_loses_to_newer_pull() {
        // Arrange
        let mut app = new_test_app();
        let stale_token = app.store.begin_fetch();
        let fresh_token = app.store.begin_fetch();
        apply_completion(
            &mut app,
            FetchCompletion {
                payload: Ok(json!([{ "name": "fresh.txt" }])),
                token: fresh_token,
            },
        );

        // Act: the older pull completes last.
        apply_completion(
            &mut app,
            FetchCompletion {
                payload: Ok(json!([{ "name": "stale.txt" }])),
                token: stale_token,
            },
        );

        // Assert
        assert_eq!(app.store.items()[0].name, "fresh.txt");
    }

    #[tokio::test]
    async fn test_mock_source_change_subscription_round_trip() {
        // Arrange
        let (changes_tx, _) = broadcast::channel(4);
        let mut source = MockDataSource::new();
        let subscribe_tx = changes_tx.clone();
        source
            .expect_subscribe()
            .returning(move || subscribe_tx.subscribe());
        let source: Arc<dyn DataSource> = Arc::new(source);
        let mut changes = source.subscribe();

        // Act
        changes_tx.send(SourceChange).expect("subscriber exists");

        // Assert
        assert_eq!(
            changes.recv().await.expect("change should arrive"),
            SourceChange
        );
    }
}
