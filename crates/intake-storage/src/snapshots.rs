//! Completed analyses, one object per session under the client's prefix.

use futures::future::join_all;
use uuid::Uuid;

use intake_core::models::analysis::AnalysisSnapshot;
use intake_engine::aggregate::parse_snapshot;
use intake_engine::error::EngineError;

use crate::error::StorageError;
use crate::objects::ObjectStore;
use crate::state::save_state;

pub fn snapshot_prefix(client_id: Uuid) -> String {
    format!("snapshots/{client_id}/")
}

pub fn snapshot_key(client_id: Uuid, session_id: Uuid) -> String {
    format!("{}{session_id}.json", snapshot_prefix(client_id))
}

pub async fn save_snapshot(
    store: &impl ObjectStore,
    snapshot: &AnalysisSnapshot,
) -> Result<String, StorageError> {
    let key = snapshot_key(snapshot.client_id, snapshot.session_id);
    let etag = save_state(store, &key, snapshot).await?;
    tracing::info!(key = %key, "snapshot saved");
    Ok(etag)
}

/// Fetch and parse every stored snapshot for a client concurrently.
///
/// Objects that cannot be read or parsed come back as
/// [`EngineError::PartialAnalysis`] labelled with their key, ready to be
/// counted as failures by the aggregator. Only a failed listing is fatal.
pub async fn load_snapshots(
    store: &impl ObjectStore,
    client_id: Uuid,
) -> Result<Vec<Result<AnalysisSnapshot, EngineError>>, StorageError> {
    let keys = store.list_objects(&snapshot_prefix(client_id)).await?;
    tracing::debug!(client_id = %client_id, count = keys.len(), "loading snapshots");

    let loads = keys.iter().map(|key| async move {
        let output = store.get_object(key).await.map_err(|e| EngineError::PartialAnalysis {
            label: key.clone(),
            reason: e.to_string(),
        })?;
        let text = String::from_utf8(output.body).map_err(|e| EngineError::PartialAnalysis {
            label: key.clone(),
            reason: e.to_string(),
        })?;
        parse_snapshot(key, &text)
    });
    Ok(join_all(loads).await)
}
