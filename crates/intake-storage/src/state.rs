use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;
use crate::objects::ObjectStore;

/// Load a JSON state object. Returns the deserialized value and its ETag.
pub async fn load_state<T: DeserializeOwned>(
    store: &impl ObjectStore,
    key: &str,
) -> Result<(T, String), StorageError> {
    let output = store.get_object(key).await?;
    let value: T = serde_json::from_slice(&output.body)?;
    Ok((value, output.etag))
}

/// Save a JSON state object. Returns the new ETag.
pub async fn save_state<T: Serialize>(
    store: &impl ObjectStore,
    key: &str,
    value: &T,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    store.put_object(key, body).await
}

/// Save a JSON state object with ETag optimistic locking.
pub async fn save_state_if_match<T: Serialize>(
    store: &impl ObjectStore,
    key: &str,
    value: &T,
    expected_etag: &str,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    store.put_object_if_match(key, body, expected_etag).await
}

/// Save a JSON state object that must not exist yet.
pub async fn create_state<T: Serialize>(
    store: &impl ObjectStore,
    key: &str,
    value: &T,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    store.put_object_if_absent(key, body).await
}
