use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;

use crate::error::StorageError;

pub struct GetObjectOutput {
    pub body: Vec<u8>,
    pub etag: String,
}

/// Key-value object storage with conditional writes.
#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    async fn get_object(&self, key: &str) -> Result<GetObjectOutput, StorageError>;

    /// Unconditional write. Returns the new ETag.
    async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<String, StorageError>;

    /// Write only if the stored object's ETag equals `expected_etag`.
    async fn put_object_if_match(
        &self,
        key: &str,
        body: Vec<u8>,
        expected_etag: &str,
    ) -> Result<String, StorageError>;

    /// Write only if nothing is stored under `key` yet.
    async fn put_object_if_absent(&self, key: &str, body: Vec<u8>) -> Result<String, StorageError>;

    /// Keys under `prefix`, sorted.
    async fn list_objects(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}

#[derive(Debug)]
struct StoredObject {
    body: Vec<u8>,
    etag: String,
}

/// In-process [`ObjectStore`]. ETags are a store-wide write counter.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, StoredObject>>,
    writes: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_etag(&self) -> String {
        let n = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        format!("\"{n:x}\"")
    }
}

impl ObjectStore for MemoryStore {
    async fn get_object(&self, key: &str) -> Result<GetObjectOutput, StorageError> {
        let objects = self.objects.lock().await;
        let object = objects.get(key).ok_or_else(|| StorageError::NotFound {
            key: key.to_string(),
        })?;
        Ok(GetObjectOutput {
            body: object.body.clone(),
            etag: object.etag.clone(),
        })
    }

    async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<String, StorageError> {
        let etag = self.next_etag();
        self.objects.lock().await.insert(
            key.to_string(),
            StoredObject {
                body,
                etag: etag.clone(),
            },
        );
        tracing::debug!(key, etag = %etag, "object written");
        Ok(etag)
    }

    async fn put_object_if_match(
        &self,
        key: &str,
        body: Vec<u8>,
        expected_etag: &str,
    ) -> Result<String, StorageError> {
        let mut objects = self.objects.lock().await;
        let current = objects.get_mut(key).ok_or_else(|| StorageError::NotFound {
            key: key.to_string(),
        })?;
        if current.etag != expected_etag {
            return Err(StorageError::ETagMismatch {
                expected: expected_etag.to_string(),
                actual: current.etag.clone(),
            });
        }
        let etag = self.next_etag();
        current.body = body;
        current.etag = etag.clone();
        tracing::debug!(key, etag = %etag, "object written (if-match)");
        Ok(etag)
    }

    async fn put_object_if_absent(&self, key: &str, body: Vec<u8>) -> Result<String, StorageError> {
        let mut objects = self.objects.lock().await;
        if objects.contains_key(key) {
            return Err(StorageError::PreconditionFailed {
                key: key.to_string(),
            });
        }
        let etag = self.next_etag();
        objects.insert(
            key.to_string(),
            StoredObject {
                body,
                etag: etag.clone(),
            },
        );
        Ok(etag)
    }

    async fn list_objects(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let objects = self.objects.lock().await;
        Ok(objects
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
