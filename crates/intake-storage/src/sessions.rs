use uuid::Uuid;

use intake_core::models::response::Response;
use intake_core::models::session::Session;

use crate::error::StorageError;
use crate::objects::ObjectStore;
use crate::state::{create_state, load_state, save_state_if_match};

pub fn session_key(session_id: Uuid) -> String {
    format!("sessions/{session_id}.json")
}

/// Persistence for assessment sessions. Every write after creation is
/// conditional on the ETag the caller loaded.
#[allow(async_fn_in_trait)]
pub trait SessionStore {
    async fn create(&self, session: &Session) -> Result<String, StorageError>;

    async fn load(&self, session_id: Uuid) -> Result<(Session, String), StorageError>;

    async fn load_ledger(&self, session_id: Uuid) -> Result<Vec<Response>, StorageError>;

    async fn save_if_match(&self, session: &Session, expected_etag: &str) -> Result<String, StorageError>;
}

impl<O: ObjectStore> SessionStore for O {
    async fn create(&self, session: &Session) -> Result<String, StorageError> {
        let etag = create_state(self, &session_key(session.id), session).await?;
        tracing::info!(session_id = %session.id, "session created");
        Ok(etag)
    }

    async fn load(&self, session_id: Uuid) -> Result<(Session, String), StorageError> {
        load_state(self, &session_key(session_id)).await
    }

    async fn load_ledger(&self, session_id: Uuid) -> Result<Vec<Response>, StorageError> {
        let (session, _) = self.load(session_id).await?;
        Ok(session.responses)
    }

    async fn save_if_match(&self, session: &Session, expected_etag: &str) -> Result<String, StorageError> {
        save_state_if_match(self, &session_key(session.id), session, expected_etag).await
    }
}
