//! Load, apply, save-if-match cycles for the web layer.
//!
//! Each helper reads the session with its ETag, runs one engine step on
//! the snapshot, and writes back conditionally. A concurrent writer makes
//! the save fail with [`StorageError::ETagMismatch`] and nothing is stored.

use uuid::Uuid;

use intake_core::models::analysis::AnalysisSnapshot;
use intake_core::models::outcome::NextQuestionOutcome;
use intake_core::models::session::{Session, ValidationChoice};
use intake_engine::error::EngineError;
use intake_engine::AssessmentEngine;

use crate::error::StorageError;
use crate::objects::ObjectStore;
use crate::sessions::SessionStore;
use crate::snapshots::save_snapshot;

/// Record one answer in the loose JSON shape the client submits.
pub async fn submit_answer<S: SessionStore>(
    store: &S,
    engine: &AssessmentEngine<'_>,
    session_id: Uuid,
    question_id: &str,
    raw: &serde_json::Value,
) -> Result<Session, StorageError> {
    let (session, etag) = store.load(session_id).await?;
    let next = engine.record_raw(&session, question_id, raw)?;
    store.save_if_match(&next, &etag).await?;
    tracing::debug!(session_id = %session_id, question_id, "answer stored");
    Ok(next)
}

/// Select and apply the next step. A ledger that no longer matches the
/// bank is flagged for review and saved before the error is returned.
pub async fn advance<S: SessionStore>(
    store: &S,
    engine: &AssessmentEngine<'_>,
    session_id: Uuid,
) -> Result<(Session, NextQuestionOutcome), StorageError> {
    let (session, etag) = store.load(session_id).await?;
    match engine.next_step(&session) {
        Ok((next, outcome)) => {
            store.save_if_match(&next, &etag).await?;
            Ok((next, outcome))
        }
        Err(e @ EngineError::InconsistentSession { .. }) => {
            if !session.needs_review {
                let flagged = engine.flag_for_review(&session);
                store.save_if_match(&flagged, &etag).await?;
            }
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn acknowledge<S: SessionStore>(
    store: &S,
    engine: &AssessmentEngine<'_>,
    session_id: Uuid,
    choice: ValidationChoice,
) -> Result<Session, StorageError> {
    let (session, etag) = store.load(session_id).await?;
    let next = engine.acknowledge_validation(&session, choice)?;
    store.save_if_match(&next, &etag).await?;
    Ok(next)
}

/// Score a completed session and store the snapshot for later aggregation.
pub async fn finalize<S: SessionStore + ObjectStore>(
    store: &S,
    engine: &AssessmentEngine<'_>,
    session_id: Uuid,
) -> Result<AnalysisSnapshot, StorageError> {
    let (session, _) = SessionStore::load(store, session_id).await?;
    let snapshot = engine.snapshot(&session)?;
    save_snapshot(store, &snapshot).await?;
    Ok(snapshot)
}
