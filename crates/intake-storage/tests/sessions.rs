use serde_json::json;
use uuid::Uuid;

use intake_core::models::outcome::NextQuestionOutcome;
use intake_core::models::question::{Polarity, Question, QuestionType};
use intake_core::models::session::{RespondentProfile, SessionStatus, ValidationChoice};
use intake_engine::error::EngineError;
use intake_engine::AssessmentEngine;
use intake_storage::answer::{acknowledge, advance, finalize, submit_answer};
use intake_storage::error::StorageError;
use intake_storage::objects::{MemoryStore, ObjectStore};
use intake_storage::sessions::{session_key, SessionStore};
use intake_storage::snapshots::load_snapshots;
use intake_storage::state::save_state;

/// The mildest answer a question accepts, in the JSON shape the client sends.
fn mild_answer(question: &Question) -> serde_json::Value {
    let mildest = || {
        question
            .options
            .iter()
            .min_by(|a, b| a.severity.unwrap_or(0.0).total_cmp(&b.severity.unwrap_or(0.0)))
            .map(|o| o.value.clone())
            .unwrap_or_default()
    };
    match question.question_type {
        QuestionType::LikertScale => json!(1.0),
        QuestionType::Number => {
            let scale = question.scale_range().expect("number question has a range");
            match question.polarity {
                Polarity::HigherIsBetter => json!(scale.max),
                Polarity::HigherIsWorse => json!(scale.min),
            }
        }
        QuestionType::Text => json!("nothing in particular"),
        QuestionType::MultiSelect => json!([mildest()]),
        _ => json!(mildest()),
    }
}

async fn run_to_completion(store: &MemoryStore, engine: &AssessmentEngine<'_>, session_id: Uuid) {
    for _ in 0..500 {
        let (session, outcome) = advance(store, engine, session_id).await.unwrap();
        match outcome {
            NextQuestionOutcome::Question { question, .. } => {
                submit_answer(store, engine, session_id, &question.id, &mild_answer(&question))
                    .await
                    .unwrap();
            }
            NextQuestionOutcome::ValidationRequired { .. } => {
                acknowledge(store, engine, session_id, ValidationChoice::Continue)
                    .await
                    .unwrap();
            }
            NextQuestionOutcome::ModuleComplete { .. } => {}
            NextQuestionOutcome::AssessmentComplete { .. } => {
                assert_eq!(session.status, SessionStatus::Completed);
                return;
            }
        }
    }
    panic!("session did not complete");
}

#[tokio::test]
async fn create_and_load_round_trip() {
    let store = MemoryStore::new();
    let engine = AssessmentEngine::standard();
    let session = engine.start_session(Uuid::new_v4(), RespondentProfile::default());

    let etag = store.create(&session).await.unwrap();
    let (loaded, loaded_etag) = store.load(session.id).await.unwrap();
    assert_eq!(loaded, session);
    assert_eq!(loaded_etag, etag);
}

#[tokio::test]
async fn create_twice_is_rejected() {
    let store = MemoryStore::new();
    let engine = AssessmentEngine::standard();
    let session = engine.start_session(Uuid::new_v4(), RespondentProfile::default());

    store.create(&session).await.unwrap();
    let err = store.create(&session).await.unwrap_err();
    assert!(matches!(err, StorageError::PreconditionFailed { .. }));
}

#[tokio::test]
async fn load_missing_session() {
    let store = MemoryStore::new();
    let err = store.load(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn advance_then_answer_appends_to_ledger() {
    let store = MemoryStore::new();
    let engine = AssessmentEngine::standard();
    let session = engine.start_session(Uuid::new_v4(), RespondentProfile::default());
    store.create(&session).await.unwrap();

    let (_, outcome) = advance(&store, &engine, session.id).await.unwrap();
    let question = outcome.question().expect("first step asks a question").clone();
    assert_eq!(question.module_id, "SCREENING");

    submit_answer(&store, &engine, session.id, &question.id, &mild_answer(&question))
        .await
        .unwrap();

    let ledger = store.load_ledger(session.id).await.unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].question_id, question.id);
}

#[tokio::test]
async fn invalid_answer_leaves_stored_session_untouched() {
    let store = MemoryStore::new();
    let engine = AssessmentEngine::standard();
    let session = engine.start_session(Uuid::new_v4(), RespondentProfile::default());
    store.create(&session).await.unwrap();
    advance(&store, &engine, session.id).await.unwrap();
    let (before, etag) = store.load(session.id).await.unwrap();

    let err = submit_answer(&store, &engine, session.id, "scr_fatigue", &json!(9))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Engine(EngineError::InvalidValue(_))));

    let (after, after_etag) = store.load(session.id).await.unwrap();
    assert_eq!(after, before);
    assert_eq!(after_etag, etag);
}

#[tokio::test]
async fn stale_etag_is_rejected() {
    let store = MemoryStore::new();
    let engine = AssessmentEngine::standard();
    let session = engine.start_session(Uuid::new_v4(), RespondentProfile::default());
    store.create(&session).await.unwrap();
    advance(&store, &engine, session.id).await.unwrap();

    // Two requests read the same version; the first one to write wins.
    let (stale, stale_etag) = store.load(session.id).await.unwrap();
    submit_answer(&store, &engine, session.id, "scr_fatigue", &json!(3))
        .await
        .unwrap();

    let competing = engine.record_raw(&stale, "scr_digestive", &json!("often")).unwrap();
    let err = store.save_if_match(&competing, &stale_etag).await.unwrap_err();
    assert!(matches!(err, StorageError::ETagMismatch { .. }));

    let ledger = store.load_ledger(session.id).await.unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].question_id, "scr_fatigue");
}

#[tokio::test]
async fn inconsistent_session_is_flagged() {
    let store = MemoryStore::new();
    let engine = AssessmentEngine::standard();
    let session = engine.start_session(Uuid::new_v4(), RespondentProfile::default());
    store.create(&session).await.unwrap();
    advance(&store, &engine, session.id).await.unwrap();
    let mut answered = submit_answer(&store, &engine, session.id, "scr_fatigue", &json!(2))
        .await
        .unwrap();

    // The bank dropped a question the ledger still references.
    answered.responses[0].question_id = "scr_retired".to_string();
    save_state(&store, &session_key(session.id), &answered).await.unwrap();

    let err = advance(&store, &engine, session.id).await.unwrap_err();
    assert!(matches!(
        err,
        StorageError::Engine(EngineError::InconsistentSession { .. })
    ));
    let (flagged, _) = store.load(session.id).await.unwrap();
    assert!(flagged.needs_review);
}

#[tokio::test]
async fn full_session_finalizes_into_snapshot() {
    let store = MemoryStore::new();
    let engine = AssessmentEngine::standard();
    let client_id = Uuid::new_v4();
    let session = engine.start_session(client_id, RespondentProfile::default());
    store.create(&session).await.unwrap();

    run_to_completion(&store, &engine, session.id).await;

    let snapshot = finalize(&store, &engine, session.id).await.unwrap();
    assert_eq!(snapshot.session_id, session.id);
    assert!(snapshot.questions_asked > 0);
    assert!(snapshot.overall_score < 50.0);

    let loaded = load_snapshots(&store, client_id).await.unwrap();
    assert_eq!(loaded.len(), 1);
    let stored = loaded[0].as_ref().unwrap();
    assert_eq!(stored.session_id, snapshot.session_id);
    assert_eq!(stored.questions_asked, snapshot.questions_asked);
    assert_eq!(stored.risk_level, snapshot.risk_level);
}

#[tokio::test]
async fn finalize_requires_completed_session() {
    let store = MemoryStore::new();
    let engine = AssessmentEngine::standard();
    let session = engine.start_session(Uuid::new_v4(), RespondentProfile::default());
    store.create(&session).await.unwrap();

    let err = finalize(&store, &engine, session.id).await.unwrap_err();
    assert!(matches!(
        err,
        StorageError::Engine(EngineError::InvalidTransition { .. })
    ));
}

#[tokio::test]
async fn list_objects_by_prefix() {
    let store = MemoryStore::new();
    store.put_object("sessions/a.json", b"{}".to_vec()).await.unwrap();
    store.put_object("snapshots/x/b.json", b"{}".to_vec()).await.unwrap();
    store.put_object("snapshots/x/a.json", b"{}".to_vec()).await.unwrap();

    let keys = store.list_objects("snapshots/x/").await.unwrap();
    assert_eq!(keys, vec!["snapshots/x/a.json", "snapshots/x/b.json"]);
}
