//! Service-level tests for the execute entry point.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;

use trainplan::services::{PlanGenerationService, RequestType};
use trainplan::GenerationError;

use common::{seeded_store, ScriptedLlm};

#[tokio::test]
async fn execute_returns_the_persisted_sessions() {
    let store = Arc::new(seeded_store("u1", 12, 16, 10));
    let llm = Arc::new(ScriptedLlm::new(&[2, 4]));
    let service = PlanGenerationService::new(store.clone(), llm);

    let sessions = service.execute("u1", RequestType::Weekly).await.unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(store.archives().len(), 1);
}

#[tokio::test]
async fn every_request_type_runs_the_generation_graph() {
    for request_type in [RequestType::Weekly, RequestType::Daily, RequestType::Session] {
        let store = Arc::new(seeded_store("u1", 12, 16, 10));
        let llm = Arc::new(ScriptedLlm::new(&[3]));
        let service = PlanGenerationService::new(store, llm);

        let sessions = service.execute("u1", request_type).await.unwrap();
        assert_eq!(sessions.len(), 1);
    }
}

#[tokio::test]
async fn errors_carry_no_partial_session_list() {
    let store = Arc::new(seeded_store("u1", 12, 16, 10));
    let llm = Arc::new(ScriptedLlm::new(&[1]));
    let service = PlanGenerationService::new(store, llm);

    let result = service.execute("missing-user", RequestType::Weekly).await;
    assert_matches!(result, Err(GenerationError::MissingUser { .. }));
}
