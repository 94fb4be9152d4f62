use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::datastore::Datastore;
use crate::error::GenerationError;
use crate::graph::engine::{GenerationGraph, DEFAULT_BUDGET};
use crate::llm::LlmClient;
use crate::models::TrainingSession;

/// What the caller asked for. Every variant currently runs the full weekly
/// generation graph; the plan skeleton decides how many sessions come back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    Weekly,
    Daily,
    Session,
}

/// The single entry point of the generation core.
#[derive(Clone)]
pub struct PlanGenerationService {
    datastore: Arc<dyn Datastore>,
    llm: Arc<dyn LlmClient>,
    budget: Duration,
}

impl PlanGenerationService {
    pub fn new(datastore: Arc<dyn Datastore>, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            datastore,
            llm,
            budget: DEFAULT_BUDGET,
        }
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    /// Run the generation graph for `uid` and return the persisted sessions.
    /// On any failure nothing partial is returned: the error carries the
    /// failing node's context.
    pub async fn execute(
        &self,
        uid: &str,
        request_type: RequestType,
    ) -> Result<Vec<TrainingSession>, GenerationError> {
        info!(uid, ?request_type, "executing plan generation");

        let mut graph = GenerationGraph::new(self.datastore.clone(), self.llm.clone())
            .with_budget(self.budget);

        match graph.run(uid).await {
            Ok(state) => Ok(state.final_sessions),
            Err(e) => {
                error!(uid, error = %e, "plan generation failed");
                Err(e)
            }
        }
    }
}
