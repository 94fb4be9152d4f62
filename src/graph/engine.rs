//! The graph driver: a single-threaded cooperative loop executing one node
//! at a time, with the three phase selectors as the only concurrent step.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info};

use crate::datastore::Datastore;
use crate::error::GenerationError;
use crate::llm::LlmClient;
use crate::models::Phase;
use crate::nodes;
use crate::nodes::loop_controller::Route;

use super::state::GraphState;

/// Transition ceiling. A run executes `4 + 6 * training_days` worker nodes,
/// which stays below this even for a seven-day week; anything hitting the
/// limit is a routing bug.
pub const MAX_TRANSITIONS: usize = 50;

/// Default wall-clock budget. LLM latency dominates, so this is generous.
pub const DEFAULT_BUDGET: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    ContextLoader,
    ContextCleaner,
    Strategy,
    LoopController,
    PhaseOrchestrator,
    FilterEngine,
    VariationCleaner,
    PhaseSelectors,
    Assembler,
    Invalidator,
    Persistence,
    End,
}

impl Node {
    fn name(&self) -> &'static str {
        match self {
            Node::ContextLoader => "context_loader",
            Node::ContextCleaner => "context_cleaner",
            Node::Strategy => "strategy",
            Node::LoopController => "loop_controller",
            Node::PhaseOrchestrator => "phase_orchestrator",
            Node::FilterEngine => "filter_engine",
            Node::VariationCleaner => "variation_cleaner",
            Node::PhaseSelectors => "phase_selectors",
            Node::Assembler => "assembler",
            Node::Invalidator => "invalidator",
            Node::Persistence => "persistence",
            Node::End => "end",
        }
    }
}

/// One run of the generation pipeline. Construct per request.
pub struct GenerationGraph {
    datastore: Arc<dyn Datastore>,
    llm: Arc<dyn LlmClient>,
    rng: StdRng,
    budget: Duration,
}

impl GenerationGraph {
    pub fn new(datastore: Arc<dyn Datastore>, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            datastore,
            llm,
            rng: StdRng::from_entropy(),
            budget: DEFAULT_BUDGET,
        }
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    /// Pin the invalidator's RNG, making the blacklist roll reproducible.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Execute the full graph for `uid`, anchored on today's date.
    pub async fn run(&mut self, uid: &str) -> Result<GraphState, GenerationError> {
        self.run_from(uid, Utc::now().date_naive()).await
    }

    /// Execute with an explicit "today", which the strategy node uses for
    /// start-date computation.
    pub async fn run_from(
        &mut self,
        uid: &str,
        today: NaiveDate,
    ) -> Result<GraphState, GenerationError> {
        let started = Instant::now();
        let mut state = GraphState::new(uid);
        let mut node = Node::ContextLoader;
        let mut transitions = 0usize;

        info!(uid, "generation run started");

        while node != Node::End {
            // The loop controller resolves a conditional edge; it is not a
            // worker node and does not consume a transition.
            if node != Node::LoopController {
                transitions += 1;
            }
            if transitions > MAX_TRANSITIONS {
                return Err(GenerationError::TransitionLimit {
                    limit: MAX_TRANSITIONS,
                });
            }
            // Budget exhaustion refuses to schedule the next node; whatever
            // is in flight has already been awaited, and nothing is
            // persisted because persistence is the terminal node.
            if started.elapsed() >= self.budget {
                return Err(GenerationError::BudgetExhausted(self.budget));
            }

            debug!(node = node.name(), transitions, "executing node");
            node = self.step(node, &mut state, today).await.map_err(|e| {
                error!(node = node.name(), error = %e, "node failed");
                e
            })?;
        }

        info!(
            uid,
            sessions = state.final_sessions.len(),
            transitions,
            "generation run finished"
        );
        Ok(state)
    }

    async fn step(
        &mut self,
        node: Node,
        state: &mut GraphState,
        today: NaiveDate,
    ) -> Result<Node, GenerationError> {
        match node {
            Node::ContextLoader => {
                let update = nodes::context_loader::run(self.datastore.as_ref(), &state.uid).await?;
                state.apply(update);
                Ok(Node::ContextCleaner)
            }
            Node::ContextCleaner => {
                let update = nodes::context_cleaner::run(state)?;
                state.apply(update);
                Ok(Node::Strategy)
            }
            Node::Strategy => {
                let update = nodes::strategy::run(self.llm.as_ref(), state, today).await?;
                state.apply(update);
                Ok(Node::LoopController)
            }
            Node::LoopController => match nodes::loop_controller::route(state)? {
                Route::ContinueLoop => Ok(Node::PhaseOrchestrator),
                Route::EndLoop => Ok(Node::Persistence),
            },
            Node::PhaseOrchestrator => {
                let update = nodes::orchestrator::run(self.llm.as_ref(), state).await?;
                state.apply(update);
                Ok(Node::FilterEngine)
            }
            Node::FilterEngine => {
                let update = nodes::filter_engine::run(state)?;
                state.apply(update);
                Ok(Node::VariationCleaner)
            }
            Node::VariationCleaner => {
                let update = nodes::variation_cleaner::run(state)?;
                state.apply(update);
                Ok(Node::PhaseSelectors)
            }
            Node::PhaseSelectors => {
                // Fan-out: the only concurrent step. Each selector writes a
                // disjoint channel, so applying the three updates in any
                // order yields the same state.
                let llm = self.llm.as_ref();
                let (warmup, workout, cooldown) = tokio::try_join!(
                    nodes::selectors::run(llm, state, Phase::Warmup),
                    nodes::selectors::run(llm, state, Phase::Workout),
                    nodes::selectors::run(llm, state, Phase::Cooldown),
                )?;
                state.apply(warmup);
                state.apply(workout);
                state.apply(cooldown);
                Ok(Node::Assembler)
            }
            Node::Assembler => {
                let update = nodes::assembler::run(state)?;
                state.apply(update);
                Ok(Node::Invalidator)
            }
            Node::Invalidator => {
                let update = nodes::invalidator::run(state, &mut self.rng);
                state.apply(update);
                Ok(Node::LoopController)
            }
            Node::Persistence => {
                nodes::persistence::run(self.datastore.as_ref(), state, Utc::now()).await?;
                Ok(Node::End)
            }
            Node::End => Ok(Node::End),
        }
    }
}
