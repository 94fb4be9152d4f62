// Generation graph: the state record threaded through all nodes plus the
// driver that walks them.

pub mod engine;
pub mod state;

pub use engine::{GenerationGraph, MAX_TRANSITIONS};
pub use state::{GraphState, ScoredPool, SessionContext, StateUpdate};
