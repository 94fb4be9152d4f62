//! Node 8: archive the generated week and rotate the blacklist.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::datastore::{Datastore, SessionArchive, UserBlacklistUpdate};
use crate::error::GenerationError;
use crate::graph::state::GraphState;

const NODE: &str = "persistence";

/// Two ordered writes: the archive document first, then the blacklist
/// overwrite. A blacklist failure after a durable archive is surfaced as
/// fatal, but leaves the system in an acceptable degraded state (the next
/// run reads a stale blacklist).
pub async fn run(
    store: &dyn Datastore,
    state: &GraphState,
    now: DateTime<Utc>,
) -> Result<(), GenerationError> {
    let plan = state
        .weekly_plan
        .as_ref()
        .ok_or_else(|| GenerationError::Validation {
            node: NODE,
            message: "weekly plan missing".to_string(),
        })?;

    let week_timestamp = now.timestamp();
    let doc_id = format!("sessions_week_{week_timestamp}");
    let archive = SessionArchive {
        weekly_plan: plan.clone(),
        final_sessions: state.final_sessions.clone(),
        created_at: now,
        week_timestamp,
    };

    store
        .write_session_archive(&state.uid, &doc_id, &archive)
        .await
        .map_err(GenerationError::ArchiveWrite)?;

    // session_used_ids is already 50%-filtered per session by the
    // invalidator; it is written verbatim here.
    let update = UserBlacklistUpdate {
        black_listed_variation_ids: state.session_used_ids.clone(),
        last_updated: now,
    };
    store
        .update_user(&state.uid, &update)
        .await
        .map_err(GenerationError::BlacklistRotate)?;

    info!(
        uid = %state.uid,
        doc_id,
        sessions = state.final_sessions.len(),
        blacklisted = state.session_used_ids.len(),
        "week archived and blacklist rotated"
    );

    Ok(())
}
