//! Abstract document-store interface.
//!
//! The store itself is an external collaborator; the graph only depends on
//! the five operations below. Raw documents cross the boundary as
//! `serde_json::Value` and are projected into typed models by the context
//! cleaner.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::{TrainingSession, WeeklyPlan};

pub use memory::MemoryDatastore;
pub use postgres::PostgresDatastore;

#[derive(Debug, Error)]
pub enum DatastoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The archive document written under `users/{uid}/sessions/` at the end of
/// a successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionArchive {
    pub weekly_plan: WeeklyPlan,
    pub final_sessions: Vec<TrainingSession>,
    pub created_at: DateTime<Utc>,
    pub week_timestamp: i64,
}

/// Blacklist rotation payload merged into `users/{uid}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBlacklistUpdate {
    pub black_listed_variation_ids: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

#[async_trait]
pub trait Datastore: Send + Sync {
    /// Full user document, or `None` when the user does not exist.
    async fn get_user_profile(&self, uid: &str) -> Result<Option<Value>, DatastoreError>;

    /// Every catalogue variation, flattened from
    /// `exercises/{eid}/variations/{vid}`.
    async fn get_all_variations(&self) -> Result<Vec<Value>, DatastoreError>;

    /// The variation ids rolled forward by the previous run. Missing field
    /// reads as empty.
    async fn get_blacklisted_variation_ids(&self, uid: &str) -> Result<Vec<String>, DatastoreError>;

    /// Write the archive document `users/{uid}/sessions/{doc_id}`.
    async fn write_session_archive(
        &self,
        uid: &str,
        doc_id: &str,
        archive: &SessionArchive,
    ) -> Result<(), DatastoreError>;

    /// Overwrite the user's blacklist and `lastUpdated` fields.
    async fn update_user(
        &self,
        uid: &str,
        update: &UserBlacklistUpdate,
    ) -> Result<(), DatastoreError>;
}
