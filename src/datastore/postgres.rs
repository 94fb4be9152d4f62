//! Postgres-backed document store.
//!
//! Documents are stored as JSONB rows mirroring the persisted layout:
//! `users(uid, doc)`, `exercise_variations(eid, vid, doc)` and
//! `user_session_weeks(uid, doc_id, doc)` for the per-user archive
//! subcollection.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Row};

use super::{Datastore, DatastoreError, SessionArchive, UserBlacklistUpdate};

#[derive(Clone)]
pub struct PostgresDatastore {
    pool: PgPool,
}

impl PostgresDatastore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unavailable(e: sqlx::Error) -> DatastoreError {
    DatastoreError::Unavailable(e.to_string())
}

#[async_trait]
impl Datastore for PostgresDatastore {
    async fn get_user_profile(&self, uid: &str) -> Result<Option<Value>, DatastoreError> {
        let row = sqlx::query("SELECT doc FROM users WHERE uid = $1")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable)?;

        Ok(row.map(|r| r.get::<Value, _>("doc")))
    }

    async fn get_all_variations(&self) -> Result<Vec<Value>, DatastoreError> {
        let rows = sqlx::query("SELECT doc FROM exercise_variations ORDER BY eid, vid")
            .fetch_all(&self.pool)
            .await
            .map_err(unavailable)?;

        Ok(rows.into_iter().map(|r| r.get::<Value, _>("doc")).collect())
    }

    async fn get_blacklisted_variation_ids(&self, uid: &str) -> Result<Vec<String>, DatastoreError> {
        let profile = self.get_user_profile(uid).await?;
        let ids = profile
            .as_ref()
            .and_then(|doc| doc.get("blackListedVariationIds"))
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(ids)
    }

    async fn write_session_archive(
        &self,
        uid: &str,
        doc_id: &str,
        archive: &SessionArchive,
    ) -> Result<(), DatastoreError> {
        let doc = serde_json::to_value(archive)?;
        sqlx::query(
            r#"
            INSERT INTO user_session_weeks (uid, doc_id, doc)
            VALUES ($1, $2, $3)
            ON CONFLICT (uid, doc_id) DO UPDATE SET doc = EXCLUDED.doc
            "#,
        )
        .bind(uid)
        .bind(doc_id)
        .bind(doc)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(())
    }

    async fn update_user(
        &self,
        uid: &str,
        update: &UserBlacklistUpdate,
    ) -> Result<(), DatastoreError> {
        let patch = serde_json::to_value(update)?;
        sqlx::query("UPDATE users SET doc = doc || $2::jsonb WHERE uid = $1")
            .bind(uid)
            .bind(patch)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;

        Ok(())
    }
}
