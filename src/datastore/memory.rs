//! In-memory datastore used by the test suite and local development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use super::{Datastore, DatastoreError, SessionArchive, UserBlacklistUpdate};

#[derive(Debug, Default)]
pub struct MemoryDatastore {
    users: RwLock<HashMap<String, Value>>,
    variations: RwLock<Vec<Value>>,
    archives: RwLock<HashMap<String, Value>>,
}

impl MemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_user(&self, uid: &str, doc: Value) {
        self.users.write().unwrap().insert(uid.to_string(), doc);
    }

    pub fn insert_variation(&self, doc: Value) {
        self.variations.write().unwrap().push(doc);
    }

    /// Archive documents written so far, keyed by `{uid}/{doc_id}`.
    pub fn archives(&self) -> HashMap<String, Value> {
        self.archives.read().unwrap().clone()
    }

    pub fn user(&self, uid: &str) -> Option<Value> {
        self.users.read().unwrap().get(uid).cloned()
    }
}

#[async_trait]
impl Datastore for MemoryDatastore {
    async fn get_user_profile(&self, uid: &str) -> Result<Option<Value>, DatastoreError> {
        Ok(self.users.read().unwrap().get(uid).cloned())
    }

    async fn get_all_variations(&self) -> Result<Vec<Value>, DatastoreError> {
        Ok(self.variations.read().unwrap().clone())
    }

    async fn get_blacklisted_variation_ids(&self, uid: &str) -> Result<Vec<String>, DatastoreError> {
        let users = self.users.read().unwrap();
        let ids = users
            .get(uid)
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
        self.archives
            .write()
            .unwrap()
            .insert(format!("{uid}/{doc_id}"), doc);
        Ok(())
    }

    async fn update_user(
        &self,
        uid: &str,
        update: &UserBlacklistUpdate,
    ) -> Result<(), DatastoreError> {
        let mut users = self.users.write().unwrap();
        let doc = users
            .entry(uid.to_string())
            .or_insert_with(|| Value::Object(Default::default()));
        if let Some(obj) = doc.as_object_mut() {
            obj.insert(
                "blackListedVariationIds".to_string(),
                serde_json::to_value(&update.black_listed_variation_ids)?,
            );
            obj.insert(
                "lastUpdated".to_string(),
                serde_json::to_value(update.last_updated)?,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn blacklist_defaults_to_empty() {
        let store = MemoryDatastore::new();
        store.insert_user("u1", json!({ "displayName": "Ada" }));
        let ids = store.get_blacklisted_variation_ids("u1").await.unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn update_user_overwrites_blacklist() {
        let store = MemoryDatastore::new();
        store.insert_user("u1", json!({ "blackListedVariationIds": ["a", "b"] }));

        let update = UserBlacklistUpdate {
            black_listed_variation_ids: vec!["c".to_string()],
            last_updated: Utc::now(),
        };
        store.update_user("u1", &update).await.unwrap();

        let ids = store.get_blacklisted_variation_ids("u1").await.unwrap();
        assert_eq!(ids, vec!["c"]);
    }
}
