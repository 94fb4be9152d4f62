//! Node 1: load the raw generation context from the datastore.

use tracing::info;

use crate::datastore::Datastore;
use crate::error::GenerationError;
use crate::graph::state::StateUpdate;

/// Fetches the user document, the full catalogue, and the blacklist rolled
/// forward by the previous run. A missing user is fatal.
pub async fn run(store: &dyn Datastore, uid: &str) -> Result<StateUpdate, GenerationError> {
    let profile = store
        .get_user_profile(uid)
        .await?
        .ok_or_else(|| GenerationError::MissingUser {
            uid: uid.to_string(),
        })?;

    let variations = store.get_all_variations().await?;
    let blacklist = store.get_blacklisted_variation_ids(uid).await?;

    info!(
        uid,
        variations = variations.len(),
        blacklisted = blacklist.len(),
        "loaded generation context"
    );

    Ok(StateUpdate {
        raw_profile: Some(profile),
        raw_variations: Some(variations),
        initial_blacklist: Some(blacklist),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use crate::datastore::MemoryDatastore;

    use super::*;

    #[tokio::test]
    async fn missing_user_is_fatal() {
        let store = MemoryDatastore::new();
        let err = run(&store, "ghost").await.unwrap_err();
        assert_matches!(err, GenerationError::MissingUser { uid } if uid == "ghost");
    }

    #[tokio::test]
    async fn loads_profile_catalogue_and_blacklist() {
        let store = MemoryDatastore::new();
        store.insert_user("u1", json!({ "blackListedVariationIds": ["v9"] }));
        store.insert_variation(json!({ "id": "v1", "name": "Push up", "phase": "workout" }));

        let update = run(&store, "u1").await.unwrap();
        assert!(update.raw_profile.is_some());
        assert_eq!(update.raw_variations.unwrap().len(), 1);
        assert_eq!(update.initial_blacklist.unwrap(), vec!["v9"]);
    }
}
