use super::{invalidate_listings, MutationState, MutationTracker, OnSuccess};
use crate::cache::QueryClient;
use daodash_core::{DaoKey, DaodashResult};
use daodash_repository::FavoritedDaoStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Removes a DAO from the favorites by composite key.
///
/// Removing a DAO that is not a favorite succeeds without changes.
pub struct RemoveFavoriteDaoMutation {
    client: Arc<QueryClient>,
    store: Arc<dyn FavoritedDaoStore>,
    on_success: Option<OnSuccess<DaoKey>>,
    tracker: MutationTracker,
}

impl RemoveFavoriteDaoMutation {
    #[must_use]
    pub fn new(client: Arc<QueryClient>, store: Arc<dyn FavoritedDaoStore>) -> Self {
        Self {
            client,
            store,
            on_success: None,
            tracker: MutationTracker::default(),
        }
    }

    #[must_use]
    pub fn with_on_success(mut self, on_success: impl Fn(&DaoKey) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(on_success));
        self
    }

    /// Deletes the favorite with `key`. Returns whether a record was removed.
    ///
    /// Accepts a [`DaoKey`] or a `&FavoritedDao`.
    pub async fn mutate(&self, key: impl Into<DaoKey>) -> DaodashResult<bool> {
        let key = key.into();
        self.tracker.begin();

        let removed = match self.store.delete(&key).await {
            Ok(removed) => removed,
            Err(e) => {
                warn!("Failed to remove favorite {}: {}", key, e);
                self.tracker.fail(&e);
                return Err(e);
            }
        };
        if !removed {
            debug!("Favorite {} was not present", key);
        }

        let invalidated = invalidate_listings(&self.client);
        self.tracker.succeed();
        info!("Removed favorite {} ({} queries invalidated)", key, invalidated);

        if let Some(on_success) = &self.on_success {
            on_success(&key);
        }
        Ok(removed)
    }

    #[must_use]
    pub fn state(&self) -> MutationState {
        self.tracker.snapshot()
    }
}

impl std::fmt::Debug for RemoveFavoriteDaoMutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoveFavoriteDaoMutation")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
