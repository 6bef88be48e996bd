use super::{invalidate_listings, MutationState, MutationTracker, OnSuccess};
use crate::cache::QueryClient;
use daodash_core::{DaodashResult, FavoritedDao};
use daodash_repository::FavoritedDaoStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Adds a DAO to the favorites.
///
/// Invalidates every listing. Point lookups are left alone: a cached
/// "not a favorite" answer stays until it is invalidated separately.
pub struct AddFavoriteDaoMutation {
    client: Arc<QueryClient>,
    store: Arc<dyn FavoritedDaoStore>,
    on_success: Option<OnSuccess<FavoritedDao>>,
    tracker: MutationTracker,
}

impl AddFavoriteDaoMutation {
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
    pub fn with_on_success(mut self, on_success: impl Fn(&FavoritedDao) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(on_success));
        self
    }

    /// Inserts `dao`. Fails with `Conflict` when it is already a favorite.
    pub async fn mutate(&self, dao: FavoritedDao) -> DaodashResult<FavoritedDao> {
        self.tracker.begin();

        let result = match dao.validate_record() {
            Ok(()) => self.store.insert(&dao).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            warn!("Failed to add favorite {}: {}", dao.key(), e);
            self.tracker.fail(&e);
            return Err(e);
        }

        let invalidated = invalidate_listings(&self.client);
        self.tracker.succeed();
        info!("Added favorite {} ({} queries invalidated)", dao.key(), invalidated);

        if let Some(on_success) = &self.on_success {
            on_success(&dao);
        }
        Ok(dao)
    }

    #[must_use]
    pub fn state(&self) -> MutationState {
        self.tracker.snapshot()
    }
}

impl std::fmt::Debug for AddFavoriteDaoMutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddFavoriteDaoMutation")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
