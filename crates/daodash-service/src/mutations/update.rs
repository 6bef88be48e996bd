use super::{invalidate_listings, MutationState, MutationTracker, OnSuccess};
use crate::cache::{QueryClient, QueryKey};
use daodash_core::{DaodashResult, FavoritedDao, Network};
use daodash_repository::FavoritedDaoStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Overwrites an existing favorite, keeping its position in the listing.
///
/// Invalidates the record's point lookup and every listing. Fails with
/// `NotFound` when the DAO is not a favorite, leaving storage untouched.
pub struct UpdateFavoritedDaoMutation {
    client: Arc<QueryClient>,
    store: Arc<dyn FavoritedDaoStore>,
    on_success: Option<OnSuccess<FavoritedDao>>,
    tracker: MutationTracker,
}

impl UpdateFavoritedDaoMutation {
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

    pub async fn mutate(&self, dao: FavoritedDao) -> DaodashResult<FavoritedDao> {
        self.tracker.begin();

        let result = match dao.validate_record() {
            Ok(()) => self.store.update(&dao).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            warn!("Failed to update favorite {}: {}", dao.key(), e);
            self.tracker.fail(&e);
            return Err(e);
        }

        let lookup = QueryKey::favorited_dao(dao.address.clone(), Network::from_chain_id(dao.chain));
        let invalidated = self.client.invalidate(lookup) + invalidate_listings(&self.client);
        self.tracker.succeed();
        info!("Updated favorite {} ({} queries invalidated)", dao.key(), invalidated);

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

impl std::fmt::Debug for UpdateFavoritedDaoMutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateFavoritedDaoMutation")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
