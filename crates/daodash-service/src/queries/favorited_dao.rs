//! Point lookup of one favorite.

use crate::cache::{QueryClient, QueryKey, QueryState};
use daodash_core::{DaoKey, DaodashResult, FavoritedDao, Network};
use daodash_repository::FavoritedDaoStore;
use std::sync::Arc;
use tracing::debug;

/// Looks up a favorite by address and network.
///
/// Disabled until both inputs are present: a disabled query never reaches
/// the backend and reports an idle state. The result is `None` when the DAO
/// is not a favorite.
pub struct FavoritedDaoQuery {
    client: Arc<QueryClient>,
    store: Arc<dyn FavoritedDaoStore>,
    address: Option<String>,
    network: Option<Network>,
}

impl FavoritedDaoQuery {
    /// Creates a point-lookup query.
    #[must_use]
    pub fn new(
        client: Arc<QueryClient>,
        store: Arc<dyn FavoritedDaoStore>,
        address: Option<String>,
        network: Option<Network>,
    ) -> Self {
        Self {
            client,
            store,
            address,
            network,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.address.is_some() && self.network.is_some()
    }

    /// Cache key, or `None` while disabled.
    #[must_use]
    pub fn key(&self) -> Option<QueryKey> {
        match (&self.address, self.network) {
            (Some(address), Some(network)) => {
                Some(QueryKey::favorited_dao(address.clone(), Some(network)))
            }
            _ => None,
        }
    }

    /// Returns the favorite, fetching it when the cached value is stale.
    pub async fn fetch(&self) -> DaodashResult<Option<FavoritedDao>> {
        self.lookup(false).await
    }

    /// Fetches the favorite from the backend even when the cached value is
    /// fresh, and caches the result.
    pub async fn refetch(&self) -> DaodashResult<Option<FavoritedDao>> {
        self.lookup(true).await
    }

    async fn lookup(&self, force: bool) -> DaodashResult<Option<FavoritedDao>> {
        let (Some(address), Some(network), Some(key)) = (&self.address, self.network, self.key())
        else {
            debug!("Favorited DAO query disabled, skipping fetch");
            return Ok(None);
        };

        let dao_key = DaoKey::new(network.chain_id(), address.clone());
        let store = Arc::clone(&self.store);
        let fetcher = || async move { store.get(&dao_key).await };
        if force {
            self.client.refetch_query(&key, fetcher).await
        } else {
            self.client.fetch_query(&key, fetcher).await
        }
    }

    /// Returns the cached state without fetching.
    ///
    /// `data` is `Some(None)` once a lookup has confirmed the DAO is not a
    /// favorite.
    pub fn state(&self) -> DaodashResult<QueryState<Option<FavoritedDao>>> {
        match self.key() {
            Some(key) => self.client.query_state(&key),
            None => Ok(QueryState::idle()),
        }
    }
}

impl std::fmt::Debug for FavoritedDaoQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritedDaoQuery")
            .field("address", &self.address)
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}
