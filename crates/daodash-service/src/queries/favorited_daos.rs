//! Offset-paginated listing of favorites.

use crate::avatar::{augment_daos, AvatarResolver};
use crate::cache::{QueryClient, QueryKey, QueryState};
use daodash_core::{DaodashResult, FavoritedDao, OffsetRequest};
use daodash_repository::FavoritedDaoStore;
use std::sync::Arc;

/// Lists favorites from offset `skip`, at most `limit` of them.
///
/// The cache holds the backend records as returned; avatars are resolved
/// on every read.
pub struct FavoritedDaosQuery {
    client: Arc<QueryClient>,
    store: Arc<dyn FavoritedDaoStore>,
    resolver: Arc<dyn AvatarResolver>,
    request: OffsetRequest,
}

impl FavoritedDaosQuery {
    /// Creates a listing query from the start with no limit.
    #[must_use]
    pub fn new(
        client: Arc<QueryClient>,
        store: Arc<dyn FavoritedDaoStore>,
        resolver: Arc<dyn AvatarResolver>,
    ) -> Self {
        Self {
            client,
            store,
            resolver,
            request: OffsetRequest::all(),
        }
    }

    #[must_use]
    pub fn skip(mut self, skip: usize) -> Self {
        self.request.skip = skip;
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.request.limit = limit;
        self
    }

    #[must_use]
    pub fn key(&self) -> QueryKey {
        QueryKey::favorited_daos(self.request.skip, self.request.limit)
    }

    /// Returns the augmented page, fetching it when the cached value is stale.
    pub async fn fetch(&self) -> DaodashResult<Vec<FavoritedDao>> {
        self.load(false).await
    }

    /// Fetches the page from the backend even when the cached value is fresh.
    pub async fn refetch(&self) -> DaodashResult<Vec<FavoritedDao>> {
        self.load(true).await
    }

    async fn load(&self, force: bool) -> DaodashResult<Vec<FavoritedDao>> {
        let store = Arc::clone(&self.store);
        let request = self.request;
        let key = self.key();
        let fetcher = || async move { store.list(request).await };
        let daos = if force {
            self.client.refetch_query(&key, fetcher).await?
        } else {
            self.client.fetch_query(&key, fetcher).await?
        };
        Ok(augment_daos(self.resolver.as_ref(), daos))
    }

    /// Returns the cached state, augmented, without fetching.
    pub fn state(&self) -> DaodashResult<QueryState<Vec<FavoritedDao>>> {
        let state = self.client.query_state::<Vec<FavoritedDao>>(&self.key())?;
        Ok(state.map(|daos| augment_daos(self.resolver.as_ref(), daos)))
    }
}

impl std::fmt::Debug for FavoritedDaosQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritedDaosQuery")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}
