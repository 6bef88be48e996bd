//! Favorites service trait definition.

use crate::cache::QueryClient;
use crate::queries::InfiniteData;
use async_trait::async_trait;
use daodash_core::{DaoKey, DaodashResult, FavoritedDao, Interface, Network};
use std::sync::Arc;

/// Favorites service trait.
#[async_trait]
pub trait FavoritesService: Interface + Send + Sync {
    /// Looks up one favorite. Returns `None` when either input is missing
    /// or the DAO is not a favorite.
    async fn favorited_dao(
        &self,
        address: Option<String>,
        network: Option<Network>,
    ) -> DaodashResult<Option<FavoritedDao>>;

    /// Lists favorites from `skip`, at most `limit` of them.
    async fn favorited_daos(&self, skip: usize, limit: Option<usize>) -> DaodashResult<Vec<FavoritedDao>>;

    /// Loads the infinite listing page by page until it is exhausted or
    /// `max_pages` pages are loaded.
    async fn infinite_favorited_daos(&self, max_pages: Option<usize>) -> DaodashResult<InfiniteData>;

    /// Adds a favorite.
    async fn add_favorite(&self, dao: FavoritedDao) -> DaodashResult<FavoritedDao>;

    /// Removes a favorite. Returns whether a record was removed.
    async fn remove_favorite(&self, key: DaoKey) -> DaodashResult<bool>;

    /// Overwrites an existing favorite.
    async fn update_favorite(&self, dao: FavoritedDao) -> DaodashResult<FavoritedDao>;

    /// Checks whether a DAO is a favorite.
    ///
    /// Always asks the backend and refreshes the cached point lookup.
    async fn is_favorited(&self, address: &str, network: Network) -> DaodashResult<bool>;

    /// Counts all favorites, straight from the backend.
    async fn favorites_count(&self) -> DaodashResult<u64>;

    /// Returns the query cache shared by this service's queries.
    fn query_client(&self) -> Arc<QueryClient>;
}
