//! Favorites service implementation.

use crate::avatar::AvatarResolver;
use crate::cache::QueryClient;
use crate::favorites_service::FavoritesService;
use crate::mutations::{AddFavoriteDaoMutation, RemoveFavoriteDaoMutation, UpdateFavoritedDaoMutation};
use crate::queries::{FavoritedDaoQuery, FavoritedDaosQuery, InfiniteData, InfiniteFavoritedDaosQuery};
use async_trait::async_trait;
use daodash_core::{DaoKey, DaodashResult, FavoritedDao, Network, PageRequest};
use daodash_repository::FavoritedDaoStore;
use shaku::Component;
use std::sync::Arc;
use tracing::debug;

/// Favorites service component for Shaku DI.
///
/// Bundles one backend, one avatar resolver and one query cache; every
/// query and mutation it builds shares that cache.
#[derive(Component)]
#[shaku(interface = FavoritesService)]
pub struct FavoritesServiceImpl {
    #[shaku(inject)]
    store: Arc<dyn FavoritedDaoStore>,
    #[shaku(inject)]
    resolver: Arc<dyn AvatarResolver>,
    #[shaku(default)]
    client: Arc<QueryClient>,
    #[shaku(default = PageRequest::DEFAULT_SIZE)]
    page_size: usize,
}

impl FavoritesServiceImpl {
    /// Creates a new favorites service.
    #[must_use]
    pub fn new(
        store: Arc<dyn FavoritedDaoStore>,
        resolver: Arc<dyn AvatarResolver>,
        client: Arc<QueryClient>,
        page_size: usize,
    ) -> Self {
        Self {
            store,
            resolver,
            client,
            page_size,
        }
    }

    #[must_use]
    pub fn favorited_dao_query(&self, address: Option<String>, network: Option<Network>) -> FavoritedDaoQuery {
        FavoritedDaoQuery::new(Arc::clone(&self.client), Arc::clone(&self.store), address, network)
    }

    #[must_use]
    pub fn favorited_daos_query(&self, skip: usize, limit: Option<usize>) -> FavoritedDaosQuery {
        FavoritedDaosQuery::new(
            Arc::clone(&self.client),
            Arc::clone(&self.store),
            Arc::clone(&self.resolver),
        )
        .skip(skip)
        .limit(limit)
    }

    #[must_use]
    pub fn infinite_favorited_daos_query(&self) -> InfiniteFavoritedDaosQuery {
        InfiniteFavoritedDaosQuery::new(
            Arc::clone(&self.client),
            Arc::clone(&self.store),
            Arc::clone(&self.resolver),
        )
        .limit(self.page_size)
    }

    #[must_use]
    pub fn add_mutation(&self) -> AddFavoriteDaoMutation {
        AddFavoriteDaoMutation::new(Arc::clone(&self.client), Arc::clone(&self.store))
    }

    #[must_use]
    pub fn remove_mutation(&self) -> RemoveFavoriteDaoMutation {
        RemoveFavoriteDaoMutation::new(Arc::clone(&self.client), Arc::clone(&self.store))
    }

    #[must_use]
    pub fn update_mutation(&self) -> UpdateFavoritedDaoMutation {
        UpdateFavoritedDaoMutation::new(Arc::clone(&self.client), Arc::clone(&self.store))
    }
}

#[async_trait]
impl FavoritesService for FavoritesServiceImpl {
    async fn favorited_dao(
        &self,
        address: Option<String>,
        network: Option<Network>,
    ) -> DaodashResult<Option<FavoritedDao>> {
        self.favorited_dao_query(address, network).fetch().await
    }

    async fn favorited_daos(&self, skip: usize, limit: Option<usize>) -> DaodashResult<Vec<FavoritedDao>> {
        debug!("Listing favorites, skip: {}, limit: {:?}", skip, limit);
        self.favorited_daos_query(skip, limit).fetch().await
    }

    async fn infinite_favorited_daos(&self, max_pages: Option<usize>) -> DaodashResult<InfiniteData> {
        let query = self.infinite_favorited_daos_query();
        let mut data = query.fetch().await?;
        while query.has_next_page()? && max_pages.map_or(true, |max| data.pages.len() < max) {
            data = query.fetch_next_page().await?;
        }
        debug!("Loaded {} favorites in {} pages", data.len(), data.pages.len());
        Ok(data)
    }

    async fn add_favorite(&self, dao: FavoritedDao) -> DaodashResult<FavoritedDao> {
        self.add_mutation().mutate(dao).await
    }

    async fn remove_favorite(&self, key: DaoKey) -> DaodashResult<bool> {
        self.remove_mutation().mutate(key).await
    }

    async fn update_favorite(&self, dao: FavoritedDao) -> DaodashResult<FavoritedDao> {
        self.update_mutation().mutate(dao).await
    }

    async fn is_favorited(&self, address: &str, network: Network) -> DaodashResult<bool> {
        let dao = self
            .favorited_dao_query(Some(address.to_string()), Some(network))
            .refetch()
            .await?;
        Ok(dao.is_some())
    }

    async fn favorites_count(&self) -> DaodashResult<u64> {
        self.store.count().await
    }

    fn query_client(&self) -> Arc<QueryClient> {
        Arc::clone(&self.client)
    }
}

impl std::fmt::Debug for FavoritesServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesServiceImpl")
            .field("client", &self.client)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}
