//! Dependency injection module using Shaku.
//!
//! Two modules share the avatar resolver and the favorites service and
//! differ only in the backend:
//! - `MemoryModule`: process-local store, lost on exit
//! - `SqliteModule`: SQLite store on a migrated pool

use daodash_config::{AppConfig, IpfsConfig, QueryConfig, StorageBackend};
use daodash_core::{module, DaodashResult, HasComponent};
use daodash_repository::{
    create_pool, DatabasePool, FavoritedDaoStore, InMemoryFavoritedDaoStore, SqliteFavoritedDaoStore,
    SqliteFavoritedDaoStoreParameters,
};
use daodash_service::{
    AvatarResolver, FavoritesService, FavoritesServiceImpl, FavoritesServiceImplParameters,
    IpfsAvatarResolver, IpfsAvatarResolverParameters, QueryClient,
};
use std::sync::Arc;
use tracing::info;

// ============================================================================
// Shaku Module Definitions
// ============================================================================

module! {
    pub MemoryModule {
        components = [
            InMemoryFavoritedDaoStore,
            IpfsAvatarResolver,
            FavoritesServiceImpl,
        ],
        providers = [],
    }
}

module! {
    pub SqliteModule {
        components = [
            SqliteFavoritedDaoStore,
            IpfsAvatarResolver,
            FavoritesServiceImpl,
        ],
        providers = [],
    }
}

// ============================================================================
// Module Builders
// ============================================================================

fn resolver_parameters(ipfs: &IpfsConfig) -> IpfsAvatarResolverParameters {
    let resolver = IpfsAvatarResolver::from_config(ipfs);
    IpfsAvatarResolverParameters {
        gateway: resolver.gateway().to_string(),
        testnet_gateway: resolver.testnet_gateway().to_string(),
    }
}

fn service_parameters(query: &QueryConfig) -> FavoritesServiceImplParameters {
    FavoritesServiceImplParameters {
        client: Arc::new(QueryClient::from_config(query)),
        page_size: query.infinite_page_size,
    }
}

/// Builds a module backed by the in-memory store.
#[must_use]
pub fn build_memory_module(query: &QueryConfig, ipfs: &IpfsConfig) -> Arc<MemoryModule> {
    let module = MemoryModule::builder()
        .with_component_parameters::<IpfsAvatarResolver>(resolver_parameters(ipfs))
        .with_component_parameters::<FavoritesServiceImpl>(service_parameters(query))
        .build();

    Arc::new(module)
}

/// Builds a module backed by SQLite on an already migrated pool.
#[must_use]
pub fn build_sqlite_module(
    pool: Arc<DatabasePool>,
    query: &QueryConfig,
    ipfs: &IpfsConfig,
) -> Arc<SqliteModule> {
    let module = SqliteModule::builder()
        .with_component_parameters::<SqliteFavoritedDaoStore>(SqliteFavoritedDaoStoreParameters {
            pool,
        })
        .with_component_parameters::<IpfsAvatarResolver>(resolver_parameters(ipfs))
        .with_component_parameters::<FavoritesServiceImpl>(service_parameters(query))
        .build();

    Arc::new(module)
}

/// The favorites service and the connection pool behind it, if any.
pub struct FavoritesApp {
    service: Arc<dyn FavoritesService>,
    pool: Option<Arc<DatabasePool>>,
}

impl FavoritesApp {
    #[must_use]
    pub fn service(&self) -> &dyn FavoritesService {
        self.service.as_ref()
    }

    /// Closes the database pool.
    pub async fn shutdown(self) {
        if let Some(pool) = self.pool {
            pool.close().await;
        }
    }
}

/// Builds the favorites service for the configured backend.
///
/// For SQLite the pool is connected, migrated and health-checked first.
pub async fn build_favorites_app(config: &AppConfig) -> DaodashResult<FavoritesApp> {
    info!("Storage backend: {}", config.storage.backend);

    let app = match config.storage.backend {
        StorageBackend::Memory => FavoritesApp {
            service: build_memory_module(&config.query, &config.ipfs).favorites_service(),
            pool: None,
        },
        StorageBackend::Sqlite => {
            let pool = create_pool(&config.storage).await?;
            pool.health_check().await?;
            let module = build_sqlite_module(Arc::clone(&pool), &config.query, &config.ipfs);
            FavoritesApp {
                service: module.favorites_service(),
                pool: Some(pool),
            }
        }
    };

    Ok(app)
}

// ============================================================================
// Module Resolution Helpers
// ============================================================================

/// Trait for resolving the favorites components from any module.
pub trait ServiceResolver {
    /// Resolves the favorites service.
    fn favorites_service(&self) -> Arc<dyn FavoritesService>;

    /// Resolves the backend store.
    fn favorited_dao_store(&self) -> Arc<dyn FavoritedDaoStore>;

    /// Resolves the avatar resolver.
    fn avatar_resolver(&self) -> Arc<dyn AvatarResolver>;
}

impl ServiceResolver for MemoryModule {
    fn favorites_service(&self) -> Arc<dyn FavoritesService> {
        self.resolve()
    }

    fn favorited_dao_store(&self) -> Arc<dyn FavoritedDaoStore> {
        self.resolve()
    }

    fn avatar_resolver(&self) -> Arc<dyn AvatarResolver> {
        self.resolve()
    }
}

impl ServiceResolver for SqliteModule {
    fn favorites_service(&self) -> Arc<dyn FavoritesService> {
        self.resolve()
    }

    fn favorited_dao_store(&self) -> Arc<dyn FavoritedDaoStore> {
        self.resolve()
    }

    fn avatar_resolver(&self) -> Arc<dyn AvatarResolver> {
        self.resolve()
    }
}
