//! Persistence backend contract for favorited DAOs.

use async_trait::async_trait;
use daodash_core::{DaoKey, DaodashResult, FavoritedDao, Interface, OffsetRequest};

/// Key-value store holding the ordered favorites collection.
///
/// Implementations must:
/// - keep `(chain, address)` unique,
/// - return `list` results in insertion order, stable across calls,
/// - leave the collection untouched when an operation fails.
#[async_trait]
pub trait FavoritedDaoStore: Interface + Send + Sync {
    /// Finds a favorite by composite key.
    async fn get(&self, key: &DaoKey) -> DaodashResult<Option<FavoritedDao>>;

    /// Lists favorites in insertion order.
    async fn list(&self, request: OffsetRequest) -> DaodashResult<Vec<FavoritedDao>>;

    /// Inserts a new favorite.
    ///
    /// Returns `Conflict` when the key is already present.
    async fn insert(&self, dao: &FavoritedDao) -> DaodashResult<()>;

    /// Overwrites an existing favorite in place, keeping its position.
    ///
    /// Returns `NotFound` when the key is absent.
    async fn update(&self, dao: &FavoritedDao) -> DaodashResult<()>;

    /// Removes a favorite. Returns `true` if a record was removed.
    async fn delete(&self, key: &DaoKey) -> DaodashResult<bool>;

    /// Counts all favorites.
    async fn count(&self) -> DaodashResult<u64>;
}
