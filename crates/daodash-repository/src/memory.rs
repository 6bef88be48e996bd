//! In-memory favorites backend.

use crate::FavoritedDaoStore;
use async_trait::async_trait;
use daodash_core::{DaoKey, DaodashError, DaodashResult, FavoritedDao, OffsetRequest};
use shaku::Component;
use tokio::sync::RwLock;
use tracing::debug;

/// Process-local backend keeping favorites in an insertion-ordered `Vec`.
///
/// Each operation runs under a single lock acquisition, so a write is
/// either fully applied or not applied at all.
#[derive(Component, Default)]
#[shaku(interface = FavoritedDaoStore)]
pub struct InMemoryFavoritedDaoStore {
    #[shaku(default)]
    daos: RwLock<Vec<FavoritedDao>>,
}

impl InMemoryFavoritedDaoStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `daos`, in order.
    ///
    /// Later duplicates of a key are dropped.
    #[must_use]
    pub fn with_daos(daos: Vec<FavoritedDao>) -> Self {
        let mut unique: Vec<FavoritedDao> = Vec::with_capacity(daos.len());
        for dao in daos {
            if !unique.iter().any(|d| d.chain == dao.chain && d.address == dao.address) {
                unique.push(dao);
            }
        }
        Self {
            daos: RwLock::new(unique),
        }
    }
}

#[async_trait]
impl FavoritedDaoStore for InMemoryFavoritedDaoStore {
    async fn get(&self, key: &DaoKey) -> DaodashResult<Option<FavoritedDao>> {
        Ok(self.daos.read().await.iter().find(|d| d.has_key(key)).cloned())
    }

    async fn list(&self, request: OffsetRequest) -> DaodashResult<Vec<FavoritedDao>> {
        let daos = self.daos.read().await;
        Ok(request.slice(daos.as_slice()).to_vec())
    }

    async fn insert(&self, dao: &FavoritedDao) -> DaodashResult<()> {
        let key = dao.key();
        let mut daos = self.daos.write().await;
        if daos.iter().any(|d| d.has_key(&key)) {
            return Err(DaodashError::conflict(format!("DAO {} is already a favorite", key)));
        }
        daos.push(dao.clone());
        debug!("Inserted favorite {} ({} total)", key, daos.len());
        Ok(())
    }

    async fn update(&self, dao: &FavoritedDao) -> DaodashResult<()> {
        let key = dao.key();
        let mut daos = self.daos.write().await;
        let slot = daos
            .iter_mut()
            .find(|d| d.has_key(&key))
            .ok_or_else(|| DaodashError::not_found("FavoritedDao", &key))?;
        *slot = dao.clone();
        debug!("Updated favorite {}", key);
        Ok(())
    }

    async fn delete(&self, key: &DaoKey) -> DaodashResult<bool> {
        let mut daos = self.daos.write().await;
        let before = daos.len();
        daos.retain(|d| !d.has_key(key));
        Ok(daos.len() < before)
    }

    async fn count(&self) -> DaodashResult<u64> {
        Ok(self.daos.read().await.len() as u64)
    }
}

impl std::fmt::Debug for InMemoryFavoritedDaoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryFavoritedDaoStore").finish_non_exhaustive()
    }
}
