//! SQLite favorites store.
//!
//! Rows are ordered by an autoincrement id, so listing follows insertion
//! order and updates keep a record's position. `metadata` and `plugins`
//! are stored as JSON text.

use crate::{DatabasePool, FavoritedDaoStore};
use async_trait::async_trait;
use daodash_core::{
    ChainId, DaoKey, DaoMetadata, DaoPlugin, DaodashError, DaodashResult, FavoritedDao,
    OffsetRequest,
};
use shaku::Component;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::sync::Arc;
use tracing::{debug, warn};

const SELECT_COLUMNS: &str = "chain, address, ens_domain, metadata, plugins";

/// SQLite-backed favorites store.
#[derive(Component, Clone)]
#[shaku(interface = FavoritedDaoStore)]
pub struct SqliteFavoritedDaoStore {
    pool: Arc<DatabasePool>,
}

impl SqliteFavoritedDaoStore {
    /// Creates a new store on a migrated pool.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }

    fn row_to_dao(row: &SqliteRow) -> DaodashResult<FavoritedDao> {
        let chain: i64 = row.try_get("chain")?;
        let metadata: String = row.try_get("metadata")?;
        let plugins: String = row.try_get("plugins")?;

        Ok(FavoritedDao {
            address: row.try_get("address")?,
            ens_domain: row.try_get("ens_domain")?,
            chain: ChainId(chain_from_db(chain)?),
            metadata: serde_json::from_str::<DaoMetadata>(&metadata)?,
            plugins: serde_json::from_str::<Vec<DaoPlugin>>(&plugins)?,
        })
    }
}

fn chain_to_db(chain: ChainId) -> DaodashResult<i64> {
    i64::try_from(chain.0)
        .map_err(|_| DaodashError::validation(format!("Chain id {} is out of range", chain)))
}

fn chain_from_db(chain: i64) -> DaodashResult<u64> {
    u64::try_from(chain)
        .map_err(|_| DaodashError::storage(format!("Negative chain id {} in storage", chain)))
}

fn limit_to_db(limit: Option<usize>) -> i64 {
    // SQLite treats a negative LIMIT as "no limit".
    limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX))
}

#[async_trait]
impl FavoritedDaoStore for SqliteFavoritedDaoStore {
    async fn get(&self, key: &DaoKey) -> DaodashResult<Option<FavoritedDao>> {
        let sql = format!(
            "SELECT {} FROM favorited_daos WHERE chain = ? AND address = ?",
            SELECT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(chain_to_db(key.chain)?)
            .bind(&key.address)
            .fetch_optional(self.pool.inner())
            .await?;

        row.as_ref().map(Self::row_to_dao).transpose()
    }

    async fn list(&self, request: OffsetRequest) -> DaodashResult<Vec<FavoritedDao>> {
        let sql = format!(
            "SELECT {} FROM favorited_daos ORDER BY id ASC LIMIT ? OFFSET ?",
            SELECT_COLUMNS
        );
        let offset = i64::try_from(request.skip).unwrap_or(i64::MAX);
        let rows = sqlx::query(&sql)
            .bind(limit_to_db(request.limit))
            .bind(offset)
            .fetch_all(self.pool.inner())
            .await?;

        rows.iter().map(Self::row_to_dao).collect()
    }

    async fn insert(&self, dao: &FavoritedDao) -> DaodashResult<()> {
        let result = sqlx::query(
            "INSERT INTO favorited_daos (chain, address, ens_domain, metadata, plugins) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(chain_to_db(dao.chain)?)
        .bind(&dao.address)
        .bind(&dao.ens_domain)
        .bind(serde_json::to_string(&dao.metadata)?)
        .bind(serde_json::to_string(&dao.plugins)?)
        .execute(self.pool.inner())
        .await;

        match result {
            Ok(_) => {
                debug!("Inserted favorite {}", dao.key());
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                DaodashError::conflict(format!("DAO {} is already a favorite", dao.key())),
            ),
            Err(e) => {
                warn!("Failed to insert favorite {}: {}", dao.key(), e);
                Err(e.into())
            }
        }
    }

    async fn update(&self, dao: &FavoritedDao) -> DaodashResult<()> {
        let result = sqlx::query(
            "UPDATE favorited_daos SET ens_domain = ?, metadata = ?, plugins = ? WHERE chain = ? AND address = ?",
        )
        .bind(&dao.ens_domain)
        .bind(serde_json::to_string(&dao.metadata)?)
        .bind(serde_json::to_string(&dao.plugins)?)
        .bind(chain_to_db(dao.chain)?)
        .bind(&dao.address)
        .execute(self.pool.inner())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DaodashError::not_found("FavoritedDao", dao.key()));
        }

        debug!("Updated favorite {}", dao.key());
        Ok(())
    }

    async fn delete(&self, key: &DaoKey) -> DaodashResult<bool> {
        let result = sqlx::query("DELETE FROM favorited_daos WHERE chain = ? AND address = ?")
            .bind(chain_to_db(key.chain)?)
            .bind(&key.address)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> DaodashResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorited_daos")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}

impl std::fmt::Debug for SqliteFavoritedDaoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteFavoritedDaoStore")
            .field("pool", &self.pool)
            .finish()
    }
}
