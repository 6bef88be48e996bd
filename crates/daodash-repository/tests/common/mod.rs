//! Common test infrastructure for database integration tests.

use daodash_config::StorageConfig;
use daodash_core::FavoritedDao;
use daodash_repository::{create_pool, DatabasePool};
use std::sync::Arc;

/// Test database wrapper over a private in-memory SQLite database.
///
/// Every instance gets its own database, so tests never share rows.
pub struct TestDatabase {
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    /// Creates a fresh database with migrations applied.
    pub async fn new() -> Self {
        let pool = create_pool(&StorageConfig::sqlite_in_memory())
            .await
            .expect("Failed to create in-memory database");

        Self { pool }
    }

    /// Returns a reference to the database pool.
    pub fn pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }
}

/// Builds a favorite with a predictable name.
pub fn test_dao(chain: u64, address: &str) -> FavoritedDao {
    FavoritedDao::new(chain, address, format!("DAO {}", address))
}
