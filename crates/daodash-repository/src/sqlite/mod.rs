//! SQLite implementation of the favorites backend.

mod favorited_dao_store;

pub use favorited_dao_store::{SqliteFavoritedDaoStore, SqliteFavoritedDaoStoreParameters};
