//! # DAODash Repository
//!
//! Persistence backends for the favorites collection:
//!
//! ```text
//! daodash-service (favorites cache layer)
//!   |  Arc<dyn FavoritedDaoStore>       (backend contract)
//!   v
//! InMemoryFavoritedDaoStore            (process-local, ordered Vec)
//! SqliteFavoritedDaoStore              (SQLx / SQLite)
//!   |
//!   v
//! SQLite
//! ```
//!
//! Both backends keep insertion order for listing and return `NotFound`
//! when updating a missing key.

pub mod memory;
pub mod pool;
pub mod sqlite;
pub mod traits;

pub use memory::InMemoryFavoritedDaoStore;
pub use pool::*;
pub use sqlite::{SqliteFavoritedDaoStore, SqliteFavoritedDaoStoreParameters};
pub use traits::*;
