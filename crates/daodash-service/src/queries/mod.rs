//! Read-side queries over the favorites collection.

mod favorited_dao;
mod favorited_daos;
mod infinite_favorited_daos;

pub use favorited_dao::FavoritedDaoQuery;
pub use favorited_daos::FavoritedDaosQuery;
pub use infinite_favorited_daos::{InfiniteData, InfiniteFavoritedDaosQuery};
