//! # DAODash Service
//!
//! The favorited-DAO cache layer:
//!
//! ```text
//! presentation (CLI)
//!   |  FavoritesService
//!   v
//! queries                        mutations
//!   FavoritedDaoQuery              AddFavoriteDaoMutation
//!   FavoritedDaosQuery             RemoveFavoriteDaoMutation
//!   InfiniteFavoritedDaosQuery     UpdateFavoritedDaoMutation
//!   |                              |  write -> invalidate -> on_success
//!   v                              v
//! QueryClient (typed QueryKey entries)
//!   |
//!   v
//! FavoritedDaoStore + AvatarResolver
//! ```

pub mod avatar;
pub mod cache;
pub mod favorites_service;
pub mod favorites_service_impl;
pub mod mutations;
pub mod queries;

pub use avatar::*;
pub use cache::*;
pub use favorites_service::*;
pub use favorites_service_impl::*;
pub use mutations::*;
pub use queries::*;
