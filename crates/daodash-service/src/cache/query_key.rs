//! Typed cache keys for favorited-DAO queries.

use daodash_core::Network;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one cached query result. Keys compare by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum QueryKey {
    /// Point lookup of one favorite.
    FavoritedDao {
        address: String,
        network: Option<Network>,
    },
    /// Offset-paginated listing.
    FavoritedDaos { skip: usize, limit: Option<usize> },
    /// Cursor-based listing, one entry per page size.
    InfiniteFavoritedDaos { limit: usize },
}

impl QueryKey {
    /// Creates a point-lookup key.
    #[must_use]
    pub fn favorited_dao(address: impl Into<String>, network: Option<Network>) -> Self {
        Self::FavoritedDao {
            address: address.into(),
            network,
        }
    }

    /// Creates a paginated-listing key.
    #[must_use]
    pub const fn favorited_daos(skip: usize, limit: Option<usize>) -> Self {
        Self::FavoritedDaos { skip, limit }
    }

    /// Creates an infinite-listing key.
    #[must_use]
    pub const fn infinite_favorited_daos(limit: usize) -> Self {
        Self::InfiniteFavoritedDaos { limit }
    }

    /// Returns the kind of query this key belongs to.
    #[must_use]
    pub const fn kind(&self) -> QueryKind {
        match self {
            Self::FavoritedDao { .. } => QueryKind::FavoritedDao,
            Self::FavoritedDaos { .. } => QueryKind::FavoritedDaos,
            Self::InfiniteFavoritedDaos { .. } => QueryKind::InfiniteFavoritedDaos,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FavoritedDao { address, network } => {
                let network = network.map_or("none", |n| n.as_str());
                write!(f, "favoritedDao/{}/{}", address, network)
            }
            Self::FavoritedDaos { skip, limit } => match limit {
                Some(limit) => write!(f, "favoritedDaos/skip={}/limit={}", skip, limit),
                None => write!(f, "favoritedDaos/skip={}/limit=all", skip),
            },
            Self::InfiniteFavoritedDaos { limit } => {
                write!(f, "infiniteFavoritedDaos/limit={}", limit)
            }
        }
    }
}

/// The query families a key can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryKind {
    FavoritedDao,
    FavoritedDaos,
    InfiniteFavoritedDaos,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FavoritedDao => "favoritedDao",
            Self::FavoritedDaos => "favoritedDaos",
            Self::InfiniteFavoritedDaos => "infiniteFavoritedDaos",
        };
        f.write_str(name)
    }
}

/// Selects cache entries for invalidation, cancellation or removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFilter {
    /// Exactly one key.
    Exact(QueryKey),
    /// Every key of one kind, whatever its parameters.
    Kind(QueryKind),
    /// Every key.
    All,
}

impl QueryFilter {
    /// Checks whether `key` is selected by this filter.
    #[must_use]
    pub fn matches(&self, key: &QueryKey) -> bool {
        match self {
            Self::Exact(exact) => exact == key,
            Self::Kind(kind) => key.kind() == *kind,
            Self::All => true,
        }
    }
}

impl From<QueryKey> for QueryFilter {
    fn from(key: QueryKey) -> Self {
        Self::Exact(key)
    }
}

impl From<QueryKind> for QueryFilter {
    fn from(kind: QueryKind) -> Self {
        Self::Kind(kind)
    }
}

impl fmt::Display for QueryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(key) => write!(f, "{}", key),
            Self::Kind(kind) => write!(f, "{}/*", kind),
            Self::All => f.write_str("*"),
        }
    }
}
