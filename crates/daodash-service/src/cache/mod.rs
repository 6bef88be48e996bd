//! Query cache for the favorites layer.
//!
//! Every query owns one [`QueryKey`]; mutations invalidate through
//! [`QueryFilter`]s so overlapping views refetch on their next read.

mod query_client;
mod query_key;

pub use query_client::{QueryClient, QueryState, QueryStatus};
pub use query_key::{QueryFilter, QueryKey, QueryKind};
