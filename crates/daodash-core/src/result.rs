//! Result type aliases for DAODash.

use crate::DaodashError;

/// A specialized `Result` type for DAODash operations.
pub type DaodashResult<T> = Result<T, DaodashError>;

/// A boxed future returning a `DaodashResult`.
pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = DaodashResult<T>> + Send + 'a>>;
