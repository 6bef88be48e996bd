//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// An offset-based request: skip `skip` records, return at most `limit`.
///
/// A `limit` of `None` means "everything after `skip`".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OffsetRequest {
    /// Number of records to skip.
    pub skip: usize,
    /// Maximum number of records to return.
    pub limit: Option<usize>,
}

impl OffsetRequest {
    /// Creates a new offset request.
    #[must_use]
    pub const fn new(skip: usize, limit: Option<usize>) -> Self {
        Self { skip, limit }
    }

    /// Returns every record.
    #[must_use]
    pub const fn all() -> Self {
        Self::new(0, None)
    }

    /// Applies the request to an ordered slice.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        if self.skip >= items.len() {
            return &[];
        }
        let end = match self.limit {
            Some(limit) => std::cmp::min(self.skip.saturating_add(limit), items.len()),
            None => items.len(),
        };
        &items[self.skip..end]
    }
}

/// A request for a fixed-size page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (0-indexed).
    pub page: usize,
    /// The number of items per page.
    pub size: usize,
}

impl PageRequest {
    /// The default page size for infinite listings.
    pub const DEFAULT_SIZE: usize = 4;

    /// Creates a new page request.
    #[must_use]
    pub const fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }

    /// Returns the offset of the first record on this page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page * self.size
    }

    /// Returns the request for the following page.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self::new(self.page + 1, self.size)
    }

    /// Converts into the equivalent offset request.
    #[must_use]
    pub const fn to_offset(&self) -> OffsetRequest {
        OffsetRequest::new(self.offset(), Some(self.size))
    }

    /// Whether another page may follow a page of `last_len` records.
    ///
    /// A short page signals exhaustion. A full last page costs one extra
    /// empty fetch before termination.
    #[must_use]
    pub const fn has_next(&self, last_len: usize) -> bool {
        last_len == self.size
    }
}
