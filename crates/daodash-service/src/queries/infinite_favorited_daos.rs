//! Cursor-based ("infinite") listing of favorites.

use crate::avatar::{augment_daos, AvatarResolver};
use crate::cache::{QueryClient, QueryKey, QueryState};
use daodash_core::{DaodashError, DaodashResult, FavoritedDao, PageRequest};
use daodash_repository::FavoritedDaoStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Pages loaded so far, with the offset each page was requested at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfiniteData {
    pub pages: Vec<Vec<FavoritedDao>>,
    pub page_params: Vec<usize>,
}

impl InfiniteData {
    /// The page after the last loaded one.
    ///
    /// The first page when nothing is loaded; `None` once a page came back
    /// shorter than `limit`.
    #[must_use]
    pub fn next_page(&self, limit: usize) -> Option<PageRequest> {
        let Some(last) = self.pages.last() else {
            return Some(PageRequest::new(0, limit));
        };
        let page = PageRequest::new(self.pages.len() - 1, limit);
        page.has_next(last.len()).then(|| page.next())
    }

    /// Offset of the page after the last loaded one.
    #[must_use]
    pub fn next_page_param(&self, limit: usize) -> Option<usize> {
        self.next_page(limit).map(|page| page.offset())
    }

    fn push_page(&mut self, param: usize, page: Vec<FavoritedDao>) {
        self.page_params.push(param);
        self.pages.push(page);
    }

    /// All loaded records in page order.
    #[must_use]
    pub fn flatten(&self) -> Vec<FavoritedDao> {
        self.pages.iter().flatten().cloned().collect()
    }

    /// Number of loaded records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

async fn fetch_pages(
    store: &dyn FavoritedDaoStore,
    limit: usize,
    count: usize,
) -> DaodashResult<InfiniteData> {
    let mut data = InfiniteData::default();
    while data.pages.len() < count {
        let Some(page) = data.next_page(limit) else {
            break;
        };
        let records = store.list(page.to_offset()).await?;
        data.push_page(page.offset(), records);
    }
    Ok(data)
}

/// Listing loaded one page of `limit` records at a time.
///
/// Page `n` starts at offset `limit * n`. Another page is available while
/// the last page came back full, so a collection whose size is a multiple
/// of `limit` ends with one empty page.
pub struct InfiniteFavoritedDaosQuery {
    client: Arc<QueryClient>,
    store: Arc<dyn FavoritedDaoStore>,
    resolver: Arc<dyn AvatarResolver>,
    limit: usize,
    enabled: bool,
}

impl InfiniteFavoritedDaosQuery {
    /// Creates an enabled query with the default page size.
    #[must_use]
    pub fn new(
        client: Arc<QueryClient>,
        store: Arc<dyn FavoritedDaoStore>,
        resolver: Arc<dyn AvatarResolver>,
    ) -> Self {
        Self {
            client,
            store,
            resolver,
            limit: PageRequest::DEFAULT_SIZE,
            enabled: true,
        }
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn key(&self) -> QueryKey {
        QueryKey::infinite_favorited_daos(self.limit)
    }

    fn check_limit(&self) -> DaodashResult<()> {
        if self.limit == 0 {
            return Err(DaodashError::validation("Page size must be greater than zero"));
        }
        Ok(())
    }

    fn augment(&self, data: InfiniteData) -> InfiniteData {
        let resolver = self.resolver.as_ref();
        InfiniteData {
            pages: data
                .pages
                .into_iter()
                .map(|page| augment_daos(resolver, page))
                .collect(),
            page_params: data.page_params,
        }
    }

    async fn load(&self, force: bool) -> DaodashResult<InfiniteData> {
        let key = self.key();
        let loaded = self
            .client
            .get_query_data::<InfiniteData>(&key)?
            .map_or(1, |data| data.pages.len().max(1));
        let store = Arc::clone(&self.store);
        let limit = self.limit;
        let fetcher = || async move { fetch_pages(store.as_ref(), limit, loaded).await };

        if force {
            self.client.refetch_query(&key, fetcher).await
        } else {
            self.client.fetch_query(&key, fetcher).await
        }
    }

    /// Returns the loaded pages, fetching the first page on first use.
    ///
    /// When the cached pages are stale, every loaded page is refetched in
    /// order.
    pub async fn fetch(&self) -> DaodashResult<InfiniteData> {
        if !self.enabled {
            return Ok(InfiniteData::default());
        }
        self.check_limit()?;
        let data = self.load(false).await?;
        Ok(self.augment(data))
    }

    /// Reloads every loaded page from the backend, fresh or not.
    pub async fn refetch(&self) -> DaodashResult<InfiniteData> {
        if !self.enabled {
            return Ok(InfiniteData::default());
        }
        self.check_limit()?;
        let data = self.load(true).await?;
        Ok(self.augment(data))
    }

    /// Appends the next page.
    ///
    /// Loads only the first page when nothing is loaded yet, and returns the
    /// current pages unchanged when there is no next page or the query is
    /// disabled.
    pub async fn fetch_next_page(&self) -> DaodashResult<InfiniteData> {
        if !self.enabled {
            return Ok(InfiniteData::default());
        }
        self.check_limit()?;

        let key = self.key();
        if self.client.get_query_data::<InfiniteData>(&key)?.is_none() {
            return self.fetch().await;
        }

        let mut current = self.load(false).await?;
        let Some(next) = current.next_page(self.limit) else {
            debug!("No next page for {}", key);
            return Ok(self.augment(current));
        };

        // An invalidation landing after `load` still leaves the entry stale
        // once the appended pages are written, so the next read reloads them.
        let store = Arc::clone(&self.store);
        let data = self
            .client
            .refetch_query(&key, || async move {
                let records = store.list(next.to_offset()).await?;
                current.push_page(next.offset(), records);
                Ok(current)
            })
            .await?;
        Ok(self.augment(data))
    }

    /// Whether `fetch_next_page` would load another page.
    pub fn has_next_page(&self) -> DaodashResult<bool> {
        if !self.enabled || self.limit == 0 {
            return Ok(false);
        }
        Ok(self
            .client
            .get_query_data::<InfiniteData>(&self.key())?
            .map_or(true, |data| data.next_page_param(self.limit).is_some()))
    }

    /// Returns the cached state, augmented, without fetching.
    pub fn state(&self) -> DaodashResult<QueryState<InfiniteData>> {
        if !self.enabled {
            return Ok(QueryState::idle());
        }
        let state = self.client.query_state::<InfiniteData>(&self.key())?;
        Ok(state.map(|data| self.augment(data)))
    }
}

impl std::fmt::Debug for InfiniteFavoritedDaosQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfiniteFavoritedDaosQuery")
            .field("limit", &self.limit)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: usize) -> Vec<FavoritedDao> {
        (0..n)
            .map(|i| FavoritedDao::new(1, format!("0x{}", i), format!("DAO {}", i)))
            .collect()
    }

    #[test]
    fn test_next_page_param() {
        let mut data = InfiniteData::default();
        assert_eq!(data.next_page_param(4), Some(0));

        data.push_page(0, page(4));
        assert_eq!(data.next_page_param(4), Some(4));

        data.push_page(4, page(4));
        assert_eq!(data.next_page_param(4), Some(8));

        data.push_page(8, page(1));
        assert_eq!(data.next_page_param(4), None);
    }

    #[test]
    fn test_empty_last_page_ends_listing() {
        let mut data = InfiniteData::default();
        data.push_page(0, page(4));
        data.push_page(4, Vec::new());
        assert_eq!(data.next_page_param(4), None);
    }

    #[test]
    fn test_flatten_and_len() {
        let mut data = InfiniteData::default();
        data.push_page(0, page(2));
        data.push_page(2, page(1));
        assert_eq!(data.len(), 3);
        assert_eq!(data.flatten().len(), 3);
        assert_eq!(data.page_params, vec![0, 2]);
        assert!(InfiniteData::default().is_empty());
    }
}
