//! In-process query cache shared by every favorites query and mutation.
//!
//! Entries are stored as JSON values and read back through typed accessors.
//! A fetch captures the entry's generation when it starts; `cancel` and
//! `remove` change the generation, so results that arrive afterwards are
//! dropped instead of written back. Invalidation only marks entries stale.
//! Nothing refetches until the entry is observed again.

use super::{QueryFilter, QueryKey};
use chrono::{DateTime, Utc};
use daodash_config::QueryConfig;
use daodash_core::{DaodashError, DaodashResult};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Lifecycle status of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    /// Disabled, or never run.
    Idle,
    /// First fetch in flight, no data yet.
    Loading,
    /// Data available and the last fetch succeeded.
    Success,
    /// The last fetch failed. Earlier data, if any, is kept.
    Error,
}

/// Snapshot of a cached query as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub status: QueryStatus,
    /// Last-known-good data.
    pub data: Option<T>,
    /// Message of the last failed fetch.
    pub error: Option<String>,
    pub is_fetching: bool,
    pub is_stale: bool,
    /// When `data` was last written.
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> QueryState<T> {
    /// State of a disabled or never-run query.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            is_fetching: false,
            is_stale: false,
            updated_at: None,
        }
    }

    /// Transforms the data, keeping the status fields.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        QueryState {
            status: self.status,
            data: self.data.map(f),
            error: self.error,
            is_fetching: self.is_fetching,
            is_stale: self.is_stale,
            updated_at: self.updated_at,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.status == QueryStatus::Idle
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self::idle()
    }
}

#[derive(Debug)]
struct CacheEntry {
    data: Option<Value>,
    error: Option<String>,
    updated_at: Option<DateTime<Utc>>,
    fetched_at: Option<Instant>,
    invalidated: bool,
    /// Bumped on every invalidation.
    epoch: u64,
    /// Replaced on cancellation; unique across the client.
    generation: u64,
    in_flight: usize,
}

impl CacheEntry {
    fn new(generation: u64) -> Self {
        Self {
            data: None,
            error: None,
            updated_at: None,
            fetched_at: None,
            invalidated: false,
            epoch: 0,
            generation,
            in_flight: 0,
        }
    }

    fn is_stale(&self, stale_time: Option<Duration>) -> bool {
        if self.data.is_none() || self.invalidated {
            return true;
        }
        match (stale_time, self.fetched_at) {
            (Some(stale_time), Some(fetched_at)) => fetched_at.elapsed() >= stale_time,
            _ => false,
        }
    }

    fn store(&mut self, value: Value) {
        self.data = Some(value);
        self.error = None;
        self.updated_at = Some(Utc::now());
        self.fetched_at = Some(Instant::now());
    }

    fn status(&self) -> QueryStatus {
        if self.error.is_some() {
            QueryStatus::Error
        } else if self.data.is_some() {
            QueryStatus::Success
        } else if self.in_flight > 0 {
            QueryStatus::Loading
        } else {
            QueryStatus::Idle
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FetchTicket {
    generation: u64,
    epoch: u64,
}

/// Keyed query cache.
///
/// Shared through an `Arc`; the entry map is guarded by a synchronous lock
/// that is never held across an `.await`.
pub struct QueryClient {
    entries: RwLock<HashMap<QueryKey, CacheEntry>>,
    stale_time: Option<Duration>,
    generations: AtomicU64,
}

impl QueryClient {
    /// Creates a client. With `stale_time` of `None`, data only goes stale
    /// through invalidation.
    #[must_use]
    pub fn new(stale_time: Option<Duration>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stale_time,
            generations: AtomicU64::new(0),
        }
    }

    /// Creates a client from the `query` configuration section.
    #[must_use]
    pub fn from_config(config: &QueryConfig) -> Self {
        Self::new(config.stale_time())
    }

    #[must_use]
    pub fn stale_time(&self) -> Option<Duration> {
        self.stale_time
    }

    fn next_generation(&self) -> u64 {
        self.generations.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Returns the cached data for `key`, fresh or not.
    pub fn get_query_data<T: DeserializeOwned>(&self, key: &QueryKey) -> DaodashResult<Option<T>> {
        let entries = self.entries.read();
        match entries.get(key).and_then(|entry| entry.data.as_ref()) {
            Some(value) => decode(key, value).map(Some),
            None => Ok(None),
        }
    }

    /// Writes data for `key` and marks it fresh.
    pub fn set_query_data<T: Serialize>(&self, key: QueryKey, value: &T) -> DaodashResult<()> {
        let value = serde_json::to_value(value)?;
        let mut entries = self.entries.write();
        let entry = entries
            .entry(key)
            .or_insert_with(|| CacheEntry::new(self.next_generation()));
        entry.store(value);
        entry.invalidated = false;
        Ok(())
    }

    /// Returns the current state of `key`. Unknown keys are idle.
    pub fn query_state<T: DeserializeOwned>(&self, key: &QueryKey) -> DaodashResult<QueryState<T>> {
        let entries = self.entries.read();
        let Some(entry) = entries.get(key) else {
            return Ok(QueryState::idle());
        };

        let data = match entry.data.as_ref() {
            Some(value) => Some(decode(key, value)?),
            None => None,
        };

        Ok(QueryState {
            status: entry.status(),
            data,
            error: entry.error.clone(),
            is_fetching: entry.in_flight > 0,
            is_stale: entry.is_stale(self.stale_time),
            updated_at: entry.updated_at,
        })
    }

    /// Checks whether the next observation of `key` would refetch.
    #[must_use]
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries
            .read()
            .get(key)
            .map_or(true, |entry| entry.is_stale(self.stale_time))
    }

    /// Returns cached data when fresh, otherwise runs `fetcher` and caches
    /// its result.
    ///
    /// On failure the entry keeps its last-known-good data and records the
    /// error, and the error is returned. If the entry is cancelled or
    /// removed while `fetcher` runs, the result is discarded and
    /// `Cancelled` is returned.
    pub async fn fetch_query<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> DaodashResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = DaodashResult<T>>,
    {
        if let Some(data) = self.fresh_data(key)? {
            debug!("Cache hit: {}", key);
            return Ok(data);
        }
        self.refetch_query(key, fetcher).await
    }

    /// Runs `fetcher` regardless of freshness and caches its result.
    pub async fn refetch_query<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> DaodashResult<T>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = DaodashResult<T>>,
    {
        let ticket = self.begin_fetch(key);
        debug!("Fetching {}", key);
        let result = fetcher().await;
        self.finish_fetch(key, ticket, result)
    }

    fn fresh_data<T: DeserializeOwned>(&self, key: &QueryKey) -> DaodashResult<Option<T>> {
        let entries = self.entries.read();
        match entries.get(key) {
            Some(entry) if !entry.is_stale(self.stale_time) => match entry.data.as_ref() {
                Some(value) => decode(key, value).map(Some),
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }

    fn begin_fetch(&self, key: &QueryKey) -> FetchTicket {
        let mut entries = self.entries.write();
        let entry = entries
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::new(self.next_generation()));
        entry.in_flight += 1;
        FetchTicket {
            generation: entry.generation,
            epoch: entry.epoch,
        }
    }

    fn finish_fetch<T: Serialize>(
        &self,
        key: &QueryKey,
        ticket: FetchTicket,
        result: DaodashResult<T>,
    ) -> DaodashResult<T> {
        let mut entries = self.entries.write();
        let entry = match entries.get_mut(key) {
            Some(entry) if entry.generation == ticket.generation => entry,
            _ => {
                warn!("Discarding result of cancelled fetch for {}", key);
                return Err(DaodashError::Cancelled(format!("Query {} was cancelled", key)));
            }
        };
        entry.in_flight = entry.in_flight.saturating_sub(1);

        match result {
            Ok(value) => {
                entry.store(serde_json::to_value(&value)?);
                // Invalidated mid-flight: keep the data but refetch on next read.
                entry.invalidated = entry.epoch != ticket.epoch;
                Ok(value)
            }
            Err(e) => {
                warn!("Fetch failed for {}: {}", key, e);
                entry.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Marks every matching entry stale. Returns the number of entries marked.
    pub fn invalidate(&self, filter: impl Into<QueryFilter>) -> usize {
        let filter = filter.into();
        let mut entries = self.entries.write();
        let mut marked = 0;
        for (_, entry) in entries.iter_mut().filter(|(key, _)| filter.matches(key)) {
            entry.invalidated = true;
            entry.epoch += 1;
            marked += 1;
        }
        debug!("Invalidated {} queries matching {}", marked, filter);
        marked
    }

    /// Cancels in-flight fetches of every matching entry.
    ///
    /// Cached data is kept; results of the cancelled fetches are discarded.
    pub fn cancel(&self, filter: impl Into<QueryFilter>) -> usize {
        let filter = filter.into();
        let mut entries = self.entries.write();
        let mut cancelled = 0;
        for (_, entry) in entries.iter_mut().filter(|(key, _)| filter.matches(key)) {
            entry.generation = self.next_generation();
            if entry.in_flight > 0 {
                cancelled += 1;
            }
            entry.in_flight = 0;
        }
        debug!("Cancelled {} in-flight queries matching {}", cancelled, filter);
        cancelled
    }

    /// Drops every matching entry. Returns the number of entries removed.
    pub fn remove(&self, filter: impl Into<QueryFilter>) -> usize {
        let filter = filter.into();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|key, _| !filter.matches(key));
        before - entries.len()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Returns the cached keys.
    #[must_use]
    pub fn keys(&self) -> Vec<QueryKey> {
        self.entries.read().keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("entries", &self.len())
            .field("stale_time", &self.stale_time)
            .finish()
    }
}

fn decode<T: DeserializeOwned>(key: &QueryKey, value: &Value) -> DaodashResult<T> {
    T::deserialize(value)
        .map_err(|e| DaodashError::cache(format!("Entry {} does not hold the requested type: {}", key, e)))
}
