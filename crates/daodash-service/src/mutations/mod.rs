//! Write-side mutations over the favorites collection.
//!
//! Every mutation runs the same sequence: the backend write completes, the
//! overlapping queries are invalidated, then the optional success callback
//! runs. A failed write invalidates nothing and skips the callback.

mod add;
mod remove;
mod update;

pub use add::AddFavoriteDaoMutation;
pub use remove::RemoveFavoriteDaoMutation;
pub use update::UpdateFavoritedDaoMutation;

use crate::cache::{QueryClient, QueryKind};
use daodash_core::DaodashError;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Callback run after a successful write and its invalidation.
pub type OnSuccess<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Lifecycle status of a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// Status of the most recent `mutate` call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MutationState {
    pub status: MutationStatus,
    pub error: Option<String>,
}

impl MutationState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.status == MutationStatus::Idle
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == MutationStatus::Pending
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == MutationStatus::Success
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == MutationStatus::Error
    }
}

#[derive(Debug, Default)]
pub(crate) struct MutationTracker {
    state: RwLock<MutationState>,
}

impl MutationTracker {
    pub(crate) fn begin(&self) {
        *self.state.write() = MutationState {
            status: MutationStatus::Pending,
            error: None,
        };
    }

    pub(crate) fn succeed(&self) {
        *self.state.write() = MutationState {
            status: MutationStatus::Success,
            error: None,
        };
    }

    pub(crate) fn fail(&self, error: &DaodashError) {
        *self.state.write() = MutationState {
            status: MutationStatus::Error,
            error: Some(error.to_string()),
        };
    }

    pub(crate) fn snapshot(&self) -> MutationState {
        self.state.read().clone()
    }
}

/// Marks every paginated and infinite listing stale.
pub(crate) fn invalidate_listings(client: &QueryClient) -> usize {
    client.invalidate(QueryKind::FavoritedDaos) + client.invalidate(QueryKind::InfiniteFavoritedDaos)
}
