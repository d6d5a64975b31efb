//! Named locks the test suite coordinates on

use super::cleaner::StandCleaner;
use crate::error::{HarnessError, Result};
use crate::lock::{LockGuard, LockManager, LockSpec};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const CLEANUP_LOCK: &str = "cleanup";
pub const DELETE_SPENDINGS_LOCK: &str = "delete_spendings";
pub const PROFILE_NAME_LOCK: &str = "profile_name";

/// Shared by the worker that cleaned the stand with everyone joining later
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupMarker {
    pub cleaned_by: String,
    pub cleaned_at: String,
}

pub fn cleanup_spec() -> LockSpec {
    LockSpec::exclusive(CLEANUP_LOCK).with_data().shared()
}

/// Join the suite-wide cleanup lock. The first worker in cleans the stand;
/// the others wait until that is done.
pub async fn stand_cleanup(
    manager: &LockManager,
    cleaner: &StandCleaner<'_>,
) -> Result<LockGuard<CleanupMarker>> {
    manager
        .acquire_with(&cleanup_spec(), || async {
            info!("Cleaning the stand before tests");
            cleaner.clean().await?;
            Ok::<_, HarnessError>(CleanupMarker {
                cleaned_by: format!("pid {}", std::process::id()),
                cleaned_at: chrono::Utc::now().to_rfc3339(),
            })
        })
        .await
}

/// Leave the cleanup lock; the last worker out cleans the stand again
pub async fn release_stand_cleanup(
    guard: LockGuard<CleanupMarker>,
    cleaner: &StandCleaner<'_>,
) -> Result<()> {
    guard
        .release_with(|marker| async move {
            info!("Cleaning the stand after tests (set up by {})", marker.cleaned_by);
            cleaner.clean().await
        })
        .await?;
    Ok(())
}

/// Serializes tests that delete spendings
pub async fn delete_spendings_lock(manager: &LockManager) -> Result<LockGuard<()>> {
    Ok(manager
        .acquire(&LockSpec::exclusive(DELETE_SPENDINGS_LOCK))
        .await?)
}

/// Serializes tests that change the profile name
pub async fn profile_name_lock(manager: &LockManager) -> Result<LockGuard<()>> {
    Ok(manager.acquire(&LockSpec::exclusive(PROFILE_NAME_LOCK)).await?)
}
