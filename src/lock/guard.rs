//! Held lock handle

use super::{count, LockError, LockPaths};
use std::fmt::Display;
use std::future::Future;
use tracing::{error, info, warn};

/// A lock held (or joined) by this worker.
///
/// Release explicitly with [`LockGuard::release`] or [`LockGuard::release_with`].
/// Dropping an unreleased guard still gives the lock back, but skips any cleanup
/// callback.
#[derive(Debug)]
pub struct LockGuard<T> {
    name: String,
    paths: LockPaths,
    data: Option<T>,
    owner: bool,
    released: bool,
}

impl<T> LockGuard<T> {
    pub(crate) fn new(name: String, paths: LockPaths, data: Option<T>, owner: bool) -> Self {
        Self {
            name,
            paths,
            data,
            owner,
            released: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Data produced by the setup callback, either ours or adopted from the owner
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Whether this worker created the lock file (and ran setup)
    pub fn is_owner(&self) -> bool {
        self.owner
    }

    /// Give the lock back without a cleanup callback
    pub fn release(mut self) -> Result<(), LockError> {
        if self.leave()? {
            self.paths.remove_all();
            info!(lock = %self.name, "Lock released");
        }
        Ok(())
    }

    /// Give the lock back; the last holder runs `cleanup` on the shared data
    /// before the lock files are removed.
    ///
    /// A failing cleanup is logged and does not keep the lock files around.
    pub async fn release_with<F, Fut, E>(mut self, cleanup: F) -> Result<(), LockError>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Display,
    {
        if !self.leave()? {
            return Ok(());
        }

        if let Some(data) = self.data.take() {
            if let Err(e) = cleanup(data).await {
                error!(lock = %self.name, "Cleanup callback failed: {}", e);
            }
        }

        self.paths.remove_all();
        info!(lock = %self.name, "Lock released");
        Ok(())
    }

    /// Leave the lock; true when this worker was the last holder
    fn leave(&mut self) -> Result<bool, LockError> {
        self.released = true;

        match &self.paths.count {
            Some(count_path) => {
                let left = count::decrement(count_path)?;
                info!(lock = %self.name, "Lock count decremented to {}", left);
                Ok(left == 0)
            }
            // Joiners of an exclusive lock with data leave the files to the owner
            None => Ok(self.owner),
        }
    }
}

impl<T> Drop for LockGuard<T> {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        warn!(lock = %self.name, "Lock guard dropped without release");
        match self.leave() {
            Ok(true) => self.paths.remove_all(),
            Ok(false) => {}
            Err(e) => warn!(lock = %self.name, "Failed to release lock on drop: {}", e),
        }
    }
}
