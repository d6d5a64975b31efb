//! Polling helper for eventually-consistent stand state

use crate::error::{HarnessError, Result};
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;

/// Poll `probe` every `interval` until it yields `Some`, failing with
/// `HarnessError::Timeout` once `timeout` has passed.
///
/// The probe runs at least once, even with a zero timeout.
pub async fn wait_until<T, F, Fut>(timeout: Duration, interval: Duration, mut probe: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let started = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        if let Some(value) = probe().await? {
            debug!("Condition met after {} attempts", attempts);
            return Ok(value);
        }
        if started.elapsed() >= timeout {
            return Err(HarnessError::Timeout(format!(
                "condition not met within {} ms ({} attempts)",
                timeout.as_millis(),
                attempts
            )));
        }
        tokio::time::sleep(interval).await;
    }
}
