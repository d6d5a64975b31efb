//! Shared setup for stand scenarios

mod categories_api;
mod currency_grpc;
mod database;
mod profile_api;
mod spendings_api;
mod userdata_soap;

use niffler_e2e::fixtures::{release_stand_cleanup, stand_cleanup, CleanupMarker, StandContext};
use niffler_e2e::LockGuard;

/// Connected context plus a hold on the suite-wide cleanup lock
pub struct Stand {
    pub ctx: StandContext,
    cleanup: LockGuard<CleanupMarker>,
}

impl Stand {
    /// Connect and join the cleanup lock; the first test in cleans the stand
    pub async fn start() -> Self {
        let ctx = StandContext::from_env()
            .await
            .expect("stand is reachable and configured");
        let cleanup = stand_cleanup(&ctx.locks, &ctx.cleaner())
            .await
            .expect("cleanup lock");
        Self { ctx, cleanup }
    }

    /// Leave the cleanup lock; the last test out cleans the stand again
    pub async fn finish(self) {
        let Stand { ctx, cleanup } = self;
        release_stand_cleanup(cleanup, &ctx.cleaner())
            .await
            .expect("release cleanup lock");
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.005,
        "expected {}, got {}",
        expected,
        actual
    );
}
