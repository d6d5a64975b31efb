//! # Niffler end-to-end harness
//!
//! Library side of the `niffler-e2e` test suite. It talks to a running Niffler
//! stand through every surface the application exposes:
//!
//! - OAuth2 registration and PKCE login against the auth server
//! - the REST gateway (spendings, categories, current user)
//! - the userdata SOAP endpoint
//! - the gRPC currency service
//! - the auth, spend and userdata Postgres stores
//!
//! Parallel test processes coordinate stand setup and teardown through the
//! file-based locks in [`lock`].
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use niffler_e2e::fixtures::{release_stand_cleanup, stand_cleanup, StandContext};
//!
//! #[tokio::main]
//! async fn main() -> niffler_e2e::Result<()> {
//!     let stand = StandContext::from_env().await?;
//!     let cleanup = stand_cleanup(&stand.locks, &stand.cleaner()).await?;
//!
//!     let spendings = stand.spends.get_all_spendings().await?;
//!     println!("{} spendings", spendings.len());
//!
//!     release_stand_cleanup(cleanup, &stand.cleaner()).await
//! }
//! ```

pub mod clients;
pub mod config;
pub mod db;
pub mod error;
pub mod fixtures;
pub mod lock;
pub mod models;
pub mod soap;

// Types generated from proto/niffler-currency.proto
pub mod proto {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::derive_partial_eq_without_eq)]

    include!("proto/guru.qa.grpc.niffler.rs");
}

pub use clients::{
    AddCategoryOutcome, ApiSession, CurrencyClient, OAuthClient, RegistrationOutcome,
    SpendsClient, UsersClient,
};
pub use config::{ClientEnvs, HarnessConfig, ServerEnvs};
pub use error::{HarnessError, Result};
pub use lock::{LockError, LockGuard, LockManager, LockSettings, LockSpec, LockStatus};
pub use soap::{SoapClient, SoapOutcome, SoapReply};

/// Version of the harness
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging for the harness (safe to call from every test)
pub fn init_logging() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "niffler_e2e=info".into());

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .finish();

        // Fails silently if another subscriber is already installed
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
