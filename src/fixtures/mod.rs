//! Reusable setup and teardown for tests against a stand

pub mod cleaner;
pub mod context;
pub mod data;
pub mod locks;
pub mod users;
pub mod wait;

pub use cleaner::StandCleaner;
pub use context::StandContext;
pub use locks::{
    delete_spendings_lock, profile_name_lock, release_stand_cleanup, stand_cleanup,
    CleanupMarker, CLEANUP_LOCK,
};
pub use users::{CreatedUsers, SoapUserCreator, UserKind};
pub use wait::wait_until;
