//! Clients for the stand's HTTP and gRPC services

pub mod currency;
pub mod oauth;
pub mod session;
pub mod spends;
pub mod users;

pub use currency::{CurrencyClient, CurrencyRate};
pub use oauth::{OAuthClient, Pkce, RegistrationOutcome};
pub use session::ApiSession;
pub use spends::{AddCategoryOutcome, CurrencyJson, SpendsClient};
pub use users::UsersClient;
