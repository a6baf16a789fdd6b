//! OAuth2 client-credentials authentication for the Littlepay API.
//!
//! Each participant holds a [`Credentials`] set per environment. A
//! [`TokenManager`] exchanges those credentials for an [`AccessToken`] and
//! refreshes it shortly before it expires:
//!
//! ```no_run
//! use chrono::Duration;
//! use littlepay_rs::{ApiEnvironment, Credentials, TokenManager};
//!
//! # async fn example() -> littlepay_rs::Result<()> {
//! let manager = TokenManager::new(
//!     reqwest::Client::new(),
//!     &ApiEnvironment::qa(),
//!     Credentials::new("client-id", "client-secret", "audience"),
//!     Duration::seconds(60),
//! );
//!
//! // The first call requests a token; later calls reuse it until it nears expiry.
//! let token = manager.get_token().await?;
//! # Ok(())
//! # }
//! ```

mod credentials;
mod manager;
mod token;

pub use credentials::Credentials;
pub use manager::TokenManager;
pub use token::{AccessToken, TokenState};
