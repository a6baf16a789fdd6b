//! HTTP client and service layer for the Littlepay API.
//!
//! This module provides the main entry point [`LittlepayClient`] for
//! interacting with the Littlepay API.
//!
//! # Example
//!
//! ```no_run
//! use futures_util::TryStreamExt;
//! use littlepay_rs::{ApiEnvironment, ClientConfig, Credentials, LittlepayClient};
//!
//! # async fn example() -> littlepay_rs::Result<()> {
//! let client = LittlepayClient::new(
//!     ApiEnvironment::qa(),
//!     Credentials::new("client-id", "client-secret", "audience"),
//!     ClientConfig::default(),
//! )?;
//!
//! // Get concession groups
//! let groups: Vec<_> = client.groups().list().try_collect().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;

pub use config::{ClientConfig, DEFAULT_PAGE_SIZE};
pub use http::LittlepayClient;
pub use paginated::{ListParams, PaginatedStream};
pub(crate) use http::ClientInner;
pub(crate) use paginated::PaginatedStreamBuilder;
