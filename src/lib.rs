//! # littlepay-rs
//!
//! A Rust client and command-line tool for the Littlepay transit payments API.
//!
//! This crate provides access to a participant's concession groups, fare
//! products and funding sources, and ships the `littlepay` binary that
//! manages them from the shell.
//!
//! ## Features
//!
//! - **Authentication**: OAuth2 client credentials with cached, auto-refreshed tokens
//! - **Pagination**: List endpoints exposed as lazy [`futures_util::Stream`]s
//! - **Tolerant models**: Upstream schema additions are logged, never fatal
//! - **Config store**: Multi-environment, multi-participant YAML config
//! - **Async-first**: Built on Tokio and reqwest
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures_util::TryStreamExt;
//! use littlepay_rs::{ApiEnvironment, ClientConfig, Credentials, LittlepayClient};
//!
//! #[tokio::main]
//! async fn main() -> littlepay_rs::Result<()> {
//!     let client = LittlepayClient::new(
//!         ApiEnvironment::qa(),
//!         Credentials::new("client-id", "client-secret", "audience"),
//!         ClientConfig::default(),
//!     )?;
//!
//!     let groups: Vec<_> = client.groups().list().try_collect().await?;
//!     println!("Found {} concession groups", groups.len());
//!
//!     for group in &groups {
//!         let products: Vec<_> = client.groups().products(&group.id).try_collect().await?;
//!         println!("{}: {} linked products", group.label, products.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Linking a Funding Source
//!
//! ```rust,no_run
//! use chrono::{TimeZone, Utc};
//! use littlepay_rs::{ConcessionExpiry, LittlepayClient};
//!
//! # async fn example(client: LittlepayClient) -> littlepay_rs::Result<()> {
//! let funding_source = client.funding_sources().get_by_token("card-token").await?;
//!
//! let expiry = ConcessionExpiry::from(Utc.with_ymd_and_hms(2025, 6, 30, 0, 0, 0).unwrap());
//! client
//!     .groups()
//!     .link_funding_source("group-id", &funding_source.id, Some(expiry))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod output;

// Re-export primary types at crate root for convenience
pub use auth::{AccessToken, Credentials, TokenManager, TokenState};
pub use client::{ClientConfig, LittlepayClient};
pub use error::{Error, Result};
pub use models::{
    ApiEnvironment, ConcessionExpiry, ConcessionGroup, FundingSource, FundingSourceGroup,
    GroupFundingSource, ListResponse, Product, ProductStatus,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use littlepay_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        CardTokenizationAccess, CardTokenizationService, FundingSourcesService, GroupsService,
        ProductsService,
    };
    pub use crate::auth::{AccessToken, Credentials, TokenManager, TokenState};
    pub use crate::client::{ClientConfig, ListParams, LittlepayClient, PaginatedStream};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        ApiEnvironment, ConcessionExpiry, ConcessionGroup, FundingSource, FundingSourceGroup,
        GroupFundingSource, Product, ProductStatus,
    };
}
