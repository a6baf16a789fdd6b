//! Data models for the Littlepay API.
//!
//! - [`environment`] - API environments and endpoint construction
//! - [`enums`] - Enumerations used in queries
//! - [`group`] - Concession groups, their funding sources and expiry values
//! - [`product`] - Fare products
//! - [`funding_source`] - Tokenized payment instruments
//! - [`list`] - The paginated list envelope
//! - [`tolerant`] - Decoding that tolerates upstream schema additions

pub mod environment;
pub mod enums;
pub mod funding_source;
pub mod group;
pub mod list;
pub mod product;
pub mod tolerant;

pub use environment::*;
pub use enums::*;
pub use funding_source::*;
pub use group::*;
pub use list::*;
pub use product::*;
