//! API service modules for Littlepay endpoints.
//!
//! Each service provides methods for interacting with a specific
//! resource of the Littlepay API.

mod card_tokenization;
mod funding_sources;
mod groups;
mod products;

pub use card_tokenization::{CardTokenizationAccess, CardTokenizationService};
pub use funding_sources::FundingSourcesService;
pub use groups::GroupsService;
pub use products::ProductsService;
