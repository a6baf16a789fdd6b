//! Enumeration types used in API queries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a fare product, usable as a list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    /// Product is live
    #[value(name = "ACTIVE")]
    Active,
    /// Product exists but is switched off
    #[value(name = "INACTIVE")]
    Inactive,
    /// Product end date has passed
    #[value(name = "EXPIRED")]
    Expired,
}

impl ProductStatus {
    /// The wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "ACTIVE",
            ProductStatus::Inactive => "INACTIVE",
            ProductStatus::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
