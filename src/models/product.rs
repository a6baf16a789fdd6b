//! Fare product models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fare product (capping rule, discount, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID
    pub id: String,
    /// Short product code
    pub code: String,
    /// Lifecycle status (`ACTIVE`, `INACTIVE`, `EXPIRED`, ...)
    pub status: String,
    /// Product kind (`CAPPING`, `DISCOUNT`, ...)
    #[serde(rename = "type")]
    pub product_type: String,
    /// Free-text description
    pub description: String,
    /// Owning participant
    pub participant_id: String,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product(id={}, code={}, status={}, type={}, description={}, participant_id={})",
            self.id,
            self.code,
            self.status,
            self.product_type,
            self.description,
            self.participant_id
        )
    }
}
