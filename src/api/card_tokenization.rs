//! Card tokenization service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::ClientInner;
use crate::models::tolerant;
use crate::Result;

/// Short-lived access granted for tokenizing cards client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardTokenizationAccess {
    /// Token to hand to the tokenization widget
    pub access_token: String,
    /// Token type
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Absolute expiry, unix seconds
    #[serde(default)]
    pub expires_at: Option<f64>,
}

/// Service for card tokenization access.
pub struct CardTokenizationService {
    inner: Arc<ClientInner>,
}

impl CardTokenizationService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Request an access token for card tokenization.
    pub async fn request_access(&self) -> Result<CardTokenizationAccess> {
        let body = json!({ "request_access": "CARD_TOKENISATION" });
        let response = self
            .inner
            .post("cardtokenisation/requestaccess", Some(&body))
            .await?;

        tolerant::from_value(response)
    }
}
