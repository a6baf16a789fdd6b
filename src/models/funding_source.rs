//! Funding source models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::group::display_date;
use super::tolerant::optional_datetime;

/// A tokenized payment card registered with Littlepay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingSource {
    /// Funding source ID
    pub id: String,
    /// Leading digits of the card number
    pub card_first_digits: String,
    /// Trailing digits of the card number
    pub card_last_digits: String,
    /// Card expiry month (`MM`)
    pub card_expiry_month: String,
    /// Card expiry year (`YY`)
    pub card_expiry_year: String,
    /// Card scheme (Visa, Mastercard, ...)
    pub card_scheme: String,
    /// Physical card, mobile wallet, ...
    pub form_factor: String,
    /// Owning participant
    pub participant_id: String,
    /// Whether this is a funding PAN rather than a device token
    pub is_fpan: bool,
    /// Other funding sources tied to the same account
    #[serde(default)]
    pub related_funding_sources: Vec<Value>,
    /// When the funding source was registered
    #[serde(default, deserialize_with = "optional_datetime")]
    pub created_date: Option<DateTime<Utc>>,
    /// Card category (credit, debit, ...)
    #[serde(default)]
    pub card_category: Option<String>,
    /// Issuer country, alpha code
    #[serde(default)]
    pub issuer_country_code: Option<String>,
    /// Issuer country, numeric code
    #[serde(default)]
    pub issuer_country_numeric_code: Option<String>,
    /// Funding source that replaced this one
    #[serde(default)]
    pub replacement_funding_source: Option<String>,
    /// Card token
    #[serde(default)]
    pub token: Option<String>,
    /// Key used to produce the token
    #[serde(default)]
    pub token_key_id: Option<String>,
    /// Integrated circuit card hash
    #[serde(default)]
    pub icc_hash: Option<String>,
}

impl fmt::Display for FundingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FundingSource(id={}, card={}...{}, expiry={}/{}, scheme={}, participant_id={})",
            self.id,
            self.card_first_digits,
            self.card_last_digits,
            self.card_expiry_month,
            self.card_expiry_year,
            self.card_scheme,
            self.participant_id
        )
    }
}

/// A concession group a funding source is linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingSourceGroup {
    /// Link ID
    pub id: String,
    /// Concession group ID
    pub group_id: String,
    /// Concession group label
    pub label: String,
    /// When the link was created
    #[serde(default, deserialize_with = "optional_datetime")]
    pub created_date: Option<DateTime<Utc>>,
    /// When the link was last updated
    #[serde(default, deserialize_with = "optional_datetime")]
    pub updated_date: Option<DateTime<Utc>>,
    /// When the concession lapses, if ever
    #[serde(default, deserialize_with = "optional_datetime")]
    pub expiry_date: Option<DateTime<Utc>>,
}

impl fmt::Display for FundingSourceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Group(id={}, group_id={}, label={}, expiry_date={})",
            self.id,
            self.group_id,
            self.label,
            display_date(&self.expiry_date)
        )
    }
}
