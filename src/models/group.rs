//! Concession group models.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use super::tolerant::optional_datetime;

/// A concession group: funding sources in it are eligible for its products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcessionGroup {
    /// Group ID
    pub id: String,
    /// Human-readable label
    pub label: String,
    /// Owning participant
    pub participant_id: String,
}

impl fmt::Display for ConcessionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Group(id={}, label={}, participant_id={})",
            self.id, self.label, self.participant_id
        )
    }
}

/// A funding source linked to a concession group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupFundingSource {
    /// Funding source ID
    pub id: String,
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

impl fmt::Display for GroupFundingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FundingSource(id={}, created_date={}, updated_date={}, expiry_date={})",
            self.id,
            display_date(&self.created_date),
            display_date(&self.updated_date),
            display_date(&self.expiry_date)
        )
    }
}

pub(crate) fn display_date(date: &Option<DateTime<Utc>>) -> String {
    date.map(|d| d.to_rfc3339()).unwrap_or_else(|| "-".to_string())
}

/// The instant a funding source's concession lapses.
///
/// Always held in UTC and sent as `YYYY-MM-DDTHH:MM:SSZ` (second precision).
/// Zoned datetimes are converted to UTC; naive datetimes are taken to be UTC
/// already.
///
/// # Example
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use littlepay_rs::ConcessionExpiry;
///
/// let pacific = FixedOffset::west_opt(7 * 3600).unwrap();
/// let expiry = ConcessionExpiry::from(pacific.with_ymd_and_hms(2024, 3, 18, 1, 2, 3).unwrap());
/// assert_eq!(expiry.to_string(), "2024-03-18T08:02:03Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConcessionExpiry(DateTime<Utc>);

impl ConcessionExpiry {
    /// The expiry as a UTC datetime.
    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for ConcessionExpiry {
    fn from(value: DateTime<Tz>) -> Self {
        Self(value.with_timezone(&Utc))
    }
}

impl From<NaiveDateTime> for ConcessionExpiry {
    fn from(value: NaiveDateTime) -> Self {
        Self(value.and_utc())
    }
}

impl fmt::Display for ConcessionExpiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%SZ"))
    }
}

impl Serialize for ConcessionExpiry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
