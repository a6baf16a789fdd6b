//! Decoding that tolerates upstream schema additions.
//!
//! Records are parsed into fixed shapes. Keys the record does not know are
//! dropped and logged instead of failing the decode, so new fields added
//! upstream never break the client.

use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

/// Decode a raw JSON object into `T`, logging any keys `T` does not carry.
///
/// Known keys are discovered by serializing the decoded record back, so `T`
/// must serialize every field it deserializes.
///
/// # Example
///
/// ```
/// use littlepay_rs::models::{tolerant, ConcessionGroup};
///
/// let group: ConcessionGroup = tolerant::from_value(serde_json::json!({
///     "id": "1234",
///     "label": "Seniors",
///     "participant_id": "cst",
///     "added_later": true
/// }))?;
/// assert_eq!(group.label, "Seniors");
/// # Ok::<(), littlepay_rs::Error>(())
/// ```
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned + Serialize,
{
    let record: T = serde_json::from_value(value.clone())?;

    if let (Value::Object(received), Ok(Value::Object(known))) =
        (&value, serde_json::to_value(&record))
    {
        for (name, field) in received.iter().filter(|(k, _)| !known.contains_key(*k)) {
            tracing::info!(
                record = std::any::type_name::<T>(),
                field = %name,
                value = %field,
                "Ignoring unexpected field"
            );
        }
    }

    Ok(record)
}

/// Deserializer for optional timestamps.
///
/// Missing, `null` and empty-string values become `None`; anything else must
/// be RFC 3339 (a trailing `Z` is accepted) and is normalized to UTC.
pub(crate) fn optional_datetime<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom),
    }
}
