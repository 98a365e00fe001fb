use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Parses a timestamp sent by a client into a naive UTC date-time
///
/// Accepted forms, in order:
/// - RFC 3339 with an offset, converted to UTC
/// - `YYYY-MM-DDTHH:MM:SS` with optional fractional seconds
/// - `YYYY-MM-DD`, read as midnight
///
/// # Returns
///
/// `None` if the text matches none of the forms
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(text) {
        return Some(with_offset.naive_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Serde adapter for an optional timestamp field read with [`parse_timestamp`]
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(text) => parse_timestamp(&text).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("'{}' is not a valid date or date-time", text))
        }),
    }
}
