//! Custom serde helpers for the Bracket wire format.
//!
//! Timestamps travel as ISO-8601 strings. Any offset is accepted on input;
//! output is always UTC with exactly three fractional digits and a `Z`
//! suffix, e.g. `2015-03-31T22:34:51.270Z`.

use time::format_description::well_known::{Iso8601, Rfc3339};
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Convert to UTC and drop everything below the millisecond.
pub fn truncate_to_millis(dt: OffsetDateTime) -> OffsetDateTime {
    let utc = dt.to_offset(UtcOffset::UTC);
    utc.replace_millisecond(utc.millisecond()).unwrap_or(utc)
}

/// Parse an ISO-8601 timestamp with any offset.
pub fn parse_iso8601(s: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(s, &Rfc3339).or_else(|_| OffsetDateTime::parse(s, &Iso8601::DEFAULT))
}

/// Format a timestamp as UTC with millisecond precision.
pub fn format_iso8601(dt: OffsetDateTime) -> Result<String, time::error::Format> {
    truncate_to_millis(dt).format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ))
}

/// Serialize/deserialize an `OffsetDateTime` as an ISO-8601 string.
///
/// # Example
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use time::OffsetDateTime;
/// use brkt_api_client::types::serde_helpers::iso8601;
///
/// #[derive(Serialize, Deserialize)]
/// struct Workload {
///     #[serde(with = "iso8601")]
///     lease_expire_time: OffsetDateTime,
/// }
///
/// let json = r#"{"lease_expire_time":"2015-03-31T22:34:51.270584+00:00"}"#;
/// let workload: Workload = serde_json::from_str(json).unwrap();
/// assert_eq!(
///     serde_json::to_string(&workload).unwrap(),
///     r#"{"lease_expire_time":"2015-03-31T22:34:51.270Z"}"#
/// );
/// ```
pub mod iso8601 {
    use serde::{Deserialize, Deserializer, Serializer, de, ser};
    use time::OffsetDateTime;

    /// Serialize as a UTC ISO-8601 string with millisecond precision.
    pub fn serialize<S>(dt: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = super::format_iso8601(*dt).map_err(ser::Error::custom)?;
        serializer.serialize_str(&s)
    }

    /// Deserialize from an ISO-8601 string with any offset.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_iso8601(&s)
            .map(super::truncate_to_millis)
            .map_err(de::Error::custom)
    }

    /// The same codec for optional fields; `null` maps to `None`.
    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer, de, ser};
        use time::OffsetDateTime;

        /// Serialize `Some` as an ISO-8601 string and `None` as `null`.
        pub fn serialize<S>(dt: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match dt {
                Some(dt) => {
                    let s = super::super::format_iso8601(*dt).map_err(ser::Error::custom)?;
                    serializer.serialize_some(&s)
                }
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize an optional ISO-8601 string.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<String>::deserialize(deserializer)?
                .map(|s| {
                    super::super::parse_iso8601(&s)
                        .map(super::super::truncate_to_millis)
                        .map_err(de::Error::custom)
                })
                .transpose()
        }
    }
}
