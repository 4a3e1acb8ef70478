//! Custom serde helpers for backend wire formats.

/// Deserializes a ledger timestamp into `DateTime<Utc>`.
///
/// Accepts RFC 3339 text, naive ISO-8601 text without an offset (read as
/// UTC) and epoch milliseconds. Serializes back as RFC 3339.
pub mod flexible_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        FloatMillis(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Millis(ms) => from_millis(ms),
            Raw::FloatMillis(ms) => from_millis(ms as i64),
            Raw::Text(s) => parse_text(&s).ok_or_else(|| format!("Invalid timestamp: {}", s)),
        };
        parsed.map_err(serde::de::Error::custom)
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    fn from_millis(ms: i64) -> Result<DateTime<Utc>, String> {
        DateTime::<Utc>::from_timestamp_millis(ms)
            .ok_or_else(|| format!("Invalid timestamp: {}", ms))
    }

    fn parse_text(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|naive| naive.and_utc())
    }
}
