use crate::error::{CoreError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

/// A remote timestamp held in canonical form: RFC 3339, UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    pub fn new(datetime: OffsetDateTime) -> Self {
        Self(datetime.to_offset(UtcOffset::UTC))
    }

    pub fn inner(&self) -> &OffsetDateTime {
        &self.0
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.0.format(&Rfc3339).map_err(|_| fmt::Error)?;
        write!(f, "{formatted}")
    }
}

impl FromStr for Timestamp {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let datetime = OffsetDateTime::parse(s.trim(), &Rfc3339).map_err(|e| {
            CoreError::invalid_timestamp(format!("failed to parse '{s}': {e}"))
        })?;
        Ok(Timestamp::new(datetime))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = self.0.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Timestamp::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Re-renders a remote timestamp string in canonical form.
pub fn normalize_timestamp(raw: &str) -> Result<String> {
    Ok(Timestamp::from_str(raw)?.to_string())
}

pub fn now_utc() -> Timestamp {
    Timestamp(OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_timestamp_display() {
        let ts = Timestamp::new(datetime!(2023-05-15 14:30:00 UTC));
        assert_eq!(ts.to_string(), "2023-05-15T14:30:00Z");
    }

    #[test]
    fn test_timestamp_converts_to_utc() {
        let ts = Timestamp::from_str("2023-05-15T14:30:00+02:00").unwrap();
        assert_eq!(ts.into_inner(), datetime!(2023-05-15 12:30:00 UTC));
        assert_eq!(ts.to_string(), "2023-05-15T12:30:00Z");
    }

    #[test]
    fn test_normalize_timestamp() {
        assert_eq!(
            normalize_timestamp("2019-05-14T14:49:37.000Z").unwrap(),
            "2019-05-14T14:49:37Z"
        );
        assert_eq!(
            normalize_timestamp("2019-05-14T09:49:37.197-05:00").unwrap(),
            "2019-05-14T14:49:37.197Z"
        );
        assert_eq!(
            normalize_timestamp(" 2019-05-14T14:49:37Z ").unwrap(),
            "2019-05-14T14:49:37Z"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_timestamp("2024-02-29T23:59:59.5+01:00").unwrap();
        let twice = normalize_timestamp(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize_timestamp("").is_err());
        assert!(normalize_timestamp("not-a-date").is_err());
        assert!(normalize_timestamp("2023-13-01T00:00:00Z").is_err());
        assert!(normalize_timestamp("2023-05-15 14:30:00").is_err());
    }

    #[test]
    fn test_error_message_names_input() {
        match Timestamp::from_str("bad-date") {
            Err(CoreError::InvalidTimestamp(msg)) => assert!(msg.contains("bad-date")),
            other => panic!("Expected InvalidTimestamp error, got {other:?}"),
        }
    }

    #[test]
    fn test_timestamp_serde() {
        let ts = Timestamp::new(datetime!(2023-05-15 14:30:00 UTC));
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2023-05-15T14:30:00Z\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
        assert!(serde_json::from_str::<Timestamp>("\"nope\"").is_err());
    }

    #[test]
    fn test_now_utc_is_utc() {
        assert_eq!(now_utc().inner().offset(), UtcOffset::UTC);
    }
}
