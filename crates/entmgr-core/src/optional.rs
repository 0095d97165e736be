//! Tri-state value for optional attributes.
//!
//! An optional attribute can be left out of the configuration, set to the
//! empty string, or set to a value. Creation requests keep all three apart;
//! drift detection folds the first two together because both mean "no value"
//! on the remote side.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OptionalValue {
    /// Not present in the configuration.
    #[default]
    Unset,
    /// Present and explicitly empty.
    Empty,
    /// Present with a value.
    Set(String),
}

impl OptionalValue {
    /// Builds from a remote or declared value, mapping `Some("")` to `Empty`.
    pub fn from_option(value: Option<String>) -> Self {
        match value {
            None => Self::Unset,
            Some(v) if v.is_empty() => Self::Empty,
            Some(v) => Self::Set(v),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// The string value, `""` for `Empty`, `None` for `Unset`.
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Self::Unset => None,
            Self::Empty => Some(""),
            Self::Set(v) => Some(v),
        }
    }

    /// The value a creation request should carry. `Unset` is omitted.
    pub fn to_request(&self) -> Option<String> {
        self.as_deref().map(str::to_string)
    }

    /// The value an update request should carry to move the remote to `self`.
    /// Clearing is expressed as the empty string.
    pub fn to_update(&self) -> String {
        self.as_deref().unwrap_or_default().to_string()
    }

    /// Equality as seen by the remote system: `Unset` and `Empty` match.
    pub fn same_remote_value(&self, other: &Self) -> bool {
        self.as_deref().unwrap_or_default() == other.as_deref().unwrap_or_default()
    }
}

impl From<Option<String>> for OptionalValue {
    fn from(value: Option<String>) -> Self {
        Self::from_option(value)
    }
}

impl From<&str> for OptionalValue {
    fn from(value: &str) -> Self {
        Self::from_option(Some(value.to_string()))
    }
}

impl Serialize for OptionalValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_deref() {
            Some(v) => serializer.serialize_some(v),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for OptionalValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::from_option(Option::<String>::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Holder {
        #[serde(default, skip_serializing_if = "OptionalValue::is_unset")]
        domain: OptionalValue,
    }

    #[test]
    fn test_from_option() {
        assert_eq!(OptionalValue::from_option(None), OptionalValue::Unset);
        assert_eq!(
            OptionalValue::from_option(Some(String::new())),
            OptionalValue::Empty
        );
        assert_eq!(
            OptionalValue::from_option(Some("acme.com".into())),
            OptionalValue::Set("acme.com".into())
        );
    }

    #[test]
    fn test_request_keeps_empty_apart_from_unset() {
        assert_eq!(OptionalValue::Unset.to_request(), None);
        assert_eq!(OptionalValue::Empty.to_request(), Some(String::new()));
        assert_eq!(
            OptionalValue::from("acme.com").to_request(),
            Some("acme.com".to_string())
        );
    }

    #[test]
    fn test_remote_equality_folds_unset_and_empty() {
        assert!(OptionalValue::Unset.same_remote_value(&OptionalValue::Empty));
        assert!(OptionalValue::Empty.same_remote_value(&OptionalValue::Unset));
        assert!(!OptionalValue::Unset.same_remote_value(&"acme.com".into()));
        assert!(OptionalValue::from("a").same_remote_value(&"a".into()));
        assert!(!OptionalValue::from("a").same_remote_value(&"b".into()));
    }

    #[test]
    fn test_update_value_clears_with_empty_string() {
        assert_eq!(OptionalValue::Unset.to_update(), "");
        assert_eq!(OptionalValue::Empty.to_update(), "");
        assert_eq!(OptionalValue::from("x.io").to_update(), "x.io");
    }

    #[test]
    fn test_serde_round_trip_through_holder() {
        let json = serde_json::to_string(&Holder {
            domain: OptionalValue::Unset,
        })
        .unwrap();
        assert_eq!(json, "{}");

        let json = serde_json::to_string(&Holder {
            domain: OptionalValue::Empty,
        })
        .unwrap();
        assert_eq!(json, r#"{"domain":""}"#);

        let parsed: Holder = serde_json::from_str(r#"{"domain":null}"#).unwrap();
        assert_eq!(parsed.domain, OptionalValue::Unset);
        let parsed: Holder = serde_json::from_str(r#"{"domain":""}"#).unwrap();
        assert_eq!(parsed.domain, OptionalValue::Empty);
        let parsed: Holder = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.domain, OptionalValue::Unset);
    }
}
