//! Attribute validators. Each is a pure function over the declared string.
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 60;

static IAM_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^IBMid-[A-Z0-9]{10}$").expect("IAM ID pattern is a valid regex")
});

pub type Validator = fn(&str) -> Result<(), ValidationError>;

pub fn validate_enterprise_name(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "name",
            format!("must be {NAME_MIN_LEN}-{NAME_MAX_LEN} characters, got {len}"),
        ))
    }
}

pub fn validate_iam_id(value: &str) -> Result<(), ValidationError> {
    if IAM_ID_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "primary_contact_iam_id",
            format!("'{value}' does not match IBMid- followed by 10 uppercase alphanumerics"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_length_bounds() {
        assert!(validate_enterprise_name("Acme Corp").is_ok());
        assert!(validate_enterprise_name("abc").is_ok());
        assert!(validate_enterprise_name(&"x".repeat(60)).is_ok());

        let err = validate_enterprise_name("ab").unwrap_err();
        assert_eq!(err.attribute, "name");
        assert!(err.reason.contains("got 2"));
        assert!(validate_enterprise_name("").is_err());
        assert!(validate_enterprise_name(&"x".repeat(61)).is_err());
    }

    #[test]
    fn test_name_counts_characters_not_bytes() {
        // 3 characters, 6 bytes
        assert!(validate_enterprise_name("ééé").is_ok());
    }

    #[test]
    fn test_iam_id_pattern() {
        assert!(validate_iam_id("IBMid-AB12CD34EF").is_ok());
        assert!(validate_iam_id("IBMid-0123456789").is_ok());

        assert!(validate_iam_id("IBMid-ab12cd34ef").is_err());
        assert!(validate_iam_id("IBMid-AB12CD34E").is_err());
        assert!(validate_iam_id("IBMid-AB12CD34EFG").is_err());
        assert!(validate_iam_id("ibmid-AB12CD34EF").is_err());
        assert!(validate_iam_id("IBMid-AB,2CD34EF").is_err());
        assert!(validate_iam_id("").is_err());
    }

    #[test]
    fn test_iam_id_error_names_attribute() {
        let err = validate_iam_id("bob").unwrap_err();
        assert_eq!(err.attribute, "primary_contact_iam_id");
        assert!(err.to_string().starts_with("primary_contact_iam_id: 'bob'"));
    }
}
