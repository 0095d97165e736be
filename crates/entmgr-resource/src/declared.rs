//! User-declared enterprise attributes.

use entmgr_client::CreateEnterpriseRequest;
use entmgr_core::{AttributeValues, OptionalValue};
use serde::{Deserialize, Serialize};

/// The attributes a caller supplies for an enterprise.
///
/// Missing required fields deserialize to empty strings so that
/// [`ResourceDescriptor::validate`](entmgr_core::ResourceDescriptor::validate)
/// can report every problem in one pass. Derived attributes are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeclaredEnterprise {
    pub source_account_id: String,
    pub name: String,
    pub primary_contact_iam_id: String,
    #[serde(skip_serializing_if = "OptionalValue::is_unset")]
    pub domain: OptionalValue,
}

impl DeclaredEnterprise {
    pub fn new(
        source_account_id: impl Into<String>,
        name: impl Into<String>,
        primary_contact_iam_id: impl Into<String>,
    ) -> Self {
        Self {
            source_account_id: source_account_id.into(),
            name: name.into(),
            primary_contact_iam_id: primary_contact_iam_id.into(),
            domain: OptionalValue::Unset,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<OptionalValue>) -> Self {
        self.domain = domain.into();
        self
    }

    /// The creation request. An unset domain is left out; an explicitly
    /// empty one is sent as `""`.
    pub fn to_create_request(&self) -> CreateEnterpriseRequest {
        let request = CreateEnterpriseRequest::new(
            self.source_account_id.clone(),
            self.name.clone(),
            self.primary_contact_iam_id.clone(),
        );
        match self.domain.to_request() {
            Some(domain) => request.with_domain(domain),
            None => request,
        }
    }
}

impl AttributeValues for DeclaredEnterprise {
    fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "source_account_id" => Some(&self.source_account_id),
            "name" => Some(&self.name),
            "primary_contact_iam_id" => Some(&self.primary_contact_iam_id),
            "domain" => self.domain.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entmgr_core::ENTERPRISE;

    fn acme() -> DeclaredEnterprise {
        DeclaredEnterprise::new("acc-1", "Acme Corp", "IBMid-AB12CD34EF")
    }

    #[test]
    fn test_create_request_omits_unset_domain() {
        let request = acme().to_create_request();
        assert_eq!(request.source_account_id, "acc-1");
        assert_eq!(request.domain, None);
    }

    #[test]
    fn test_create_request_sends_empty_domain() {
        let request = acme().with_domain(OptionalValue::Empty).to_create_request();
        assert_eq!(request.domain.as_deref(), Some(""));

        let request = acme().with_domain("acme.com").to_create_request();
        assert_eq!(request.domain.as_deref(), Some("acme.com"));
    }

    #[test]
    fn test_valid_declaration_passes() {
        assert!(ENTERPRISE.validate(&acme().with_domain("acme.com")).is_ok());
    }

    #[test]
    fn test_validation_reports_every_violation() {
        let declared = DeclaredEnterprise::new("", "AB", "user@example.com");
        let errors = ENTERPRISE.validate(&declared).unwrap_err();
        assert_eq!(
            errors.attributes(),
            vec!["source_account_id", "name", "primary_contact_iam_id"]
        );
    }

    #[test]
    fn test_deserialize_from_toml() {
        let declared: DeclaredEnterprise = toml::from_str(
            r#"
            source_account_id = "acc-1"
            name = "Acme Corp"
            primary_contact_iam_id = "IBMid-AB12CD34EF"
            domain = ""
            "#,
        )
        .unwrap();
        assert_eq!(declared.domain, OptionalValue::Empty);

        let declared: DeclaredEnterprise = toml::from_str(r#"name = "Acme Corp""#).unwrap();
        assert_eq!(declared.domain, OptionalValue::Unset);
        assert!(declared.source_account_id.is_empty());
    }

    #[test]
    fn test_derived_attributes_are_rejected() {
        let result: Result<DeclaredEnterprise, _> =
            toml::from_str(r#"crn = "crn:v1:bluemix:public:enterprise::a/x::enterprise:y""#);
        assert!(result.is_err());
    }
}
