//! Wire types for the enterprise management API.
//!
//! Field names follow the JSON the service speaks, so these types serialize
//! directly into request bodies and deserialize directly from responses.

use serde::{Deserialize, Serialize};

/// Body of a `CreateEnterprise` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEnterpriseRequest {
    /// The ID of the account that is used to create the enterprise.
    pub source_account_id: String,
    /// The name of the enterprise.
    pub name: String,
    /// The IAM ID of the enterprise primary contact.
    pub primary_contact_iam_id: String,
    /// Domain of the enterprise. Omitted from the body when `None`; sent as
    /// `""` when explicitly empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl CreateEnterpriseRequest {
    /// Creates a request with the three required fields and no domain.
    #[must_use]
    pub fn new(
        source_account_id: impl Into<String>,
        name: impl Into<String>,
        primary_contact_iam_id: impl Into<String>,
    ) -> Self {
        Self {
            source_account_id: source_account_id.into(),
            name: name.into(),
            primary_contact_iam_id: primary_contact_iam_id.into(),
            domain: None,
        }
    }

    /// Sets the domain.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}

/// Response of a `CreateEnterprise` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEnterpriseResponse {
    /// The ID of the enterprise that was created.
    pub enterprise_id: String,
    /// The ID of the enterprise account that was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enterprise_account_id: Option<String>,
}

/// Body of an `UpdateEnterprise` call. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEnterpriseRequest {
    /// New name of the enterprise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New domain; `""` clears it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// New primary contact IAM ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_contact_iam_id: Option<String>,
}

impl UpdateEnterpriseRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the update carries no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.domain.is_none() && self.primary_contact_iam_id.is_none()
    }

    /// Names of the fields this update carries, in wire order.
    #[must_use]
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.domain.is_some() {
            fields.push("domain");
        }
        if self.primary_contact_iam_id.is_some() {
            fields.push("primary_contact_iam_id");
        }
        fields
    }
}

/// An enterprise as returned by `GetEnterprise`.
///
/// Every field is optional on the wire. Timestamps are kept as the raw
/// strings the service sent; normalizing them is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enterprise {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enterprise_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_contact_iam_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_omits_unset_domain() {
        let req = CreateEnterpriseRequest::new("acc-1", "Acme Corp", "IBMid-AB12CD34EF");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "source_account_id": "acc-1",
                "name": "Acme Corp",
                "primary_contact_iam_id": "IBMid-AB12CD34EF"
            })
        );

        let req = req.with_domain("");
        assert_eq!(serde_json::to_value(&req).unwrap()["domain"], json!(""));
    }

    #[test]
    fn test_update_request_fields() {
        let req = UpdateEnterpriseRequest::new();
        assert!(req.is_empty());
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({}));

        let req = UpdateEnterpriseRequest {
            domain: Some("sub.acme.com".into()),
            ..Default::default()
        };
        assert!(!req.is_empty());
        assert_eq!(req.fields(), ["domain"]);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "domain": "sub.acme.com" })
        );
    }

    #[test]
    fn test_enterprise_tolerates_missing_and_unknown_fields() {
        let body = json!({
            "id": "ent-123",
            "crn": "crn:v1:bluemix:public:enterprise::a/abc::enterprise:ent-123",
            "state": "active",
            "something_new": 42
        });
        let enterprise: Enterprise = serde_json::from_value(body).unwrap();
        assert_eq!(enterprise.id.as_deref(), Some("ent-123"));
        assert_eq!(enterprise.state.as_deref(), Some("active"));
        assert_eq!(enterprise.domain, None);
    }

    #[test]
    fn test_create_response_requires_enterprise_id() {
        assert!(serde_json::from_value::<CreateEnterpriseResponse>(json!({})).is_err());
        let resp: CreateEnterpriseResponse =
            serde_json::from_value(json!({ "enterprise_id": "ent-1" })).unwrap();
        assert_eq!(resp.enterprise_id, "ent-1");
        assert_eq!(resp.enterprise_account_id, None);
    }
}
