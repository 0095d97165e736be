//! Static resource descriptors.
//!
//! A [`ResourceDescriptor`] is the schema a driving engine needs to decide
//! which values it must supply, which it may change in place and which it
//! should only ever read back. The table is fixed at compile time; validators
//! are plain function pointers.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::error::{ValidationError, ValidationErrors};
use crate::validate::{Validator, validate_enterprise_name, validate_iam_id};

/// Value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
}

/// How an attribute may change over the lifetime of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    /// Set once at creation. A changed declaration means replacement, which
    /// the driving engine must decide before calling update.
    Immutable,
    /// Can be updated in place.
    Mutable,
    /// Computed by the remote system, never supplied by the caller.
    Derived,
}

/// Where the value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Required,
    Optional,
    Computed,
}

impl fmt::Display for Mutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immutable => write!(f, "immutable"),
            Self::Mutable => write!(f, "mutable"),
            Self::Derived => write!(f, "derived"),
        }
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::Optional => write!(f, "optional"),
            Self::Computed => write!(f, "computed"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AttributeSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub mutability: Mutability,
    pub presence: Presence,
    pub description: &'static str,
    #[serde(skip)]
    pub validator: Option<Validator>,
}

impl AttributeSpec {
    const fn derived(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: AttributeType::String,
            mutability: Mutability::Derived,
            presence: Presence::Computed,
            description,
            validator: None,
        }
    }
}

/// Advisory time budget per operation. The driving engine enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceTimeouts {
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl ResourceTimeouts {
    pub const DEFAULT: Self = Self {
        create: Duration::from_secs(10 * 60),
        update: Duration::from_secs(10 * 60),
        delete: Duration::from_secs(10 * 60),
    };
}

impl Default for ResourceTimeouts {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Read access to attribute values by name, for schema-driven checks.
pub trait AttributeValues {
    /// `None` when the attribute is absent; `Some("")` when explicitly empty.
    fn attribute(&self, name: &str) -> Option<&str>;
}

#[derive(Debug, Serialize)]
pub struct ResourceDescriptor {
    pub type_name: &'static str,
    pub attributes: &'static [AttributeSpec],
    pub timeouts: ResourceTimeouts,
}

impl ResourceDescriptor {
    pub fn attribute(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn with_mutability(&self, mutability: Mutability) -> impl Iterator<Item = &AttributeSpec> {
        self.attributes
            .iter()
            .filter(move |a| a.mutability == mutability)
    }

    pub fn immutable(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.with_mutability(Mutability::Immutable)
    }

    pub fn mutable(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.with_mutability(Mutability::Mutable)
    }

    pub fn derived(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.with_mutability(Mutability::Derived)
    }

    /// Checks required values and runs every validator, collecting all
    /// violations instead of stopping at the first.
    pub fn validate<V: AttributeValues + ?Sized>(
        &self,
        values: &V,
    ) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        for spec in self.attributes {
            if spec.presence == Presence::Computed {
                continue;
            }
            match values.attribute(spec.name) {
                None | Some("") if spec.presence == Presence::Required => {
                    errors.push(ValidationError::new(spec.name, "is required"));
                }
                Some(value) if !value.is_empty() => {
                    if let Some(validator) = spec.validator
                        && let Err(e) = validator(value)
                    {
                        errors.push(e);
                    }
                }
                _ => {}
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Immutable attributes whose declared value differs from the recorded
    /// one. An attribute the record does not know is not reported.
    pub fn immutable_changes<D, R>(&self, declared: &D, recorded: &R) -> Vec<&'static str>
    where
        D: AttributeValues + ?Sized,
        R: AttributeValues + ?Sized,
    {
        self.immutable()
            .filter(|spec| {
                matches!(
                    (declared.attribute(spec.name), recorded.attribute(spec.name)),
                    (Some(d), Some(r)) if d != r
                )
            })
            .map(|spec| spec.name)
            .collect()
    }
}

static ENTERPRISE_ATTRIBUTES: [AttributeSpec; 13] = [
    AttributeSpec {
        name: "source_account_id",
        kind: AttributeType::String,
        mutability: Mutability::Immutable,
        presence: Presence::Required,
        description: "The ID of the account that is used to create the enterprise.",
        validator: None,
    },
    AttributeSpec {
        name: "name",
        kind: AttributeType::String,
        mutability: Mutability::Mutable,
        presence: Presence::Required,
        description: "The name of the enterprise. This field must have 3 - 60 characters.",
        validator: Some(validate_enterprise_name),
    },
    AttributeSpec {
        name: "primary_contact_iam_id",
        kind: AttributeType::String,
        mutability: Mutability::Mutable,
        presence: Presence::Required,
        description: "The IAM ID of the enterprise primary contact, such as `IBMid-0123ABC`. The IAM ID must already exist.",
        validator: Some(validate_iam_id),
    },
    AttributeSpec {
        name: "domain",
        kind: AttributeType::String,
        mutability: Mutability::Mutable,
        presence: Presence::Optional,
        description: "A domain or subdomain for the enterprise, such as `example.com` or `my.example.com`.",
        validator: None,
    },
    AttributeSpec::derived("url", "The URL of the enterprise."),
    AttributeSpec::derived("enterprise_account_id", "The enterprise account ID."),
    AttributeSpec::derived("crn", "The Cloud Resource Name (CRN) of the enterprise."),
    AttributeSpec::derived("state", "The state of the enterprise."),
    AttributeSpec::derived(
        "primary_contact_email",
        "The email of the primary contact of the enterprise.",
    ),
    AttributeSpec::derived(
        "created_at",
        "The time stamp at which the enterprise was created.",
    ),
    AttributeSpec::derived(
        "created_by",
        "The IAM ID of the user or service that created the enterprise.",
    ),
    AttributeSpec::derived(
        "updated_at",
        "The time stamp at which the enterprise was last updated.",
    ),
    AttributeSpec::derived(
        "updated_by",
        "The IAM ID of the user or service that updated the enterprise.",
    ),
];

/// Descriptor of the enterprise resource.
pub static ENTERPRISE: ResourceDescriptor = ResourceDescriptor {
    type_name: "enterprise",
    attributes: &ENTERPRISE_ATTRIBUTES,
    timeouts: ResourceTimeouts::DEFAULT,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Values(HashMap<&'static str, &'static str>);

    impl AttributeValues for Values {
        fn attribute(&self, name: &str) -> Option<&str> {
            self.0.get(name).copied()
        }
    }

    fn values(pairs: &[(&'static str, &'static str)]) -> Values {
        Values(pairs.iter().copied().collect())
    }

    fn valid() -> Values {
        values(&[
            ("source_account_id", "acc-1"),
            ("name", "Acme Corp"),
            ("primary_contact_iam_id", "IBMid-AB12CD34EF"),
            ("domain", "acme.com"),
        ])
    }

    #[test]
    fn test_attribute_order_is_stable() {
        let names: Vec<_> = ENTERPRISE.attributes.iter().map(|a| a.name).collect();
        assert_eq!(&names[..4], [
            "source_account_id",
            "name",
            "primary_contact_iam_id",
            "domain"
        ]);
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn test_mutability_classes() {
        let immutable: Vec<_> = ENTERPRISE.immutable().map(|a| a.name).collect();
        assert_eq!(immutable, ["source_account_id"]);

        let mutable: Vec<_> = ENTERPRISE.mutable().map(|a| a.name).collect();
        assert_eq!(mutable, ["name", "primary_contact_iam_id", "domain"]);

        let derived: Vec<_> = ENTERPRISE.derived().map(|a| a.name).collect();
        assert_eq!(derived, [
            "url",
            "enterprise_account_id",
            "crn",
            "state",
            "primary_contact_email",
            "created_at",
            "created_by",
            "updated_at",
            "updated_by",
        ]);
        assert!(ENTERPRISE.derived().all(|a| a.presence == Presence::Computed));
    }

    #[test]
    fn test_lookup() {
        let domain = ENTERPRISE.attribute("domain").unwrap();
        assert_eq!(domain.presence, Presence::Optional);
        assert!(ENTERPRISE.attribute("nope").is_none());
    }

    #[test]
    fn test_default_timeouts() {
        assert_eq!(ENTERPRISE.timeouts.create, Duration::from_secs(600));
        assert_eq!(ENTERPRISE.timeouts, ResourceTimeouts::default());
    }

    #[test]
    fn test_validate_accepts_valid_values() {
        assert!(ENTERPRISE.validate(&valid()).is_ok());
    }

    #[test]
    fn test_validate_collects_every_violation() {
        let v = values(&[
            ("name", "Ac"),
            ("primary_contact_iam_id", "IBMid-short"),
            ("domain", ""),
        ]);
        let errors = ENTERPRISE.validate(&v).unwrap_err();
        assert_eq!(errors.attributes(), [
            "source_account_id",
            "name",
            "primary_contact_iam_id"
        ]);
    }

    #[test]
    fn test_validate_treats_empty_required_as_missing() {
        let v = values(&[
            ("source_account_id", ""),
            ("name", "Acme Corp"),
            ("primary_contact_iam_id", "IBMid-AB12CD34EF"),
        ]);
        let errors = ENTERPRISE.validate(&v).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.0[0].reason, "is required");
    }

    #[test]
    fn test_immutable_changes() {
        let declared = valid();
        let same = valid();
        assert!(ENTERPRISE.immutable_changes(&declared, &same).is_empty());

        let moved = values(&[("source_account_id", "acc-2"), ("name", "Other")]);
        assert_eq!(
            ENTERPRISE.immutable_changes(&declared, &moved),
            ["source_account_id"]
        );

        let unknown = values(&[("name", "Acme Corp")]);
        assert!(ENTERPRISE.immutable_changes(&declared, &unknown).is_empty());
    }

    #[test]
    fn test_descriptor_serializes_without_validators() {
        let json = serde_json::to_value(&ENTERPRISE).unwrap();
        assert_eq!(json["type_name"], "enterprise");
        assert_eq!(json["attributes"][1]["name"], "name");
        assert_eq!(json["attributes"][1]["mutability"], "mutable");
        assert_eq!(json["attributes"][4]["presence"], "computed");
        assert!(json["attributes"][1].get("validator").is_none());
    }
}
