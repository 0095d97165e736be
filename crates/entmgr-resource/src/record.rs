//! The persisted record of a managed enterprise.

use std::fmt;

use entmgr_client::Enterprise;
use entmgr_core::{AttributeValues, OptionalValue, normalize_timestamp};
use serde::{Deserialize, Serialize};

use crate::error::{ReconcileError, ReconcileResult};

/// Lifecycle state of a managed instance, as seen from its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
    /// No identifier recorded.
    Absent,
    /// An identifier is recorded.
    Present,
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Present => write!(f, "present"),
        }
    }
}

/// Last known values for one enterprise, including its identifier.
///
/// The driving engine owns persistence. Operations only mutate the record
/// handed to them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnterpriseRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_account_id: Option<String>,
    pub name: Option<String>,
    pub primary_contact_iam_id: Option<String>,
    #[serde(skip_serializing_if = "OptionalValue::is_unset")]
    pub domain: OptionalValue,
    pub url: Option<String>,
    pub enterprise_account_id: Option<String>,
    pub crn: Option<String>,
    pub state: Option<String>,
    pub primary_contact_email: Option<String>,
    pub created_at: Option<String>,
    pub created_by: Option<String>,
    pub updated_at: Option<String>,
    pub updated_by: Option<String>,
}

impl EnterpriseRecord {
    /// A record that only carries an identifier.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn state(&self) -> InstanceState {
        if self.id().is_some() {
            InstanceState::Present
        } else {
            InstanceState::Absent
        }
    }

    pub fn is_present(&self) -> bool {
        self.state() == InstanceState::Present
    }

    /// Returns the identifier, or `InvalidState` if there is none.
    pub(crate) fn require_id(&self, operation: &'static str) -> ReconcileResult<String> {
        self.id()
            .map(str::to_string)
            .ok_or_else(|| ReconcileError::invalid_state(operation, InstanceState::Absent))
    }

    pub(crate) fn require_absent(&self, operation: &'static str) -> ReconcileResult<()> {
        match self.state() {
            InstanceState::Absent => Ok(()),
            state => Err(ReconcileError::invalid_state(operation, state)),
        }
    }

    /// Drops the identifier and every recorded value.
    pub fn forget(&mut self) {
        *self = Self::default();
    }
}

impl AttributeValues for EnterpriseRecord {
    fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "source_account_id" => self.source_account_id.as_deref(),
            "name" => self.name.as_deref(),
            "primary_contact_iam_id" => self.primary_contact_iam_id.as_deref(),
            "domain" => self.domain.as_deref(),
            "url" => self.url.as_deref(),
            "enterprise_account_id" => self.enterprise_account_id.as_deref(),
            "crn" => self.crn.as_deref(),
            "state" => self.state.as_deref(),
            "primary_contact_email" => self.primary_contact_email.as_deref(),
            "created_at" => self.created_at.as_deref(),
            "created_by" => self.created_by.as_deref(),
            "updated_at" => self.updated_at.as_deref(),
            "updated_by" => self.updated_by.as_deref(),
            _ => None,
        }
    }
}

/// Values fetched from the remote, converted and ready to be stored.
///
/// Building a snapshot does all fallible conversion up front, so a failure
/// leaves the record untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RemoteSnapshot {
    name: Option<String>,
    primary_contact_iam_id: Option<String>,
    domain: OptionalValue,
    url: Option<String>,
    enterprise_account_id: Option<String>,
    crn: Option<String>,
    state: Option<String>,
    primary_contact_email: Option<String>,
    created_at: Option<String>,
    created_by: Option<String>,
    updated_at: Option<String>,
    updated_by: Option<String>,
}

impl RemoteSnapshot {
    pub(crate) fn from_remote(enterprise: Enterprise) -> ReconcileResult<Self> {
        let created_at = timestamp("created_at", enterprise.created_at.as_deref())?;
        let updated_at = timestamp("updated_at", enterprise.updated_at.as_deref())?;
        Ok(Self {
            name: enterprise.name,
            primary_contact_iam_id: enterprise.primary_contact_iam_id,
            domain: OptionalValue::from_option(enterprise.domain),
            url: enterprise.url,
            enterprise_account_id: enterprise.enterprise_account_id,
            crn: enterprise.crn,
            state: enterprise.state,
            primary_contact_email: enterprise.primary_contact_email,
            created_at,
            created_by: enterprise.created_by,
            updated_at,
            updated_by: enterprise.updated_by,
        })
    }

    /// Overwrites every mutable and derived attribute. The identifier and
    /// `source_account_id` are left alone.
    pub(crate) fn apply(self, record: &mut EnterpriseRecord) {
        record.name = self.name;
        record.primary_contact_iam_id = self.primary_contact_iam_id;
        record.domain = self.domain;
        record.url = self.url;
        record.enterprise_account_id = self.enterprise_account_id;
        record.crn = self.crn;
        record.state = self.state;
        record.primary_contact_email = self.primary_contact_email;
        record.created_at = self.created_at;
        record.created_by = self.created_by;
        record.updated_at = self.updated_at;
        record.updated_by = self.updated_by;
    }
}

fn timestamp(attribute: &'static str, raw: Option<&str>) -> ReconcileResult<Option<String>> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => normalize_timestamp(value)
            .map(Some)
            .map_err(|e| ReconcileError::attribute_assignment(attribute, e.to_string())),
    }
}
