//! Traits for reaching the enterprise management service.
//!
//! [`EnterpriseManagementApi`] is the remote-call capability itself.
//! [`ClientSession`] is what operations receive: something that can hand out
//! that capability, or explain why it cannot.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ApiError, ClientUnavailable};
use crate::types::{
    CreateEnterpriseRequest, CreateEnterpriseResponse, Enterprise, UpdateEnterpriseRequest,
};

/// Remote calls the enterprise management service supports.
///
/// There is deliberately no delete: the service offers no tear-down for an
/// enterprise through this interface. Implementations must be thread-safe
/// (`Send + Sync`).
///
/// # Example
///
/// ```ignore
/// use entmgr_client::{ApiError, Enterprise, EnterpriseManagementApi};
///
/// async fn state_of(api: &dyn EnterpriseManagementApi, id: &str) -> Result<Option<String>, ApiError> {
///     Ok(api.get_enterprise(id).await?.and_then(|e| e.state))
/// }
/// ```
#[async_trait]
pub trait EnterpriseManagementApi: Send + Sync {
    /// Creates a new enterprise.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the service rejects the request.
    /// Returns `ApiError::Decode` if the response carries no enterprise ID.
    async fn create_enterprise(
        &self,
        request: &CreateEnterpriseRequest,
    ) -> Result<CreateEnterpriseResponse, ApiError>;

    /// Fetches an enterprise by ID.
    ///
    /// Returns `None` if the enterprise does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures other than absence.
    async fn get_enterprise(&self, id: &str) -> Result<Option<Enterprise>, ApiError>;

    /// Updates the fields set in `request`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the enterprise does not exist.
    /// Returns `ApiError::Http` if the service rejects the request.
    async fn update_enterprise(
        &self,
        id: &str,
        request: &UpdateEnterpriseRequest,
    ) -> Result<(), ApiError>;

    /// Returns the name of this backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

/// Shared handle to a remote-call capability.
pub type DynEnterpriseApi = Arc<dyn EnterpriseManagementApi>;

/// Source of the remote-call capability, passed into every operation.
pub trait ClientSession: Send + Sync {
    /// Returns a client for the enterprise management service.
    ///
    /// # Errors
    ///
    /// Returns `ClientUnavailable` when credentials or configuration needed to
    /// build the client are missing.
    fn enterprise_management(&self) -> Result<DynEnterpriseApi, ClientUnavailable>;
}

impl ClientSession for DynEnterpriseApi {
    fn enterprise_management(&self) -> Result<DynEnterpriseApi, ClientUnavailable> {
        Ok(Arc::clone(self))
    }
}

/// A session that can never produce a client.
#[derive(Debug, Clone)]
pub struct UnavailableSession {
    reason: String,
}

impl UnavailableSession {
    /// Creates a session that fails with `reason`.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl ClientSession for UnavailableSession {
    fn enterprise_management(&self) -> Result<DynEnterpriseApi, ClientUnavailable> {
        Err(ClientUnavailable::new(self.reason.clone()))
    }
}
