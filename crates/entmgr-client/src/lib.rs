//! # entmgr-client
//!
//! Remote-call capability for the enterprise management service.
//!
//! This crate defines the contract a binding uses to reach the service and
//! ships two implementations of it.
//!
//! ## Overview
//!
//! The main trait is [`EnterpriseManagementApi`], which defines:
//! - `create_enterprise` returning the assigned ID
//! - `get_enterprise` returning `None` for an unknown ID
//! - `update_enterprise` carrying only the fields to change
//!
//! There is no delete call; the service does not offer one.
//!
//! Operations never hold a client directly. They receive a
//! [`ClientSession`] and ask it for one, so a missing token or a bad
//! endpoint surfaces as [`ClientUnavailable`] at the start of the operation.
//!
//! ## Example
//!
//! ```ignore
//! use entmgr_client::{ClientConfig, ClientSession, HttpClientSession};
//!
//! let config = ClientConfig::new("https://enterprise.cloud.ibm.com")?.with_token(token);
//! let session = HttpClientSession::new(config);
//! let api = session.enterprise_management()?;
//! let enterprise = api.get_enterprise("ent-123").await?;
//! ```
//!
//! ## Backends
//!
//! - [`HttpEnterpriseClient`] speaks the REST API with `reqwest`.
//! - [`InMemoryEnterpriseApi`] keeps enterprises in a map and journals every
//!   call, for tests and local experiments.

mod error;
pub mod http;
pub mod memory;
mod traits;
mod types;

pub use error::{ApiError, ClientUnavailable, ErrorCategory};
pub use http::{ClientConfig, DEFAULT_ENDPOINT, HttpClientSession, HttpEnterpriseClient};
pub use memory::{ApiCall, CallKind, InMemoryEnterpriseApi};
pub use traits::{ClientSession, DynEnterpriseApi, EnterpriseManagementApi, UnavailableSession};
pub use types::{
    CreateEnterpriseRequest, CreateEnterpriseResponse, Enterprise, UpdateEnterpriseRequest,
};

/// Type alias for a client result.
pub type ApiResult<T> = Result<T, ApiError>;
