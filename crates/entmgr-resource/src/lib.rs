//! # entmgr-resource
//!
//! The enterprise resource binding: what a caller declares, what gets
//! persisted between runs, and the operations that reconcile the two with
//! the enterprise management service.
//!
//! ## Lifecycle
//!
//! An instance is `absent` until [`ResourceBinding::create`] or
//! [`ResourceBinding::import`] records an identifier, and `present` until
//! [`ResourceBinding::delete`] or a read that finds nothing remotely clears
//! it again. Delete never reaches the service, which has no way to remove
//! an enterprise.
//!
//! ## Example
//!
//! ```ignore
//! use entmgr_resource::{DeclaredEnterprise, EnterpriseRecord, EnterpriseResource, ResourceBinding};
//!
//! let binding = EnterpriseResource::new();
//! let declared = DeclaredEnterprise::new("acc-1", "Acme Corp", "IBMid-AB12CD34EF")
//!     .with_domain("acme.com");
//! binding.descriptor().validate(&declared)?;
//!
//! let mut record = EnterpriseRecord::default();
//! let id = binding.create(&declared, &mut record, &session).await?;
//! ```

mod binding;
mod declared;
mod enterprise;
mod error;
mod record;

pub use binding::{ReadOutcome, ResourceBinding};
pub use declared::DeclaredEnterprise;
pub use enterprise::EnterpriseResource;
pub use error::{ErrorCategory, ReconcileError, ReconcileResult};
pub use record::{EnterpriseRecord, InstanceState};
