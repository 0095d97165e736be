//! The contract between a driving engine and a resource binding.

use async_trait::async_trait;
use entmgr_client::ClientSession;
use entmgr_core::ResourceDescriptor;

use crate::error::ReconcileResult;

/// Result of a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The record now reflects the remote.
    Refreshed,
    /// The remote no longer knows the instance. The record was cleared.
    Absent,
}

/// A schema descriptor plus the operations that reconcile one resource type.
///
/// The engine decides which operation to call and persists the record
/// afterwards. Before calling [`create`](Self::create) or
/// [`update`](Self::update) it is expected to have run
/// [`ResourceDescriptor::validate`] on the declared values and refused any
/// change reported by [`ResourceDescriptor::immutable_changes`].
///
/// Operations run one at a time per instance. Each one obtains its client
/// from the session it is given.
///
/// # Implementations
///
/// - [`EnterpriseResource`](crate::EnterpriseResource)
#[async_trait]
pub trait ResourceBinding: Send + Sync {
    /// Values supplied by the caller.
    type Declared: Send + Sync;
    /// Values the engine persists between runs.
    type Record: Send + Sync;

    fn descriptor(&self) -> &'static ResourceDescriptor;

    /// Creates the remote instance and fills the record from a follow-up read.
    ///
    /// Returns the new identifier. The identifier stays on the record even
    /// when the follow-up read fails.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the record already has an identifier.
    async fn create(
        &self,
        declared: &Self::Declared,
        record: &mut Self::Record,
        session: &dyn ClientSession,
    ) -> ReconcileResult<String>;

    /// Refreshes the record from the remote.
    ///
    /// The record is only modified if every fetched value converts cleanly.
    async fn read(
        &self,
        record: &mut Self::Record,
        session: &dyn ClientSession,
    ) -> ReconcileResult<ReadOutcome>;

    /// Pushes changed mutable attributes, then refreshes the record.
    async fn update(
        &self,
        declared: &Self::Declared,
        record: &mut Self::Record,
        session: &dyn ClientSession,
    ) -> ReconcileResult<()>;

    /// Stops managing the instance. The remote side is left as it is.
    async fn delete(&self, record: &mut Self::Record) -> ReconcileResult<()>;

    /// Adopts an existing remote instance by identifier.
    async fn import(
        &self,
        id: &str,
        record: &mut Self::Record,
        session: &dyn ClientSession,
    ) -> ReconcileResult<()>;
}
