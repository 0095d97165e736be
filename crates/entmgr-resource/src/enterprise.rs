//! Reconciliation of enterprise instances.

use async_trait::async_trait;
use entmgr_client::{ApiError, ClientSession, EnterpriseManagementApi, UpdateEnterpriseRequest};
use entmgr_core::{ENTERPRISE, ResourceDescriptor};
use tracing::instrument;

use crate::binding::{ReadOutcome, ResourceBinding};
use crate::declared::DeclaredEnterprise;
use crate::error::{ReconcileError, ReconcileResult};
use crate::record::{EnterpriseRecord, RemoteSnapshot};

const CREATE_CALL: &str = "CreateEnterprise";
const GET_CALL: &str = "GetEnterprise";
const UPDATE_CALL: &str = "UpdateEnterprise";

/// The enterprise resource binding.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnterpriseResource;

impl EnterpriseResource {
    pub fn new() -> Self {
        Self
    }

    /// Mutable attributes whose declared value differs from the record.
    ///
    /// An unset declared domain and an empty one are the same remote value,
    /// so switching between them is not a change.
    pub fn changed_attributes(
        declared: &DeclaredEnterprise,
        record: &EnterpriseRecord,
    ) -> UpdateEnterpriseRequest {
        let mut request = UpdateEnterpriseRequest::new();
        if record.name.as_deref() != Some(declared.name.as_str()) {
            request.name = Some(declared.name.clone());
        }
        if !declared.domain.same_remote_value(&record.domain) {
            request.domain = Some(declared.domain.to_update());
        }
        if record.primary_contact_iam_id.as_deref() != Some(declared.primary_contact_iam_id.as_str())
        {
            request.primary_contact_iam_id = Some(declared.primary_contact_iam_id.clone());
        }
        request
    }

    /// Fetches the enterprise and converts it. `None` means the remote does
    /// not know the identifier.
    async fn fetch(
        &self,
        api: &dyn EnterpriseManagementApi,
        id: &str,
    ) -> ReconcileResult<Option<RemoteSnapshot>> {
        match api.get_enterprise(id).await {
            Ok(Some(enterprise)) => RemoteSnapshot::from_remote(enterprise).map(Some),
            Ok(None) => Ok(None),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(remote_failure(GET_CALL, id, e)),
        }
    }
}

#[async_trait]
impl ResourceBinding for EnterpriseResource {
    type Declared = DeclaredEnterprise;
    type Record = EnterpriseRecord;

    fn descriptor(&self) -> &'static ResourceDescriptor {
        &ENTERPRISE
    }

    #[instrument(skip_all, fields(source_account_id = %declared.source_account_id))]
    async fn create(
        &self,
        declared: &DeclaredEnterprise,
        record: &mut EnterpriseRecord,
        session: &dyn ClientSession,
    ) -> ReconcileResult<String> {
        record.require_absent("create")?;
        let api = session.enterprise_management()?;

        let response = api
            .create_enterprise(&declared.to_create_request())
            .await
            .map_err(|e| remote_failure(CREATE_CALL, &declared.name, e))?;
        let id = response.enterprise_id;
        if id.is_empty() {
            return Err(ReconcileError::remote(
                CREATE_CALL,
                ApiError::decode("response carried an empty enterprise_id", ""),
            ));
        }
        tracing::info!(%id, backend = api.backend_name(), "Enterprise created");

        record.id = Some(id.clone());
        record.source_account_id = Some(declared.source_account_id.clone());
        record.name = Some(declared.name.clone());
        record.primary_contact_iam_id = Some(declared.primary_contact_iam_id.clone());
        record.domain = declared.domain.clone();
        record.enterprise_account_id = response.enterprise_account_id;

        match self.fetch(api.as_ref(), &id).await? {
            Some(snapshot) => snapshot.apply(record),
            None => {
                return Err(remote_failure(GET_CALL, &id, ApiError::not_found(&id)));
            }
        }
        Ok(id)
    }

    #[instrument(skip_all, fields(id = record.id.as_deref().unwrap_or_default()))]
    async fn read(
        &self,
        record: &mut EnterpriseRecord,
        session: &dyn ClientSession,
    ) -> ReconcileResult<ReadOutcome> {
        let id = record.require_id("read")?;
        let api = session.enterprise_management()?;

        match self.fetch(api.as_ref(), &id).await? {
            Some(snapshot) => {
                snapshot.apply(record);
                Ok(ReadOutcome::Refreshed)
            }
            None => {
                tracing::warn!(%id, "Enterprise not found remotely; removing from state");
                record.forget();
                Ok(ReadOutcome::Absent)
            }
        }
    }

    #[instrument(skip_all, fields(id = record.id.as_deref().unwrap_or_default()))]
    async fn update(
        &self,
        declared: &DeclaredEnterprise,
        record: &mut EnterpriseRecord,
        session: &dyn ClientSession,
    ) -> ReconcileResult<()> {
        let id = record.require_id("update")?;
        let api = session.enterprise_management()?;

        let changes = Self::changed_attributes(declared, record);
        if changes.is_empty() {
            tracing::debug!(%id, "No mutable attribute changed");
        } else {
            api.update_enterprise(&id, &changes)
                .await
                .map_err(|e| remote_failure(UPDATE_CALL, &id, e))?;
            tracing::info!(%id, fields = ?changes.fields(), "Enterprise updated");
        }

        match self.fetch(api.as_ref(), &id).await? {
            Some(snapshot) => snapshot.apply(record),
            None => {
                tracing::warn!(%id, "Enterprise vanished after update; removing from state");
                record.forget();
            }
        }
        Ok(())
    }

    async fn delete(&self, record: &mut EnterpriseRecord) -> ReconcileResult<()> {
        let id = record.require_id("delete")?;
        // The service has no delete call. The enterprise keeps existing.
        tracing::info!(%id, "Enterprise removed from management");
        record.forget();
        Ok(())
    }

    #[instrument(skip(self, record, session))]
    async fn import(
        &self,
        id: &str,
        record: &mut EnterpriseRecord,
        session: &dyn ClientSession,
    ) -> ReconcileResult<()> {
        record.require_absent("import")?;
        // A blank identifier would address the collection, not an enterprise.
        if id.trim().is_empty() {
            return Err(ReconcileError::ImportTargetMissing { id: id.to_string() });
        }
        let api = session.enterprise_management()?;

        let snapshot = self
            .fetch(api.as_ref(), id)
            .await?
            .ok_or_else(|| ReconcileError::ImportTargetMissing { id: id.to_string() })?;
        record.id = Some(id.to_string());
        snapshot.apply(record);
        tracing::info!(%id, "Enterprise imported");
        Ok(())
    }
}

fn remote_failure(call: &'static str, resource_id: &str, error: ApiError) -> ReconcileError {
    tracing::debug!(
        call,
        resource_id,
        status = ?error.status(),
        response = error.raw_response().unwrap_or_default(),
        "Remote call failed: {error}"
    );
    ReconcileError::remote(call, error)
}
