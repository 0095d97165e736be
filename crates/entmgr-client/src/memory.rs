//! In-memory implementation of [`EnterpriseManagementApi`].
//!
//! Behaves like the remote service closely enough to exercise a binding end
//! to end: it assigns IDs, computes derived fields, bumps `updated_at` on
//! every update, and answers not-found for unknown IDs. Every call is
//! journaled, and failures can be queued per call kind.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use entmgr_core::now_utc;
use tokio::sync::Mutex;

use crate::error::{ApiError, ClientUnavailable};
use crate::traits::{ClientSession, DynEnterpriseApi, EnterpriseManagementApi};
use crate::types::{
    CreateEnterpriseRequest, CreateEnterpriseResponse, Enterprise, UpdateEnterpriseRequest,
};

/// Which remote call a journal entry or injected failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Create,
    Get,
    Update,
}

/// A journaled remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Create(CreateEnterpriseRequest),
    Get(String),
    Update(String, UpdateEnterpriseRequest),
}

impl ApiCall {
    pub fn kind(&self) -> CallKind {
        match self {
            Self::Create(_) => CallKind::Create,
            Self::Get(_) => CallKind::Get,
            Self::Update(..) => CallKind::Update,
        }
    }
}

/// In-memory enterprise management backend.
#[derive(Debug)]
pub struct InMemoryEnterpriseApi {
    entities: DashMap<String, Enterprise>,
    journal: Mutex<Vec<ApiCall>>,
    failures: Mutex<VecDeque<(CallKind, ApiError)>>,
    next_id: AtomicU64,
    actor: String,
}

impl InMemoryEnterpriseApi {
    /// Creates an empty backend that hands out `ent-1`, `ent-2`, ...
    pub fn new() -> Self {
        Self {
            entities: DashMap::new(),
            journal: Mutex::new(Vec::new()),
            failures: Mutex::new(VecDeque::new()),
            next_id: AtomicU64::new(1),
            actor: "IBMid-SYSTEM0000".to_string(),
        }
    }

    /// Starts ID assignment at `ent-{first}`.
    pub fn starting_at(self, first: u64) -> Self {
        self.next_id.store(first, Ordering::SeqCst);
        self
    }

    /// IAM ID recorded in `created_by` / `updated_by`.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    /// Wraps the backend in a shared handle usable as a [`ClientSession`].
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Stores `enterprise` as if it had been created out of band.
    pub fn insert(&self, id: impl Into<String>, mut enterprise: Enterprise) {
        let id = id.into();
        enterprise.id = Some(id.clone());
        self.entities.insert(id, enterprise);
    }

    /// Deletes an enterprise out of band. Returns whether it existed.
    pub fn remove(&self, id: &str) -> bool {
        self.entities.remove(id).is_some()
    }

    /// Applies `f` to a stored enterprise. Returns whether it existed.
    pub fn modify<F: FnOnce(&mut Enterprise)>(&self, id: &str, f: F) -> bool {
        match self.entities.get_mut(id) {
            Some(mut entry) => {
                f(entry.value_mut());
                true
            }
            None => false,
        }
    }

    /// A copy of a stored enterprise, bypassing the journal.
    pub fn snapshot(&self, id: &str) -> Option<Enterprise> {
        self.entities.get(id).map(|e| e.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Makes the next call of `kind` fail with `error`.
    pub async fn fail_next(&self, kind: CallKind, error: ApiError) {
        self.failures.lock().await.push_back((kind, error));
    }

    /// Every call received so far, oldest first.
    pub async fn calls(&self) -> Vec<ApiCall> {
        self.journal.lock().await.clone()
    }

    /// Calls of one kind received so far.
    pub async fn calls_of(&self, kind: CallKind) -> Vec<ApiCall> {
        self.journal
            .lock()
            .await
            .iter()
            .filter(|c| c.kind() == kind)
            .cloned()
            .collect()
    }

    /// The update requests received so far.
    pub async fn update_requests(&self) -> Vec<UpdateEnterpriseRequest> {
        self.journal
            .lock()
            .await
            .iter()
            .filter_map(|c| match c {
                ApiCall::Update(_, req) => Some(req.clone()),
                _ => None,
            })
            .collect()
    }

    pub async fn clear_journal(&self) {
        self.journal.lock().await.clear();
    }

    async fn record(&self, call: ApiCall) -> Result<(), ApiError> {
        let kind = call.kind();
        self.journal.lock().await.push(call);
        let mut failures = self.failures.lock().await;
        let position = failures.iter().position(|(k, _)| *k == kind);
        match position.and_then(|pos| failures.remove(pos)) {
            Some((_, error)) => Err(error),
            None => Ok(()),
        }
    }

    fn allocate_id(&self) -> String {
        format!("ent-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for InMemoryEnterpriseApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EnterpriseManagementApi for InMemoryEnterpriseApi {
    async fn create_enterprise(
        &self,
        request: &CreateEnterpriseRequest,
    ) -> Result<CreateEnterpriseResponse, ApiError> {
        self.record(ApiCall::Create(request.clone())).await?;

        let id = self.allocate_id();
        let account_id = uuid::Uuid::new_v4().simple().to_string();
        let now = now_utc().to_string();
        let enterprise = Enterprise {
            id: Some(id.clone()),
            url: Some(format!("/v1/enterprises/{id}")),
            enterprise_account_id: Some(account_id.clone()),
            crn: Some(format!(
                "crn:v1:bluemix:public:enterprise::a/{account_id}::enterprise:{id}"
            )),
            name: Some(request.name.clone()),
            domain: request.domain.clone(),
            state: Some("active".to_string()),
            primary_contact_iam_id: Some(request.primary_contact_iam_id.clone()),
            primary_contact_email: Some(format!(
                "{}@example.com",
                request.primary_contact_iam_id.to_lowercase()
            )),
            created_at: Some(now.clone()),
            created_by: Some(self.actor.clone()),
            updated_at: Some(now),
            updated_by: Some(self.actor.clone()),
        };
        self.entities.insert(id.clone(), enterprise);
        tracing::trace!(%id, "in-memory enterprise created");

        Ok(CreateEnterpriseResponse {
            enterprise_id: id,
            enterprise_account_id: Some(account_id),
        })
    }

    async fn get_enterprise(&self, id: &str) -> Result<Option<Enterprise>, ApiError> {
        self.record(ApiCall::Get(id.to_string())).await?;
        Ok(self.snapshot(id))
    }

    async fn update_enterprise(
        &self,
        id: &str,
        request: &UpdateEnterpriseRequest,
    ) -> Result<(), ApiError> {
        self.record(ApiCall::Update(id.to_string(), request.clone()))
            .await?;

        let actor = self.actor.clone();
        let updated = self.modify(id, |e| {
            if let Some(name) = &request.name {
                e.name = Some(name.clone());
            }
            if let Some(domain) = &request.domain {
                e.domain = Some(domain.clone());
            }
            if let Some(iam_id) = &request.primary_contact_iam_id {
                e.primary_contact_iam_id = Some(iam_id.clone());
                e.primary_contact_email = Some(format!("{}@example.com", iam_id.to_lowercase()));
            }
            e.updated_at = Some(now_utc().to_string());
            e.updated_by = Some(actor);
        });
        if updated {
            Ok(())
        } else {
            Err(ApiError::not_found(id))
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

impl ClientSession for Arc<InMemoryEnterpriseApi> {
    fn enterprise_management(&self) -> Result<DynEnterpriseApi, ClientUnavailable> {
        Ok(Arc::clone(self) as DynEnterpriseApi)
    }
}
