use std::future::Future;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use entmgr_client::ClientSession;
use entmgr_resource::{
    DeclaredEnterprise, EnterpriseRecord, EnterpriseResource, ReadOutcome, ResourceBinding,
};

use crate::cli::{ApplyArgs, DeclaredArgs, ImportArgs, OutputFormat, StateArgs};
use crate::output::{print_record, print_schema, print_success, print_warning};
use crate::state::{load_declared, load_record, save_record};

/// Runs `operation` within the descriptor's time budget for it.
async fn within<T, F>(operation: &str, budget: Duration, fut: F) -> Result<T>
where
    F: Future<Output = entmgr_resource::ReconcileResult<T>>,
{
    tokio::time::timeout(budget, fut)
        .await
        .map_err(|_| anyhow::anyhow!("{operation} timed out after {}s", budget.as_secs()))?
        .with_context(|| format!("{operation} failed"))
}

/// Loads and validates a declaration.
fn load_valid_declaration(
    binding: &EnterpriseResource,
    args: &DeclaredArgs,
) -> Result<DeclaredEnterprise> {
    let declared = load_declared(&args.config)?;
    binding
        .descriptor()
        .validate(&declared)
        .with_context(|| format!("Invalid declaration: {}", args.config.display()))?;
    Ok(declared)
}

pub fn schema(format: OutputFormat) -> Result<()> {
    print_schema(EnterpriseResource::new().descriptor(), format)
}

pub fn validate(args: &DeclaredArgs) -> Result<()> {
    load_valid_declaration(&EnterpriseResource::new(), args)?;
    print_success(&format!("{} is valid", args.config.display()));
    Ok(())
}

pub async fn create(
    session: &dyn ClientSession,
    args: &ApplyArgs,
    format: OutputFormat,
) -> Result<()> {
    let binding = EnterpriseResource::new();
    let declared = load_valid_declaration(&binding, &args.declared)?;
    let mut record = load_record(&args.state.state)?;

    let timeouts = binding.descriptor().timeouts;
    let result = within(
        "create",
        timeouts.create,
        binding.create(&declared, &mut record, session),
    )
    .await;
    // A failed follow-up read still leaves an identifier worth keeping.
    persist(&args.state.state, &record)?;
    let id = result?;

    print_success(&format!("Created enterprise {}", id.cyan()));
    print_record(&record, binding.descriptor(), format)
}

pub async fn read(
    session: &dyn ClientSession,
    args: &StateArgs,
    format: OutputFormat,
) -> Result<()> {
    let binding = EnterpriseResource::new();
    let mut record = load_record(&args.state)?;
    let id = record.id().unwrap_or_default().to_string();

    let timeouts = binding.descriptor().timeouts;
    let outcome = within("read", timeouts.update, binding.read(&mut record, session)).await?;
    save_record(&args.state, &record)?;

    match outcome {
        ReadOutcome::Refreshed => print_record(&record, binding.descriptor(), format),
        ReadOutcome::Absent => {
            print_warning(&format!(
                "Enterprise {} no longer exists; removed from {}",
                id.cyan(),
                args.state.display()
            ));
            Ok(())
        }
    }
}

pub async fn update(
    session: &dyn ClientSession,
    args: &ApplyArgs,
    format: OutputFormat,
) -> Result<()> {
    let binding = EnterpriseResource::new();
    let declared = load_valid_declaration(&binding, &args.declared)?;
    let mut record = load_record(&args.state.state)?;

    let changed = binding.descriptor().immutable_changes(&declared, &record);
    if !changed.is_empty() {
        anyhow::bail!(
            "Cannot change immutable attribute(s) {}; the enterprise would have to be replaced",
            changed.join(", ")
        );
    }

    let timeouts = binding.descriptor().timeouts;
    within(
        "update",
        timeouts.update,
        binding.update(&declared, &mut record, session),
    )
    .await?;
    save_record(&args.state.state, &record)?;

    match record.id() {
        Some(id) => {
            print_success(&format!("Updated enterprise {}", id.cyan()));
            print_record(&record, binding.descriptor(), format)
        }
        None => {
            print_warning("Enterprise no longer exists; removed from state");
            Ok(())
        }
    }
}

pub async fn delete(args: &StateArgs) -> Result<()> {
    let binding = EnterpriseResource::new();
    let mut record = load_record(&args.state)?;
    let id = record.id().unwrap_or_default().to_string();

    let timeouts = binding.descriptor().timeouts;
    within("delete", timeouts.delete, binding.delete(&mut record)).await?;
    save_record(&args.state, &record)?;

    print_success(&format!(
        "Enterprise {} is no longer managed; it still exists remotely",
        id.cyan()
    ));
    Ok(())
}

pub async fn import(
    session: &dyn ClientSession,
    args: &ImportArgs,
    format: OutputFormat,
) -> Result<()> {
    let binding = EnterpriseResource::new();
    let mut record = load_record(&args.state.state)?;

    let timeouts = binding.descriptor().timeouts;
    within(
        "import",
        timeouts.update,
        binding.import(&args.id, &mut record, session),
    )
    .await?;
    save_record(&args.state.state, &record)?;

    print_success(&format!("Imported enterprise {}", args.id.cyan()));
    print_record(&record, binding.descriptor(), format)
}

fn persist(path: &Path, record: &EnterpriseRecord) -> Result<()> {
    if record.is_present() {
        save_record(path, record)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;

    use entmgr_client::{ApiError, CallKind, InMemoryEnterpriseApi};
    use entmgr_core::OptionalValue;

    const ACME: &str = r#"
source_account_id = "acc-1"
name = "Acme Corp"
primary_contact_iam_id = "IBMid-AB12CD34EF"
domain = "acme.com"
"#;

    struct Workspace {
        _dir: tempfile::TempDir,
        declared: PathBuf,
        state: PathBuf,
    }

    impl Workspace {
        fn new(declaration: &str) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let declared = dir.path().join("acme.toml");
            fs::write(&declared, declaration).unwrap();
            let state = dir.path().join("acme.state.json");
            Self {
                _dir: dir,
                declared,
                state,
            }
        }

        fn apply_args(&self) -> ApplyArgs {
            ApplyArgs {
                declared: DeclaredArgs {
                    config: self.declared.clone(),
                },
                state: self.state_args(),
            }
        }

        fn state_args(&self) -> StateArgs {
            StateArgs {
                state: self.state.clone(),
            }
        }
    }

    #[tokio::test]
    async fn test_create_update_delete_cycle() {
        let api = InMemoryEnterpriseApi::new().starting_at(123).into_shared();
        let ws = Workspace::new(ACME);

        create(&api, &ws.apply_args(), OutputFormat::Json)
            .await
            .unwrap();
        let record = load_record(&ws.state).unwrap();
        assert_eq!(record.id(), Some("ent-123"));

        fs::write(&ws.declared, ACME.replace("acme.com", "sub.acme.com")).unwrap();
        update(&api, &ws.apply_args(), OutputFormat::Table)
            .await
            .unwrap();
        let record = load_record(&ws.state).unwrap();
        assert_eq!(record.domain, OptionalValue::Set("sub.acme.com".into()));

        delete(&ws.state_args()).await.unwrap();
        assert!(!load_record(&ws.state).unwrap().is_present());
        assert_eq!(api.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_declaration_makes_no_call() {
        let api = InMemoryEnterpriseApi::new().into_shared();
        let ws = Workspace::new(&ACME.replace("IBMid-AB12CD34EF", "someone@example.com"));

        let err = create(&api, &ws.apply_args(), OutputFormat::Json)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("primary_contact_iam_id"));
        assert!(api.calls().await.is_empty());
        assert!(!ws.state.exists());
    }

    #[tokio::test]
    async fn test_update_refuses_immutable_change() {
        let api = InMemoryEnterpriseApi::new().into_shared();
        let ws = Workspace::new(ACME);
        create(&api, &ws.apply_args(), OutputFormat::Json)
            .await
            .unwrap();
        api.clear_journal().await;

        fs::write(&ws.declared, ACME.replace("acc-1", "acc-2")).unwrap();
        let err = update(&api, &ws.apply_args(), OutputFormat::Json)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("source_account_id"));
        assert!(api.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_keeps_state_when_follow_up_read_fails() {
        let api: Arc<InMemoryEnterpriseApi> = InMemoryEnterpriseApi::new().into_shared();
        api.fail_next(CallKind::Get, ApiError::transport("connection reset"))
            .await;
        let ws = Workspace::new(ACME);

        assert!(
            create(&api, &ws.apply_args(), OutputFormat::Json)
                .await
                .is_err()
        );
        assert_eq!(load_record(&ws.state).unwrap().id(), Some("ent-1"));
    }

    #[tokio::test]
    async fn test_read_of_vanished_enterprise_clears_state() {
        let api = InMemoryEnterpriseApi::new().into_shared();
        let ws = Workspace::new(ACME);
        create(&api, &ws.apply_args(), OutputFormat::Json)
            .await
            .unwrap();
        api.remove("ent-1");

        read(&api, &ws.state_args(), OutputFormat::Json)
            .await
            .unwrap();
        assert!(!load_record(&ws.state).unwrap().is_present());
    }
}
