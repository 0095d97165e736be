//! Declaration and state files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use entmgr_resource::{DeclaredEnterprise, EnterpriseRecord};

pub fn load_declared(path: &Path) -> Result<DeclaredEnterprise> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read declaration: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid declaration: {}", path.display()))
}

/// A missing state file is an absent enterprise.
pub fn load_record(path: &Path) -> Result<EnterpriseRecord> {
    if !path.exists() {
        return Ok(EnterpriseRecord::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read state: {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid state: {}", path.display()))
}

pub fn save_record(path: &Path, record: &EnterpriseRecord) -> Result<()> {
    let content = serde_json::to_string_pretty(record)?;
    fs::write(path, content + "\n")
        .with_context(|| format!("Failed to write state: {}", path.display()))
}
