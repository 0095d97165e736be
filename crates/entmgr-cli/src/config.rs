use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use entmgr_client::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};

pub const CONFIG_KEYS: &[&str] = &["endpoint", "token", "timeout_secs"];

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProfileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ProfileConfig {
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "endpoint" => self.endpoint = Some(value.to_string()),
            "token" => self.token = Some(value.to_string()),
            "timeout_secs" => {
                let secs = value
                    .parse()
                    .with_context(|| format!("timeout_secs must be a whole number, got {value}"))?;
                self.timeout_secs = Some(secs);
            }
            other => anyhow::bail!(
                "Unknown config key: {other}. Valid keys: {}",
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

pub type ConfigFile = BTreeMap<String, ProfileConfig>;

fn config_dir() -> Result<PathBuf> {
    let dir = dirs::home_dir()
        .context("Cannot determine home directory")?
        .join(".entmgr");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn load_all(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config: {}", path.display()))
}

pub fn load_profile(path: &Path, profile: &str) -> Result<ProfileConfig> {
    Ok(load_all(path)?.remove(profile).unwrap_or_default())
}

pub fn save_profile(path: &Path, profile: &str, config: &ProfileConfig) -> Result<()> {
    let mut all = load_all(path)?;
    all.insert(profile.to_string(), config.clone());
    let content = toml::to_string_pretty(&all)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(())
}

/// Where to reach the API and how to authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub endpoint: String,
    pub token: Option<String>,
    pub timeout: Option<Duration>,
}

/// Flag or env var first, then the profile, then the default endpoint.
/// The token has no default.
pub fn resolve_connection(
    cli_endpoint: Option<&str>,
    cli_token: Option<&str>,
    profile: &ProfileConfig,
) -> Connection {
    let endpoint = cli_endpoint
        .or(profile.endpoint.as_deref())
        .unwrap_or(DEFAULT_ENDPOINT)
        .to_string();
    let token = cli_token
        .or(profile.token.as_deref())
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    Connection {
        endpoint,
        token,
        timeout: profile.timeout_secs.map(Duration::from_secs),
    }
}
