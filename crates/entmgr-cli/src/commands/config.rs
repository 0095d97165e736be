use anyhow::Result;
use colored::Colorize;

use crate::config::{ProfileConfig, config_path, load_profile, save_profile};
use crate::output::print_success;

pub fn show(profile: &str) -> Result<()> {
    let path = config_path()?;
    let cfg = load_profile(&path, profile)?;
    println!("{}: {}", "Profile".cyan(), profile);
    println!(
        "{}: {}",
        "Endpoint".cyan(),
        cfg.endpoint.as_deref().unwrap_or("(not set)")
    );
    println!(
        "{}: {}",
        "Token".cyan(),
        if cfg.token.is_some() { "(set)" } else { "(not set)" }
    );
    println!(
        "{}: {}",
        "Timeout".cyan(),
        cfg.timeout_secs
            .map(|s| format!("{s}s"))
            .unwrap_or_else(|| "(not set)".to_string())
    );
    Ok(())
}

pub fn set(profile: &str, key: &str, value: &str) -> Result<()> {
    let path = config_path()?;
    let mut cfg: ProfileConfig = load_profile(&path, profile)?;
    cfg.set(key, value)?;
    save_profile(&path, profile, &cfg)?;
    let shown = if key == "token" { "<redacted>" } else { value };
    print_success(&format!("Set {key} = {shown}"));
    Ok(())
}
