use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "entmgr")]
#[command(about = "Manage enterprises through the enterprise management API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API endpoint (overrides config and ENTMGR_ENDPOINT env var)
    #[arg(short, long, global = true, env = "ENTMGR_ENDPOINT")]
    pub endpoint: Option<String>,

    /// API bearer token (overrides config)
    #[arg(long, global = true, env = "ENTMGR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Config profile name
    #[arg(short, long, global = true, env = "ENTMGR_PROFILE", default_value = "default")]
    pub profile: String,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the enterprise attribute schema
    Schema,
    /// Check a declaration without calling the API
    Validate(DeclaredArgs),
    /// Create an enterprise and record it in the state file
    Create(ApplyArgs),
    /// Refresh the state file from the API
    Read(StateArgs),
    /// Push changed attributes and refresh the state file
    Update(ApplyArgs),
    /// Stop managing an enterprise (the enterprise itself is kept)
    Delete(StateArgs),
    /// Adopt an existing enterprise into the state file
    Import(ImportArgs),
    /// Manage CLI configuration
    Config(ConfigArgs),
}

#[derive(clap::Args)]
pub struct DeclaredArgs {
    /// Path to the TOML declaration
    #[arg(short, long)]
    pub config: PathBuf,
}

#[derive(clap::Args)]
pub struct StateArgs {
    /// Path to the JSON state file
    #[arg(short, long, default_value = "enterprise.state.json")]
    pub state: PathBuf,
}

#[derive(clap::Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub declared: DeclaredArgs,
    #[command(flatten)]
    pub state: StateArgs,
}

#[derive(clap::Args)]
pub struct ImportArgs {
    /// Enterprise ID to adopt
    pub id: String,
    #[command(flatten)]
    pub state: StateArgs,
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current config
    Show,
    /// Set config value
    Set(ConfigSetArgs),
}

#[derive(clap::Args)]
pub struct ConfigSetArgs {
    /// Key to set (endpoint, token, timeout_secs)
    pub key: String,
    /// Value
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_update() {
        let cli = Cli::try_parse_from([
            "entmgr",
            "update",
            "--config",
            "acme.toml",
            "--state",
            "acme.json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "debug");
        let Commands::Update(args) = cli.command else {
            panic!("expected update");
        };
        assert_eq!(args.declared.config, PathBuf::from("acme.toml"));
        assert_eq!(args.state.state, PathBuf::from("acme.json"));
    }

    #[test]
    fn test_state_path_default() {
        let cli = Cli::try_parse_from(["entmgr", "import", "ent-500"]).unwrap();
        let Commands::Import(args) = cli.command else {
            panic!("expected import");
        };
        assert_eq!(args.id, "ent-500");
        assert_eq!(args.state.state, PathBuf::from("enterprise.state.json"));
    }

    #[test]
    fn test_create_requires_config() {
        assert!(Cli::try_parse_from(["entmgr", "create"]).is_err());
    }
}
