mod cli;
mod commands;
mod config;
mod logging;
mod output;
mod state;

use anyhow::Result;
use clap::Parser;
use entmgr_client::{ClientConfig, ClientSession, HttpClientSession, UnavailableSession};

use cli::{Cli, Commands, ConfigCommands};
use output::print_error;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);
    let profile = &cli.profile;
    let format = cli.format.unwrap_or_default();

    match &cli.command {
        Commands::Schema => commands::resource::schema(format)?,
        Commands::Validate(args) => commands::resource::validate(args)?,
        Commands::Config(args) => match &args.command {
            ConfigCommands::Show => commands::config::show(profile)?,
            ConfigCommands::Set(set) => commands::config::set(profile, &set.key, &set.value)?,
        },
        Commands::Create(args) => {
            let session = make_session(&cli)?;
            commands::resource::create(session.as_ref(), args, format).await?;
        }
        Commands::Read(args) => {
            let session = make_session(&cli)?;
            commands::resource::read(session.as_ref(), args, format).await?;
        }
        Commands::Update(args) => {
            let session = make_session(&cli)?;
            commands::resource::update(session.as_ref(), args, format).await?;
        }
        Commands::Delete(args) => commands::resource::delete(args).await?,
        Commands::Import(args) => {
            let session = make_session(&cli)?;
            commands::resource::import(session.as_ref(), args, format).await?;
        }
    }

    Ok(())
}

/// Builds the session operations get their client from. A bad endpoint is
/// reported by the operation that needs the client, like a missing token.
fn make_session(cli: &Cli) -> Result<Box<dyn ClientSession>> {
    let profile = config::load_profile(&config::config_path()?, &cli.profile)?;
    let conn = config::resolve_connection(cli.endpoint.as_deref(), cli.token.as_deref(), &profile);
    tracing::debug!(endpoint = %conn.endpoint, profile = %cli.profile, "Resolved connection");

    let mut client_config = match ClientConfig::new(&conn.endpoint) {
        Ok(c) => c,
        Err(e) => return Ok(Box::new(UnavailableSession::new(e.reason))),
    };
    if let Some(token) = conn.token {
        client_config = client_config.with_token(token);
    }
    if let Some(timeout) = conn.timeout {
        client_config = client_config.with_timeout(timeout);
    }
    Ok(Box::new(HttpClientSession::new(client_config)))
}
