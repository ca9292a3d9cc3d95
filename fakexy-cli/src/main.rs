//! fakexy CLI - generate fake addresses from the command line.
//!
//! Commands:
//! - `fakexy countries`: List supported countries
//! - `fakexy random`: Generate an address for a random country
//! - `fakexy address <code>`: Generate an address for a country
//! - `fakexy status`: Check whether the API is reachable
//!
//! Environment variables:
//! - FAKEXY_BASE_URL: Override the API base URL
//! - FAKEXY_TIMEOUT_SECS: Request timeout in seconds
//! - FAKEXY_USER_AGENT: User agent sent with requests
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fakexy::{AddressRequest, ApiClient, ConfigOverrides, ConfigProvider, FakexyConfig};
use fakexy_cli::commands::{countries, fetch, status};
use fakexy_cli::{Cli, CliError, Commands};

/// Map a command result to an exit code, printing errors not yet shown.
fn handle_result(result: Result<(), CliError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            if e.needs_report() {
                eprintln!("Error: {}", e);
            }
            1
        }
    }
}

fn load_config(cli: &Cli) -> Result<FakexyConfig, CliError> {
    let mut provider = ConfigProvider::new().with_overrides(ConfigOverrides {
        base_url: cli.base_url.clone(),
        timeout_secs: None,
    });
    if let Some(path) = &cli.config {
        provider = provider.with_file(path);
    }
    Ok(provider.load()?)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let client = ApiClient::new(&config)?;

    match cli.command {
        Commands::Countries { json } => countries::run_countries(&client, json).await,
        Commands::Random { output } => {
            fetch::run_fetch(&client, config.field_order, AddressRequest::Random, &output).await
        }
        Commands::Address { code, output } => {
            fetch::run_fetch(
                &client,
                config.field_order,
                AddressRequest::Country(code),
                &output,
            )
            .await
        }
        Commands::Status => status::run_status(&client).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("fakexy=debug,fakexy_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = handle_result(run(cli).await);
    std::process::exit(exit_code);
}
