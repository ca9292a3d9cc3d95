//! fakexy countries - list supported countries.

use std::io::Write;

use fakexy::ApiClient;
use tracing::error;

use crate::error::CliError;
use crate::table;

/// Shown in place of the country list when it cannot be loaded.
pub const COUNTRIES_UNAVAILABLE: &str = "Failed to load countries. API Offline.";

/// Run the countries command.
pub async fn run_countries(client: &ApiClient, json: bool) -> Result<(), CliError> {
    let countries = match client.countries().await {
        Ok(countries) => countries,
        Err(e) => {
            error!("Error fetching countries: {}", e);
            eprintln!("{COUNTRIES_UNAVAILABLE}");
            return Err(CliError::Reported);
        }
    };

    let mut out = std::io::stdout().lock();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&countries)?)?;
        return Ok(());
    }

    writeln!(out, "{} countries available\n", countries.len())?;
    writeln!(out, "{}", table::country_table(&countries))?;
    writeln!(out, "\nRun 'fakexy address <CODE>' to generate an address.")?;
    Ok(())
}
