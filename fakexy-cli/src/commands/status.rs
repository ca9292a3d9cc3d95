//! fakexy status - the API status indicator.

use std::io;

use colored::Colorize;
use fakexy::{ApiClient, ApiStatus};

use crate::error::CliError;
use crate::terminal::use_color;

/// Format the status line, e.g. `● online (249 countries)`.
pub fn status_line(status: &ApiStatus, color: bool) -> String {
    let (dot, text) = match status {
        ApiStatus::Online { countries } => ("●".green(), format!("online ({countries} countries)")),
        ApiStatus::Offline { reason } => ("●".red(), format!("offline: {reason}")),
    };
    if color {
        format!("{dot} {text}")
    } else {
        format!("● {text}")
    }
}

/// Run the status command. Exits non-zero when the API is offline.
pub async fn run_status(client: &ApiClient) -> Result<(), CliError> {
    let status = client.status().await;
    println!("{}", status_line(&status, use_color(&io::stdout())));
    if status.is_online() {
        Ok(())
    } else {
        Err(CliError::Reported)
    }
}
