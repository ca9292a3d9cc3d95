//! CLI error type.

use fakexy::{ClientError, ClipboardError, ConfigError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    /// The failure has already been shown to the user.
    #[error("command failed")]
    Reported,
}

impl CliError {
    /// Whether `main` still needs to print this error.
    pub fn needs_report(&self) -> bool {
        !matches!(self, CliError::Reported)
    }
}
