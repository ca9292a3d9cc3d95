//! CLI definition for the fakexy command-line interface.
//!
//! Only depends on `clap` and `std`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// fakexy - generate fake addresses from the command line.
///
/// Fetches generated addresses from the fakexy API and prints them with
/// known fields first (street, city, region, postal code, ...) and any
/// other fields the API returns after them.
#[derive(Parser, Debug)]
#[command(name = "fakexy")]
#[command(version)]
#[command(about = "Generate fake addresses from the fakexy API")]
#[command(
    long_about = "Generate fake addresses from the fakexy API.\n\n\
    Configuration is read from ~/.fakexy/config.{toml,yaml,yml,json} and \
    ./.fakexy/config.{toml,yaml,yml,json}.\n\n\
    Environment variables:\n  \
    FAKEXY_BASE_URL      Override the API base URL\n  \
    FAKEXY_TIMEOUT_SECS  Request timeout in seconds\n  \
    FAKEXY_USER_AGENT    User agent sent with requests"
)]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// API base URL (overrides config and environment)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Read configuration from this file as well
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the countries the API can generate addresses for
    Countries {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate an address for a random country
    Random {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate an address for a country code (e.g. US, FR)
    Address {
        /// Country code
        code: String,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Check whether the API is reachable
    Status,
}

/// How to present a generated address.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputArgs {
    /// Output as a JSON array of {id, key, value}
    #[arg(long, conflicts_with = "plain")]
    pub json: bool,

    /// Output as "key: value" lines
    #[arg(long)]
    pub plain: bool,

    /// Copy all fields to the clipboard as "key: value" lines
    #[arg(long)]
    pub copy_all: bool,

    /// Copy one field to the clipboard, by name or by id (field-N)
    #[arg(long, value_name = "FIELD", conflicts_with = "copy_all")]
    pub copy: Option<String>,
}
