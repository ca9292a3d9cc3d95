//! fakexy CLI library: argument definitions, terminal rendering and commands.

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod error;
pub mod table;
pub mod terminal;

pub use cli::{Cli, Commands, OutputArgs};
pub use error::CliError;
