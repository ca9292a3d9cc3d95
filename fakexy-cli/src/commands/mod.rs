//! Command implementations.

pub mod countries;
pub mod fetch;
pub mod status;
