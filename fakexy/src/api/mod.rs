//! Client and types for the fakexy address API.

pub mod client;
pub mod error;
pub mod types;

pub use client::{AddressRequest, ApiClient, DEFAULT_API_BASE};
pub use error::{ClientError, ErrorKind};
pub use types::{ApiStatus, Country, CountryList};
