//! # fakexy
//!
//! Client library for the fakexy fake-address API.
//!
//! The API returns loosely structured records: a mapping of field name to
//! value whose keys change without notice. This crate fetches those records
//! and lays their fields out in a stable, human-friendly order:
//!
//! - fields named in a [`PreferredOrder`] come first, in that order
//! - everything else follows in the order the server sent it
//! - no field is ever dropped or duplicated
//!
//! The same [`DisplayList`] drives on-screen rendering (through the
//! [`RenderTarget`] trait) and the "copy all" text produced by
//! [`to_copy_text`].
//!
//! ```no_run
//! use fakexy::{ApiClient, AddressRequest, FakexyConfig, Session};
//! # async fn run(target: &mut dyn fakexy::RenderTarget) -> Result<(), fakexy::ClientError> {
//! let config = FakexyConfig::default();
//! let client = ApiClient::new(&config)?;
//! let mut session = Session::new(config.field_order.clone());
//!
//! session.load(&client, &AddressRequest::Country("FR".into()), target).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod copy;
pub mod order;
pub mod record;
pub mod render;
pub mod session;

pub use api::{AddressRequest, ApiClient, ApiStatus, ClientError, Country, CountryList, ErrorKind};
pub use config::{ConfigError, ConfigOverrides, ConfigProvider, FakexyConfig};
pub use copy::{parse_copy_text, to_copy_text};
pub use order::{order, DisplayEntry, DisplayList, FieldId, PreferredOrder, DEFAULT_FIELD_ORDER};
pub use record::{value_to_text, AddressRecord, FetchedAddress};
pub use render::{
    copy_all, copy_field, render_failure, render_record, Clipboard, ClipboardError,
    FieldSelector, Notice, NoticeLevel, RenderTarget, Rendered, NO_DATA_MESSAGE,
    SKELETON_PLACEHOLDERS,
};
pub use session::{Completion, FetchTicket, Session, StalePolicy};
