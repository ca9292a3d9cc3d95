//! Render pipeline: records in, render-target calls out.
//!
//! A [`RenderTarget`] is whatever shows fields to the user (a terminal, a
//! web page, a test recorder). The functions here decide *what* to show;
//! targets only decide *how*.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, error};

use crate::api::ClientError;
use crate::copy::to_copy_text;
use crate::order::{order, DisplayList, FieldId, PreferredOrder};
use crate::record::AddressRecord;

/// Number of placeholder rows shown while a request is in flight.
pub const SKELETON_PLACEHOLDERS: usize = 8;

/// Text shown in place of fields when a record is empty or missing.
pub const NO_DATA_MESSAGE: &str = "No address data found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
}

/// A short-lived notification (the "toast").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// A surface that can display address fields.
pub trait RenderTarget {
    /// A request is in flight; show `placeholders` skeleton rows.
    fn loading(&mut self, placeholders: usize);

    /// Show the ordered fields of a record. Never called with an empty list.
    fn fields(&mut self, list: &DisplayList);

    /// The server substituted a different country than requested.
    fn suggestion(&mut self, suggestion: &str);

    /// There is nothing to show.
    fn no_data(&mut self);

    /// Show an inline error in place of the fields.
    fn error(&mut self, message: &str);

    fn notify(&mut self, notice: Notice);
}

/// Outcome of [`render_record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Fields(DisplayList),
    NoData,
}

impl Rendered {
    pub fn list(&self) -> Option<&DisplayList> {
        match self {
            Rendered::Fields(list) => Some(list),
            Rendered::NoData => None,
        }
    }
}

/// Render a record, or the "no data" indication when it is absent or empty.
pub fn render_record<T: RenderTarget + ?Sized>(
    target: &mut T,
    record: Option<&AddressRecord>,
    preferred: &PreferredOrder,
) -> Rendered {
    let Some(record) = record.filter(|r| !r.is_empty()) else {
        debug!("Nothing to render");
        target.no_data();
        return Rendered::NoData;
    };

    let list = order(record, preferred);
    debug!("Rendering {} fields", list.len());
    target.fields(&list);
    Rendered::Fields(list)
}

/// Report a failed fetch inline. The UI stays usable; nothing is retried.
pub fn render_failure<T: RenderTarget + ?Sized>(target: &mut T, err: &ClientError) {
    error!("Error fetching address: {}", err);
    target.error(&err.user_message());
}

/// Errors from copy actions.
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("no such field: {0}")]
    NoSuchField(String),
}

/// Destination of copy actions.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Identifies one displayed field, by position or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelector {
    Id(FieldId),
    Name(String),
}

impl From<&str> for FieldSelector {
    /// `field-<n>` selects by position, anything else by name.
    fn from(s: &str) -> Self {
        match s.parse::<FieldId>() {
            Ok(id) => FieldSelector::Id(id),
            Err(_) => FieldSelector::Name(s.to_string()),
        }
    }
}

impl FromStr for FieldSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FieldSelector::from(s))
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSelector::Id(id) => write!(f, "{id}"),
            FieldSelector::Name(name) => f.write_str(name),
        }
    }
}

/// Copy one field's value and announce it.
pub fn copy_field<C, T>(
    clipboard: &mut C,
    target: &mut T,
    list: &DisplayList,
    selector: &FieldSelector,
) -> Result<(), ClipboardError>
where
    C: Clipboard + ?Sized,
    T: RenderTarget + ?Sized,
{
    let entry = match selector {
        FieldSelector::Id(id) => list.get(*id),
        FieldSelector::Name(name) => list.find(name),
    }
    .ok_or_else(|| ClipboardError::NoSuchField(selector.to_string()))?;

    clipboard.set_text(&entry.value)?;
    target.notify(Notice::success(format!("Copied {}!", entry.key)));
    Ok(())
}

/// Copy every field of the current record as `key: value` lines.
///
/// With no current record this only warns; the clipboard is left untouched.
pub fn copy_all<C, T>(
    clipboard: &mut C,
    target: &mut T,
    current: Option<&AddressRecord>,
    preferred: &PreferredOrder,
) -> Result<(), ClipboardError>
where
    C: Clipboard + ?Sized,
    T: RenderTarget + ?Sized,
{
    let Some(record) = current.filter(|r| !r.is_empty()) else {
        target.notify(Notice::warning("No data to copy!"));
        return Ok(());
    };

    let text = to_copy_text(&order(record, preferred));
    clipboard.set_text(&text)?;
    target.notify(Notice::success("All fields copied!"));
    Ok(())
}
