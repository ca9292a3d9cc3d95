//! Field ordering for display and copy.
//!
//! Known fields come first, in a curated order. Anything else the API sends
//! follows in the order it arrived. Every field of a record appears exactly
//! once in the result, so new upstream fields are shown rather than dropped.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::{value_to_text, AddressRecord};

/// Curated display priority for the fields the API is known to return.
pub const DEFAULT_FIELD_ORDER: [&str; 17] = [
    "Street",
    "City/Town",
    "State/Province/Region",
    "Zip/Postal Code",
    "Country",
    "Country_Code",
    "Latitude",
    "Longitude",
    "Full Name",
    "Gender",
    "Birthday",
    "Phone Number",
    "Credit card brand",
    "Credit card number",
    "Expire",
    "CVV",
    "Social Security Number",
];

/// An immutable, ordered list of preferred field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferredOrder {
    names: Vec<String>,
}

impl PreferredOrder {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

impl Default for PreferredOrder {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD_ORDER)
    }
}

/// Positional identifier of a displayed field, rendered as `field-<index>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct FieldId(usize);

impl FieldId {
    const PREFIX: &'static str = "field-";

    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for FieldId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(Self::PREFIX)
            .and_then(|n| n.parse::<usize>().ok())
            .map(FieldId)
            .ok_or_else(|| format!("not a field id: {s}"))
    }
}

impl From<FieldId> for String {
    fn from(id: FieldId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for FieldId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One row of the display list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayEntry {
    pub id: FieldId,
    pub key: String,
    pub value: String,
}

/// The ordered fields of one record, ready for a render target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayList {
    entries: Vec<DisplayEntry>,
}

impl DisplayList {
    fn push(&mut self, key: &str, value: String) {
        let id = FieldId::new(self.entries.len());
        self.entries.push(DisplayEntry {
            id,
            key: key.to_string(),
            value,
        });
    }

    pub fn entries(&self) -> &[DisplayEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DisplayEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: FieldId) -> Option<&DisplayEntry> {
        self.entries.get(id.index())
    }

    /// Look up an entry by field name.
    pub fn find(&self, key: &str) -> Option<&DisplayEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// The `(key, value)` pairs in display order.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.value.as_str()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DisplayEntry;
    type IntoIter = std::slice::Iter<'a, DisplayEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Order a record's fields for display.
///
/// Fields named in `preferred` come first, in that order; the remaining
/// fields follow in the record's own order.
pub fn order(record: &AddressRecord, preferred: &PreferredOrder) -> DisplayList {
    let mut list = DisplayList::default();
    let mut consumed: HashSet<&str> = HashSet::with_capacity(record.len());

    for name in preferred.names() {
        if consumed.contains(name.as_str()) {
            continue;
        }
        if let Some(value) = record.get(name) {
            list.push(name, value_to_text(value));
            consumed.insert(name.as_str());
        }
    }

    for (key, value) in record.iter() {
        if !consumed.contains(key) {
            list.push(key, value_to_text(value));
        }
    }

    list
}
