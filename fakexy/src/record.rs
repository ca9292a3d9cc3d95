//! Address records as returned by the fakexy API.
//!
//! A record is an open-ended mapping of field name to JSON value. The API
//! adds and drops fields without notice, so nothing here assumes a schema.
//! Field order is the order in which the server sent the keys.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One generated address/identity, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressRecord {
    fields: IndexMap<String, Value>,
}

impl AddressRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. Re-inserting an existing key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Get a field value coerced to display text.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.fields.get(key).map(value_to_text)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Field names in arrival order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AddressRecord
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = AddressRecord::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

/// Coerce a JSON value to the text shown in a field.
///
/// Strings are shown verbatim; everything else uses its compact JSON form
/// (`42`, `true`, `null`, `["a","b"]`).
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// An address fetched from the API, with the server's fuzzy-match hint if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedAddress {
    pub record: AddressRecord,
    /// Set when the server corrected the requested country (e.g. "Did you mean France?").
    pub suggestion: Option<String>,
}

impl FetchedAddress {
    /// Decode an address endpoint body.
    ///
    /// The body is either a bare record or a `{suggestion, address}` wrapper.
    /// The wrapper only applies when `suggestion` is truthy and `address` is
    /// present; a JSON `null` body or address decodes as an empty record.
    pub fn from_payload(payload: Value) -> Result<Self, serde_json::Error> {
        let mut body = match payload {
            Value::Object(body) => body,
            Value::Null => return Ok(Self::default()),
            other => {
                return Ok(Self {
                    record: serde_json::from_value(other)?,
                    suggestion: None,
                })
            }
        };

        let wrapped = body.get("suggestion").is_some_and(is_truthy);
        if !wrapped {
            return Ok(Self {
                record: serde_json::from_value(Value::Object(body))?,
                suggestion: None,
            });
        }

        let suggestion = match body.remove("suggestion") {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };
        let record = match body.remove("address") {
            None | Some(Value::Null) => AddressRecord::new(),
            Some(address) => serde_json::from_value(address)?,
        };

        Ok(Self { record, suggestion })
    }
}

/// JavaScript-style truthiness, which is what the API's clients key off.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
