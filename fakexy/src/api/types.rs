//! API response types.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Entry of the `GET /api/countries` mapping (keyed by country code).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CountryInfo {
    pub name: String,
}

/// A country the API can generate addresses for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
}

impl Country {
    /// Label shown on the country selector, e.g. `France (FR)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

/// Supported countries, sorted by name for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountryList {
    countries: Vec<Country>,
}

impl CountryList {
    pub(crate) fn from_response(response: IndexMap<String, CountryInfo>) -> Self {
        response
            .into_iter()
            .map(|(code, info)| Country {
                code,
                name: info.name,
            })
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Country> {
        self.countries.iter()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Find a country by code, ignoring case.
    pub fn get(&self, code: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }
}

impl FromIterator<Country> for CountryList {
    fn from_iter<I: IntoIterator<Item = Country>>(iter: I) -> Self {
        let mut countries: Vec<Country> = iter.into_iter().collect();
        countries.sort_by(compare_by_name);
        Self { countries }
    }
}

impl<'a> IntoIterator for &'a CountryList {
    type Item = &'a Country;
    type IntoIter = std::slice::Iter<'a, Country>;

    fn into_iter(self) -> Self::IntoIter {
        self.countries.iter()
    }
}

fn compare_by_name(a: &Country, b: &Country) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.code.cmp(&b.code))
}

/// Reachability of the API, as shown by the status indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    Online { countries: usize },
    Offline { reason: String },
}

impl ApiStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, ApiStatus::Online { .. })
    }
}
