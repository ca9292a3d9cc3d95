//! Tables for address fields and the country list.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use fakexy::{CountryList, DisplayList};

/// Columns assumed when stdout has no terminal size (piped output).
const FALLBACK_WIDTH: u16 = 120;

/// Empty table that wraps long values (card numbers, street lines) to the
/// terminal instead of overflowing it.
fn new_table() -> Table {
    let width = crossterm::terminal::size()
        .map(|(columns, _)| columns)
        .unwrap_or(FALLBACK_WIDTH);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width);
    table
}

/// One row per field: id, label, value.
pub fn field_table(list: &DisplayList) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Id", "Field", "Value"]);
    for entry in list {
        table.add_row(vec![entry.id.to_string(), entry.key.clone(), entry.value.clone()]);
    }
    table
}

pub fn country_table(countries: &CountryList) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Country", "Code"]);
    for country in countries {
        table.add_row(vec![country.name.clone(), country.code.clone()]);
    }
    table
}
