//! "Copy all" text serialization.
//!
//! One `key: value` line per field, in display order, each line terminated
//! by `\n`. Line breaks inside a key or value are folded to a single space so
//! a field never spans two lines.

use crate::order::DisplayList;

const SEPARATOR: &str = ": ";

/// Serialize a display list as newline-delimited `key: value` lines.
pub fn to_copy_text(list: &DisplayList) -> String {
    let mut text = String::new();
    for entry in list {
        text.push_str(&single_line(&entry.key));
        text.push_str(SEPARATOR);
        text.push_str(&single_line(&entry.value));
        text.push('\n');
    }
    text
}

/// Parse copy text back into `(key, value)` pairs.
///
/// Blank lines and lines without a `": "` separator are skipped. The key is
/// everything before the first separator.
pub fn parse_copy_text(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.split_once(SEPARATOR))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn single_line(s: &str) -> String {
    if !s.contains(['\n', '\r']) {
        return s.to_string();
    }
    s.split(['\n', '\r'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{order, PreferredOrder};
    use crate::record::AddressRecord;

    fn list(pairs: &[(&str, &str)]) -> DisplayList {
        let record: AddressRecord = pairs.iter().map(|(k, v)| (*k, *v)).collect();
        order(&record, &PreferredOrder::default())
    }

    #[test]
    fn test_copy_text_follows_display_order() {
        let text = to_copy_text(&list(&[("Extra", "x"), ("Country", "FR"), ("Street", "1 Rue")]));
        assert_eq!(text, "Street: 1 Rue\nCountry: FR\nExtra: x\n");
    }

    #[test]
    fn test_empty_list_is_empty_text() {
        assert_eq!(to_copy_text(&DisplayList::default()), "");
    }

    #[test]
    fn test_parse_reconstructs_pairs() {
        let l = list(&[("Street", "1 Rue"), ("Phone Number", "+33 1 23"), ("Note", "a: b")]);
        let parsed = parse_copy_text(&to_copy_text(&l));
        let expected: Vec<(String, String)> = l
            .pairs()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_multiline_value_folds_to_one_line() {
        let text = to_copy_text(&list(&[("Street", "1 Rue\nApt 4\r\n")]));
        assert_eq!(text, "Street: 1 Rue Apt 4\n");
    }

    #[test]
    fn test_parse_skips_blank_and_malformed_lines() {
        let parsed = parse_copy_text("Street: 1 Rue\n\nnot a field\nCity/Town: Paris\n");
        assert_eq!(
            parsed,
            vec![
                ("Street".to_string(), "1 Rue".to_string()),
                ("City/Town".to_string(), "Paris".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_value_round_trips() {
        let parsed = parse_copy_text(&to_copy_text(&list(&[("CVV", "")])));
        assert_eq!(parsed, vec![("CVV".to_string(), String::new())]);
    }
}
