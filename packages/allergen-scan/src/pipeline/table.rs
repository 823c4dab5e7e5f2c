//! Structured table extraction.
//!
//! Reads allergen grids directly: find the allergen's column, keep rows whose
//! value says the allergen is absent, categorize by name.

use tracing::debug;

use crate::pipeline::normalize::normalize;
use crate::types::result::{ExtractionResult, ItemCategory};
use crate::types::table::AllergenTable;

/// Cell values (lowercased) that mean "does not contain".
pub const SAFE_VALUES: &[&str] = &["", "no", "none", "no major allergens present"];

/// Item names are assumed to be in the first column.
const NAME_COL: usize = 0;

/// Whether a normalized allergen cell marks the item as safe.
pub fn is_safe_value(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    SAFE_VALUES.contains(&value.as_str())
}

/// Index of the header cell naming `allergen`, case-insensitively.
pub fn find_allergen_column(headers: &[String], allergen: &str) -> Option<usize> {
    find_column_matching(headers, &[allergen])
}

/// Index of the header cell naming any of `terms`.
///
/// An exact (case-insensitive) header match wins over a partial match. A
/// partial match must start a word, so "fish" never matches "Shellfish".
pub fn find_column_matching(headers: &[String], terms: &[&str]) -> Option<usize> {
    let terms: Vec<String> = terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    if terms.is_empty() {
        return None;
    }

    let headers: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    headers
        .iter()
        .position(|h| terms.iter().any(|t| h == t))
        .or_else(|| {
            headers
                .iter()
                .position(|h| terms.iter().any(|t| starts_word_in(h, t)))
        })
}

/// Whether `term` occurs in `header` at the start of a word.
fn starts_word_in(header: &str, term: &str) -> bool {
    header.match_indices(term).any(|(at, _)| {
        header[..at]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric())
    })
}

/// Extract safe items for a single allergen column name.
pub fn extract_safe_items(tables: &[AllergenTable], allergen: &str) -> ExtractionResult {
    extract_safe_items_matching(tables, &[allergen])
}

/// Extract safe items, locating the allergen column by any of `terms`.
///
/// Tables with fewer than two rows, or without a matching header, contribute
/// nothing. Rows too short to reach the allergen column are skipped.
pub fn extract_safe_items_matching(tables: &[AllergenTable], terms: &[&str]) -> ExtractionResult {
    let mut result = ExtractionResult::new();

    for (index, table) in tables.iter().enumerate() {
        if table.len() < 2 {
            continue;
        }
        let Some(header) = table.header() else {
            continue;
        };
        let Some(allergen_col) = find_column_matching(header, terms) else {
            debug!(table = index, ?terms, "No allergen column, skipping table");
            continue;
        };

        let min_len = NAME_COL.max(allergen_col) + 1;
        for row in table.data_rows() {
            if row.len() < min_len {
                continue;
            }

            let name = normalize(Some(&row[NAME_COL]));
            let value = normalize(Some(&row[allergen_col]));

            if is_safe_value(&value) {
                result.push(ItemCategory::of(&name), &name);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::allergen::Allergen;
    use proptest::prelude::*;

    fn table(rows: &[&[&str]]) -> AllergenTable {
        AllergenTable::from_rows(rows.iter().map(|r| r.iter().copied()))
    }

    #[test]
    fn test_safe_values() {
        assert!(is_safe_value(""));
        assert!(is_safe_value("NO"));
        assert!(is_safe_value(" None "));
        assert!(is_safe_value("No Major Allergens Present"));
        assert!(!is_safe_value("Yes"));
        assert!(!is_safe_value("May Contain"));
        assert!(!is_safe_value("no*"));
    }

    #[test]
    fn test_milk_table_scenario() {
        let tables = vec![table(&[
            &["Item", "Milk"],
            &["Garden Salad", ""],
            &["Mac and Cheese", "Yes"],
            &["Ranch Dressing", "No"],
        ])];

        let result = extract_safe_items(&tables, "Milk");

        assert_eq!(result.full_items(), ["Garden Salad"]);
        assert_eq!(result.sub_items(), ["Ranch Dressing"]);
    }

    #[test]
    fn test_uses_allergen_column_not_first() {
        let tables = vec![table(&[
            &["Item", "Egg", "Milk"],
            &["Fries", "Yes", "No"],
            &["Cookie", "No", "Yes"],
        ])];

        let result = extract_safe_items(&tables, "milk");

        assert_eq!(result.sub_items(), ["Fries"]);
    }

    #[test]
    fn test_table_without_allergen_column_contributes_nothing() {
        let tables = vec![
            table(&[&["Item", "Egg"], &["Fries", ""]]),
            table(&[&["Item", "Milk"], &["Chili", "none"]]),
        ];

        let result = extract_safe_items(&tables, "Milk");

        assert_eq!(result.full_items(), ["Chili"]);
        assert!(result.sub_items().is_empty());
    }

    #[test]
    fn test_header_row_is_never_data() {
        let tables = vec![table(&[&["Item", "Milk"], &["Soda", ""]])];

        let result = extract_safe_items(&tables, "Milk");

        assert!(!result.contains("Item"));
        assert_eq!(result.sub_items(), ["Soda"]);
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let tables = vec![table(&[
            &["Item", "Egg", "Milk"],
            &["Lemonade", ""],
            &["Iced Tea", "", ""],
        ])];

        let result = extract_safe_items(&tables, "Milk");

        assert_eq!(result.sub_items(), ["Iced Tea"]);
    }

    #[test]
    fn test_tiny_tables_are_skipped() {
        let tables = vec![AllergenTable::default(), table(&[&["Item", "Milk"]])];

        assert!(extract_safe_items(&tables, "Milk").is_empty());
    }

    #[test]
    fn test_duplicates_across_tables_keep_first() {
        let tables = vec![
            table(&[&["Item", "Milk"], &["Salsa", ""], &["Rice", "no"]]),
            table(&[&["Name", "Milk (dairy)"], &["Salsa", "None"], &["Beans", ""]]),
        ];

        let result = extract_safe_items(&tables, "milk");

        assert_eq!(result.sub_items(), ["Salsa", "Rice", "Beans"]);
    }

    #[test]
    fn test_exact_header_beats_substring() {
        let headers: Vec<String> = ["Item", "Shellfish", "Fish"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(find_column_matching(&headers, &["fish"]), Some(2));
        assert_eq!(find_column_matching(&headers, &["shell"]), Some(1));
        assert_eq!(find_column_matching(&headers, &["soy"]), None);

        let no_fish: Vec<String> = ["Item", "Milk", "Shellfish"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(find_column_matching(&no_fish, &["fish"]), None);
        assert_eq!(find_column_matching(&no_fish, &["milk"]), Some(1));
    }

    #[test]
    fn test_fish_never_reads_shellfish_column() {
        let tables = vec![table(&[
            &["Item", "Milk", "Shellfish"],
            &["Salmon Bowl", "", ""],
        ])];

        let result = extract_safe_items_matching(&tables, Allergen::Fish.column_terms());

        assert!(result.is_empty());
    }

    #[test]
    fn test_partial_header_match_at_word_start() {
        let headers: Vec<String> = ["Menu Item", "Tree Nuts", "Milk/Dairy", "Crustacean Shellfish"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(find_column_matching(&headers, Allergen::TreeNut.column_terms()), Some(1));
        assert_eq!(find_column_matching(&headers, &["dairy"]), Some(2));
        assert_eq!(find_column_matching(&headers, Allergen::Shellfish.column_terms()), Some(3));
    }

    #[test]
    fn test_multiple_terms() {
        let headers: Vec<String> = ["Menu Item", "Gluten", "Soy"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(find_column_matching(&headers, &["wheat", "gluten"]), Some(1));
    }

    fn arb_cell() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("No".to_string()),
            Just("none".to_string()),
            Just("Yes".to_string()),
            Just("May Contain".to_string()),
            Just("No Major Allergens Present".to_string()),
        ]
    }

    fn arb_rows() -> impl Strategy<Value = Vec<(String, String)>> {
        prop::collection::vec(("[A-Z][a-z]{2,8}( Salad| Bowl| Sauce)?", arb_cell()), 0..20)
    }

    proptest! {
        #[test]
        fn prop_extraction_is_idempotent(rows in arb_rows()) {
            let mut grid = vec![vec!["Item".to_string(), "Milk".to_string()]];
            grid.extend(rows.into_iter().map(|(n, v)| vec![n, v]));
            let tables = vec![AllergenTable::new(grid)];

            let first = extract_safe_items(&tables, "Milk");
            let second = extract_safe_items(&tables, "Milk");

            prop_assert_eq!(first.full_items(), second.full_items());
            prop_assert_eq!(first.sub_items(), second.sub_items());
        }

        #[test]
        fn prop_safe_rows_land_in_exactly_one_list(rows in arb_rows()) {
            let mut grid = vec![vec!["Item".to_string(), "Milk".to_string()]];
            grid.extend(rows.iter().cloned().map(|(n, v)| vec![n, v]));
            let tables = vec![AllergenTable::new(grid)];

            let result = extract_safe_items(&tables, "Milk");
            let full = result.full_items();
            let sub = result.sub_items();

            for (name, value) in &rows {
                let in_full = full.contains(&name.as_str());
                let in_sub = sub.contains(&name.as_str());
                prop_assert!(!(in_full && in_sub));
                if is_safe_value(value) {
                    prop_assert!(in_full || in_sub);
                }
            }
        }
    }
}
