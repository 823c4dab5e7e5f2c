//! Unstructured text normalization.
//!
//! Text extractors flatten allergen tables into one cell per line. These
//! helpers stitch the pieces of each row back together before the text is
//! chunked and sent to the classifier.

use std::sync::LazyLock;

use regex::Regex;

/// A plausible menu item name: leading capital, then name-ish characters.
static RE_ITEM_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z][\w\s,&-]+$").unwrap());

/// Tokens that mark a line as allergen data rather than a name.
const DATA_TOKENS: &[&str] = &["Yes", "No", "Contain"];

/// Tokens that end a logical row.
const TERMINAL_TOKENS: &[&str] = &["Yes", "No Major Allergens Present", "May Contain"];

/// Lines emitted by PDF tooling rather than the document itself.
const EXTRACTOR_NOISE: &[&str] = &["CropBox missing", "defaulting to MediaBox"];

/// Whether a line starts a new menu item.
pub fn is_item_name_line(line: &str) -> bool {
    RE_ITEM_NAME.is_match(line) && !DATA_TOKENS.iter().any(|t| line.contains(t))
}

/// Whether a line carries the allergen values that close a row.
pub fn is_terminal_line(line: &str) -> bool {
    TERMINAL_TOKENS.iter().any(|t| line.contains(t))
}

/// Merge physical lines into logical item rows.
///
/// A name line flushes whatever is pending and starts a new row. A terminal
/// data line is appended to the pending row, which is then flushed. Anything
/// else is appended without flushing.
pub fn merge_multiline_items<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut merged = Vec::new();
    let mut current = String::new();

    for line in lines {
        let line = line.as_ref();

        if is_item_name_line(line) {
            if !current.is_empty() {
                merged.push(std::mem::take(&mut current));
            }
            current.push_str(line);
        } else if is_terminal_line(line) {
            append(&mut current, line);
            merged.push(std::mem::take(&mut current));
        } else {
            append(&mut current, line);
        }
    }

    if !current.is_empty() {
        merged.push(current);
    }

    merged
}

fn append(current: &mut String, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    if !current.is_empty() {
        current.push(' ');
    }
    current.push_str(line);
}

/// Clean raw document text for classification.
///
/// Trims lines, drops blanks and extractor noise, merges multi-line items,
/// and separates the merged rows with blank lines so each row is its own
/// paragraph for [`crate::pipeline::chunk::chunk_text`].
pub fn preprocess_text(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !EXTRACTOR_NOISE.iter().any(|noise| line.contains(noise)))
        .collect();

    merge_multiline_items(&lines).join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_followed_by_terminal_line() {
        let merged = merge_multiline_items(&["Caesar Salad", "No Major Allergens Present"]);
        assert_eq!(merged, ["Caesar Salad No Major Allergens Present"]);
    }

    #[test]
    fn test_name_detection() {
        assert!(is_item_name_line("Asian Sesame with & without Chicken"));
        assert!(is_item_name_line("Mac-n-Cheese, Large"));
        assert!(!is_item_name_line("chips"));
        assert!(!is_item_name_line("Yes Yes"));
        assert!(!is_item_name_line("Tomato (seasonal)"));
        assert!(!is_item_name_line("Contains Milk"));
    }

    #[test]
    fn test_continuation_lines_join_pending_row() {
        let merged = merge_multiline_items(&[
            "Asian Sesame with",
            "& without Chicken",
            "Yes Yes",
            "Baguette",
            "(whole)",
            "May Contain",
        ]);

        assert_eq!(
            merged,
            [
                "Asian Sesame with & without Chicken Yes Yes",
                "Baguette (whole) May Contain",
            ]
        );
    }

    #[test]
    fn test_new_name_flushes_unterminated_row() {
        let merged = merge_multiline_items(&["Apple", "Banana Bowl", "Yes"]);
        assert_eq!(merged, ["Apple", "Banana Bowl Yes"]);
    }

    #[test]
    fn test_pending_row_flushed_at_end() {
        let merged = merge_multiline_items(&["Lemonade", "(16 oz)"]);
        assert_eq!(merged, ["Lemonade (16 oz)"]);
    }

    #[test]
    fn test_terminal_line_without_pending_name() {
        let merged = merge_multiline_items(&["Yes No Yes"]);
        assert_eq!(merged, ["Yes No Yes"]);
    }

    #[test]
    fn test_preprocess_drops_noise_and_blank_lines() {
        let raw = "  Caesar Salad \n\nCropBox missing from /Page, defaulting to MediaBox\n No Major Allergens Present\n\nFries\nYes\n";

        let text = preprocess_text(raw);

        assert_eq!(
            text,
            "Caesar Salad No Major Allergens Present\n\nFries Yes"
        );
    }
}
