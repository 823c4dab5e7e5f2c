//! Allergen tables as extracted from a guide document.

use serde::{Deserialize, Serialize};

use crate::pipeline::normalize::normalize;

/// One grid pulled out of an allergen guide.
///
/// Row 0 is the header. Rows are kept exactly as extracted: a row may be
/// shorter than the header, and nothing pads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllergenTable {
    rows: Vec<Vec<String>>,
}

impl AllergenTable {
    /// Create a table from already-clean rows.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Create a table from anything string-like.
    pub fn from_rows<R, C>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Create a table from raw extractor cells, where a cell may be missing.
    ///
    /// Every cell goes through [`normalize`].
    pub fn from_raw(rows: Vec<Vec<Option<String>>>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.iter().map(|cell| normalize(cell.as_deref())).collect())
                .collect(),
        }
    }

    /// Header row, if any.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Number of rows including the header.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_normalizes_missing_cells() {
        let table = AllergenTable::from_raw(vec![
            vec![Some(" Item ".to_string()), Some("Milk".to_string())],
            vec![Some("Garden Salad\n".to_string()), None],
        ]);

        assert_eq!(table.header().unwrap(), ["Item", "Milk"]);
        assert_eq!(table.data_rows()[0], ["Garden Salad", ""]);
    }

    #[test]
    fn test_ragged_rows_are_not_padded() {
        let table = AllergenTable::from_rows([vec!["Item", "Milk", "Egg"], vec!["Soda"]]);

        assert_eq!(table.data_rows()[0].len(), 1);
    }

    #[test]
    fn test_header_only_table_has_no_data_rows() {
        let table = AllergenTable::from_rows([vec!["Item", "Milk"]]);

        assert_eq!(table.len(), 1);
        assert!(table.data_rows().is_empty());
    }

    #[test]
    fn test_deserializes_from_plain_grid() {
        let table: AllergenTable =
            serde_json::from_str(r#"[["Item","Milk"],["Fries",""]]"#).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.data_rows()[0][0], "Fries");
    }
}
