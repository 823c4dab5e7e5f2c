//! Cell normalization.

/// Canonical form of a raw cell: missing becomes `""`, otherwise trimmed.
///
/// Case is left alone; callers fold case when they compare.
pub fn normalize(cell: Option<&str>) -> String {
    cell.map(str::trim).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cell_is_empty() {
        assert_eq!(normalize(None), "");
    }

    #[test]
    fn test_trims_without_folding_case() {
        assert_eq!(normalize(Some("  No Major Allergens\t\n")), "No Major Allergens");
    }
}
