//! Restaurant name normalization.

/// Shorthand and spelling variants users type for common chains.
const RESTAURANT_ALIASES: &[(&str, &str)] = &[
    ("cfa", "chick fil a"),
    ("chickfila", "chick fil a"),
    ("chick-fil-a", "chick fil a"),
    ("panera bread", "panera"),
    ("mcd", "mcdonald's"),
    ("mcdonalds", "mcdonald's"),
];

/// Lowercase, trim and resolve known aliases.
pub fn normalize_restaurant_name(name: &str) -> String {
    let name = name.trim().to_lowercase();
    RESTAURANT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(name)
}
