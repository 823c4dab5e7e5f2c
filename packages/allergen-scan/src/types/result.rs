//! Extraction results: two ordered, deduplicated item lists.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::types::allergen::Allergen;

/// Name fragments that mark a complete dish.
pub const FULL_ITEM_KEYWORDS: &[&str] = &[
    "salad", "bowl", "soup", "sandwich", "entree", "wrap", "pizza", "mac", "chili",
];

/// Whether a safe item is a complete dish or a component of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Salads, bowls, sandwiches, entrees and the like.
    Full,
    /// Sauces, sides, toppings, drinks, single ingredients.
    Sub,
}

impl ItemCategory {
    /// Categorize an item by its display name.
    ///
    /// Case-insensitive substring match against [`FULL_ITEM_KEYWORDS`].
    pub fn of(name: &str) -> Self {
        let name = name.to_lowercase();
        if FULL_ITEM_KEYWORDS.iter().any(|kw| name.contains(kw)) {
            Self::Full
        } else {
            Self::Sub
        }
    }
}

/// Safe items found for one allergen.
///
/// Both lists keep first-seen order. A name lives in at most one list: once
/// a name has been recorded, later pushes of the same name are ignored
/// regardless of category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    full_items: IndexSet<String>,
    sub_items: IndexSet<String>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a safe item. Returns `false` if the name was blank or already known.
    pub fn push(&mut self, category: ItemCategory, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }

        match category {
            ItemCategory::Full => self.full_items.insert(name.to_string()),
            ItemCategory::Sub => self.sub_items.insert(name.to_string()),
        }
    }

    /// Record a safe item, categorizing it by name.
    pub fn push_categorized(&mut self, name: &str) -> bool {
        self.push(ItemCategory::of(name), name)
    }

    /// Append another result after this one, full items first.
    pub fn merge(&mut self, other: ExtractionResult) {
        for name in other.full_items {
            self.push(ItemCategory::Full, &name);
        }
        for name in other.sub_items {
            self.push(ItemCategory::Sub, &name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.full_items.contains(name) || self.sub_items.contains(name)
    }

    pub fn full_items(&self) -> Vec<&str> {
        self.full_items.iter().map(String::as_str).collect()
    }

    pub fn sub_items(&self) -> Vec<&str> {
        self.sub_items.iter().map(String::as_str).collect()
    }

    /// True when neither list has anything.
    pub fn is_empty(&self) -> bool {
        self.full_items.is_empty() && self.sub_items.is_empty()
    }

    /// Total number of items across both lists.
    pub fn len(&self) -> usize {
        self.full_items.len() + self.sub_items.len()
    }

    /// Split into `(full_items, sub_items)`.
    pub fn into_lists(self) -> (Vec<String>, Vec<String>) {
        (
            self.full_items.into_iter().collect(),
            self.sub_items.into_iter().collect(),
        )
    }

    /// Human-readable listing for one allergen.
    pub fn render(&self, allergen: Allergen) -> String {
        let mut out = format!("{}-safe menu items:\n", allergen.display_name());
        write_list(&mut out, &self.full_items);
        out.push_str("\nSafe sub-items or ingredients:\n");
        write_list(&mut out, &self.sub_items);
        out
    }
}

fn write_list(out: &mut String, items: &IndexSet<String>) {
    if items.is_empty() {
        out.push_str(" (none)\n");
    }
    for item in items {
        out.push_str(" - ");
        out.push_str(item);
        out.push('\n');
    }
}

// IndexSet equality ignores order; results compare in order.
impl PartialEq for ExtractionResult {
    fn eq(&self, other: &Self) -> bool {
        self.full_items.iter().eq(other.full_items.iter())
            && self.sub_items.iter().eq(other.sub_items.iter())
    }
}

impl Eq for ExtractionResult {}

impl fmt::Display for ExtractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Full items: {}", self.full_items.len())?;
        for item in &self.full_items {
            writeln!(f, " - {}", item)?;
        }
        writeln!(f, "Sub-items: {}", self.sub_items.len())?;
        for item in &self.sub_items {
            writeln!(f, " - {}", item)?;
        }
        Ok(())
    }
}
