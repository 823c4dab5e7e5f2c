//! Supported allergens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// The closed set of allergens the scanner knows how to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Allergen {
    Dairy,
    Egg,
    Peanut,
    TreeNut,
    Soy,
    Wheat,
    Fish,
    Shellfish,
    Sesame,
}

impl Allergen {
    pub const ALL: [Allergen; 9] = [
        Self::Dairy,
        Self::Egg,
        Self::Peanut,
        Self::TreeNut,
        Self::Soy,
        Self::Wheat,
        Self::Fish,
        Self::Shellfish,
        Self::Sesame,
    ];

    /// Name used in prompts and output.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Dairy => "Dairy",
            Self::Egg => "Egg",
            Self::Peanut => "Peanut",
            Self::TreeNut => "Tree Nut",
            Self::Soy => "Soy",
            Self::Wheat => "Wheat",
            Self::Fish => "Fish",
            Self::Shellfish => "Shellfish",
            Self::Sesame => "Sesame",
        }
    }

    /// Header labels that identify this allergen's column in a guide.
    ///
    /// Guides usually label dairy as "Milk" and wheat as "Gluten".
    pub fn column_terms(self) -> &'static [&'static str] {
        match self {
            Self::Dairy => &["milk", "dairy"],
            Self::Egg => &["egg"],
            Self::Peanut => &["peanut"],
            Self::TreeNut => &["tree nut"],
            Self::Soy => &["soy"],
            Self::Wheat => &["wheat", "gluten"],
            Self::Fish => &["fish"],
            Self::Shellfish => &["shellfish", "crustacean"],
            Self::Sesame => &["sesame"],
        }
    }

    /// Column label shown to the classifier.
    pub fn column_label(self) -> &'static str {
        match self {
            Self::Dairy => "Milk",
            Self::Wheat => "Wheat/Gluten",
            other => other.display_name(),
        }
    }

    /// Ingredient words that should make a "safe" item suspicious.
    pub fn suspicious_terms(self) -> &'static [&'static str] {
        match self {
            Self::Dairy => &["cheese", "cream", "milk", "yogurt", "mozzarella", "butter"],
            Self::Egg => &["egg", "mayo", "aioli", "meringue"],
            Self::Peanut => &["peanut", "satay"],
            Self::TreeNut => &["almond", "cashew", "pecan", "walnut", "pesto", "praline"],
            Self::Soy => &["soy", "tofu", "edamame", "miso", "teriyaki"],
            Self::Wheat => &["bread", "bun", "wrap", "pasta", "flour", "crouton", "tortilla"],
            Self::Fish => &["tuna", "salmon", "anchovy", "cod", "caesar"],
            Self::Shellfish => &["shrimp", "crab", "lobster", "scallop"],
            Self::Sesame => &["sesame", "tahini", "hummus"],
        }
    }
}

impl fmt::Display for Allergen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Allergen {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', '_'], " ");
        let allergen = match key.as_str() {
            "dairy" | "milk" | "lactose" => Self::Dairy,
            "egg" | "eggs" => Self::Egg,
            "peanut" | "peanuts" => Self::Peanut,
            "tree nut" | "tree nuts" | "treenut" | "treenuts" | "nut" | "nuts" => Self::TreeNut,
            "soy" | "soya" => Self::Soy,
            "wheat" | "gluten" => Self::Wheat,
            "fish" => Self::Fish,
            "shellfish" => Self::Shellfish,
            "sesame" => Self::Sesame,
            _ => {
                return Err(ScanError::UnsupportedAllergen {
                    name: s.to_string(),
                })
            }
        };
        Ok(allergen)
    }
}
