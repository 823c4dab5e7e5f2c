//! LLM prompts for allergen classification.
//!
//! Every allergen shares one instruction body; the allergen-specific parts
//! are filled in once when its [`PromptTemplate`] is built and validated.

use crate::error::{Result, ScanError};
use crate::types::allergen::Allergen;

/// Section marker for complete dishes in a classifier response.
pub const FULL_SECTION_MARKER: &str = "--- FULL MENU ITEMS ---";

/// Section marker for sides, sauces and ingredients in a classifier response.
pub const SUB_SECTION_MARKER: &str = "--- INDIVIDUAL SAFE INGREDIENTS ---";

/// Placeholder replaced by the text segment.
pub const TEXT_PLACEHOLDER: &str = "{text}";

/// System instruction sent with every segment.
pub const SYSTEM_PROMPT: &str = "You are an expert food allergen classifier. \
You must treat a blank cell in an allergen column as SAFE (allergen not present), \
not as missing or unknown data. Return only items that are confirmed safe by this rule.";

/// Instruction body shared by all allergens.
const CLASSIFY_PROMPT: &str = r#"You are a food allergen expert.

The following content is from a restaurant's allergen guide. Your job is to identify all **menu items that are safe for someone with a {allergen_upper} allergy**.

Very important:
- A menu item is **NOT safe** if the {column} column has "Yes", "Contains", or "May Contain".
- A menu item **IS safe** if:
  - The {column} column is completely **blank** (meaning the allergen is **NOT present**).
  - It says **"No Major Allergens Present"** anywhere in the row.

Special note:
- If a menu item is labeled as {allergen_lower}-safe but the name includes terms like {suspicious}, keep the item but flag it with a clear warning: "Double-check with the restaurant: this item's name suggests it may contain {allergen_lower}."

Additional rules:
- Some items span multiple lines, like "Asian Sesame with & without Chicken". Treat those as **one item**.
- Deduplicate menu items if repeated.
- Write one item per line, with no numbering.

Classification rules:
- Items like **salads**, **bowls**, **soups**, **sandwiches**, **mac & cheese**, **pizzas**, and **entrees** go under FULL MENU ITEMS.
- Items like **sauces**, **toppings**, **dressings**, **individual ingredients**, and **drinks** go under INDIVIDUAL SAFE INGREDIENTS.
- If a section has nothing, write "None found." under it.

Output format (exactly this):

{full_marker}
(Main dishes like salads, sandwiches, bowls, entrees)

{sub_marker}
(Sides, drinks, toppings, sauces, breads)

Here is the allergen list:
----------------------
{text}
----------------------"#;

/// A validated prompt for one allergen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    allergen: Allergen,
    body: String,
}

impl PromptTemplate {
    /// Build the template for `allergen`.
    pub fn for_allergen(allergen: Allergen) -> Result<Self> {
        let suspicious = allergen
            .suspicious_terms()
            .iter()
            .map(|t| format!("\"{}\"", t))
            .collect::<Vec<_>>()
            .join(", ");

        let body = CLASSIFY_PROMPT
            .replace("{allergen_upper}", &allergen.display_name().to_uppercase())
            .replace("{allergen_lower}", &allergen.display_name().to_lowercase())
            .replace("{column}", allergen.column_label())
            .replace("{suspicious}", &suspicious)
            .replace("{full_marker}", FULL_SECTION_MARKER)
            .replace("{sub_marker}", SUB_SECTION_MARKER);

        Self::new(allergen, body)
    }

    /// Wrap a custom template body, validating it.
    ///
    /// The body must contain exactly one `{text}` placeholder and both
    /// section markers.
    pub fn new(allergen: Allergen, body: impl Into<String>) -> Result<Self> {
        let body = body.into();
        let invalid = |reason: &str| ScanError::InvalidTemplate {
            allergen: allergen.to_string(),
            reason: reason.to_string(),
        };

        match body.matches(TEXT_PLACEHOLDER).count() {
            0 => return Err(invalid("missing {text} placeholder")),
            1 => {}
            _ => return Err(invalid("more than one {text} placeholder")),
        }
        if !body.contains(FULL_SECTION_MARKER) {
            return Err(invalid("missing full menu items marker"));
        }
        if !body.contains(SUB_SECTION_MARKER) {
            return Err(invalid("missing individual ingredients marker"));
        }

        Ok(Self { allergen, body })
    }

    pub fn allergen(&self) -> Allergen {
        self.allergen
    }

    /// Fill the template with a text segment.
    pub fn render(&self, segment: &str) -> String {
        self.body.replacen(TEXT_PLACEHOLDER, segment.trim(), 1)
    }
}
