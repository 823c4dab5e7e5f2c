//! Allergen guide sources handed to the pipeline.

use serde::{Deserialize, Serialize};

use crate::types::table::AllergenTable;

/// A located allergen guide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllergenSource {
    /// A document (PDF, scanned report) with any tables already extracted,
    /// plus the document's raw text for the fallback path.
    Document {
        #[serde(default)]
        tables: Vec<AllergenTable>,
        #[serde(default)]
        text: String,
    },

    /// A web page reduced to its visible text.
    WebPage { url: String, text: String },
}

impl AllergenSource {
    pub fn document(tables: Vec<AllergenTable>, text: impl Into<String>) -> Self {
        Self::Document {
            tables,
            text: text.into(),
        }
    }

    pub fn web_page(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self::WebPage {
            url: url.into(),
            text: text.into(),
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Document { tables, .. } => SourceKind::Document {
                has_tables: !tables.is_empty(),
            },
            Self::WebPage { .. } => SourceKind::WebPage,
        }
    }

    /// The raw text carried by the source.
    pub fn text(&self) -> &str {
        match self {
            Self::Document { text, .. } | Self::WebPage { text, .. } => text,
        }
    }
}

/// Shape of a located source, as seen by the pipeline state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Document { has_tables: bool },
    WebPage,
}
