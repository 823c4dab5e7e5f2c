//! Allergen Guide Scanner
//!
//! Finds the menu items in a restaurant's allergen guide that are safe for a
//! given allergen, split into complete dishes and individual components.
//!
//! # How it works
//!
//! - Structured tables are read directly: find the allergen column, keep
//!   rows whose value says "absent".
//! - If the tables give nothing (or there are none), the guide's text is
//!   stitched back into rows, chunked, and each chunk is classified by an
//!   LLM behind the [`AI`] trait.
//! - Web pages go straight to classification.
//! - Failures inside a stage only cost that stage's contribution.
//!
//! # Usage
//!
//! ```rust,ignore
//! use allergen_scan::{Allergen, AllergenSource, PipelineConfig, Scanner};
//! use allergen_scan::testing::MockAI;
//!
//! let scanner = Scanner::new(MockAI::new(), Allergen::Dairy, PipelineConfig::default())?;
//! let source = AllergenSource::document(tables, raw_text);
//!
//! match scanner.analyze(Some(&source)).await {
//!     AnalysisOutcome::Completed { result, stage } => println!("{}", result.render(Allergen::Dairy)),
//!     AnalysisOutcome::NoSource => println!("no allergen guide found"),
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator abstractions (AI, SourceLocator)
//! - [`types`] - Tables, results, allergens, configuration
//! - [`pipeline`] - Extraction stages and the scanner
//! - [`sources`] - Turning fetched pages into pipeline input
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod pipeline;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "openai")]
pub mod ai;

// Re-export core types at crate root
pub use error::{Result, ScanError};
pub use pipeline::{AnalysisOutcome, PromptTemplate, Scanner, SegmentClassifier, Stage};
pub use traits::{ai::AI, source::SourceLocator};
pub use types::{
    allergen::Allergen,
    config::PipelineConfig,
    result::{ExtractionResult, ItemCategory},
    source::{AllergenSource, SourceKind},
    table::AllergenTable,
};

// Re-export testing utilities
pub use testing::{MockAI, MockSourceLocator};
