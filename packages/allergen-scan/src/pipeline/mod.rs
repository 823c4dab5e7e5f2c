//! Extraction pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Structured table extraction
//! - Text normalization and chunking for unstructured sources
//! - Segment classification through the AI trait
//! - The one-way fallback chain between them

pub mod chunk;
pub mod classify;
pub mod normalize;
pub mod orchestrator;
pub mod prompts;
pub mod state;
pub mod table;
pub mod text;

pub use chunk::{chunk_text, paragraphs, segment_text, TextSegment};
pub use classify::{parse_classification, SegmentClassifier};
pub use normalize::normalize;
pub use orchestrator::{AnalysisOutcome, Scanner};
pub use prompts::{PromptTemplate, FULL_SECTION_MARKER, SUB_SECTION_MARKER, SYSTEM_PROMPT};
pub use state::{transition, PipelineEvent, PipelineState, Stage};
pub use table::{
    extract_safe_items, extract_safe_items_matching, find_allergen_column, find_column_matching,
    is_safe_value, SAFE_VALUES,
};
pub use text::{is_item_name_line, is_terminal_line, merge_multiline_items, preprocess_text};
