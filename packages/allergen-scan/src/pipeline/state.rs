//! The fallback chain as an explicit state machine.
//!
//! Transitions only move forward. A finished stage is never re-entered and
//! terminal states ignore further events, so no stage can be retried.

use serde::{Deserialize, Serialize};

use crate::types::source::SourceKind;

/// A stage that can produce the final result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Allergen tables read directly.
    Structured,
    /// Document text classified after the tables gave nothing.
    TextFallback,
    /// Web page text classified.
    Unstructured,
}

/// Where the pipeline is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing located yet.
    Start,
    /// Document with tables: read the tables first.
    StructuredPreferred,
    /// Classify the document's text.
    TextFallback,
    /// Classify a web page's text.
    UnstructuredOnly,
    /// A stage produced the final (possibly empty) result.
    Finished(Stage),
    /// No usable source.
    NoSource,
}

/// What just happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineEvent {
    SourceLocated(SourceKind),
    SourceMissing,
    /// The current stage ran; `produced` is true if it found any item.
    StageCompleted { produced: bool },
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished(_) | Self::NoSource)
    }
}

/// Next state after `event`.
///
/// Events that make no sense in the current state leave it unchanged.
pub fn transition(state: PipelineState, event: PipelineEvent) -> PipelineState {
    use PipelineEvent::*;
    use PipelineState::*;

    match (state, event) {
        (Start, SourceLocated(SourceKind::Document { has_tables: true })) => StructuredPreferred,
        (Start, SourceLocated(SourceKind::Document { has_tables: false })) => TextFallback,
        (Start, SourceLocated(SourceKind::WebPage)) => UnstructuredOnly,
        (Start, SourceMissing) => NoSource,

        (StructuredPreferred, StageCompleted { produced: true }) => Finished(Stage::Structured),
        (StructuredPreferred, StageCompleted { produced: false }) => TextFallback,
        (TextFallback, StageCompleted { .. }) => Finished(Stage::TextFallback),
        (UnstructuredOnly, StageCompleted { .. }) => Finished(Stage::Unstructured),

        (state, _) => state,
    }
}
