//! Classification adapter: send segments to the AI, parse what comes back.

use futures::{stream, StreamExt};
use tracing::{debug, warn};

use crate::error::Result;
use crate::pipeline::chunk::TextSegment;
use crate::pipeline::prompts::{PromptTemplate, SYSTEM_PROMPT};
use crate::traits::ai::AI;
use crate::types::allergen::Allergen;
use crate::types::result::{ExtractionResult, ItemCategory};

const FULL_SECTION: &str = "FULL MENU ITEMS";
const SUB_SECTION: &str = "INDIVIDUAL SAFE INGREDIENTS";

/// Placeholder lines a model writes under an empty section.
const EMPTY_SECTION_LINES: &[&str] = &["no items found.", "none found.", "no items found", "none found"];

/// Parse a classifier response into typed item lists.
///
/// The response has two sections headed by the full-item and ingredient
/// markers. Lines before the first marker, separators, blank lines and
/// "none found." placeholders are ignored. List prefixes (bullets, numbers)
/// are stripped from item lines.
pub fn parse_classification(response: &str) -> ExtractionResult {
    let mut result = ExtractionResult::new();
    let mut section: Option<ItemCategory> = None;

    for line in response.lines() {
        let line = line.trim();
        let upper = line.to_uppercase();

        if upper.contains(FULL_SECTION) {
            section = Some(ItemCategory::Full);
            continue;
        }
        if upper.contains(SUB_SECTION) {
            section = Some(ItemCategory::Sub);
            continue;
        }
        if line.is_empty() || is_separator(line) {
            continue;
        }

        let Some(category) = section else {
            continue;
        };

        let item = strip_list_prefix(line);
        if item.is_empty() || is_placeholder(item) || is_empty_marker(item) {
            continue;
        }
        result.push(category, item);
    }

    result
}

fn is_empty_marker(item: &str) -> bool {
    EMPTY_SECTION_LINES.contains(&item.to_lowercase().as_str())
}

fn is_separator(line: &str) -> bool {
    line.starts_with("---") || line.chars().all(|c| matches!(c, '-' | '=' | '*' | '_' | '#'))
}

/// Echoed format hints such as "(Main dishes like salads, ...)".
fn is_placeholder(item: &str) -> bool {
    item.starts_with('(') && item.ends_with(')')
}

fn strip_list_prefix(line: &str) -> &str {
    line.trim_start_matches(|c: char| {
        c.is_ascii_digit() || matches!(c, '-' | '•' | '*' | '.' | ')' | ' ' | '\t')
    })
    .trim()
}

/// Classifies text segments for one allergen through an [`AI`].
pub struct SegmentClassifier<A: AI> {
    ai: A,
    template: PromptTemplate,
}

impl<A: AI> SegmentClassifier<A> {
    /// Create a classifier using the built-in template for `allergen`.
    pub fn new(ai: A, allergen: Allergen) -> Result<Self> {
        Ok(Self {
            ai,
            template: PromptTemplate::for_allergen(allergen)?,
        })
    }

    /// Create a classifier with a custom, already validated template.
    pub fn with_template(ai: A, template: PromptTemplate) -> Self {
        Self { ai, template }
    }

    pub fn allergen(&self) -> Allergen {
        self.template.allergen()
    }

    /// Classify one segment.
    pub async fn classify_segment(&self, segment: &str) -> Result<ExtractionResult> {
        let prompt = self.template.render(segment);
        let response = self.ai.complete(SYSTEM_PROMPT, &prompt).await?;
        Ok(parse_classification(&response))
    }

    /// Classify every segment and combine the results in segment order.
    ///
    /// Up to `concurrency` requests run at once. A failed segment is logged
    /// and contributes nothing; it is not retried.
    pub async fn classify_segments(
        &self,
        segments: &[TextSegment],
        concurrency: usize,
    ) -> ExtractionResult {
        let total = segments.len();

        let results: Vec<Option<ExtractionResult>> = stream::iter(segments)
            .map(|segment| async move {
                debug!(
                    segment = segment.index + 1,
                    total,
                    chars = segment.text.chars().count(),
                    "Classifying segment"
                );
                match self.classify_segment(&segment.text).await {
                    Ok(result) => {
                        debug!(segment = segment.index + 1, items = result.len(), "Segment classified");
                        Some(result)
                    }
                    Err(e) => {
                        warn!(segment = segment.index + 1, total, error = %e, "Segment classification failed");
                        None
                    }
                }
            })
            .buffered(concurrency.max(1))
            .collect()
            .await;

        let mut combined = ExtractionResult::new();
        for result in results.into_iter().flatten() {
            combined.merge(result);
        }
        combined
    }
}
