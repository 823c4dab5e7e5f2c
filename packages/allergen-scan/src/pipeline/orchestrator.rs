//! Scanner: runs the fallback chain for one allergen.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::pipeline::chunk::segment_text;
use crate::pipeline::classify::SegmentClassifier;
use crate::pipeline::state::{transition, PipelineEvent, PipelineState, Stage};
use crate::pipeline::table::extract_safe_items_matching;
use crate::pipeline::text::preprocess_text;
use crate::sources::restaurant::normalize_restaurant_name;
use crate::traits::{ai::AI, source::SourceLocator};
use crate::types::allergen::Allergen;
use crate::types::config::PipelineConfig;
use crate::types::result::ExtractionResult;
use crate::types::source::AllergenSource;
use crate::types::table::AllergenTable;

/// Final answer of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// A stage ran to completion. The result may be empty.
    Completed { result: ExtractionResult, stage: Stage },

    /// No allergen guide could be obtained.
    NoSource,
}

impl AnalysisOutcome {
    pub fn result(&self) -> Option<&ExtractionResult> {
        match self {
            Self::Completed { result, .. } => Some(result),
            Self::NoSource => None,
        }
    }

    pub fn into_result(self) -> Option<ExtractionResult> {
        match self {
            Self::Completed { result, .. } => Some(result),
            Self::NoSource => None,
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Completed { stage, .. } => Some(*stage),
            Self::NoSource => None,
        }
    }

    /// A source was read but nothing safe was found.
    pub fn is_empty_result(&self) -> bool {
        self.result().is_some_and(ExtractionResult::is_empty)
    }
}

/// Finds allergen-safe items for one allergen.
///
/// # Example
///
/// ```rust,ignore
/// use allergen_scan::{Allergen, PipelineConfig, Scanner};
/// use allergen_scan::ai::OpenAI;
///
/// let scanner = Scanner::new(OpenAI::from_env()?, Allergen::Dairy, PipelineConfig::default())?;
/// let outcome = scanner.analyze(Some(&source)).await;
/// ```
pub struct Scanner<A: AI> {
    classifier: SegmentClassifier<A>,
    config: PipelineConfig,
}

impl<A: AI> Scanner<A> {
    pub fn new(ai: A, allergen: Allergen, config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            classifier: SegmentClassifier::new(ai, allergen)?,
            config,
        })
    }

    /// Build from an existing classifier (e.g. one with a custom template).
    pub fn with_classifier(classifier: SegmentClassifier<A>, config: PipelineConfig) -> Self {
        Self { classifier, config }
    }

    pub fn allergen(&self) -> Allergen {
        self.classifier.allergen()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Locate the restaurant's guide and scan it.
    ///
    /// Locator failures are logged and reported as [`AnalysisOutcome::NoSource`].
    pub async fn analyze_restaurant<L>(&self, locator: &L, restaurant: &str) -> AnalysisOutcome
    where
        L: SourceLocator + ?Sized,
    {
        let restaurant = normalize_restaurant_name(restaurant);
        info!(restaurant = %restaurant, allergen = %self.allergen(), "Analyzing allergens");

        match locator.locate(&restaurant).await {
            Ok(source) => self.analyze(source.as_ref()).await,
            Err(e) => {
                warn!(restaurant = %restaurant, error = %e, "Source lookup failed");
                AnalysisOutcome::NoSource
            }
        }
    }

    /// Scan an already located source.
    pub async fn analyze(&self, source: Option<&AllergenSource>) -> AnalysisOutcome {
        let Some(source) = source else {
            warn!("No allergen source found");
            return AnalysisOutcome::NoSource;
        };

        let mut state = transition(
            PipelineState::Start,
            PipelineEvent::SourceLocated(source.kind()),
        );
        let mut result = ExtractionResult::new();

        loop {
            match state {
                PipelineState::StructuredPreferred => {
                    info!(tables = tables_of(source).len(), "Parsing structured allergen tables");
                    result = extract_safe_items_matching(
                        tables_of(source),
                        self.allergen().column_terms(),
                    );
                    if result.is_empty() {
                        warn!("Table parser returned no results, falling back to text");
                    }
                }
                PipelineState::TextFallback => {
                    info!("Classifying document text");
                    result = self.classify_text(source.text()).await;
                }
                PipelineState::UnstructuredOnly => {
                    info!("Classifying web page text");
                    result = self.classify_text(source.text()).await;
                }
                PipelineState::Finished(stage) => {
                    info!(
                        ?stage,
                        full_items = result.full_items().len(),
                        sub_items = result.sub_items().len(),
                        "Scan complete"
                    );
                    return AnalysisOutcome::Completed { result, stage };
                }
                PipelineState::Start | PipelineState::NoSource => {
                    return AnalysisOutcome::NoSource;
                }
            }

            state = transition(
                state,
                PipelineEvent::StageCompleted {
                    produced: !result.is_empty(),
                },
            );
        }
    }

    /// Normalize, chunk and classify raw text.
    async fn classify_text(&self, raw: &str) -> ExtractionResult {
        let text = preprocess_text(raw);
        let segments = segment_text(&text, self.config.chunk_size, self.config.chunk_overlap);
        info!(segments = segments.len(), "Text split into segments");

        let result = self
            .classifier
            .classify_segments(&segments, self.config.max_concurrent_segments)
            .await;
        if result.is_empty() {
            warn!("Classification returned no results");
        }
        result
    }
}

fn tables_of(source: &AllergenSource) -> &[AllergenTable] {
    match source {
        AllergenSource::Document { tables, .. } => tables,
        AllergenSource::WebPage { .. } => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::prompts::PromptTemplate;
    use crate::testing::MockAI;

    fn milk_table() -> AllergenTable {
        AllergenTable::from_rows([
            vec!["Item", "Milk"],
            vec!["Garden Salad", ""],
            vec!["Mac and Cheese", "Yes"],
            vec!["Ranch Dressing", "No"],
        ])
    }

    fn scanner(ai: MockAI) -> Scanner<MockAI> {
        Scanner::new(ai, Allergen::Dairy, PipelineConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_table_results_skip_the_classifier() {
        let ai = MockAI::new();
        let source = AllergenSource::document(vec![milk_table()], "Garden Salad");

        let outcome = scanner(ai.clone()).analyze(Some(&source)).await;

        assert_eq!(outcome.stage(), Some(Stage::Structured));
        let result = outcome.result().unwrap();
        assert_eq!(result.full_items(), ["Garden Salad"]);
        assert_eq!(result.sub_items(), ["Ranch Dressing"]);
        assert!(ai.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_tables_fall_back_to_document_text() {
        let ai = MockAI::new().with_default_response(
            "--- FULL MENU ITEMS ---\nTurkey Sandwich\n--- INDIVIDUAL SAFE INGREDIENTS ---\nMustard",
        );
        let egg_only = AllergenTable::from_rows([vec!["Item", "Egg"], vec!["Fries", ""]]);
        let source = AllergenSource::document(vec![egg_only], "Turkey Sandwich\nNo Major Allergens Present");

        let outcome = scanner(ai.clone()).analyze(Some(&source)).await;

        assert_eq!(outcome.stage(), Some(Stage::TextFallback));
        assert_eq!(outcome.result().unwrap().full_items(), ["Turkey Sandwich"]);
        assert_eq!(ai.calls().len(), 1);
        assert!(ai.calls()[0]
            .prompt
            .contains("Turkey Sandwich No Major Allergens Present"));
    }

    #[tokio::test]
    async fn test_web_page_goes_straight_to_classifier() {
        let ai = MockAI::new().with_default_response("--- INDIVIDUAL SAFE INGREDIENTS ---\nSalsa");
        let source = AllergenSource::web_page("https://example.com/allergens", "Salsa\nNo");

        let outcome = scanner(ai).analyze(Some(&source)).await;

        assert_eq!(outcome.stage(), Some(Stage::Unstructured));
        assert_eq!(outcome.result().unwrap().sub_items(), ["Salsa"]);
    }

    #[tokio::test]
    async fn test_missing_source_is_no_result() {
        let outcome = scanner(MockAI::new()).analyze(None).await;

        assert_eq!(outcome, AnalysisOutcome::NoSource);
        assert!(outcome.result().is_none());
        assert!(!outcome.is_empty_result());
        assert!(outcome.into_result().is_none());
    }

    #[tokio::test]
    async fn test_custom_classifier_and_config() {
        let ai = MockAI::new().with_default_response("--- FULL MENU ITEMS ---\nBean Burrito");
        let template = PromptTemplate::new(
            Allergen::Egg,
            "Egg check.\n--- FULL MENU ITEMS ---\n--- INDIVIDUAL SAFE INGREDIENTS ---\n{text}",
        )
        .unwrap();
        let config = PipelineConfig::default().with_chunk_size(40).with_chunk_overlap(0);
        let scanner = Scanner::with_classifier(SegmentClassifier::with_template(ai.clone(), template), config);
        let source = AllergenSource::web_page(
            "https://a.test",
            "Bean Burrito\nNo\n\nEgg Salad Sandwich\nYes\n\nFruit Cup\nNo",
        );

        let outcome = scanner.analyze(Some(&source)).await;

        assert_eq!(scanner.allergen(), Allergen::Egg);
        assert_eq!(scanner.config().chunk_size, 40);
        assert!(ai.calls().len() > 1);
        assert!(ai.calls().iter().all(|c| c.prompt.starts_with("Egg check.")));
        let (full, sub) = outcome.into_result().unwrap().into_lists();
        assert_eq!(full, ["Bean Burrito"]);
        assert!(sub.is_empty());
    }

    #[tokio::test]
    async fn test_all_segments_failing_is_an_empty_result() {
        let source = AllergenSource::document(vec![], "Fries\nYes");

        let outcome = scanner(MockAI::failing()).analyze(Some(&source)).await;

        assert!(outcome.is_empty_result());
        assert_eq!(outcome.stage(), Some(Stage::TextFallback));
    }

    #[tokio::test]
    async fn test_text_fallback_runs_once() {
        let ai = MockAI::new();
        let source = AllergenSource::document(vec![milk_table()], "");
        let tables_without_milk = AllergenSource::document(
            vec![AllergenTable::from_rows([vec!["Item", "Soy"], vec!["Tofu", "Yes"]])],
            "Tofu Bowl\nYes",
        );

        let outcome = scanner(ai.clone()).analyze(Some(&tables_without_milk)).await;
        assert!(outcome.is_empty_result());
        assert_eq!(ai.calls().len(), 1);

        ai.clear_calls();
        let outcome = scanner(ai.clone()).analyze(Some(&source)).await;
        assert!(!outcome.is_empty_result());
        assert!(ai.calls().is_empty());
    }
}
