//! AI trait for the text-classification service.
//!
//! The pipeline owns the prompt contract and the response parsing; an
//! implementation only moves a prompt to a model and returns its text.

use async_trait::async_trait;

use crate::error::Result;

/// A text-completion service used to classify menu segments.
///
/// Implementations wrap specific LLM providers. Responses are plain text;
/// see [`crate::pipeline::classify::parse_classification`] for the format
/// the pipeline expects back.
#[async_trait]
pub trait AI: Send + Sync {
    /// Complete a prompt under a system instruction.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}

#[async_trait]
impl<T: AI + ?Sized> AI for std::sync::Arc<T> {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        (**self).complete(system, prompt).await
    }
}
