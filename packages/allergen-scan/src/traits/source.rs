//! Source locator trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::source::AllergenSource;

/// Finds and reads a restaurant's allergen guide.
///
/// Search, download and document text extraction live behind this trait.
/// `Ok(None)` means nothing usable was found.
#[async_trait]
pub trait SourceLocator: Send + Sync {
    async fn locate(&self, restaurant: &str) -> Result<Option<AllergenSource>>;
}
