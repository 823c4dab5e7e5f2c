//! Helpers for the source side of the pipeline.
//!
//! Locating and downloading guides is left to [`crate::traits::source::SourceLocator`]
//! implementations; these helpers turn what they fetch into pipeline input.

pub mod html;
pub mod restaurant;

pub use html::html_to_text;
pub use restaurant::normalize_restaurant_name;
