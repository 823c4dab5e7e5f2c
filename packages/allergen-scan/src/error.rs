//! Typed errors for the allergen scanner.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Most pipeline stages
//! never surface these: a failing table, segment or source is logged and
//! contributes nothing. Only setup mistakes (unknown allergen, bad template,
//! missing configuration) reach the caller.

use thiserror::Error;

/// Errors that can occur while configuring or running a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Allergen name is not in the supported set
    #[error("unsupported allergen: {name}")]
    UnsupportedAllergen { name: String },

    /// Prompt template failed validation
    #[error("invalid prompt template for {allergen}: {reason}")]
    InvalidTemplate { allergen: String, reason: String },

    /// Classification service unavailable or failed
    #[error("AI service error: {0}")]
    AI(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Source collaborator failed to locate or read a guide
    #[error("source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    #[error("config error: {0}")]
    Config(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
