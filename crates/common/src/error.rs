use thiserror::Error;

/// Top-level error type for fact-check operations.
///
/// Source and vectorization failures are recovered inside the pipeline and
/// never reach this type.
#[derive(Debug, Error)]
pub enum FactCheckError {
    /// Bad caller input; the message is safe to show as-is.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for fact-check operations.
pub type Result<T> = std::result::Result<T, FactCheckError>;
