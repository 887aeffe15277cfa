/// Error types for the translation backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// A backend failed to produce a translation
    TranslationError(String),
    /// General error with context
    Other(String),
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::TranslationError(msg) => write!(f, "Translation error: {}", msg),
            TranslateError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TranslateError {}

/// Result type for translation operations
pub type TranslateResult<T> = Result<T, TranslateError>;
