use crate::Path;
use thiserror::Error;

/// Result type for path operations
pub type Result<T> = std::result::Result<T, PathError>;

/// Errors raised while parsing or walking a [`Path`].
///
/// Both variants indicate a programming error in the caller: the UI only ever
/// produces paths from the rendered tree, so a failure here means the tree and
/// the document disagree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path string could not be tokenised.
    #[error("malformed path '{input}': {reason}")]
    Malformed { input: String, reason: &'static str },

    /// The path is well formed but does not resolve against the document.
    #[error("invalid path {path}: {reason}")]
    Invalid { path: Path, reason: &'static str },
}

impl PathError {
    pub(crate) fn malformed(input: &str, reason: &'static str) -> Self {
        PathError::Malformed {
            input: input.to_string(),
            reason,
        }
    }

    pub(crate) fn invalid(path: &Path, reason: &'static str) -> Self {
        PathError::Invalid {
            path: path.clone(),
            reason,
        }
    }
}

/// Errors raised when a JSON value cannot be adopted as a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document root must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
