use battlecards_types::{DocumentError, Path, PathError};
use thiserror::Error;

/// Result type for battlecards-store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error types that can occur in the store layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// Path did not parse or resolve against the document
    #[error(transparent)]
    Path(#[from] PathError),

    /// A card with the derived id already exists
    #[error("a card with id '{id}' already exists")]
    DuplicateId { id: String },

    /// The title reduces to an empty id
    #[error("'{title}' does not produce a usable id")]
    EmptyTitle { title: String },

    #[error("no card with id '{id}'")]
    UnknownCard { id: String },

    /// The target exists but does not have the shape the operation needs
    #[error("{path}: {reason}")]
    ShapeViolation { path: Path, reason: &'static str },

    /// Durable storage could not be read or written
    #[error("storage error for key '{key}': {source}")]
    Persistence {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored snapshot exists but is not a document
    #[error("stored snapshot is unreadable: {0}")]
    CorruptSnapshot(#[source] DocumentError),

    /// The seed document could not be fetched or parsed
    #[error("seed {source_name} could not be loaded: {reason}")]
    SeedLoad { source_name: String, reason: String },
}

impl StoreError {
    pub(crate) fn shape(path: &Path, reason: &'static str) -> Self {
        StoreError::ShapeViolation {
            path: path.clone(),
            reason,
        }
    }

    /// Errors the user can act on (pick another title, fix the target).
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            StoreError::DuplicateId { .. } | StoreError::EmptyTitle { .. }
        )
    }
}
