use battlecards_store::StoreError;
use battlecards_types::{Path, PathError};
use thiserror::Error;

/// Result type for configuration and workspace operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving the workspace or reading configuration
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("could not parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("could not write config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error(transparent)]
    Workspace(#[from] battlecards_core::Error),
}

/// Errors raised by [`crate::App`] operations
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Only returned when strict path checking is on; otherwise logged and ignored.
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("enter edit mode first")]
    EditModeRequired,

    #[error("{path} is not editable text")]
    NotEditable { path: Path },

    #[error(transparent)]
    Runtime(#[from] Error),
}

impl AppError {
    /// Errors the user caused and can fix by trying again differently.
    pub fn is_user_facing(&self) -> bool {
        match self {
            AppError::Store(err) => err.is_user_facing(),
            AppError::EditModeRequired => true,
            _ => false,
        }
    }
}
