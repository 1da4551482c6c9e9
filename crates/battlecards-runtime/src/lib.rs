pub mod app;
pub mod config;
pub mod edit;
pub mod error;
pub mod gate;
pub mod prompt;

pub use app::{App, AppSettings};
pub use config::{Config, DefaultsConfig, EditConfig, SeedConfig, StorageConfig, CONFIG_FILE};
pub use edit::{EditInput, EditOutcome, EditSession};
pub use error::{AppError, Error, Result};
pub use gate::{GateOutcome, PasswordGate, DEFAULT_PASSWORD};
pub use prompt::{Prompter, ScriptedPrompter};
