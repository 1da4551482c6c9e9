//! Testing infrastructure for battlecards integration tests.
//!
//! - `TestWorld`: isolated data directory plus helpers to run the binary
//! - `assertions`: checks over `show --format json` and `get` output
//! - `fixtures`: small documents and config files to start from

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::{CliResult, TestWorld};
