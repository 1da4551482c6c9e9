pub mod formatters;
pub mod prompt;
pub mod renderers;
pub mod view_models;
pub mod views;
