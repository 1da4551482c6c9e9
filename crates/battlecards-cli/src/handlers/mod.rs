pub mod browse;
pub mod config;
pub mod edit;
pub mod get;
pub mod init;
pub mod reset;
pub mod show;
