//! CLI command implementations

pub mod config;
pub mod dump;
pub mod generate;
pub mod get;
