//! Shared pieces of the `rline` binary

pub mod config;
pub mod generate;
pub mod logging;
