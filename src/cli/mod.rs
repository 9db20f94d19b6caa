//! Command-line interface
//!
//! Subcommands for converting, validating and listing component types.

pub mod commands;
pub mod error;

pub use error::CliError;
