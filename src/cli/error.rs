//! CLI-specific error types

use crate::config::ConfigError;
use crate::convert::ConversionError;
use crate::export::ExportError;
use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read file {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error("Failed to write file {0}: {1}")]
    FileWriteError(PathBuf, String),

    #[error("Output file {0} already exists (use --force to overwrite)")]
    OutputExists(PathBuf),

    #[error("Failed to parse input: {0}")]
    ParseError(String),

    #[error("Schema validation error: {0}")]
    ValidationError(String),

    #[error("Conversion error: {0}")]
    ConversionError(#[from] ConversionError),

    #[error("Export error: {0}")]
    ExportError(#[from] ExportError),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
