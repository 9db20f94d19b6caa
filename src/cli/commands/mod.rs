//! CLI command implementations

pub mod convert;
pub mod types;
pub mod validate;

use crate::cli::error::CliError;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Load input content from file or stdin
pub fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        if !path.exists() {
            return Err(CliError::FileNotFound(path));
        }
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

fn is_yaml_path(input: &str) -> bool {
    matches!(
        Path::new(input).extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Parse a metadata document.
///
/// `.yaml`/`.yml` inputs are read as YAML. Stdin is tried as JSON first, then YAML.
pub fn parse_document(input: &str, content: &str) -> Result<Value, CliError> {
    if is_yaml_path(input) {
        return serde_yaml::from_str(content)
            .map_err(|e| CliError::ParseError(format!("Invalid YAML in {}: {}", input, e)));
    }

    match serde_json::from_str(content) {
        Ok(value) => Ok(value),
        Err(json_err) if input == "-" => serde_yaml::from_str(content).map_err(|yaml_err| {
            CliError::ParseError(format!(
                "stdin is neither JSON ({}) nor YAML ({})",
                json_err, yaml_err
            ))
        }),
        Err(e) => Err(CliError::ParseError(format!("Invalid JSON in {}: {}", input, e))),
    }
}

/// Read and parse the metadata document named by `input`
pub fn load_document(input: &str) -> Result<Value, CliError> {
    let content = load_input(input)?;
    parse_document(input, &content)
}
