//! Validate command implementation

use super::load_document;
use crate::cli::error::CliError;
use crate::validation::MetadataValidator;

/// Handle the validate command
pub fn handle_validate(input: &str) -> Result<(), CliError> {
    let document = load_document(input)?;

    match MetadataValidator::new().validate(&document) {
        Ok(valid) => {
            let doc = valid.document();
            println!(
                "Validation successful: iflow '{}' with {} endpoint(s)",
                doc.iflow.id,
                doc.endpoints.len()
            );
            Ok(())
        }
        Err(errors) => {
            for error in &errors {
                eprintln!("  - {}", error);
            }
            Err(CliError::ValidationError(format!(
                "{} problem(s) found in {}",
                errors.len(),
                input
            )))
        }
    }
}
