//! Identifier validation and sanitization utilities.
//!
//! Component, endpoint and sequence-flow ids end up as XML `id` attributes and
//! shape/edge references in the generated document, and the iFlow name ends up
//! as an archive entry name. These helpers keep both safe.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Maximum length for identifiers in general
pub const MAX_IDENTIFIER_LENGTH: usize = 255;

/// Maximum length for package file names
pub const MAX_FILE_NAME_LENGTH: usize = 255;

static XML_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").expect("Invalid regex"));

/// Errors that can occur during identifier validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Input is empty when a value is required
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// Input exceeds maximum allowed length
    #[error("{field} exceeds maximum length (max: {max}, got: {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Input is not usable as an XML id
    #[error("{field} '{value}' is not a valid XML id (must match [A-Za-z_][A-Za-z0-9_.-]*)")]
    InvalidFormat { field: &'static str, value: String },
}

/// Validate an id that will be written as an XML `id` attribute.
///
/// # Examples
///
/// ```
/// use iflow_converter::validation::input::validate_element_id;
///
/// assert!(validate_element_id("component id", "CallActivity_1").is_ok());
/// assert!(validate_element_id("component id", "router.v2").is_ok());
/// assert!(validate_element_id("component id", "").is_err());
/// assert!(validate_element_id("component id", "1st").is_err());
/// assert!(validate_element_id("component id", "has space").is_err());
/// ```
pub fn validate_element_id(field: &'static str, id: &str) -> Result<(), IdentifierError> {
    if id.is_empty() {
        return Err(IdentifierError::Empty(field));
    }

    if id.len() > MAX_IDENTIFIER_LENGTH {
        return Err(IdentifierError::TooLong {
            field,
            max: MAX_IDENTIFIER_LENGTH,
            actual: id.len(),
        });
    }

    if !XML_ID.is_match(id) {
        return Err(IdentifierError::InvalidFormat {
            field,
            value: id.to_string(),
        });
    }

    Ok(())
}

/// Sanitize a name for use as an archive entry file name.
///
/// Replaces anything other than alphanumerics, hyphens, underscores and single
/// dots with underscores, and falls back to `integrationflow` when nothing usable
/// is left.
///
/// # Examples
///
/// ```
/// use iflow_converter::validation::input::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("Orders Sync"), "Orders_Sync");
/// assert_eq!(sanitize_file_name("../etc/passwd"), "._etc_passwd");
/// assert_eq!(sanitize_file_name("///"), "integrationflow");
/// ```
pub fn sanitize_file_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    let mut last_was_dot = false;

    for ch in name.chars() {
        match ch {
            ch if ch.is_alphanumeric() || ch == '-' || ch == '_' => {
                sanitized.push(ch);
                last_was_dot = false;
            }
            '.' if !last_was_dot => {
                sanitized.push('.');
                last_was_dot = true;
            }
            _ => {
                if !last_was_dot {
                    sanitized.push('_');
                }
                last_was_dot = false;
            }
        }

        if sanitized.len() >= MAX_FILE_NAME_LENGTH {
            break;
        }
    }

    sanitized = sanitized.trim_end_matches(['.', '_']).to_string();

    if sanitized.is_empty() {
        sanitized = "integrationflow".to_string();
    }

    sanitized
}
