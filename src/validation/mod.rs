//! Validation functionality
//!
//! Provides validation logic for:
//! - Metadata documents (structure, identifiers, reserved ids, start/end wiring)
//! - Identifier validation and sanitization
//! - Well-formedness of generated XML

pub mod input;
pub mod metadata;
pub mod xml;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use input::{IdentifierError, sanitize_file_name, validate_element_id};
pub use metadata::{MetadataValidator, ValidMetadata, validate};
pub use xml::check_well_formed;

/// A problem found while validating a metadata document
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationError {
    /// The document does not have the required shape, or violates a naming rule
    #[error("Schema error at '{path}': {message}")]
    SchemaError { path: String, message: String },

    /// A declared component claims a synthetic start/end type or id
    #[error(
        "Endpoint '{endpoint_id}': component '{component_id}' reuses reserved '{reserved}'"
    )]
    ReservedIdReuse {
        endpoint_id: String,
        component_id: String,
        reserved: String,
    },
}

impl ValidationError {
    /// JSON pointer of the offending node, when known
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::SchemaError { path, .. } => Some(path),
            Self::ReservedIdReuse { .. } => None,
        }
    }
}
