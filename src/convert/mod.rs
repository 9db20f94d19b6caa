//! Metadata to iFlow conversion
//!
//! Drives the whole pipeline: validate, assemble, lay out, serialize. A
//! conversion either yields one XML artifact plus warnings or fails with a
//! single [`ConversionError`]; partial output is never returned.

pub mod converter;

use crate::encoding::EncodingError;
use crate::export::ExportError;
use crate::templates::TemplateError;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use converter::{ConversionOutput, IflowConverter, convert};

/// Fatal error during conversion
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The document failed schema or semantic validation
    #[error("Metadata validation failed: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    #[error("Endpoint '{endpoint_id}', component '{component_id}': {source}")]
    UnsupportedComponentType {
        endpoint_id: String,
        component_id: String,
        #[source]
        source: TemplateError,
    },

    #[error("Endpoint '{endpoint_id}', component '{component_id}': {source}")]
    Encoding {
        endpoint_id: String,
        component_id: String,
        #[source]
        source: EncodingError,
    },

    #[error(
        "Endpoint '{endpoint_id}': sequence flow '{flow_id}' references unknown node '{missing_id}'"
    )]
    DanglingReference {
        endpoint_id: String,
        flow_id: String,
        missing_id: String,
    },

    /// Raised only when the orphan policy is `error`
    #[error("Endpoint '{endpoint_id}': component '{component_id}' has no incoming or outgoing sequence flows")]
    OrphanedComponent {
        endpoint_id: String,
        component_id: String,
    },

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Generated document is not well-formed XML: {0}")]
    Xml(String),
}

impl ConversionError {
    /// Validation problems, when this is a validation failure
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            ConversionError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<ValidationError> for ConversionError {
    fn from(err: ValidationError) -> Self {
        ConversionError::Validation(vec![err])
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Non-fatal finding returned alongside a successful conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConversionWarning {
    /// Component has neither incoming nor outgoing sequence flows
    OrphanedComponent {
        endpoint_id: String,
        component_id: String,
    },
    /// Component is wired but cannot be reached from the start event
    UnreachableComponent {
        endpoint_id: String,
        component_id: String,
    },
}

impl ConversionWarning {
    pub fn component_id(&self) -> &str {
        match self {
            ConversionWarning::OrphanedComponent { component_id, .. }
            | ConversionWarning::UnreachableComponent { component_id, .. } => component_id,
        }
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionWarning::OrphanedComponent {
                endpoint_id,
                component_id,
            } => write!(
                f,
                "Endpoint '{}': component '{}' is not connected to any sequence flow",
                endpoint_id, component_id
            ),
            ConversionWarning::UnreachableComponent {
                endpoint_id,
                component_id,
            } => write!(
                f,
                "Endpoint '{}': component '{}' is not reachable from the start event",
                endpoint_id, component_id
            ),
        }
    }
}
