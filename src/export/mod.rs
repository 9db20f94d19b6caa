//! Export functionality
//!
//! Provides the writers that turn an assembled endpoint into artifacts:
//! - BPMN 2.0 iFlow XML
//! - Bundle metadata files (`.project`, `MANIFEST.MF`, `metainfo.prop`)
//! - Deployable zip package (feature `package`)

pub mod bpmn;
pub mod manifest;
#[cfg(feature = "package")]
pub mod package;

/// Error during export
#[derive(Debug, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::IoError(err.to_string())
    }
}

// Re-export for convenience
pub use bpmn::BPMNExporter;
pub use manifest::ManifestFiles;
#[cfg(feature = "package")]
pub use package::IflowPackage;
