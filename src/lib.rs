//! iFlow Converter - turns declarative integration-pipeline metadata into
//! BPMN 2.0 iFlow documents
//!
//! Provides unified interfaces for:
//! - Metadata validation (JSON Schema plus semantic checks)
//! - Component template lookup and property encoding
//! - Flow graph assembly, diagram layout and XML serialization
//! - Bundle manifest and deployable package generation
//! - Converter configuration

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod convert;
pub mod encoding;
pub mod export;
pub mod graph;
pub mod layout;
pub mod models;
pub mod templates;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigError, ConverterConfig};
pub use convert::{ConversionError, ConversionOutput, ConversionWarning, IflowConverter, convert};
pub use encoding::{EncodingError, PropertyEncoder};
#[cfg(feature = "package")]
pub use export::IflowPackage;
pub use export::{BPMNExporter, ExportError, ManifestFiles};
pub use graph::{AssembledEndpoint, FlowGraphAssembler, OrphanPolicy};
pub use layout::{DiagramLayout, LayoutConfig};
pub use templates::{TemplateDescriptor, TemplateError, TemplateRegistry, registry};
pub use validation::{MetadataValidator, ValidMetadata, ValidationError};

// Re-export models
pub use models::{
    ComponentDescriptor, Endpoint, IflowDescriptor, MetadataDocument, Property, PropertyEncoding,
    RenderedComponent, SequenceFlow,
};
