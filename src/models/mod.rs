//! Models module
//!
//! Defines the input metadata document and the rendered structures produced
//! while converting it into a BPMN iFlow document.

pub mod metadata;
pub mod rendered;

pub use metadata::{
    ComponentDescriptor, END_EVENT_ID, Endpoint, IflowDescriptor, MetadataDocument, START_EVENT_ID,
    SequenceFlow, is_synthetic_id,
};
pub use rendered::{Position, Property, PropertyEncoding, RenderedComponent};
