//! Rendered component model
//!
//! Output of template rendering and graph assembly, consumed by layout and the
//! document assembler.

use crate::templates::{ElementKind, EventDefinition};
use serde::{Deserialize, Serialize};

/// How a property value was encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyEncoding {
    /// Fixed by the component template (version, activity type, variant URI)
    Template,
    /// Scalar value, stringified and escaped
    Scalar,
    /// Leaf of a flattened nested object
    FlattenedObject,
    /// Array of scalars joined with commas
    SimpleArray,
    /// Array of objects rendered as a row/cell table
    ObjectArrayTable,
    /// Path list rendered as a two-column row/cell table
    SpecialPathTable,
}

impl PropertyEncoding {
    /// Table encodings escape their own output and are exempt from the scalar pass.
    pub fn is_table(&self) -> bool {
        matches!(
            self,
            PropertyEncoding::ObjectArrayTable | PropertyEncoding::SpecialPathTable
        )
    }
}

/// One `ifl:property` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    /// Value as supplied in the configuration
    pub raw: serde_json::Value,
    pub encoding: PropertyEncoding,
    /// Final escaped string, written verbatim into the document
    pub value: String,
}

impl Property {
    pub fn new(
        key: impl Into<String>,
        raw: serde_json::Value,
        encoding: PropertyEncoding,
        value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            raw,
            encoding,
            value: value.into(),
        }
    }
}

/// A component ready for layout and serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedComponent {
    pub id: String,
    pub name: String,
    pub type_tag: String,
    pub element: ElementKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_definition: Option<EventDefinition>,
    /// Template triplet followed by encoded configuration
    pub properties: Vec<Property>,
    /// Ids of sequence flows entering this component, in declaration order
    pub incoming: Vec<String>,
    /// Ids of sequence flows leaving this component, in declaration order
    pub outgoing: Vec<String>,
}

impl RenderedComponent {
    /// Look up a property by key
    pub fn property(&self, key: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.key == key)
    }

    /// True when the component has no wiring at all
    pub fn is_orphaned(&self) -> bool {
        self.incoming.is_empty() && self.outgoing.is_empty()
    }
}

/// Top-left coordinate of a diagram shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}
