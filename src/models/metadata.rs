//! Metadata document model
//!
//! The declarative description of an integration flow as supplied by the caller.
//! Instances are produced by the validator from an already-parsed JSON value.

use serde::{Deserialize, Serialize};

/// Fixed id of the synthetic start node instantiated for every endpoint
pub const START_EVENT_ID: &str = "StartEvent_2";

/// Fixed id of the synthetic end node instantiated for every endpoint
pub const END_EVENT_ID: &str = "EndEvent_2";

/// Returns true when `id` is one of the synthetic node ids.
pub fn is_synthetic_id(id: &str) -> bool {
    id == START_EVENT_ID || id == END_EVENT_ID
}

/// Top-level metadata document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDocument {
    /// Document format version tag
    pub version: String,
    /// Descriptor of the integration flow being generated
    pub iflow: IflowDescriptor,
    /// Endpoints in declaration order
    pub endpoints: Vec<Endpoint>,
}

impl MetadataDocument {
    /// Find an endpoint by id.
    pub fn endpoint(&self, id: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.id == id)
    }
}

/// Identity of the generated iFlow
///
/// Also consumed by the manifest collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IflowDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub version: String,
}

/// One endpoint: an ordered set of components and the flows that wire them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub id: String,
    pub name: String,
    /// Components in declaration order
    pub components: Vec<ComponentDescriptor>,
    /// Ordered component ids, used to derive a linear chain when no sequence flows are given
    #[serde(default)]
    pub flow: Vec<String>,
    /// Declared sequence flows
    #[serde(default)]
    pub sequence_flows: Vec<SequenceFlow>,
}

impl Endpoint {
    /// Find a declared component by id.
    pub fn component(&self, id: &str) -> Option<&ComponentDescriptor> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Sequence flows that drive wiring.
    ///
    /// Declared flows win. Without them a non-empty `flow` list is expanded into the
    /// chain `StartEvent_2 -> flow[0] -> ... -> EndEvent_2`.
    pub fn effective_sequence_flows(&self) -> Vec<SequenceFlow> {
        if !self.sequence_flows.is_empty() || self.flow.is_empty() {
            return self.sequence_flows.clone();
        }

        let mut chain = Vec::with_capacity(self.flow.len() + 2);
        chain.push(START_EVENT_ID);
        chain.extend(self.flow.iter().map(String::as_str));
        chain.push(END_EVENT_ID);

        chain
            .windows(2)
            .enumerate()
            .map(|(i, pair)| SequenceFlow::new(format!("SequenceFlow_{}", i + 1), pair[0], pair[1]))
            .collect()
    }
}

/// One processing step as declared by the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    /// Component-type tag resolved against the template registry
    #[serde(rename = "type")]
    pub type_tag: String,
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Target activity tag (informational only, never rendered)
    #[serde(default)]
    pub target_activity: Option<String>,
    /// Configuration mapping, key order preserved
    pub config: serde_json::Map<String, serde_json::Value>,
}

impl ComponentDescriptor {
    /// Display name, falling back to the id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// A directed edge between two components or a component and a synthetic node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SequenceFlow {
    pub id: String,
    pub source_ref: String,
    pub target_ref: String,
}

impl SequenceFlow {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source_ref: source.into(),
            target_ref: target.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(flow: &[&str], sequence_flows: Vec<SequenceFlow>) -> Endpoint {
        Endpoint {
            id: "ep".to_string(),
            name: "Endpoint".to_string(),
            components: Vec::new(),
            flow: flow.iter().map(|s| s.to_string()).collect(),
            sequence_flows,
        }
    }

    #[test]
    fn derives_chain_from_flow_list() {
        let flows = endpoint(&["A", "B"], Vec::new()).effective_sequence_flows();
        assert_eq!(
            flows,
            vec![
                SequenceFlow::new("SequenceFlow_1", START_EVENT_ID, "A"),
                SequenceFlow::new("SequenceFlow_2", "A", "B"),
                SequenceFlow::new("SequenceFlow_3", "B", END_EVENT_ID),
            ]
        );
    }

    #[test]
    fn declared_flows_take_precedence() {
        let declared = vec![SequenceFlow::new("f", START_EVENT_ID, END_EVENT_ID)];
        let flows = endpoint(&["A"], declared.clone()).effective_sequence_flows();
        assert_eq!(flows, declared);
    }

    #[test]
    fn deserializes_camel_case_component() {
        let value = serde_json::json!({
            "type": "groovy_script",
            "id": "Script_1",
            "targetActivity": "Script",
            "config": { "script": "main.groovy" }
        });
        let component: ComponentDescriptor = serde_json::from_value(value).unwrap();
        assert_eq!(component.type_tag, "groovy_script");
        assert_eq!(component.display_name(), "Script_1");
        assert_eq!(component.target_activity.as_deref(), Some("Script"));
    }
}
