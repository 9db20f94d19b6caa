//! Flow graph assembly
//!
//! Renders the synthetic start/end nodes and every declared component, then
//! wires them from the endpoint's sequence flows. Output order is always
//! start, declared components in declaration order, end; connectivity never
//! reorders it.

use crate::convert::{ConversionError, ConversionWarning};
use crate::models::{END_EVENT_ID, Endpoint, RenderedComponent, START_EVENT_ID, SequenceFlow};
use crate::templates::{END_EVENT_TYPE, START_EVENT_TYPE, TemplateDescriptor, registry, render_component};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use serde::{Deserialize, Serialize};
use serde_json::Map;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// What to do with a component that no sequence flow touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Render it and report an `OrphanedComponent` warning
    #[default]
    Warn,
    /// Fail the conversion
    Error,
}

impl fmt::Display for OrphanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrphanPolicy::Warn => write!(f, "warn"),
            OrphanPolicy::Error => write!(f, "error"),
        }
    }
}

impl FromStr for OrphanPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warn" | "warning" => Ok(OrphanPolicy::Warn),
            "error" | "deny" => Ok(OrphanPolicy::Error),
            _ => Err(format!("Unknown orphan policy: {}", s)),
        }
    }
}

/// One endpoint after rendering and wiring
#[derive(Debug, Clone, PartialEq)]
#[must_use = "assembled endpoints carry warnings that should be reported"]
pub struct AssembledEndpoint {
    pub endpoint_id: String,
    pub endpoint_name: String,
    /// Start node, declared components, end node
    pub components: Vec<RenderedComponent>,
    /// Effective sequence flows in declaration order
    pub sequence_flows: Vec<SequenceFlow>,
    pub warnings: Vec<ConversionWarning>,
}

impl AssembledEndpoint {
    pub fn component(&self, id: &str) -> Option<&RenderedComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn start(&self) -> Option<&RenderedComponent> {
        self.component(START_EVENT_ID)
    }

    pub fn end(&self) -> Option<&RenderedComponent> {
        self.component(END_EVENT_ID)
    }
}

/// Builds wired, rendered components for one endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowGraphAssembler {
    orphan_policy: OrphanPolicy,
}

impl FlowGraphAssembler {
    pub fn new(orphan_policy: OrphanPolicy) -> Self {
        Self { orphan_policy }
    }

    /// Render and wire every node of `endpoint`.
    ///
    /// # Errors
    ///
    /// Unknown component types, property encoding failures and sequence flows
    /// naming a node that does not exist all abort assembly. Orphaned components
    /// abort it only under [`OrphanPolicy::Error`].
    pub fn assemble(&self, endpoint: &Endpoint) -> Result<AssembledEndpoint, ConversionError> {
        let mut components = Vec::with_capacity(endpoint.components.len() + 2);

        components.push(self.render_synthetic(endpoint, START_EVENT_TYPE, START_EVENT_ID, "Start")?);
        for component in &endpoint.components {
            let template = registry().lookup(&component.type_tag).map_err(|source| {
                ConversionError::UnsupportedComponentType {
                    endpoint_id: endpoint.id.clone(),
                    component_id: component.id.clone(),
                    source,
                }
            })?;
            debug!(
                "Rendering component '{}' as {} ({})",
                component.id, template.type_tag, template.element
            );
            components.push(render(
                endpoint,
                template,
                &component.id,
                component.display_name(),
                &component.config,
            )?);
        }
        components.push(self.render_synthetic(endpoint, END_EVENT_TYPE, END_EVENT_ID, "End")?);

        let sequence_flows = endpoint.effective_sequence_flows();
        wire(endpoint, &mut components, &sequence_flows)?;

        let mut warnings = Vec::new();
        for component in &components {
            if is_synthetic(component) || !component.is_orphaned() {
                continue;
            }
            match self.orphan_policy {
                OrphanPolicy::Error => {
                    return Err(ConversionError::OrphanedComponent {
                        endpoint_id: endpoint.id.clone(),
                        component_id: component.id.clone(),
                    });
                }
                OrphanPolicy::Warn => {
                    let warning = ConversionWarning::OrphanedComponent {
                        endpoint_id: endpoint.id.clone(),
                        component_id: component.id.clone(),
                    };
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        for component_id in unreachable_components(&components, &sequence_flows) {
            let warning = ConversionWarning::UnreachableComponent {
                endpoint_id: endpoint.id.clone(),
                component_id,
            };
            warn!("{}", warning);
            warnings.push(warning);
        }

        debug!(
            "Assembled endpoint '{}': {} nodes, {} sequence flows, {} warnings",
            endpoint.id,
            components.len(),
            sequence_flows.len(),
            warnings.len()
        );

        Ok(AssembledEndpoint {
            endpoint_id: endpoint.id.clone(),
            endpoint_name: endpoint.name.clone(),
            components,
            sequence_flows,
            warnings,
        })
    }

    fn render_synthetic(
        &self,
        endpoint: &Endpoint,
        type_tag: &str,
        id: &str,
        name: &str,
    ) -> Result<RenderedComponent, ConversionError> {
        let template = registry().lookup(type_tag).map_err(|source| {
            ConversionError::UnsupportedComponentType {
                endpoint_id: endpoint.id.clone(),
                component_id: id.to_string(),
                source,
            }
        })?;
        render(endpoint, template, id, name, &Map::new())
    }
}

fn render(
    endpoint: &Endpoint,
    template: &TemplateDescriptor,
    id: &str,
    name: &str,
    config: &Map<String, serde_json::Value>,
) -> Result<RenderedComponent, ConversionError> {
    render_component(template, id, name, config).map_err(|source| ConversionError::Encoding {
        endpoint_id: endpoint.id.clone(),
        component_id: id.to_string(),
        source,
    })
}

fn is_synthetic(component: &RenderedComponent) -> bool {
    component.id == START_EVENT_ID || component.id == END_EVENT_ID
}

/// Append each flow id to its source's outgoing and its target's incoming list.
fn wire(
    endpoint: &Endpoint,
    components: &mut [RenderedComponent],
    flows: &[SequenceFlow],
) -> Result<(), ConversionError> {
    let index: HashMap<String, usize> = components
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id.clone(), i))
        .collect();

    let resolve = |flow: &SequenceFlow, node: &str| {
        index
            .get(node)
            .copied()
            .ok_or_else(|| ConversionError::DanglingReference {
                endpoint_id: endpoint.id.clone(),
                flow_id: flow.id.clone(),
                missing_id: node.to_string(),
            })
    };

    for flow in flows {
        let source = resolve(flow, &flow.source_ref)?;
        let target = resolve(flow, &flow.target_ref)?;
        components[source].outgoing.push(flow.id.clone());
        components[target].incoming.push(flow.id.clone());
    }

    Ok(())
}

/// Wired components that a depth-first walk from the start event never visits.
fn unreachable_components(components: &[RenderedComponent], flows: &[SequenceFlow]) -> Vec<String> {
    let mut graph = DiGraph::<&str, &str>::new();
    let nodes: HashMap<&str, NodeIndex> = components
        .iter()
        .map(|c| (c.id.as_str(), graph.add_node(c.id.as_str())))
        .collect();

    for flow in flows {
        if let (Some(&source), Some(&target)) = (
            nodes.get(flow.source_ref.as_str()),
            nodes.get(flow.target_ref.as_str()),
        ) {
            graph.add_edge(source, target, flow.id.as_str());
        }
    }

    let Some(&start) = nodes.get(START_EVENT_ID) else {
        return Vec::new();
    };

    let mut reached = vec![false; graph.node_count()];
    let mut dfs = Dfs::new(&graph, start);
    while let Some(node) = dfs.next(&graph) {
        reached[node.index()] = true;
    }

    components
        .iter()
        .filter(|c| !is_synthetic(c) && !c.is_orphaned())
        .filter(|c| nodes.get(c.id.as_str()).is_some_and(|n| !reached[n.index()]))
        .map(|c| c.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComponentDescriptor;
    use serde_json::json;

    fn component(type_tag: &str, id: &str) -> ComponentDescriptor {
        ComponentDescriptor {
            type_tag: type_tag.to_string(),
            id: id.to_string(),
            name: None,
            target_activity: None,
            config: Map::new(),
        }
    }

    fn endpoint(components: Vec<ComponentDescriptor>, flows: Vec<SequenceFlow>) -> Endpoint {
        Endpoint {
            id: "ep1".to_string(),
            name: "Orders".to_string(),
            components,
            flow: Vec::new(),
            sequence_flows: flows,
        }
    }

    fn linear_ab() -> Endpoint {
        endpoint(
            vec![component("content_modifier", "A"), component("filter", "B")],
            vec![
                SequenceFlow::new("f1", START_EVENT_ID, "A"),
                SequenceFlow::new("f2", "A", "B"),
                SequenceFlow::new("f3", "B", END_EVENT_ID),
            ],
        )
    }

    #[test]
    fn wires_flow_ids_in_declaration_order() {
        let assembled = FlowGraphAssembler::default().assemble(&linear_ab()).unwrap();
        let ids: Vec<_> = assembled.components.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![START_EVENT_ID, "A", "B", END_EVENT_ID]);

        let a = assembled.component("A").unwrap();
        assert_eq!(a.incoming, vec!["f1"]);
        assert_eq!(a.outgoing, vec!["f2"]);

        let start = assembled.start().unwrap();
        assert!(start.incoming.is_empty());
        assert_eq!(start.outgoing, vec!["f1"]);
        let end = assembled.end().unwrap();
        assert_eq!(end.incoming, vec!["f3"]);
        assert!(end.outgoing.is_empty());
        assert!(assembled.warnings.is_empty());
    }

    #[test]
    fn order_ignores_connectivity() {
        let ep = endpoint(
            vec![component("filter", "B"), component("filter", "A")],
            vec![
                SequenceFlow::new("f1", START_EVENT_ID, "A"),
                SequenceFlow::new("f2", "A", "B"),
                SequenceFlow::new("f3", "B", END_EVENT_ID),
            ],
        );
        let assembled = FlowGraphAssembler::default().assemble(&ep).unwrap();
        assert_eq!(assembled.components[1].id, "B");
        assert_eq!(assembled.components[2].id, "A");
    }

    #[test]
    fn dangling_target_is_fatal() {
        let ep = endpoint(
            vec![component("filter", "A")],
            vec![
                SequenceFlow::new("f1", START_EVENT_ID, "A"),
                SequenceFlow::new("f2", "A", "Ghost"),
            ],
        );
        let err = FlowGraphAssembler::default().assemble(&ep).unwrap_err();
        match err {
            ConversionError::DanglingReference {
                endpoint_id,
                flow_id,
                missing_id,
            } => {
                assert_eq!(endpoint_id, "ep1");
                assert_eq!(flow_id, "f2");
                assert_eq!(missing_id, "Ghost");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn unknown_type_names_type_and_component() {
        let ep = endpoint(vec![component("teleporter", "T1")], Vec::new());
        let err = FlowGraphAssembler::default().assemble(&ep).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("T1") && message.contains("teleporter"), "{}", message);
    }

    #[test]
    fn orphan_warns_by_default() {
        let mut ep = linear_ab();
        ep.components.push(component("filter", "Lonely"));
        let assembled = FlowGraphAssembler::new(OrphanPolicy::Warn).assemble(&ep).unwrap();
        assert_eq!(
            assembled.warnings,
            vec![ConversionWarning::OrphanedComponent {
                endpoint_id: "ep1".to_string(),
                component_id: "Lonely".to_string(),
            }]
        );
        assert!(assembled.component("Lonely").is_some());
    }

    #[test]
    fn orphan_fails_under_error_policy() {
        let mut ep = linear_ab();
        ep.components.push(component("filter", "Lonely"));
        let err = FlowGraphAssembler::new(OrphanPolicy::Error).assemble(&ep).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::OrphanedComponent { ref component_id, .. } if component_id == "Lonely"
        ));
    }

    #[test]
    fn wired_island_is_unreachable() {
        let mut ep = linear_ab();
        ep.components.push(component("filter", "X"));
        ep.components.push(component("filter", "Y"));
        ep.sequence_flows.push(SequenceFlow::new("f4", "X", "Y"));
        let assembled = FlowGraphAssembler::default().assemble(&ep).unwrap();
        let unreachable: Vec<_> = assembled
            .warnings
            .iter()
            .filter(|w| matches!(w, ConversionWarning::UnreachableComponent { .. }))
            .map(|w| w.component_id())
            .collect();
        assert_eq!(unreachable, vec!["X", "Y"]);
    }

    #[test]
    fn config_is_encoded_after_triplet() {
        let mut cm = component("content_modifier", "A");
        cm.config = json!({"bodyType": "expression"}).as_object().unwrap().clone();
        let mut ep = linear_ab();
        ep.components[0] = cm;
        let assembled = FlowGraphAssembler::default().assemble(&ep).unwrap();
        let a = assembled.component("A").unwrap();
        assert_eq!(a.properties.len(), 4);
        assert_eq!(a.properties[3].key, "bodyType");
    }

    #[test]
    fn orphan_policy_parses() {
        assert_eq!("ERROR".parse::<OrphanPolicy>().unwrap(), OrphanPolicy::Error);
        assert_eq!("warn".parse::<OrphanPolicy>().unwrap(), OrphanPolicy::Warn);
        assert!("maybe".parse::<OrphanPolicy>().is_err());
    }
}
