//! BPMN exporter
//!
//! Serializes an assembled, laid-out endpoint into a BPMN 2.0 iFlow document:
//! a collaboration with one participant, the integration process, and the
//! diagram. Element and attribute order is fixed, so identical input always
//! produces identical bytes.

use crate::encoding::escape;
use crate::export::ExportError;
use crate::graph::AssembledEndpoint;
use crate::layout::{Bounds, DiagramLayout};
use crate::models::{IflowDescriptor, Property, RenderedComponent};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

const BPMN2_NS: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";
const BPMNDI_NS: &str = "http://www.omg.org/spec/BPMN/20100524/DI";
const DC_NS: &str = "http://www.omg.org/spec/DD/20100524/DC";
const DI_NS: &str = "http://www.omg.org/spec/DD/20100524/DI";
const IFL_NS: &str = "http:///com.sap.ifl.model/Ifl.xsd";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

pub const DEFINITIONS_ID: &str = "Definitions_1";
pub const COLLABORATION_ID: &str = "Collaboration_1";
pub const PARTICIPANT_ID: &str = "Participant_Process_1";
pub const PROCESS_ID: &str = "Process_1";
pub const DIAGRAM_ID: &str = "BPMNDiagram_1";
pub const PLANE_ID: &str = "BPMNPlane_1";

/// Ids of the fixed document-level elements
pub const DOCUMENT_IDS: [&str; 6] = [
    DEFINITIONS_ID,
    COLLABORATION_ID,
    PARTICIPANT_ID,
    PROCESS_ID,
    DIAGRAM_ID,
    PLANE_ID,
];

const SHAPE_ID_PREFIX: &str = "BPMNShape_";
const EDGE_ID_PREFIX: &str = "BPMNEdge_";

/// Returns true when `id` could clash with an id the exporter assigns itself.
pub fn is_document_id(id: &str) -> bool {
    DOCUMENT_IDS.contains(&id) || id.starts_with(SHAPE_ID_PREFIX) || id.starts_with(EDGE_ID_PREFIX)
}

/// Integration-flow level settings carried by the collaboration
const COLLABORATION_PROPERTIES: &[(&str, &str)] = &[
    ("namespaceMapping", ""),
    ("httpSessionHandling", "None"),
    ("accessControlMaxAge", ""),
    ("returnExceptionToSender", "false"),
    ("log", "All events"),
    ("corsEnabled", "false"),
    ("componentVersion", "1.2"),
    ("ServerTrace", "false"),
    ("allowedHeaderList", ""),
    (
        "cmdVariantUri",
        "ctype::IFlowVariant/cname::IFlowConfiguration/version::1.2.4",
    ),
];

const PROCESS_PROPERTIES: &[(&str, &str)] = &[
    ("transactionTimeout", "30"),
    ("componentVersion", "1.1"),
    (
        "cmdVariantUri",
        "ctype::FlowElementVariant/cname::IntegrationProcess/version::1.1.3",
    ),
    ("transactionalHandling", "Not Required"),
];

/// BPMN Exporter
///
/// Writes the final iFlow XML for one endpoint.
#[derive(Debug, Default)]
pub struct BPMNExporter;

impl BPMNExporter {
    /// Create a new BPMNExporter
    pub fn new() -> Self {
        Self
    }

    /// Serialize an assembled endpoint into an iFlow document.
    ///
    /// # Arguments
    ///
    /// * `iflow` - The iflow descriptor; its name is written on `bpmn2:definitions`.
    /// * `endpoint` - Rendered and wired components plus the sequence flows.
    /// * `layout` - Shapes and edges computed for `endpoint`.
    ///
    /// # Returns
    ///
    /// The XML document as a string.
    pub fn export(
        &self,
        iflow: &IflowDescriptor,
        endpoint: &AssembledEndpoint,
        layout: &DiagramLayout,
    ) -> Result<String, ExportError> {
        let mut doc = DocumentWriter::new();

        doc.declaration()?;
        doc.start(
            "bpmn2:definitions",
            &[
                ("xmlns:bpmn2", BPMN2_NS),
                ("xmlns:bpmndi", BPMNDI_NS),
                ("xmlns:dc", DC_NS),
                ("xmlns:di", DI_NS),
                ("xmlns:ifl", IFL_NS),
                ("xmlns:xsi", XSI_NS),
                ("id", DEFINITIONS_ID),
                ("name", iflow.name.as_str()),
            ],
        )?;

        write_collaboration(&mut doc, endpoint)?;
        write_process(&mut doc, endpoint)?;
        write_diagram(&mut doc, layout)?;

        doc.end("bpmn2:definitions")?;
        doc.finish()
    }
}

fn write_collaboration(doc: &mut DocumentWriter, endpoint: &AssembledEndpoint) -> Result<(), ExportError> {
    doc.start(
        "bpmn2:collaboration",
        &[("id", COLLABORATION_ID), ("name", "Default Collaboration")],
    )?;
    doc.fixed_properties(COLLABORATION_PROPERTIES)?;

    doc.start(
        "bpmn2:participant",
        &[
            ("id", PARTICIPANT_ID),
            ("ifl:type", "IntegrationProcess"),
            ("name", endpoint.endpoint_name.as_str()),
            ("processRef", PROCESS_ID),
        ],
    )?;
    doc.empty("bpmn2:extensionElements", &[])?;
    doc.end("bpmn2:participant")?;

    doc.end("bpmn2:collaboration")
}

fn write_process(doc: &mut DocumentWriter, endpoint: &AssembledEndpoint) -> Result<(), ExportError> {
    doc.start(
        "bpmn2:process",
        &[("id", PROCESS_ID), ("name", endpoint.endpoint_name.as_str())],
    )?;
    doc.fixed_properties(PROCESS_PROPERTIES)?;

    for component in &endpoint.components {
        write_component(doc, component)?;
    }

    for flow in &endpoint.sequence_flows {
        doc.empty(
            "bpmn2:sequenceFlow",
            &[
                ("id", flow.id.as_str()),
                ("isImmediate", "true"),
                ("sourceRef", flow.source_ref.as_str()),
                ("targetRef", flow.target_ref.as_str()),
            ],
        )?;
    }

    doc.end("bpmn2:process")
}

fn write_component(doc: &mut DocumentWriter, component: &RenderedComponent) -> Result<(), ExportError> {
    let element = format!("bpmn2:{}", component.element.element_name());

    doc.start(&element, &[("id", component.id.as_str()), ("name", component.name.as_str())])?;

    doc.start("bpmn2:extensionElements", &[])?;
    for property in &component.properties {
        doc.property(property)?;
    }
    doc.end("bpmn2:extensionElements")?;

    for flow_id in &component.incoming {
        doc.text_element("bpmn2:incoming", flow_id)?;
    }
    for flow_id in &component.outgoing {
        doc.text_element("bpmn2:outgoing", flow_id)?;
    }

    if let Some(definition) = component.event_definition {
        doc.empty(&format!("bpmn2:{}", definition.element_name()), &[])?;
    }

    doc.end(&element)
}

fn write_diagram(doc: &mut DocumentWriter, layout: &DiagramLayout) -> Result<(), ExportError> {
    doc.start(
        "bpmndi:BPMNDiagram",
        &[("id", DIAGRAM_ID), ("name", "Default Collaboration Diagram")],
    )?;
    doc.start(
        "bpmndi:BPMNPlane",
        &[("bpmnElement", COLLABORATION_ID), ("id", PLANE_ID)],
    )?;

    if let Some(pool) = &layout.pool {
        write_shape(doc, PARTICIPANT_ID, pool)?;
    }
    for shape in &layout.shapes {
        write_shape(doc, &shape.element_id, &shape.bounds)?;
    }

    for edge in &layout.edges {
        let id = format!("{}{}", EDGE_ID_PREFIX, edge.flow_id);
        let source = shape_id(&edge.source_id);
        let target = shape_id(&edge.target_id);
        doc.start(
            "bpmndi:BPMNEdge",
            &[
                ("bpmnElement", edge.flow_id.as_str()),
                ("id", id.as_str()),
                ("sourceElement", source.as_str()),
                ("targetElement", target.as_str()),
            ],
        )?;
        for point in &edge.waypoints {
            doc.empty(
                "di:waypoint",
                &[
                    ("x", point.x.to_string().as_str()),
                    ("xsi:type", "dc:Point"),
                    ("y", point.y.to_string().as_str()),
                ],
            )?;
        }
        doc.end("bpmndi:BPMNEdge")?;
    }

    doc.end("bpmndi:BPMNPlane")?;
    doc.end("bpmndi:BPMNDiagram")
}

fn write_shape(doc: &mut DocumentWriter, element_id: &str, bounds: &Bounds) -> Result<(), ExportError> {
    let id = shape_id(element_id);
    doc.start(
        "bpmndi:BPMNShape",
        &[("bpmnElement", element_id), ("id", id.as_str())],
    )?;
    doc.empty(
        "dc:Bounds",
        &[
            ("height", bounds.height.to_string().as_str()),
            ("width", bounds.width.to_string().as_str()),
            ("x", bounds.x.to_string().as_str()),
            ("y", bounds.y.to_string().as_str()),
        ],
    )?;
    doc.end("bpmndi:BPMNShape")
}

/// Diagram shape id for a process element
pub fn shape_id(element_id: &str) -> String {
    format!("{}{}", SHAPE_ID_PREFIX, element_id)
}

fn xml_error<E: std::fmt::Display>(err: E) -> ExportError {
    ExportError::SerializationError(format!("Failed to write XML: {}", err))
}

/// Thin event-level wrapper over an indenting quick-xml writer
struct DocumentWriter {
    writer: Writer<Vec<u8>>,
}

impl DocumentWriter {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn declaration(&mut self) -> Result<(), ExportError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_error)
    }

    fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), ExportError> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Start(element)).map_err(xml_error)
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), ExportError> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Empty(element)).map_err(xml_error)
    }

    fn end(&mut self, name: &str) -> Result<(), ExportError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_error)
    }

    /// Element with raw text content, escaped on write
    fn text_element(&mut self, name: &str, text: &str) -> Result<(), ExportError> {
        self.start(name, &[])?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_error)?;
        self.end(name)
    }

    /// Element whose content is already escaped and must not be escaped again
    fn escaped_element(&mut self, name: &str, escaped: &str) -> Result<(), ExportError> {
        if escaped.is_empty() {
            return self.empty(name, &[]);
        }
        self.start(name, &[])?;
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(escaped)))
            .map_err(xml_error)?;
        self.end(name)
    }

    fn property(&mut self, property: &Property) -> Result<(), ExportError> {
        self.property_entry(&property.key, &property.value)
    }

    fn property_entry(&mut self, key: &str, escaped_value: &str) -> Result<(), ExportError> {
        self.start("ifl:property", &[])?;
        self.text_element("key", key)?;
        self.escaped_element("value", escaped_value)?;
        self.end("ifl:property")
    }

    fn fixed_properties(&mut self, properties: &[(&str, &str)]) -> Result<(), ExportError> {
        self.start("bpmn2:extensionElements", &[])?;
        for (key, value) in properties {
            self.property_entry(key, &escape(value))?;
        }
        self.end("bpmn2:extensionElements")
    }

    fn finish(self) -> Result<String, ExportError> {
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| ExportError::SerializationError(format!("Generated XML is not UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::FlowGraphAssembler;
    use crate::layout::LayoutConfig;
    use crate::models::{ComponentDescriptor, Endpoint, SequenceFlow};
    use serde_json::json;

    fn iflow() -> IflowDescriptor {
        IflowDescriptor {
            id: "Orders_Sync".to_string(),
            name: "Orders & Returns".to_string(),
            description: String::new(),
            version: "1.0.0".to_string(),
        }
    }

    fn export(config: serde_json::Value) -> String {
        let endpoint = Endpoint {
            id: "ep1".to_string(),
            name: "Orders".to_string(),
            components: vec![ComponentDescriptor {
                type_tag: "xml_to_json_converter".to_string(),
                id: "Conv_1".to_string(),
                name: Some("To <JSON>".to_string()),
                target_activity: None,
                config: config.as_object().unwrap().clone(),
            }],
            flow: vec!["Conv_1".to_string()],
            sequence_flows: Vec::<SequenceFlow>::new(),
        };
        let assembled = FlowGraphAssembler::default().assemble(&endpoint).unwrap();
        let layout =
            DiagramLayout::compute(&assembled.components, &assembled.sequence_flows, &LayoutConfig::default());
        BPMNExporter::new().export(&iflow(), &assembled, &layout).unwrap()
    }

    #[test]
    fn writes_fixed_section_ids() {
        let xml = export(json!({}));
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        for id in [DEFINITIONS_ID, COLLABORATION_ID, PARTICIPANT_ID, PROCESS_ID, DIAGRAM_ID, PLANE_ID] {
            assert!(xml.contains(&format!("id=\"{}\"", id)), "missing {}", id);
        }
        assert!(xml.contains("name=\"Orders &amp; Returns\""));
        assert!(xml.contains("name=\"To &lt;JSON&gt;\""));
    }

    #[test]
    fn property_values_are_not_escaped_twice() {
        let xml = export(json!({"xmlJsonPathTable": ["/a/b"]}));
        assert!(xml.contains(
            "<value>&lt;row&gt;&lt;cell&gt;/a/b&lt;/cell&gt;&lt;cell&gt;&lt;/cell&gt;&lt;/row&gt;</value>"
        ));
        assert!(!xml.contains("&amp;lt;"));
    }

    #[test]
    fn writes_wiring_and_event_definitions() {
        let xml = export(json!({}));
        assert!(xml.contains("<bpmn2:startEvent id=\"StartEvent_2\" name=\"Start\">"));
        assert!(xml.contains("<bpmn2:outgoing>SequenceFlow_1</bpmn2:outgoing>"));
        assert!(xml.contains("<bpmn2:messageEventDefinition/>"));
        assert_eq!(xml.matches("<bpmn2:sequenceFlow ").count(), 2);
        assert!(xml.contains("id=\"BPMNShape_Conv_1\""));
        assert!(xml.contains("id=\"BPMNEdge_SequenceFlow_2\""));
    }

    #[test]
    fn recognises_exporter_owned_ids() {
        assert!(is_document_id(PROCESS_ID));
        assert!(is_document_id(&shape_id("A")));
        assert!(is_document_id("BPMNEdge_f1"));
        assert!(!is_document_id("Process_2"));
        assert!(!is_document_id("SequenceFlow_1"));
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(export(json!({"a": 1})), export(json!({"a": 1})));
    }
}
