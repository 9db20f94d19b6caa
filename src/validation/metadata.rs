//! Metadata document validation
//!
//! Structurally and semantically checks an already-parsed metadata document
//! before any generation begins. Validation fails closed: either a
//! [`ValidMetadata`] comes back, or every problem found is returned together.
//!
//! Dangling sequence-flow references and unknown component types are not checked
//! here; the graph assembler and template registry report those.

use super::ValidationError;
use super::input::validate_element_id;
use crate::models::{
    END_EVENT_ID, Endpoint, MetadataDocument, START_EVENT_ID, is_synthetic_id,
};
use crate::export::bpmn::is_document_id;
use crate::templates::{ElementKind, TEMPLATE_PROPERTY_KEYS, is_reserved_type, registry};
use jsonschema::Validator;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

const SCHEMA_SOURCE: &str = include_str!("../../schemas/iflow-metadata.schema.json");

/// Compiled validators, one per node kind
struct SchemaSet {
    document: Validator,
    iflow: Validator,
    endpoint: Validator,
    component: Validator,
    sequence_flow: Validator,
}

impl SchemaSet {
    fn compile() -> Result<Self, String> {
        let schema: Value = serde_json::from_str(SCHEMA_SOURCE)
            .map_err(|e| format!("Failed to load metadata schema: {}", e))?;

        let compile = |name: &str| -> Result<Validator, String> {
            let definition = schema
                .get("definitions")
                .and_then(|d| d.get(name))
                .ok_or_else(|| format!("Metadata schema has no '{}' definition", name))?;
            jsonschema::validator_for(definition)
                .map_err(|e| format!("Failed to compile '{}' schema: {}", name, e))
        };

        Ok(Self {
            document: compile("document")?,
            iflow: compile("iflow")?,
            endpoint: compile("endpoint")?,
            component: compile("component")?,
            sequence_flow: compile("sequenceFlow")?,
        })
    }
}

static SCHEMAS: Lazy<Result<SchemaSet, String>> = Lazy::new(SchemaSet::compile);

/// A metadata document that passed validation
///
/// Only the validator constructs this type, so holding one proves the
/// document is fit for generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidMetadata {
    document: MetadataDocument,
}

impl ValidMetadata {
    pub fn document(&self) -> &MetadataDocument {
        &self.document
    }

    pub fn into_inner(self) -> MetadataDocument {
        self.document
    }

    /// Pick the endpoint a conversion renders.
    ///
    /// With `id` the named endpoint is returned; without it the document must
    /// contain exactly one endpoint.
    pub fn select_endpoint(&self, id: Option<&str>) -> Result<&Endpoint, ValidationError> {
        let endpoints = &self.document.endpoints;
        match id {
            Some(id) => self.document.endpoint(id).ok_or_else(|| ValidationError::SchemaError {
                path: "/endpoints".to_string(),
                message: format!(
                    "endpoint '{}' not found (available: {})",
                    id,
                    endpoint_ids(endpoints)
                ),
            }),
            None if endpoints.len() == 1 => Ok(&endpoints[0]),
            None => Err(ValidationError::SchemaError {
                path: "/endpoints".to_string(),
                message: format!(
                    "document declares {} endpoints ({}); select one to convert",
                    endpoints.len(),
                    endpoint_ids(endpoints)
                ),
            }),
        }
    }
}

fn endpoint_ids(endpoints: &[Endpoint]) -> String {
    endpoints
        .iter()
        .map(|e| e.id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Metadata document validator
#[derive(Debug, Default)]
pub struct MetadataValidator;

impl MetadataValidator {
    /// Create a new metadata validator
    ///
    /// # Example
    ///
    /// ```rust
    /// use iflow_converter::validation::MetadataValidator;
    ///
    /// let validator = MetadataValidator::new();
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Validate a parsed JSON value.
    ///
    /// Runs the structural (JSON Schema) pass, deserializes into the typed model,
    /// then runs the semantic pass. Structural errors stop validation before the
    /// semantic pass.
    pub fn validate(&self, value: &Value) -> Result<ValidMetadata, Vec<ValidationError>> {
        let errors = self.check_structure(value);
        if !errors.is_empty() {
            debug!("Metadata failed structural validation with {} errors", errors.len());
            return Err(errors);
        }

        let document: MetadataDocument =
            serde_json::from_value(value.clone()).map_err(|e| {
                vec![ValidationError::SchemaError {
                    path: String::new(),
                    message: format!("Failed to read metadata document: {}", e),
                }]
            })?;

        self.validate_document(document)
    }

    /// Run the semantic pass on an already-typed document.
    pub fn validate_document(
        &self,
        document: MetadataDocument,
    ) -> Result<ValidMetadata, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let mut endpoint_ids = HashSet::new();
        for (index, endpoint) in document.endpoints.iter().enumerate() {
            let path = format!("/endpoints/{}", index);
            if !endpoint_ids.insert(endpoint.id.as_str()) {
                errors.push(schema_error(
                    format!("{}/id", path),
                    format!("duplicate endpoint id '{}'", endpoint.id),
                ));
            }
            check_endpoint(&path, endpoint, &mut errors);
        }

        if errors.is_empty() {
            debug!(
                "Metadata for iflow '{}' validated ({} endpoints)",
                document.iflow.id,
                document.endpoints.len()
            );
            Ok(ValidMetadata { document })
        } else {
            Err(errors)
        }
    }

    fn check_structure(&self, value: &Value) -> Vec<ValidationError> {
        let schemas = match SCHEMAS.as_ref() {
            Ok(schemas) => schemas,
            Err(message) => {
                return vec![schema_error(String::new(), message.clone())];
            }
        };

        let mut errors = Vec::new();
        run_schema(&schemas.document, value, "", &mut errors);

        if let Some(iflow) = value.get("iflow") {
            run_schema(&schemas.iflow, iflow, "/iflow", &mut errors);
        }

        let endpoints = value
            .get("endpoints")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for (i, endpoint) in endpoints.iter().enumerate() {
            let path = format!("/endpoints/{}", i);
            run_schema(&schemas.endpoint, endpoint, &path, &mut errors);

            for (key, validator) in [
                ("components", &schemas.component),
                ("sequenceFlows", &schemas.sequence_flow),
            ] {
                let items = endpoint
                    .get(key)
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                for (j, item) in items.iter().enumerate() {
                    run_schema(validator, item, &format!("{}/{}/{}", path, key, j), &mut errors);
                }
            }
        }

        errors
    }
}

fn run_schema(validator: &Validator, value: &Value, path: &str, errors: &mut Vec<ValidationError>) {
    for error in validator.iter_errors(value) {
        errors.push(schema_error(path.to_string(), error.to_string()));
    }
}

fn schema_error(path: String, message: String) -> ValidationError {
    ValidationError::SchemaError { path, message }
}

fn check_endpoint(path: &str, endpoint: &Endpoint, errors: &mut Vec<ValidationError>) {
    if let Err(e) = validate_element_id("endpoint id", &endpoint.id) {
        errors.push(schema_error(format!("{}/id", path), e.to_string()));
    }

    let mut component_ids = HashSet::new();
    let mut start_kinds = HashSet::new();
    let mut end_kinds = HashSet::new();
    for (i, component) in endpoint.components.iter().enumerate() {
        let component_path = format!("{}/components/{}", path, i);

        if is_reserved_type(&component.type_tag) {
            errors.push(ValidationError::ReservedIdReuse {
                endpoint_id: endpoint.id.clone(),
                component_id: component.id.clone(),
                reserved: component.type_tag.clone(),
            });
        }
        if is_synthetic_id(&component.id) {
            errors.push(ValidationError::ReservedIdReuse {
                endpoint_id: endpoint.id.clone(),
                component_id: component.id.clone(),
                reserved: component.id.clone(),
            });
        } else if is_document_id(&component.id) {
            errors.push(schema_error(
                format!("{}/id", component_path),
                format!("component id '{}' collides with a document element id", component.id),
            ));
        } else if let Err(e) = validate_element_id("component id", &component.id) {
            errors.push(schema_error(format!("{}/id", component_path), e.to_string()));
        }

        if !component_ids.insert(component.id.as_str()) {
            errors.push(schema_error(
                format!("{}/id", component_path),
                format!("duplicate component id '{}'", component.id),
            ));
        }

        // Unknown types are reported by the registry during assembly.
        if let Ok(template) = registry().lookup(&component.type_tag) {
            match template.element {
                ElementKind::StartEvent => {
                    start_kinds.insert(component.id.as_str());
                }
                ElementKind::EndEvent => {
                    end_kinds.insert(component.id.as_str());
                }
                _ => {}
            }
        }

        for key in TEMPLATE_PROPERTY_KEYS {
            if component.config.contains_key(key) {
                errors.push(schema_error(
                    format!("{}/config/{}", component_path, key),
                    format!(
                        "'{}' is fixed by the '{}' template and cannot be configured",
                        key, component.type_tag
                    ),
                ));
            }
        }
    }

    for (i, id) in endpoint.flow.iter().enumerate() {
        if !component_ids.contains(id.as_str()) {
            errors.push(schema_error(
                format!("{}/flow/{}", path, i),
                format!("flow entry '{}' does not name a declared component", id),
            ));
        }
    }

    let declared = !endpoint.sequence_flows.is_empty();
    let effective = endpoint.effective_sequence_flows();
    let mut flow_ids = HashSet::new();
    for (i, flow) in effective.iter().enumerate() {
        let flow_path = if declared {
            format!("{}/sequenceFlows/{}", path, i)
        } else {
            format!("{}/flow", path)
        };

        if declared && let Err(e) = validate_element_id("sequence flow id", &flow.id) {
            errors.push(schema_error(format!("{}/id", flow_path), e.to_string()));
        }
        if !flow_ids.insert(flow.id.as_str()) {
            errors.push(schema_error(
                format!("{}/id", flow_path),
                format!("duplicate sequence flow id '{}'", flow.id),
            ));
        }
        if component_ids.contains(flow.id.as_str())
            || is_synthetic_id(&flow.id)
            || is_document_id(&flow.id)
        {
            errors.push(schema_error(
                format!("{}/id", flow_path),
                format!("sequence flow id '{}' collides with a node id", flow.id),
            ));
        }
        if flow.target_ref == START_EVENT_ID || start_kinds.contains(flow.target_ref.as_str()) {
            errors.push(schema_error(
                format!("{}/targetRef", flow_path),
                format!(
                    "sequence flow '{}' cannot enter start event '{}'",
                    flow.id, flow.target_ref
                ),
            ));
        }
        if flow.source_ref == END_EVENT_ID || end_kinds.contains(flow.source_ref.as_str()) {
            errors.push(schema_error(
                format!("{}/sourceRef", flow_path),
                format!(
                    "sequence flow '{}' cannot leave end event '{}'",
                    flow.id, flow.source_ref
                ),
            ));
        }
    }

    if !effective.iter().any(|f| f.source_ref == START_EVENT_ID) {
        errors.push(schema_error(
            path.to_string(),
            format!("no sequence flow leaves {}", START_EVENT_ID),
        ));
    }
    if !effective.iter().any(|f| f.target_ref == END_EVENT_ID) {
        errors.push(schema_error(
            path.to_string(),
            format!("no sequence flow enters {}", END_EVENT_ID),
        ));
    }
}

/// Validate a parsed metadata document with a default [`MetadataValidator`].
pub fn validate(value: &Value) -> Result<ValidMetadata, Vec<ValidationError>> {
    MetadataValidator::new().validate(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(components: Value, sequence_flows: Value) -> Value {
        json!({
            "version": "1.0",
            "iflow": {"id": "Orders", "name": "Orders", "version": "1.0.0"},
            "endpoints": [{
                "id": "ep1",
                "name": "Orders",
                "components": components,
                "sequenceFlows": sequence_flows
            }]
        })
    }

    fn linear() -> Value {
        document(
            json!([{"type": "content_modifier", "id": "A", "config": {}}]),
            json!([
                {"id": "f1", "sourceRef": "StartEvent_2", "targetRef": "A"},
                {"id": "f2", "sourceRef": "A", "targetRef": "EndEvent_2"}
            ]),
        )
    }

    #[test]
    fn accepts_a_valid_document() {
        let valid = validate(&linear()).unwrap();
        assert_eq!(valid.document().endpoints[0].components[0].id, "A");
        assert_eq!(valid.select_endpoint(None).unwrap().id, "ep1");
    }

    #[test]
    fn reports_missing_required_fields_with_paths() {
        let value = json!({
            "version": "1.0",
            "iflow": {"id": "x", "name": "x", "version": "1"},
            "endpoints": [{"id": "ep", "name": "n", "components": [{"id": "A", "config": {}}]}]
        });
        let errors = validate(&value).unwrap_err();
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ValidationError::SchemaError { path, message } => {
                assert_eq!(path, "/endpoints/0/components/0");
                assert!(message.contains("type"), "{}", message);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn collects_every_structural_error() {
        let errors = validate(&json!({"version": 1})).unwrap_err();
        assert!(errors.len() >= 3, "{:?}", errors);
        assert!(errors.iter().all(|e| matches!(e, ValidationError::SchemaError { .. })));
    }

    #[test]
    fn reserved_type_is_reused_id() {
        let value = document(
            json!([{"type": "start_event", "id": "MyStart", "config": {}}]),
            json!([{"id": "f1", "sourceRef": "StartEvent_2", "targetRef": "EndEvent_2"}]),
        );
        let errors = validate(&value).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::ReservedIdReuse {
                endpoint_id: "ep1".to_string(),
                component_id: "MyStart".to_string(),
                reserved: "start_event".to_string(),
            }]
        );
    }

    #[test]
    fn synthetic_id_is_reused_id() {
        let value = document(
            json!([{"type": "content_modifier", "id": "EndEvent_2", "config": {}}]),
            json!([{"id": "f1", "sourceRef": "StartEvent_2", "targetRef": "EndEvent_2"}]),
        );
        let errors = validate(&value).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::ReservedIdReuse { reserved, .. } if reserved == "EndEvent_2"
        )));
    }

    #[test]
    fn duplicate_component_ids_are_rejected() {
        let value = document(
            json!([
                {"type": "filter", "id": "A", "config": {}},
                {"type": "filter", "id": "A", "config": {}}
            ]),
            json!([{"id": "f1", "sourceRef": "StartEvent_2", "targetRef": "EndEvent_2"}]),
        );
        let errors = validate(&value).unwrap_err();
        assert!(errors[0].to_string().contains("duplicate component id 'A'"));
    }

    #[test]
    fn template_keys_cannot_be_configured() {
        let value = document(
            json!([{"type": "filter", "id": "A", "config": {"activityType": "Hack"}}]),
            json!([{"id": "f1", "sourceRef": "StartEvent_2", "targetRef": "EndEvent_2"}]),
        );
        let errors = validate(&value).unwrap_err();
        assert!(matches!(
            &errors[0],
            ValidationError::SchemaError { path, .. } if path == "/endpoints/0/components/0/config/activityType"
        ));
    }

    #[test]
    fn start_must_have_outgoing_and_end_incoming() {
        let value = document(
            json!([{"type": "filter", "id": "A", "config": {}}]),
            json!([{"id": "f1", "sourceRef": "A", "targetRef": "A"}]),
        );
        let messages: Vec<_> = validate(&value)
            .unwrap_err()
            .iter()
            .map(|e| e.to_string())
            .collect();
        assert!(messages.iter().any(|m| m.contains("no sequence flow leaves StartEvent_2")));
        assert!(messages.iter().any(|m| m.contains("no sequence flow enters EndEvent_2")));
    }

    #[test]
    fn flows_cannot_enter_start_or_leave_end() {
        let value = document(
            json!([]),
            json!([
                {"id": "f1", "sourceRef": "StartEvent_2", "targetRef": "EndEvent_2"},
                {"id": "f2", "sourceRef": "EndEvent_2", "targetRef": "StartEvent_2"}
            ]),
        );
        let errors = validate(&value).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn start_and_end_kind_components_keep_one_way_wiring() {
        let value = json!({
            "version": "1.0",
            "iflow": {"id": "x", "name": "x", "version": "1"},
            "endpoints": [{
                "id": "ep", "name": "n",
                "components": [
                    {"type": "timer_start_event", "id": "T", "config": {}},
                    {"type": "error_end_event", "id": "X", "config": {}}
                ],
                "flow": ["T", "X"]
            }]
        });
        let messages: Vec<_> = validate(&value)
            .unwrap_err()
            .iter()
            .map(|e| e.to_string())
            .collect();
        assert_eq!(messages.len(), 2, "{:?}", messages);
        assert!(messages[0].contains("cannot enter start event 'T'"));
        assert!(messages[1].contains("cannot leave end event 'X'"));
    }

    #[test]
    fn error_end_event_may_terminate_a_branch() {
        let value = document(
            json!([
                {"type": "router", "id": "R", "config": {}},
                {"type": "error_end_event", "id": "Fail", "config": {}}
            ]),
            json!([
                {"id": "f1", "sourceRef": "StartEvent_2", "targetRef": "R"},
                {"id": "f2", "sourceRef": "R", "targetRef": "Fail"},
                {"id": "f3", "sourceRef": "R", "targetRef": "EndEvent_2"}
            ]),
        );
        assert!(validate(&value).is_ok());
    }

    #[test]
    fn derived_flow_ids_cannot_reuse_component_ids() {
        let value = json!({
            "version": "1.0",
            "iflow": {"id": "x", "name": "x", "version": "1"},
            "endpoints": [{
                "id": "ep", "name": "n",
                "components": [
                    {"type": "filter", "id": "SequenceFlow_1", "config": {}},
                    {"type": "filter", "id": "B", "config": {}}
                ],
                "flow": ["SequenceFlow_1", "B"]
            }]
        });
        let errors = validate(&value).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::SchemaError {
                path: "/endpoints/0/flow/id".to_string(),
                message: "sequence flow id 'SequenceFlow_1' collides with a node id".to_string(),
            }]
        );
    }

    #[test]
    fn exporter_ids_are_not_available() {
        let value = document(
            json!([{"type": "filter", "id": "Process_1", "config": {}}]),
            json!([
                {"id": "f1", "sourceRef": "StartEvent_2", "targetRef": "Process_1"},
                {"id": "BPMNShape_A", "sourceRef": "Process_1", "targetRef": "EndEvent_2"}
            ]),
        );
        let paths: Vec<_> = validate(&value)
            .unwrap_err()
            .iter()
            .map(|e| e.path().unwrap_or_default().to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "/endpoints/0/components/0/id".to_string(),
                "/endpoints/0/sequenceFlows/1/id".to_string()
            ]
        );
    }

    #[test]
    fn dangling_references_are_left_to_the_assembler() {
        let value = document(
            json!([{"type": "filter", "id": "A", "config": {}}]),
            json!([
                {"id": "f1", "sourceRef": "StartEvent_2", "targetRef": "A"},
                {"id": "f2", "sourceRef": "A", "targetRef": "Ghost"},
                {"id": "f3", "sourceRef": "A", "targetRef": "EndEvent_2"}
            ]),
        );
        assert!(validate(&value).is_ok());
    }

    #[test]
    fn flow_list_must_name_components() {
        let value = json!({
            "version": "1.0",
            "iflow": {"id": "x", "name": "x", "version": "1"},
            "endpoints": [{
                "id": "ep", "name": "n",
                "components": [{"type": "filter", "id": "A", "config": {}}],
                "flow": ["A", "B"]
            }]
        });
        let errors = validate(&value).unwrap_err();
        assert!(errors[0].to_string().contains("'B' does not name a declared component"));
    }

    #[test]
    fn endpoint_selection() {
        let mut value = linear();
        let second = value["endpoints"][0].clone();
        let mut second = second.as_object().unwrap().clone();
        second.insert("id".to_string(), json!("ep2"));
        value["endpoints"].as_array_mut().unwrap().push(Value::Object(second));

        let valid = validate(&value).unwrap();
        assert!(valid.select_endpoint(None).is_err());
        assert_eq!(valid.select_endpoint(Some("ep2")).unwrap().id, "ep2");
        assert!(valid.select_endpoint(Some("nope")).is_err());
    }
}
