//! Metadata document converter
//!
//! Runs validate → assemble → lay out → serialize for one endpoint and checks
//! the result is well-formed before returning it.

use super::{ConversionError, ConversionWarning};
use crate::config::ConverterConfig;
use crate::export::BPMNExporter;
use crate::graph::FlowGraphAssembler;
use crate::layout::DiagramLayout;
use crate::models::IflowDescriptor;
use crate::validation::{MetadataValidator, ValidMetadata, check_well_formed};
use serde_json::Value;
use tracing::{info, warn};

/// Result of a successful conversion
#[derive(Debug, Clone)]
#[must_use = "conversion output contains the generated document and warnings"]
pub struct ConversionOutput {
    /// Serialized iFlow XML
    pub xml: String,
    /// Descriptor of the converted iflow, for manifest generation
    pub iflow: IflowDescriptor,
    /// Id of the endpoint that was rendered
    pub endpoint_id: String,
    /// Non-fatal findings
    pub warnings: Vec<ConversionWarning>,
}

/// Converts metadata documents into iFlow XML
#[derive(Debug, Clone, Default)]
pub struct IflowConverter {
    config: ConverterConfig,
}

impl IflowConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert the sole endpoint of `document`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use iflow_converter::convert::IflowConverter;
    /// use serde_json::json;
    ///
    /// let document = json!({
    ///     "version": "1.0",
    ///     "iflow": {"id": "Hello", "name": "Hello", "version": "1.0.0"},
    ///     "endpoints": [{
    ///         "id": "ep1",
    ///         "name": "Hello",
    ///         "components": [{"type": "content_modifier", "id": "CM_1", "config": {}}],
    ///         "flow": ["CM_1"]
    ///     }]
    /// });
    ///
    /// let output = IflowConverter::default().convert(&document).unwrap();
    /// assert!(output.xml.contains("<bpmn2:callActivity id=\"CM_1\""));
    /// assert!(output.warnings.is_empty());
    /// ```
    pub fn convert(&self, document: &Value) -> Result<ConversionOutput, ConversionError> {
        self.convert_endpoint(document, None)
    }

    /// Convert one endpoint of `document`, selected by id when given.
    pub fn convert_endpoint(
        &self,
        document: &Value,
        endpoint_id: Option<&str>,
    ) -> Result<ConversionOutput, ConversionError> {
        let valid = MetadataValidator::new()
            .validate(document)
            .map_err(ConversionError::Validation)?;
        self.convert_valid(&valid, endpoint_id)
    }

    /// Convert an already-validated document.
    pub fn convert_valid(
        &self,
        valid: &ValidMetadata,
        endpoint_id: Option<&str>,
    ) -> Result<ConversionOutput, ConversionError> {
        let iflow = &valid.document().iflow;
        let endpoint = valid.select_endpoint(endpoint_id)?;
        info!("Converting iflow '{}' endpoint '{}'", iflow.id, endpoint.id);

        let assembled = FlowGraphAssembler::new(self.config.graph.orphan_policy).assemble(endpoint)?;
        let layout = DiagramLayout::compute(
            &assembled.components,
            &assembled.sequence_flows,
            &self.config.layout,
        );
        let xml = BPMNExporter::new().export(iflow, &assembled, &layout)?;

        check_well_formed(&xml).map_err(|e| ConversionError::Xml(format!("{:#}", e)))?;

        if !assembled.warnings.is_empty() {
            warn!(
                "Endpoint '{}' converted with {} warning(s)",
                endpoint.id,
                assembled.warnings.len()
            );
        }
        info!(
            "Generated {} bytes of iFlow XML for '{}' ({} components)",
            xml.len(),
            iflow.id,
            assembled.components.len()
        );

        Ok(ConversionOutput {
            xml,
            iflow: iflow.clone(),
            endpoint_id: assembled.endpoint_id,
            warnings: assembled.warnings,
        })
    }
}

/// Convert with default configuration.
pub fn convert(document: &Value) -> Result<ConversionOutput, ConversionError> {
    IflowConverter::default().convert(document)
}
