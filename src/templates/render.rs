//! Generic template renderer
//!
//! One renderer serves every registered type: the skeleton comes from the
//! [`TemplateDescriptor`], only the property payload varies per instance.

use super::{ACTIVITY_TYPE_KEY, COMPONENT_VERSION_KEY, TemplateDescriptor, VARIANT_URI_KEY};
use crate::encoding::{EncodingError, PropertyEncoder, escape};
use crate::models::{Property, PropertyEncoding, RenderedComponent};
use serde_json::{Map, Value};

impl TemplateDescriptor {
    /// The required property triplet, in fixed order
    pub fn template_properties(&self) -> Vec<Property> {
        [
            (COMPONENT_VERSION_KEY, self.component_version),
            (ACTIVITY_TYPE_KEY, self.activity_type),
            (VARIANT_URI_KEY, self.variant_uri.as_str()),
        ]
        .into_iter()
        .map(|(key, value)| {
            Property::new(
                key,
                Value::String(value.to_string()),
                PropertyEncoding::Template,
                escape(value),
            )
        })
        .collect()
    }
}

/// Render one component from its template and configuration.
///
/// Wiring (`incoming`/`outgoing`) is left empty for the graph assembler.
pub fn render_component(
    template: &TemplateDescriptor,
    id: &str,
    name: &str,
    config: &Map<String, Value>,
) -> Result<RenderedComponent, EncodingError> {
    let mut properties = template.template_properties();
    properties.extend(PropertyEncoder::for_template(template).encode(config)?);

    Ok(RenderedComponent {
        id: id.to_string(),
        name: name.to_string(),
        type_tag: template.type_tag.to_string(),
        element: template.element,
        event_definition: template.event_definition,
        properties,
        incoming: Vec::new(),
        outgoing: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{TEMPLATE_PROPERTY_KEYS, registry};
    use serde_json::json;

    #[test]
    fn every_template_renders_the_required_triplet() {
        for template in registry().iter() {
            let rendered =
                render_component(template, "C_1", "Component", &Map::new()).unwrap();
            let keys: Vec<_> = rendered.properties.iter().map(|p| p.key.as_str()).collect();
            assert_eq!(keys, TEMPLATE_PROPERTY_KEYS, "type {}", template.type_tag);
            assert_eq!(
                rendered.property(VARIANT_URI_KEY).unwrap().value,
                template.variant_uri
            );
        }
    }

    #[test]
    fn config_follows_the_triplet() {
        let template = registry().lookup("http_receiver").unwrap();
        let config = json!({
            "address": "https://api.example.com/orders?x=1&y=2",
            "authentication": {"type": "OAuth2ClientCredentials", "credentialName": "orders"}
        });
        let rendered =
            render_component(template, "HTTP_1", "Orders API", config.as_object().unwrap())
                .unwrap();

        assert_eq!(rendered.properties.len(), 6);
        assert_eq!(
            rendered.property("address").unwrap().value,
            "https://api.example.com/orders?x=1&amp;y=2"
        );
        assert_eq!(
            rendered.property("authenticationMethod").unwrap().value,
            "OAuth2ClientCredentials"
        );
        assert_eq!(rendered.property("credentialName").unwrap().value, "orders");
        assert!(rendered.incoming.is_empty() && rendered.outgoing.is_empty());
    }

    #[test]
    fn encoding_errors_propagate() {
        let template = registry().lookup("xml_to_json_converter").unwrap();
        let config = json!({"xmlJsonPathTable": [1]});
        let err = render_component(template, "C", "C", config.as_object().unwrap()).unwrap_err();
        assert_eq!(err.key(), "xmlJsonPathTable");
    }
}
