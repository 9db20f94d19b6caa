//! Component template registry
//!
//! Maps a component-type tag to a fixed structural skeleton: the BPMN element
//! kind, the required property triplet (component version, activity type,
//! variant URI) and the per-type flattening rules used by the property encoder.
//!
//! The registry is built once per process and is read-only afterwards, so it can
//! be shared between concurrent conversions without synchronization.

mod catalog;
pub mod render;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub use render::render_component;

/// Property key carrying the component version
pub const COMPONENT_VERSION_KEY: &str = "componentVersion";

/// Property key carrying the activity type
pub const ACTIVITY_TYPE_KEY: &str = "activityType";

/// Property key carrying the variant URI
pub const VARIANT_URI_KEY: &str = "cmdVariantUri";

/// Property keys owned by the template; configuration may not supply them
pub const TEMPLATE_PROPERTY_KEYS: [&str; 3] =
    [COMPONENT_VERSION_KEY, ACTIVITY_TYPE_KEY, VARIANT_URI_KEY];

/// Type tag used for the synthetic start node
pub const START_EVENT_TYPE: &str = "start_event";

/// Type tag used for the synthetic end node
pub const END_EVENT_TYPE: &str = "end_event";

/// Type tags reserved for the synthetic nodes; callers may not declare them
pub const RESERVED_TYPE_TAGS: [&str; 2] = [START_EVENT_TYPE, END_EVENT_TYPE];

/// Returns true when `type_tag` is reserved for the synthetic start/end nodes.
pub fn is_reserved_type(type_tag: &str) -> bool {
    RESERVED_TYPE_TAGS.contains(&type_tag)
}

/// BPMN element a component renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    CallActivity,
    ServiceTask,
    ExclusiveGateway,
    ParallelGateway,
    StartEvent,
    EndEvent,
    IntermediateCatchEvent,
    SubProcess,
}

impl ElementKind {
    /// Local element name inside the `bpmn2` namespace
    pub fn element_name(&self) -> &'static str {
        match self {
            ElementKind::CallActivity => "callActivity",
            ElementKind::ServiceTask => "serviceTask",
            ElementKind::ExclusiveGateway => "exclusiveGateway",
            ElementKind::ParallelGateway => "parallelGateway",
            ElementKind::StartEvent => "startEvent",
            ElementKind::EndEvent => "endEvent",
            ElementKind::IntermediateCatchEvent => "intermediateCatchEvent",
            ElementKind::SubProcess => "subProcess",
        }
    }

    pub fn is_event(&self) -> bool {
        matches!(
            self,
            ElementKind::StartEvent | ElementKind::EndEvent | ElementKind::IntermediateCatchEvent
        )
    }

    pub fn is_gateway(&self) -> bool {
        matches!(
            self,
            ElementKind::ExclusiveGateway | ElementKind::ParallelGateway
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

/// Event definition child emitted inside event elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventDefinition {
    Message,
    Timer,
    Error,
    Escalation,
    Terminate,
}

impl EventDefinition {
    pub fn element_name(&self) -> &'static str {
        match self {
            EventDefinition::Message => "messageEventDefinition",
            EventDefinition::Timer => "timerEventDefinition",
            EventDefinition::Error => "errorEventDefinition",
            EventDefinition::Escalation => "escalationEventDefinition",
            EventDefinition::Terminate => "terminateEventDefinition",
        }
    }
}

/// Grouping of type tags, used for listing and auditing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Process,
    Event,
    Routing,
    Transformation,
    Security,
    ScriptFilter,
    Persistence,
    ExternalCall,
    Adapter,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Process,
        Category::Event,
        Category::Routing,
        Category::Transformation,
        Category::Security,
        Category::ScriptFilter,
        Category::Persistence,
        Category::ExternalCall,
        Category::Adapter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Process => "process",
            Category::Event => "event",
            Category::Routing => "routing",
            Category::Transformation => "transformation",
            Category::Security => "security",
            Category::ScriptFilter => "script-filter",
            Category::Persistence => "persistence",
            Category::ExternalCall => "external-call",
            Category::Adapter => "adapter",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Adapter direction as seen from the integration flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Sender,
    Receiver,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Sender => "Sender",
            Direction::Receiver => "Receiver",
        }
    }

    fn activity_type(&self) -> &'static str {
        match self {
            Direction::Sender => "SenderAdapter",
            Direction::Receiver => "ReceiverAdapter",
        }
    }
}

/// Maps a dotted nested-config path to the flat property name it renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenRule {
    pub path: &'static str,
    pub property: &'static str,
}

pub(crate) const fn rule(path: &'static str, property: &'static str) -> FlattenRule {
    FlattenRule { path, property }
}

/// Fixed skeleton for one component type
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDescriptor {
    pub type_tag: &'static str,
    pub category: Category,
    pub element: ElementKind,
    pub event_definition: Option<EventDefinition>,
    pub component_version: &'static str,
    pub activity_type: &'static str,
    pub variant_uri: String,
    pub flattening: &'static [FlattenRule],
}

impl TemplateDescriptor {
    /// Flat property name for a dotted nested path, if the type maps it explicitly.
    pub fn flattened_name(&self, path: &str) -> Option<&'static str> {
        self.flattening
            .iter()
            .find(|r| r.path == path)
            .map(|r| r.property)
    }
}

/// Error during template lookup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("Unsupported component type: {type_tag}")]
    UnsupportedComponentType { type_tag: String },
}

/// Immutable table of component templates
#[derive(Debug)]
pub struct TemplateRegistry {
    entries: Vec<TemplateDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl TemplateRegistry {
    fn build() -> Self {
        let mut entries = Vec::new();

        for step in catalog::STEPS {
            entries.push(TemplateDescriptor {
                type_tag: step.tag,
                category: step.category,
                element: step.element,
                event_definition: step.event,
                component_version: step.version,
                activity_type: step.activity_type,
                variant_uri: format!(
                    "ctype::FlowstepVariant/cname::{}/version::{}",
                    step.cname, step.version
                ),
                flattening: step.flattening,
            });
        }

        for adapter in catalog::ADAPTERS {
            entries.push(TemplateDescriptor {
                type_tag: adapter.tag,
                category: Category::Adapter,
                element: ElementKind::ServiceTask,
                event_definition: None,
                component_version: adapter.version,
                activity_type: adapter.direction.activity_type(),
                variant_uri: format!(
                    "ctype::AdapterVariant/cname::{}/tp::{}/mp::{}/direction::{}/version::{}",
                    adapter.cname,
                    adapter.transport,
                    adapter.protocol,
                    adapter.direction.as_str(),
                    adapter.version
                ),
                flattening: adapter.flattening,
            });
        }

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, t)| (t.type_tag, i))
            .collect();

        Self { entries, index }
    }

    /// Resolve a type tag to its skeleton.
    pub fn lookup(&self, type_tag: &str) -> Result<&TemplateDescriptor, TemplateError> {
        self.index
            .get(type_tag)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| TemplateError::UnsupportedComponentType {
                type_tag: type_tag.to_string(),
            })
    }

    pub fn contains(&self, type_tag: &str) -> bool {
        self.index.contains_key(type_tag)
    }

    /// All templates in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TemplateDescriptor> {
        self.entries.iter()
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &TemplateDescriptor> {
        self.entries.iter().filter(move |t| t.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static REGISTRY: Lazy<TemplateRegistry> = Lazy::new(TemplateRegistry::build);

/// The process-wide template registry
pub fn registry() -> &'static TemplateRegistry {
    &REGISTRY
}

/// Shorthand for `registry().lookup(type_tag)`
pub fn lookup(type_tag: &str) -> Result<&'static TemplateDescriptor, TemplateError> {
    registry().lookup(type_tag)
}
