//! Property encoding
//!
//! Converts a component's typed configuration mapping into ordered, escaped
//! `ifl:property` entries.
//!
//! | Value kind | Encoding |
//! |---|---|
//! | scalar | stringified, booleans as `true`/`false`, `null` as empty |
//! | nested object | flattened through the per-type rule table |
//! | array of scalars | comma-joined |
//! | array of objects | escaped `<row><cell id='…'>` table |
//! | path-table key | escaped two-column `<row><cell>` table, or a pre-encoded string passed through |
//!
//! Every value is escaped exactly once. Table encoders escape their own output and
//! are never run through the scalar pass again.

pub mod flatten;

use crate::models::{Property, PropertyEncoding};
use crate::templates::{FlattenRule, TEMPLATE_PROPERTY_KEYS, TemplateDescriptor};
use serde_json::{Map, Value};
use std::collections::HashSet;

pub use flatten::{Flattener, capitalize};

/// Keys whose array values render as a two-column path table
pub const PATH_TABLE_KEYS: [&str; 3] = ["xmlJsonPathTable", "jsonXmlPathTable", "xpathTable"];

/// Returns true when `key` names a special path-table property.
pub fn is_path_table_key(key: &str) -> bool {
    PATH_TABLE_KEYS.contains(&key)
}

/// Error during property encoding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("Property '{key}': path-table entry {index} is not a string")]
    PathTableEntry { key: String, index: usize },
    #[error("Property '{key}': path table must be a string or an array of strings")]
    PathTableShape { key: String },
    #[error("Property '{key}': table row {index} is not an object")]
    TableRow { key: String, index: usize },
    #[error("Property '{key}': table cell '{column}' in row {index} is not a scalar")]
    TableCell {
        key: String,
        column: String,
        index: usize,
    },
    #[error("Property '{key}': array item {index} is not a scalar")]
    ArrayItem { key: String, index: usize },
    #[error("Property '{key}' is fixed by the component template")]
    TemplateProperty { key: String },
    #[error("Property '{key}' is produced more than once")]
    DuplicateProperty { key: String },
}

impl EncodingError {
    /// The property key the error refers to
    pub fn key(&self) -> &str {
        match self {
            EncodingError::PathTableEntry { key, .. }
            | EncodingError::PathTableShape { key }
            | EncodingError::TableRow { key, .. }
            | EncodingError::TableCell { key, .. }
            | EncodingError::ArrayItem { key, .. }
            | EncodingError::TemplateProperty { key }
            | EncodingError::DuplicateProperty { key } => key,
        }
    }
}

/// Escape `& < > ' "` as named entities.
pub fn escape(raw: &str) -> String {
    quick_xml::escape::escape(raw).into_owned()
}

/// Encodes configuration mappings for one component type
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyEncoder<'a> {
    flattener: Flattener<'a>,
}

impl<'a> PropertyEncoder<'a> {
    /// Encoder using an explicit flattening table
    pub fn new(rules: &'a [FlattenRule]) -> Self {
        Self {
            flattener: Flattener::new(rules),
        }
    }

    /// Encoder bound to a template's flattening table
    pub fn for_template(template: &'a TemplateDescriptor) -> Self {
        Self::new(template.flattening)
    }

    /// Encode a configuration mapping into properties, preserving key order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use iflow_converter::encoding::PropertyEncoder;
    /// use serde_json::json;
    ///
    /// let config = json!({"enabled": true, "paths": ["/a", "/b"]});
    /// let props = PropertyEncoder::default()
    ///     .encode(config.as_object().unwrap())
    ///     .unwrap();
    /// assert_eq!(props[0].value, "true");
    /// assert_eq!(props[1].value, "/a,/b");
    /// ```
    ///
    /// Flattened names may not shadow a template-owned key or repeat a name
    /// already produced by another entry.
    pub fn encode(&self, config: &Map<String, Value>) -> Result<Vec<Property>, EncodingError> {
        let mut properties = Vec::with_capacity(config.len());
        for (key, value) in config {
            self.encode_entry(key, key, value, false, &mut properties)?;
        }

        let mut seen = HashSet::with_capacity(properties.len());
        for property in &properties {
            let key = property.key.as_str();
            if TEMPLATE_PROPERTY_KEYS.contains(&key) {
                return Err(EncodingError::TemplateProperty {
                    key: key.to_string(),
                });
            }
            if !seen.insert(key) {
                return Err(EncodingError::DuplicateProperty {
                    key: key.to_string(),
                });
            }
        }
        Ok(properties)
    }

    fn encode_entry(
        &self,
        path: &str,
        name: &str,
        value: &Value,
        nested: bool,
        out: &mut Vec<Property>,
    ) -> Result<(), EncodingError> {
        if is_path_table_key(name) {
            out.push(encode_path_table(name, value)?);
            return Ok(());
        }

        match value {
            Value::Object(children) => {
                for (child, child_value) in children {
                    let child_name = self.flattener.resolve(path, name, child);
                    let child_path = format!("{}.{}", path, child);
                    self.encode_entry(&child_path, &child_name, child_value, true, out)?;
                }
            }
            Value::Array(items) => out.push(encode_array(name, items)?),
            scalar => {
                let encoding = if nested {
                    PropertyEncoding::FlattenedObject
                } else {
                    PropertyEncoding::Scalar
                };
                out.push(Property::new(
                    name,
                    scalar.clone(),
                    encoding,
                    escape(&stringify_scalar(scalar)),
                ));
            }
        }
        Ok(())
    }
}

/// Stringify a scalar; objects and arrays never reach here.
fn stringify_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn encode_array(key: &str, items: &[Value]) -> Result<Property, EncodingError> {
    let raw = Value::Array(items.to_vec());

    if matches!(items.first(), Some(Value::Object(_))) {
        return Ok(Property::new(
            key,
            raw,
            PropertyEncoding::ObjectArrayTable,
            encode_object_table(key, items)?,
        ));
    }

    let mut parts = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if !is_scalar(item) {
            return Err(EncodingError::ArrayItem {
                key: key.to_string(),
                index,
            });
        }
        parts.push(stringify_scalar(item));
    }

    Ok(Property::new(
        key,
        raw,
        PropertyEncoding::SimpleArray,
        escape(&parts.join(",")),
    ))
}

/// Render an array of objects as an escaped row/cell table.
///
/// Columns are the union of element keys in first-seen order; absent columns
/// render as empty cells.
fn encode_object_table(key: &str, items: &[Value]) -> Result<String, EncodingError> {
    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::Object(row) => rows.push(row),
            _ => {
                return Err(EncodingError::TableRow {
                    key: key.to_string(),
                    index,
                });
            }
        }
    }

    let mut columns: Vec<&str> = Vec::new();
    for row in &rows {
        for column in row.keys() {
            if !columns.contains(&column.as_str()) {
                columns.push(column);
            }
        }
    }

    let mut table = String::new();
    for (index, row) in rows.iter().enumerate() {
        table.push_str("<row>");
        for column in &columns {
            let cell = match row.get(*column) {
                Some(value) if is_scalar(value) => stringify_scalar(value),
                Some(_) => {
                    return Err(EncodingError::TableCell {
                        key: key.to_string(),
                        column: column.to_string(),
                        index,
                    });
                }
                None => String::new(),
            };
            table.push_str(&format!("<cell id='{}'>{}</cell>", column, cell));
        }
        table.push_str("</row>");
    }

    Ok(escape(&table))
}

/// Encode a path-table value.
///
/// A string is taken as already encoded and passed through verbatim.
fn encode_path_table(key: &str, value: &Value) -> Result<Property, EncodingError> {
    let encoded = match value {
        Value::String(pre_encoded) => pre_encoded.clone(),
        Value::Array(entries) => {
            let mut table = String::new();
            for (index, entry) in entries.iter().enumerate() {
                let Value::String(path) = entry else {
                    return Err(EncodingError::PathTableEntry {
                        key: key.to_string(),
                        index,
                    });
                };
                table.push_str(&format!("<row><cell>{}</cell><cell></cell></row>", path));
            }
            escape(&table)
        }
        _ => {
            return Err(EncodingError::PathTableShape {
                key: key.to_string(),
            });
        }
    };

    Ok(Property::new(
        key,
        value.clone(),
        PropertyEncoding::SpecialPathTable,
        encoded,
    ))
}
