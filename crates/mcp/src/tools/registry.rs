// Tool catalog: descriptors, input schemas and argument checks

use super::ToolId;
use crate::error::{CatalogError, ToolError};
use crate::protocol::ToolSchema;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Primitive type of a tool argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Number,
    /// A string restricted to the listed values.
    Enum(&'static [&'static str]),
}

/// One argument accepted by a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    /// Value applied when an optional argument is omitted.
    pub default: Option<&'static str>,
}

impl ParamSpec {
    pub const fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind,
            required: true,
            default: None,
        }
    }

    pub const fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind,
            required: false,
            default: None,
        }
    }

    pub const fn with_default(self, default: &'static str) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    fn schema(&self) -> Value {
        let mut schema = match self.kind {
            ParamKind::String => json_schema_string(self.description),
            ParamKind::Number => json_schema_number(self.description),
            ParamKind::Enum(values) => json_schema_enum(values, self.description),
        };
        if let (Some(default), Some(obj)) = (self.default, schema.as_object_mut()) {
            obj.insert("default".to_string(), Value::from(default));
        }
        schema
    }

    fn check(&self, value: &Value) -> Result<(), ToolError> {
        let invalid = |reason: String| ToolError::InvalidArgument {
            name: self.name.to_string(),
            reason,
        };

        match self.kind {
            ParamKind::String => {
                let text = value
                    .as_str()
                    .ok_or_else(|| invalid("expected a string".to_string()))?;
                if self.required && text.is_empty() {
                    return Err(ToolError::MissingArgument(self.name.to_string()));
                }
            }
            ParamKind::Number => {
                if !value.is_number() {
                    return Err(invalid("expected a number".to_string()));
                }
            }
            ParamKind::Enum(allowed) => {
                let text = value
                    .as_str()
                    .ok_or_else(|| invalid("expected a string".to_string()))?;
                if !allowed.contains(&text) {
                    return Err(invalid(format!(
                        "expected one of {}, got '{}'",
                        allowed.join(", "),
                        text
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Static description of one tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub id: ToolId,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

impl ToolDescriptor {
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    /// JSON Schema advertised as `inputSchema`.
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.to_string(), p.schema()))
            .collect();
        let required = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        json_schema_object(Value::Object(properties), required)
    }

    pub fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description.to_string(),
            input_schema: self.input_schema(),
        }
    }

    /// Check `arguments` against the declared parameters.
    ///
    /// `null` counts as an empty object. Unknown keys are ignored.
    pub fn validate(&self, arguments: &Value) -> Result<Map<String, Value>, ToolError> {
        let values = match arguments {
            Value::Null => Map::new(),
            Value::Object(map) => map.clone(),
            _ => return Err(ToolError::InvalidArguments),
        };

        for param in self.params {
            match values.get(param.name) {
                None | Some(Value::Null) if param.required => {
                    return Err(ToolError::MissingArgument(param.name.to_string()));
                }
                None | Some(Value::Null) => {}
                Some(value) => param.check(value)?,
            }
        }

        Ok(values)
    }
}

/// Read-only registry of tool descriptors, in registration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<&'static ToolDescriptor>,
    index: HashMap<ToolId, usize>,
}

impl Catalog {
    /// Build the catalog of every registered tool.
    pub fn new() -> Result<Self, CatalogError> {
        Self::from_descriptors(super::registered_descriptors())
    }

    /// Build a catalog, requiring exactly one descriptor per [`ToolId`].
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = &'static ToolDescriptor>,
    ) -> Result<Self, CatalogError> {
        let mut entries = Vec::new();
        let mut index = HashMap::new();

        for descriptor in descriptors {
            if index.insert(descriptor.id, entries.len()).is_some() {
                return Err(CatalogError::DuplicateTool(descriptor.name()));
            }
            entries.push(descriptor);
        }

        if let Some(missing) = ToolId::ALL.iter().find(|id| !index.contains_key(*id)) {
            return Err(CatalogError::MissingDescriptor(*missing));
        }

        Ok(Self { entries, index })
    }

    /// All tool schemas, in registration order.
    pub fn list(&self) -> Vec<ToolSchema> {
        self.entries.iter().map(|d| d.schema()).collect()
    }

    pub fn describe(&self, name: &str) -> Option<&'static ToolDescriptor> {
        ToolId::from_name(name).and_then(|id| self.get(id))
    }

    pub fn get(&self, id: ToolId) -> Option<&'static ToolDescriptor> {
        self.index.get(&id).map(|&i| self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Validated arguments for one call, with declared defaults applied on read.
#[derive(Debug, Clone, Copy)]
pub struct ToolArgs<'a> {
    values: &'a Map<String, Value>,
    params: &'static [ParamSpec],
}

impl<'a> ToolArgs<'a> {
    pub fn new(values: &'a Map<String, Value>, params: &'static [ParamSpec]) -> Self {
        Self { values, params }
    }

    /// A required string argument. Missing or empty values fail before any API call.
    pub fn required_str(&self, name: &str) -> Result<&'a str, ToolError> {
        match self.values.get(name) {
            Some(Value::String(s)) if !s.is_empty() => Ok(s.as_str()),
            Some(Value::String(_)) | Some(Value::Null) | None => {
                Err(ToolError::MissingArgument(name.to_string()))
            }
            Some(_) => Err(ToolError::InvalidArgument {
                name: name.to_string(),
                reason: "expected a string".to_string(),
            }),
        }
    }

    /// An optional string argument, falling back to its declared default.
    pub fn optional_str(&self, name: &str) -> Option<&'a str> {
        self.values
            .get(name)
            .and_then(Value::as_str)
            .or_else(|| self.default_for(name))
    }

    /// Raw value of an optional argument, if the caller sent one.
    pub fn optional_value(&self, name: &str) -> Option<&'a Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    /// JSON object holding every listed argument that is present or defaulted.
    pub fn body(&self, names: &[&str]) -> Value {
        let body: Map<String, Value> = names
            .iter()
            .filter_map(|&name| {
                let value = match self.values.get(name) {
                    Some(Value::Null) | None => Value::from(self.default_for(name)?),
                    Some(value) => value.clone(),
                };
                Some((name.to_string(), value))
            })
            .collect();
        Value::Object(body)
    }

    fn default_for(&self, name: &str) -> Option<&'static str> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.default)
    }
}

// Helper functions for creating tool schemas

fn json_schema_object(properties: Value, required: Vec<&str>) -> Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

fn json_schema_string(description: &str) -> Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

fn json_schema_number(description: &str) -> Value {
    serde_json::json!({
        "type": "number",
        "description": description
    })
}

fn json_schema_enum(values: &[&str], description: &str) -> Value {
    serde_json::json!({
        "type": "string",
        "enum": values,
        "description": description
    })
}
