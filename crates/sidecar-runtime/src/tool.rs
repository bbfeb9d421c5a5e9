use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::hooks::HookResult;

/// Wire schema for one tool, as reported by the `discover` hook.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    /// Parameter name mapped to its human-readable description.
    pub parameters: BTreeMap<String, String>,
}

/// One declared parameter. A parameter without a description is accepted
/// at call time but stays invisible in the discover schema.
#[derive(Debug, Clone)]
pub struct ParamSchema {
    pub name: &'static str,
    pub description: Option<&'static str>,
}

impl ParamSchema {
    pub fn described(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description: Some(description),
        }
    }

    pub fn undescribed(name: &'static str) -> Self {
        Self {
            name,
            description: None,
        }
    }
}

/// Declarative descriptor attached to each tool at registration time.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSchema>,
}

impl ToolSchema {
    /// Derive the wire schema. Never invokes the tool.
    pub fn definition(&self) -> ToolDef {
        let parameters = self
            .params
            .iter()
            .filter_map(|p| p.description.map(|d| (p.name.to_string(), d.to_string())))
            .collect();
        ToolDef {
            name: self.name.to_string(),
            description: self.description.to_string(),
            parameters,
        }
    }
}

/// A callable operation exposed through the `execute_tool` hook.
pub trait Tool {
    /// Tool name for registration.
    fn name(&self) -> &'static str;

    /// Declared schema; must not execute anything.
    fn schema(&self) -> ToolSchema;

    /// Execute with already-bound arguments.
    fn invoke(&self, args: &Arguments) -> Result<HookResult>;
}

/// Named arguments validated against a tool schema.
///
/// An unexpected key, a missing declared key, or a non-string value is a
/// call error; the dispatcher surfaces it as `tool error: ...`.
#[derive(Debug)]
pub struct Arguments {
    values: Map<String, Value>,
}

impl Arguments {
    pub fn bind(schema: &ToolSchema, raw: Value) -> Result<Self> {
        let values = match raw {
            Value::Object(map) => map,
            other => bail!("arguments must be an object, got {}", json_type(&other)),
        };
        for key in values.keys() {
            if !schema.params.iter().any(|p| p.name == key) {
                bail!("unexpected argument: {key}");
            }
        }
        Ok(Self { values })
    }

    pub fn require_str(&self, name: &str) -> Result<&str> {
        match self.values.get(name) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => bail!("argument '{name}' must be a string, got {}", json_type(other)),
            None => bail!("missing argument: {name}"),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
