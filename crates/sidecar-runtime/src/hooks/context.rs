use anyhow::{anyhow, Result};
use serde_json::{Map, Value};

use crate::notify::Notification;

/// Read-only JSON context supplied by the host. The schema varies per
/// hook; fields a hook does not recognize are ignored.
#[derive(Debug, Clone, Default)]
pub struct HookContext {
    fields: Map<String, Value>,
}

impl HookContext {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Parse raw stdin text. Empty, unparsable, or non-object input is an
    /// empty context, never an error; the host may legitimately send
    /// nothing at all.
    pub fn from_input(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Self::new(map),
            _ => Self::default(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Tool name for `execute_tool`; empty when absent.
    pub fn tool(&self) -> &str {
        self.str_field("tool").unwrap_or("")
    }

    /// Raw `args` value for `execute_tool`; an absent field is an empty
    /// object. Shape validation happens at argument binding.
    pub fn args(&self) -> Value {
        self.field("args")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// The `notifications` list; an absent field is an empty list.
    pub fn notifications(&self) -> Result<Vec<Notification>> {
        match self.fields.get("notifications") {
            None => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| anyhow!("malformed notifications field: {e}")),
        }
    }

    /// A string field of the `session` object, `?` when absent.
    pub fn session_field(&self, key: &str) -> &str {
        self.fields
            .get("session")
            .and_then(|s| s.get(key))
            .and_then(Value::as_str)
            .unwrap_or("?")
    }

    pub fn answer(&self) -> &str {
        self.str_field("answer").unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_and_garbage_input_become_empty_context() {
        for raw in ["", "   ", "not json{{", "[1, 2]", "\"text\"", "42"] {
            let ctx = HookContext::from_input(raw);
            assert!(ctx.field("anything").is_none(), "input {:?}", raw);
        }
    }

    #[test]
    fn test_object_input_is_preserved() {
        let ctx = HookContext::from_input(r#"{"tool": "note_list", "args": {}}"#);
        assert_eq!(ctx.tool(), "note_list");
    }

    #[test]
    fn test_session_fields_default_to_question_mark() {
        let ctx = HookContext::default();
        assert_eq!(ctx.session_field("id"), "?");

        let ctx = HookContext::from_input(r#"{"session": {"id": "abc"}}"#);
        assert_eq!(ctx.session_field("id"), "abc");
        assert_eq!(ctx.session_field("agent"), "?");
    }

    #[test]
    fn test_notifications_absent_is_empty() {
        assert!(HookContext::default().notifications().unwrap().is_empty());
    }

    #[test]
    fn test_notifications_malformed_is_error() {
        let ctx = HookContext::new(
            json!({"notifications": "nope"}).as_object().unwrap().clone(),
        );
        assert!(ctx.notifications().is_err());
    }
}
