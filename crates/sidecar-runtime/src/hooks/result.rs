use serde::Serialize;
use serde_json::Value;

use crate::notify::Notification;
use crate::tool::ToolDef;

/// Partial result produced by one hook invocation.
///
/// Only the keys a hook actually produced are serialized; an absent key
/// means "not applicable", not "empty". The recognized key set is closed:
/// nothing outside these fields can reach the wire.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct HookResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify: Option<Vec<Notification>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HookResult {
    /// Result carrying only the `result` text, the common tool outcome.
    pub fn with_result(text: impl Into<String>) -> Self {
        Self {
            result: Some(text.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_keys_are_not_serialized() {
        let value = serde_json::to_value(HookResult::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));

        let value = serde_json::to_value(HookResult::with_result("ok")).unwrap();
        assert_eq!(value, serde_json::json!({"result": "ok"}));
    }
}
