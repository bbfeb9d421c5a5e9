use std::collections::HashMap;

use crate::hooks::HookHandler;
use crate::tool::{Tool, ToolDef};

/// Name-keyed handler maps, populated once at startup.
///
/// Lookups never fail; callers handle `None` explicitly. Registering a
/// duplicate name overwrites (last wins), which makes duplicate-name bugs
/// visible during development. There is no removal.
#[derive(Default)]
pub struct Registry {
    hooks: HashMap<String, Box<dyn HookHandler>>,
    tools: HashMap<String, Box<dyn Tool>>,
    tool_order: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_hook(&mut self, handler: Box<dyn HookHandler>) {
        self.hooks.insert(handler.name().to_string(), handler);
    }

    pub fn register_tool(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_none() {
            self.tool_order.push(name);
        }
    }

    pub fn resolve_hook(&self, name: &str) -> Option<&dyn HookHandler> {
        self.hooks.get(name).map(|h| h.as_ref())
    }

    pub fn resolve_tool(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Wire schemas for every registered tool, in registration order.
    pub fn tool_definitions(&self) -> Vec<ToolDef> {
        self.tool_order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.schema().definition())
            .collect()
    }
}
