use anyhow::Result;
use serde_json::Value;

use crate::framing::LogSink;
use crate::notes::NotesStore;
use crate::notify;
use crate::prompt::PromptLibrary;
use crate::registry::Registry;
use crate::tool::{Arguments, Tool};

use super::{HookContext, HookResult};

/// Everything a handler may touch besides its context: the stores, the
/// registry (for tool resolution), and the protocol log channel.
pub struct HookEnv<'a> {
    pub notes: &'a NotesStore,
    pub prompts: &'a PromptLibrary,
    pub registry: &'a Registry,
    pub log: &'a mut dyn LogSink,
}

/// One lifecycle hook: a function of the context, plus diagnostics.
pub trait HookHandler {
    /// Hook name for registration and logging.
    fn name(&self) -> &'static str;

    fn run(&self, ctx: &HookContext, env: &mut HookEnv<'_>) -> Result<HookResult>;
}

/// Explicit startup registration. A later registration under the same
/// name overwrites the earlier one.
pub fn register_builtin_hooks(registry: &mut Registry) {
    registry.register_hook(Box::new(Discover));
    registry.register_hook(Box::new(MutateRequest));
    registry.register_hook(Box::new(FormatNotification));
    registry.register_hook(Box::new(ObserveMessage));
    registry.register_hook(Box::new(Idle));
    registry.register_hook(Box::new(Heartbeat));
    registry.register_hook(Box::new(Recover));
    registry.register_hook(Box::new(ToolBefore));
    registry.register_hook(Box::new(ToolAfter));
    registry.register_hook(Box::new(Compacting));
    registry.register_hook(Box::new(ExecuteTool));
}

struct Discover;

impl HookHandler for Discover {
    fn name(&self) -> &'static str {
        "discover"
    }

    fn run(&self, _ctx: &HookContext, env: &mut HookEnv<'_>) -> Result<HookResult> {
        let defs = env.registry.tool_definitions();
        let names: Vec<&str> = defs.iter().map(|d| d.name.as_str()).collect();
        env.log.log(&format!("tools: {}", names.join(", ")));
        Ok(HookResult {
            tools: Some(defs),
            ..HookResult::default()
        })
    }
}

struct MutateRequest;

impl HookHandler for MutateRequest {
    fn name(&self) -> &'static str {
        "mutate_request"
    }

    fn run(&self, _ctx: &HookContext, env: &mut HookEnv<'_>) -> Result<HookResult> {
        let notes = env.notes.names()?;
        env.log.log(&format!("notes: {}", notes.join(", ")));
        Ok(HookResult {
            system: Some(env.prompts.system_prompt(Some("chat"), &notes)?),
            ..HookResult::default()
        })
    }
}

struct FormatNotification;

impl HookHandler for FormatNotification {
    fn name(&self) -> &'static str {
        "format_notification"
    }

    fn run(&self, ctx: &HookContext, _env: &mut HookEnv<'_>) -> Result<HookResult> {
        let notifications = ctx.notifications()?;
        Ok(HookResult {
            message: notify::aggregate(&notifications),
            ..HookResult::default()
        })
    }
}

struct ObserveMessage;

impl HookHandler for ObserveMessage {
    fn name(&self) -> &'static str {
        "observe_message"
    }

    fn run(&self, ctx: &HookContext, env: &mut HookEnv<'_>) -> Result<HookResult> {
        env.log.log(&format!(
            "session={} agent={}",
            ctx.session_field("id"),
            ctx.session_field("agent")
        ));
        Ok(HookResult::default())
    }
}

struct Idle;

impl HookHandler for Idle {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn run(&self, ctx: &HookContext, env: &mut HookEnv<'_>) -> Result<HookResult> {
        env.log.log(&format!(
            "session={} answer_len={}",
            ctx.session_field("id"),
            ctx.answer().chars().count()
        ));
        Ok(HookResult::default())
    }
}

struct Heartbeat;

impl HookHandler for Heartbeat {
    fn name(&self) -> &'static str {
        "heartbeat"
    }

    fn run(&self, _ctx: &HookContext, env: &mut HookEnv<'_>) -> Result<HookResult> {
        let notes = env.notes.names()?;
        env.log.log(&format!("notes: {}", notes.join(", ")));

        let Some(user) = env.prompts.fragment("heartbeat")? else {
            env.log.log("heartbeat.md not found, skipping");
            return Ok(HookResult::default());
        };
        if user.trim().is_empty() {
            env.log.log("heartbeat prompt is empty, skipping");
            return Ok(HookResult::default());
        }
        Ok(HookResult {
            system: Some(env.prompts.system_prompt(Some("heartbeat"), &notes)?),
            user: Some(user),
            ..HookResult::default()
        })
    }
}

struct Recover;

impl HookHandler for Recover {
    fn name(&self) -> &'static str {
        "recover"
    }

    // The failure detail stays on the diagnostic channel; the data channel
    // gets the same fixed notice regardless of what broke.
    fn run(&self, ctx: &HookContext, env: &mut HookEnv<'_>) -> Result<HookResult> {
        env.log.log(&format!(
            "recovering from {}: {}",
            ctx.str_field("failed_hook").unwrap_or("?"),
            ctx.str_field("error").unwrap_or("?")
        ));
        Ok(HookResult {
            system: Some(vec!["system recovery — an error occurred".to_string()]),
            user: Some("please check notes and continue".to_string()),
            ..HookResult::default()
        })
    }
}

// Reserved extension points.
struct ToolBefore;

impl HookHandler for ToolBefore {
    fn name(&self) -> &'static str {
        "tool_before"
    }

    fn run(&self, _ctx: &HookContext, _env: &mut HookEnv<'_>) -> Result<HookResult> {
        Ok(HookResult::default())
    }
}

struct ToolAfter;

impl HookHandler for ToolAfter {
    fn name(&self) -> &'static str {
        "tool_after"
    }

    fn run(&self, _ctx: &HookContext, _env: &mut HookEnv<'_>) -> Result<HookResult> {
        Ok(HookResult::default())
    }
}

struct Compacting;

impl HookHandler for Compacting {
    fn name(&self) -> &'static str {
        "compacting"
    }

    fn run(&self, _ctx: &HookContext, env: &mut HookEnv<'_>) -> Result<HookResult> {
        let notes = env.notes.names()?;
        env.log.log(&format!("notes: {}", notes.join(", ")));

        match env.prompts.fragment("compaction")? {
            Some(prompt) => Ok(HookResult {
                prompt: Some(prompt),
                ..HookResult::default()
            }),
            None => {
                env.log.log("compaction.md not found, skipping");
                Ok(HookResult::default())
            }
        }
    }
}

struct ExecuteTool;

impl HookHandler for ExecuteTool {
    fn name(&self) -> &'static str {
        "execute_tool"
    }

    fn run(&self, ctx: &HookContext, env: &mut HookEnv<'_>) -> Result<HookResult> {
        let name = ctx.tool();
        let Some(tool) = env.registry.resolve_tool(name) else {
            env.log.log(&format!("unknown tool: {name}"));
            return Ok(HookResult::with_result(format!("unknown tool: {name}")));
        };

        let raw_args = ctx.args();
        let keys: Vec<&str> = match &raw_args {
            Value::Object(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        };
        env.log.log(&format!("tool={name} args={keys:?}"));

        match invoke_tool(tool, raw_args) {
            Ok(result) => {
                env.log
                    .log(&format!("tool={name} result keys={:?}", result_keys(&result)));
                Ok(result)
            }
            Err(e) => {
                env.log.log(&format!("tool={name} error: {e:#}"));
                Ok(HookResult::with_result(format!("tool error: {e:#}")))
            }
        }
    }
}

/// Bind and run; every failure here is a tool error, never a hook error.
fn invoke_tool(tool: &dyn Tool, raw_args: Value) -> Result<HookResult> {
    let args = Arguments::bind(&tool.schema(), raw_args)?;
    tool.invoke(&args)
}

fn result_keys(result: &HookResult) -> Vec<String> {
    match serde_json::to_value(result) {
        Ok(Value::Object(map)) => map.keys().cloned().collect(),
        _ => Vec::new(),
    }
}
