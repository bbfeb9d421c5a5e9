use std::io::{Read, Write};
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use crate::framing::{FrameSink, LogSink};
use crate::hooks::{self, HookContext, HookEnv};
use crate::notes::NotesStore;
use crate::prompt::PromptLibrary;
use crate::registry::Registry;
use crate::tools;
use crate::workspace::Workspace;

/// How an invocation ended, for the caller's exit-code decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// The hook resolved and ran; its own failure is data, not a crash.
    Completed,
    /// No such hook; the process should exit non-zero.
    UnknownHook,
}

/// Resolves hooks by name and runs one invocation end to end.
pub struct Dispatcher {
    registry: Registry,
    notes: Arc<NotesStore>,
    prompts: Arc<PromptLibrary>,
}

impl Dispatcher {
    /// Build a dispatcher for a workspace, registering every builtin hook
    /// and tool.
    pub fn new(workspace: &Workspace) -> Self {
        let notes = Arc::new(NotesStore::new(workspace.notes_dir()));
        let prompts = Arc::new(PromptLibrary::new(workspace.prompts_dir()));

        let mut registry = Registry::new();
        hooks::register_builtin_hooks(&mut registry);
        tools::register_builtin_tools(&mut registry, notes.clone());

        Self {
            registry,
            notes,
            prompts,
        }
    }

    /// Run one hook invocation.
    ///
    /// Input is read only after the hook name resolves. Empty or
    /// unparsable input becomes an empty context, and a handler failure is
    /// downgraded to an `error` frame; only an unresolvable name is
    /// allowed to fail the process.
    pub fn dispatch<W: Write>(
        &self,
        name: &str,
        input: &mut dyn Read,
        sink: &mut FrameSink<W>,
    ) -> Result<DispatchStatus> {
        let Some(handler) = self.registry.resolve_hook(name) else {
            sink.error(&format!("unknown hook: {name}"))?;
            return Ok(DispatchStatus::UnknownHook);
        };

        let mut raw = String::new();
        // A host that closes stdin without writing is normal; a failed
        // read degrades to the empty context too.
        if input.read_to_string(&mut raw).is_err() {
            raw.clear();
        }
        let ctx = HookContext::from_input(&raw);

        debug!(hook = name, "Dispatching hook");
        let outcome = {
            let mut env = HookEnv {
                notes: &self.notes,
                prompts: &self.prompts,
                registry: &self.registry,
                log: &mut *sink,
            };
            handler.run(&ctx, &mut env)
        };

        match outcome {
            Ok(result) => sink.emit(&result)?,
            Err(e) => {
                warn!(hook = name, error = %e, "Hook failed");
                sink.log(&format!("{name}: {e:#}"));
                sink.error(&format!("{e:#}"))?;
            }
        }
        Ok(DispatchStatus::Completed)
    }
}
