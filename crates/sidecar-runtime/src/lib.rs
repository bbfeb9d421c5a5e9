pub mod dispatch;
pub mod framing;
pub mod hooks;
pub mod notes;
pub mod notify;
pub mod prompt;
pub mod registry;
pub mod tool;
pub mod tools;
pub mod workspace;

pub use dispatch::{DispatchStatus, Dispatcher};
pub use framing::{FrameSink, LogSink};
pub use hooks::{HookContext, HookEnv, HookHandler, HookResult};
pub use notes::NotesStore;
pub use notify::Notification;
pub use prompt::PromptLibrary;
pub use registry::Registry;
pub use tool::{Arguments, ParamSchema, Tool, ToolDef, ToolSchema};
pub use workspace::Workspace;

/// Initialize structured JSON logging.
///
/// Diagnostics go to stderr; stdout carries only protocol frames.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
