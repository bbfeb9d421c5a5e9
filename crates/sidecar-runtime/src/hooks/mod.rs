mod context;
mod handlers;
mod result;

pub use context::HookContext;
pub use handlers::{register_builtin_hooks, HookEnv, HookHandler};
pub use result::HookResult;
