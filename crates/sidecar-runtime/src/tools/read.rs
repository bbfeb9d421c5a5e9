use anyhow::Result;
use std::sync::Arc;

use crate::hooks::HookResult;
use crate::notes::NotesStore;
use crate::tool::{Arguments, ParamSchema, Tool, ToolSchema};

use super::NAME_PARAM_DESC;

pub struct NoteRead {
    store: Arc<NotesStore>,
}

impl NoteRead {
    pub fn new(store: Arc<NotesStore>) -> Self {
        Self { store }
    }
}

impl Tool for NoteRead {
    fn name(&self) -> &'static str {
        "note_read"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "note_read",
            description: "read a note",
            params: vec![ParamSchema::described("name", NAME_PARAM_DESC)],
        }
    }

    fn invoke(&self, args: &Arguments) -> Result<HookResult> {
        let name = args.require_str("name")?;
        // An absent note is an expected outcome, not a tool error.
        let text = match self.store.read(name)? {
            Some(content) => content,
            None => format!("not found: {name}"),
        };
        Ok(HookResult::with_result(text))
    }
}
