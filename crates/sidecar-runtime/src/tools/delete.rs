use anyhow::Result;
use std::sync::Arc;

use crate::hooks::HookResult;
use crate::notes::NotesStore;
use crate::notify::Notification;
use crate::tool::{Arguments, ParamSchema, Tool, ToolSchema};

use super::NAME_PARAM_DESC;

pub struct NoteDelete {
    store: Arc<NotesStore>,
}

impl NoteDelete {
    pub fn new(store: Arc<NotesStore>) -> Self {
        Self { store }
    }
}

impl Tool for NoteDelete {
    fn name(&self) -> &'static str {
        "note_delete"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "note_delete",
            description: "delete a note",
            params: vec![ParamSchema::described("name", NAME_PARAM_DESC)],
        }
    }

    fn invoke(&self, args: &Arguments) -> Result<HookResult> {
        let name = args.require_str("name")?;
        if !self.store.delete(name)? {
            return Ok(HookResult::with_result(format!("not found: {name}")));
        }
        Ok(HookResult {
            result: Some(format!("deleted {name}")),
            modified: Some(vec![name.to_string()]),
            notify: Some(vec![Notification::note_changed(name)]),
            ..HookResult::default()
        })
    }
}
