use anyhow::Result;
use std::sync::Arc;

use crate::hooks::HookResult;
use crate::notes::NotesStore;
use crate::notify::Notification;
use crate::tool::{Arguments, ParamSchema, Tool, ToolSchema};

use super::NAME_PARAM_DESC;

pub struct NoteWrite {
    store: Arc<NotesStore>,
}

impl NoteWrite {
    pub fn new(store: Arc<NotesStore>) -> Self {
        Self { store }
    }
}

impl Tool for NoteWrite {
    fn name(&self) -> &'static str {
        "note_write"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "note_write",
            description: "write a note",
            params: vec![
                ParamSchema::described("name", NAME_PARAM_DESC),
                ParamSchema::described("content", "full content for the note"),
            ],
        }
    }

    fn invoke(&self, args: &Arguments) -> Result<HookResult> {
        let name = args.require_str("name")?;
        let content = args.require_str("content")?;
        self.store.write(name, content)?;
        Ok(HookResult {
            result: Some(format!("wrote {name}")),
            modified: Some(vec![name.to_string()]),
            notify: Some(vec![Notification::note_changed(name)]),
            ..HookResult::default()
        })
    }
}
