use anyhow::Result;
use std::sync::Arc;

use crate::hooks::HookResult;
use crate::notes::NotesStore;
use crate::tool::{Arguments, Tool, ToolSchema};

pub struct NoteList {
    store: Arc<NotesStore>,
}

impl NoteList {
    pub fn new(store: Arc<NotesStore>) -> Self {
        Self { store }
    }
}

impl Tool for NoteList {
    fn name(&self) -> &'static str {
        "note_list"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "note_list",
            description: "list all notes",
            params: Vec::new(),
        }
    }

    fn invoke(&self, _args: &Arguments) -> Result<HookResult> {
        let names = self.store.names()?;
        let text = if names.is_empty() {
            "no notes yet".to_string()
        } else {
            format!("notes: {}", names.join(", "))
        };
        Ok(HookResult::with_result(text))
    }
}
