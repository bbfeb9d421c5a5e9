mod delete;
mod list;
mod read;
mod write;

pub use delete::NoteDelete;
pub use list::NoteList;
pub use read::NoteRead;
pub use write::NoteWrite;

use std::sync::Arc;

use crate::notes::NotesStore;
use crate::registry::Registry;

pub(crate) const NAME_PARAM_DESC: &str = "note filename (e.g. todo.md)";

/// Explicit startup registration for the builtin note tools.
pub fn register_builtin_tools(registry: &mut Registry, store: Arc<NotesStore>) {
    registry.register_tool(Box::new(NoteList::new(store.clone())));
    registry.register_tool(Box::new(NoteRead::new(store.clone())));
    registry.register_tool(Box::new(NoteWrite::new(store.clone())));
    registry.register_tool(Box::new(NoteDelete::new(store)));
}
