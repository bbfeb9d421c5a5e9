use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const NOTE_CHANGED: &str = "note_changed";

/// Change event supplied by the host inside a hook context, or reported
/// by a mutating tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub files: Vec<String>,
}

impl Notification {
    /// Event for a single changed note.
    pub fn note_changed(name: &str) -> Self {
        Self {
            kind: NOTE_CHANGED.to_string(),
            files: vec![name.to_string()],
        }
    }
}

/// Collapse change notifications into one user-facing summary.
///
/// Filters to `note_changed`, dedupes and sorts the affected filenames,
/// and returns `None` when nothing relevant happened.
pub fn aggregate(notifications: &[Notification]) -> Option<String> {
    let changed: BTreeSet<&str> = notifications
        .iter()
        .filter(|n| n.kind == NOTE_CHANGED)
        .flat_map(|n| n.files.iter().map(String::as_str))
        .collect();
    if changed.is_empty() {
        return None;
    }
    let joined = changed.into_iter().collect::<Vec<_>>().join(", ");
    Some(format!("[note-update] changed: {joined}"))
}
