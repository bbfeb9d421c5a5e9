use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// Flat directory of named text blobs, one file per note.
///
/// The host serializes access; there is no locking here.
pub struct NotesStore {
    dir: PathBuf,
}

impl NotesStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Note names, lexicographically sorted. An absent directory is an
    /// empty store; listing never creates it.
    pub fn names(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.dir)
            .context(format!("Failed to list notes directory: {:?}", self.dir))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Read a note. `Ok(None)` when the note does not exist.
    pub fn read(&self, name: &str) -> Result<Option<String>> {
        let path = self.note_path(name)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(format!("Failed to read note: {:?}", path)),
        }
    }

    /// Create or overwrite a note. The directory is created on first
    /// write; content lands via temp file + rename so a reader never
    /// observes a partial note.
    pub fn write(&self, name: &str, content: &str) -> Result<()> {
        let path = self.note_path(name)?;
        fs::create_dir_all(&self.dir)
            .context(format!("Failed to create notes directory: {:?}", self.dir))?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)
            .context("Failed to create temp file for atomic write")?;
        tmp.write_all(content.as_bytes())
            .context("Failed to write to temp file")?;
        tmp.flush()?;
        tmp.persist(&path)
            .context(format!("Failed to persist note: {:?}", path))?;
        Ok(())
    }

    /// Delete a note. `Ok(false)` when it was already absent.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let path = self.note_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).context(format!("Failed to delete note: {:?}", path)),
        }
    }

    /// Notes live in one flat directory; a name must be a single plain
    /// path component.
    fn note_path(&self, name: &str) -> Result<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.dir.join(name)),
            _ => bail!("invalid note name: {:?}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, NotesStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = NotesStore::new(dir.path().join("traits"));
        (dir, store)
    }

    #[test]
    fn test_write_read_round_trip() {
        let (_dir, store) = store();
        for content in ["buy milk", "", "line one\nline two\n", "tabs\tand \"quotes\""] {
            store.write("todo.md", content).unwrap();
            assert_eq!(store.read("todo.md").unwrap().as_deref(), Some(content));
        }
    }

    #[test]
    fn test_names_sorted_and_empty_when_dir_absent() {
        let (_dir, store) = store();
        assert!(store.names().unwrap().is_empty());
        assert!(!store.dir().exists());

        store.write("b.md", "x").unwrap();
        store.write("a.md", "y").unwrap();
        assert_eq!(store.names().unwrap(), vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_read_missing_is_none() {
        let (_dir, store) = store();
        assert!(store.read("missing.md").unwrap().is_none());
    }

    #[test]
    fn test_delete_is_idempotent_about_absence() {
        let (_dir, store) = store();
        store.write("del.md", "x").unwrap();
        assert!(store.delete("del.md").unwrap());
        assert!(!store.delete("del.md").unwrap());
        assert!(!store.delete("del.md").unwrap());
    }

    #[test]
    fn test_overwrite_replaces_content() {
        let (_dir, store) = store();
        store.write("n.md", "first").unwrap();
        store.write("n.md", "second").unwrap();
        assert_eq!(store.read("n.md").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_invalid_names_rejected() {
        let (dir, store) = store();
        for name in ["", "..", "a/b.md", "../escape.md", "/etc/passwd"] {
            assert!(store.write(name, "x").is_err(), "accepted {:?}", name);
            assert!(store.read(name).is_err());
            assert!(store.delete(name).is_err());
        }
        assert!(!dir.path().join("escape.md").exists());
    }
}
