use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Static prompt fragments plus dynamic state, assembled into the host's
/// `system` prompt.
pub struct PromptLibrary {
    dir: PathBuf,
}

impl PromptLibrary {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn fragment_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.md"))
    }

    /// Load an optional fragment. `Ok(None)` when the file is missing.
    pub fn fragment(&self, name: &str) -> Result<Option<String>> {
        let path = self.fragment_path(name);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(format!("Failed to read prompt fragment: {:?}", path)),
        }
    }

    /// Load a mandatory fragment.
    pub fn require(&self, name: &str) -> Result<String> {
        let path = self.fragment_path(name);
        fs::read_to_string(&path).context(format!("Missing prompt fragment: {:?}", path))
    }

    /// Assemble the system prompt: the mandatory preamble, the mode
    /// fragment when a mode is given, the current note names when any
    /// exist, and the `<env>` block. The host's `system` field is a
    /// sequence of chunks; this always contributes exactly one.
    pub fn system_prompt(&self, mode: Option<&str>, notes: &[String]) -> Result<Vec<String>> {
        let mut parts = vec![self.require("preamble")?];
        if let Some(mode) = mode {
            parts.push(self.require(mode)?);
        }
        if !notes.is_empty() {
            parts.push(format!("\ncurrent notes: {}\n", notes.join(", ")));
        }
        // The host may run in any timezone; the env block is always UTC.
        parts.push(format!(
            "\n<env>\nSession start time: {}\n</env>\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));
        Ok(vec![parts.concat()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn library(fragments: &[(&str, &str)]) -> (tempfile::TempDir, PromptLibrary) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in fragments {
            fs::write(dir.path().join(format!("{name}.md")), content).unwrap();
        }
        let lib = PromptLibrary::new(dir.path().to_path_buf());
        (dir, lib)
    }

    #[test]
    fn test_missing_preamble_is_fatal() {
        let (_dir, lib) = library(&[]);
        let err = lib.system_prompt(None, &[]).unwrap_err();
        assert!(err.to_string().contains("Missing prompt fragment"));
    }

    #[test]
    fn test_missing_mode_fragment_is_fatal() {
        let (_dir, lib) = library(&[("preamble", "preamble")]);
        assert!(lib.system_prompt(Some("chat"), &[]).is_err());
    }

    #[test]
    fn test_assembly_order() {
        let (_dir, lib) = library(&[("preamble", "preamble"), ("chat", "chat")]);
        let notes = vec!["a.md".to_string(), "b.md".to_string()];
        let chunks = lib.system_prompt(Some("chat"), &notes).unwrap();
        assert_eq!(chunks.len(), 1);

        let text = &chunks[0];
        let preamble_at = text.find("preamble").unwrap();
        let chat_at = text.find("chat").unwrap();
        let notes_at = text.find("current notes: a.md, b.md").unwrap();
        let env_at = text.find("<env>").unwrap();
        assert!(preamble_at < chat_at && chat_at < notes_at && notes_at < env_at);
        assert!(text.contains("</env>"));
    }

    #[test]
    fn test_notes_line_omitted_when_no_notes() {
        let (_dir, lib) = library(&[("preamble", "preamble")]);
        let chunks = lib.system_prompt(None, &[]).unwrap();
        assert!(!chunks[0].contains("current notes"));
    }

    #[test]
    fn test_env_block_has_one_current_utc_timestamp() {
        let (_dir, lib) = library(&[("preamble", "p")]);
        let text = lib.system_prompt(None, &[]).unwrap().remove(0);

        let stamps: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("Session start time:"))
            .collect();
        assert_eq!(stamps.len(), 1);

        let raw = stamps[0]
            .strip_prefix("Session start time:")
            .unwrap()
            .trim()
            .strip_suffix(" UTC")
            .unwrap();
        let reported = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").unwrap();
        let drift = (Utc::now().naive_utc() - reported).num_seconds().abs();
        assert!(drift < 5, "timestamp drifted {drift}s from UTC now");
    }

    #[test]
    fn test_optional_fragment() {
        let (_dir, lib) = library(&[("heartbeat", "beat")]);
        assert_eq!(lib.fragment("heartbeat").unwrap().as_deref(), Some("beat"));
        assert!(lib.fragment("compaction").unwrap().is_none());
    }
}
