use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable the host sets to point at the workspace root.
pub const WORKSPACE_ENV: &str = "OPENCODE_SIDECAR_WORKSPACE";

const CONFIG_FILE: &str = "sidecar.toml";

/// Optional overrides loaded from `sidecar.toml` at the workspace root.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_notes_dir")]
    pub notes_dir: String,

    #[serde(default = "default_prompts_dir")]
    pub prompts_dir: String,
}

fn default_notes_dir() -> String {
    "traits".to_string()
}

fn default_prompts_dir() -> String {
    "prompts".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_dir: default_notes_dir(),
            prompts_dir: default_prompts_dir(),
        }
    }
}

/// Resolved workspace: root directory plus the note and prompt locations.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Locate the workspace root: env override first, else the parent of
    /// the directory holding the executable (`<root>/hooks/<bin>`).
    pub fn locate() -> Result<Self> {
        if let Ok(root) = std::env::var(WORKSPACE_ENV) {
            return Self::open(PathBuf::from(root));
        }
        let exe = std::env::current_exe().context("Failed to resolve executable path")?;
        let root = exe
            .parent()
            .and_then(Path::parent)
            .context("Executable has no enclosing workspace")?
            .to_path_buf();
        Self::open(root)
    }

    /// Open a workspace rooted at `root`, loading `sidecar.toml` if present.
    pub fn open(root: PathBuf) -> Result<Self> {
        let config = load_config(&root.join(CONFIG_FILE))?;
        Ok(Self { root, config })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.root.join(&self.config.notes_dir)
    }

    pub fn prompts_dir(&self) -> PathBuf {
        self.root.join(&self.config.prompts_dir)
    }
}

/// Load config from file or use defaults.
fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content =
        std::fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
    let config = toml::from_str(&content).context("Failed to parse TOML config")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_config_absent() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(ws.notes_dir(), dir.path().join("traits"));
        assert_eq!(ws.prompts_dir(), dir.path().join("prompts"));
    }

    #[test]
    fn test_config_overrides_notes_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sidecar.toml"), "notes_dir = \"memory\"\n").unwrap();
        let ws = Workspace::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(ws.notes_dir(), dir.path().join("memory"));
        assert_eq!(ws.prompts_dir(), dir.path().join("prompts"));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sidecar.toml"), "notes_dir = [not toml").unwrap();
        let result = Workspace::open(dir.path().to_path_buf());
        assert!(result.is_err());
    }
}
