//! Where config files live, and which one is current.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Environment variable overriding the config directory.
pub const ENV_CONFIG_DIR: &str = "LP_CONFIG_DIR";

const DEFAULT_DIR_NAME: &str = ".littlepay";
const DEFAULT_CONFIG_FILE: &str = "config.yaml";
const CURRENT_POINTER_FILE: &str = ".current";

fn home_dir() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| Error::Config("failed to resolve home dir".to_string()))
}

fn expand_tilde(home: &Path, raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    if trimmed == "~" {
        return home.to_path_buf();
    }

    match trimmed
        .strip_prefix("~/")
        .or_else(|| trimmed.strip_prefix("~\\"))
    {
        Some(rest) => home.join(rest),
        None => PathBuf::from(trimmed),
    }
}

/// The directory holding config files and the current-file pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDir {
    root: PathBuf,
}

impl ConfigDir {
    /// Use an explicit directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$LP_CONFIG_DIR` if set, otherwise `~/.littlepay`.
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var(ENV_CONFIG_DIR)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let root = match raw {
            Some(v) if v.starts_with('~') => expand_tilde(&home_dir()?, &v),
            Some(v) => PathBuf::from(v),
            None => home_dir()?.join(DEFAULT_DIR_NAME),
        };

        Ok(Self::new(root))
    }

    /// The directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `config.yaml` inside the directory.
    pub fn default_config_path(&self) -> PathBuf {
        self.root.join(DEFAULT_CONFIG_FILE)
    }

    /// The pointer file naming the config file in use.
    pub fn current_pointer_path(&self) -> PathBuf {
        self.root.join(CURRENT_POINTER_FILE)
    }

    /// The config file in use: the pointer's contents, or the default file
    /// when the pointer is missing or empty.
    pub fn current_config_path(&self) -> Result<PathBuf> {
        let pointer = self.current_pointer_path();
        let current = match fs::read_to_string(&pointer) {
            Ok(contents) => contents.trim().to_string(),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err.into()),
        };

        if current.is_empty() {
            Ok(self.default_config_path())
        } else {
            Ok(PathBuf::from(current))
        }
    }

    /// Record `path` as the config file in use. Relative paths are resolved
    /// against the working directory first.
    pub fn update_current_config_path(&self, path: &Path) -> Result<()> {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        fs::create_dir_all(&self.root)?;
        fs::write(self.current_pointer_path(), path.to_string_lossy().as_bytes())?;
        tracing::debug!(path = %path.display(), "Updated current config pointer");
        Ok(())
    }
}
