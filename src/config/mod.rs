//! The on-disk config store.
//!
//! Holds known environments, per-participant credentials and cached tokens,
//! and the active environment/participant selection:
//!
//! ```yaml
//! active:
//!   env: qa
//!   participant: cst
//! envs:
//!   prod: { url: https://api.littlepay.com, version: v1 }
//!   qa: { url: https://api.qa.littlepay.com, version: v1 }
//! participants:
//!   cst:
//!     qa: { audience: ..., client_id: ..., client_secret: ... }
//! ```
//!
//! Every change is written straight back to disk. Writes go to a temporary
//! file in the same directory which then replaces the config file.

mod file;
mod paths;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::auth::{AccessToken, Credentials};
use crate::{ApiEnvironment, Error, Result};

pub use file::{ActiveSelection, ConfigFile, EnvEntry, ParticipantEnv, StoredToken};
pub use paths::{ConfigDir, ENV_CONFIG_DIR};

/// A loaded config file bound to its path.
#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    file: ConfigFile,
}

impl Config {
    /// Load the config at `path`, creating it from defaults if it is missing.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        Self::load_or_reset(path, false)
    }

    /// Load the config at `path`; with `reset`, overwrite it with defaults.
    pub fn load_or_reset(path: impl Into<PathBuf>, reset: bool) -> Result<Self> {
        let path = path.into();

        if reset || !path.exists() {
            tracing::info!(path = %path.display(), reset, "Writing default config");
            let config = Self {
                path,
                file: ConfigFile::default(),
            };
            config.save()?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&path)?;
        let file = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(&contents)?
        };

        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(Self { path, file })
    }

    /// Write the config back to its path.
    pub fn save(&self) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let yaml = serde_yaml::to_string(&self.file)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(yaml.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        Ok(())
    }

    /// The file this config was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parsed document.
    pub fn file(&self) -> &ConfigFile {
        &self.file
    }

    /// Name of the active environment.
    pub fn active_env_name(&self) -> &str {
        &self.file.active.env
    }

    /// The active environment.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the active name is not a known environment, or
    /// [`Error::UrlParse`] if its URL is malformed.
    pub fn active_env(&self) -> Result<ApiEnvironment> {
        let name = self.active_env_name();
        let entry = self
            .file
            .envs
            .get(name)
            .ok_or_else(|| Error::Config(format!("Unknown environment: {}", name)))?;

        url::Url::parse(&entry.url)?;
        Ok(entry.to_environment(name))
    }

    /// Id of the active participant; empty when none is selected.
    pub fn active_participant_id(&self) -> &str {
        &self.file.active.participant
    }

    /// Make `name` the active environment.
    pub fn set_active_env(&mut self, name: &str) -> Result<()> {
        if !self.file.envs.contains_key(name) {
            return Err(Error::Config(format!(
                "Unknown environment: {}, must be one of: {}",
                name,
                self.env_names().join(", ")
            )));
        }

        self.file.active.env = name.to_string();
        self.save()
    }

    /// Make `participant_id` the active participant.
    pub fn set_active_participant(&mut self, participant_id: &str) -> Result<()> {
        if !self.file.participants.contains_key(participant_id) {
            return Err(Error::Config(format!(
                "Unknown participant: {}, must be one of: {}",
                participant_id,
                self.participant_ids().join(", ")
            )));
        }

        self.file.active.participant = participant_id.to_string();
        self.save()
    }

    fn active_participant_env(&self) -> Option<&ParticipantEnv> {
        self.file
            .participants
            .get(self.active_participant_id())?
            .get(self.active_env_name())
    }

    fn missing_credentials(&self) -> Error {
        Error::MissingCredentials {
            env: self.active_env_name().to_string(),
            participant: self.active_participant_id().to_string(),
        }
    }

    /// Credentials of the active participant in the active environment.
    ///
    /// # Errors
    ///
    /// [`Error::MissingCredentials`] when there is no entry or any of the
    /// client id, secret or audience is blank.
    pub fn active_credentials(&self) -> Result<Credentials> {
        let entry = self
            .active_participant_env()
            .ok_or_else(|| self.missing_credentials())?;

        let credentials = Credentials::new(
            entry.client_id.as_str(),
            entry.client_secret.as_str(),
            entry.audience.as_str(),
        );

        if credentials.is_complete() {
            Ok(credentials)
        } else {
            Err(self.missing_credentials())
        }
    }

    /// The cached token for the active participant and environment.
    pub fn active_token(&self) -> Option<AccessToken> {
        self.active_participant_env()?.token.as_ref()?.to_token()
    }

    /// Cache `token` for the active participant and environment.
    pub fn set_active_token(&mut self, token: &AccessToken) -> Result<()> {
        let env = self.active_env_name().to_string();
        let participant = self.active_participant_id().to_string();

        let entry = self
            .file
            .participants
            .get_mut(&participant)
            .and_then(|envs| envs.get_mut(&env))
            .ok_or(Error::MissingCredentials { env, participant })?;

        let stored = StoredToken::from_token(token);
        if entry.token.as_ref() == Some(&stored) {
            return Ok(());
        }

        entry.token = Some(stored);
        self.save()
    }

    /// Names of all known environments.
    pub fn env_names(&self) -> Vec<&str> {
        self.file.envs.keys().map(String::as_str).collect()
    }

    /// Ids of all configured participants.
    pub fn participant_ids(&self) -> Vec<&str> {
        self.file.participants.keys().map(String::as_str).collect()
    }
}
