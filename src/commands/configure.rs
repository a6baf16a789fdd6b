//! `littlepay config`: show or select the config file.

use std::path::PathBuf;

use super::{Console, RESULT_FAILURE, RESULT_SUCCESS};
use crate::config::{Config, ConfigDir};
use crate::Result;

/// Load (optionally reset) the config at `config_path`, make it current and
/// print a summary of it.
///
/// Fails when no participant is active or the active participant has no
/// usable credentials for the active environment.
pub fn configure(
    dir: &ConfigDir,
    config_path: Option<PathBuf>,
    reset: bool,
    console: &mut Console<'_>,
) -> Result<i32> {
    let config_path = match config_path {
        Some(path) => path,
        None => dir.current_config_path()?,
    };

    let config = Config::load_or_reset(&config_path, reset)?;
    dir.update_current_config_path(config.path())?;

    let env = config.active_env_name();
    let participant = config.active_participant_id();

    console.line(format!("Config: {}", config.path().display()))?;
    console.line(format!("Envs: {}", config.env_names().join(", ")))?;
    console.line(format!("Participants: {}", config.participant_ids().join(", ")))?;

    if participant.is_empty() {
        console.line(format!("Active: {}, [no participant]", env))?;
        return Ok(RESULT_FAILURE);
    }

    if config.active_credentials().is_err() {
        console.line(format!("Active: {}, {} [missing credentials]", env, participant))?;
        return Ok(RESULT_FAILURE);
    }

    console.line(format!("Active: {}, {}", env, participant))?;
    Ok(RESULT_SUCCESS)
}
