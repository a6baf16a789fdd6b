//! `littlepay switch`: change the active environment or participant.

use std::path::PathBuf;

use super::{config_path, configure, Console};
use crate::cli::SwitchType;
use crate::config::{Config, ConfigDir};
use crate::Result;

/// Switch the active selection, then show the resulting config.
pub fn switch(
    dir: &ConfigDir,
    config_path_arg: Option<PathBuf>,
    switch_type: SwitchType,
    value: &str,
    console: &mut Console<'_>,
) -> Result<i32> {
    let path = config_path(dir, config_path_arg)?;
    let mut config = Config::load(&path)?;

    match switch_type {
        SwitchType::Env => config.set_active_env(value)?,
        SwitchType::Participant => config.set_active_participant(value)?,
    }

    configure(dir, Some(path), false, console)
}
