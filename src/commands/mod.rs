//! Command logic behind the `littlepay` binary.
//!
//! Commands write to a [`Console`] rather than straight to stdout, and
//! return an exit status: [`RESULT_SUCCESS`] or [`RESULT_FAILURE`].
//! Per-item failures are reported inline and only affect the status.

mod configure;
mod groups;
mod products;
mod switch;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::cli::{Cli, Command};
use crate::client::{ClientConfig, LittlepayClient};
use crate::config::{Config, ConfigDir};
use crate::Result;

pub use configure::configure;
pub use groups::groups;
pub use products::products;
pub use switch::switch;

/// Exit status of a command that fully succeeded.
pub const RESULT_SUCCESS: i32 = 0;
/// Exit status of a command where anything failed.
pub const RESULT_FAILURE: i32 = 1;

/// Where commands print to and read confirmations from.
pub struct Console<'a> {
    out: &'a mut dyn Write,
    input: &'a mut dyn BufRead,
}

impl<'a> Console<'a> {
    /// Wrap an output sink and an input source.
    pub fn new(out: &'a mut dyn Write, input: &'a mut dyn BufRead) -> Self {
        Self { out, input }
    }

    /// Print one line.
    pub fn line(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.out, "{}", text.as_ref())?;
        Ok(())
    }

    /// Ask for confirmation. End of input counts as "no".
    pub fn confirm(&mut self) -> Result<bool> {
        write!(self.out, "❔ Are you sure? (yes/no): ")?;
        self.out.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            self.line("")?;
            return Ok(false);
        }

        Ok(answer.trim().to_lowercase().starts_with('y'))
    }
}

/// Print `message` followed by the active environment and participant.
///
/// The production environment is flagged so destructive work there stands out.
pub(crate) fn print_active_message(
    console: &mut Console<'_>,
    config: &Config,
    message: &str,
    postfix: Option<&str>,
) -> Result<()> {
    let alert = env_alert(config);
    let postfix = postfix.map(|p| format!(" {}", p)).unwrap_or_default();
    let line = format!(
        "{}: {}{}, {}{}",
        message,
        alert,
        config.active_env_name(),
        config.active_participant_id(),
        postfix
    );
    console.line(line.trim())
}

fn env_alert(config: &Config) -> &'static str {
    if config.active_env_name() == crate::ApiEnvironment::PRODUCTION {
        "⚠️  "
    } else {
        ""
    }
}

/// Check the active selection has usable credentials before any request.
///
/// When it does not, prints the same `Active:` state line as `config` and
/// returns `false`.
pub(crate) fn check_active_selection(console: &mut Console<'_>, config: &Config) -> Result<bool> {
    let env = config.active_env_name();
    let participant = config.active_participant_id();
    let alert = env_alert(config);

    if participant.is_empty() {
        console.line(format!("Active: {}{}, [no participant]", alert, env))?;
        return Ok(false);
    }

    match config.active_credentials() {
        Ok(_) => Ok(true),
        Err(err) if err.is_config_error() => {
            console.line(format!(
                "Active: {}{}, {} [missing credentials]",
                alert, env, participant
            ))?;
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// Keep the items matching any of `terms`, case-insensitively.
///
/// With no terms every item is kept. Blank terms never match, so terms that
/// are all blank keep nothing.
pub(crate) fn filter_by_terms<T, F>(items: Vec<T>, terms: &[String], fields: F) -> Vec<T>
where
    F: Fn(&T) -> Vec<&str>,
{
    if terms.is_empty() {
        return items;
    }

    let terms: Vec<String> = terms
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect();

    items
        .into_iter()
        .filter(|item| {
            let values: Vec<String> = fields(item).iter().map(|v| v.to_lowercase()).collect();
            terms
                .iter()
                .any(|term| values.iter().any(|v| v.contains(term.as_str())))
        })
        .collect()
}

/// Build a client for the active participant and environment, make sure it
/// holds a valid token, and persist that token to the config.
pub(crate) async fn active_client(
    config: &mut Config,
    client_config: &ClientConfig,
) -> Result<LittlepayClient> {
    let env = config.active_env()?;
    let credentials = config.active_credentials()?;

    let client = LittlepayClient::with_token(
        env,
        credentials,
        config.active_token(),
        client_config.clone(),
    )?;

    let token = client.access_token().await?;
    config.set_active_token(&token)?;

    Ok(client)
}

/// Resolve the config file for a command: an explicit path, else the current one.
pub(crate) fn config_path(dir: &ConfigDir, explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => dir.current_config_path(),
    }
}

/// Run the parsed command line and return its exit status.
pub async fn run(cli: Cli, dir: &ConfigDir, console: &mut Console<'_>) -> Result<i32> {
    run_with(cli, dir, &ClientConfig::default(), console).await
}

/// [`run`] with explicit client settings.
pub async fn run_with(
    cli: Cli,
    dir: &ConfigDir,
    client_config: &ClientConfig,
    console: &mut Console<'_>,
) -> Result<i32> {
    if cli.version {
        console.line(format!("littlepay {}", env!("CARGO_PKG_VERSION")))?;
        return Ok(RESULT_SUCCESS);
    }

    match cli.command {
        None => configure(dir, cli.config_path, false, console),
        Some(Command::Config { config_path, reset }) => {
            configure(dir, config_path.or(cli.config_path), reset, console)
        }
        Some(Command::Switch { switch_type, value }) => {
            switch(dir, cli.config_path, switch_type, &value, console)
        }
        Some(Command::Groups(args)) => {
            let path = config_path(dir, cli.config_path)?;
            groups(&path, &args, client_config, console).await
        }
        Some(Command::Products(args)) => {
            let path = config_path(dir, cli.config_path)?;
            products(&path, &args, client_config, console).await
        }
    }
}
