use std::io;
use std::process::ExitCode;

use clap::Parser;
use littlepay_rs::cli::Cli;
use littlepay_rs::commands::{self, Console};
use littlepay_rs::config::ConfigDir;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let dir = match ConfigDir::from_env() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("❌ Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut console = Console::new(&mut out, &mut input);

    match commands::run(cli, &dir, &mut console).await {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            tracing::debug!(error = ?err, "Command failed");
            eprintln!("❌ Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
