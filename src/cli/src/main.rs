//! CLI for the Launchpad bug tracker.
//!
//! This tool mirrors open Launchpad bugs of a source package into GitHub
//! issues and closes those issues once the Launchpad bug is closed.

use clap::Parser;
use lp_bug_tracker::{MirrorBackend, RunSummary, Runner, RunnerConfig, RunnerError, Settings};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Launchpad bug tracker - Mirror Launchpad bugs into GitHub issues.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the issue tracker calls instead of making them.
    #[arg(long)]
    dry_run: bool,

    /// How to talk to GitHub: hub (default) or api
    #[arg(long, default_value = "hub")]
    backend: MirrorBackend,

    /// Path to the hub executable (overrides the settings file).
    #[arg(long)]
    hub_path: Option<PathBuf>,

    /// Directory for cached Launchpad responses (overrides the settings file).
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// GitHub Personal Access Token, used by the api backend.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // octocrab and reqwest share rustls; pin the provider before either builds a client
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Parse arguments
    let args = Args::parse();

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        // One line per event, module paths omitted
        .with(fmt::layer().compact().with_target(false))
        // RUST_LOG selects the level (e.g. RUST_LOG=lp_bug_tracker=debug);
        // anything unset or unparsable means "info"
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        // Install as the process-wide subscriber
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let mut settings = Settings::load_or_default(args.config.as_deref())?;
    if let Some(hub_path) = args.hub_path {
        settings.hub_path = hub_path;
    }
    if let Some(cache_dir) = args.cache_dir {
        settings.cache_dir = Some(cache_dir);
    }

    let mut config =
        RunnerConfig::new(settings, args.dry_run).with_backend(args.backend);
    if let Some(token) = args.token {
        config = config.with_token(token);
    }

    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Launchpad bugs: {}", summary.upstream_bugs);
    println!("  Mirrored issues: {}", summary.mirrored_issues);
    println!("  Issues created: {}", summary.issues_created);
    println!("  Issues closed: {}", summary.issues_closed);
    println!("  Unchanged: {}", summary.unchanged);
    println!("  Orphaned mirrors: {}", summary.orphaned);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_backend_and_dry_run() {
        let args = Args::try_parse_from([
            "lpbugtracker",
            "--dry-run",
            "--backend",
            "api",
            "--token",
            "secret",
        ])
        .unwrap();

        assert!(args.dry_run);
        assert_eq!(args.backend, MirrorBackend::Api);
        assert_eq!(args.token.as_deref(), Some("secret"));
    }

    #[test]
    fn rejects_unknown_backend() {
        let result = Args::try_parse_from(["lpbugtracker", "--backend", "gitlab"]);
        assert!(result.is_err());
    }
}
