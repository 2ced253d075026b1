//! Reports a pipeline signal to the Jira board, or inspects an issue.
//!
//! Usage:
//!
//! ```text
//! mapchef-tracker [--config <path>] [--dry-run] report --severity error \
//!     --summary "Layer X missing for MA0123" --description-file desc.txt
//! mapchef-tracker [--config <path>] show PIPET-12
//! ```
//!
//! Credentials come from `.netrc` (`$HOME`, `$USERPROFILE`, then
//! `$MAPCHEF_NETRC`). With `--dry-run` the board is simulated in memory and
//! no secrets file is read.

use std::io::Write;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use clap::{Args, Parser, Subcommand};
use mapchef_tracker::config::AppConfig;
use mapchef_tracker::logging;
use mapchef_tracker::tracker::{
    adapters::{jira::JiraRestClient, memory::InMemoryIssueTracker, netrc::NetrcCredentialSource},
    domain::{Credentials, IssueKey, ServerUrl, Severity, TaskReport},
    ports::{CredentialResult, CredentialSource, IssueTracker},
    services::{IssueReconciler, ReconcileOutcome},
};
use mockable::DefaultClock;
use thiserror::Error;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(name = "mapchef-tracker", version, about)]
struct Cli {
    /// YAML configuration file.
    #[arg(long, global = true, env = "MAPCHEF_TRACKER_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Simulate the board in memory instead of calling Jira.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reconcile one pipeline signal with the board.
    Report(ReportArgs),
    /// Print an issue's summary, status and description.
    Show {
        /// Issue key, e.g. PIPET-12.
        key: String,
    },
}

#[derive(Debug, Args)]
struct ReportArgs {
    /// Severity name (debug, info, warning, error, critical) or level.
    #[arg(long)]
    severity: Severity,

    /// Unique task summary.
    #[arg(long)]
    summary: String,

    /// Issue description.
    #[arg(long, conflicts_with = "description_file")]
    description: Option<String>,

    /// File holding the issue description.
    #[arg(long)]
    description_file: Option<Utf8PathBuf>,

    /// Free-text message logged with the signal.
    #[arg(long, default_value = "")]
    message: String,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read description file {path}: {source}")]
    DescriptionFile {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
}

/// Credential source for dry runs; never touches the filesystem.
struct DryRunCredentials;

impl CredentialSource for DryRunCredentials {
    fn credentials_for(&self, hostname: &str) -> CredentialResult<Credentials> {
        Ok(Credentials::new(
            "dry-run@localhost",
            ServerUrl::new(format!("https://{hostname}"))?,
            "",
        ))
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging)?;

    if cli.dry_run {
        let tracker = Arc::new(InMemoryIssueTracker::new(config.board.target_column.clone()));
        run(cli.command, config, &DryRunCredentials, tracker).await
    } else {
        let tracker = Arc::new(JiraRestClient::new());
        run(cli.command, config, &NetrcCredentialSource::from_env(), tracker).await
    }
}

async fn run<T: IssueTracker>(
    command: Command,
    config: AppConfig,
    credentials: &dyn CredentialSource,
    tracker: Arc<T>,
) -> Result<(), BoxError> {
    let reconciler =
        IssueReconciler::connect(config.board, credentials, tracker, Arc::new(DefaultClock))
            .await?;

    let outcome = match command {
        Command::Report(args) => report(&reconciler, args).await,
        Command::Show { key } => show(&reconciler, &IssueKey::new(key)).await,
    };
    let closed = reconciler.close().await;
    outcome?;
    closed?;
    Ok(())
}

async fn report<T: IssueTracker>(
    reconciler: &IssueReconciler<T, DefaultClock>,
    args: ReportArgs,
) -> Result<(), BoxError> {
    let description = match (args.description, args.description_file) {
        (Some(text), _) => text,
        (None, Some(path)) => read_description(&path)
            .map_err(|source| CliError::DescriptionFile { path, source })?,
        (None, None) => String::new(),
    };
    let referral = TaskReport::new(args.summary)?.with_description(description);

    let outcome = reconciler
        .handle(args.severity, &args.message, Some(&referral))
        .await?;

    let mut stdout = std::io::stdout().lock();
    match outcome {
        ReconcileOutcome::NoReferral | ReconcileOutcome::Ignored => {
            writeln!(stdout, "no change")?;
        }
        ReconcileOutcome::Created { key } => writeln!(stdout, "created {key}")?,
        ReconcileOutcome::Updated {
            key,
            description_changed,
            comments_posted,
        } => writeln!(
            stdout,
            "updated {key} (description changed: {description_changed}, comments: {})",
            comments_posted.len()
        )?,
    }
    Ok(())
}

fn read_description(path: &Utf8Path) -> std::io::Result<String> {
    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other("path must include a file name"))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    Dir::open_ambient_dir(parent, ambient_authority())?.read_to_string(file_name)
}

async fn show<T: IssueTracker>(
    reconciler: &IssueReconciler<T, DefaultClock>,
    key: &IssueKey,
) -> Result<(), BoxError> {
    let found = reconciler.issue(key).await?;
    let mut stdout = std::io::stdout().lock();
    let Some(issue) = found else {
        writeln!(stdout, "{key} not found")?;
        return Ok(());
    };
    writeln!(stdout, "key: {}", issue.key)?;
    writeln!(stdout, "summary: {}", issue.summary)?;
    writeln!(stdout, "status: {}", issue.status)?;
    writeln!(
        stdout,
        "description: {}",
        issue.description.as_deref().unwrap_or("")
    )?;
    Ok(())
}
