//! Pagetrail main entry point
//!
//! This is the command-line interface for inspecting and replaying
//! traversal-session logs.

use anyhow::{bail, Context};
use clap::Parser;
use pagetrail::config::load_config_with_hash;
use pagetrail::output::{
    generate_markdown_report, load_latest_report, load_statistics, print_statistics,
};
use pagetrail::replay::{load_replay_log, replay_and_store, ReplayOutcome};
use pagetrail::session::{PaginationSummary, Session};
use pagetrail::storage::open_store;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Pagetrail: traversal-session tracking for page scrapers
///
/// Pagetrail replays recorded traversal event logs through the session
/// trackers, persists the resulting sessions, and reports on them.
#[derive(Parser, Debug)]
#[command(name = "pagetrail")]
#[command(version = "1.0.0")]
#[command(about = "Traversal-session tracking for page scrapers", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Replay a recorded traversal event log and persist the session
    #[arg(long, value_name = "FILE", conflicts_with_all = ["stats", "export_report", "dry_run"])]
    replay: Option<PathBuf>,

    /// Show statistics from the session database and exit
    #[arg(long, conflicts_with_all = ["dry_run", "export_report"])]
    stats: bool,

    /// Generate a markdown report for the most recent session and exit
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    export_report: bool,

    /// Validate config and show effective settings without doing anything
    #[arg(long, conflicts_with_all = ["stats", "export_report"])]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if cli.export_report {
        handle_export_report(&config)?;
    } else if let Some(replay_path) = &cli.replay {
        handle_replay(&config, &config_hash, replay_path)?;
    } else {
        bail!("nothing to do: pass one of --replay, --stats, --export-report, --dry-run");
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pagetrail=info,warn"),
            1 => EnvFilter::new("pagetrail=debug,info"),
            2 => EnvFilter::new("pagetrail=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows effective settings
fn handle_dry_run(config: &pagetrail::config::Config) {
    println!("=== Pagetrail Dry Run ===\n");

    println!("Session:");
    println!("  Label: {}", config.session.label);

    println!("\nNormalization:");
    println!(
        "  Strip tracking params: {}",
        config.normalize.strip_tracking_params
    );
    println!("  Strip www prefix: {}", config.normalize.strip_www);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  Report: {}", config.output.report_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows statistics from the session database
fn handle_stats(config: &pagetrail::config::Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let store = open_store(Path::new(&config.output.database_path))?;
    let stats = load_statistics(&store)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the --export-report mode: generates a markdown session report
fn handle_export_report(config: &pagetrail::config::Config) -> anyhow::Result<()> {
    println!("=== Exporting Session Report ===\n");
    println!("Database: {}", config.output.database_path);
    println!("Output: {}", config.output.report_path);
    println!();

    let store = open_store(Path::new(&config.output.database_path))?;

    tracing::info!("Loading most recent session from database...");
    let Some(report) = load_latest_report(&store)? else {
        bail!("no sessions recorded yet");
    };

    generate_markdown_report(&report, Path::new(&config.output.report_path))?;

    println!("✓ Report exported to: {}", config.output.report_path);

    Ok(())
}

/// Handles the --replay mode: runs a recorded event log through a session
fn handle_replay(
    config: &pagetrail::config::Config,
    config_hash: &str,
    replay_path: &Path,
) -> anyhow::Result<()> {
    tracing::info!("Loading replay log from: {}", replay_path.display());
    let log = load_replay_log(replay_path)
        .with_context(|| format!("failed to load replay log from {}", replay_path.display()))?;

    let mut store = open_store(Path::new(&config.output.database_path))?;
    let mut session = Session::with_options(config.normalize.clone());

    let (session_id, outcome) = replay_and_store(
        &log,
        &mut session,
        &mut store,
        &config.session.label,
        config_hash,
    )?;

    print_replay_summary(session_id, &session.summary(), &outcome, &session);

    Ok(())
}

/// Prints the outcome of a replay to stdout
fn print_replay_summary(
    session_id: i64,
    summary: &PaginationSummary,
    outcome: &ReplayOutcome,
    session: &Session,
) {
    println!("=== Replay Summary ===\n");

    println!("Session: {}", session_id);
    println!("  Current page: {}", summary.current_page);
    println!("  Page transitions: {}", summary.transitions);
    println!("  Duration: {} ms", summary.duration_ms);
    match &summary.last_detection {
        Some(detection) => println!(
            "  Last detection: {} (confidence {:.2})",
            detection.kind, detection.confidence
        ),
        None => println!("  Last detection: none"),
    }

    println!("\nTraversal:");
    println!("  Pages visited: {}", outcome.pages_visited);
    println!("  Duplicates skipped: {}", outcome.duplicates_skipped);
    println!("  Unique URLs: {}", session.visited().len());
    if session.visited().parse_failures() > 0 {
        println!(
            "  Canonicalization failures: {}",
            session.visited().parse_failures()
        );
    }

    if !outcome.ended {
        println!("\n⚠ Log had no end marker; session stored as interrupted");
    }
}
