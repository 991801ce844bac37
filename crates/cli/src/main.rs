//! `discord-message-counter` entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse arguments and configuration** — `clap` flags layered over the
//!    optional TOML file (see [`config`]).
//! 2. **Wire observability** — install the `tracing-subscriber` layer on
//!    stderr, sharing the spinner's writer (see [`logging`], [`progress`]).
//! 3. **Run the report** — resolve the data root, load name mappings, scan
//!    with a spinner, then select and render conversations to stdout.

mod config;
mod logging;
mod progress;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use counter::{
    load_mappings, prepare_data_root, render_json, render_tree, scan_conversations, select,
    ConversationKind, ReportOptions,
};
use tracing::{debug, info};

use crate::config::{CliConfig, OutputFormat};
use crate::progress::SpinnerProgress;

/// Count messages per conversation in a Discord data package.
#[derive(Parser, Debug)]
#[command(name = "discord-message-counter", version, about)]
struct Cli {
    /// Path to the Discord data package (ZIP file or extracted folder).
    input_path: PathBuf,

    /// Limit the number of conversations displayed.
    #[arg(short, long, value_name = "N")]
    limit: Option<usize>,

    /// Filter by conversation type.
    #[arg(short = 't', long = "type", value_enum, value_name = "TYPE")]
    conversation_type: Option<KindArg>,

    /// Minimum message count to display [default: 1].
    #[arg(short, long, value_name = "N")]
    min_messages: Option<usize>,

    /// Output format [default: text].
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Path to a TOML configuration file.
    #[arg(long, env = "DMC_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Only log errors and hide the progress spinner.
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Command-line spelling of [`ConversationKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Dm,
    Guild,
}

impl From<KindArg> for ConversationKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Dm => ConversationKind::Dm,
            KindArg::Guild => ConversationKind::Guild,
        }
    }
}

/// Effective settings after layering flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    report: ReportOptions,
    format: OutputFormat,
    log_level: String,
    json_logs: bool,
    quiet: bool,
}

impl Settings {
    fn resolve(cli: &Cli, config: &CliConfig) -> Self {
        let defaults = ReportOptions::default();
        Self {
            report: ReportOptions {
                limit: cli.limit.or(config.report.limit),
                kind: cli
                    .conversation_type
                    .map(ConversationKind::from)
                    .or(config.report.kind),
                min_messages: cli
                    .min_messages
                    .or(config.report.min_messages)
                    .unwrap_or(defaults.min_messages),
            },
            format: cli.format.or(config.report.format).unwrap_or_default(),
            log_level: logging::level_for(cli.quiet, cli.verbose, config.logging.level.as_deref()),
            json_logs: config.logging.json,
            quiet: cli.quiet,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    let settings = Settings::resolve(cli, &config);
    let progress = SpinnerProgress::new(!settings.quiet)?;
    logging::init(&settings.log_level, settings.json_logs, progress.log_writer())?;

    let root = prepare_data_root(&cli.input_path).context("Failed to prepare data root")?;
    debug!(
        path = %root.path().display(),
        extracted = root.is_extracted(),
        "data root ready"
    );
    let mappings = load_mappings(&root).context("Failed to load name mappings")?;
    progress.start();
    let scan =
        scan_conversations(&root, &mappings, &progress).context("Failed to scan conversations")?;
    if scan.skipped > 0 {
        info!(skipped = scan.skipped, "some channels could not be read");
    }

    let selected = select(scan.conversations, &settings.report);
    let output = match settings.format {
        OutputFormat::Text => render_tree(&selected),
        OutputFormat::Json => render_json(&selected)? + "\n",
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes()).context("Failed to write report")?;
    stdout.flush().context("Failed to write report")?;
    Ok(())
}
