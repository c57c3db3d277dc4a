//! Roster - paginated record browser
//!
//! The main entry point for the `roster` binary:
//! - `run` (default): interactive TUI over the record feed
//! - `show`: headless load, search and page, printed as JSON or a table

use clap::{Args, Parser, Subcommand, ValueEnum};
use roster_common::Error;
use roster_config::{load_settings, validate_settings, ConfigError, Settings};
use roster_core::exit_codes::ExitCode;
use roster_core::logging::{init_logging, LogConfig, LogFormat, LogLevel, LogTarget};
use roster_core::orchestrator::{Orchestrator, RenderSnapshot};
use roster_core::source::source_from_location;
use std::path::PathBuf;

/// Roster - browse, search, select, edit and delete records from a JSON feed
#[derive(Parser)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to roster.toml (overrides ROSTER_CONFIG and XDG lookup)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Minimum log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Log line format (human, jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Append logs to a file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive table (default)
    Run(RunArgs),
    /// Print one page of the table and exit
    Show(ShowArgs),
}

/// Options shared by every command that loads records.
#[derive(Args, Debug, Default, Clone)]
struct SourceArgs {
    /// Record feed: http(s) URL or path to a JSON file
    #[arg(long)]
    source: Option<String>,

    /// Rows per page
    #[arg(long)]
    page_size: Option<usize>,
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Render inline at the bottom of the terminal using this many rows
    #[arg(long, value_name = "ROWS")]
    inline: Option<u16>,
}

#[derive(Args, Debug)]
struct ShowArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Search term applied before paging
    #[arg(long, default_value = "")]
    search: String,

    /// 1-based page to print
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = ShowFormat::Json)]
    format: ShowFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ShowFormat {
    Json,
    Table,
}

fn main() {
    let cli = Cli::parse();
    let interactive = !matches!(cli.command, Some(Commands::Show(_)));

    if let Err(e) = init_logging(&log_config(&cli.global, interactive)) {
        eprintln!("roster: cannot open log file: {}", e);
        std::process::exit(ExitCode::IoError.as_i32());
    }

    let result = match cli.command {
        None => run_interactive(&cli.global, &RunArgs::default()),
        Some(Commands::Run(args)) => run_interactive(&cli.global, &args),
        Some(Commands::Show(args)) => run_show(&cli.global, &args),
    };

    let exit_code = match result {
        Ok(()) => ExitCode::Clean,
        Err(e) => {
            tracing::error!(target: "roster.cli", code = e.code(), error = %e, "command failed");
            eprintln!("{}", e.format_human());
            ExitCode::for_error(&e)
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Logging setup from flags and environment.
///
/// The full-screen TUI owns the terminal, so interactive runs without
/// `--log-file` discard log output.
fn log_config(global: &GlobalOpts, interactive: bool) -> LogConfig {
    let mut config = LogConfig::from_env(global.log_level, global.log_format);
    if global.quiet {
        config = config.with_level(LogLevel::Error);
    } else if global.verbose > 0 {
        let mut level = config.level;
        for _ in 0..global.verbose {
            level = level.louder();
        }
        config = config.with_level(level);
    }

    let target = match (&global.log_file, interactive) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, true) => LogTarget::Discard,
        (None, false) => LogTarget::Stderr,
    };
    config.with_target(target)
}

/// Resolve `roster.toml` and apply command-line overrides.
fn resolve_settings(global: &GlobalOpts, args: &SourceArgs) -> Result<Settings, Error> {
    let loaded = load_settings(global.config.as_deref()).map_err(config_error)?;
    let mut settings = loaded.settings;
    if let Some(source) = &args.source {
        settings = settings.with_source(source.clone());
    }
    if let Some(page_size) = args.page_size {
        settings = settings.with_page_size(page_size);
    }
    validate_settings(&settings).map_err(config_error)?;

    tracing::info!(
        target: "roster.config",
        config_source = %loaded.source,
        source = %settings.source,
        page_size = settings.page_size,
        "settings resolved"
    );
    Ok(settings)
}

fn config_error(err: ConfigError) -> Error {
    match err {
        ConfigError::InvalidValue { key, message } => Error::InvalidSetting {
            key,
            reason: message,
        },
        other => Error::Config(other.to_string()),
    }
}

#[cfg(feature = "ui")]
fn run_interactive(global: &GlobalOpts, args: &RunArgs) -> Result<(), Error> {
    use roster_core::tui::{run_tui, App, Theme};

    let settings = resolve_settings(global, &args.source)?;
    let app = App::new(Orchestrator::from_settings(&settings))
        .with_source(source_from_location(&settings.source))
        .with_theme(Theme::from_name(settings.theme));

    run_tui(app, args.inline)?;
    Ok(())
}

#[cfg(not(feature = "ui"))]
fn run_interactive(_global: &GlobalOpts, _args: &RunArgs) -> Result<(), Error> {
    Err(Error::Terminal(
        "this build has no interactive UI; rebuild with --features ui or use `roster show`"
            .to_string(),
    ))
}

fn run_show(global: &GlobalOpts, args: &ShowArgs) -> Result<(), Error> {
    let settings = resolve_settings(global, &args.source)?;
    let source = source_from_location(&settings.source);

    let records = source.fetch()?;
    tracing::info!(
        target: "roster.source",
        origin = %source.describe(),
        count = records.len(),
        "records fetched"
    );

    let mut orchestrator = Orchestrator::from_settings(&settings);
    orchestrator.load(records);
    orchestrator.search(args.search.clone());
    if args.page != 1 && !orchestrator.go_to_page(args.page) {
        tracing::warn!(
            target: "roster.cli",
            page = args.page,
            page_count = orchestrator.snapshot().pagination.page_count,
            "page out of range; showing page 1"
        );
    }

    let snapshot = orchestrator.snapshot();
    match args.format {
        ShowFormat::Json => println!("{}", serde_json::to_string_pretty(snapshot)?),
        ShowFormat::Table => print!("{}", format_table(snapshot)),
    }
    Ok(())
}

/// Plain-text rendering of a snapshot.
fn format_table(snapshot: &RenderSnapshot) -> String {
    let headers = ["ID", "Name", "Email", "Role"];
    let cells: Vec<[&str; 4]> = snapshot
        .rows
        .iter()
        .map(|r| [r.id.as_str(), r.name.as_str(), r.email.as_str(), r.role.as_str()])
        .collect();

    let mut widths = headers.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |row: [&str; 4]| {
        row.iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_row(headers));
    out.push('\n');
    for row in cells {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    if snapshot.rows.is_empty() {
        out.push_str("No matching records\n");
    }
    out.push_str(&format!(
        "Page {} of {}  |  {}\n",
        snapshot.pagination.current_page, snapshot.pagination.page_count, snapshot.summary.text
    ));
    out
}
