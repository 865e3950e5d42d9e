mod cli;
mod config;
mod error;
mod paths;
mod session;

use std::fs::{self, File};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, error, info};
use simplelog::WriteLogger;
use transfer::{Pane, Record, Row, Side, Transfer};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::error::CliError;
use crate::session::Session;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&cli, &config);

    match run(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli, config: &Config) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        config.level().unwrap_or_else(|e| {
            eprintln!("Warning: {}, using info", e);
            LevelFilter::Info
        })
    };

    let path = match &cli.log_file {
        Some(path) => Some(path.clone()),
        None => {
            paths::rotate_logs();
            paths::log_file()
        }
    };
    let Some(path) = path else { return };

    match open_log_file(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, simplelog::Config::default(), file) {
                eprintln!("Warning: cannot initialize logging: {}", e);
            }
        }
        Err(e) => eprintln!("Warning: {}", e),
    }
}

/// Create the log file, along with its directory.
fn open_log_file(path: &Path) -> Result<File, CliError> {
    let io_error = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    File::create(path).map_err(io_error)
}

fn run(command: Commands, mut config: Config) -> Result<(), CliError> {
    match command {
        Commands::Partition { session, layout } => {
            if let Some(layout) = layout {
                config.layout = layout;
            }
            let session = Session::load(&session)?;
            info!("Partitioning {} item(s)", session.dataset.len());
            print_partition(&session, &config);
            Ok(())
        }
        Commands::Replay {
            session,
            filter,
            summary,
        } => {
            if let Some(filter) = filter {
                config.filter_mode = filter;
            }
            let session = Session::load(&session)?;
            info!(
                "Replaying {} step(s) over {} item(s)",
                session.steps.len(),
                session.dataset.len()
            );
            let report = session::replay(&session, &config);
            let json = if summary {
                serde_json::to_string_pretty(&report.final_state)?
            } else {
                serde_json::to_string_pretty(&report)?
            };
            println!("{}", json);
            Ok(())
        }
    }
}

/// Print both panes, left side first.
fn print_partition(session: &Session, config: &Config) {
    let (transfer, _) = session::build(session, config);
    let split = transfer.partition(&session.dataset, &session.target_keys);

    for side in [Side::Left, Side::Right] {
        let pane = transfer.pane_at(side);
        let rows = split.rows(pane);
        println!("{} ({}):", pane, rows.len());
        for row in rows {
            println!("  {}", format_row(&transfer, pane, row));
        }
    }
}

fn format_row(transfer: &Transfer<Record>, pane: Pane, row: &Row<'_, Record>) -> String {
    let mark = if transfer.store().selection(pane).contains(&row.key) {
        "[x]"
    } else {
        "[ ]"
    };
    let mut line = format!("{} {}  {}", mark, row.key, row.label());
    if row.disabled() {
        line.push_str("  (disabled)");
    }
    line
}
