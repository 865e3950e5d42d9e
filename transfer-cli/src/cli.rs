use std::path::PathBuf;

use clap::{Parser, Subcommand};
use transfer::{FilterMode, Layout};

#[derive(Parser)]
#[command(name = "transfer")]
#[command(about = "Replay dual-pane transfer sessions")]
#[command(version)]
pub struct Cli {
    /// Config file (default: config.json in the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write the log here instead of the platform cache dir
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level regardless of config
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the source and target panes of a session
    Partition {
        /// Session file (JSON)
        session: PathBuf,

        /// Side layout: ltr or rtl (overrides config)
        #[arg(long)]
        layout: Option<Layout>,
    },

    /// Apply a session's steps and print the resulting state as JSON
    Replay {
        /// Session file (JSON)
        session: PathBuf,

        /// Search matching: substring or fuzzy (overrides config)
        #[arg(long)]
        filter: Option<FilterMode>,

        /// Print only the final state
        #[arg(long)]
        summary: bool,
    },
}
