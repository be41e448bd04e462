//! Command-line interface

use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub mod commands;
pub mod formatters;
pub mod output;

pub use commands::Commands;
use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "episcope",
    version,
    about = "Filter, search and relate podcast episodes from a JSON dataset"
)]
pub struct Cli {
    /// Config file (default: global config, then ./episcope.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Episode dataset (overrides config)
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub const fn output_format(&self) -> OutputFormat {
        OutputFormat::from_robot(self.robot)
    }
}
