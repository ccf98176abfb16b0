//! Argument definitions for the `panel` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use panel_model::AssignmentArg;

#[derive(Parser)]
#[command(
    name = "panel",
    version,
    about = "Build balanced treatment panels from long-format tables",
    long_about = "Reshape a long (unit, period, outcome) CSV table into the aligned\n\
                  outcome and treatment matrices used by synthetic-control and\n\
                  difference-in-differences estimators."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a balanced panel and export it as JSON.
    Build(BuildArgs),

    /// List the columns of a CSV file with their inferred dtypes.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct BuildArgs {
    /// Long-format CSV with one row per (unit, period).
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Column holding unit identifiers.
    #[arg(long)]
    pub unit: String,

    /// Column holding period identifiers.
    #[arg(long)]
    pub time: String,

    /// Column holding the numeric outcome.
    #[arg(long)]
    pub outcome: String,

    /// Treatment assignment, `UNIT=ONSET` or `UNIT=START..END`. Repeat for
    /// several units or windows.
    #[arg(long = "treat", value_name = "ASSIGNMENT", required = true)]
    pub treat: Vec<AssignmentArg>,

    /// Sort the loaded table in place instead of on a copy.
    #[arg(long = "sort-in-place")]
    pub sort_in_place: bool,

    /// Write the export here instead of stdout.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON export.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    #[arg(value_name = "CSV")]
    pub input: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
