//! CLI argument definitions for screencheck.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "screencheck",
    version,
    about = "Validate oral cancer screening data sheets",
    long_about = "Validate oral cancer screening data sheets.\n\n\
                  Every CSV export in the input directory is checked against the rule\n\
                  catalogue. Failures are stored per source file and compiled into one\n\
                  report per rule group (general, lesion)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
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

    /// Allow subject values (IC numbers, cell contents) in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate every source file and compile the reports.
    Validate(ValidateArgs),

    /// List the rule catalogue.
    Rules,

    /// Compile reports from stored failure datasets.
    Compile(CompileArgs),
}

/// Store and report locations shared by `validate` and `compile`.
#[derive(Args)]
pub struct StoreArgs {
    /// Directory holding per-file failure datasets.
    #[arg(long = "store", value_name = "DIR", env = "PATH_STORE", default_value = "store")]
    pub store: PathBuf,

    /// Directory receiving the compiled reports and the run summary.
    #[arg(long = "output", value_name = "DIR", env = "PATH_OUTPUT", default_value = "output")]
    pub output: PathBuf,

    /// Keep the failure datasets after compiling them.
    #[arg(long = "keep-store")]
    pub keep_store: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Directory holding the CSV data sheets.
    #[arg(long = "input", value_name = "DIR", env = "PATH_INPUT", default_value = "input")]
    pub input: PathBuf,

    #[command(flatten)]
    pub dirs: StoreArgs,

    /// Processing date (YYYY-MM-DD); defaults to the local date.
    ///
    /// Drives IC century resolution and the past-appointment check. Pin it to
    /// reproduce an earlier run.
    #[arg(long = "today", value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Treat "not applicable" lesion entries as empty in every lesion rule.
    #[arg(long = "normalize-not-applicable")]
    pub normalize_not_applicable: bool,

    /// Validate and store failures without compiling reports.
    #[arg(long = "no-compile")]
    pub no_compile: bool,
}

#[derive(Args)]
pub struct CompileArgs {
    #[command(flatten)]
    pub dirs: StoreArgs,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
