//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use jmig_model::OnUnresolved;

#[derive(Parser)]
#[command(
    name = "jmig",
    version,
    about = "Clean up Jira CSV exports before migration",
    long_about = "Normalize date/time values and split semicolon-delimited compound\n\
                  fields (comments, attachments, work logs) in Jira CSV exports.\n\
                  Delimiters that belong to field content are escaped as %3b."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file (formats, date columns, extra schemas).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

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

    /// Include cell values (comments, usernames) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize date/time values.
    Date(DateArgs),

    /// Split one compound field against a schema.
    Split(SplitArgs),

    /// Clean a CSV export: split compound columns and normalize dates.
    Scan(ScanArgs),

    /// List the known compound-field schemas.
    Schemas,
}

#[derive(Args)]
pub struct DateArgs {
    /// Values to normalize.
    #[arg(value_name = "VALUE", required = true)]
    pub values: Vec<String>,

    /// Target strftime pattern (default: %d/%m/%Y_%H:%M).
    #[arg(long = "format", value_name = "PATTERN")]
    pub format: Option<String>,
}

#[derive(Args)]
pub struct SplitArgs {
    /// Raw compound field text.
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Schema name, e.g. "Comment", "Attachment", "Log Work".
    #[arg(long = "schema", value_name = "NAME")]
    pub schema: String,

    /// Print the outcome as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Jira CSV export to clean.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Output path (default: <CSV> with a .migrated.csv extension).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Target strftime pattern for normalized dates.
    #[arg(long = "format", value_name = "PATTERN")]
    pub format: Option<String>,

    /// Additional plain date column (repeatable).
    #[arg(long = "date-column", value_name = "HEADER")]
    pub date_columns: Vec<String>,

    /// What to do with values that cannot be resolved.
    #[arg(long = "on-unresolved", value_enum)]
    pub on_unresolved: Option<OnUnresolvedArg>,

    /// Never prompt for corrections.
    #[arg(long = "unattended")]
    pub unattended: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OnUnresolvedArg {
    /// Stop the run at the first unresolved value.
    Abort,
    /// Leave the value unchanged and continue.
    Skip,
}

impl From<OnUnresolvedArg> for OnUnresolved {
    fn from(value: OnUnresolvedArg) -> Self {
        match value {
            OnUnresolvedArg::Abort => Self::Abort,
            OnUnresolvedArg::Skip => Self::Skip,
        }
    }
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
