//! CLI argument definitions for the verimail client.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use verimail_model::Reachability;
use verimail_present::Column;

#[derive(Parser)]
#[command(
    name = "verimail",
    version,
    about = "Email verification client - check address batches against a validation service",
    long_about = "Collect email addresses from CSV files or typed input, submit them to a\n\
                  verification service, and browse the verdicts.\n\n\
                  The service URL comes from --api-url, then APP_URL, then the config file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Include addresses in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Base URL of the verification service.
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Settings file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract addresses from a delimited text file.
    Extract(ExtractArgs),

    /// Append typed addresses to the stored list.
    Add {
        /// Addresses separated by commas, semicolons, or whitespace.
        #[arg(value_name = "ADDRESS", required = true)]
        text: Vec<String>,
    },

    /// Print the stored address list.
    List,

    /// Submit addresses to the verification service.
    Check {
        /// Replace the stored list with these addresses before submitting.
        #[arg(value_name = "ADDRESS")]
        emails: Vec<String>,
    },

    /// Print the stored verdicts.
    Show(ShowArgs),

    /// Browse the stored verdicts interactively.
    Browse,

    /// Show, hide, or toggle the summary chart.
    Chart {
        #[arg(value_enum)]
        action: Option<ChartArg>,
    },

    /// Clear the stored address list and verdicts.
    Reset,
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Path to the uploaded text file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Separator between fields.
    #[arg(long = "delimiter", value_enum, default_value = "comma")]
    pub delimiter: DelimiterArg,

    /// Header of the email column (default: inferred from header names).
    #[arg(long = "column", value_name = "HEADER")]
    pub column: Option<String>,

    /// Trim whitespace around cells before extraction.
    #[arg(long = "trim")]
    pub trim: bool,

    /// Append the extracted addresses to the stored list.
    #[arg(long = "insert")]
    pub insert: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Case-insensitive search across every column.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Only rows with this status.
    #[arg(long = "status", value_name = "STATUS")]
    pub status: Option<Reachability>,

    /// Advance the sort cycle of a column (repeatable).
    #[arg(long = "sort", value_name = "COLUMN")]
    pub sort: Vec<Column>,

    /// First row to show.
    #[arg(long = "offset", default_value_t = 0)]
    pub offset: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DelimiterArg {
    Comma,
    Period,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ChartArg {
    Show,
    Hide,
    Toggle,
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
