//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reader for flat key=value configuration files
#[derive(Parser)]
#[command(
    name = "kvconf",
    version,
    about = "Reader for flat key=value configuration files",
    long_about = "Loads key=value configuration files with '#' comments and optional quoting, \
                  checks required keys, and prints typed values."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (also writes a rotating log file)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Directory for debug log files
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
}

/// Type a value is read as
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ValueType {
    /// Raw string (default)
    #[default]
    String,
    /// 32-bit signed integer
    Int,
    /// Single precision float
    Float,
    /// Double precision float
    Double,
}

/// Output format for `dump`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DumpFormat {
    /// One `key=value` line per entry (default)
    #[default]
    Text,
    /// Pretty-printed JSON object
    Json,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Load a file and verify required keys are present
    Check {
        /// Configuration file
        file: PathBuf,

        /// Key that must be present (repeatable)
        #[arg(long = "require", short = 'r', value_name = "KEY")]
        required: Vec<String>,
    },
    /// Print a single value
    Get {
        /// Configuration file
        file: PathBuf,

        /// Key to look up
        key: String,

        /// Type to read the value as
        #[arg(long = "type", short = 't', default_value = "string")]
        value_type: ValueType,

        /// Value printed when the key is absent
        #[arg(long, short = 'd')]
        default: Option<String>,
    },
    /// Print all entries
    Dump {
        /// Configuration file
        file: PathBuf,

        /// Output format
        #[arg(long, short = 'f', default_value = "text")]
        format: DumpFormat,

        /// Only include keys matching this regex
        #[arg(long = "match", short = 'm', value_name = "REGEX")]
        pattern: Option<String>,
    },
    /// Display version information
    Version,
}
