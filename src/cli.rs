//! CLI argument parsing for tracegroup

use crate::config::FingerprintScheme;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for group reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "tracegroup")]
#[command(version)]
#[command(about = "Group call-graph traces by structure and report latency statistics", long_about = None)]
pub struct Cli {
    /// JSON file holding an array of trace records
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also report edge latencies and the covariance matrix for this group key
    #[arg(short = 'g', long = "group", value_name = "KEY")]
    pub group: Option<String>,

    /// Fingerprint scheme (overrides the config file)
    #[arg(long = "scheme", value_enum)]
    pub scheme: Option<FingerprintScheme>,

    /// TOML file with analysis settings
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
