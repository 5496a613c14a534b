//! Command-line interface module.
//!
//! This module defines the CLI structure using Clap, including
//! all commands, arguments, and options.
//!
//! # Commands
//!
//! - `scan`: Discover helm charts in Terraform module directories
//! - `init`: Create an example configuration file
//! - `validate`: Validate a configuration file
//!
//! # Example Usage
//!
//! ```bash
//! # Scan with the configured module directories
//! helmscan scan
//!
//! # Scan explicit module directories, resolving versions from inputs.tf
//! helmscan scan modules/eks_base modules/eks_post_config --variables templates/eks/inputs.tf
//!
//! # Basic mode: take chart and repository from the helm_release itself
//! helmscan scan modules/eks_base --mode basic
//!
//! # Human-readable table
//! helmscan scan --format text
//!
//! # Initialize configuration
//! helmscan init
//! ```

use crate::types::{DiscoveryMode, ReportFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// HelmScan - discover Helm charts and versions pinned in Terraform modules.
#[derive(Parser, Debug)]
#[command(
    name = "helmscan",
    author,
    version,
    about = "Discover Helm charts and versions pinned in Terraform modules",
    long_about = "HelmScan scans Terraform modules for helm_release resources, resolves \
                  chart versions given as ${var.NAME} references against a variables \
                  file, cross-references a chart registry, and prints a JSON report."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "HELMSCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover helm_release charts in Terraform module directories
    #[command(visible_alias = "s")]
    Scan(ScanArgs),

    /// Create an example configuration file
    Init,

    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Arguments for the scan command.
#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Module directories to scan (overrides scan.module_dirs)
    #[arg(value_name = "MODULE_DIR")]
    pub module_dirs: Vec<PathBuf>,

    /// Terraform file with variable definitions
    #[arg(long, value_name = "FILE")]
    pub variables: Option<PathBuf>,

    /// Chart registry manifest (YAML)
    #[arg(long, value_name = "FILE")]
    pub registry: Option<PathBuf>,

    /// Extraction mode
    #[arg(short, long, value_enum)]
    pub mode: Option<DiscoveryMode>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Disable colors in text output
    #[arg(long)]
    pub no_color: bool,

    /// File-name patterns to exclude from scanning (glob patterns)
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude_patterns: Vec<String>,
}

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(value_name = "FILE", default_value = "helmscan.yaml")]
    pub config: PathBuf,
}
