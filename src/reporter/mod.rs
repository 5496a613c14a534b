//! Report generation module.
//!
//! This module provides report generation in two formats:
//! - JSON: the array of release records consumed by CI
//! - Text: a human-readable table
//!
//! # Example
//!
//! ```rust,no_run
//! use helmscan::reporter::Reporter;
//! use helmscan::{Config, DiscoveryResult, ReportFormat};
//!
//! let config = Config::default();
//! let reporter = Reporter::new(&config);
//!
//! let report = reporter.generate(&DiscoveryResult::default(), ReportFormat::Json).unwrap();
//! assert_eq!(report, "[]");
//! ```

mod json;
mod text;

use crate::config::Config;
use crate::error::Result;
use crate::types::{DiscoveryResult, ReportFormat};

pub use json::JsonReporter;
pub use text::TextReporter;

/// Report generator that supports multiple output formats.
pub struct Reporter {
    config: Config,
}

impl Reporter {
    /// Create a new reporter with the given configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Generate a report in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if report generation fails.
    pub fn generate(&self, result: &DiscoveryResult, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => JsonReporter::new(&self.config).generate(result),
            ReportFormat::Text => TextReporter::new(&self.config).generate(result),
        }
    }
}

/// Trait for report generators.
pub trait ReportGenerator {
    /// Generate a report from discovery results.
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails.
    fn generate(&self, result: &DiscoveryResult) -> Result<String>;
}
