//! Plain text report generator.

use crate::config::Config;
use crate::error::Result;
use crate::reporter::ReportGenerator;
use crate::types::{DiscoveryMode, DiscoveryResult, ReleaseRecord};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

/// Text report generator for CLI output.
pub struct TextReporter {
    /// Whether to use colors
    use_colors: bool,
}

impl TextReporter {
    /// Create a new text reporter.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            use_colors: config.output.colored,
        }
    }
}

impl ReportGenerator for TextReporter {
    fn generate(&self, result: &DiscoveryResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header(result));
        output.push('\n');

        if result.records.is_empty() {
            output.push_str("\n  No helm releases found\n");
        } else {
            output.push_str(&self.format_records(result));
        }

        output.push_str(&self.format_footer(result));

        Ok(output)
    }
}

impl TextReporter {
    /// Format the report header.
    fn format_header(&self, result: &DiscoveryResult) -> String {
        let title = format!("HelmScan v{}", env!("CARGO_PKG_VERSION"));
        let title = if self.use_colors {
            title.bright_cyan().bold().to_string()
        } else {
            title
        };

        format!(
            "{title}\n{}\n  mode: {}, files scanned: {}",
            "=".repeat(80),
            result.mode,
            result.files_scanned.len()
        )
    }

    /// Format the record table.
    fn format_records(&self, result: &DiscoveryResult) -> String {
        let mut table = Table::new();
        table
            .load_preset(comfy_table::presets::UTF8_BORDERS_ONLY)
            .set_content_arrangement(ContentArrangement::Dynamic);

        match result.mode {
            DiscoveryMode::Basic => {
                table.set_header(vec!["Chart", "Repository", "Version"]);
            }
            DiscoveryMode::Registry => {
                table.set_header(vec!["Chart", "Repository", "Version", "Variable"]);
            }
        }

        for record in &result.records {
            table.add_row(row(record, result.mode));
        }

        format!("\n{table}\n")
    }

    /// Format the record count.
    fn format_footer(&self, result: &DiscoveryResult) -> String {
        let count = result.records.len();
        let summary = format!(
            "{count} helm release{} discovered",
            if count == 1 { "" } else { "s" }
        );

        if self.use_colors {
            format!("\n{}\n", summary.green())
        } else {
            format!("\n{summary}\n")
        }
    }
}

fn row(record: &ReleaseRecord, mode: DiscoveryMode) -> Vec<String> {
    let mut cells = vec![
        record.chart.clone(),
        record.repository.clone(),
        record.version.clone(),
    ];
    if mode == DiscoveryMode::Registry {
        cells.push(record.variable_name().unwrap_or("-").to_string());
    }
    cells
}
