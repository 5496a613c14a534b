//! JSON report generator.

use crate::config::Config;
use crate::error::Result;
use crate::reporter::ReportGenerator;
use crate::types::DiscoveryResult;

/// JSON report generator.
///
/// Emits the records as a bare JSON array, in discovery order.
pub struct JsonReporter {
    /// Whether to pretty-print the output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            pretty: config.output.pretty,
        }
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, result: &DiscoveryResult) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(&result.records)
        } else {
            serde_json::to_string(&result.records)
        };

        json.map_err(|e| crate::err!(ReportGeneration {
            message: format!("Failed to serialize JSON report: {e}"),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiscoveryMode, ReleaseRecord};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn create_test_result() -> DiscoveryResult {
        DiscoveryResult {
            records: vec![
                ReleaseRecord::new("nginx", "https://charts.helm.sh/stable", "1.2.3")
                    .with_variable_name(Some("nginx_version".to_string())),
                ReleaseRecord::new("cert-manager", "https://charts.jetstack.io", "v1.10.0")
                    .with_variable_name(None),
            ],
            files_scanned: vec!["helm.tf".into()],
            mode: DiscoveryMode::Registry,
        }
    }

    #[test]
    fn test_json_report_generation() {
        let config = Config::default();
        let reporter = JsonReporter::new(&config);

        let json = reporter.generate(&create_test_result()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed,
            json!([
                {
                    "chart": "nginx",
                    "repository": "https://charts.helm.sh/stable",
                    "version": "1.2.3",
                    "variable_name": "nginx_version"
                },
                {
                    "chart": "cert-manager",
                    "repository": "https://charts.jetstack.io",
                    "version": "v1.10.0",
                    "variable_name": null
                }
            ])
        );
    }

    #[test]
    fn test_json_report_basic_mode_fields() {
        let result = DiscoveryResult {
            records: vec![ReleaseRecord::new("nginx", "https://x/stable", "1.2.3")],
            files_scanned: Vec::new(),
            mode: DiscoveryMode::Basic,
        };
        let reporter = JsonReporter::new(&Config::default());

        let parsed: serde_json::Value =
            serde_json::from_str(&reporter.generate(&result).unwrap()).unwrap();

        assert_eq!(
            parsed,
            json!([{"chart": "nginx", "repository": "https://x/stable", "version": "1.2.3"}])
        );
    }

    #[test]
    fn test_json_report_pretty() {
        let mut config = Config::default();
        config.output.pretty = true;

        let json = JsonReporter::new(&config).generate(&create_test_result()).unwrap();
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_json_report_compact() {
        let mut config = Config::default();
        config.output.pretty = false;

        let json = JsonReporter::new(&config).generate(&create_test_result()).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_empty_report_is_empty_array() {
        let json = JsonReporter::new(&Config::default())
            .generate(&DiscoveryResult::default())
            .unwrap();
        assert_eq!(json, "[]");
    }
}
