//! Integration tests for HelmScan.
//!
//! These tests run discovery against the on-disk fixtures, through the
//! library API and through the `helmscan` binary.

use helmscan::{Config, Discovery, DiscoveryMode, ReleaseRecord};
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Configuration pointing at the `eks` fixture tree.
fn eks_config(mode: DiscoveryMode) -> Config {
    let root = fixtures_path().join("eks");
    let mut config = Config::default();
    config.scan.mode = mode;
    config.scan.module_dirs = vec![
        root.join("modules/eks_base"),
        root.join("modules/eks_post_config"),
    ];
    config.scan.variables_file = Some(root.join("templates/eks/inputs.tf"));
    config.registry.path = Some(root.join(".github/config/chart.yaml"));
    config
}

mod discovery_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_basic_mode_discovery() {
        let result = Discovery::new(eks_config(DiscoveryMode::Basic)).run().await.unwrap();

        assert_eq!(
            result.records,
            vec![
                ReleaseRecord::new("nginx", "https://x/stable", "1.2.3"),
                ReleaseRecord::new(
                    "karpenter",
                    "oci://public.ecr.aws/karpenter",
                    "${var.karpenter_version}"
                ),
                ReleaseRecord::new(
                    "metrics-server",
                    "https://kubernetes-sigs.github.io/metrics-server/",
                    "3.11.0"
                ),
            ]
        );
        assert_eq!(result.files_scanned.len(), 3);
    }

    #[tokio::test]
    async fn test_registry_mode_discovery() {
        let result = Discovery::new(eks_config(DiscoveryMode::Registry)).run().await.unwrap();

        assert_eq!(
            result.records,
            vec![
                ReleaseRecord::new("nginx", "https://charts.helm.sh/stable", "1.2.3")
                    .with_variable_name(Some("Nginx_Version".to_string())),
                ReleaseRecord::new(
                    "karpenter",
                    "oci://public.ecr.aws/karpenter",
                    "${var.karpenter_version}"
                )
                .with_variable_name(Some("karpenter_version".to_string())),
                ReleaseRecord::new(
                    "metrics-server",
                    "https://kubernetes-sigs.github.io/metrics-server/",
                    "3.11.0"
                )
                .with_variable_name(None),
            ]
        );
    }

    #[tokio::test]
    async fn test_scan_order_follows_directory_order() {
        let root = fixtures_path().join("eks");
        let mut config = eks_config(DiscoveryMode::Basic);
        config.scan.module_dirs = vec![
            root.join("modules/eks_post_config"),
            root.join("modules/eks_base"),
        ];

        let result = Discovery::new(config).run().await.unwrap();
        let charts: Vec<_> = result.records.iter().map(|r| r.chart.as_str()).collect();

        assert_eq!(charts, vec!["metrics-server", "nginx", "karpenter"]);
    }

    #[tokio::test]
    async fn test_same_directory_twice_is_not_deduplicated() {
        let root = fixtures_path().join("eks");
        let mut config = eks_config(DiscoveryMode::Basic);
        config.scan.module_dirs = vec![
            root.join("modules/eks_post_config"),
            root.join("modules/eks_post_config"),
        ];

        let result = Discovery::new(config).run().await.unwrap();

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0], result.records[1]);
    }

    #[tokio::test]
    async fn test_malformed_module_aborts_run() {
        let mut config = eks_config(DiscoveryMode::Basic);
        config.scan.module_dirs.push(fixtures_path().join("broken"));

        let result = Discovery::new(config).run().await;

        assert!(matches!(result, Err(helmscan::HelmScanError::HclParse { .. })));
    }

    #[tokio::test]
    async fn test_missing_module_directory_aborts_run() {
        let mut config = eks_config(DiscoveryMode::Basic);
        config.scan.module_dirs.push(fixtures_path().join("does-not-exist"));

        let result = Discovery::new(config).run().await;

        assert!(matches!(
            result,
            Err(helmscan::HelmScanError::DirectoryNotFound { .. })
        ));
    }
}

mod reporter_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use helmscan::reporter::Reporter;
    use helmscan::ReportFormat;
    use serde_json::json;

    #[tokio::test]
    async fn test_json_report() {
        let config = eks_config(DiscoveryMode::Registry);
        let result = Discovery::new(config.clone()).run().await.unwrap();

        let report = Reporter::new(&config).generate(&result, ReportFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&report).unwrap();

        assert_eq!(
            parsed[0],
            json!({
                "chart": "nginx",
                "repository": "https://charts.helm.sh/stable",
                "version": "1.2.3",
                "variable_name": "Nginx_Version"
            })
        );
        assert_eq!(parsed.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_text_report() {
        let mut config = eks_config(DiscoveryMode::Basic);
        config.output.colored = false;
        let result = Discovery::new(config.clone()).run().await.unwrap();

        let text = Reporter::new(&config).generate(&result, ReportFormat::Text).unwrap();

        assert!(text.contains("HelmScan"));
        assert!(text.contains("metrics-server"));
        assert!(text.contains("3 helm releases discovered"));
    }
}

mod cli_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use assert_cmd::Command;
    use predicates::prelude::*;

    fn helmscan() -> Command {
        let mut cmd = Command::cargo_bin("helmscan").unwrap();
        cmd.env_remove("HELMSCAN_CONFIG").env_remove("RUST_LOG");
        cmd
    }

    #[test]
    fn test_scan_with_default_layout() {
        let output = helmscan()
            .current_dir(fixtures_path().join("eks"))
            .arg("scan")
            .output()
            .unwrap();

        assert!(output.status.success());
        let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let charts: Vec<_> = parsed
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["chart"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(charts, vec!["nginx", "karpenter", "metrics-server"]);
        assert_eq!(parsed[2]["variable_name"], serde_json::Value::Null);
    }

    #[test]
    fn test_scan_basic_mode_flags() {
        let root = fixtures_path().join("eks");
        helmscan()
            .arg("scan")
            .arg(root.join("modules/eks_base"))
            .arg("--variables")
            .arg(root.join("templates/eks/inputs.tf"))
            .args(["--mode", "basic", "--compact"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#"{"chart":"nginx","repository":"https://x/stable","version":"1.2.3"}"#,
            ))
            .stdout(predicate::str::contains("variable_name").not());
    }

    #[test]
    fn test_scan_missing_variables_file_fails() {
        let root = fixtures_path().join("eks");
        helmscan()
            .arg("scan")
            .arg(root.join("modules/eks_base"))
            .arg("--variables")
            .arg(root.join("templates/eks/missing.tf"))
            .args(["--mode", "basic"])
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("File not found"));
    }

    #[test]
    fn test_scan_malformed_module_fails() {
        helmscan()
            .arg("scan")
            .arg(fixtures_path().join("broken"))
            .args(["--mode", "basic"])
            .arg("--variables")
            .arg(fixtures_path().join("eks/templates/eks/inputs.tf"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to parse HCL"));
    }

    #[test]
    fn test_validate_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("helmscan.yaml");
        std::fs::write(&path, Config::example_yaml()).unwrap();

        helmscan()
            .arg("validate")
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration is valid"));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();

        helmscan().current_dir(dir.path()).arg("init").assert().success();
        assert!(dir.path().join("helmscan.yaml").exists());

        helmscan()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }
}

mod config_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_loading() {
        let yaml = r"
scan:
  module_dirs:
    - modules/helm
  mode: basic
";

        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.scan.mode, DiscoveryMode::Basic);
        assert_eq!(config.scan.module_dirs, vec![PathBuf::from("modules/helm")]);
        assert!(config.validate().is_ok());
    }
}
