//! HCL file parser implementation.
//!
//! This module decodes Terraform files with the `hcl-rs` crate and lifts
//! `variable` and `helm_release` blocks into typed values.

use crate::config::Config;
use crate::error::{HelmScanError, Result};
use crate::parser::{Parser, HELM_RELEASE, RESOURCE_BLOCK, TERRAFORM_EXTENSION, VARIABLE_BLOCK};
use crate::types::{HelmReleaseInstance, ParsedModule, VariableDeclaration};

use hcl::{Block, Body, Expression};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// HCL parser for Terraform files.
///
/// The parser lists module directories, reads `.tf` files, and extracts
/// variable declarations and `helm_release` instances.
pub struct HclParser {
    /// Glob patterns for file names to leave out of module listings
    exclude_patterns: Vec<glob::Pattern>,
}

impl HclParser {
    /// Create a new HCL parser with the given configuration.
    ///
    /// Invalid exclude patterns are logged and ignored.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let exclude_patterns = config
            .scan
            .exclude_patterns
            .iter()
            .filter_map(|pattern| match glob::Pattern::new(pattern) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!(pattern = %pattern, error = %e, "Ignoring invalid exclude pattern");
                    None
                }
            })
            .collect();

        Self { exclude_patterns }
    }

    /// List the Terraform files directly inside a module directory.
    ///
    /// The listing is not recursive and is sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory doesn't exist or can't be read.
    pub fn module_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(crate::err!(DirectoryNotFound {
                path: dir.to_path_buf(),
            }));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf);
                match e.into_io_error() {
                    Some(source) => HelmScanError::io(path, source, file!(), line!()),
                    None => HelmScanError::internal(
                        format!("failed to list '{}'", dir.display()),
                        file!(),
                        line!(),
                    ),
                }
            })?;

            let file_path = entry.path();
            if !entry.file_type().is_file() || !self.is_terraform_file(file_path) {
                continue;
            }
            if self.should_skip(file_path) {
                continue;
            }
            files.push(file_path.to_path_buf());
        }

        tracing::debug!(dir = %dir.display(), files = files.len(), "Listed module files");
        Ok(files)
    }

    /// Parse a single Terraform file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn parse_file(&self, path: &Path) -> Result<ParsedModule> {
        tracing::debug!(file = %path.display(), "Parsing file");
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| HelmScanError::io(path, e, file!(), line!()))?;

        self.parse_content(&content, path)
    }

    /// Check if a path should be skipped.
    fn should_skip(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        if file_name.starts_with('.') {
            tracing::debug!(path = %path.display(), reason = "hidden file", "Skipping path");
            return true;
        }

        if self.exclude_patterns.iter().any(|p| p.matches(file_name)) {
            tracing::debug!(path = %path.display(), reason = "matches exclude pattern", "Skipping path");
            return true;
        }

        false
    }

    /// Check if a file is a Terraform file.
    fn is_terraform_file(&self, path: &Path) -> bool {
        path.to_string_lossy().ends_with(TERRAFORM_EXTENSION)
    }
}

impl Parser for HclParser {
    fn parse_content(&self, content: &str, file_path: &Path) -> Result<ParsedModule> {
        let body: Body = hcl::from_str(content).map_err(|e| crate::err!(HclParse {
            file: file_path.to_path_buf(),
            message: e.to_string(),
        }))?;

        let mut result = ParsedModule {
            file: file_path.to_path_buf(),
            ..ParsedModule::default()
        };

        for structure in body.into_inner() {
            let hcl::Structure::Block(block) = structure else {
                continue;
            };
            match block.identifier.as_str() {
                VARIABLE_BLOCK => {
                    if let Some(declaration) = parse_variable_block(&block) {
                        result.variables.push(declaration);
                    }
                }
                RESOURCE_BLOCK => {
                    if let Some(instance) = parse_helm_release_block(&block) {
                        result.releases.push(instance);
                    }
                }
                _ => {
                    // Ignore other block types (data, module, locals, etc.)
                }
            }
        }

        tracing::debug!(
            file = %file_path.display(),
            variables = result.variables.len(),
            releases = result.releases.len(),
            "Decoded file"
        );

        Ok(result)
    }
}

/// Parse a `variable "<name>"` block.
fn parse_variable_block(block: &Block) -> Option<VariableDeclaration> {
    let Some(name) = block.labels.first().map(|l| l.as_str().to_string()) else {
        tracing::debug!("Skipping variable block without a label");
        return None;
    };

    Some(VariableDeclaration {
        name,
        default: get_string_attribute(&block.body, "default"),
    })
}

/// Parse a `resource "helm_release" "<instance>"` block.
///
/// Returns `None` for every other resource type.
fn parse_helm_release_block(block: &Block) -> Option<HelmReleaseInstance> {
    let mut labels = block.labels.iter().map(|l| l.as_str());
    if labels.next() != Some(HELM_RELEASE) {
        return None;
    }

    Some(HelmReleaseInstance {
        instance_name: labels.next().unwrap_or("unnamed").to_string(),
        name: get_string_attribute(&block.body, "name"),
        chart: get_string_attribute(&block.body, "chart"),
        repository: get_string_attribute(&block.body, "repository"),
        version: get_string_attribute(&block.body, "version"),
    })
}

/// Get a string attribute from a body.
fn get_string_attribute(body: &Body, key: &str) -> Option<String> {
    body.attributes()
        .find(|attr| attr.key.as_str() == key)
        .and_then(|attr| expression_to_string(&attr.expr))
}

/// Render an expression the way an HCL-to-JSON decoder does.
///
/// Quoted templates keep their raw `${...}` text; other non-literal
/// expressions are wrapped in `${...}`. `null` is treated as absent.
fn expression_to_string(expr: &Expression) -> Option<String> {
    match expr {
        Expression::Null => None,
        Expression::String(s) => Some(s.clone()),
        Expression::Number(n) => Some(n.to_string()),
        Expression::Bool(b) => Some(b.to_string()),
        Expression::TemplateExpr(t) => Some(t.to_string()),
        other => Some(format!("${{{other}}}")),
    }
}
