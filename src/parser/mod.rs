//! Structured config loading for Terraform files and the chart registry.
//!
//! Decoded documents are mapped into the typed schema in [`crate::types`]
//! here, so that discovery never probes loosely-typed structures.
//!
//! # Supported Constructs
//!
//! - `variable "<name>"` blocks with an optional `default`
//! - `resource "helm_release" "<instance>"` blocks with `name`, `chart`,
//!   `repository` and `version` attributes
//! - YAML chart registry manifests with a top-level `charts` list
//!
//! # Example
//!
//! ```rust,ignore
//! use helmscan::parser::HclParser;
//! use helmscan::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let parser = HclParser::new(&config);
//!
//!     let parsed = parser.parse_file("modules/eks_base/helm.tf".as_ref()).await?;
//!     println!("Found {} helm releases", parsed.releases.len());
//!     Ok(())
//! }
//! ```

mod hcl;
mod registry;

pub use self::hcl::HclParser;
pub use self::registry::{load_chart_registry, parse_chart_registry};

use crate::types::ParsedModule;

/// File extension of Terraform module files.
pub const TERRAFORM_EXTENSION: &str = ".tf";

/// Block type holding variable declarations.
pub const VARIABLE_BLOCK: &str = "variable";

/// Block type holding resources.
pub const RESOURCE_BLOCK: &str = "resource";

/// Resource type extracted from modules.
pub const HELM_RELEASE: &str = "helm_release";

/// Trait for decoding Terraform content into the typed schema.
///
/// This trait allows for different parsing implementations
/// (e.g., for testing with canned modules).
pub trait Parser: Send + Sync {
    /// Parse a single file's contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid HCL.
    fn parse_content(&self, content: &str, file_path: &std::path::Path) -> crate::Result<ParsedModule>;
}
