//! Helm chart discovery.
//!
//! This module turns decoded Terraform modules into release records:
//! - [`variables`]: builds the variable table from a definitions file
//! - [`resolver`]: resolves `${var.<name>}` references against the table
//! - [`extractor`]: extracts `helm_release` records from one module
//!
//! [`process_module_files`] runs extraction over a list of files and keeps
//! the output in file order, then declaration order.

pub mod extractor;
pub mod resolver;
pub mod variables;

pub use extractor::{extract_basic, extract_releases, extract_with_registry, Extraction};
pub use resolver::{resolve_reference, resolve_reference_with_origin, variable_reference};
pub use variables::{build_variable_table, load_variable_table};

use crate::error::Result;
use crate::parser::HclParser;
use crate::types::{ReleaseRecord, VariableTable};
use std::path::Path;

/// Extract records from every module file, in list order.
///
/// Files are read one at a time; the first unreadable or malformed file
/// aborts the run. Records are not deduplicated across files.
///
/// # Errors
///
/// Returns an error if any file can't be read or parsed.
pub async fn process_module_files<P: AsRef<Path>>(
    parser: &HclParser,
    module_files: &[P],
    variables: &VariableTable,
    extraction: Extraction<'_>,
) -> Result<Vec<ReleaseRecord>> {
    let mut records = Vec::new();

    for file in module_files {
        let module = parser.parse_file(file.as_ref()).await?;
        let extracted = extract_releases(&module, variables, extraction);
        tracing::debug!(
            file = %file.as_ref().display(),
            records = extracted.len(),
            "Extracted helm releases"
        );
        records.extend(extracted);
    }

    Ok(records)
}
