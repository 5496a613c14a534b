//! Variable table construction.

use crate::error::Result;
use crate::parser::HclParser;
use crate::types::{ParsedModule, VariableTable};
use std::path::Path;

/// Build the variable table from a decoded file.
///
/// A file without `variable` blocks yields an empty table.
#[must_use]
pub fn build_variable_table(module: &ParsedModule) -> VariableTable {
    module.variables.iter().cloned().collect()
}

/// Decode a variable-definitions file and build its table.
///
/// # Errors
///
/// Returns an error if the file can't be read or isn't valid HCL.
pub async fn load_variable_table(parser: &HclParser, path: &Path) -> Result<VariableTable> {
    let module = parser.parse_file(path).await?;
    let table = build_variable_table(&module);
    tracing::info!(path = %path.display(), variables = table.len(), "Variable table built");
    Ok(table)
}
