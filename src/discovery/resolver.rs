//! Variable reference resolution.
//!
//! Only a single-level interpolation of the exact form `${var.<name>}` is a
//! reference. Anything else (multi-segment paths, concatenations, function
//! calls, malformed bodies such as `${}` or `${var}`) is an opaque literal
//! and comes back unchanged.

use crate::types::{ResolvedReference, VariableTable};

const INTERPOLATION_START: &str = "${";
const INTERPOLATION_END: &str = "}";
const VARIABLE_ROOT: &str = "var";

/// Extract `<name>` from a `${var.<name>}` string.
#[must_use]
pub fn variable_reference(value: &str) -> Option<&str> {
    let body = value
        .strip_prefix(INTERPOLATION_START)?
        .strip_suffix(INTERPOLATION_END)?
        .trim();

    let mut segments = body.split('.');
    let root = segments.next()?;
    let name = segments.next()?;

    let is_identifier = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-');

    (root == VARIABLE_ROOT && is_identifier && segments.next().is_none()).then_some(name)
}

/// Resolve a value against the variable table.
///
/// Returns the matching declaration's default, or `value` unchanged when it
/// is a literal, the variable is undeclared, or the declaration has no
/// default.
#[must_use]
pub fn resolve_reference(value: &str, variables: &VariableTable) -> String {
    resolve_reference_with_origin(value, variables).value
}

/// Resolve a value and report which variable it was referenced through.
///
/// For references, `variable_name` is the declared name of the matching
/// entry, or the referenced name when no declaration matches. Literals
/// have no `variable_name`.
#[must_use]
pub fn resolve_reference_with_origin(value: &str, variables: &VariableTable) -> ResolvedReference {
    let Some(name) = variable_reference(value) else {
        return ResolvedReference::literal(value);
    };

    match variables.lookup(name) {
        Some(declaration) => ResolvedReference {
            value: declaration
                .default
                .clone()
                .unwrap_or_else(|| value.to_string()),
            variable_name: Some(declaration.name.clone()),
        },
        None => {
            tracing::debug!(variable = %name, "Reference to undeclared variable left unresolved");
            ResolvedReference {
                value: value.to_string(),
                variable_name: Some(name.to_string()),
            }
        }
    }
}
