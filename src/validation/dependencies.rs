//! Dependency descriptor validation, keyed by runtime.
//!
//! Node.js functions declare dependencies as a package.json document, so a
//! non-blank descriptor must at least be shaped like a JSON object. Python
//! requirements files carry no shape the platform checks here, and unknown
//! runtimes are left alone (the runtime catalog is enforced elsewhere).

use thiserror::Error;

use crate::crd::{RUNTIME_NODEJS20, RUNTIME_NODEJS22};

/// Errors for malformed dependency descriptors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyError {
    /// A Node.js descriptor that is not shaped like a JSON object.
    #[error("deps should start with '{{' and end with '}}'")]
    NotAJsonObject,
}

/// Validate a dependency descriptor for the given runtime.
pub fn validate_dependencies(runtime: &str, dependencies: &str) -> Result<(), DependencyError> {
    match runtime {
        RUNTIME_NODEJS20 | RUNTIME_NODEJS22 => validate_node_dependencies(dependencies),
        _ => Ok(()),
    }
}

fn validate_node_dependencies(dependencies: &str) -> Result<(), DependencyError> {
    let trimmed = dependencies.trim();
    if !trimmed.is_empty() && (!trimmed.starts_with('{') || !trimmed.ends_with('}')) {
        return Err(DependencyError::NotAJsonObject);
    }
    Ok(())
}
