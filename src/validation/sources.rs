//! Source cardinality and inline-source validation.

use super::dependencies;
use super::{Violation, ViolationKind};
use crate::crd::{FunctionSpec, Source};

/// Exactly one source block must be populated.
pub(crate) fn validate_source_count(source: &Source) -> Vec<Violation> {
    let populated =
        usize::from(source.inline.is_some()) + usize::from(source.git_repository.is_some());
    if populated == 1 {
        return Vec::new();
    }
    vec![Violation::new(
        ViolationKind::Cardinality,
        "spec.source",
        "spec.source should contain only 1 configuration of function",
    )]
}

/// The inline payload must be non-empty.
pub(crate) fn validate_inline_source(source: &Source) -> Vec<Violation> {
    let Some(inline) = &source.inline else {
        return Vec::new();
    };
    if inline.source.is_empty() {
        return vec![Violation::new(
            ViolationKind::Structural,
            "spec.source.inline.source",
            "empty source.inline.source value",
        )];
    }
    Vec::new()
}

/// The dependency descriptor must satisfy the declared runtime's format.
pub(crate) fn validate_inline_dependencies(spec: &FunctionSpec) -> Vec<Violation> {
    let Some(inline) = &spec.source.inline else {
        return Vec::new();
    };
    let descriptor = inline.dependencies.as_deref().unwrap_or_default();
    match dependencies::validate_dependencies(&spec.runtime, descriptor) {
        Ok(()) => Vec::new(),
        Err(err) => vec![Violation::new(
            ViolationKind::Format,
            "spec.source.inline.dependencies",
            format!("invalid source.inline.dependencies value: {err}"),
        )],
    }
}
