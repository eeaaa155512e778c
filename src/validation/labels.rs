//! Label validation.

use std::collections::BTreeMap;

use super::format;
use super::{Violation, ViolationKind};

/// Validate the labels applied to the function runtime pods.
pub(crate) fn validate(labels: &BTreeMap<String, String>) -> Vec<Violation> {
    validate_label_map(labels, "spec.labels")
}

/// Validate a label map under the given field path. Keys must be qualified
/// names, values must be valid label values; every broken rule is reported.
pub(crate) fn validate_label_map(
    labels: &BTreeMap<String, String>,
    path: &str,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (key, value) in labels {
        for detail in format::is_qualified_name(key) {
            violations.push(Violation::new(
                ViolationKind::Format,
                path,
                format!("{path}: key {key:?}: {detail}"),
            ));
        }
        for detail in format::is_valid_label_value(value) {
            violations.push(Violation::new(
                ViolationKind::Format,
                path,
                format!("{path}: value {value:?} for key {key:?}: {detail}"),
            ));
        }
    }
    violations
}
