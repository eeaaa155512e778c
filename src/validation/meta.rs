//! Object metadata validation.
//!
//! Applies the platform metadata rules a Function must satisfy before the
//! spec itself is inspected: a DNS-1035 compatible name, a namespace, and
//! well-formed metadata labels.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use super::format;
use super::labels;
use super::{Violation, ViolationKind};

/// Validate object metadata.
pub(crate) fn validate(metadata: &ObjectMeta) -> Vec<Violation> {
    let mut violations = Vec::new();

    match metadata.name.as_deref() {
        Some(name) => {
            for detail in format::is_dns1035_label(name) {
                violations.push(Violation::new(
                    ViolationKind::Format,
                    "metadata.name",
                    format!("metadata.name {name:?}: {detail}"),
                ));
            }
        }
        None => match metadata.generate_name.as_deref() {
            Some(generate_name) => {
                // The control plane appends a random suffix, so a trailing
                // dash is masked with an alphanumeric before the label check.
                let masked = match generate_name.strip_suffix('-') {
                    Some(prefix) if !prefix.is_empty() => format!("{prefix}a"),
                    _ => generate_name.to_string(),
                };
                for detail in format::is_dns1035_label(&masked) {
                    violations.push(Violation::new(
                        ViolationKind::Format,
                        "metadata.generateName",
                        format!("metadata.generateName {generate_name:?}: {detail}"),
                    ));
                }
            }
            None => violations.push(Violation::new(
                ViolationKind::Structural,
                "metadata.name",
                "metadata.name or metadata.generateName is required",
            )),
        },
    }

    match metadata.namespace.as_deref() {
        Some(namespace) => {
            for detail in format::is_dns1123_label(namespace) {
                violations.push(Violation::new(
                    ViolationKind::Format,
                    "metadata.namespace",
                    format!("metadata.namespace {namespace:?}: {detail}"),
                ));
            }
        }
        None => violations.push(Violation::new(
            ViolationKind::Structural,
            "metadata.namespace",
            "metadata.namespace is required",
        )),
    }

    if let Some(meta_labels) = &metadata.labels {
        violations.extend(labels::validate_label_map(meta_labels, "metadata.labels"));
    }

    violations
}
