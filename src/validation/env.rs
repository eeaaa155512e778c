//! Environment variable validation.

use super::config::ValidationConfig;
use super::format;
use super::{Violation, ViolationKind};
use crate::crd::EnvVar;

/// Validate declared environment variables against the name grammar and the
/// configured reserved set. Every offending entry is reported.
pub(crate) fn validate(env: &[EnvVar], config: &ValidationConfig) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (index, entry) in env.iter().enumerate() {
        let field = format!("spec.env[{index}].name");
        for detail in format::is_env_var_name(&entry.name) {
            violations.push(Violation::new(
                ViolationKind::Format,
                field.clone(),
                format!("invalid spec.env keys/values: {:?}: {detail}", entry.name),
            ));
        }
        if config.reserved_envs.contains(&entry.name) {
            violations.push(Violation::new(
                ViolationKind::Format,
                field,
                format!(
                    "invalid spec.env keys/values: {:?} is a reserved environment variable name",
                    entry.name
                ),
            ));
        }
    }
    violations
}
