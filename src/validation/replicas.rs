//! Replica bound validation.

use super::config::ValidationConfig;
use super::{Violation, ViolationKind};
use crate::crd::ScaleConfig;

/// Validate replica bounds against the configured floor.
///
/// An absent scale configuration is itself the violation and suppresses the
/// bound checks; otherwise every failing bound is reported.
pub(crate) fn validate(
    scale_config: Option<&ScaleConfig>,
    config: &ValidationConfig,
) -> Vec<Violation> {
    let Some(scale) = scale_config else {
        return vec![Violation::new(
            ViolationKind::Structural,
            "spec.scaleConfig",
            "spec.scaleConfig is required",
        )];
    };

    let floor = config.function.replicas.min_value;
    let mut violations = Vec::new();

    if let (Some(min), Some(max)) = (scale.min_replicas, scale.max_replicas)
        && min > max
    {
        violations.push(Violation::new(
            ViolationKind::Threshold,
            "spec.scaleConfig.maxReplicas",
            format!(
                "spec.scaleConfig.maxReplicas({max}) is less than spec.scaleConfig.minReplicas({min})"
            ),
        ));
    }
    if let Some(min) = scale.min_replicas
        && min < floor
    {
        violations.push(Violation::new(
            ViolationKind::Threshold,
            "spec.scaleConfig.minReplicas",
            format!(
                "spec.scaleConfig.minReplicas({min}) is less than the smallest allowed value({floor})"
            ),
        ));
    }
    if let Some(max) = scale.max_replicas
        && max < floor
    {
        violations.push(Violation::new(
            ViolationKind::Threshold,
            "spec.scaleConfig.maxReplicas",
            format!(
                "spec.scaleConfig.maxReplicas({max}) is less than the smallest allowed value({floor})"
            ),
        ));
    }

    violations
}
