//! Resource requests/limits validation for the function runtime and the
//! image build job.
//!
//! Both workload kinds share one rule set parametrized by the configured
//! minimums and the field path prefix: requests and limits must each meet
//! the minimums, and requests must not exceed limits when both are present.
//! Inside a present block an absent cpu/memory entry compares as zero.

use super::config::{MinResources, ValidationConfig};
use super::{Violation, ViolationKind};
use crate::crd::{FunctionSpec, ResourceList, ResourceRequirements};
use crate::quantity::Quantity;

/// Validate the function runtime resources against the function minimums.
pub(crate) fn validate_function_resources(
    spec: &FunctionSpec,
    config: &ValidationConfig,
) -> Vec<Violation> {
    validate_resources(
        spec.resource_configuration.function.resources.as_ref(),
        &config.function.resources,
        "spec.resourceConfiguration.function.resources",
    )
}

/// Validate the image build job resources against the build-job minimums.
pub(crate) fn validate_build_resources(
    spec: &FunctionSpec,
    config: &ValidationConfig,
) -> Vec<Violation> {
    validate_resources(
        spec.resource_configuration.build.resources.as_ref(),
        &config.build_job.resources,
        "spec.resourceConfiguration.build.resources",
    )
}

fn validate_resources(
    resources: Option<&ResourceRequirements>,
    minimums: &MinResources,
    parent: &str,
) -> Vec<Violation> {
    let Some(resources) = resources else {
        return Vec::new();
    };

    let mut violations = Vec::new();
    if let Some(requests) = &resources.requests {
        violations.extend(validate_requests(
            requests,
            resources.limits.as_ref(),
            minimums,
            parent,
        ));
    }
    if let Some(limits) = &resources.limits {
        violations.extend(validate_limits(limits, minimums, parent));
    }
    violations
}

fn validate_requests(
    requests: &ResourceList,
    limits: Option<&ResourceList>,
    minimums: &MinResources,
    parent: &str,
) -> Vec<Violation> {
    let zero = Quantity::default();
    let cpu = requests.cpu.as_ref().unwrap_or(&zero);
    let memory = requests.memory.as_ref().unwrap_or(&zero);

    let mut violations = Vec::new();
    if cpu < &minimums.min_request_cpu {
        violations.push(below_minimum(parent, "requests", "cpu", cpu, minimums));
    }
    if memory < &minimums.min_request_memory {
        violations.push(below_minimum(parent, "requests", "memory", memory, minimums));
    }

    let Some(limits) = limits else {
        return violations;
    };
    let limit_cpu = limits.cpu.as_ref().unwrap_or(&zero);
    let limit_memory = limits.memory.as_ref().unwrap_or(&zero);

    if cpu > limit_cpu {
        violations.push(Violation::new(
            ViolationKind::Threshold,
            format!("{parent}.limits.cpu"),
            format!(
                "{parent}.limits.cpu({limit_cpu}) should be higher than {parent}.requests.cpu({cpu})"
            ),
        ));
    }
    if memory > limit_memory {
        violations.push(Violation::new(
            ViolationKind::Threshold,
            format!("{parent}.limits.memory"),
            format!(
                "{parent}.limits.memory({limit_memory}) should be higher than {parent}.requests.memory({memory})"
            ),
        ));
    }
    violations
}

fn validate_limits(
    limits: &ResourceList,
    minimums: &MinResources,
    parent: &str,
) -> Vec<Violation> {
    let zero = Quantity::default();
    let cpu = limits.cpu.as_ref().unwrap_or(&zero);
    let memory = limits.memory.as_ref().unwrap_or(&zero);

    let mut violations = Vec::new();
    if cpu < &minimums.min_request_cpu {
        violations.push(below_minimum(parent, "limits", "cpu", cpu, minimums));
    }
    if memory < &minimums.min_request_memory {
        violations.push(below_minimum(parent, "limits", "memory", memory, minimums));
    }
    violations
}

fn below_minimum(
    parent: &str,
    block: &str,
    resource: &str,
    observed: &Quantity,
    minimums: &MinResources,
) -> Violation {
    let minimum = match resource {
        "cpu" => &minimums.min_request_cpu,
        _ => &minimums.min_request_memory,
    };
    Violation::new(
        ViolationKind::Threshold,
        format!("{parent}.{block}.{resource}"),
        format!("{parent}.{block}.{resource}({observed}) should be higher than minimal value({minimum})"),
    )
}
