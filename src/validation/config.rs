//! Operator-configured validation thresholds.
//!
//! The configuration arrives already materialized (loading it from flags or
//! the environment belongs to the webhook binary); this module defines the
//! typed snapshot and its defaults. A snapshot is read-only and safe to
//! share across concurrent validation passes.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::quantity::{Quantity, Suffix};

/// Thresholds consulted by one validation pass.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationConfig {
    /// Environment variable names reserved for the platform.
    #[serde(default)]
    pub reserved_envs: BTreeSet<String>,

    /// Minimums for the function runtime.
    #[serde(default)]
    pub function: MinFunctionValues,

    /// Minimums for the image build job.
    #[serde(default)]
    pub build_job: MinBuildJobValues,
}

/// Minimums applied to the function runtime.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MinFunctionValues {
    /// Replica floor (default: 1).
    #[serde(default)]
    pub replicas: MinReplicas,

    /// Resource floor for runtime pods (default: 10m CPU, 16Mi memory).
    #[serde(default = "default_function_resources")]
    pub resources: MinResources,
}

impl Default for MinFunctionValues {
    fn default() -> Self {
        Self {
            replicas: MinReplicas::default(),
            resources: default_function_resources(),
        }
    }
}

fn default_function_resources() -> MinResources {
    MinResources {
        min_request_cpu: Quantity::new(10, Suffix::Milli),
        min_request_memory: Quantity::new(16, Suffix::Mi),
    }
}

/// Minimums applied to the image build job.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MinBuildJobValues {
    /// Resource floor for build pods (default: 200m CPU, 200Mi memory).
    #[serde(default = "default_build_job_resources")]
    pub resources: MinResources,
}

impl Default for MinBuildJobValues {
    fn default() -> Self {
        Self {
            resources: default_build_job_resources(),
        }
    }
}

fn default_build_job_resources() -> MinResources {
    MinResources {
        min_request_cpu: Quantity::new(200, Suffix::Milli),
        min_request_memory: Quantity::new(200, Suffix::Mi),
    }
}

/// Replica floor.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MinReplicas {
    /// Smallest value either replica bound may take (default: 1).
    #[serde(default = "default_min_replica_value")]
    pub min_value: i32,
}

impl Default for MinReplicas {
    fn default() -> Self {
        Self {
            min_value: default_min_replica_value(),
        }
    }
}

fn default_min_replica_value() -> i32 {
    1
}

/// CPU and memory floor for one workload kind.
///
/// The values are typed quantities built by constructors (or decoded, and
/// therefore already well-formed), so comparing against them can never fail
/// at request time.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MinResources {
    /// Floor for CPU requests and limits.
    pub min_request_cpu: Quantity,

    /// Floor for memory requests and limits.
    pub min_request_memory: Quantity,
}
