//! Function Custom Resource Definition.
//!
//! Defines the Function CRD for running serverless workloads on Kubernetes.
//! The spec carries everything admission validation inspects: the source of
//! the function code, runtime environment, scaling bounds, and resource
//! profiles for the runtime and the image build job.

use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::quantity::Quantity;

/// Function is a custom resource describing a serverless workload.
///
/// Example:
/// ```yaml
/// apiVersion: serverless.fnops.dev/v1alpha1
/// kind: Function
/// metadata:
///   name: my-handler
///   namespace: default
/// spec:
///   runtime: nodejs22
///   scaleConfig:
///     minReplicas: 1
///     maxReplicas: 3
///   source:
///     inline:
///       source: |
///         module.exports = { main: async () => "OK" }
///       dependencies: '{"dependencies": {}}'
/// ```
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "serverless.fnops.dev",
    version = "v1alpha1",
    kind = "Function",
    plural = "functions",
    shortname = "fn",
    namespaced,
    // Print columns for kubectl get
    printcolumn = r#"{"name":"Runtime", "type":"string", "jsonPath":".spec.runtime"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSpec {
    /// Runtime the function code targets (e.g. nodejs22, python312).
    pub runtime: String,

    /// Where the function code comes from. Exactly one block must be
    /// populated; admission validation rejects anything else.
    #[serde(default)]
    pub source: Source,

    /// Environment variables injected into the function runtime.
    #[serde(default)]
    pub env: Vec<EnvVar>,

    /// Additional labels applied to the function runtime pods.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    /// Autoscaling bounds for the function runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_config: Option<ScaleConfig>,

    /// Resource profiles for the function runtime and the image build job.
    #[serde(default)]
    pub resource_configuration: ResourceConfiguration,
}

/// One environment variable for the function runtime.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    /// Variable name. Must satisfy the environment-variable-name grammar
    /// and must not collide with a name reserved by the platform.
    pub name: String,

    /// Plain-text value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Origin of the function code: inline text or a git repository.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Code and dependencies supplied directly in the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<InlineSource>,

    /// Code fetched from a git repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_repository: Option<GitRepositorySource>,
}

/// Function code supplied directly in the resource.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InlineSource {
    /// The function body.
    pub source: String,

    /// Dependency descriptor for the declared runtime (package.json for
    /// Node.js, requirements.txt for Python).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<String>,
}

/// Function code fetched from a git repository.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitRepositorySource {
    /// Repository URL: an SSH-style remote (git@host:path.git) or an
    /// absolute URL.
    pub url: String,

    /// Directory inside the repository holding the function code.
    #[serde(default)]
    pub base_dir: String,

    /// Branch, tag, or commit to check out.
    #[serde(default)]
    pub reference: String,

    /// Credentials for private repositories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<RepositoryAuth>,
}

/// Credentials reference for a private git repository.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryAuth {
    /// Authentication method: `basic` or `ssh-key`.
    #[serde(rename = "type")]
    pub auth_type: String,

    /// Name of the Secret holding the credentials.
    pub secret_name: String,
}

/// Replica bounds for the function runtime.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScaleConfig {
    /// Lower replica bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_replicas: Option<i32>,

    /// Upper replica bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_replicas: Option<i32>,
}

/// Resource profiles for the function runtime and the image build job.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceConfiguration {
    /// Profile applied to the function runtime pods.
    #[serde(default)]
    pub function: ResourceProfile,

    /// Profile applied to the image build job.
    #[serde(default)]
    pub build: ResourceProfile,
}

/// Resource profile for one workload kind.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceProfile {
    /// Explicit requests and limits. Absent means platform defaults apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}

/// CPU and memory requests/limits.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirements {
    /// Minimum resources reserved for the workload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<ResourceList>,

    /// Maximum resources the workload may use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<ResourceList>,
}

/// CPU and memory amounts. An absent entry counts as zero when the
/// surrounding block is validated.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceList {
    /// CPU amount, e.g. `100m`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<Quantity>,

    /// Memory amount, e.g. `128Mi`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<Quantity>,
}

/// Runtimes the platform ships function templates for.
pub const RUNTIME_NODEJS20: &str = "nodejs20";
/// Current Node.js runtime.
pub const RUNTIME_NODEJS22: &str = "nodejs22";
/// Current Python runtime.
pub const RUNTIME_PYTHON312: &str = "python312";

/// Git authentication over HTTPS with username and password.
pub const REPOSITORY_AUTH_BASIC: &str = "basic";
/// Git authentication with an SSH private key.
pub const REPOSITORY_AUTH_SSH_KEY: &str = "ssh-key";
