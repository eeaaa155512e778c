//! Admission validation for Function resources.
//!
//! The pipeline is assembled from a fixed catalog of field validators: a
//! base set that always runs, plus a variant-specific set selected from the
//! populated source block. Every selected validator runs; validation never
//! stops at the first failure, and the per-field findings are folded into
//! one [`ValidationError`] so a single admission response reports every
//! problem at once.

pub mod config;
pub mod dependencies;
mod env;
pub mod format;
mod git;
mod labels;
mod meta;
mod replicas;
mod resources;
mod sources;

use tracing::debug;

pub use config::{
    MinBuildJobValues, MinFunctionValues, MinReplicas, MinResources, ValidationConfig,
};

use crate::crd::{Function, Source};

/// Message reported when no source block is recognized.
pub const UNKNOWN_SOURCE_TYPE_MESSAGE: &str = "unknown function source type";

/// Classification of a single admission violation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ViolationKind {
    /// A required sub-object or value is absent.
    Structural,
    /// A numeric bound was not met.
    Threshold,
    /// A present value is malformed.
    Format,
    /// The wrong number of mutually exclusive blocks is populated.
    Cardinality,
}

/// One admission violation, tied to the spec field that caused it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Violation {
    /// Dotted path of the offending field, e.g. `spec.scaleConfig.minReplicas`.
    pub field: String,
    /// Violation class, for callers that branch on the failure type.
    pub kind: ViolationKind,
    /// Human-readable description carried into the admission response.
    pub message: String,
}

impl Violation {
    pub(crate) fn new(
        kind: ViolationKind,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Aggregate admission error: every violation found in one validation pass,
/// in validator execution order.
///
/// `Display` joins the individual messages with `"; "` so the whole report
/// fits in one admission response status message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidationError {
    /// The individual violations. Non-empty: an empty pass returns `Ok(())`.
    pub violations: Vec<Violation>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for violation in &self.violations {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(&violation.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Which source block a Function populates.
///
/// Inline wins when both blocks are set; the source-count validator reports
/// that conflict separately. Neither block set selects
/// [`SourceVariant::Unknown`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SourceVariant {
    /// Code supplied inline in the resource.
    Inline,
    /// Code fetched from a git repository.
    Git {
        /// Whether an auth block accompanies the repository.
        auth: bool,
    },
    /// No recognizable source block.
    Unknown,
}

impl SourceVariant {
    /// Classify the populated source block.
    pub fn of(source: &Source) -> Self {
        match (&source.inline, &source.git_repository) {
            (Some(_), _) => SourceVariant::Inline,
            (None, Some(repository)) => SourceVariant::Git {
                auth: repository.auth.is_some(),
            },
            (None, None) => SourceVariant::Unknown,
        }
    }
}

/// The fixed catalog of field validators.
///
/// The pipeline is data, not behavior: the runner concatenates
/// [`BASE_VALIDATIONS`] with the slice selected for the source variant and
/// executes the result in declared order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Validator {
    ObjectMeta,
    Env,
    Labels,
    Replicas,
    FunctionResources,
    BuildResources,
    SourceCount,
    InlineSource,
    InlineDependencies,
    GitRepository,
    GitAuthType,
    GitAuthSecretName,
    GitRepositoryUrl,
    UnknownSourceType,
}

/// Validators that run for every Function regardless of source variant.
const BASE_VALIDATIONS: &[Validator] = &[
    Validator::ObjectMeta,
    Validator::Env,
    Validator::Labels,
    Validator::Replicas,
    Validator::FunctionResources,
    Validator::BuildResources,
    Validator::SourceCount,
];

const INLINE_VALIDATIONS: &[Validator] =
    &[Validator::InlineSource, Validator::InlineDependencies];

const GIT_VALIDATIONS: &[Validator] = &[Validator::GitRepository];

const GIT_AUTH_VALIDATIONS: &[Validator] = &[
    Validator::GitRepository,
    Validator::GitAuthType,
    Validator::GitAuthSecretName,
    Validator::GitRepositoryUrl,
];

const UNKNOWN_SOURCE_VALIDATIONS: &[Validator] = &[Validator::UnknownSourceType];

fn variant_validations(variant: SourceVariant) -> &'static [Validator] {
    match variant {
        SourceVariant::Inline => INLINE_VALIDATIONS,
        SourceVariant::Git { auth: false } => GIT_VALIDATIONS,
        SourceVariant::Git { auth: true } => GIT_AUTH_VALIDATIONS,
        SourceVariant::Unknown => UNKNOWN_SOURCE_VALIDATIONS,
    }
}

impl Validator {
    fn run(self, function: &Function, config: &ValidationConfig) -> Vec<Violation> {
        let spec = &function.spec;
        match self {
            Validator::ObjectMeta => meta::validate(&function.metadata),
            Validator::Env => env::validate(&spec.env, config),
            Validator::Labels => labels::validate(&spec.labels),
            Validator::Replicas => replicas::validate(spec.scale_config.as_ref(), config),
            Validator::FunctionResources => resources::validate_function_resources(spec, config),
            Validator::BuildResources => resources::validate_build_resources(spec, config),
            Validator::SourceCount => sources::validate_source_count(&spec.source),
            Validator::InlineSource => sources::validate_inline_source(&spec.source),
            Validator::InlineDependencies => sources::validate_inline_dependencies(spec),
            Validator::GitRepository => git::validate_repository(&spec.source),
            Validator::GitAuthType => git::validate_auth_type(&spec.source),
            Validator::GitAuthSecretName => git::validate_auth_secret_name(&spec.source),
            Validator::GitRepositoryUrl => git::validate_repository_url(&spec.source),
            Validator::UnknownSourceType => vec![Violation::new(
                ViolationKind::Cardinality,
                "spec.source",
                UNKNOWN_SOURCE_TYPE_MESSAGE,
            )],
        }
    }
}

/// Validate a Function against the configured thresholds.
///
/// Runs the base validators plus the set selected by the populated source
/// block, strictly in declared order, and collects every violation. Returns
/// `Ok(())` only when no validator reports anything.
pub fn validate(function: &Function, config: &ValidationConfig) -> Result<(), ValidationError> {
    let variant = SourceVariant::of(&function.spec.source);

    let mut violations = Vec::new();
    for validator in BASE_VALIDATIONS.iter().chain(variant_validations(variant)) {
        violations.extend(validator.run(function, config));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        debug!(
            violations = violations.len(),
            variant = ?variant,
            "Function spec failed admission validation"
        );
        Err(ValidationError { violations })
    }
}

impl Function {
    /// Validate this Function against the configured thresholds. See
    /// [`validate`].
    pub fn validate(&self, config: &ValidationConfig) -> Result<(), ValidationError> {
        validate(self, config)
    }
}
