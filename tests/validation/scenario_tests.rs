//! Scenario tests for Function admission validation.
//!
//! Each test drives a complete Function resource through the public
//! validation entry point and asserts on the aggregated report, the way the
//! admission webhook consumes it.

use function_operator::{ValidationConfig, ViolationKind, validate};

use crate::fixtures::{FunctionBuilder, valid_git_function, valid_inline_function};

// ============================================================================
// Valid Function Specs
// ============================================================================

/// Test that a fully populated inline function is admitted.
#[test]
fn test_valid_inline_function_is_admitted() {
    let function = valid_inline_function();
    assert!(validate(&function, &ValidationConfig::default()).is_ok());
}

/// Test that git-sourced functions are admitted with and without auth.
#[test]
fn test_valid_git_function_is_admitted() {
    let function = valid_git_function();
    assert!(validate(&function, &ValidationConfig::default()).is_ok());

    let no_auth = FunctionBuilder::new("orders-fn")
        .without_inline()
        .git_source("https://github.com/example/functions.git", "orders", "main")
        .build();
    assert!(validate(&no_auth, &ValidationConfig::default()).is_ok());
}

// ============================================================================
// Replica Bound Tests
// ============================================================================

/// Test that a minReplicas below the configured floor cites the floor.
#[test]
fn test_replica_floor_violation_message() {
    let function = FunctionBuilder::new("orders-fn")
        .min_replicas(0)
        .max_replicas(1)
        .build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();

    assert_eq!(err.violations.len(), 1);
    assert_eq!(
        err.violations[0].message,
        "spec.scaleConfig.minReplicas(0) is less than the smallest allowed value(1)"
    );
    assert_eq!(err.violations[0].kind, ViolationKind::Threshold);
}

/// Test that inverted bounds cite both configured values.
#[test]
fn test_min_greater_than_max_cites_both_bounds() {
    let function = FunctionBuilder::new("orders-fn")
        .min_replicas(5)
        .max_replicas(2)
        .build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();

    assert_eq!(err.violations.len(), 1);
    assert_eq!(
        err.violations[0].message,
        "spec.scaleConfig.maxReplicas(2) is less than spec.scaleConfig.minReplicas(5)"
    );
}

/// Test that an absent scaleConfig is one structural violation and the
/// bound checks stay quiet.
#[test]
fn test_missing_scale_config_is_structural() {
    let function = FunctionBuilder::new("orders-fn").without_scale_config().build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();

    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].kind, ViolationKind::Structural);
    assert_eq!(err.violations[0].message, "spec.scaleConfig is required");
}

// ============================================================================
// Source Cardinality and Inline Source Tests
// ============================================================================

/// Test that an empty inline payload is rejected.
#[test]
fn test_empty_inline_source_is_rejected() {
    let function = FunctionBuilder::new("orders-fn").inline_source("").build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();

    assert!(err.to_string().contains("empty source.inline.source value"));
}

/// Test that populating both source blocks is a cardinality error.
#[test]
fn test_both_source_blocks_is_a_cardinality_error() {
    // The builder keeps the default inline block when a git block is added.
    let function = FunctionBuilder::new("orders-fn")
        .git_source("https://github.com/example/functions.git", "orders", "main")
        .build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();

    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].kind, ViolationKind::Cardinality);
    assert_eq!(
        err.violations[0].message,
        "spec.source should contain only 1 configuration of function"
    );
}

/// Test that a missing source reports the unknown-source message after the
/// cardinality failure.
#[test]
fn test_missing_source_reports_unknown_type() {
    let function = FunctionBuilder::new("orders-fn").without_source().build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();

    let messages: Vec<&str> = err
        .violations
        .iter()
        .map(|violation| violation.message.as_str())
        .collect();
    assert_eq!(
        messages,
        vec![
            "spec.source should contain only 1 configuration of function",
            "unknown function source type",
        ]
    );
}

/// Test that Node.js dependencies must be shaped like a JSON object.
#[test]
fn test_invalid_node_dependencies() {
    let function = FunctionBuilder::new("orders-fn")
        .dependencies("lodash")
        .build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();

    assert_eq!(err.violations.len(), 1);
    assert_eq!(
        err.violations[0].message,
        "invalid source.inline.dependencies value: deps should start with '{' and end with '}'"
    );
}

/// Test that Python requirements carry no shape check.
#[test]
fn test_python_requirements_are_unchecked() {
    let function = FunctionBuilder::new("orders-fn")
        .runtime("python312")
        .inline_source("def main(event, context):\n    return {}")
        .dependencies("requests==2.32.0")
        .build();
    assert!(validate(&function, &ValidationConfig::default()).is_ok());
}

// ============================================================================
// Git Repository Tests
// ============================================================================

/// Test that an SSH-style remote passes the URL check.
#[test]
fn test_ssh_style_remote_passes_the_url_check() {
    let function = FunctionBuilder::new("orders-fn")
        .without_inline()
        .git_source("git@github.com:example/functions.git", "orders", "main")
        .git_auth("ssh-key", "git-creds")
        .build();
    assert!(validate(&function, &ValidationConfig::default()).is_ok());
}

/// Test that an unparseable URL on an authenticated repository is rejected.
#[test]
fn test_unparseable_url_with_auth_is_rejected() {
    let function = FunctionBuilder::new("orders-fn")
        .without_inline()
        .git_source("not a url", "orders", "main")
        .git_auth("basic", "git-creds")
        .build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();

    assert_eq!(err.violations.len(), 1);
    assert!(
        err.violations[0]
            .message
            .starts_with("invalid source.gitRepository.URL value: ")
    );
}

/// Test that unauthenticated repositories skip the URL check.
#[test]
fn test_url_is_not_checked_without_auth() {
    let function = FunctionBuilder::new("orders-fn")
        .without_inline()
        .git_source("not a url", "orders", "main")
        .build();
    assert!(validate(&function, &ValidationConfig::default()).is_ok());
}

/// Test that auth types outside the supported set are rejected.
#[test]
fn test_unsupported_auth_type_is_rejected() {
    let function = FunctionBuilder::new("orders-fn")
        .without_inline()
        .git_source("https://github.com/example/functions.git", "orders", "main")
        .git_auth("token", "git-creds")
        .build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();

    assert_eq!(err.violations.len(), 1);
    assert_eq!(
        err.violations[0].message,
        "invalid git repository authentication type"
    );
}

/// Test that blank baseDir and reference are both reported.
#[test]
fn test_missing_base_dir_and_reference_are_both_reported() {
    let function = FunctionBuilder::new("orders-fn")
        .without_inline()
        .git_source("https://github.com/example/functions.git", " ", "")
        .build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();

    assert_eq!(err.violations.len(), 2);
    assert_eq!(
        err.violations[0].message,
        "spec.source.gitRepository.baseDir is required"
    );
    assert_eq!(
        err.violations[1].message,
        "spec.source.gitRepository.reference is required"
    );
}

// ============================================================================
// Resource Threshold Tests
// ============================================================================

/// Test that a cpu request below the floor cites the exact minimum.
#[test]
fn test_requests_cpu_below_minimum_cites_the_floor() {
    let function = FunctionBuilder::new("orders-fn")
        .function_requests("5m", "16Mi")
        .build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();

    assert_eq!(err.violations.len(), 1);
    assert_eq!(
        err.violations[0].field,
        "spec.resourceConfiguration.function.resources.requests.cpu"
    );
    assert_eq!(
        err.violations[0].message,
        "spec.resourceConfiguration.function.resources.requests.cpu(5m) \
         should be higher than minimal value(10m)"
    );
}

/// Test that requests above limits are reported against the limits path.
#[test]
fn test_requests_above_limits_use_the_limits_path() {
    let function = FunctionBuilder::new("orders-fn")
        .function_requests("400m", "256Mi")
        .function_limits("200m", "512Mi")
        .build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();

    assert_eq!(err.violations.len(), 1);
    assert_eq!(
        err.violations[0].message,
        "spec.resourceConfiguration.function.resources.limits.cpu(200m) should be higher \
         than spec.resourceConfiguration.function.resources.requests.cpu(400m)"
    );
}

/// Test that the build job is validated against the build-job minimums.
#[test]
fn test_build_resources_use_build_minimums() {
    let function = FunctionBuilder::new("orders-fn")
        .build_requests("100m", "100Mi")
        .build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();

    assert_eq!(err.violations.len(), 2);
    assert!(err.violations[0].message.contains("minimal value(200m)"));
    assert!(err.violations[1].message.contains("minimal value(200Mi)"));
    assert!(
        err.violations
            .iter()
            .all(|violation| violation.field.starts_with("spec.resourceConfiguration.build"))
    );
}

// ============================================================================
// Metadata, Environment, and Label Tests
// ============================================================================

/// Test that resource names follow the DNS-1035 rules.
#[test]
fn test_metadata_name_rules_apply() {
    let function = FunctionBuilder::new("Orders-Fn").build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();

    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].field, "metadata.name");
    assert_eq!(err.violations[0].kind, ViolationKind::Format);
    assert!(err.violations[0].message.contains("DNS-1035"));
}

/// Test that a generateName prefix ending in dashes is admitted.
#[test]
fn test_generate_name_trailing_dashes_are_admitted() {
    let function = FunctionBuilder::new("orders")
        .generate_name("orders--")
        .build();
    assert!(validate(&function, &ValidationConfig::default()).is_ok());
}

/// Test that namespaces follow the DNS-1123 rules.
#[test]
fn test_namespace_rules_apply() {
    let function = FunctionBuilder::new("orders-fn").namespace("Team_A").build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();

    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].field, "metadata.namespace");
    assert!(err.violations[0].message.contains("DNS-1123"));
}

/// Test that runtime pod labels are checked.
#[test]
fn test_label_rules_apply() {
    let function = FunctionBuilder::new("orders-fn")
        .label("bad key", "ok")
        .build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();

    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].field, "spec.labels");
}

// ============================================================================
// Aggregation and Configuration Tests
// ============================================================================

/// Test that one pass reports every violation, in validator order.
#[test]
fn test_every_violation_is_reported_in_one_pass() {
    let function = FunctionBuilder::new("orders-fn")
        .env("9BAD", "x")
        .min_replicas(0)
        .max_replicas(1)
        .function_requests("5m", "16Mi")
        .build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();
    let report = err.to_string();

    let env_at = report
        .find("invalid spec.env keys/values: \"9BAD\"")
        .expect("env violation missing");
    let replicas_at = report
        .find("less than the smallest allowed value(1)")
        .expect("replica violation missing");
    let resources_at = report
        .find("requests.cpu(5m) should be higher than minimal value(10m)")
        .expect("resource violation missing");

    // Declared validator order: env before replicas before resources.
    assert!(env_at < replicas_at);
    assert!(replicas_at < resources_at);
    assert_eq!(err.violations.len(), 3);
}

/// Test that violation kinds are visible to programmatic callers.
#[test]
fn test_violation_kinds_are_programmatically_visible() {
    let function = FunctionBuilder::new("orders-fn")
        .without_scale_config()
        .without_source()
        .build();
    let err = validate(&function, &ValidationConfig::default()).unwrap_err();

    let kinds: Vec<ViolationKind> = err
        .violations
        .iter()
        .map(|violation| violation.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            ViolationKind::Structural,
            ViolationKind::Cardinality,
            ViolationKind::Cardinality,
        ]
    );
}

/// Test that the reserved environment variable set comes from the config.
#[test]
fn test_reserved_env_names_come_from_config() {
    let mut config = ValidationConfig::default();
    config.reserved_envs.insert("FUNC_RUNTIME".to_string());

    let function = FunctionBuilder::new("orders-fn")
        .env("FUNC_RUNTIME", "nodejs22")
        .build();
    let err = validate(&function, &config).unwrap_err();

    assert_eq!(err.violations.len(), 1);
    assert!(err.violations[0].message.contains("\"FUNC_RUNTIME\""));
    assert!(err.violations[0].message.contains("reserved"));

    // The same spec is fine under the default (empty) reserved set.
    let function = FunctionBuilder::new("orders-fn")
        .env("FUNC_RUNTIME", "nodejs22")
        .build();
    assert!(validate(&function, &ValidationConfig::default()).is_ok());
}

/// Test that a configured replica floor overrides the default.
#[test]
fn test_custom_replica_floor_applies() {
    let mut config = ValidationConfig::default();
    config.function.replicas.min_value = 2;

    let function = FunctionBuilder::new("orders-fn")
        .min_replicas(1)
        .max_replicas(4)
        .build();
    let err = validate(&function, &config).unwrap_err();

    assert_eq!(
        err.violations[0].message,
        "spec.scaleConfig.minReplicas(1) is less than the smallest allowed value(2)"
    );
}
