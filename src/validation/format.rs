//! Kubernetes name and label format rules.
//!
//! The checks mirror the apimachinery validation rules the control plane
//! applies to metadata: DNS-1035/DNS-1123 names, qualified label keys, label
//! values, and environment variable names. Each check returns every rule the
//! value breaks, as human-readable details without a field path; callers
//! attach the path.

/// Maximum length of a DNS label (names, label keys without prefix, values).
pub const MAX_LABEL_LENGTH: usize = 63;

/// Maximum length of a DNS-1123 subdomain (label key prefixes).
pub const MAX_SUBDOMAIN_LENGTH: usize = 253;

/// Check a resource name against the DNS-1035 label rules.
pub fn is_dns1035_label(value: &str) -> Vec<String> {
    use std::sync::LazyLock;
    // Pattern: ^[a-z]([-a-z0-9]*[a-z0-9])?$
    static NAME_RE: LazyLock<Option<regex::Regex>> =
        LazyLock::new(|| regex::Regex::new(r"^[a-z]([-a-z0-9]*[a-z0-9])?$").ok());

    let mut details = Vec::new();
    if value.len() > MAX_LABEL_LENGTH {
        details.push(format!(
            "must be no more than {MAX_LABEL_LENGTH} characters"
        ));
    }
    if !NAME_RE.as_ref().is_some_and(|re| re.is_match(value)) {
        details.push(
            "a DNS-1035 label must consist of lower case alphanumeric characters or '-', \
             start with an alphabetic character, and end with an alphanumeric character"
                .to_string(),
        );
    }
    details
}

/// Check a namespace against the DNS-1123 label rules.
pub fn is_dns1123_label(value: &str) -> Vec<String> {
    use std::sync::LazyLock;
    // Pattern: ^[a-z0-9]([-a-z0-9]*[a-z0-9])?$
    static LABEL_RE: LazyLock<Option<regex::Regex>> =
        LazyLock::new(|| regex::Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").ok());

    let mut details = Vec::new();
    if value.len() > MAX_LABEL_LENGTH {
        details.push(format!(
            "must be no more than {MAX_LABEL_LENGTH} characters"
        ));
    }
    if !LABEL_RE.as_ref().is_some_and(|re| re.is_match(value)) {
        details.push(
            "a DNS-1123 label must consist of lower case alphanumeric characters or '-', \
             and must start and end with an alphanumeric character"
                .to_string(),
        );
    }
    details
}

/// Check a label key prefix against the DNS-1123 subdomain rules.
pub fn is_dns1123_subdomain(value: &str) -> Vec<String> {
    use std::sync::LazyLock;
    // Pattern: ^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$
    static SUBDOMAIN_RE: LazyLock<Option<regex::Regex>> = LazyLock::new(|| {
        regex::Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
            .ok()
    });

    let mut details = Vec::new();
    if value.len() > MAX_SUBDOMAIN_LENGTH {
        details.push(format!(
            "must be no more than {MAX_SUBDOMAIN_LENGTH} characters"
        ));
    }
    if !SUBDOMAIN_RE.as_ref().is_some_and(|re| re.is_match(value)) {
        details.push(
            "a DNS-1123 subdomain must consist of lower case alphanumeric characters, \
             '-' or '.', and must start and end with an alphanumeric character"
                .to_string(),
        );
    }
    details
}

/// Check a label key: a name part optionally prefixed by a DNS-1123
/// subdomain and `/`.
pub fn is_qualified_name(value: &str) -> Vec<String> {
    let mut details = Vec::new();
    let parts: Vec<&str> = value.split('/').collect();
    let name = match parts.as_slice() {
        [name] => *name,
        [prefix, name] => {
            if prefix.is_empty() {
                details.push("prefix part must be non-empty".to_string());
            } else {
                details.extend(
                    is_dns1123_subdomain(prefix)
                        .into_iter()
                        .map(|detail| format!("prefix part {detail}")),
                );
            }
            *name
        }
        _ => {
            details.push(
                "a qualified name must consist of a name part, optionally prefixed by \
                 a DNS-1123 subdomain and '/'"
                    .to_string(),
            );
            return details;
        }
    };

    if name.len() > MAX_LABEL_LENGTH {
        details.push(format!(
            "name part must be no more than {MAX_LABEL_LENGTH} characters"
        ));
    }
    if !qualified_name_part_matches(name) {
        details.push(
            "name part must consist of alphanumeric characters, '-', '_' or '.', \
             and must start and end with an alphanumeric character"
                .to_string(),
        );
    }
    details
}

/// Check a label value. Empty values are allowed.
pub fn is_valid_label_value(value: &str) -> Vec<String> {
    let mut details = Vec::new();
    if value.len() > MAX_LABEL_LENGTH {
        details.push(format!(
            "must be no more than {MAX_LABEL_LENGTH} characters"
        ));
    }
    if !value.is_empty() && !qualified_name_part_matches(value) {
        details.push(
            "a valid label value must be an empty string or consist of alphanumeric \
             characters, '-', '_' or '.', and must start and end with an alphanumeric \
             character"
                .to_string(),
        );
    }
    details
}

/// Check an environment variable name.
pub fn is_env_var_name(value: &str) -> Vec<String> {
    use std::sync::LazyLock;
    // Pattern: ^[-._a-zA-Z][-._a-zA-Z0-9]*$
    static ENV_NAME_RE: LazyLock<Option<regex::Regex>> =
        LazyLock::new(|| regex::Regex::new(r"^[-._a-zA-Z][-._a-zA-Z0-9]*$").ok());

    if ENV_NAME_RE.as_ref().is_some_and(|re| re.is_match(value)) {
        return Vec::new();
    }
    vec![
        "a valid environment variable name must consist of alphabetic characters, \
         digits, '_', '-', or '.', and must not start with a digit"
            .to_string(),
    ]
}

fn qualified_name_part_matches(value: &str) -> bool {
    use std::sync::LazyLock;
    // Pattern: ^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$
    static NAME_PART_RE: LazyLock<Option<regex::Regex>> =
        LazyLock::new(|| regex::Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$").ok());
    NAME_PART_RE.as_ref().is_some_and(|re| re.is_match(value))
}
