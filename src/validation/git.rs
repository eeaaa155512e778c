//! Git repository source validation.

use url::Url;

use super::{Violation, ViolationKind};
use crate::crd::{REPOSITORY_AUTH_BASIC, REPOSITORY_AUTH_SSH_KEY, RepositoryAuth, Source};

/// baseDir and reference are required for git-sourced functions.
pub(crate) fn validate_repository(source: &Source) -> Vec<Violation> {
    let Some(repository) = source.git_repository.as_ref() else {
        return Vec::new();
    };

    let required = [
        ("spec.source.gitRepository.baseDir", &repository.base_dir),
        ("spec.source.gitRepository.reference", &repository.reference),
    ];
    let mut violations = Vec::new();
    for (field, value) in required {
        if value.trim().is_empty() {
            violations.push(Violation::new(
                ViolationKind::Structural,
                field,
                format!("{field} is required"),
            ));
        }
    }
    violations
}

/// The auth type must be one of the supported methods.
pub(crate) fn validate_auth_type(source: &Source) -> Vec<Violation> {
    let Some(auth) = repository_auth(source) else {
        return Vec::new();
    };
    match auth.auth_type.as_str() {
        REPOSITORY_AUTH_BASIC | REPOSITORY_AUTH_SSH_KEY => Vec::new(),
        _ => vec![Violation::new(
            ViolationKind::Format,
            "spec.source.gitRepository.auth.type",
            "invalid git repository authentication type",
        )],
    }
}

/// A secret name must accompany the auth block.
pub(crate) fn validate_auth_secret_name(source: &Source) -> Vec<Violation> {
    let Some(auth) = repository_auth(source) else {
        return Vec::new();
    };
    if auth.secret_name.trim().is_empty() {
        return vec![Violation::new(
            ViolationKind::Structural,
            "spec.source.gitRepository.auth.secretName",
            "spec.source.gitRepository.auth.secretName is required",
        )];
    }
    Vec::new()
}

/// Authenticated repositories must use an SSH-style remote or an absolute
/// URL.
pub(crate) fn validate_repository_url(source: &Source) -> Vec<Violation> {
    let Some(repository) = source.git_repository.as_ref() else {
        return Vec::new();
    };
    if is_ssh_url(&repository.url) {
        return Vec::new();
    }
    match Url::parse(&repository.url) {
        Ok(_) => Vec::new(),
        Err(err) => vec![Violation::new(
            ViolationKind::Format,
            "spec.source.gitRepository.url",
            format!("invalid source.gitRepository.URL value: {err}"),
        )],
    }
}

fn repository_auth(source: &Source) -> Option<&RepositoryAuth> {
    source
        .git_repository
        .as_ref()
        .and_then(|repository| repository.auth.as_ref())
}

/// Check for an SSH-style remote (git@host:path.git, git:// and ssh://
/// forms). The pattern is permissive and un-anchored.
fn is_ssh_url(url: &str) -> bool {
    use std::sync::LazyLock;
    // Pattern: ((git|ssh?)|(git@[\w\.]+))(:(//)?)([\w\.@\:/\-~]+)(\.git)(/)?
    static SSH_URL_RE: LazyLock<Option<regex::Regex>> = LazyLock::new(|| {
        regex::Regex::new(r"((git|ssh?)|(git@[\w\.]+))(:(//)?)([\w\.@\:/\-~]+)(\.git)(/)?").ok()
    });
    SSH_URL_RE.as_ref().is_some_and(|re| re.is_match(url))
}
