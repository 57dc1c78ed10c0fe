//! Repository identity inference from registry metadata.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use relic_core::{RegistryMetadata, RepoIdentity};

static GITHUB_REPO_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://github\.com/([^/\s]+)/([A-Za-z0-9_.-]+)").expect("static regex compiles")
});

/// Infer `(owner, name)` for `package`.
///
/// A home page that starts with a GitHub repository URL wins. Otherwise the
/// description is scanned and the first repository URL whose name equals the
/// package name (case-sensitive) is taken; descriptions routinely link to
/// unrelated repositories.
#[must_use]
pub fn infer_identity(package: &str, metadata: &RegistryMetadata) -> Option<RepoIdentity> {
    if let Some(home_page) = metadata.home_page() {
        let home_page = home_page.trim();
        if let Some(caps) = GITHUB_REPO_URL.captures(home_page) {
            if caps.get(0).is_some_and(|m| m.start() == 0) {
                if let Some(repo) = identity_from(&caps) {
                    return Some(repo);
                }
            }
        }
    }

    GITHUB_REPO_URL
        .captures_iter(metadata.description()?)
        .filter_map(|caps| identity_from(&caps))
        .find(|repo| repo.name == package)
}

fn identity_from(caps: &Captures<'_>) -> Option<RepoIdentity> {
    // Prose links often end a sentence: `.../acme/foo.`
    let name = caps[2].trim_end_matches('.');
    let name = name
        .strip_suffix(".git")
        .filter(|stripped| !stripped.is_empty())
        .unwrap_or(name);
    (!name.is_empty()).then(|| RepoIdentity::new(&caps[1], name))
}
