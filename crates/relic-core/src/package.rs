use serde::{Deserialize, Serialize};

/// One row of the registry's "top packages by downloads" listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageCandidate {
    pub name: String,
    /// Download count over the listing window. Only used as a tie-break.
    pub downloads: u64,
}

impl PackageCandidate {
    #[must_use]
    pub fn new(name: impl Into<String>, downloads: u64) -> Self {
        Self {
            name: name.into(),
            downloads,
        }
    }
}

/// A GitHub repository identity: the `(owner, name)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepoIdentity {
    pub owner: String,
    pub name: String,
}

impl RepoIdentity {
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// `owner/name`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Repository page URL under the given host base (e.g. `https://github.com`).
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        format!("{}/{}/{}", base.trim_end_matches('/'), self.owner, self.name)
    }
}

/// A candidate whose repository identity is already known (from an override).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedCandidate {
    pub candidate: PackageCandidate,
    pub repo: RepoIdentity,
    pub url: String,
}

/// Terminal pipeline record, serialized as-is into the output artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPackage {
    pub name: String,
    pub downloads: u64,
    pub github_owner: String,
    pub github_name: String,
    pub stars: u64,
    pub url: String,
}

impl ResolvedPackage {
    #[must_use]
    pub fn new(candidate: PackageCandidate, repo: RepoIdentity, url: String, stars: u64) -> Self {
        Self {
            name: candidate.name,
            downloads: candidate.downloads,
            github_owner: repo.owner,
            github_name: repo.name,
            stars,
            url,
        }
    }
}
