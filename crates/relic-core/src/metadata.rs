//! Per-package registry metadata and runtime tag classification.
//!
//! Mirrors the subset of `https://pypi.org/pypi/{name}/json` the pipeline
//! reads. Every field is optional on the wire; missing values deserialize
//! to `None` or empty collections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryMetadata {
    pub info: MetadataInfo,
    /// Version string → release artifacts uploaded for that version.
    #[serde(default)]
    pub releases: BTreeMap<String, Vec<ReleaseArtifact>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataInfo {
    #[serde(default)]
    pub home_page: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Trove classifiers. `PyPI` sends `null` for some legacy uploads.
    #[serde(default)]
    pub classifiers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseArtifact {
    /// Runtime compatibility tag (`py2.py3`, `3.8`, `cp27`, `source`, ...).
    #[serde(default)]
    pub python_version: Option<String>,
}

impl RegistryMetadata {
    /// Non-empty home page URL, if any.
    #[must_use]
    pub fn home_page(&self) -> Option<&str> {
        self.info.home_page.as_deref().filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.info.description.as_deref().filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn classifiers(&self) -> &[String] {
        self.info.classifiers.as_deref().unwrap_or_default()
    }

    /// Every runtime tag across all versions and artifacts.
    pub fn runtime_tags(&self) -> impl Iterator<Item = &str> {
        self.releases
            .values()
            .flatten()
            .filter_map(|artifact| artifact.python_version.as_deref())
    }

    /// Whether any released artifact is built for the current runtime.
    #[must_use]
    pub fn supports_current_runtime(&self, tags: &RuntimeTags) -> bool {
        self.runtime_tags().any(|tag| tags.is_current(tag))
    }
}

/// Tag vocabulary separating legacy-only artifacts from current-runtime ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeTags {
    /// Exact tags meaning "built for both runtimes".
    pub wildcard: Vec<String>,
    /// Prefixes marking a current-runtime build (`3.`, `py3`, `cp3`).
    pub current_prefixes: Vec<String>,
}

impl Default for RuntimeTags {
    fn default() -> Self {
        Self {
            wildcard: vec!["py2.py3".to_string()],
            current_prefixes: vec!["3".to_string(), "py3".to_string(), "cp3".to_string()],
        }
    }
}

impl RuntimeTags {
    #[must_use]
    pub fn is_current(&self, tag: &str) -> bool {
        self.wildcard.iter().any(|w| w == tag)
            || self.current_prefixes.iter().any(|p| tag.starts_with(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const LEGACY_FIXTURE: &str = r#"{
        "info": {
            "home_page": "https://github.com/acme/foo",
            "description": null,
            "classifiers": ["Programming Language :: Python :: 2.7"]
        },
        "releases": {
            "0.1": [{"python_version": "source"}],
            "0.2": [{"python_version": "py2"}, {"python_version": "cp27"}],
            "0.3": []
        }
    }"#;

    #[rstest]
    #[case("py2.py3", true)]
    #[case("3.6", true)]
    #[case("py3", true)]
    #[case("cp311", true)]
    #[case("py2", false)]
    #[case("cp27", false)]
    #[case("2.7", false)]
    #[case("source", false)]
    fn default_tags_classify(#[case] tag: &str, #[case] current: bool) {
        assert_eq!(RuntimeTags::default().is_current(tag), current);
    }

    #[test]
    fn legacy_fixture_is_not_current() {
        let meta: RegistryMetadata = serde_json::from_str(LEGACY_FIXTURE).unwrap();
        assert_eq!(meta.home_page(), Some("https://github.com/acme/foo"));
        assert_eq!(meta.description(), None);
        assert_eq!(meta.runtime_tags().count(), 3);
        assert!(!meta.supports_current_runtime(&RuntimeTags::default()));
    }

    #[test]
    fn any_current_artifact_marks_package_current() {
        let mut meta: RegistryMetadata = serde_json::from_str(LEGACY_FIXTURE).unwrap();
        meta.releases.insert(
            "1.0".to_string(),
            vec![ReleaseArtifact {
                python_version: Some("py2.py3".to_string()),
            }],
        );
        assert!(meta.supports_current_runtime(&RuntimeTags::default()));
    }

    #[test]
    fn missing_fields_default() {
        let meta: RegistryMetadata =
            serde_json::from_str(r#"{"info": {"home_page": ""}}"#).unwrap();
        assert_eq!(meta.home_page(), None);
        assert!(meta.classifiers().is_empty());
        assert!(meta.releases.is_empty());
    }
}
