//! Legacy-only classification.
//!
//! Each candidate goes through four checks, first match wins:
//! 1. override table (`[]` drops, `[owner, name, url]` emits resolved)
//! 2. classification cache (an entry drops)
//! 3. compatibility oracle, when configured (compatible drops and caches)
//! 4. release scan of the registry metadata (current tag drops and caches)
//!
//! Registry metadata is fetched at most once per candidate, after the cache
//! check, and handed to both the oracle and the release scan. Only steps 3
//! and 4 write to the cache. A metadata fetch failure does not drop the
//! package: it continues without metadata.

use relic_cache::OverrideTable;
use relic_core::{
    ClassificationStore, CompatibilityOracle, EnrichedCandidate, MetadataSource, OverrideEntry,
    PackageCandidate, RegistryMetadata, RuntimeTags,
};

/// A candidate that survived classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// Legacy-only with a repository identity supplied by an override.
    Known(EnrichedCandidate),
    /// Legacy-only; the repository still has to be inferred. `metadata` is
    /// `None` when the registry lookup failed.
    Unresolved {
        candidate: PackageCandidate,
        metadata: Option<RegistryMetadata>,
    },
}

impl Classified {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Known(enriched) => &enriched.candidate.name,
            Self::Unresolved { candidate, .. } => &candidate.name,
        }
    }
}

pub struct Classifier<'a, C, M, O> {
    overrides: &'a OverrideTable,
    cache: &'a mut C,
    metadata: &'a M,
    oracle: Option<&'a O>,
    tags: RuntimeTags,
}

impl<'a, C, M, O> Classifier<'a, C, M, O>
where
    C: ClassificationStore,
    M: MetadataSource,
    O: CompatibilityOracle,
{
    /// Pass `None` as `oracle` to classify from release metadata alone.
    pub fn new(
        overrides: &'a OverrideTable,
        cache: &'a mut C,
        metadata: &'a M,
        oracle: Option<&'a O>,
        tags: RuntimeTags,
    ) -> Self {
        Self {
            overrides,
            cache,
            metadata,
            oracle,
            tags,
        }
    }

    /// Classify one candidate. `None` means it was dropped.
    pub fn classify(&mut self, candidate: PackageCandidate) -> Option<Classified> {
        let name = candidate.name.as_str();

        match self.overrides.lookup(name) {
            Some(OverrideEntry::Compatible) => {
                tracing::debug!(package = name, "excluded by override");
                return None;
            }
            Some(OverrideEntry::Legacy { repo, url }) => {
                tracing::debug!(package = name, repo = %repo.full_name(), "resolved by override");
                return Some(Classified::Known(EnrichedCandidate {
                    repo: repo.clone(),
                    url: url.clone(),
                    candidate,
                }));
            }
            None => {}
        }

        if self.cache.is_marked_compatible(name) {
            tracing::debug!(package = name, "cached as compatible");
            return None;
        }

        let fetched = self.metadata.fetch_metadata(name);

        if let Some(oracle) = self.oracle {
            match oracle.supports_current_runtime(name, fetched.as_ref().ok()) {
                Ok(true) => {
                    tracing::debug!(package = name, "oracle reports compatible");
                    self.cache.mark_compatible(name);
                    return None;
                }
                Ok(false) => {}
                Err(error) => {
                    tracing::warn!(package = name, %error, "compatibility oracle failed; scanning releases");
                }
            }
        }

        let metadata = match fetched {
            Ok(metadata) => metadata,
            Err(error) => {
                tracing::warn!(package = name, %error, "metadata unavailable; keeping package");
                return Some(Classified::Unresolved {
                    candidate,
                    metadata: None,
                });
            }
        };

        if metadata.supports_current_runtime(&self.tags) {
            tracing::debug!(package = name, "releases include current runtime builds");
            self.cache.mark_compatible(name);
            return None;
        }

        tracing::debug!(package = name, "legacy-only");
        Some(Classified::Unresolved {
            candidate,
            metadata: Some(metadata),
        })
    }

    /// Lazily classify `candidates`; nothing is fetched until pulled.
    pub fn classify_all<I>(self, candidates: I) -> Classify<'a, I::IntoIter, C, M, O>
    where
        I: IntoIterator<Item = PackageCandidate>,
    {
        Classify {
            inner: candidates.into_iter(),
            classifier: self,
        }
    }
}

/// Iterator returned by [`Classifier::classify_all`].
pub struct Classify<'a, I, C, M, O> {
    inner: I,
    classifier: Classifier<'a, C, M, O>,
}

impl<I, C, M, O> Iterator for Classify<'_, I, C, M, O>
where
    I: Iterator<Item = PackageCandidate>,
    C: ClassificationStore,
    M: MetadataSource,
    O: CompatibilityOracle,
{
    type Item = Classified;

    fn next(&mut self) -> Option<Self::Item> {
        let classifier = &mut self.classifier;
        self.inner.find_map(|candidate| classifier.classify(candidate))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::convert::Infallible;

    use super::*;
    use pretty_assertions::assert_eq;
    use relic_core::{MetadataInfo, ReleaseArtifact, RepoIdentity};

    #[derive(Debug, thiserror::Error)]
    #[error("not found")]
    struct NotFound;

    #[derive(Default)]
    struct Registry {
        packages: HashMap<String, RegistryMetadata>,
        fetched: RefCell<Vec<String>>,
    }

    impl Registry {
        fn with(mut self, name: &str, tags: &[&str]) -> Self {
            let artifacts: Vec<ReleaseArtifact> = tags
                .iter()
                .map(|tag| ReleaseArtifact {
                    python_version: Some((*tag).to_string()),
                })
                .collect();
            self.packages.insert(
                name.to_string(),
                RegistryMetadata {
                    info: MetadataInfo::default(),
                    releases: [("1.0".to_string(), artifacts)].into_iter().collect(),
                },
            );
            self
        }
    }

    impl MetadataSource for Registry {
        type Error = NotFound;

        fn fetch_metadata(&self, name: &str) -> Result<RegistryMetadata, NotFound> {
            self.fetched.borrow_mut().push(name.to_string());
            self.packages.get(name).cloned().ok_or(NotFound)
        }
    }

    struct Oracle(HashSet<&'static str>);

    impl CompatibilityOracle for Oracle {
        type Error = Infallible;

        fn supports_current_runtime(
            &self,
            name: &str,
            _metadata: Option<&RegistryMetadata>,
        ) -> Result<bool, Infallible> {
            Ok(self.0.contains(name))
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("oracle unavailable")]
    struct Unavailable;

    #[derive(Default)]
    struct BrokenOracle {
        asked: RefCell<Vec<String>>,
    }

    impl CompatibilityOracle for BrokenOracle {
        type Error = Unavailable;

        fn supports_current_runtime(
            &self,
            name: &str,
            _metadata: Option<&RegistryMetadata>,
        ) -> Result<bool, Unavailable> {
            self.asked.borrow_mut().push(name.to_string());
            Err(Unavailable)
        }
    }

    /// Compatible exactly when the fetched document carries a classifier.
    struct ClassifierOracle;

    impl CompatibilityOracle for ClassifierOracle {
        type Error = Infallible;

        fn supports_current_runtime(
            &self,
            _name: &str,
            metadata: Option<&RegistryMetadata>,
        ) -> Result<bool, Infallible> {
            Ok(metadata.is_some_and(|meta| !meta.classifiers().is_empty()))
        }
    }

    fn names(items: &[Classified]) -> Vec<&str> {
        items.iter().map(Classified::name).collect()
    }

    #[test]
    fn override_marker_drops_without_touching_cache() {
        let overrides = OverrideTable::from_entries([("six".to_string(), OverrideEntry::Compatible)]);
        let mut cache: HashSet<String> = HashSet::new();
        let registry = Registry::default();

        let mut classifier = Classifier::new(
            &overrides,
            &mut cache,
            &registry,
            None::<&Oracle>,
            RuntimeTags::default(),
        );
        assert_eq!(classifier.classify(PackageCandidate::new("six", 10)), None);
        assert!(cache.is_empty());
        assert!(registry.fetched.borrow().is_empty());
    }

    #[test]
    fn override_identity_is_emitted_as_known() {
        let overrides = OverrideTable::from_entries([(
            "oldlib".to_string(),
            OverrideEntry::Legacy {
                repo: RepoIdentity::new("acme", "oldlib"),
                url: "https://github.com/acme/oldlib".to_string(),
            },
        )]);
        let mut cache: HashSet<String> = HashSet::new();
        let registry = Registry::default();

        let mut classifier = Classifier::new(
            &overrides,
            &mut cache,
            &registry,
            None::<&Oracle>,
            RuntimeTags::default(),
        );
        let classified = classifier.classify(PackageCandidate::new("oldlib", 7));
        assert_eq!(
            classified,
            Some(Classified::Known(EnrichedCandidate {
                candidate: PackageCandidate::new("oldlib", 7),
                repo: RepoIdentity::new("acme", "oldlib"),
                url: "https://github.com/acme/oldlib".to_string(),
            }))
        );
    }

    #[test]
    fn oracle_and_release_scan_populate_cache() {
        let overrides = OverrideTable::default();
        let mut cache: HashSet<String> = HashSet::new();
        let registry = Registry::default()
            .with("modern", &["py2.py3"])
            .with("legacy", &["py2", "source"]);
        let oracle = Oracle(HashSet::from(["requests"]));

        let classified: Vec<Classified> = Classifier::new(
            &overrides,
            &mut cache,
            &registry,
            Some(&oracle),
            RuntimeTags::default(),
        )
        .classify_all([
            PackageCandidate::new("requests", 300),
            PackageCandidate::new("modern", 200),
            PackageCandidate::new("legacy", 100),
        ])
        .collect();

        assert_eq!(names(&classified), vec!["legacy"]);
        assert_eq!(
            cache,
            HashSet::from(["requests".to_string(), "modern".to_string()])
        );
        assert_eq!(
            *registry.fetched.borrow(),
            vec!["requests", "modern", "legacy"]
        );
    }

    #[test]
    fn metadata_is_fetched_once_and_shared_with_oracle() {
        let overrides = OverrideTable::default();
        let mut cache: HashSet<String> = HashSet::new();
        let mut registry = Registry::default()
            .with("legacy", &["py2"])
            .with("classified", &["py2"]);
        if let Some(meta) = registry.packages.get_mut("classified") {
            meta.info.classifiers = Some(vec!["Programming Language :: Python :: 3".to_string()]);
        }

        let classified: Vec<Classified> = Classifier::new(
            &overrides,
            &mut cache,
            &registry,
            Some(&ClassifierOracle),
            RuntimeTags::default(),
        )
        .classify_all([
            PackageCandidate::new("legacy", 2),
            PackageCandidate::new("classified", 1),
        ])
        .collect();

        assert_eq!(names(&classified), vec!["legacy"]);
        assert_eq!(*registry.fetched.borrow(), vec!["legacy", "classified"]);
        assert_eq!(cache, HashSet::from(["classified".to_string()]));
    }

    #[test]
    fn oracle_failure_falls_through_to_release_scan() {
        let overrides = OverrideTable::default();
        let mut cache: HashSet<String> = HashSet::new();
        let registry = Registry::default()
            .with("legacy", &["py2", "source"])
            .with("modern", &["3.9"]);
        let oracle = BrokenOracle::default();

        let mut classifier = Classifier::new(
            &overrides,
            &mut cache,
            &registry,
            Some(&oracle),
            RuntimeTags::default(),
        );
        let legacy = classifier.classify(PackageCandidate::new("legacy", 2));
        let modern = classifier.classify(PackageCandidate::new("modern", 1));

        assert_eq!(legacy.as_ref().map(Classified::name), Some("legacy"));
        assert!(matches!(
            legacy,
            Some(Classified::Unresolved {
                metadata: Some(_),
                ..
            })
        ));
        assert_eq!(modern, None);
        assert_eq!(*oracle.asked.borrow(), vec!["legacy", "modern"]);
        assert_eq!(*registry.fetched.borrow(), vec!["legacy", "modern"]);
        assert_eq!(cache, HashSet::from(["modern".to_string()]));
    }

    #[test]
    fn metadata_failure_keeps_package_without_metadata() {
        let overrides = OverrideTable::default();
        let mut cache: HashSet<String> = HashSet::new();
        let registry = Registry::default();

        let mut classifier = Classifier::new(
            &overrides,
            &mut cache,
            &registry,
            None::<&Oracle>,
            RuntimeTags::default(),
        );
        assert_eq!(
            classifier.classify(PackageCandidate::new("ghost", 1)),
            Some(Classified::Unresolved {
                candidate: PackageCandidate::new("ghost", 1),
                metadata: None,
            })
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn classification_is_lazy() {
        let overrides = OverrideTable::default();
        let mut cache: HashSet<String> = HashSet::new();
        let registry = Registry::default()
            .with("first", &["py2"])
            .with("second", &["py2"]);

        let mut stream = Classifier::new(
            &overrides,
            &mut cache,
            &registry,
            None::<&Oracle>,
            RuntimeTags::default(),
        )
        .classify_all([
            PackageCandidate::new("first", 2),
            PackageCandidate::new("second", 1),
        ]);

        assert!(registry.fetched.borrow().is_empty());
        assert_eq!(stream.next().map(|c| c.name().to_string()), Some("first".to_string()));
        assert_eq!(*registry.fetched.borrow(), vec!["first"]);
    }
}
