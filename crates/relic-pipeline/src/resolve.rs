//! Repository resolution, star lookup, and deduplication.
//!
//! Packages keyed by different registry names can point at the same
//! repository; only the first one to reach the resolver is kept. The dedup
//! check runs before the star lookup, and an identity is only recorded once
//! a package has actually been emitted for it.

use std::collections::HashSet;

use relic_core::{PackageCandidate, RepoIdentity, ResolvedPackage, StarSource};

use crate::classify::Classified;
use crate::identity::infer_identity;

pub struct Resolver<'a, S> {
    stars: &'a S,
    github_url: String,
    seen: HashSet<RepoIdentity>,
}

impl<'a, S: StarSource> Resolver<'a, S> {
    /// `github_url` is the base used to build URLs for inferred identities.
    pub fn new(stars: &'a S, github_url: impl Into<String>) -> Self {
        Self {
            stars,
            github_url: github_url.into(),
            seen: HashSet::new(),
        }
    }

    /// Resolve one classified package. `None` means it was dropped.
    pub fn resolve(&mut self, item: Classified) -> Option<ResolvedPackage> {
        let (candidate, repo, url) = match item {
            Classified::Known(enriched) => (enriched.candidate, enriched.repo, enriched.url),
            Classified::Unresolved {
                candidate,
                metadata,
            } => {
                let Some(repo) = metadata
                    .as_ref()
                    .and_then(|metadata| infer_identity(&candidate.name, metadata))
                else {
                    tracing::debug!(package = %candidate.name, "cannot find GitHub repository");
                    return None;
                };
                let url = repo.url(&self.github_url);
                (candidate, repo, url)
            }
        };

        self.emit(candidate, repo, url)
    }

    fn emit(
        &mut self,
        candidate: PackageCandidate,
        repo: RepoIdentity,
        url: String,
    ) -> Option<ResolvedPackage> {
        if self.seen.contains(&repo) {
            tracing::debug!(package = %candidate.name, repo = %repo.full_name(), "repository already listed");
            return None;
        }

        let stars = self.stars.fetch_star_count(&repo.owner, &repo.name)?;
        self.seen.insert(repo.clone());
        tracing::debug!(package = %candidate.name, repo = %repo.full_name(), stars, "resolved");
        Some(ResolvedPackage::new(candidate, repo, url, stars))
    }

    /// Lazily resolve `items`; nothing is fetched until pulled.
    pub fn resolve_all<I>(self, items: I) -> Resolve<'a, I::IntoIter, S>
    where
        I: IntoIterator<Item = Classified>,
    {
        Resolve {
            inner: items.into_iter(),
            resolver: self,
        }
    }
}

/// Iterator returned by [`Resolver::resolve_all`].
pub struct Resolve<'a, I, S> {
    inner: I,
    resolver: Resolver<'a, S>,
}

impl<I, S> Iterator for Resolve<'_, I, S>
where
    I: Iterator<Item = Classified>,
    S: StarSource,
{
    type Item = ResolvedPackage;

    fn next(&mut self) -> Option<Self::Item> {
        let resolver = &mut self.resolver;
        self.inner.find_map(|item| resolver.resolve(item))
    }
}
