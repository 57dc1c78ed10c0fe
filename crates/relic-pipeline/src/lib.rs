//! # relic-pipeline
//!
//! The lazy classify → resolve → rank chain.
//!
//! Every stage is an [`Iterator`] adapter: the aggregator pulls one resolved
//! package at a time, which pulls classified candidates, which pulls
//! listing rows. A package dropped at any stage never causes work further
//! down the chain, and nothing past the N-th resolved package is fetched.

pub mod aggregate;
pub mod classify;
pub mod identity;
pub mod resolve;

pub use aggregate::{rank, take_ranked};
pub use classify::{Classified, Classifier};
pub use identity::infer_identity;
pub use resolve::Resolver;

use relic_core::{
    ClassificationStore, CompatibilityOracle, MetadataSource, PackageCandidate, ResolvedPackage,
    StarSource,
};

/// Run the whole chain over `candidates` and return the ranked top `limit`.
pub fn top_legacy_packages<I, C, M, O, S, F>(
    candidates: I,
    classifier: Classifier<'_, C, M, O>,
    resolver: Resolver<'_, S>,
    limit: usize,
    on_slot: F,
) -> Vec<ResolvedPackage>
where
    I: IntoIterator<Item = PackageCandidate>,
    C: ClassificationStore,
    M: MetadataSource,
    O: CompatibilityOracle,
    S: StarSource,
    F: FnMut(usize, &ResolvedPackage),
{
    let classified = classifier.classify_all(candidates);
    let resolved = resolver.resolve_all(classified);
    take_ranked(resolved, limit, on_slot)
}
