//! First-N collection and popularity ranking.

use std::cmp::Reverse;

use relic_core::ResolvedPackage;

/// Pull at most `limit` packages in stream order, then rank them.
///
/// This is a first-N-available policy: the stream order follows registry
/// downloads, so later (possibly more starred) packages are never pulled.
/// `on_slot` is called with the 1-based slot index as each slot fills.
pub fn take_ranked<I, F>(resolved: I, limit: usize, mut on_slot: F) -> Vec<ResolvedPackage>
where
    I: IntoIterator<Item = ResolvedPackage>,
    F: FnMut(usize, &ResolvedPackage),
{
    let mut taken = Vec::new();
    for package in resolved.into_iter().take(limit) {
        taken.push(package);
        on_slot(taken.len(), &taken[taken.len() - 1]);
    }

    if taken.len() < limit {
        tracing::info!(found = taken.len(), limit, "listing exhausted before filling every slot");
    }

    rank(&mut taken);
    taken
}

/// Sort by descending stars, ties broken by descending downloads.
pub fn rank(packages: &mut [ResolvedPackage]) {
    packages.sort_by_key(|p| (Reverse(p.stars), Reverse(p.downloads)));
}
