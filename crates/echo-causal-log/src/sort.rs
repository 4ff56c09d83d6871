// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic topological linearization of a set of entries.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::entry::Entry;
use crate::hash::EntryHash;

/// Linearize `input` into causal order, resolving predecessors not present in
/// `input` via `lookup_a` then `lookup_b`.
///
/// Every entry reachable from `input` through `next` edges and the two lookups
/// ends up in the result, each entry placed after every already-seen
/// predecessor and before any already-seen descendant that names it. Ties
/// beyond that rule are broken by first-seen order from the input queue. The
/// sort is a pure function of its arguments: identical inputs and lookups
/// always produce the identical sequence.
pub fn topo_sort(
    input: &[Entry],
    lookup_a: impl Fn(&EntryHash) -> Option<Entry>,
    lookup_b: impl Fn(&EntryHash) -> Option<Entry>,
) -> Vec<Entry> {
    let input_index: HashMap<EntryHash, Entry> = input
        .iter()
        .cloned()
        .map(|e| (e.hash().clone(), e))
        .collect();

    let mut queue: VecDeque<Entry> = input.iter().cloned().collect();
    let mut seen: HashSet<EntryHash> = HashSet::new();
    let mut result: Vec<Entry> = Vec::new();

    while let Some(entry) = queue.pop_front() {
        if seen.contains(entry.hash()) {
            continue;
        }
        seen.insert(entry.hash().clone());

        // Candidate A: just after the latest already-placed predecessor.
        let i1 = entry
            .next()
            .iter()
            .filter_map(|parent_hash| result.iter().position(|r| r.hash() == parent_hash))
            .max();
        let candidate_a = i1.map_or(0, |p| p + 1);

        // Candidate B: at the earliest already-placed descendant that names us.
        // Absent (no such descendant yet) imposes no upper bound.
        let i2 = result
            .iter()
            .enumerate()
            .filter(|(_, r)| r.next().iter().any(|h| h == entry.hash()))
            .map(|(idx, _)| idx)
            .max();
        let candidate_b = i2.unwrap_or(usize::MAX);

        let position = candidate_a.min(candidate_b);
        let position = if position == usize::MAX { 0 } else { position };
        result.insert(position, entry.clone());

        let resolved: Vec<Entry> = entry
            .next()
            .iter()
            .filter_map(|parent_hash| {
                input_index
                    .get(parent_hash)
                    .cloned()
                    .or_else(|| lookup_a(parent_hash))
                    .or_else(|| lookup_b(parent_hash))
            })
            .collect();
        for parent in resolved.into_iter().rev() {
            queue.push_front(parent);
        }
    }

    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn build_chain() -> (Entry, Entry, Entry) {
        use crate::memory_store::MemoryBlockStore;
        let store = MemoryBlockStore::new();
        let a = Entry::create(&store, "A", Vec::new()).await.unwrap();
        let b = Entry::create(&store, "B", vec![a.hash().clone()])
            .await
            .unwrap();
        let c = Entry::create(&store, "C", vec![b.hash().clone()])
            .await
            .unwrap();
        (a, b, c)
    }

    #[tokio::test]
    async fn linear_chain_sorts_oldest_first() {
        let (a, b, c) = build_chain().await;
        let sorted = topo_sort(&[c.clone(), b.clone(), a.clone()], |_| None, |_| None);
        let hashes: Vec<_> = sorted.iter().map(Entry::hash).collect();
        assert_eq!(hashes, vec![a.hash(), b.hash(), c.hash()]);
    }

    #[tokio::test]
    async fn sort_is_deterministic_across_input_order() {
        let (a, b, c) = build_chain().await;
        let first = topo_sort(&[c.clone(), b.clone(), a.clone()], |_| None, |_| None);
        let second = topo_sort(&[a.clone(), c.clone(), b.clone()], |_| None, |_| None);
        let first_hashes: Vec<_> = first.iter().map(Entry::hash).collect();
        let second_hashes: Vec<_> = second.iter().map(Entry::hash).collect();
        assert_eq!(first_hashes, second_hashes);
    }

    #[tokio::test]
    async fn dedups_by_hash_keyed_first_seen() {
        let (a, b, _c) = build_chain().await;
        let sorted = topo_sort(&[a.clone(), b.clone(), a.clone()], |_| None, |_| None);
        assert_eq!(sorted.len(), 2);
    }
}
