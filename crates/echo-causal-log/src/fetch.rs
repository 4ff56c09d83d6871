// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bounded, causally-biased breadth-first traversal against a [`BlockStore`].

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::entry::Entry;
use crate::error::LogError;
use crate::hash::EntryHash;
use crate::store::BlockStore;

/// Sentinel budget meaning "no limit".
pub const UNBOUNDED: i64 = -1;

/// Fetch entries reachable from `seeds`, stopping once `budget` entries have
/// been collected (or never, if `budget` is [`UNBOUNDED`]), skipping anything
/// already in `exclude`.
///
/// Traversal is causally-biased breadth-first: an entry's parents are queued
/// immediately after it (ahead of the current level's remaining siblings),
/// preserving the order the parents appear in `next`.
///
/// # Errors
///
/// A failed `get` anywhere in the traversal is fatal for the whole call — no
/// partial result is returned.
pub async fn fetch_all<S: BlockStore>(
    store: &S,
    seeds: Vec<EntryHash>,
    budget: i64,
    exclude: &HashSet<EntryHash>,
) -> Result<Vec<Entry>, LogError> {
    let mut queue: VecDeque<EntryHash> = seeds.into_iter().collect();
    let mut result: Vec<Entry> = Vec::new();
    let mut collected: HashSet<EntryHash> = HashSet::new();

    loop {
        if !(budget < 0 || (result.len() as i64) < budget) {
            break;
        }
        let Some(hash) = queue.pop_front() else {
            break;
        };
        if exclude.contains(&hash) || collected.contains(&hash) {
            continue;
        }

        let entry = Entry::from_hash(store, &hash).await?;
        debug!(hash = %hash, next_count = entry.next().len(), "fetched entry");

        for (offset, parent_hash) in entry.next().iter().enumerate() {
            queue.insert(offset, parent_hash.clone());
        }
        collected.insert(entry.hash().clone());
        result.push(entry);
    }

    Ok(result)
}
