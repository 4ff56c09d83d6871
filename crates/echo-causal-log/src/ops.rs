// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pure, store-backed operations over `Log` values: `append`, `join`,
//! `join_all`, `expand`, `from_hash`, `to_hash`.
//!
//! Every operation here returns a freshly constructed [`Log`]; none of them
//! mutate their inputs.

use std::collections::HashSet;

use tracing::instrument;

use crate::entry::Entry;
use crate::error::LogError;
use crate::fetch::fetch_all;
use crate::hash::EntryHash;
use crate::log::{find_heads, Log, LogMetadata};
use crate::payload::Payload;
use crate::sort::topo_sort;
use crate::store::BlockStore;

/// Append a new entry whose `next` is `log.heads()`. The result's entries are
/// `log.items()` plus the new entry; its heads are `{new_entry.hash()}`.
///
/// # Errors
///
/// Returns [`LogError::StoreError`] if the store's `put` fails.
#[instrument(skip(store, log, payload))]
pub async fn append<S: BlockStore>(
    store: &S,
    log: &Log,
    payload: impl Into<Payload>,
) -> Result<Log, LogError> {
    let entry = Entry::create(store, payload, log.heads().to_vec()).await?;
    let mut entries = log.items().to_vec();
    entries.push(entry.clone());
    Ok(Log::create(entries, Some(vec![entry.hash().clone()])))
}

/// The causal union of `log_a` and `log_b`, linearized by [`topo_sort`] and
/// optionally truncated to `size` entries (default: `|a| + |b|`, i.e.
/// unbounded in practice since the union can never exceed that).
///
/// Deterministic and commutative over entry sets: `join(a, b)` and `join(b,
/// a)` always produce the same entries, because the tie-break orientation
/// below is a function of head identity, not argument order.
pub fn join(log_a: &Log, log_b: &Log, size: Option<usize>) -> Log {
    let heads_a: Vec<Entry> = log_a
        .heads()
        .iter()
        .filter_map(|h| log_a.get(h).cloned())
        .collect();
    let heads_b: Vec<Entry> = log_b
        .heads()
        .iter()
        .filter_map(|h| log_b.get(h).cloned())
        .collect();

    // Orientation makes the merge a function of head identity, not of which
    // side happened to be passed as `log_a` — this is what keeps `join`
    // commutative over entry sets.
    let a_first = match (heads_a.first(), heads_b.first()) {
        (Some(a), Some(b)) => a.hash() < b.hash(),
        _ => true,
    };

    let (seeds_first, seeds_second, lookup_first, lookup_second) = if a_first {
        (&heads_a, &heads_b, log_a, log_b)
    } else {
        (&heads_b, &heads_a, log_b, log_a)
    };

    let mut combined: Vec<Entry> = seeds_first.clone();
    combined.extend(seeds_second.iter().cloned());

    let sorted = topo_sort(
        &combined,
        |h| lookup_first.get(h).cloned(),
        |h| lookup_second.get(h).cloned(),
    );

    let size = size.unwrap_or_else(|| log_a.items().len() + log_b.items().len());
    let truncated: Vec<Entry> = sorted.into_iter().take(size).collect();
    let heads = find_heads(&truncated);
    Log::create(truncated, Some(heads))
}

/// Left-fold [`join`] over `logs`; the initial accumulator is the first
/// non-empty log. Returns [`Log::empty`] if every log is empty.
pub fn join_all(logs: &[Log], size: Option<usize>) -> Log {
    let mut logs = logs.iter().filter(|l| !l.is_empty());
    let Some(first) = logs.next() else {
        return Log::empty();
    };
    logs.fold(first.clone(), |acc, log| join(&acc, log, size))
}

/// Grow `log` backward along its unresolved ancestry, up to `length` total
/// entries (`-1` for the entire reachable DAG), excluding anything already
/// present or named in `exclude`.
///
/// # Errors
///
/// Returns [`LogError::NotFound`]/[`LogError::Malformed`]/[`LogError::StoreError`]
/// if fetching the missing ancestry fails.
#[instrument(skip(store, log, exclude))]
pub async fn expand<S: BlockStore>(
    store: &S,
    log: &Log,
    length: i64,
    exclude: Option<&HashSet<EntryHash>>,
) -> Result<Log, LogError> {
    let present: HashSet<EntryHash> = log.items().iter().map(|e| e.hash().clone()).collect();

    let mut seen_tail: HashSet<EntryHash> = HashSet::new();
    let tails: Vec<EntryHash> = log
        .items()
        .iter()
        .flat_map(|e| e.next().iter().cloned())
        .filter(|h| !present.contains(h) && seen_tail.insert(h.clone()))
        .collect();

    let mut combined_exclude: HashSet<EntryHash> = exclude.cloned().unwrap_or_default();
    combined_exclude.extend(present.iter().cloned());

    let budget = if length < 0 {
        crate::fetch::UNBOUNDED
    } else {
        (length - log.items().len() as i64).max(0)
    };

    let fetched = if tails.is_empty() {
        Vec::new()
    } else {
        fetch_all(store, tails, budget, &combined_exclude).await?
    };

    let mut merged = log.items().to_vec();
    merged.extend(fetched);
    let sorted = topo_sort(&merged, |_| None, |_| None);
    let heads = find_heads(&sorted);
    Ok(Log::create(sorted, Some(heads)))
}

/// Fetch the JSON metadata block at `hash`, then fetch up to `length` entries
/// (`-1` for the entire reachable DAG) starting from its heads.
///
/// # Errors
///
/// Returns [`LogError::NotALog`] if the block at `hash` does not decode to
/// `{"heads": [...]}}`, or a fetch error if loading the entries fails.
#[instrument(skip(store))]
pub async fn from_hash<S: BlockStore>(
    store: &S,
    hash: &EntryHash,
    length: i64,
) -> Result<Log, LogError> {
    let bytes = store.get(hash).await?;
    let metadata: LogMetadata =
        serde_json::from_slice(&bytes).map_err(|_| LogError::NotALog(hash.clone()))?;

    let entries = fetch_all(store, metadata.heads.clone(), length, &HashSet::new()).await?;
    let sorted = topo_sort(&entries, |_| None, |_| None);
    Ok(Log::create(sorted, Some(metadata.heads)))
}

/// Serialize `log.to_json()` and `put` it into the store, returning the
/// resulting hash.
///
/// # Errors
///
/// Returns [`LogError::EmptyLog`] if `log` has no entries.
#[instrument(skip(store, log))]
pub async fn to_hash<S: BlockStore>(store: &S, log: &Log) -> Result<EntryHash, LogError> {
    if log.is_empty() {
        return Err(LogError::EmptyLog);
    }
    // JSON is used here deliberately: this is the external metadata-block
    // contract (`{"heads": [...]}, not the content-hashed entry encoding,
    // which stays CBOR/BLAKE3 throughout `Entry`.
    let bytes =
        serde_json::to_vec(&log.to_json()).map_err(|e| LogError::StoreError(Box::new(e)))?;
    store.put(&bytes).await
}
