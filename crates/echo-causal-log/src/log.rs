// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory `Log` value: an ordered entry sequence plus its current heads.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::hash::EntryHash;

/// Canonical JSON form of a log's metadata, as written to / read from the
/// block store by [`crate::to_hash`] / [`crate::from_hash`].
///
/// The payload tree itself is reachable only via the store — this projection
/// carries nothing but the heads needed to re-derive it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogMetadata {
    /// The log's head hashes at the time it was hashed.
    pub heads: Vec<EntryHash>,
}

/// An ordered sequence of entries plus the set of current head hashes.
///
/// `Log` is a pure, immutable value — every operation in this crate returns a
/// freshly constructed `Log` rather than mutating one in place. There are no
/// back-pointers from [`Entry`] to `Log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Log {
    entries: Vec<Entry>,
    heads: Vec<EntryHash>,
}

impl Log {
    /// Construct a log from `entries`, computing `heads` via [`find_heads`] if
    /// `heads` is `None`.
    pub fn create(entries: Vec<Entry>, heads: Option<Vec<EntryHash>>) -> Self {
        let heads = heads.unwrap_or_else(|| find_heads(&entries));
        Self { entries, heads }
    }

    /// A log with no entries and no heads.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            heads: Vec::new(),
        }
    }

    /// The log's entries, in causal order.
    pub fn items(&self) -> &[Entry] {
        &self.entries
    }

    /// The log's current head hashes.
    pub fn heads(&self) -> &[EntryHash] {
        &self.heads
    }

    /// True iff the log has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by hash via linear scan.
    pub fn get(&self, hash: &EntryHash) -> Option<&Entry> {
        self.entries.iter().find(|e| e.hash() == hash)
    }

    /// Canonical JSON metadata form: `{"heads": [...]}`.
    pub fn to_json(&self) -> LogMetadata {
        LogMetadata {
            heads: self.heads.clone(),
        }
    }

    /// Human-readable multi-line rendering, newest entry first.
    ///
    /// Each line is `<ancestry-indent><payload>`. The indent is built from how
    /// many `next`-hops separate the entry from the nearest head that can
    /// reach it: zero hops (a head itself) gets no indent, one hop gets `└─`,
    /// and each further hop adds a two-space prefix before it.
    pub fn to_display_string(&self) -> String {
        let depth = self.depth_from_heads();
        let mut lines = Vec::with_capacity(self.entries.len());
        for entry in self.entries.iter().rev() {
            let depth = depth.get(entry.hash()).copied().unwrap_or(0);
            let mut indent = String::new();
            if depth > 0 {
                for _ in 0..depth.saturating_sub(1) {
                    indent.push_str("  ");
                }
                indent.push_str("└─");
            }
            lines.push(format!("{indent}{}", entry.payload()));
        }
        lines.join("\n")
    }

    /// For every entry reachable from a head, the length of the longest
    /// `next`-chain from that head down to it.
    fn depth_from_heads(&self) -> std::collections::HashMap<EntryHash, usize> {
        let mut depth: std::collections::HashMap<EntryHash, usize> = std::collections::HashMap::new();
        let mut queue: VecDeque<(EntryHash, usize)> =
            self.heads.iter().map(|h| (h.clone(), 0)).collect();

        while let Some((hash, d)) = queue.pop_front() {
            let is_improvement = depth.get(&hash).is_none_or(|&existing| d > existing);
            if !is_improvement {
                continue;
            }
            depth.insert(hash.clone(), d);
            if let Some(entry) = self.get(&hash) {
                for parent in entry.next() {
                    queue.push_back((parent.clone(), d + 1));
                }
            }
        }

        depth
    }
}

/// Hashes of entries in `entries` that are not referenced by any other
/// entry's `next`. Sorted lexicographically for determinism.
pub fn find_heads(entries: &[Entry]) -> Vec<EntryHash> {
    let referenced: HashSet<&EntryHash> = entries.iter().flat_map(|e| e.next().iter()).collect();
    let mut heads: Vec<EntryHash> = entries
        .iter()
        .filter(|e| !referenced.contains(e.hash()))
        .map(|e| e.hash().clone())
        .collect();
    heads.sort();
    heads
}
