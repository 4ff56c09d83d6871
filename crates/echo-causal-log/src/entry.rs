// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Immutable DAG node: payload, predecessor hashes, and content hash.

use serde::{Deserialize, Serialize};

use crate::error::LogError;
use crate::hash::EntryHash;
use crate::payload::Payload;
use crate::store::BlockStore;

/// The serialized shape of an entry as written to the block store.
///
/// `hash` is deliberately absent here — it is a function of `(payload, next)`
/// and nothing else, never stored alongside them.
#[derive(Clone, Serialize, Deserialize)]
struct EntryRecord {
    payload: Payload,
    next: Vec<EntryHash>,
}

impl EntryRecord {
    fn to_canonical_bytes(&self) -> Result<Vec<u8>, LogError> {
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(self, &mut bytes)
            .map_err(|e| LogError::StoreError(Box::new(e)))?;
        Ok(bytes)
    }
}

/// An immutable DAG node.
///
/// Two entries are equal iff their hashes are equal — `hash` is a function of
/// `(payload, next)` and nothing else, so a conforming [`BlockStore`] makes
/// `create` followed by `from_hash` round-trip byte-for-byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    hash: EntryHash,
    payload: Payload,
    next: Vec<EntryHash>,
}

impl Entry {
    /// The entry's content hash.
    pub fn hash(&self) -> &EntryHash {
        &self.hash
    }

    /// The entry's opaque payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The entry's ordered causal parents. May be empty for a genesis entry.
    pub fn next(&self) -> &[EntryHash] {
        &self.next
    }

    /// Serialize `(payload, next)`, write it to `store`, and return the new
    /// entry with the hash the store assigned it.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::StoreError`] if encoding or the store's `put` fails.
    pub async fn create<S: BlockStore>(
        store: &S,
        payload: impl Into<Payload>,
        next: Vec<EntryHash>,
    ) -> Result<Self, LogError> {
        let record = EntryRecord {
            payload: payload.into(),
            next,
        };
        let bytes = record.to_canonical_bytes()?;
        let hash = store.put(&bytes).await?;
        Ok(Self {
            hash,
            payload: record.payload,
            next: record.next,
        })
    }

    /// Fetch and decode the entry stored at `hash`.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::NotFound`] if the store has no block at `hash`, or
    /// [`LogError::Malformed`] if the block does not decode to an entry.
    pub async fn from_hash<S: BlockStore>(store: &S, hash: &EntryHash) -> Result<Self, LogError> {
        let bytes = store.get(hash).await?;
        let record: EntryRecord =
            ciborium::de::from_reader(bytes.as_slice()).map_err(|_| LogError::Malformed(hash.clone()))?;
        Ok(Self {
            hash: hash.clone(),
            payload: record.payload,
            next: record.next,
        })
    }

    /// True iff `child.hash()` appears in `parent.next()` — i.e. `parent`
    /// lists `child` as one of its causal predecessors.
    ///
    /// Despite the name, this asks whether `parent` is a *child* (descendant)
    /// of `child` in the DAG, not the other way around.
    pub fn has_child(parent: &Entry, child: &Entry) -> bool {
        parent.next.iter().any(|h| h == child.hash())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::memory_store::MemoryBlockStore;

    #[tokio::test]
    async fn create_then_from_hash_round_trips() {
        let store = MemoryBlockStore::new();
        let entry = Entry::create(&store, "hello", Vec::new()).await.unwrap();
        let fetched = Entry::from_hash(&store, entry.hash()).await.unwrap();
        assert_eq!(entry, fetched);
        assert_eq!(fetched.payload().to_string(), "hello");
    }

    #[tokio::test]
    async fn hash_is_a_function_of_payload_and_next() {
        let store = MemoryBlockStore::new();
        let a = Entry::create(&store, "same", Vec::new()).await.unwrap();
        let b = Entry::create(&store, "same", Vec::new()).await.unwrap();
        assert_eq!(a.hash(), b.hash());
    }

    #[tokio::test]
    async fn from_hash_on_missing_block_is_not_found() {
        let store = MemoryBlockStore::new();
        let bogus = EntryHash::new("not-a-real-hash");
        let err = Entry::from_hash(&store, &bogus).await.unwrap_err();
        assert!(matches!(err, LogError::NotFound(_)));
    }

    #[tokio::test]
    async fn has_child_checks_next_membership() {
        let store = MemoryBlockStore::new();
        let parent_of_root = Entry::create(&store, "root", Vec::new()).await.unwrap();
        let child = Entry::create(&store, "child", vec![parent_of_root.hash().clone()])
            .await
            .unwrap();
        assert!(Entry::has_child(&child, &parent_of_root));
        assert!(!Entry::has_child(&parent_of_root, &child));
    }
}
