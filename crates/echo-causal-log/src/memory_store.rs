// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reference [`BlockStore`] backed by [`echo_cas::MemoryTier`].

use std::sync::Arc;

use echo_cas::{BlobHash, BlobStore, MemoryTier};
use tokio::sync::Mutex;

use crate::error::LogError;
use crate::hash::EntryHash;
use crate::store::BlockStore;

/// In-memory, `tokio`-friendly [`BlockStore`].
///
/// Wraps `echo_cas::MemoryTier` (a synchronous, non-`Send`-across-await
/// store) behind a `tokio::sync::Mutex` so it can sit behind the async
/// `BlockStore` trait. Entry hashes are hex strings at this crate's boundary;
/// they are parsed into `BlobHash`'s `[u8; 32]` on the way in and rendered
/// back via `BlobHash`'s `Display` on the way out.
#[derive(Clone)]
pub struct MemoryBlockStore {
    inner: Arc<Mutex<MemoryTier>>,
}

impl MemoryBlockStore {
    /// An empty store with no byte limit.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryTier::new())),
        }
    }

    /// An empty store with an advisory byte budget.
    pub fn with_limits(max_bytes: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryTier::with_limits(max_bytes))),
        }
    }
}

impl Default for MemoryBlockStore {
    fn default() -> Self {
        Self::new()
    }
}

fn to_blob_hash(hash: &EntryHash) -> Result<BlobHash, LogError> {
    let bytes = hex_decode(hash.as_str())
        .ok_or_else(|| LogError::Malformed(hash.clone()))?;
    Ok(BlobHash(bytes))
}

fn hex_decode(s: &str) -> Option<[u8; 32]> {
    if s.len() != 64 {
        return None;
    }
    let mut out = [0u8; 32];
    for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
        let pair = std::str::from_utf8(chunk).ok()?;
        out[i] = u8::from_str_radix(pair, 16).ok()?;
    }
    Some(out)
}

impl BlockStore for MemoryBlockStore {
    async fn put(&self, bytes: &[u8]) -> Result<EntryHash, LogError> {
        let mut guard = self.inner.lock().await;
        let hash = guard.put(bytes);
        Ok(EntryHash::from(hash.to_string()))
    }

    async fn get(&self, hash: &EntryHash) -> Result<Vec<u8>, LogError> {
        let blob_hash = to_blob_hash(hash)?;
        let guard = self.inner.lock().await;
        guard
            .get(&blob_hash)
            .map(|bytes| bytes.to_vec())
            .ok_or_else(|| LogError::NotFound(hash.clone()))
    }
}
