// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Opaque, lexicographically-ordered content hash identifying an [`crate::Entry`].

use serde::{Deserialize, Serialize};

/// A content hash identifying a stored block.
///
/// Hashes are opaque printable strings with a total lexicographic order — the
/// concrete hash function is the block store's concern, not this crate's.
/// [`MemoryBlockStore`](crate::MemoryBlockStore) happens to use BLAKE3 hex
/// digests (via `echo_cas`); a production store may use anything else as long
/// as it is stable and collision-resistant.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryHash(String);

impl EntryHash {
    /// Wrap a raw hash string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// View the hash as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntryHash {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for EntryHash {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}
