// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The minimal block-store interface this crate consumes.

use crate::error::LogError;
use crate::hash::EntryHash;

/// Content-addressed block store, as consumed by this crate.
///
/// Implementations own persistence; this crate only ever calls `put`/`get` at
/// well-defined suspension points. `put` must be idempotent with respect to
/// content — storing the same bytes twice must yield the same hash. Hashing,
/// transport, and durability are entirely the implementation's concern.
pub trait BlockStore: Send + Sync {
    /// Store `bytes`, returning its content hash.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::StoreError`] if the underlying store fails to write.
    fn put(
        &self,
        bytes: &[u8],
    ) -> impl std::future::Future<Output = Result<EntryHash, LogError>> + Send;

    /// Retrieve the bytes stored at `hash`.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::NotFound`] if no block is stored at `hash`, or
    /// [`LogError::StoreError`] if the underlying store fails to read.
    fn get(
        &self,
        hash: &EntryHash,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, LogError>> + Send;
}
