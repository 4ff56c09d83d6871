// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error kinds surfaced by causal-log operations.

use thiserror::Error;

use crate::hash::EntryHash;

/// Errors surfaced by this crate's operations.
///
/// One enum per crate, following `echo_cas::CasError` /
/// `warp_core::provenance_store::HistoryError` — every failure mode the public
/// API can produce lands here rather than being split per module.
#[derive(Debug, Error)]
pub enum LogError {
    /// A store handle was required but absent.
    #[error("[LOG_STORE_MISSING] store handle required but absent")]
    StoreMissing,

    /// A log argument was required but absent.
    #[error("[LOG_MISSING] log argument required but absent")]
    LogMissing,

    /// A non-sequence argument was passed where a sequence was required, or an
    /// unknown hash was used in a strict context.
    #[error("[LOG_BAD_ARGUMENT] {0}")]
    BadArgument(String),

    /// `get(hash)` failed to locate the requested block.
    #[error("[LOG_NOT_FOUND] no block for hash {0}")]
    NotFound(EntryHash),

    /// Block bytes did not decode to a valid entry.
    #[error("[LOG_MALFORMED] block {0} is not a valid entry")]
    Malformed(EntryHash),

    /// The metadata block at a hash does not have a `heads` field.
    #[error("[LOG_NOT_A_LOG] block {0} is not a log metadata block")]
    NotALog(EntryHash),

    /// `to_hash` was called on a log with no entries.
    #[error("[LOG_EMPTY] cannot hash an empty log")]
    EmptyLog,

    /// The underlying block store failed during `put`/`get`.
    ///
    /// Boxed rather than generic: `BlockStore` implementations are free to use
    /// any error type, and this crate never needs to match on the cause, only
    /// propagate and display it.
    #[error("[LOG_STORE_ERROR] {0}")]
    StoreError(#[source] Box<dyn std::error::Error + Send + Sync>),
}
