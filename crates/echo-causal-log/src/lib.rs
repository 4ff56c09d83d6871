// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Append-only, content-addressed, causally-ordered log for Echo.
//!
//! `echo-causal-log` is a CRDT building block: entries are immutable DAG
//! nodes addressed by a hash of `(payload, next)`, `next` names causal
//! predecessors rather than a single previous entry, and divergent logs
//! converge deterministically under [`join`]/[`join_all`]. Storage is
//! delegated to a [`BlockStore`] — [`MemoryBlockStore`] is the in-memory
//! reference implementation, built on [`echo_cas::MemoryTier`].
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::unreadable_literal,
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::many_single_char_names,
    clippy::module_name_repetitions,
    clippy::use_self
)]

mod entry;
mod error;
mod fetch;
mod hash;
mod log;
mod memory_store;
mod ops;
mod payload;
mod sort;
mod store;

/// A DAG node: payload, causal parents, and content hash.
pub use entry::Entry;
/// Error kinds surfaced by this crate's operations.
pub use error::LogError;
/// Bounded causal traversal against a [`BlockStore`].
pub use fetch::{fetch_all, UNBOUNDED};
/// Opaque, lexicographically-ordered content hash.
pub use hash::EntryHash;
/// An ordered entry sequence plus its current heads.
pub use log::{find_heads, Log, LogMetadata};
/// Reference in-memory [`BlockStore`].
pub use memory_store::MemoryBlockStore;
/// Store-backed log operations: append, join, join_all, expand, from_hash, to_hash.
pub use ops::{append, expand, from_hash, join, join_all, to_hash};
/// Opaque application payload.
pub use payload::Payload;
/// Deterministic topological linearization.
pub use sort::topo_sort;
/// The block-store seam this crate consumes.
pub use store::BlockStore;
