//! Block hashing and verification.
//!
//! The canonical digest and the leading-zero difficulty predicate live in
//! [`pow`]. [`verify_block`] and [`verify_link`] check what the chain store
//! relies on: the stored hash is really the digest of the block's contents,
//! carries the required zero prefix, and points at its parent.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod pow;

pub use pow::{block_digest, meets_difficulty, verify_block, verify_link};

/// Block and link verification errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsensusError {
    /// The stored hash is not the digest of the block's contents.
    #[error("block hash mismatch: stored {stored}, computed {computed}")]
    HashMismatch {
        /// Hash carried by the block.
        stored: String,
        /// Digest recomputed from the block's contents.
        computed: String,
    },
    /// The hash lacks the zero prefix its difficulty demands.
    #[error("hash {hash} does not meet difficulty {difficulty}")]
    DifficultyNotMet {
        /// Hash carried by the block.
        hash: String,
        /// Required number of leading zero characters.
        difficulty: u32,
    },
    /// The child's previous-hash does not point at its parent.
    #[error("broken link at block {index}: expected previous hash {expected}, got {actual}")]
    BrokenLink {
        /// Index of the child block.
        index: u64,
        /// The parent's hash.
        expected: String,
        /// The previous-hash the child carries.
        actual: String,
    },
    /// The child's index does not follow its parent's.
    #[error("non-sequential index: parent {parent}, child {child}")]
    NonSequentialIndex {
        /// Index of the parent block.
        parent: u64,
        /// Index carried by the child block.
        child: u64,
    },
}
