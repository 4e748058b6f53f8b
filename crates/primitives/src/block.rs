//! Block structure.
//!
//! A block is finalized exactly once: mining fills in `hash` and `nonce`,
//! pattern derivation fills in `art`, and after that nothing changes. Blocks
//! are never removed or reordered; the chain only grows at the tail.

use serde::{Deserialize, Serialize};

use crate::{ArtPattern, Transaction};

/// Previous-hash marker carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// A finalized block.
///
/// Invariant: `hash` is the digest of the canonical serialization of
/// `(index, previous_hash, timestamp, transactions, nonce)` and starts with
/// `difficulty` zero characters. `artchain-consensus` checks both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Zero-based position in the chain.
    pub index: u64,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// Transactions included atomically, in the order they were hashed.
    pub transactions: Vec<Transaction>,
    /// Hash of the preceding block, or [`GENESIS_PREVIOUS_HASH`] at index 0.
    pub previous_hash: String,
    /// This block's own digest (64 lowercase hex characters).
    pub hash: String,
    /// Nonce found by the proof-of-work search.
    pub nonce: u64,
    /// Number of leading zero hex characters `hash` was mined against.
    pub difficulty: u32,
    /// Artwork derived from `hash` and `transactions`.
    pub art: ArtPattern,
}

impl Block {
    /// Whether this block has the genesis shape: index 0, the genesis
    /// previous-hash marker, and no transactions.
    pub fn is_genesis(&self) -> bool {
        self.index == 0
            && self.previous_hash == GENESIS_PREVIOUS_HASH
            && self.transactions.is_empty()
    }
}
