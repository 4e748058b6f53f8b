//! Block template for mining.
//!
//! A template carries everything the block will commit to except the nonce
//! and hash, which the search supplies, and the artwork, which is derived
//! from the final hash afterwards.

use artchain_consensus::pow;
use artchain_primitives::{ArtPattern, Block, GENESIS_PREVIOUS_HASH, Transaction};

/// Draft of an unmined block.
///
/// [`into_block`](Self::into_block) is the only way to a finalized [`Block`];
/// a dropped template leaves no state behind.
#[derive(Debug, Clone)]
pub struct BlockTemplate {
    /// Position the mined block will take.
    pub index: u64,
    /// Hash of the block this one extends.
    pub previous_hash: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// Transactions to include, in hash order.
    pub transactions: Vec<Transaction>,
    /// Required number of leading zero characters.
    pub difficulty: u32,
}

impl BlockTemplate {
    /// Template for the genesis block.
    pub fn genesis(timestamp: u64, difficulty: u32) -> Self {
        Self {
            index: 0,
            previous_hash: GENESIS_PREVIOUS_HASH.to_owned(),
            timestamp,
            transactions: Vec::new(),
            difficulty,
        }
    }

    /// Template for the block extending `parent`.
    pub fn next(
        parent: &Block,
        timestamp: u64,
        transactions: Vec<Transaction>,
        difficulty: u32,
    ) -> Self {
        Self {
            index: parent.index + 1,
            previous_hash: parent.hash.clone(),
            timestamp,
            transactions,
            difficulty,
        }
    }

    /// Canonical digest of this template's contents at `nonce`.
    pub fn digest(&self, nonce: u64) -> String {
        pow::block_digest(
            self.index,
            &self.previous_hash,
            self.timestamp,
            &self.transactions,
            nonce,
        )
    }

    /// Seal the template into a finalized block.
    pub fn into_block(self, hash: String, nonce: u64, art: ArtPattern) -> Block {
        Block {
            index: self.index,
            timestamp: self.timestamp,
            transactions: self.transactions,
            previous_hash: self.previous_hash,
            hash,
            nonce,
            difficulty: self.difficulty,
            art,
        }
    }
}
