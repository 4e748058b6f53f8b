//! Canonical block digest and the difficulty predicate.
//!
//! The digest is SHA-256 over one exact byte stream:
//!
//!   1. decimal `index`
//!   2. `previous_hash` bytes
//!   3. decimal `timestamp`
//!   4. JSON array of the transactions, list order preserved
//!   5. decimal `nonce`
//!
//! hex-encoded to 64 lowercase characters. Transaction order is part of the
//! hashed content; swapping two transactions changes the digest. The block's
//! `difficulty` field is not hashed, it only selects the required zero
//! prefix.

use artchain_primitives::{Block, Transaction};
use sha2::{Digest, Sha256};

use crate::ConsensusError;

/// Compute the canonical digest of a block's contents.
///
/// Pure and deterministic. The same five inputs always produce the same
/// 64-character lowercase hex string.
pub fn block_digest(
    index: u64,
    previous_hash: &str,
    timestamp: u64,
    transactions: &[Transaction],
    nonce: u64,
) -> String {
    let transactions =
        serde_json::to_string(transactions).expect("transactions serialize to plain JSON");
    let mut hasher = Sha256::new();
    hasher.update(index.to_string());
    hasher.update(previous_hash);
    hasher.update(timestamp.to_string());
    hasher.update(transactions);
    hasher.update(nonce.to_string());
    hex::encode(hasher.finalize())
}

/// Whether `hash` starts with at least `difficulty` zero characters.
///
/// Difficulty 0 always holds. A hash shorter than `difficulty` never
/// qualifies.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    let prefix = difficulty as usize;
    hash.len() >= prefix && hash.as_bytes()[..prefix].iter().all(|&b| b == b'0')
}

/// Check a finalized block: the stored hash is the digest of its contents
/// and carries the zero prefix its difficulty demands.
pub fn verify_block(block: &Block) -> Result<(), ConsensusError> {
    let computed = block_digest(
        block.index,
        &block.previous_hash,
        block.timestamp,
        &block.transactions,
        block.nonce,
    );
    if computed != block.hash {
        return Err(ConsensusError::HashMismatch { stored: block.hash.clone(), computed });
    }
    if !meets_difficulty(&block.hash, block.difficulty) {
        return Err(ConsensusError::DifficultyNotMet {
            hash: block.hash.clone(),
            difficulty: block.difficulty,
        });
    }
    Ok(())
}

/// Check that `child` extends `parent`: previous-hash points at the parent
/// and the index advances by exactly one.
pub fn verify_link(parent: &Block, child: &Block) -> Result<(), ConsensusError> {
    if child.previous_hash != parent.hash {
        return Err(ConsensusError::BrokenLink {
            index: child.index,
            expected: parent.hash.clone(),
            actual: child.previous_hash.clone(),
        });
    }
    if child.index != parent.index + 1 {
        return Err(ConsensusError::NonSequentialIndex { parent: parent.index, child: child.index });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use artchain_primitives::{ArtPattern, GENESIS_PREVIOUS_HASH};
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use super::*;

    fn tx(id: &str, amount: f64) -> Transaction {
        Transaction {
            id: id.to_owned(),
            from: "alice".to_owned(),
            to: "bob".to_owned(),
            amount,
            timestamp: 1_700_000_000_000,
            color: "hsl(120, 70%, 60%)".to_owned(),
        }
    }

    fn mine(
        index: u64,
        previous_hash: &str,
        timestamp: u64,
        transactions: Vec<Transaction>,
        difficulty: u32,
    ) -> Block {
        let mut nonce = 0;
        loop {
            let hash = block_digest(index, previous_hash, timestamp, &transactions, nonce);
            if meets_difficulty(&hash, difficulty) {
                return Block {
                    index,
                    timestamp,
                    transactions,
                    previous_hash: previous_hash.to_owned(),
                    hash,
                    nonce,
                    difficulty,
                    art: ArtPattern { background: "#000000".to_owned(), shapes: Vec::new() },
                };
            }
            nonce += 1;
        }
    }

    #[test]
    fn digest_is_deterministic() {
        let txs = vec![tx("a1", 10.0)];
        let first = block_digest(1, "abc", 1000, &txs, 42);
        let second = block_digest(1, "abc", 1000, &txs, 42);
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn digest_depends_on_every_field() {
        let txs = vec![tx("a1", 10.0)];
        let base = block_digest(1, "abc", 1000, &txs, 42);
        assert_ne!(block_digest(2, "abc", 1000, &txs, 42), base);
        assert_ne!(block_digest(1, "abd", 1000, &txs, 42), base);
        assert_ne!(block_digest(1, "abc", 1001, &txs, 42), base);
        assert_ne!(block_digest(1, "abc", 1000, &[], 42), base);
        assert_ne!(block_digest(1, "abc", 1000, &txs, 43), base);
    }

    #[test]
    fn transaction_order_is_hashed() {
        let ab = vec![tx("a1", 10.0), tx("b2", 5.0)];
        let ba = vec![tx("b2", 5.0), tx("a1", 10.0)];
        assert_ne!(
            block_digest(1, "abc", 1000, &ab, 0),
            block_digest(1, "abc", 1000, &ba, 0)
        );
    }

    #[test]
    fn difficulty_prefix_rules() {
        assert!(meets_difficulty("00ff", 0));
        assert!(meets_difficulty("00ff", 2));
        assert!(!meets_difficulty("00ff", 3));
        assert!(!meets_difficulty("0", 2));
        assert!(meets_difficulty("", 0));
    }

    #[test]
    fn verify_accepts_mined_blocks() {
        let genesis = mine(0, GENESIS_PREVIOUS_HASH, 1000, Vec::new(), 1);
        verify_block(&genesis).unwrap();

        let next = mine(1, &genesis.hash, 2000, vec![tx("a1", 10.0)], 1);
        verify_block(&next).unwrap();
        verify_link(&genesis, &next).unwrap();
    }

    #[test]
    fn verify_rejects_tampered_amount() {
        let mut block = mine(1, "0abc", 2000, vec![tx("a1", 10.0)], 0);
        block.transactions[0].amount = 1_000_000.0;
        assert_matches!(verify_block(&block), Err(ConsensusError::HashMismatch { .. }));
    }

    #[test]
    fn verify_rejects_weak_hash() {
        let mut block = mine(1, "0abc", 2000, vec![tx("a1", 10.0)], 0);
        block.difficulty = 64;
        assert_matches!(verify_block(&block), Err(ConsensusError::DifficultyNotMet { .. }));
    }

    #[test]
    fn verify_rejects_broken_links() {
        let parent = mine(0, GENESIS_PREVIOUS_HASH, 1000, Vec::new(), 0);

        let mut child = mine(1, &parent.hash, 2000, Vec::new(), 0);
        child.previous_hash = "f".repeat(64);
        assert_matches!(verify_link(&parent, &child), Err(ConsensusError::BrokenLink { .. }));

        let skipped = mine(5, &parent.hash, 2000, Vec::new(), 0);
        assert_matches!(
            verify_link(&parent, &skipped),
            Err(ConsensusError::NonSequentialIndex { parent: 0, child: 5 })
        );
    }

    proptest! {
        #[test]
        fn digest_is_lowercase_hex(
            index in any::<u64>(),
            nonce in any::<u64>(),
            prev in "[0-9a-f]{64}",
        ) {
            let hash = block_digest(index, &prev, 0, &[], nonce);
            prop_assert_eq!(hash.len(), 64);
            prop_assert!(hash.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
        }

        #[test]
        fn predicate_agrees_with_char_prefix(hash in "[0-9a-f]{64}", difficulty in 0u32..=64) {
            let expected = hash.chars().take(difficulty as usize).all(|c| c == '0');
            prop_assert_eq!(meets_difficulty(&hash, difficulty), expected);
        }
    }
}
