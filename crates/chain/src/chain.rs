//! Verified block store.

use artchain_consensus::{verify_block, verify_link};
use artchain_primitives::Block;
use tracing::info;

use crate::ChainError;

/// Append-only chain of verified blocks.
///
/// Every push re-checks the candidate against the current tip, so whatever
/// this structure holds is valid end to end. Blocks are never removed or
/// reordered; a reader sees the old tip or the new tip, nothing in between.
#[derive(Debug, Default)]
pub struct Blockchain {
    blocks: Vec<Block>,
}

impl Blockchain {
    /// Empty chain.
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Append a block after verifying it against the current tip.
    ///
    /// The first block must have the genesis shape. Later blocks must link
    /// to the tip and verify on their own. A rejected block leaves the
    /// chain untouched.
    pub fn push(&mut self, block: Block) -> Result<(), ChainError> {
        match self.tip() {
            None => {
                if !block.is_genesis() {
                    return Err(ChainError::NotGenesis { index: block.index });
                }
            }
            Some(tip) => verify_link(tip, &block)?,
        }
        verify_block(&block)?;

        info!(
            target: "artchain::chain",
            block = block.index,
            hash = %block.hash,
            transactions = block.transactions.len(),
            "Block appended"
        );
        self.blocks.push(block);
        Ok(())
    }

    /// Re-verify every block and link from genesis to the tip.
    pub fn validate(&self) -> Result<(), ChainError> {
        for (i, block) in self.blocks.iter().enumerate() {
            if i == 0 {
                if !block.is_genesis() {
                    return Err(ChainError::NotGenesis { index: block.index });
                }
            } else {
                verify_link(&self.blocks[i - 1], block)?;
            }
            verify_block(block)?;
        }
        Ok(())
    }

    /// The newest block, if any.
    pub fn tip(&self) -> Option<&Block> {
        self.blocks.last()
    }

    /// Block at `index`.
    pub fn get(&self, index: u64) -> Option<&Block> {
        self.blocks.get(usize::try_from(index).ok()?)
    }

    /// All blocks, oldest first.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the chain holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
