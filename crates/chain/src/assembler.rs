//! Block assembly.
//!
//! The assembler owns the mining worker and walks one block through the
//! draft, mine, derive, seal pipeline. It never touches chain state; the
//! finished block goes back to the caller, and appending stays the
//! caller's decision.

use artchain_art::derive_pattern;
use artchain_miner::{BlockTemplate, MiningResult, MiningWorker};
use artchain_primitives::{Block, Transaction};
use tracing::info;

use crate::{ChainConfig, ChainError, chain::Blockchain, unix_millis};

/// Builds mined blocks under a [`ChainConfig`].
#[derive(Debug)]
pub struct ChainAssembler {
    config: ChainConfig,
    worker: MiningWorker,
}

impl ChainAssembler {
    /// Create an assembler with its own worker.
    pub fn new(config: ChainConfig) -> Self {
        let worker = MiningWorker::new(config.mining.clone());
        Self { config, worker }
    }

    /// The worker, for cancellation from another task.
    pub fn worker(&self) -> &MiningWorker {
        &self.worker
    }

    /// The configuration this assembler mines under.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Mine the genesis block at the current time (blocking).
    pub fn create_genesis_block(&self) -> Result<Block, ChainError> {
        let template = BlockTemplate::genesis(unix_millis(), self.config.difficulty);
        self.worker.reset();
        let result = self.worker.mine(&template)?;
        Self::seal(template, result)
    }

    /// Mine the genesis block on the blocking pool.
    pub async fn create_genesis_block_async(&self) -> Result<Block, ChainError> {
        let template = BlockTemplate::genesis(unix_millis(), self.config.difficulty);
        self.worker.reset();
        let result = self.worker.mine_async(template.clone()).await?;
        Self::seal(template, result)
    }

    /// Mine the block extending the chain's tip with `pending` (blocking).
    ///
    /// Fails up front on an empty pending list or an empty chain. The chain
    /// itself is not modified; appending the result is the caller's job.
    pub fn next_block(
        &self,
        chain: &Blockchain,
        pending: Vec<Transaction>,
    ) -> Result<Block, ChainError> {
        let template = self.next_template(chain, pending)?;
        self.worker.reset();
        let result = self.worker.mine(&template)?;
        Self::seal(template, result)
    }

    /// Mine the block extending the chain's tip on the blocking pool.
    pub async fn next_block_async(
        &self,
        chain: &Blockchain,
        pending: Vec<Transaction>,
    ) -> Result<Block, ChainError> {
        let template = self.next_template(chain, pending)?;
        self.worker.reset();
        let result = self.worker.mine_async(template.clone()).await?;
        Self::seal(template, result)
    }

    fn next_template(
        &self,
        chain: &Blockchain,
        pending: Vec<Transaction>,
    ) -> Result<BlockTemplate, ChainError> {
        if pending.is_empty() {
            return Err(ChainError::NoPendingTransactions);
        }
        let tip = chain.tip().ok_or(ChainError::MissingGenesis)?;
        Ok(BlockTemplate::next(tip, unix_millis(), pending, self.config.difficulty))
    }

    fn seal(template: BlockTemplate, result: MiningResult) -> Result<Block, ChainError> {
        let art = derive_pattern(&template.transactions, &result.hash)?;
        let block = template.into_block(result.hash, result.nonce, art);
        info!(
            target: "artchain::chain",
            block = block.index,
            hash = %block.hash,
            nonce = block.nonce,
            "Block sealed"
        );
        Ok(block)
    }
}
