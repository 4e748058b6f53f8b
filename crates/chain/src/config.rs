//! Chain configuration.

use artchain_miner::MiningConfig;

/// Difficulty the chain mines at unless configured otherwise.
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Chain-wide settings.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Leading zero characters every block hash must carry.
    pub difficulty: u32,
    /// Worker settings for the nonce search.
    pub mining: MiningConfig,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainConfig {
    /// Config at [`DEFAULT_DIFFICULTY`] with a default worker.
    pub fn new() -> Self {
        Self { difficulty: DEFAULT_DIFFICULTY, mining: MiningConfig::default() }
    }

    /// Config for fast local chains: difficulty 1.
    pub fn dev() -> Self {
        Self { difficulty: 1, ..Self::new() }
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the worker settings.
    pub fn with_mining(mut self, mining: MiningConfig) -> Self {
        self.mining = mining;
        self
    }
}
