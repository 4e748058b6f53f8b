//! Chain assembly and the mining service.
//!
//! [`Blockchain`] is the verified append-only store, [`ChainAssembler`]
//! walks pending transactions through the draft, mine, derive, seal
//! pipeline, and [`ChainService`] wraps both in an actor that owns the
//! pending pool and serves commands over a channel.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod assembler;
pub mod chain;
pub mod config;
pub mod service;

pub use assembler::ChainAssembler;
pub use chain::Blockchain;
pub use config::ChainConfig;
pub use service::{ChainCommand, ChainService, ChainServiceHandle, spawn_chain_service};

use std::time::{SystemTime, UNIX_EPOCH};

use artchain_art::ArtError;
use artchain_consensus::ConsensusError;
use artchain_miner::MiningError;
use thiserror::Error;

/// Chain assembly errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// Mining was requested with nothing to include.
    #[error("no pending transactions to mine")]
    NoPendingTransactions,

    /// A block beyond genesis was requested on an empty chain.
    #[error("chain has no genesis block")]
    MissingGenesis,

    /// The first pushed block does not have the genesis shape.
    #[error("first block must be genesis, got index {index}")]
    NotGenesis {
        /// Index carried by the rejected block.
        index: u64,
    },

    /// Block or link verification failed.
    #[error("consensus error: {0}")]
    Consensus(#[from] ConsensusError),

    /// The proof-of-work search ended without a solution.
    #[error("mining error: {0}")]
    Mining(#[from] MiningError),

    /// Artwork derivation failed.
    #[error("art error: {0}")]
    Art(#[from] ArtError),
}

/// Milliseconds since the Unix epoch.
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock set before the Unix epoch")
        .as_millis() as u64
}
