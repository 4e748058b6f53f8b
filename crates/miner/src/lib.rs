//! CPU proof-of-work miner.
//!
//! ```text
//! BlockTemplate ──▶ nonce search (batched, cancellable) ──▶ MiningResult
//!      │                                                         │
//!      └────────── into_block(hash, nonce, art) ◀── caller ◀─────┘
//! ```
//!
//! [`MiningWorker`] owns the loop: nonces from 0 upward, one digest per
//! attempt, cancellation and deadline checks at batch boundaries. The
//! template never touches chain state; sealing and appending stay with the
//! caller.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod template;
pub mod worker;

pub use template::BlockTemplate;
pub use worker::{MiningConfig, MiningResult, MiningWorker};

use thiserror::Error;

/// Mining errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MiningError {
    /// The search was cancelled before a solution was found.
    #[error("mining cancelled")]
    Cancelled,

    /// The configured deadline passed before a solution was found.
    #[error("no solution after {attempts} nonces in {elapsed_ms} ms")]
    TimedOut { attempts: u64, elapsed_ms: u64 },
}
