//! Mining worker.
//!
//! Sequential nonce search starting at zero, so the result is always the
//! first satisfying nonce and rerunning the same template reproduces it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use artchain_consensus::meets_difficulty;
use tracing::{debug, info};

use crate::{BlockTemplate, MiningError};

/// Mining configuration.
#[derive(Debug, Clone)]
pub struct MiningConfig {
    /// Nonces to try per batch before checking for cancellation.
    pub batch_size: u64,
    /// Maximum time to mine before giving up (`None` = forever).
    pub max_duration: Option<Duration>,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self { batch_size: 10_000, max_duration: None }
    }
}

/// Result of a successful search.
#[derive(Debug, Clone)]
pub struct MiningResult {
    /// The winning hash, 64 lowercase hex characters.
    pub hash: String,
    /// The smallest nonce whose digest meets the difficulty.
    pub nonce: u64,
    /// Number of hashes computed.
    pub hashes_computed: u64,
    /// Time taken to find the solution.
    pub duration: Duration,
}

impl MiningResult {
    /// Hashrate in H/s.
    pub fn hashrate(&self) -> f64 {
        self.hashes_computed as f64 / self.duration.as_secs_f64()
    }
}

/// Worker that searches nonces for a block template.
///
/// The cancel flag and hash counter are shared with clones handed to the
/// blocking pool, so `cancel` reaches a search already in flight.
#[derive(Debug)]
pub struct MiningWorker {
    config: MiningConfig,
    cancelled: Arc<AtomicBool>,
    total_hashes: Arc<AtomicU64>,
}

impl MiningWorker {
    /// Create a new mining worker.
    pub fn new(config: MiningConfig) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
            total_hashes: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Cancel the ongoing search. Takes effect at the next batch boundary.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Clear the cancellation flag and the hash counter.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
        self.total_hashes.store(0, Ordering::SeqCst);
    }

    /// Hashes computed since the last reset.
    pub fn hash_count(&self) -> u64 {
        self.total_hashes.load(Ordering::Relaxed)
    }

    /// Search for the first nonce whose digest meets the template's
    /// difficulty (blocking).
    ///
    /// There is no upper bound on how long this takes at high difficulty.
    /// Set `max_duration`, or keep a handle on the worker so `cancel` can
    /// reach it.
    pub fn mine(&self, template: &BlockTemplate) -> Result<MiningResult, MiningError> {
        let start = Instant::now();

        info!(
            target: "artchain::miner",
            block = template.index,
            difficulty = template.difficulty,
            transactions = template.transactions.len(),
            "Starting mining"
        );

        let mut nonce: u64 = 0;

        loop {
            // Check cancellation
            if self.cancelled.load(Ordering::Relaxed) {
                debug!(target: "artchain::miner", block = template.index, nonce, "Mining cancelled");
                return Err(MiningError::Cancelled);
            }

            // Check timeout
            if let Some(max_duration) = self.config.max_duration {
                let elapsed = start.elapsed();
                if elapsed > max_duration {
                    debug!(target: "artchain::miner", block = template.index, nonce, "Mining timed out");
                    return Err(MiningError::TimedOut {
                        attempts: nonce,
                        elapsed_ms: elapsed.as_millis() as u64,
                    });
                }
            }

            // Try a batch of nonces
            for _ in 0..self.config.batch_size {
                let hash = template.digest(nonce);
                self.total_hashes.fetch_add(1, Ordering::Relaxed);

                if meets_difficulty(&hash, template.difficulty) {
                    let duration = start.elapsed();
                    let hashes = self.total_hashes.load(Ordering::Relaxed);

                    info!(
                        target: "artchain::miner",
                        block = template.index,
                        nonce,
                        hashes,
                        duration_ms = duration.as_millis(),
                        hashrate = hashes as f64 / duration.as_secs_f64(),
                        "Block mined"
                    );

                    return Ok(MiningResult { hash, nonce, hashes_computed: hashes, duration });
                }

                nonce += 1;
            }

            // Log progress periodically
            let hashes = self.total_hashes.load(Ordering::Relaxed);
            if hashes % 100_000 == 0 {
                let hashrate = hashes as f64 / start.elapsed().as_secs_f64();
                debug!(
                    target: "artchain::miner",
                    hashes,
                    hashrate = format!("{hashrate:.2} H/s"),
                    "Mining in progress"
                );
            }
        }
    }

    /// Run [`mine`](Self::mine) on the blocking thread pool.
    ///
    /// The spawned search shares this worker's cancel flag, so `cancel`
    /// still interrupts it.
    pub async fn mine_async(&self, template: BlockTemplate) -> Result<MiningResult, MiningError> {
        let worker = self.share();
        tokio::task::spawn_blocking(move || worker.mine(&template))
            .await
            .map_err(|_| MiningError::Cancelled)?
    }

    /// Worker backed by the same config, cancel flag, and counter.
    fn share(&self) -> Self {
        Self {
            config: self.config.clone(),
            cancelled: Arc::clone(&self.cancelled),
            total_hashes: Arc::clone(&self.total_hashes),
        }
    }
}
