//! Chain-owning service.
//!
//! ```text
//!            commands                          mined blocks
//! Handle ──────────────▶  ChainService  ──────────────────▶ subscriber
//!                         ├ Blockchain (verified store)
//!                         ├ pending pool
//!                         └ ChainAssembler (mining worker)
//! ```
//!
//! One actor owns the chain, the pending pool, and the mining flag, so
//! every mutation is serialized through its loop. While a search runs the
//! loop keeps serving commands: submissions are admitted into the pool and
//! cancellation reaches the worker mid-search instead of waiting for the
//! block.

use std::pin::pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use artchain_miner::MiningError;
use artchain_primitives::{Block, Transaction, TransactionRequest};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::{ChainAssembler, ChainConfig, ChainError, chain::Blockchain, unix_millis};

/// Commands accepted by the service.
#[derive(Debug)]
pub enum ChainCommand {
    /// Admit a transaction into the pending pool.
    SubmitTransaction(TransactionRequest),
    /// Mine the pending pool into the next block.
    MineBlock,
    /// Interrupt the search in flight.
    CancelMining,
    /// Stop the service loop.
    Shutdown,
}

/// Handle to drive a [`ChainService`].
#[derive(Debug, Clone)]
pub struct ChainServiceHandle {
    tx: mpsc::Sender<ChainCommand>,
    mining: Arc<AtomicBool>,
}

impl ChainServiceHandle {
    /// Whether a search is running right now.
    pub fn is_mining(&self) -> bool {
        self.mining.load(Ordering::Relaxed)
    }

    /// Submit a transaction for the next block.
    ///
    /// The service assigns the id and timestamp. Accepted while mining;
    /// the transaction waits for the following block.
    pub async fn submit_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<(), mpsc::error::SendError<ChainCommand>> {
        self.tx.send(ChainCommand::SubmitTransaction(request)).await
    }

    /// Mine the pending pool into the next block.
    pub async fn mine_block(&self) -> Result<(), mpsc::error::SendError<ChainCommand>> {
        self.tx.send(ChainCommand::MineBlock).await
    }

    /// Interrupt the search in flight, if any.
    pub async fn cancel_mining(&self) -> Result<(), mpsc::error::SendError<ChainCommand>> {
        self.tx.send(ChainCommand::CancelMining).await
    }

    /// Stop the service.
    pub async fn shutdown(&self) -> Result<(), mpsc::error::SendError<ChainCommand>> {
        self.tx.send(ChainCommand::Shutdown).await
    }
}

/// Actor owning the chain, the pending pool, and the miner.
#[derive(Debug)]
pub struct ChainService {
    rx: mpsc::Receiver<ChainCommand>,
    block_tx: mpsc::Sender<Block>,
    mining: Arc<AtomicBool>,
    chain: Blockchain,
    pending: Vec<Transaction>,
    assembler: ChainAssembler,
}

impl ChainService {
    /// Create a service, its command handle, and the mined-block stream.
    pub fn new(config: ChainConfig) -> (Self, ChainServiceHandle, mpsc::Receiver<Block>) {
        let (tx, rx) = mpsc::channel(16);
        let (block_tx, block_rx) = mpsc::channel(16);
        let mining = Arc::new(AtomicBool::new(false));

        let service = Self {
            rx,
            block_tx,
            mining: Arc::clone(&mining),
            chain: Blockchain::new(),
            pending: Vec::new(),
            assembler: ChainAssembler::new(config),
        };
        let handle = ChainServiceHandle { tx, mining };

        (service, handle, block_rx)
    }

    /// Run the service loop.
    ///
    /// Mines the genesis block first, then serves commands until `Shutdown`
    /// arrives or every handle is dropped. Each appended block is emitted
    /// on the mined-block stream.
    pub async fn run(mut self) {
        info!(
            target: "artchain::service",
            difficulty = self.assembler.config().difficulty,
            "Chain service started"
        );

        // The chain starts from its own genesis, mined before the first
        // command is served.
        let mut shutdown = self.mine_and_append(None).await;

        while !shutdown {
            let Some(command) = self.rx.recv().await else { break };
            match command {
                ChainCommand::SubmitTransaction(request) => {
                    Self::admit(&mut self.pending, request);
                }
                ChainCommand::MineBlock => {
                    if self.pending.is_empty() {
                        warn!(
                            target: "artchain::service",
                            "No pending transactions, skipping mining"
                        );
                        continue;
                    }
                    let batch = self.pending.clone();
                    shutdown = self.mine_and_append(Some(batch)).await;
                }
                ChainCommand::CancelMining => {
                    debug!(target: "artchain::service", "No mining in progress");
                }
                ChainCommand::Shutdown => break,
            }
        }

        info!(target: "artchain::service", "Chain service stopped");
    }

    /// Mine one block (genesis when `batch` is `None`) while continuing to
    /// serve commands, then append and emit it on success.
    ///
    /// Returns whether shutdown was requested while mining.
    async fn mine_and_append(&mut self, batch: Option<Vec<Transaction>>) -> bool {
        self.mining.store(true, Ordering::SeqCst);
        let mut shutdown = false;

        let outcome = {
            let assembler = &self.assembler;
            let chain = &self.chain;
            let mut search = pin!(async move {
                match batch {
                    None => assembler.create_genesis_block_async().await,
                    Some(batch) => assembler.next_block_async(chain, batch).await,
                }
            });

            loop {
                if shutdown {
                    // cancel has been signalled; drain the search
                    break (&mut search).await;
                }
                tokio::select! {
                    outcome = &mut search => break outcome,
                    maybe = self.rx.recv() => match maybe {
                        Some(ChainCommand::SubmitTransaction(request)) => {
                            Self::admit(&mut self.pending, request);
                        }
                        Some(ChainCommand::MineBlock) => {
                            warn!(
                                target: "artchain::service",
                                "Mining already in progress, skipping"
                            );
                        }
                        Some(ChainCommand::CancelMining) => {
                            debug!(target: "artchain::service", "Cancelling mining");
                            self.assembler.worker().cancel();
                        }
                        Some(ChainCommand::Shutdown) | None => {
                            self.assembler.worker().cancel();
                            shutdown = true;
                        }
                    },
                }
            }
        };

        self.mining.store(false, Ordering::SeqCst);

        match outcome {
            Ok(block) => match self.chain.push(block.clone()) {
                Ok(()) => {
                    // drop only what the block included; submissions that
                    // arrived mid-search stay pooled
                    self.pending.retain(|tx| {
                        !block.transactions.iter().any(|included| included.id == tx.id)
                    });
                    if let Err(err) = self.block_tx.send(block).await {
                        error!(
                            target: "artchain::service",
                            error = %err,
                            "Failed to deliver mined block"
                        );
                    }
                }
                Err(err) => {
                    error!(
                        target: "artchain::service",
                        error = %err,
                        "Mined block failed verification"
                    );
                }
            },
            Err(ChainError::Mining(MiningError::Cancelled)) => {
                debug!(target: "artchain::service", "Mining cancelled, draft discarded");
            }
            Err(err) => {
                warn!(target: "artchain::service", error = %err, "Mining failed");
            }
        }

        shutdown
    }

    fn admit(pool: &mut Vec<Transaction>, request: TransactionRequest) {
        let id = artchain_identity::transaction_id(&mut rand::thread_rng());
        let transaction = Transaction::from_request(request, id, unix_millis());
        info!(
            target: "artchain::service",
            id = %transaction.id,
            from = %transaction.from,
            to = %transaction.to,
            amount = transaction.amount,
            "Transaction admitted"
        );
        pool.push(transaction);
    }
}

/// Spawn the service as a background task.
pub fn spawn_chain_service(config: ChainConfig) -> (ChainServiceHandle, mpsc::Receiver<Block>) {
    let (service, handle, block_rx) = ChainService::new(config);
    tokio::spawn(service.run());
    (handle, block_rx)
}
