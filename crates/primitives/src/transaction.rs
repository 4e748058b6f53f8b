//! Transaction types.
//!
//! A [`Transaction`] is immutable once created: it sits in the pending pool
//! until a mined block includes it, and is never touched afterwards. The
//! serialized field order is part of the canonical form hashed into blocks,
//! so the field declaration order below must not change.

use serde::{Deserialize, Serialize};

/// A value transfer recorded on the chain.
///
/// The serde field order (`id`, `from`, `to`, `amount`, `timestamp`,
/// `color`) is the canonical serialization order used for block hashing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Short random identifier assigned when the transaction is admitted.
    pub id: String,
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Transferred amount (non-negative).
    pub amount: f64,
    /// Admission time in milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// Display color used when the transaction is drawn into block artwork.
    pub color: String,
}

/// A transaction submission before admission.
///
/// Carries what a sender provides; the chain assigns the identifier and the
/// timestamp when the request is admitted into the pending pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Transferred amount (non-negative).
    pub amount: f64,
    /// Display color chosen at submission time.
    pub color: String,
}

impl Transaction {
    /// Complete a submission with an identifier and an admission timestamp.
    pub fn from_request(request: TransactionRequest, id: String, timestamp: u64) -> Self {
        Self {
            id,
            from: request.from,
            to: request.to,
            amount: request.amount,
            timestamp,
            color: request.color,
        }
    }
}
