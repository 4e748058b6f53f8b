//! Artchain primitive types.
//!
//! This crate defines the data carried by the chain:
//! - [`Transaction`] and its submission draft [`TransactionRequest`]
//! - [`Block`], the mined unit linking the chain together
//! - [`ArtPattern`] and [`Shape`], the artwork derived from a block's hash
//!
//! All types are plain data with serde support. Hashing, mining, and pattern
//! derivation live in the `artchain-consensus`, `artchain-miner`, and
//! `artchain-art` crates.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod art;
pub mod block;
pub mod transaction;

pub use art::{ArtPattern, Shape};
pub use block::{Block, GENESIS_PREVIOUS_HASH};
pub use transaction::{Transaction, TransactionRequest};
