//! Participant identities and transaction ids.
//!
//! An [`Identity`] is a pair of hex strings cut from the same 32 random
//! bytes. The two halves share no mathematical relationship: this is NOT a
//! keypair, nothing can be signed with it and nothing verified against it.
//! It gives participants stable, shareable labels and nothing more.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Length of the public half in hex characters.
pub const PUBLIC_ADDRESS_LEN: usize = 40;

/// Random bytes drawn per identity (64 hex characters).
pub const SEED_BYTES: usize = 32;

/// A participant's address pair.
///
/// Not a cryptographic keypair; see the crate docs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// First 40 hex characters of the seed, shared openly.
    pub public_address: String,
    /// Remaining 24 hex characters, kept by the owner.
    pub private_address: String,
}

impl Identity {
    /// Generate an identity from the given randomness source.
    ///
    /// The `CryptoRng` bound covers the quality of the bytes, not any
    /// signing capability.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut seed = [0u8; SEED_BYTES];
        rng.fill_bytes(&mut seed);
        let encoded = hex::encode(seed);
        let (public_address, private_address) = encoded.split_at(PUBLIC_ADDRESS_LEN);
        Self {
            public_address: public_address.to_owned(),
            private_address: private_address.to_owned(),
        }
    }

    /// Generate an identity from the thread-local RNG.
    pub fn random() -> Self {
        Self::generate(&mut rand::thread_rng())
    }
}

/// Random 9-character base-36 transaction id.
pub fn transaction_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..9).map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char).collect()
}
