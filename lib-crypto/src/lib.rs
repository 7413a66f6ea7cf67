//! Cryptographic primitives for the launchpad.
//!
//! Two concerns live here, both pure and host-independent:
//!
//! - [`hashing`]: BLAKE3 single-shot and multi-segment hashing. All
//!   identity derivation (addresses, token ids, pool ids) goes through
//!   these helpers, domain-separated by byte labels.
//! - [`signing`]: Dilithium2 detached signatures via `crystals-dilithium`,
//!   with deterministic seeded keygen so tests and the off-ledger signer
//!   service can reproduce keys exactly.

pub mod hashing;
pub mod signing;

pub use hashing::{hash_blake3, hash_blake3_multiple};
pub use signing::{address_from_public_key, verify_detached, SignerKeypair};
pub use signing::{PUBLIC_KEY_BYTES, SIGNATURE_BYTES};
