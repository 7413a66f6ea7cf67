//! Dilithium2 detached signatures for creation-request authorization.
//!
//! The launchpad's trusted signer service signs the canonical request
//! digest off-ledger; the engine verifies the detached signature against
//! the configured public key. Keygen accepts an optional seed so the
//! signer service and tests can derive the same keypair deterministically.

use anyhow::{anyhow, Result};
use crystals_dilithium::dilithium2::{
    Keypair as Dilithium2Keypair, PublicKey as Dilithium2PublicKey,
    SecretKey as Dilithium2SecretKey, PUBLICKEYBYTES, SIGNBYTES,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::hashing::hash_blake3;

/// Dilithium2 public key size in bytes
pub const PUBLIC_KEY_BYTES: usize = PUBLICKEYBYTES;

/// Dilithium2 detached signature size in bytes
pub const SIGNATURE_BYTES: usize = SIGNBYTES;

/// Signer keypair bytes (Dilithium2, crystals-dilithium encoding).
///
/// Zeroized on drop; the secret key never leaves this struct.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SignerKeypair {
    public_key: Vec<u8>,
    secret_key: Vec<u8>,
}

impl SignerKeypair {
    /// Generate a keypair, deterministically when a seed is supplied.
    pub fn generate(seed: Option<&[u8]>) -> Self {
        let keypair = Dilithium2Keypair::generate(seed);
        Self {
            public_key: keypair.public.to_bytes().to_vec(),
            secret_key: keypair.secret.to_bytes().to_vec(),
        }
    }

    /// The public key bytes to register as the trusted signer identity.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// The 32-byte address derived from this keypair's public key.
    pub fn address(&self) -> [u8; 32] {
        address_from_public_key(&self.public_key)
    }

    /// Produce a detached signature over `message`.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        let sk = Dilithium2SecretKey::from_bytes(&self.secret_key);
        sk.sign(message).to_vec()
    }
}

/// Verify a detached signature against a public key.
///
/// Returns `Ok(false)` for a well-formed signature that does not verify;
/// `Err` only for malformed inputs (wrong key or signature length).
pub fn verify_detached(message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<bool> {
    if public_key.len() != PUBLIC_KEY_BYTES {
        return Err(anyhow!(
            "invalid public key length: {} (expected {})",
            public_key.len(),
            PUBLIC_KEY_BYTES
        ));
    }
    if signature.len() != SIGNATURE_BYTES {
        return Err(anyhow!(
            "invalid signature length: {} (expected {})",
            signature.len(),
            SIGNATURE_BYTES
        ));
    }

    let pk = Dilithium2PublicKey::from_bytes(public_key);
    let mut sig_arr = [0u8; SIGNATURE_BYTES];
    sig_arr.copy_from_slice(signature);

    Ok(pk.verify(message, &sig_arr))
}

/// Derive a 32-byte address from a public key.
pub fn address_from_public_key(public_key: &[u8]) -> [u8; 32] {
    hash_blake3(public_key)
}
