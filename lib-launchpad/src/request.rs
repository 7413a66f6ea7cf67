//! Create-Token Requests
//!
//! The request struct mirrors, field for field and in the same order, the
//! structured message the off-ledger signer service signs. Both sides must
//! agree on the canonical encoding byte-for-byte: a mismatch does not
//! crash, it silently verifies against the wrong digest.

use lib_types::{Address, Amount, Nonce, Timestamp};
use serde::{Deserialize, Serialize};

use lib_crypto::hash_blake3;

use crate::errors::{LaunchpadError, LaunchpadResult};

/// Maximum symbol length accepted at creation
pub const MAX_SYMBOL_LEN: usize = 10;

/// A signed request to create a token, constructed off-ledger.
///
/// Consumed exactly once: the nonce it carries must equal the creator's
/// current registry value at verification time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTokenRequest {
    /// Human-readable token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Expiry timestamp; the request is dead after this instant
    pub expiry: Timestamp,
    /// Creator wallet the signer authorized
    pub creator: Address,
    /// Creator's signature nonce at signing time
    pub nonce: Nonce,
    /// Creation fee the creator agreed to pay
    pub creation_fee: Amount,
    /// Optional immediate buy executed atomically with creation (0 = none)
    pub immediate_buy: Amount,
    /// Initial per-wallet balance cap for the new market
    pub wallet_cap: Amount,
    /// Dev-lockup flag; when set, the wallet cap is not enforced
    pub dev_lockup: bool,
}

impl CreateTokenRequest {
    /// Validate request fields that do not require engine state.
    pub fn validate(&self) -> LaunchpadResult<()> {
        if self.name.is_empty() {
            return Err(LaunchpadError::InvalidRequest(
                "name cannot be empty".to_string(),
            ));
        }
        if self.symbol.is_empty() {
            return Err(LaunchpadError::InvalidRequest(
                "symbol cannot be empty".to_string(),
            ));
        }
        if self.symbol.len() > MAX_SYMBOL_LEN {
            return Err(LaunchpadError::InvalidRequest(format!(
                "symbol too long (max {})",
                MAX_SYMBOL_LEN
            )));
        }
        Ok(())
    }

    /// Canonical structured-data digest for this request.
    ///
    /// Encoding: the config's 32-byte type fingerprint, then every field in
    /// declaration order. Strings are u64-LE length-prefixed, integers are
    /// u64 LE, addresses are raw 32 bytes, the flag is one byte. Every
    /// field participates; omitting one would allow a field-substitution
    /// forgery with a signature issued for a different request.
    pub fn digest(&self, type_fingerprint: &[u8; 32]) -> [u8; 32] {
        let mut buf = Vec::with_capacity(128 + self.name.len() + self.symbol.len());
        buf.extend_from_slice(type_fingerprint);
        encode_str(&mut buf, &self.name);
        encode_str(&mut buf, &self.symbol);
        buf.extend_from_slice(&self.expiry.to_le_bytes());
        buf.extend_from_slice(self.creator.as_bytes());
        buf.extend_from_slice(&self.nonce.to_le_bytes());
        buf.extend_from_slice(&self.creation_fee.to_le_bytes());
        buf.extend_from_slice(&self.immediate_buy.to_le_bytes());
        buf.extend_from_slice(&self.wallet_cap.to_le_bytes());
        buf.push(self.dev_lockup as u8);
        hash_blake3(&buf)
    }
}

fn encode_str(buf: &mut Vec<u8>, value: &str) {
    buf.extend_from_slice(&(value.len() as u64).to_le_bytes());
    buf.extend_from_slice(value.as_bytes());
}
