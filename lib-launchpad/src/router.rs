//! External Pool Router
//!
//! The graduation handoff is the engine's only outward call. The router
//! is a trait seam so the engine stays testable without any pool protocol
//! actually existing; pool identity derivation is a pure function of the
//! program identity, the token, and the configured fingerprint — no
//! external lookup.

use lib_types::{Address, Amount, PoolId, TokenId};
use thiserror::Error;

use lib_crypto::hash_blake3_multiple;

/// Domain label for pool derivation. Changing it is a breaking change to
/// every previously derived pool identity.
const POOL_DERIVATION_LABEL: &[u8] = b"launchpad:pool:v1";

/// Error reported by a pool router implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RouterError(pub String);

/// Interface to the external constant-product pool protocol.
///
/// `seed_pool` receives both legs of the graduation handoff atomically;
/// an `Err` aborts the entire enclosing invocation, including the buy
/// that triggered graduation.
pub trait PoolRouter {
    fn seed_pool(
        &mut self,
        pool: PoolId,
        token: TokenId,
        token_amount: Amount,
        base_amount: Amount,
    ) -> Result<(), RouterError>;
}

/// Derive the external pool's identity for a graduating token.
///
/// Pure hash over (program identity ‖ token identity ‖ pool-init
/// fingerprint); all segments are fixed-size, so the encoding is
/// unambiguous without length prefixes.
pub fn derive_pool_id(program: &Address, token: &TokenId, init_fingerprint: &[u8; 32]) -> PoolId {
    PoolId::new(hash_blake3_multiple(&[
        POOL_DERIVATION_LABEL,
        program.as_bytes(),
        token.as_bytes(),
        init_fingerprint,
    ]))
}
