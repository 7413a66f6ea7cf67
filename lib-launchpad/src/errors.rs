//! Launchpad Errors
//!
//! Every error is terminal for the invocation that raised it: the engine
//! commits no state on any `Err`, so callers observe atomic
//! all-or-nothing behavior. Retry is the caller's responsibility.

use lib_types::{Amount, Nonce, Timestamp, TokenId};
use thiserror::Error;

/// Error during launchpad operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchpadError {
    #[error("creation request expired at {expiry}, now {now}")]
    Expired { expiry: Timestamp, now: Timestamp },

    #[error("signature does not verify against the trusted signer")]
    InvalidSignature,

    #[error("nonce mismatch for creator: expected {expected}, got {got}")]
    NonceMismatch { expected: Nonce, got: Nonce },

    #[error("insufficient value attached: have {attached}, need {required}")]
    InsufficientValue { attached: Amount, required: Amount },

    #[error("unknown market: {0:?}")]
    UnknownMarket(TokenId),

    #[error("token already registered: {0:?}")]
    DuplicateToken(TokenId),

    #[error("market {0:?} has graduated; curve trading is disabled")]
    MarketGraduated(TokenId),

    #[error("slippage exceeded: quoted {quoted}, minimum {minimum}")]
    SlippageExceeded { quoted: Amount, minimum: Amount },

    #[error("wallet cap exceeded: cap {cap}, would hold {would_hold}")]
    WalletCapExceeded { cap: Amount, would_hold: Amount },

    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    #[error("market {0:?} already graduated")]
    AlreadyGraduated(TokenId),

    #[error("reentrant invocation rejected")]
    ReentrantCall,

    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    #[error("zero amount not allowed")]
    ZeroAmount,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("pool router rejected graduation: {0}")]
    RouterRejected(String),
}

/// Result type for launchpad operations
pub type LaunchpadResult<T> = Result<T, LaunchpadError>;
