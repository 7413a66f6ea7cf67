//! Launchpad Events
//!
//! Every committed state change emits an event. The engine keeps an
//! in-order log that indexers drain; failed invocations emit nothing.

use lib_types::{Address, Amount, PoolId, Timestamp, TokenId};
use serde::{Deserialize, Serialize};

/// Launchpad state-change events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchpadEvent {
    /// New token issued and market opened
    TokenCreated {
        token_id: TokenId,
        creator: Address,
        name: String,
        symbol: String,
        /// Per-wallet cap (unenforced when `cap_enforced` is false)
        wallet_cap: Amount,
        cap_enforced: bool,
        creation_fee: Amount,
        timestamp: Timestamp,
    },

    /// Tokens bought from the curve
    TokensPurchased {
        token_id: TokenId,
        buyer: Address,
        /// Base asset paid, fee included
        base_in: Amount,
        /// Fee skimmed from the input
        fee: Amount,
        tokens_out: Amount,
        timestamp: Timestamp,
    },

    /// Tokens sold back to the curve
    TokensSold {
        token_id: TokenId,
        seller: Address,
        tokens_in: Amount,
        /// Base asset paid out, after the fee
        base_out: Amount,
        /// Fee skimmed from the gross proceeds
        fee: Amount,
        timestamp: Timestamp,
    },

    /// Market graduated: reserves handed off to the external pool
    Graduated {
        token_id: TokenId,
        pool_id: PoolId,
        /// Graduation-reserved tokens transferred to the pool
        token_leg: Amount,
        /// Base-asset reserve transferred to the pool
        base_leg: Amount,
        timestamp: Timestamp,
    },
}
