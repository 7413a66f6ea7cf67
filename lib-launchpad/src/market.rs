//! Markets and the Market Registry
//!
//! One `Market` per issued token, owned exclusively by the registry.
//! No external component mutates a Market directly; all mutation flows
//! through the engine's trade and graduation paths.
//!
//! # State Machine
//! ```text
//!   ┌─────────┐   curve allocation exhausted   ┌───────────┐
//!   │ Trading │ ─────────────────────────────▶ │ Graduated │
//!   └─────────┘        (irreversible)          └───────────┘
//! ```

use lib_types::{Address, Amount, PoolId, Timestamp, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::LaunchpadConfig;
use crate::errors::{LaunchpadError, LaunchpadResult};
use crate::request::CreateTokenRequest;

/// Market lifecycle phase; the transition is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketPhase {
    /// Bonding-curve pricing active
    Trading,
    /// Reserves handed off to the external pool, curve disabled forever
    Graduated,
}

impl MarketPhase {
    /// Check if the market has graduated
    pub fn is_graduated(&self) -> bool {
        matches!(self, MarketPhase::Graduated)
    }
}

impl std::fmt::Display for MarketPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketPhase::Trading => write!(f, "trading"),
            MarketPhase::Graduated => write!(f, "graduated"),
        }
    }
}

/// Per-token market record.
///
/// Invariant: `curve_reserve + graduation_reserve + tokens held by
/// traders == total supply fixed at creation`. The engine's trade paths
/// preserve it by moving tokens only between the curve and the balance
/// book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    /// Issued token identity
    pub token_id: TokenId,
    /// Creator wallet the signer authorized
    pub creator: Address,
    /// Virtual base-asset reserve; adjusted by every trade
    pub virtual_base: Amount,
    /// Tokens still held by the bonding curve
    pub curve_reserve: Amount,
    /// Tokens reserved for the graduation handoff; never partially spent
    pub graduation_reserve: Amount,
    /// Per-wallet balance cap
    pub wallet_cap: Amount,
    /// Whether the cap is enforced (dev-lockup suppresses it)
    pub cap_enforced: bool,
    /// Trading fees accumulated by this market, in base-asset units
    pub fee_balance: Amount,
    /// Lifecycle phase
    pub phase: MarketPhase,
    /// External pool identity, populated at graduation
    pub pool_id: Option<PoolId>,
    /// Creation timestamp
    pub created_at: Timestamp,
}

impl Market {
    /// Open a fresh market seeded from the config and the creation request.
    pub fn open(
        token_id: TokenId,
        config: &LaunchpadConfig,
        request: &CreateTokenRequest,
        now: Timestamp,
    ) -> Self {
        Self {
            token_id,
            creator: request.creator,
            virtual_base: config.initial_virtual_base,
            curve_reserve: config.curve_allocation,
            graduation_reserve: config.graduation_allocation,
            wallet_cap: request.wallet_cap,
            cap_enforced: !request.dev_lockup,
            fee_balance: 0,
            phase: MarketPhase::Trading,
            pool_id: None,
            created_at: now,
        }
    }

    /// Fail with `MarketGraduated` unless curve trading is still active.
    pub fn require_trading(&self) -> LaunchpadResult<()> {
        if self.phase.is_graduated() {
            return Err(LaunchpadError::MarketGraduated(self.token_id));
        }
        Ok(())
    }
}

/// Registry of all markets, keyed by token identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRegistry {
    markets: HashMap<TokenId, Market>,
    total_created: u64,
    total_graduated: u64,
}

impl MarketRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new market; each token id is registered at most once.
    pub fn insert(&mut self, market: Market) -> LaunchpadResult<()> {
        if self.markets.contains_key(&market.token_id) {
            return Err(LaunchpadError::DuplicateToken(market.token_id));
        }
        if market.phase.is_graduated() {
            self.total_graduated += 1;
        }
        self.markets.insert(market.token_id, market);
        self.total_created += 1;
        Ok(())
    }

    /// Get a market by token id
    pub fn get(&self, token_id: &TokenId) -> Option<&Market> {
        self.markets.get(token_id)
    }

    /// Get a mutable market by token id
    pub fn get_mut(&mut self, token_id: &TokenId) -> Option<&mut Market> {
        self.markets.get_mut(token_id)
    }

    /// Check if a token id is registered
    pub fn contains(&self, token_id: &TokenId) -> bool {
        self.markets.contains_key(token_id)
    }

    /// Record a graduation for the stats counters
    pub fn note_graduated(&mut self) {
        self.total_graduated += 1;
    }

    /// Registry statistics
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            total_created: self.total_created,
            trading: self.total_created - self.total_graduated,
            graduated: self.total_graduated,
        }
    }
}

/// Registry statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub total_created: u64,
    pub trading: u64,
    pub graduated: u64,
}
