//! Signature-Gated Token Launchpad
//!
//! A bonding-curve token factory with a one-way graduation handoff to an
//! external liquidity pool. Token creation is gated by an off-system
//! signer service: every creation request carries a structured-message
//! signature checked against the configured signer key, with per-creator
//! nonces for replay protection.
//!
//! # Architecture
//!
//! - [`engine::Launchpad`] owns all state and exposes the three
//!   operations: `create_token`, `buy`, `sell`
//! - [`curve`] prices trades on a constant-product curve with virtual
//!   base reserves
//! - [`auth`] + [`nonces`] gate creation behind the trusted signer
//! - [`router::PoolRouter`] is the seam to the external pool protocol;
//!   graduation seeds a pool through it and retires the curve forever
//!
//! Every operation is atomic: all checks run before any state is
//! written, and the single outward call (the router) happens before the
//! commit, so a failure anywhere rolls back the whole invocation.

pub mod auth;
pub mod balances;
pub mod config;
pub mod curve;
pub mod engine;
pub mod errors;
pub mod events;
pub mod market;
pub mod nonces;
pub mod request;
pub mod router;

pub use config::LaunchpadConfig;
pub use engine::{BuyReceipt, CreateReceipt, Launchpad, SellReceipt};
pub use errors::{LaunchpadError, LaunchpadResult};
pub use events::LaunchpadEvent;
pub use market::{Market, MarketPhase, RegistryStats};
pub use request::CreateTokenRequest;
pub use router::{PoolRouter, RouterError};
