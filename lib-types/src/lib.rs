//! Canonical primitive types for the launchpad engine.
//!
//! Rule: no String identifiers in engine state. Ever.
//!
//! Every identity that the engine persists is a fixed-size, copyable,
//! deterministically serializable newtype defined here:
//!
//! - [`Address`]: wallet / program identity (32 bytes, derived from a public key)
//! - [`TokenId`]: issued token identity
//! - [`PoolId`]: derived external-pool identity
//! - [`Amount`], [`Bps`], [`Timestamp`], [`Nonce`]: scalar aliases

pub mod primitives;

pub use primitives::*;
