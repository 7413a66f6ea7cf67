//! Nonce Registry
//!
//! Per-creator strictly monotonic counters for replay protection of
//! signed creation requests. The execution model serializes invocations,
//! so `consume` is a plain compare-and-increment.

use lib_types::{Address, Nonce};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{LaunchpadError, LaunchpadResult};

/// Per-creator next-valid-nonce registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceRegistry {
    nonces: HashMap<Address, Nonce>,
}

impl NonceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The next valid nonce for a creator (0 if never seen)
    pub fn current(&self, creator: &Address) -> Nonce {
        self.nonces.get(creator).copied().unwrap_or(0)
    }

    /// Consume `expected` for `creator`, incrementing on success.
    ///
    /// Fails with `NonceMismatch` unless `expected` equals the creator's
    /// current nonce; the counter never decreases and never skips.
    pub fn consume(&mut self, creator: &Address, expected: Nonce) -> LaunchpadResult<()> {
        let current = self.current(creator);
        if expected != current {
            return Err(LaunchpadError::NonceMismatch {
                expected: current,
                got: expected,
            });
        }
        self.nonces.insert(*creator, current + 1);
        Ok(())
    }
}
