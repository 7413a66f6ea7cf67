//! Balance Book
//!
//! Token holdings of traders, keyed by (token, holder). Owned by the
//! engine; mutated only inside its commit steps.

use lib_types::{Address, Amount, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{LaunchpadError, LaunchpadResult};

/// Per-wallet token holdings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceBook {
    balances: HashMap<(TokenId, Address), Amount>,
}

impl BalanceBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Current holdings of `holder` in `token` (0 if none)
    pub fn get(&self, token: &TokenId, holder: &Address) -> Amount {
        self.balances.get(&(*token, *holder)).copied().unwrap_or(0)
    }

    /// Credit tokens to a holder
    pub fn credit(&mut self, token: TokenId, holder: Address, amount: Amount) -> LaunchpadResult<()> {
        let entry = self.balances.entry((token, holder)).or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or(LaunchpadError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Debit tokens from a holder
    pub fn debit(&mut self, token: TokenId, holder: Address, amount: Amount) -> LaunchpadResult<()> {
        let have = self.get(&token, &holder);
        if have < amount {
            return Err(LaunchpadError::InsufficientBalance { have, need: amount });
        }
        self.balances.insert((token, holder), have - amount);
        Ok(())
    }
}
