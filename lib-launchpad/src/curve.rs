//! Reserve Math
//!
//! Pure constant-product pricing over two virtual reserves. The invariant
//! `virtual_base * token_reserve = k` is held across a single trade,
//! modulo the fee skim and floor division.
//!
//! # Rules (enforced in code)
//!
//! - No floats; all arithmetic is integer
//! - u128 intermediates, so `reserve * reserve` can never wrap
//! - Floor division throughout; rounding always favors the reserves
//! - Any overflow at the `Amount` width is rejected, never truncated

use lib_types::{Amount, Bps};

use crate::errors::{LaunchpadError, LaunchpadResult};

/// Maximum basis points (100%)
pub const MAX_BPS: Bps = 10_000;

/// Split `amount` into (net, fee) under a fee-on-input policy.
///
/// `net = amount * (MAX_BPS - fee_bps) / MAX_BPS`, floor division; the
/// remainder is the fee. `fee_bps` must already be validated ≤ `MAX_BPS`.
pub fn take_fee(amount: Amount, fee_bps: Bps) -> (Amount, Amount) {
    // u64 * u16 widened to u128 cannot overflow
    let net = (amount as u128 * (MAX_BPS - fee_bps) as u128 / MAX_BPS as u128) as Amount;
    (net, amount - net)
}

/// Quote tokens out for a base-asset input against the constant product.
///
/// `tokens_out = token_reserve - (virtual_base * token_reserve) / (virtual_base + base_in)`
pub fn quote_buy(
    virtual_base: Amount,
    token_reserve: Amount,
    base_in: Amount,
) -> LaunchpadResult<Amount> {
    if base_in == 0 {
        return Err(LaunchpadError::ZeroAmount);
    }

    let k = virtual_base as u128 * token_reserve as u128;
    let new_virtual_base = virtual_base
        .checked_add(base_in)
        .ok_or(LaunchpadError::ArithmeticOverflow)?;
    // new_token_reserve <= token_reserve, so the cast back is lossless
    let new_token_reserve = (k / new_virtual_base as u128) as Amount;

    Ok(token_reserve - new_token_reserve)
}

/// Quote base asset out for a token input; the structural inverse of
/// [`quote_buy`] with the base asset on the output side.
pub fn quote_sell(
    virtual_base: Amount,
    token_reserve: Amount,
    tokens_in: Amount,
) -> LaunchpadResult<Amount> {
    if tokens_in == 0 {
        return Err(LaunchpadError::ZeroAmount);
    }

    let k = virtual_base as u128 * token_reserve as u128;
    let new_token_reserve = token_reserve
        .checked_add(tokens_in)
        .ok_or(LaunchpadError::ArithmeticOverflow)?;
    let new_virtual_base = (k / new_token_reserve as u128) as Amount;

    Ok(virtual_base - new_virtual_base)
}
