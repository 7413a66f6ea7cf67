//! Launchpad Engine
//!
//! The single entry point for every invocation: `create_token`, `buy`,
//! `sell`, and the internally triggered graduation handoff. The engine
//! owns all stores (config, nonces, markets, balances, fee sink) and
//! mutates them under an atomic-or-nothing contract:
//!
//! 1. stage — every check and every fallible computation runs against
//!    immutable state;
//! 2. outward call — the pool router is invoked while nothing has been
//!    committed yet;
//! 3. commit — pre-validated writes only.
//!
//! An `Err` from any step therefore leaves every store untouched, which
//! substitutes for transaction machinery. A per-invocation guard rejects
//! re-entrant calls that an outward transfer could otherwise smuggle in.

use lib_types::{Address, Amount, Nonce, PoolId, Timestamp, TokenId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use lib_crypto::hash_blake3_multiple;

use crate::auth;
use crate::balances::BalanceBook;
use crate::config::LaunchpadConfig;
use crate::curve::{self, take_fee};
use crate::errors::{LaunchpadError, LaunchpadResult};
use crate::events::LaunchpadEvent;
use crate::market::{Market, MarketPhase, MarketRegistry, RegistryStats};
use crate::nonces::NonceRegistry;
use crate::request::CreateTokenRequest;
use crate::router::{derive_pool_id, PoolRouter};

/// Domain label for token identity derivation
const TOKEN_DERIVATION_LABEL: &[u8] = b"launchpad:token:v1";

/// Receipt returned by [`Launchpad::create_token`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReceipt {
    pub token_id: TokenId,
    /// Tokens bought by the creator's immediate buy (0 if none)
    pub tokens_bought: Amount,
    pub graduated: bool,
}

/// Receipt returned by [`Launchpad::buy`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyReceipt {
    pub tokens_out: Amount,
    pub fee: Amount,
    pub graduated: bool,
}

/// Receipt returned by [`Launchpad::sell`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellReceipt {
    pub base_out: Amount,
    pub fee: Amount,
}

/// Fully validated buy, ready to commit
struct StagedBuy {
    fee: Amount,
    tokens_out: Amount,
    new_virtual_base: Amount,
    new_curve_reserve: Amount,
    new_fee_balance: Amount,
}

/// Fully validated sell, ready to commit
struct StagedSell {
    fee: Amount,
    net_out: Amount,
    new_virtual_base: Amount,
    new_curve_reserve: Amount,
    new_fee_balance: Amount,
}

/// Fully validated graduation handoff, ready for the router call
struct StagedGraduation {
    pool_id: PoolId,
    token_leg: Amount,
    base_leg: Amount,
}

/// The launchpad state machine.
///
/// All state is explicit; the pool router is passed into each invocation
/// rather than owned, so the engine itself is plain serializable data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Launchpad {
    program: Address,
    config: LaunchpadConfig,
    nonces: NonceRegistry,
    markets: MarketRegistry,
    balances: BalanceBook,
    /// Creation fees routed to the program's fee sink
    fee_sink: Amount,
    events: Vec<LaunchpadEvent>,
    /// Per-invocation reentrancy guard; never persisted
    #[serde(skip)]
    in_flight: bool,
}

impl Launchpad {
    /// Construct the engine with its own identity and frozen config.
    pub fn new(program: Address, config: LaunchpadConfig) -> LaunchpadResult<Self> {
        if program.is_zero() {
            return Err(LaunchpadError::InvalidConfig(
                "program address cannot be zero".to_string(),
            ));
        }
        Ok(Self {
            program,
            config,
            nonces: NonceRegistry::new(),
            markets: MarketRegistry::new(),
            balances: BalanceBook::new(),
            fee_sink: 0,
            events: Vec::new(),
            in_flight: false,
        })
    }

    // ========================================================================
    // Read accessors
    // ========================================================================

    /// The engine's own identity, used in pool derivation
    pub fn program(&self) -> Address {
        self.program
    }

    /// The frozen launchpad parameters
    pub fn config(&self) -> &LaunchpadConfig {
        &self.config
    }

    /// Next valid creation nonce for a creator
    pub fn current_nonce(&self, creator: &Address) -> Nonce {
        self.nonces.current(creator)
    }

    /// Market record for a token, if one exists
    pub fn market_state(&self, token_id: &TokenId) -> Option<&Market> {
        self.markets.get(token_id)
    }

    /// Token holdings of a wallet
    pub fn balance_of(&self, token_id: &TokenId, holder: &Address) -> Amount {
        self.balances.get(token_id, holder)
    }

    /// Creation fees accumulated by the program
    pub fn fee_sink_balance(&self) -> Amount {
        self.fee_sink
    }

    /// Registry statistics
    pub fn stats(&self) -> RegistryStats {
        self.markets.stats()
    }

    /// Drain the in-order event log
    pub fn drain_events(&mut self) -> Vec<LaunchpadEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // Token Factory
    // ========================================================================

    /// Create a new token from a signed request.
    ///
    /// `value` is the base-asset amount attached to the invocation; it
    /// must cover the creation fee plus any immediate buy. Any excess is
    /// the host's to refund. The immediate buy executes against the fresh
    /// market inside the same atomic step and may itself graduate the
    /// market.
    pub fn create_token(
        &mut self,
        router: &mut dyn PoolRouter,
        request: &CreateTokenRequest,
        signature: &[u8],
        value: Amount,
        now: Timestamp,
    ) -> LaunchpadResult<CreateReceipt> {
        self.begin_invocation()?;
        let result = self.create_token_inner(router, request, signature, value, now);
        self.end_invocation();
        if let Err(err) = &result {
            warn!(creator = %request.creator, error = %err, "token creation rejected");
        }
        result
    }

    fn create_token_inner(
        &mut self,
        router: &mut dyn PoolRouter,
        request: &CreateTokenRequest,
        signature: &[u8],
        value: Amount,
        now: Timestamp,
    ) -> LaunchpadResult<CreateReceipt> {
        // stage
        request.validate()?;
        auth::verify_create_request(&self.config, &self.nonces, request, signature, now)?;

        let required = request
            .creation_fee
            .checked_add(request.immediate_buy)
            .ok_or(LaunchpadError::ArithmeticOverflow)?;
        if value < required {
            return Err(LaunchpadError::InsufficientValue {
                attached: value,
                required,
            });
        }

        let token_id = derive_token_id(&request.creator, request.nonce, &request.symbol);
        if self.markets.contains(&token_id) {
            return Err(LaunchpadError::DuplicateToken(token_id));
        }
        let new_fee_sink = self
            .fee_sink
            .checked_add(request.creation_fee)
            .ok_or(LaunchpadError::ArithmeticOverflow)?;

        let mut market = Market::open(token_id, &self.config, request, now);

        let staged_buy = if request.immediate_buy > 0 {
            Some(self.stage_buy(&market, request.creator, request.immediate_buy, 0)?)
        } else {
            None
        };
        let staged_grad = match &staged_buy {
            Some(staged) if staged.new_curve_reserve == 0 => {
                Some(self.stage_graduation(&market, staged.new_virtual_base)?)
            }
            _ => None,
        };

        // outward call
        if let Some(grad) = &staged_grad {
            router
                .seed_pool(grad.pool_id, token_id, grad.token_leg, grad.base_leg)
                .map_err(|e| LaunchpadError::RouterRejected(e.0))?;
        }

        // commit
        self.nonces.consume(&request.creator, request.nonce)?;
        self.fee_sink = new_fee_sink;
        if let Some(staged) = &staged_buy {
            self.balances
                .credit(token_id, request.creator, staged.tokens_out)?;
            apply_buy(&mut market, staged);
        }
        if let Some(grad) = &staged_grad {
            apply_graduation(&mut market, grad);
        }
        // insert counts an already-graduated market itself
        self.markets.insert(market)?;

        self.events.push(LaunchpadEvent::TokenCreated {
            token_id,
            creator: request.creator,
            name: request.name.clone(),
            symbol: request.symbol.clone(),
            wallet_cap: request.wallet_cap,
            cap_enforced: !request.dev_lockup,
            creation_fee: request.creation_fee,
            timestamp: now,
        });
        if let Some(staged) = &staged_buy {
            self.events.push(LaunchpadEvent::TokensPurchased {
                token_id,
                buyer: request.creator,
                base_in: request.immediate_buy,
                fee: staged.fee,
                tokens_out: staged.tokens_out,
                timestamp: now,
            });
        }
        if let Some(grad) = &staged_grad {
            self.events.push(LaunchpadEvent::Graduated {
                token_id,
                pool_id: grad.pool_id,
                token_leg: grad.token_leg,
                base_leg: grad.base_leg,
                timestamp: now,
            });
            info!(token = %token_id, pool = %grad.pool_id, "market graduated");
        }
        info!(token = %token_id, creator = %request.creator, symbol = %request.symbol, "token created");

        Ok(CreateReceipt {
            token_id,
            tokens_bought: staged_buy.map(|s| s.tokens_out).unwrap_or(0),
            graduated: staged_grad.is_some(),
        })
    }

    // ========================================================================
    // Trading Engine
    // ========================================================================

    /// Buy tokens from a market's bonding curve.
    ///
    /// `base_in` is the attached base-asset amount, fee-inclusive. When
    /// the buy exhausts the curve allocation exactly, graduation runs
    /// synchronously before the call returns; a router failure rolls the
    /// whole invocation back.
    pub fn buy(
        &mut self,
        router: &mut dyn PoolRouter,
        token_id: TokenId,
        buyer: Address,
        base_in: Amount,
        min_tokens_out: Amount,
        now: Timestamp,
    ) -> LaunchpadResult<BuyReceipt> {
        self.begin_invocation()?;
        let result = self.buy_inner(router, token_id, buyer, base_in, min_tokens_out, now);
        self.end_invocation();
        result
    }

    fn buy_inner(
        &mut self,
        router: &mut dyn PoolRouter,
        token_id: TokenId,
        buyer: Address,
        base_in: Amount,
        min_tokens_out: Amount,
        now: Timestamp,
    ) -> LaunchpadResult<BuyReceipt> {
        // stage
        let market = self
            .markets
            .get(&token_id)
            .ok_or(LaunchpadError::UnknownMarket(token_id))?;
        market.require_trading()?;

        let staged = self.stage_buy(market, buyer, base_in, min_tokens_out)?;
        let staged_grad = if staged.new_curve_reserve == 0 {
            Some(self.stage_graduation(market, staged.new_virtual_base)?)
        } else {
            None
        };

        // outward call
        if let Some(grad) = &staged_grad {
            router
                .seed_pool(grad.pool_id, token_id, grad.token_leg, grad.base_leg)
                .map_err(|e| LaunchpadError::RouterRejected(e.0))?;
        }

        // commit
        self.balances.credit(token_id, buyer, staged.tokens_out)?;
        let market = self
            .markets
            .get_mut(&token_id)
            .ok_or(LaunchpadError::UnknownMarket(token_id))?;
        apply_buy(market, &staged);
        if let Some(grad) = &staged_grad {
            apply_graduation(market, grad);
            self.markets.note_graduated();
        }

        self.events.push(LaunchpadEvent::TokensPurchased {
            token_id,
            buyer,
            base_in,
            fee: staged.fee,
            tokens_out: staged.tokens_out,
            timestamp: now,
        });
        debug!(token = %token_id, buyer = %buyer, base_in, tokens_out = staged.tokens_out, "buy executed");
        if let Some(grad) = &staged_grad {
            self.events.push(LaunchpadEvent::Graduated {
                token_id,
                pool_id: grad.pool_id,
                token_leg: grad.token_leg,
                base_leg: grad.base_leg,
                timestamp: now,
            });
            info!(token = %token_id, pool = %grad.pool_id, "market graduated");
        }

        Ok(BuyReceipt {
            tokens_out: staged.tokens_out,
            fee: staged.fee,
            graduated: staged_grad.is_some(),
        })
    }

    /// Sell tokens back to a market's bonding curve.
    ///
    /// No wallet-cap check and no graduation trigger: graduation is a
    /// one-directional threshold reached only through buys.
    pub fn sell(
        &mut self,
        token_id: TokenId,
        seller: Address,
        tokens_in: Amount,
        min_base_out: Amount,
        now: Timestamp,
    ) -> LaunchpadResult<SellReceipt> {
        self.begin_invocation()?;
        let result = self.sell_inner(token_id, seller, tokens_in, min_base_out, now);
        self.end_invocation();
        result
    }

    fn sell_inner(
        &mut self,
        token_id: TokenId,
        seller: Address,
        tokens_in: Amount,
        min_base_out: Amount,
        now: Timestamp,
    ) -> LaunchpadResult<SellReceipt> {
        // stage
        let market = self
            .markets
            .get(&token_id)
            .ok_or(LaunchpadError::UnknownMarket(token_id))?;
        market.require_trading()?;

        let staged = self.stage_sell(market, seller, tokens_in, min_base_out)?;

        // commit
        self.balances.debit(token_id, seller, tokens_in)?;
        let market = self
            .markets
            .get_mut(&token_id)
            .ok_or(LaunchpadError::UnknownMarket(token_id))?;
        market.virtual_base = staged.new_virtual_base;
        market.curve_reserve = staged.new_curve_reserve;
        market.fee_balance = staged.new_fee_balance;

        self.events.push(LaunchpadEvent::TokensSold {
            token_id,
            seller,
            tokens_in,
            base_out: staged.net_out,
            fee: staged.fee,
            timestamp: now,
        });
        debug!(token = %token_id, seller = %seller, tokens_in, base_out = staged.net_out, "sell executed");

        Ok(SellReceipt {
            base_out: staged.net_out,
            fee: staged.fee,
        })
    }

    // ========================================================================
    // Staging
    // ========================================================================

    fn stage_buy(
        &self,
        market: &Market,
        buyer: Address,
        base_in: Amount,
        min_tokens_out: Amount,
    ) -> LaunchpadResult<StagedBuy> {
        if base_in == 0 {
            return Err(LaunchpadError::ZeroAmount);
        }
        let (net_in, fee) = take_fee(base_in, self.config.trading_fee_bps);
        if net_in == 0 {
            return Err(LaunchpadError::ZeroAmount);
        }

        let tokens_out = curve::quote_buy(market.virtual_base, market.curve_reserve, net_in)?;
        if tokens_out == 0 {
            return Err(LaunchpadError::ZeroAmount);
        }
        if tokens_out < min_tokens_out {
            return Err(LaunchpadError::SlippageExceeded {
                quoted: tokens_out,
                minimum: min_tokens_out,
            });
        }

        let would_hold = self
            .balances
            .get(&market.token_id, &buyer)
            .checked_add(tokens_out)
            .ok_or(LaunchpadError::ArithmeticOverflow)?;
        if market.cap_enforced && would_hold > market.wallet_cap {
            return Err(LaunchpadError::WalletCapExceeded {
                cap: market.wallet_cap,
                would_hold,
            });
        }

        let new_virtual_base = market
            .virtual_base
            .checked_add(net_in)
            .ok_or(LaunchpadError::ArithmeticOverflow)?;
        let new_fee_balance = market
            .fee_balance
            .checked_add(fee)
            .ok_or(LaunchpadError::ArithmeticOverflow)?;

        Ok(StagedBuy {
            fee,
            tokens_out,
            new_virtual_base,
            new_curve_reserve: market.curve_reserve - tokens_out,
            new_fee_balance,
        })
    }

    fn stage_sell(
        &self,
        market: &Market,
        seller: Address,
        tokens_in: Amount,
        min_base_out: Amount,
    ) -> LaunchpadResult<StagedSell> {
        if tokens_in == 0 {
            return Err(LaunchpadError::ZeroAmount);
        }
        let have = self.balances.get(&market.token_id, &seller);
        if have < tokens_in {
            return Err(LaunchpadError::InsufficientBalance {
                have,
                need: tokens_in,
            });
        }

        let gross = curve::quote_sell(market.virtual_base, market.curve_reserve, tokens_in)?;
        let (net_out, fee) = take_fee(gross, self.config.trading_fee_bps);
        if net_out == 0 {
            return Err(LaunchpadError::ZeroAmount);
        }
        if net_out < min_base_out {
            return Err(LaunchpadError::SlippageExceeded {
                quoted: net_out,
                minimum: min_base_out,
            });
        }

        let new_curve_reserve = market
            .curve_reserve
            .checked_add(tokens_in)
            .ok_or(LaunchpadError::ArithmeticOverflow)?;
        let new_fee_balance = market
            .fee_balance
            .checked_add(fee)
            .ok_or(LaunchpadError::ArithmeticOverflow)?;

        Ok(StagedSell {
            fee,
            net_out,
            new_virtual_base: market.virtual_base - gross,
            new_curve_reserve,
            new_fee_balance,
        })
    }

    fn stage_graduation(
        &self,
        market: &Market,
        post_trade_virtual_base: Amount,
    ) -> LaunchpadResult<StagedGraduation> {
        // defensive: the triggering condition is one-way, but a second
        // graduation of the same market must still be impossible
        if market.phase.is_graduated() {
            return Err(LaunchpadError::AlreadyGraduated(market.token_id));
        }
        Ok(StagedGraduation {
            pool_id: derive_pool_id(
                &self.program,
                &market.token_id,
                &self.config.pool_init_fingerprint,
            ),
            token_leg: market.graduation_reserve,
            base_leg: post_trade_virtual_base,
        })
    }

    // ========================================================================
    // Reentrancy guard
    // ========================================================================

    fn begin_invocation(&mut self) -> LaunchpadResult<()> {
        if self.in_flight {
            return Err(LaunchpadError::ReentrantCall);
        }
        self.in_flight = true;
        Ok(())
    }

    fn end_invocation(&mut self) {
        self.in_flight = false;
    }
}

fn apply_buy(market: &mut Market, staged: &StagedBuy) {
    market.virtual_base = staged.new_virtual_base;
    market.curve_reserve = staged.new_curve_reserve;
    market.fee_balance = staged.new_fee_balance;
}

fn apply_graduation(market: &mut Market, grad: &StagedGraduation) {
    market.phase = MarketPhase::Graduated;
    market.pool_id = Some(grad.pool_id);
    market.virtual_base = 0;
    market.curve_reserve = 0;
    market.graduation_reserve = 0;
}

/// Derive the new token's identity from the authorized creation.
///
/// The nonce makes the id unique per creator even for identical symbols.
fn derive_token_id(creator: &Address, nonce: Nonce, symbol: &str) -> TokenId {
    TokenId::new(hash_blake3_multiple(&[
        TOKEN_DERIVATION_LABEL,
        creator.as_bytes(),
        &nonce.to_le_bytes(),
        symbol.as_bytes(),
    ]))
}
