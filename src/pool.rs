//! The liquidity pool: reserves, share ledger, and operation orchestration.
//!
//! A pool owns two reserve counters and a share ledger, and coordinates
//! every mutating operation against the pricing curve and the asset
//! ledger.  The ordering inside each operation is fixed:
//!
//! 1. validate inputs and compute amounts from a consistent reserve read,
//! 2. move funds through the [`AssetLedger`],
//! 3. only then mutate reserves and shares.
//!
//! A failure in steps 1–2 therefore leaves the pool untouched.  Pay-in
//! failures are expected (a payer may simply lack funds); pay-out
//! failures mean custody no longer matches reserve accounting and are
//! logged at error level before being surfaced.
//!
//! The pool takes no locks itself.  Exclusive access for the duration of
//! each operation is arranged by the registry, which hands out pools
//! behind per-pool mutexes.

use std::collections::HashMap;

use tracing::{debug, error};

use crate::config::PoolConfig;
use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, FeeRate, Rounding, Shares, SwapOutcome,
};
use crate::error::{AmmError, Result};
use crate::ledger::AssetLedger;
use crate::pricing;

/// A constant-product liquidity pool over one asset pair.
///
/// Created empty; reserves and shares change only through
/// [`add_liquidity`](Self::add_liquidity),
/// [`remove_liquidity`](Self::remove_liquidity), and the swap entry
/// points.  A pool whose reserves and shares have returned to zero is a
/// valid, reusable state, not a deleted entity.
///
/// # Share accounting
///
/// `total_shares` always equals the sum of all entries in the share
/// ledger.  The first deposit mints shares equal to the amount of the
/// pair's second asset (`asset_b`), making that asset the bootstrap unit
/// of account; later deposits mint `amount_a · total / reserve_a`,
/// floored.
#[derive(Debug, Clone)]
pub struct LiquidityPool {
    pair: AssetPair,
    fee_rate: FeeRate,
    account: AccountId,
    reserve_a: Amount,
    reserve_b: Amount,
    total_shares: Shares,
    share_balances: HashMap<AccountId, Shares>,
}

impl LiquidityPool {
    /// Creates an empty pool from a validated configuration.
    #[must_use]
    pub fn new(config: &PoolConfig) -> Self {
        Self {
            pair: config.pair(),
            fee_rate: config.fee_rate(),
            account: config.account(),
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            total_shares: Shares::ZERO,
            share_balances: HashMap::new(),
        }
    }

    /// Returns the asset pair this pool serves.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.pair
    }

    /// Returns the swap fee rate.
    #[must_use]
    pub const fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }

    /// Returns the custody account this pool holds funds under.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Returns the reserve of the pair's first asset.
    #[must_use]
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Returns the reserve of the pair's second asset.
    #[must_use]
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Returns the total outstanding share count.
    #[must_use]
    pub const fn total_shares(&self) -> Shares {
        self.total_shares
    }

    /// Returns the share balance of `provider` (zero if unknown).
    #[must_use]
    pub fn shares_of(&self, provider: &AccountId) -> Shares {
        self.share_balances
            .get(provider)
            .copied()
            .unwrap_or(Shares::ZERO)
    }

    /// Returns `(reserve_in, reserve_out, asset_out)` for a swap selling
    /// `asset_in`.
    fn oriented_reserves(&self, asset_in: &AssetId) -> Result<(Amount, Amount, AssetId)> {
        let asset_out = self.pair.other(asset_in)?;
        if *asset_in == self.pair.asset_a() {
            Ok((self.reserve_a, self.reserve_b, asset_out))
        } else {
            Ok((self.reserve_b, self.reserve_a, asset_out))
        }
    }

    fn credit_reserve(&mut self, asset: &AssetId, amount: Amount) -> Result<()> {
        let reserve = if *asset == self.pair.asset_a() {
            &mut self.reserve_a
        } else {
            &mut self.reserve_b
        };
        *reserve = reserve
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("reserve overflow on credit"))?;
        Ok(())
    }

    fn debit_reserve(&mut self, asset: &AssetId, amount: Amount) -> Result<()> {
        let reserve = if *asset == self.pair.asset_a() {
            &mut self.reserve_a
        } else {
            &mut self.reserve_b
        };
        *reserve = reserve
            .checked_sub(&amount)
            .ok_or(AmmError::Overflow("reserve underflow on debit"))?;
        Ok(())
    }

    /// Quotes the output of an exact-input swap without touching state.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `asset_in` is not a pair member.
    /// - Any pricing error (see
    ///   [`pricing::output_given_input`]).
    pub fn quote_output(&self, asset_in: &AssetId, amount_in: Amount) -> Result<Amount> {
        let (reserve_in, reserve_out, _) = self.oriented_reserves(asset_in)?;
        pricing::output_given_input(amount_in, reserve_in, reserve_out, self.fee_rate)
    }

    /// Quotes the input required for an exact-output swap without touching
    /// state.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `asset_in` is not a pair member.
    /// - Any pricing error (see
    ///   [`pricing::input_given_output`]).
    pub fn quote_input(&self, asset_in: &AssetId, amount_out: Amount) -> Result<Amount> {
        let (reserve_in, reserve_out, _) = self.oriented_reserves(asset_in)?;
        pricing::input_given_output(amount_out, reserve_in, reserve_out, self.fee_rate)
    }

    /// Returns the second-asset deposit required to pair `amount_a` at the
    /// current reserve ratio.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientReserves`] on an empty pool, where
    /// no ratio exists yet.
    pub fn paired_amount(&self, amount_a: Amount) -> Result<Amount> {
        pricing::proportional(amount_a, self.reserve_a, self.reserve_b)
    }

    /// Deposits liquidity and mints shares.
    ///
    /// Amounts are given in canonical pair order.  On an empty pool both
    /// amounts are taken verbatim and `amount_b` shares are minted; on a
    /// live pool `amount_a` drives the deposit and only the implied
    /// second-asset amount is actually transferred, so callers may
    /// over-approve `amount_b` as a slippage allowance.
    ///
    /// Both amounts zero is a legal no-op minting zero shares.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] for a one-sided first deposit (it
    ///   would mint zero shares against live reserves and brick the
    ///   pool), or for a deposit too small to mint a single share.
    /// - [`AmmError::InsufficientPairedAsset`] if `amount_b` falls short
    ///   of the ratio-implied requirement.
    /// - [`AmmError::Ledger`] if a pay-in fails; a half-completed deposit
    ///   is refunded before the error is returned.
    pub fn add_liquidity<L: AssetLedger>(
        &mut self,
        ledger: &L,
        provider: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Shares> {
        if amount_a.is_zero() && amount_b.is_zero() {
            return Ok(Shares::ZERO);
        }

        let (take_b, minted) = if self.total_shares.is_zero() {
            if amount_a.is_zero() || amount_b.is_zero() {
                return Err(AmmError::InvalidQuantity(
                    "first deposit requires both assets",
                ));
            }
            (amount_b, Shares::new(amount_b.get()))
        } else {
            let required_b = pricing::proportional(amount_a, self.reserve_a, self.reserve_b)?;
            if amount_b < required_b {
                return Err(AmmError::InsufficientPairedAsset {
                    required: required_b,
                    supplied: amount_b,
                });
            }
            let minted = pricing::mul_div(
                amount_a,
                self.total_shares.as_amount(),
                self.reserve_a,
                Rounding::Down,
            )?;
            if minted.is_zero() {
                return Err(AmmError::InvalidQuantity(
                    "deposit too small to mint shares",
                ));
            }
            (required_b, Shares::new(minted.get()))
        };

        let pair = self.pair;
        ledger.transfer_in(pair.asset_a(), provider, self.account, amount_a)?;
        if let Err(err) = ledger.transfer_in(pair.asset_b(), provider, self.account, take_b) {
            // Undo the first leg so the failure has no observable effect.
            if let Err(refund_err) =
                ledger.transfer_out(pair.asset_a(), self.account, provider, amount_a)
            {
                error!(
                    pool = %self.account,
                    asset = %pair.asset_a(),
                    cause = %err,
                    refund = %refund_err,
                    "deposit refund failed; custody no longer matches reserve accounting"
                );
                return Err(refund_err.into());
            }
            return Err(err.into());
        }

        self.credit_reserve(&pair.asset_a(), amount_a)?;
        self.credit_reserve(&pair.asset_b(), take_b)?;
        self.total_shares = self
            .total_shares
            .checked_add(&minted)
            .ok_or(AmmError::Overflow("total share supply overflow"))?;
        let balance = self.share_balances.entry(provider).or_insert(Shares::ZERO);
        *balance = balance
            .checked_add(&minted)
            .ok_or(AmmError::Overflow("provider share balance overflow"))?;

        debug!(
            pool = %self.account,
            provider = %provider,
            amount_a = %amount_a,
            amount_b = %take_b,
            minted = %minted,
            "liquidity added"
        );
        Ok(minted)
    }

    /// Burns `shares_to_burn` and pays out both assets proportionally.
    ///
    /// Payouts are `⌊ reserve · shares / total ⌋` per asset; burning the
    /// entire supply pays out both reserves exactly, leaving the pool
    /// empty.  Burning zero shares is a legal no-op.  `min_a` / `min_b`
    /// are slippage floors; pass [`Amount::ZERO`] to opt out.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientShareBalance`] if the provider owns
    ///   fewer shares than requested.
    /// - [`AmmError::InsufficientOutputAmount`] if a payout falls below
    ///   its floor.
    /// - [`AmmError::Ledger`] if a pay-out fails (logged, fatal).
    pub fn remove_liquidity<L: AssetLedger>(
        &mut self,
        ledger: &L,
        provider: AccountId,
        shares_to_burn: Shares,
        min_a: Amount,
        min_b: Amount,
    ) -> Result<(Amount, Amount)> {
        if shares_to_burn.is_zero() {
            return Ok((Amount::ZERO, Amount::ZERO));
        }
        let available = self.shares_of(&provider);
        if shares_to_burn > available {
            return Err(AmmError::InsufficientShareBalance {
                requested: shares_to_burn,
                available,
            });
        }

        let total = self.total_shares.as_amount();
        let burn = shares_to_burn.as_amount();
        let amount_a = pricing::mul_div(self.reserve_a, burn, total, Rounding::Down)?;
        let amount_b = pricing::mul_div(self.reserve_b, burn, total, Rounding::Down)?;
        if amount_a < min_a {
            return Err(AmmError::InsufficientOutputAmount {
                minimum: min_a,
                actual: amount_a,
            });
        }
        if amount_b < min_b {
            return Err(AmmError::InsufficientOutputAmount {
                minimum: min_b,
                actual: amount_b,
            });
        }

        let pair = self.pair;
        self.pay_out(ledger, pair.asset_a(), provider, amount_a)?;
        self.pay_out(ledger, pair.asset_b(), provider, amount_b)?;

        self.debit_reserve(&pair.asset_a(), amount_a)?;
        self.debit_reserve(&pair.asset_b(), amount_b)?;
        self.total_shares = self
            .total_shares
            .checked_sub(&shares_to_burn)
            .ok_or(AmmError::Overflow("total share supply underflow"))?;
        let remaining = available
            .checked_sub(&shares_to_burn)
            .ok_or(AmmError::Overflow("provider share balance underflow"))?;
        if remaining.is_zero() {
            self.share_balances.remove(&provider);
        } else {
            self.share_balances.insert(provider, remaining);
        }

        debug!(
            pool = %self.account,
            provider = %provider,
            burned = %shares_to_burn,
            amount_a = %amount_a,
            amount_b = %amount_b,
            "liquidity removed"
        );
        Ok((amount_a, amount_b))
    }

    /// Swaps an exact input of `asset_in` for the pair's other asset.
    ///
    /// A zero `amount_in` is legal: it yields zero output, requires a
    /// zero `min_amount_out`, and changes nothing.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `asset_in` is not a pair member.
    /// - [`AmmError::InsufficientOutputAmount`] if the output falls below
    ///   `min_amount_out`.
    /// - [`AmmError::InsufficientReserves`] if the pool cannot serve the
    ///   swap.
    /// - [`AmmError::Ledger`] if the pay-in fails.
    pub fn swap_exact_in<L: AssetLedger>(
        &mut self,
        ledger: &L,
        trader: AccountId,
        asset_in: AssetId,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapOutcome> {
        self.swap_leg(ledger, Some(trader), trader, asset_in, amount_in, min_amount_out)
    }

    /// Swaps for an exact output of the pair's other asset, spending at
    /// most `max_amount_in` of `asset_in`.
    ///
    /// A zero `amount_out` is a legal no-op.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `asset_in` is not a pair member.
    /// - [`AmmError::ExcessiveInputAmount`] if the curve demands more
    ///   input than the caller allowed.
    /// - [`AmmError::InsufficientReserves`] if `amount_out` meets or
    ///   exceeds the opposing reserve.
    /// - [`AmmError::Ledger`] if the pay-in fails.
    pub fn swap_exact_out<L: AssetLedger>(
        &mut self,
        ledger: &L,
        trader: AccountId,
        asset_in: AssetId,
        amount_out: Amount,
        max_amount_in: Amount,
    ) -> Result<SwapOutcome> {
        let (reserve_in, reserve_out, asset_out) = self.oriented_reserves(&asset_in)?;
        if amount_out.is_zero() {
            return Ok(SwapOutcome::default());
        }

        let amount_in =
            pricing::input_given_output(amount_out, reserve_in, reserve_out, self.fee_rate)?;
        if amount_in > max_amount_in {
            return Err(AmmError::ExcessiveInputAmount {
                maximum: max_amount_in,
                required: amount_in,
            });
        }
        // The fee is whatever the caller pays beyond the fee-free input.
        let fee_free_in =
            pricing::input_given_output(amount_out, reserve_in, reserve_out, FeeRate::FREE)?;
        let fee = amount_in
            .checked_sub(&fee_free_in)
            .ok_or(AmmError::Overflow("fee underflow on exact-out swap"))?;

        ledger.transfer_in(asset_in, trader, self.account, amount_in)?;
        self.pay_out(ledger, asset_out, trader, amount_out)?;

        self.credit_reserve(&asset_in, amount_in)?;
        self.debit_reserve(&asset_out, amount_out)?;

        debug!(
            pool = %self.account,
            trader = %trader,
            asset_in = %asset_in,
            amount_in = %amount_in,
            amount_out = %amount_out,
            "exact-out swap executed"
        );
        Ok(SwapOutcome::new(amount_in, amount_out, fee))
    }

    /// Executes one swap leg with explicit payer and recipient.
    ///
    /// `payer == None` means the input has already been delivered to the
    /// pool's custody account (the second hop of a routed swap); no
    /// pay-in is performed.  The recipient may differ from the payer (the
    /// first hop of a routed swap pays the next pool directly).
    pub(crate) fn swap_leg<L: AssetLedger>(
        &mut self,
        ledger: &L,
        payer: Option<AccountId>,
        recipient: AccountId,
        asset_in: AssetId,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapOutcome> {
        let (reserve_in, reserve_out, asset_out) = self.oriented_reserves(&asset_in)?;

        if amount_in.is_zero() {
            if !min_amount_out.is_zero() {
                return Err(AmmError::InsufficientOutputAmount {
                    minimum: min_amount_out,
                    actual: Amount::ZERO,
                });
            }
            return Ok(SwapOutcome::default());
        }

        let amount_out =
            pricing::output_given_input(amount_in, reserve_in, reserve_out, self.fee_rate)?;
        if amount_out < min_amount_out {
            return Err(AmmError::InsufficientOutputAmount {
                minimum: min_amount_out,
                actual: amount_out,
            });
        }

        if let Some(payer) = payer {
            ledger.transfer_in(asset_in, payer, self.account, amount_in)?;
        }
        self.pay_out(ledger, asset_out, recipient, amount_out)?;

        self.credit_reserve(&asset_in, amount_in)?;
        self.debit_reserve(&asset_out, amount_out)?;

        let fee = pricing::fee_on_input(amount_in, self.fee_rate);
        debug!(
            pool = %self.account,
            recipient = %recipient,
            asset_in = %asset_in,
            amount_in = %amount_in,
            amount_out = %amount_out,
            fee = %fee,
            "swap executed"
        );
        Ok(SwapOutcome::new(amount_in, amount_out, fee))
    }

    /// Pays out of custody, logging a pay-out failure before surfacing it.
    fn pay_out<L: AssetLedger>(
        &self,
        ledger: &L,
        asset: AssetId,
        payee: AccountId,
        amount: Amount,
    ) -> Result<()> {
        if let Err(err) = ledger.transfer_out(asset, self.account, payee, amount) {
            error!(
                pool = %self.account,
                asset = %asset,
                amount = %amount,
                err = %err,
                "pay-out failed; custody no longer matches reserve accounting"
            );
            return Err(err.into());
        }
        Ok(())
    }
}
