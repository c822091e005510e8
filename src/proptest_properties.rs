//! Property-based tests for the engine's core invariants.
//!
//! Covered properties:
//!
//! 1. **Swap monotonicity** — the constant product never decreases
//!    across a swap, whichever direction and fee rate.
//! 2. **Quote purity** — quoting is a pure function of its inputs.
//! 3. **Round-trip bound** — add-then-remove returns at most what was
//!    deposited.
//! 4. **Ratio enforcement** — a deposit short of the ratio-implied
//!    paired amount fails without touching state.
//! 5. **Share conservation** — the share supply equals the sum of all
//!    provider balances after any operation mix.
//! 6. **Full-exit identity** — burning the whole supply leaves exactly
//!    zero reserves.
//! 7. **Exact-out tightness** — the required input is sufficient for the
//!    requested output.

use proptest::prelude::*;

use crate::domain::{AccountId, Amount, AssetId, FeeRate, Shares};
use crate::error::AmmError;
use crate::ledger::MemoryLedger;
use crate::pool::LiquidityPool;
use crate::pricing;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn asset(byte: u8) -> AssetId {
    AssetId::from_bytes([byte; 32])
}

fn account(byte: u8) -> AccountId {
    AccountId::from_bytes([byte; 32])
}

fn seeded(
    fee: FeeRate,
    reserve_a: u128,
    reserve_b: u128,
) -> (LiquidityPool, MemoryLedger, AccountId, AccountId) {
    let Ok(pair) = crate::domain::AssetPair::new(asset(1), asset(2)) else {
        panic!("valid pair");
    };
    let config = crate::config::PoolConfig::new(pair, fee, account(0xF0));
    let mut pool = LiquidityPool::new(&config);

    let ledger = MemoryLedger::new();
    let provider = account(10);
    let trader = account(11);
    for holder in [provider, trader] {
        ledger.mint(asset(1), holder, Amount::new(u128::MAX / 4));
        ledger.mint(asset(2), holder, Amount::new(u128::MAX / 4));
    }
    let Ok(_) = pool.add_liquidity(
        &ledger,
        provider,
        Amount::new(reserve_a),
        Amount::new(reserve_b),
    ) else {
        panic!("seed deposit failed");
    };
    (pool, ledger, provider, trader)
}

fn product(pool: &LiquidityPool) -> u128 {
    pool.reserve_a().get() * pool.reserve_b().get()
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Reserve values in [10_000, 10_000_000] to stay clear of dust regimes.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// Trade and deposit sizes up to a tenth of the smallest reserve bound.
fn amount_strategy() -> impl Strategy<Value = u128> {
    1u128..=1_000_000u128
}

fn fee_strategy() -> impl Strategy<Value = FeeRate> {
    prop_oneof![
        Just(FeeRate::FREE),
        Just(FeeRate::RATE_0_30_PERCENT),
        Just(FeeRate::RATE_1_00_PERCENT),
    ]
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    // 1. Swap monotonicity.
    #[test]
    fn swap_never_decreases_the_constant_product(
        reserve_a in reserve_strategy(),
        reserve_b in reserve_strategy(),
        amount in amount_strategy(),
        fee in fee_strategy(),
        sell_a in any::<bool>(),
    ) {
        let (mut pool, ledger, _, trader) = seeded(fee, reserve_a, reserve_b);
        let k_before = product(&pool);

        let asset_in = if sell_a { asset(1) } else { asset(2) };
        let result =
            pool.swap_exact_in(&ledger, trader, asset_in, Amount::new(amount), Amount::ZERO);

        match result {
            Ok(outcome) => {
                prop_assert!(product(&pool) >= k_before);
                prop_assert!(outcome.fee() <= outcome.amount_in());
            }
            Err(_) => {
                // A refused swap must not have moved anything.
                prop_assert_eq!(product(&pool), k_before);
            }
        }
    }

    // 2. Quote purity.
    #[test]
    fn quoting_twice_is_identical(
        reserve_a in reserve_strategy(),
        reserve_b in reserve_strategy(),
        amount in amount_strategy(),
        fee in fee_strategy(),
    ) {
        let first = pricing::output_given_input(
            Amount::new(amount),
            Amount::new(reserve_a),
            Amount::new(reserve_b),
            fee,
        );
        let second = pricing::output_given_input(
            Amount::new(amount),
            Amount::new(reserve_a),
            Amount::new(reserve_b),
            fee,
        );
        prop_assert_eq!(first, second);
    }

    // 3. Round-trip bound.
    #[test]
    fn add_then_remove_returns_at_most_the_deposit(
        reserve_a in reserve_strategy(),
        reserve_b in reserve_strategy(),
        amount in amount_strategy(),
        fee in fee_strategy(),
    ) {
        let (mut pool, ledger, _, trader) = seeded(fee, reserve_a, reserve_b);

        let Ok(required_b) = pool.paired_amount(Amount::new(amount)) else {
            panic!("live pool has a ratio");
        };
        let minted = match pool.add_liquidity(
            &ledger,
            trader,
            Amount::new(amount),
            required_b,
        ) {
            Ok(minted) => minted,
            // Deposits that floor to zero shares are refused; nothing to
            // round-trip.
            Err(AmmError::InvalidQuantity(_)) => return Ok(()),
            Err(other) => panic!("unexpected deposit failure: {other}"),
        };

        let Ok((out_a, out_b)) = pool.remove_liquidity(
            &ledger,
            trader,
            minted,
            Amount::ZERO,
            Amount::ZERO,
        ) else {
            panic!("removing freshly minted shares");
        };
        prop_assert!(out_a <= Amount::new(amount));
        prop_assert!(out_b <= required_b);
    }

    // 4. Ratio enforcement.
    #[test]
    fn short_paired_deposit_fails_cleanly(
        reserve_a in reserve_strategy(),
        reserve_b in reserve_strategy(),
        amount in amount_strategy(),
    ) {
        let (mut pool, ledger, _, trader) = seeded(FeeRate::default(), reserve_a, reserve_b);

        let Ok(required_b) = pool.paired_amount(Amount::new(amount)) else {
            panic!("live pool has a ratio");
        };
        prop_assume!(!required_b.is_zero());
        let Some(short) = required_b.checked_sub(&Amount::new(1)) else {
            panic!("required amount is positive");
        };

        let result = pool.add_liquidity(&ledger, trader, Amount::new(amount), short);
        prop_assert_eq!(
            result,
            Err(AmmError::InsufficientPairedAsset {
                required: required_b,
                supplied: short,
            })
        );
        prop_assert_eq!(pool.reserve_a(), Amount::new(reserve_a));
        prop_assert_eq!(pool.reserve_b(), Amount::new(reserve_b));
        prop_assert_eq!(pool.shares_of(&trader), Shares::ZERO);
    }

    // 5. Share conservation.
    #[test]
    fn share_supply_matches_the_sum_of_balances(
        reserve_a in reserve_strategy(),
        reserve_b in reserve_strategy(),
        amount in amount_strategy(),
        burn_fraction in 1u128..=100u128,
    ) {
        let (mut pool, ledger, provider, trader) =
            seeded(FeeRate::default(), reserve_a, reserve_b);

        let Ok(required_b) = pool.paired_amount(Amount::new(amount)) else {
            panic!("live pool has a ratio");
        };
        // Ignore dust refusals; conservation must hold either way.
        let _ = pool.add_liquidity(&ledger, trader, Amount::new(amount), required_b);

        let burn = Shares::new(pool.shares_of(&provider).get() * burn_fraction / 100);
        let Ok(_) = pool.remove_liquidity(&ledger, provider, burn, Amount::ZERO, Amount::ZERO)
        else {
            panic!("provider owns the burned shares");
        };

        let sum = pool.shares_of(&provider).get() + pool.shares_of(&trader).get();
        prop_assert_eq!(pool.total_shares().get(), sum);
    }

    // 6. Full-exit identity.
    #[test]
    fn burning_the_whole_supply_zeroes_the_pool(
        reserve_a in reserve_strategy(),
        reserve_b in reserve_strategy(),
        fee in fee_strategy(),
    ) {
        let (mut pool, ledger, provider, _) = seeded(fee, reserve_a, reserve_b);

        let Ok((out_a, out_b)) = pool.remove_liquidity(
            &ledger,
            provider,
            pool.total_shares(),
            Amount::ZERO,
            Amount::ZERO,
        ) else {
            panic!("provider owns the whole supply");
        };
        prop_assert_eq!(out_a, Amount::new(reserve_a));
        prop_assert_eq!(out_b, Amount::new(reserve_b));
        prop_assert_eq!(pool.reserve_a(), Amount::ZERO);
        prop_assert_eq!(pool.reserve_b(), Amount::ZERO);
        prop_assert_eq!(pool.total_shares(), Shares::ZERO);
    }

    // 7. Exact-out tightness.
    #[test]
    fn required_input_is_sufficient_for_the_requested_output(
        reserve_a in reserve_strategy(),
        reserve_b in reserve_strategy(),
        desired in 1u128..=9_999u128,
        fee in fee_strategy(),
    ) {
        let reserve_in = Amount::new(reserve_a);
        let reserve_out = Amount::new(reserve_b);
        let desired = Amount::new(desired);

        let Ok(required) = pricing::input_given_output(desired, reserve_in, reserve_out, fee)
        else {
            panic!("desired output is below the reserve bound");
        };
        let Ok(delivered) = pricing::output_given_input(required, reserve_in, reserve_out, fee)
        else {
            panic!("forward quote of the required input");
        };
        prop_assert!(delivered >= desired);
    }
}
