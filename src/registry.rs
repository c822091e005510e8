//! The pool registry: one canonical pool per asset pair.
//!
//! The registry is an explicitly constructed object passed to callers
//! (no process-wide global), holding the authoritative pair-to-pool map.
//! Pools are handed out as [`PoolHandle`]s — `Arc<Mutex<LiquidityPool>>`
//! — so every mutating operation holds exclusive access to its pool for
//! its full duration, while pools of different pairs proceed
//! independently.
//!
//! Creation comes in two flavors: [`create_pool`](PoolRegistry::create_pool)
//! is strict and fails on an existing pair, while
//! [`get_or_create_pool`](PoolRegistry::get_or_create_pool) is
//! idempotent.
//!
//! The registry also executes two-hop routed swaps.  Both pools stay
//! locked for the whole route and the final output is checked against
//! the caller's floor before either hop executes, so a failed route
//! leaves both pools untouched — there is no partial execution to roll
//! back.  The intermediate asset moves directly from the first pool's
//! custody to the second pool's; it never passes through the trader.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::config::PoolConfig;
use crate::domain::{AccountId, Amount, AssetId, AssetPair, FeeRate, RouteOutcome};
use crate::error::{AmmError, Result};
use crate::ledger::AssetLedger;
use crate::pool::LiquidityPool;

/// Shared, lockable reference to a registered pool.
///
/// Stable for the caller's lifetime: the registry never destroys a pool.
pub type PoolHandle = Arc<Mutex<LiquidityPool>>;

/// Registry mapping each unordered asset pair to its single pool.
///
/// # Examples
///
/// ```
/// use pairpool::domain::AssetId;
/// use pairpool::registry::PoolRegistry;
///
/// let registry = PoolRegistry::new();
/// let x = AssetId::from_bytes([1u8; 32]);
/// let y = AssetId::from_bytes([2u8; 32]);
///
/// let created = registry.create_pool(x, y).expect("fresh pair");
/// let found = registry.pool(y, x).expect("order-independent lookup");
/// assert!(std::sync::Arc::ptr_eq(&created, &found));
/// ```
#[derive(Debug, Default)]
pub struct PoolRegistry {
    pools: RwLock<HashMap<AssetPair, PoolHandle>>,
    fee_rate: FeeRate,
    pool_seq: AtomicU64,
}

impl PoolRegistry {
    /// Creates an empty registry with the default fee rate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry whose pools will charge `fee_rate`.
    #[must_use]
    pub fn with_fee_rate(fee_rate: FeeRate) -> Self {
        Self {
            pools: RwLock::new(HashMap::new()),
            fee_rate,
            pool_seq: AtomicU64::new(0),
        }
    }

    /// Returns the fee rate applied to pools created by this registry.
    #[must_use]
    pub const fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }

    /// Returns the number of registered pools.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.read().len()
    }

    /// Mints a custody account for the next pool.  The tag prefix keeps
    /// pool accounts recognizable in ledger dumps; the sequence number
    /// keeps them unique within this registry's lifetime.
    fn next_account(&self) -> AccountId {
        let seq = self.pool_seq.fetch_add(1, Ordering::Relaxed);
        let mut bytes = [0u8; 32];
        bytes[..13].copy_from_slice(b"pairpool/pool");
        bytes[24..].copy_from_slice(&seq.to_be_bytes());
        AccountId::from_bytes(bytes)
    }

    fn insert_pool(
        &self,
        pools: &mut HashMap<AssetPair, PoolHandle>,
        pair: AssetPair,
    ) -> PoolHandle {
        let config = PoolConfig::new(pair, self.fee_rate, self.next_account());
        let handle = Arc::new(Mutex::new(LiquidityPool::new(&config)));
        pools.insert(pair, Arc::clone(&handle));
        debug!(pool = %config.account(), "pool created");
        handle
    }

    /// Creates the pool for `(first, second)`, strictly.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] for a null asset or degenerate pair.
    /// - [`AmmError::PoolAlreadyExists`] if the pair already has a pool.
    pub fn create_pool(&self, first: AssetId, second: AssetId) -> Result<PoolHandle> {
        let pair = AssetPair::new(first, second)?;
        let mut pools = self.pools.write();
        if pools.contains_key(&pair) {
            return Err(AmmError::PoolAlreadyExists);
        }
        Ok(self.insert_pool(&mut pools, pair))
    }

    /// Returns the existing pool for `(first, second)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] for a null asset or degenerate pair.
    /// - [`AmmError::PoolNotFound`] if no pool exists for the pair.
    pub fn pool(&self, first: AssetId, second: AssetId) -> Result<PoolHandle> {
        let pair = AssetPair::new(first, second)?;
        self.pool_by_pair(&pair)
    }

    fn pool_by_pair(&self, pair: &AssetPair) -> Result<PoolHandle> {
        self.pools
            .read()
            .get(pair)
            .cloned()
            .ok_or(AmmError::PoolNotFound)
    }

    /// Returns the pool for `(first, second)`, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] for a null asset or degenerate
    /// pair.
    pub fn get_or_create_pool(&self, first: AssetId, second: AssetId) -> Result<PoolHandle> {
        let pair = AssetPair::new(first, second)?;
        let mut pools = self.pools.write();
        if let Some(handle) = pools.get(&pair) {
            return Ok(Arc::clone(handle));
        }
        Ok(self.insert_pool(&mut pools, pair))
    }

    /// Swaps an exact input of `asset_in` for `asset_out` through the
    /// `via` asset, across the two pools `(asset_in, via)` and
    /// `(via, asset_out)`.
    ///
    /// The whole route is atomic: both pools are locked for its duration
    /// and the slippage floor is applied to the final output before any
    /// state changes.  A zero `amount_in` is a legal no-op (with a zero
    /// floor).
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if the endpoints coincide, `via`
    ///   matches an endpoint, or any identifier is null.
    /// - [`AmmError::PoolNotFound`] if either hop has no pool.
    /// - [`AmmError::InsufficientOutputAmount`] if the final output falls
    ///   below `min_amount_out`.
    /// - [`AmmError::InsufficientReserves`] if either hop cannot serve
    ///   its leg.
    /// - [`AmmError::Ledger`] if the trader cannot fund the first hop.
    pub fn swap_exact_in_routed<L: AssetLedger>(
        &self,
        ledger: &L,
        trader: AccountId,
        asset_in: AssetId,
        via: AssetId,
        asset_out: AssetId,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<RouteOutcome> {
        if asset_in == asset_out {
            return Err(AmmError::InvalidAsset("route endpoints must differ"));
        }
        let pair_in = AssetPair::new(asset_in, via)?;
        let pair_out = AssetPair::new(via, asset_out)?;
        let hop_in = self.pool_by_pair(&pair_in)?;
        let hop_out = self.pool_by_pair(&pair_out)?;

        // The pairs are distinct (the endpoints differ), so ordering the
        // two locks by pair key is enough to rule out deadlock between
        // concurrent routes.
        let mut guard_in;
        let mut guard_out;
        if pair_in < pair_out {
            guard_in = hop_in.lock();
            guard_out = hop_out.lock();
        } else {
            guard_out = hop_out.lock();
            guard_in = hop_in.lock();
        }

        if amount_in.is_zero() {
            if !min_amount_out.is_zero() {
                return Err(AmmError::InsufficientOutputAmount {
                    minimum: min_amount_out,
                    actual: Amount::ZERO,
                });
            }
            return Ok(RouteOutcome::new(Amount::ZERO, Amount::ZERO, Amount::ZERO));
        }

        // Quote the whole route against the locked reserves first; the
        // floor check happens before either hop mutates anything.
        let amount_mid = guard_in.quote_output(&asset_in, amount_in)?;
        let amount_out = guard_out.quote_output(&via, amount_mid)?;
        if amount_out < min_amount_out {
            return Err(AmmError::InsufficientOutputAmount {
                minimum: min_amount_out,
                actual: amount_out,
            });
        }

        // Hop 1 pays the intermediate directly into hop 2's custody; hop
        // 2 sees its input as already delivered.
        let hop_out_account = guard_out.account();
        let first = guard_in.swap_leg(
            ledger,
            Some(trader),
            hop_out_account,
            asset_in,
            amount_in,
            Amount::ZERO,
        )?;
        let second = guard_out.swap_leg(
            ledger,
            None,
            trader,
            via,
            first.amount_out(),
            Amount::ZERO,
        )?;

        debug!(
            trader = %trader,
            asset_in = %asset_in,
            via = %via,
            asset_out = %asset_out,
            amount_in = %amount_in,
            amount_out = %second.amount_out(),
            "routed swap executed"
        );
        Ok(RouteOutcome::new(
            amount_in,
            first.amount_out(),
            second.amount_out(),
        ))
    }
}
