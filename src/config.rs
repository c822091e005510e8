//! Declarative pool blueprint.

use crate::domain::{AccountId, AssetPair, FeeRate};

/// Immutable parameters for a liquidity pool: the asset pair it serves,
/// the fee rate charged on swaps, and the custody account it holds funds
/// under on the asset ledger.
///
/// All three components are validated newtypes, so a `PoolConfig` is
/// valid by construction.  Pools are created empty from a config; initial
/// reserves arrive through the first add-liquidity call.
///
/// # Examples
///
/// ```
/// use pairpool::config::PoolConfig;
/// use pairpool::domain::{AccountId, AssetId, AssetPair, FeeRate};
///
/// let pair = AssetPair::new(
///     AssetId::from_bytes([1u8; 32]),
///     AssetId::from_bytes([2u8; 32]),
/// )
/// .expect("distinct assets");
///
/// let config = PoolConfig::new(pair, FeeRate::default(), AccountId::from_bytes([9u8; 32]));
/// assert_eq!(config.fee_rate(), FeeRate::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pair: AssetPair,
    fee_rate: FeeRate,
    account: AccountId,
}

impl PoolConfig {
    /// Creates a new `PoolConfig`.
    #[must_use]
    pub const fn new(pair: AssetPair, fee_rate: FeeRate, account: AccountId) -> Self {
        Self {
            pair,
            fee_rate,
            account,
        }
    }

    /// Returns the asset pair.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.pair
    }

    /// Returns the swap fee rate.
    #[must_use]
    pub const fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }

    /// Returns the custody account the pool holds funds under.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }
}
