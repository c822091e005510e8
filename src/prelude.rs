//! Convenience re-exports for common types and traits.
//!
//! A single import brings the frequently used items into scope:
//!
//! ```rust
//! use pairpool::prelude::*;
//! ```

pub use crate::config::PoolConfig;
pub use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, FeeRate, Rounding, RouteOutcome, Shares, SwapOutcome,
};
pub use crate::error::{AmmError, Result};
pub use crate::ledger::{AssetLedger, LedgerError, MemoryLedger};
pub use crate::pool::LiquidityPool;
pub use crate::registry::{PoolHandle, PoolRegistry};
