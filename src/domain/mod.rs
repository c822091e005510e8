//! Fundamental domain value types for the AMM engine.
//!
//! Newtypes with validated constructors: asset and account identities,
//! quantities with checked arithmetic, the canonical asset pair used as
//! the registry key, liquidity shares, fee rates, and swap outcome
//! records.

mod account_id;
mod amount;
mod asset_id;
mod asset_pair;
mod fee_rate;
mod rounding;
mod shares;
mod swap_outcome;

pub use account_id::AccountId;
pub use amount::Amount;
pub use asset_id::AssetId;
pub use asset_pair::AssetPair;
pub use fee_rate::FeeRate;
pub use rounding::Rounding;
pub use shares::Shares;
pub use swap_outcome::{RouteOutcome, SwapOutcome};
