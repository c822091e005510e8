//! # pairpool
//!
//! A constant-product automated market maker engine: any two fungible
//! assets can be exchanged against a shared liquidity pool, priced
//! algorithmically from current reserves rather than via an order book.
//!
//! The crate is split into a pure pricing core, a stateful pool with a
//! liquidity-share ledger, and a registry that guarantees exactly one
//! canonical pool per unordered asset pair and routes two-hop trades.
//! Asset custody is delegated to an [`AssetLedger`](ledger::AssetLedger)
//! implementation; the engine itself never holds funds.
//!
//! # Quick Start
//!
//! ```rust
//! use pairpool::domain::{AccountId, Amount, AssetId};
//! use pairpool::ledger::MemoryLedger;
//! use pairpool::registry::PoolRegistry;
//!
//! let registry = PoolRegistry::new();
//! let ledger = MemoryLedger::new();
//!
//! let gold = AssetId::from_bytes([1u8; 32]);
//! let silver = AssetId::from_bytes([2u8; 32]);
//! let alice = AccountId::from_bytes([10u8; 32]);
//!
//! ledger.mint(gold, alice, Amount::new(10_000));
//! ledger.mint(silver, alice, Amount::new(10_000));
//!
//! // One canonical pool per pair, created on demand.
//! let pool = registry.get_or_create_pool(gold, silver).expect("valid pair");
//!
//! // Provide liquidity, then trade against it.
//! let minted = pool
//!     .lock()
//!     .add_liquidity(&ledger, alice, Amount::new(2_000), Amount::new(1_000))
//!     .expect("bootstrap deposit");
//! assert!(!minted.is_zero());
//!
//! let outcome = pool
//!     .lock()
//!     .swap_exact_in(&ledger, alice, gold, Amount::new(100), Amount::new(1))
//!     .expect("swap");
//! assert!(outcome.amount_out().get() > 0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer    │  holds a PoolRegistry + an AssetLedger
//! └──────┬───────┘
//!        │ get_or_create_pool(pair) / swap_exact_in_routed(..)
//!        ▼
//! ┌──────────────┐
//! │   Registry    │  one pool per canonical pair, per-pool locking
//! └──────┬───────┘
//!        │ PoolHandle (Arc<Mutex<LiquidityPool>>)
//!        ▼
//! ┌──────────────┐
//! │     Pool      │  reserves + share ledger, operation orchestration
//! └──────┬───────┘
//!        │ quotes                      │ custody
//!        ▼                             ▼
//! ┌──────────────┐              ┌──────────────┐
//! │   Pricing     │              │ Asset Ledger  │
//! └──────────────┘              └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`]   | Newtype value types: [`Amount`](domain::Amount), [`AssetPair`](domain::AssetPair), [`Shares`](domain::Shares), [`FeeRate`](domain::FeeRate), … |
//! | [`pricing`]  | Pure constant-product quote functions over explicit reserves |
//! | [`pool`]     | [`LiquidityPool`](pool::LiquidityPool): reserves, shares, add/remove/swap |
//! | [`registry`] | [`PoolRegistry`](registry::PoolRegistry): canonical pools and routed swaps |
//! | [`ledger`]   | The [`AssetLedger`](ledger::AssetLedger) custody seam and an in-memory implementation |
//! | [`config`]   | [`PoolConfig`](config::PoolConfig) pool blueprint |
//! | [`error`]    | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`]  | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod pool;
pub mod prelude;
pub mod pricing;
pub mod registry;

#[cfg(test)]
mod proptest_properties;
