//! The asset-custody seam.
//!
//! The engine never holds funds itself: every deposit, withdrawal, and
//! swap leg moves value through an [`AssetLedger`] implementation.  The
//! trait is deliberately small — three atomic operations — so that any
//! token ledger, bank module, or test double can back a pool.
//!
//! The pool trusts its own reserve counters as the authoritative record
//! of what it holds; [`AssetLedger::balance_of`] exists for cross-checks,
//! not for core accounting.

mod memory;

use thiserror::Error;

use crate::domain::{AccountId, Amount, AssetId};

pub use memory::MemoryLedger;

/// Errors raised by an asset ledger.
///
/// Both variants abort the calling pool operation with no reserve or
/// share mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The debited account does not hold enough of the asset.
    #[error("insufficient balance of {asset} held by {holder}")]
    InsufficientBalance {
        /// The asset being moved.
        asset: AssetId,
        /// The account that came up short.
        holder: AccountId,
    },

    /// The transfer lacks prior authorization on the backing ledger.
    #[error("transfer not authorized by the backing ledger")]
    Unauthorized,
}

/// Atomic custody operations over fungible assets.
///
/// Each method either fully succeeds or fails without partial effect.
/// Implementations use interior mutability; calls are synchronous and
/// must not block indefinitely.
///
/// # Contract
///
/// - [`transfer_in`](Self::transfer_in) fails with
///   [`LedgerError::InsufficientBalance`] or
///   [`LedgerError::Unauthorized`] when the payer cannot fund the
///   transfer.  This is a normal, expected failure mode.
/// - [`transfer_out`](Self::transfer_out) fails only when custody does
///   not match the pool's reserve accounting.  Pools treat this as fatal:
///   the failure is logged and surfaced, never swallowed.
pub trait AssetLedger {
    /// Moves `amount` of `asset` from `payer` into the pool's custody.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the payer has insufficient balance or
    /// insufficient prior authorization.
    fn transfer_in(
        &self,
        asset: AssetId,
        payer: AccountId,
        pool: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Moves `amount` of `asset` out of the pool's custody to `payee`.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] on custody-invariant violation.  With
    /// correct reserve accounting this does not occur.
    fn transfer_out(
        &self,
        asset: AssetId,
        pool: AccountId,
        payee: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Returns the current balance of `asset` held by `holder`.
    fn balance_of(&self, asset: AssetId, holder: AccountId) -> Amount;
}
