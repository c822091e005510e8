//! Unified error types for the pairpool engine.
//!
//! Every fallible operation across the crate returns [`AmmError`].  All
//! variants describe a local failure of a single operation: by the time an
//! error is returned, no reserve or share mutation has been observed (see
//! the per-operation atomicity notes on
//! [`LiquidityPool`](crate::pool::LiquidityPool)).
//!
//! Custody failures raised by the [`AssetLedger`](crate::ledger::AssetLedger)
//! are carried through as [`AmmError::Ledger`].

use thiserror::Error;

use crate::domain::{Amount, Shares};
use crate::ledger::LedgerError;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Unified error enum for all pool, pricing, and registry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmmError {
    /// An asset identifier is the null asset, or a pair is degenerate.
    #[error("invalid asset: {0}")]
    InvalidAsset(&'static str),

    /// Strict pool creation was requested for a pair that already has one.
    #[error("a pool already exists for this asset pair")]
    PoolAlreadyExists,

    /// No pool is registered for the requested pair.
    #[error("no pool exists for this asset pair")]
    PoolNotFound,

    /// The implied second-asset deposit exceeds what the caller supplied.
    #[error("insufficient paired asset: required {required}, supplied {supplied}")]
    InsufficientPairedAsset {
        /// Amount of the paired asset the current reserve ratio demands.
        required: Amount,
        /// Amount the caller actually supplied.
        supplied: Amount,
    },

    /// A swap or withdrawal result fell below the caller's declared minimum.
    #[error("insufficient output amount: minimum {minimum}, actual {actual}")]
    InsufficientOutputAmount {
        /// The caller's slippage floor.
        minimum: Amount,
        /// What the operation would actually have paid out.
        actual: Amount,
    },

    /// An exact-output swap would consume more input than the caller allowed.
    #[error("excessive input amount: maximum {maximum}, required {required}")]
    ExcessiveInputAmount {
        /// The caller's input ceiling.
        maximum: Amount,
        /// The input the curve actually requires.
        required: Amount,
    },

    /// A share burn request exceeds the caller's holdings.
    #[error("insufficient share balance: requested {requested}, available {available}")]
    InsufficientShareBalance {
        /// Shares the caller asked to burn.
        requested: Shares,
        /// Shares the caller actually owns.
        available: Shares,
    },

    /// The requested output would meet or exceed the opposing reserve, or a
    /// quote was taken against an empty reserve.
    #[error("insufficient reserves for the requested amount")]
    InsufficientReserves,

    /// A quantity is structurally invalid for the requested operation.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// A fee rate does not describe a valid proper fraction.
    #[error("invalid fee rate: {0}")]
    InvalidFee(&'static str),

    /// Intermediate arithmetic left the representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Division by zero in share or quote arithmetic.
    #[error("division by zero")]
    DivisionByZero,

    /// A custody operation failed; the whole operation was aborted.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
