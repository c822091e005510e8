//! Pure constant-product pricing functions.
//!
//! Every function here is stateless and operates on explicit reserve
//! inputs, which keeps the curve exhaustively testable in isolation.
//! The swap invariant is `x · y = k`; the fee is deducted from the input
//! leg before the curve is applied:
//!
//! ```text
//! in_after_fee = amount_in · (den − num)
//! amount_out   = ⌊ in_after_fee · reserve_out / (reserve_in · den + in_after_fee) ⌋
//! ```
//!
//! The single-fraction form folds the fee division into the final floor,
//! so no precision is lost to an intermediate truncation.  Intermediates
//! are computed in 512-bit integers: the widest product is
//! `amount · fee-factor · reserve`, which exceeds 256 bits for full-range
//! `u128` operands.
//!
//! The floor/ceiling choices here are load-bearing — quotes must
//! reproduce the reference vectors bit for bit.

use bnum::cast::As;
use bnum::types::U512;

use crate::domain::{Amount, FeeRate, Rounding};
use crate::error::{AmmError, Result};

fn wide(amount: Amount) -> U512 {
    U512::from(amount.get())
}

fn narrow(value: U512, context: &'static str) -> Result<Amount> {
    if value > U512::from(u128::MAX) {
        return Err(AmmError::Overflow(context));
    }
    Ok(Amount::new(value.as_::<u128>()))
}

/// Computes the output amount for an exact-input swap.
///
/// Zero `amount_in` is legal and quotes to zero.  The result is strictly
/// less than `reserve_out`; a quote that would drain the opposing reserve
/// is reported as insufficient liquidity rather than silently paid out.
///
/// # Errors
///
/// - [`AmmError::InsufficientReserves`] if either reserve is zero (with a
///   non-zero input), or if the computed output would meet or exceed
///   `reserve_out`.
///
/// # Examples
///
/// ```
/// use pairpool::domain::{Amount, FeeRate};
/// use pairpool::pricing::output_given_input;
///
/// let out = output_given_input(
///     Amount::new(100),
///     Amount::new(1_000),
///     Amount::new(2_000),
///     FeeRate::RATE_1_00_PERCENT,
/// )
/// .expect("quote");
/// assert_eq!(out, Amount::new(180));
/// ```
pub fn output_given_input(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeRate,
) -> Result<Amount> {
    if amount_in.is_zero() {
        return Ok(Amount::ZERO);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientReserves);
    }

    let in_after_fee = wide(amount_in) * U512::from(fee.complement());
    let numerator = in_after_fee * wide(reserve_out);
    let denominator = wide(reserve_in) * U512::from(fee.denominator()) + in_after_fee;
    let amount_out = narrow(numerator / denominator, "swap output exceeds 128 bits")?;

    // Asymptote guard.  The floored quotient stays below reserve_out for
    // any positive reserve_in; this backstop keeps reserve exhaustion an
    // error rather than a payout if that ever ceases to hold.
    if amount_out >= reserve_out {
        return Err(AmmError::InsufficientReserves);
    }
    Ok(amount_out)
}

/// Computes the input amount required for an exact-output swap.
///
/// The inverse of [`output_given_input`], rounded up so the pool is never
/// underpaid:
///
/// ```text
/// amount_in = ⌈ reserve_in · amount_out · den / ((reserve_out − amount_out) · (den − num)) ⌉
/// ```
///
/// Zero `amount_out` is legal and requires zero input.
///
/// # Errors
///
/// - [`AmmError::InsufficientReserves`] if either reserve is zero (with a
///   non-zero request), or if `amount_out` meets or exceeds `reserve_out`.
/// - [`AmmError::Overflow`] if the required input does not fit in 128
///   bits.
pub fn input_given_output(
    amount_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeRate,
) -> Result<Amount> {
    if amount_out.is_zero() {
        return Ok(Amount::ZERO);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(AmmError::InsufficientReserves);
    }

    let numerator = wide(reserve_in) * wide(amount_out) * U512::from(fee.denominator());
    let remaining = wide(reserve_out) - wide(amount_out);
    let denominator = remaining * U512::from(fee.complement());
    let quotient = (numerator + denominator - U512::ONE) / denominator;
    narrow(quotient, "swap input exceeds 128 bits")
}

/// Computes the paired deposit for add-liquidity sizing:
/// `⌊ amount_a · reserve_b / reserve_a ⌋`.
///
/// # Errors
///
/// - [`AmmError::InsufficientReserves`] if `reserve_a` is zero; the
///   function is only meaningful against live reserves.
/// - [`AmmError::Overflow`] if the result does not fit in 128 bits.
pub fn proportional(amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> Result<Amount> {
    if reserve_a.is_zero() {
        return Err(AmmError::InsufficientReserves);
    }
    let quotient = wide(amount_a) * wide(reserve_b) / wide(reserve_a);
    narrow(quotient, "paired amount exceeds 128 bits")
}

/// Returns the input-side fee retained by the pool:
/// `amount_in − ⌊ amount_in · (den − num) / den ⌋`.
///
/// The result never exceeds `amount_in`, so the computation is total.
#[must_use]
pub fn fee_on_input(amount_in: Amount, fee: FeeRate) -> Amount {
    let retained = wide(amount_in) * U512::from(fee.complement()) / U512::from(fee.denominator());
    // retained <= amount_in, so the cast back to u128 is lossless.
    Amount::new(amount_in.get() - retained.as_::<u128>())
}

/// Computes `a · b / divisor` over 512-bit intermediates with an
/// explicit rounding direction.
///
/// Used for share mint/burn arithmetic, where `a · b` routinely exceeds
/// 128 bits and the floor direction is what makes the full-exit identity
/// hold.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `divisor` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit in 128 bits.
pub fn mul_div(a: Amount, b: Amount, divisor: Amount, rounding: Rounding) -> Result<Amount> {
    if divisor.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let numerator = wide(a) * wide(b);
    let quotient = match rounding {
        Rounding::Down => numerator / wide(divisor),
        Rounding::Up => (numerator + wide(divisor) - U512::ONE) / wide(divisor),
    };
    narrow(quotient, "quotient exceeds 128 bits")
}
