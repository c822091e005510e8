//! Swap fee as an integer rational.

use core::fmt;

use crate::error::AmmError;

/// The swap fee charged on the input leg, as `numerator / denominator`.
///
/// A valid rate is a proper fraction: `denominator > 0` and
/// `numerator < denominator` (a 100% fee would make every swap output
/// zero).  Fees accrue entirely to the pool's reserves, which is why the
/// constant-product value never decreases across swaps.
///
/// # Examples
///
/// ```
/// use pairpool::domain::FeeRate;
///
/// let fee = FeeRate::new(3, 1_000).expect("proper fraction");
/// assert_eq!(fee, FeeRate::default());
/// assert_eq!(fee.complement(), 997);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeeRate {
    numerator: u32,
    denominator: u32,
}

impl FeeRate {
    /// 0.30% — the standard volatile-pair rate and the crate default.
    pub const RATE_0_30_PERCENT: Self = Self {
        numerator: 3,
        denominator: 1_000,
    };

    /// 1.00% — the rate of first-generation single-token exchanges.
    pub const RATE_1_00_PERCENT: Self = Self {
        numerator: 1,
        denominator: 100,
    };

    /// No fee.  Useful for tests where rounding should be the only noise.
    pub const FREE: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    /// Creates a new `FeeRate`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] unless `0 <= numerator <
    /// denominator`.
    pub const fn new(numerator: u32, denominator: u32) -> Result<Self, AmmError> {
        if denominator == 0 {
            return Err(AmmError::InvalidFee("fee denominator must be non-zero"));
        }
        if numerator >= denominator {
            return Err(AmmError::InvalidFee(
                "fee must be strictly less than 100 percent",
            ));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Returns the fee numerator.
    #[must_use]
    pub const fn numerator(&self) -> u32 {
        self.numerator
    }

    /// Returns the fee denominator.
    #[must_use]
    pub const fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Returns `denominator - numerator`, the retained fraction of the
    /// input leg.  Always positive for a valid rate.
    #[must_use]
    pub const fn complement(&self) -> u32 {
        self.denominator - self.numerator
    }

    /// Returns `true` if this rate charges no fee.
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.numerator == 0
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        Self::RATE_0_30_PERCENT
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
