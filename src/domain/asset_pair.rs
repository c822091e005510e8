//! Canonical unordered pair of distinct assets.

use super::AssetId;
use crate::error::AmmError;

/// An unordered pair of distinct, non-null assets in canonical order.
///
/// The constructor sorts the two identifiers so that
/// `asset_a() < asset_b()`, which makes the pair a stable registry key:
/// `(X, Y)` and `(Y, X)` produce the same `AssetPair`.
///
/// # Examples
///
/// ```
/// use pairpool::domain::{AssetId, AssetPair};
///
/// let x = AssetId::from_bytes([1u8; 32]);
/// let y = AssetId::from_bytes([2u8; 32]);
///
/// let pair = AssetPair::new(y, x).expect("distinct assets");
/// assert_eq!(pair.asset_a(), x);
/// assert_eq!(pair.asset_b(), y);
/// assert_eq!(pair, AssetPair::new(x, y).expect("distinct assets"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetPair {
    asset_a: AssetId,
    asset_b: AssetId,
}

impl AssetPair {
    /// Creates a canonically ordered `AssetPair`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if either identifier is the null
    /// asset or if both identifiers are equal.
    pub fn new(first: AssetId, second: AssetId) -> Result<Self, AmmError> {
        if first.is_null() || second.is_null() {
            return Err(AmmError::InvalidAsset("the null asset cannot be pooled"));
        }
        if first == second {
            return Err(AmmError::InvalidAsset(
                "a pair requires two distinct assets",
            ));
        }

        let (asset_a, asset_b) = if first < second {
            (first, second)
        } else {
            (second, first)
        };

        Ok(Self { asset_a, asset_b })
    }

    /// Returns the first asset in canonical order (lower identifier).
    #[must_use]
    pub const fn asset_a(&self) -> AssetId {
        self.asset_a
    }

    /// Returns the second asset in canonical order (higher identifier).
    #[must_use]
    pub const fn asset_b(&self) -> AssetId {
        self.asset_b
    }

    /// Returns `true` if `asset` is one of the pair's members.
    #[must_use]
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.asset_a == *asset || self.asset_b == *asset
    }

    /// Returns the counterpart of `asset` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if `asset` is not a member.
    pub fn other(&self, asset: &AssetId) -> Result<AssetId, AmmError> {
        if *asset == self.asset_a {
            Ok(self.asset_b)
        } else if *asset == self.asset_b {
            Ok(self.asset_a)
        } else {
            Err(AmmError::InvalidAsset("asset is not part of this pair"))
        }
    }
}
