//! Opaque asset identifier.

use core::fmt;

/// A chain- and backend-agnostic identifier for a fungible asset.
///
/// Wraps a fixed-size `[u8; 32]` byte array.  The all-zero value is the
/// null asset: it never identifies a real asset and is rejected wherever
/// a pair is formed.
///
/// # Examples
///
/// ```
/// use pairpool::domain::AssetId;
///
/// let asset = AssetId::from_bytes([7u8; 32]);
/// assert!(!asset.is_null());
/// assert!(AssetId::NULL.is_null());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetId([u8; 32]);

impl AssetId {
    /// The all-zero null asset, rejected at pair creation.
    pub const NULL: Self = Self([0u8; 32]);

    /// Creates an `AssetId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` if this is the null asset.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for AssetId {
    /// Short hex form (first eight bytes) for logs and error messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "..")
    }
}
