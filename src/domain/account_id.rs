//! Opaque holder identity.

use core::fmt;

/// Identity of a balance holder on the asset ledger.
///
/// Liquidity providers, traders, and pool custody accounts are all
/// `AccountId`s; the engine attaches no meaning to the bytes beyond
/// equality.  Pool custody accounts are minted by the registry with a
/// recognizable prefix (see
/// [`PoolRegistry`](crate::registry::PoolRegistry)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for AccountId {
    /// Short hex form (first eight bytes) for logs and error messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "..")
    }
}
