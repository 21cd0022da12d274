//! Chain-agnostic account and currency identifiers.

use core::fmt;

/// A generic 32-byte account address (trader, hook, or pool engine).
///
/// All 32-byte sequences are valid, so construction is infallible.
///
/// # Examples
///
/// ```
/// use take_profit_hook::domain::Address;
///
/// let addr = Address::from_bytes([1u8; 32]);
/// assert_eq!(addr.as_bytes(), [1u8; 32]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address([u8; 32]);

impl Address {
    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns the all-zero address.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// A fungible currency traded in a pool, identified by its address.
///
/// Currencies order by address; a pool's `currency0` is always the
/// lower of its two currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Currency(Address);

impl Currency {
    /// Creates a currency from its token address.
    #[must_use]
    pub const fn new(address: Address) -> Self {
        Self(address)
    }

    /// Creates a currency from raw address bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(Address::from_bytes(bytes))
    }

    /// Returns the token address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
