//! Pool identity: the immutable key of a pool and its digest.

use core::fmt;

use sha2::{Digest, Sha256};

use super::{Address, Currency, FeeTier, TickSpacing};
use crate::error::TakeProfitError;

/// The immutable parameters that identify a pool.
///
/// Currencies are canonically ordered so that `currency0 < currency1`,
/// which prevents `(A, B)` and `(B, A)` from naming two pools.
///
/// # Examples
///
/// ```
/// use take_profit_hook::domain::{Address, Currency, FeeTier, PoolKey, TickSpacing};
///
/// let a = Currency::from_bytes([1u8; 32]);
/// let b = Currency::from_bytes([2u8; 32]);
/// let spacing = TickSpacing::new(60).expect("valid spacing");
/// let key = PoolKey::new(b, a, FeeTier::TIER_0_30_PERCENT, spacing, Address::zero())
///     .expect("distinct currencies");
/// assert_eq!(key.currency0(), a);
/// assert_eq!(key.currency1(), b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolKey {
    currency0: Currency,
    currency1: Currency,
    fee: FeeTier,
    tick_spacing: TickSpacing,
    hooks: Address,
}

impl PoolKey {
    /// Creates a canonically ordered pool key.
    ///
    /// # Errors
    ///
    /// Returns [`TakeProfitError::InvalidToken`] if both currencies are
    /// the same and [`TakeProfitError::InvalidFee`] if the fee is not a
    /// usable percentage.
    pub fn new(
        a: Currency,
        b: Currency,
        fee: FeeTier,
        tick_spacing: TickSpacing,
        hooks: Address,
    ) -> crate::error::Result<Self> {
        if a == b {
            return Err(TakeProfitError::InvalidToken(
                "pool requires two distinct currencies",
            ));
        }
        if !fee.is_valid() {
            return Err(TakeProfitError::InvalidFee(
                "fee must be below 10000 basis points",
            ));
        }
        let (currency0, currency1) = if a < b { (a, b) } else { (b, a) };
        Ok(Self {
            currency0,
            currency1,
            fee,
            tick_spacing,
            hooks,
        })
    }

    /// Returns the lower-ordered currency.
    #[must_use]
    pub const fn currency0(&self) -> Currency {
        self.currency0
    }

    /// Returns the higher-ordered currency.
    #[must_use]
    pub const fn currency1(&self) -> Currency {
        self.currency1
    }

    /// Returns the swap fee tier.
    #[must_use]
    pub const fn fee(&self) -> FeeTier {
        self.fee
    }

    /// Returns the tick spacing.
    #[must_use]
    pub const fn tick_spacing(&self) -> TickSpacing {
        self.tick_spacing
    }

    /// Returns the address of the hook attached to the pool.
    #[must_use]
    pub const fn hooks(&self) -> Address {
        self.hooks
    }

    /// Returns `(input, output)` currencies for a swap direction.
    #[must_use]
    pub const fn currencies_for(&self, zero_for_one: bool) -> (Currency, Currency) {
        if zero_for_one {
            (self.currency0, self.currency1)
        } else {
            (self.currency1, self.currency0)
        }
    }

    /// Returns `true` if `currency` is one of the pool's currencies.
    #[must_use]
    pub fn contains(&self, currency: &Currency) -> bool {
        self.currency0 == *currency || self.currency1 == *currency
    }

    /// Computes the pool id: SHA-256 over the key's canonical encoding.
    #[must_use]
    pub fn id(&self) -> PoolId {
        let mut hasher = Sha256::new();
        hasher.update(self.currency0.address().as_bytes());
        hasher.update(self.currency1.address().as_bytes());
        hasher.update(self.fee.basis_points().to_be_bytes());
        hasher.update(self.tick_spacing.get().to_be_bytes());
        hasher.update(self.hooks.as_bytes());
        PoolId(hasher.finalize().into())
    }
}

/// Digest that identifies a pool across the pool engine and the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolId([u8; 32]);

impl PoolId {
    /// Wraps raw digest bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
