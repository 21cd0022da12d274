//! Pool swap fee tiers in basis points.

use core::fmt;

/// Basis points that represent 100%.
const MAX_BPS: u32 = 10_000;

/// The fee charged on swap input, in basis points (1 bp = 0.01%).
///
/// Any `u32` is accepted at construction; [`is_valid`](Self::is_valid)
/// reports whether it is a usable percentage. Pool configuration rejects
/// invalid tiers.
///
/// # Examples
///
/// ```
/// use take_profit_hook::domain::FeeTier;
///
/// let tier = FeeTier::TIER_0_30_PERCENT;
/// assert_eq!(tier.basis_points(), 30);
/// assert!(tier.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeTier(u32);

impl FeeTier {
    /// 0.05% fee (5 bp).
    pub const TIER_0_05_PERCENT: Self = Self(5);

    /// 0.30% fee (30 bp).
    pub const TIER_0_30_PERCENT: Self = Self(30);

    /// 1.00% fee (100 bp).
    pub const TIER_1_00_PERCENT: Self = Self(100);

    /// Creates a fee tier from raw basis points.
    #[must_use]
    pub const fn new(basis_points: u32) -> Self {
        Self(basis_points)
    }

    /// Returns the raw basis points.
    #[must_use]
    pub const fn basis_points(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the fee is strictly below 100%.
    ///
    /// A 100% fee would leave no input to price, so it is unusable.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 < MAX_BPS
    }

    /// Returns the fee as a fraction of one (`30 bp -> 0.003`).
    #[must_use]
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / f64::from(MAX_BPS)
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
