//! Liquidity range changes for concentrated positions.

use core::fmt;

use super::{Tick, TickSpacing};
use crate::error::TakeProfitError;

/// A request to add or remove liquidity over `[tick_lower, tick_upper)`.
///
/// A positive `liquidity_delta` adds liquidity, a negative one removes it.
///
/// # Invariants
///
/// - `tick_lower < tick_upper`.
/// - `liquidity_delta != 0`.
///
/// # Examples
///
/// ```
/// use take_profit_hook::domain::{ModifyLiquidityParams, Tick};
///
/// let lower = Tick::new(-600).expect("valid tick");
/// let upper = Tick::new(600).expect("valid tick");
/// assert!(ModifyLiquidityParams::new(lower, upper, 1_000).is_ok());
/// assert!(ModifyLiquidityParams::new(upper, lower, 1_000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifyLiquidityParams {
    tick_lower: Tick,
    tick_upper: Tick,
    liquidity_delta: i128,
}

impl ModifyLiquidityParams {
    /// Creates a validated liquidity change.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::InvalidTickRange`] if `tick_lower >= tick_upper`.
    /// - [`TakeProfitError::InvalidQuantity`] if `liquidity_delta` is zero.
    pub const fn new(
        tick_lower: Tick,
        tick_upper: Tick,
        liquidity_delta: i128,
    ) -> crate::error::Result<Self> {
        if tick_lower.get() >= tick_upper.get() {
            return Err(TakeProfitError::InvalidTickRange(
                "tick_lower must be below tick_upper",
            ));
        }
        if liquidity_delta == 0 {
            return Err(TakeProfitError::InvalidQuantity(
                "liquidity delta must be non-zero",
            ));
        }
        Ok(Self {
            tick_lower,
            tick_upper,
            liquidity_delta,
        })
    }

    /// Returns the lower bound of the range.
    #[must_use]
    pub const fn tick_lower(&self) -> Tick {
        self.tick_lower
    }

    /// Returns the upper bound of the range.
    #[must_use]
    pub const fn tick_upper(&self) -> Tick {
        self.tick_upper
    }

    /// Returns the signed liquidity change.
    #[must_use]
    pub const fn liquidity_delta(&self) -> i128 {
        self.liquidity_delta
    }

    /// Returns `true` if the change adds liquidity.
    #[must_use]
    pub const fn is_add(&self) -> bool {
        self.liquidity_delta > 0
    }

    /// Returns `true` if both bounds are multiples of `spacing`.
    #[must_use]
    pub const fn is_aligned(&self, spacing: TickSpacing) -> bool {
        spacing.is_aligned(self.tick_lower) && spacing.is_aligned(self.tick_upper)
    }
}

impl fmt::Display for ModifyLiquidityParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) delta={}",
            self.tick_lower.get(),
            self.tick_upper.get(),
            self.liquidity_delta
        )
    }
}
