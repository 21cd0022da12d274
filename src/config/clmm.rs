//! Configuration for reference concentrated-liquidity pools.

use crate::domain::{PoolKey, Tick};
use crate::error::TakeProfitError;

/// Configuration for a [`ClmmPool`](crate::pools::ClmmPool).
///
/// Defines the immutable pool key and the tick the price starts at.
///
/// # Key Relationships
///
/// - Price at tick `i`: `P(i) = 1.0001^i` (`currency1` per `currency0`)
/// - The pool stores `sqrt(P)`.
///
/// # Validation
///
/// - The key's fee tier must be below 100%.
/// - `initial_tick` must lie between the lowest and highest multiples of
///   the tick spacing inside the tick range, so that liquidity can be
///   placed on both sides of the starting price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClmmConfig {
    key: PoolKey,
    initial_tick: Tick,
}

impl ClmmConfig {
    /// Creates a validated `ClmmConfig`.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::InvalidFee`] if the fee tier is 100% or more.
    /// - [`TakeProfitError::InvalidTick`] if `initial_tick` is outside the
    ///   usable range of the spacing.
    pub fn new(key: PoolKey, initial_tick: Tick) -> crate::error::Result<Self> {
        let config = Self { key, initial_tick };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.key.fee().is_valid() {
            return Err(TakeProfitError::InvalidFee(
                "fee tier must be below 10000 basis points (100%)",
            ));
        }
        let spacing = self.key.tick_spacing();
        let lowest = spacing.align_up(Tick::MIN)?;
        let highest = spacing.align_down(Tick::MAX)?;
        if self.initial_tick < lowest || self.initial_tick > highest {
            return Err(TakeProfitError::InvalidTick(
                "initial tick must lie inside the usable tick range",
            ));
        }
        Ok(())
    }

    /// Returns the pool key.
    #[must_use]
    pub const fn key(&self) -> &PoolKey {
        &self.key
    }

    /// Returns the initial tick.
    #[must_use]
    pub const fn initial_tick(&self) -> Tick {
        self.initial_tick
    }
}
