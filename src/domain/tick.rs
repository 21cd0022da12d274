//! Discrete price points and tick-spacing alignment.

use core::fmt;

use crate::error::TakeProfitError;

/// Minimum valid tick index (Uniswap v3/v4 standard).
const MIN_TICK: i32 = -887_272;

/// Maximum valid tick index (Uniswap v3/v4 standard).
const MAX_TICK: i32 = 887_272;

/// Largest tick spacing a pool may use.
const MAX_TICK_SPACING: i32 = 32_767;

/// A discrete price point: `price = 1.0001^tick`.
///
/// Valid indices range from [`MIN`](Self::MIN) (`-887272`) to
/// [`MAX`](Self::MAX) (`887272`).
///
/// # Examples
///
/// ```
/// use take_profit_hook::domain::Tick;
///
/// let tick = Tick::new(100);
/// assert!(tick.is_ok());
/// assert!(Tick::new(900_000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(i32);

impl Tick {
    /// Minimum valid tick (`-887272`).
    pub const MIN: Self = Self(MIN_TICK);

    /// Maximum valid tick (`887272`).
    pub const MAX: Self = Self(MAX_TICK);

    /// Neutral tick where `price = 1.0`.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Tick` with range validation.
    ///
    /// # Errors
    ///
    /// Returns [`TakeProfitError::InvalidTick`] if `value` is outside
    /// `[-887272, 887272]`.
    pub const fn new(value: i32) -> crate::error::Result<Self> {
        if value < MIN_TICK || value > MAX_TICK {
            return Err(TakeProfitError::InvalidTick(
                "tick out of range [-887272, 887272]",
            ));
        }
        Ok(Self(value))
    }

    /// Creates a tick, clamping `value` into the valid range.
    pub const fn saturating(value: i32) -> Self {
        if value < MIN_TICK {
            Self::MIN
        } else if value > MAX_TICK {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Returns the underlying tick index.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tick({})", self.0)
    }
}

/// Minimum distance between usable ticks of a pool.
///
/// Order ticks and liquidity-range boundaries are always multiples of
/// the spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSpacing(i32);

impl TickSpacing {
    /// Creates a spacing in `1..=32767`.
    ///
    /// # Errors
    ///
    /// Returns [`TakeProfitError::InvalidConfiguration`] for zero,
    /// negative, or oversized spacings.
    pub const fn new(value: i32) -> crate::error::Result<Self> {
        if value < 1 || value > MAX_TICK_SPACING {
            return Err(TakeProfitError::InvalidConfiguration(
                "tick spacing must be in 1..=32767",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw spacing.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Returns `true` if `tick` is a multiple of the spacing.
    #[must_use]
    pub const fn is_aligned(&self, tick: Tick) -> bool {
        tick.0.rem_euclid(self.0) == 0
    }

    /// Rounds `tick` down to the nearest multiple of the spacing.
    ///
    /// # Errors
    ///
    /// Returns [`TakeProfitError::InvalidTick`] if the aligned value
    /// falls below [`Tick::MIN`].
    pub const fn align_down(&self, tick: Tick) -> crate::error::Result<Tick> {
        Tick::new(tick.0.div_euclid(self.0) * self.0)
    }

    /// Rounds `tick` up to the next multiple of the spacing not below it.
    ///
    /// # Errors
    ///
    /// Returns [`TakeProfitError::InvalidTick`] if the aligned value
    /// exceeds [`Tick::MAX`].
    pub const fn align_up(&self, tick: Tick) -> crate::error::Result<Tick> {
        let floor = tick.0.div_euclid(self.0) * self.0;
        if floor == tick.0 {
            Ok(tick)
        } else {
            Tick::new(floor + self.0)
        }
    }

    /// Aligns an order tick for its direction.
    ///
    /// `zero_for_one` orders round down, the opposite direction rounds up.
    ///
    /// # Errors
    ///
    /// Returns [`TakeProfitError::InvalidTick`] if the aligned value is
    /// out of range.
    pub const fn align_order_tick(
        &self,
        tick: Tick,
        zero_for_one: bool,
    ) -> crate::error::Result<Tick> {
        if zero_for_one {
            self.align_down(tick)
        } else {
            self.align_up(tick)
        }
    }
}

impl fmt::Display for TickSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
