//! Tick to sqrt-price conversions for concentrated liquidity pools.
//!
//! The pool tracks `sqrt(price)` where `price = 1.0001^tick` is the
//! amount of `currency1` per unit of `currency0`.
//!
//! # Examples
//!
//! ```
//! use take_profit_hook::domain::Tick;
//! use take_profit_hook::math::{sqrt_price_at_tick, tick_at_sqrt_price};
//!
//! let tick = Tick::new(100).expect("valid tick");
//! let sqrt_price = sqrt_price_at_tick(tick);
//! assert_eq!(tick_at_sqrt_price(sqrt_price), Ok(tick));
//! ```
//!
//! # Precision
//!
//! `f64` arithmetic (`powf`, `ln`). Values within `SNAP_EPSILON` of an
//! integer tick snap to it so that the round trip is exact.

use crate::domain::Tick;
use crate::error::TakeProfitError;

/// Base of the tick-price exponential: `price = BASE^tick`.
const BASE: f64 = 1.0001;

/// Tolerance for snapping a floating-point tick to the nearest integer.
const SNAP_EPSILON: f64 = 1e-9;

/// Returns `sqrt(1.0001^tick)`.
///
/// Every valid tick yields a finite positive value.
#[must_use]
pub fn sqrt_price_at_tick(tick: Tick) -> f64 {
    BASE.powf(f64::from(tick.get()) / 2.0)
}

/// Returns the sqrt price at [`Tick::MIN`].
#[must_use]
pub fn min_sqrt_price() -> f64 {
    sqrt_price_at_tick(Tick::MIN)
}

/// Returns the sqrt price at [`Tick::MAX`].
#[must_use]
pub fn max_sqrt_price() -> f64 {
    sqrt_price_at_tick(Tick::MAX)
}

/// Returns the greatest tick whose sqrt price is at or below `sqrt_price`.
///
/// # Errors
///
/// - [`TakeProfitError::InvalidConfiguration`] if `sqrt_price` is not a
///   finite positive number.
/// - [`TakeProfitError::InvalidTick`] if the tick falls outside the
///   valid range.
pub fn tick_at_sqrt_price(sqrt_price: f64) -> crate::error::Result<Tick> {
    if !sqrt_price.is_finite() || sqrt_price <= 0.0 {
        return Err(TakeProfitError::InvalidConfiguration(
            "sqrt price must be finite and positive",
        ));
    }

    let raw = 2.0 * sqrt_price.ln() / BASE.ln();
    let rounded = raw.round();
    let tick_f64 = if (raw - rounded).abs() < SNAP_EPSILON {
        rounded
    } else {
        raw.floor()
    };

    if tick_f64 < f64::from(Tick::MIN.get()) || tick_f64 > f64::from(Tick::MAX.get()) {
        return Err(TakeProfitError::InvalidTick(
            "sqrt price maps outside the tick range",
        ));
    }

    // In range of i32 after the bounds check above.
    #[allow(clippy::cast_possible_truncation)]
    let tick = tick_f64 as i32;
    Tick::new(tick)
}
