//! Arithmetic utilities for order accounting and the reference pool.
//!
//! [`CheckedArithmetic`] for overflow-safe amount operations,
//! [`div_round`] and [`mul_div`] for explicit rounding, and tick math
//! helpers.

mod checked;
mod rounding;
mod tick_math;

pub use checked::{mul_div, CheckedArithmetic};
pub use rounding::div_round;
pub use tick_math::{max_sqrt_price, min_sqrt_price, sqrt_price_at_tick, tick_at_sqrt_price};
