//! Integer division with an explicit rounding direction.
//!
//! Amounts owed to a trader round down; amounts taken from a trader
//! round up.
//!
//! # Examples
//!
//! ```
//! use take_profit_hook::domain::Rounding;
//! use take_profit_hook::math::div_round;
//!
//! assert_eq!(div_round(10, 3, Rounding::Down), Some(3));
//! assert_eq!(div_round(10, 3, Rounding::Up), Some(4));
//! assert_eq!(div_round(10, 0, Rounding::Down), None);
//! ```

use crate::domain::Rounding;

/// Divides `numerator` by `denominator`, rounding as requested.
///
/// Returns [`None`] if `denominator` is zero.
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let quotient = numerator / denominator;
    match rounding {
        Rounding::Down => Some(quotient),
        // quotient + 1 cannot overflow: a remainder implies denominator > 1.
        Rounding::Up if numerator % denominator != 0 => Some(quotient + 1),
        Rounding::Up => Some(quotient),
    }
}
