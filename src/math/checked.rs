//! Checked arithmetic for amounts and 256-bit proportional scaling.
//!
//! [`CheckedArithmetic`] turns the `Option`-returning methods on
//! [`Amount`] into [`Result`](crate::error::Result)s with a specific
//! error variant. [`mul_div`] computes `a * b / d` through a 256-bit
//! intermediate, which is how pro-rata payouts avoid overflow when both
//! share counts and outputs are near `u128::MAX`.
//!
//! # Examples
//!
//! ```
//! use take_profit_hook::domain::{Amount, Rounding};
//! use take_profit_hook::math::{mul_div, CheckedArithmetic};
//!
//! let sum = Amount::new(100).safe_add(&Amount::new(200));
//! assert_eq!(sum, Ok(Amount::new(300)));
//! assert_eq!(mul_div(u128::MAX, 2, 4, Rounding::Down), Ok(u128::MAX / 2));
//! ```

use ethnum::U256;

use crate::domain::{Amount, Rounding};
use crate::error::TakeProfitError;

/// Fallible arithmetic for domain wrapper types.
///
/// # Contract
///
/// - No panics: every error condition produces `Err`.
/// - No saturation: errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`TakeProfitError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_add(&self, other: &Self) -> crate::error::Result<Self>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`TakeProfitError::Underflow`] if the result would be
    /// negative.
    fn safe_sub(&self, other: &Self) -> crate::error::Result<Self>;

    /// Checked division with explicit [`Rounding`] direction.
    ///
    /// # Errors
    ///
    /// Returns [`TakeProfitError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> crate::error::Result<Self>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> crate::error::Result<Self> {
        self.checked_add(other)
            .ok_or(TakeProfitError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> crate::error::Result<Self> {
        self.checked_sub(other)
            .ok_or(TakeProfitError::Underflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> crate::error::Result<Self> {
        self.checked_div(other, rounding)
            .ok_or(TakeProfitError::DivisionByZero)
    }
}

/// Computes `a * b / denominator` with a 256-bit intermediate product.
///
/// # Errors
///
/// - [`TakeProfitError::DivisionByZero`] if `denominator` is zero.
/// - [`TakeProfitError::Overflow`] if the quotient does not fit in `u128`.
pub fn mul_div(
    a: u128,
    b: u128,
    denominator: u128,
    rounding: Rounding,
) -> crate::error::Result<u128> {
    if denominator == 0 {
        return Err(TakeProfitError::DivisionByZero);
    }
    let product = U256::from(a) * U256::from(b);
    let d = U256::from(denominator);
    let mut quotient = product / d;
    if rounding.is_up() && product % d != U256::ZERO {
        quotient += U256::ONE;
    }
    let (high, low) = quotient.into_words();
    if high != 0 {
        return Err(TakeProfitError::Overflow("mul_div result exceeds u128"));
    }
    Ok(low)
}
