//! Outcome of a swap.

use core::fmt;

use super::Amount;
use crate::error::TakeProfitError;

/// Amounts exchanged by a swap, as settled with the sender.
///
/// `amount_in` is the input the pool actually consumed (fee included).
/// It can be below the requested input when a price limit or the end of
/// available liquidity stops the swap early.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
/// - `fee <= amount_in`.
///
/// # Examples
///
/// ```
/// use take_profit_hook::domain::{Amount, SwapResult};
///
/// let result = SwapResult::new(Amount::new(1000), Amount::new(990), Amount::new(3));
/// assert!(result.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapResult {
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapResult {
    /// Creates a new `SwapResult` with validated invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TakeProfitError::InvalidQuantity`] if either amount is
    /// zero or the fee exceeds the input.
    pub const fn new(
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(TakeProfitError::InvalidQuantity(
                "amount_in must be positive",
            ));
        }
        if amount_out.is_zero() {
            return Err(TakeProfitError::InvalidQuantity(
                "amount_out must be positive",
            ));
        }
        if fee.get() > amount_in.get() {
            return Err(TakeProfitError::InvalidQuantity(
                "fee must not exceed amount_in",
            ));
        }
        Ok(Self {
            amount_in,
            amount_out,
            fee,
        })
    }

    /// Returns the consumed input amount.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the output amount.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Returns the fee charged on the input.
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult(in={}, out={}, fee={})",
            self.amount_in, self.amount_out, self.fee
        )
    }
}
