//! Swap request types: the amount constraint and the full parameters.

use core::fmt;

use super::Amount;
use crate::error::TakeProfitError;

/// What drives a swap: an exact input amount or an exact output amount.
///
/// The contained amount is always non-zero.
///
/// # Examples
///
/// ```
/// use take_profit_hook::domain::{Amount, SwapSpec};
///
/// assert!(SwapSpec::exact_in(Amount::new(1000)).is_ok());
/// assert!(SwapSpec::exact_in(Amount::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapSpec {
    /// The caller provides an exact input amount.
    ExactIn {
        /// The fixed input amount (always non-zero).
        amount_in: Amount,
    },
    /// The caller requests an exact output amount.
    ExactOut {
        /// The desired output amount (always non-zero).
        amount_out: Amount,
    },
}

impl SwapSpec {
    /// Creates an exact-input specification.
    ///
    /// # Errors
    ///
    /// Returns [`TakeProfitError::InvalidQuantity`] if `amount` is zero.
    pub const fn exact_in(amount: Amount) -> crate::error::Result<Self> {
        if amount.is_zero() {
            return Err(TakeProfitError::InvalidQuantity(
                "swap amount must be non-zero",
            ));
        }
        Ok(Self::ExactIn { amount_in: amount })
    }

    /// Creates an exact-output specification.
    ///
    /// # Errors
    ///
    /// Returns [`TakeProfitError::InvalidQuantity`] if `amount` is zero.
    pub const fn exact_out(amount: Amount) -> crate::error::Result<Self> {
        if amount.is_zero() {
            return Err(TakeProfitError::InvalidQuantity(
                "swap amount must be non-zero",
            ));
        }
        Ok(Self::ExactOut { amount_out: amount })
    }

    /// Extracts the amount regardless of variant.
    pub const fn amount(&self) -> Amount {
        match self {
            Self::ExactIn { amount_in } => *amount_in,
            Self::ExactOut { amount_out } => *amount_out,
        }
    }

    /// Returns `true` for an exact-input specification.
    #[must_use]
    pub const fn is_exact_in(&self) -> bool {
        matches!(self, Self::ExactIn { .. })
    }
}

impl fmt::Display for SwapSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactIn { amount_in } => write!(f, "ExactIn({amount_in})"),
            Self::ExactOut { amount_out } => write!(f, "ExactOut({amount_out})"),
        }
    }
}

/// Full parameters of a swap against one pool.
///
/// `zero_for_one` sells `currency0` and moves the price (and tick) down;
/// the opposite direction moves it up. `sqrt_price_limit` bounds how far
/// the price may move; `None` lets the swap run to the pool's natural
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapParams {
    zero_for_one: bool,
    spec: SwapSpec,
    sqrt_price_limit: Option<f64>,
}

impl SwapParams {
    /// Creates swap parameters without a price limit.
    #[must_use]
    pub const fn new(zero_for_one: bool, spec: SwapSpec) -> Self {
        Self {
            zero_for_one,
            spec,
            sqrt_price_limit: None,
        }
    }

    /// Exact-input swap without a price limit.
    ///
    /// # Errors
    ///
    /// Returns [`TakeProfitError::InvalidQuantity`] if `amount_in` is zero.
    pub const fn exact_in(zero_for_one: bool, amount_in: Amount) -> crate::error::Result<Self> {
        match SwapSpec::exact_in(amount_in) {
            Ok(spec) => Ok(Self::new(zero_for_one, spec)),
            Err(e) => Err(e),
        }
    }

    /// Sets a sqrt-price limit.
    ///
    /// # Errors
    ///
    /// Returns [`TakeProfitError::InvalidConfiguration`] if the limit is
    /// not a finite positive number.
    pub fn with_sqrt_price_limit(mut self, limit: f64) -> crate::error::Result<Self> {
        if !limit.is_finite() || limit <= 0.0 {
            return Err(TakeProfitError::InvalidConfiguration(
                "sqrt price limit must be finite and positive",
            ));
        }
        self.sqrt_price_limit = Some(limit);
        Ok(self)
    }

    /// Returns the swap direction.
    #[must_use]
    pub const fn zero_for_one(&self) -> bool {
        self.zero_for_one
    }

    /// Returns the amount constraint.
    #[must_use]
    pub const fn spec(&self) -> SwapSpec {
        self.spec
    }

    /// Returns the sqrt-price limit, if any.
    #[must_use]
    pub const fn sqrt_price_limit(&self) -> Option<f64> {
        self.sqrt_price_limit
    }
}
