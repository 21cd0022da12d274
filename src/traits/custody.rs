//! Per-account token balances.

use crate::domain::{Address, Amount, Currency};

/// Custody of fungible balances keyed by `(owner, currency)`.
///
/// Transfers are all-or-nothing: on error no balance has moved.
pub trait Custody {
    /// Returns the balance of `owner` in `currency` (zero if none).
    #[must_use]
    fn balance_of(&self, owner: &Address, currency: &Currency) -> Amount;

    /// Moves `amount` of `currency` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`InsufficientBalance`](crate::error::TakeProfitError::InsufficientBalance)
    ///   if `from` holds less than `amount`.
    /// - [`Overflow`](crate::error::TakeProfitError::Overflow) if the
    ///   credit overflows.
    fn transfer(
        &mut self,
        currency: &Currency,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> crate::error::Result<()>;
}
