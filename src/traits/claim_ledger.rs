//! Claim-share ledger abstraction.
//!
//! A [`ClaimLedger`] is a multi-asset balance sheet keyed by
//! [`OrderId`]: every order id is its own fungible share class. Shares
//! are minted 1:1 with input placed into an order and burned on
//! cancellation or redemption.
//!
//! # Supply Invariant
//!
//! For every id, `total_supply(id)` equals the sum of `balance_of(_, id)`
//! across all owners. Only `mint` and `burn` change the supply;
//! `transfer` moves balances without changing it.

use crate::domain::{Address, Amount, OrderId};

/// Fungible claim shares per `(owner, OrderId)`.
///
/// # Errors
///
/// Mutating methods return
/// [`InsufficientShares`](crate::error::TakeProfitError::InsufficientShares)
/// when an owner's balance is too low and
/// [`Overflow`](crate::error::TakeProfitError::Overflow) on supply
/// overflow. A failed call changes nothing.
pub trait ClaimLedger {
    /// Mints `amount` shares of `id` to `to`.
    ///
    /// # Errors
    ///
    /// - [`Overflow`](crate::error::TakeProfitError::Overflow) if the
    ///   balance or supply would overflow.
    fn mint(&mut self, to: &Address, id: &OrderId, amount: Amount) -> crate::error::Result<()>;

    /// Burns `amount` shares of `id` held by `from`.
    ///
    /// # Errors
    ///
    /// - [`InsufficientShares`](crate::error::TakeProfitError::InsufficientShares)
    ///   if `from` holds fewer than `amount`.
    fn burn(&mut self, from: &Address, id: &OrderId, amount: Amount) -> crate::error::Result<()>;

    /// Moves `amount` shares of `id` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`InsufficientShares`](crate::error::TakeProfitError::InsufficientShares)
    ///   if `from` holds fewer than `amount`.
    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        id: &OrderId,
        amount: Amount,
    ) -> crate::error::Result<()>;

    /// Returns the shares of `id` held by `owner`.
    #[must_use]
    fn balance_of(&self, owner: &Address, id: &OrderId) -> Amount;

    /// Returns the outstanding supply of `id`.
    #[must_use]
    fn total_supply(&self, id: &OrderId) -> Amount;
}
