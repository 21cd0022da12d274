//! Pool engine boundary: the operations the hook needs from an AMM.
//!
//! [`PoolManager`] is the seam between the order book and whatever
//! concentrated-liquidity engine hosts the pools. It covers the full
//! lifecycle the hook relies on:
//!
//! 1. **Register**: [`PoolManager::initialize`] creates a pool at a tick.
//! 2. **Inspect**: [`PoolManager::pool_key`] and
//!    [`PoolManager::current_tick`].
//! 3. **Trade**: [`PoolManager::swap`] settles against a sender's
//!    custody balances; [`PoolManager::quote`] is the same computation
//!    without any state change.
//! 4. **Provide**: [`PoolManager::modify_liquidity`] adds or removes a
//!    range position.
//!
//! # Settlement Invariant
//!
//! A successful `swap` debits exactly `amount_in` of the input currency
//! from `sender` and credits exactly `amount_out` of the output currency
//! to `sender`. It never debits more than the request allows.
//!
//! # Partial Consumption
//!
//! An exact-input swap may consume less than the requested input when
//! the pool runs out of liquidity or reaches the price limit. Callers
//! that need all-or-nothing behaviour compare the quote's
//! [`amount_in`](crate::domain::SwapResult::amount_in) with the request
//! before swapping.

use super::Custody;
use crate::domain::{
    Address, Amount, ModifyLiquidityParams, PoolId, PoolKey, SwapParams, SwapResult, Tick,
};

/// Multi-pool AMM engine with custody of swap balances.
///
/// # Errors
///
/// Methods that can fail return [`Result`](crate::error::Result). Common
/// variants include:
///
/// - [`PoolNotFound`](crate::error::TakeProfitError::PoolNotFound) for an
///   unknown pool id.
/// - [`InsufficientLiquidity`](crate::error::TakeProfitError::InsufficientLiquidity)
///   when a swap cannot consume any input.
/// - [`InsufficientBalance`](crate::error::TakeProfitError::InsufficientBalance)
///   when `sender` cannot pay.
pub trait PoolManager: Custody {
    /// Creates a pool for `key` with its price at `tick`.
    ///
    /// # Errors
    ///
    /// - [`PoolAlreadyInitialized`](crate::error::TakeProfitError::PoolAlreadyInitialized)
    ///   if the key is already registered.
    fn initialize(&mut self, key: PoolKey, tick: Tick) -> crate::error::Result<PoolId>;

    /// Returns the key of a registered pool.
    ///
    /// # Errors
    ///
    /// - [`PoolNotFound`](crate::error::TakeProfitError::PoolNotFound).
    fn pool_key(&self, pool_id: &PoolId) -> crate::error::Result<PoolKey>;

    /// Returns the pool's current tick.
    ///
    /// # Errors
    ///
    /// - [`PoolNotFound`](crate::error::TakeProfitError::PoolNotFound).
    fn current_tick(&self, pool_id: &PoolId) -> crate::error::Result<Tick>;

    /// Executes a swap and settles it with `sender`.
    ///
    /// # Errors
    ///
    /// - [`PoolNotFound`](crate::error::TakeProfitError::PoolNotFound).
    /// - [`InsufficientLiquidity`](crate::error::TakeProfitError::InsufficientLiquidity)
    ///   if no input can be consumed.
    /// - [`InsufficientBalance`](crate::error::TakeProfitError::InsufficientBalance)
    ///   if `sender` cannot pay the consumed input.
    fn swap(
        &mut self,
        sender: Address,
        pool_id: &PoolId,
        params: &SwapParams,
    ) -> crate::error::Result<SwapResult>;

    /// Computes what [`swap`](Self::swap) would do, without mutating.
    ///
    /// # Errors
    ///
    /// Same as [`swap`](Self::swap), except that balances are not checked.
    fn quote(&self, pool_id: &PoolId, params: &SwapParams) -> crate::error::Result<SwapResult>;

    /// Adds or removes range liquidity owned by `sender`.
    ///
    /// Returns the `(currency0, currency1)` amounts paid in (for adds) or
    /// paid out (for removals).
    ///
    /// # Errors
    ///
    /// - [`InvalidTickRange`](crate::error::TakeProfitError::InvalidTickRange)
    ///   if the bounds are not multiples of the pool's tick spacing.
    /// - [`InsufficientLiquidity`](crate::error::TakeProfitError::InsufficientLiquidity)
    ///   if a removal exceeds the position.
    /// - [`InsufficientBalance`](crate::error::TakeProfitError::InsufficientBalance)
    ///   if `sender` cannot fund an add.
    fn modify_liquidity(
        &mut self,
        sender: Address,
        pool_id: &PoolId,
        params: &ModifyLiquidityParams,
    ) -> crate::error::Result<(Amount, Amount)>;
}
