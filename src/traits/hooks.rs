//! Callbacks a pool engine invokes around pool operations.
//!
//! The [`router`](crate::router) calls these synchronously: after a pool
//! is created and after every swap. Implementations receive the engine
//! itself so they can read pool state and trade on it.

use crate::config::FailurePolicy;
use crate::domain::{Address, PoolKey, SwapParams, Tick};

/// Post-operation callbacks for a hook attached to pools.
///
/// `M` is the pool engine the hook trades against.
pub trait Hooks<M> {
    /// How a failing [`after_swap`](Self::after_swap) affects the swap
    /// that triggered it. The router reads this for every swap.
    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::default()
    }

    /// Called once after `key`'s pool is created at `tick`.
    ///
    /// # Errors
    ///
    /// Returning an error aborts pool creation in the router.
    fn after_initialize(
        &mut self,
        manager: &mut M,
        key: &PoolKey,
        tick: Tick,
    ) -> crate::error::Result<()>;

    /// Called after a swap by `sender` moved the pool from `tick_before`
    /// to `tick_after`.
    ///
    /// # Errors
    ///
    /// How an error affects the swap is decided by
    /// [`failure_policy`](Self::failure_policy).
    fn after_swap(
        &mut self,
        manager: &mut M,
        sender: Address,
        key: &PoolKey,
        params: &SwapParams,
        tick_before: Tick,
        tick_after: Tick,
    ) -> crate::error::Result<()>;
}
