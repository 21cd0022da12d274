//! Pool operations that invoke hook callbacks.
//!
//! The router plays the pool engine's role towards the hook: it runs a
//! pool operation, then calls the matching [`Hooks`] callback
//! synchronously with the engine itself.
//!
//! # Failure handling
//!
//! - [`initialize`]: a failing `after_initialize` undoes the pool
//!   creation.
//! The policy for [`swap`] is the hook's own
//! [`Hooks::failure_policy`], read once per swap.
//!
//! - [`swap`] with [`FailurePolicy::Revert`]: the engine and the hook are
//!   snapshotted before the swap and restored if the callback fails.
//! - [`swap`] with [`FailurePolicy::Skip`]: the swap always stands; a
//!   callback error is logged and the receipt is still returned.

use core::fmt;

use tracing::warn;

use crate::config::FailurePolicy;
use crate::domain::{Address, PoolId, PoolKey, SwapParams, SwapResult, Tick};
use crate::traits::{Hooks, PoolManager};

/// Outcome of a routed swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapReceipt {
    result: SwapResult,
    tick_before: Tick,
    tick_after: Tick,
}

impl SwapReceipt {
    /// Result of the trader's swap.
    #[must_use]
    pub const fn result(&self) -> SwapResult {
        self.result
    }

    /// Pool tick before the swap.
    #[must_use]
    pub const fn tick_before(&self) -> Tick {
        self.tick_before
    }

    /// Pool tick right after the swap, before any hook fill.
    #[must_use]
    pub const fn tick_after(&self) -> Tick {
        self.tick_after
    }
}

impl fmt::Display for SwapReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ticks {} -> {}",
            self.result,
            self.tick_before.get(),
            self.tick_after.get()
        )
    }
}

/// Creates a pool and registers it with `hooks`.
///
/// # Errors
///
/// Any error of [`PoolManager::initialize`] or
/// [`Hooks::after_initialize`]; in the latter case the pool is removed
/// again.
pub fn initialize<M, H>(
    manager: &mut M,
    hooks: &mut H,
    key: PoolKey,
    tick: Tick,
) -> crate::error::Result<PoolId>
where
    M: PoolManager + Clone,
    H: Hooks<M>,
{
    let snapshot = manager.clone();
    let pool_id = manager.initialize(key, tick)?;
    if let Err(e) = hooks.after_initialize(manager, &key, tick) {
        *manager = snapshot;
        return Err(e);
    }
    Ok(pool_id)
}

/// Swaps for `sender` and runs the `after_swap` callback.
///
/// # Errors
///
/// - Any error of the swap itself, with nothing changed.
/// - Under a [`FailurePolicy::Revert`] policy of `hooks`, the callback's error, with the
///   engine and `hooks` restored to their state before the swap.
pub fn swap<M, H>(
    manager: &mut M,
    hooks: &mut H,
    sender: Address,
    pool_id: &PoolId,
    params: &SwapParams,
) -> crate::error::Result<SwapReceipt>
where
    M: PoolManager + Clone,
    H: Hooks<M> + Clone,
{
    let key = manager.pool_key(pool_id)?;
    let tick_before = manager.current_tick(pool_id)?;
    let snapshot = match hooks.failure_policy() {
        FailurePolicy::Revert => Some((manager.clone(), hooks.clone())),
        FailurePolicy::Skip => None,
    };

    let result = manager.swap(sender, pool_id, params)?;
    let tick_after = manager.current_tick(pool_id)?;

    if let Err(e) = hooks.after_swap(manager, sender, &key, params, tick_before, tick_after) {
        match snapshot {
            Some((manager_before, hooks_before)) => {
                *manager = manager_before;
                *hooks = hooks_before;
                return Err(e);
            }
            None => warn!(pool = %pool_id, %sender, error = %e, "after_swap failed, swap kept"),
        }
    }
    Ok(SwapReceipt {
        result,
        tick_before,
        tick_after,
    })
}
