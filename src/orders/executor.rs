//! Execution of one aggregate order against its pool.

use core::fmt;

use tracing::info;

use super::store::OrderStore;
use crate::domain::{Address, Amount, OrderId, OrderKey, PoolKey, SwapParams};
use crate::error::TakeProfitError;
use crate::traits::PoolManager;

/// Outcome of an executed order key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    order_id: OrderId,
    key: OrderKey,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl Fill {
    /// Id whose holders own the proceeds.
    #[must_use]
    pub const fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// The executed order key.
    #[must_use]
    pub const fn key(&self) -> OrderKey {
        self.key
    }

    /// Input sold (the full pending volume).
    #[must_use]
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Output received for the holders.
    #[must_use]
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Pool fee paid out of the input.
    #[must_use]
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fill(tick={}, zero_for_one={}, in={}, out={})",
            self.key.tick_lower().get(),
            self.key.zero_for_one(),
            self.amount_in,
            self.amount_out
        )
    }
}

/// Swaps the whole pending volume of `key` and records the proceeds.
///
/// The pool is quoted first. Nothing changes unless the quote consumes
/// the entire pending volume, after which the swap and the store update
/// happen together. Returns `None` when the key has nothing pending.
///
/// # Errors
///
/// - [`TakeProfitError::IncompleteExecution`] if the pool cannot absorb
///   the pending volume. When the swap itself settles less than its
///   quote, the store is left untouched but the swap has already
///   happened; only a reverting caller undoes it.
/// - Any error of [`PoolManager::quote`] or [`PoolManager::swap`].
pub fn execute_order<M: PoolManager>(
    manager: &mut M,
    hook_address: Address,
    store: &mut OrderStore,
    key: &OrderKey,
    pool_key: &PoolKey,
) -> crate::error::Result<Option<Fill>> {
    let pending = store.pending(key);
    if pending.is_zero() {
        return Ok(None);
    }
    let pool_id = key.pool_id();
    let params = SwapParams::exact_in(key.zero_for_one(), pending)?;

    let quoted = match manager.quote(&pool_id, &params) {
        Ok(q) => q,
        Err(TakeProfitError::InsufficientLiquidity) => {
            return Err(TakeProfitError::IncompleteExecution {
                requested: pending.get(),
                consumed: 0,
            })
        }
        Err(e) => return Err(e),
    };
    if quoted.amount_in() < pending {
        return Err(TakeProfitError::IncompleteExecution {
            requested: pending.get(),
            consumed: quoted.amount_in().get(),
        });
    }

    let result = manager.swap(hook_address, &pool_id, &params)?;
    if result.amount_in() != pending {
        return Err(TakeProfitError::IncompleteExecution {
            requested: pending.get(),
            consumed: result.amount_in().get(),
        });
    }
    let order_id = store.record_execution(key, pending, result.amount_out())?;
    let fill = Fill {
        order_id,
        key: *key,
        amount_in: pending,
        amount_out: result.amount_out(),
        fee: result.fee(),
    };
    let (_, currency_out) = pool_key.currencies_for(key.zero_for_one());
    info!(
        pool = %pool_id,
        order = %order_id,
        tick = key.tick_lower().get(),
        zero_for_one = key.zero_for_one(),
        amount_in = pending.get(),
        amount_out = result.amount_out().get(),
        %currency_out,
        "take-profit order filled"
    );
    Ok(Some(fill))
}
