//! Order registries: pending volume, epochs, proceeds and the tick index.
//!
//! The store is plain bookkeeping. It does not move tokens or shares;
//! the lifecycle API and the executor call it after (or before) the
//! corresponding transfers.
//!
//! # Invariants
//!
//! - A tick is in the index for `(pool, direction)` iff its key has
//!   non-zero pending volume.
//! - `epoch(key)` only ever increases, by one per execution.
//! - An [`OrderOutput`] is written exactly once per executed id and
//!   `redeemed_output <= total_output` always holds.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeBounds;

use crate::domain::{Amount, OrderId, OrderKey, PoolId, Rounding, Tick};
use crate::error::TakeProfitError;
use crate::math::{mul_div, CheckedArithmetic};

/// Resolves an order id back to the key and epoch it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderInfo {
    key: OrderKey,
    epoch: u64,
}

impl OrderInfo {
    /// Returns the order key.
    #[must_use]
    pub const fn key(&self) -> OrderKey {
        self.key
    }

    /// Returns the execution epoch of the id.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Proceeds of one executed order id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderOutput {
    total_input: Amount,
    total_output: Amount,
    redeemed_output: Amount,
}

impl OrderOutput {
    /// Input volume that was executed (the pro-rata denominator).
    #[must_use]
    pub const fn total_input(&self) -> Amount {
        self.total_input
    }

    /// Output received by the execution.
    #[must_use]
    pub const fn total_output(&self) -> Amount {
        self.total_output
    }

    /// Output already paid out to redeemers.
    #[must_use]
    pub const fn redeemed_output(&self) -> Amount {
        self.redeemed_output
    }

    /// Output still held for redeemers.
    #[must_use]
    pub const fn claimable(&self) -> Amount {
        match self.total_output.checked_sub(&self.redeemed_output) {
            Some(v) => v,
            None => Amount::ZERO,
        }
    }

    /// Pro-rata output owed for `shares`:
    /// `shares * total_output / total_input`, rounded down.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::DivisionByZero`] if nothing was executed.
    /// - [`TakeProfitError::Overflow`] if the payout exceeds `u128`.
    pub fn payout(&self, shares: Amount) -> crate::error::Result<Amount> {
        mul_div(
            shares.get(),
            self.total_output.get(),
            self.total_input.get(),
            Rounding::Down,
        )
        .map(Amount::new)
    }
}

/// All per-order state owned by the hook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderStore {
    pending: BTreeMap<OrderKey, Amount>,
    epochs: BTreeMap<OrderKey, u64>,
    outputs: BTreeMap<OrderId, OrderOutput>,
    orders: BTreeMap<OrderId, OrderInfo>,
    tick_index: BTreeMap<(PoolId, bool), BTreeSet<Tick>>,
}

impl OrderStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unexecuted input volume of `key`.
    #[must_use]
    pub fn pending(&self, key: &OrderKey) -> Amount {
        self.pending.get(key).copied().unwrap_or(Amount::ZERO)
    }

    /// Number of times `key` has executed.
    #[must_use]
    pub fn epoch(&self, key: &OrderKey) -> u64 {
        self.epochs.get(key).copied().unwrap_or(0)
    }

    /// Id that new placements at `key` contribute to.
    #[must_use]
    pub fn current_order_id(&self, key: &OrderKey) -> OrderId {
        key.order_id(self.epoch(key))
    }

    /// Id of `key` during `epoch`.
    #[must_use]
    pub fn order_id_at(&self, key: &OrderKey, epoch: u64) -> OrderId {
        key.order_id(epoch)
    }

    /// Id of the most recent execution of `key`, if any.
    #[must_use]
    pub fn last_executed_id(&self, key: &OrderKey) -> Option<OrderId> {
        self.epoch(key)
            .checked_sub(1)
            .map(|epoch| key.order_id(epoch))
    }

    /// Key and epoch behind an id that has received placements.
    #[must_use]
    pub fn order_info(&self, id: &OrderId) -> Option<OrderInfo> {
        self.orders.get(id).copied()
    }

    /// Proceeds of an executed id.
    #[must_use]
    pub fn output(&self, id: &OrderId) -> Option<OrderOutput> {
        self.outputs.get(id).copied()
    }

    /// Output of `id` not yet redeemed (zero for unexecuted ids).
    #[must_use]
    pub fn claimable(&self, id: &OrderId) -> Amount {
        self.outputs
            .get(id)
            .map_or(Amount::ZERO, OrderOutput::claimable)
    }

    /// Pending ticks for `(pool, zero_for_one)` inside `range`, ascending.
    #[must_use]
    pub fn pending_ticks<R>(&self, pool: &PoolId, zero_for_one: bool, range: R) -> Vec<Tick>
    where
        R: RangeBounds<Tick>,
    {
        self.tick_index
            .get(&(*pool, zero_for_one))
            .map(|ticks| ticks.range(range).copied().collect())
            .unwrap_or_default()
    }

    /// Checks that `amount` can be added to `key` without overflow.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::Overflow`].
    pub fn check_add(&self, key: &OrderKey, amount: Amount) -> crate::error::Result<()> {
        self.pending(key).safe_add(&amount).map(|_| ())
    }

    /// Adds placed volume to `key` and returns the id it belongs to.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::Overflow`] if pending volume would overflow.
    pub fn add_pending(&mut self, key: OrderKey, amount: Amount) -> crate::error::Result<OrderId> {
        let updated = self.pending(&key).safe_add(&amount)?;
        let epoch = self.epoch(&key);
        let id = key.order_id(epoch);
        self.pending.insert(key, updated);
        self.orders.entry(id).or_insert(OrderInfo { key, epoch });
        if !updated.is_zero() {
            self.index_mut(&key).insert(key.tick_lower());
        }
        Ok(id)
    }

    /// Removes cancelled volume from `key`.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::InvalidCancellation`] if `amount` exceeds the
    ///   pending volume.
    pub fn remove_pending(&mut self, key: &OrderKey, amount: Amount) -> crate::error::Result<()> {
        let updated = self
            .pending(key)
            .checked_sub(&amount)
            .ok_or(TakeProfitError::InvalidCancellation(
                "amount exceeds pending volume",
            ))?;
        self.set_pending(key, updated);
        Ok(())
    }

    /// Records the execution of `key`'s pending volume.
    ///
    /// Zeroes the pending volume, stores the proceeds under the current
    /// id, advances the epoch and removes the tick from the index.
    /// Returns the executed id.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::InvalidQuantity`] if `total_input` differs
    ///   from the pending volume.
    /// - [`TakeProfitError::Overflow`] if the epoch counter is exhausted.
    pub fn record_execution(
        &mut self,
        key: &OrderKey,
        total_input: Amount,
        total_output: Amount,
    ) -> crate::error::Result<OrderId> {
        if total_input.is_zero() || self.pending(key) != total_input {
            return Err(TakeProfitError::InvalidQuantity(
                "executed input must equal the pending volume",
            ));
        }
        let epoch = self.epoch(key);
        let next_epoch = epoch
            .checked_add(1)
            .ok_or(TakeProfitError::Overflow("epoch counter overflow"))?;
        let id = key.order_id(epoch);

        self.outputs.insert(
            id,
            OrderOutput {
                total_input,
                total_output,
                redeemed_output: Amount::ZERO,
            },
        );
        self.orders.entry(id).or_insert(OrderInfo { key: *key, epoch });
        self.epochs.insert(*key, next_epoch);
        self.set_pending(key, Amount::ZERO);
        Ok(id)
    }

    /// Adds a paid-out amount to an executed id's redeemed total.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::NotYetExecuted`] if `id` has no proceeds.
    /// - [`TakeProfitError::Overflow`] if the redeemed total would exceed
    ///   the output.
    pub fn record_redemption(&mut self, id: &OrderId, paid: Amount) -> crate::error::Result<()> {
        let output = self
            .outputs
            .get_mut(id)
            .ok_or(TakeProfitError::NotYetExecuted)?;
        let redeemed = output.redeemed_output.safe_add(&paid)?;
        if redeemed > output.total_output {
            return Err(TakeProfitError::Overflow(
                "redeemed output exceeds total output",
            ));
        }
        output.redeemed_output = redeemed;
        Ok(())
    }

    fn set_pending(&mut self, key: &OrderKey, amount: Amount) {
        if amount.is_zero() {
            self.pending.remove(key);
            let index_key = (key.pool_id(), key.zero_for_one());
            if let Some(ticks) = self.tick_index.get_mut(&index_key) {
                ticks.remove(&key.tick_lower());
                if ticks.is_empty() {
                    self.tick_index.remove(&index_key);
                }
            }
        } else {
            self.pending.insert(*key, amount);
            self.index_mut(key).insert(key.tick_lower());
        }
    }

    fn index_mut(&mut self, key: &OrderKey) -> &mut BTreeSet<Tick> {
        self.tick_index
            .entry((key.pool_id(), key.zero_for_one()))
            .or_default()
    }
}
