//! The take-profit hook: order lifecycle API and pool callbacks.
//!
//! [`TakeProfitHook`] owns the [`OrderStore`], a [`ClaimLedger`] and the
//! set of pools it is attached to. Traders interact with it directly
//! (place, cancel, redeem, transfer shares); the [`router`](crate::router)
//! drives it through the [`Hooks`] callbacks.
//!
//! # Custody
//!
//! Placed input and execution output are held in the pool engine's
//! custody under [`HookConfig::address`]. Fills swap from that account,
//! redemptions and cancellations pay out of it.
//!
//! # Draining
//!
//! After an external swap the hook executes every pending order the
//! move crossed, then re-reads the pool tick. Its own fills move the
//! price, so while the tick keeps moving and the previous round filled
//! something, another round runs over the window from the previous
//! boundary to the new tick, up to [`HookConfig::max_drain_rounds`].

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::detector::TickWindow;
use super::executor::execute_order;
use super::store::{OrderInfo, OrderStore};
use crate::config::{FailurePolicy, HookConfig};
use crate::domain::{Address, Amount, OrderId, OrderKey, PoolId, PoolKey, SwapParams, Tick};
use crate::error::TakeProfitError;
use crate::ledger::MemoryClaimLedger;
use crate::traits::{ClaimLedger, Custody, FromConfig, Hooks, PoolManager};

/// Execution state of the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Not inside a callback.
    #[default]
    Idle,
    /// Executing crossed orders after a swap.
    Draining,
}

/// Take-profit order book attached to one or more pools.
///
/// # Examples
///
/// ```
/// use take_profit_hook::config::HookConfig;
/// use take_profit_hook::domain::Address;
/// use take_profit_hook::orders::{Phase, TakeProfitHook};
///
/// let hook: TakeProfitHook = TakeProfitHook::new(HookConfig::with_address(
///     Address::from_bytes([0xaa; 32]),
/// ));
/// assert_eq!(hook.phase(), Phase::Idle);
/// assert_eq!(hook.address(), Address::from_bytes([0xaa; 32]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TakeProfitHook<L = MemoryClaimLedger> {
    config: HookConfig,
    store: OrderStore,
    ledger: L,
    pools: BTreeMap<PoolId, PoolKey>,
    last_ticks: BTreeMap<PoolId, Tick>,
    phase: Phase,
}

impl<L: ClaimLedger + Default> TakeProfitHook<L> {
    /// Creates a hook with an empty ledger.
    #[must_use]
    pub fn new(config: HookConfig) -> Self {
        Self::with_ledger(config, L::default())
    }
}

impl<L: ClaimLedger> TakeProfitHook<L> {
    /// Creates a hook that records claim shares in `ledger`.
    #[must_use]
    pub fn with_ledger(config: HookConfig, ledger: L) -> Self {
        Self {
            config,
            store: OrderStore::new(),
            ledger,
            pools: BTreeMap::new(),
            last_ticks: BTreeMap::new(),
            phase: Phase::Idle,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &HookConfig {
        &self.config
    }

    /// Account the hook holds custody under.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.config.address()
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Read access to the order registries.
    #[must_use]
    pub const fn store(&self) -> &OrderStore {
        &self.store
    }

    /// Read access to the claim-share ledger.
    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    fn registered(&self, pool_id: &PoolId) -> crate::error::Result<PoolKey> {
        self.pools
            .get(pool_id)
            .copied()
            .ok_or(TakeProfitError::PoolNotRegistered)
    }

    fn order_key(
        &self,
        pool_id: &PoolId,
        tick: Tick,
        zero_for_one: bool,
    ) -> crate::error::Result<(PoolKey, OrderKey)> {
        let pool_key = self.registered(pool_id)?;
        let aligned = pool_key
            .tick_spacing()
            .align_order_tick(tick, zero_for_one)?;
        Ok((pool_key, OrderKey::new(*pool_id, aligned, zero_for_one)))
    }

    // -- lifecycle ------------------------------------------------------------

    /// Places a take-profit order of `amount` input at `tick`.
    ///
    /// The tick is aligned to the pool spacing: down for `zero_for_one`,
    /// up otherwise. The input currency moves from `caller` into the
    /// hook's custody and `caller` receives `amount` shares of the key's
    /// current order id. Returns the aligned tick.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::InvalidTick`] if `amount` is zero or the
    ///   aligned tick is out of range.
    /// - [`TakeProfitError::PoolNotRegistered`] for an unknown pool.
    /// - [`TakeProfitError::Overflow`] if the pending volume would
    ///   overflow.
    /// - Any custody error, e.g.
    ///   [`TakeProfitError::InsufficientBalance`].
    pub fn place_order<M: Custody>(
        &mut self,
        manager: &mut M,
        caller: Address,
        pool_id: &PoolId,
        tick: Tick,
        zero_for_one: bool,
        amount: Amount,
    ) -> crate::error::Result<Tick> {
        if amount.is_zero() {
            return Err(TakeProfitError::InvalidTick("order amount must be non-zero"));
        }
        let (pool_key, key) = self.order_key(pool_id, tick, zero_for_one)?;
        self.store.check_add(&key, amount)?;
        let (currency_in, _) = pool_key.currencies_for(zero_for_one);
        let hook = self.address();
        let order_id = self.store.current_order_id(&key);

        manager.transfer(&currency_in, &caller, &hook, amount)?;
        if let Err(e) = self.ledger.mint(&caller, &order_id, amount) {
            manager.transfer(&currency_in, &hook, &caller, amount)?;
            return Err(e);
        }
        self.store.add_pending(key, amount)?;
        debug!(
            pool = %pool_id,
            owner = %caller,
            order = %order_id,
            tick = key.tick_lower().get(),
            zero_for_one,
            amount = amount.get(),
            "take-profit order placed"
        );
        Ok(key.tick_lower())
    }

    /// Withdraws `amount` of `caller`'s unexecuted input at `tick`.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::InvalidQuantity`] if `amount` is zero.
    /// - [`TakeProfitError::PoolNotRegistered`] for an unknown pool.
    /// - [`TakeProfitError::InvalidCancellation`] if `amount` exceeds
    ///   the pending volume, which includes keys that already executed.
    /// - [`TakeProfitError::InsufficientShares`] if `caller` holds fewer
    ///   than `amount` shares of the current order id.
    pub fn cancel_order<M: Custody>(
        &mut self,
        manager: &mut M,
        caller: Address,
        pool_id: &PoolId,
        tick: Tick,
        zero_for_one: bool,
        amount: Amount,
    ) -> crate::error::Result<()> {
        if amount.is_zero() {
            return Err(TakeProfitError::InvalidQuantity(
                "cancel amount must be non-zero",
            ));
        }
        let (pool_key, key) = self.order_key(pool_id, tick, zero_for_one)?;
        if self.store.pending(&key) < amount {
            return Err(TakeProfitError::InvalidCancellation(
                "amount exceeds pending volume",
            ));
        }
        let order_id = self.store.current_order_id(&key);
        let available = self.ledger.balance_of(&caller, &order_id);
        if available < amount {
            return Err(TakeProfitError::InsufficientShares {
                requested: amount.get(),
                available: available.get(),
            });
        }

        let (currency_in, _) = pool_key.currencies_for(zero_for_one);
        manager.transfer(&currency_in, &self.address(), &caller, amount)?;
        self.ledger.burn(&caller, &order_id, amount)?;
        self.store.remove_pending(&key, amount)?;
        debug!(
            pool = %pool_id,
            owner = %caller,
            order = %order_id,
            tick = key.tick_lower().get(),
            zero_for_one,
            amount = amount.get(),
            "take-profit order cancelled"
        );
        Ok(())
    }

    /// Redeems `shares` of the most recent execution at `tick` for the
    /// output currency.
    ///
    /// Returns the amount paid out.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::InvalidQuantity`] if `shares` is zero.
    /// - [`TakeProfitError::PoolNotRegistered`] for an unknown pool.
    /// - [`TakeProfitError::NotYetExecuted`] if the key never executed,
    ///   or `caller` only holds shares of its pending epoch.
    /// - [`TakeProfitError::InsufficientShares`] on a short balance.
    pub fn redeem<M: Custody>(
        &mut self,
        manager: &mut M,
        caller: Address,
        pool_id: &PoolId,
        tick: Tick,
        zero_for_one: bool,
        shares: Amount,
    ) -> crate::error::Result<Amount> {
        if shares.is_zero() {
            return Err(TakeProfitError::InvalidQuantity(
                "redeemed shares must be non-zero",
            ));
        }
        let (pool_key, key) = self.order_key(pool_id, tick, zero_for_one)?;
        let order_id = self
            .store
            .last_executed_id(&key)
            .ok_or(TakeProfitError::NotYetExecuted)?;
        // Shares held only in the pending epoch have nothing to redeem yet.
        let current = self.store.current_order_id(&key);
        if self.ledger.balance_of(&caller, &order_id).is_zero()
            && !self.ledger.balance_of(&caller, &current).is_zero()
        {
            return Err(TakeProfitError::NotYetExecuted);
        }
        self.redeem_executed(manager, caller, &pool_key, &key, &order_id, shares)
    }

    /// Redeems `shares` of an explicit order id, e.g. one from an older
    /// epoch.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::InvalidQuantity`] if `shares` is zero.
    /// - [`TakeProfitError::UnknownOrder`] if no order was ever placed
    ///   under `order_id`.
    /// - [`TakeProfitError::NotYetExecuted`] if it has not executed.
    /// - [`TakeProfitError::InsufficientShares`] on a short balance.
    pub fn redeem_order<M: Custody>(
        &mut self,
        manager: &mut M,
        caller: Address,
        order_id: &OrderId,
        shares: Amount,
    ) -> crate::error::Result<Amount> {
        if shares.is_zero() {
            return Err(TakeProfitError::InvalidQuantity(
                "redeemed shares must be non-zero",
            ));
        }
        let info = self
            .store
            .order_info(order_id)
            .ok_or(TakeProfitError::UnknownOrder)?;
        let key = info.key();
        let pool_key = self.registered(&key.pool_id())?;
        self.redeem_executed(manager, caller, &pool_key, &key, order_id, shares)
    }

    fn redeem_executed<M: Custody>(
        &mut self,
        manager: &mut M,
        caller: Address,
        pool_key: &PoolKey,
        key: &OrderKey,
        order_id: &OrderId,
        shares: Amount,
    ) -> crate::error::Result<Amount> {
        let output = self
            .store
            .output(order_id)
            .ok_or(TakeProfitError::NotYetExecuted)?;
        let available = self.ledger.balance_of(&caller, order_id);
        if available < shares {
            return Err(TakeProfitError::InsufficientShares {
                requested: shares.get(),
                available: available.get(),
            });
        }
        let payout = output.payout(shares)?;
        if payout > output.claimable() {
            return Err(TakeProfitError::Overflow(
                "payout exceeds claimable output",
            ));
        }

        let (_, currency_out) = pool_key.currencies_for(key.zero_for_one());
        manager.transfer(&currency_out, &self.address(), &caller, payout)?;
        self.ledger.burn(&caller, order_id, shares)?;
        self.store.record_redemption(order_id, payout)?;
        debug!(
            owner = %caller,
            order = %order_id,
            shares = shares.get(),
            payout = payout.get(),
            "take-profit proceeds redeemed"
        );
        Ok(payout)
    }

    /// Moves `amount` claim shares of `order_id` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::InvalidQuantity`] if `amount` is zero.
    /// - [`TakeProfitError::UnknownOrder`] for an id nobody placed under.
    /// - [`TakeProfitError::InsufficientShares`] on a short balance.
    pub fn transfer_shares(
        &mut self,
        from: Address,
        to: Address,
        order_id: &OrderId,
        amount: Amount,
    ) -> crate::error::Result<()> {
        if amount.is_zero() {
            return Err(TakeProfitError::InvalidQuantity(
                "transferred shares must be non-zero",
            ));
        }
        if self.store.order_info(order_id).is_none() {
            return Err(TakeProfitError::UnknownOrder);
        }
        self.ledger.transfer(&from, &to, order_id, amount)?;
        debug!(%from, %to, order = %order_id, amount = amount.get(), "claim shares transferred");
        Ok(())
    }

    // -- queries --------------------------------------------------------------

    /// Current-epoch order id of an aligned key.
    #[must_use]
    pub fn order_id(&self, pool_id: &PoolId, tick_lower: Tick, zero_for_one: bool) -> OrderId {
        self.store
            .current_order_id(&OrderKey::new(*pool_id, tick_lower, zero_for_one))
    }

    /// Pending input volume of an aligned key.
    #[must_use]
    pub fn pending_orders(&self, pool_id: &PoolId, tick_lower: Tick, zero_for_one: bool) -> Amount {
        self.store
            .pending(&OrderKey::new(*pool_id, tick_lower, zero_for_one))
    }

    /// Output of `order_id` not yet redeemed.
    #[must_use]
    pub fn claimable_output_tokens(&self, order_id: &OrderId) -> Amount {
        self.store.claimable(order_id)
    }

    /// Claim shares of `order_id` held by `owner`.
    #[must_use]
    pub fn share_balance(&self, owner: &Address, order_id: &OrderId) -> Amount {
        self.ledger.balance_of(owner, order_id)
    }

    /// Key and epoch behind `order_id`.
    #[must_use]
    pub fn order_info(&self, order_id: &OrderId) -> Option<OrderInfo> {
        self.store.order_info(order_id)
    }

    /// Key of a registered pool.
    #[must_use]
    pub fn pool_key(&self, pool_id: &PoolId) -> Option<PoolKey> {
        self.pools.get(pool_id).copied()
    }

    /// Pool tick as of the end of the last callback.
    #[must_use]
    pub fn last_tick(&self, pool_id: &PoolId) -> Option<Tick> {
        self.last_ticks.get(pool_id).copied()
    }

    // -- draining -------------------------------------------------------------

    fn drain<M: PoolManager>(
        &mut self,
        manager: &mut M,
        pool_key: &PoolKey,
        tick_before: Tick,
        tick_after: Tick,
    ) -> crate::error::Result<()> {
        let pool_id = pool_key.id();
        let hook = self.address();
        let (mut from, mut to) = (tick_before, tick_after);

        for round in 0..self.config.max_drain_rounds() {
            let window = TickWindow::for_pool(pool_key, from, to);
            let mut filled = 0usize;
            for key in window.crossed_keys(&self.store) {
                match execute_order(manager, hook, &mut self.store, &key, pool_key) {
                    Ok(Some(_)) => filled += 1,
                    Ok(None) => {}
                    Err(e) => match self.config.failure_policy() {
                        FailurePolicy::Skip => warn!(
                            pool = %pool_id,
                            tick = key.tick_lower().get(),
                            zero_for_one = key.zero_for_one(),
                            error = %e,
                            "take-profit fill skipped"
                        ),
                        FailurePolicy::Revert => return Err(e),
                    },
                }
            }

            let current = manager.current_tick(&pool_id)?;
            self.last_ticks.insert(pool_id, current);
            if filled == 0 || current == to {
                break;
            }
            debug!(
                pool = %pool_id,
                round,
                from = to.get(),
                to = current.get(),
                "fills moved the price, draining again"
            );
            from = to;
            to = current;
        }
        Ok(())
    }
}

impl<M: PoolManager, L: ClaimLedger> Hooks<M> for TakeProfitHook<L> {
    fn failure_policy(&self) -> FailurePolicy {
        self.config.failure_policy()
    }

    fn after_initialize(
        &mut self,
        _manager: &mut M,
        key: &PoolKey,
        tick: Tick,
    ) -> crate::error::Result<()> {
        if key.hooks() != self.address() {
            return Err(TakeProfitError::InvalidConfiguration(
                "pool is attached to a different hook",
            ));
        }
        let pool_id = key.id();
        if self.pools.contains_key(&pool_id) {
            return Err(TakeProfitError::PoolAlreadyInitialized);
        }
        self.pools.insert(pool_id, *key);
        self.last_ticks.insert(pool_id, tick);
        debug!(pool = %pool_id, tick = tick.get(), "pool registered with take-profit hook");
        Ok(())
    }

    fn after_swap(
        &mut self,
        manager: &mut M,
        sender: Address,
        key: &PoolKey,
        _params: &SwapParams,
        tick_before: Tick,
        tick_after: Tick,
    ) -> crate::error::Result<()> {
        if sender == self.address() || key.hooks() != self.address() {
            return Ok(());
        }
        if self.phase == Phase::Draining {
            return Err(TakeProfitError::ReentrantExecution);
        }
        let pool_key = self.registered(&key.id())?;

        self.phase = Phase::Draining;
        let outcome = self.drain(manager, &pool_key, tick_before, tick_after);
        self.phase = Phase::Idle;
        outcome
    }
}

impl<L: ClaimLedger + Default> FromConfig<HookConfig> for TakeProfitHook<L> {
    fn from_config(config: &HookConfig) -> crate::error::Result<Self> {
        config.validate()?;
        Ok(Self::new(*config))
    }
}
