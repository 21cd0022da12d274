//! In-memory multi-pool engine with custody of all balances.
//!
//! [`ClmmPoolManager`] owns every [`ClmmPool`] plus a single balance
//! sheet keyed by `(account, currency)`. Pool reserves are ordinary
//! balances held under the manager's own address: liquidity providers
//! fund them through `modify_liquidity`, and swaps settle against them.

use std::collections::HashMap;

use tracing::debug;

use super::ClmmPool;
use crate::config::ClmmConfig;
use crate::domain::{
    Address, Amount, Currency, ModifyLiquidityParams, PoolId, PoolKey, SwapParams, SwapResult,
    Tick,
};
use crate::error::TakeProfitError;
use crate::math::CheckedArithmetic;
use crate::traits::{Custody, FromConfig, PoolManager};

/// Reference [`PoolManager`] backed by [`ClmmPool`]s.
///
/// Cloning the manager snapshots every pool and balance, which is how
/// the router reverts a swap under
/// [`FailurePolicy::Revert`](crate::config::FailurePolicy::Revert).
///
/// # Examples
///
/// ```
/// use take_profit_hook::domain::{Address, Amount, Currency};
/// use take_profit_hook::pools::ClmmPoolManager;
/// use take_profit_hook::traits::Custody;
///
/// let mut manager = ClmmPoolManager::new(Address::from_bytes([0xee; 32]));
/// let alice = Address::from_bytes([1u8; 32]);
/// let usdc = Currency::from_bytes([2u8; 32]);
/// manager.mint(&alice, &usdc, Amount::new(500)).expect("no overflow");
/// assert_eq!(manager.balance_of(&alice, &usdc), Amount::new(500));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClmmPoolManager {
    address: Address,
    pools: HashMap<PoolId, ClmmPool>,
    balances: HashMap<(Address, Currency), Amount>,
}

impl ClmmPoolManager {
    /// Creates an empty manager holding reserves under `address`.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            pools: HashMap::new(),
            balances: HashMap::new(),
        }
    }

    /// Returns the address that holds pool reserves.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns a registered pool.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::PoolNotFound`].
    pub fn pool(&self, pool_id: &PoolId) -> crate::error::Result<&ClmmPool> {
        self.pools.get(pool_id).ok_or(TakeProfitError::PoolNotFound)
    }

    /// Credits `amount` of `currency` to `owner` out of thin air.
    ///
    /// Funding entry point for simulations and tests.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::Overflow`] if the balance would overflow.
    pub fn mint(
        &mut self,
        owner: &Address,
        currency: &Currency,
        amount: Amount,
    ) -> crate::error::Result<()> {
        let balance = self.balance_of(owner, currency).safe_add(&amount)?;
        self.balances.insert((*owner, *currency), balance);
        Ok(())
    }

    /// Applies two transfers, undoing the first if the second fails.
    fn transfer_both(
        &mut self,
        first: (&Currency, &Address, &Address, Amount),
        second: (&Currency, &Address, &Address, Amount),
    ) -> crate::error::Result<()> {
        let (c0, from0, to0, a0) = first;
        let (c1, from1, to1, a1) = second;
        self.transfer(c0, from0, to0, a0)?;
        if let Err(e) = self.transfer(c1, from1, to1, a1) {
            self.transfer(c0, to0, from0, a0)?;
            return Err(e);
        }
        Ok(())
    }

    fn pool_mut(&mut self, pool_id: &PoolId) -> crate::error::Result<&mut ClmmPool> {
        self.pools
            .get_mut(pool_id)
            .ok_or(TakeProfitError::PoolNotFound)
    }
}

impl Custody for ClmmPoolManager {
    fn balance_of(&self, owner: &Address, currency: &Currency) -> Amount {
        self.balances
            .get(&(*owner, *currency))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn transfer(
        &mut self,
        currency: &Currency,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> crate::error::Result<()> {
        let available = self.balance_of(from, currency);
        let debited = available
            .checked_sub(&amount)
            .ok_or(TakeProfitError::InsufficientBalance {
                needed: amount.get(),
                available: available.get(),
            })?;
        if from == to || amount.is_zero() {
            return Ok(());
        }
        let credited = self.balance_of(to, currency).safe_add(&amount)?;
        self.balances.insert((*from, *currency), debited);
        self.balances.insert((*to, *currency), credited);
        Ok(())
    }
}

impl PoolManager for ClmmPoolManager {
    fn initialize(&mut self, key: PoolKey, tick: Tick) -> crate::error::Result<PoolId> {
        let id = key.id();
        if self.pools.contains_key(&id) {
            return Err(TakeProfitError::PoolAlreadyInitialized);
        }
        let pool = ClmmPool::from_config(&ClmmConfig::new(key, tick)?)?;
        self.pools.insert(id, pool);
        debug!(pool = %id, tick = tick.get(), "pool initialized");
        Ok(id)
    }

    fn pool_key(&self, pool_id: &PoolId) -> crate::error::Result<PoolKey> {
        self.pool(pool_id).map(|p| *p.key())
    }

    fn current_tick(&self, pool_id: &PoolId) -> crate::error::Result<Tick> {
        self.pool(pool_id).map(ClmmPool::current_tick)
    }

    fn swap(
        &mut self,
        sender: Address,
        pool_id: &PoolId,
        params: &SwapParams,
    ) -> crate::error::Result<SwapResult> {
        let pool = self.pool(pool_id)?;
        let quoted = pool.quote(params)?;
        let (currency_in, currency_out) = pool.key().currencies_for(params.zero_for_one());
        let reserve = self.address;

        let available = self.balance_of(&sender, &currency_in);
        if available < quoted.amount_in() {
            return Err(TakeProfitError::InsufficientBalance {
                needed: quoted.amount_in().get(),
                available: available.get(),
            });
        }
        if self.balance_of(&reserve, &currency_out) < quoted.amount_out() {
            return Err(TakeProfitError::InsufficientLiquidity);
        }

        self.transfer_both(
            (&currency_in, &sender, &reserve, quoted.amount_in()),
            (&currency_out, &reserve, &sender, quoted.amount_out()),
        )?;
        let result = self.pool_mut(pool_id)?.swap(params)?;
        debug!(
            pool = %pool_id,
            %sender,
            zero_for_one = params.zero_for_one(),
            amount_in = result.amount_in().get(),
            amount_out = result.amount_out().get(),
            "swap settled"
        );
        Ok(result)
    }

    fn quote(&self, pool_id: &PoolId, params: &SwapParams) -> crate::error::Result<SwapResult> {
        self.pool(pool_id)?.quote(params)
    }

    fn modify_liquidity(
        &mut self,
        sender: Address,
        pool_id: &PoolId,
        params: &ModifyLiquidityParams,
    ) -> crate::error::Result<(Amount, Amount)> {
        let pool = self.pool(pool_id)?;
        let (amount0, amount1) = pool.liquidity_amounts(params)?;
        let currency0 = pool.key().currency0();
        let currency1 = pool.key().currency1();
        let reserve = self.address;
        let (payer, payee) = if params.is_add() {
            (sender, reserve)
        } else {
            (reserve, sender)
        };

        // The position update may still fail (over-removal), so it runs on
        // a copy that is committed only after the transfers succeed.
        let mut updated = pool.clone();
        updated.modify_liquidity(sender, params)?;
        self.transfer_both(
            (&currency0, &payer, &payee, amount0),
            (&currency1, &payer, &payee, amount1),
        )?;
        self.pools.insert(*pool_id, updated);
        debug!(pool = %pool_id, %sender, %params, "liquidity modified");
        Ok((amount0, amount1))
    }
}
