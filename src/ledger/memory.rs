//! In-memory claim-share ledger.

use std::collections::BTreeMap;

use crate::domain::{Address, Amount, OrderId};
use crate::error::TakeProfitError;
use crate::math::CheckedArithmetic;
use crate::traits::ClaimLedger;

/// [`ClaimLedger`] backed by ordered maps.
///
/// Zero balances are removed so that the maps only hold live holdings.
///
/// # Examples
///
/// ```
/// use take_profit_hook::domain::{Address, Amount, OrderId, OrderKey, PoolId, Tick};
/// use take_profit_hook::ledger::MemoryClaimLedger;
/// use take_profit_hook::traits::ClaimLedger;
///
/// let key = OrderKey::new(PoolId::from_bytes([1u8; 32]), Tick::ZERO, true);
/// let id = key.order_id(0);
/// let alice = Address::from_bytes([2u8; 32]);
///
/// let mut ledger = MemoryClaimLedger::new();
/// ledger.mint(&alice, &id, Amount::new(10)).expect("mint");
/// assert_eq!(ledger.balance_of(&alice, &id), Amount::new(10));
/// assert_eq!(ledger.total_supply(&id), Amount::new(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryClaimLedger {
    balances: BTreeMap<(Address, OrderId), Amount>,
    supply: BTreeMap<OrderId, Amount>,
}

impl MemoryClaimLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn set_balance(&mut self, owner: &Address, id: &OrderId, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&(*owner, *id));
        } else {
            self.balances.insert((*owner, *id), amount);
        }
    }

    fn set_supply(&mut self, id: &OrderId, amount: Amount) {
        if amount.is_zero() {
            self.supply.remove(id);
        } else {
            self.supply.insert(*id, amount);
        }
    }

    fn debit(&self, owner: &Address, id: &OrderId, amount: Amount) -> crate::error::Result<Amount> {
        let available = self.balance_of(owner, id);
        available
            .checked_sub(&amount)
            .ok_or(TakeProfitError::InsufficientShares {
                requested: amount.get(),
                available: available.get(),
            })
    }
}

impl ClaimLedger for MemoryClaimLedger {
    fn mint(&mut self, to: &Address, id: &OrderId, amount: Amount) -> crate::error::Result<()> {
        let balance = self.balance_of(to, id).safe_add(&amount)?;
        let supply = self.total_supply(id).safe_add(&amount)?;
        self.set_balance(to, id, balance);
        self.set_supply(id, supply);
        Ok(())
    }

    fn burn(&mut self, from: &Address, id: &OrderId, amount: Amount) -> crate::error::Result<()> {
        let balance = self.debit(from, id, amount)?;
        let supply = self.total_supply(id).safe_sub(&amount)?;
        self.set_balance(from, id, balance);
        self.set_supply(id, supply);
        Ok(())
    }

    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        id: &OrderId,
        amount: Amount,
    ) -> crate::error::Result<()> {
        let debited = self.debit(from, id, amount)?;
        if from == to {
            return Ok(());
        }
        let credited = self.balance_of(to, id).safe_add(&amount)?;
        self.set_balance(from, id, debited);
        self.set_balance(to, id, credited);
        Ok(())
    }

    fn balance_of(&self, owner: &Address, id: &OrderId) -> Amount {
        self.balances
            .get(&(*owner, *id))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn total_supply(&self, id: &OrderId) -> Amount {
        self.supply.get(id).copied().unwrap_or(Amount::ZERO)
    }
}
