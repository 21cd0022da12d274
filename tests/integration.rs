//! Integration tests exercising the hook end to end through the router.
//!
//! These tests verify complete flows through the public API: placement,
//! cancellation, crossing detection in both directions, epochs,
//! pro-rata redemption, share transfers, iterative draining and the
//! failure policies.
//!
//! These tests require the reference pool engine.

#![cfg(feature = "clmm")]
#![allow(clippy::panic)]

use take_profit_hook::config::{FailurePolicy, HookConfig};
use take_profit_hook::domain::{
    Address, Amount, Currency, FeeTier, ModifyLiquidityParams, OrderId, PoolId, PoolKey,
    SwapParams, Tick, TickSpacing,
};
use take_profit_hook::error::TakeProfitError;
use take_profit_hook::orders::TakeProfitHook;
use take_profit_hook::pools::ClmmPoolManager;
use take_profit_hook::router::{self, SwapReceipt};
use take_profit_hook::traits::{ClaimLedger, Custody, Hooks, PoolManager};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const WHOLE: u128 = 1_000_000_000_000_000_000;
const FUNDING: u128 = 10_000 * WHOLE;

const RESERVE: Address = Address::from_bytes([0xee; 32]);
const HOOK: Address = Address::from_bytes([0xaa; 32]);
const LP: Address = Address::from_bytes([0x10; 32]);
const ALICE: Address = Address::from_bytes([0x01; 32]);
const BOB: Address = Address::from_bytes([0x02; 32]);
const CAROL: Address = Address::from_bytes([0x03; 32]);
const TRADER: Address = Address::from_bytes([0x04; 32]);

const C0: Currency = Currency::from_bytes([1u8; 32]);
const C1: Currency = Currency::from_bytes([2u8; 32]);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn tick(v: i32) -> Tick {
    let Ok(t) = Tick::new(v) else {
        panic!("valid tick");
    };
    t
}

fn amount(whole: u128) -> Amount {
    Amount::new(whole * WHOLE)
}

fn pool_key() -> PoolKey {
    let Ok(spacing) = TickSpacing::new(60) else {
        panic!("valid spacing");
    };
    let Ok(key) = PoolKey::new(C0, C1, FeeTier::TIER_0_30_PERCENT, spacing, HOOK) else {
        panic!("valid key");
    };
    key
}

/// A live pool at tick 0 with liquidity `liquidity` over `[-range, range)`.
struct Market {
    manager: ClmmPoolManager,
    hook: TakeProfitHook,
    pool: PoolId,
}

impl Market {
    fn with_liquidity(config: HookConfig, range: i32, liquidity: u128) -> Self {
        init_tracing();
        let mut manager = ClmmPoolManager::new(RESERVE);
        for who in [LP, ALICE, BOB, CAROL, TRADER] {
            for c in [C0, C1] {
                let Ok(()) = manager.mint(&who, &c, Amount::new(FUNDING)) else {
                    panic!("mint failed");
                };
            }
        }
        let mut hook: TakeProfitHook = TakeProfitHook::new(config);
        let Ok(pool) = router::initialize(&mut manager, &mut hook, pool_key(), Tick::ZERO) else {
            panic!("initialize failed");
        };
        let Ok(params) = ModifyLiquidityParams::new(tick(-range), tick(range), liquidity as i128)
        else {
            panic!("valid liquidity params");
        };
        let Ok(_) = manager.modify_liquidity(LP, &pool, &params) else {
            panic!("modify_liquidity failed");
        };
        Self {
            manager,
            hook,
            pool,
        }
    }

    fn deep() -> Self {
        Self::with_liquidity(HookConfig::with_address(HOOK), 6_000, 1_000 * WHOLE)
    }

    fn thin(policy: FailurePolicy) -> Self {
        let Ok(config) = HookConfig::new(HOOK, policy, 8) else {
            panic!("valid config");
        };
        Self::with_liquidity(config, 600, WHOLE)
    }

    fn place(&mut self, who: Address, t: i32, zero_for_one: bool, amount: Amount) -> Tick {
        let Ok(aligned) =
            self.hook
                .place_order(&mut self.manager, who, &self.pool, tick(t), zero_for_one, amount)
        else {
            panic!("place_order failed");
        };
        aligned
    }

    fn try_swap(
        &mut self,
        zero_for_one: bool,
        amount_in: Amount,
    ) -> take_profit_hook::error::Result<SwapReceipt> {
        let Ok(params) = SwapParams::exact_in(zero_for_one, amount_in) else {
            panic!("valid swap params");
        };
        router::swap(&mut self.manager, &mut self.hook, TRADER, &self.pool, &params)
    }

    fn swap(&mut self, zero_for_one: bool, amount_in: Amount) -> SwapReceipt {
        let Ok(receipt) = self.try_swap(zero_for_one, amount_in) else {
            panic!("swap failed");
        };
        receipt
    }

    fn pending(&self, t: i32, zero_for_one: bool) -> Amount {
        self.hook.pending_orders(&self.pool, tick(t), zero_for_one)
    }

    fn order_id(&self, t: i32, zero_for_one: bool) -> OrderId {
        self.hook.order_id(&self.pool, tick(t), zero_for_one)
    }

    fn current_tick(&self) -> Tick {
        let Ok(t) = self.manager.current_tick(&self.pool) else {
            panic!("pool exists");
        };
        t
    }

    fn balance(&self, who: &Address, currency: &Currency) -> Amount {
        self.manager.balance_of(who, currency)
    }
}

// ---------------------------------------------------------------------------
// Placement and cancellation
// ---------------------------------------------------------------------------

#[test]
fn placement_aligns_and_mints_shares() {
    let mut m = Market::deep();
    let aligned = m.place(ALICE, 100, true, amount(10));

    assert_eq!(aligned, tick(60));
    assert_eq!(m.balance(&ALICE, &C0), Amount::new(FUNDING - 10 * WHOLE));
    assert_eq!(m.balance(&HOOK, &C0), amount(10));
    assert_eq!(m.pending(60, true), amount(10));
    assert_eq!(m.hook.share_balance(&ALICE, &m.order_id(60, true)), amount(10));
}

#[test]
fn full_cancel_restores_balance() {
    let mut m = Market::deep();
    m.place(ALICE, 100, true, amount(10));
    let Ok(()) = m
        .hook
        .cancel_order(&mut m.manager, ALICE, &m.pool, tick(100), true, amount(10))
    else {
        panic!("cancel failed");
    };

    assert_eq!(m.balance(&ALICE, &C0), Amount::new(FUNDING));
    assert_eq!(m.balance(&HOOK, &C0), Amount::ZERO);
    assert_eq!(m.pending(60, true), Amount::ZERO);
    assert_eq!(m.hook.share_balance(&ALICE, &m.order_id(60, true)), Amount::ZERO);
}

#[test]
fn placements_at_same_key_share_one_order() {
    let mut m = Market::deep();
    m.place(ALICE, 100, true, amount(3));
    m.place(BOB, 61, true, amount(7));
    let id = m.order_id(60, true);

    assert_eq!(m.pending(60, true), amount(10));
    assert_eq!(m.hook.share_balance(&ALICE, &id), amount(3));
    assert_eq!(m.hook.share_balance(&BOB, &id), amount(7));
    assert_eq!(m.hook.ledger().total_supply(&id), amount(10));
}

// ---------------------------------------------------------------------------
// Crossing detection
// ---------------------------------------------------------------------------

#[test]
fn downward_swap_executes_opposite_direction_order() {
    let mut m = Market::deep();
    let aligned = m.place(ALICE, -100, false, amount(10));
    assert_eq!(aligned, tick(-60));
    let id = m.order_id(-60, false);

    let receipt = m.swap(true, amount(20));
    assert!(receipt.tick_after() < tick(-120));

    assert_eq!(m.pending(-60, false), Amount::ZERO);
    let claimable = m.hook.claimable_output_tokens(&id);
    assert!(claimable.get() > 0);
    assert_eq!(claimable, m.balance(&HOOK, &C0));
    assert_eq!(m.balance(&HOOK, &C1), Amount::ZERO);
}

#[test]
fn upward_swap_executes_every_crossed_tick() {
    let mut m = Market::deep();
    m.place(ALICE, 60, true, amount(10));
    m.place(BOB, 120, true, amount(10));
    m.place(CAROL, 180, true, amount(10));

    let receipt = m.swap(false, amount(20));
    assert!(receipt.tick_after() > tick(180));

    for t in [60, 120, 180] {
        assert_eq!(m.pending(t, true), Amount::ZERO);
    }
    assert_eq!(m.balance(&HOOK, &C0), Amount::ZERO);
    assert!(m.current_tick() < receipt.tick_after());
}

#[test]
fn orders_beyond_the_move_stay_pending() {
    let mut m = Market::deep();
    m.place(ALICE, 60, true, amount(1));
    m.place(BOB, 1_200, true, amount(1));

    m.swap(false, amount(20));
    assert_eq!(m.pending(60, true), Amount::ZERO);
    assert_eq!(m.pending(1_200, true), amount(1));
}

#[test]
fn execution_leaves_other_direction_untouched() {
    let mut m = Market::deep();
    m.place(ALICE, 60, true, amount(10));
    m.place(BOB, 60, false, amount(10));

    m.swap(false, amount(20));
    assert_eq!(m.pending(60, true), Amount::ZERO);
    assert_eq!(m.pending(60, false), amount(10));
}

#[test]
fn rerunning_a_drained_window_changes_nothing() {
    let mut m = Market::deep();
    m.place(ALICE, 60, true, amount(10));
    let receipt = m.swap(false, amount(20));

    let hook_before = m.hook.clone();
    let manager_before = m.manager.clone();
    let Ok(params) = SwapParams::exact_in(false, amount(20)) else {
        panic!("valid params");
    };
    let Ok(()) = m.hook.after_swap(
        &mut m.manager,
        TRADER,
        &pool_key(),
        &params,
        receipt.tick_before(),
        receipt.tick_after(),
    ) else {
        panic!("after_swap failed");
    };
    assert_eq!(m.hook, hook_before);
    assert_eq!(m.manager, manager_before);
}

// ---------------------------------------------------------------------------
// Iterative draining
// ---------------------------------------------------------------------------

#[test]
fn fills_that_move_price_trigger_follow_up_round() {
    let mut m = Market::deep();
    m.place(ALICE, 60, true, amount(10));
    // Not crossed by the upward swap; the fill at 60 pushes the price
    // back down through it.
    m.place(BOB, 300, false, amount(10));

    let receipt = m.swap(false, amount(20));
    assert!(receipt.tick_after() > tick(300));
    assert_eq!(m.pending(60, true), Amount::ZERO);
    assert_eq!(m.pending(300, false), Amount::ZERO);
    assert_eq!(m.hook.last_tick(&m.pool), Some(m.current_tick()));
}

#[test]
fn drain_round_cap_limits_follow_up_rounds() {
    let Ok(config) = HookConfig::new(HOOK, FailurePolicy::Skip, 1) else {
        panic!("valid config");
    };
    let mut m = Market::with_liquidity(config, 6_000, 1_000 * WHOLE);
    m.place(ALICE, 60, true, amount(10));
    m.place(BOB, 300, false, amount(10));

    m.swap(false, amount(20));
    assert_eq!(m.pending(60, true), Amount::ZERO);
    assert_eq!(m.pending(300, false), amount(10));
}

// ---------------------------------------------------------------------------
// Epochs and redemption
// ---------------------------------------------------------------------------

#[test]
fn redemption_pays_pro_rata_output() {
    let mut m = Market::deep();
    m.place(ALICE, 60, true, amount(3));
    m.place(BOB, 60, true, amount(7));
    let id = m.order_id(60, true);
    m.swap(false, amount(20));

    let total = m.hook.claimable_output_tokens(&id);
    assert!(total.get() > 0);

    let Ok(first) = m.hook.redeem(&mut m.manager, ALICE, &m.pool, tick(60), true, amount(1)) else {
        panic!("redeem failed");
    };
    let Ok(second) = m.hook.redeem(&mut m.manager, ALICE, &m.pool, tick(60), true, amount(2)) else {
        panic!("redeem failed");
    };
    let Ok(bob) = m.hook.redeem(&mut m.manager, BOB, &m.pool, tick(60), true, amount(7)) else {
        panic!("redeem failed");
    };

    let paid = first.get() + second.get() + bob.get();
    assert!(paid <= total.get());
    assert!(total.get() - paid <= 2);
    assert_eq!(
        m.balance(&ALICE, &C1),
        Amount::new(FUNDING + first.get() + second.get())
    );
    assert_eq!(
        m.hook.claimable_output_tokens(&id),
        Amount::new(total.get() - paid)
    );
    assert_eq!(m.hook.share_balance(&ALICE, &id), Amount::ZERO);
    assert_eq!(
        m.hook
            .redeem(&mut m.manager, BOB, &m.pool, tick(60), true, Amount::new(1)),
        Err(TakeProfitError::InsufficientShares {
            requested: 1,
            available: 0
        })
    );
}

#[test]
fn new_epoch_does_not_share_earlier_proceeds() {
    let mut m = Market::deep();
    m.place(ALICE, 60, true, amount(10));
    let first = m.order_id(60, true);
    m.swap(false, amount(20));
    assert!(m.current_tick() > tick(60));

    m.place(BOB, 60, true, amount(10));
    let second = m.order_id(60, true);
    assert_ne!(first, second);
    assert_eq!(m.hook.claimable_output_tokens(&second), Amount::ZERO);
    assert_eq!(
        m.hook
            .redeem(&mut m.manager, BOB, &m.pool, tick(60), true, amount(10)),
        Err(TakeProfitError::NotYetExecuted)
    );
    assert_eq!(
        m.hook.redeem_order(&mut m.manager, BOB, &second, amount(10)),
        Err(TakeProfitError::NotYetExecuted)
    );
    // Carol holds neither epoch.
    assert_eq!(
        m.hook
            .redeem(&mut m.manager, CAROL, &m.pool, tick(60), true, amount(10)),
        Err(TakeProfitError::InsufficientShares {
            requested: 10 * WHOLE,
            available: 0
        })
    );

    // Move the price below the key and back up through it.
    m.swap(true, amount(10));
    assert!(m.current_tick() < tick(60));
    assert_eq!(m.pending(60, true), amount(10));
    m.swap(false, amount(10));
    assert_eq!(m.pending(60, true), Amount::ZERO);

    let Some(info) = m.hook.order_info(&second) else {
        panic!("second epoch registered");
    };
    assert_eq!(info.epoch(), 1);

    let Ok(bob_paid) = m.hook.redeem(&mut m.manager, BOB, &m.pool, tick(60), true, amount(10))
    else {
        panic!("redeem failed");
    };
    let Ok(alice_paid) = m.hook.redeem_order(&mut m.manager, ALICE, &first, amount(10)) else {
        panic!("redeem_order failed");
    };
    assert!(bob_paid.get() > 0);
    assert!(alice_paid.get() > 0);
    assert_eq!(m.hook.claimable_output_tokens(&first), Amount::ZERO);
    assert_eq!(m.hook.claimable_output_tokens(&second), Amount::ZERO);
}

#[test]
fn cancel_after_execution_rejected() {
    let mut m = Market::deep();
    m.place(ALICE, 60, true, amount(10));
    m.swap(false, amount(20));
    assert!(matches!(
        m.hook
            .cancel_order(&mut m.manager, ALICE, &m.pool, tick(60), true, amount(10)),
        Err(TakeProfitError::InvalidCancellation(_))
    ));
}

#[test]
fn transferred_shares_redeem_for_new_holder() {
    let mut m = Market::deep();
    m.place(ALICE, 60, true, amount(10));
    let id = m.order_id(60, true);
    m.swap(false, amount(20));

    let Ok(()) = m.hook.transfer_shares(ALICE, CAROL, &id, amount(10)) else {
        panic!("transfer failed");
    };
    let Ok(paid) = m.hook.redeem_order(&mut m.manager, CAROL, &id, amount(10)) else {
        panic!("redeem failed");
    };
    assert_eq!(m.balance(&CAROL, &C1), Amount::new(FUNDING + paid.get()));
    assert!(matches!(
        m.hook.redeem_order(&mut m.manager, ALICE, &id, amount(1)),
        Err(TakeProfitError::InsufficientShares { .. })
    ));
}

// ---------------------------------------------------------------------------
// Failure policies
// ---------------------------------------------------------------------------

#[test]
fn skip_policy_keeps_swap_and_pending_order() {
    let mut m = Market::thin(FailurePolicy::Skip);
    m.place(ALICE, 60, true, amount(10));

    let receipt = m.swap(false, Amount::new(WHOLE / 100));
    assert!(receipt.tick_after() > tick(60));
    assert_eq!(m.current_tick(), receipt.tick_after());
    assert_eq!(m.pending(60, true), amount(10));
    assert_eq!(m.balance(&HOOK, &C0), amount(10));
    assert!(m.balance(&TRADER, &C0) > Amount::new(FUNDING));
}

#[test]
fn revert_policy_restores_pre_swap_state() {
    let mut m = Market::thin(FailurePolicy::Revert);
    m.place(ALICE, 60, true, amount(10));
    let manager_before = m.manager.clone();
    let hook_before = m.hook.clone();

    let result = m.try_swap(false, Amount::new(WHOLE / 100));
    assert!(matches!(
        result,
        Err(TakeProfitError::IncompleteExecution { requested, consumed })
            if requested == 10 * WHOLE && consumed < requested
    ));
    assert_eq!(m.manager, manager_before);
    assert_eq!(m.hook, hook_before);
    assert_eq!(m.current_tick(), Tick::ZERO);
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
#[test]
fn order_state_survives_bincode_round_trip() {
    use take_profit_hook::ledger::MemoryClaimLedger;
    use take_profit_hook::orders::OrderStore;

    let mut m = Market::deep();
    m.place(ALICE, 60, true, amount(10));
    m.place(BOB, -100, false, amount(5));
    m.swap(false, amount(20));

    let Ok(bytes) = bincode::serialize(m.hook.store()) else {
        panic!("serialize store");
    };
    let Ok(store) = bincode::deserialize::<OrderStore>(&bytes) else {
        panic!("deserialize store");
    };
    assert_eq!(&store, m.hook.store());

    let Ok(bytes) = bincode::serialize(m.hook.ledger()) else {
        panic!("serialize ledger");
    };
    let Ok(ledger) = bincode::deserialize::<MemoryClaimLedger>(&bytes) else {
        panic!("deserialize ledger");
    };
    assert_eq!(&ledger, m.hook.ledger());
}
