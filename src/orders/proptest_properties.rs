//! Property-based tests using `proptest` for the order invariants.
//!
//! 1. **Placement alignment**: floor for `zero_for_one`, ceil otherwise.
//! 2. **Detection bounds**: crossed ticks lie in the window, in
//!    traversal order.
//! 3. **Idempotence**: a drained window detects nothing.
//! 4. **Cross-direction independence**: executing one direction leaves
//!    the other untouched.
//! 5. **Redemption rounding**: pro-rata payouts never exceed the output
//!    and lose less than one unit per redeemer.
//! 6. **Conservation**: placing then fully cancelling restores balances.

use proptest::prelude::*;

use super::detector::TickWindow;
use super::store::OrderStore;
use crate::domain::{Amount, OrderKey, PoolId, Tick, TickSpacing};

const POOL: PoolId = PoolId::from_bytes([8u8; 32]);

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn tick(v: i32) -> Tick {
    let Ok(t) = Tick::new(v) else {
        panic!("valid tick");
    };
    t
}

fn spacing(v: i32) -> TickSpacing {
    let Ok(s) = TickSpacing::new(v) else {
        panic!("valid spacing");
    };
    s
}

fn store_with(spacing: TickSpacing, placements: &[(i32, bool, u128)]) -> OrderStore {
    let mut store = OrderStore::new();
    for &(raw, zfo, amount) in placements {
        let Ok(aligned) = spacing.align_order_tick(tick(raw), zfo) else {
            continue;
        };
        let Ok(_) = store.add_pending(OrderKey::new(POOL, aligned, zfo), Amount::new(amount))
        else {
            panic!("add_pending failed");
        };
    }
    store
}

fn spacing_strategy() -> impl Strategy<Value = i32> {
    prop_oneof![Just(1), Just(10), Just(60), Just(200), 1i32..=500]
}

fn tick_strategy() -> impl Strategy<Value = i32> {
    -20_000i32..=20_000i32
}

fn placements_strategy() -> impl Strategy<Value = Vec<(i32, bool, u128)>> {
    prop::collection::vec((tick_strategy(), any::<bool>(), 1u128..=1_000_000), 0..24)
}

// ---------------------------------------------------------------------------
// Property 1: Placement alignment
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_alignment_rounds_toward_direction(
        raw in -880_000i32..=880_000i32,
        s in spacing_strategy(),
    ) {
        let s = spacing(s);
        let t = tick(raw);

        let Ok(down) = s.align_order_tick(t, true) else {
            return Ok(());
        };
        prop_assert!(s.is_aligned(down));
        prop_assert!(down <= t);
        prop_assert!(t.get() - down.get() < s.get());

        let Ok(up) = s.align_order_tick(t, false) else {
            return Ok(());
        };
        prop_assert!(s.is_aligned(up));
        prop_assert!(up >= t);
        prop_assert!(up.get() - t.get() < s.get());
    }
}

// ---------------------------------------------------------------------------
// Properties 2-4: Detection
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_crossed_ticks_respect_window(
        s in spacing_strategy(),
        placements in placements_strategy(),
        from in tick_strategy(),
        to in tick_strategy(),
    ) {
        let s = spacing(s);
        let store = store_with(s, &placements);
        let window = TickWindow::new(POOL, s, tick(from), tick(to));
        let crossed = window.crossed_ticks(&store);

        for pair in crossed.windows(2) {
            let [a, b] = pair else { continue };
            if to > from {
                prop_assert!(a < b);
            } else {
                prop_assert!(a > b);
            }
        }
        for t in &crossed {
            if to > from {
                prop_assert!(t.get() > from && t.get() <= to);
            } else {
                prop_assert!(t.get() >= to && t.get() < from);
            }
        }
    }

    #[test]
    fn prop_drained_window_is_idempotent(
        s in spacing_strategy(),
        placements in placements_strategy(),
        from in tick_strategy(),
        to in tick_strategy(),
    ) {
        let s = spacing(s);
        let mut store = store_with(s, &placements);
        let window = TickWindow::new(POOL, s, tick(from), tick(to));

        for key in window.crossed_keys(&store) {
            let pending = store.pending(&key);
            let Ok(_) = store.record_execution(&key, pending, Amount::new(1)) else {
                panic!("record failed");
            };
        }
        let drained = store.clone();
        prop_assert!(window.crossed_keys(&store).is_empty());
        prop_assert_eq!(store, drained);
    }

    #[test]
    fn prop_execution_leaves_other_direction(
        s in spacing_strategy(),
        placements in placements_strategy(),
        to in tick_strategy(),
    ) {
        let s = spacing(s);
        let mut store = store_with(s, &placements);
        let from = Tick::MIN;
        let window = TickWindow::new(POOL, s, from, tick(to));
        let opposite: Vec<(Tick, Amount)> = store
            .pending_ticks(&POOL, false, ..)
            .into_iter()
            .map(|t| (t, store.pending(&OrderKey::new(POOL, t, false))))
            .collect();

        for key in window.crossed_keys(&store) {
            prop_assert!(key.zero_for_one());
            let pending = store.pending(&key);
            let Ok(_) = store.record_execution(&key, pending, Amount::new(1)) else {
                panic!("record failed");
            };
        }
        for (t, amount) in opposite {
            prop_assert_eq!(store.pending(&OrderKey::new(POOL, t, false)), amount);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Redemption rounding
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_redemptions_bounded_by_output(
        shares in prop::collection::vec(1u128..=u64::MAX as u128, 1..16),
        total_output in 0u128..=u64::MAX as u128,
    ) {
        let key = OrderKey::new(POOL, Tick::ZERO, true);
        let mut store = OrderStore::new();
        let mut total_input = 0u128;
        for s in &shares {
            let Ok(_) = store.add_pending(key, Amount::new(*s)) else {
                panic!("add_pending failed");
            };
            total_input += s;
        }
        let Ok(id) = store.record_execution(&key, Amount::new(total_input), Amount::new(total_output))
        else {
            panic!("record failed");
        };

        let mut paid = 0u128;
        for s in &shares {
            let Some(output) = store.output(&id) else {
                panic!("output recorded");
            };
            let Ok(payout) = output.payout(Amount::new(*s)) else {
                panic!("payout failed");
            };
            let Ok(()) = store.record_redemption(&id, payout) else {
                panic!("redemption exceeded output");
            };
            paid += payout.get();
        }
        prop_assert!(paid <= total_output);
        prop_assert!(total_output - paid < shares.len() as u128);
        prop_assert_eq!(store.claimable(&id), Amount::new(total_output - paid));
    }
}

// ---------------------------------------------------------------------------
// Property 6: Conservation
// ---------------------------------------------------------------------------

#[cfg(feature = "clmm")]
mod conservation {
    use proptest::prelude::*;

    use crate::config::HookConfig;
    use crate::domain::{Address, Amount, Currency, FeeTier, PoolKey, Tick, TickSpacing};
    use crate::orders::TakeProfitHook;
    use crate::pools::ClmmPoolManager;
    use crate::traits::{Custody, Hooks, PoolManager};

    const HOOK: Address = Address::from_bytes([0xaa; 32]);
    const TRADER: Address = Address::from_bytes([0x33; 32]);
    const C0: Currency = Currency::from_bytes([1u8; 32]);
    const C1: Currency = Currency::from_bytes([2u8; 32]);

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_full_cancel_restores_balance(
            raw in -20_000i32..=20_000i32,
            zero_for_one in any::<bool>(),
            amount in 1u128..=1_000_000_000,
        ) {
            let Ok(spacing) = TickSpacing::new(60) else {
                panic!("valid spacing");
            };
            let Ok(key) = PoolKey::new(C0, C1, FeeTier::TIER_0_30_PERCENT, spacing, HOOK) else {
                panic!("valid key");
            };
            let mut m = ClmmPoolManager::new(Address::from_bytes([0xee; 32]));
            for c in [C0, C1] {
                let Ok(()) = m.mint(&TRADER, &c, Amount::new(amount)) else {
                    panic!("mint failed");
                };
            }
            let Ok(id) = m.initialize(key, Tick::ZERO) else {
                panic!("initialize failed");
            };
            let mut hook: TakeProfitHook = TakeProfitHook::new(HookConfig::with_address(HOOK));
            let Ok(()) = hook.after_initialize(&mut m, &key, Tick::ZERO) else {
                panic!("after_initialize failed");
            };
            let Ok(t) = Tick::new(raw) else {
                panic!("valid tick");
            };

            let (currency_in, _) = key.currencies_for(zero_for_one);
            let Ok(aligned) = hook.place_order(&mut m, TRADER, &id, t, zero_for_one, Amount::new(amount))
            else {
                panic!("place failed");
            };
            prop_assert_eq!(m.balance_of(&TRADER, &currency_in), Amount::ZERO);
            let Ok(()) = hook.cancel_order(&mut m, TRADER, &id, t, zero_for_one, Amount::new(amount))
            else {
                panic!("cancel failed");
            };

            let order = hook.order_id(&id, aligned, zero_for_one);
            prop_assert_eq!(m.balance_of(&TRADER, &currency_in), Amount::new(amount));
            prop_assert_eq!(m.balance_of(&HOOK, &currency_in), Amount::ZERO);
            prop_assert_eq!(hook.share_balance(&TRADER, &order), Amount::ZERO);
            prop_assert_eq!(hook.pending_orders(&id, aligned, zero_for_one), Amount::ZERO);
        }
    }
}
