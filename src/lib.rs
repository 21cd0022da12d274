//! # Take-Profit Hook
//!
//! A take-profit order book layered on a concentrated-liquidity AMM.
//!
//! Traders place orders at a target tick. When a swap moves the pool
//! price across that tick, the hook sells the accumulated order volume
//! into the pool and the output becomes claimable by the order's share
//! holders, pro rata.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `clmm` | yes | In-memory reference pool engine ([`pools`]) |
//! | `serde` | no | `Serialize`/`Deserialize` for domain types, configs and order state |
//!
//! # Quick Start
//!
//! ```rust
//! use take_profit_hook::config::HookConfig;
//! use take_profit_hook::domain::{
//!     Address, Amount, Currency, FeeTier, ModifyLiquidityParams, PoolKey, SwapParams, Tick,
//!     TickSpacing,
//! };
//! use take_profit_hook::orders::TakeProfitHook;
//! use take_profit_hook::pools::ClmmPoolManager;
//! use take_profit_hook::router;
//! use take_profit_hook::traits::PoolManager;
//!
//! const WHOLE: u128 = 1_000_000_000_000_000_000;
//! let hook_address = Address::from_bytes([0xaa; 32]);
//! let lp = Address::from_bytes([0x01; 32]);
//! let alice = Address::from_bytes([0x02; 32]);
//! let bob = Address::from_bytes([0x03; 32]);
//! let usdc = Currency::from_bytes([1u8; 32]);
//! let weth = Currency::from_bytes([2u8; 32]);
//!
//! // 1. A pool engine with funded accounts
//! let mut manager = ClmmPoolManager::new(Address::from_bytes([0xee; 32]));
//! for who in [lp, alice, bob] {
//!     for currency in [usdc, weth] {
//!         manager.mint(&who, &currency, Amount::new(10_000 * WHOLE)).expect("mint");
//!     }
//! }
//!
//! // 2. A pool attached to the hook, with liquidity around the price
//! let mut hook: TakeProfitHook = TakeProfitHook::new(HookConfig::with_address(hook_address));
//! let spacing = TickSpacing::new(60).expect("valid spacing");
//! let key = PoolKey::new(usdc, weth, FeeTier::TIER_0_30_PERCENT, spacing, hook_address)
//!     .expect("valid key");
//! let pool_id = router::initialize(&mut manager, &mut hook, key, Tick::ZERO).expect("pool");
//! let range = ModifyLiquidityParams::new(
//!     Tick::new(-6_000).expect("tick"),
//!     Tick::new(6_000).expect("tick"),
//!     (1_000 * WHOLE) as i128,
//! )
//! .expect("valid range");
//! manager.modify_liquidity(lp, &pool_id, &range).expect("liquidity");
//!
//! // 3. Alice sells one token0 once the price reaches tick 100
//! let target = Tick::new(100).expect("tick");
//! let aligned = hook
//!     .place_order(&mut manager, alice, &pool_id, target, true, Amount::new(WHOLE))
//!     .expect("placed");
//! assert_eq!(aligned.get(), 60);
//!
//! // 4. Bob buys token0 and pushes the price through the order
//! let params = SwapParams::exact_in(false, Amount::new(20 * WHOLE)).expect("params");
//! router::swap(&mut manager, &mut hook, bob, &pool_id, &params).expect("swap");
//! assert!(hook.pending_orders(&pool_id, aligned, true).is_zero());
//!
//! // 5. Alice claims the proceeds
//! let paid = hook
//!     .redeem(&mut manager, alice, &pool_id, aligned, true, Amount::new(WHOLE))
//!     .expect("redeemed");
//! assert!(paid.get() > 0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Trader     │  place / cancel / redeem          swap
//! └──────┬──────┘                                     │
//!        │                                            ▼
//!        │                                    ┌─────────────┐
//!        │                                    │   Router     │  swap, then after_swap
//!        │                                    └──────┬──────┘
//!        ▼                                           ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  TakeProfitHook   detector → executor (draining rounds)   │
//! │      OrderStore + ClaimLedger                              │
//! └──────┬───────────────────────────────────────────────────┘
//!        │ PoolManager + Custody traits
//!        ▼
//! ┌─────────────┐
//! │ Pool engine  │  ClmmPoolManager / ClmmPool
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Tick`](domain::Tick), [`PoolKey`](domain::PoolKey), [`OrderKey`](domain::OrderKey), [`OrderId`](domain::OrderId), etc. |
//! | [`traits`] | Seams: [`PoolManager`](traits::PoolManager), [`Custody`](traits::Custody), [`ClaimLedger`](traits::ClaimLedger), [`Hooks`](traits::Hooks), [`FromConfig`](traits::FromConfig) |
//! | [`orders`] | Order store, tick-cross detector, executor and [`TakeProfitHook`](orders::TakeProfitHook) |
//! | [`ledger`] | [`MemoryClaimLedger`](ledger::MemoryClaimLedger) claim shares |
//! | [`router`] | Pool operations that invoke the hook callbacks |
//! | [`config`] | [`HookConfig`](config::HookConfig) and [`ClmmConfig`](config::ClmmConfig) |
//! | [`pools`]  | Reference concentrated-liquidity engine (feature `clmm`) |
//! | [`math`]   | Checked arithmetic, 256-bit `mul_div`, tick math |
//! | [`error`]  | [`TakeProfitError`](error::TakeProfitError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod math;
pub mod orders;
#[cfg(feature = "clmm")]
pub mod pools;
pub mod prelude;
pub mod router;
pub mod traits;
