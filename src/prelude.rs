//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use take_profit_hook::prelude::*;
//! ```
//!
//! Brings the domain types, the core traits, the order engine, the
//! configuration types and the error type into scope in one import.

pub use crate::domain::{
    Address, Amount, Currency, FeeTier, ModifyLiquidityParams, OrderId, OrderKey, PoolId,
    PoolKey, Rounding, SwapParams, SwapResult, SwapSpec, Tick, TickSpacing,
};

pub use crate::traits::{ClaimLedger, Custody, FromConfig, Hooks, PoolManager};

pub use crate::math::CheckedArithmetic;

pub use crate::config::{ClmmConfig, FailurePolicy, HookConfig};

pub use crate::ledger::MemoryClaimLedger;

pub use crate::orders::{Fill, OrderInfo, OrderOutput, OrderStore, Phase, TakeProfitHook};

pub use crate::router::SwapReceipt;

pub use crate::error::{Result, TakeProfitError};

#[cfg(feature = "clmm")]
pub use crate::pools::{ClmmPool, ClmmPoolManager};
