//! Fundamental domain value types used throughout the crate.
//!
//! Amounts, ticks, pool and order identity, and swap parameters. All
//! types are newtypes or small structs with validated constructors.

mod address;
mod amount;
mod fee_tier;
mod liquidity;
mod order;
mod pool_key;
mod rounding;
mod swap_result;
mod swap_spec;
mod tick;

pub use address::{Address, Currency};
pub use amount::Amount;
pub use fee_tier::FeeTier;
pub use liquidity::ModifyLiquidityParams;
pub use order::{OrderId, OrderKey};
pub use pool_key::{PoolId, PoolKey};
pub use rounding::Rounding;
pub use swap_result::SwapResult;
pub use swap_spec::{SwapParams, SwapSpec};
pub use tick::{Tick, TickSpacing};
