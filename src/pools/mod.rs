//! Reference pool engine (feature `clmm`).
//!
//! | Type | Role |
//! |------|------|
//! | [`ClmmPool`] | Single concentrated-liquidity pool: price state, ticks, positions, swap loop |
//! | [`ClmmPoolManager`] | Multi-pool [`PoolManager`](crate::traits::PoolManager) with custody |

pub mod clmm;
pub mod manager;

pub use clmm::ClmmPool;
pub use manager::ClmmPoolManager;
