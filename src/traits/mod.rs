//! Core trait abstractions at the hook's boundaries.
//!
//! [`PoolManager`] and [`Custody`] describe the AMM engine,
//! [`ClaimLedger`] the share receipts, [`Hooks`] the swap callbacks, and
//! [`FromConfig`] configuration-driven construction.

mod claim_ledger;
mod custody;
mod from_config;
mod hooks;
mod pool_manager;

pub use claim_ledger::ClaimLedger;
pub use custody::Custody;
pub use from_config::FromConfig;
pub use hooks::Hooks;
pub use pool_manager::PoolManager;
