//! Claim-share ledgers.
//!
//! [`MemoryClaimLedger`] is the in-memory
//! [`ClaimLedger`](crate::traits::ClaimLedger) used by
//! [`TakeProfitHook`](crate::orders::TakeProfitHook) by default.

mod memory;

pub use memory::MemoryClaimLedger;
