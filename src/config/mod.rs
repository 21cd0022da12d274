//! Configuration structs for the reference pool and the hook.
//!
//! Each struct validates its invariants in `new` and exposes the same
//! checks through `validate`.

mod clmm;
mod hook;

pub use clmm::ClmmConfig;
pub use hook::{FailurePolicy, HookConfig};
