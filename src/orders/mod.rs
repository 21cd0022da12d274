//! The take-profit order engine.
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Pending volume, epochs, proceeds and the tick index |
//! | [`detector`] | Which pending ticks a price move crossed |
//! | [`executor`] | Swaps one aggregate order and records its proceeds |
//! | [`hook`] | Lifecycle API and the [`Hooks`](crate::traits::Hooks) callbacks |

pub mod detector;
pub mod executor;
pub mod hook;
pub mod store;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use detector::TickWindow;
pub use executor::{execute_order, Fill};
pub use hook::{Phase, TakeProfitHook};
pub use store::{OrderInfo, OrderOutput, OrderStore};
