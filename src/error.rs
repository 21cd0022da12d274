//! Unified error type for the take-profit hook.
//!
//! Every fallible operation in the crate (pool engine, custody, claim
//! ledger, order store and lifecycle API) returns [`TakeProfitError`].
//! A returned error always means the operation left no partial state
//! behind.

use thiserror::Error;

/// Errors produced by the order book, the reference pool engine and
/// their collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TakeProfitError {
    // -- order lifecycle ----------------------------------------------------
    /// A tick is out of range, misaligned, or an order was placed with a
    /// zero amount.
    #[error("invalid tick: {0}")]
    InvalidTick(&'static str),

    /// A cancellation exceeds the volume still pending for the current
    /// epoch of the order key.
    #[error("invalid cancellation: {0}")]
    InvalidCancellation(&'static str),

    /// Redemption against an order id that has not been executed.
    #[error("order has not been executed yet")]
    NotYetExecuted,

    /// The caller's claim-share balance is below the requested amount.
    #[error("insufficient claim shares: requested {requested}, available {available}")]
    InsufficientShares {
        /// Shares the caller asked to burn or move.
        requested: u128,
        /// Shares the caller actually holds.
        available: u128,
    },

    /// The pool could not absorb the full pending volume of an order.
    #[error("incomplete execution: requested {requested}, pool consumed {consumed}")]
    IncompleteExecution {
        /// Pending input volume of the order key.
        requested: u128,
        /// Input the pool would have accepted.
        consumed: u128,
    },

    /// A swap callback arrived while the hook was already draining fills.
    #[error("re-entrant execution rejected")]
    ReentrantExecution,

    /// The order id is not known to the store.
    #[error("unknown order id")]
    UnknownOrder,

    // -- pools ----------------------------------------------------------------
    /// The pool has not been registered with the hook.
    #[error("pool is not registered with the hook")]
    PoolNotRegistered,

    /// The pool engine has no pool with this id.
    #[error("pool not found")]
    PoolNotFound,

    /// `initialize` was called twice for the same pool key.
    #[error("pool already initialized")]
    PoolAlreadyInitialized,

    /// The pool cannot satisfy the swap.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A tick range is inverted or misaligned.
    #[error("invalid tick range: {0}")]
    InvalidTickRange(&'static str),

    /// A currency is invalid for the operation.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// A fee tier is outside the supported range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A configuration value is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// An amount is zero or otherwise unusable.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    // -- custody ----------------------------------------------------------------
    /// An account holds less of a currency than a transfer requires.
    #[error("insufficient balance: needed {needed}, available {available}")]
    InsufficientBalance {
        /// Amount the transfer needed.
        needed: u128,
        /// Amount the account holds.
        available: u128,
    },

    // -- arithmetic -------------------------------------------------------------
    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, TakeProfitError>;
