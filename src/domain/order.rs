//! Order keys and epoch-scoped order ids.

use core::fmt;

use sha2::{Digest, Sha256};

use super::{PoolId, Tick};

/// The aggregate order slot for one pool, aligned tick and direction.
///
/// All traders placing at the same key during the same execution epoch
/// share one order and split its proceeds pro rata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderKey {
    pool_id: PoolId,
    tick_lower: Tick,
    zero_for_one: bool,
}

impl OrderKey {
    /// Creates a key from an already aligned tick.
    #[must_use]
    pub const fn new(pool_id: PoolId, tick_lower: Tick, zero_for_one: bool) -> Self {
        Self {
            pool_id,
            tick_lower,
            zero_for_one,
        }
    }

    /// Returns the pool id.
    #[must_use]
    pub const fn pool_id(&self) -> PoolId {
        self.pool_id
    }

    /// Returns the aligned order tick.
    #[must_use]
    pub const fn tick_lower(&self) -> Tick {
        self.tick_lower
    }

    /// Returns `true` if the order sells `currency0` for `currency1`.
    #[must_use]
    pub const fn zero_for_one(&self) -> bool {
        self.zero_for_one
    }

    /// Derives the order id of this key for `epoch`.
    #[must_use]
    pub fn order_id(&self, epoch: u64) -> OrderId {
        OrderId::derive(self, epoch)
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OrderKey(pool={}, tick={}, zero_for_one={})",
            self.pool_id,
            self.tick_lower.get(),
            self.zero_for_one
        )
    }
}

/// Identifier of the claim shares for one key and one execution epoch.
///
/// `SHA-256(pool_id ‖ tick_lower ‖ zero_for_one ‖ epoch)`, with integers
/// encoded big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderId([u8; 32]);

impl OrderId {
    /// Derives the id for `key` during `epoch`.
    #[must_use]
    pub fn derive(key: &OrderKey, epoch: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(key.pool_id.as_bytes());
        hasher.update(key.tick_lower.get().to_be_bytes());
        hasher.update([u8::from(key.zero_for_one)]);
        hasher.update(epoch.to_be_bytes());
        Self(hasher.finalize().into())
    }

    /// Returns the digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
