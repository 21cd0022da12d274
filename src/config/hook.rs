//! Configuration for the take-profit hook.

use crate::domain::Address;
use crate::error::TakeProfitError;

/// Rounds of iterative draining run by default after an external swap.
const DEFAULT_MAX_DRAIN_ROUNDS: u32 = 8;

/// What happens to an external swap when one of the fills it triggers
/// fails.
///
/// # Examples
///
/// ```
/// use take_profit_hook::config::FailurePolicy;
///
/// assert_eq!(FailurePolicy::default(), FailurePolicy::Skip);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailurePolicy {
    /// Log the failed fill, leave its order pending and keep the swap.
    #[default]
    Skip,
    /// Abort the callback and revert the swap together with every fill
    /// it triggered.
    Revert,
}

/// Configuration for a [`TakeProfitHook`](crate::orders::TakeProfitHook).
///
/// # Validation
///
/// - `max_drain_rounds` must be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HookConfig {
    address: Address,
    failure_policy: FailurePolicy,
    max_drain_rounds: u32,
}

impl HookConfig {
    /// Creates a validated `HookConfig`.
    ///
    /// # Arguments
    ///
    /// - `address` is the account the hook holds custody under and swaps
    ///   from.
    /// - `failure_policy` decides how failed fills affect the swap that
    ///   triggered them.
    /// - `max_drain_rounds` caps how many detection rounds follow a
    ///   single external swap.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::InvalidConfiguration`] if `max_drain_rounds`
    ///   is zero.
    pub fn new(
        address: Address,
        failure_policy: FailurePolicy,
        max_drain_rounds: u32,
    ) -> crate::error::Result<Self> {
        let config = Self {
            address,
            failure_policy,
            max_drain_rounds,
        };
        config.validate()?;
        Ok(config)
    }

    /// Default configuration for a hook at `address`: [`FailurePolicy::Skip`]
    /// and 8 drain rounds.
    #[must_use]
    pub const fn with_address(address: Address) -> Self {
        Self {
            address,
            failure_policy: FailurePolicy::Skip,
            max_drain_rounds: DEFAULT_MAX_DRAIN_ROUNDS,
        }
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub const fn validate(&self) -> crate::error::Result<()> {
        if self.max_drain_rounds == 0 {
            return Err(TakeProfitError::InvalidConfiguration(
                "max_drain_rounds must be at least 1",
            ));
        }
        Ok(())
    }

    /// Returns the hook's account address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the failure policy.
    #[must_use]
    pub const fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Returns the drain round cap.
    #[must_use]
    pub const fn max_drain_rounds(&self) -> u32 {
        self.max_drain_rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = HookConfig::with_address(Address::from_bytes([5u8; 32]));
        assert_eq!(cfg.failure_policy(), FailurePolicy::Skip);
        assert_eq!(cfg.max_drain_rounds(), 8);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_rounds_rejected() {
        assert!(matches!(
            HookConfig::new(Address::zero(), FailurePolicy::Revert, 0),
            Err(TakeProfitError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn explicit_values_kept() {
        let Ok(cfg) = HookConfig::new(Address::zero(), FailurePolicy::Revert, 1) else {
            return;
        };
        assert_eq!(cfg.failure_policy(), FailurePolicy::Revert);
        assert_eq!(cfg.max_drain_rounds(), 1);
    }
}
