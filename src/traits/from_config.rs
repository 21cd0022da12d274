//! Generic construction from a validated configuration.
//!
//! Pools and the hook itself are built from their configuration
//! structs through [`FromConfig`]. Each implementation validates its
//! configuration during construction, so a successfully built value is
//! always in a valid initial state.
//!
//! There is no blanket implementation: every pairing of a type with its
//! config is written out explicitly.

/// Creates a value from a configuration of type `C`.
///
/// # Implementors
///
/// - `impl FromConfig<ClmmConfig> for ClmmPool`
/// - `impl FromConfig<HookConfig> for TakeProfitHook`
pub trait FromConfig<C> {
    /// Builds a new instance from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfiguration`](crate::error::TakeProfitError::InvalidConfiguration)
    /// (or a more specific variant) if the configuration is invalid.
    fn from_config(config: &C) -> crate::error::Result<Self>
    where
        Self: Sized;
}
