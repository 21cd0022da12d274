//! Explicit rounding direction for integer division.

/// Rounding direction for division on domain amounts.
///
/// Payouts to individual accounts round [`Down`](Self::Down); amounts a
/// caller must provide round [`Up`](Self::Up).
///
/// # Examples
///
/// ```
/// use take_profit_hook::domain::Rounding;
///
/// assert!(Rounding::Down.is_down());
/// assert!(!Rounding::Down.is_up());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
