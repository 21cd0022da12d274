//! Tick-cross detection: which pending orders a price move triggers.
//!
//! A move **up** (`to > from`) triggers `zero_for_one` orders at aligned
//! ticks `t` with `from < t <= to`, visited ascending. A move **down**
//! triggers the opposite direction at `to <= t < from`, visited
//! descending. Only ticks with pending volume are reported, read from
//! the store's tick index.

use tracing::debug;

use super::store::OrderStore;
use crate::domain::{OrderKey, PoolId, PoolKey, Tick, TickSpacing};

/// A price movement of one pool between two ticks.
///
/// # Examples
///
/// ```
/// use take_profit_hook::domain::{PoolId, Tick, TickSpacing};
/// use take_profit_hook::orders::TickWindow;
///
/// let spacing = TickSpacing::new(60).expect("spacing");
/// let window = TickWindow::new(
///     PoolId::from_bytes([0u8; 32]),
///     spacing,
///     Tick::ZERO,
///     Tick::new(130).expect("tick"),
/// );
/// assert_eq!(window.triggered_direction(), Some(true));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickWindow {
    pool_id: PoolId,
    spacing: TickSpacing,
    from: Tick,
    to: Tick,
}

impl TickWindow {
    /// Creates a window for a move from `from` to `to`.
    #[must_use]
    pub const fn new(pool_id: PoolId, spacing: TickSpacing, from: Tick, to: Tick) -> Self {
        Self {
            pool_id,
            spacing,
            from,
            to,
        }
    }

    /// Creates a window for a pool key.
    #[must_use]
    pub fn for_pool(key: &PoolKey, from: Tick, to: Tick) -> Self {
        Self::new(key.id(), key.tick_spacing(), from, to)
    }

    /// Tick the move started at.
    #[must_use]
    pub const fn from(&self) -> Tick {
        self.from
    }

    /// Tick the move ended at.
    #[must_use]
    pub const fn to(&self) -> Tick {
        self.to
    }

    /// Order direction triggered by the move, `None` if the price did
    /// not move.
    #[must_use]
    pub const fn triggered_direction(&self) -> Option<bool> {
        if self.to.get() > self.from.get() {
            Some(true)
        } else if self.to.get() < self.from.get() {
            Some(false)
        } else {
            None
        }
    }

    /// Aligned inclusive bounds `(low, high)` of the ticks the move
    /// crossed, `None` if no multiple of the spacing was crossed.
    fn aligned_bounds(&self) -> Option<(Tick, Tick)> {
        let (low, high) = if self.triggered_direction()? {
            (
                self.spacing
                    .align_up(Tick::saturating(self.from.get().saturating_add(1)))
                    .ok()?,
                self.spacing.align_down(self.to).ok()?,
            )
        } else {
            (
                self.spacing.align_up(self.to).ok()?,
                self.spacing
                    .align_down(Tick::saturating(self.from.get().saturating_sub(1)))
                    .ok()?,
            )
        };
        (low <= high).then_some((low, high))
    }

    /// Pending order ticks crossed by the move, in traversal order.
    #[must_use]
    pub fn crossed_ticks(&self, store: &OrderStore) -> Vec<Tick> {
        let Some(zero_for_one) = self.triggered_direction() else {
            return Vec::new();
        };
        let Some((low, high)) = self.aligned_bounds() else {
            return Vec::new();
        };
        let mut ticks = store.pending_ticks(&self.pool_id, zero_for_one, low..=high);
        if !zero_for_one {
            ticks.reverse();
        }
        debug!(
            pool = %self.pool_id,
            from = self.from.get(),
            to = self.to.get(),
            zero_for_one,
            crossed = ticks.len(),
            "detected crossed order ticks"
        );
        ticks
    }

    /// Order keys crossed by the move, in traversal order.
    #[must_use]
    pub fn crossed_keys(&self, store: &OrderStore) -> Vec<OrderKey> {
        let Some(zero_for_one) = self.triggered_direction() else {
            return Vec::new();
        };
        self.crossed_ticks(store)
            .into_iter()
            .map(|tick| OrderKey::new(self.pool_id, tick, zero_for_one))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Amount;

    const POOL: PoolId = PoolId::from_bytes([5u8; 32]);

    fn tick(v: i32) -> Tick {
        let Ok(t) = Tick::new(v) else {
            panic!("valid tick");
        };
        t
    }

    fn spacing() -> TickSpacing {
        let Ok(s) = TickSpacing::new(60) else {
            panic!("valid spacing");
        };
        s
    }

    fn window(from: i32, to: i32) -> TickWindow {
        TickWindow::new(POOL, spacing(), tick(from), tick(to))
    }

    fn store_with(entries: &[(i32, bool)]) -> OrderStore {
        let mut store = OrderStore::new();
        for &(t, zfo) in entries {
            let Ok(_) = store.add_pending(OrderKey::new(POOL, tick(t), zfo), Amount::new(1)) else {
                panic!("add_pending failed");
            };
        }
        store
    }

    // -- direction ------------------------------------------------------------

    #[test]
    fn flat_window_triggers_nothing() {
        let store = store_with(&[(60, true), (60, false)]);
        assert_eq!(window(60, 60).triggered_direction(), None);
        assert!(window(60, 60).crossed_ticks(&store).is_empty());
    }

    #[test]
    fn upward_move_triggers_zero_for_one_ascending() {
        let store = store_with(&[(180, true), (60, true), (120, true), (120, false)]);
        assert_eq!(
            window(0, 200).crossed_keys(&store),
            vec![
                OrderKey::new(POOL, tick(60), true),
                OrderKey::new(POOL, tick(120), true),
                OrderKey::new(POOL, tick(180), true),
            ]
        );
    }

    #[test]
    fn downward_move_triggers_opposite_direction_descending() {
        let store = store_with(&[(-60, false), (-180, false), (-120, false), (-120, true)]);
        assert_eq!(
            window(0, -150).crossed_ticks(&store),
            vec![tick(-60), tick(-120)]
        );
    }

    // -- bounds ---------------------------------------------------------------

    #[test]
    fn upward_bounds_exclude_start_include_end() {
        let store = store_with(&[(60, true), (120, true)]);
        assert_eq!(window(60, 120).crossed_ticks(&store), vec![tick(120)]);
        assert_eq!(window(59, 60).crossed_ticks(&store), vec![tick(60)]);
        assert!(window(60, 119).crossed_ticks(&store).is_empty());
    }

    #[test]
    fn downward_bounds_include_end_exclude_start() {
        let store = store_with(&[(-60, false), (-120, false)]);
        assert_eq!(window(-60, -120).crossed_ticks(&store), vec![tick(-120)]);
        assert_eq!(window(-59, -60).crossed_ticks(&store), vec![tick(-60)]);
        assert!(window(-60, -119).crossed_ticks(&store).is_empty());
    }

    #[test]
    fn window_inside_one_spacing_crosses_nothing() {
        let store = store_with(&[(0, true), (60, true)]);
        assert!(window(1, 59).crossed_ticks(&store).is_empty());
    }

    #[test]
    fn other_pools_are_ignored() {
        let store = store_with(&[(60, true)]);
        let other = TickWindow::new(PoolId::from_bytes([6u8; 32]), spacing(), tick(0), tick(100));
        assert!(other.crossed_ticks(&store).is_empty());
    }
}
