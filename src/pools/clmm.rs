//! Concentrated liquidity pool (Uniswap v3/v4 style) used as the
//! reference pool engine.
//!
//! Liquidity is concentrated within tick ranges. Inside a single range
//! the pool behaves as a constant product AMM parameterised by `√P`
//! (sqrt-price) and `L` (active liquidity).
//!
//! # Price Convention
//!
//! `price = 1.0001^tick` is the amount of `currency1` per `currency0`.
//! Selling `currency0` (`zero_for_one`) lowers the price and the tick;
//! selling `currency1` raises them.
//!
//! # Swap Algorithm
//!
//! 1. Pick the next initialised tick in the swap direction, or the price
//!    limit if it comes first, as the step target.
//! 2. Deduct the fee from the remaining input and compute how much net
//!    input the range can absorb before reaching the target.
//! 3. If the remaining input fits, move the price inside the range and
//!    stop. Otherwise consume the range, cross the tick (updating active
//!    liquidity) and repeat.
//! 4. A swap that reaches the limit (or the end of the price range) with
//!    input left over consumes only part of its input.
//!
//! Crossing tick `t` upwards sets the current tick to `t`; crossing it
//! downwards sets it to `t - 1`. The active liquidity is always the sum
//! of positions with `lower <= current_tick < upper`.
//!
//! The swap is computed over `&self` into a new `(sqrt_price, tick,
//! liquidity)` state, which [`ClmmPool::swap`] commits and
//! [`ClmmPool::quote`] discards.

use std::collections::BTreeMap;

use crate::config::ClmmConfig;
use crate::domain::{
    Address, Amount, ModifyLiquidityParams, PoolKey, SwapParams, SwapResult, SwapSpec, Tick,
};
use crate::error::TakeProfitError;
use crate::math::{max_sqrt_price, min_sqrt_price, sqrt_price_at_tick, tick_at_sqrt_price};
use crate::traits::FromConfig;

/// Guard against runaway step loops.
const MAX_STEPS: u32 = 10_000;

/// Input used to probe the largest output an exact-output swap can get.
const PROBE_INPUT: u128 = 1 << 120;

/// Iterations of the exact-output binary search.
const SEARCH_ITERATIONS: u32 = 128;

// ---------------------------------------------------------------------------
// Internal data structures
// ---------------------------------------------------------------------------

/// Per-tick liquidity bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct TickState {
    /// Net liquidity change when crossing this tick left-to-right.
    liquidity_net: i128,
    /// Total liquidity referencing this tick; the tick is dropped at zero.
    liquidity_gross: u128,
}

/// Price state produced by a swap computation.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SwapState {
    sqrt_price: f64,
    tick: i32,
    liquidity: u128,
}

// ---------------------------------------------------------------------------
// ClmmPool
// ---------------------------------------------------------------------------

/// A single concentrated-liquidity pool.
///
/// Created from a [`ClmmConfig`] via [`FromConfig`].
///
/// # State
///
/// - `current_tick`: the tick containing the current price.
/// - `sqrt_price`: the authoritative price.
/// - `liquidity`: active liquidity at `current_tick`.
/// - `ticks`: initialised ticks with their net/gross liquidity.
/// - `positions`: liquidity per `(owner, lower, upper)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClmmPool {
    key: PoolKey,
    current_tick: i32,
    sqrt_price: f64,
    liquidity: u128,
    ticks: BTreeMap<i32, TickState>,
    positions: BTreeMap<(Address, i32, i32), u128>,
}

impl ClmmPool {
    /// Returns the pool key.
    #[must_use]
    pub const fn key(&self) -> &PoolKey {
        &self.key
    }

    /// Returns the current tick.
    #[must_use]
    pub const fn current_tick(&self) -> Tick {
        Tick::saturating(self.current_tick)
    }

    /// Returns the current sqrt-price.
    #[must_use]
    pub const fn sqrt_price(&self) -> f64 {
        self.sqrt_price
    }

    /// Returns the active liquidity.
    #[must_use]
    pub const fn liquidity(&self) -> u128 {
        self.liquidity
    }

    /// Returns the liquidity `owner` holds in `[lower, upper)`.
    #[must_use]
    pub fn position_liquidity(&self, owner: &Address, lower: Tick, upper: Tick) -> u128 {
        self.positions
            .get(&(*owner, lower.get(), upper.get()))
            .copied()
            .unwrap_or(0)
    }

    /// Executes a swap, updating the price and active liquidity.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::InvalidConfiguration`] if the price limit is
    ///   on the wrong side of the current price.
    /// - [`TakeProfitError::InsufficientLiquidity`] if the swap cannot
    ///   consume any input or produce any output.
    pub fn swap(&mut self, params: &SwapParams) -> crate::error::Result<SwapResult> {
        let (result, state) = self.compute_swap(params)?;
        self.sqrt_price = state.sqrt_price;
        self.current_tick = state.tick;
        self.liquidity = state.liquidity;
        Ok(result)
    }

    /// Computes the outcome of [`swap`](Self::swap) without mutating.
    ///
    /// # Errors
    ///
    /// Same as [`swap`](Self::swap).
    pub fn quote(&self, params: &SwapParams) -> crate::error::Result<SwapResult> {
        self.compute_swap(params).map(|(result, _)| result)
    }

    /// Computes the token amounts a liquidity change moves, without
    /// mutating.
    ///
    /// Adds round up (the provider pays more); removals round down.
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::InvalidTickRange`] if the bounds are not
    ///   multiples of the tick spacing.
    pub fn liquidity_amounts(
        &self,
        params: &ModifyLiquidityParams,
    ) -> crate::error::Result<(Amount, Amount)> {
        if !params.is_aligned(self.key.tick_spacing()) {
            return Err(TakeProfitError::InvalidTickRange(
                "ticks must be aligned to tick spacing",
            ));
        }
        let lower = params.tick_lower().get();
        let upper = params.tick_upper().get();
        let sa = sqrt_price_at_tick(params.tick_lower());
        let sb = sqrt_price_at_tick(params.tick_upper());
        let l = params.liquidity_delta().unsigned_abs() as f64;

        let (raw0, raw1) = if self.current_tick < lower {
            (l * (1.0 / sa - 1.0 / sb), 0.0)
        } else if self.current_tick < upper {
            let sp = self.sqrt_price.clamp(sa, sb);
            (l * (1.0 / sp - 1.0 / sb), l * (sp - sa))
        } else {
            (0.0, l * (sb - sa))
        };

        let round = |v: f64| -> crate::error::Result<Amount> {
            let v = if params.is_add() { v.ceil() } else { v.floor() };
            if !v.is_finite() || v >= u128::MAX as f64 {
                return Err(TakeProfitError::Overflow("liquidity amount exceeds u128"));
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Ok(Amount::new(v.max(0.0) as u128))
        };
        Ok((round(raw0)?, round(raw1)?))
    }

    /// Adds or removes `owner`'s liquidity over a range.
    ///
    /// Returns the same amounts as [`liquidity_amounts`](Self::liquidity_amounts).
    ///
    /// # Errors
    ///
    /// - [`TakeProfitError::InvalidTickRange`] for unaligned bounds.
    /// - [`TakeProfitError::InsufficientLiquidity`] if a removal exceeds
    ///   the position.
    /// - [`TakeProfitError::Overflow`] if liquidity would overflow.
    pub fn modify_liquidity(
        &mut self,
        owner: Address,
        params: &ModifyLiquidityParams,
    ) -> crate::error::Result<(Amount, Amount)> {
        let amounts = self.liquidity_amounts(params)?;
        let lower = params.tick_lower().get();
        let upper = params.tick_upper().get();
        let delta = params.liquidity_delta();
        let magnitude = delta.unsigned_abs();
        let position_key = (owner, lower, upper);
        let existing = self.positions.get(&position_key).copied().unwrap_or(0);

        let updated_position = if delta > 0 {
            existing
                .checked_add(magnitude)
                .ok_or(TakeProfitError::Overflow("position liquidity overflow"))?
        } else {
            existing
                .checked_sub(magnitude)
                .ok_or(TakeProfitError::InsufficientLiquidity)?
        };
        let in_range = lower <= self.current_tick && self.current_tick < upper;
        let updated_active = if !in_range {
            self.liquidity
        } else {
            self.liquidity
                .checked_add_signed(delta)
                .ok_or(TakeProfitError::Overflow("active liquidity overflow"))?
        };
        let negated = delta
            .checked_neg()
            .ok_or(TakeProfitError::Overflow("liquidity delta cannot be negated"))?;
        let lower_state = self.updated_tick(lower, delta, delta)?;
        let upper_state = self.updated_tick(upper, negated, delta)?;

        Self::store_tick(&mut self.ticks, lower, lower_state);
        Self::store_tick(&mut self.ticks, upper, upper_state);
        if updated_position == 0 {
            self.positions.remove(&position_key);
        } else {
            self.positions.insert(position_key, updated_position);
        }
        self.liquidity = updated_active;
        Ok(amounts)
    }

    /// Returns the state of `tick` after a position change of
    /// `liquidity_delta` that moves its net liquidity by `net_delta`.
    fn updated_tick(
        &self,
        tick: i32,
        net_delta: i128,
        liquidity_delta: i128,
    ) -> crate::error::Result<TickState> {
        let state = self.ticks.get(&tick).copied().unwrap_or_default();
        let liquidity_net = state
            .liquidity_net
            .checked_add(net_delta)
            .ok_or(TakeProfitError::Overflow("tick liquidity_net overflow"))?;
        let liquidity_gross = state
            .liquidity_gross
            .checked_add_signed(liquidity_delta)
            .ok_or(TakeProfitError::Overflow("tick liquidity_gross out of range"))?;
        Ok(TickState {
            liquidity_net,
            liquidity_gross,
        })
    }

    fn store_tick(ticks: &mut BTreeMap<i32, TickState>, tick: i32, state: TickState) {
        if state.liquidity_gross == 0 {
            ticks.remove(&tick);
        } else {
            ticks.insert(tick, state);
        }
    }

    /// Finds the next initialised tick in the swap direction.
    ///
    /// Moving down searches at or below `from`; moving up searches
    /// strictly above it.
    fn next_initialized_tick(&self, from: i32, zero_for_one: bool) -> Option<(i32, TickState)> {
        if zero_for_one {
            self.ticks
                .range(..=from)
                .next_back()
                .map(|(&t, &s)| (t, s))
        } else {
            self.ticks
                .range((std::ops::Bound::Excluded(from), std::ops::Bound::Unbounded))
                .next()
                .map(|(&t, &s)| (t, s))
        }
    }

    fn compute_swap(&self, params: &SwapParams) -> crate::error::Result<(SwapResult, SwapState)> {
        match params.spec() {
            SwapSpec::ExactIn { amount_in } => self.compute_exact_in(
                amount_in.get(),
                params.zero_for_one(),
                params.sqrt_price_limit(),
            ),
            SwapSpec::ExactOut { amount_out } => self.compute_exact_out(
                amount_out.get(),
                params.zero_for_one(),
                params.sqrt_price_limit(),
            ),
        }
    }

    /// Resolves and validates the effective sqrt-price limit.
    fn effective_limit(&self, zero_for_one: bool, limit: Option<f64>) -> crate::error::Result<f64> {
        let (effective, on_correct_side) = if zero_for_one {
            let bound = min_sqrt_price();
            let l = limit.unwrap_or(bound).max(bound);
            (l, l < self.sqrt_price)
        } else {
            let bound = max_sqrt_price();
            let l = limit.unwrap_or(bound).min(bound);
            (l, l > self.sqrt_price)
        };
        if limit.is_some() && !on_correct_side {
            return Err(TakeProfitError::InvalidConfiguration(
                "sqrt price limit is on the wrong side of the current price",
            ));
        }
        Ok(effective)
    }

    /// Runs an exact-input swap over a copy of the price state.
    fn compute_exact_in(
        &self,
        amount_in: u128,
        zero_for_one: bool,
        limit: Option<f64>,
    ) -> crate::error::Result<(SwapResult, SwapState)> {
        let limit = self.effective_limit(zero_for_one, limit)?;
        let fee_rate = self.key.fee().as_fraction();
        let net_factor = 1.0 - fee_rate;

        let mut state = SwapState {
            sqrt_price: self.sqrt_price,
            tick: self.current_tick,
            liquidity: self.liquidity,
        };
        let mut remaining = amount_in as f64;
        let mut used = 0.0_f64;
        let mut total_out = 0.0_f64;
        let mut total_fee = 0.0_f64;
        let mut steps = 0u32;

        while remaining >= 1.0 && steps < MAX_STEPS {
            steps += 1;

            let next = self.next_initialized_tick(state.tick, zero_for_one);
            let (target, crosses) = match next {
                Some((t, _)) => {
                    let tick_price = sqrt_price_at_tick(Tick::saturating(t));
                    let tick_first = if zero_for_one {
                        tick_price >= limit
                    } else {
                        tick_price <= limit
                    };
                    if tick_first {
                        (tick_price, next)
                    } else {
                        (limit, None)
                    }
                }
                None => (limit, None),
            };
            let (range_low, range_high) = if zero_for_one {
                (next.map_or(Tick::MIN.get(), |(t, _)| t), state.tick)
            } else {
                (state.tick, next.map_or(Tick::MAX.get(), |(t, _)| t - 1))
            };

            if state.liquidity == 0 {
                state.sqrt_price = target;
                match crosses {
                    Some((t, s)) => {
                        state = Self::cross(state, t, s, zero_for_one)?;
                        continue;
                    }
                    None => {
                        state.tick = Self::tick_within(target, range_low, range_high, zero_for_one);
                        break;
                    }
                }
            }

            let l = state.liquidity as f64;
            let sp = state.sqrt_price;
            let (max_net_in, full_out) = if zero_for_one {
                (
                    (l * (1.0 / target - 1.0 / sp)).max(0.0),
                    (l * (sp - target)).max(0.0),
                )
            } else {
                (
                    (l * (target - sp)).max(0.0),
                    (l * (1.0 / sp - 1.0 / target)).max(0.0),
                )
            };

            let net_remaining = remaining * net_factor;
            if net_remaining < max_net_in {
                let new_sp = if zero_for_one {
                    1.0 / (1.0 / sp + net_remaining / l)
                } else {
                    sp + net_remaining / l
                };
                let step_out = if zero_for_one {
                    l * (sp - new_sp)
                } else {
                    l * (1.0 / sp - 1.0 / new_sp)
                };
                total_out += step_out.max(0.0);
                total_fee += remaining - net_remaining;
                used += remaining;
                remaining = 0.0;
                state.sqrt_price = new_sp;
                state.tick = Self::tick_within(new_sp, range_low, range_high, zero_for_one);
                break;
            }

            let consumed = (max_net_in / net_factor).min(remaining);
            total_out += full_out;
            total_fee += (consumed - max_net_in).max(0.0);
            used += consumed;
            remaining -= consumed;
            state.sqrt_price = target;
            match crosses {
                Some((t, s)) => state = Self::cross(state, t, s, zero_for_one)?,
                None => {
                    state.tick = Self::tick_within(target, range_low, range_high, zero_for_one);
                    break;
                }
            }
        }

        let consumed = if remaining < 1.0 {
            amount_in
        } else {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let used = used.ceil().max(0.0) as u128;
            used.min(amount_in)
        };
        if consumed == 0 || total_out < 1.0 {
            return Err(TakeProfitError::InsufficientLiquidity);
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let amount_out = total_out.floor() as u128;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let fee = (total_fee.ceil().max(0.0) as u128).min(consumed);

        let result = SwapResult::new(
            Amount::new(consumed),
            Amount::new(amount_out),
            Amount::new(fee),
        )?;
        Ok((result, state))
    }

    /// Finds the smallest input whose exact-input swap yields at least
    /// `amount_out`.
    fn compute_exact_out(
        &self,
        amount_out: u128,
        zero_for_one: bool,
        limit: Option<f64>,
    ) -> crate::error::Result<(SwapResult, SwapState)> {
        let (probe, _) = self.compute_exact_in(PROBE_INPUT, zero_for_one, limit)?;
        if probe.amount_out().get() < amount_out {
            return Err(TakeProfitError::InsufficientLiquidity);
        }

        let mut low: u128 = 1;
        let mut high: u128 = probe.amount_in().get();
        let mut best = None;
        for _ in 0..SEARCH_ITERATIONS {
            if low > high {
                break;
            }
            let mid = low + (high - low) / 2;
            match self.compute_exact_in(mid, zero_for_one, limit) {
                Ok(found) if found.0.amount_out().get() >= amount_out => {
                    best = Some(found);
                    high = mid - 1;
                }
                Ok(_) | Err(TakeProfitError::InsufficientLiquidity) => low = mid + 1,
                Err(e) => return Err(e),
            }
        }
        best.ok_or(TakeProfitError::InsufficientLiquidity)
    }

    /// Applies the crossing of tick `t` to a swap state.
    fn cross(
        state: SwapState,
        t: i32,
        tick_state: TickState,
        zero_for_one: bool,
    ) -> crate::error::Result<SwapState> {
        let (liquidity, tick) = if zero_for_one {
            let l = tick_state
                .liquidity_net
                .checked_neg()
                .and_then(|neg| state.liquidity.checked_add_signed(neg))
                .ok_or(TakeProfitError::Overflow("liquidity underflow on cross"))?;
            (l, t - 1)
        } else {
            let l = state
                .liquidity
                .checked_add_signed(tick_state.liquidity_net)
                .ok_or(TakeProfitError::Overflow("liquidity overflow on cross"))?;
            (l, t)
        };
        Ok(SwapState {
            sqrt_price: state.sqrt_price,
            tick,
            liquidity,
        })
    }

    /// The tick for `sqrt_price`, kept inside the current liquidity range.
    fn tick_within(sqrt_price: f64, low: i32, high: i32, zero_for_one: bool) -> i32 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        match tick_at_sqrt_price(sqrt_price) {
            Ok(t) => t.get().clamp(low, high),
            Err(_) if zero_for_one => low,
            Err(_) => high,
        }
    }
}

impl FromConfig<ClmmConfig> for ClmmPool {
    /// Creates an empty pool priced at the configured tick.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`ClmmConfig::validate`].
    fn from_config(config: &ClmmConfig) -> crate::error::Result<Self> {
        config.validate()?;
        let tick = config.initial_tick();
        Ok(Self {
            key: *config.key(),
            current_tick: tick.get(),
            sqrt_price: sqrt_price_at_tick(tick),
            liquidity: 0,
            ticks: BTreeMap::new(),
            positions: BTreeMap::new(),
        })
    }
}
