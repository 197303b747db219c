//! The 50-tier generator chain: production cycles, downward propagation,
//! and the purchase cost curve.
//!
//! Tier `i` manufactures units of tier `i-1`; tier 0 pays out the base
//! currency (iterons). Tiers are advanced strictly low-to-high so a tier's
//! production is always computed from its pre-tick amount and units received
//! this tick never produce in the same tick.

use crate::numeric::{Dec, dec, dec_floor, dec_floor_int, dec_ceil, dec_scaled, int_pow};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// Number of generator tiers. Fixed for the life of a save.
pub const GENERATOR_COUNT: usize = 50;

// ---------------------------------------------------------------------------
// Periods
// ---------------------------------------------------------------------------

/// Unmodified production period for a tier, in seconds: `5*(i+1)*(i+2)`.
#[inline]
pub fn base_period(tier: usize) -> f64 {
    (5 * (tier + 1) * (tier + 2)) as f64
}

/// Production period after speed research: 10% faster per level, floored at
/// 10% of base (reached exactly at level 9).
pub fn period(tier: usize, speed_level: u32) -> f64 {
    let base = base_period(tier);
    (base * (1.0 - 0.1 * speed_level as f64)).max(base * 0.1)
}

/// Same period as an exact decimal, for rate projections.
pub fn period_dec(tier: usize, speed_level: u32) -> Dec {
    let base = (5 * (tier + 1) * (tier + 2)) as i64;
    let tenths = (10i64 - speed_level as i64).max(1);
    dec_scaled(base * tenths, 1)
}

// ---------------------------------------------------------------------------
// GeneratorState
// ---------------------------------------------------------------------------

/// Persistent state of one generator tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorState {
    /// Tier index, 0..49.
    pub id: u32,

    /// Units owned. Continuous: chain propagation deposits whole units, but
    /// legacy saves may carry fractions; payouts truncate at payout time.
    pub amount: Dec,

    /// Units bought directly by the player (statistics only).
    pub bought: Dec,

    /// Amount-per-batch multiplier. Inert hook from the old milestone
    /// economy, always 1; kept so the payout formula retains the factor.
    pub multiplier: Dec,

    /// Simulated seconds accumulated toward the next batch.
    #[serde(default)]
    pub cycle_progress: f64,

    /// Fixed cost offset, `ceil(50^id)`. Recomputed from the index on load.
    pub cost_base: Dec,
}

impl GeneratorState {
    /// A fresh tier with nothing owned.
    pub fn new(tier: usize) -> Self {
        Self {
            id: tier as u32,
            amount: Dec::from(0u32),
            bought: Dec::from(0u32),
            multiplier: Dec::from(1u32),
            cycle_progress: 0.0,
            cost_base: dec_ceil(&int_pow(50, tier as u32)),
        }
    }

    /// Price of the next unit:
    /// `ceil(cost_base + (tier+1) * triangular(floor(amount)))`.
    ///
    /// The single cost source for both affordability checks and display.
    pub fn purchase_cost(&self) -> Dec {
        let n = dec_floor_int(&self.amount);
        let triangular = (&n * (&n + BigInt::from(1))) / BigInt::from(2);
        let increment = BigInt::from(self.id + 1) * triangular;
        dec_ceil(&(&self.cost_base + Dec::from(increment)))
    }
}

// ---------------------------------------------------------------------------
// Chain advancement
// ---------------------------------------------------------------------------

/// Per-tick multipliers resolved from research and talent state before the
/// chain runs, so the chain itself reads a consistent snapshot.
#[derive(Debug, Clone)]
pub struct ChainTuning {
    /// Effective period per tier, seconds.
    pub periods: Vec<f64>,

    /// Yield multiplier per tier:
    /// `(1 + efficiency_level) * (1 + 0.1 * active_resonance_level)`.
    pub efficiency: Vec<Dec>,

    /// Historical milestone multiplier hook. Fixed at 1.
    pub batch_multiplier: Dec,
}

impl ChainTuning {
    /// Tuning with no research and no talents: base periods, x1 yield.
    pub fn neutral() -> Self {
        Self {
            periods: (0..GENERATOR_COUNT).map(|i| period(i, 0)).collect(),
            efficiency: (0..GENERATOR_COUNT).map(|_| dec(1)).collect(),
            batch_multiplier: dec(1),
        }
    }
}

/// Advance every tier by `dt` simulated seconds and propagate output down
/// the chain. Returns the iterons generated by tier 0.
///
/// A non-finite or non-positive `dt` contributes nothing to any tier and
/// leaves `cycle_progress` untouched.
pub fn advance_chain(generators: &mut [GeneratorState], dt: f64, tuning: &ChainTuning) -> Dec {
    let mut generated = dec(0);
    if !dt.is_finite() || dt <= 0.0 {
        return generated;
    }

    for i in 0..generators.len() {
        if generators[i].amount <= dec(0) {
            continue;
        }

        let period = tuning.periods[i];
        generators[i].cycle_progress += dt;
        if generators[i].cycle_progress < period {
            continue;
        }

        let batches = (generators[i].cycle_progress / period).floor();
        generators[i].cycle_progress %= period;

        let payout = dec_floor(
            &(&generators[i].amount
                * &generators[i].multiplier
                * &tuning.batch_multiplier
                * &tuning.efficiency[i]
                * dec(batches as u64)),
        );

        if i == 0 {
            generated += payout;
        } else {
            generators[i - 1].amount += payout;
        }
    }

    generated
}
