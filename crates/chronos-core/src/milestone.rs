//! Milestone schedule and the Insight economy derived from it.
//!
//! Milestones are a pure step function over a generator's amount: fixed
//! thresholds at 10/25/50/100, then one level per doubling. The reward
//! economy depends on level *deltas*, so the thresholds here are exact and
//! must stay that way.

use crate::generator::GeneratorState;
use crate::numeric::{Dec, dec, int_pow};
use crate::research::{ResearchKey, ResearchKind};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Milestone schedule
// ---------------------------------------------------------------------------

/// Where a generator amount sits in the milestone schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneInfo {
    /// The next threshold to cross.
    pub next: Dec,
    /// Milestone level of the current amount.
    pub level: u64,
    /// The last threshold crossed (0 if none).
    pub prev: Dec,
}

/// Fixed thresholds before the doubling regime starts.
const FIXED_THRESHOLDS: [(u64, u64); 4] = [(10, 0), (25, 1), (50, 2), (100, 3)];

/// Evaluate the milestone schedule for an amount.
///
/// `{10→L1, 25→L2, 50→L3, 100→L4}`, then every doubling above 100 is one
/// more level (200→L5, 400→L6, ...).
pub fn next_milestone(amount: &Dec) -> MilestoneInfo {
    let mut prev = dec(0);
    for (threshold, level) in FIXED_THRESHOLDS {
        if *amount < dec(threshold) {
            return MilestoneInfo {
                next: dec(threshold),
                level,
                prev,
            };
        }
        prev = dec(threshold);
    }

    let mut threshold = dec(100);
    let mut level: u64 = 4;
    while *amount >= threshold {
        threshold = &threshold * dec(2);
        level += 1;
    }
    MilestoneInfo {
        prev: &threshold / dec(2),
        next: threshold,
        level: level - 1,
    }
}

/// Milestone level alone, when the neighbors are not needed.
#[inline]
pub fn milestone_level(amount: &Dec) -> u64 {
    next_milestone(amount).level
}

// ---------------------------------------------------------------------------
// Insight derivation
// ---------------------------------------------------------------------------

/// Total Insight ever earned from milestones across all tiers:
/// `Σ (tier+1) * level * 2^resonance_level(tier)`.
pub fn earned_insight(
    generators: &[GeneratorState],
    research: &BTreeMap<ResearchKey, u32>,
) -> Dec {
    let mut total = dec(0);
    for (tier, generator) in generators.iter().enumerate() {
        let level = milestone_level(&generator.amount);
        if level == 0 {
            continue;
        }
        let resonance = research
            .get(&ResearchKey::new(tier as u8, ResearchKind::Resonance))
            .copied()
            .unwrap_or(0);
        total += dec(tier as u64 + 1) * dec(level) * int_pow(2, resonance);
    }
    total
}

/// Total Insight sunk into research: each item's cost summed over every
/// level actually bought.
pub fn spent_insight(research: &BTreeMap<ResearchKey, u32>) -> Dec {
    research
        .iter()
        .fold(dec(0), |acc, (key, level)| acc + key.cumulative_cost(*level))
}

/// The floor the authoritative Insight balance may never sink below.
pub fn expected_insight(
    generators: &[GeneratorState],
    research: &BTreeMap<ResearchKey, u32>,
) -> Dec {
    earned_insight(generators, research) - spent_insight(research)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GENERATOR_COUNT;
    use std::str::FromStr;

    #[test]
    fn fixed_thresholds() {
        let cases = [
            (0u64, 0u64, 10u64),
            (9, 0, 10),
            (10, 1, 25),
            (24, 1, 25),
            (25, 2, 50),
            (49, 2, 50),
            (50, 3, 100),
            (99, 3, 100),
        ];
        for (amount, level, next) in cases {
            let info = next_milestone(&dec(amount));
            assert_eq!(info.level, level, "amount {amount}");
            assert_eq!(info.next, dec(next), "amount {amount}");
        }
    }

    #[test]
    fn doubling_regime() {
        let info = next_milestone(&dec(100));
        assert_eq!(info.level, 4);
        assert_eq!(info.next, dec(200));
        assert_eq!(info.prev, dec(100));

        let info = next_milestone(&dec(399));
        assert_eq!(info.level, 5);
        assert_eq!(info.next, dec(400));

        let info = next_milestone(&dec(400));
        assert_eq!(info.level, 6);
        assert_eq!(info.next, dec(800));
    }

    #[test]
    fn level_monotone_in_amount() {
        let mut last = 0;
        for amount in [0u64, 5, 10, 26, 75, 100, 150, 200, 5000, 1 << 40] {
            let level = milestone_level(&dec(amount));
            assert!(level >= last);
            last = level;
        }
    }

    #[test]
    fn level_at_extreme_scale() {
        // 100 * 2^500 sits exactly on a threshold.
        let huge = dec(100) * crate::numeric::dec_pow(&dec(2), 500);
        assert_eq!(milestone_level(&huge), 504);
        let just_below = &huge - dec(1);
        assert_eq!(milestone_level(&just_below), 503);
    }

    #[test]
    fn fractional_amounts() {
        let v = Dec::from_str("9.99").unwrap();
        assert_eq!(milestone_level(&v), 0);
        let v = Dec::from_str("10.5").unwrap();
        assert_eq!(milestone_level(&v), 1);
    }

    fn fresh_generators() -> Vec<GeneratorState> {
        (0..GENERATOR_COUNT).map(GeneratorState::new).collect()
    }

    #[test]
    fn earned_insight_weights_tier_and_level() {
        let mut gens = fresh_generators();
        gens[0].amount = dec(10); // level 1, tier weight 1
        gens[2].amount = dec(25); // level 2, tier weight 3
        let research = BTreeMap::new();
        assert_eq!(earned_insight(&gens, &research), dec(1 + 6));
    }

    #[test]
    fn resonance_doubles_earnings() {
        let mut gens = fresh_generators();
        gens[0].amount = dec(10);
        let mut research = BTreeMap::new();
        research.insert(ResearchKey::new(0, ResearchKind::Resonance), 3);
        assert_eq!(earned_insight(&gens, &research), dec(8));
    }

    #[test]
    fn spent_insight_sums_cumulative_costs() {
        let mut research = BTreeMap::new();
        // gen1 speed levels 0..3 cost 1 + 2 + 4 = 7
        research.insert(ResearchKey::new(0, ResearchKind::Speed), 3);
        // gen1 efficiency level 0 costs 5
        research.insert(ResearchKey::new(0, ResearchKind::Efficiency), 1);
        assert_eq!(spent_insight(&research), dec(12));
    }

    #[test]
    fn expected_insight_is_earned_minus_spent() {
        let mut gens = fresh_generators();
        gens[0].amount = dec(100); // level 4 -> 4 insight
        let mut research = BTreeMap::new();
        research.insert(ResearchKey::new(0, ResearchKind::Speed), 1); // cost 1
        assert_eq!(expected_insight(&gens, &research), dec(3));
    }
}
