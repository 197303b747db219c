//! Research catalog: per-generator upgrade lines and their cost curves.
//!
//! Every generator tier has three research lines. Instead of the legacy
//! string ids (`"gen3_speed"`), research is keyed by a structured
//! [`ResearchKey`] of tier index and [`ResearchKind`]; the legacy spelling
//! survives only at the serde boundary so old saves keep loading.

use crate::generator::GENERATOR_COUNT;
use crate::numeric::{Dec, dec_pow, dec_scaled, int_pow};
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// The three research lines available per generator tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResearchKind {
    /// Reduces the production period by 10% per level, floored at 10% of base.
    Speed,
    /// Multiplies production yield: level 0 = x1, level 1 = x2, ...
    Efficiency,
    /// Doubles milestone Insight rewards per level.
    Resonance,
}

impl ResearchKind {
    fn suffix(self) -> &'static str {
        match self {
            ResearchKind::Speed => "speed",
            ResearchKind::Efficiency => "eff",
            ResearchKind::Resonance => "resonance",
        }
    }
}

/// Identifies one research item: a (tier, kind) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResearchKey {
    /// Generator tier index, 0..49.
    pub tier: u8,
    /// Which upgrade line.
    pub kind: ResearchKind,
}

impl ResearchKey {
    pub fn new(tier: u8, kind: ResearchKind) -> Self {
        Self { tier, kind }
    }

    /// Maximum purchasable level for this item. Speed caps at 9, exactly
    /// reaching the 10%-of-base period floor.
    pub fn max_level(&self) -> u32 {
        match self.kind {
            ResearchKind::Speed => 9,
            ResearchKind::Efficiency => 100,
            ResearchKind::Resonance => 10,
        }
    }

    /// Insight cost of buying the next level when `level` are already owned.
    ///
    /// With `n = tier + 1`: Speed costs `n^2 * 2^level`, Efficiency
    /// `5n^2 * 2.5^level`, Resonance `20n^2 * 3.5^level`.
    pub fn cost(&self, level: u32) -> Dec {
        let n = self.tier as u32 + 1;
        match self.kind {
            ResearchKind::Speed => int_pow(n, 2) * int_pow(2, level),
            ResearchKind::Efficiency => {
                int_pow(n, 2) * Dec::from(5u32) * dec_pow(&dec_scaled(25, 1), level)
            }
            ResearchKind::Resonance => {
                int_pow(n, 2) * Dec::from(20u32) * dec_pow(&dec_scaled(35, 1), level)
            }
        }
    }

    /// Total Insight sunk into the first `levels` levels of this item.
    pub fn cumulative_cost(&self, levels: u32) -> Dec {
        (0..levels).fold(Dec::from(0u32), |acc, l| acc + self.cost(l))
    }
}

// ---------------------------------------------------------------------------
// Legacy string spelling (serde boundary)
// ---------------------------------------------------------------------------

impl fmt::Display for ResearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen{}_{}", self.tier as u32 + 1, self.kind.suffix())
    }
}

/// Error returned when a legacy research id does not parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized research id: {0}")]
pub struct ParseResearchKeyError(pub String);

impl FromStr for ResearchKey {
    type Err = ParseResearchKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix("gen")
            .ok_or_else(|| ParseResearchKeyError(s.into()))?;
        let (num, suffix) = rest
            .split_once('_')
            .ok_or_else(|| ParseResearchKeyError(s.into()))?;
        let n: usize = num.parse().map_err(|_| ParseResearchKeyError(s.into()))?;
        if n == 0 || n > GENERATOR_COUNT {
            return Err(ParseResearchKeyError(s.into()));
        }
        let kind = match suffix {
            "speed" => ResearchKind::Speed,
            "eff" => ResearchKind::Efficiency,
            "resonance" => ResearchKind::Resonance,
            _ => return Err(ParseResearchKeyError(s.into())),
        };
        Ok(ResearchKey::new((n - 1) as u8, kind))
    }
}

impl Serialize for ResearchKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResearchKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = ResearchKey;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a research id like \"gen3_speed\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ResearchKey, E> {
                v.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(KeyVisitor)
    }
}
