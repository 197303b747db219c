//! The single authoritative game-state record.
//!
//! Exactly one [`EngineState`] is owned by the engine; observers only ever
//! see the published clone taken after a committed tick. The serde shape of
//! this struct *is* the persisted save record (camelCase field spelling,
//! decimals in canonical string form), so renaming a field here is a save
//! format change and belongs behind a migration.

use crate::generator::{GENERATOR_COUNT, GeneratorState};
use crate::numeric::Dec;
use crate::research::{ResearchKey, ResearchKind};
use crate::talent::TalentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default warp speed for saves predating the warp-speed selector.
fn default_warp_speed() -> u32 {
    20
}

/// Authoritative engine state. One instance per game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineState {
    /// Tier-0 output currency. Floored to an integer after any mutation.
    #[serde(default)]
    pub iterons: Dec,

    /// Derived currency from milestones. Never below
    /// `earned_insight - spent_insight`; corrected upward on every
    /// committed tick.
    #[serde(default)]
    pub insight: Dec,

    /// The 50 generator tiers, index = tier rank.
    #[serde(default)]
    pub generators: Vec<GeneratorState>,

    /// Epoch millis of the last authoritative checkpoint. Only used to
    /// compute the offline gap at load time.
    #[serde(default)]
    pub last_tick: i64,

    /// UI preference carried in the save. Legacy spelling predates the
    /// camelCase convention.
    #[serde(default, rename = "showFPS")]
    pub show_fps: bool,

    /// Research levels, sparse: absent means level 0.
    #[serde(default)]
    pub research: BTreeMap<ResearchKey, u32>,

    /// Warp fuel, in seconds.
    #[serde(default)]
    pub stored_time: f64,

    /// High-water mark of the fuel reservoir, for display fractions only.
    #[serde(default)]
    pub max_stored_time: f64,

    /// Whether warp is active. Always forced off on load.
    #[serde(default)]
    pub is_warping: bool,

    /// Warp multiplier, clamped to [2, 10000].
    #[serde(default = "default_warp_speed")]
    pub warp_speed: u32,

    /// Offline seconds detected at load, pending player acknowledgement.
    #[serde(default)]
    pub offline_gap: u64,

    /// Whether the offline-time prompt was dismissed without claiming.
    #[serde(default)]
    pub is_time_shift_dismissed: bool,

    /// Talent currency earned from online activity.
    #[serde(default)]
    pub focus: Dec,

    /// Talent currency earned from claimed offline time.
    #[serde(default)]
    pub flux: Dec,

    /// Online seconds accumulated toward the next Focus point.
    #[serde(default)]
    pub active_time: f64,

    /// Talent levels, sparse: absent means level 0.
    #[serde(default)]
    pub talents: BTreeMap<TalentId, u32>,
}

impl EngineState {
    /// Fresh game-start state: 50 empty generators, everything else zeroed.
    pub fn new(now_ms: i64) -> Self {
        Self {
            iterons: Dec::from(0u32),
            insight: Dec::from(0u32),
            generators: (0..GENERATOR_COUNT).map(GeneratorState::new).collect(),
            last_tick: now_ms,
            show_fps: true,
            research: BTreeMap::new(),
            stored_time: 0.0,
            max_stored_time: 0.0,
            is_warping: false,
            warp_speed: default_warp_speed(),
            offline_gap: 0,
            is_time_shift_dismissed: false,
            focus: Dec::from(0u32),
            flux: Dec::from(0u32),
            active_time: 0.0,
            talents: BTreeMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Level accessors
    // -----------------------------------------------------------------------

    /// Research level for a (tier, kind) pair; 0 when absent.
    pub fn research_level(&self, tier: usize, kind: ResearchKind) -> u32 {
        self.research
            .get(&ResearchKey::new(tier as u8, kind))
            .copied()
            .unwrap_or(0)
    }

    /// Talent level for an id; 0 when absent.
    pub fn talent_level(&self, id: TalentId) -> u32 {
        self.talents.get(&id).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::dec;

    #[test]
    fn new_state_has_fifty_empty_generators() {
        let state = EngineState::new(0);
        assert_eq!(state.generators.len(), GENERATOR_COUNT);
        for (i, g) in state.generators.iter().enumerate() {
            assert_eq!(g.id as usize, i);
            assert_eq!(g.amount, dec(0));
            assert_eq!(g.multiplier, dec(1));
        }
        assert_eq!(state.warp_speed, 20);
        assert!(!state.is_warping);
    }

    #[test]
    fn save_record_uses_camel_case() {
        let state = EngineState::new(1234);
        let json = serde_json::to_value(&state).unwrap();
        let obj = json.as_object().unwrap();
        for field in [
            "iterons",
            "insight",
            "generators",
            "lastTick",
            "showFPS",
            "research",
            "storedTime",
            "maxStoredTime",
            "isWarping",
            "warpSpeed",
            "offlineGap",
            "isTimeShiftDismissed",
            "focus",
            "flux",
            "activeTime",
            "talents",
        ] {
            assert!(obj.contains_key(field), "missing save field {field}");
        }
        let gen0 = &json["generators"][0];
        assert!(gen0.get("cycleProgress").is_some());
        assert!(gen0.get("costBase").is_some());
    }

    #[test]
    fn level_accessors_default_to_zero() {
        let mut state = EngineState::new(0);
        assert_eq!(state.research_level(3, ResearchKind::Speed), 0);
        assert_eq!(state.talent_level(TalentId::FocusMastery), 0);

        state
            .research
            .insert(ResearchKey::new(3, ResearchKind::Speed), 4);
        state.talents.insert(TalentId::FocusMastery, 2);
        assert_eq!(state.research_level(3, ResearchKind::Speed), 4);
        assert_eq!(state.talent_level(TalentId::FocusMastery), 2);
    }
}
