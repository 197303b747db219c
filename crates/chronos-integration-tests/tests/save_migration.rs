//! Save round-trips and backward-compatible migration, driven through the
//! public load path with the shipped catalog.

use chronos_core::engine::Engine;
use chronos_core::generator::GENERATOR_COUNT;
use chronos_core::numeric::{dec, int_pow};
use chronos_core::research::{ResearchKey, ResearchKind};
use chronos_core::state::EngineState;
use chronos_core::talent::TalentId;
use chronos_data::standard_talents;
use serde_json::json;

const NOW: i64 = 1_700_000_000_000;

#[test]
fn full_state_round_trip() {
    let mut state = EngineState::new(NOW);
    state.iterons = int_pow(7, 100); // far beyond f64 range
    state.insight = dec(12345);
    state.generators[0].amount = dec(128);
    state.generators[17].amount = dec(3);
    state.generators[17].cycle_progress = 41.5;
    state
        .research
        .insert(ResearchKey::new(17, ResearchKind::Resonance), 4);
    state.talents.insert(TalentId::TemporalDilation, 2);
    state.talents.insert(TalentId::FluxCapacitor, 1);
    state.focus = dec(77);
    state.flux = dec(88);
    state.active_time = 12.75;
    state.stored_time = 400.0;
    state.max_stored_time = 1000.0;
    state.warp_speed = 250;

    let engine = Engine::from_state(state.clone(), standard_talents());
    let json = engine.save().unwrap();
    let restored = Engine::load_at(&json, standard_talents(), NOW).unwrap();

    assert_eq!(restored.state(), &state);
}

#[test]
fn legacy_array_research_save_migrates() {
    // The documented migration case: a save from the era when research was
    // a flat array of flag ids.
    let legacy = json!({
        "iterons": "1000",
        "generators": (0..GENERATOR_COUNT).map(|i| json!({
            "id": i,
            "amount": "0",
            "bought": "0",
            "multiplier": "2.5",
            "costBase": "123",
            "costGrowth": "1.15",
        })).collect::<Vec<_>>(),
        "research": ["gen1_speed_1"],
        "lastTick": NOW,
    })
    .to_string();

    let engine = Engine::load_at(&legacy, standard_talents(), NOW).unwrap();
    let state = engine.state();

    assert_eq!(
        state.research.get(&ResearchKey::new(0, ResearchKind::Speed)),
        Some(&5)
    );
    assert_eq!(state.iterons, dec(1000));
    assert_eq!(state.insight, dec(0));
    assert_eq!(state.warp_speed, 20);
    assert!(!state.is_warping);
    assert_eq!(state.focus, dec(0));
    assert!(state.talents.is_empty());

    // Rebalance: stale multiplier/costBase replaced by index-derived values.
    for (i, g) in state.generators.iter().enumerate() {
        assert_eq!(g.multiplier, dec(1));
        assert_eq!(g.cost_base, int_pow(50, i as u32));
    }
}

#[test]
fn corrupt_save_falls_back_to_fresh_state() {
    let engine = Engine::load_or_new("definitely not json{{", standard_talents());
    assert_eq!(engine.state().iterons, dec(0));
    assert_eq!(engine.state().generators.len(), GENERATOR_COUNT);

    let engine = Engine::load_or_new("[1, 2, 3]", standard_talents());
    assert_eq!(engine.state().iterons, dec(0));
}

#[test]
fn out_of_range_levels_are_clamped_on_load() {
    let save = json!({
        "research": { "gen1_speed": 99 },
        "talents": { "active_resonance": 99 },
        "lastTick": NOW,
    })
    .to_string();

    let engine = Engine::load_at(&save, standard_talents(), NOW).unwrap();
    assert_eq!(
        engine.state().research_level(0, ResearchKind::Speed),
        9,
        "speed research caps at the period floor"
    );
    assert_eq!(engine.state().talent_level(TalentId::ActiveResonance), 20);
}

#[test]
fn stale_save_heals_its_insight_on_first_commit() {
    // A pre-Insight save whose generators already sit on milestones.
    let save = json!({
        "iterons": "0",
        "generators": [{
            "id": 0, "amount": "100", "bought": "100", "multiplier": "1",
            "costBase": "1",
        }],
        "lastTick": NOW,
    })
    .to_string();

    let mut engine = Engine::load_at(&save, standard_talents(), NOW).unwrap();
    assert_eq!(engine.state().insight, dec(0));

    let outcome = engine.tick(0.0, true);
    // Amount 100 on tier 0 is milestone level 4.
    assert_eq!(outcome.insight_correction, Some(dec(4)));
    assert_eq!(engine.state().insight, dec(4));
}

#[test]
fn save_reads_the_committed_snapshot_only() {
    let mut state = EngineState::new(NOW);
    state.generators[0].amount = dec(10);
    let mut engine = Engine::from_state(state, standard_talents());

    // Simulate without committing: the save must not see this progress.
    engine.tick(25.0, false);
    let json = engine.save().unwrap();
    let restored = Engine::load_at(&json, standard_talents(), NOW).unwrap();
    assert_eq!(restored.state().iterons, dec(0));

    // After a commit the progress is visible to saves.
    engine.tick(0.0, true);
    let json = engine.save().unwrap();
    let restored = Engine::load_at(&json, standard_talents(), NOW).unwrap();
    assert_eq!(restored.state().iterons, dec(20));
}
