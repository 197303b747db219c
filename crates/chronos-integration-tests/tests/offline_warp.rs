//! Offline-gap staging, claiming, and time-warp sessions across
//! save/load boundaries.

use chronos_core::engine::Engine;
use chronos_core::numeric::dec;
use chronos_core::state::EngineState;
use chronos_core::talent::TalentId;
use chronos_data::standard_talents;

const NOW: i64 = 1_700_000_000_000;

fn saved_game(setup: impl FnOnce(&mut EngineState)) -> String {
    let mut state = EngineState::new(NOW);
    setup(&mut state);
    let engine = Engine::from_state(state, standard_talents());
    engine.save().unwrap()
}

#[test]
fn short_gap_is_discarded() {
    let json = saved_game(|_| {});
    // 45 seconds later: below the prompt threshold, silently dropped.
    let engine = Engine::load_at(&json, standard_talents(), NOW + 45_000).unwrap();
    assert_eq!(engine.state().offline_gap, 0);
}

#[test]
fn boundary_gap_is_discarded() {
    let json = saved_game(|_| {});
    let engine = Engine::load_at(&json, standard_talents(), NOW + 60_000).unwrap();
    assert_eq!(engine.state().offline_gap, 0);
}

#[test]
fn long_gap_is_staged_not_applied() {
    let json = saved_game(|s| s.generators[0].amount = dec(10));
    let engine = Engine::load_at(&json, standard_talents(), NOW + 3_700_000).unwrap();

    let state = engine.state();
    assert_eq!(state.offline_gap, 3700);
    // Staging must not simulate anything by itself.
    assert_eq!(state.iterons, dec(0));
    assert_eq!(state.stored_time, 0.0);
}

#[test]
fn claim_converts_gap_to_fuel_and_flux() {
    let json = saved_game(|_| {});
    let mut engine = Engine::load_at(&json, standard_talents(), NOW + 3_700_000).unwrap();

    engine.claim_offline_time();
    let state = engine.state();
    assert_eq!(state.stored_time, 3700.0);
    assert_eq!(state.max_stored_time, 3700.0);
    assert_eq!(state.flux, dec(61));
    assert_eq!(state.offline_gap, 0);
}

#[test]
fn temporal_dilation_boosts_the_claim() {
    let json = saved_game(|s| {
        s.talents.insert(TalentId::TemporalDilation, 4);
    });
    let mut engine = Engine::load_at(&json, standard_talents(), NOW + 1_000_000).unwrap();
    assert_eq!(engine.state().offline_gap, 1000);

    engine.claim_offline_time();
    // ratio 1.2: the reservoir gets more than real time, flux does not.
    assert!((engine.state().stored_time - 1200.0).abs() < 1e-6);
    assert_eq!(engine.state().flux, dec(16));
}

#[test]
fn claiming_overwrites_an_existing_reservoir() {
    let json = saved_game(|s| {
        s.stored_time = 500.0;
        s.max_stored_time = 800.0;
    });
    let mut engine = Engine::load_at(&json, standard_talents(), NOW + 200_000).unwrap();

    engine.claim_offline_time();
    // Claiming resets rather than stacks, high-water mark included.
    assert_eq!(engine.state().stored_time, 200.0);
    assert_eq!(engine.state().max_stored_time, 200.0);
}

#[test]
fn warp_session_burns_fuel_and_accelerates() {
    let mut state = EngineState::new(NOW);
    state.stored_time = 100.0;
    state.max_stored_time = 100.0;
    state.generators[0].amount = dec(1);
    let mut engine = Engine::from_state(state, standard_talents());

    engine.set_warp_speed(10);
    engine.toggle_time_warp();
    assert!(engine.state().is_warping);

    // Each 1s real frame simulates 10s and burns 9s of fuel.
    engine.advance_frame(1.0, true);
    assert_eq!(engine.state().stored_time, 91.0);
    assert_eq!(engine.state().iterons, dec(1));

    for _ in 0..10 {
        engine.advance_frame(1.0, true);
    }
    assert_eq!(engine.state().stored_time, 1.0);
    assert!(engine.state().is_warping);

    // The final frame drains the reservoir and warp switches itself off.
    engine.advance_frame(1.0, true);
    assert_eq!(engine.state().stored_time, 0.0);
    assert!(!engine.state().is_warping);

    // Subsequent frames run at real time.
    let before = engine.state().iterons.clone();
    engine.advance_frame(1.0, true);
    assert_eq!(engine.state().iterons, before);
}

#[test]
fn flux_capacitor_discounts_fuel_burn() {
    let mut state = EngineState::new(NOW);
    state.stored_time = 100.0;
    state.talents.insert(TalentId::FluxCapacitor, 5);
    let mut engine = Engine::from_state(state, standard_talents());

    engine.set_warp_speed(10);
    engine.toggle_time_warp();
    engine.advance_frame(1.0, true);
    // extra 9s at 20% discount: 7.2s burned.
    assert!((engine.state().stored_time - 92.8).abs() < 1e-9);
}

#[test]
fn warping_is_off_after_reload_mid_warp() {
    let mut state = EngineState::new(NOW);
    state.stored_time = 50.0;
    let mut engine = Engine::from_state(state, standard_talents());
    engine.toggle_time_warp();
    engine.tick(1.0, true);
    assert!(engine.snapshot().is_warping);

    let json = engine.save().unwrap();
    let restored = Engine::load_at(&json, standard_talents(), NOW + 5_000).unwrap();
    assert!(!restored.state().is_warping);
    assert_eq!(restored.state().stored_time, 50.0);
}

#[test]
fn focus_accrues_across_a_warped_catchup() {
    let mut state = EngineState::new(NOW);
    state.stored_time = 10_000.0;
    let mut engine = Engine::from_state(state, standard_talents());
    engine.set_warp_speed(100);
    engine.toggle_time_warp();

    // 2 real seconds at 100x: 200 simulated seconds, 3 focus intervals.
    engine.advance_frame(1.0, true);
    engine.advance_frame(1.0, true);
    assert_eq!(engine.state().focus, dec(3));
}
