//! Save codec for the engine state.
//!
//! Saves are a JSON dump of [`EngineState`] with every decimal field in
//! canonical string form. Loading parses, runs the shape migrations (see
//! [`crate::migration`]), decodes through serde (which reconstructs every
//! decimal explicitly), then normalizes the result: re-floor iterons,
//! force warp off, and rebuild the per-generator fields whose stored values
//! stopped being authoritative after the cost rebalance.

use crate::engine::{WARP_SPEED_MAX, WARP_SPEED_MIN};
use crate::generator::{GENERATOR_COUNT, GeneratorState};
use crate::migration::{self, MigrationContext};
use crate::numeric::{Dec, dec_ceil, dec_floor, int_pow};
use crate::state::EngineState;
use serde_json::Value;

/// Errors produced by the save codec. Callers that want the
/// recover-to-fresh-state policy use [`crate::engine::Engine::load_or_new`].
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("save data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("save data is not a JSON object")]
    NotAnObject,
}

/// Serialize a state record to its persistent JSON form.
pub fn encode(state: &EngineState) -> Result<String, SaveError> {
    Ok(serde_json::to_string(state)?)
}

/// Parse, migrate and normalize a save. `now_ms` seeds the `lastTick`
/// default for saves predating that field.
pub fn decode(json: &str, now_ms: i64) -> Result<EngineState, SaveError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(mut map) = value else {
        return Err(SaveError::NotAnObject);
    };

    migration::run(&mut map, &MigrationContext { now_ms });

    let mut state: EngineState = serde_json::from_value(Value::Object(map))?;
    normalize(&mut state);
    Ok(state)
}

/// Post-decode fixups that apply to every load, current schema included.
fn normalize(state: &mut EngineState) {
    // Legacy saves accumulated fractional iterons; the currency is integral.
    state.iterons = dec_floor(&state.iterons);

    // Warping never resumes automatically.
    state.is_warping = false;

    // Exactly 50 generators at fixed indices. Stored multiplier and
    // costBase values from before the cost rebalance are no longer valid;
    // both derive from the index alone.
    state.generators.truncate(GENERATOR_COUNT);
    for tier in 0..GENERATOR_COUNT {
        if tier < state.generators.len() {
            let generator = &mut state.generators[tier];
            generator.id = tier as u32;
            generator.multiplier = Dec::from(1u32);
            generator.cost_base = dec_ceil(&int_pow(50, tier as u32));
            if !generator.cycle_progress.is_finite() || generator.cycle_progress < 0.0 {
                generator.cycle_progress = 0.0;
            }
        } else {
            state.generators.push(GeneratorState::new(tier));
        }
    }

    if !state.stored_time.is_finite() || state.stored_time < 0.0 {
        state.stored_time = 0.0;
    }
    if !state.max_stored_time.is_finite() || state.max_stored_time < state.stored_time {
        state.max_stored_time = state.stored_time;
    }
    state.warp_speed = state.warp_speed.clamp(WARP_SPEED_MIN, WARP_SPEED_MAX);
    if !state.active_time.is_finite() || state.active_time < 0.0 {
        state.active_time = 0.0;
    }
}
