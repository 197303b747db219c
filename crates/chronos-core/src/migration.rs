//! Shape migration for older save formats.
//!
//! Migrations run on the parsed JSON object before typed decoding, in a
//! fixed order. Each step is independently skippable: it inspects the shape
//! and does nothing when the save already matches. Applied steps are logged
//! so a surprising load can be reconstructed from diagnostics.

use serde_json::{Map, Value, json};

/// Context handed to every migration step.
pub(crate) struct MigrationContext {
    /// Current wall-clock time, epoch millis. Used to default `lastTick`.
    pub now_ms: i64,
}

type MigrationFn = fn(&mut Map<String, Value>, &MigrationContext) -> bool;

/// Ordered migration steps. Order matters: later steps may read fields
/// earlier steps established.
const MIGRATIONS: &[(&str, MigrationFn)] = &[
    ("default-insight", default_insight),
    ("research-array-to-map", research_array_to_map),
    ("default-last-tick", default_last_tick),
    ("warp-fields", warp_fields),
    ("talent-fields", talent_fields),
];

/// Run every migration step in order against a parsed save object.
pub(crate) fn run(map: &mut Map<String, Value>, ctx: &MigrationContext) {
    for (name, migrate) in MIGRATIONS {
        if migrate(map, ctx) {
            log::debug!("save migration applied: {name}");
        }
    }
}

/// Treats JSON `null` the same as an absent field; old serializers wrote
/// both for unset values.
fn is_missing(map: &Map<String, Value>, key: &str) -> bool {
    !map.contains_key(key) || map[key].is_null()
}

fn set_default(map: &mut Map<String, Value>, key: &str, value: Value) -> bool {
    if is_missing(map, key) {
        map.insert(key.to_string(), value);
        true
    } else {
        false
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Saves predating the Insight economy have no `insight` field.
fn default_insight(map: &mut Map<String, Value>, _ctx: &MigrationContext) -> bool {
    set_default(map, "insight", json!("0"))
}

/// The oldest saves stored `research` as an array of flag ids. The two
/// "half speed" flags become level 5 of the corresponding leveled item;
/// everything else from that era had no surviving equivalent.
fn research_array_to_map(map: &mut Map<String, Value>, _ctx: &MigrationContext) -> bool {
    match map.get("research") {
        Some(Value::Array(ids)) => {
            let mut research = Map::new();
            let legacy = [("gen1_speed_1", "gen1_speed"), ("gen2_speed_1", "gen2_speed")];
            for (old_id, new_id) in legacy {
                if ids.iter().any(|v| v.as_str() == Some(old_id)) {
                    research.insert(new_id.to_string(), json!(5));
                }
            }
            map.insert("research".to_string(), Value::Object(research));
            true
        }
        Some(Value::Object(_)) => false,
        _ => set_default(map, "research", json!({})),
    }
}

/// Saves written before the checkpoint field get "now", which makes the
/// offline gap zero rather than absurd.
fn default_last_tick(map: &mut Map<String, Value>, ctx: &MigrationContext) -> bool {
    set_default(map, "lastTick", json!(ctx.now_ms))
}

/// Saves predating the time-warp system lack the whole fuel block.
/// `maxStoredTime` falls back to `storedTime` so the reservoir bar starts
/// full rather than overflowing.
fn warp_fields(map: &mut Map<String, Value>, _ctx: &MigrationContext) -> bool {
    let mut changed = set_default(map, "storedTime", json!(0.0));
    let stored = map
        .get("storedTime")
        .cloned()
        .unwrap_or_else(|| json!(0.0));
    changed |= set_default(map, "maxStoredTime", stored);
    changed |= set_default(map, "warpSpeed", json!(20));
    changed |= set_default(map, "isTimeShiftDismissed", json!(false));
    changed
}

/// Saves predating the talent tree lack the talent currencies and levels.
fn talent_fields(map: &mut Map<String, Value>, _ctx: &MigrationContext) -> bool {
    let mut changed = set_default(map, "focus", json!("0"));
    changed |= set_default(map, "flux", json!("0"));
    changed |= set_default(map, "activeTime", json!(0.0));
    changed |= set_default(map, "talents", json!({}));
    changed
}
