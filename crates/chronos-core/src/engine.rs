//! The simulation engine: owns the authoritative state and orchestrates the
//! per-tick pipeline.
//!
//! # Architecture
//!
//! The `Engine` owns:
//! - A single authoritative [`EngineState`] (the only source of truth)
//! - A published clone of it, refreshed on committed ticks and on every
//!   player action, which is what observers and auto-save read
//! - An injected [`TalentBook`] with the game's talent catalog
//!
//! # Tick Pipeline
//!
//! Each `tick(dt, commit)` runs:
//! 1. Resolve per-tier periods and yield multipliers from research/talents
//! 2. Advance the generator chain and collect tier-0 output
//! 3. Floor iterons, stamp the checkpoint time, accrue active time
//! 4. Convert elapsed active time into Focus (looping, one point per
//!    interval, so a single huge `dt` pays out every interval it covers)
//! 5. If committing: raise Insight to its derived floor (never lower it)
//!    and publish a snapshot
//!
//! The commit flag exists so simulation can run at a high, numerically
//! stable cadence while observers re-render at a lower one.

use crate::generator::{ChainTuning, GENERATOR_COUNT, advance_chain, period, period_dec};
use crate::milestone::{MilestoneInfo, expected_insight, milestone_level, next_milestone};
use crate::numeric::{Dec, dec, dec_floor, dec_scaled};
use crate::research::ResearchKey;
use crate::serialize::{self, SaveError};
use crate::state::EngineState;
use crate::talent::{TalentBook, TalentId, TalentPath};
use std::time::{SystemTime, UNIX_EPOCH};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Offline gaps at or below this many seconds are discarded on load instead
/// of being staged for the player to claim.
pub const OFFLINE_GAP_THRESHOLD_SECS: u64 = 60;

/// Upper bound on the real delta time accepted per frame. Protects the
/// catch-up path after the process was suspended for a very long time.
pub const MAX_FRAME_DELTA_SECS: f64 = 3600.0;

/// Warp speed bounds.
pub const WARP_SPEED_MIN: u32 = 2;
pub const WARP_SPEED_MAX: u32 = 10_000;

/// Seconds of online activity per Focus point, before Focus Mastery.
const FOCUS_BASE_INTERVAL_SECS: f64 = 60.0;

/// Interval reduction per Focus Mastery level.
const FOCUS_MASTERY_REDUCTION_SECS: f64 = 5.0;

// ---------------------------------------------------------------------------
// Tick outcome
// ---------------------------------------------------------------------------

/// Result of a `tick()` call.
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    /// Iterons generated by tier 0 this tick (pre-floor delta).
    pub generated_iterons: Dec,

    /// Focus points accrued this tick.
    pub focus_gained: u32,

    /// Amount the Insight balance was raised by the integrity check, if it
    /// had drifted below its derived floor. `None` on uncommitted ticks.
    pub insight_correction: Option<Dec>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The core simulation engine. All mutation flows through its methods;
/// there is no ambient global state.
#[derive(Debug)]
pub struct Engine {
    /// Authoritative state. Mutated by ticks and player actions only.
    state: EngineState,

    /// Read-only snapshot for observers, refreshed on commit.
    published: EngineState,

    /// Injected talent catalog.
    talents: TalentBook,
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Compute the offline gap from the save checkpoint and stage it for the
/// player if it is worth prompting about.
fn stage_offline_gap(state: &mut EngineState, now_ms: i64) {
    let gap_secs = (now_ms.saturating_sub(state.last_tick) / 1000).max(0) as u64;
    state.offline_gap = if gap_secs > OFFLINE_GAP_THRESHOLD_SECS {
        gap_secs
    } else {
        0
    };
}

/// Clamp persisted research/talent levels to each item's declared maximum.
fn clamp_levels(state: &mut EngineState, talents: &TalentBook) {
    for (key, level) in state.research.iter_mut() {
        let max = key.max_level();
        if *level > max {
            log::warn!("research {key} level {level} exceeds max {max}, clamping");
            *level = max;
        }
    }
    for (id, level) in state.talents.iter_mut() {
        let max = talents.spec(*id).map(|s| s.max_level).unwrap_or(0);
        if *level > max {
            log::warn!("talent {id:?} level {level} exceeds max {max}, clamping");
            *level = max;
        }
    }
}

impl Engine {
    /// A fresh game with the given talent catalog.
    pub fn new(talents: TalentBook) -> Self {
        Self::from_state(EngineState::new(now_millis()), talents)
    }

    /// Wrap an existing state record. The published snapshot starts equal.
    pub fn from_state(state: EngineState, talents: TalentBook) -> Self {
        let published = state.clone();
        Self {
            state,
            published,
            talents,
        }
    }

    /// Authoritative state, read-only.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Latest committed snapshot. Auto-save and observers read this, never
    /// the live state.
    pub fn snapshot(&self) -> &EngineState {
        &self.published
    }

    /// The injected talent catalog.
    pub fn talents(&self) -> &TalentBook {
        &self.talents
    }

    fn publish(&mut self) {
        self.published = self.state.clone();
    }

    // -----------------------------------------------------------------------
    // Tick pipeline
    // -----------------------------------------------------------------------

    /// Yield multiplier for a tier:
    /// `(1 + efficiency_level) * (1 + 0.1 * active_resonance_level)`,
    /// held exact as `(10 + level) / 10`.
    fn efficiency_multiplier(&self, tier: usize) -> Dec {
        let eff = self
            .state
            .research_level(tier, crate::research::ResearchKind::Efficiency);
        let resonance = self.state.talent_level(TalentId::ActiveResonance);
        dec(1 + eff as u64) * dec_scaled(10 + resonance as i64, 1)
    }

    /// Resolve all per-tier multipliers once, so the chain reads a
    /// consistent snapshot of research and talent state.
    fn chain_tuning(&self) -> ChainTuning {
        ChainTuning {
            periods: (0..GENERATOR_COUNT)
                .map(|i| {
                    period(
                        i,
                        self.state
                            .research_level(i, crate::research::ResearchKind::Speed),
                    )
                })
                .collect(),
            efficiency: (0..GENERATOR_COUNT)
                .map(|i| self.efficiency_multiplier(i))
                .collect(),
            batch_multiplier: dec(1),
        }
    }

    /// Advance the simulation by `dt` simulated seconds.
    ///
    /// With `commit == false` the caller gets pure computation without
    /// publishing; with `commit == true` the Insight integrity correction
    /// runs and the snapshot is refreshed.
    pub fn tick(&mut self, dt: f64, commit: bool) -> TickOutcome {
        let tuning = self.chain_tuning();
        let generated = advance_chain(&mut self.state.generators, dt, &tuning);

        self.state.iterons = dec_floor(&(&self.state.iterons + &generated));
        self.state.last_tick = now_millis();
        if dt.is_finite() && dt > 0.0 {
            self.state.active_time += dt;
        }
        let focus_gained = self.accrue_focus();

        let mut outcome = TickOutcome {
            generated_iterons: generated,
            focus_gained,
            insight_correction: None,
        };
        if commit {
            outcome.insight_correction = self.correct_insight();
            self.publish();
        }
        outcome
    }

    /// Clamp the real frame delta, apply warp, charge fuel for the excess
    /// simulated time, and tick. This is the per-frame entry point for the
    /// driving loop.
    pub fn advance_frame(&mut self, real_dt: f64, commit: bool) -> TickOutcome {
        let real_dt = if real_dt.is_finite() {
            real_dt.min(MAX_FRAME_DELTA_SECS)
        } else {
            0.0
        };

        let simulated = if self.state.is_warping && self.state.stored_time > 0.0 {
            let simulated = real_dt * self.state.warp_speed as f64;
            self.consume_stored_time(simulated - real_dt);
            simulated
        } else {
            real_dt
        };

        self.tick(simulated, commit)
    }

    fn accrue_focus(&mut self) -> u32 {
        let mastery = self.state.talent_level(TalentId::FocusMastery);
        let interval = FOCUS_BASE_INTERVAL_SECS - FOCUS_MASTERY_REDUCTION_SECS * mastery as f64;
        if interval <= 0.0 {
            log::warn!("focus interval non-positive at mastery level {mastery}, skipping accrual");
            return 0;
        }

        // Loop rather than single-shot: one large dt (offline catch-up,
        // warp) can cover several intervals.
        let mut gained = 0u32;
        while self.state.active_time >= interval {
            self.state.focus += dec(1);
            self.state.active_time -= interval;
            gained += 1;
        }
        gained
    }

    /// Enforce `insight >= earned - spent`. Raises only; a balance above
    /// the floor (e.g. not yet spent) is left alone.
    fn correct_insight(&mut self) -> Option<Dec> {
        let expected = expected_insight(&self.state.generators, &self.state.research);
        if self.state.insight < expected {
            log::debug!(
                "insight integrity correction: {} -> {}",
                self.state.insight,
                expected
            );
            let delta = &expected - &self.state.insight;
            self.state.insight = expected;
            Some(delta)
        } else {
            None
        }
    }

    // -----------------------------------------------------------------------
    // Player actions
    // -----------------------------------------------------------------------

    /// Manual click: +1 iteron, plus Kinetic Link progress on tier 0.
    pub fn manual_click(&mut self) {
        self.state.iterons = dec_floor(&(&self.state.iterons + dec(1)));
        let kinetic = self.state.talent_level(TalentId::KineticClique);
        if kinetic > 0 {
            self.state.generators[0].cycle_progress += 0.1 * kinetic as f64;
        }
        self.publish();
    }

    /// Current price of the next unit of a tier. The same value the
    /// purchase path uses; there is no second cost formula.
    pub fn generator_cost(&self, tier: usize) -> Dec {
        self.state
            .generators
            .get(tier)
            .map(|g| g.purchase_cost())
            .unwrap_or_else(|| dec(0))
    }

    /// Buy one unit of a tier. Silently a no-op when unaffordable. Crossing
    /// milestones awards `(tier+1) * levels_gained` Insight immediately;
    /// the per-tick integrity check tops up any resonance weighting.
    pub fn buy_generator(&mut self, tier: usize) {
        let Some(generator) = self.state.generators.get(tier) else {
            log::debug!("buy_generator: tier {tier} out of range");
            return;
        };
        let cost = generator.purchase_cost();
        if self.state.iterons < cost {
            return;
        }

        let level_before = milestone_level(&generator.amount);
        self.state.iterons = dec_floor(&(&self.state.iterons - &cost));
        {
            let generator = &mut self.state.generators[tier];
            generator.amount += dec(1);
            generator.bought += dec(1);
        }
        let level_after = milestone_level(&self.state.generators[tier].amount);

        if level_after > level_before {
            let reward = dec(tier as u64 + 1) * dec(level_after - level_before);
            self.state.insight += reward;
        }
        self.publish();
    }

    /// Buy one level of a research item. No-op when maxed or unaffordable.
    pub fn buy_research(&mut self, key: ResearchKey) {
        let level = self.state.research.get(&key).copied().unwrap_or(0);
        if level >= key.max_level() {
            log::debug!("research {key} already at max level");
            return;
        }
        let cost = key.cost(level);
        if self.state.insight < cost {
            return;
        }
        self.state.insight = &self.state.insight - &cost;
        self.state.research.insert(key, level + 1);
        self.publish();
    }

    /// Buy one level of a talent. No-op (logged) when the talent is
    /// unknown, maxed, or locked; silent no-op when unaffordable.
    pub fn buy_talent(&mut self, id: TalentId) {
        let Some(spec) = self.talents.spec(id).copied() else {
            log::debug!("talent {id:?} not in catalog");
            return;
        };
        let level = self.state.talent_level(id);
        if level >= spec.max_level {
            log::debug!("talent {id:?} already at max level {level}");
            return;
        }
        if !self.talents.unlocked(id, &self.state.talents) {
            log::debug!("talent {id:?} locked, prerequisites not met");
            return;
        }

        let cost = (spec.cost)(level);
        let balance = match spec.path {
            TalentPath::Focus => &mut self.state.focus,
            TalentPath::Flux => &mut self.state.flux,
        };
        if *balance < cost {
            return;
        }
        *balance = &*balance - &cost;
        self.state.talents.insert(id, level + 1);
        self.publish();
    }

    /// Refund the full cumulative cost of every owned talent level and wipe
    /// all talent levels.
    pub fn respec_talents(&mut self) {
        let mut refund_focus = dec(0);
        let mut refund_flux = dec(0);
        for (&id, &level) in &self.state.talents {
            let Some(spec) = self.talents.spec(id) else {
                continue;
            };
            let total = self
                .talents
                .cumulative_cost(id, level)
                .unwrap_or_else(|| dec(0));
            match spec.path {
                TalentPath::Focus => refund_focus += total,
                TalentPath::Flux => refund_flux += total,
            }
        }

        log::debug!("respec: refunding {refund_focus} focus, {refund_flux} flux");
        self.state.focus += refund_focus;
        self.state.flux += refund_flux;
        self.state.talents.clear();
        self.publish();
    }

    // -----------------------------------------------------------------------
    // Offline time and warp
    // -----------------------------------------------------------------------

    /// Convert the pending offline gap into warp fuel. Claiming overwrites
    /// the reservoir and its high-water mark rather than stacking, and
    /// grants one Flux per full offline minute.
    pub fn claim_offline_time(&mut self) {
        if self.state.offline_gap == 0 {
            return;
        }
        let dilation = self.state.talent_level(TalentId::TemporalDilation);
        let ratio = 1.0 + 0.05 * dilation as f64;
        let boosted = self.state.offline_gap as f64 * ratio;

        self.state.stored_time = boosted;
        self.state.max_stored_time = boosted;
        self.state.flux += dec(self.state.offline_gap / 60);
        self.state.offline_gap = 0;
        self.state.is_time_shift_dismissed = false;
        self.publish();
    }

    /// Toggle warp. Only activates while fuel remains.
    pub fn toggle_time_warp(&mut self) {
        self.state.is_warping = !self.state.is_warping && self.state.stored_time > 0.0;
        self.publish();
    }

    /// Set the warp multiplier, clamped to `[2, 10000]`.
    pub fn set_warp_speed(&mut self, speed: u32) {
        self.state.warp_speed = speed.clamp(WARP_SPEED_MIN, WARP_SPEED_MAX);
        self.publish();
    }

    /// Charge `extra_seconds` of simulated-beyond-real time against the
    /// fuel reservoir, discounted by Flux Capacitor. Warp stops by itself
    /// when the reservoir empties.
    pub fn consume_stored_time(&mut self, extra_seconds: f64) {
        if !extra_seconds.is_finite() || extra_seconds <= 0.0 {
            return;
        }
        let capacitor = self.state.talent_level(TalentId::FluxCapacitor);
        let effective = extra_seconds * (1.0 - 0.04 * capacitor as f64);

        let next = (self.state.stored_time - effective).max(0.0);
        self.state.stored_time = next;
        if next <= 0.0 {
            self.state.is_warping = false;
        }
        if next > self.state.max_stored_time {
            self.state.max_stored_time = next;
        }
    }

    // -----------------------------------------------------------------------
    // Projections
    // -----------------------------------------------------------------------

    /// Average units-per-second a tier currently produces.
    pub fn generator_production(&self, tier: usize) -> Dec {
        let Some(generator) = self.state.generators.get(tier) else {
            return dec(0);
        };
        if generator.amount <= dec(0) {
            return dec(0);
        }
        let speed = self
            .state
            .research_level(tier, crate::research::ResearchKind::Speed);
        (&generator.amount * &generator.multiplier * self.efficiency_multiplier(tier))
            / period_dec(tier, speed)
    }

    /// Total iterons-per-second from tier 0.
    pub fn calculate_production(&self) -> Dec {
        self.generator_production(0)
    }

    /// Milestone position of a tier's current amount, for display.
    pub fn next_milestone(&self, tier: usize) -> Option<MilestoneInfo> {
        self.state
            .generators
            .get(tier)
            .map(|g| next_milestone(&g.amount))
    }

    // -----------------------------------------------------------------------
    // UI flags and reset
    // -----------------------------------------------------------------------

    pub fn toggle_fps(&mut self) {
        self.state.show_fps = !self.state.show_fps;
        self.publish();
    }

    pub fn dismiss_time_shift(&mut self) {
        self.state.is_time_shift_dismissed = true;
        self.publish();
    }

    pub fn restore_time_shift(&mut self) {
        self.state.is_time_shift_dismissed = false;
        self.publish();
    }

    /// Wipe everything back to game start.
    pub fn hard_reset(&mut self) {
        self.state = EngineState::new(now_millis());
        self.publish();
    }

    // -----------------------------------------------------------------------
    // Save / load
    // -----------------------------------------------------------------------

    /// Serialize the latest committed snapshot.
    pub fn save(&self) -> Result<String, SaveError> {
        serialize::encode(&self.published)
    }

    /// Load a save, migrating older shapes, and stage any offline gap.
    pub fn load(json: &str, talents: TalentBook) -> Result<Self, SaveError> {
        Self::load_at(json, talents, now_millis())
    }

    /// [`Engine::load`] with an explicit "now", for deterministic callers.
    pub fn load_at(json: &str, talents: TalentBook, now_ms: i64) -> Result<Self, SaveError> {
        let mut state = serialize::decode(json, now_ms)?;
        clamp_levels(&mut state, &talents);
        stage_offline_gap(&mut state, now_ms);
        Ok(Self::from_state(state, talents))
    }

    /// Load a save, or fall back to a fresh game on any failure. The only
    /// user-visible failure mode of a corrupt save is starting over.
    pub fn load_or_new(json: &str, talents: TalentBook) -> Self {
        match Self::load_at(json, talents.clone(), now_millis()) {
            Ok(engine) => engine,
            Err(err) => {
                log::warn!("failed to load save, starting fresh: {err}");
                Self::new(talents)
            }
        }
    }
}
