//! Talent identifiers and the catalog handle the engine consumes.
//!
//! The engine does not own the talent tables: a [`TalentBook`] (specs plus
//! tree edges) is injected at construction, the way game content is
//! registered into the engine at startup. The shipped catalog lives in the
//! `chronos-data` crate; the engine only calls cost and effect functions and
//! walks prerequisite edges.

use crate::numeric::Dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Which currency a talent is bought with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TalentPath {
    /// Earned from online activity.
    Focus,
    /// Earned from claimed offline time.
    Flux,
}

/// Closed set of talent ids. Serialized as the legacy snake_case id strings
/// so existing saves keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TalentId {
    // Focus path
    ActiveResonance,
    KineticClique,
    PrecisionBurst,
    FocusFlow,
    FocusMastery,
    PeakPerformance,
    ClickSynergy,
    FocusAttunement,
    DoubleTap,
    MindSpike,
    ResonancePeak,
    SustainedSurge,
    Momentum,
    CriticalFocus,
    Overclock,
    ClarityBurst,
    Apex,
    // Flux path
    TemporalDilation,
    FluxCapacitor,
    TimeBank,
    Stasis,
    WarpEfficiency,
    PhantomProgress,
    TimeBubble,
    LucidDreaming,
    QuickWarp,
    Slumber,
    DeepRest,
    Stockpile,
    VoidWalker,
    DreamWeaver,
    ChronoSync,
    InfinityHold,
    TimeEcho,
    // Hub nodes
    NeuralSync,
    SystemOverdrive,
    TemporalHub,
    ChronoSurge,
}

// ---------------------------------------------------------------------------
// Specs and the book
// ---------------------------------------------------------------------------

/// Static definition of one talent. Cost and effect are plain functions of
/// the owned level; the engine never interprets them beyond calling.
#[derive(Debug, Clone, Copy)]
pub struct TalentSpec {
    pub id: TalentId,
    pub name: &'static str,
    pub path: TalentPath,
    pub max_level: u32,
    /// Cost of buying the next level when `level` are already owned.
    pub cost: fn(u32) -> Dec,
    /// Numeric effect at `level`, for display and balance inspection.
    pub effect: fn(u32) -> f64,
    pub description: &'static str,
}

/// A prerequisite edge in the talent tree. `from == None` marks a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TalentEdge {
    pub from: Option<TalentId>,
    pub to: TalentId,
}

/// The injected talent catalog: specs plus the prerequisite tree.
#[derive(Debug, Clone)]
pub struct TalentBook {
    specs: BTreeMap<TalentId, TalentSpec>,
    edges: Vec<TalentEdge>,
}

impl TalentBook {
    pub fn new(specs: Vec<TalentSpec>, edges: Vec<TalentEdge>) -> Self {
        Self {
            specs: specs.into_iter().map(|s| (s.id, s)).collect(),
            edges,
        }
    }

    /// A book with no talents at all. Every purchase is rejected; useful for
    /// exercising the engine without game content.
    pub fn empty() -> Self {
        Self {
            specs: BTreeMap::new(),
            edges: Vec::new(),
        }
    }

    pub fn spec(&self, id: TalentId) -> Option<&TalentSpec> {
        self.specs.get(&id)
    }

    /// Cost of the next level of `id` at `level` owned.
    pub fn cost(&self, id: TalentId, level: u32) -> Option<Dec> {
        self.specs.get(&id).map(|s| (s.cost)(level))
    }

    /// Total cost of the first `levels` levels of `id`.
    pub fn cumulative_cost(&self, id: TalentId, levels: u32) -> Option<Dec> {
        self.specs
            .get(&id)
            .map(|s| (0..levels).fold(Dec::from(0u32), |acc, l| acc + (s.cost)(l)))
    }

    /// Whether `id` has an origin edge (no prerequisite).
    pub fn is_root(&self, id: TalentId) -> bool {
        self.edges
            .iter()
            .any(|e| e.to == id && e.from.is_none())
    }

    /// Whether `id` may be bought given the owned levels: roots always,
    /// otherwise at least one parent edge must have level > 0.
    pub fn unlocked(&self, id: TalentId, levels: &BTreeMap<TalentId, u32>) -> bool {
        if self.is_root(id) {
            return true;
        }
        self.edges.iter().any(|e| {
            e.to == id
                && e.from
                    .is_some_and(|parent| levels.get(&parent).copied().unwrap_or(0) > 0)
        })
    }

    pub fn specs(&self) -> impl Iterator<Item = &TalentSpec> {
        self.specs.values()
    }

    pub fn edges(&self) -> &[TalentEdge] {
        &self.edges
    }
}
