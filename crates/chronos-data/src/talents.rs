//! The standard talent catalog: two lanes (Focus for active play, Flux for
//! offline time) joined by hub nodes.
//!
//! Costs follow `floor(base * growth^level)` with per-talent base and
//! growth. Effects are the displayed per-level values; the engine wires a
//! subset of them into simulation (Active Resonance, Kinetic Link, Focus
//! Mastery, Temporal Dilation, Flux Capacitor). The rest are defined here
//! for completeness of the tree and for the shell to display.

use chronos_core::numeric::{Dec, dec, dec_floor, dec_pow, dec_scaled};
use chronos_core::talent::{TalentBook, TalentEdge, TalentId, TalentPath, TalentSpec};

/// `floor(base * (growth_tenths/10)^level)`, the shared cost shape.
fn scaling_cost(base: u64, growth_tenths: i64, level: u32) -> Dec {
    dec_floor(&(dec(base) * dec_pow(&dec_scaled(growth_tenths, 1), level)))
}

/// Build the standard talent catalog.
pub fn standard_talents() -> TalentBook {
    use TalentId::*;
    use TalentPath::{Flux, Focus};

    let specs = vec![
        // --- Focus lane ---
        TalentSpec {
            id: ActiveResonance,
            name: "Active Resonance",
            path: Focus,
            max_level: 20,
            cost: |l| scaling_cost(5, 15, l),
            effect: |l| 1.0 + 0.1 * l as f64,
            description: "Increases all generator production while online.",
        },
        TalentSpec {
            id: KineticClique,
            name: "Kinetic Link",
            path: Focus,
            max_level: 10,
            cost: |l| scaling_cost(10, 20, l),
            effect: |l| 0.1 * l as f64,
            description: "Manual clicks also grant a small burst of progress to Generator 1.",
        },
        TalentSpec {
            id: PrecisionBurst,
            name: "Precision Burst",
            path: Focus,
            max_level: 15,
            cost: |l| scaling_cost(75, 22, l),
            effect: |l| 1.0 + 0.08 * l as f64,
            description: "Increases the effectiveness of manual clicks on all generators.",
        },
        TalentSpec {
            id: FocusFlow,
            name: "Focus Flow",
            path: Focus,
            max_level: 10,
            cost: |l| scaling_cost(12, 20, l),
            effect: |l| 0.005 * l as f64,
            description: "Gain a small amount of Focus when generators tick while online.",
        },
        TalentSpec {
            id: FocusMastery,
            name: "Focus Mastery",
            path: Focus,
            max_level: 5,
            cost: |l| scaling_cost(50, 30, l),
            effect: |l| 60.0 - 5.0 * l as f64,
            description: "Reduces the time required to earn Focus.",
        },
        TalentSpec {
            id: PeakPerformance,
            name: "Peak Performance",
            path: Focus,
            max_level: 10,
            cost: |l| scaling_cost(150, 25, l),
            effect: |l| 0.02 * l as f64,
            description: "While online, generators gain a stacking bonus the longer you stay active.",
        },
        TalentSpec {
            id: ClickSynergy,
            name: "Click Synergy",
            path: Focus,
            max_level: 10,
            cost: |l| scaling_cost(18, 21, l),
            effect: |l| 0.02 * l as f64,
            description: "Clicks on different generators stack a short bonus.",
        },
        TalentSpec {
            id: FocusAttunement,
            name: "Focus Attunement",
            path: Focus,
            max_level: 15,
            cost: |l| scaling_cost(60, 22, l),
            effect: |l| 1.0 + 0.06 * l as f64,
            description: "Increases production of Generator 1 specifically while online.",
        },
        TalentSpec {
            id: DoubleTap,
            name: "Double Tap",
            path: Focus,
            max_level: 10,
            cost: |l| scaling_cost(70, 23, l),
            effect: |l| 0.015 * l as f64,
            description: "Chance for clicks to count twice.",
        },
        TalentSpec {
            id: MindSpike,
            name: "Mind Spike",
            path: Focus,
            max_level: 10,
            cost: |l| scaling_cost(130, 25, l),
            effect: |l| 0.01 * l as f64,
            description: "First generator gains bonus from Focus spent this session.",
        },
        TalentSpec {
            id: ResonancePeak,
            name: "Resonance Peak",
            path: Focus,
            max_level: 5,
            cost: |l| scaling_cost(120, 30, l),
            effect: |l| 5.0 - l as f64,
            description: "Further reduces Focus cooldown when combined with Focus Mastery.",
        },
        TalentSpec {
            id: SustainedSurge,
            name: "Sustained Surge",
            path: Focus,
            max_level: 10,
            cost: |l| scaling_cost(180, 24, l),
            effect: |l| 0.1 + 0.03 * l as f64,
            description: "Increases the maximum streak bonus cap from Peak Performance.",
        },
        TalentSpec {
            id: Momentum,
            name: "Momentum",
            path: Focus,
            max_level: 10,
            cost: |l| scaling_cost(160, 24, l),
            effect: |l| 0.025 * l as f64,
            description: "Consecutive clicks within 2s increase click power.",
        },
        TalentSpec {
            id: CriticalFocus,
            name: "Critical Focus",
            path: Focus,
            max_level: 10,
            cost: |l| scaling_cost(200, 25, l),
            effect: |l| 0.02 * l as f64,
            description: "Chance for manual clicks to grant a burst of Focus progress.",
        },
        TalentSpec {
            id: Overclock,
            name: "Overclock",
            path: Focus,
            max_level: 5,
            cost: |l| scaling_cost(300, 30, l),
            effect: |l| 1.0 + 0.05 * l as f64,
            description: "While at max streak, production gets an additional multiplier.",
        },
        TalentSpec {
            id: ClarityBurst,
            name: "Clarity Burst",
            path: Focus,
            max_level: 5,
            cost: |l| scaling_cost(250, 30, l),
            effect: |l| 1.0 + 0.08 * l as f64,
            description: "Every 10th Focus earned grants a production burst.",
        },
        TalentSpec {
            id: Apex,
            name: "Apex",
            path: Focus,
            max_level: 5,
            cost: |l| scaling_cost(320, 30, l),
            effect: |l| 1.5 + 0.1 * l as f64,
            description: "At max Momentum stacks, next click is critical.",
        },
        // --- Flux lane ---
        TalentSpec {
            id: TemporalDilation,
            name: "Temporal Dilation",
            path: Flux,
            max_level: 20,
            cost: |l| scaling_cost(5, 15, l),
            effect: |l| 1.0 + 0.05 * l as f64,
            description: "Earn more offline time than the actual time passed.",
        },
        TalentSpec {
            id: FluxCapacitor,
            name: "Flux Capacitor",
            path: Flux,
            max_level: 10,
            cost: |l| scaling_cost(15, 20, l),
            effect: |l| 1.0 - 0.04 * l as f64,
            description: "Reduces stored time consumption while warping.",
        },
        TalentSpec {
            id: TimeBank,
            name: "Time Bank",
            path: Flux,
            max_level: 10,
            cost: |l| scaling_cost(80, 23, l),
            effect: |l| 1.0 + 0.1 * l as f64,
            description: "Increases the maximum stored time you can use for warping.",
        },
        TalentSpec {
            id: Stasis,
            name: "Stasis",
            path: Flux,
            max_level: 10,
            cost: |l| scaling_cost(20, 20, l),
            effect: |l| 1.0 - 0.02 * l as f64,
            description: "Offline progress decays slightly slower.",
        },
        TalentSpec {
            id: WarpEfficiency,
            name: "Warp Efficiency",
            path: Flux,
            max_level: 10,
            cost: |l| scaling_cost(25, 21, l),
            effect: |l| 1.0 - 0.03 * l as f64,
            description: "Warp consumes less stored time per second.",
        },
        TalentSpec {
            id: PhantomProgress,
            name: "Phantom Progress",
            path: Flux,
            max_level: 5,
            cost: |l| scaling_cost(200, 30, l),
            effect: |l| 0.05 * l as f64,
            description: "A fraction of offline production is applied instantly when you return.",
        },
        TalentSpec {
            id: TimeBubble,
            name: "Time Bubble",
            path: Flux,
            max_level: 10,
            cost: |l| scaling_cost(90, 24, l),
            effect: |l| 1.0 + 0.05 * l as f64,
            description: "First 5 minutes offline count more for warp.",
        },
        TalentSpec {
            id: LucidDreaming,
            name: "Lucid Dreaming",
            path: Flux,
            max_level: 10,
            cost: |l| scaling_cost(100, 25, l),
            effect: |l| 0.03 * l as f64,
            description: "Generators continue to produce at a partial rate even without warping while offline.",
        },
        TalentSpec {
            id: QuickWarp,
            name: "Quick Warp",
            path: Flux,
            max_level: 10,
            cost: |l| scaling_cost(95, 23, l),
            effect: |l| (1.0 - 0.05 * l as f64).max(0.5),
            description: "Reduces minimum warp duration.",
        },
        TalentSpec {
            id: Slumber,
            name: "Slumber",
            path: Flux,
            max_level: 10,
            cost: |l| scaling_cost(170, 25, l),
            effect: |l| 0.03 * l as f64,
            description: "Long offline sessions get a bonus multiplier.",
        },
        TalentSpec {
            id: DeepRest,
            name: "Deep Rest",
            path: Flux,
            max_level: 10,
            cost: |l| scaling_cost(150, 25, l),
            effect: |l| 0.02 * l as f64,
            description: "Increases the background production rate from Lucid Dreaming.",
        },
        TalentSpec {
            id: Stockpile,
            name: "Stockpile",
            path: Flux,
            max_level: 10,
            cost: |l| scaling_cost(190, 25, l),
            effect: |l| 1.0 + 0.05 * l as f64,
            description: "Increases base warp storage before Time Bank.",
        },
        TalentSpec {
            id: VoidWalker,
            name: "Void Walker",
            path: Flux,
            max_level: 5,
            cost: |l| scaling_cost(260, 30, l),
            effect: |l| 1.0 + 0.06 * l as f64,
            description: "After 1h offline, warp efficiency increases.",
        },
        TalentSpec {
            id: DreamWeaver,
            name: "Dream Weaver",
            path: Flux,
            max_level: 5,
            cost: |l| scaling_cost(250, 30, l),
            effect: |l| 1.0 + 0.04 * l as f64,
            description: "Offline time is slightly more effective for warping.",
        },
        TalentSpec {
            id: ChronoSync,
            name: "Chrono Sync",
            path: Flux,
            max_level: 5,
            cost: |l| scaling_cost(280, 30, l),
            effect: |l| 1.0 + 0.08 * l as f64,
            description: "Warp cap from Time Bank is increased further.",
        },
        TalentSpec {
            id: InfinityHold,
            name: "Infinity Hold",
            path: Flux,
            max_level: 5,
            cost: |l| scaling_cost(290, 30, l),
            effect: |l| 1.0 - 0.1 * l as f64,
            description: "Stored time above cap decays slower.",
        },
        TalentSpec {
            id: TimeEcho,
            name: "Time Echo",
            path: Flux,
            max_level: 10,
            cost: |l| scaling_cost(220, 26, l),
            effect: |l| 0.03 * l as f64,
            description: "Increases the instant catch-up percentage from Phantom Progress.",
        },
        // --- Hub nodes ---
        TalentSpec {
            id: NeuralSync,
            name: "Neural Sync",
            path: Focus,
            max_level: 10,
            cost: |l| scaling_cost(100, 25, l),
            effect: |l| 0.05 * l as f64,
            description: "Synchronizes your focus, granting a production bonus based on total Focus levels.",
        },
        TalentSpec {
            id: SystemOverdrive,
            name: "System Overdrive",
            path: Focus,
            max_level: 5,
            cost: |l| scaling_cost(500, 40, l),
            effect: |l| 3.0 + l as f64,
            description: "Unlocks a powerful mode that triples production for 5s after gaining Focus.",
        },
        TalentSpec {
            id: TemporalHub,
            name: "Temporal Hub",
            path: Flux,
            max_level: 10,
            cost: |l| scaling_cost(150, 28, l),
            effect: |l| 1.0 + 0.1 * l as f64,
            description: "Connects temporal pathways, increasing offline time generation.",
        },
        TalentSpec {
            id: ChronoSurge,
            name: "Chrono Surge",
            path: Flux,
            max_level: 5,
            cost: |l| scaling_cost(600, 45, l),
            effect: |l| 2.0 * l as f64,
            description: "A massive burst of Flux whenever you reach a production milestone.",
        },
    ];

    let edge = |from: Option<TalentId>, to: TalentId| TalentEdge { from, to };
    let edges = vec![
        edge(None, ActiveResonance),
        edge(None, TemporalDilation),
        // Focus: three lanes
        edge(Some(ActiveResonance), KineticClique),
        edge(Some(ActiveResonance), PrecisionBurst),
        edge(Some(ActiveResonance), FocusFlow),
        edge(Some(KineticClique), FocusMastery),
        edge(Some(PrecisionBurst), PeakPerformance),
        edge(Some(FocusFlow), ClickSynergy),
        edge(Some(FocusMastery), NeuralSync),
        edge(Some(PeakPerformance), NeuralSync),
        edge(Some(ClickSynergy), NeuralSync),
        edge(Some(NeuralSync), FocusAttunement),
        edge(Some(NeuralSync), DoubleTap),
        edge(Some(NeuralSync), MindSpike),
        edge(Some(FocusAttunement), ResonancePeak),
        edge(Some(DoubleTap), SustainedSurge),
        edge(Some(MindSpike), Momentum),
        edge(Some(ResonancePeak), SystemOverdrive),
        edge(Some(SustainedSurge), SystemOverdrive),
        edge(Some(Momentum), SystemOverdrive),
        edge(Some(SystemOverdrive), CriticalFocus),
        edge(Some(SystemOverdrive), Overclock),
        edge(Some(SystemOverdrive), ClarityBurst),
        edge(Some(SystemOverdrive), Apex),
        // Flux: three lanes
        edge(Some(TemporalDilation), FluxCapacitor),
        edge(Some(TemporalDilation), TimeBank),
        edge(Some(TemporalDilation), Stasis),
        edge(Some(FluxCapacitor), WarpEfficiency),
        edge(Some(TimeBank), PhantomProgress),
        edge(Some(Stasis), TimeBubble),
        edge(Some(WarpEfficiency), TemporalHub),
        edge(Some(PhantomProgress), TemporalHub),
        edge(Some(TimeBubble), TemporalHub),
        edge(Some(TemporalHub), LucidDreaming),
        edge(Some(TemporalHub), QuickWarp),
        edge(Some(TemporalHub), Slumber),
        edge(Some(LucidDreaming), DeepRest),
        edge(Some(QuickWarp), Stockpile),
        edge(Some(Slumber), VoidWalker),
        edge(Some(DeepRest), ChronoSurge),
        edge(Some(Stockpile), ChronoSurge),
        edge(Some(VoidWalker), ChronoSurge),
        edge(Some(ChronoSurge), DreamWeaver),
        edge(Some(ChronoSurge), ChronoSync),
        edge(Some(ChronoSurge), InfinityHold),
        edge(Some(ChronoSurge), TimeEcho),
    ];

    TalentBook::new(specs, edges)
}
