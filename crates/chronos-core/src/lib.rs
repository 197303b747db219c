//! Chronos Core -- the simulation engine for the Chronos Iteratio
//! incremental game.
//!
//! This crate provides the 50-tier generator chain, the milestone/Insight
//! economy, the tick engine with its commit/publish split, offline-time and
//! time-warp reconciliation, and the versioned save codec that every
//! Chronos shell depends on.
//!
//! # Tick Pipeline
//!
//! Each call to [`engine::Engine::tick`] advances the simulation through:
//!
//! 1. **Tuning** -- Resolve per-tier periods and yield multipliers from
//!    research and talent state.
//! 2. **Chain** -- Advance every generator's production cycle low-to-high;
//!    tier `i` deposits into tier `i-1`, tier 0 pays out iterons.
//! 3. **Bookkeeping** -- Floor the currency, stamp the checkpoint, accrue
//!    active time and convert it into Focus.
//! 4. **Commit** (optional) -- Raise Insight to its derived floor and
//!    publish a read-only snapshot for observers.
//!
//! # Key Types
//!
//! - [`engine::Engine`] -- Owns the authoritative state; all mutation flows
//!   through its methods.
//! - [`state::EngineState`] -- The single state record; its serde shape is
//!   the persisted save format.
//! - [`generator::GeneratorState`] -- One tier of the production chain.
//! - [`research::ResearchKey`] -- Structured (tier, kind) research ids.
//! - [`talent::TalentBook`] -- Injected talent catalog; the shipped content
//!   lives in `chronos-data`.
//! - [`numeric::Dec`] -- Arbitrary-precision decimal used for every amount.
//! - [`serialize`] -- JSON save codec with ordered shape migrations.

pub mod engine;
pub mod generator;
mod migration;
pub mod milestone;
pub mod numeric;
pub mod research;
pub mod serialize;
pub mod state;
pub mod talent;
