//! Shipped game content for Chronos Iteratio.
//!
//! The engine in `chronos-core` is content-agnostic: it consumes a
//! [`chronos_core::talent::TalentBook`] injected at construction. This crate
//! holds the standard catalog -- the talent specs and the prerequisite tree
//! the game actually ships with.

pub mod talents;

pub use talents::standard_talents;
