//! # engram-consolidation
//!
//! Deterministic session → long-term consolidation: each session
//! proposition is classified against existing memory as promoted,
//! reinforced, merged, or discarded, using a blended text/entity
//! similarity. Pure functions, no I/O — persistence of the outcomes is the
//! maintenance orchestrator's job.

pub mod consolidator;
pub mod similarity;

pub use consolidator::Consolidator;
