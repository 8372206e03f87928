//! # engram-maintenance
//!
//! Top-level maintenance entry point for the proposition memory engine.
//! One `maintain` call runs the fixed three-phase pipeline — consolidate
//! session propositions, abstract dense entity groups, retire decayed
//! entries — and performs the persistence side effects of each phase.

pub mod orchestrator;

pub use orchestrator::MaintenanceOrchestrator;
