//! # engram-core
//!
//! Foundation crate for the Engram proposition memory engine.
//! Defines the proposition data model with time-decayed confidence,
//! the composable query layer, collaborator traits, result models,
//! errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod memory;
pub mod models;
pub mod query;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::EngramConfig;
pub use errors::{EngramError, EngramResult};
pub use memory::{Mention, MentionRole, Proposition, PropositionStatus};
pub use query::{PropositionQuery, QueryOrder};
