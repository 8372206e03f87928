use serde::{Deserialize, Serialize};

use crate::constants;

/// Consolidation subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationConfig {
    /// Minimum blended similarity for an existing proposition to count as a
    /// match.
    pub similarity_threshold: f64,
    /// Blended similarity above which a match reinforces instead of merging.
    pub reinforce_threshold: f64,
    /// Confidence boost applied on reinforcement.
    pub reinforcement_boost: f64,
    /// Minimum confidence for an unmatched session proposition to be
    /// promoted.
    pub promotion_threshold: f64,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: constants::DEFAULT_SIMILARITY_THRESHOLD,
            reinforce_threshold: constants::REINFORCE_SIMILARITY_THRESHOLD,
            reinforcement_boost: constants::DEFAULT_REINFORCEMENT_BOOST,
            promotion_threshold: constants::DEFAULT_PROMOTION_THRESHOLD,
        }
    }
}
