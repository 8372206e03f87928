use serde::{Deserialize, Serialize};

use crate::constants;

/// Maintenance orchestrator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceConfig {
    /// Minimum propositions per entity group to trigger abstraction.
    pub abstraction_threshold: usize,
    /// Number of abstractions requested per qualifying group.
    pub abstraction_target_count: usize,
    /// Effective-confidence floor below which ACTIVE propositions are
    /// hard-deleted. `None` skips the retirement phase entirely.
    pub retire_below: Option<f64>,
    /// Decay multiplier used in the retirement confidence calculation.
    pub retire_decay_k: f64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            abstraction_threshold: constants::DEFAULT_ABSTRACTION_THRESHOLD,
            abstraction_target_count: constants::DEFAULT_ABSTRACTION_TARGET_COUNT,
            retire_below: None,
            retire_decay_k: constants::DEFAULT_DECAY_K,
        }
    }
}
