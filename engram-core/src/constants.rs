/// Engram system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seconds in one day, used for age calculations in the decay formula.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Default decay-rate multiplier `k` in the effective-confidence formula.
pub const DEFAULT_DECAY_K: f64 = 2.0;

/// Minimum blended similarity for a session proposition to be considered
/// related to an existing one during consolidation.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Blended similarity above which a match reinforces instead of merging.
pub const REINFORCE_SIMILARITY_THRESHOLD: f64 = 0.9;

/// Confidence boost applied when an existing proposition is reinforced.
pub const DEFAULT_REINFORCEMENT_BOOST: f64 = 0.1;

/// Minimum confidence for an unmatched session proposition to be promoted.
pub const DEFAULT_PROMOTION_THRESHOLD: f64 = 0.6;

/// Minimum propositions per entity group to trigger abstraction.
pub const DEFAULT_ABSTRACTION_THRESHOLD: usize = 5;

/// Number of abstractions requested from the abstractor per entity group.
pub const DEFAULT_ABSTRACTION_TARGET_COUNT: usize = 3;

/// Weight of text similarity in the blended consolidation score.
pub const TEXT_SIMILARITY_WEIGHT: f64 = 0.7;

/// Weight of entity overlap in the blended consolidation score.
pub const ENTITY_OVERLAP_WEIGHT: f64 = 0.3;
