pub mod cluster;
pub mod consolidation;
pub mod entity_group;
pub mod maintenance;
pub mod revision;
pub mod similarity;

pub use cluster::SimilarityCluster;
pub use consolidation::{ConsolidationResult, MergedPropositions};
pub use entity_group::EntityGroup;
pub use maintenance::MaintenanceResult;
pub use revision::RevisionOutcome;
pub use similarity::SimilaritySearch;
