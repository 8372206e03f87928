use serde::{Deserialize, Serialize};

use crate::memory::Proposition;

/// An anchor proposition with its most similar neighbors.
///
/// Built from `(anchor, other)` pairs where `anchor.id < other.id`, so a
/// pair of similar propositions appears in exactly one cluster direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityCluster {
    pub anchor: Proposition,
    /// Neighbors with their similarity score, descending.
    pub neighbors: Vec<(Proposition, f64)>,
}

impl SimilarityCluster {
    /// Anchor plus neighbor count.
    pub fn size(&self) -> usize {
        self.neighbors.len() + 1
    }
}
