use serde::{Deserialize, Serialize};

use crate::memory::Proposition;

/// A merge of one session proposition with its best-matching existing
/// proposition. `result` is a freshly synthesized proposition replacing
/// its `sources` for storage purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedPropositions {
    pub sources: Vec<Proposition>,
    pub result: Proposition,
}

/// Output of one consolidation run.
///
/// The four outcome lists are disjoint: every session proposition resolves
/// to exactly one of promoted, reinforced, merged (as a source), or
/// discarded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsolidationResult {
    /// Session propositions newly accepted into long-term memory.
    pub promoted: Vec<Proposition>,
    /// Existing propositions whose confidence/grounding was boosted.
    pub reinforced: Vec<Proposition>,
    /// Session propositions merged with an existing match.
    pub merged: Vec<MergedPropositions>,
    /// Session propositions dropped.
    pub discarded: Vec<Proposition>,
}

impl ConsolidationResult {
    /// Number of propositions this result persists: promoted + reinforced +
    /// one merged result per pair.
    pub fn stored_count(&self) -> usize {
        self.promoted.len() + self.reinforced.len() + self.merged.len()
    }

    /// Whether the run produced no outcomes at all.
    pub fn is_empty(&self) -> bool {
        self.promoted.is_empty()
            && self.reinforced.is_empty()
            && self.merged.is_empty()
            && self.discarded.is_empty()
    }
}
