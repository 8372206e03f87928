use serde::{Deserialize, Serialize};

use crate::memory::Proposition;

use super::consolidation::ConsolidationResult;

/// Summary of one maintenance run (consolidate → abstract → retire).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaintenanceResult {
    /// Consolidation outcome. `None` when no session propositions were
    /// supplied.
    pub consolidation: Option<ConsolidationResult>,
    /// Newly created higher-level propositions.
    pub abstractions: Vec<Proposition>,
    /// Source propositions marked superseded by an abstraction.
    pub superseded: Vec<Proposition>,
    /// Propositions hard-deleted by the retirement phase.
    pub retired: Vec<Proposition>,
}

impl MaintenanceResult {
    /// Total propositions written: consolidation stores + abstractions +
    /// superseded status updates.
    pub fn total_persisted(&self) -> usize {
        let consolidated = self
            .consolidation
            .as_ref()
            .map(ConsolidationResult::stored_count)
            .unwrap_or(0);
        consolidated + self.abstractions.len() + self.superseded.len()
    }

    /// Total propositions removed from the store.
    pub fn total_removed(&self) -> usize {
        self.retired.len()
    }
}
