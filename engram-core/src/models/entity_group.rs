use serde::{Deserialize, Serialize};

use crate::memory::Proposition;

/// A group of propositions that all mention the same resolved entity.
/// Input to the abstractor collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityGroup {
    pub entity_id: String,
    pub propositions: Vec<Proposition>,
}

impl EntityGroup {
    pub fn new(entity_id: impl Into<String>, propositions: Vec<Proposition>) -> Self {
        Self {
            entity_id: entity_id.into(),
            propositions,
        }
    }

    pub fn size(&self) -> usize {
        self.propositions.len()
    }
}
