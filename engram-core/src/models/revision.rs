use serde::{Deserialize, Serialize};

use crate::errors::EngramResult;
use crate::memory::Proposition;
use crate::traits::PropositionRepository;

/// Classification of a candidate proposition against existing memory,
/// produced by a reviser collaborator.
///
/// The classification decision may be LLM-driven and is external; the shape
/// and the persistence mapping ([`persist`](Self::persist)) are part of the
/// core and deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum RevisionOutcome {
    /// Nothing related exists; the candidate stands on its own.
    New(Proposition),
    /// The candidate and an existing proposition combine into `revised`.
    Merged {
        original: Proposition,
        revised: Proposition,
    },
    /// The candidate confirms an existing proposition, boosted as `revised`.
    Reinforced {
        original: Proposition,
        revised: Proposition,
    },
    /// The candidate conflicts with an existing proposition. `original`
    /// carries its reduced confidence; `new` is the conflicting statement.
    Contradicted {
        original: Proposition,
        new: Proposition,
    },
    /// The candidate generalizes over several existing propositions.
    /// The generalized sources are marked superseded by the caller.
    Generalized {
        generalizes: Vec<Proposition>,
        proposition: Proposition,
    },
}

impl RevisionOutcome {
    /// Apply the deterministic persistence mapping for this outcome,
    /// returning the saved propositions.
    ///
    /// New → save the proposition. Merged/Reinforced → save the revised
    /// form only. Contradicted → save BOTH the weakened original and the
    /// new statement. Generalized → save the generalization only.
    pub fn persist(&self, repository: &dyn PropositionRepository) -> EngramResult<Vec<Proposition>> {
        match self {
            Self::New(proposition) => Ok(vec![repository.save(proposition)?]),
            Self::Merged { revised, .. } => Ok(vec![repository.save(revised)?]),
            Self::Reinforced { revised, .. } => Ok(vec![repository.save(revised)?]),
            Self::Contradicted { original, new } => {
                let weakened = repository.save(original)?;
                let replacement = repository.save(new)?;
                Ok(vec![weakened, replacement])
            }
            Self::Generalized { proposition, .. } => Ok(vec![repository.save(proposition)?]),
        }
    }
}
