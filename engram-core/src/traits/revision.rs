use crate::errors::EngramResult;
use crate::memory::Proposition;
use crate::models::RevisionOutcome;

use super::repository::PropositionRepository;

/// Classifies a candidate proposition against existing memory.
///
/// The decision may be LLM-driven; deterministic substitutes (e.g. a
/// rule-based classifier) implement the same trait for tests. The
/// persistence mapping for each outcome lives on
/// [`RevisionOutcome::persist`].
pub trait Reviser: Send + Sync {
    fn revise(
        &self,
        candidate: &Proposition,
        repository: &dyn PropositionRepository,
    ) -> EngramResult<RevisionOutcome>;
}
