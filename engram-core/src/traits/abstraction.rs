use crate::errors::EngramResult;
use crate::memory::Proposition;
use crate::models::EntityGroup;

/// Synthesizes higher-level propositions from a group of related ones.
///
/// The returned propositions must have `level > 0` and `source_ids`
/// pointing at the group members they generalize. Grouping and
/// thresholding are owned by the maintenance orchestrator; only the
/// synthesis is external.
pub trait Abstractor: Send + Sync {
    fn abstract_group(
        &self,
        group: &EntityGroup,
        target_count: usize,
    ) -> EngramResult<Vec<Proposition>>;
}
