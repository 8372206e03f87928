use crate::errors::EngramResult;
use crate::memory::{Proposition, PropositionStatus};
use crate::models::{SimilarityCluster, SimilaritySearch};
use crate::query::PropositionQuery;

/// Durable storage and retrieval of propositions, keyed by id.
///
/// CRUD + query + similarity/cluster search. Implementations must support
/// concurrent calls from independent maintenance runs without external
/// locking, and must have any similarity index (re)computed synchronously
/// inside `save` — a subsequent similarity query immediately reflects the
/// write.
///
/// Not-found conditions are not errors: finders return empty collections
/// and `delete` returns `false`.
pub trait PropositionRepository: Send + Sync {
    // --- CRUD ---

    /// Upsert by id. Idempotent. Returns the stored proposition.
    fn save(&self, proposition: &Proposition) -> EngramResult<Proposition>;

    /// Upsert a batch, in order.
    fn save_all(&self, propositions: &[Proposition]) -> EngramResult<Vec<Proposition>> {
        propositions.iter().map(|p| self.save(p)).collect()
    }

    fn find_by_id(&self, id: &str) -> EngramResult<Option<Proposition>>;

    /// Remove by id. Returns `false` for a missing id, never errors.
    fn delete(&self, id: &str) -> EngramResult<bool>;

    // --- Query ---

    /// Evaluate a composed query: filter, order, limit.
    fn find(&self, query: &PropositionQuery) -> EngramResult<Vec<Proposition>>;

    /// All propositions where any mention resolves to `entity_id`.
    fn find_by_entity(&self, entity_id: &str) -> EngramResult<Vec<Proposition>>;

    fn find_by_status(&self, status: PropositionStatus) -> EngramResult<Vec<Proposition>>;

    /// All propositions grounded in `source_id`.
    fn find_by_grounding(&self, source_id: &str) -> EngramResult<Vec<Proposition>>;

    fn find_by_context(&self, context_id: &str) -> EngramResult<Vec<Proposition>>;

    fn find_by_min_level(&self, min_level: u32) -> EngramResult<Vec<Proposition>>;

    fn find_all(&self) -> EngramResult<Vec<Proposition>>;

    fn count(&self) -> EngramResult<usize>;

    // --- Similarity ---

    /// Propositions whose text embedding is at least `threshold` cosine-similar
    /// to `text`, ordered by similarity descending, truncated to `top_k`.
    fn find_similar(
        &self,
        text: &str,
        threshold: f64,
        top_k: usize,
    ) -> EngramResult<Vec<Proposition>>;

    /// Like [`find_similar`](Self::find_similar), but candidates are narrowed
    /// by `query` BEFORE any similarity is computed (filter-then-score), and
    /// scores are returned alongside each hit.
    fn find_similar_scoped(
        &self,
        request: &SimilaritySearch,
        query: &PropositionQuery,
    ) -> EngramResult<Vec<(Proposition, f64)>>;

    /// Group query-matching propositions into anchor/neighbor clusters.
    /// Only `(anchor, other)` pairs with `anchor.id < other.id` are
    /// considered; clusters are ordered by neighbor count descending.
    fn find_clusters(
        &self,
        threshold: f64,
        top_k: usize,
        query: &PropositionQuery,
    ) -> EngramResult<Vec<SimilarityCluster>>;
}
