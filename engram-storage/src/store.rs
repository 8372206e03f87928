//! MemoryStore — DashMap-backed repository with a synchronously maintained
//! embedding index.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

use engram_core::errors::EngramResult;
use engram_core::memory::{Proposition, PropositionStatus};
use engram_core::models::{SimilarityCluster, SimilaritySearch};
use engram_core::query::PropositionQuery;
use engram_core::traits::{EmbeddingProvider, PropositionRepository};

use crate::similarity::cosine_similarity;

/// A proposition plus the embedding of its text.
#[derive(Clone)]
struct StoredProposition {
    proposition: Proposition,
    embedding: Vec<f32>,
}

/// In-memory reference repository.
///
/// Concurrent `save`/`find*`/`delete` calls are safe without external
/// locking; each entry's embedding is computed inside `save`, before it
/// returns, so there is no indexing window in which a similarity query
/// misses a completed write.
pub struct MemoryStore {
    embedder: Arc<dyn EmbeddingProvider>,
    entries: DashMap<String, StoredProposition>,
}

impl MemoryStore {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            entries: DashMap::new(),
        }
    }

    /// Clone out all propositions. Point-in-time-ish under concurrency:
    /// entries inserted mid-iteration may or may not appear.
    fn snapshot(&self) -> Vec<Proposition> {
        self.entries
            .iter()
            .map(|e| e.value().proposition.clone())
            .collect()
    }

    fn filtered(&self, keep: impl Fn(&Proposition) -> bool) -> Vec<Proposition> {
        self.entries
            .iter()
            .filter(|e| keep(&e.value().proposition))
            .map(|e| e.value().proposition.clone())
            .collect()
    }

    /// Query-matching entries with their embeddings, id-sorted for
    /// deterministic iteration.
    fn scoped_entries(&self, query: &PropositionQuery) -> Vec<StoredProposition> {
        let as_of = query.as_of.unwrap_or_else(Utc::now);
        let mut matching: Vec<StoredProposition> = self
            .entries
            .iter()
            .filter(|e| query.matches_at(&e.value().proposition, as_of))
            .map(|e| e.value().clone())
            .collect();
        matching.sort_by(|a, b| a.proposition.id.cmp(&b.proposition.id));
        matching
    }

    fn score_against(
        &self,
        query_embedding: &[f32],
        candidates: Vec<StoredProposition>,
        threshold: f64,
        top_k: usize,
    ) -> Vec<(Proposition, f64)> {
        let mut scored: Vec<(Proposition, f64)> = candidates
            .into_iter()
            .filter_map(|entry| {
                let score = cosine_similarity(query_embedding, &entry.embedding);
                (score >= threshold).then_some((entry.proposition, score))
            })
            .collect();
        // Similarity descending; ties resolved by id for determinism.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.id.cmp(&b.0.id))
        });
        scored.truncate(top_k);
        scored
    }
}

impl PropositionRepository for MemoryStore {
    fn save(&self, proposition: &Proposition) -> EngramResult<Proposition> {
        // Embed before inserting: the index must be current the moment
        // save returns.
        let embedding = self.embedder.embed(&proposition.text)?;
        self.entries.insert(
            proposition.id.clone(),
            StoredProposition {
                proposition: proposition.clone(),
                embedding,
            },
        );
        debug!(id = %proposition.id, "saved proposition");
        Ok(proposition.clone())
    }

    fn find_by_id(&self, id: &str) -> EngramResult<Option<Proposition>> {
        Ok(self.entries.get(id).map(|e| e.value().proposition.clone()))
    }

    fn delete(&self, id: &str) -> EngramResult<bool> {
        let removed = self.entries.remove(id).is_some();
        if removed {
            debug!(id, "deleted proposition");
        }
        Ok(removed)
    }

    fn find(&self, query: &PropositionQuery) -> EngramResult<Vec<Proposition>> {
        Ok(query.apply(self.snapshot()))
    }

    fn find_by_entity(&self, entity_id: &str) -> EngramResult<Vec<Proposition>> {
        Ok(self.filtered(|p| p.mentions_entity(entity_id)))
    }

    fn find_by_status(&self, status: PropositionStatus) -> EngramResult<Vec<Proposition>> {
        Ok(self.filtered(|p| p.status == status))
    }

    fn find_by_grounding(&self, source_id: &str) -> EngramResult<Vec<Proposition>> {
        Ok(self.filtered(|p| p.grounding.iter().any(|g| g == source_id)))
    }

    fn find_by_context(&self, context_id: &str) -> EngramResult<Vec<Proposition>> {
        Ok(self.filtered(|p| p.context_id == context_id))
    }

    fn find_by_min_level(&self, min_level: u32) -> EngramResult<Vec<Proposition>> {
        Ok(self.filtered(|p| p.level >= min_level))
    }

    fn find_all(&self) -> EngramResult<Vec<Proposition>> {
        Ok(self.snapshot())
    }

    fn count(&self) -> EngramResult<usize> {
        Ok(self.entries.len())
    }

    fn find_similar(
        &self,
        text: &str,
        threshold: f64,
        top_k: usize,
    ) -> EngramResult<Vec<Proposition>> {
        let query_embedding = self.embedder.embed(text)?;
        let candidates: Vec<StoredProposition> =
            self.entries.iter().map(|e| e.value().clone()).collect();
        let scored = self.score_against(&query_embedding, candidates, threshold, top_k);
        Ok(scored.into_iter().map(|(p, _)| p).collect())
    }

    fn find_similar_scoped(
        &self,
        request: &SimilaritySearch,
        query: &PropositionQuery,
    ) -> EngramResult<Vec<(Proposition, f64)>> {
        // Filter-then-score: narrow by the query predicate before any
        // similarity work, so cost tracks the scoped subset. The query's
        // own ordering and limit do not apply here — similarity governs.
        let candidates = self.scoped_entries(query);
        if candidates.is_empty() {
            return Ok(vec![]);
        }
        let query_embedding = self.embedder.embed(&request.text)?;
        Ok(self.score_against(
            &query_embedding,
            candidates,
            request.threshold,
            request.top_k,
        ))
    }

    fn find_clusters(
        &self,
        threshold: f64,
        top_k: usize,
        query: &PropositionQuery,
    ) -> EngramResult<Vec<SimilarityCluster>> {
        let candidates = self.scoped_entries(query);

        let mut clusters: Vec<SimilarityCluster> = Vec::new();
        for anchor in &candidates {
            let mut neighbors: Vec<(Proposition, f64)> = Vec::new();
            for other in &candidates {
                // Only (anchor, other) with anchor.id < other.id, so a
                // similar pair appears in exactly one direction.
                if other.proposition.id <= anchor.proposition.id {
                    continue;
                }
                let score = cosine_similarity(&anchor.embedding, &other.embedding);
                if score >= threshold {
                    neighbors.push((other.proposition.clone(), score));
                }
            }
            if neighbors.is_empty() {
                continue;
            }
            neighbors.sort_by(|a, b| {
                b.1.partial_cmp(&a.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.0.id.cmp(&b.0.id))
            });
            neighbors.truncate(top_k);
            clusters.push(SimilarityCluster {
                anchor: anchor.proposition.clone(),
                neighbors,
            });
        }

        clusters.sort_by(|a, b| {
            b.neighbors
                .len()
                .cmp(&a.neighbors.len())
                .then_with(|| a.anchor.id.cmp(&b.anchor.id))
        });
        Ok(clusters)
    }
}
