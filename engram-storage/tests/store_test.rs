use std::collections::HashMap;
use std::sync::Arc;

use engram_core::errors::EngramResult;
use engram_core::memory::{Mention, MentionRole, Proposition, PropositionStatus};
use engram_core::models::SimilaritySearch;
use engram_core::query::PropositionQuery;
use engram_core::traits::{EmbeddingProvider, PropositionRepository};
use engram_storage::MemoryStore;

/// Embedder returning pre-registered vectors, so similarity scores in these
/// tests are exact and deterministic.
struct FixedEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    dimensions: usize,
}

impl FixedEmbedder {
    fn new(dimensions: usize, entries: &[(&str, Vec<f32>)]) -> Self {
        Self {
            vectors: entries
                .iter()
                .map(|(text, v)| (text.to_string(), v.clone()))
                .collect(),
            dimensions,
        }
    }
}

impl EmbeddingProvider for FixedEmbedder {
    fn embed(&self, text: &str) -> EngramResult<Vec<f32>> {
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| vec![0.0; self.dimensions]))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

fn prop(context: &str, text: &str) -> Proposition {
    Proposition::observation(context, text, 0.8, 0.1, 0.5).unwrap()
}

fn store_with(entries: &[(&str, Vec<f32>)]) -> MemoryStore {
    MemoryStore::new(Arc::new(FixedEmbedder::new(3, entries)))
}

// --- CRUD ---

#[test]
fn save_then_find_by_id_round_trips() {
    let store = store_with(&[]);
    let p = prop("ctx", "the deploy runs nightly");
    store.save(&p).unwrap();

    let found = store.find_by_id(&p.id).unwrap().unwrap();
    assert_eq!(found.id, p.id);
    assert_eq!(found.text, p.text);
}

#[test]
fn save_is_idempotent() {
    let store = store_with(&[]);
    let p = prop("ctx", "one fact");
    store.save(&p).unwrap();
    store.save(&p).unwrap();

    assert_eq!(store.count().unwrap(), 1);
    assert_eq!(store.find_all().unwrap().len(), 1);
}

#[test]
fn save_upserts_by_id() {
    let store = store_with(&[]);
    let p = prop("ctx", "original");
    store.save(&p).unwrap();

    let updated = p.with_confidence(0.2).unwrap();
    store.save(&updated).unwrap();

    assert_eq!(store.count().unwrap(), 1);
    let found = store.find_by_id(&p.id).unwrap().unwrap();
    assert_eq!(found.confidence, 0.2);
}

#[test]
fn delete_missing_id_returns_false() {
    let store = store_with(&[]);
    assert!(!store.delete("nope").unwrap());
}

#[test]
fn delete_existing_removes_entry() {
    let store = store_with(&[]);
    let p = prop("ctx", "fact");
    store.save(&p).unwrap();

    assert!(store.delete(&p.id).unwrap());
    assert!(store.find_by_id(&p.id).unwrap().is_none());
    assert_eq!(store.count().unwrap(), 0);
}

// --- Finders ---

#[test]
fn finders_return_empty_on_no_match() {
    let store = store_with(&[]);
    assert!(store.find_by_entity("ent").unwrap().is_empty());
    assert!(store.find_by_grounding("chunk").unwrap().is_empty());
    assert!(store.find_by_context("ctx").unwrap().is_empty());
    assert!(store
        .find_by_status(PropositionStatus::Active)
        .unwrap()
        .is_empty());
}

#[test]
fn find_by_entity_matches_resolved_mentions_only() {
    let store = store_with(&[]);
    let mut resolved = prop("ctx", "alice owns the pager");
    resolved.mentions = vec![Mention::resolved(
        "alice",
        "person",
        MentionRole::Subject,
        "ent-alice",
    )];
    let mut unresolved = prop("ctx", "alice was mentioned");
    unresolved.mentions = vec![Mention::new("alice", "person", MentionRole::Subject)];
    store.save_all(&[resolved.clone(), unresolved]).unwrap();

    let hits = store.find_by_entity("ent-alice").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, resolved.id);
}

#[test]
fn find_by_grounding_and_level_and_status() {
    let store = store_with(&[]);
    let grounded = prop("ctx", "a").with_grounding(&["chunk-9".to_string()]);
    let abstraction =
        Proposition::abstraction("ctx", "b", 0.8, 0.1, 0.5, 1, vec![grounded.id.clone()]).unwrap();
    let contradicted = prop("ctx", "c").with_status(PropositionStatus::Contradicted);
    store
        .save_all(&[grounded.clone(), abstraction.clone(), contradicted.clone()])
        .unwrap();

    assert_eq!(store.find_by_grounding("chunk-9").unwrap()[0].id, grounded.id);
    assert_eq!(store.find_by_min_level(1).unwrap()[0].id, abstraction.id);
    let contradicted_hits = store
        .find_by_status(PropositionStatus::Contradicted)
        .unwrap();
    assert_eq!(contradicted_hits.len(), 1);
    assert_eq!(contradicted_hits[0].id, contradicted.id);
}

#[test]
fn find_applies_query_order_and_limit() {
    let store = store_with(&[]);
    let mut low = prop("ctx", "low");
    low.reinforce_count = 1;
    let mut high = prop("ctx", "high");
    high.reinforce_count = 9;
    let mut mid = prop("ctx", "mid");
    mid.reinforce_count = 4;
    store.save_all(&[low, high.clone(), mid.clone()]).unwrap();

    let results = store
        .find(
            &PropositionQuery::in_context("ctx")
                .order_by(engram_core::query::QueryOrder::ReinforceCountDesc)
                .with_limit(2),
        )
        .unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, high.id);
    assert_eq!(results[1].id, mid.id);
}

// --- Similarity ---

#[test]
fn find_similar_orders_by_score_and_excludes_below_threshold() {
    let store = store_with(&[
        ("exact", vec![1.0, 0.0, 0.0]),
        ("close", vec![0.9, 0.1, 0.0]),
        ("unrelated", vec![0.0, 1.0, 0.0]),
        ("query", vec![1.0, 0.0, 0.0]),
    ]);
    let exact = prop("ctx", "exact");
    let close = prop("ctx", "close");
    let unrelated = prop("ctx", "unrelated");
    store
        .save_all(&[unrelated, close.clone(), exact.clone()])
        .unwrap();

    let hits = store.find_similar("query", 0.8, 10).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, exact.id);
    assert_eq!(hits[1].id, close.id);

    let top_one = store.find_similar("query", 0.8, 1).unwrap();
    assert_eq!(top_one.len(), 1);
    assert_eq!(top_one[0].id, exact.id);
}

#[test]
fn save_indexes_synchronously_for_similarity() {
    let store = store_with(&[
        ("fresh fact", vec![1.0, 0.0, 0.0]),
        ("query", vec![1.0, 0.0, 0.0]),
    ]);
    let p = prop("ctx", "fresh fact");
    store.save(&p).unwrap();

    // Immediately visible, no indexing window.
    let hits = store.find_similar("query", 0.99, 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, p.id);
}

#[test]
fn scoped_similarity_filters_before_scoring() {
    let store = store_with(&[
        ("in scope", vec![1.0, 0.0, 0.0]),
        ("out of scope", vec![1.0, 0.0, 0.0]),
        ("query", vec![1.0, 0.0, 0.0]),
    ]);
    let in_scope = prop("ctx-a", "in scope");
    let out_of_scope = prop("ctx-b", "out of scope");
    store.save_all(&[in_scope.clone(), out_of_scope]).unwrap();

    let hits = store
        .find_similar_scoped(
            &SimilaritySearch::new("query", 0.5, 10),
            &PropositionQuery::in_context("ctx-a"),
        )
        .unwrap();

    // The ctx-b proposition is identical by embedding but filtered out
    // before scoring.
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0.id, in_scope.id);
    assert!((hits[0].1 - 1.0).abs() < 1e-9);
}

#[test]
fn scoped_similarity_respects_status_filter() {
    let store = store_with(&[
        ("active fact", vec![1.0, 0.0, 0.0]),
        ("superseded fact", vec![1.0, 0.0, 0.0]),
        ("query", vec![1.0, 0.0, 0.0]),
    ]);
    let active = prop("ctx", "active fact");
    let superseded = prop("ctx", "superseded fact").with_status(PropositionStatus::Superseded);
    store.save_all(&[active.clone(), superseded]).unwrap();

    let hits = store
        .find_similar_scoped(
            &SimilaritySearch::new("query", 0.5, 10),
            &PropositionQuery::in_context("ctx").with_status(PropositionStatus::Active),
        )
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0.id, active.id);
}

// --- Clusters ---

#[test]
fn clusters_use_only_ascending_id_pairs() {
    let store = store_with(&[
        ("topic one a", vec![1.0, 0.0, 0.0]),
        ("topic one b", vec![0.95, 0.05, 0.0]),
        ("lone topic", vec![0.0, 0.0, 1.0]),
    ]);
    let a = prop("ctx", "topic one a");
    let b = prop("ctx", "topic one b");
    let lone = prop("ctx", "lone topic");
    store.save_all(&[a.clone(), b.clone(), lone]).unwrap();

    let clusters = store
        .find_clusters(0.9, 10, &PropositionQuery::in_context("ctx"))
        .unwrap();

    // One similar pair → exactly one cluster, anchored at the lower id.
    assert_eq!(clusters.len(), 1);
    let (lower, higher) = if a.id < b.id { (&a, &b) } else { (&b, &a) };
    assert_eq!(clusters[0].anchor.id, lower.id);
    assert_eq!(clusters[0].neighbors.len(), 1);
    assert_eq!(clusters[0].neighbors[0].0.id, higher.id);
}

#[test]
fn clusters_order_by_neighbor_count_desc() {
    let store = store_with(&[
        ("alpha 1", vec![1.0, 0.0, 0.0]),
        ("alpha 2", vec![0.99, 0.01, 0.0]),
        ("alpha 3", vec![0.98, 0.02, 0.0]),
        ("beta 1", vec![0.0, 1.0, 0.0]),
        ("beta 2", vec![0.0, 0.99, 0.01]),
    ]);
    let props: Vec<Proposition> = ["alpha 1", "alpha 2", "alpha 3", "beta 1", "beta 2"]
        .iter()
        .map(|t| prop("ctx", t))
        .collect();
    store.save_all(&props).unwrap();

    let clusters = store
        .find_clusters(0.9, 10, &PropositionQuery::in_context("ctx"))
        .unwrap();

    assert!(!clusters.is_empty());
    // The first cluster is the alpha group's lowest-id anchor with the most
    // neighbors; counts never increase down the list.
    for pair in clusters.windows(2) {
        assert!(pair[0].neighbors.len() >= pair[1].neighbors.len());
    }
    assert_eq!(clusters[0].neighbors.len(), 2);
}

#[test]
fn clusters_empty_when_nothing_is_similar() {
    let store = store_with(&[
        ("x", vec![1.0, 0.0, 0.0]),
        ("y", vec![0.0, 1.0, 0.0]),
    ]);
    store
        .save_all(&[prop("ctx", "x"), prop("ctx", "y")])
        .unwrap();

    let clusters = store
        .find_clusters(0.9, 10, &PropositionQuery::in_context("ctx"))
        .unwrap();
    assert!(clusters.is_empty());
}

// --- Failure semantics ---

#[test]
#[should_panic(expected = "embedding dimension mismatch")]
fn mismatched_embedding_dimensions_panic() {
    let store = store_with(&[
        ("stored", vec![1.0, 0.0, 0.0]),
        ("bad query", vec![1.0, 0.0]),
    ]);
    store.save(&prop("ctx", "stored")).unwrap();
    let _ = store.find_similar("bad query", 0.5, 10);
}
