use std::sync::Mutex;

use engram_core::errors::EngramResult;
use engram_core::memory::{Proposition, PropositionStatus};
use engram_core::models::{RevisionOutcome, SimilarityCluster, SimilaritySearch};
use engram_core::query::PropositionQuery;
use engram_core::traits::PropositionRepository;

/// Repository stub that records every save.
#[derive(Default)]
struct RecordingRepository {
    saved: Mutex<Vec<Proposition>>,
}

impl RecordingRepository {
    fn saved_ids(&self) -> Vec<String> {
        self.saved.lock().unwrap().iter().map(|p| p.id.clone()).collect()
    }
}

impl PropositionRepository for RecordingRepository {
    fn save(&self, proposition: &Proposition) -> EngramResult<Proposition> {
        self.saved.lock().unwrap().push(proposition.clone());
        Ok(proposition.clone())
    }

    fn find_by_id(&self, id: &str) -> EngramResult<Option<Proposition>> {
        Ok(self
            .saved
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    fn delete(&self, _id: &str) -> EngramResult<bool> {
        Ok(false)
    }

    fn find(&self, query: &PropositionQuery) -> EngramResult<Vec<Proposition>> {
        Ok(query.apply(self.saved.lock().unwrap().clone()))
    }

    fn find_by_entity(&self, entity_id: &str) -> EngramResult<Vec<Proposition>> {
        self.find(&PropositionQuery::for_entity(entity_id))
    }

    fn find_by_status(
        &self,
        status: PropositionStatus,
    ) -> EngramResult<Vec<Proposition>> {
        self.find(&PropositionQuery::unscoped().with_status(status))
    }

    fn find_by_grounding(&self, source_id: &str) -> EngramResult<Vec<Proposition>> {
        Ok(self
            .saved
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.grounding.iter().any(|g| g == source_id))
            .cloned()
            .collect())
    }

    fn find_by_context(&self, context_id: &str) -> EngramResult<Vec<Proposition>> {
        self.find(&PropositionQuery::in_context(context_id))
    }

    fn find_by_min_level(&self, min_level: u32) -> EngramResult<Vec<Proposition>> {
        self.find(&PropositionQuery::unscoped().with_min_level(min_level))
    }

    fn find_all(&self) -> EngramResult<Vec<Proposition>> {
        Ok(self.saved.lock().unwrap().clone())
    }

    fn count(&self) -> EngramResult<usize> {
        Ok(self.saved.lock().unwrap().len())
    }

    fn find_similar(
        &self,
        _text: &str,
        _threshold: f64,
        _top_k: usize,
    ) -> EngramResult<Vec<Proposition>> {
        Ok(vec![])
    }

    fn find_similar_scoped(
        &self,
        _request: &SimilaritySearch,
        _query: &PropositionQuery,
    ) -> EngramResult<Vec<(Proposition, f64)>> {
        Ok(vec![])
    }

    fn find_clusters(
        &self,
        _threshold: f64,
        _top_k: usize,
        _query: &PropositionQuery,
    ) -> EngramResult<Vec<SimilarityCluster>> {
        Ok(vec![])
    }
}

fn prop(text: &str) -> Proposition {
    Proposition::observation("ctx", text, 0.8, 0.1, 0.5).unwrap()
}

#[test]
fn new_outcome_saves_the_proposition() {
    let repo = RecordingRepository::default();
    let p = prop("fresh fact");

    let saved = RevisionOutcome::New(p.clone()).persist(&repo).unwrap();

    assert_eq!(saved.len(), 1);
    assert_eq!(repo.saved_ids(), vec![p.id]);
}

#[test]
fn merged_outcome_saves_only_the_revised_form() {
    let repo = RecordingRepository::default();
    let original = prop("old form");
    let revised = prop("combined form");

    RevisionOutcome::Merged {
        original: original.clone(),
        revised: revised.clone(),
    }
    .persist(&repo)
    .unwrap();

    assert_eq!(repo.saved_ids(), vec![revised.id]);
}

#[test]
fn reinforced_outcome_saves_only_the_revised_form() {
    let repo = RecordingRepository::default();
    let original = prop("belief");
    let revised = original.with_confidence(0.9).unwrap();

    RevisionOutcome::Reinforced {
        original: original.clone(),
        revised: revised.clone(),
    }
    .persist(&repo)
    .unwrap();

    let ids = repo.saved_ids();
    assert_eq!(ids.len(), 1);
    assert_eq!(ids[0], revised.id);
    assert_eq!(repo.saved.lock().unwrap()[0].confidence, 0.9);
}

#[test]
fn contradicted_outcome_saves_both_sides() {
    let repo = RecordingRepository::default();
    let original = prop("the cache is write-through")
        .with_confidence(0.05)
        .unwrap();
    let new = prop("the cache is write-back");

    let saved = RevisionOutcome::Contradicted {
        original: original.clone(),
        new: new.clone(),
    }
    .persist(&repo)
    .unwrap();

    assert_eq!(saved.len(), 2);
    assert_eq!(repo.saved_ids(), vec![original.id, new.id]);
}

#[test]
fn generalized_outcome_saves_only_the_generalization() {
    let repo = RecordingRepository::default();
    let sources = vec![prop("a"), prop("b")];
    let generalization = Proposition::abstraction(
        "ctx",
        "general statement",
        0.8,
        0.1,
        0.5,
        1,
        sources.iter().map(|p| p.id.clone()).collect(),
    )
    .unwrap();

    RevisionOutcome::Generalized {
        generalizes: sources,
        proposition: generalization.clone(),
    }
    .persist(&repo)
    .unwrap();

    assert_eq!(repo.saved_ids(), vec![generalization.id]);
}

#[test]
fn outcome_serializes_with_kind_tag() {
    let outcome = RevisionOutcome::New(prop("fact"));
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["kind"], "new");

    let back: RevisionOutcome = serde_json::from_value(json).unwrap();
    match back {
        RevisionOutcome::New(p) => assert_eq!(p.text, "fact"),
        other => panic!("expected New, got {other:?}"),
    }
}
