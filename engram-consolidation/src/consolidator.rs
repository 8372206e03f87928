//! Session → long-term classification.

use engram_core::config::ConsolidationConfig;
use engram_core::memory::{Proposition, PropositionStatus};
use engram_core::models::{ConsolidationResult, MergedPropositions};

use crate::similarity;

/// Deterministic consolidator.
///
/// For each session proposition, finds the most similar existing
/// proposition (blended text/entity similarity) and classifies the pair:
/// near-duplicates reinforce, related statements merge, unmatched but
/// confident statements promote, the rest are discarded. Pure function of
/// its two input lists; performs no I/O.
#[derive(Debug, Clone, Default)]
pub struct Consolidator {
    config: ConsolidationConfig,
}

impl Consolidator {
    pub fn new(config: ConsolidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConsolidationConfig {
        &self.config
    }

    /// Classify every session proposition against `existing`. Each session
    /// proposition resolves to exactly one outcome.
    pub fn consolidate(
        &self,
        session: &[Proposition],
        existing: &[Proposition],
    ) -> ConsolidationResult {
        let mut result = ConsolidationResult::default();

        for candidate in session {
            match self.best_match(candidate, existing) {
                Some((best, score)) if score > self.config.reinforce_threshold => {
                    result
                        .reinforced
                        .push(best.reinforced_by(candidate, self.config.reinforcement_boost));
                }
                Some((best, _)) => {
                    let merged = merge(best, candidate);
                    result.merged.push(MergedPropositions {
                        sources: vec![best.clone(), candidate.clone()],
                        result: merged,
                    });
                }
                None if candidate.confidence >= self.config.promotion_threshold => {
                    let promoted = if candidate.status == PropositionStatus::Active {
                        candidate.clone()
                    } else {
                        candidate.with_status(PropositionStatus::Active)
                    };
                    result.promoted.push(promoted);
                }
                None => result.discarded.push(candidate.clone()),
            }
        }

        result
    }

    /// The existing proposition most similar to `candidate`, if any clears
    /// the similarity threshold. Ties on score go to the lowest id, so the
    /// choice is stable regardless of input order.
    fn best_match<'a>(
        &self,
        candidate: &Proposition,
        existing: &'a [Proposition],
    ) -> Option<(&'a Proposition, f64)> {
        let mut best: Option<(&'a Proposition, f64)> = None;
        for prior in existing {
            let score = similarity::blended(candidate, prior);
            if score < self.config.similarity_threshold {
                continue;
            }
            best = match best {
                None => Some((prior, score)),
                Some((held, held_score)) => {
                    if score > held_score || (score == held_score && prior.id < held.id) {
                        Some((prior, score))
                    } else {
                        Some((held, held_score))
                    }
                }
            };
        }
        best
    }
}

/// Merge an existing proposition with a session one: scalar fields come
/// from whichever side is more confident, confidence averages, grounding
/// unions, and the result gets a fresh identity.
fn merge(existing: &Proposition, candidate: &Proposition) -> Proposition {
    let (primary, secondary) = if existing.confidence >= candidate.confidence {
        (existing, candidate)
    } else {
        (candidate, existing)
    };

    let mut merged = Proposition::new(primary.context_id.clone(), primary.text.clone());
    merged.mentions = primary.mentions.clone();
    merged.confidence = (existing.confidence + candidate.confidence) / 2.0;
    merged.decay = primary.decay;
    merged.importance = primary.importance;
    merged.level = primary.level;
    merged.source_ids = primary.source_ids.clone();
    merged.reinforce_count = primary.reinforce_count;

    let mut grounding = primary.grounding.clone();
    for source in &secondary.grounding {
        if !grounding.contains(source) {
            grounding.push(source.clone());
        }
    }
    merged.grounding = grounding;
    merged
}
