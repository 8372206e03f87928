//! Blended similarity for consolidation: word-set Jaccard over text plus
//! Jaccard over resolved entity ids.

use std::collections::HashSet;

use engram_core::constants::{ENTITY_OVERLAP_WEIGHT, TEXT_SIMILARITY_WEIGHT};
use engram_core::memory::Proposition;

fn tokens(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Jaccard similarity over lower-cased whitespace-tokenized word sets.
/// Symmetric; 1.0 when both token sets are empty.
pub fn text_jaccard(a: &str, b: &str) -> f64 {
    let ta = tokens(a);
    let tb = tokens(b);
    if ta.is_empty() && tb.is_empty() {
        return 1.0;
    }
    let intersection = ta.intersection(&tb).count() as f64;
    let union = ta.union(&tb).count() as f64;
    intersection / union
}

/// Jaccard similarity over each proposition's resolved entity ids.
///
/// Both sets empty is ambiguous overlap (0.5); exactly one empty is no
/// overlap (0.0).
pub fn entity_overlap(a: &Proposition, b: &Proposition) -> f64 {
    let ea = a.resolved_entity_ids();
    let eb = b.resolved_entity_ids();
    match (ea.is_empty(), eb.is_empty()) {
        (true, true) => 0.5,
        (true, false) | (false, true) => 0.0,
        (false, false) => {
            let intersection = ea.intersection(&eb).count() as f64;
            let union = ea.union(&eb).count() as f64;
            intersection / union
        }
    }
}

/// Weighted blend used to match session propositions against existing
/// memory: 0.7 × text Jaccard + 0.3 × entity overlap.
pub fn blended(a: &Proposition, b: &Proposition) -> f64 {
    TEXT_SIMILARITY_WEIGHT * text_jaccard(&a.text, &b.text)
        + ENTITY_OVERLAP_WEIGHT * entity_overlap(a, b)
}
