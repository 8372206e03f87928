use crate::errors::EngramResult;
use crate::memory::{Mention, Proposition};

/// Extracts candidate propositions from raw source content. Typically
/// LLM-backed; the engine consumes its output as plain proposition data
/// with unresolved mentions.
pub trait Extractor: Send + Sync {
    fn extract(&self, source_id: &str, content: &str) -> EngramResult<Vec<Proposition>>;
}

/// Resolves mention spans to external entity identifiers within a context.
pub trait EntityResolver: Send + Sync {
    /// Return the mentions with `resolved_id` filled in where possible.
    fn resolve(&self, context_id: &str, mentions: &[Mention]) -> EngramResult<Vec<Mention>>;
}
