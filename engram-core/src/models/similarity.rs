use serde::{Deserialize, Serialize};

/// Parameters for a similarity search over the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilaritySearch {
    /// Query text, embedded by the repository's provider.
    pub text: String,
    /// Minimum cosine similarity for a hit.
    pub threshold: f64,
    /// Maximum number of hits.
    pub top_k: usize,
}

impl SimilaritySearch {
    pub fn new(text: impl Into<String>, threshold: f64, top_k: usize) -> Self {
        Self {
            text: text.into(),
            threshold,
            top_k,
        }
    }
}
