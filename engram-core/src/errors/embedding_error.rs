/// Embedding-provider errors.
///
/// Dimension mismatches between already-computed vectors are a programming
/// error and panic at the similarity computation; this enum covers failures
/// of the provider itself.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding provider '{provider}' failed: {reason}")]
    ProviderFailed { provider: String, reason: String },
}
