/// Errors surfaced by an abstractor collaborator.
#[derive(Debug, thiserror::Error)]
pub enum AbstractionError {
    #[error("abstraction synthesis failed for entity '{entity_id}': {reason}")]
    SynthesisFailed { entity_id: String, reason: String },

    #[error("abstractor returned an invalid proposition: {reason}")]
    InvalidAbstraction { reason: String },
}
