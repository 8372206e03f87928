/// Construction-time invariant violations on propositions.
///
/// These fail fast — out-of-range values are rejected, never clamped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("confidence {value} outside [0.0, 1.0]")]
    ConfidenceOutOfRange { value: f64 },

    #[error("decay {value} outside [0.0, 1.0]")]
    DecayOutOfRange { value: f64 },

    #[error("importance {value} outside [0.0, 1.0]")]
    ImportanceOutOfRange { value: f64 },

    #[error("abstraction level {level} requires at least one source proposition")]
    MissingSourceIds { level: u32 },

    #[error("raw observation carries {count} source propositions")]
    UnexpectedSourceIds { count: usize },
}
