use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a proposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropositionStatus {
    /// Current belief.
    Active,
    /// Replaced by a higher-level abstraction.
    Superseded,
    /// Confidence driven to ~0 by conflicting evidence.
    Contradicted,
    /// Successfully projected to downstream consumers.
    Promoted,
}

impl fmt::Display for PropositionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Superseded => "superseded",
            Self::Contradicted => "contradicted",
            Self::Promoted => "promoted",
        };
        write!(f, "{s}")
    }
}
