use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DECAY_K, SECONDS_PER_DAY};
use crate::errors::ValidationError;

use super::mention::Mention;
use super::status::PropositionStatus;

/// An atomic, uncertain statement extracted from some source.
///
/// Propositions are the unit of knowledge in the engine. They carry a stored
/// `confidence` together with a `decay` rate; the staleness-adjusted
/// [`effective confidence`](Proposition::effective_confidence_at) is always
/// derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposition {
    /// UUID v4 identifier, stable for the lifetime of the proposition.
    pub id: String,
    /// Logical namespace (per-user or per-session scope).
    pub context_id: String,
    /// Natural-language statement. Opaque for similarity purposes.
    pub text: String,
    /// Ordered entity references. A proposition expresses at most one
    /// relationship, so typically two or fewer.
    pub mentions: Vec<Mention>,
    /// Certainty at creation or last revision, in [0.0, 1.0].
    pub confidence: f64,
    /// Staleness rate in [0.0, 1.0]. 0.0 = permanent, 1.0 = highly ephemeral.
    pub decay: f64,
    /// How much the fact matters, independent of confidence. In [0.0, 1.0].
    pub importance: f64,
    /// Source identifiers supporting this proposition. Union-accumulated.
    pub grounding: Vec<String>,
    /// Creation timestamp. Never changes.
    pub created: DateTime<Utc>,
    /// Bumped on every confidence/mentions/status mutation.
    pub revised: DateTime<Utc>,
    /// Lifecycle state.
    pub status: PropositionStatus,
    /// Abstraction depth. 0 = raw observation.
    pub level: u32,
    /// Propositions this one was abstracted from. Non-empty when `level > 0`.
    pub source_ids: Vec<String>,
    /// Incremented each time new evidence merges into or reinforces this
    /// proposition. A frequency signal independent of confidence.
    pub reinforce_count: u32,
}

impl Proposition {
    /// Create a level-0 proposition with default certainty (confidence 1.0,
    /// no decay, medium importance).
    pub fn new(context_id: impl Into<String>, text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            context_id: context_id.into(),
            text: text.into(),
            mentions: Vec::new(),
            confidence: 1.0,
            decay: 0.0,
            importance: 0.5,
            grounding: Vec::new(),
            created: now,
            revised: now,
            status: PropositionStatus::Active,
            level: 0,
            source_ids: Vec::new(),
            reinforce_count: 0,
        }
    }

    /// Create a validated level-0 observation.
    pub fn observation(
        context_id: impl Into<String>,
        text: impl Into<String>,
        confidence: f64,
        decay: f64,
        importance: f64,
    ) -> Result<Self, ValidationError> {
        let proposition = Self {
            confidence,
            decay,
            importance,
            ..Self::new(context_id, text)
        };
        proposition.validate()?;
        Ok(proposition)
    }

    /// Create a validated abstraction derived from `source_ids`.
    pub fn abstraction(
        context_id: impl Into<String>,
        text: impl Into<String>,
        confidence: f64,
        decay: f64,
        importance: f64,
        level: u32,
        source_ids: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let proposition = Self {
            confidence,
            decay,
            importance,
            level,
            source_ids,
            ..Self::new(context_id, text)
        };
        proposition.validate()?;
        Ok(proposition)
    }

    /// Check all construction invariants. Out-of-range values are rejected,
    /// never clamped; NaN fails the range checks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ValidationError::ConfidenceOutOfRange {
                value: self.confidence,
            });
        }
        if !(0.0..=1.0).contains(&self.decay) {
            return Err(ValidationError::DecayOutOfRange { value: self.decay });
        }
        if !(0.0..=1.0).contains(&self.importance) {
            return Err(ValidationError::ImportanceOutOfRange {
                value: self.importance,
            });
        }
        if self.level > 0 && self.source_ids.is_empty() {
            return Err(ValidationError::MissingSourceIds { level: self.level });
        }
        if self.level == 0 && !self.source_ids.is_empty() {
            return Err(ValidationError::UnexpectedSourceIds {
                count: self.source_ids.len(),
            });
        }
        Ok(())
    }

    // --- Derived confidence ---

    /// Effective confidence at `as_of` with decay multiplier `k`:
    ///
    /// ```text
    /// confidence × exp(-decay × k × max(0, days(as_of - revised)))
    /// ```
    ///
    /// Negative ages clamp to zero, so instants before `revised` (including
    /// before `created`) see the undecayed confidence.
    pub fn effective_confidence_at(&self, as_of: DateTime<Utc>, k: f64) -> f64 {
        let age_days = (as_of - self.revised).num_seconds().max(0) as f64 / SECONDS_PER_DAY;
        self.confidence * (-self.decay * k * age_days).exp()
    }

    /// Effective confidence now, with the default decay multiplier.
    pub fn effective_confidence(&self) -> f64 {
        self.effective_confidence_at(Utc::now(), DEFAULT_DECAY_K)
    }

    // --- Pure "with-" mutators ---
    // Each returns a new value with `revised` bumped; the original is never
    // altered.

    /// Copy with a new lifecycle status.
    pub fn with_status(&self, status: PropositionStatus) -> Self {
        Self {
            status,
            revised: Utc::now(),
            ..self.clone()
        }
    }

    /// Copy with a new confidence. Rejects out-of-range values.
    pub fn with_confidence(&self, confidence: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ValidationError::ConfidenceOutOfRange { value: confidence });
        }
        Ok(Self {
            confidence,
            revised: Utc::now(),
            ..self.clone()
        })
    }

    /// Copy with `sources` unioned into `grounding` (deduplicated, order
    /// preserved).
    pub fn with_grounding(&self, sources: &[String]) -> Self {
        let mut grounding = self.grounding.clone();
        for source in sources {
            if !grounding.contains(source) {
                grounding.push(source.clone());
            }
        }
        Self {
            grounding,
            revised: Utc::now(),
            ..self.clone()
        }
    }

    /// Copy with mentions replaced by their resolved forms.
    pub fn with_resolved_mentions(&self, mentions: Vec<Mention>) -> Self {
        Self {
            mentions,
            revised: Utc::now(),
            ..self.clone()
        }
    }

    /// Copy reinforced by `evidence`: confidence boosted (capped at 1.0),
    /// grounding unioned, reinforce count incremented, `revised` bumped.
    pub fn reinforced_by(&self, evidence: &Proposition, boost: f64) -> Self {
        let mut reinforced = self.with_grounding(&evidence.grounding);
        reinforced.confidence = (self.confidence + boost).min(1.0);
        reinforced.reinforce_count = self.reinforce_count + 1;
        reinforced
    }

    // --- Entity access ---

    /// Resolved entity ids mentioned by this proposition, deduplicated.
    pub fn resolved_entity_ids(&self) -> BTreeSet<String> {
        self.mentions
            .iter()
            .filter_map(|m| m.resolved_id.clone())
            .collect()
    }

    /// Whether any mention resolves to `entity_id`.
    pub fn mentions_entity(&self, entity_id: &str) -> bool {
        self.mentions
            .iter()
            .any(|m| m.resolved_id.as_deref() == Some(entity_id))
    }

    /// Structural comparison: same statement, mentions, confidence,
    /// importance, and status.
    ///
    /// Distinct from `PartialEq`, which only compares ids.
    pub fn content_eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.mentions == other.mentions
            && self.confidence == other.confidence
            && self.importance == other.importance
            && self.status == other.status
    }
}

/// Identity equality: two propositions are equal if they have the same id.
///
/// A proposition's identity is its UUID, not its content. For structural
/// comparison, use [`Proposition::content_eq`].
impl PartialEq for Proposition {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
