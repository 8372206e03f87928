//! Composable, immutable filter/order/limit specifications over a
//! proposition store.
//!
//! Queries are built from a scoped factory ([`PropositionQuery::in_context`]
//! or [`PropositionQuery::for_entity`]) and narrowed with consuming `with_*`
//! methods. [`PropositionQuery::unscoped`] exists, but its name makes a
//! full-store scan a deliberate choice rather than an accident.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DECAY_K;
use crate::memory::{Proposition, PropositionStatus};

/// Result ordering for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryOrder {
    /// Store order (unspecified).
    #[default]
    None,
    /// Highest effective confidence first, evaluated at the query's `as_of`.
    EffectiveConfidenceDesc,
    /// Newest creation first.
    CreatedDesc,
    /// Most recently revised first.
    RevisedDesc,
    /// Most reinforced first.
    ReinforceCountDesc,
}

/// An immutable filter/order/limit specification.
///
/// The predicate ([`matches_at`](Self::matches_at)) and the full pipeline
/// ([`apply`](Self::apply)) are defined here so every repository backend
/// filters identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropositionQuery {
    /// Restrict to a single context.
    pub context_id: Option<String>,
    /// Match propositions mentioning any of these entity ids.
    pub entity_any: Vec<String>,
    /// Match propositions mentioning all of these entity ids.
    pub entity_all: Vec<String>,
    /// Restrict to a lifecycle status.
    pub status: Option<PropositionStatus>,
    /// Inclusive lower bound on abstraction level.
    pub min_level: Option<u32>,
    /// Inclusive upper bound on abstraction level.
    pub max_level: Option<u32>,
    /// Strict temporal bounds on `created`.
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    /// Strict temporal bounds on `revised`.
    pub revised_after: Option<DateTime<Utc>>,
    pub revised_before: Option<DateTime<Utc>>,
    /// Floor on effective confidence, evaluated at `as_of` with `decay_k`.
    pub min_effective_confidence: Option<f64>,
    /// Evaluation instant for effective confidence. Defaults to "now" at
    /// application time; set explicitly for deterministic historical queries.
    pub as_of: Option<DateTime<Utc>>,
    /// Decay multiplier used in effective-confidence evaluation.
    pub decay_k: f64,
    /// Inclusive floor on reinforce count.
    pub min_reinforce_count: Option<u32>,
    /// Result ordering.
    pub order: QueryOrder,
    /// Maximum number of results.
    pub limit: Option<usize>,
}

impl Default for PropositionQuery {
    fn default() -> Self {
        Self {
            context_id: None,
            entity_any: Vec::new(),
            entity_all: Vec::new(),
            status: None,
            min_level: None,
            max_level: None,
            created_after: None,
            created_before: None,
            revised_after: None,
            revised_before: None,
            min_effective_confidence: None,
            as_of: None,
            decay_k: DEFAULT_DECAY_K,
            min_reinforce_count: None,
            order: QueryOrder::None,
            limit: None,
        }
    }
}

impl PropositionQuery {
    // --- Factories ---

    /// A query with no scope filter. Matches the whole store; prefer the
    /// scoped factories.
    pub fn unscoped() -> Self {
        Self::default()
    }

    /// Query scoped to one context.
    pub fn in_context(context_id: impl Into<String>) -> Self {
        Self {
            context_id: Some(context_id.into()),
            ..Self::default()
        }
    }

    /// Query scoped to propositions mentioning one entity.
    pub fn for_entity(entity_id: impl Into<String>) -> Self {
        Self {
            entity_any: vec![entity_id.into()],
            ..Self::default()
        }
    }

    // --- Builders ---

    /// Restrict to a context (in addition to any existing filters).
    pub fn with_context(mut self, context_id: impl Into<String>) -> Self {
        self.context_id = Some(context_id.into());
        self
    }

    /// Add an entity to the any-of set.
    pub fn with_entity(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_any.push(entity_id.into());
        self
    }

    /// Require all of the given entities to be mentioned.
    pub fn with_all_entities(mut self, entity_ids: Vec<String>) -> Self {
        self.entity_all = entity_ids;
        self
    }

    /// Restrict to a lifecycle status.
    pub fn with_status(mut self, status: PropositionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Inclusive lower bound on abstraction level.
    pub fn with_min_level(mut self, level: u32) -> Self {
        self.min_level = Some(level);
        self
    }

    /// Inclusive upper bound on abstraction level.
    pub fn with_max_level(mut self, level: u32) -> Self {
        self.max_level = Some(level);
        self
    }

    /// Strictly after `instant` on `created`.
    pub fn with_created_after(mut self, instant: DateTime<Utc>) -> Self {
        self.created_after = Some(instant);
        self
    }

    /// Strictly before `instant` on `created`.
    pub fn with_created_before(mut self, instant: DateTime<Utc>) -> Self {
        self.created_before = Some(instant);
        self
    }

    /// Strictly after `instant` on `revised`.
    pub fn with_revised_after(mut self, instant: DateTime<Utc>) -> Self {
        self.revised_after = Some(instant);
        self
    }

    /// Strictly before `instant` on `revised`.
    pub fn with_revised_before(mut self, instant: DateTime<Utc>) -> Self {
        self.revised_before = Some(instant);
        self
    }

    /// Floor on effective confidence.
    pub fn with_min_effective_confidence(mut self, min: f64) -> Self {
        self.min_effective_confidence = Some(min);
        self
    }

    /// Fix the effective-confidence evaluation instant.
    pub fn with_as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Override the decay multiplier used for effective confidence.
    pub fn with_decay_k(mut self, decay_k: f64) -> Self {
        self.decay_k = decay_k;
        self
    }

    /// Inclusive floor on reinforce count.
    pub fn with_min_reinforce_count(mut self, count: u32) -> Self {
        self.min_reinforce_count = Some(count);
        self
    }

    /// Set the result ordering.
    pub fn order_by(mut self, order: QueryOrder) -> Self {
        self.order = order;
        self
    }

    /// Cap the number of results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    // --- Evaluation ---

    /// Whether `proposition` satisfies every filter, with effective
    /// confidence evaluated at `as_of`.
    pub fn matches_at(&self, proposition: &Proposition, as_of: DateTime<Utc>) -> bool {
        if let Some(context_id) = &self.context_id {
            if proposition.context_id != *context_id {
                return false;
            }
        }
        if !self.entity_any.is_empty()
            && !self
                .entity_any
                .iter()
                .any(|e| proposition.mentions_entity(e))
        {
            return false;
        }
        if !self
            .entity_all
            .iter()
            .all(|e| proposition.mentions_entity(e))
        {
            return false;
        }
        if let Some(status) = self.status {
            if proposition.status != status {
                return false;
            }
        }
        if let Some(min) = self.min_level {
            if proposition.level < min {
                return false;
            }
        }
        if let Some(max) = self.max_level {
            if proposition.level > max {
                return false;
            }
        }
        if let Some(after) = self.created_after {
            if proposition.created <= after {
                return false;
            }
        }
        if let Some(before) = self.created_before {
            if proposition.created >= before {
                return false;
            }
        }
        if let Some(after) = self.revised_after {
            if proposition.revised <= after {
                return false;
            }
        }
        if let Some(before) = self.revised_before {
            if proposition.revised >= before {
                return false;
            }
        }
        if let Some(min) = self.min_effective_confidence {
            if proposition.effective_confidence_at(as_of, self.decay_k) < min {
                return false;
            }
        }
        if let Some(min) = self.min_reinforce_count {
            if proposition.reinforce_count < min {
                return false;
            }
        }
        true
    }

    /// Whether `proposition` satisfies every filter, evaluated at the
    /// query's `as_of` (or "now" when unset).
    pub fn matches(&self, proposition: &Proposition) -> bool {
        let as_of = self.as_of.unwrap_or_else(Utc::now);
        self.matches_at(proposition, as_of)
    }

    /// Filter, order, and limit `propositions` in one pass. The evaluation
    /// instant is resolved once, so ordering and confidence floors agree.
    pub fn apply(&self, mut propositions: Vec<Proposition>) -> Vec<Proposition> {
        let as_of = self.as_of.unwrap_or_else(Utc::now);
        propositions.retain(|p| self.matches_at(p, as_of));

        match self.order {
            QueryOrder::None => {}
            QueryOrder::EffectiveConfidenceDesc => {
                propositions.sort_by(|a, b| {
                    let ea = a.effective_confidence_at(as_of, self.decay_k);
                    let eb = b.effective_confidence_at(as_of, self.decay_k);
                    eb.partial_cmp(&ea).unwrap_or(std::cmp::Ordering::Equal)
                });
            }
            QueryOrder::CreatedDesc => {
                propositions.sort_by(|a, b| b.created.cmp(&a.created));
            }
            QueryOrder::RevisedDesc => {
                propositions.sort_by(|a, b| b.revised.cmp(&a.revised));
            }
            QueryOrder::ReinforceCountDesc => {
                propositions.sort_by(|a, b| b.reinforce_count.cmp(&a.reinforce_count));
            }
        }

        if let Some(limit) = self.limit {
            propositions.truncate(limit);
        }
        propositions
    }
}
