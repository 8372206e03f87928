use serde::{Deserialize, Serialize};

/// Grammatical role a mention plays inside its proposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionRole {
    Subject,
    Object,
    Other,
}

/// A reference to an entity inside a proposition's text.
///
/// `resolved_id` is `None` until an external entity resolver has
/// disambiguated the surface span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    /// Surface text of the mention.
    pub span: String,
    /// Entity type label (e.g. "person", "tool").
    pub entity_type: String,
    /// External entity identifier, if resolved.
    pub resolved_id: Option<String>,
    /// Role within the proposition.
    pub role: MentionRole,
}

impl Mention {
    /// Create an unresolved mention.
    pub fn new(span: impl Into<String>, entity_type: impl Into<String>, role: MentionRole) -> Self {
        Self {
            span: span.into(),
            entity_type: entity_type.into(),
            resolved_id: None,
            role,
        }
    }

    /// Create a mention already resolved to an entity id.
    pub fn resolved(
        span: impl Into<String>,
        entity_type: impl Into<String>,
        role: MentionRole,
        entity_id: impl Into<String>,
    ) -> Self {
        Self {
            span: span.into(),
            entity_type: entity_type.into(),
            resolved_id: Some(entity_id.into()),
            role,
        }
    }
}
