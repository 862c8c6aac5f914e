//! Unified error types for the domain layer
//!
//! Provides a common error type for rules operations, so the engine can wrap
//! it without resorting to String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Ruleset or catalog entry not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Rules constraint violation (too many runes, wrong slot, ...)
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Parse error (for enums and value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// A limited resource has no uses left
    #[error("No uses remaining for {feat_id}: {used}/{max} used today")]
    Exhausted {
        feat_id: String,
        used: u32,
        max: u32,
    },
}

impl DomainError {
    /// Creates a validation error for rejected player input.
    ///
    /// # Example
    /// ```ignore
    /// if !(1..=20).contains(&level) {
    ///     return Err(DomainError::validation("Level must be between 1 and 20"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an exhausted-uses error
    pub fn exhausted(feat_id: impl Into<String>, used: u32, max: u32) -> Self {
        Self::Exhausted {
            feat_id: feat_id.into(),
            used,
            max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let err = DomainError::not_found("ancestry", "kobold");
        assert_eq!(err.to_string(), "Entity not found: ancestry with id kobold");
    }

    #[test]
    fn exhausted_message_reports_usage() {
        let err = DomainError::exhausted("halfling-luck", 1, 1);
        assert_eq!(
            err.to_string(),
            "No uses remaining for halfling-luck: 1/1 used today"
        );
    }
}
