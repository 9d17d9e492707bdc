//! Unified error types for the domain layer
//!
//! Every mutation on the creature record reports rejection through
//! `DomainError` instead of silently doing nothing, so callers (and tests)
//! can assert on the reason a request was refused.

use thiserror::Error;

use crate::value_objects::MovementType;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values or sub-selections)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects such as dice formulas)
    #[error("Parse error: {0}")]
    Parse(String),

    /// A feature index did not resolve to a feature
    #[error("No feature at index {index}")]
    NoSuchFeature { index: usize },

    /// The feature-point budget cannot cover the request
    #[error("Insufficient feature points: need {needed}, {available} available")]
    InsufficientFeaturePoints { needed: i32, available: i32 },

    /// The magic-point pool cannot cover the request
    #[error("Insufficient magic points: need {needed}, {available} available")]
    InsufficientMagicPoints { needed: i32, available: i32 },

    /// The attribute-point budget cannot cover the requested score
    #[error("Insufficient attribute points: need {needed}, {available} available")]
    InsufficientAttributePoints { needed: i32, available: i32 },

    /// The creature has no magic-point pool yet
    #[error("No spellcasting: a spellcasting feature must be added first")]
    NoSpellcasting,

    /// Multiattack is already at its maximum attack count
    #[error("Multiattack is already at {attacks} attacks")]
    MultiattackAtCap { attacks: u8 },

    /// No more recharge abilities may be added
    #[error("At most {cap} features may have a recharge")]
    RechargeCapReached { cap: usize },

    /// No more action-economy spells may be added
    #[error("At most {cap} action-economy spells are allowed")]
    SpellActionCapReached { cap: usize },

    /// The saving-throw proficiency set is full
    #[error("At most {cap} saving throw proficiencies are allowed")]
    SavingThrowCapReached { cap: i32 },

    /// The skill proficiency set is full
    #[error("At most {cap} skill proficiencies are allowed")]
    SkillCapReached { cap: i32 },

    /// The requested movement slot does not match the expected availability
    #[error("Movement change is not available for {movement}")]
    MovementUnavailable { movement: MovementType },

    /// Walking speed cannot be removed while it is the only movement
    #[error("Walking speed cannot be removed while it is the only movement")]
    LastWalkingSpeed,
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// Use this when a field value or a required sub-selection is invalid:
    /// ability scores outside [4, 20], an expertise grant for a skill the
    /// creature is not proficient in, a spell whose casting time does not
    /// match its category.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
