//! BeastBldr domain - the rules core of a creature builder
//!
//! A creature record is assembled step by step under a point-budget rule
//! set: attribute points by challenge rating, feature points for actions
//! and traits, magic points for action-economy spells. This crate owns the
//! record, the budgets, the costs, and the invariants; rendering, wizard
//! navigation, and import/export plumbing live elsewhere.

extern crate self as beastbldr_domain;

pub mod aggregates;
pub mod description;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod rules;
pub mod value_objects;

pub use aggregates::{Creature, MovementChangeKind, RECHARGE_CAP};
pub use error::DomainError;
pub use ids::FeatureId;

// Re-export entities (explicit list in entities/mod.rs)
pub use entities::{
    AttackAbility, AttackProfile, AttackReach, DamageSpell, DefenseEffect, Feature,
    FeatureCategory, FeatureKind, FeatureSpec, GrantKind, Multiattack, MovementBoost,
    PrimaryEffect, SecondaryEffect, SpellcastingGrant, SpellDelivery, SpellEffect,
    SpellSecondary, MULTIATTACK_BASE, MULTIATTACK_MAX,
};

// Re-export mutation outcomes
pub use events::{
    FeatureAdded, FeatureRemoved, FeatureUpdated, GrantedPool, MovementChange,
    MultiattackOutcome, PoolGranted,
};

// Re-export the rule set
pub use rules::{
    armor_by_name, attribute_point_budget, feature_point_cost, magic_point_cost,
    magic_point_pool, saving_throw_cap, skill_cap, suggested_damage, total_feature_points,
    weapon_by_name, Armor, BudgetReport, DexBonus, Pool, WeaponTemplate, ARMORS, WEAPONS,
};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    score_modifier, Ability, AbilityScores, AreaSize, ChallengeRating, Condition, DamageType,
    DiceFormula, MovementSet, MovementType, Recharge, Sense, SenseType, Size, Skill,
    SpellCastingTime, SpellDuration, SpellRange, CR_MAX, SCORE_BASE, SCORE_MAX, SCORE_MIN,
};
