//! Entities of the creature domain

mod feature;

pub use feature::{
    AttackAbility, AttackProfile, AttackReach, DamageSpell, DefenseEffect, Feature,
    FeatureCategory, FeatureKind, FeatureSpec, GrantKind, Multiattack, MovementBoost,
    PrimaryEffect, SecondaryEffect, SpellcastingGrant, SpellDelivery, SpellEffect,
    SpellSecondary, MULTIATTACK_BASE, MULTIATTACK_MAX,
};
