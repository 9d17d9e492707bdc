//! Feature cost calculator
//!
//! Computes the price of a proposed feature in the correct currency before
//! it is committed: feature points for the action economy and passive
//! grants, magic points for action-economy spells.

use crate::entities::{
    Feature, FeatureKind, PrimaryEffect, SpellDelivery, SpellEffect, MULTIATTACK_BASE,
};

/// Feature points consumed by creating a multiattack, and by each
/// additional attack beyond the base.
pub const MULTIATTACK_STEP_COST: i32 = 1;
/// Feature points consumed by a +2 attribute-point grant.
pub const ATTRIBUTE_GRANT_COST: i32 = 1;
/// Attribute points delivered by one attribute grant.
pub const ATTRIBUTE_GRANT_POINTS: i32 = 2;
/// Feature points consumed by a +1 saving-throw-slot grant.
pub const SAVING_THROW_GRANT_COST: i32 = 1;

/// Feature-point cost of a feature in its current configuration.
///
/// Hidden bookkeeping entries are free. The free slot (`is_first`) zeroes
/// the base cost but not attack add-ons: a first attack with doubled
/// damage still costs the doubling point.
pub fn feature_point_cost(feature: &Feature) -> i32 {
    if feature.is_hidden() {
        return 0;
    }
    let base = if feature.is_first() {
        0
    } else {
        feature.category().base_cost()
    };
    match feature.kind() {
        FeatureKind::Text => base,
        FeatureKind::Attack(attack) => {
            let mut cost = base;
            if attack.double_damage {
                cost += 1;
            }
            if attack.secondary.is_some() {
                cost += 1;
            }
            cost
        }
        FeatureKind::Multiattack(multiattack) => {
            MULTIATTACK_STEP_COST * (1 + i32::from(multiattack.attacks() - MULTIATTACK_BASE))
        }
        // Action-economy spells are paid for in magic points
        FeatureKind::Spell(_) => 0,
        FeatureKind::Spellcasting(_) => 2,
        FeatureKind::Grant(grant) => grant.cost(),
    }
}

/// Magic-point cost of an action-economy spell:
/// `max(1, base + surcharges - recharge discount)`.
///
/// The discount can never drive the cost below one point.
pub fn magic_point_cost(spell: &SpellEffect) -> i32 {
    let mut cost = spell.casting_time.base_cost();
    cost += effect_surcharge(&spell.effect);
    cost += spell.duration.surcharge();
    cost -= spell.recharge.discount();
    cost.max(1)
}

fn effect_surcharge(effect: &PrimaryEffect) -> i32 {
    match effect {
        PrimaryEffect::Damage(damage) => {
            let mut surcharge = 0;
            if let SpellDelivery::AttackRoll { range } = &damage.delivery {
                surcharge += range.surcharge();
            }
            if let Some(area) = &damage.area {
                surcharge += 1 + area.surcharge();
            }
            if damage.secondary.is_some() {
                surcharge += 1;
            }
            surcharge
        }
        PrimaryEffect::Defense(defense) => match defense {
            crate::entities::DefenseEffect::ArmorBonus { bonus } => {
                // ceil((bonus - 2) / 2), never negative
                ((i32::from(*bonus) - 2).max(0) + 1) / 2
            }
            crate::entities::DefenseEffect::ConditionImmunity { .. } => 2,
        },
        PrimaryEffect::Healing { dice } => (i32::from(*dice) - 1).max(0),
        PrimaryEffect::Movement(_) => 1,
        PrimaryEffect::Control { .. } => 0,
    }
}
