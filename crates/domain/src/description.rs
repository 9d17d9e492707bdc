//! Deterministic rule-text generation
//!
//! Turns a feature's structured configuration into its display string. Two
//! features with identical configuration produce byte-identical text, and
//! the text is recomputed on every read - nothing here is cached on the
//! feature, so edits can never leave a stale description behind.

use std::fmt::Write as _;

use crate::entities::{
    AttackProfile, AttackReach, DefenseEffect, Feature, FeatureKind, GrantKind, MovementBoost,
    PrimaryEffect, SecondaryEffect, SpellDelivery, SpellEffect, SpellSecondary,
    SpellcastingGrant,
};
use crate::value_objects::SpellDuration;

/// Display text for a feature. Template-driven facets are rendered from
/// their configuration; anything else falls back to the stored text.
pub fn feature_text(creature_name: &str, feature: &Feature) -> String {
    let generated = match feature.kind() {
        FeatureKind::Attack(attack) => Some(attack_text(attack)),
        FeatureKind::Multiattack(multiattack) => {
            Some(multiattack_text(creature_name, multiattack.attacks()))
        }
        FeatureKind::Spell(spell) => Some(spell_text(spell)),
        FeatureKind::Spellcasting(grant) => Some(spellcasting_text(grant)),
        FeatureKind::Grant(grant) => Some(grant_text(grant)),
        FeatureKind::Text => None,
    };
    match generated {
        Some(mut text) => {
            // Free-text addendum after the generated clause
            if let Some(addendum) = feature.text() {
                let _ = write!(text, " {addendum}");
            }
            text
        }
        None => feature.text().unwrap_or_default().to_string(),
    }
}

/// Attack line: `{Melee|Ranged} Weapon Attack - {dice}{+STR|+DEX} {type}`.
///
/// Doubled damage doubles the dice count and the modifier symbol, never
/// the die size.
pub fn attack_text(attack: &AttackProfile) -> String {
    let reach = match attack.reach {
        AttackReach::Melee => "Melee",
        AttackReach::Ranged { .. } => "Ranged",
    };
    let dice = if attack.double_damage {
        attack.dice.doubled()
    } else {
        attack.dice
    };
    let modifier = if attack.double_damage {
        format!("+2x{}", attack.uses.symbol())
    } else {
        format!("+{}", attack.uses.symbol())
    };
    let mut text = format!(
        "{reach} Weapon Attack - {dice}{modifier} {damage}",
        damage = attack.damage_type,
    );
    match &attack.secondary {
        Some(SecondaryEffect::Damage { dice, damage_type }) => {
            let _ = write!(text, " plus {dice} {damage_type} damage");
        }
        Some(SecondaryEffect::Condition { text: rider, .. }) => {
            let _ = write!(text, ". {rider}");
        }
        None => {}
    }
    text
}

/// Multiattack line: `{name} attacks twice per round.`
pub fn multiattack_text(creature_name: &str, attacks: u8) -> String {
    let count = match attacks {
        2 => "twice",
        3 => "three times",
        _ => "four times",
    };
    format!("{creature_name} attacks {count} per round.")
}

/// Spellcasting grant line, listing the at-will spells.
pub fn spellcasting_text(grant: &SpellcastingGrant) -> String {
    let mut text = format!(
        "The creature is a level {} spellcaster. Its spellcasting ability is {}.",
        grant.caster_level, grant.ability,
    );
    if !grant.at_will_spells.is_empty() {
        let _ = write!(
            text,
            " It can cast the following spells at will: {}.",
            grant.at_will_spells.join(", ")
        );
    }
    text
}

/// Rule text for a passive grant.
pub fn grant_text(grant: &GrantKind) -> String {
    match grant {
        GrantKind::SkillExpertise { skill } => format!(
            "The creature's proficiency bonus is doubled for {skill} checks."
        ),
        GrantKind::Sense { sense } => format!("The creature gains {sense}."),
        GrantKind::DamageResistance { damage_type } => {
            format!("The creature is resistant to {damage_type} damage.")
        }
        GrantKind::DamageImmunity { damage_type } => {
            format!("The creature is immune to {damage_type} damage.")
        }
        GrantKind::ConditionImmunity { condition } => {
            format!("The creature is immune to the {condition} condition.")
        }
    }
}

/// Rule text for an action-economy spell.
pub fn spell_text(spell: &SpellEffect) -> String {
    let mut text = match &spell.effect {
        PrimaryEffect::Damage(damage) => {
            let mut text = match &damage.delivery {
                SpellDelivery::AttackRoll { range } => format!(
                    "The creature makes a spell attack against a target within {} feet. \
                     On a hit, ",
                    range.feet()
                ),
                SpellDelivery::SavingThrow { save, .. } => {
                    let mut text =
                        format!("The target must make a {save} saving throw. ");
                    if let Some(area) = &damage.area {
                        let _ = write!(text, "All creatures in a {area} are affected. ");
                    }
                    text.push_str("On a failed save, ");
                    text
                }
            };
            let _ = write!(
                text,
                "the target takes {} {} damage",
                damage.dice, damage.damage_type
            );
            if let SpellDelivery::SavingThrow {
                half_on_success: true,
                ..
            } = &damage.delivery
            {
                text.push_str(" or half as much on a successful save");
            }
            match &damage.secondary {
                Some(SpellSecondary::Damage { dice, damage_type }) => {
                    let _ = write!(text, " plus {dice} {damage_type} damage");
                }
                Some(SpellSecondary::Condition { condition }) => {
                    let _ = write!(text, " and suffers the {condition} condition");
                }
                None | Some(SpellSecondary::Other { .. }) => {}
            }
            text.push('.');
            if let Some(SpellSecondary::Other { text: rider }) = &damage.secondary {
                let _ = write!(text, " {rider}");
            }
            text
        }
        PrimaryEffect::Defense(defense) => match defense {
            DefenseEffect::ArmorBonus { bonus } => {
                format!("The creature gains a +{bonus} bonus to its armor class.")
            }
            DefenseEffect::ConditionImmunity { condition } => {
                format!("The creature is immune to the {condition} condition.")
            }
        },
        PrimaryEffect::Healing { dice } => {
            format!("The creature regains {dice}d8 hit points.")
        }
        PrimaryEffect::Movement(boost) => match boost {
            MovementBoost::Gain {
                movement,
                speed_ft,
            } => format!(
                "The creature gains a {} speed of {speed_ft} feet.",
                movement.name().to_ascii_lowercase()
            ),
            MovementBoost::Double { movement } => format!(
                "The creature's {} speed is doubled.",
                movement.name().to_ascii_lowercase()
            ),
        },
        PrimaryEffect::Control { save, condition } => {
            format!("The target must make a {save} saving throw or be {condition}.")
        }
    };
    if !spell.duration.is_instantaneous() {
        let _ = write!(text, " {}", duration_sentence(spell.duration));
    }
    text
}

fn duration_sentence(duration: SpellDuration) -> String {
    format!("The effect lasts for {duration}.")
}
