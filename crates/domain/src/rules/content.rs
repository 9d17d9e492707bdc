//! Static reference data
//!
//! Read-only lookup tables the builder offers the user: armor values,
//! weapon and natural-weapon templates, and the damage dice suggested for
//! a given challenge rating. No logic lives here beyond table lookups.

use crate::entities::{AttackAbility, AttackProfile, AttackReach};
use crate::value_objects::{ChallengeRating, DamageType, DiceFormula};

/// How much of the wearer's Dexterity modifier an armor admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DexBonus {
    Full,
    Capped(i32),
    None,
}

/// A row of the armor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Armor {
    pub name: &'static str,
    pub base_ac: i32,
    pub dex: DexBonus,
}

impl Armor {
    /// Armor class granted to a wearer with the given Dexterity modifier.
    pub fn armor_class(&self, dex_mod: i32) -> i32 {
        match self.dex {
            DexBonus::Full => self.base_ac + dex_mod,
            DexBonus::Capped(cap) => self.base_ac + dex_mod.min(cap),
            DexBonus::None => self.base_ac,
        }
    }
}

/// The armor table offered by the defense step.
pub const ARMORS: [Armor; 13] = [
    Armor { name: "Natural armor", base_ac: 13, dex: DexBonus::Full },
    Armor { name: "Padded", base_ac: 11, dex: DexBonus::Full },
    Armor { name: "Leather", base_ac: 11, dex: DexBonus::Full },
    Armor { name: "Studded leather", base_ac: 12, dex: DexBonus::Full },
    Armor { name: "Hide", base_ac: 12, dex: DexBonus::Capped(2) },
    Armor { name: "Chain shirt", base_ac: 13, dex: DexBonus::Capped(2) },
    Armor { name: "Scale mail", base_ac: 14, dex: DexBonus::Capped(2) },
    Armor { name: "Breastplate", base_ac: 14, dex: DexBonus::Capped(2) },
    Armor { name: "Half plate", base_ac: 15, dex: DexBonus::Capped(2) },
    Armor { name: "Ring mail", base_ac: 14, dex: DexBonus::None },
    Armor { name: "Chain mail", base_ac: 16, dex: DexBonus::None },
    Armor { name: "Splint", base_ac: 17, dex: DexBonus::None },
    Armor { name: "Plate", base_ac: 18, dex: DexBonus::None },
];

/// Look up an armor row by name, case-insensitively.
pub fn armor_by_name(name: &str) -> Option<&'static Armor> {
    ARMORS
        .iter()
        .find(|armor| armor.name.eq_ignore_ascii_case(name.trim()))
}

/// A weapon or natural-weapon template the action step offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponTemplate {
    pub name: &'static str,
    pub dice_count: u8,
    pub die_size: u8,
    pub damage_type: DamageType,
    pub reach: AttackReach,
    pub uses: AttackAbility,
}

impl WeaponTemplate {
    /// Turn the template into an attack configuration ready for editing.
    pub fn attack_profile(&self) -> AttackProfile {
        let dice = DiceFormula {
            dice_count: self.dice_count,
            die_size: self.die_size,
            modifier: 0,
        };
        AttackProfile::new(self.reach, dice, self.damage_type, self.uses)
    }
}

const MELEE: AttackReach = AttackReach::Melee;

/// The weapon table offered by the action step.
pub const WEAPONS: [WeaponTemplate; 14] = [
    WeaponTemplate { name: "Bite", dice_count: 1, die_size: 6, damage_type: DamageType::Piercing, reach: MELEE, uses: AttackAbility::Strength },
    WeaponTemplate { name: "Claw", dice_count: 1, die_size: 4, damage_type: DamageType::Slashing, reach: MELEE, uses: AttackAbility::Dexterity },
    WeaponTemplate { name: "Slam", dice_count: 1, die_size: 4, damage_type: DamageType::Bludgeoning, reach: MELEE, uses: AttackAbility::Strength },
    WeaponTemplate { name: "Club", dice_count: 1, die_size: 4, damage_type: DamageType::Bludgeoning, reach: MELEE, uses: AttackAbility::Strength },
    WeaponTemplate { name: "Dagger", dice_count: 1, die_size: 4, damage_type: DamageType::Piercing, reach: MELEE, uses: AttackAbility::Dexterity },
    WeaponTemplate { name: "Mace", dice_count: 1, die_size: 6, damage_type: DamageType::Bludgeoning, reach: MELEE, uses: AttackAbility::Strength },
    WeaponTemplate { name: "Spear", dice_count: 1, die_size: 6, damage_type: DamageType::Piercing, reach: MELEE, uses: AttackAbility::Strength },
    WeaponTemplate { name: "Shortsword", dice_count: 1, die_size: 6, damage_type: DamageType::Piercing, reach: MELEE, uses: AttackAbility::Dexterity },
    WeaponTemplate { name: "Longsword", dice_count: 1, die_size: 8, damage_type: DamageType::Slashing, reach: MELEE, uses: AttackAbility::Strength },
    WeaponTemplate { name: "Greatsword", dice_count: 2, die_size: 6, damage_type: DamageType::Slashing, reach: MELEE, uses: AttackAbility::Strength },
    WeaponTemplate { name: "Greataxe", dice_count: 1, die_size: 12, damage_type: DamageType::Slashing, reach: MELEE, uses: AttackAbility::Strength },
    WeaponTemplate { name: "Shortbow", dice_count: 1, die_size: 6, damage_type: DamageType::Piercing, reach: AttackReach::Ranged { range_ft: 80 }, uses: AttackAbility::Dexterity },
    WeaponTemplate { name: "Longbow", dice_count: 1, die_size: 8, damage_type: DamageType::Piercing, reach: AttackReach::Ranged { range_ft: 150 }, uses: AttackAbility::Dexterity },
    WeaponTemplate { name: "Light crossbow", dice_count: 1, die_size: 8, damage_type: DamageType::Piercing, reach: AttackReach::Ranged { range_ft: 80 }, uses: AttackAbility::Dexterity },
];

/// Look up a weapon template by name, case-insensitively.
pub fn weapon_by_name(name: &str) -> Option<&'static WeaponTemplate> {
    WEAPONS
        .iter()
        .find(|weapon| weapon.name.eq_ignore_ascii_case(name.trim()))
}

/// Damage dice suggested for a single attack at the given rating: one d6
/// per point of challenge rating (minimum one), plus the proficiency bonus.
/// CR 0 drops to a d4 to keep the weakest creatures below CR 1 output.
pub fn suggested_damage(cr: ChallengeRating) -> DiceFormula {
    let (dice_count, die_size) = match cr.rating() {
        0 => (1, 4),
        rating => (rating, 6),
    };
    DiceFormula {
        dice_count,
        die_size,
        modifier: cr.proficiency_bonus(),
    }
}
