//! Budget engine - every point pool derived from challenge rating
//!
//! Pure functions only. These are called repeatedly as the user edits the
//! record, so they are total: absent inputs (no spellcasting, no bonus
//! grants) behave as zero and nothing here can fail.

use serde::{Deserialize, Serialize};

use crate::value_objects::ChallengeRating;

/// Attribute points available at a given challenge rating.
pub fn attribute_point_budget(cr: ChallengeRating) -> i32 {
    match cr.rating() {
        0..=1 => 10,
        2..=5 => 20,
        6..=8 => 25,
        9..=12 => 30,
        13..=15 => 35,
        _ => 40,
    }
}

/// Feature points available at a given challenge rating.
pub fn total_feature_points(cr: ChallengeRating) -> i32 {
    i32::from(cr.rating()) + cr.proficiency_bonus()
}

/// Number of saving-throw proficiencies allowed: half the proficiency
/// bonus, extended by any granted bonus slots.
pub fn saving_throw_cap(cr: ChallengeRating, bonus_slots: i32) -> i32 {
    cr.proficiency_bonus() / 2 + bonus_slots.max(0)
}

/// Number of skill proficiencies allowed: the full proficiency bonus.
pub fn skill_cap(cr: ChallengeRating) -> i32 {
    cr.proficiency_bonus()
}

/// Magic points in the pool for a caster level; `None` (no spellcasting)
/// means an empty pool.
pub fn magic_point_pool(caster_level: Option<u8>) -> i32 {
    caster_level.map_or(0, |level| 2 * i32::from(level))
}

/// A single point pool: how much exists and how much is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub total: i32,
    pub spent: i32,
}

impl Pool {
    pub fn new(total: i32, spent: i32) -> Self {
        Self { total, spent }
    }

    /// Points still available. Can go negative after a challenge-rating
    /// drop or a lenient import; mutations refuse to spend from a negative
    /// pool, so it self-corrects as the user edits.
    pub fn available(&self) -> i32 {
        self.total - self.spent
    }
}

/// Snapshot of every pool, computed fresh from the record on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReport {
    pub attribute_points: Pool,
    pub feature_points: Pool,
    /// Zero-total until a spellcasting feature is added.
    pub magic_points: Pool,
    pub saving_throws: Pool,
    pub skills: Pool,
}
