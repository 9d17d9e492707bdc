//! Ability scores and the point accounting behind them
//!
//! Scores live in [4, 20] with a base value of 10. Raising a score above 10
//! consumes attribute points; lowering one below 10 refunds them, so the
//! spent total is a plain signed sum over the six scores.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Lowest score a creature may have in any ability.
pub const SCORE_MIN: i32 = 4;
/// Highest score a creature may have in any ability.
pub const SCORE_MAX: i32 = 20;
/// The score that costs (and refunds) nothing.
pub const SCORE_BASE: i32 = 10;

/// One of the six abilities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// All six abilities, in statblock order.
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Three-letter abbreviation used in statblock tables (e.g. "STR").
    pub fn abbrev(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    /// Full ability name (e.g. "Strength").
    pub fn long_name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

impl FromStr for Ability {
    type Err = DomainError;

    /// Accepts the full name or the three-letter abbreviation, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "str" | "strength" => Ok(Ability::Strength),
            "dex" | "dexterity" => Ok(Ability::Dexterity),
            "con" | "constitution" => Ok(Ability::Constitution),
            "int" | "intelligence" => Ok(Ability::Intelligence),
            "wis" | "wisdom" => Ok(Ability::Wisdom),
            "cha" | "charisma" => Ok(Ability::Charisma),
            other => Err(DomainError::parse(format!("Unknown ability: '{other}'"))),
        }
    }
}

/// Ability modifier for a raw score: floor((score - 10) / 2).
///
/// Rust's `/` rounds toward zero, so negative differences need the
/// floor-division correction.
pub fn score_modifier(score: i32) -> i32 {
    let diff = score - SCORE_BASE;
    if diff >= 0 {
        diff / 2
    } else {
        (diff - 1) / 2
    }
}

/// The six ability scores of a creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityScores {
    strength: i32,
    dexterity: i32,
    constitution: i32,
    intelligence: i32,
    wisdom: i32,
    charisma: i32,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            strength: SCORE_BASE,
            dexterity: SCORE_BASE,
            constitution: SCORE_BASE,
            intelligence: SCORE_BASE,
            wisdom: SCORE_BASE,
            charisma: SCORE_BASE,
        }
    }
}

impl AbilityScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the raw score for an ability.
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    /// Set the raw score for an ability. Scores outside [4, 20] are rejected.
    pub fn set(&mut self, ability: Ability, score: i32) -> Result<(), DomainError> {
        if !(SCORE_MIN..=SCORE_MAX).contains(&score) {
            return Err(DomainError::validation(format!(
                "{ability} score must be between {SCORE_MIN} and {SCORE_MAX}, got {score}"
            )));
        }
        let slot = match ability {
            Ability::Strength => &mut self.strength,
            Ability::Dexterity => &mut self.dexterity,
            Ability::Constitution => &mut self.constitution,
            Ability::Intelligence => &mut self.intelligence,
            Ability::Wisdom => &mut self.wisdom,
            Ability::Charisma => &mut self.charisma,
        };
        *slot = score;
        Ok(())
    }

    /// Builder-style score assignment, for fixtures and hydration.
    pub fn with(mut self, ability: Ability, score: i32) -> Result<Self, DomainError> {
        self.set(ability, score)?;
        Ok(self)
    }

    /// Ability modifier for an ability.
    pub fn modifier(&self, ability: Ability) -> i32 {
        score_modifier(self.get(ability))
    }

    /// Attribute points consumed by the current scores: sum of (score - 10).
    ///
    /// Not clamped per ability. A score below 10 refunds points, which keeps
    /// the accounting linear and reversible.
    pub fn points_spent(&self) -> i32 {
        Ability::ALL
            .iter()
            .map(|&a| self.get(a) - SCORE_BASE)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_uses_floor_division() {
        assert_eq!(score_modifier(10), 0);
        assert_eq!(score_modifier(11), 0);
        assert_eq!(score_modifier(12), 1);
        assert_eq!(score_modifier(20), 5);
        assert_eq!(score_modifier(9), -1);
        assert_eq!(score_modifier(8), -1);
        assert_eq!(score_modifier(7), -2);
        assert_eq!(score_modifier(4), -3);
    }

    #[test]
    fn default_scores_spend_nothing() {
        assert_eq!(AbilityScores::default().points_spent(), 0);
    }

    #[test]
    fn spent_points_are_linear_and_reversible() {
        let mut scores = AbilityScores::new();
        scores.set(Ability::Strength, 14).expect("valid score");
        scores.set(Ability::Intelligence, 6).expect("valid score");
        // +4 and -4 cancel out
        assert_eq!(scores.points_spent(), 0);

        scores.set(Ability::Charisma, 13).expect("valid score");
        assert_eq!(scores.points_spent(), 3);
    }

    #[test]
    fn sub_base_scores_refund_points() {
        let mut scores = AbilityScores::new();
        scores.set(Ability::Wisdom, 8).expect("valid score");
        assert_eq!(scores.points_spent(), -2);
    }

    #[test]
    fn out_of_range_scores_are_rejected() {
        let mut scores = AbilityScores::new();
        assert!(scores.set(Ability::Strength, 3).is_err());
        assert!(scores.set(Ability::Strength, 21).is_err());
        assert_eq!(scores.get(Ability::Strength), SCORE_BASE);
    }

    #[test]
    fn ability_parses_names_and_abbreviations() {
        assert_eq!("DEX".parse::<Ability>().expect("parses"), Ability::Dexterity);
        assert_eq!(
            "wisdom".parse::<Ability>().expect("parses"),
            Ability::Wisdom
        );
        assert!("luck".parse::<Ability>().is_err());
    }
}
