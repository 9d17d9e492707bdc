//! Value objects for the creature domain
//!
//! Small immutable types with validation at construction. Everything here
//! is serde-friendly and free of side effects.

mod ability;
mod challenge;
mod condition;
mod damage;
mod dice;
mod movement;
mod sense;
mod size;
mod skill;
mod spellcasting;

pub use ability::{
    score_modifier, Ability, AbilityScores, SCORE_BASE, SCORE_MAX, SCORE_MIN,
};
pub use challenge::{ChallengeRating, CR_MAX};
pub use condition::Condition;
pub use damage::DamageType;
pub use dice::DiceFormula;
pub use movement::{MovementSet, MovementType};
pub use sense::{Sense, SenseType};
pub use size::Size;
pub use skill::Skill;
pub use spellcasting::{AreaSize, Recharge, SpellCastingTime, SpellDuration, SpellRange};
