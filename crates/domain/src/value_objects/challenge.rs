//! Challenge rating and the derivations hanging off it

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Highest supported challenge rating.
pub const CR_MAX: u8 = 30;

/// XP award for each challenge rating. Index is the rating itself.
const XP_BY_CR: [i32; 31] = [
    10,     // CR 0
    200,    // CR 1
    450,    // CR 2
    700,    // CR 3
    1100,   // CR 4
    1800,   // CR 5
    2300,   // CR 6
    2900,   // CR 7
    3900,   // CR 8
    5000,   // CR 9
    5900,   // CR 10
    7200,   // CR 11
    8400,   // CR 12
    10000,  // CR 13
    11500,  // CR 14
    13000,  // CR 15
    15000,  // CR 16
    18000,  // CR 17
    20000,  // CR 18
    22000,  // CR 19
    25000,  // CR 20
    33000,  // CR 21
    41000,  // CR 22
    50000,  // CR 23
    62000,  // CR 24
    75000,  // CR 25
    90000,  // CR 26
    105000, // CR 27
    120000, // CR 28
    135000, // CR 29
    155000, // CR 30
];

/// Challenge rating of a creature, 0 through 30.
///
/// The canonical rules allow fractional ratings below 1; this system treats
/// the rating as integer-valued throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ChallengeRating(u8);

impl ChallengeRating {
    pub fn new(rating: u8) -> Result<Self, DomainError> {
        if rating > CR_MAX {
            return Err(DomainError::validation(format!(
                "Challenge rating must be at most {CR_MAX}, got {rating}"
            )));
        }
        Ok(Self(rating))
    }

    /// The raw rating.
    pub fn rating(&self) -> u8 {
        self.0
    }

    /// Proficiency bonus: floor((cr - 1) / 4) + 2, never below 2.
    pub fn proficiency_bonus(&self) -> i32 {
        ((i32::from(self.0) - 1).div_euclid(4) + 2).max(2)
    }

    /// XP award for a creature of this rating.
    pub fn xp(&self) -> i32 {
        XP_BY_CR[usize::from(self.0)]
    }

    /// Spellcaster level for a creature of this rating: cr + 1, clamped
    /// to [2, 20]. Drives the magic-point pool.
    pub fn caster_level(&self) -> u8 {
        (self.0 + 1).clamp(2, 20)
    }
}

impl Default for ChallengeRating {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for ChallengeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for ChallengeRating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChallengeRating> for u8 {
    fn from(value: ChallengeRating) -> Self {
        value.0
    }
}
