//! Movement types and the per-creature speed set
//!
//! A creature has exactly one slot per movement type; a value of 0 means
//! "does not have this movement". The rules for gaining, increasing, and
//! removing movement live on the creature aggregate - this module only
//! holds the data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A way a creature can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MovementType {
    Walk,
    Fly,
    Swim,
    Climb,
    Burrow,
}

impl MovementType {
    /// All movement types, in display order (Walk always first).
    pub const ALL: [MovementType; 5] = [
        MovementType::Walk,
        MovementType::Fly,
        MovementType::Swim,
        MovementType::Climb,
        MovementType::Burrow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MovementType::Walk => "Walk",
            MovementType::Fly => "Fly",
            MovementType::Swim => "Swim",
            MovementType::Climb => "Climb",
            MovementType::Burrow => "Burrow",
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MovementType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walk" => Ok(MovementType::Walk),
            "fly" => Ok(MovementType::Fly),
            "swim" => Ok(MovementType::Swim),
            "climb" => Ok(MovementType::Climb),
            "burrow" => Ok(MovementType::Burrow),
            other => Err(DomainError::parse(format!("Unknown movement: '{other}'"))),
        }
    }
}

/// Speeds for every movement type, in feet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementSet {
    walk: u32,
    fly: u32,
    swim: u32,
    climb: u32,
    burrow: u32,
}

impl MovementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, movement: MovementType) -> u32 {
        match movement {
            MovementType::Walk => self.walk,
            MovementType::Fly => self.fly,
            MovementType::Swim => self.swim,
            MovementType::Climb => self.climb,
            MovementType::Burrow => self.burrow,
        }
    }

    pub fn set(&mut self, movement: MovementType, speed_ft: u32) {
        match movement {
            MovementType::Walk => self.walk = speed_ft,
            MovementType::Fly => self.fly = speed_ft,
            MovementType::Swim => self.swim = speed_ft,
            MovementType::Climb => self.climb = speed_ft,
            MovementType::Burrow => self.burrow = speed_ft,
        }
    }

    pub fn with(mut self, movement: MovementType, speed_ft: u32) -> Self {
        self.set(movement, speed_ft);
        self
    }

    /// Movement types the creature actually has, in display order.
    pub fn active(&self) -> impl Iterator<Item = (MovementType, u32)> + '_ {
        MovementType::ALL
            .into_iter()
            .map(|m| (m, self.get(m)))
            .filter(|&(_, speed)| speed > 0)
    }

    /// True when `movement` is the only nonzero entry.
    pub fn is_only_movement(&self, movement: MovementType) -> bool {
        self.get(movement) > 0 && self.active().all(|(m, _)| m == movement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_lists_walk_first() {
        let set = MovementSet::new()
            .with(MovementType::Fly, 60)
            .with(MovementType::Walk, 30);
        let active: Vec<_> = set.active().collect();
        assert_eq!(
            active,
            vec![(MovementType::Walk, 30), (MovementType::Fly, 60)]
        );
    }

    #[test]
    fn zero_means_absent() {
        let set = MovementSet::new().with(MovementType::Walk, 30);
        assert_eq!(set.active().count(), 1);
        assert!(set.is_only_movement(MovementType::Walk));

        let set = set.with(MovementType::Swim, 20);
        assert!(!set.is_only_movement(MovementType::Walk));
    }
}
