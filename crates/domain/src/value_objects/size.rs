//! Creature size categories

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Size category of a creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Size {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
    Gargantuan,
}

impl Size {
    pub const ALL: [Size; 6] = [
        Size::Tiny,
        Size::Small,
        Size::Medium,
        Size::Large,
        Size::Huge,
        Size::Gargantuan,
    ];

    /// Default speed, in feet, for a newly gained movement type.
    pub fn default_speed(&self) -> u32 {
        match self {
            Size::Tiny => 20,
            Size::Small => 25,
            Size::Medium => 30,
            Size::Large => 40,
            Size::Huge => 50,
            Size::Gargantuan => 60,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Size::Tiny => "Tiny",
            Size::Small => "Small",
            Size::Medium => "Medium",
            Size::Large => "Large",
            Size::Huge => "Huge",
            Size::Gargantuan => "Gargantuan",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Size {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tiny" => Ok(Size::Tiny),
            "small" => Ok(Size::Small),
            "medium" => Ok(Size::Medium),
            "large" => Ok(Size::Large),
            "huge" => Ok(Size::Huge),
            "gargantuan" => Ok(Size::Gargantuan),
            other => Err(DomainError::parse(format!("Unknown size: '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_speeds_grow_with_size() {
        let mut last = 0;
        for size in Size::ALL {
            assert!(size.default_speed() > last);
            last = size.default_speed();
        }
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("HUGE".parse::<Size>().expect("parses"), Size::Huge);
        assert!("colossal".parse::<Size>().is_err());
    }
}
