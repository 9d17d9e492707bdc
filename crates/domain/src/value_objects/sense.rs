//! Special senses

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A special sense a creature may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SenseType {
    Darkvision,
    Blindsight,
    Tremorsense,
    Truesight,
}

impl SenseType {
    pub const ALL: [SenseType; 4] = [
        SenseType::Darkvision,
        SenseType::Blindsight,
        SenseType::Tremorsense,
        SenseType::Truesight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SenseType::Darkvision => "Darkvision",
            SenseType::Blindsight => "Blindsight",
            SenseType::Tremorsense => "Tremorsense",
            SenseType::Truesight => "Truesight",
        }
    }
}

impl fmt::Display for SenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SenseType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        SenseType::ALL
            .into_iter()
            .find(|sense| sense.name().to_ascii_lowercase() == needle)
            .ok_or_else(|| DomainError::parse(format!("Unknown sense: '{needle}'")))
    }
}

/// A sense with its range, e.g. Darkvision (60 feet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sense {
    pub kind: SenseType,
    pub range_ft: u32,
}

impl Sense {
    pub fn new(kind: SenseType, range_ft: u32) -> Self {
        Self { kind, range_ft }
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} feet)", self.kind, self.range_ft)
    }
}
