//! Dice notation value object
//!
//! Supports formulas like "2d6+3", "1d8", "d4", "7d8-2". The domain never
//! rolls dice - formulas are data carried by attacks, spells, and the
//! hit-point line, and the only arithmetic on them is deterministic
//! (doubling, averaging).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A parsed dice formula like "2d6+3".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceFormula {
    /// Number of dice to roll (X in XdY)
    pub dice_count: u8,
    /// Size of each die (Y in XdY)
    pub die_size: u8,
    /// Flat modifier added after the roll (+Z or -Z)
    pub modifier: i32,
}

impl DiceFormula {
    /// Create a new dice formula.
    pub fn new(dice_count: u8, die_size: u8, modifier: i32) -> Result<Self, DomainError> {
        if dice_count == 0 {
            return Err(DomainError::parse("Dice count must be at least 1"));
        }
        if die_size < 2 {
            return Err(DomainError::parse("Die size must be at least 2"));
        }
        Ok(Self {
            dice_count,
            die_size,
            modifier,
        })
    }

    /// Shorthand for a formula with no flat modifier.
    pub fn plain(dice_count: u8, die_size: u8) -> Result<Self, DomainError> {
        Self::new(dice_count, die_size, 0)
    }

    /// Doubled damage: twice the dice count and twice the modifier.
    ///
    /// The die size never changes - "1d8+2" doubles to "2d8+4", not "1d16+2".
    pub fn doubled(&self) -> Self {
        Self {
            dice_count: self.dice_count.saturating_mul(2),
            die_size: self.die_size,
            modifier: self.modifier.saturating_mul(2),
        }
    }

    /// Average result, rounded down. Used for informational hit-point math.
    pub fn average(&self) -> i32 {
        i32::from(self.dice_count) * (i32::from(self.die_size) + 1) / 2 + self.modifier
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.dice_count, self.die_size)?;
        match self.modifier.cmp(&0) {
            std::cmp::Ordering::Greater => write!(f, "+{}", self.modifier),
            std::cmp::Ordering::Less => write!(f, "{}", self.modifier),
            std::cmp::Ordering::Equal => Ok(()),
        }
    }
}

impl FromStr for DiceFormula {
    type Err = DomainError;

    /// Parse "XdY", "XdY+Z", "XdY-Z", or "dY" (implicit count of 1).
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim().to_ascii_lowercase();
        if input.is_empty() {
            return Err(DomainError::parse("Empty dice formula"));
        }

        let d_pos = input
            .find('d')
            .ok_or_else(|| DomainError::parse(format!("Missing 'd' in '{input}'")))?;

        let count_str = &input[..d_pos];
        let dice_count: u8 = if count_str.is_empty() {
            1
        } else {
            count_str
                .parse()
                .map_err(|_| DomainError::parse(format!("Invalid dice count: '{count_str}'")))?
        };

        let after_d = &input[d_pos + 1..];
        let (size_str, modifier) = match after_d.find(['+', '-']) {
            Some(0) => {
                return Err(DomainError::parse(format!("Invalid die size: '{after_d}'")));
            }
            Some(sign_pos) => {
                let modifier: i32 = after_d[sign_pos..]
                    .parse()
                    .map_err(|_| {
                        DomainError::parse(format!("Invalid modifier: '{}'", &after_d[sign_pos..]))
                    })?;
                (&after_d[..sign_pos], modifier)
            }
            None => (after_d, 0),
        };

        let die_size: u8 = size_str
            .parse()
            .map_err(|_| DomainError::parse(format!("Invalid die size: '{size_str}'")))?;

        Self::new(dice_count, die_size, modifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_formula() {
        let dice: DiceFormula = "2d6+3".parse().expect("parses");
        assert_eq!(dice.dice_count, 2);
        assert_eq!(dice.die_size, 6);
        assert_eq!(dice.modifier, 3);
    }

    #[test]
    fn parses_negative_modifier_and_shorthand() {
        let dice: DiceFormula = "2d6-1".parse().expect("parses");
        assert_eq!(dice.modifier, -1);

        let dice: DiceFormula = "d20".parse().expect("parses");
        assert_eq!(dice.dice_count, 1);
        assert_eq!(dice.die_size, 20);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("".parse::<DiceFormula>().is_err());
        assert!("abc".parse::<DiceFormula>().is_err());
        assert!("0d6".parse::<DiceFormula>().is_err());
        assert!("1d1".parse::<DiceFormula>().is_err());
        assert!("d-4".parse::<DiceFormula>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for text in ["2d6+3", "1d8", "3d10-2"] {
            let dice: DiceFormula = text.parse().expect("parses");
            assert_eq!(dice.to_string(), text);
        }
    }

    #[test]
    fn doubling_doubles_count_and_modifier_only() {
        let dice: DiceFormula = "1d8+2".parse().expect("parses");
        let doubled = dice.doubled();
        assert_eq!(doubled.to_string(), "2d8+4");
        assert_eq!(doubled.die_size, 8);
    }

    #[test]
    fn average_rounds_down() {
        let dice: DiceFormula = "7d8+14".parse().expect("parses");
        // 7 * 4.5 = 31.5, floored to 31, plus 14
        assert_eq!(dice.average(), 45);

        let dice: DiceFormula = "1d6".parse().expect("parses");
        assert_eq!(dice.average(), 3);
    }
}
