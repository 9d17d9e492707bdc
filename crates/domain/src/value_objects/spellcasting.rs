//! Spell configuration vocabulary
//!
//! Casting time, duration, recharge, range, and area are all closed tiers;
//! each carries its magic-point surcharge (or discount) directly, so the
//! cost calculator is a straight sum over the chosen options.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How an action-economy spell is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpellCastingTime {
    Action,
    BonusAction,
    Reaction,
}

impl SpellCastingTime {
    /// Base magic-point cost before surcharges and discounts.
    pub fn base_cost(&self) -> i32 {
        match self {
            SpellCastingTime::Action => 2,
            SpellCastingTime::BonusAction | SpellCastingTime::Reaction => 3,
        }
    }
}

impl fmt::Display for SpellCastingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SpellCastingTime::Action => "action",
            SpellCastingTime::BonusAction => "bonus action",
            SpellCastingTime::Reaction => "reaction",
        })
    }
}

/// How long a spell effect lasts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpellDuration {
    #[default]
    Instantaneous,
    OneRound,
    OneMinute,
    TenMinutes,
    OneHour,
}

impl SpellDuration {
    /// Magic-point surcharge for a non-instantaneous duration.
    pub fn surcharge(&self) -> i32 {
        match self {
            SpellDuration::Instantaneous => 0,
            SpellDuration::OneRound => 1,
            SpellDuration::OneMinute => 2,
            SpellDuration::TenMinutes => 3,
            SpellDuration::OneHour => 4,
        }
    }

    pub fn is_instantaneous(&self) -> bool {
        matches!(self, SpellDuration::Instantaneous)
    }
}

impl fmt::Display for SpellDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SpellDuration::Instantaneous => "instantaneous",
            SpellDuration::OneRound => "1 round",
            SpellDuration::OneMinute => "1 minute",
            SpellDuration::TenMinutes => "10 minutes",
            SpellDuration::OneHour => "1 hour",
        })
    }
}

/// Probabilistic reuse limiter on a feature. At the start of the creature's
/// turn a d6 decides whether the feature is available again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Recharge {
    #[default]
    None,
    OnFourToSix,
    OnFiveToSix,
    OnSix,
}

impl Recharge {
    /// Magic-point discount earned by accepting the limiter.
    pub fn discount(&self) -> i32 {
        match self {
            Recharge::None => 0,
            Recharge::OnFourToSix => 1,
            Recharge::OnFiveToSix => 2,
            Recharge::OnSix => 3,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Recharge::None)
    }

    /// Display suffix for feature names, e.g. "Recharge 5-6".
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Recharge::None => None,
            Recharge::OnFourToSix => Some("Recharge 4-6"),
            Recharge::OnFiveToSix => Some("Recharge 5-6"),
            Recharge::OnSix => Some("Recharge 6"),
        }
    }
}

/// Range tier for spells delivered at a distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpellRange {
    #[default]
    Thirty,
    Sixty,
    OneHundredTwenty,
}

impl SpellRange {
    pub fn feet(&self) -> u32 {
        match self {
            SpellRange::Thirty => 30,
            SpellRange::Sixty => 60,
            SpellRange::OneHundredTwenty => 120,
        }
    }

    /// Magic-point surcharge for the longer tiers.
    pub fn surcharge(&self) -> i32 {
        match self {
            SpellRange::Thirty => 0,
            SpellRange::Sixty => 1,
            SpellRange::OneHundredTwenty => 2,
        }
    }
}

/// Area-of-effect size tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AreaSize {
    #[default]
    TenFoot,
    TwentyFoot,
    ThirtyFoot,
}

impl AreaSize {
    pub fn feet(&self) -> u32 {
        match self {
            AreaSize::TenFoot => 10,
            AreaSize::TwentyFoot => 20,
            AreaSize::ThirtyFoot => 30,
        }
    }

    /// Size surcharge on top of the flat area-of-effect surcharge.
    pub fn surcharge(&self) -> i32 {
        match self {
            AreaSize::TenFoot => 0,
            AreaSize::TwentyFoot => 1,
            AreaSize::ThirtyFoot => 2,
        }
    }
}

impl fmt::Display for AreaSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-foot radius", self.feet())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonus_actions_and_reactions_cost_more_than_actions() {
        assert_eq!(SpellCastingTime::Action.base_cost(), 2);
        assert_eq!(SpellCastingTime::BonusAction.base_cost(), 3);
        assert_eq!(SpellCastingTime::Reaction.base_cost(), 3);
    }

    #[test]
    fn rarer_recharges_discount_more() {
        assert_eq!(Recharge::None.discount(), 0);
        assert_eq!(Recharge::OnFourToSix.discount(), 1);
        assert_eq!(Recharge::OnFiveToSix.discount(), 2);
        assert_eq!(Recharge::OnSix.discount(), 3);
    }

    #[test]
    fn duration_surcharge_grows_with_duration() {
        let durations = [
            SpellDuration::Instantaneous,
            SpellDuration::OneRound,
            SpellDuration::OneMinute,
            SpellDuration::TenMinutes,
            SpellDuration::OneHour,
        ];
        for (i, d) in durations.iter().enumerate() {
            assert_eq!(d.surcharge(), i as i32);
        }
    }
}
