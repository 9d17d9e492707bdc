//! JSON import/export for the creature record
//!
//! Export is the serde representation verbatim. Import is deliberately
//! lax: the only requirement is a non-empty `name` field - anything else
//! missing takes the record defaults, matching the builder's "load what
//! you can" contract.

use beastbldr_domain::Creature;
use tracing::debug;

use crate::error::CodecError;

/// Serialize a creature record to pretty-printed JSON.
pub fn to_json(creature: &Creature) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(creature)?)
}

/// Deserialize a creature record from JSON.
///
/// The object must carry a non-empty `name`; every other field is
/// optional and defaults when absent. No further schema validation is
/// performed - budgets may come back over-spent, and the aggregate's
/// mutations refuse to spend further until the user brings the record
/// back under its caps.
pub fn from_json(input: &str) -> Result<Creature, CodecError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    let has_name = value
        .get("name")
        .and_then(|name| name.as_str())
        .is_some_and(|name| !name.trim().is_empty());
    if !has_name {
        return Err(CodecError::MissingName);
    }
    let creature: Creature = serde_json::from_value(value)?;
    debug!(name = creature.name(), "imported creature record");
    Ok(creature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use beastbldr_domain::{Ability, ChallengeRating, FeatureCategory, FeatureSpec, Skill};

    #[test]
    fn round_trips_a_full_record() {
        let mut creature = Creature::new("Gloom Adder");
        creature.set_challenge_rating(ChallengeRating::new(4).expect("valid rating"));
        creature.set_ability_score(Ability::Dexterity, 16).expect("in budget");
        creature.add_skill(Skill::Stealth).expect("accepted");
        creature
            .add_feature(FeatureSpec::text_feature(
                "Bite",
                FeatureCategory::Action,
                "Venomous.",
            ))
            .expect("accepted");

        let json = to_json(&creature).expect("serializes");
        let restored = from_json(&json).expect("deserializes");
        assert_eq!(restored, creature);
    }

    #[test]
    fn name_is_the_only_required_field() {
        let restored = from_json(r#"{"name": "Minimal"}"#).expect("imports");
        assert_eq!(restored.name(), "Minimal");
        assert_eq!(restored.challenge().rating(), 1);

        assert!(matches!(
            from_json(r#"{"armorClass": 15}"#).expect_err("no name"),
            CodecError::MissingName
        ));
        assert!(matches!(
            from_json(r#"{"name": "  "}"#).expect_err("blank name"),
            CodecError::MissingName
        ));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(
            from_json("{not json").expect_err("malformed"),
            CodecError::Json(_)
        ));
    }
}
