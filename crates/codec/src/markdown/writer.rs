//! Statblock generation
//!
//! Renders a creature record into the fenced `{{monster,frame,wide ... }}`
//! markdown block. Pure field interpolation; the parser in the sibling
//! module reads the same shape back.

use std::fmt::Write as _;

use beastbldr_domain::{Creature, Feature, FeatureCategory};

/// Serialize a creature record to its statblock markdown.
pub fn generate(creature: &Creature) -> String {
    let mut out = String::new();
    out.push_str("{{monster,frame,wide\n");
    let _ = writeln!(out, "## {}", creature.name());
    let _ = writeln!(
        out,
        "*{} {}, {}*",
        creature.size(),
        creature.creature_type(),
        creature.alignment()
    );
    out.push_str("___\n");

    match creature.armor_text() {
        Some(text) if !text.is_empty() => {
            let _ = writeln!(out, "**Armor Class** :: {} ({text})", creature.armor_class());
        }
        _ => {
            let _ = writeln!(out, "**Armor Class** :: {}", creature.armor_class());
        }
    }
    match creature.hit_point_formula() {
        Some(formula) if !formula.is_empty() => {
            let _ = writeln!(out, "**Hit Points** :: {} ({formula})", creature.hit_points());
        }
        _ => {
            let _ = writeln!(out, "**Hit Points** :: {}", creature.hit_points());
        }
    }
    let _ = writeln!(out, "**Speed** :: {}", speed_line(creature));
    out.push_str("___\n");

    ability_table(&mut out, creature);
    out.push_str("___\n");

    if !creature.saving_throws().is_empty() {
        let entries: Vec<String> = creature
            .saving_throws()
            .iter()
            .map(|&ability| {
                let bonus = creature.abilities().modifier(ability) + creature.proficiency_bonus();
                format!("{} {bonus:+}", ability.abbrev())
            })
            .collect();
        let _ = writeln!(out, "**Saving Throws** :: {}", entries.join(", "));
    }
    if !creature.skills().is_empty() {
        let entries: Vec<String> = creature
            .skills()
            .iter()
            .map(|&skill| {
                let proficiency = if creature.expertise().contains(&skill) {
                    2 * creature.proficiency_bonus()
                } else {
                    creature.proficiency_bonus()
                };
                let bonus = creature.abilities().modifier(skill.ability()) + proficiency;
                format!("{skill} {bonus:+}")
            })
            .collect();
        let _ = writeln!(out, "**Skills** :: {}", entries.join(", "));
    }
    let mut senses: Vec<String> = creature.senses().iter().map(|s| s.to_string()).collect();
    senses.push(format!("passive Perception {}", passive_perception(creature)));
    let _ = writeln!(out, "***Senses*** :: {}", senses.join(", "));
    if !creature.languages().is_empty() {
        let _ = writeln!(out, "**Languages** :: {}", creature.languages().join(", "));
    }
    let _ = writeln!(
        out,
        "**Challenge** :: {} ({} XP)",
        creature.challenge(),
        creature.challenge().xp()
    );
    out.push_str("___\n");

    // Abilities render bare; the action-economy categories get headers
    let abilities = feature_blocks(creature, FeatureCategory::Ability);
    if !abilities.is_empty() {
        let _ = writeln!(out, "{}", abilities.join("\n\n"));
    }
    for category in [
        FeatureCategory::Action,
        FeatureCategory::BonusAction,
        FeatureCategory::Reaction,
        FeatureCategory::Legendary,
    ] {
        let blocks = feature_blocks(creature, category);
        if blocks.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n### {}", category.heading());
        let _ = writeln!(out, "{}", blocks.join("\n\n"));
    }

    out.push_str("}}");
    out
}

fn passive_perception(creature: &Creature) -> i32 {
    use beastbldr_domain::{Ability, Skill};
    let mut passive = 10 + creature.abilities().modifier(Ability::Wisdom);
    if creature.expertise().contains(&Skill::Perception) {
        passive += 2 * creature.proficiency_bonus();
    } else if creature.skills().contains(&Skill::Perception) {
        passive += creature.proficiency_bonus();
    }
    passive
}

fn speed_line(creature: &Creature) -> String {
    let entries: Vec<String> = creature
        .movement()
        .active()
        .map(|(movement, speed)| format!("{speed} ft. ({movement})"))
        .collect();
    if entries.is_empty() {
        "0 ft. (Walk)".to_string()
    } else {
        entries.join(", ")
    }
}

fn ability_table(out: &mut String, creature: &Creature) {
    out.push_str("|STR|DEX|CON|INT|WIS|CHA|\n");
    out.push_str("|:---:|:---:|:---:|:---:|:---:|:---:|\n");
    out.push('|');
    for ability in beastbldr_domain::Ability::ALL {
        let score = creature.abilities().get(ability);
        let modifier = creature.abilities().modifier(ability);
        let _ = write!(out, "{score} ({modifier:+})|");
    }
    out.push('\n');
}

fn feature_blocks(creature: &Creature, category: FeatureCategory) -> Vec<String> {
    creature
        .features()
        .iter()
        .enumerate()
        .filter(|(_, f)| !f.is_hidden() && f.category() == category)
        .map(|(index, feature)| {
            let text = creature.feature_text(index).unwrap_or_default();
            format!("***{}.*** {text}", display_name(feature))
        })
        .collect()
}

fn display_name(feature: &Feature) -> String {
    match feature.recharge().label() {
        Some(label) => format!("{} ({label})", feature.name()),
        None => feature.name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beastbldr_domain::{
        Ability, ChallengeRating, FeatureSpec, Sense, SenseType, Size, Skill,
    };

    fn stalker() -> Creature {
        let mut creature = Creature::new("Mire Stalker");
        creature.set_challenge_rating(ChallengeRating::new(2).expect("valid rating"));
        creature.set_size(Size::Large);
        creature.set_creature_type("Monstrosity");
        creature.set_alignment("Neutral Evil");
        creature
            .set_armor(14, Some("natural armor".into()))
            .expect("valid armor");
        creature
            .set_hit_points(45, Some("7d8+14".into()))
            .expect("valid hit points");
        creature
            .abilities_mut()
            .set(Ability::Strength, 16)
            .expect("valid score");
        creature
            .abilities_mut()
            .set(Ability::Dexterity, 12)
            .expect("valid score");
        creature
            .abilities_mut()
            .set(Ability::Intelligence, 4)
            .expect("valid score");
        creature.add_saving_throw(Ability::Dexterity).expect("accepted");
        creature.add_skill(Skill::Stealth).expect("accepted");
        creature.add_sense(Sense::new(SenseType::Darkvision, 60));
        creature.add_language("Common");
        creature
            .add_feature(FeatureSpec::text_feature(
                "Keen Smell",
                FeatureCategory::Ability,
                "Advantage on smell-based Perception checks.",
            ))
            .expect("accepted");
        creature
            .add_feature(FeatureSpec::text_feature(
                "Bite",
                FeatureCategory::Action,
                "Chomps.",
            ))
            .expect("accepted");
        creature
    }

    #[test]
    fn generates_the_full_statblock_shape() {
        let text = generate(&stalker());
        assert!(text.starts_with("{{monster,frame,wide\n## Mire Stalker\n"));
        assert!(text.ends_with("}}"));
        assert!(text.contains("*Large Monstrosity, Neutral Evil*"));
        assert!(text.contains("**Armor Class** :: 14 (natural armor)"));
        assert!(text.contains("**Hit Points** :: 45 (7d8+14)"));
        assert!(text.contains("**Speed** :: 30 ft. (Walk)"));
        assert!(text.contains("|16 (+3)|12 (+1)|10 (+0)|4 (-3)|10 (+0)|10 (+0)|"));
        assert!(text.contains("**Saving Throws** :: DEX +3"));
        assert!(text.contains("**Skills** :: Stealth +3"));
        assert!(text.contains("***Senses*** :: Darkvision (60 feet), passive Perception 10"));
        assert!(text.contains("**Languages** :: Common"));
        assert!(text.contains("**Challenge** :: 2 (450 XP)"));
        assert!(text.contains("***Keen Smell.*** Advantage on smell-based Perception checks."));
        assert!(text.contains("### Actions\n***Bite.*** Chomps."));
    }

    #[test]
    fn optional_lines_are_omitted_when_empty() {
        let creature = Creature::new("Plain");
        let text = generate(&creature);
        assert!(!text.contains("**Saving Throws**"));
        assert!(!text.contains("**Skills**"));
        assert!(!text.contains("**Languages**"));
        // Senses always carry the derived passive Perception
        assert!(text.contains("***Senses*** :: passive Perception 10"));
        assert!(text.contains("**Armor Class** :: 10\n"));
        assert!(text.contains("**Hit Points** :: 10\n"));
    }
}
