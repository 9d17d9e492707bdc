//! Best-effort statblock parsing
//!
//! Section-oriented: each section is extracted independently, and a
//! section that fails to match falls back to the record defaults instead
//! of aborting the parse. The one hard requirement is the `## Name` line -
//! the name anchors the format, so a block without one is a whole-parse
//! failure rather than a partial record. Tolerated irregularities are
//! logged, never raised.

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::{debug, warn};

use beastbldr_domain::{
    Ability, ChallengeRating, Creature, FeatureCategory, MovementType, Sense, SenseType, Size,
    Skill, SCORE_MAX, SCORE_MIN,
};

use crate::error::CodecError;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##\s+(.+)$").expect("valid regex"));
static META_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\*([^*\n][^\n]*?)\*\s*$").expect("valid regex"));
static AC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\*\*Armor Class\*\*\s*::\s*(\d+)(?:\s*\(([^)\n]*)\))?").expect("valid regex")
});
static HP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\*\*Hit Points\*\*\s*::\s*(\d+)(?:\s*\(([^)\n]*)\))?").expect("valid regex")
});
static SPEED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\*\*Speed\*\*\s*::\s*(.+)$").expect("valid regex"));
static SPEED_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*ft\.?\s*\(([A-Za-z]+)\)").expect("valid regex"));
static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?\d+)\s*\([+-]?\d+\)$").expect("valid regex"));
static SAVES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\*\*Saving Throws\*\*\s*::\s*(.+)$").expect("valid regex")
});
static SAVE_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]+)\s*[+-]\d+").expect("valid regex"));
static SKILLS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\*\*Skills\*\*\s*::\s*(.+)$").expect("valid regex"));
static SKILL_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z ]+?)\s*[+-]\d+").expect("valid regex"));
static SENSES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\*{2,3}Senses\*{2,3}\s*::\s*(.+)$").expect("valid regex")
});
static SENSE_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]+)\s*\((\d+)\s*feet\)").expect("valid regex"));
static LANGUAGES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\*\*Languages\*\*\s*::\s*(.+)$").expect("valid regex"));
static CHALLENGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\*\*Challenge\*\*\s*::\s*(\d+)(?:\s*\((\d+)\s*XP\))?").expect("valid regex")
});
static FEATURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*\*(.+?)\.?\*\*\*\s*(.*)$").expect("valid regex"));
static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^###\s+(.+)$").expect("valid regex"));

/// Parse a statblock back into a creature record.
///
/// Optional sections (saving throws, skills, senses, languages, XP, the
/// armor and hit-point parentheticals) default when absent. Entries that
/// exceed the record's caps are skipped with a diagnostic - import is
/// best-effort, not validation.
pub fn parse(input: &str) -> Result<Creature, CodecError> {
    let name = NAME_RE
        .captures(input)
        .map(|cap| cap[1].trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or(CodecError::ParseFailed)?;
    let mut creature = Creature::new(name);

    // Challenge first: the proficiency-driven caps below depend on it
    if let Some(cap) = CHALLENGE_RE.captures(input) {
        match cap[1].parse::<u8>().ok().and_then(|r| ChallengeRating::new(r).ok()) {
            Some(challenge) => creature.set_challenge_rating(challenge),
            None => warn!(raw = &cap[1], "unusable challenge rating, keeping default"),
        }
    } else {
        debug!("no challenge line, keeping default rating");
    }

    parse_meta(input, &mut creature);
    parse_defense(input, &mut creature);
    parse_speed(input, &mut creature);
    parse_ability_row(input, &mut creature);
    parse_proficiencies(input, &mut creature);
    parse_features(input, &mut creature);

    Ok(creature)
}

/// The `*Size Type, Alignment*` line.
fn parse_meta(input: &str, creature: &mut Creature) {
    let Some(cap) = META_RE.captures(input) else {
        debug!("no size/type/alignment line");
        return;
    };
    let meta = cap[1].trim().to_string();
    let (left, alignment) = match meta.rsplit_once(',') {
        Some((left, alignment)) => (left.trim().to_string(), Some(alignment.trim().to_string())),
        None => (meta, None),
    };
    let mut words = left.split_whitespace();
    if let Some(first) = words.next() {
        match first.parse::<Size>() {
            Ok(size) => creature.set_size(size),
            Err(_) => warn!(raw = first, "unknown size, keeping default"),
        }
    }
    let creature_type = words.collect::<Vec<_>>().join(" ");
    if !creature_type.is_empty() {
        creature.set_creature_type(creature_type);
    }
    if let Some(alignment) = alignment {
        if !alignment.is_empty() {
            creature.set_alignment(alignment);
        }
    }
}

fn parse_defense(input: &str, creature: &mut Creature) {
    if let Some(cap) = AC_RE.captures(input) {
        let armor_text = cap.get(2).map(|m| m.as_str().trim().to_string());
        match cap[1].parse::<i32>() {
            Ok(armor_class) => {
                if creature.set_armor(armor_class, armor_text).is_err() {
                    warn!(armor_class, "unusable armor class, keeping default");
                }
            }
            Err(_) => warn!("unusable armor class, keeping default"),
        }
    }
    if let Some(cap) = HP_RE.captures(input) {
        let formula = cap.get(2).map(|m| m.as_str().trim().to_string());
        match cap[1].parse::<i32>() {
            Ok(hit_points) => {
                if creature.set_hit_points(hit_points, formula).is_err() {
                    warn!(hit_points, "unusable hit points, keeping default");
                }
            }
            Err(_) => warn!("unusable hit points, keeping default"),
        }
    }
}

fn parse_speed(input: &str, creature: &mut Creature) {
    let Some(cap) = SPEED_RE.captures(input) else {
        return;
    };
    for movement in MovementType::ALL {
        creature.set_movement_speed(movement, 0);
    }
    for entry in SPEED_ENTRY_RE.captures_iter(&cap[1]) {
        let speed = entry[1].parse::<u32>().unwrap_or(0);
        match entry[2].parse::<MovementType>() {
            Ok(movement) => creature.set_movement_speed(movement, speed),
            Err(_) => warn!(raw = &entry[2], "unknown movement type, skipping"),
        }
    }
}

/// The six `score (modifier)` cells of the ability table. The first table
/// row whose six cells all match is taken; the printed modifiers are
/// recomputed, not trusted.
fn parse_ability_row(input: &str, creature: &mut Creature) {
    for line in input.lines() {
        let trimmed = line.trim();
        if !trimmed.starts_with('|') {
            continue;
        }
        let cells: Vec<&str> = trimmed
            .trim_matches('|')
            .split('|')
            .map(str::trim)
            .collect();
        if cells.len() != 6 || !cells.iter().all(|cell| CELL_RE.is_match(cell)) {
            continue;
        }
        for (ability, cell) in Ability::ALL.iter().zip(&cells) {
            let Some(cap) = CELL_RE.captures(cell) else {
                continue;
            };
            let raw: i32 = match cap[1].parse() {
                Ok(score) => score,
                Err(_) => continue,
            };
            let score = raw.clamp(SCORE_MIN, SCORE_MAX);
            if score != raw {
                warn!(raw, %ability, "score outside [4, 20], clamping");
            }
            if creature.abilities_mut().set(*ability, score).is_err() {
                warn!(%ability, "unusable score, keeping default");
            }
        }
        return;
    }
    debug!("no ability table row found, keeping defaults");
}

fn parse_proficiencies(input: &str, creature: &mut Creature) {
    if let Some(cap) = SAVES_RE.captures(input) {
        for entry in SAVE_ENTRY_RE.captures_iter(&cap[1]) {
            match entry[1].parse::<Ability>() {
                Ok(ability) => {
                    if let Err(err) = creature.add_saving_throw(ability) {
                        warn!(%ability, %err, "skipping saving throw");
                    }
                }
                Err(_) => warn!(raw = &entry[1], "unknown saving throw, skipping"),
            }
        }
    }
    if let Some(cap) = SKILLS_RE.captures(input) {
        for entry in SKILL_ENTRY_RE.captures_iter(&cap[1]) {
            match entry[1].trim().parse::<Skill>() {
                Ok(skill) => {
                    if let Err(err) = creature.add_skill(skill) {
                        warn!(%skill, %err, "skipping skill");
                    }
                }
                Err(_) => warn!(raw = entry[1].trim(), "unknown skill, skipping"),
            }
        }
    }
    if let Some(cap) = SENSES_RE.captures(input) {
        for entry in SENSE_ENTRY_RE.captures_iter(&cap[1]) {
            let range = entry[2].parse::<u32>().unwrap_or(0);
            match entry[1].parse::<SenseType>() {
                Ok(kind) => creature.add_sense(Sense::new(kind, range)),
                Err(_) => warn!(raw = &entry[1], "unknown sense, skipping"),
            }
        }
    }
    if let Some(cap) = LANGUAGES_RE.captures(input) {
        for language in cap[1].split(',') {
            let language = language.trim();
            if !language.is_empty() {
                creature.add_language(language);
            }
        }
    }
}

/// Feature blocks after the final divider: bare `***Name.*** text` pairs
/// are abilities, `###` headers switch the category. Prose cannot recover
/// facet configuration, so everything imports as a manual-text feature
/// with the free-slot flags re-derived.
fn parse_features(input: &str, creature: &mut Creature) {
    let lines: Vec<&str> = input.lines().collect();
    let start = lines
        .iter()
        .rposition(|line| line.trim() == "___")
        .map(|index| index + 1)
        .or_else(|| {
            lines
                .iter()
                .position(|line| line.trim_start().starts_with("**Challenge**"))
                .map(|index| index + 1)
        })
        .unwrap_or(0);

    let mut parsed: Vec<(String, FeatureCategory, String)> = Vec::new();
    let mut category = FeatureCategory::Ability;
    let mut current: Option<(String, FeatureCategory, String)> = None;

    for line in &lines[start..] {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == "___" || trimmed == "}}" {
            parsed.extend(current.take());
            continue;
        }
        if let Some(cap) = HEADER_RE.captures(trimmed) {
            parsed.extend(current.take());
            category = match cap[1].trim() {
                "Actions" => FeatureCategory::Action,
                "Bonus Actions" => FeatureCategory::BonusAction,
                "Reactions" => FeatureCategory::Reaction,
                "Legendary Actions" => FeatureCategory::Legendary,
                other => {
                    warn!(heading = other, "unknown feature section, treating as abilities");
                    FeatureCategory::Ability
                }
            };
            continue;
        }
        if let Some(cap) = FEATURE_RE.captures(trimmed) {
            let text = cap[2].trim().to_string();
            // The ***Senses*** :: line shares the bold marker
            if text.starts_with("::") {
                continue;
            }
            parsed.extend(current.take());
            current = Some((cap[1].trim().to_string(), category, text));
            continue;
        }
        // Continuation of the current feature's text
        if let Some((_, _, text)) = &mut current {
            text.push(' ');
            text.push_str(trimmed);
        }
    }
    parsed.extend(current.take());

    for (name, category, text) in parsed {
        creature.import_feature(name, category, text);
    }
}
