//! Creature aggregate - the record being built
//!
//! # Rustic DDD Design
//!
//! The record is a single owned aggregate:
//! - **Private fields**: every field is encapsulated behind accessors
//! - **Validated mutations**: the only way to change the feature list or
//!   spend points is through the operations below, which check every
//!   invariant once and return `Result<Outcome, DomainError>`
//! - **Derived text**: rule text is recomputed on read, never cached, so a
//!   field edit can never leave a stale description behind
//!
//! # Invariants
//!
//! - At most one feature per category sits in the free slot (`is_first`);
//!   removing it promotes the next eligible feature in order
//! - At most one multiattack, with 2 to 4 attacks
//! - At most two features carry a recharge limiter
//! - Action-economy spells number at most twice the proficiency bonus
//! - Feature points spent never exceed rating + proficiency bonus
//! - Magic points exist only once spellcasting is granted
//! - Walking speed survives while it is the only movement

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::description;
use crate::entities::{
    Feature, FeatureCategory, FeatureKind, FeatureSpec, GrantKind, Multiattack,
    MULTIATTACK_MAX,
};
use crate::error::DomainError;
use crate::events::{
    FeatureAdded, FeatureRemoved, FeatureUpdated, GrantedPool, MovementChange,
    MultiattackOutcome, PoolGranted,
};
use crate::ids::FeatureId;
use crate::rules::{
    attribute_point_budget, feature_point_cost, magic_point_cost, magic_point_pool,
    saving_throw_cap, skill_cap, total_feature_points, BudgetReport, Pool,
    ATTRIBUTE_GRANT_COST, ATTRIBUTE_GRANT_POINTS, MULTIATTACK_STEP_COST,
    SAVING_THROW_GRANT_COST,
};
use crate::value_objects::{
    Ability, AbilityScores, ChallengeRating, Condition, DamageType, MovementSet, MovementType,
    Sense, SenseType, Size, Skill,
};

/// How many features may carry a recharge limiter.
pub const RECHARGE_CAP: usize = 2;

/// Which movement mutation `modify_movement` performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementChangeKind {
    /// Gain a movement the creature does not have, at the size default.
    New,
    /// Add 10 feet to a movement the creature already has.
    Increase,
}

/// The creature record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Creature {
    // Identity & display
    name: String,
    size: Size,
    creature_type: String,
    alignment: String,

    // Defense
    armor_class: i32,
    armor_text: Option<String>,

    // Vitality
    hit_points: i32,
    hit_point_formula: Option<String>,

    // Challenge
    challenge: ChallengeRating,

    // Movement
    movement: MovementSet,

    // Abilities & proficiencies
    abilities: AbilityScores,
    saving_throws: BTreeSet<Ability>,
    skills: BTreeSet<Skill>,
    expertise: BTreeSet<Skill>,

    // Senses & languages
    senses: Vec<Sense>,
    languages: Vec<String>,

    // Defenses granted by features
    damage_resistances: BTreeSet<DamageType>,
    damage_immunities: BTreeSet<DamageType>,
    condition_immunities: BTreeSet<Condition>,

    // Features, in display order
    features: Vec<Feature>,

    // Bonus pools bought with feature points
    attribute_points_from_features: i32,
    saving_throws_from_features: i32,
}

impl Default for Creature {
    fn default() -> Self {
        Self::new("Unnamed Creature")
    }
}

impl Creature {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// A fresh record with the builder's fixed initial defaults.
    pub fn new(name: impl Into<String>) -> Self {
        let size = Size::Medium;
        Self {
            name: name.into(),
            size,
            creature_type: "Beast".to_string(),
            alignment: "Unaligned".to_string(),
            armor_class: 10,
            armor_text: None,
            hit_points: 10,
            hit_point_formula: None,
            challenge: ChallengeRating::default(),
            movement: MovementSet::new().with(MovementType::Walk, size.default_speed()),
            abilities: AbilityScores::new(),
            saving_throws: BTreeSet::new(),
            skills: BTreeSet::new(),
            expertise: BTreeSet::new(),
            senses: Vec::new(),
            languages: Vec::new(),
            damage_resistances: BTreeSet::new(),
            damage_immunities: BTreeSet::new(),
            condition_immunities: BTreeSet::new(),
            features: Vec::new(),
            attribute_points_from_features: 0,
            saving_throws_from_features: 0,
        }
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn creature_type(&self) -> &str {
        &self.creature_type
    }

    pub fn alignment(&self) -> &str {
        &self.alignment
    }

    pub fn armor_class(&self) -> i32 {
        self.armor_class
    }

    pub fn armor_text(&self) -> Option<&str> {
        self.armor_text.as_deref()
    }

    pub fn hit_points(&self) -> i32 {
        self.hit_points
    }

    pub fn hit_point_formula(&self) -> Option<&str> {
        self.hit_point_formula.as_deref()
    }

    pub fn challenge(&self) -> ChallengeRating {
        self.challenge
    }

    pub fn proficiency_bonus(&self) -> i32 {
        self.challenge.proficiency_bonus()
    }

    pub fn movement(&self) -> &MovementSet {
        &self.movement
    }

    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
    }

    /// Mutable access to the raw scores, for import and free-form editing.
    /// The budget-checked path is `set_ability_score`.
    pub fn abilities_mut(&mut self) -> &mut AbilityScores {
        &mut self.abilities
    }

    pub fn saving_throws(&self) -> &BTreeSet<Ability> {
        &self.saving_throws
    }

    pub fn skills(&self) -> &BTreeSet<Skill> {
        &self.skills
    }

    pub fn expertise(&self) -> &BTreeSet<Skill> {
        &self.expertise
    }

    pub fn senses(&self) -> &[Sense] {
        &self.senses
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn damage_resistances(&self) -> &BTreeSet<DamageType> {
        &self.damage_resistances
    }

    pub fn damage_immunities(&self) -> &BTreeSet<DamageType> {
        &self.damage_immunities
    }

    pub fn condition_immunities(&self) -> &BTreeSet<Condition> {
        &self.condition_immunities
    }

    /// Every feature, hidden bookkeeping entries included, in order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Features that appear on the statblock, in order.
    pub fn visible_features(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(|f| !f.is_hidden())
    }

    /// Display text for the feature at `index`, recomputed from its
    /// current configuration.
    pub fn feature_text(&self, index: usize) -> Option<String> {
        self.features
            .get(index)
            .map(|feature| description::feature_text(&self.name, feature))
    }

    /// The spellcasting grant, when one has been added.
    pub fn caster_level(&self) -> Option<u8> {
        self.features.iter().find_map(|f| match f.kind() {
            FeatureKind::Spellcasting(grant) => Some(grant.caster_level),
            _ => None,
        })
    }

    /// Features currently carrying a recharge limiter.
    pub fn recharge_count(&self) -> usize {
        self.features.iter().filter(|f| !f.recharge().is_none()).count()
    }

    /// Action-economy spells currently on the record.
    pub fn spell_action_count(&self) -> usize {
        self.features
            .iter()
            .filter(|f| {
                matches!(f.kind(), FeatureKind::Spell(_)) && f.category().is_action_economy()
            })
            .count()
    }

    /// Feature points consumed by the current record.
    pub fn feature_points_spent(&self) -> i32 {
        let features: i32 = self.features.iter().map(feature_point_cost).sum();
        let attribute_grants =
            self.attribute_points_from_features / ATTRIBUTE_GRANT_POINTS * ATTRIBUTE_GRANT_COST;
        let save_grants = self.saving_throws_from_features * SAVING_THROW_GRANT_COST;
        features + attribute_grants + save_grants
    }

    /// Magic points consumed by committed action-economy spells.
    pub fn magic_points_used(&self) -> i32 {
        self.features.iter().map(|f| f.magic_point_cost()).sum()
    }

    /// Snapshot of every point pool, derived fresh from the record.
    pub fn budget(&self) -> BudgetReport {
        BudgetReport {
            attribute_points: Pool::new(
                attribute_point_budget(self.challenge) + self.attribute_points_from_features,
                self.abilities.points_spent(),
            ),
            feature_points: Pool::new(
                total_feature_points(self.challenge),
                self.feature_points_spent(),
            ),
            magic_points: Pool::new(
                magic_point_pool(self.caster_level()),
                self.magic_points_used(),
            ),
            saving_throws: Pool::new(
                saving_throw_cap(self.challenge, self.saving_throws_from_features),
                self.saving_throws.len() as i32,
            ),
            skills: Pool::new(skill_cap(self.challenge), self.skills.len() as i32),
        }
    }

    fn available_feature_points(&self) -> i32 {
        total_feature_points(self.challenge) - self.feature_points_spent()
    }

    fn available_magic_points(&self) -> i32 {
        magic_point_pool(self.caster_level()) - self.magic_points_used()
    }

    // =========================================================================
    // Identity & wizard-step setters
    // =========================================================================

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Creature name cannot be empty"));
        }
        self.name = name;
        Ok(())
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn set_creature_type(&mut self, creature_type: impl Into<String>) {
        self.creature_type = creature_type.into();
    }

    pub fn set_alignment(&mut self, alignment: impl Into<String>) {
        self.alignment = alignment.into();
    }

    pub fn set_armor(&mut self, armor_class: i32, armor_text: Option<String>) -> Result<(), DomainError> {
        if armor_class < 1 {
            return Err(DomainError::validation("Armor class must be positive"));
        }
        self.armor_class = armor_class;
        self.armor_text = armor_text;
        Ok(())
    }

    pub fn set_hit_points(
        &mut self,
        hit_points: i32,
        formula: Option<String>,
    ) -> Result<(), DomainError> {
        if hit_points < 1 {
            return Err(DomainError::validation("Hit points must be positive"));
        }
        self.hit_points = hit_points;
        self.hit_point_formula = formula;
        Ok(())
    }

    pub fn set_challenge_rating(&mut self, challenge: ChallengeRating) {
        self.challenge = challenge;
    }

    /// Set an ability score. Raising a score is budget-checked; lowering
    /// one always succeeds, refunding points.
    pub fn set_ability_score(&mut self, ability: Ability, score: i32) -> Result<(), DomainError> {
        let current = self.abilities.get(ability);
        if score > current {
            let needed = score - current;
            let available = self.budget().attribute_points.available();
            if needed > available {
                return Err(DomainError::InsufficientAttributePoints { needed, available });
            }
        }
        self.abilities.set(ability, score)
    }

    pub fn add_saving_throw(&mut self, ability: Ability) -> Result<(), DomainError> {
        if self.saving_throws.contains(&ability) {
            return Err(DomainError::validation(format!(
                "Already proficient in {ability} saving throws"
            )));
        }
        let cap = saving_throw_cap(self.challenge, self.saving_throws_from_features);
        if self.saving_throws.len() as i32 >= cap {
            return Err(DomainError::SavingThrowCapReached { cap });
        }
        self.saving_throws.insert(ability);
        Ok(())
    }

    pub fn remove_saving_throw(&mut self, ability: Ability) -> Result<(), DomainError> {
        if !self.saving_throws.remove(&ability) {
            return Err(DomainError::validation(format!(
                "Not proficient in {ability} saving throws"
            )));
        }
        Ok(())
    }

    pub fn add_skill(&mut self, skill: Skill) -> Result<(), DomainError> {
        if self.skills.contains(&skill) {
            return Err(DomainError::validation(format!(
                "Already proficient in {skill}"
            )));
        }
        let cap = skill_cap(self.challenge);
        if self.skills.len() as i32 >= cap {
            return Err(DomainError::SkillCapReached { cap });
        }
        self.skills.insert(skill);
        Ok(())
    }

    pub fn remove_skill(&mut self, skill: Skill) -> Result<(), DomainError> {
        if self.expertise.contains(&skill) {
            return Err(DomainError::validation(format!(
                "{skill} has expertise; remove the expertise grant first"
            )));
        }
        if !self.skills.remove(&skill) {
            return Err(DomainError::validation(format!("Not proficient in {skill}")));
        }
        Ok(())
    }

    /// Add or replace a sense of the same kind.
    pub fn add_sense(&mut self, sense: Sense) {
        self.senses.retain(|s| s.kind != sense.kind);
        self.senses.push(sense);
    }

    pub fn remove_sense(&mut self, kind: SenseType) {
        self.senses.retain(|s| s.kind != kind);
    }

    pub fn add_language(&mut self, language: impl Into<String>) {
        let language = language.into();
        if !self.languages.iter().any(|l| l.eq_ignore_ascii_case(&language)) {
            self.languages.push(language);
        }
    }

    pub fn remove_language(&mut self, language: &str) {
        self.languages.retain(|l| !l.eq_ignore_ascii_case(language));
    }

    /// Raw speed assignment, used by import and free-form editing. The
    /// guarded paths are `modify_movement` and `delete_movement`.
    pub fn set_movement_speed(&mut self, movement: MovementType, speed_ft: u32) {
        self.movement.set(movement, speed_ft);
    }

    // =========================================================================
    // Feature operations
    // =========================================================================

    /// Add a feature. The first eligible feature of a category is free;
    /// everything else is checked against the feature-point and
    /// magic-point budgets before anything is committed.
    pub fn add_feature(&mut self, spec: FeatureSpec) -> Result<FeatureAdded, DomainError> {
        self.validate_spec(&spec, None)?;

        let mut feature = Feature::from_spec(spec);
        let first_slot_open = !self
            .features
            .iter()
            .any(|f| f.category() == feature.category() && f.is_first());
        if feature.eligible_for_first() && first_slot_open {
            feature.mark_first(true);
        }

        let feature_points = feature_point_cost(&feature);
        let available = self.available_feature_points();
        if feature_points > available {
            return Err(DomainError::InsufficientFeaturePoints {
                needed: feature_points,
                available,
            });
        }

        let magic_points = match feature.kind() {
            FeatureKind::Spell(spell) => {
                let cost = magic_point_cost(spell);
                let available = self.available_magic_points();
                if cost > available {
                    return Err(DomainError::InsufficientMagicPoints {
                        needed: cost,
                        available,
                    });
                }
                cost
            }
            _ => 0,
        };

        feature.set_magic_point_cost(magic_points);
        feature.set_costs_feature_point(feature_points > 0);
        let is_first = feature.is_first();
        let feature_id = feature.id();
        let index = self.features.len();

        self.apply_side_effects(&feature);
        let companions_added = self.spawn_companions(&feature);
        self.features.insert(index, feature);

        Ok(FeatureAdded {
            index,
            feature_id,
            is_first,
            feature_points,
            magic_points,
            companions_added,
        })
    }

    /// Replace the feature at `index` with a new configuration. Caps and
    /// budgets are re-validated with the old configuration excluded; the
    /// free-slot flags are re-derived afterwards.
    pub fn update_feature(
        &mut self,
        index: usize,
        spec: FeatureSpec,
    ) -> Result<FeatureUpdated, DomainError> {
        let old = self
            .features
            .get(index)
            .ok_or(DomainError::NoSuchFeature { index })?;
        if old.is_hidden() {
            return Err(DomainError::validation(
                "Bookkeeping entries are managed automatically",
            ));
        }
        if matches!(old.kind(), FeatureKind::Multiattack(_)) {
            return Err(DomainError::validation(
                "Multiattack is managed through add_or_increment_multiattack",
            ));
        }
        self.validate_spec(&spec, Some(index))?;

        // Cost the replacement as if it kept the old free slot
        let keeps_first = {
            let probe = Feature::from_spec(spec.clone());
            old.is_first() && probe.category() == old.category() && probe.eligible_for_first()
        };
        let mut probe = Feature::from_spec(spec.clone());
        probe.mark_first(keeps_first);
        let new_cost = feature_point_cost(&probe);
        let old_cost = feature_point_cost(old);
        let available = self.available_feature_points() + old_cost;
        if new_cost > available {
            return Err(DomainError::InsufficientFeaturePoints {
                needed: new_cost,
                available,
            });
        }

        let new_magic = match &spec.kind {
            FeatureKind::Spell(spell) => {
                let cost = magic_point_cost(spell);
                let available = self.available_magic_points() + old.magic_point_cost();
                if cost > available {
                    return Err(DomainError::InsufficientMagicPoints {
                        needed: cost,
                        available,
                    });
                }
                cost
            }
            _ => 0,
        };

        // Commit: revert the old configuration's side effects, swap the
        // spec in place, apply the new ones.
        let old_feature = self.features[index].clone();
        self.revert_side_effects(&old_feature);
        self.remove_companions(&old_feature);

        let feature = &mut self.features[index];
        feature.replace_spec(spec);
        feature.set_magic_point_cost(new_magic);
        let feature_id = feature.id();

        let updated = self.features[index].clone();
        self.apply_side_effects(&updated);
        self.spawn_companions(&updated);
        self.rebalance_first_flags();

        Ok(FeatureUpdated {
            feature_id,
            feature_points: feature_point_cost(&self.features[index]),
            magic_points: new_magic,
        })
    }

    /// Remove the feature at `index`. Removing the free feature of a
    /// category promotes the next eligible feature; removing a
    /// spellcasting grant removes its hidden at-will bookkeeping entries.
    pub fn remove_feature(&mut self, index: usize) -> Result<FeatureRemoved, DomainError> {
        let feature = self
            .features
            .get(index)
            .ok_or(DomainError::NoSuchFeature { index })?;
        if feature.is_hidden() {
            return Err(DomainError::validation(
                "Bookkeeping entries are managed automatically",
            ));
        }
        if matches!(feature.kind(), FeatureKind::Spellcasting(_)) && self.spell_action_count() > 0
        {
            return Err(DomainError::validation(
                "Remove the creature's action-economy spells before its spellcasting",
            ));
        }

        let removed = self.features.remove(index);
        self.revert_side_effects(&removed);
        let companions_removed = self.remove_companions(&removed);

        let promoted = if removed.is_first() {
            self.promote_next(removed.category())
        } else {
            None
        };

        Ok(FeatureRemoved {
            feature_id: removed.id(),
            promoted,
            companions_removed,
        })
    }

    /// Create the multiattack (two attacks) or add one more attack to it.
    /// Each step costs one feature point; a fourth attack is the ceiling.
    pub fn add_or_increment_multiattack(&mut self) -> Result<MultiattackOutcome, DomainError> {
        let position = self
            .features
            .iter()
            .position(|f| matches!(f.kind(), FeatureKind::Multiattack(_)));
        if let Some(index) = position {
            let at_cap = matches!(
                self.features[index].kind(),
                FeatureKind::Multiattack(m) if m.at_cap()
            );
            if at_cap {
                return Err(DomainError::MultiattackAtCap {
                    attacks: MULTIATTACK_MAX,
                });
            }
        }

        let available = self.available_feature_points();
        if MULTIATTACK_STEP_COST > available {
            return Err(DomainError::InsufficientFeaturePoints {
                needed: MULTIATTACK_STEP_COST,
                available,
            });
        }

        match position {
            None => {
                let mut feature = Feature::from_spec(FeatureSpec {
                    name: "Multiattack".to_string(),
                    category: FeatureCategory::Action,
                    kind: FeatureKind::Multiattack(Multiattack::new()),
                    text: None,
                });
                feature.set_costs_feature_point(true);
                let feature_id = feature.id();
                self.features.push(feature);
                Ok(MultiattackOutcome::Created { feature_id })
            }
            Some(index) => {
                let FeatureKind::Multiattack(multiattack) = self.features[index].kind_mut()
                else {
                    return Err(DomainError::validation("Multiattack feature changed kind"));
                };
                multiattack.increment();
                let attacks = multiattack.attacks();
                Ok(MultiattackOutcome::Incremented { attacks })
            }
        }
    }

    /// Gain a new movement at the size default, or speed an existing one
    /// up by 10 feet.
    pub fn modify_movement(
        &mut self,
        kind: MovementChangeKind,
        movement: MovementType,
    ) -> Result<MovementChange, DomainError> {
        let current = self.movement.get(movement);
        match kind {
            MovementChangeKind::New => {
                if current != 0 {
                    return Err(DomainError::MovementUnavailable { movement });
                }
                let speed_ft = self.size.default_speed();
                self.movement.set(movement, speed_ft);
                Ok(MovementChange::Gained { movement, speed_ft })
            }
            MovementChangeKind::Increase => {
                if current == 0 {
                    return Err(DomainError::MovementUnavailable { movement });
                }
                let speed_ft = current + 10;
                self.movement.set(movement, speed_ft);
                Ok(MovementChange::Increased { movement, speed_ft })
            }
        }
    }

    /// Zero a movement. Walking is protected while it is the only one.
    pub fn delete_movement(
        &mut self,
        movement: MovementType,
    ) -> Result<MovementChange, DomainError> {
        if self.movement.get(movement) == 0 {
            return Err(DomainError::MovementUnavailable { movement });
        }
        if movement == MovementType::Walk && self.movement.is_only_movement(MovementType::Walk) {
            return Err(DomainError::LastWalkingSpeed);
        }
        self.movement.set(movement, 0);
        Ok(MovementChange::Removed { movement })
    }

    /// Spend one feature point on two extra attribute points.
    pub fn grant_attribute_points(&mut self) -> Result<PoolGranted, DomainError> {
        let available = self.available_feature_points();
        if ATTRIBUTE_GRANT_COST > available {
            return Err(DomainError::InsufficientFeaturePoints {
                needed: ATTRIBUTE_GRANT_COST,
                available,
            });
        }
        self.attribute_points_from_features += ATTRIBUTE_GRANT_POINTS;
        Ok(PoolGranted {
            pool: GrantedPool::AttributePoints,
            total: self.attribute_points_from_features,
        })
    }

    /// Spend one feature point on an extra saving-throw slot.
    pub fn grant_saving_throw_slot(&mut self) -> Result<PoolGranted, DomainError> {
        let available = self.available_feature_points();
        if SAVING_THROW_GRANT_COST > available {
            return Err(DomainError::InsufficientFeaturePoints {
                needed: SAVING_THROW_GRANT_COST,
                available,
            });
        }
        self.saving_throws_from_features += 1;
        Ok(PoolGranted {
            pool: GrantedPool::SavingThrows,
            total: self.saving_throws_from_features,
        })
    }

    // =========================================================================
    // Hydration
    // =========================================================================

    /// Append a feature from an imported statblock: manual text only, no
    /// budget checks, free-slot flags re-derived. Import is best-effort
    /// and may leave pools over-spent; later mutations refuse to spend
    /// from a negative pool, so the record self-corrects under editing.
    pub fn import_feature(
        &mut self,
        name: impl Into<String>,
        category: FeatureCategory,
        text: impl Into<String>,
    ) -> FeatureId {
        let feature = Feature::from_spec(FeatureSpec::text_feature(name, category, text));
        let feature_id = feature.id();
        self.features.push(feature);
        self.rebalance_first_flags();
        feature_id
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Shared validation for add and update. `replacing` excludes the
    /// feature at that index from cap counting.
    fn validate_spec(&self, spec: &FeatureSpec, replacing: Option<usize>) -> Result<(), DomainError> {
        if spec.name.trim().is_empty() {
            return Err(DomainError::validation("Feature name cannot be empty"));
        }
        let counted = |index: usize| replacing != Some(index);

        match &spec.kind {
            FeatureKind::Multiattack(_) => Err(DomainError::validation(
                "Multiattack is managed through add_or_increment_multiattack",
            )),
            FeatureKind::Text | FeatureKind::Attack(_) => Ok(()),
            FeatureKind::Spell(spell) => {
                if spec.category != spell.expected_category() {
                    return Err(DomainError::validation(format!(
                        "A spell cast as a {} belongs in {}",
                        spell.casting_time,
                        spell.expected_category()
                    )));
                }
                if self.caster_level().is_none() {
                    return Err(DomainError::NoSpellcasting);
                }
                if !spell.recharge.is_none() {
                    let recharges = self
                        .features
                        .iter()
                        .enumerate()
                        .filter(|(i, f)| counted(*i) && !f.recharge().is_none())
                        .count();
                    if recharges >= RECHARGE_CAP {
                        return Err(DomainError::RechargeCapReached { cap: RECHARGE_CAP });
                    }
                }
                let cap = 2 * self.proficiency_bonus() as usize;
                let spells = self
                    .features
                    .iter()
                    .enumerate()
                    .filter(|(i, f)| {
                        counted(*i)
                            && matches!(f.kind(), FeatureKind::Spell(_))
                            && f.category().is_action_economy()
                    })
                    .count();
                if spells >= cap {
                    return Err(DomainError::SpellActionCapReached { cap });
                }
                Ok(())
            }
            FeatureKind::Spellcasting(_) => {
                let already = self.features.iter().enumerate().any(|(i, f)| {
                    counted(i) && matches!(f.kind(), FeatureKind::Spellcasting(_))
                });
                if already {
                    return Err(DomainError::validation(
                        "The creature already has a spellcasting feature",
                    ));
                }
                Ok(())
            }
            FeatureKind::Grant(grant) => self.validate_grant(grant),
        }
    }

    fn validate_grant(&self, grant: &GrantKind) -> Result<(), DomainError> {
        match grant {
            GrantKind::SkillExpertise { skill } => {
                if !self.skills.contains(skill) {
                    return Err(DomainError::validation(format!(
                        "Expertise requires proficiency in {skill}"
                    )));
                }
                if self.expertise.contains(skill) {
                    return Err(DomainError::validation(format!(
                        "Already has expertise in {skill}"
                    )));
                }
                Ok(())
            }
            GrantKind::Sense { sense } => {
                if self.senses.iter().any(|s| s.kind == sense.kind) {
                    return Err(DomainError::validation(format!(
                        "Already has {}",
                        sense.kind
                    )));
                }
                Ok(())
            }
            GrantKind::DamageResistance { damage_type } => {
                if self.damage_resistances.contains(damage_type)
                    || self.damage_immunities.contains(damage_type)
                {
                    return Err(DomainError::validation(format!(
                        "Already resists {damage_type} damage"
                    )));
                }
                Ok(())
            }
            GrantKind::DamageImmunity { damage_type } => {
                if self.damage_immunities.contains(damage_type) {
                    return Err(DomainError::validation(format!(
                        "Already immune to {damage_type} damage"
                    )));
                }
                Ok(())
            }
            GrantKind::ConditionImmunity { condition } => {
                if self.condition_immunities.contains(condition) {
                    return Err(DomainError::validation(format!(
                        "Already immune to the {condition} condition"
                    )));
                }
                Ok(())
            }
        }
    }

    fn apply_side_effects(&mut self, feature: &Feature) {
        if let FeatureKind::Grant(grant) = feature.kind() {
            match grant {
                GrantKind::SkillExpertise { skill } => {
                    self.expertise.insert(*skill);
                }
                GrantKind::Sense { sense } => {
                    self.senses.retain(|s| s.kind != sense.kind);
                    self.senses.push(*sense);
                }
                GrantKind::DamageResistance { damage_type } => {
                    self.damage_resistances.insert(*damage_type);
                }
                GrantKind::DamageImmunity { damage_type } => {
                    self.damage_resistances.remove(damage_type);
                    self.damage_immunities.insert(*damage_type);
                }
                GrantKind::ConditionImmunity { condition } => {
                    self.condition_immunities.insert(*condition);
                }
            }
        }
    }

    fn revert_side_effects(&mut self, feature: &Feature) {
        if let FeatureKind::Grant(grant) = feature.kind() {
            match grant {
                GrantKind::SkillExpertise { skill } => {
                    self.expertise.remove(skill);
                }
                GrantKind::Sense { sense } => {
                    self.senses.retain(|s| s.kind != sense.kind);
                }
                GrantKind::DamageResistance { damage_type } => {
                    self.damage_resistances.remove(damage_type);
                }
                GrantKind::DamageImmunity { damage_type } => {
                    self.damage_immunities.remove(damage_type);
                    // An immunity superseded any resistance grant of the
                    // same type; restore it if its grant is still around
                    let still_granted = self.features.iter().any(|f| {
                        matches!(
                            f.kind(),
                            FeatureKind::Grant(GrantKind::DamageResistance { damage_type: d })
                                if d == damage_type
                        )
                    });
                    if still_granted {
                        self.damage_resistances.insert(*damage_type);
                    }
                }
                GrantKind::ConditionImmunity { condition } => {
                    self.condition_immunities.remove(condition);
                }
            }
        }
    }

    /// Hidden bookkeeping entries for a spellcasting grant's at-will
    /// spells. Returns how many were appended.
    fn spawn_companions(&mut self, feature: &Feature) -> usize {
        let FeatureKind::Spellcasting(grant) = feature.kind() else {
            return 0;
        };
        let mut added = 0;
        for spell_name in &grant.at_will_spells {
            self.features
                .push(Feature::hidden(spell_name.clone(), FeatureCategory::Ability));
            added += 1;
        }
        added
    }

    /// Remove the hidden entries referencing a grant's at-will spells.
    fn remove_companions(&mut self, feature: &Feature) -> usize {
        let FeatureKind::Spellcasting(grant) = feature.kind() else {
            return 0;
        };
        let before = self.features.len();
        self.features.retain(|f| {
            !(f.is_hidden()
                && grant
                    .at_will_spells
                    .iter()
                    .any(|name| name.eq_ignore_ascii_case(f.name())))
        });
        before - self.features.len()
    }

    /// Promote the next eligible feature of `category` into the free slot.
    fn promote_next(&mut self, category: FeatureCategory) -> Option<FeatureId> {
        let next = self
            .features
            .iter_mut()
            .find(|f| f.category() == category && f.eligible_for_first() && !f.is_first())?;
        next.mark_first(true);
        Some(next.id())
    }

    /// Re-derive the free-slot flags after an in-place edit: one
    /// `is_first` per category, held by the earliest eligible feature
    /// unless a later one already holds it legitimately.
    fn rebalance_first_flags(&mut self) {
        for category in FeatureCategory::ALL {
            let mut seen_first = false;
            for feature in self
                .features
                .iter_mut()
                .filter(|f| f.category() == category)
            {
                if feature.is_first() {
                    if seen_first || !feature.eligible_for_first() {
                        feature.mark_first(false);
                    } else {
                        seen_first = true;
                    }
                }
            }
            if !seen_first {
                self.promote_next(category);
            }
        }
        for feature in &mut self.features {
            let costs = feature_point_cost(feature) > 0;
            feature.set_costs_feature_point(costs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        AttackAbility, AttackProfile, AttackReach, DamageSpell, PrimaryEffect, SpellDelivery,
        SpellEffect, SpellcastingGrant,
    };
    use crate::value_objects::{
        DiceFormula, Recharge, SpellCastingTime, SpellDuration, SpellRange,
    };

    fn create_test_creature(cr: u8) -> Creature {
        let mut creature = Creature::new("Test Beast");
        creature.set_challenge_rating(ChallengeRating::new(cr).expect("valid rating"));
        creature
    }

    fn action(name: &str) -> FeatureSpec {
        FeatureSpec::text_feature(name, FeatureCategory::Action, "Does something.")
    }

    fn ability(name: &str) -> FeatureSpec {
        FeatureSpec::text_feature(name, FeatureCategory::Ability, "Is something.")
    }

    fn plain_spell(recharge: Recharge) -> FeatureSpec {
        FeatureSpec::spell(
            "Arcane Bolt",
            SpellEffect {
                effect: PrimaryEffect::Damage(DamageSpell {
                    delivery: SpellDelivery::AttackRoll {
                        range: SpellRange::Thirty,
                    },
                    dice: DiceFormula::plain(2, 8).expect("valid dice"),
                    damage_type: DamageType::Force,
                    area: None,
                    secondary: None,
                }),
                casting_time: SpellCastingTime::Action,
                duration: SpellDuration::Instantaneous,
                recharge,
            },
        )
    }

    fn grant_spellcasting(creature: &mut Creature, at_will: &[&str]) {
        let level = creature.challenge().caster_level();
        creature
            .add_feature(FeatureSpec::spellcasting(
                "Spellcasting",
                SpellcastingGrant {
                    ability: Ability::Charisma,
                    caster_level: level,
                    at_will_spells: at_will.iter().map(|s| s.to_string()).collect(),
                },
            ))
            .expect("spellcasting fits the budget");
    }

    mod features {
        use super::*;

        #[test]
        fn first_action_is_free_and_the_second_costs_a_point() {
            let mut creature = create_test_creature(1);

            let first = creature.add_feature(action("Bite")).expect("accepted");
            assert!(first.is_first);
            assert_eq!(first.feature_points, 0);

            let second = creature.add_feature(action("Tail")).expect("accepted");
            assert!(!second.is_first);
            assert_eq!(second.feature_points, 1);
            assert_eq!(creature.feature_points_spent(), 1);
        }

        #[test]
        fn abilities_and_actions_have_separate_free_slots() {
            // CR 1: proficiency 2, so 3 feature points in total
            let mut creature = create_test_creature(1);
            assert_eq!(creature.budget().feature_points.total, 3);

            creature.add_feature(action("Bite")).expect("accepted");
            creature.add_feature(ability("Keen Smell")).expect("accepted");
            creature.add_or_increment_multiattack().expect("accepted");

            assert_eq!(creature.budget().feature_points.available(), 2);
        }

        #[test]
        fn removing_the_free_feature_promotes_the_next_in_order() {
            let mut creature = create_test_creature(1);
            creature.add_feature(action("Bite")).expect("accepted");
            let second = creature.add_feature(action("Tail")).expect("accepted");
            assert_eq!(creature.feature_points_spent(), 1);

            let removed = creature.remove_feature(0).expect("accepted");
            assert_eq!(removed.promoted, Some(second.feature_id));

            let promoted = &creature.features()[0];
            assert!(promoted.is_first());
            assert!(!promoted.costs_feature_point());
            assert_eq!(creature.feature_points_spent(), 0);
        }

        #[test]
        fn legendary_features_cost_two_and_never_take_the_free_slot() {
            let mut creature = create_test_creature(1);
            let added = creature
                .add_feature(FeatureSpec::text_feature(
                    "Tail Sweep",
                    FeatureCategory::Legendary,
                    "Sweeps its tail.",
                ))
                .expect("accepted");
            assert!(!added.is_first);
            assert_eq!(added.feature_points, 2);
        }

        #[test]
        fn additions_beyond_the_budget_are_rejected_with_amounts() {
            // CR 0: 2 feature points in total
            let mut creature = create_test_creature(0);
            creature.add_feature(action("Bite")).expect("free");
            creature
                .add_feature(FeatureSpec::text_feature(
                    "Tail Sweep",
                    FeatureCategory::Legendary,
                    "Sweeps its tail.",
                ))
                .expect("accepted");

            let err = creature
                .add_feature(action("Claw"))
                .expect_err("budget exhausted");
            assert_eq!(
                err,
                DomainError::InsufficientFeaturePoints {
                    needed: 1,
                    available: 0
                }
            );
            // Rejected request left the record untouched
            assert_eq!(creature.visible_features().count(), 2);
        }

        #[test]
        fn attacks_render_their_text_on_read() {
            let mut creature = create_test_creature(1);
            let attack = AttackProfile::new(
                AttackReach::Melee,
                DiceFormula::plain(1, 6).expect("valid dice"),
                DamageType::Piercing,
                AttackAbility::Strength,
            );
            let added = creature
                .add_feature(FeatureSpec::attack("Bite", attack))
                .expect("accepted");
            assert_eq!(
                creature.feature_text(added.index).expect("exists"),
                "Melee Weapon Attack - 1d6+STR piercing"
            );
        }
    }

    mod multiattack {
        use super::*;

        #[test]
        fn builds_up_to_four_attacks_then_rejects() {
            let mut creature = create_test_creature(5);

            let outcome = creature.add_or_increment_multiattack().expect("created");
            assert!(matches!(outcome, MultiattackOutcome::Created { .. }));
            let index = creature
                .features()
                .iter()
                .position(|f| matches!(f.kind(), FeatureKind::Multiattack(_)))
                .expect("exists");
            assert_eq!(
                creature.feature_text(index).expect("exists"),
                "Test Beast attacks twice per round."
            );

            assert_eq!(
                creature.add_or_increment_multiattack().expect("accepted"),
                MultiattackOutcome::Incremented { attacks: 3 }
            );
            assert_eq!(
                creature.feature_text(index).expect("exists"),
                "Test Beast attacks three times per round."
            );

            assert_eq!(
                creature.add_or_increment_multiattack().expect("accepted"),
                MultiattackOutcome::Incremented { attacks: 4 }
            );

            let err = creature
                .add_or_increment_multiattack()
                .expect_err("at the cap");
            assert_eq!(err, DomainError::MultiattackAtCap { attacks: 4 });
            assert_eq!(creature.feature_points_spent(), 3);
        }

        #[test]
        fn multiattack_specs_cannot_sneak_in_through_add_feature() {
            let mut creature = create_test_creature(5);
            let err = creature
                .add_feature(FeatureSpec {
                    name: "Multiattack".into(),
                    category: FeatureCategory::Action,
                    kind: FeatureKind::Multiattack(Multiattack::new()),
                    text: None,
                })
                .expect_err("rejected");
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    mod movement {
        use super::*;

        #[test]
        fn new_movement_starts_at_the_size_default() {
            let mut creature = create_test_creature(1);
            creature.set_size(Size::Large);

            let change = creature
                .modify_movement(MovementChangeKind::New, MovementType::Fly)
                .expect("accepted");
            assert_eq!(
                change,
                MovementChange::Gained {
                    movement: MovementType::Fly,
                    speed_ft: 40
                }
            );
        }

        #[test]
        fn increase_adds_ten_feet_to_an_existing_movement() {
            let mut creature = create_test_creature(1);
            let change = creature
                .modify_movement(MovementChangeKind::Increase, MovementType::Walk)
                .expect("accepted");
            assert_eq!(
                change,
                MovementChange::Increased {
                    movement: MovementType::Walk,
                    speed_ft: 40
                }
            );
        }

        #[test]
        fn mismatched_slots_are_rejected() {
            let mut creature = create_test_creature(1);
            assert_eq!(
                creature
                    .modify_movement(MovementChangeKind::New, MovementType::Walk)
                    .expect_err("walk already exists"),
                DomainError::MovementUnavailable {
                    movement: MovementType::Walk
                }
            );
            assert_eq!(
                creature
                    .modify_movement(MovementChangeKind::Increase, MovementType::Swim)
                    .expect_err("no swim speed yet"),
                DomainError::MovementUnavailable {
                    movement: MovementType::Swim
                }
            );
        }

        #[test]
        fn walk_survives_while_it_is_the_only_movement() {
            let mut creature = create_test_creature(1);
            assert_eq!(
                creature
                    .delete_movement(MovementType::Walk)
                    .expect_err("protected"),
                DomainError::LastWalkingSpeed
            );

            creature
                .modify_movement(MovementChangeKind::New, MovementType::Fly)
                .expect("accepted");
            creature
                .delete_movement(MovementType::Walk)
                .expect("no longer the only movement");
            assert_eq!(creature.movement().get(MovementType::Walk), 0);
        }
    }

    mod grants {
        use super::*;

        #[test]
        fn attribute_grant_extends_the_budget() {
            // CR 1: 10 attribute points
            let mut creature = create_test_creature(1);
            creature
                .set_ability_score(Ability::Strength, 20)
                .expect("exactly the budget");

            let err = creature
                .set_ability_score(Ability::Charisma, 12)
                .expect_err("budget exhausted");
            assert_eq!(
                err,
                DomainError::InsufficientAttributePoints {
                    needed: 2,
                    available: 0
                }
            );

            let granted = creature.grant_attribute_points().expect("accepted");
            assert_eq!(granted.pool, GrantedPool::AttributePoints);
            assert_eq!(granted.total, 2);
            creature
                .set_ability_score(Ability::Charisma, 12)
                .expect("now affordable");
            assert_eq!(creature.feature_points_spent(), 1);
        }

        #[test]
        fn saving_throw_slots_extend_the_cap() {
            // CR 1: proficiency 2, so one saving throw
            let mut creature = create_test_creature(1);
            creature.add_saving_throw(Ability::Dexterity).expect("accepted");

            let err = creature
                .add_saving_throw(Ability::Wisdom)
                .expect_err("cap reached");
            assert_eq!(err, DomainError::SavingThrowCapReached { cap: 1 });

            creature.grant_saving_throw_slot().expect("accepted");
            creature.add_saving_throw(Ability::Wisdom).expect("accepted");
            assert_eq!(creature.saving_throws().len(), 2);
        }

        #[test]
        fn expertise_requires_proficiency() {
            let mut creature = create_test_creature(1);
            let err = creature
                .add_feature(FeatureSpec::grant(
                    "Stealthy",
                    GrantKind::SkillExpertise {
                        skill: Skill::Stealth,
                    },
                ))
                .expect_err("not proficient");
            assert!(matches!(err, DomainError::Validation(_)));

            creature.add_skill(Skill::Stealth).expect("accepted");
            creature
                .add_feature(FeatureSpec::grant(
                    "Stealthy",
                    GrantKind::SkillExpertise {
                        skill: Skill::Stealth,
                    },
                ))
                .expect("accepted");
            assert!(creature.expertise().contains(&Skill::Stealth));
        }

        #[test]
        fn grant_side_effects_revert_on_removal() {
            let mut creature = create_test_creature(1);
            let added = creature
                .add_feature(FeatureSpec::grant(
                    "Fire Resistance",
                    GrantKind::DamageResistance {
                        damage_type: DamageType::Fire,
                    },
                ))
                .expect("accepted");
            assert!(creature.damage_resistances().contains(&DamageType::Fire));

            creature.remove_feature(added.index).expect("accepted");
            assert!(creature.damage_resistances().is_empty());
            assert_eq!(creature.feature_points_spent(), 0);
        }

        #[test]
        fn removing_an_immunity_restores_a_surviving_resistance_grant() {
            let mut creature = create_test_creature(2);
            creature
                .add_feature(FeatureSpec::grant(
                    "Fire Resistance",
                    GrantKind::DamageResistance {
                        damage_type: DamageType::Fire,
                    },
                ))
                .expect("accepted");
            let immunity = creature
                .add_feature(FeatureSpec::grant(
                    "Fire Immunity",
                    GrantKind::DamageImmunity {
                        damage_type: DamageType::Fire,
                    },
                ))
                .expect("accepted");

            creature.remove_feature(immunity.index).expect("accepted");
            assert!(creature.damage_resistances().contains(&DamageType::Fire));
            assert!(creature.damage_immunities().is_empty());
        }

        #[test]
        fn immunity_upgrades_replace_resistance() {
            let mut creature = create_test_creature(2);
            creature
                .add_feature(FeatureSpec::grant(
                    "Fire Resistance",
                    GrantKind::DamageResistance {
                        damage_type: DamageType::Fire,
                    },
                ))
                .expect("accepted");
            creature
                .add_feature(FeatureSpec::grant(
                    "Fire Immunity",
                    GrantKind::DamageImmunity {
                        damage_type: DamageType::Fire,
                    },
                ))
                .expect("accepted");
            assert!(!creature.damage_resistances().contains(&DamageType::Fire));
            assert!(creature.damage_immunities().contains(&DamageType::Fire));
        }
    }

    mod spells {
        use super::*;

        #[test]
        fn action_economy_spells_require_spellcasting() {
            let mut creature = create_test_creature(3);
            let err = creature
                .add_feature(plain_spell(Recharge::None))
                .expect_err("no spellcasting yet");
            assert_eq!(err, DomainError::NoSpellcasting);
        }

        #[test]
        fn spells_draw_from_the_magic_point_pool() {
            // CR 1: caster level 2, pool of 4
            let mut creature = create_test_creature(1);
            grant_spellcasting(&mut creature, &[]);
            assert_eq!(creature.budget().magic_points.total, 4);

            let added = creature
                .add_feature(plain_spell(Recharge::None))
                .expect("accepted");
            assert_eq!(added.magic_points, 2);
            assert_eq!(creature.magic_points_used(), 2);

            creature
                .add_feature(plain_spell(Recharge::None))
                .expect("accepted");
            let err = creature
                .add_feature(plain_spell(Recharge::None))
                .expect_err("pool exhausted");
            assert_eq!(
                err,
                DomainError::InsufficientMagicPoints {
                    needed: 2,
                    available: 0
                }
            );
        }

        #[test]
        fn at_most_two_recharge_features() {
            // CR 3: pool of 8, cap of 6 spells - recharge is the binding cap
            let mut creature = create_test_creature(3);
            grant_spellcasting(&mut creature, &[]);

            creature
                .add_feature(plain_spell(Recharge::OnFourToSix))
                .expect("accepted");
            creature
                .add_feature(plain_spell(Recharge::OnFiveToSix))
                .expect("accepted");
            let err = creature
                .add_feature(plain_spell(Recharge::OnSix))
                .expect_err("recharge cap");
            assert_eq!(err, DomainError::RechargeCapReached { cap: RECHARGE_CAP });
        }

        #[test]
        fn action_economy_spell_count_caps_at_twice_proficiency() {
            // CR 10: proficiency 4 (cap 8), caster level 11 (pool 22)
            let mut creature = create_test_creature(10);
            grant_spellcasting(&mut creature, &[]);

            for _ in 0..8 {
                creature
                    .add_feature(plain_spell(Recharge::None))
                    .expect("under the cap");
            }
            let err = creature
                .add_feature(plain_spell(Recharge::None))
                .expect_err("spell cap");
            assert_eq!(err, DomainError::SpellActionCapReached { cap: 8 });
        }

        #[test]
        fn spellcasting_companions_follow_the_grant() {
            let mut creature = create_test_creature(1);
            grant_spellcasting(&mut creature, &["mage hand", "prestidigitation"]);

            let added = creature.features();
            assert_eq!(added.len(), 3);
            assert_eq!(creature.visible_features().count(), 1);

            let removed = creature.remove_feature(0).expect("accepted");
            assert_eq!(removed.companions_removed, 2);
            assert!(creature.features().is_empty());
        }

        #[test]
        fn spellcasting_cannot_be_removed_while_spells_remain() {
            let mut creature = create_test_creature(1);
            grant_spellcasting(&mut creature, &[]);
            creature
                .add_feature(plain_spell(Recharge::None))
                .expect("accepted");

            let err = creature.remove_feature(0).expect_err("spells remain");
            assert!(matches!(err, DomainError::Validation(_)));

            creature.remove_feature(1).expect("remove the spell first");
            creature.remove_feature(0).expect("now removable");
        }
    }

    mod updates {
        use super::*;

        #[test]
        fn update_keeps_the_free_slot_within_the_category() {
            let mut creature = create_test_creature(1);
            let added = creature.add_feature(action("Bite")).expect("accepted");

            creature
                .update_feature(added.index, action("Savage Bite"))
                .expect("accepted");
            let feature = &creature.features()[added.index];
            assert_eq!(feature.name(), "Savage Bite");
            assert!(feature.is_first());
            assert_eq!(creature.feature_points_spent(), 0);
        }

        #[test]
        fn moving_a_feature_across_categories_promotes_a_replacement() {
            let mut creature = create_test_creature(2);
            let first = creature.add_feature(action("Bite")).expect("accepted");
            creature.add_feature(action("Tail")).expect("accepted");

            creature
                .update_feature(first.index, ability("Bite Reflex"))
                .expect("accepted");

            // The remaining action inherits the free slot; the moved
            // feature takes the empty ability slot.
            let features = creature.features();
            assert!(features[0].is_first());
            assert_eq!(features[0].category(), FeatureCategory::Ability);
            assert!(features[1].is_first());
            assert_eq!(features[1].category(), FeatureCategory::Action);
            assert_eq!(creature.feature_points_spent(), 0);
        }

        #[test]
        fn update_revalidates_budgets_without_the_old_cost() {
            // CR 0: 2 feature points, all spent below
            let mut creature = create_test_creature(0);
            creature.add_feature(action("Bite")).expect("free");
            let second = creature.add_feature(action("Tail")).expect("accepted");
            creature.add_feature(ability("Keen Smell")).expect("free");
            creature.add_feature(ability("Pack Tactics")).expect("accepted");
            assert_eq!(creature.budget().feature_points.available(), 0);

            // Upgrading the paid action to legendary needs 2 points while
            // only its own refunded point is free
            let err = creature
                .update_feature(
                    second.index,
                    FeatureSpec::text_feature(
                        "Tail Sweep",
                        FeatureCategory::Legendary,
                        "Sweeps its tail.",
                    ),
                )
                .expect_err("cannot afford legendary");
            assert_eq!(
                err,
                DomainError::InsufficientFeaturePoints {
                    needed: 2,
                    available: 1
                }
            );
        }
    }

    mod hydration {
        use super::*;

        #[test]
        fn imported_features_rederive_free_slots_without_budget_checks() {
            let mut creature = create_test_creature(0);
            for name in ["Bite", "Claw", "Tail", "Wing", "Stomp"] {
                creature.import_feature(name, FeatureCategory::Action, "Attacks.");
            }
            assert_eq!(creature.visible_features().count(), 5);
            assert!(creature.features()[0].is_first());
            assert!(creature.features().iter().skip(1).all(|f| !f.is_first()));
            // Over budget is representable; spending more is not
            assert!(creature.budget().feature_points.available() < 0);
            assert!(creature.add_feature(action("Gore")).is_err());
        }
    }

    mod serde_round_trip {
        use super::*;

        #[test]
        fn serialize_deserialize_round_trip() {
            let mut creature = create_test_creature(2);
            creature.set_name("Mire Stalker").expect("valid name");
            creature.set_size(Size::Large);
            creature.set_armor(14, Some("natural armor".into())).expect("valid");
            creature
                .set_hit_points(45, Some("7d8+14".into()))
                .expect("valid");
            creature.add_skill(Skill::Stealth).expect("accepted");
            creature.add_saving_throw(Ability::Dexterity).expect("accepted");
            creature.add_sense(Sense::new(SenseType::Darkvision, 60));
            creature.add_language("Common");
            creature.add_feature(action("Bite")).expect("accepted");

            let json = serde_json::to_string(&creature).expect("serializes");
            let restored: Creature = serde_json::from_str(&json).expect("deserializes");
            assert_eq!(restored, creature);
        }

        #[test]
        fn missing_fields_take_defaults() {
            let restored: Creature =
                serde_json::from_str(r#"{"name": "Sparse"}"#).expect("deserializes");
            assert_eq!(restored.name(), "Sparse");
            assert_eq!(restored.size(), Size::Medium);
            assert_eq!(restored.challenge().rating(), 1);
            assert_eq!(restored.movement().get(MovementType::Walk), 30);
        }
    }
}
