//! Feature entity - everything a creature can *do* or passively *have*
//!
//! A feature is one entry in the creature's ordered feature list: an
//! ability, an action, a bonus action, a reaction, or a legendary action.
//! What the entry actually does is captured by its [`FeatureKind`] facet;
//! the flags (`is_first`, `costs_feature_point`, `is_hidden`) are budget
//! bookkeeping owned by the creature aggregate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::FeatureId;
use crate::value_objects::{
    Ability, AreaSize, Condition, DamageType, DiceFormula, MovementType, Recharge, Sense,
    Skill, SpellCastingTime, SpellDuration, SpellRange,
};

/// Base number of attacks a multiattack grants.
pub const MULTIATTACK_BASE: u8 = 2;
/// Maximum attacks a multiattack can reach (base plus two increments).
pub const MULTIATTACK_MAX: u8 = 4;

/// Which section of the statblock a feature belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureCategory {
    Ability,
    Action,
    BonusAction,
    Reaction,
    Legendary,
}

impl FeatureCategory {
    pub const ALL: [FeatureCategory; 5] = [
        FeatureCategory::Ability,
        FeatureCategory::Action,
        FeatureCategory::BonusAction,
        FeatureCategory::Reaction,
        FeatureCategory::Legendary,
    ];

    /// Statblock section heading for this category.
    pub fn heading(&self) -> &'static str {
        match self {
            FeatureCategory::Ability => "Abilities",
            FeatureCategory::Action => "Actions",
            FeatureCategory::BonusAction => "Bonus Actions",
            FeatureCategory::Reaction => "Reactions",
            FeatureCategory::Legendary => "Legendary Actions",
        }
    }

    /// Feature-point cost of a regular (non-first) feature in this category.
    pub fn base_cost(&self) -> i32 {
        match self {
            FeatureCategory::Legendary => 2,
            _ => 1,
        }
    }

    /// Whether a feature of this category occupies the creature's action
    /// economy (relevant for the action-economy-spell cap).
    pub fn is_action_economy(&self) -> bool {
        matches!(
            self,
            FeatureCategory::Action | FeatureCategory::BonusAction | FeatureCategory::Reaction
        )
    }
}

impl fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

/// The ability an attack uses for its damage modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttackAbility {
    Strength,
    Dexterity,
}

impl AttackAbility {
    /// Symbol rendered in attack text ("STR" / "DEX").
    pub fn symbol(&self) -> &'static str {
        match self {
            AttackAbility::Strength => "STR",
            AttackAbility::Dexterity => "DEX",
        }
    }
}

/// Whether an attack is made in melee or at range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttackReach {
    Melee,
    Ranged { range_ft: u32 },
}

/// A rider on a weapon attack: extra damage or an inflicted condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecondaryEffect {
    Damage {
        dice: DiceFormula,
        damage_type: DamageType,
    },
    Condition {
        condition: Condition,
        text: String,
    },
}

/// Configuration of a weapon (or natural weapon) attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackProfile {
    pub reach: AttackReach,
    pub dice: DiceFormula,
    pub damage_type: DamageType,
    pub uses: AttackAbility,
    pub double_damage: bool,
    pub secondary: Option<SecondaryEffect>,
}

impl AttackProfile {
    pub fn new(
        reach: AttackReach,
        dice: DiceFormula,
        damage_type: DamageType,
        uses: AttackAbility,
    ) -> Self {
        Self {
            reach,
            dice,
            damage_type,
            uses,
            double_damage: false,
            secondary: None,
        }
    }

    pub fn with_double_damage(mut self) -> Self {
        self.double_damage = true;
        self
    }

    pub fn with_secondary(mut self, secondary: SecondaryEffect) -> Self {
        self.secondary = Some(secondary);
        self
    }
}

/// The multiattack tracker. At most one per creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Multiattack {
    attacks: u8,
}

impl Multiattack {
    pub fn new() -> Self {
        Self {
            attacks: MULTIATTACK_BASE,
        }
    }

    pub fn attacks(&self) -> u8 {
        self.attacks
    }

    pub fn at_cap(&self) -> bool {
        self.attacks >= MULTIATTACK_MAX
    }

    pub(crate) fn increment(&mut self) {
        debug_assert!(self.attacks < MULTIATTACK_MAX);
        self.attacks += 1;
    }
}

impl Default for Multiattack {
    fn default() -> Self {
        Self::new()
    }
}

/// How a damaging spell reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpellDelivery {
    AttackRoll {
        range: SpellRange,
    },
    SavingThrow {
        save: Ability,
        half_on_success: bool,
    },
}

/// A rider clause on a damaging spell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpellSecondary {
    Damage {
        dice: DiceFormula,
        damage_type: DamageType,
    },
    Condition {
        condition: Condition,
    },
    Other {
        text: String,
    },
}

/// The damaging ("spell attack") primary effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageSpell {
    pub delivery: SpellDelivery,
    pub dice: DiceFormula,
    pub damage_type: DamageType,
    pub area: Option<AreaSize>,
    pub secondary: Option<SpellSecondary>,
}

/// A defensive primary effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DefenseEffect {
    ArmorBonus { bonus: u8 },
    ConditionImmunity { condition: Condition },
}

/// A movement-adjusting primary effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MovementBoost {
    Gain {
        movement: MovementType,
        speed_ft: u32,
    },
    Double {
        movement: MovementType,
    },
}

/// What an action-economy spell fundamentally does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimaryEffect {
    Damage(DamageSpell),
    Defense(DefenseEffect),
    Healing { dice: u8 },
    Movement(MovementBoost),
    Control { save: Ability, condition: Condition },
}

/// Full configuration of an action-economy spell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellEffect {
    pub effect: PrimaryEffect,
    pub casting_time: SpellCastingTime,
    pub duration: SpellDuration,
    pub recharge: Recharge,
}

impl SpellEffect {
    /// The feature category a spell with this casting time belongs in.
    pub fn expected_category(&self) -> FeatureCategory {
        match self.casting_time {
            SpellCastingTime::Action => FeatureCategory::Action,
            SpellCastingTime::BonusAction => FeatureCategory::BonusAction,
            SpellCastingTime::Reaction => FeatureCategory::Reaction,
        }
    }
}

/// The spellcasting grant: unlocks the magic-point pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellcastingGrant {
    pub ability: Ability,
    pub caster_level: u8,
    pub at_will_spells: Vec<String>,
}

/// A passive improvement bought with feature points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GrantKind {
    SkillExpertise { skill: Skill },
    Sense { sense: Sense },
    DamageResistance { damage_type: DamageType },
    DamageImmunity { damage_type: DamageType },
    ConditionImmunity { condition: Condition },
}

impl GrantKind {
    /// Feature-point cost of the grant. Damage immunity is the only
    /// two-point grant.
    pub fn cost(&self) -> i32 {
        match self {
            GrantKind::DamageImmunity { .. } => 2,
            _ => 1,
        }
    }
}

/// The facet determining what a feature does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureKind {
    /// Free-text feature; its description is the stored text.
    Text,
    Attack(AttackProfile),
    Multiattack(Multiattack),
    Spell(SpellEffect),
    Spellcasting(SpellcastingGrant),
    Grant(GrantKind),
}

/// A proposed feature, as submitted by the builder UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSpec {
    pub name: String,
    pub category: FeatureCategory,
    pub kind: FeatureKind,
    /// Manual description for `Text` features, or a free-text addendum
    /// appended after generated rule text.
    pub text: Option<String>,
}

impl FeatureSpec {
    pub fn text_feature(
        name: impl Into<String>,
        category: FeatureCategory,
        text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            kind: FeatureKind::Text,
            text: Some(text.into()),
        }
    }

    pub fn attack(name: impl Into<String>, attack: AttackProfile) -> Self {
        Self {
            name: name.into(),
            category: FeatureCategory::Action,
            kind: FeatureKind::Attack(attack),
            text: None,
        }
    }

    pub fn spell(name: impl Into<String>, spell: SpellEffect) -> Self {
        let category = spell.expected_category();
        Self {
            name: name.into(),
            category,
            kind: FeatureKind::Spell(spell),
            text: None,
        }
    }

    pub fn spellcasting(name: impl Into<String>, grant: SpellcastingGrant) -> Self {
        Self {
            name: name.into(),
            category: FeatureCategory::Ability,
            kind: FeatureKind::Spellcasting(grant),
            text: None,
        }
    }

    pub fn grant(name: impl Into<String>, grant: GrantKind) -> Self {
        Self {
            name: name.into(),
            category: FeatureCategory::Ability,
            kind: FeatureKind::Grant(grant),
            text: None,
        }
    }
}

/// One entry in the creature's feature list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    id: FeatureId,
    name: String,
    category: FeatureCategory,
    kind: FeatureKind,
    text: Option<String>,
    costs_feature_point: bool,
    is_first: bool,
    is_hidden: bool,
    /// Magic points this feature consumed when it was committed. Zero for
    /// everything that is not an action-economy spell.
    magic_point_cost: i32,
}

impl Feature {
    pub(crate) fn from_spec(spec: FeatureSpec) -> Self {
        Self {
            id: FeatureId::new(),
            name: spec.name,
            category: spec.category,
            kind: spec.kind,
            text: spec.text,
            costs_feature_point: false,
            is_first: false,
            is_hidden: false,
            magic_point_cost: 0,
        }
    }

    /// A hidden bookkeeping entry, excluded from display and budgets.
    pub(crate) fn hidden(name: impl Into<String>, category: FeatureCategory) -> Self {
        Self {
            id: FeatureId::new(),
            name: name.into(),
            category,
            kind: FeatureKind::Text,
            text: None,
            costs_feature_point: false,
            is_first: false,
            is_hidden: true,
            magic_point_cost: 0,
        }
    }

    pub fn id(&self) -> FeatureId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> FeatureCategory {
        self.category
    }

    pub fn kind(&self) -> &FeatureKind {
        &self.kind
    }

    /// Stored manual text or addendum. Generated rule text is *not* stored
    /// here - it is recomputed on read by the creature aggregate.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn costs_feature_point(&self) -> bool {
        self.costs_feature_point
    }

    pub fn is_first(&self) -> bool {
        self.is_first
    }

    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    pub fn magic_point_cost(&self) -> i32 {
        self.magic_point_cost
    }

    /// The recharge limiter, when the feature has one.
    pub fn recharge(&self) -> Recharge {
        match &self.kind {
            FeatureKind::Spell(spell) => spell.recharge,
            _ => Recharge::None,
        }
    }

    /// Whether this feature may be promoted to the free slot of its
    /// category. Only plain features and attacks compete for the free
    /// slot; legendary actions, spells, grants, and bookkeeping entries
    /// always pay their own way.
    pub fn eligible_for_first(&self) -> bool {
        !self.is_hidden
            && self.category != FeatureCategory::Legendary
            && matches!(self.kind, FeatureKind::Text | FeatureKind::Attack(_))
    }

    pub(crate) fn mark_first(&mut self, is_first: bool) {
        self.is_first = is_first;
        if self.eligible_for_first() {
            self.costs_feature_point = !is_first;
        }
    }

    pub(crate) fn set_costs_feature_point(&mut self, costs: bool) {
        self.costs_feature_point = costs;
    }

    pub(crate) fn set_magic_point_cost(&mut self, cost: i32) {
        self.magic_point_cost = cost;
    }

    pub(crate) fn kind_mut(&mut self) -> &mut FeatureKind {
        &mut self.kind
    }

    /// Replace the editable configuration in place, keeping the id and the
    /// bookkeeping flags for the aggregate to re-derive.
    pub(crate) fn replace_spec(&mut self, spec: FeatureSpec) {
        self.name = spec.name;
        self.category = spec.category;
        self.kind = spec.kind;
        self.text = spec.text;
    }
}
