//! The monster-design rule set: budgets, costs, and reference data

pub mod budget;
pub mod content;
pub mod costing;

pub use budget::{
    attribute_point_budget, magic_point_pool, saving_throw_cap, skill_cap,
    total_feature_points, BudgetReport, Pool,
};
pub use content::{
    armor_by_name, suggested_damage, weapon_by_name, Armor, DexBonus, WeaponTemplate, ARMORS,
    WEAPONS,
};
pub use costing::{
    feature_point_cost, magic_point_cost, ATTRIBUTE_GRANT_COST, ATTRIBUTE_GRANT_POINTS,
    MULTIATTACK_STEP_COST, SAVING_THROW_GRANT_COST,
};
