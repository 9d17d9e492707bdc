//! Aggregates of the creature domain

mod creature;

pub use creature::{Creature, MovementChangeKind, RECHARGE_CAP};
