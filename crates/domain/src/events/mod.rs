//! Mutation outcome types
//!
//! Every accepted mutation on the creature record returns one of these,
//! communicating what actually happened - which feature became free, how
//! many bookkeeping entries were cleaned up, what a pool grew to. Rejections
//! travel separately as `DomainError`.

mod feature_events;

pub use feature_events::{
    FeatureAdded, FeatureRemoved, FeatureUpdated, GrantedPool, MovementChange,
    MultiattackOutcome, PoolGranted,
};
