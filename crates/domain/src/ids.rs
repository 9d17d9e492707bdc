use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a feature entry on the creature record.
///
/// Feature order in the record still matters for display and for the
/// free-first promotion rules; the id exists so companion bookkeeping
/// entries and mutation outcomes can reference a feature stably across
/// reorderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureId(Uuid);

impl FeatureId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for FeatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for FeatureId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<FeatureId> for Uuid {
    fn from(value: FeatureId) -> Self {
        value.0
    }
}
