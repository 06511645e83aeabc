//! Strongly-typed identifier for catalog components.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a component record.
///
/// Assigned sequentially by the store at insert time, immutable thereafter.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ComponentId(i64);

impl ComponentId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for ComponentId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ComponentId> for i64 {
    fn from(value: ComponentId) -> Self {
        value.0
    }
}

impl FromStr for ComponentId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .parse::<i64>()
            .map_err(|e| DomainError::validation(format!("ComponentId: {e}")))?;
        Ok(Self(id))
    }
}
