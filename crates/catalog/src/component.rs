use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use railstock_core::{ComponentId, DomainError, DomainResult};

/// Longest accepted component name.
pub const NAME_MAX_LEN: usize = 100;

/// Longest accepted unique number.
pub const UNIQUE_NUMBER_MAX_LEN: usize = 50;

/// A single catalog record describing one type of train part.
///
/// Invariant: `quantity` is non-null only while `can_assign_quantity` is true,
/// and once set it is a positive integer. The flag itself is fixed at creation;
/// nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub unique_number: String,
    pub can_assign_quantity: bool,
    pub quantity: Option<i64>,
    /// Concurrency token; the store bumps it on every successful update.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Component {
    /// Case-insensitive substring match over `name` OR `unique_number`.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.unique_number.to_lowercase().contains(&term)
    }

    /// Set a new stock level on a quantity-assignable component.
    pub fn assign_quantity(&mut self, quantity: i64) -> DomainResult<()> {
        if !self.can_assign_quantity {
            return Err(DomainError::validation(
                "quantity cannot be assigned to this component",
            ));
        }
        if quantity < 1 {
            return Err(DomainError::validation(
                "quantity must be a positive integer",
            ));
        }
        self.quantity = Some(quantity);
        Ok(())
    }
}

/// Validated input for creating a component.
///
/// Construction is the only way to obtain a draft, so every draft the store
/// sees already satisfies the field invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDraft {
    name: String,
    unique_number: String,
    can_assign_quantity: bool,
    quantity: Option<i64>,
}

impl ComponentDraft {
    /// Validate raw creation input.
    ///
    /// `name` and `unique_number` are trimmed before the emptiness/length
    /// checks. A quantity supplied for a component that cannot carry one is
    /// discarded, not rejected.
    pub fn new(
        name: &str,
        unique_number: &str,
        can_assign_quantity: bool,
        quantity: Option<i64>,
    ) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("component name is required"));
        }
        if name.chars().count() > NAME_MAX_LEN {
            return Err(DomainError::validation(format!(
                "component name cannot exceed {NAME_MAX_LEN} characters"
            )));
        }

        let unique_number = unique_number.trim();
        if unique_number.is_empty() {
            return Err(DomainError::validation("unique number is required"));
        }
        if unique_number.chars().count() > UNIQUE_NUMBER_MAX_LEN {
            return Err(DomainError::validation(format!(
                "unique number cannot exceed {UNIQUE_NUMBER_MAX_LEN} characters"
            )));
        }

        let quantity = if can_assign_quantity {
            match quantity {
                Some(q) if q >= 1 => Some(q),
                Some(_) => {
                    return Err(DomainError::validation(
                        "quantity must be a positive integer when it can be assigned",
                    ));
                }
                None => {
                    return Err(DomainError::validation(
                        "quantity is required when it can be assigned",
                    ));
                }
            }
        } else {
            None
        };

        Ok(Self {
            name: name.to_string(),
            unique_number: unique_number.to_string(),
            can_assign_quantity,
            quantity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unique_number(&self) -> &str {
        &self.unique_number
    }

    pub fn can_assign_quantity(&self) -> bool {
        self.can_assign_quantity
    }

    pub fn quantity(&self) -> Option<i64> {
        self.quantity
    }
}
