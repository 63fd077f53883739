use serde::{Deserialize, Serialize};
use std::fmt;

/// Active/Inactive flag shared by customers and invoices. Stored as a
/// boolean column, rendered as the literal strings in JSON.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EntityStatus {
    #[default]
    Active,
    Inactive,
}

impl EntityStatus {
    pub fn as_bool(self) -> bool {
        matches!(self, EntityStatus::Active)
    }

    pub fn from_bool(active: bool) -> Self {
        if active {
            EntityStatus::Active
        } else {
            EntityStatus::Inactive
        }
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityStatus::Active => write!(f, "Active"),
            EntityStatus::Inactive => write!(f, "Inactive"),
        }
    }
}
