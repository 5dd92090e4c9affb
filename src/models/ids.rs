//! Strongly-typed ID wrappers for projects and expenses
//!
//! Newtypes keep a `ProjectId` from being passed where an `ExpenseId` is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short prefixed form shown in listings, e.g. `prj-1a2b3c4d`
            pub fn short(&self) -> String {
                format!("{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }

            /// Check whether a user-typed string names this ID
            ///
            /// Accepts the full UUID, the short display form, or a bare
            /// prefix of at least four hex digits.
            pub fn matches(&self, s: &str) -> bool {
                let s = s.trim();
                if let Ok(id) = s.parse::<Self>() {
                    return id == *self;
                }
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                s.len() >= 4 && self.0.simple().to_string().starts_with(&s.to_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.short())
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(ProjectId, "prj-");
define_id!(ExpenseId, "exp-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = ProjectId::new();
        let display = id.to_string();
        assert!(display.starts_with("prj-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_id_serialization() {
        let id = ExpenseId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: ExpenseId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_id_matches_short_and_full_forms() {
        let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let id = ProjectId::from(uuid);

        assert!(id.matches("550e8400-e29b-41d4-a716-446655440000"));
        assert!(id.matches("prj-550e8400"));
        assert!(id.matches("550e"));
        assert!(!id.matches("550"));
        assert!(!id.matches("prj-deadbeef"));
    }

    #[test]
    fn test_different_id_types_are_distinct() {
        let project_id = ProjectId::new();
        let expense_id = ExpenseId::new();
        assert_ne!(project_id.as_uuid(), expense_id.as_uuid());
        assert!(expense_id.to_string().starts_with("exp-"));
    }
}
