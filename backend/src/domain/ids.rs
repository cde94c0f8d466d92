//! Newtype identifiers for the scheduling entities.
//!
//! Seeded identifiers are short mnemonic strings (`u3`, `d1`); identifiers
//! minted at insert time are UUID-backed. Both satisfy the same invariant:
//! non-empty and free of surrounding whitespace.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors shared by all identifier newtypes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// Identifier was empty.
    #[error("{entity} id must not be empty")]
    Empty {
        /// Entity the identifier belongs to.
        entity: &'static str,
    },
    /// Identifier carried leading or trailing whitespace.
    #[error("{entity} id must not contain surrounding whitespace")]
    SurroundingWhitespace {
        /// Entity the identifier belongs to.
        entity: &'static str,
    },
}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident, $entity:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct an identifier.
            pub fn new(value: impl Into<String>) -> Result<Self, IdValidationError> {
                Self::from_owned(value.into())
            }

            /// Mint a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            fn from_owned(value: String) -> Result<Self, IdValidationError> {
                if value.is_empty() {
                    return Err(IdValidationError::Empty { entity: $entity });
                }
                if value.trim() != value {
                    return Err(IdValidationError::SurroundingWhitespace { entity: $entity });
                }
                Ok(Self(value))
            }

            /// Borrow the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_owned(value)
            }
        }
    };
}

define_entity_id! {
    /// Stable department identifier.
    DepartmentId, "department"
}

define_entity_id! {
    /// Stable user identifier.
    UserId, "user"
}

define_entity_id! {
    /// Stable shift identifier.
    ShiftId, "shift"
}

define_entity_id! {
    /// Stable work-schedule identifier.
    ScheduleId, "work schedule"
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("")]
    #[case(" u1")]
    #[case("u1 ")]
    fn invalid_ids_are_rejected(#[case] raw: &str) {
        UserId::new(raw).expect_err("invalid id must fail");
    }

    #[test]
    fn seeded_mnemonic_ids_are_accepted() {
        let id = UserId::new("u3").expect("mnemonic id is valid");
        assert_eq!(id.as_str(), "u3");
    }

    #[test]
    fn random_ids_are_unique_and_valid() {
        let a = ScheduleId::random();
        let b = ScheduleId::random();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn ids_round_trip_through_serde() {
        let id = DepartmentId::new("d1").expect("valid id");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"d1\"");
        let back: DepartmentId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn whitespace_id_fails_deserialization() {
        serde_json::from_str::<UserId>("\" u1\"").expect_err("whitespace id must fail");
    }
}
