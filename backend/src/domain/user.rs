//! User profile data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{DepartmentId, UserId};

/// Authorisation role attached to a user profile.
///
/// Wire names follow the reference schema: `MEMBER`, `DEPT_ADMIN`,
/// `LEADERSHIP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular department member; sees their own records.
    Member,
    /// Administrator of a single department; sees their department.
    DeptAdmin,
    /// Organisation-wide leadership; sees everything.
    Leadership,
}

/// Validation errors returned by [`Email::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    /// Email was empty.
    #[error("email must not be empty")]
    Empty,
    /// Email carried leading or trailing whitespace.
    #[error("email must not contain surrounding whitespace")]
    SurroundingWhitespace,
    /// Email did not contain an `@` separator.
    #[error("email must contain an @ sign")]
    MissingAtSign,
}

/// Login email address.
///
/// Lookup is by exact equality, so the invariant is deliberately light:
/// non-empty, trimmed, and containing an `@` separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an email address.
    pub fn new(value: impl Into<String>) -> Result<Self, EmailValidationError> {
        Self::from_owned(value.into())
    }

    fn from_owned(value: String) -> Result<Self, EmailValidationError> {
        if value.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if value.trim() != value {
            return Err(EmailValidationError::SurroundingWhitespace);
        }
        if !value.contains('@') {
            return Err(EmailValidationError::MissingAtSign);
        }
        Ok(Self(value))
    }

    /// Borrow the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Application user profile.
///
/// ## Invariants
/// - `department_id` references an existing department; every user belongs
///   to exactly one department.
/// - `email` is unique across the store (enforced by seed validation, not
///   re-checked per write).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserProfile {
    id: UserId,
    full_name: String,
    email: Email,
    department_id: DepartmentId,
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Build a new profile from validated components.
    #[must_use]
    pub fn new(
        id: UserId,
        full_name: impl Into<String>,
        email: Email,
        department_id: DepartmentId,
        role: Role,
    ) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            email,
            department_id,
            role,
            created_at: None,
        }
    }

    /// Stable user identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Login email address.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Department the user belongs to.
    #[must_use]
    pub fn department_id(&self) -> &DepartmentId {
        &self.department_id
    }

    /// Authorisation role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Creation timestamp, present on rows inserted at runtime.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", EmailValidationError::Empty)]
    #[case(" a@b.example", EmailValidationError::SurroundingWhitespace)]
    #[case("not-an-email", EmailValidationError::MissingAtSign)]
    fn invalid_emails_are_rejected(#[case] raw: &str, #[case] expected: EmailValidationError) {
        let err = Email::new(raw).expect_err("invalid email must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn role_uses_reference_wire_names() {
        let role = serde_json::to_string(&Role::DeptAdmin).expect("serialize");
        assert_eq!(role, "\"DEPT_ADMIN\"");
        let back: Role = serde_json::from_str("\"MEMBER\"").expect("deserialize");
        assert_eq!(back, Role::Member);
    }

    #[test]
    fn profile_round_trips_through_serde() {
        let profile = UserProfile::new(
            UserId::new("u3").expect("valid id"),
            "James Smith",
            Email::new("member1@example.com").expect("valid email"),
            DepartmentId::new("d1").expect("valid id"),
            Role::Member,
        );
        let json = serde_json::to_value(&profile).expect("serialize");
        assert_eq!(json["id"], "u3");
        assert_eq!(json["role"], "MEMBER");
        assert!(json.get("created_at").is_none(), "seed rows carry no stamp");
        let back: UserProfile = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, profile);
    }

    #[test]
    fn unknown_profile_field_is_rejected() {
        let json = serde_json::json!({
            "id": "u1",
            "full_name": "Alex Johnson",
            "email": "leader@example.com",
            "department_id": "d1",
            "role": "LEADERSHIP",
            "favourite_colour": "teal",
        });
        serde_json::from_value::<UserProfile>(json).expect_err("unknown field must fail");
    }
}
