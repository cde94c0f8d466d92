//! Department data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::DepartmentId;

/// Organisational department.
///
/// Immutable reference data in this scope: departments are created and
/// deleted through an external admin workflow, and every user and shift
/// belongs to exactly one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Department {
    id: DepartmentId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl Department {
    /// Build a new department from validated components.
    #[must_use]
    pub fn new(id: DepartmentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: None,
        }
    }

    /// Stable department identifier.
    #[must_use]
    pub fn id(&self) -> &DepartmentId {
        &self.id
    }

    /// Human-readable department name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
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
    use super::*;

    #[test]
    fn department_round_trips_through_serde() {
        let department = Department::new(
            DepartmentId::new("d1").expect("valid id"),
            "Engineering",
        );
        let json = serde_json::to_value(&department).expect("serialize");
        assert_eq!(json["id"], "d1");
        assert_eq!(json["name"], "Engineering");
        let back: Department = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, department);
    }
}
