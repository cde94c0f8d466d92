//! Referential-integrity validation for seed datasets.
//!
//! The backend assumes every foreign key in its seed resolves. Validating
//! here keeps broken fixtures out of the store instead of surfacing as
//! confusing empty query results later.

use std::collections::HashSet;

use crate::dataset::SeedDataset;

/// Integrity violations detected in a seed dataset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeedValidationError {
    /// Two records in the same collection share an identifier.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId {
        /// Collection the duplicate was found in.
        kind: &'static str,
        /// The repeated identifier.
        id: String,
    },
    /// A user or shift references a department that does not exist.
    #[error("{owner} references unknown department {department_id}")]
    UnknownDepartment {
        /// Identifier of the referencing record.
        owner: String,
        /// The dangling department reference.
        department_id: String,
    },
    /// A work schedule references a user that does not exist.
    #[error("work schedule {schedule_id} references unknown user {user_id}")]
    UnknownUser {
        /// Identifier of the referencing schedule.
        schedule_id: String,
        /// The dangling user reference.
        user_id: String,
    },
    /// A work schedule references a shift that does not exist.
    #[error("work schedule {schedule_id} references unknown shift {shift_id}")]
    UnknownShift {
        /// Identifier of the referencing schedule.
        schedule_id: String,
        /// The dangling shift reference.
        shift_id: String,
    },
    /// A work schedule's creator does not exist.
    #[error("work schedule {schedule_id} was created by unknown user {created_by}")]
    UnknownCreator {
        /// Identifier of the referencing schedule.
        schedule_id: String,
        /// The dangling creator reference.
        created_by: String,
    },
}

impl SeedDataset {
    /// Check that every identifier is unique and every reference resolves.
    ///
    /// # Errors
    ///
    /// Returns the first [`SeedValidationError`] encountered, walking
    /// departments, then users, then shifts, then work schedules.
    pub fn validate(&self) -> Result<(), SeedValidationError> {
        let department_ids = unique_ids("department", self.departments.iter().map(|d| &d.id))?;
        let user_ids = unique_ids("user", self.users.iter().map(|u| &u.id))?;
        let shift_ids = unique_ids("shift", self.shifts.iter().map(|s| &s.id))?;
        unique_ids("work schedule", self.work_schedules.iter().map(|ws| &ws.id))?;

        for seeded_user in &self.users {
            if !department_ids.contains(seeded_user.department_id.as_str()) {
                return Err(SeedValidationError::UnknownDepartment {
                    owner: format!("user {}", seeded_user.id),
                    department_id: seeded_user.department_id.clone(),
                });
            }
        }

        for seeded_shift in &self.shifts {
            if !department_ids.contains(seeded_shift.department_id.as_str()) {
                return Err(SeedValidationError::UnknownDepartment {
                    owner: format!("shift {}", seeded_shift.id),
                    department_id: seeded_shift.department_id.clone(),
                });
            }
        }

        for schedule in &self.work_schedules {
            if !user_ids.contains(schedule.user_id.as_str()) {
                return Err(SeedValidationError::UnknownUser {
                    schedule_id: schedule.id.clone(),
                    user_id: schedule.user_id.clone(),
                });
            }
            if !shift_ids.contains(schedule.shift_id.as_str()) {
                return Err(SeedValidationError::UnknownShift {
                    schedule_id: schedule.id.clone(),
                    shift_id: schedule.shift_id.clone(),
                });
            }
            if !user_ids.contains(schedule.created_by.as_str()) {
                return Err(SeedValidationError::UnknownCreator {
                    schedule_id: schedule.id.clone(),
                    created_by: schedule.created_by.clone(),
                });
            }
        }

        Ok(())
    }
}

fn unique_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a String>,
) -> Result<HashSet<&'a str>, SeedValidationError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(SeedValidationError::DuplicateId {
                kind,
                id: id.clone(),
            });
        }
    }
    Ok(seen)
}
