//! Work-schedule assignments.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{ScheduleId, ShiftId, UserId};

/// A user scheduled onto a shift for a calendar date.
///
/// ## Invariants
/// - `user_id`, `shift_id`, and `created_by` reference existing records.
/// - No uniqueness constraint holds on `(user_id, work_date)`: multiple
///   shifts per user per day are structurally permitted, and no conflict
///   checker rejects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkSchedule {
    id: ScheduleId,
    user_id: UserId,
    shift_id: ShiftId,
    work_date: NaiveDate,
    notes: Option<String>,
    created_by: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl WorkSchedule {
    /// Build a new assignment from validated components.
    #[must_use]
    pub fn new(
        id: ScheduleId,
        user_id: UserId,
        shift_id: ShiftId,
        work_date: NaiveDate,
        notes: Option<String>,
        created_by: UserId,
    ) -> Self {
        Self {
            id,
            user_id,
            shift_id,
            work_date,
            notes,
            created_by,
            created_at: None,
        }
    }

    /// Stable assignment identifier.
    #[must_use]
    pub fn id(&self) -> &ScheduleId {
        &self.id
    }

    /// User working the shift.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Shift being worked.
    #[must_use]
    pub fn shift_id(&self) -> &ShiftId {
        &self.shift_id
    }

    /// Calendar date of the assignment.
    #[must_use]
    pub fn work_date(&self) -> NaiveDate {
        self.work_date
    }

    /// Optional free-form note.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// User who created the assignment.
    #[must_use]
    pub fn created_by(&self) -> &UserId {
        &self.created_by
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

    fn schedule() -> WorkSchedule {
        WorkSchedule::new(
            ScheduleId::new("ws1").expect("valid id"),
            UserId::new("u3").expect("valid id"),
            ShiftId::new("s1").expect("valid id"),
            NaiveDate::from_ymd_opt(2024, 7, 29).expect("valid date"),
            Some("Project kickoff".to_owned()),
            UserId::new("u2").expect("valid id"),
        )
    }

    #[test]
    fn schedule_serializes_date_as_wire_string() {
        let json = serde_json::to_value(schedule()).expect("serialize");
        assert_eq!(json["work_date"], "2024-07-29");
        assert_eq!(json["notes"], "Project kickoff");
        let back: WorkSchedule = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, schedule());
    }

    #[test]
    fn absent_notes_serialize_as_null() {
        let base = schedule();
        let no_notes = WorkSchedule::new(
            base.id().clone(),
            base.user_id().clone(),
            base.shift_id().clone(),
            base.work_date(),
            None,
            base.created_by().clone(),
        );
        let json = serde_json::to_value(&no_notes).expect("serialize");
        assert!(json["notes"].is_null(), "notes column stays present on the wire");
    }
}
