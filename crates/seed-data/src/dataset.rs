//! Seed record types and the reference fixture dataset.
//!
//! These types mirror the backend's domain entities without depending on
//! them. Dates and times are carried as strings in the wire shape the
//! backend expects (`YYYY-MM-DD` work dates, `HH:MM` shift times); the
//! backend parses and validates them on conversion.

use serde::{Deserialize, Serialize};

/// Role of a seeded user.
///
/// Mirrors the backend's `Role` enum without creating a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleSeed {
    /// Regular department member.
    Member,
    /// Administrator of a single department.
    DeptAdmin,
    /// Organisation-wide leadership.
    Leadership,
}

/// A seeded department record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSeed {
    /// Unique identifier of the department.
    pub id: String,
    /// Human-readable department name.
    pub name: String,
}

/// A seeded user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSeed {
    /// Unique identifier of the user.
    pub id: String,
    /// Full display name.
    pub full_name: String,
    /// Login email; unique across the dataset.
    pub email: String,
    /// Department the user belongs to.
    pub department_id: String,
    /// Authorisation role.
    pub role: RoleSeed,
}

/// A seeded shift definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSeed {
    /// Unique identifier of the shift.
    pub id: String,
    /// Human-readable shift name.
    pub name: String,
    /// Wall-clock start as `HH:MM`.
    pub start_time: String,
    /// Wall-clock end as `HH:MM`; may wrap past midnight.
    pub end_time: String,
    /// Department the shift belongs to.
    pub department_id: String,
}

/// A seeded work-schedule assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkScheduleSeed {
    /// Unique identifier of the assignment.
    pub id: String,
    /// User working the shift.
    pub user_id: String,
    /// Shift being worked.
    pub shift_id: String,
    /// Calendar date as `YYYY-MM-DD`.
    pub work_date: String,
    /// Optional free-form note.
    pub notes: Option<String>,
    /// User who created the assignment.
    pub created_by: String,
}

/// A complete seed dataset for the scheduling backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedDataset {
    /// Departments, referenced by users and shifts.
    pub departments: Vec<DepartmentSeed>,
    /// Users, referenced by work schedules.
    pub users: Vec<UserSeed>,
    /// Shift definitions, referenced by work schedules.
    pub shifts: Vec<ShiftSeed>,
    /// Work-schedule assignments.
    pub work_schedules: Vec<WorkScheduleSeed>,
}

/// The reference fixture dataset.
///
/// Three departments, a leadership user plus admin/member users split across
/// Engineering and Sales, five shifts, and three work schedules. The record
/// contents match the reference deployment exactly so tests and demos agree
/// on identifiers.
#[must_use]
pub fn demo_dataset() -> SeedDataset {
    SeedDataset {
        departments: vec![
            department("d1", "Engineering"),
            department("d2", "Sales"),
            department("d3", "Marketing"),
        ],
        users: vec![
            user("u1", "Alex Johnson", "leader@example.com", "d1", RoleSeed::Leadership),
            user("u2", "Maria Garcia", "admin@example.com", "d1", RoleSeed::DeptAdmin),
            user("u3", "James Smith", "member1@example.com", "d1", RoleSeed::Member),
            user("u4", "Patricia Williams", "member2@example.com", "d1", RoleSeed::Member),
            user("u5", "John Brown", "salesadmin@example.com", "d2", RoleSeed::DeptAdmin),
            user("u6", "Jennifer Jones", "salesmember@example.com", "d2", RoleSeed::Member),
        ],
        shifts: vec![
            shift("s1", "Morning Shift", "08:00", "16:00", "d1"),
            shift("s2", "Afternoon Shift", "16:00", "00:00", "d1"),
            shift("s3", "Night Shift", "00:00", "08:00", "d1"),
            shift("s4", "Sales AM", "09:00", "17:00", "d2"),
            shift("s5", "Sales PM", "12:00", "20:00", "d2"),
        ],
        work_schedules: vec![
            WorkScheduleSeed {
                id: "ws1".to_owned(),
                user_id: "u3".to_owned(),
                shift_id: "s1".to_owned(),
                work_date: "2024-07-29".to_owned(),
                notes: Some("Project kickoff".to_owned()),
                created_by: "u2".to_owned(),
            },
            WorkScheduleSeed {
                id: "ws2".to_owned(),
                user_id: "u4".to_owned(),
                shift_id: "s2".to_owned(),
                work_date: "2024-07-29".to_owned(),
                notes: None,
                created_by: "u2".to_owned(),
            },
            WorkScheduleSeed {
                id: "ws3".to_owned(),
                user_id: "u6".to_owned(),
                shift_id: "s4".to_owned(),
                work_date: "2024-07-30".to_owned(),
                notes: Some("Client meeting".to_owned()),
                created_by: "u5".to_owned(),
            },
        ],
    }
}

fn department(id: &str, name: &str) -> DepartmentSeed {
    DepartmentSeed {
        id: id.to_owned(),
        name: name.to_owned(),
    }
}

fn user(id: &str, full_name: &str, email: &str, department_id: &str, role: RoleSeed) -> UserSeed {
    UserSeed {
        id: id.to_owned(),
        full_name: full_name.to_owned(),
        email: email.to_owned(),
        department_id: department_id.to_owned(),
        role,
    }
}

fn shift(id: &str, name: &str, start: &str, end: &str, department_id: &str) -> ShiftSeed {
    ShiftSeed {
        id: id.to_owned(),
        name: name.to_owned(),
        start_time: start.to_owned(),
        end_time: end.to_owned(),
        department_id: department_id.to_owned(),
    }
}
