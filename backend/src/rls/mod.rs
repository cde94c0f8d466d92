//! Row-level-security emulation.
//!
//! The engine decides, for a caller identity and a table, which rows of a
//! candidate set are visible, and whether a mutation may proceed. It is a
//! pure function of its inputs: no clock, no store handle, no side effects.
//! Both checks fail closed when no caller is present.
//!
//! Visibility is the only concern the policy currently gates. Mutations
//! require an authenticated caller and nothing more — a deliberate
//! reproduction of the reference behavior rather than a feature; the
//! [`authorize_mutation`] seam is where a per-table, per-role write policy
//! would slot in.

use std::collections::HashSet;
use std::fmt;

use crate::domain::{Error, Role, UserProfile};
use crate::store::Row;
use crate::table::Table;

/// Mutation kinds subject to authorisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Appending a new row.
    Insert,
    /// Patching existing rows.
    Update,
    /// Removing existing rows.
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(label)
    }
}

/// Filter a candidate row set down to what the caller may see.
///
/// The visibility matrix, per table and role:
///
/// | table | leadership | dept admin | member |
/// |---|---|---|---|
/// | `profiles` | all | own department | own row |
/// | `work_schedules` | all | rows of users in own department | own rows |
/// | `shifts` | all | own department | all |
/// | `departments` | all | all | all |
///
/// `directory` is the live user table; the department-admin rule for
/// `work_schedules` resolves each row's `user_id` through it. An admin
/// whose department matches no user simply sees nothing — an orphaned
/// caller is an empty scope, not an error.
///
/// A `None` caller yields an empty set for every table. Row order is
/// preserved; the input is never mutated in place.
#[must_use]
pub fn filter_visible(
    caller: Option<&UserProfile>,
    table: Table,
    rows: Vec<Row>,
    directory: &[UserProfile],
) -> Vec<Row> {
    let Some(caller) = caller else {
        return Vec::new();
    };
    if caller.role() == Role::Leadership {
        return rows;
    }

    match table {
        Table::Profiles => {
            if caller.role() == Role::DeptAdmin {
                retain_matching(rows, "department_id", caller.department_id().as_str())
            } else {
                retain_matching(rows, "id", caller.id().as_str())
            }
        }
        Table::WorkSchedules => {
            if caller.role() == Role::DeptAdmin {
                let department: HashSet<&str> = directory
                    .iter()
                    .filter(|user| user.department_id() == caller.department_id())
                    .map(|user| user.id().as_str())
                    .collect();
                rows.into_iter()
                    .filter(|row| {
                        column_str(row, "user_id")
                            .is_some_and(|user_id| department.contains(user_id))
                    })
                    .collect()
            } else {
                retain_matching(rows, "user_id", caller.id().as_str())
            }
        }
        Table::Shifts => {
            if caller.role() == Role::DeptAdmin {
                retain_matching(rows, "department_id", caller.department_id().as_str())
            } else {
                // Members see every shift; visibility is broader than write access.
                rows
            }
        }
        Table::Departments => rows,
    }
}

/// Decide whether a mutation may proceed.
///
/// Any authenticated caller may attempt any write; an absent caller is
/// rejected with a `permission_denied` error.
///
/// # Errors
///
/// Fails when no caller identity is present.
pub fn authorize_mutation(
    caller: Option<&UserProfile>,
    table: Table,
    operation: Operation,
) -> Result<(), Error> {
    if caller.is_none() {
        tracing::warn!(table = %table, operation = %operation, "mutation rejected without caller identity");
        return Err(Error::permission_denied("permission denied"));
    }
    Ok(())
}

fn retain_matching(rows: Vec<Row>, column: &str, wanted: &str) -> Vec<Row> {
    rows.into_iter()
        .filter(|row| column_str(row, column) == Some(wanted))
        .collect()
}

fn column_str<'a>(row: &'a Row, column: &str) -> Option<&'a str> {
    row.get(column).and_then(serde_json::Value::as_str)
}
