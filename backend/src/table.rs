//! Table registry.
//!
//! The reference implementation dispatched on raw table-name strings at
//! every call site. Here each table is a variant resolved once at the
//! façade boundary; the registry owns the wire names and the per-table
//! join specifications.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Error;

/// The four tables exposed by the scheduling data core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    /// Organisational departments.
    Departments,
    /// User profiles.
    Profiles,
    /// Shift definitions.
    Shifts,
    /// Work-schedule assignments.
    WorkSchedules,
}

/// A denormalised relation a query may attach to each result row.
///
/// The joined record is looked up by foreign key at resolve time; a lookup
/// miss leaves the field absent rather than failing the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinSpec {
    /// Field name the joined record is attached under.
    pub field: &'static str,
    /// Table the joined record is read from.
    pub source: Table,
    /// Column on the queried row holding the foreign key.
    pub foreign_key: &'static str,
}

const WORK_SCHEDULE_JOINS: [JoinSpec; 2] = [
    JoinSpec {
        field: "user",
        source: Table::Profiles,
        foreign_key: "user_id",
    },
    JoinSpec {
        field: "shift",
        source: Table::Shifts,
        foreign_key: "shift_id",
    },
];

impl Table {
    /// Every table, in seed order.
    pub const ALL: [Self; 4] = [
        Self::Departments,
        Self::Profiles,
        Self::Shifts,
        Self::WorkSchedules,
    ];

    /// Wire name of the table.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Departments => "departments",
            Self::Profiles => "profiles",
            Self::Shifts => "shifts",
            Self::WorkSchedules => "work_schedules",
        }
    }

    /// Resolve a wire name to a table.
    ///
    /// # Errors
    ///
    /// Fails with an `unknown_table` error for any unrecognised name.
    pub fn parse(name: &str) -> Result<Self, Error> {
        Self::ALL
            .into_iter()
            .find(|table| table.name() == name)
            .ok_or_else(|| Error::unknown_table(name))
    }

    /// Relations that may be attached to this table's rows.
    #[must_use]
    pub fn join_specs(self) -> &'static [JoinSpec] {
        match self {
            Self::WorkSchedules => &WORK_SCHEDULE_JOINS,
            Self::Departments | Self::Profiles | Self::Shifts => &[],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
