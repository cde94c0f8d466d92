//! Shift definitions and their wall-clock times.

use std::fmt;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{DepartmentId, ShiftId};

/// Parse errors returned by [`ShiftTime::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShiftTimeParseError {
    /// The value was not a `HH:MM` wall-clock time.
    #[error("shift time {value:?} is not in HH:MM format")]
    InvalidFormat {
        /// The rejected input.
        value: String,
    },
}

/// Wall-clock `HH:MM` time with no timezone or date attached.
///
/// Serialises as the `HH:MM` string the reference schema uses, which also
/// makes lexicographic comparison of serialized values agree with time
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShiftTime(NaiveTime);

impl ShiftTime {
    /// Parse a `HH:MM` string.
    pub fn parse(value: &str) -> Result<Self, ShiftTimeParseError> {
        NaiveTime::parse_from_str(value, "%H:%M")
            .map(Self)
            .map_err(|_| ShiftTimeParseError::InvalidFormat {
                value: value.to_owned(),
            })
    }

    /// The underlying naive time.
    #[must_use]
    pub fn as_naive(self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for ShiftTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl From<ShiftTime> for String {
    fn from(value: ShiftTime) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ShiftTime {
    type Error = ShiftTimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

/// A recurring shift a department schedules its members onto.
///
/// No ordering invariant holds between `start_time` and `end_time`: an
/// overnight shift such as 16:00–00:00 wraps past midnight and is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Shift {
    id: ShiftId,
    name: String,
    start_time: ShiftTime,
    end_time: ShiftTime,
    department_id: DepartmentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl Shift {
    /// Build a new shift from validated components.
    #[must_use]
    pub fn new(
        id: ShiftId,
        name: impl Into<String>,
        start_time: ShiftTime,
        end_time: ShiftTime,
        department_id: DepartmentId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            start_time,
            end_time,
            department_id,
            created_at: None,
        }
    }

    /// Stable shift identifier.
    #[must_use]
    pub fn id(&self) -> &ShiftId {
        &self.id
    }

    /// Human-readable shift name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Wall-clock start time.
    #[must_use]
    pub fn start_time(&self) -> ShiftTime {
        self.start_time
    }

    /// Wall-clock end time; may precede `start_time` for overnight shifts.
    #[must_use]
    pub fn end_time(&self) -> ShiftTime {
        self.end_time
    }

    /// Department the shift belongs to.
    #[must_use]
    pub fn department_id(&self) -> &DepartmentId {
        &self.department_id
    }

    /// Creation timestamp, present on rows inserted at runtime.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
