//! Domain primitives and aggregates.
//!
//! Purpose: define the strongly typed scheduling entities shared by the
//! store, the access rule engine, and the session manager. Types are
//! immutable; each documents its invariants and serde wire contract, which
//! doubles as the dynamic row shape the query façade operates on.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — structured failure payload for the façade.
//! - `Department`, `UserProfile` (+`Role`, `Email`), `Shift` (+`ShiftTime`),
//!   `WorkSchedule` — the four seeded tables.
//! - Identifier newtypes for each entity.

pub mod department;
pub mod error;
pub mod ids;
pub mod schedule;
pub mod shift;
pub mod user;

pub use self::department::Department;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{DepartmentId, IdValidationError, ScheduleId, ShiftId, UserId};
pub use self::schedule::WorkSchedule;
pub use self::shift::{Shift, ShiftTime, ShiftTimeParseError};
pub use self::user::{Email, EmailValidationError, Role, UserProfile};
