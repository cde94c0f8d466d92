//! Conversion from `seed-data` records into domain types.
//!
//! The seed crate stays independent of this crate's types; the bridge here
//! validates the dataset's referential integrity, then parses every record
//! into the domain representation at the point of use.

use chrono::NaiveDate;
use seed_data::{
    DepartmentSeed, RoleSeed, SeedDataset, ShiftSeed, UserSeed, WorkScheduleSeed,
};

use crate::domain::{
    Department, DepartmentId, Email, Error, Role, ScheduleId, Shift, ShiftId, ShiftTime, UserId,
    UserProfile, WorkSchedule,
};
use crate::store::SeedData;

impl From<RoleSeed> for Role {
    fn from(value: RoleSeed) -> Self {
        match value {
            RoleSeed::Member => Self::Member,
            RoleSeed::DeptAdmin => Self::DeptAdmin,
            RoleSeed::Leadership => Self::Leadership,
        }
    }
}

/// Validate and convert a seed dataset into store seed collections.
///
/// # Errors
///
/// Fails with `invalid_request` when the dataset is internally inconsistent
/// or any record fails domain validation (malformed id, email, time, or
/// date).
pub fn seed_from_dataset(dataset: &SeedDataset) -> Result<SeedData, Error> {
    dataset
        .validate()
        .map_err(|err| Error::invalid_request(format!("seed dataset rejected: {err}")))?;

    Ok(SeedData {
        departments: convert(&dataset.departments, department_from_seed)?,
        users: convert(&dataset.users, user_from_seed)?,
        shifts: convert(&dataset.shifts, shift_from_seed)?,
        work_schedules: convert(&dataset.work_schedules, schedule_from_seed)?,
    })
}

fn convert<S, T>(records: &[S], one: impl Fn(&S) -> Result<T, Error>) -> Result<Vec<T>, Error> {
    records.iter().map(one).collect()
}

fn department_from_seed(seed: &DepartmentSeed) -> Result<Department, Error> {
    Ok(Department::new(
        DepartmentId::new(seed.id.as_str()).map_err(invalid)?,
        seed.name.as_str(),
    ))
}

fn user_from_seed(seed: &UserSeed) -> Result<UserProfile, Error> {
    Ok(UserProfile::new(
        UserId::new(seed.id.as_str()).map_err(invalid)?,
        seed.full_name.as_str(),
        Email::new(seed.email.as_str()).map_err(invalid)?,
        DepartmentId::new(seed.department_id.as_str()).map_err(invalid)?,
        seed.role.into(),
    ))
}

fn shift_from_seed(seed: &ShiftSeed) -> Result<Shift, Error> {
    Ok(Shift::new(
        ShiftId::new(seed.id.as_str()).map_err(invalid)?,
        seed.name.as_str(),
        ShiftTime::parse(seed.start_time.as_str()).map_err(invalid)?,
        ShiftTime::parse(seed.end_time.as_str()).map_err(invalid)?,
        DepartmentId::new(seed.department_id.as_str()).map_err(invalid)?,
    ))
}

fn schedule_from_seed(seed: &WorkScheduleSeed) -> Result<WorkSchedule, Error> {
    let work_date = NaiveDate::parse_from_str(seed.work_date.as_str(), "%Y-%m-%d")
        .map_err(|err| Error::invalid_request(format!("work date {:?}: {err}", seed.work_date)))?;
    Ok(WorkSchedule::new(
        ScheduleId::new(seed.id.as_str()).map_err(invalid)?,
        UserId::new(seed.user_id.as_str()).map_err(invalid)?,
        ShiftId::new(seed.shift_id.as_str()).map_err(invalid)?,
        work_date,
        seed.notes.clone(),
        UserId::new(seed.created_by.as_str()).map_err(invalid)?,
    ))
}

fn invalid(err: impl std::fmt::Display) -> Error {
    Error::invalid_request(err.to_string())
}
