//! Deterministic dataset expansion for demo-scale data.
//!
//! The fixture dataset is intentionally tiny. Calendar demos want fuller
//! departments, so this module grows a dataset with generated members and
//! work schedules. The same options always produce identical output: the
//! RNG is seeded explicitly and generated identifiers are counter-derived
//! rather than random.

use chrono::{Days, NaiveDate};
use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::dataset::{RoleSeed, SeedDataset, UserSeed, WorkScheduleSeed};

/// Probability numerator that a member works on a given day.
const WORKING_DAY_NUMERATOR: u32 = 5;

/// Probability denominator that a member works on a given day.
const WORKING_DAY_DENOMINATOR: u32 = 7;

/// Options controlling deterministic dataset expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandOptions {
    /// RNG seed; identical seeds produce identical output.
    pub seed: u64,
    /// Number of generated members added to each department.
    pub extra_members_per_department: usize,
    /// First calendar day schedules are generated for.
    pub start_date: NaiveDate,
    /// Number of consecutive days to generate schedules across.
    pub days: u32,
}

/// Failures raised by [`expand_dataset`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpandError {
    /// The dataset has no departments to attach generated members to.
    #[error("dataset has no departments")]
    NoDepartments,
    /// The requested date range overflows the calendar.
    #[error("date range starting {start} overflows after {days} days")]
    DateOverflow {
        /// First day of the requested range.
        start: NaiveDate,
        /// Requested length of the range.
        days: u32,
    },
}

/// Expand a dataset with generated members and work schedules.
///
/// Each department receives `extra_members_per_department` generated members;
/// each member is scheduled onto one of their department's shifts on roughly
/// five days out of seven across the requested range. Departments without
/// shifts get members but no schedules. Generated schedules are attributed
/// to the department's admin when one exists, otherwise to the member
/// themselves.
///
/// # Errors
///
/// Returns [`ExpandError::NoDepartments`] for an empty department list and
/// [`ExpandError::DateOverflow`] when the date range cannot be represented.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use seed_data::{ExpandOptions, demo_dataset, expand_dataset};
///
/// let options = ExpandOptions {
///     seed: 42,
///     extra_members_per_department: 2,
///     start_date: NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid date"),
///     days: 7,
/// };
/// let expanded = expand_dataset(&demo_dataset(), &options).expect("expansion succeeds");
/// let again = expand_dataset(&demo_dataset(), &options).expect("expansion succeeds");
///
/// // Same seed produces identical data.
/// assert_eq!(expanded, again);
/// ```
pub fn expand_dataset(
    dataset: &SeedDataset,
    options: &ExpandOptions,
) -> Result<SeedDataset, ExpandError> {
    if dataset.departments.is_empty() {
        return Err(ExpandError::NoDepartments);
    }
    let dates = date_range(options.start_date, options.days)?;

    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let mut expanded = dataset.clone();
    let mut user_counter = expanded.users.len();
    let mut schedule_counter = expanded.work_schedules.len();

    for department in &dataset.departments {
        let shift_ids: Vec<&str> = dataset
            .shifts
            .iter()
            .filter(|s| s.department_id == department.id)
            .map(|s| s.id.as_str())
            .collect();
        let admin_id = dataset
            .users
            .iter()
            .find(|u| u.department_id == department.id && u.role == RoleSeed::DeptAdmin)
            .map(|u| u.id.clone());

        for _ in 0..options.extra_members_per_department {
            user_counter += 1;
            let member = generate_member(&mut rng, user_counter, &department.id);
            let created_by = admin_id.clone().unwrap_or_else(|| member.id.clone());

            for date in &dates {
                let Some(shift_id) = pick_shift(&mut rng, &shift_ids) else {
                    break;
                };
                if !rng.random_ratio(WORKING_DAY_NUMERATOR, WORKING_DAY_DENOMINATOR) {
                    continue;
                }
                schedule_counter += 1;
                expanded.work_schedules.push(WorkScheduleSeed {
                    id: format!("gen-ws{schedule_counter}"),
                    user_id: member.id.clone(),
                    shift_id: shift_id.to_owned(),
                    work_date: date.format("%Y-%m-%d").to_string(),
                    notes: None,
                    created_by: created_by.clone(),
                });
            }

            expanded.users.push(member);
        }
    }

    Ok(expanded)
}

fn date_range(start: NaiveDate, days: u32) -> Result<Vec<NaiveDate>, ExpandError> {
    let mut dates = Vec::with_capacity(days as usize);
    for offset in 0..days {
        let date = start
            .checked_add_days(Days::new(u64::from(offset)))
            .ok_or(ExpandError::DateOverflow { start, days })?;
        dates.push(date);
    }
    Ok(dates)
}

fn generate_member(rng: &mut ChaCha8Rng, counter: usize, department_id: &str) -> UserSeed {
    let first: String = FirstName(EN).fake_with_rng(rng);
    let last: String = LastName(EN).fake_with_rng(rng);
    let full_name = format!("{first} {last}");
    UserSeed {
        id: format!("gen-u{counter}"),
        email: format!("{}.{counter}@example.com", email_slug(&full_name)),
        full_name,
        department_id: department_id.to_owned(),
        role: RoleSeed::Member,
    }
}

fn pick_shift<'a>(rng: &mut ChaCha8Rng, shift_ids: &[&'a str]) -> Option<&'a str> {
    if shift_ids.is_empty() {
        return None;
    }
    shift_ids.get(rng.random_range(0..shift_ids.len())).copied()
}

/// Lower-case a name into an email local part, dropping anything that is not
/// an ASCII letter or digit and joining words with dots.
fn email_slug(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::demo_dataset;

    fn options() -> ExpandOptions {
        ExpandOptions {
            seed: 7,
            extra_members_per_department: 3,
            start_date: NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid date"),
            days: 14,
        }
    }

    #[test]
    fn expansion_is_deterministic() {
        let first = expand_dataset(&demo_dataset(), &options()).expect("expansion succeeds");
        let second = expand_dataset(&demo_dataset(), &options()).expect("expansion succeeds");
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_diverge() {
        let base = expand_dataset(&demo_dataset(), &options()).expect("expansion succeeds");
        let other = expand_dataset(
            &demo_dataset(),
            &ExpandOptions {
                seed: 8,
                ..options()
            },
        )
        .expect("expansion succeeds");
        assert_ne!(base, other);
    }

    #[test]
    fn expanded_dataset_still_validates() {
        let expanded = expand_dataset(&demo_dataset(), &options()).expect("expansion succeeds");
        expanded.validate().expect("expanded dataset is consistent");
    }

    #[test]
    fn members_are_added_to_every_department() {
        let expanded = expand_dataset(&demo_dataset(), &options()).expect("expansion succeeds");
        for department in &expanded.departments {
            let members = expanded
                .users
                .iter()
                .filter(|u| u.department_id == department.id && u.id.starts_with("gen-u"))
                .count();
            assert_eq!(members, 3, "department {} gained members", department.id);
        }
    }

    #[test]
    fn marketing_has_members_but_no_generated_schedules() {
        // d3 has no shifts, so its generated members cannot be scheduled.
        let expanded = expand_dataset(&demo_dataset(), &options()).expect("expansion succeeds");
        let marketing_members: Vec<&str> = expanded
            .users
            .iter()
            .filter(|u| u.department_id == "d3")
            .map(|u| u.id.as_str())
            .collect();
        assert!(!marketing_members.is_empty());
        assert!(
            !expanded
                .work_schedules
                .iter()
                .any(|ws| marketing_members.contains(&ws.user_id.as_str()))
        );
    }

    #[test]
    fn empty_department_list_is_rejected() {
        let err = expand_dataset(&SeedDataset::default(), &options()).expect_err("must fail");
        assert_eq!(err, ExpandError::NoDepartments);
    }
}
