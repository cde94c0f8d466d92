//! Regression coverage for the entity store.

use serde_json::{Value, json};

use crate::domain::{
    Department, DepartmentId, Email, Role, ScheduleId, Shift, ShiftId, ShiftTime, UserId,
    UserProfile, WorkSchedule,
};
use crate::query::filter::Filter;
use crate::store::{EntityStore, Row, SeedData};
use crate::table::Table;

fn seed() -> SeedData {
    let d1 = DepartmentId::new("d1").expect("valid id");
    let d2 = DepartmentId::new("d2").expect("valid id");
    SeedData {
        departments: vec![
            Department::new(d1.clone(), "Engineering"),
            Department::new(d2.clone(), "Sales"),
        ],
        users: vec![
            UserProfile::new(
                UserId::new("u2").expect("valid id"),
                "Maria Garcia",
                Email::new("admin@example.com").expect("valid email"),
                d1.clone(),
                Role::DeptAdmin,
            ),
            UserProfile::new(
                UserId::new("u3").expect("valid id"),
                "James Smith",
                Email::new("member1@example.com").expect("valid email"),
                d1.clone(),
                Role::Member,
            ),
        ],
        shifts: vec![Shift::new(
            ShiftId::new("s1").expect("valid id"),
            "Morning Shift",
            ShiftTime::parse("08:00").expect("valid time"),
            ShiftTime::parse("16:00").expect("valid time"),
            d1,
        )],
        work_schedules: vec![WorkSchedule::new(
            ScheduleId::new("ws1").expect("valid id"),
            UserId::new("u3").expect("valid id"),
            ShiftId::new("s1").expect("valid id"),
            chrono::NaiveDate::from_ymd_opt(2024, 7, 29).expect("valid date"),
            None,
            UserId::new("u2").expect("valid id"),
        )],
    }
}

fn eq(column: &str, value: Value) -> Filter {
    Filter::Eq {
        column: column.to_owned(),
        value,
    }
}

fn object(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

#[test]
fn snapshot_serializes_the_wire_shape() {
    let store = EntityStore::from_seed(seed());
    let rows = store.snapshot(Table::WorkSchedules).expect("snapshot");
    assert_eq!(rows.len(), 1);
    let first = rows.first().expect("one row");
    assert_eq!(first.get("id"), Some(&json!("ws1")));
    assert_eq!(first.get("work_date"), Some(&json!("2024-07-29")));
    assert_eq!(first.get("notes"), Some(&Value::Null));
}

#[test]
fn insert_assigns_identity_and_creation_stamp() {
    let mut store = EntityStore::from_seed(seed());
    let row = object(json!({
        "id": "caller-supplied",
        "user_id": "u3",
        "shift_id": "s1",
        "work_date": "2024-08-01",
        "notes": null,
        "created_by": "u2",
    }));

    let stored = store.insert_row(Table::WorkSchedules, row).expect("insert");
    let id = stored.get("id").and_then(Value::as_str).expect("generated id");
    assert_ne!(id, "caller-supplied");
    assert!(stored.get("created_at").is_some_and(|v| v.is_string()));

    let rows = store.snapshot(Table::WorkSchedules).expect("snapshot");
    assert_eq!(rows.len(), 2);
}

#[test]
fn insert_rejects_rows_that_break_the_schema() {
    let mut store = EntityStore::from_seed(seed());
    let row = object(json!({
        "user_id": "u3",
        "work_date": "2024-08-01",
    }));

    let err = store
        .insert_row(Table::WorkSchedules, row)
        .expect_err("missing columns must fail");
    assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
    let rows = store.snapshot(Table::WorkSchedules).expect("snapshot");
    assert_eq!(rows.len(), 1, "nothing was committed");
}

#[test]
fn update_merges_patch_into_matching_rows() {
    let mut store = EntityStore::from_seed(seed());
    let patch = object(json!({ "role": "DEPT_ADMIN" }));

    let updated = store
        .update_rows(Table::Profiles, &patch, &[eq("id", json!("u3"))])
        .expect("update");
    assert_eq!(updated, 1);

    let promoted = store
        .find_user_by_id(&UserId::new("u3").expect("valid id"))
        .expect("user still present");
    assert_eq!(promoted.role(), Role::DeptAdmin);
    assert_eq!(promoted.full_name(), "James Smith", "untouched columns survive");
}

#[test]
fn update_commits_nothing_when_any_target_fails_validation() {
    let mut store = EntityStore::from_seed(seed());
    let patch = object(json!({ "role": "SUPERUSER" }));

    let err = store
        .update_rows(Table::Profiles, &patch, &[])
        .expect_err("unknown role must fail");
    assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);

    let admin = store
        .find_user_by_id(&UserId::new("u2").expect("valid id"))
        .expect("user present");
    assert_eq!(admin.role(), Role::DeptAdmin, "store unchanged");
}

#[test]
fn update_with_no_matching_rows_is_a_no_op() {
    let mut store = EntityStore::from_seed(seed());
    let patch = object(json!({ "notes": "moved" }));

    let updated = store
        .update_rows(Table::WorkSchedules, &patch, &[eq("id", json!("ws999"))])
        .expect("update");
    assert_eq!(updated, 0);
}

#[test]
fn delete_removes_only_matching_rows() {
    let mut store = EntityStore::from_seed(seed());

    let removed = store
        .delete_rows(Table::Profiles, &[eq("id", json!("u3"))])
        .expect("delete");
    assert_eq!(removed, 1);

    assert!(store.find_user_by_id(&UserId::new("u3").expect("valid id")).is_none());
    assert!(store.find_user_by_id(&UserId::new("u2").expect("valid id")).is_some());
}

#[test]
fn users_are_found_by_exact_email() {
    let store = EntityStore::from_seed(seed());
    let email = Email::new("member1@example.com").expect("valid email");
    let user = store.find_user_by_email(&email).expect("user found");
    assert_eq!(user.id().as_str(), "u3");

    let missing = Email::new("nobody@example.com").expect("valid email");
    assert!(store.find_user_by_email(&missing).is_none());
}
