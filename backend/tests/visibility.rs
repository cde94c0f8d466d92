//! End-to-end visibility scenarios over the fixture dataset.

use backend::test_support::{demo_client, login_as, texts};
use backend::{Join, Table};
use serde_json::Value;

#[tokio::test]
async fn leadership_sees_the_whole_organisation() {
    let client = demo_client();
    login_as(&client, "leader@example.com").await;

    let profiles = client
        .from(Table::Profiles)
        .resolve()
        .await
        .expect("query resolves");
    assert_eq!(
        texts(&profiles, "id"),
        vec!["u1", "u2", "u3", "u4", "u5", "u6"],
        "identity filter preserves input order"
    );

    let schedules = client
        .from(Table::WorkSchedules)
        .resolve()
        .await
        .expect("query resolves");
    assert_eq!(texts(&schedules, "id"), vec!["ws1", "ws2", "ws3"]);
}

#[tokio::test]
async fn dept_admin_sees_only_their_departments_schedules() {
    let client = demo_client();
    login_as(&client, "admin@example.com").await;

    // The store holds schedules for users in d1 and d2; only d1 comes back.
    let rows = client
        .from(Table::WorkSchedules)
        .attach(Join::User)
        .resolve()
        .await
        .expect("query resolves");

    assert_eq!(texts(&rows, "id"), vec!["ws1", "ws2"]);
    for row in &rows {
        let department = row
            .get("user")
            .and_then(|user| user.get("department_id"))
            .and_then(Value::as_str);
        assert_eq!(department, Some("d1"));
    }
}

#[tokio::test]
async fn dept_admin_sees_department_scoped_profiles_and_shifts() {
    let client = demo_client();
    login_as(&client, "salesadmin@example.com").await;

    let profiles = client
        .from(Table::Profiles)
        .resolve()
        .await
        .expect("query resolves");
    assert_eq!(texts(&profiles, "id"), vec!["u5", "u6"]);

    let shifts = client
        .from(Table::Shifts)
        .resolve()
        .await
        .expect("query resolves");
    assert_eq!(texts(&shifts, "id"), vec!["s4", "s5"]);
}

#[tokio::test]
async fn member_sees_their_own_rows_and_shared_reference_tables() {
    let client = demo_client();
    login_as(&client, "member1@example.com").await;

    let profiles = client
        .from(Table::Profiles)
        .resolve()
        .await
        .expect("query resolves");
    assert_eq!(texts(&profiles, "id"), vec!["u3"]);

    let schedules = client
        .from(Table::WorkSchedules)
        .resolve()
        .await
        .expect("query resolves");
    assert_eq!(texts(&schedules, "id"), vec!["ws1"]);

    // Visibility on shifts is broader than write access: members browse
    // every department's shifts, and everyone sees the department list.
    let shifts = client
        .from(Table::Shifts)
        .resolve()
        .await
        .expect("query resolves");
    assert_eq!(shifts.len(), 5);

    let departments = client
        .from(Table::Departments)
        .resolve()
        .await
        .expect("query resolves");
    assert_eq!(texts(&departments, "id"), vec!["d1", "d2", "d3"]);
}

#[tokio::test]
async fn every_table_is_empty_without_a_session() {
    let client = demo_client();
    for table in Table::ALL {
        let rows = client.from(table).resolve().await.expect("query resolves");
        assert!(rows.is_empty(), "{table} must fail closed");
    }
}

#[tokio::test]
async fn visibility_tracks_the_session_lifecycle() {
    let client = demo_client();

    login_as(&client, "leader@example.com").await;
    let before = client
        .from(Table::Profiles)
        .resolve()
        .await
        .expect("query resolves");
    assert_eq!(before.len(), 6);

    client.auth().logout().await.expect("logout succeeds");
    let after = client
        .from(Table::Profiles)
        .resolve()
        .await
        .expect("query resolves");
    assert!(after.is_empty());

    login_as(&client, "member2@example.com").await;
    let member_view = client
        .from(Table::Profiles)
        .resolve()
        .await
        .expect("query resolves");
    assert_eq!(texts(&member_view, "id"), vec!["u4"]);
}
