//! Test utilities for the backend crate.
//!
//! Shared helpers for unit tests (in `src/`) and integration tests (in
//! `tests/`), compiled only when the `test-support` feature is enabled —
//! the crate's own dev-dependency turns it on for every test build.

use std::time::Duration;

use serde_json::Value;

use crate::client::{Client, ClientOptions};
use crate::session::Session;
use crate::store::Row;

/// A zero-latency client over the fixture dataset.
///
/// # Panics
///
/// Panics if the fixture dataset fails conversion; it is validated by the
/// seed crate's own tests, so this indicates a broken build rather than a
/// runtime condition.
#[must_use]
pub fn demo_client() -> Client {
    let seed = match crate::seeding::seed_from_dataset(&seed_data::demo_dataset()) {
        Ok(seed) => seed,
        Err(err) => panic!("fixture dataset must convert: {err}"),
    };
    Client::with_options(
        seed,
        ClientOptions {
            latency: Duration::ZERO,
            ..ClientOptions::default()
        },
    )
}

/// Log in as a seeded user by email.
///
/// # Panics
///
/// Panics if the login fails; callers pass seeded emails.
pub async fn login_as(client: &Client, email: &str) -> Session {
    match client.auth().login(email, "password").await {
        Ok(session) => session,
        Err(err) => panic!("seeded login for {email} must succeed: {err}"),
    }
}

/// Pluck a string column from a row.
///
/// # Panics
///
/// Panics when the column is absent or not a string.
#[must_use]
pub fn text(row: &Row, column: &str) -> String {
    match row.get(column).and_then(Value::as_str) {
        Some(value) => value.to_owned(),
        None => panic!("row has no string column {column}: {row:?}"),
    }
}

/// Collect a string column across rows, in order.
#[must_use]
pub fn texts(rows: &[Row], column: &str) -> Vec<String> {
    rows.iter().map(|row| text(row, column)).collect()
}
