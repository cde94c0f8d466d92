//! In-memory entity store.
//!
//! The store owns the four entity collections for the process lifetime. It
//! is initialised once from seed data and shared behind a lock; callers
//! never receive references into it — reads serialize rows into the dynamic
//! representation (copy-on-read), and writes go through the typed mutation
//! operations below, which validate against the entity schema before
//! committing.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{Department, Email, Error, Shift, UserId, UserProfile, WorkSchedule};
use crate::query::filter::Filter;
use crate::table::Table;

/// Dynamic row representation shared by the query façade and the access
/// rule engine: a JSON object in each entity's serde wire shape.
pub type Row = serde_json::Map<String, Value>;

/// Seed collections the store is initialised from.
///
/// Referential integrity between the collections is the seed provider's
/// responsibility; the store does not re-verify it.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    /// Departments, referenced by users and shifts.
    pub departments: Vec<Department>,
    /// User profiles, referenced by work schedules.
    pub users: Vec<UserProfile>,
    /// Shift definitions, referenced by work schedules.
    pub shifts: Vec<Shift>,
    /// Work-schedule assignments.
    pub work_schedules: Vec<WorkSchedule>,
}

/// Process-wide entity collections.
#[derive(Debug)]
pub struct EntityStore {
    departments: Vec<Department>,
    users: Vec<UserProfile>,
    shifts: Vec<Shift>,
    work_schedules: Vec<WorkSchedule>,
}

/// Handle shared by the client, the query façade, and the session manager.
pub type SharedStore = Arc<RwLock<EntityStore>>;

impl EntityStore {
    /// Build a store from seed data.
    #[must_use]
    pub fn from_seed(seed: SeedData) -> Self {
        Self {
            departments: seed.departments,
            users: seed.users,
            shifts: seed.shifts,
            work_schedules: seed.work_schedules,
        }
    }

    /// The live user table; the access rule engine resolves department
    /// membership through it.
    #[must_use]
    pub fn users(&self) -> &[UserProfile] {
        self.users.as_slice()
    }

    pub(crate) fn find_user_by_email(&self, email: &Email) -> Option<&UserProfile> {
        self.users.iter().find(|user| user.email() == email)
    }

    pub(crate) fn find_user_by_id(&self, id: &UserId) -> Option<&UserProfile> {
        self.users.iter().find(|user| user.id() == id)
    }

    /// Serialize the named table into detached rows.
    ///
    /// # Errors
    ///
    /// Fails with an internal error if an entity does not serialize; the
    /// domain types guarantee this does not happen in practice.
    pub fn snapshot(&self, table: Table) -> Result<Vec<Row>, Error> {
        match table {
            Table::Departments => rows_of(&self.departments),
            Table::Profiles => rows_of(&self.users),
            Table::Shifts => rows_of(&self.shifts),
            Table::WorkSchedules => rows_of(&self.work_schedules),
        }
    }

    pub(crate) fn insert_row(&mut self, table: Table, row: Row) -> Result<Row, Error> {
        let stored = match table {
            Table::Departments => insert_into(&mut self.departments, row),
            Table::Profiles => insert_into(&mut self.users, row),
            Table::Shifts => insert_into(&mut self.shifts, row),
            Table::WorkSchedules => insert_into(&mut self.work_schedules, row),
        }?;
        tracing::debug!(table = %table, "inserted row");
        Ok(stored)
    }

    pub(crate) fn update_rows(
        &mut self,
        table: Table,
        patch: &Row,
        filters: &[Filter],
    ) -> Result<usize, Error> {
        let updated = match table {
            Table::Departments => update_in(&mut self.departments, patch, filters),
            Table::Profiles => update_in(&mut self.users, patch, filters),
            Table::Shifts => update_in(&mut self.shifts, patch, filters),
            Table::WorkSchedules => update_in(&mut self.work_schedules, patch, filters),
        }?;
        tracing::debug!(table = %table, rows = updated, "updated rows");
        Ok(updated)
    }

    pub(crate) fn delete_rows(&mut self, table: Table, filters: &[Filter]) -> Result<usize, Error> {
        let removed = match table {
            Table::Departments => delete_from(&mut self.departments, filters),
            Table::Profiles => delete_from(&mut self.users, filters),
            Table::Shifts => delete_from(&mut self.shifts, filters),
            Table::WorkSchedules => delete_from(&mut self.work_schedules, filters),
        }?;
        tracing::debug!(table = %table, rows = removed, "deleted rows");
        Ok(removed)
    }
}

/// Wrap a store for sharing across the client's handles.
#[must_use]
pub fn shared(store: EntityStore) -> SharedStore {
    Arc::new(RwLock::new(store))
}

pub(crate) fn read_guard(store: &SharedStore) -> Result<RwLockReadGuard<'_, EntityStore>, Error> {
    store
        .read()
        .map_err(|_| Error::internal("entity store lock poisoned"))
}

pub(crate) fn write_guard(store: &SharedStore) -> Result<RwLockWriteGuard<'_, EntityStore>, Error> {
    store
        .write()
        .map_err(|_| Error::internal("entity store lock poisoned"))
}

fn rows_of<T: Serialize>(items: &[T]) -> Result<Vec<Row>, Error> {
    items.iter().map(to_row).collect()
}

fn to_row<T: Serialize>(item: &T) -> Result<Row, Error> {
    match serde_json::to_value(item) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(Error::internal("entity did not serialize to an object")),
        Err(err) => Err(Error::internal(format!("entity serialization failed: {err}"))),
    }
}

fn insert_into<T>(items: &mut Vec<T>, mut row: Row) -> Result<Row, Error>
where
    T: Serialize + DeserializeOwned,
{
    // The store owns identity and provenance; caller-supplied values for
    // either column are overwritten.
    row.insert("id".to_owned(), Value::String(Uuid::new_v4().to_string()));
    row.insert(
        "created_at".to_owned(),
        serde_json::to_value(Utc::now())
            .map_err(|err| Error::internal(format!("timestamp serialization failed: {err}")))?,
    );

    let entity: T = serde_json::from_value(Value::Object(row.clone()))
        .map_err(|err| Error::invalid_request(format!("row does not match the table schema: {err}")))?;
    items.push(entity);
    Ok(row)
}

fn update_in<T>(items: &mut Vec<T>, patch: &Row, filters: &[Filter]) -> Result<usize, Error>
where
    T: Serialize + DeserializeOwned,
{
    // Two phases: validate every merged target first, then commit, so a
    // patch that breaks the schema on any target commits nothing.
    let mut replacements: Vec<(usize, T)> = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let row = to_row(item)?;
        if !filters.iter().all(|filter| filter.matches(&row)) {
            continue;
        }
        let mut merged = row;
        for (column, value) in patch {
            merged.insert(column.clone(), value.clone());
        }
        let entity: T = serde_json::from_value(Value::Object(merged)).map_err(|err| {
            Error::invalid_request(format!("patch does not match the table schema: {err}"))
        })?;
        replacements.push((index, entity));
    }

    let count = replacements.len();
    for (index, entity) in replacements {
        if let Some(slot) = items.get_mut(index) {
            *slot = entity;
        }
    }
    Ok(count)
}

fn delete_from<T: Serialize>(items: &mut Vec<T>, filters: &[Filter]) -> Result<usize, Error> {
    let matched = items
        .iter()
        .map(|item| to_row(item).map(|row| filters.iter().all(|filter| filter.matches(&row))))
        .collect::<Result<Vec<bool>, Error>>()?;

    let before = items.len();
    let mut index = 0;
    items.retain(|_| {
        let remove = matched.get(index).copied().unwrap_or(false);
        index += 1;
        !remove
    });
    Ok(before - items.len())
}

#[cfg(test)]
mod tests;
