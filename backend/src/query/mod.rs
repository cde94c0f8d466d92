//! Query façade.
//!
//! A declarative, chainable way to read and mutate the entity store. A
//! builder snapshots its table at creation (copy-on-read), filters and
//! sorts eagerly in call order, and resolves through an explicit awaited
//! terminal step that simulates a network round trip before applying the
//! access rule engine. Builders are immutable values: every combinator
//! consumes the builder and returns a new one, so suspension points and
//! ordering stay explicit.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tokio::time::sleep;

use crate::domain::Error;
use crate::rls::{self, Operation};
use crate::session::Auth;
use crate::store::{Row, SharedStore, read_guard, write_guard};
use crate::table::Table;

pub(crate) mod filter;

use self::filter::{Filter, sort_rows};

/// A relation that may be attached to each result row of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    /// Attach the referenced user profile under `user`.
    User,
    /// Attach the referenced shift under `shift`.
    Shift,
}

impl Join {
    fn field(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Shift => "shift",
        }
    }
}

/// Read query over a table snapshot.
///
/// Created by [`crate::Client::from`]. Filters compose conjunctively in
/// call order; `order` sorts stably. The terminal [`QueryBuilder::resolve`]
/// applies the visibility policy for the current session identity, so an
/// unauthenticated caller always resolves to an empty set.
#[must_use = "builders do nothing until resolved"]
pub struct QueryBuilder {
    store: SharedStore,
    auth: Auth,
    latency: Duration,
    table: Table,
    rows: Vec<Row>,
    filters: Vec<Filter>,
    joins: Vec<Join>,
    error: Option<Error>,
}

impl std::fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("latency", &self.latency)
            .field("table", &self.table)
            .field("rows", &self.rows)
            .field("filters", &self.filters)
            .field("joins", &self.joins)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl QueryBuilder {
    pub(crate) fn new(store: SharedStore, auth: Auth, latency: Duration, table: Table) -> Self {
        let (rows, error) = match read_guard(&store).and_then(|guard| guard.snapshot(table)) {
            Ok(rows) => (rows, None),
            Err(err) => (Vec::new(), Some(err)),
        };
        Self {
            store,
            auth,
            latency,
            table,
            rows,
            filters: Vec::new(),
            joins: Vec::new(),
            error,
        }
    }

    /// Keep rows whose column equals the value.
    pub fn eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.filtered(Filter::Eq {
            column: column.to_owned(),
            value: value.into(),
        })
    }

    /// Keep rows whose column equals any of the values.
    pub fn in_list<V: Into<Value>>(self, column: &str, values: impl IntoIterator<Item = V>) -> Self {
        self.filtered(Filter::In {
            column: column.to_owned(),
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Keep rows whose column is greater than or equal to the value.
    pub fn gte(self, column: &str, value: impl Into<Value>) -> Self {
        self.filtered(Filter::Gte {
            column: column.to_owned(),
            value: value.into(),
        })
    }

    /// Keep rows whose column is less than or equal to the value.
    pub fn lte(self, column: &str, value: impl Into<Value>) -> Self {
        self.filtered(Filter::Lte {
            column: column.to_owned(),
            value: value.into(),
        })
    }

    /// Stable sort by a column; ties keep their prior relative order.
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        sort_rows(&mut self.rows, column, ascending);
        self
    }

    /// Attach a denormalised relation to each result row.
    ///
    /// Only relations registered for the queried table take effect; an
    /// inapplicable join is a no-op, and a foreign-key lookup miss leaves
    /// the field absent rather than failing the query.
    pub fn attach(mut self, join: Join) -> Self {
        if !self.joins.contains(&join) {
            self.joins.push(join);
        }
        self
    }

    /// Resolve the query: await the simulated round trip, attach joins,
    /// then apply the visibility policy for the current session identity.
    ///
    /// # Errors
    ///
    /// Fails when the builder was created for a failed snapshot or the
    /// store is unavailable. An unauthenticated caller is not an error;
    /// the result set is simply empty.
    pub async fn resolve(self) -> Result<Vec<Row>, Error> {
        sleep(self.latency).await;
        if let Some(error) = self.error {
            return Err(error);
        }

        let mut rows = self.rows;
        let guard = read_guard(&self.store)?;
        for join in &self.joins {
            let Some(spec) = self
                .table
                .join_specs()
                .iter()
                .find(|spec| spec.field == join.field())
            else {
                continue;
            };
            let mut by_id: HashMap<String, Row> = HashMap::new();
            for source_row in guard.snapshot(spec.source)? {
                if let Some(id) = source_row.get("id").and_then(Value::as_str) {
                    by_id.insert(id.to_owned(), source_row);
                }
            }
            for row in &mut rows {
                let Some(matched) = row
                    .get(spec.foreign_key)
                    .and_then(Value::as_str)
                    .and_then(|key| by_id.get(key))
                else {
                    continue;
                };
                row.insert(spec.field.to_owned(), Value::Object(matched.clone()));
            }
        }

        let caller = self.auth.caller();
        let visible = rls::filter_visible(caller.as_ref(), self.table, rows, guard.users());
        tracing::debug!(
            table = %self.table,
            rows = visible.len(),
            authenticated = caller.is_some(),
            "query resolved"
        );
        Ok(visible)
    }

    /// Insert a row, resolving with the stored row.
    ///
    /// The store assigns the identifier and creation timestamp; values the
    /// caller supplied for either column are overwritten.
    ///
    /// # Errors
    ///
    /// Fails with `permission_denied` for an unauthenticated caller and
    /// `invalid_request` when the row does not match the table schema.
    pub async fn insert(self, row: Row) -> Result<Row, Error> {
        sleep(self.latency).await;
        if let Some(error) = self.error {
            return Err(error);
        }
        let caller = self.auth.caller();
        rls::authorize_mutation(caller.as_ref(), self.table, Operation::Insert)?;
        let mut guard = write_guard(&self.store)?;
        guard.insert_row(self.table, row)
    }

    /// Begin an update; chain filters to select targets, then execute.
    ///
    /// Filters already applied to this builder carry over.
    pub fn update(self, patch: Row) -> MutationBuilder {
        self.into_mutation(MutationOp::Update(patch))
    }

    /// Begin a delete; chain filters to select targets, then execute.
    ///
    /// Filters already applied to this builder carry over.
    pub fn delete(self) -> MutationBuilder {
        self.into_mutation(MutationOp::Delete)
    }

    fn filtered(mut self, filter: Filter) -> Self {
        self.rows.retain(|row| filter.matches(row));
        self.filters.push(filter);
        self
    }

    fn into_mutation(self, op: MutationOp) -> MutationBuilder {
        MutationBuilder {
            store: self.store,
            auth: self.auth,
            latency: self.latency,
            table: self.table,
            op,
            filters: self.filters,
            error: self.error,
        }
    }
}

enum MutationOp {
    Update(Row),
    Delete,
}

impl MutationOp {
    fn operation(&self) -> Operation {
        match self {
            Self::Update(_) => Operation::Update,
            Self::Delete => Operation::Delete,
        }
    }
}

/// Pending update or delete.
///
/// Target rows are selected by the recorded filters against the live store
/// when [`MutationBuilder::execute`] resolves — not against the snapshot
/// the originating query builder was created from.
#[must_use = "builders do nothing until executed"]
pub struct MutationBuilder {
    store: SharedStore,
    auth: Auth,
    latency: Duration,
    table: Table,
    op: MutationOp,
    filters: Vec<Filter>,
    error: Option<Error>,
}

impl MutationBuilder {
    /// Target rows whose column equals the value.
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq {
            column: column.to_owned(),
            value: value.into(),
        });
        self
    }

    /// Target rows whose column equals any of the values.
    pub fn in_list<V: Into<Value>>(mut self, column: &str, values: impl IntoIterator<Item = V>) -> Self {
        self.filters.push(Filter::In {
            column: column.to_owned(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Target rows whose column is greater than or equal to the value.
    pub fn gte(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Gte {
            column: column.to_owned(),
            value: value.into(),
        });
        self
    }

    /// Target rows whose column is less than or equal to the value.
    pub fn lte(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Lte {
            column: column.to_owned(),
            value: value.into(),
        });
        self
    }

    /// Execute the mutation, resolving with the affected row count.
    ///
    /// # Errors
    ///
    /// Fails with `permission_denied` for an unauthenticated caller and
    /// `invalid_request` when an update patch breaks the table schema on
    /// any target (in which case nothing commits).
    pub async fn execute(self) -> Result<usize, Error> {
        sleep(self.latency).await;
        if let Some(error) = self.error {
            return Err(error);
        }
        let caller = self.auth.caller();
        rls::authorize_mutation(caller.as_ref(), self.table, self.op.operation())?;
        let mut guard = write_guard(&self.store)?;
        match self.op {
            MutationOp::Update(patch) => guard.update_rows(self.table, &patch, &self.filters),
            MutationOp::Delete => guard.delete_rows(self.table, &self.filters),
        }
    }
}
