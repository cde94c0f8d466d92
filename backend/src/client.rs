//! Client context.
//!
//! The explicit dependency-injection seam of the data core: one value
//! holding the shared entity store, the session manager, and the simulated
//! round-trip latency. Every operation hangs off a client handle; there are
//! no process-wide singletons, so tests can stand up as many isolated
//! clients as they need.

use std::sync::Arc;
use std::time::Duration;

use crate::query::QueryBuilder;
use crate::session::{Auth, InMemorySessionStore, SessionStore};
use crate::store::{EntityStore, SeedData, SharedStore, shared};
use crate::table::Table;

/// Fixed latency every query and mutation awaits, modelling the network
/// round trip of the emulated backend.
pub const SIMULATED_ROUND_TRIP: Duration = Duration::from_millis(200);

/// Construction options for [`Client::with_options`].
#[derive(Clone)]
pub struct ClientOptions {
    /// Latency awaited by every query and mutation. Tests typically use
    /// [`Duration::ZERO`].
    pub latency: Duration,
    /// Session-token persistence adapter.
    pub session_store: Arc<dyn SessionStore>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            latency: SIMULATED_ROUND_TRIP,
            session_store: Arc::new(InMemorySessionStore::default()),
        }
    }
}

/// Handle to the scheduling data core.
///
/// Cheap to clone: all handles share the same store and session state.
///
/// # Examples
/// ```
/// use backend::{Client, SeedData};
///
/// let client = Client::new(SeedData::default());
/// let query = client.from(backend::Table::Departments);
/// # drop(query);
/// ```
#[derive(Clone)]
pub struct Client {
    store: SharedStore,
    auth: Auth,
    latency: Duration,
}

impl Client {
    /// Initialise a client over a freshly seeded store with default options.
    #[must_use]
    pub fn new(seed: SeedData) -> Self {
        Self::with_options(seed, ClientOptions::default())
    }

    /// Initialise a client with explicit options.
    #[must_use]
    pub fn with_options(seed: SeedData, options: ClientOptions) -> Self {
        let store = shared(EntityStore::from_seed(seed));
        let auth = Auth::new(Arc::clone(&store), options.session_store);
        Self {
            store,
            auth,
            latency: options.latency,
        }
    }

    /// Begin a query against a table.
    pub fn from(&self, table: Table) -> QueryBuilder {
        QueryBuilder::new(
            Arc::clone(&self.store),
            self.auth.clone(),
            self.latency,
            table,
        )
    }

    /// Begin a query against a table resolved from its wire name.
    ///
    /// # Errors
    ///
    /// Fails with `unknown_table` for an unrecognised name.
    pub fn from_name(&self, name: &str) -> Result<QueryBuilder, crate::domain::Error> {
        Ok(self.from(Table::parse(name)?))
    }

    /// The session manager bound to this client.
    #[must_use]
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// The shared store handle; exposed for test wiring.
    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }
}
