//! Rosterd scheduling data core.
//!
//! An in-process emulation of the scheduling app's backend: an entity store
//! seeded at startup, a row-level-security layer keyed on the caller's role
//! and department, a chainable query façade with a simulated round trip,
//! and a session manager. Application views consume this crate through
//! [`Client`] — there is no wire protocol.

pub mod client;
pub mod domain;
pub mod query;
pub mod rls;
#[cfg(feature = "seed-data")]
pub mod seeding;
pub mod session;
pub mod store;
pub mod table;
#[cfg(feature = "test-support")]
pub mod test_support;

pub use client::{Client, ClientOptions, SIMULATED_ROUND_TRIP};
pub use domain::{Error, ErrorCode};
pub use query::{Join, MutationBuilder, QueryBuilder};
pub use session::{Auth, Session, SessionStore};
pub use store::{EntityStore, Row, SeedData, SharedStore};
pub use table::Table;
