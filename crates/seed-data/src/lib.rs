//! Deterministic seed and demo data for the Rosterd scheduling core.
//!
//! This crate provides the fixture dataset the scheduling backend is seeded
//! from, plus a deterministic generator for expanding that dataset to
//! demo scale. It is designed to be independent of backend domain types to
//! avoid circular dependencies: the backend converts seed records into its
//! own validated types at the point of use.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - A fixture dataset mirroring the reference deployment (three
//!   departments, six users, five shifts, three work schedules)
//! - Referential-integrity validation of any dataset
//! - Deterministic expansion with extra members and schedules using a
//!   seeded RNG
//!
//! # Example
//!
//! ```
//! use seed_data::demo_dataset;
//!
//! let dataset = demo_dataset();
//! dataset.validate().expect("fixture dataset is internally consistent");
//!
//! assert_eq!(dataset.departments.len(), 3);
//! assert_eq!(dataset.users.len(), 6);
//! ```

mod dataset;
mod generator;
mod validation;

pub use dataset::{
    DepartmentSeed, RoleSeed, SeedDataset, ShiftSeed, UserSeed, WorkScheduleSeed, demo_dataset,
};
pub use generator::{ExpandError, ExpandOptions, expand_dataset};
pub use validation::SeedValidationError;
