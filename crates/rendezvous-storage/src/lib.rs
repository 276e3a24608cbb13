//! File persistence for the Rendezvous event planner.
//!
//! The whole planner is stored as one [`PlannerSnapshot`] in a JSON file.
//! This crate only moves snapshots to and from disk; consistency checks
//! happen when the snapshot is loaded into a
//! [`Planner`](rendezvous_model::Planner).
//!
//! # Modules
//!
//! - [`json_store`] -- [`JsonPlannerStorage`], atomic read/write of one file
//! - [`error`] -- [`StorageError`]
//!
//! [`PlannerSnapshot`]: rendezvous_model::PlannerSnapshot

pub mod error;
pub mod json_store;

pub use error::StorageError;
pub use json_store::JsonPlannerStorage;
