//! In-memory entity graph for the Rendezvous event planner.
//!
//! Events hold copies of the persons, vendors and venue they reference, and
//! RSVPs hold copies of their event and person. This crate keeps those
//! copies consistent: every mutation on [`Planner`] cascades through the
//! dependent collections before it returns.
//!
//! # Modules
//!
//! - [`unique_list`] -- [`UniqueList`], the ordered identity-keyed
//!   collection behind every entity kind.
//! - [`rsvp_list`] -- [`RsvpList`], a [`UniqueList`] whose add upserts.
//! - [`view`] -- [`Filter`] predicates and [`ViewState`] (filters plus
//!   the displayed event).
//! - [`planner`] -- [`Planner`], the coordinator that owns all collections
//!   and runs the cascades.
//! - [`snapshot`] -- [`PlannerSnapshot`], the serializable form used for
//!   load and save.
//! - [`sample_data`] -- A small consistent planner for seeding.
//! - [`error`] -- [`ModelError`].

pub mod error;
pub mod planner;
pub mod rsvp_list;
pub mod sample_data;
pub mod snapshot;
pub mod unique_list;
pub mod view;

pub use error::ModelError;
pub use planner::{CascadeReport, Planner};
pub use rsvp_list::RsvpList;
pub use sample_data::{create_sample_planner, sample_snapshot};
pub use snapshot::PlannerSnapshot;
pub use unique_list::{UniqueList, ensure_unique};
pub use view::{Filter, ViewState};
