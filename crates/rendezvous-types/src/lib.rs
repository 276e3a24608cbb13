//! Shared type definitions for the Rendezvous event planner.
//!
//! This crate is the single source of truth for the value types and entities
//! used across the workspace. Nothing here knows about collections or
//! cascades; it only guarantees that every value is valid once constructed.
//!
//! # Modules
//!
//! - [`fields`] -- Validated scalar newtypes (names, contact details,
//!   capacity, dates)
//! - [`enums`] -- [`RsvpStatus`] and [`EntityKind`]
//! - [`identity`] -- The [`Identity`] trait separating "same entity" from
//!   "equal in every field"
//! - [`structs`] -- The five entities: [`Person`], [`Venue`], [`Vendor`],
//!   [`Event`], [`Rsvp`]
//! - [`error`] -- [`FieldError`], raised when validation fails

pub mod enums;
pub mod error;
pub mod fields;
pub mod identity;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{EntityKind, RsvpStatus};
pub use error::FieldError;
pub use fields::{
    Address, Capacity, DATE_FORMAT, Description, Email, EventDate, Name, Note, Phone,
};
pub use identity::{Identity, Named, RsvpKey};
pub use structs::{Event, Person, Rsvp, Vendor, Venue};
