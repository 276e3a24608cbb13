//! Whole-planner snapshots for load and save.
//!
//! A [`PlannerSnapshot`] is the five collections as plain ordered vectors.
//! Loading one applies the same checks the planner enforces at runtime,
//! plus one more: every copy an event or RSVP carries must be *equal in
//! every field* to the entry in its own collection. A snapshot that fails
//! is rejected as a whole.

use serde::{Deserialize, Serialize};

use rendezvous_types::{Event, Identity, Person, Rsvp, Vendor, Venue};

use crate::error::ModelError;
use crate::rsvp_list::RsvpList;
use crate::unique_list::{UniqueList, ensure_unique};

/// The full entity set, in collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerSnapshot {
    /// All persons.
    #[serde(default)]
    pub persons: Vec<Person>,
    /// All venues.
    #[serde(default)]
    pub venues: Vec<Venue>,
    /// All vendors.
    #[serde(default)]
    pub vendors: Vec<Vendor>,
    /// All events, each carrying its roster, vendors and venue.
    #[serde(default)]
    pub events: Vec<Event>,
    /// All RSVPs, each carrying its event and person.
    #[serde(default)]
    pub rsvps: Vec<Rsvp>,
}

impl PlannerSnapshot {
    /// Total number of entities across all collections.
    pub fn entity_count(&self) -> usize {
        [
            self.persons.len(),
            self.venues.len(),
            self.vendors.len(),
            self.events.len(),
            self.rsvps.len(),
        ]
        .into_iter()
        .sum()
    }
}

/// Collections rebuilt from a snapshot that passed every check.
#[derive(Debug)]
pub(crate) struct ValidatedSnapshot {
    pub(crate) persons: UniqueList<Person>,
    pub(crate) venues: UniqueList<Venue>,
    pub(crate) vendors: UniqueList<Vendor>,
    pub(crate) events: UniqueList<Event>,
    pub(crate) rsvps: RsvpList,
}

/// Check `snapshot` and build the collections it describes.
///
/// # Errors
///
/// Returns [`ModelError::DuplicateEntity`] if a collection, or one event's
/// roster, repeats an identity; [`ModelError::DanglingReference`] if an
/// event or RSVP carries a copy that is missing from, or differs from, its
/// own collection.
pub(crate) fn validate(snapshot: PlannerSnapshot) -> Result<ValidatedSnapshot, ModelError> {
    let PlannerSnapshot {
        persons,
        venues,
        vendors,
        events,
        rsvps,
    } = snapshot;

    let mut validated = ValidatedSnapshot {
        persons: UniqueList::new(),
        venues: UniqueList::new(),
        vendors: UniqueList::new(),
        events: UniqueList::new(),
        rsvps: RsvpList::new(),
    };
    validated.persons.replace_all(persons)?;
    validated.venues.replace_all(venues)?;
    validated.vendors.replace_all(vendors)?;

    for event in &events {
        ensure_unique(event.persons())?;
        ensure_unique(event.vendors())?;
        for person in event.persons() {
            ensure_current(event, &validated.persons, person)?;
        }
        for vendor in event.vendors() {
            ensure_current(event, &validated.vendors, vendor)?;
        }
        if let Some(venue) = event.venue() {
            ensure_current(event, &validated.venues, venue)?;
        }
    }
    validated.events.replace_all(events)?;

    for rsvp in &rsvps {
        ensure_current(rsvp, &validated.events, rsvp.event())?;
        ensure_current(rsvp, &validated.persons, rsvp.person())?;
    }
    validated.rsvps.replace_all(rsvps)?;

    Ok(validated)
}

/// Require `target` to be present in `list` and equal in every field.
fn ensure_current<O, T>(owner: &O, list: &UniqueList<T>, target: &T) -> Result<(), ModelError>
where
    O: Identity,
    T: Identity + PartialEq,
{
    match list.find(&target.key()) {
        Some(live) if live == target => Ok(()),
        _ => Err(ModelError::dangling(owner, target)),
    }
}
