//! The referential-integrity coordinator.
//!
//! [`Planner`] owns all five collections and the view state. Events carry
//! copies of the persons, vendors and venue they reference, and RSVPs carry
//! copies of their event and person, so a single edit or delete can leave
//! stale copies scattered across the graph. Every public mutation here
//! performs its primitive change and then walks the dependent collections
//! until no stale or dangling copy remains.
//!
//! # Cascades
//!
//! | Trigger | Events | RSVPs | Displayed event |
//! |---------|--------|-------|-----------------|
//! | edit person | roster entry replaced | person re-pointed | refreshed |
//! | delete person | roster entry removed | person's RSVPs removed | refreshed |
//! | edit / delete venue | venue replaced / cleared | re-pointed | refreshed |
//! | edit / delete vendor | vendor replaced / removed | re-pointed | refreshed |
//! | edit event | the event itself | re-pointed | refreshed |
//! | roster changes | the event itself | removed if the person left the roster | refreshed |
//! | delete event | -- | event's RSVPs removed | cleared |
//!
//! Within one cascade, events are rewritten in collection order, then RSVPs
//! are settled in collection order, then the displayed event is refreshed.
//! Each step is atomic for its own collection; the cascade as a whole is
//! not. A failing step means the graph was already inconsistent and is
//! reported as [`ModelError::CascadeFault`].

use rendezvous_types::{EntityKind, Event, Identity, Person, Rsvp, RsvpStatus, Vendor, Venue};
use tracing::{debug, error, info};

use crate::error::ModelError;
use crate::rsvp_list::RsvpList;
use crate::snapshot::{self, PlannerSnapshot};
use crate::unique_list::{UniqueList, ensure_unique};
use crate::view::{Filter, ViewState};

/// What one cascade changed beyond its primitive mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    /// Events replaced with an updated copy.
    pub events_rewritten: usize,
    /// RSVPs re-pointed at an updated event or person.
    pub rsvps_rewritten: usize,
    /// RSVPs removed because their person or event went away.
    pub rsvps_removed: usize,
    /// Whether the displayed event was refreshed or cleared.
    pub displayed_changed: bool,
}

/// An event replaced during a cascade.
#[derive(Debug, Clone)]
struct EventRewrite {
    previous: Event,
    current: Event,
}

/// What a cascade does to one RSVP.
#[derive(Debug)]
enum RsvpFate {
    Keep,
    Rewrite(Box<Rsvp>),
    Drop,
}

/// The planner: entity collections, view state, and the cascade rules that
/// keep them consistent.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    persons: UniqueList<Person>,
    venues: UniqueList<Venue>,
    vendors: UniqueList<Vendor>,
    events: UniqueList<Event>,
    rsvps: RsvpList,
    view: ViewState,
}

impl Planner {
    /// Create an empty planner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a planner holding the contents of `snapshot`.
    ///
    /// # Errors
    ///
    /// Same as [`Planner::load`].
    pub fn from_snapshot(snapshot: PlannerSnapshot) -> Result<Self, ModelError> {
        let mut planner = Self::new();
        planner.load(snapshot)?;
        Ok(planner)
    }

    // -------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------

    /// All persons in order.
    pub fn persons(&self) -> &[Person] {
        self.persons.as_slice()
    }

    /// All venues in order.
    pub fn venues(&self) -> &[Venue] {
        self.venues.as_slice()
    }

    /// All vendors in order.
    pub fn vendors(&self) -> &[Vendor] {
        self.vendors.as_slice()
    }

    /// All events in order.
    pub fn events(&self) -> &[Event] {
        self.events.as_slice()
    }

    /// All RSVPs in order.
    pub fn rsvps(&self) -> &[Rsvp] {
        self.rsvps.as_slice()
    }

    /// Filters and displayed event.
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    // -------------------------------------------------------------------
    // Person operations
    // -------------------------------------------------------------------

    /// Add a person.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateEntity`] if the name is taken.
    pub fn add_person(&mut self, person: Person) -> Result<(), ModelError> {
        let key = person.key();
        self.persons.add(person)?;
        debug!(kind = %EntityKind::Person, %key, "Added entity");
        Ok(())
    }

    /// Replace `target` with `edited` and update every roster and RSVP that
    /// carries the person.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if `target` is absent, or
    /// [`ModelError::DuplicateEntity`] if `edited` takes another person's
    /// name.
    pub fn edit_person(
        &mut self,
        target: &Person,
        edited: Person,
    ) -> Result<CascadeReport, ModelError> {
        const TRIGGER: &str = "edit person";
        let previous = self.persons.resolve(target)?.clone();
        let current = edited.clone();
        self.persons.replace(&previous, edited)?;
        debug!(
            kind = %EntityKind::Person,
            from = %previous.key(),
            to = %current.key(),
            "Edited entity"
        );

        let rewrites = self.rewrite_events(TRIGGER, |event| {
            event
                .has_person(&previous)
                .then(|| event.with_person_replaced(&previous, &current))
        })?;
        self.settle(TRIGGER, &rewrites, |rsvp| {
            if rsvp.person().is_same(&previous) {
                RsvpFate::Rewrite(Box::new(rsvp.clone().with_person(current.clone())))
            } else {
                RsvpFate::Keep
            }
        })
    }

    /// Delete `person`, removing them from every roster and deleting their
    /// RSVPs.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] unless a person equal in every
    /// field is present.
    pub fn delete_person(&mut self, person: &Person) -> Result<CascadeReport, ModelError> {
        const TRIGGER: &str = "delete person";
        let removed = self.persons.remove(person)?;
        debug!(kind = %EntityKind::Person, key = %removed.key(), "Deleted entity");

        let rewrites = self.rewrite_events(TRIGGER, |event| {
            event
                .has_person(&removed)
                .then(|| event.without_person(&removed))
        })?;
        self.settle(TRIGGER, &rewrites, |rsvp| {
            if rsvp.person().is_same(&removed) {
                RsvpFate::Drop
            } else {
                RsvpFate::Keep
            }
        })
    }

    // -------------------------------------------------------------------
    // Venue operations
    // -------------------------------------------------------------------

    /// Add a venue.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateEntity`] if the name is taken.
    pub fn add_venue(&mut self, venue: Venue) -> Result<(), ModelError> {
        let key = venue.key();
        self.venues.add(venue)?;
        debug!(kind = %EntityKind::Venue, %key, "Added entity");
        Ok(())
    }

    /// Replace `target` with `edited` and point every event held there at
    /// the new copy.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if `target` is absent, or
    /// [`ModelError::DuplicateEntity`] if `edited` takes another venue's
    /// name.
    pub fn edit_venue(
        &mut self,
        target: &Venue,
        edited: Venue,
    ) -> Result<CascadeReport, ModelError> {
        const TRIGGER: &str = "edit venue";
        let previous = self.venues.resolve(target)?.clone();
        let current = edited.clone();
        self.venues.replace(&previous, edited)?;
        debug!(
            kind = %EntityKind::Venue,
            from = %previous.key(),
            to = %current.key(),
            "Edited entity"
        );

        let rewrites = self.rewrite_events(TRIGGER, |event| {
            event
                .has_venue(&previous)
                .then(|| event.clone().with_venue(Some(current.clone())))
        })?;
        self.settle(TRIGGER, &rewrites, |_| RsvpFate::Keep)
    }

    /// Delete `venue`, leaving every event held there without a venue.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] unless a venue equal in every
    /// field is present.
    pub fn delete_venue(&mut self, venue: &Venue) -> Result<CascadeReport, ModelError> {
        const TRIGGER: &str = "delete venue";
        let removed = self.venues.remove(venue)?;
        debug!(kind = %EntityKind::Venue, key = %removed.key(), "Deleted entity");

        let rewrites = self.rewrite_events(TRIGGER, |event| {
            event
                .has_venue(&removed)
                .then(|| event.clone().with_venue(None))
        })?;
        self.settle(TRIGGER, &rewrites, |_| RsvpFate::Keep)
    }

    // -------------------------------------------------------------------
    // Vendor operations
    // -------------------------------------------------------------------

    /// Add a vendor.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateEntity`] if the name is taken.
    pub fn add_vendor(&mut self, vendor: Vendor) -> Result<(), ModelError> {
        let key = vendor.key();
        self.vendors.add(vendor)?;
        debug!(kind = %EntityKind::Vendor, %key, "Added entity");
        Ok(())
    }

    /// Replace `target` with `edited` in the vendor list and in every event
    /// that engages the vendor.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if `target` is absent, or
    /// [`ModelError::DuplicateEntity`] if `edited` takes another vendor's
    /// name.
    pub fn edit_vendor(
        &mut self,
        target: &Vendor,
        edited: Vendor,
    ) -> Result<CascadeReport, ModelError> {
        const TRIGGER: &str = "edit vendor";
        let previous = self.vendors.resolve(target)?.clone();
        let current = edited.clone();
        self.vendors.replace(&previous, edited)?;
        debug!(
            kind = %EntityKind::Vendor,
            from = %previous.key(),
            to = %current.key(),
            "Edited entity"
        );

        let rewrites = self.rewrite_events(TRIGGER, |event| {
            event
                .has_vendor(&previous)
                .then(|| event.with_vendor_replaced(&previous, &current))
        })?;
        self.settle(TRIGGER, &rewrites, |_| RsvpFate::Keep)
    }

    /// Delete `vendor` and drop it from every event.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] unless a vendor equal in every
    /// field is present.
    pub fn delete_vendor(&mut self, vendor: &Vendor) -> Result<CascadeReport, ModelError> {
        const TRIGGER: &str = "delete vendor";
        let removed = self.vendors.remove(vendor)?;
        debug!(kind = %EntityKind::Vendor, key = %removed.key(), "Deleted entity");

        let rewrites = self.rewrite_events(TRIGGER, |event| {
            event
                .has_vendor(&removed)
                .then(|| event.without_vendor(&removed))
        })?;
        self.settle(TRIGGER, &rewrites, |_| RsvpFate::Keep)
    }

    // -------------------------------------------------------------------
    // Event operations
    // -------------------------------------------------------------------

    /// Add an event.
    ///
    /// Every person, vendor and venue the event carries must already exist
    /// (matched by name); the stored event carries the live copies.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateEntity`] if the name is taken or the
    /// roster repeats an entry, or [`ModelError::EntityNotFound`] if a
    /// referenced entity does not exist.
    pub fn add_event(&mut self, event: Event) -> Result<(), ModelError> {
        if self.events.contains(&event) {
            return Err(ModelError::duplicate(&event));
        }
        let event = self.resolve_relations(event)?;
        let key = event.key();
        self.events.add(event)?;
        debug!(kind = %EntityKind::Event, %key, "Added entity");
        Ok(())
    }

    /// Replace `target`'s own fields with those of `edited` and re-point
    /// its RSVPs.
    ///
    /// Only name, description, dates and note are taken from `edited`; the
    /// roster, vendors and venue stay as they are. Change those with the `assign_*`,
    /// `unassign_*` and [`Planner::set_venue`] operations.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if `target` is absent, or
    /// [`ModelError::DuplicateEntity`] if `edited` takes another event's
    /// name.
    pub fn edit_event(
        &mut self,
        target: &Event,
        edited: Event,
    ) -> Result<CascadeReport, ModelError> {
        let previous = self.events.resolve(target)?.clone();
        if !previous.is_same(&edited) && self.events.contains(&edited) {
            return Err(ModelError::duplicate(&edited));
        }
        let current = edited.with_relations_of(&previous);
        self.commit_event(previous, current, "edit event")
    }

    /// Delete `event`, its RSVPs, and clear it from display.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] unless an event equal in every
    /// field is present.
    pub fn delete_event(&mut self, event: &Event) -> Result<CascadeReport, ModelError> {
        const TRIGGER: &str = "delete event";
        let removed = self.events.remove(event)?;
        debug!(kind = %EntityKind::Event, key = %removed.key(), "Deleted entity");

        let mut report = self.settle(TRIGGER, &[], |rsvp| {
            if rsvp.event().is_same(&removed) {
                RsvpFate::Drop
            } else {
                RsvpFate::Keep
            }
        })?;
        if self.view.clear_displayed_if(&removed) {
            report.displayed_changed = true;
        }
        Ok(report)
    }

    /// Put `person` on `event`'s roster.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if either is absent, or
    /// [`ModelError::DuplicateEntity`] if the person is already on the
    /// roster.
    pub fn assign_person(
        &mut self,
        event: &Event,
        person: &Person,
    ) -> Result<CascadeReport, ModelError> {
        let previous = self.events.resolve(event)?.clone();
        let person = self.persons.resolve(person)?.clone();
        if previous.has_person(&person) {
            return Err(ModelError::duplicate(&person));
        }
        let current = previous.with_person_added(person);
        self.commit_event(previous, current, "assign person")
    }

    /// Take `person` off `event`'s roster, deleting their RSVP for it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if the event is absent or the
    /// person is not on its roster.
    pub fn unassign_person(
        &mut self,
        event: &Event,
        person: &Person,
    ) -> Result<CascadeReport, ModelError> {
        let previous = self.events.resolve(event)?.clone();
        if !previous.has_person(person) {
            return Err(ModelError::not_found(person));
        }
        let current = previous.without_person(person);
        self.commit_event(previous, current, "unassign person")
    }

    /// Engage `vendor` for `event`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if either is absent, or
    /// [`ModelError::DuplicateEntity`] if the vendor is already engaged.
    pub fn assign_vendor(
        &mut self,
        event: &Event,
        vendor: &Vendor,
    ) -> Result<CascadeReport, ModelError> {
        let previous = self.events.resolve(event)?.clone();
        let vendor = self.vendors.resolve(vendor)?.clone();
        if previous.has_vendor(&vendor) {
            return Err(ModelError::duplicate(&vendor));
        }
        let current = previous.with_vendor_added(vendor);
        self.commit_event(previous, current, "assign vendor")
    }

    /// Release `vendor` from `event`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if the event is absent or the
    /// vendor is not engaged for it.
    pub fn unassign_vendor(
        &mut self,
        event: &Event,
        vendor: &Vendor,
    ) -> Result<CascadeReport, ModelError> {
        let previous = self.events.resolve(event)?.clone();
        if !previous.has_vendor(vendor) {
            return Err(ModelError::not_found(vendor));
        }
        let current = previous.without_vendor(vendor);
        self.commit_event(previous, current, "unassign vendor")
    }

    /// Hold `event` at `venue`, or at no venue when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if the event or venue is
    /// absent.
    pub fn set_venue(
        &mut self,
        event: &Event,
        venue: Option<&Venue>,
    ) -> Result<CascadeReport, ModelError> {
        let previous = self.events.resolve(event)?.clone();
        let venue = venue.map(|v| self.venues.resolve(v).cloned()).transpose()?;
        let current = previous.clone().with_venue(venue);
        if current == previous {
            return Ok(CascadeReport::default());
        }
        self.commit_event(previous, current, "set venue")
    }

    // -------------------------------------------------------------------
    // RSVP operations
    // -------------------------------------------------------------------

    /// Build an RSVP from indexes into the *filtered* event and person
    /// views. Returns `None` if either index is out of range.
    pub fn create_rsvp(
        &self,
        event_index: usize,
        person_index: usize,
        status: RsvpStatus,
    ) -> Option<Rsvp> {
        let event = self.filtered_events().get(event_index).map(|e| (*e).clone())?;
        let person = self.filtered_persons().get(person_index).map(|p| (*p).clone())?;
        Some(Rsvp::new(event, person, status))
    }

    /// Whether the RSVP's person is on its event's roster.
    ///
    /// Not enforced by [`Planner::add_rsvp`]; callers check it first.
    pub fn is_valid_rsvp(&self, rsvp: &Rsvp) -> bool {
        rsvp.event().has_person(rsvp.person())
    }

    /// Record `rsvp`, overwriting any earlier answer for the same event and
    /// person. Returns the answer it replaced.
    ///
    /// The stored RSVP carries the live copies of its event and person.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if its event or person does
    /// not exist.
    pub fn add_rsvp(&mut self, rsvp: Rsvp) -> Result<Option<Rsvp>, ModelError> {
        let event = self.events.resolve(rsvp.event())?.clone();
        let person = self.persons.resolve(rsvp.person())?.clone();
        let rsvp = rsvp.with_event(event).with_person(person);
        let key = rsvp.key();
        let status = rsvp.status();
        let previous = self.rsvps.add(rsvp);
        debug!(
            kind = %EntityKind::Rsvp,
            %key,
            %status,
            replaced = previous.is_some(),
            "Recorded rsvp"
        );
        Ok(previous)
    }

    /// Create, check and record an RSVP in one step.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::IndexOutOfRange`] if an index does not resolve
    /// against the filtered views, or [`ModelError::InvalidRsvp`] if the
    /// person is not on the event's roster.
    pub fn record_rsvp(
        &mut self,
        event_index: usize,
        person_index: usize,
        status: RsvpStatus,
    ) -> Result<Rsvp, ModelError> {
        let event = self.filtered_event_at(event_index)?.clone();
        let person = self.filtered_person_at(person_index)?.clone();
        let rsvp = Rsvp::new(event, person, status);
        if !self.is_valid_rsvp(&rsvp) {
            let key = rsvp.key();
            return Err(ModelError::InvalidRsvp {
                event: key.event,
                person: key.person,
            });
        }
        self.add_rsvp(rsvp.clone())?;
        Ok(rsvp)
    }

    /// Delete the RSVP equal in every field to `rsvp`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if no such RSVP exists.
    pub fn delete_rsvp(&mut self, rsvp: &Rsvp) -> Result<Rsvp, ModelError> {
        let removed = self.rsvps.remove(rsvp)?;
        debug!(kind = %EntityKind::Rsvp, key = %removed.key(), "Deleted entity");
        Ok(removed)
    }

    /// RSVPs answering for `event`, in collection order.
    pub fn rsvps_for(&self, event: &Event) -> Vec<&Rsvp> {
        self.rsvps.for_event(event).collect()
    }

    // -------------------------------------------------------------------
    // Displayed event
    // -------------------------------------------------------------------

    /// Display `event` (the live copy with the same name), or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if the event does not exist.
    pub fn set_displayed_event(&mut self, event: Option<&Event>) -> Result<(), ModelError> {
        let live = event.map(|e| self.events.resolve(e).cloned()).transpose()?;
        self.view.set_displayed_event(live);
        Ok(())
    }

    /// The event currently displayed.
    pub const fn displayed_event(&self) -> Option<&Event> {
        self.view.displayed_event()
    }

    // -------------------------------------------------------------------
    // Filters
    // -------------------------------------------------------------------

    /// Filter the person view.
    pub fn set_person_filter(&mut self, filter: Filter<Person>) {
        self.view.set_person_filter(filter);
    }

    /// Filter the venue view.
    pub fn set_venue_filter(&mut self, filter: Filter<Venue>) {
        self.view.set_venue_filter(filter);
    }

    /// Filter the vendor view.
    pub fn set_vendor_filter(&mut self, filter: Filter<Vendor>) {
        self.view.set_vendor_filter(filter);
    }

    /// Filter the event view.
    pub fn set_event_filter(&mut self, filter: Filter<Event>) {
        self.view.set_event_filter(filter);
    }

    /// Filter the RSVP view.
    pub fn set_rsvp_filter(&mut self, filter: Filter<Rsvp>) {
        self.view.set_rsvp_filter(filter);
    }

    /// Persons passing the person filter.
    pub fn filtered_persons(&self) -> Vec<&Person> {
        self.view.person_filter().apply(self.persons.as_slice())
    }

    /// Venues passing the venue filter.
    pub fn filtered_venues(&self) -> Vec<&Venue> {
        self.view.venue_filter().apply(self.venues.as_slice())
    }

    /// Vendors passing the vendor filter.
    pub fn filtered_vendors(&self) -> Vec<&Vendor> {
        self.view.vendor_filter().apply(self.vendors.as_slice())
    }

    /// Events passing the event filter.
    pub fn filtered_events(&self) -> Vec<&Event> {
        self.view.event_filter().apply(self.events.as_slice())
    }

    /// RSVPs passing the RSVP filter.
    pub fn filtered_rsvps(&self) -> Vec<&Rsvp> {
        self.view.rsvp_filter().apply(self.rsvps.as_slice())
    }

    /// The person at zero-based `index` in the filtered view.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::IndexOutOfRange`] past the end of the view.
    pub fn filtered_person_at(&self, index: usize) -> Result<&Person, ModelError> {
        pick(&self.filtered_persons(), index)
    }

    /// The event at zero-based `index` in the filtered view.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::IndexOutOfRange`] past the end of the view.
    pub fn filtered_event_at(&self, index: usize) -> Result<&Event, ModelError> {
        pick(&self.filtered_events(), index)
    }

    // -------------------------------------------------------------------
    // Snapshots
    // -------------------------------------------------------------------

    /// Copy out every collection in order.
    pub fn snapshot(&self) -> PlannerSnapshot {
        PlannerSnapshot {
            persons: self.persons.as_slice().to_vec(),
            venues: self.venues.as_slice().to_vec(),
            vendors: self.vendors.as_slice().to_vec(),
            events: self.events.as_slice().to_vec(),
            rsvps: self.rsvps.as_slice().to_vec(),
        }
    }

    /// Replace every collection with the contents of `snapshot`.
    ///
    /// All five collections are swapped together and the displayed event is
    /// cleared. Filters are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateEntity`] or
    /// [`ModelError::DanglingReference`] if the snapshot is inconsistent, in
    /// which case the planner is unchanged.
    pub fn load(&mut self, snapshot: PlannerSnapshot) -> Result<(), ModelError> {
        let validated = snapshot::validate(snapshot)?;
        self.persons = validated.persons;
        self.venues = validated.venues;
        self.vendors = validated.vendors;
        self.events = validated.events;
        self.rsvps = validated.rsvps;
        self.view.set_displayed_event(None);
        info!(
            persons = self.persons.len(),
            venues = self.venues.len(),
            vendors = self.vendors.len(),
            events = self.events.len(),
            rsvps = self.rsvps.len(),
            "Loaded planner snapshot"
        );
        Ok(())
    }

    /// Check every invariant of the entity graph.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: a duplicate identity, a stale or
    /// dangling copy, or a displayed event that differs from the live one.
    pub fn verify_integrity(&self) -> Result<(), ModelError> {
        snapshot::validate(self.snapshot())?;
        if let Some(shown) = self.view.displayed_event() {
            match self.events.find(&shown.key()) {
                Some(live) if live == shown => {}
                _ => return Err(ModelError::not_found(shown)),
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Cascade machinery
    // -------------------------------------------------------------------

    /// Resolve every relation `event` carries to the live copy.
    fn resolve_relations(&self, event: Event) -> Result<Event, ModelError> {
        ensure_unique(event.persons())?;
        ensure_unique(event.vendors())?;
        let persons = event
            .persons()
            .iter()
            .map(|p| self.persons.resolve(p).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        let vendors = event
            .vendors()
            .iter()
            .map(|v| self.vendors.resolve(v).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        let venue = event
            .venue()
            .map(|v| self.venues.resolve(v).cloned())
            .transpose()?;
        Ok(event.with_persons(persons).with_vendors(vendors).with_venue(venue))
    }

    /// Replace one event directly, then settle its RSVPs.
    fn commit_event(
        &mut self,
        previous: Event,
        current: Event,
        trigger: &'static str,
    ) -> Result<CascadeReport, ModelError> {
        self.events.replace(&previous, current.clone())?;
        debug!(
            kind = %EntityKind::Event,
            from = %previous.key(),
            to = %current.key(),
            trigger,
            "Edited entity"
        );
        let rewrite = EventRewrite { previous, current };
        self.settle(trigger, core::slice::from_ref(&rewrite), |_| RsvpFate::Keep)
    }

    /// Replace every event for which `rewrite` returns a new copy, in
    /// collection order.
    fn rewrite_events<F>(
        &mut self,
        trigger: &'static str,
        mut rewrite: F,
    ) -> Result<Vec<EventRewrite>, ModelError>
    where
        F: FnMut(&Event) -> Option<Event>,
    {
        let rewrites: Vec<EventRewrite> = self
            .events
            .iter()
            .filter_map(|event| {
                rewrite(event).map(|current| EventRewrite {
                    previous: event.clone(),
                    current,
                })
            })
            .collect();
        for step in &rewrites {
            self.events
                .replace(&step.previous, step.current.clone())
                .map_err(|source| cascade_fault(trigger, source))?;
        }
        Ok(rewrites)
    }

    /// Bring every RSVP in line with `rewrites`, then refresh the displayed
    /// event.
    ///
    /// `person_fate` decides first (drop the RSVP, or swap its person); the
    /// result is then re-pointed at the rewritten copy of its event.
    fn settle<F>(
        &mut self,
        trigger: &'static str,
        rewrites: &[EventRewrite],
        mut person_fate: F,
    ) -> Result<CascadeReport, ModelError>
    where
        F: FnMut(&Rsvp) -> RsvpFate,
    {
        let mut report = CascadeReport {
            events_rewritten: rewrites.len(),
            ..CascadeReport::default()
        };

        let plan: Vec<(Rsvp, RsvpFate)> = self
            .rsvps
            .iter()
            .filter_map(|rsvp| {
                let fate = match person_fate(rsvp) {
                    RsvpFate::Drop => RsvpFate::Drop,
                    RsvpFate::Keep => repoint(rsvp, rsvp.clone(), rewrites),
                    RsvpFate::Rewrite(candidate) => repoint(rsvp, *candidate, rewrites),
                };
                match fate {
                    RsvpFate::Keep => None,
                    changed => Some((rsvp.clone(), changed)),
                }
            })
            .collect();

        for (rsvp, fate) in plan {
            match fate {
                RsvpFate::Rewrite(updated) => {
                    self.rsvps
                        .replace(&rsvp, *updated)
                        .map_err(|source| cascade_fault(trigger, source))?;
                    report.rsvps_rewritten = report.rsvps_rewritten.saturating_add(1);
                }
                RsvpFate::Drop => {
                    self.rsvps
                        .remove(&rsvp)
                        .map_err(|source| cascade_fault(trigger, source))?;
                    report.rsvps_removed = report.rsvps_removed.saturating_add(1);
                }
                RsvpFate::Keep => {}
            }
        }

        for step in rewrites {
            if self.view.refresh_displayed(&step.previous, &step.current) {
                report.displayed_changed = true;
            }
        }

        debug!(
            trigger,
            events_rewritten = report.events_rewritten,
            rsvps_rewritten = report.rsvps_rewritten,
            rsvps_removed = report.rsvps_removed,
            displayed_changed = report.displayed_changed,
            "Cascade settled"
        );
        Ok(report)
    }
}

/// Point `candidate` (derived from `original`) at the rewritten copy of its
/// event. Drops it if the rewrite took its person off the roster.
fn repoint(original: &Rsvp, candidate: Rsvp, rewrites: &[EventRewrite]) -> RsvpFate {
    let step = rewrites.iter().find(|step| step.previous.is_same(candidate.event()));
    let candidate = match step {
        Some(step) => {
            let person = candidate.person();
            if step.previous.has_person(person) && !step.current.has_person(person) {
                return RsvpFate::Drop;
            }
            candidate.with_event(step.current.clone())
        }
        None => candidate,
    };
    if candidate == *original {
        RsvpFate::Keep
    } else {
        RsvpFate::Rewrite(Box::new(candidate))
    }
}

/// Wrap a failed cascade step.
fn cascade_fault(trigger: &'static str, source: ModelError) -> ModelError {
    error!(trigger, error = %source, "Cascade step failed on an inconsistent entity graph");
    ModelError::CascadeFault {
        trigger,
        source: Box::new(source),
    }
}

/// Entry `index` of a filtered view.
fn pick<'a, T: Identity>(view: &[&'a T], index: usize) -> Result<&'a T, ModelError> {
    let len = view.len();
    view.get(index).copied().ok_or(ModelError::IndexOutOfRange {
        kind: T::KIND,
        index,
        len,
    })
}
