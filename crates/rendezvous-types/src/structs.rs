//! Entity structs: `Person`, `Venue`, `Vendor`, `Event`, and `Rsvp`.
//!
//! Entities are immutable once built. Fields are private and every "change"
//! produces a new value, so the only way to alter what a collection holds is
//! to hand it a replacement.
//!
//! Relationships are held as copies: an [`Event`] carries the `Person`,
//! `Vendor` and `Venue` values on its roster, and an [`Rsvp`] carries its
//! `Event` and `Person`. Keeping those copies current is the planner's job.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, RsvpStatus};
use crate::error::FieldError;
use crate::fields::{Address, Capacity, Description, Email, EventDate, Name, Note, Phone};
use crate::identity::{Identity, Named, RsvpKey};

// ---------------------------------------------------------------------------
// Person
// ---------------------------------------------------------------------------

/// Someone who may attend events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    name: Name,
    phone: Phone,
    email: Email,
}

impl Person {
    /// Create a person from validated fields.
    pub const fn new(name: Name, phone: Phone, email: Email) -> Self {
        Self { name, phone, email }
    }

    /// The person's phone number.
    pub const fn phone(&self) -> &Phone {
        &self.phone
    }

    /// The person's email address.
    pub const fn email(&self) -> &Email {
        &self.email
    }
}

impl Named for Person {
    fn name(&self) -> &Name {
        &self.name
    }
}

impl Identity for Person {
    type Key = Name;
    const KIND: EntityKind = EntityKind::Person;

    fn key(&self) -> Name {
        self.name.clone()
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}; Phone: {}; Email: {}", self.name, self.phone, self.email)
    }
}

// ---------------------------------------------------------------------------
// Venue
// ---------------------------------------------------------------------------

/// A place an event can be held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    name: Name,
    address: Address,
    capacity: Capacity,
}

impl Venue {
    /// Create a venue from validated fields.
    pub const fn new(name: Name, address: Address, capacity: Capacity) -> Self {
        Self {
            name,
            address,
            capacity,
        }
    }

    /// The venue's street address.
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// How many attendees the venue holds.
    pub const fn capacity(&self) -> Capacity {
        self.capacity
    }
}

impl Named for Venue {
    fn name(&self) -> &Name {
        &self.name
    }
}

impl Identity for Venue {
    type Key = Name;
    const KIND: EntityKind = EntityKind::Venue;

    fn key(&self) -> Name {
        self.name.clone()
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; Address: {}; Capacity: {}",
            self.name, self.address, self.capacity
        )
    }
}

// ---------------------------------------------------------------------------
// Vendor
// ---------------------------------------------------------------------------

/// A supplier engaged for events (caterer, florist, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    name: Name,
    phone: Phone,
    email: Email,
}

impl Vendor {
    /// Create a vendor from validated fields.
    pub const fn new(name: Name, phone: Phone, email: Email) -> Self {
        Self { name, phone, email }
    }

    /// The vendor's phone number.
    pub const fn phone(&self) -> &Phone {
        &self.phone
    }

    /// The vendor's email address.
    pub const fn email(&self) -> &Email {
        &self.email
    }
}

impl Named for Vendor {
    fn name(&self) -> &Name {
        &self.name
    }
}

impl Identity for Vendor {
    type Key = Name;
    const KIND: EntityKind = EntityKind::Vendor;

    fn key(&self) -> Name {
        self.name.clone()
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}; Phone: {}; Email: {}", self.name, self.phone, self.email)
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A planned event with its attendee roster, vendors, and venue.
///
/// `to` is never earlier than `from`; both [`Event::new`] and
/// deserialization enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventRecord", into = "EventRecord")]
pub struct Event {
    name: Name,
    description: Description,
    from: EventDate,
    to: EventDate,
    note: Option<Note>,
    persons: Vec<Person>,
    vendors: Vec<Vendor>,
    venue: Option<Venue>,
}

/// Wire shape of [`Event`]; converted through [`Event::new`] on the way in.
#[derive(Serialize, Deserialize)]
struct EventRecord {
    name: Name,
    description: Description,
    from: EventDate,
    to: EventDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<Note>,
    #[serde(default)]
    persons: Vec<Person>,
    #[serde(default)]
    vendors: Vec<Vendor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    venue: Option<Venue>,
}

impl TryFrom<EventRecord> for Event {
    type Error = FieldError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let event = Self::new(
            record.name,
            record.description,
            record.from,
            record.to,
            record.note,
        )?;
        Ok(event
            .with_persons(record.persons)
            .with_vendors(record.vendors)
            .with_venue(record.venue))
    }
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        Self {
            name: event.name,
            description: event.description,
            from: event.from,
            to: event.to,
            note: event.note,
            persons: event.persons,
            vendors: event.vendors,
            venue: event.venue,
        }
    }
}

impl Event {
    /// Create an event with an empty roster and no venue.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::EndBeforeStart`] if `to` precedes `from`.
    pub fn new(
        name: Name,
        description: Description,
        from: EventDate,
        to: EventDate,
        note: Option<Note>,
    ) -> Result<Self, FieldError> {
        if to < from {
            return Err(FieldError::EndBeforeStart { from, to });
        }
        Ok(Self {
            name,
            description,
            from,
            to,
            note,
            persons: Vec::new(),
            vendors: Vec::new(),
            venue: None,
        })
    }

    /// The event's description.
    pub const fn description(&self) -> &Description {
        &self.description
    }

    /// First day of the event.
    pub const fn from_date(&self) -> EventDate {
        self.from
    }

    /// Last day of the event.
    pub const fn to_date(&self) -> EventDate {
        self.to
    }

    /// Optional remark.
    pub const fn note(&self) -> Option<&Note> {
        self.note.as_ref()
    }

    /// Attendee roster, in the order people were added.
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    /// Vendors engaged for the event, in the order they were added.
    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    /// Venue, if one has been chosen.
    pub const fn venue(&self) -> Option<&Venue> {
        self.venue.as_ref()
    }

    // -------------------------------------------------------------------
    // Roster queries (by identity)
    // -------------------------------------------------------------------

    /// Whether a person with the same identity is on the roster.
    pub fn has_person(&self, person: &Person) -> bool {
        self.persons.iter().any(|p| p.is_same(person))
    }

    /// Whether a vendor with the same identity is engaged.
    pub fn has_vendor(&self, vendor: &Vendor) -> bool {
        self.vendors.iter().any(|v| v.is_same(vendor))
    }

    /// Whether the venue has the same identity as `venue`.
    pub fn has_venue(&self, venue: &Venue) -> bool {
        self.venue.as_ref().is_some_and(|v| v.is_same(venue))
    }

    // -------------------------------------------------------------------
    // Derived copies
    // -------------------------------------------------------------------

    /// Copy with the roster replaced.
    #[must_use]
    pub fn with_persons(self, persons: Vec<Person>) -> Self {
        Self { persons, ..self }
    }

    /// Copy with the vendor list replaced.
    #[must_use]
    pub fn with_vendors(self, vendors: Vec<Vendor>) -> Self {
        Self { vendors, ..self }
    }

    /// Copy with the venue replaced.
    #[must_use]
    pub fn with_venue(self, venue: Option<Venue>) -> Self {
        Self { venue, ..self }
    }

    /// Copy carrying `other`'s roster, vendors and venue.
    ///
    /// Used when editing an event's own fields: build the edited event from
    /// the new details, then take the relationships of the event it replaces.
    #[must_use]
    pub fn with_relations_of(self, other: &Self) -> Self {
        Self {
            persons: other.persons.clone(),
            vendors: other.vendors.clone(),
            venue: other.venue.clone(),
            ..self
        }
    }

    /// Copy with `person` appended to the roster.
    #[must_use]
    pub fn with_person_added(&self, person: Person) -> Self {
        let mut persons = self.persons.clone();
        persons.push(person);
        self.clone().with_persons(persons)
    }

    /// Copy with every roster entry sharing `person`'s identity removed.
    #[must_use]
    pub fn without_person(&self, person: &Person) -> Self {
        let persons = self
            .persons
            .iter()
            .filter(|p| !p.is_same(person))
            .cloned()
            .collect();
        self.clone().with_persons(persons)
    }

    /// Copy with the roster entry matching `target` by identity swapped for
    /// `replacement`, keeping its position.
    #[must_use]
    pub fn with_person_replaced(&self, target: &Person, replacement: &Person) -> Self {
        let persons = self
            .persons
            .iter()
            .map(|p| if p.is_same(target) { replacement.clone() } else { p.clone() })
            .collect();
        self.clone().with_persons(persons)
    }

    /// Copy with `vendor` appended to the vendor list.
    #[must_use]
    pub fn with_vendor_added(&self, vendor: Vendor) -> Self {
        let mut vendors = self.vendors.clone();
        vendors.push(vendor);
        self.clone().with_vendors(vendors)
    }

    /// Copy with every vendor sharing `vendor`'s identity removed.
    #[must_use]
    pub fn without_vendor(&self, vendor: &Vendor) -> Self {
        let vendors = self
            .vendors
            .iter()
            .filter(|v| !v.is_same(vendor))
            .cloned()
            .collect();
        self.clone().with_vendors(vendors)
    }

    /// Copy with the vendor matching `target` by identity swapped for
    /// `replacement`, keeping its position.
    #[must_use]
    pub fn with_vendor_replaced(&self, target: &Vendor, replacement: &Vendor) -> Self {
        let vendors = self
            .vendors
            .iter()
            .map(|v| if v.is_same(target) { replacement.clone() } else { v.clone() })
            .collect();
        self.clone().with_vendors(vendors)
    }
}

impl Named for Event {
    fn name(&self) -> &Name {
        &self.name
    }
}

impl Identity for Event {
    type Key = Name;
    const KIND: EntityKind = EntityKind::Event;

    fn key(&self) -> Name {
        self.name.clone()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; Description: {}; From: {}; To: {}",
            self.name, self.description, self.from, self.to
        )?;
        if let Some(note) = &self.note {
            write!(f, "; Note: {note}")?;
        }
        if let Some(venue) = &self.venue {
            write!(f, "; Venue: {}", venue.name())?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rsvp
// ---------------------------------------------------------------------------

/// A person's attendance answer for one event.
///
/// Identity is the (event, person) pair: a person has at most one RSVP per
/// event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rsvp {
    event: Event,
    person: Person,
    status: RsvpStatus,
}

impl Rsvp {
    /// Create an RSVP.
    pub const fn new(event: Event, person: Person, status: RsvpStatus) -> Self {
        Self {
            event,
            person,
            status,
        }
    }

    /// The event answered for.
    pub const fn event(&self) -> &Event {
        &self.event
    }

    /// The person answering.
    pub const fn person(&self) -> &Person {
        &self.person
    }

    /// The answer.
    pub const fn status(&self) -> RsvpStatus {
        self.status
    }

    /// Copy pointing at a different version of the event.
    #[must_use]
    pub fn with_event(self, event: Event) -> Self {
        Self { event, ..self }
    }

    /// Copy pointing at a different version of the person.
    #[must_use]
    pub fn with_person(self, person: Person) -> Self {
        Self { person, ..self }
    }

    /// Copy with a different status.
    #[must_use]
    pub fn with_status(self, status: RsvpStatus) -> Self {
        Self { status, ..self }
    }
}

impl Identity for Rsvp {
    type Key = RsvpKey;
    const KIND: EntityKind = EntityKind::Rsvp;

    fn key(&self) -> RsvpKey {
        RsvpKey {
            event: self.event.name.clone(),
            person: self.person.name.clone(),
        }
    }
}

impl fmt::Display for Rsvp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} for {}: {}",
            self.person.name, self.event.name, self.status
        )
    }
}
