//! Sample planner used to seed an empty data file.
//!
//! Four persons, two venues, three vendors, two events with rosters and
//! vendors, and a handful of RSVPs. Everything goes through the
//! [`Planner`] API, so the result satisfies every integrity rule.

use rendezvous_types::{
    Address, Capacity, Description, Email, Event, EventDate, Name, Note, Person, Phone, Rsvp,
    RsvpStatus, Vendor, Venue,
};

use crate::error::ModelError;
use crate::planner::Planner;
use crate::snapshot::PlannerSnapshot;

/// Helper to build a [`Person`].
fn person(name: &str, phone: &str, email: &str) -> Result<Person, ModelError> {
    Ok(Person::new(Name::parse(name)?, Phone::parse(phone)?, Email::parse(email)?))
}

/// Helper to build a [`Vendor`].
fn vendor(name: &str, phone: &str, email: &str) -> Result<Vendor, ModelError> {
    Ok(Vendor::new(Name::parse(name)?, Phone::parse(phone)?, Email::parse(email)?))
}

/// Helper to build a [`Venue`].
fn venue(name: &str, address: &str, capacity: u32) -> Result<Venue, ModelError> {
    Ok(Venue::new(Name::parse(name)?, Address::parse(address)?, Capacity::new(capacity)?))
}

/// Helper to build a bare [`Event`].
fn event(
    name: &str,
    description: &str,
    from: &str,
    to: &str,
    note: Option<&str>,
) -> Result<Event, ModelError> {
    let note = note.map(Note::parse).transpose()?;
    Ok(Event::new(
        Name::parse(name)?,
        Description::parse(description)?,
        EventDate::parse(from)?,
        EventDate::parse(to)?,
        note,
    )?)
}

/// Build the sample planner.
///
/// # Errors
///
/// Returns [`ModelError`] only if the sample data itself violates a rule.
pub fn create_sample_planner() -> Result<Planner, ModelError> {
    let mut planner = Planner::new();

    let alex = person("Alex Yeoh", "87438807", "alexyeoh@example.com")?;
    let bernice = person("Bernice Yu", "99272758", "berniceyu@example.com")?;
    let charlotte = person("Charlotte Oliveiro", "93210283", "charlotte@example.com")?;
    let david = person("David Li", "91031282", "lidavid@example.com")?;
    for p in [&alex, &bernice, &charlotte, &david] {
        planner.add_person(p.clone())?;
    }

    let ballroom = venue("Grand Ballroom", "10 Bayfront Avenue", 300)?;
    let garden = venue("Botanic Lawn", "1 Cluny Road", 120)?;
    planner.add_venue(ballroom.clone())?;
    planner.add_venue(garden.clone())?;

    let florist = vendor("Petal Works", "62351188", "orders@petalworks.com")?;
    let caterer = vendor("Harvest Catering", "64457700", "events@harvest.com")?;
    let band = vendor("Blue Note Trio", "81234567", "bookings@bluenote.com")?;
    for v in [&florist, &caterer, &band] {
        planner.add_vendor(v.clone())?;
    }

    let gala = event(
        "Annual Gala",
        "Black tie dinner and awards",
        "2024-11-15",
        "2024-11-15",
        Some("Dress code strictly enforced"),
    )?
    .with_persons(vec![alex.clone(), bernice.clone(), charlotte.clone()])
    .with_vendors(vec![florist, caterer.clone(), band])
    .with_venue(Some(ballroom));
    let picnic = event(
        "Team Picnic",
        "Afternoon games and barbecue",
        "2024-08-03",
        "2024-08-04",
        None,
    )?
    .with_persons(vec![bernice.clone(), david.clone()])
    .with_vendors(vec![caterer])
    .with_venue(Some(garden));
    planner.add_event(gala.clone())?;
    planner.add_event(picnic.clone())?;

    planner.add_rsvp(Rsvp::new(gala.clone(), alex, RsvpStatus::ConfirmComing))?;
    planner.add_rsvp(Rsvp::new(gala, bernice.clone(), RsvpStatus::ToBeConfirmed))?;
    planner.add_rsvp(Rsvp::new(picnic.clone(), bernice, RsvpStatus::ConfirmComing))?;
    planner.add_rsvp(Rsvp::new(picnic, david, RsvpStatus::ConfirmNotComing))?;

    Ok(planner)
}

/// The sample planner as a snapshot, ready to be written to disk.
///
/// # Errors
///
/// Same as [`create_sample_planner`].
pub fn sample_snapshot() -> Result<PlannerSnapshot, ModelError> {
    create_sample_planner().map(|planner| planner.snapshot())
}
