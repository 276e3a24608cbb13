//! Property tests for the `rendezvous-model` collections and planner.
//!
//! Operation sequences are drawn from small name pools so that collisions
//! and stale references happen often. Individual operations are allowed to
//! fail; the properties must hold after every step regardless.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::collections::BTreeSet;

use proptest::prelude::*;
use rendezvous_model::{Planner, UniqueList};
use rendezvous_types::{
    Description, Email, Event, EventDate, Identity, Name, Person, Phone, RsvpStatus,
};

const PERSON_NAMES: [&str; 4] = ["Alice", "Bob", "Carol", "Dan"];
const EVENT_NAMES: [&str; 3] = ["Gala", "Picnic", "Retreat"];

fn person(name_index: usize, phone: u16) -> Person {
    Person::new(
        Name::parse(PERSON_NAMES[name_index % PERSON_NAMES.len()]).unwrap(),
        Phone::parse(format!("{:03}", phone % 1000)).unwrap(),
        Email::parse("a@x.com").unwrap(),
    )
}

fn event(name_index: usize) -> Event {
    Event::new(
        Name::parse(EVENT_NAMES[name_index % EVENT_NAMES.len()]).unwrap(),
        Description::parse("Planned").unwrap(),
        EventDate::parse("2024-05-01").unwrap(),
        EventDate::parse("2024-05-03").unwrap(),
        None,
    )
    .unwrap()
}

fn status(code: u8) -> RsvpStatus {
    RsvpStatus::ALL[usize::from(code) % RsvpStatus::ALL.len()]
}

fn keys_are_unique<T: Identity>(items: &[T]) -> bool {
    let keys: BTreeSet<_> = items.iter().map(Identity::key).collect();
    keys.len() == items.len()
}

// =============================================================================
// Collection operations
// =============================================================================

#[derive(Debug, Clone)]
enum ListOp {
    Add(usize, u16),
    Replace(usize, usize, u16),
    ReplaceAll(Vec<(usize, u16)>),
    Upsert(usize, u16),
}

fn arb_list_op() -> impl Strategy<Value = ListOp> {
    prop_oneof![
        (0..4usize, any::<u16>()).prop_map(|(n, p)| ListOp::Add(n, p)),
        (0..4usize, 0..4usize, any::<u16>()).prop_map(|(t, n, p)| ListOp::Replace(t, n, p)),
        prop::collection::vec((0..4usize, any::<u16>()), 0..5).prop_map(ListOp::ReplaceAll),
        (0..4usize, any::<u16>()).prop_map(|(n, p)| ListOp::Upsert(n, p)),
    ]
}

// =============================================================================
// Planner operations
// =============================================================================

#[derive(Debug, Clone)]
enum PlannerOp {
    AddPerson(usize, u16),
    EditPerson(usize, usize, u16),
    DeletePerson(usize),
    AddEvent(usize),
    RenameEvent(usize, usize),
    DeleteEvent(usize),
    Assign(usize, usize),
    Unassign(usize, usize),
    Record(usize, usize, u8),
    Display(usize),
}

fn arb_planner_op() -> impl Strategy<Value = PlannerOp> {
    prop_oneof![
        (0..4usize, any::<u16>()).prop_map(|(n, p)| PlannerOp::AddPerson(n, p)),
        (0..4usize, 0..4usize, any::<u16>()).prop_map(|(t, n, p)| PlannerOp::EditPerson(t, n, p)),
        (0..4usize).prop_map(PlannerOp::DeletePerson),
        (0..3usize).prop_map(PlannerOp::AddEvent),
        (0..3usize, 0..3usize).prop_map(|(t, n)| PlannerOp::RenameEvent(t, n)),
        (0..3usize).prop_map(PlannerOp::DeleteEvent),
        (0..3usize, 0..4usize).prop_map(|(e, p)| PlannerOp::Assign(e, p)),
        (0..3usize, 0..4usize).prop_map(|(e, p)| PlannerOp::Unassign(e, p)),
        (0..3usize, 0..4usize, any::<u8>()).prop_map(|(e, p, s)| PlannerOp::Record(e, p, s)),
        (0..3usize).prop_map(PlannerOp::Display),
    ]
}

fn person_at(planner: &Planner, index: usize) -> Option<Person> {
    planner.persons().get(index).cloned()
}

fn event_at(planner: &Planner, index: usize) -> Option<Event> {
    planner.events().get(index).cloned()
}

/// Apply `op`, resolving indexes against the live collections. Errors are
/// expected and ignored.
fn apply(planner: &mut Planner, op: PlannerOp) {
    match op {
        PlannerOp::AddPerson(n, p) => {
            let _ = planner.add_person(person(n, p));
        }
        PlannerOp::EditPerson(t, n, p) => {
            if let Some(target) = person_at(planner, t) {
                let _ = planner.edit_person(&target, person(n, p));
            }
        }
        PlannerOp::DeletePerson(t) => {
            if let Some(target) = person_at(planner, t) {
                let _ = planner.delete_person(&target);
            }
        }
        PlannerOp::AddEvent(n) => {
            let _ = planner.add_event(event(n));
        }
        PlannerOp::RenameEvent(t, n) => {
            if let Some(target) = event_at(planner, t) {
                let _ = planner.edit_event(&target, event(n));
            }
        }
        PlannerOp::DeleteEvent(t) => {
            if let Some(target) = event_at(planner, t) {
                let _ = planner.delete_event(&target);
            }
        }
        PlannerOp::Assign(e, p) => {
            if let (Some(ev), Some(pe)) = (event_at(planner, e), person_at(planner, p)) {
                let _ = planner.assign_person(&ev, &pe);
            }
        }
        PlannerOp::Unassign(e, p) => {
            if let (Some(ev), Some(pe)) = (event_at(planner, e), person_at(planner, p)) {
                let _ = planner.unassign_person(&ev, &pe);
            }
        }
        PlannerOp::Record(e, p, s) => {
            let _ = planner.record_rsvp(e, p, status(s));
        }
        PlannerOp::Display(e) => {
            let target = event_at(planner, e);
            let _ = planner.set_displayed_event(target.as_ref());
        }
    }
}

proptest! {
    /// No sequence of individually successful list operations produces two
    /// entries with the same identity.
    #[test]
    fn prop_identity_uniqueness(ops in prop::collection::vec(arb_list_op(), 0..40)) {
        let mut list: UniqueList<Person> = UniqueList::new();
        for op in ops {
            match op {
                ListOp::Add(n, p) => {
                    let _ = list.add(person(n, p));
                }
                ListOp::Replace(t, n, p) => {
                    if let Some(target) = list.get(t).cloned() {
                        let _ = list.replace(&target, person(n, p));
                    }
                }
                ListOp::ReplaceAll(items) => {
                    let batch = items.into_iter().map(|(n, p)| person(n, p)).collect();
                    let _ = list.replace_all(batch);
                }
                ListOp::Upsert(n, p) => {
                    let _ = list.upsert(person(n, p));
                }
            }
            prop_assert!(keys_are_unique(list.as_slice()), "duplicate identity in {:?}", list);
        }
    }

    /// The planner's graph stays consistent after every operation: no
    /// duplicates, no stale or dangling copies, and the displayed event is
    /// always the live one.
    #[test]
    fn prop_planner_integrity(ops in prop::collection::vec(arb_planner_op(), 0..60)) {
        let mut planner = Planner::new();
        for op in ops {
            apply(&mut planner, op.clone());
            let verdict = planner.verify_integrity();
            prop_assert!(verdict.is_ok(), "after {:?}: {:?}", op, verdict);
            prop_assert!(planner.rsvps().iter().all(|r| planner.is_valid_rsvp(r)),
                "rsvp for someone off the roster after {:?}", op);
        }
    }

    /// Recording twice for the same pair keeps one RSVP holding the later
    /// status.
    #[test]
    fn prop_rsvp_upsert(first in any::<u8>(), second in any::<u8>()) {
        let mut planner = Planner::new();
        let alice = person(0, 111);
        planner.add_person(alice.clone()).unwrap();
        planner.add_event(event(0).with_persons(vec![alice])).unwrap();

        planner.record_rsvp(0, 0, status(first)).unwrap();
        planner.record_rsvp(0, 0, status(second)).unwrap();

        prop_assert_eq!(planner.rsvps().len(), 1);
        prop_assert_eq!(planner.rsvps()[0].status(), status(second));
    }

    /// Snapshot then load reproduces every collection exactly.
    #[test]
    fn prop_snapshot_round_trip(ops in prop::collection::vec(arb_planner_op(), 0..40)) {
        let mut planner = Planner::new();
        for op in ops {
            apply(&mut planner, op);
        }
        let reloaded = Planner::from_snapshot(planner.snapshot()).unwrap();
        prop_assert_eq!(reloaded.snapshot(), planner.snapshot());
    }
}
