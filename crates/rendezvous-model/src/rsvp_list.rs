//! The RSVP collection.
//!
//! Identical to [`UniqueList`] except that [`RsvpList::add`] upserts: a
//! second answer from the same person for the same event overwrites the
//! first in place instead of being rejected. Roster membership is not
//! checked here; see [`Planner::is_valid_rsvp`](crate::Planner::is_valid_rsvp).

use rendezvous_types::{Event, Identity, Rsvp, RsvpKey};

use crate::error::ModelError;
use crate::unique_list::UniqueList;

/// Insertion-ordered RSVPs, at most one per (event, person) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsvpList {
    inner: UniqueList<Rsvp>,
}

impl RsvpList {
    /// Create an empty list.
    pub const fn new() -> Self {
        Self {
            inner: UniqueList::new(),
        }
    }

    /// Read-only view of the RSVPs in order.
    pub fn as_slice(&self) -> &[Rsvp] {
        self.inner.as_slice()
    }

    /// Iterate over the RSVPs in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Rsvp> {
        self.inner.iter()
    }

    /// Number of RSVPs.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the list holds no RSVPs.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Whether an RSVP exists for the same (event, person) pair.
    pub fn contains(&self, candidate: &Rsvp) -> bool {
        self.inner.contains(candidate)
    }

    /// The RSVP for a given (event, person) pair.
    pub fn find(&self, key: &RsvpKey) -> Option<&Rsvp> {
        self.inner.find(key)
    }

    /// Record `rsvp`, overwriting any existing answer for the same pair.
    /// Returns the answer it replaced.
    pub fn add(&mut self, rsvp: Rsvp) -> Option<Rsvp> {
        self.inner.upsert(rsvp)
    }

    /// Overwrite the RSVP identified by `target`.
    ///
    /// # Errors
    ///
    /// Same as [`UniqueList::replace`].
    pub fn replace(&mut self, target: &Rsvp, replacement: Rsvp) -> Result<(), ModelError> {
        self.inner.replace(target, replacement)
    }

    /// Remove the RSVP fully equal to `rsvp`.
    ///
    /// # Errors
    ///
    /// Same as [`UniqueList::remove`].
    pub fn remove(&mut self, rsvp: &Rsvp) -> Result<Rsvp, ModelError> {
        self.inner.remove(rsvp)
    }

    /// Replace every RSVP at once.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateEntity`] if two RSVPs share a pair;
    /// bulk loads do not upsert.
    pub fn replace_all(&mut self, rsvps: Vec<Rsvp>) -> Result<(), ModelError> {
        self.inner.replace_all(rsvps)
    }

    /// RSVPs answering for the event with the same identity as `event`.
    ///
    /// The items borrow from the list only, so they outlive `event`.
    pub fn for_event<'a, 'e>(
        &'a self,
        event: &'e Event,
    ) -> impl Iterator<Item = &'a Rsvp> + use<'a, 'e> {
        self.inner.iter().filter(move |rsvp| rsvp.event().is_same(event))
    }
}

impl<'a> IntoIterator for &'a RsvpList {
    type Item = &'a Rsvp;
    type IntoIter = core::slice::Iter<'a, Rsvp>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
