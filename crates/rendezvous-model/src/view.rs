//! Filtered projections and the displayed-event slot.
//!
//! A [`Filter`] is a predicate, not a copy: projections are re-derived from
//! the live collection every time they are read, so they cannot go stale.
//! The one piece of state that *can* go stale is the displayed event, which
//! is a copy; the planner refreshes it as the last step of every cascade
//! that touches an event.

use core::fmt;
use std::sync::Arc;

use rendezvous_types::{Event, Identity, Name, Named, Person, Rsvp, Vendor, Venue};

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A named predicate selecting which entries of a collection are visible.
pub struct Filter<T> {
    label: String,
    predicate: Predicate<T>,
}

impl<T: 'static> Filter<T> {
    /// The filter that shows everything.
    pub fn all() -> Self {
        Self::new("all", |_| true)
    }

    /// Wrap an arbitrary predicate.
    pub fn new<F>(label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Short description of what the filter selects.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether `item` passes the filter.
    pub fn matches(&self, item: &T) -> bool {
        (self.predicate)(item)
    }

    /// The entries of `items` that pass, in order.
    pub fn apply<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

impl<T: Named + 'static> Filter<T> {
    /// Select entries whose name contains any of `keywords` as a whole word,
    /// ignoring case. Blank keywords are ignored; with none left, nothing
    /// matches.
    pub fn name_contains_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        let label = format!("name contains any of [{}]", keywords.join(", "));
        Self::new(label, move |item: &T| {
            item.name()
                .as_str()
                .split_whitespace()
                .any(|word| keywords.contains(&word.to_lowercase()))
        })
    }
}

impl Filter<Rsvp> {
    /// Select the RSVPs answering for the event called `event`.
    pub fn rsvps_for_event(event: Name) -> Self {
        let label = format!("rsvps for {event}");
        Self::new(label, move |rsvp: &Rsvp| rsvp.key().event == event)
    }
}

impl<T> Clone for Filter<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T: 'static> Default for Filter<T> {
    fn default() -> Self {
        Self::all()
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter").field("label", &self.label).finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Per-kind filters plus the currently displayed event.
///
/// Mutation is crate-private: the displayed event may only be set to a
/// copy the planner has just read from its event collection.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    persons: Filter<Person>,
    venues: Filter<Venue>,
    vendors: Filter<Vendor>,
    events: Filter<Event>,
    rsvps: Filter<Rsvp>,
    displayed_event: Option<Event>,
}

impl ViewState {
    /// Active person filter.
    pub const fn person_filter(&self) -> &Filter<Person> {
        &self.persons
    }

    /// Active venue filter.
    pub const fn venue_filter(&self) -> &Filter<Venue> {
        &self.venues
    }

    /// Active vendor filter.
    pub const fn vendor_filter(&self) -> &Filter<Vendor> {
        &self.vendors
    }

    /// Active event filter.
    pub const fn event_filter(&self) -> &Filter<Event> {
        &self.events
    }

    /// Active RSVP filter.
    pub const fn rsvp_filter(&self) -> &Filter<Rsvp> {
        &self.rsvps
    }

    /// The event currently being viewed, if any.
    pub const fn displayed_event(&self) -> Option<&Event> {
        self.displayed_event.as_ref()
    }

    pub(crate) fn set_person_filter(&mut self, filter: Filter<Person>) {
        self.persons = filter;
    }

    pub(crate) fn set_venue_filter(&mut self, filter: Filter<Venue>) {
        self.venues = filter;
    }

    pub(crate) fn set_vendor_filter(&mut self, filter: Filter<Vendor>) {
        self.vendors = filter;
    }

    pub(crate) fn set_event_filter(&mut self, filter: Filter<Event>) {
        self.events = filter;
    }

    pub(crate) fn set_rsvp_filter(&mut self, filter: Filter<Rsvp>) {
        self.rsvps = filter;
    }

    pub(crate) fn set_displayed_event(&mut self, event: Option<Event>) {
        self.displayed_event = event;
    }

    /// Swap the displayed event for `current` if it is `previous`.
    ///
    /// Returns whether the displayed event changed.
    pub(crate) fn refresh_displayed(&mut self, previous: &Event, current: &Event) -> bool {
        match &mut self.displayed_event {
            Some(shown) if shown.is_same(previous) => {
                *shown = current.clone();
                true
            }
            _ => false,
        }
    }

    /// Clear the displayed event if it is `removed`.
    ///
    /// Returns whether the slot was cleared.
    pub(crate) fn clear_displayed_if(&mut self, removed: &Event) -> bool {
        if self.displayed_event.as_ref().is_some_and(|shown| shown.is_same(removed)) {
            self.displayed_event = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use rendezvous_types::{Email, FieldError, Phone};

    use super::*;

    fn person(name: &str) -> Result<Person, FieldError> {
        Ok(Person::new(
            Name::parse(name)?,
            Phone::parse("111")?,
            Email::parse("a@x.com")?,
        ))
    }

    #[test]
    fn default_filter_shows_everything() -> Result<(), FieldError> {
        let people = vec![person("Alice")?, person("Bob")?];
        assert_eq!(Filter::<Person>::all().apply(&people).len(), 2);
        Ok(())
    }

    #[test]
    fn keyword_filter_matches_whole_words_ignoring_case() -> Result<(), FieldError> {
        let people = vec![person("Alice Tan")?, person("Bob Lim")?, person("Tanya Ong")?];
        let filter = Filter::<Person>::name_contains_keywords(["tan", "ONG"]);
        let hits: Vec<&str> = filter
            .apply(&people)
            .into_iter()
            .map(|p| p.name().as_str())
            .collect();
        assert_eq!(hits, ["Alice Tan", "Tanya Ong"]);
        Ok(())
    }

    #[test]
    fn keyword_filter_ignores_blank_keywords() -> Result<(), FieldError> {
        let people = vec![person("Alice")?];
        let filter = Filter::<Person>::name_contains_keywords(["  ", ""]);
        assert!(filter.apply(&people).is_empty());
        Ok(())
    }

    #[test]
    fn filters_are_cheap_to_clone_and_debug() {
        let filter = Filter::<Person>::name_contains_keywords(["alice"]);
        let copy = filter.clone();
        assert_eq!(copy.label(), filter.label());
        assert!(format!("{filter:?}").contains("alice"));
    }
}
