//! Per-event summaries logged at startup.

use rendezvous_model::Planner;
use rendezvous_types::{Event, Named, RsvpStatus};

/// What the detail panel shows for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    /// Event name.
    pub name: String,
    /// Dates as `from..to`.
    pub dates: String,
    /// Venue name, if the event has one.
    pub venue: Option<String>,
    /// Number of persons on the roster.
    pub roster: usize,
    /// Number of vendors engaged.
    pub vendors: usize,
    /// RSVPs confirmed coming.
    pub coming: usize,
    /// RSVPs confirmed not coming.
    pub not_coming: usize,
    /// RSVPs still to be confirmed.
    pub pending: usize,
    /// Roster members with no RSVP at all.
    pub unanswered: usize,
}

impl EventSummary {
    /// Summarise `event` using the RSVPs held by `planner`.
    pub fn of(planner: &Planner, event: &Event) -> Self {
        let rsvps = planner.rsvps_for(event);
        let count = |status: RsvpStatus| rsvps.iter().filter(|r| r.status() == status).count();
        Self {
            name: event.name().to_string(),
            dates: format!("{}..{}", event.from_date(), event.to_date()),
            venue: event.venue().map(|v| v.name().to_string()),
            roster: event.persons().len(),
            vendors: event.vendors().len(),
            coming: count(RsvpStatus::ConfirmComing),
            not_coming: count(RsvpStatus::ConfirmNotComing),
            pending: count(RsvpStatus::ToBeConfirmed),
            unanswered: event.persons().len().saturating_sub(rsvps.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rendezvous_model::{ModelError, create_sample_planner};

    use super::*;

    #[test]
    fn sample_gala_summary() -> Result<(), ModelError> {
        let planner = create_sample_planner()?;
        let gala = planner.events().iter().find(|e| e.name().as_str() == "Annual Gala");
        let summary = gala.map(|e| EventSummary::of(&planner, e));

        assert_eq!(
            summary,
            Some(EventSummary {
                name: "Annual Gala".to_owned(),
                dates: "2024-11-15..2024-11-15".to_owned(),
                venue: Some("Grand Ballroom".to_owned()),
                roster: 3,
                vendors: 3,
                coming: 1,
                not_coming: 0,
                pending: 1,
                unanswered: 1,
            })
        );
        Ok(())
    }

    #[test]
    fn empty_planner_has_nothing_to_summarise() {
        let planner = Planner::new();
        let summaries: Vec<EventSummary> =
            planner.events().iter().map(|e| EventSummary::of(&planner, e)).collect();
        assert!(summaries.is_empty());
    }
}
